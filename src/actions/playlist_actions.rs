use reqwest::blocking::Client;
use serde_json::Value;

use crate::api_endpoint;
use crate::authorize::{error_parts, Access, ApiError};

/// Field selection sent with every playlist request.
pub const PLAYLIST_FIELDS: &str = "name,tracks(items(track(id,name,artists(name),album(name,release_date),duration_ms,external_ids(isrc)),added_at))";

pub fn get_playlist(
    client: &Client,
    api_url: &str,
    access: &Access,
    playlist_id: &str,
) -> Result<Value, ApiError> {
    let request_builder = client.get(api_endpoint!(api_url, "/playlists/{playlist_id}"));
    let request_builder = access.authorize(request_builder);
    let request = request_builder
        .query(&[("fields", PLAYLIST_FIELDS)])
        .build()?;
    log::debug!("Fetching playlist from {}", request.url());
    let resp = client.execute(request)?;
    let resp = error_parts(resp).map_err(|(status, body)| ApiError::Fetch { status, body })?;
    let resp = resp.json::<Value>()?;
    log::info!(
        "Fetched playlist {} ({})",
        playlist_id,
        resp.get("name").and_then(Value::as_str).unwrap_or_default()
    );
    Ok(resp)
}
