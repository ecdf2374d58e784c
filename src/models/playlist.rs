use serde_json::Value;

use crate::models::track::{format_duration, Track};
use crate::open_spotify_url;

static NULL: Value = Value::Null;

/// Playlist name and tracks extracted from a raw playlist response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistContents {
    pub name: String,
    pub tracks: Vec<Track>,
}

/// Follows `path` through nested objects. Any missing key, or a non-object on the
/// way, resolves to `null`.
fn lookup<'a>(value: &'a Value, path: &[&str]) -> &'a Value {
    match path.split_first() {
        None => value,
        Some((key, rest)) => lookup(value.get(*key).unwrap_or(&NULL), rest),
    }
}

fn text(value: &Value, path: &[&str]) -> String {
    lookup(value, path).as_str().unwrap_or_default().to_string()
}

fn list<'a>(value: &'a Value, path: &[&str]) -> &'a [Value] {
    lookup(value, path).as_array().map(Vec::as_slice).unwrap_or_default()
}

fn millis(value: &Value, path: &[&str]) -> u64 {
    let value = lookup(value, path);
    value
        .as_u64()
        .or_else(|| value.as_f64().filter(|ms| *ms > 0.0).map(|ms| ms as u64))
        .unwrap_or(0)
}

fn parse_track(position: usize, item: &Value) -> Track {
    let track = lookup(item, &["track"]);
    let artists = list(track, &["artists"])
        .iter()
        .map(|artist| lookup(artist, &["name"]).as_str().unwrap_or_default())
        .collect::<Vec<_>>()
        .join(", ");
    let spotify_url = match lookup(track, &["id"]).as_str() {
        Some(id) if !id.is_empty() => open_spotify_url!("/track/{id}"),
        _ => String::new(),
    };

    Track {
        position,
        artists,
        name: text(track, &["name"]),
        album: text(track, &["album", "name"]),
        release_date: text(track, &["album", "release_date"]),
        duration_formatted: format_duration(millis(track, &["duration_ms"])),
        spotify_url,
        isrc: text(track, &["external_ids", "isrc"]),
        added_at: text(item, &["added_at"]),
    }
}

/// Reshapes a raw playlist response. Never fails: absent or mistyped fields become
/// empty strings or zero.
pub fn parse_playlist(raw: &Value) -> PlaylistContents {
    let tracks = list(raw, &["tracks", "items"])
        .iter()
        .enumerate()
        .map(|(index, item)| parse_track(index + 1, item))
        .collect();

    PlaylistContents {
        name: text(raw, &["name"]),
        tracks,
    }
}
