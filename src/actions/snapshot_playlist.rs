use std::path::PathBuf;

use chrono::{DateTime, Local};
use reqwest::blocking::Client;
use thiserror::Error;

use crate::actions::playlist_actions::get_playlist;
use crate::authorize::{get_access_token, ApiError, Credentials};
use crate::config::SnapshotifyConfig;
use crate::models::playlist::{parse_playlist, PlaylistContents};
use crate::models::snapshot::Snapshot;
use crate::open_spotify_url;
use crate::store::{SnapshotStore, StoreError, DATE_FORMAT};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedSnapshot {
    pub path: PathBuf,
    pub total_tracks: usize,
    pub timestamp: String,
}

/// Result of one fetch-and-save run. Failures carry the error text only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Saved(SavedSnapshot),
    Failed { error: String },
}

impl FetchOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, FetchOutcome::Saved(_))
    }
}

/// Assembles the stored record. `date` and `timestamp` both come from `fetched_at`.
pub fn build_snapshot(
    playlist_id: &str,
    contents: PlaylistContents,
    fetched_at: DateTime<Local>,
) -> Snapshot {
    Snapshot {
        playlist_id: playlist_id.to_string(),
        playlist_url: open_spotify_url!("/playlist/{playlist_id}"),
        name: contents.name,
        date: fetched_at.format(DATE_FORMAT).to_string(),
        timestamp: fetched_at.format(TIMESTAMP_FORMAT).to_string(),
        total_tracks: contents.tracks.len(),
        tracks: contents.tracks,
    }
}

pub struct PlaylistSnapshotter {
    client: Client,
    credentials: Option<Credentials>,
    accounts_url: String,
    api_url: String,
    default_playlist_id: String,
    store: SnapshotStore,
}

impl PlaylistSnapshotter {
    pub fn new(config: &SnapshotifyConfig, store: SnapshotStore) -> Self {
        PlaylistSnapshotter {
            client: Client::new(),
            credentials: config.credentials.clone(),
            accounts_url: config.accounts_url.clone(),
            api_url: config.api_url.clone(),
            default_playlist_id: config.playlist_id.clone(),
            store,
        }
    }

    /// Authenticates, fetches and normalizes. Nothing is written.
    pub fn fetch_snapshot(
        &self,
        playlist_id: &str,
        fetched_at: DateTime<Local>,
    ) -> Result<Snapshot, ApiError> {
        let credentials = self
            .credentials
            .as_ref()
            .ok_or(ApiError::MissingCredentials)?;
        let access = get_access_token(&self.client, &self.accounts_url, credentials)?;
        let raw = get_playlist(&self.client, &self.api_url, &access, playlist_id)?;
        Ok(build_snapshot(playlist_id, parse_playlist(&raw), fetched_at))
    }

    /// Fetches the playlist (the configured one when `playlist_id` is `None`) and
    /// stores it under today's date, replacing any snapshot already saved today.
    pub fn fetch_and_save(
        &self,
        playlist_id: Option<&str>,
    ) -> Result<SavedSnapshot, SnapshotError> {
        let playlist_id = playlist_id.unwrap_or(self.default_playlist_id.as_str());
        let now = Local::now();
        let snapshot = self.fetch_snapshot(playlist_id, now)?;
        let path = self.store.save(&snapshot, Some(now.date_naive()))?;
        Ok(SavedSnapshot {
            path,
            total_tracks: snapshot.total_tracks,
            timestamp: snapshot.timestamp,
        })
    }

    pub fn run(&self, playlist_id: Option<&str>) -> FetchOutcome {
        match self.fetch_and_save(playlist_id) {
            Ok(saved) => FetchOutcome::Saved(saved),
            Err(err) => {
                log::error!("Snapshot failed: {}", err);
                FetchOutcome::Failed {
                    error: err.to_string(),
                }
            }
        }
    }
}
