use serde::{Deserialize, Serialize};

/// One playlist entry as stored in a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Track {
    pub position: usize,
    pub artists: String,
    pub name: String,
    pub album: String,
    pub release_date: String,
    pub duration_formatted: String,
    pub spotify_url: String,
    pub isrc: String,
    pub added_at: String,
}

/// Formats milliseconds as `M:SS`. Minutes are not capped.
pub fn format_duration(duration_ms: u64) -> String {
    let seconds = duration_ms / 1000;
    format!("{}:{:02}", seconds / 60, seconds % 60)
}
