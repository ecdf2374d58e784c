use serde::{Deserialize, Serialize};

use crate::models::track::Track;

/// A dated capture of a playlist. Field order is the on-disk order.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Snapshot {
    pub playlist_id: String,
    pub playlist_url: String,
    pub name: String,
    pub date: String,
    pub timestamp: String,
    pub total_tracks: usize,
    pub tracks: Vec<Track>,
}
