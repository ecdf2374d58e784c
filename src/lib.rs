pub mod actions {
    pub mod playlist_actions;
    pub mod snapshot_playlist;
}
pub mod authorize;
pub mod barcode;
pub mod config;
pub mod endpoints;
pub mod models {
    pub mod playlist;
    pub mod snapshot;
    pub mod track;
}
pub mod store;
pub mod web;

pub use actions::snapshot_playlist::{FetchOutcome, PlaylistSnapshotter, SavedSnapshot};
pub use config::SnapshotifyConfig;
pub use models::snapshot::Snapshot;
pub use models::track::Track;
pub use store::SnapshotStore;
