use mockito::{Matcher, Mock, ServerGuard};
use snapshotify::authorize::Credentials;
use snapshotify::{FetchOutcome, PlaylistSnapshotter, SnapshotStore, SnapshotifyConfig};
use tempfile::TempDir;

const PLAYLIST: &str = r#"{
  "name": "Test",
  "tracks": {
    "items": [
      {
        "track": {
          "id": "abc",
          "name": "Song",
          "artists": [{ "name": "Artist" }],
          "album": { "name": "Alb", "release_date": "2020-01-01" },
          "duration_ms": 125000,
          "external_ids": { "isrc": "X1" }
        },
        "added_at": "2024-01-01T00:00:00Z"
      },
      {
        "track": { "name": "Bare" }
      }
    ]
  }
}"#;

fn config(server: &ServerGuard) -> SnapshotifyConfig {
    SnapshotifyConfig {
        credentials: Some(Credentials {
            client_id: "id".to_string(),
            client_secret: "secret".to_string(),
        }),
        playlist_id: "default-list".to_string(),
        accounts_url: server.url(),
        api_url: server.url(),
        ..SnapshotifyConfig::default()
    }
}

fn token_mock(server: &mut ServerGuard) -> Mock {
    server
        .mock("POST", "/api/token")
        .match_body(Matcher::UrlEncoded(
            "grant_type".into(),
            "client_credentials".into(),
        ))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"access_token":"tok","token_type":"Bearer","expires_in":3600}"#)
        .create()
}

#[test]
fn fetch_and_save_writes_todays_snapshot() {
    let mut server = mockito::Server::new();
    let token = token_mock(&mut server);
    let playlist = server
        .mock("GET", "/playlists/default-list")
        .match_header("authorization", "Bearer tok")
        .match_query(Matcher::Regex("fields=".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(PLAYLIST)
        .create();

    let temp_dir = TempDir::new().unwrap();
    let store = SnapshotStore::new(temp_dir.path().join("data"));
    let snapshotter = PlaylistSnapshotter::new(&config(&server), store.clone());

    let saved = match snapshotter.run(None) {
        FetchOutcome::Saved(saved) => saved,
        FetchOutcome::Failed { error } => panic!("fetch failed: {error}"),
    };
    token.assert();
    playlist.assert();
    assert_eq!(saved.total_tracks, 2);

    let dates = store.list_dates();
    assert_eq!(dates.len(), 1);
    assert!(saved.path.ends_with(format!("playlist_{}.json", dates[0])));
    assert!(saved.timestamp.starts_with(&dates[0]));

    let snapshot = store.load(&dates[0]).unwrap();
    assert_eq!(snapshot.playlist_id, "default-list");
    assert_eq!(
        snapshot.playlist_url,
        "https://open.spotify.com/playlist/default-list"
    );
    assert_eq!(snapshot.name, "Test");
    assert_eq!(snapshot.date, dates[0]);
    assert_eq!(snapshot.timestamp, saved.timestamp);
    assert_eq!(snapshot.total_tracks, snapshot.tracks.len());

    let first = &snapshot.tracks[0];
    assert_eq!(first.position, 1);
    assert_eq!(first.artists, "Artist");
    assert_eq!(first.duration_formatted, "2:05");
    assert_eq!(first.spotify_url, "https://open.spotify.com/track/abc");
    assert_eq!(first.isrc, "X1");

    let second = &snapshot.tracks[1];
    assert_eq!(second.position, 2);
    assert_eq!(second.name, "Bare");
    assert_eq!(second.spotify_url, "");
    assert_eq!(second.duration_formatted, "0:00");
}

#[test]
fn explicit_playlist_id_overrides_default() {
    let mut server = mockito::Server::new();
    let _token = token_mock(&mut server);
    let playlist = server
        .mock("GET", "/playlists/other")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"name":"Other","tracks":{"items":[]}}"#)
        .create();

    let temp_dir = TempDir::new().unwrap();
    let store = SnapshotStore::new(temp_dir.path());
    let snapshotter = PlaylistSnapshotter::new(&config(&server), store.clone());

    let outcome = snapshotter.run(Some("other"));
    assert!(outcome.is_success());
    playlist.assert();

    let snapshot = store.latest().unwrap();
    assert_eq!(snapshot.playlist_id, "other");
    assert_eq!(snapshot.total_tracks, 0);
    assert!(snapshot.tracks.is_empty());
}

#[test]
fn rejected_token_is_reported_and_nothing_is_written() {
    let mut server = mockito::Server::new();
    server
        .mock("POST", "/api/token")
        .with_status(401)
        .with_body("invalid_client")
        .create();
    let playlist = server
        .mock("GET", Matcher::Any)
        .expect(0)
        .create();

    let temp_dir = TempDir::new().unwrap();
    let store = SnapshotStore::new(temp_dir.path().join("data"));
    let snapshotter = PlaylistSnapshotter::new(&config(&server), store.clone());

    match snapshotter.run(None) {
        FetchOutcome::Failed { error } => {
            assert_eq!(
                error,
                "Failed to get access token: 401 Unauthorized - invalid_client"
            );
        }
        FetchOutcome::Saved(saved) => panic!("unexpected save to {}", saved.path.display()),
    }
    playlist.assert();
    assert!(store.list_dates().is_empty());
}

#[test]
fn rejected_playlist_fetch_is_reported() {
    let mut server = mockito::Server::new();
    let _token = token_mock(&mut server);
    server
        .mock("GET", "/playlists/default-list")
        .match_query(Matcher::Any)
        .with_status(404)
        .with_body(r#"{"error":{"status":404,"message":"Resource not found"}}"#)
        .create();

    let temp_dir = TempDir::new().unwrap();
    let store = SnapshotStore::new(temp_dir.path());
    let snapshotter = PlaylistSnapshotter::new(&config(&server), store.clone());

    match snapshotter.run(None) {
        FetchOutcome::Failed { error } => {
            assert!(error.starts_with("Failed to get playlist tracks: 404 Not Found - "));
            assert!(error.contains("Resource not found"));
        }
        FetchOutcome::Saved(saved) => panic!("unexpected save to {}", saved.path.display()),
    }
    assert!(store.list_dates().is_empty());
}
