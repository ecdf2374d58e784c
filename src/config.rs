use std::net::{IpAddr, Ipv4Addr};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::authorize::Credentials;
use crate::endpoints::{DEFAULT_ACCOUNTS_URL, DEFAULT_API_URL};

pub const DEFAULT_PLAYLIST_ID: &str = "5VAWBjNvITrvEFSYwgq5iK";
pub const DEFAULT_DATA_DIR: &str = "data";

/// On-disk shape of the config file. Every key is optional.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct SnapshotifyConfigFile {
    client_id: Option<String>,
    client_secret: Option<String>,
    playlist_id: Option<String>,
    data_dir: Option<PathBuf>,
    address: Option<IpAddr>,
    port: Option<u16>,
    accounts_url: Option<String>,
    api_url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SnapshotifyConfig {
    pub credentials: Option<Credentials>,
    pub playlist_id: String,
    pub data_dir: PathBuf,
    pub address: IpAddr,
    pub port: u16,
    pub accounts_url: String,
    pub api_url: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not read config file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Could not parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl From<SnapshotifyConfigFile> for SnapshotifyConfig {
    fn from(file_config: SnapshotifyConfigFile) -> Self {
        let credentials = match (file_config.client_id, file_config.client_secret) {
            (Some(client_id), Some(client_secret)) => Some(Credentials {
                client_id,
                client_secret,
            }),
            _ => None,
        };
        SnapshotifyConfig {
            credentials,
            playlist_id: file_config
                .playlist_id
                .unwrap_or_else(|| DEFAULT_PLAYLIST_ID.to_string()),
            data_dir: file_config
                .data_dir
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR)),
            address: file_config
                .address
                .unwrap_or(IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0))),
            port: file_config.port.unwrap_or(5000),
            accounts_url: file_config
                .accounts_url
                .unwrap_or_else(|| DEFAULT_ACCOUNTS_URL.to_string()),
            api_url: file_config
                .api_url
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
        }
    }
}

impl Default for SnapshotifyConfig {
    fn default() -> Self {
        SnapshotifyConfigFile::default().into()
    }
}

impl SnapshotifyConfig {
    /// Reads the config file at `path`. A missing file yields the defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No config file at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        let file_config: SnapshotifyConfigFile =
            serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(file_config.into())
    }

    /// Applies `SPOTIFY_CLIENT_ID`, `SPOTIFY_CLIENT_SECRET` and `SPOTIFY_PLAYLIST_ID`
    /// as returned by `lookup`.
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let client_id = lookup("SPOTIFY_CLIENT_ID");
        let client_secret = lookup("SPOTIFY_CLIENT_SECRET");
        let (file_id, file_secret) = match self.credentials.take() {
            Some(credentials) => (Some(credentials.client_id), Some(credentials.client_secret)),
            None => (None, None),
        };
        self.credentials = match (client_id.or(file_id), client_secret.or(file_secret)) {
            (Some(client_id), Some(client_secret)) => Some(Credentials {
                client_id,
                client_secret,
            }),
            _ => None,
        };
        if let Some(playlist_id) = lookup("SPOTIFY_PLAYLIST_ID") {
            self.playlist_id = playlist_id;
        }
        self
    }

    /// Loads `.env` if present, then applies the process environment.
    pub fn with_env(self) -> Self {
        if let Err(err) = dotenvy::dotenv() {
            if !err.not_found() {
                log::warn!("Ignoring unreadable .env file: {}", err);
            }
        }
        self.with_overrides(|key| std::env::var(key).ok().filter(|v| !v.is_empty()))
    }
}
