use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use tempfile::NamedTempFile;
use thiserror::Error;

use crate::models::snapshot::Snapshot;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
const FILE_PREFIX: &str = "playlist_";
const FILE_SUFFIX: &str = ".json";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Could not write {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Could not serialize snapshot: {0}")]
    Serialize(#[from] serde_json::Error),
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> StoreError {
    let path = path.to_path_buf();
    move |source| StoreError::Io { path, source }
}

/// Parses `YYYY-MM-DD`, rejecting impossible dates and non-canonical spellings
/// such as `2024-6-1`.
pub fn parse_date(date: &str) -> Option<NaiveDate> {
    let parsed = NaiveDate::parse_from_str(date, DATE_FORMAT).ok()?;
    (parsed.format(DATE_FORMAT).to_string() == date).then_some(parsed)
}

/// One JSON file per date under `dir`. A save for a date that already has a file
/// replaces it in one rename, so readers see either the old or the new snapshot.
/// Assumes a single writer.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    dir: PathBuf,
}

impl SnapshotStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        SnapshotStore { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, date: NaiveDate) -> PathBuf {
        self.dir.join(format!(
            "{FILE_PREFIX}{}{FILE_SUFFIX}",
            date.format(DATE_FORMAT)
        ))
    }

    /// Dates with a snapshot file, most recent first. Empty when the directory is
    /// missing or unreadable.
    pub fn list_dates(&self) -> Vec<String> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(err) => {
                log::debug!("Cannot list {}: {}", self.dir.display(), err);
                return Vec::new();
            }
        };

        let mut dates: Vec<NaiveDate> = entries
            .filter_map(Result::ok)
            .filter_map(|entry| {
                let file_name = entry.file_name();
                let date = file_name
                    .to_str()?
                    .strip_prefix(FILE_PREFIX)?
                    .strip_suffix(FILE_SUFFIX)?;
                let parsed = parse_date(date);
                if parsed.is_none() {
                    log::debug!("Skipping snapshot file with invalid date: {:?}", file_name);
                }
                parsed
            })
            .collect();
        dates.sort_unstable_by(|a, b| b.cmp(a));
        dates.dedup();
        dates
            .into_iter()
            .map(|date| date.format(DATE_FORMAT).to_string())
            .collect()
    }

    /// Snapshot stored for `date`. Missing, unreadable and malformed files all
    /// yield `None`.
    pub fn load(&self, date: &str) -> Option<Snapshot> {
        let path = self.path_for(parse_date(date)?);
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(err) => {
                log::debug!("No snapshot at {}: {}", path.display(), err);
                return None;
            }
        };
        match serde_json::from_str(&contents) {
            Ok(snapshot) => Some(snapshot),
            Err(err) => {
                log::warn!("Ignoring corrupt snapshot {}: {}", path.display(), err);
                None
            }
        }
    }

    /// Snapshot of the most recent date, if it loads.
    pub fn latest(&self) -> Option<Snapshot> {
        self.list_dates().first().and_then(|date| self.load(date))
    }

    /// Writes `snapshot` under `date` (today when `None`) and returns the file path.
    pub fn save(
        &self,
        snapshot: &Snapshot,
        date: Option<NaiveDate>,
    ) -> Result<PathBuf, StoreError> {
        let date = date.unwrap_or_else(|| Local::now().date_naive());
        fs::create_dir_all(&self.dir).map_err(io_error(&self.dir))?;
        let path = self.path_for(date);
        self.replace_file(&path, |writer| {
            serde_json::to_writer_pretty(writer, snapshot)?;
            Ok(())
        })?;

        log::info!("Saved snapshot of \"{}\" to {}", snapshot.name, path.display());
        Ok(path)
    }

    /// Writes a temporary file next to `path` and renames it over `path` once `write`
    /// succeeds. On any error the temporary file is removed and `path` is untouched.
    fn replace_file<F>(&self, path: &Path, write: F) -> Result<(), StoreError>
    where
        F: FnOnce(&mut dyn Write) -> Result<(), StoreError>,
    {
        let temp = NamedTempFile::new_in(&self.dir).map_err(io_error(&self.dir))?;
        let mut writer = BufWriter::new(temp);
        write(&mut writer)?;
        let temp = writer
            .into_inner()
            .map_err(|err| io_error(path)(err.into_error()))?;
        temp.as_file().sync_all().map_err(io_error(path))?;
        temp.persist(path).map_err(|err| io_error(path)(err.error))?;
        Ok(())
    }
}
