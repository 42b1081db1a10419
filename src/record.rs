//! Version record artifact (`data/version.json`)
//!
//! Records the last synchronized version and the date it was synced.
//! Overwritten wholesale on every update; no history is kept here (git is
//! the history).

use crate::error::{Error, IoError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionRecord {
    pub version: String,
    /// Sync date in YYYY-MM-DD form
    pub date: String,
}

impl VersionRecord {
    pub fn new(version: &str, date: NaiveDate) -> Self {
        Self {
            version: version.to_string(),
            date: date.format("%Y-%m-%d").to_string(),
        }
    }

    /// Write the record as pretty-printed JSON, creating the parent
    /// directory if needed. Full overwrite; no merge.
    pub fn write(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| {
                Error::Io(IoError::WriteFailed {
                    path: parent.to_path_buf(),
                    source,
                })
            })?;
        }

        let json = serde_json::to_string_pretty(self).map_err(|source| {
            Error::Io(IoError::Other(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                source,
            )))
        })?;
        fs::write(path, json).map_err(|source| {
            Error::Io(IoError::WriteFailed {
                path: path.to_path_buf(),
                source,
            })
        })
    }

    /// Load an existing record, if one is present and parseable.
    pub fn load(path: &Path) -> Option<Self> {
        let content = fs::read_to_string(path).ok()?;
        serde_json::from_str(&content).ok()
    }
}
