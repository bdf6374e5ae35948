use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// The persisted homepage document, `api/home.json`.
///
/// Loaded (or defaulted) once at the start of a run, mutated in memory and
/// written back in a single whole-file write. There is no locking; concurrent
/// runs race and the last writer wins.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct HomeDocument {
    /// ISO-8601 timestamp of the last update, overwritten every run
    pub updated_iso: String,
    /// Calendar date (`YYYY-MM-DD`) of the last update, overwritten every run
    pub edition: String,
    pub sections: Sections,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Sections {
    /// Curated by hand, carried through every run untouched. Held as raw
    /// JSON values so unknown record shapes and key order survive the
    /// round trip.
    pub projects: Vec<serde_json::Value>,
    /// Replaced wholesale each run from the crypto-news feed
    pub markets: Vec<FeedItem>,
    /// Replaced wholesale each run from the tech-news feed
    pub foss: Vec<FeedItem>,
}

/// One normalized feed entry as it appears in the document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeedItem {
    pub title: String,
    pub url: String,
    /// Which feed this came from, e.g. "decrypt" or "hn"
    pub source: String,
    /// Date the record was captured, not the entry's own publish date
    pub timestamp: String,
    /// At most 100 characters, "..." appended when the original was longer
    pub summary: String,
}

#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("malformed document {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl HomeDocument {
    /// Read and parse the document at `path`. A missing file is not an
    /// error: the default document (empty metadata, all three sections
    /// present and empty) is returned so first runs start from a valid
    /// structure. A file that exists but does not parse aborts the run.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, DocumentError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|source| DocumentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| DocumentError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Serialize with 2-space indentation and overwrite `path`, creating
    /// parent directories as needed.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), DocumentError> {
        let path = path.as_ref();
        let io_err = |source| DocumentError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(io_err)?;
            }
        }
        let mut json = serde_json::to_string_pretty(self).map_err(|source| {
            DocumentError::Parse {
                path: path.to_path_buf(),
                source,
            }
        })?;
        json.push('\n');
        std::fs::write(path, json).map_err(io_err)
    }
}
