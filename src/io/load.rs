//! JSON data loading.
//!
//! The audit export is a single JSON array of objects. Loading is the only
//! place the raw bytes are inspected; every condition the dashboard needs to
//! tell apart gets its own `LoadError` variant.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::RawRecord;

/// Why a data file could not be turned into records.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("data file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in '{}': {source}", .path.display())]
    InvalidJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("'{}' does not contain a JSON list", .0.display())]
    NotAList(PathBuf),
}

impl LoadError {
    /// The file the failure refers to.
    pub fn path(&self) -> &Path {
        match self {
            LoadError::NotFound(path) | LoadError::NotAList(path) => path.as_path(),
            LoadError::Read { path, .. } | LoadError::InvalidJson { path, .. } => path.as_path(),
        }
    }
}

/// Read `path` and return one raw record per array element.
///
/// Elements that are not objects become empty records so that original
/// indices in the findings still point at the right array slot.
pub fn load_records(path: &Path) -> Result<Vec<RawRecord>, LoadError> {
    let text = fs::read_to_string(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => LoadError::NotFound(path.to_path_buf()),
        _ => LoadError::Read {
            path: path.to_path_buf(),
            source,
        },
    })?;

    parse_records(&text).map_err(|e| match e {
        ParseFailure::Json(source) => LoadError::InvalidJson {
            path: path.to_path_buf(),
            source,
        },
        ParseFailure::NotAList => LoadError::NotAList(path.to_path_buf()),
    })
}

enum ParseFailure {
    Json(serde_json::Error),
    NotAList,
}

fn parse_records(text: &str) -> Result<Vec<RawRecord>, ParseFailure> {
    // Excel-produced exports sometimes carry a UTF-8 BOM.
    let text = text.trim_start_matches('\u{feff}');
    let payload: Value = serde_json::from_str(text).map_err(ParseFailure::Json)?;

    let Value::Array(items) = payload else {
        return Err(ParseFailure::NotAList);
    };

    let mut skipped = 0usize;
    let records: Vec<RawRecord> = items
        .into_iter()
        .map(|item| match item {
            Value::Object(map) => map,
            _ => {
                skipped += 1;
                RawRecord::new()
            }
        })
        .collect();

    if skipped > 0 {
        warn!(skipped, "non-object entries treated as empty records");
    }
    debug!(records = records.len(), "records parsed");

    Ok(records)
}
