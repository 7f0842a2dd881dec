//! Snapshot loader.
//!
//! The repository boundary of the system: reads a JSON snapshot document
//! from disk into the typed [`Snapshot`] the computation crates consume.
//! Dates are ISO-8601 (`YYYY-MM-DD`) strings, quantities and costs decimal
//! strings or numbers; absent collections default to empty.
//!
//! # Example
//!
//! ```ignore
//! use stockledger_loader::load_snapshot;
//! use std::path::Path;
//!
//! let snapshot = load_snapshot(Path::new("snapshot.json"))?;
//! println!("{} records", snapshot.record_count());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use stockledger_core::Snapshot;

/// Errors that can occur while loading a snapshot.
#[derive(Debug, Error)]
pub enum LoadError {
    /// IO error reading the snapshot file.
    #[error("failed to read snapshot {path}: {source}")]
    Io {
        /// The path that failed to read.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not a valid snapshot document.
    #[error("invalid snapshot {path}: {source}")]
    Parse {
        /// The file that failed to parse.
        path: PathBuf,
        /// The underlying deserialization error.
        #[source]
        source: serde_json::Error,
    },
}

/// Load a snapshot from a JSON file.
pub fn load_snapshot(path: &Path) -> Result<Snapshot, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let snapshot = from_reader(BufReader::new(file)).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    debug!(
        path = %path.display(),
        items = snapshot.items.len(),
        records = snapshot.record_count(),
        "loaded snapshot"
    );

    Ok(snapshot)
}

/// Deserialize a snapshot from any reader.
///
/// Building block behind [`load_snapshot`]; tests feed it in-memory
/// documents directly.
pub fn from_reader<R: Read>(reader: R) -> Result<Snapshot, serde_json::Error> {
    serde_json::from_reader(reader)
}
