//! Scanner module for candidate discovery and field extraction.
//!
//! This module provides functionality for:
//! - Directory walking for `.oem` candidate files
//! - Extraction of the `OBJECT_ID` / `START_TIME` pair from a candidate
//!
//! # Architecture
//!
//! - [`walker`]: Directory traversal and candidate discovery
//! - [`record`]: Line-oriented key/value extraction
//!
//! # Example
//!
//! ```no_run
//! use oemdedupe::catalog::IdentityMap;
//! use oemdedupe::scanner::{read_record, Walker, WalkerConfig};
//! use std::path::Path;
//!
//! let ids = IdentityMap::new();
//! let walker = Walker::new(Path::new("."), WalkerConfig::default());
//! for candidate in walker.walk() {
//!     match candidate.and_then(|path| read_record(&path, &ids)) {
//!         Ok(Some(record)) => println!("{} {}", record.object_id, record.start_time),
//!         Ok(None) => {}
//!         Err(e) => eprintln!("Warning: {}", e),
//!     }
//! }
//! ```

pub mod record;
pub mod walker;

use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;

pub use record::{extract_record, parse_assignment, read_record, OBJECT_ID_KEY, START_TIME_KEY};
pub use walker::Walker;

/// File name suffix identifying OEM candidate files.
pub const OEM_SUFFIX: &str = ".oem";

/// The two fields extracted from one OEM file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OemRecord {
    /// Path the fields were read from
    pub path: PathBuf,
    /// Object id after alias resolution
    pub object_id: String,
    /// Raw start time token, compared as an opaque string
    pub start_time: String,
}

impl OemRecord {
    /// Create a new record.
    #[must_use]
    pub fn new(
        path: impl Into<PathBuf>,
        object_id: impl Into<String>,
        start_time: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            object_id: object_id.into(),
            start_time: start_time.into(),
        }
    }
}

/// Configuration for directory walking.
#[derive(Debug, Clone)]
pub struct WalkerConfig {
    /// Descend into subdirectories. Root level only when false.
    pub recursive: bool,

    /// Follow symbolic links to directories during traversal.
    pub follow_symlinks: bool,

    /// Skip hidden files and directories (names starting with `.`).
    pub skip_hidden: bool,
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            recursive: true,
            follow_symlinks: false,
            skip_hidden: false,
        }
    }
}

impl WalkerConfig {
    /// Enable/disable recursion into subdirectories.
    #[must_use]
    pub fn with_recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Enable/disable following directory symlinks.
    #[must_use]
    pub fn with_follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    /// Enable/disable skipping hidden entries.
    #[must_use]
    pub fn with_skip_hidden(mut self, skip: bool) -> Self {
        self.skip_hidden = skip;
        self
    }
}

/// Errors that can occur while discovering or reading candidate files.
#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    /// Permission was denied when accessing a file or directory.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// The path vanished between discovery and access.
    #[error("Path not found: {0}")]
    NotFound(PathBuf),

    /// An I/O error occurred while accessing a file.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },
}

impl ScanError {
    /// Classify an I/O error for the given path.
    #[must_use]
    pub fn from_io(path: &Path, error: io::Error) -> Self {
        match error.kind() {
            io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            io::ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            _ => Self::Io {
                path: path.to_path_buf(),
                source: error,
            },
        }
    }

    /// Path associated with this error.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::PermissionDenied(p) | Self::NotFound(p) | Self::Io { path: p, .. } => p,
        }
    }
}

impl Serialize for ScanError {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
