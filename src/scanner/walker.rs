//! Directory walker for OEM candidate discovery.
//!
//! # Overview
//!
//! This module provides the [`Walker`] struct for traversing a directory
//! tree and yielding every regular file whose name ends with
//! [`OEM_SUFFIX`](super::OEM_SUFFIX). It uses [`walkdir`] for a
//! single-threaded traversal; entries are sorted by file name within each
//! directory so repeated runs visit files in the same order.
//!
//! # Example
//!
//! ```no_run
//! use oemdedupe::scanner::{Walker, WalkerConfig};
//! use std::path::Path;
//!
//! let walker = Walker::new(Path::new("/data/ephemerides"), WalkerConfig::default());
//! for entry in walker.walk() {
//!     match entry {
//!         Ok(path) => println!("{}", path.display()),
//!         Err(e) => eprintln!("Warning: {}", e),
//!     }
//! }
//! ```

use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use super::{ScanError, WalkerConfig, OEM_SUFFIX};

/// Directory walker for candidate discovery.
#[derive(Debug)]
pub struct Walker {
    /// Root path to walk
    root: PathBuf,
    /// Walker configuration
    config: WalkerConfig,
}

impl Walker {
    /// Create a new walker for the given path.
    #[must_use]
    pub fn new(path: &Path, config: WalkerConfig) -> Self {
        Self {
            root: path.to_path_buf(),
            config,
        }
    }

    /// Walk the directory tree, yielding candidate file paths.
    ///
    /// Errors are yielded as [`ScanError`] values rather than stopping
    /// iteration; the caller decides whether they are fatal.
    pub fn walk(&self) -> impl Iterator<Item = Result<PathBuf, ScanError>> + '_ {
        let mut walk_dir = WalkDir::new(&self.root)
            .min_depth(1)
            .follow_links(self.config.follow_symlinks)
            .sort_by_file_name();
        if !self.config.recursive {
            walk_dir = walk_dir.max_depth(1);
        }

        let skip_hidden = self.config.skip_hidden;

        walk_dir
            .into_iter()
            .filter_entry(move |entry| !(skip_hidden && is_hidden(entry)))
            .filter_map(move |entry_result| match entry_result {
                Ok(entry) => self.process_entry(&entry),
                Err(e) => Some(Err(self.handle_walk_error(e))),
            })
    }

    /// Turn a directory entry into a candidate, if it is one.
    fn process_entry(&self, entry: &DirEntry) -> Option<Result<PathBuf, ScanError>> {
        let file_type = entry.file_type();
        if file_type.is_dir() {
            return None;
        }

        if !has_oem_suffix(entry) {
            return None;
        }

        let path = entry.path();

        // A symlink counts when it resolves to a regular file.
        if file_type.is_symlink() {
            match std::fs::metadata(path) {
                Ok(metadata) if metadata.is_file() => {}
                Ok(_) => return None,
                Err(e) => {
                    log::debug!("Skipping dangling symlink {}: {}", path.display(), e);
                    return None;
                }
            }
        } else if !file_type.is_file() {
            log::trace!("Skipping non-regular file: {}", path.display());
            return None;
        }

        log::trace!("Candidate: {}", path.display());
        Some(Ok(path.to_path_buf()))
    }

    /// Convert a walkdir error into a [`ScanError`].
    fn handle_walk_error(&self, error: walkdir::Error) -> ScanError {
        let path = error
            .path()
            .map_or_else(|| self.root.clone(), Path::to_path_buf);
        if path.is_dir() {
            log::warn!("Skipping unreadable directory {}: {}", path.display(), error);
        } else {
            log::warn!("Skipping unreadable entry {}: {}", path.display(), error);
        }

        match error.into_io_error() {
            Some(io_error) => ScanError::from_io(&path, io_error),
            // Symlink loop
            None => ScanError::Io {
                path,
                source: std::io::Error::other("filesystem loop detected"),
            },
        }
    }
}

fn has_oem_suffix(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .as_encoded_bytes()
        .ends_with(OEM_SUFFIX.as_bytes())
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry
            .file_name()
            .as_encoded_bytes()
            .first()
            .is_some_and(|b| *b == b'.')
}
