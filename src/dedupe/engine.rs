//! Deduplication pass over a directory tree.
//!
//! # Overview
//!
//! A pass runs in three steps, strictly in sequence:
//! 1. **Walk** - discover `.oem` candidates under the root
//! 2. **Extract and decide** - read each candidate's `OBJECT_ID` and
//!    `START_TIME` and feed it through the keep-freshest rule
//! 3. **Delete** - optionally remove every stale file, after the scan
//!
//! # Example
//!
//! ```no_run
//! use oemdedupe::catalog::IdentityMap;
//! use oemdedupe::dedupe::{DedupeConfig, Deduplicator};
//! use std::path::Path;
//!
//! let config = DedupeConfig::default().with_delete_stale(false);
//! let report = Deduplicator::new(config)
//!     .run(Path::new("/data/ephemerides"), &IdentityMap::new())
//!     .unwrap();
//!
//! for path in &report.stale {
//!     println!("stale: {}", path.display());
//! }
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;

use super::table::{FreshestTable, Partition};
use crate::actions::{delete_stale, BatchDeleteResult, DeleteMode};
use crate::catalog::IdentityMap;
use crate::scanner::{read_record, ScanError, Walker, WalkerConfig};

/// Configuration for a deduplication pass.
#[derive(Debug, Clone)]
pub struct DedupeConfig {
    /// Directory walking configuration.
    pub walker_config: WalkerConfig,
    /// Remove stale files after the scan.
    pub delete_stale: bool,
    /// How stale files are removed.
    pub delete_mode: DeleteMode,
    /// Abort on the first unreadable candidate file instead of skipping it.
    /// Unreadable directories are always skipped.
    pub strict: bool,
}

impl Default for DedupeConfig {
    fn default() -> Self {
        Self {
            walker_config: WalkerConfig::default(),
            delete_stale: true,
            delete_mode: DeleteMode::Permanent,
            strict: false,
        }
    }
}

impl DedupeConfig {
    /// Enable/disable recursion into subdirectories.
    #[must_use]
    pub fn with_recursive(mut self, recursive: bool) -> Self {
        self.walker_config.recursive = recursive;
        self
    }

    /// Enable/disable removal of stale files.
    #[must_use]
    pub fn with_delete_stale(mut self, delete: bool) -> Self {
        self.delete_stale = delete;
        self
    }

    /// Set how stale files are removed.
    #[must_use]
    pub fn with_delete_mode(mut self, mode: DeleteMode) -> Self {
        self.delete_mode = mode;
        self
    }

    /// Enable/disable strict mode.
    #[must_use]
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Replace the walker configuration.
    #[must_use]
    pub fn with_walker_config(mut self, config: WalkerConfig) -> Self {
        self.walker_config = config;
        self
    }
}

/// Errors that abort a deduplication pass.
#[derive(thiserror::Error, Debug)]
pub enum DedupeError {
    /// The provided root does not exist.
    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    /// The provided root is not a directory.
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    /// A candidate could not be read (strict mode, or an unreadable root).
    #[error(transparent)]
    Scan(#[from] ScanError),
}

/// Everything a deduplication pass produced.
#[derive(Debug, Serialize)]
pub struct DedupeReport {
    /// Root that was scanned
    pub root: PathBuf,
    /// Freshest file per canonical object id
    pub fresh: FreshestTable,
    /// Superseded files
    pub stale: Vec<PathBuf>,
    /// Candidates that were read
    pub files_scanned: usize,
    /// Candidates missing `OBJECT_ID` or `START_TIME`
    pub files_excluded: usize,
    /// Candidates and directories skipped because they could not be read
    pub scan_errors: Vec<ScanError>,
    /// Outcome of stale file removal, if it ran
    pub deletion: Option<BatchDeleteResult>,
}

/// Runs deduplication passes with a fixed configuration.
#[derive(Debug, Clone, Default)]
pub struct Deduplicator {
    config: DedupeConfig,
}

impl Deduplicator {
    /// Create a new deduplicator with the given configuration.
    #[must_use]
    pub fn new(config: DedupeConfig) -> Self {
        Self { config }
    }

    /// Create a new deduplicator with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(DedupeConfig::default())
    }

    /// Run a full pass: scan `root`, decide, then delete if configured.
    ///
    /// # Errors
    ///
    /// Returns `DedupeError` if:
    /// - The root does not exist or is not a directory
    /// - A candidate cannot be read and strict mode is on
    pub fn run(&self, root: &Path, ids: &IdentityMap) -> Result<DedupeReport, DedupeError> {
        let mut report = self.scan(root, ids)?;

        if self.config.delete_stale && !report.stale.is_empty() {
            log::info!(
                "Removing {} stale file(s) ({:?})",
                report.stale.len(),
                self.config.delete_mode
            );
            report.deletion = Some(delete_stale(&report.stale, self.config.delete_mode));
        }

        Ok(report)
    }

    /// Scan and decide without deleting anything.
    ///
    /// # Errors
    ///
    /// Same as [`Deduplicator::run`].
    pub fn scan(&self, root: &Path, ids: &IdentityMap) -> Result<DedupeReport, DedupeError> {
        validate_root(root)?;

        log::info!("Scanning {} for OEM files", root.display());

        let walker = Walker::new(root, self.config.walker_config.clone());
        let mut partition = Partition::default();
        let mut files_scanned = 0;
        let mut files_excluded = 0;
        let mut scan_errors = Vec::new();

        for candidate in walker.walk() {
            // Traversal errors never abort; the walker has already logged them.
            let path = match candidate {
                Ok(path) => path,
                Err(e) => {
                    scan_errors.push(e);
                    continue;
                }
            };

            files_scanned += 1;
            match read_record(&path, ids) {
                Ok(Some(record)) => partition.observe(record),
                Ok(None) => files_excluded += 1,
                Err(e) if self.config.strict => return Err(DedupeError::Scan(e)),
                Err(e) => {
                    log::warn!("Skipping unreadable file: {}", e);
                    scan_errors.push(e);
                }
            }
        }

        let (fresh, stale) = partition.into_parts();

        log::info!(
            "Scanned {} file(s): {} object id(s), {} stale, {} excluded",
            files_scanned,
            fresh.len(),
            stale.len(),
            files_excluded
        );

        Ok(DedupeReport {
            root: root.to_path_buf(),
            fresh,
            stale,
            files_scanned,
            files_excluded,
            scan_errors,
            deletion: None,
        })
    }
}

/// Run one pass and return just the two result collections.
///
/// Unreadable candidate files abort the pass, as does any root problem.
/// Unreadable subdirectories are skipped.
///
/// # Errors
///
/// See [`Deduplicator::run`].
pub fn dedupe(
    root: &Path,
    recursive: bool,
    delete_stale: bool,
    ids: &IdentityMap,
) -> Result<(FreshestTable, Vec<PathBuf>), DedupeError> {
    let config = DedupeConfig::default()
        .with_recursive(recursive)
        .with_delete_stale(delete_stale)
        .with_strict(true);

    let report = Deduplicator::new(config).run(root, ids)?;
    Ok((report.fresh, report.stale))
}

fn validate_root(root: &Path) -> Result<(), DedupeError> {
    match fs::metadata(root) {
        Ok(metadata) if metadata.is_dir() => Ok(()),
        Ok(_) => Err(DedupeError::NotADirectory(root.to_path_buf())),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            Err(DedupeError::PathNotFound(root.to_path_buf()))
        }
        Err(e) => Err(ScanError::from_io(root, e).into()),
    }
}
