//! Object catalog loading and identity resolution.
//!
//! The object catalog is a plain comma-separated file mapping alias object
//! identifiers to canonical ones, one record per line:
//!
//! ```text
//! 25544,ISS-ALIAS,anything else is ignored
//! ```
//!
//! Field 0 is the canonical id, field 1 the alias. There is no header row.
//! The catalog is optional: a catalog that cannot be loaded degrades to an
//! empty [`IdentityMap`], so every identifier resolves to itself.
//!
//! # Example
//!
//! ```
//! use oemdedupe::catalog::IdentityMap;
//!
//! let map: IdentityMap = [("25544", "ZARYA")].into_iter().collect();
//! assert_eq!(map.resolve("ZARYA"), "25544");
//! assert_eq!(map.resolve("43013"), "43013");
//! ```

use std::collections::HashMap;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use directories::BaseDirs;
use thiserror::Error;

/// File name of the default object catalog in the user's home directory.
pub const DEFAULT_CATALOG_FILE: &str = "object_catalog.csv";

/// Environment variable that overrides the catalog location.
///
/// Only the CLI layer reads it; the library always takes an explicit path.
pub const CATALOG_ENV_VAR: &str = "CASPY_OBJECT_CATALOG";

/// Errors that can occur while loading the object catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// No home directory could be determined for the default location.
    #[error("cannot determine home directory for the default object catalog")]
    NoHomeDir,

    /// The catalog file does not exist.
    #[error("object catalog not found: {0}")]
    NotFound(PathBuf),

    /// Permission was denied when opening the catalog.
    #[error("permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// A record has fewer than the two required fields.
    #[error("malformed record at {path}:{line}: expected at least 2 fields")]
    Malformed { path: PathBuf, line: u64 },

    /// The catalog could not be read or decoded.
    #[error("failed to read object catalog {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// General I/O error.
    #[error("I/O error for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Outcome of a non-fatal catalog load.
///
/// A failed load still carries a usable (empty) map alongside the reason,
/// so the caller decides how to surface the warning.
#[derive(Debug)]
pub enum CatalogLoad {
    /// The catalog was read successfully.
    Loaded(IdentityMap),
    /// The catalog could not be read; resolution passes ids through.
    Failed {
        /// Empty map to resolve with.
        map: IdentityMap,
        /// Why the catalog was not loaded.
        reason: CatalogError,
    },
}

impl CatalogLoad {
    /// Consume the outcome, yielding the map to resolve with.
    #[must_use]
    pub fn into_map(self) -> IdentityMap {
        match self {
            Self::Loaded(map) | Self::Failed { map, .. } => map,
        }
    }

    /// The failure reason, if the load failed.
    #[must_use]
    pub fn failure(&self) -> Option<&CatalogError> {
        match self {
            Self::Loaded(_) => None,
            Self::Failed { reason, .. } => Some(reason),
        }
    }
}

/// Mapping from alias object identifiers to canonical identifiers.
///
/// Read-only once built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentityMap {
    aliases: HashMap<String, String>,
}

impl IdentityMap {
    /// Create an empty map where every id resolves to itself.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a catalog file.
    ///
    /// Blank lines are skipped. When an alias appears more than once, the
    /// last record wins.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the file cannot be opened or read, or
    /// if any record has fewer than two fields.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let file = File::open(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => CatalogError::NotFound(path.to_path_buf()),
            io::ErrorKind::PermissionDenied => CatalogError::PermissionDenied(path.to_path_buf()),
            _ => CatalogError::Io {
                path: path.to_path_buf(),
                source: e,
            },
        })?;

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .from_reader(file);

        let mut aliases = HashMap::new();
        for result in reader.records() {
            let record = result.map_err(|source| CatalogError::Read {
                path: path.to_path_buf(),
                source,
            })?;

            match (record.get(0), record.get(1)) {
                (Some(canonical), Some(alias)) => {
                    aliases.insert(alias.to_string(), canonical.to_string());
                }
                _ => {
                    return Err(CatalogError::Malformed {
                        path: path.to_path_buf(),
                        line: record.position().map_or(0, csv::Position::line),
                    });
                }
            }
        }

        log::debug!(
            "Loaded {} alias(es) from object catalog {}",
            aliases.len(),
            path.display()
        );

        Ok(Self { aliases })
    }

    /// Load a catalog file, degrading to an empty map on any failure.
    #[must_use]
    pub fn load_or_empty(path: &Path) -> CatalogLoad {
        match Self::load(path) {
            Ok(map) => CatalogLoad::Loaded(map),
            Err(reason) => CatalogLoad::Failed {
                map: Self::new(),
                reason,
            },
        }
    }

    /// Resolve an identifier to its canonical id.
    ///
    /// Unknown identifiers are returned unchanged.
    #[must_use]
    pub fn resolve<'a>(&'a self, id: &'a str) -> &'a str {
        self.aliases.get(id).map_or(id, String::as_str)
    }

    /// Number of known aliases.
    #[must_use]
    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    /// Whether the map has no aliases.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}

impl<C, A> FromIterator<(C, A)> for IdentityMap
where
    C: Into<String>,
    A: Into<String>,
{
    /// Build a map from `(canonical, alias)` pairs, in catalog field order.
    fn from_iter<I: IntoIterator<Item = (C, A)>>(iter: I) -> Self {
        let aliases = iter
            .into_iter()
            .map(|(canonical, alias)| (alias.into(), canonical.into()))
            .collect();
        Self { aliases }
    }
}

/// Default catalog location: `~/object_catalog.csv`.
///
/// # Errors
///
/// Returns [`CatalogError::NoHomeDir`] if no home directory is known.
pub fn default_catalog_path() -> Result<PathBuf, CatalogError> {
    BaseDirs::new()
        .map(|dirs| dirs.home_dir().join(DEFAULT_CATALOG_FILE))
        .ok_or(CatalogError::NoHomeDir)
}
