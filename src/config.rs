//! Run configuration.
//!
//! Turns parsed CLI arguments into the explicit settings the library
//! takes. The catalog location is resolved here once, so nothing below
//! this layer consults the process environment.

use std::path::PathBuf;

use crate::actions::DeleteMode;
use crate::catalog::{default_catalog_path, CatalogError};
use crate::cli::{Cli, OutputFormat};
use crate::dedupe::DedupeConfig;
use crate::scanner::WalkerConfig;

/// Where the object catalog comes from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CatalogSource {
    /// `~/object_catalog.csv`
    #[default]
    Default,
    /// An explicitly configured file.
    Path(PathBuf),
}

impl CatalogSource {
    /// Resolve to a concrete file path.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NoHomeDir`] if the default location is
    /// requested and no home directory is known.
    pub fn resolve(&self) -> Result<PathBuf, CatalogError> {
        match self {
            Self::Default => default_catalog_path(),
            Self::Path(path) => Ok(path.clone()),
        }
    }
}

/// Settings for one invocation.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Root directory to scan.
    pub root: PathBuf,
    /// Object catalog location.
    pub catalog: CatalogSource,
    /// Deduplication pass configuration.
    pub dedupe: DedupeConfig,
    /// Report format.
    pub output: OutputFormat,
}

impl Settings {
    /// Build settings from parsed CLI arguments.
    #[must_use]
    pub fn from_cli(cli: &Cli) -> Self {
        let catalog = cli
            .catalog
            .clone()
            .map_or(CatalogSource::Default, CatalogSource::Path);

        let walker_config = WalkerConfig::default()
            .with_recursive(!cli.no_recursive)
            .with_follow_symlinks(cli.follow_symlinks)
            .with_skip_hidden(cli.skip_hidden);

        let delete_mode = if cli.trash {
            DeleteMode::Trash
        } else {
            DeleteMode::Permanent
        };

        let dedupe = DedupeConfig::default()
            .with_walker_config(walker_config)
            .with_delete_stale(!cli.dry_run)
            .with_delete_mode(delete_mode)
            .with_strict(cli.strict);

        Self {
            root: cli.path.clone(),
            catalog,
            dedupe,
            output: cli.output,
        }
    }
}
