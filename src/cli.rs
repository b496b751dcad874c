//! Command-line interface definitions for oemdedupe.
//!
//! # Example
//!
//! ```bash
//! # Deduplicate the current directory tree, deleting stale copies
//! oemdedupe
//!
//! # Report what would be removed without touching anything
//! oemdedupe /data/ephemerides --dry-run --output text
//!
//! # Use a specific object catalog
//! oemdedupe /data/ephemerides --catalog ~/catalogs/objects.csv
//! ```

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Find duplicate OEM files and remove the stale copies.
///
/// Files are grouped by OBJECT_ID (after alias resolution through the object
/// catalog); within each group the file with the latest START_TIME is kept
/// and every other copy is stale.
#[derive(Debug, Parser)]
#[command(name = "oemdedupe")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Root directory to scan
    #[arg(value_name = "PATH", default_value = ".")]
    pub path: PathBuf,

    /// Object catalog mapping alias ids to canonical ids
    ///
    /// Defaults to ~/object_catalog.csv. A missing or broken catalog only
    /// produces a warning.
    #[arg(long, value_name = "PATH", env = crate::catalog::CATALOG_ENV_VAR)]
    pub catalog: Option<PathBuf>,

    /// Only scan the top level of PATH
    #[arg(long)]
    pub no_recursive: bool,

    /// Decide which files are stale but do not delete them
    #[arg(long)]
    pub dry_run: bool,

    /// Move stale files to the system trash instead of deleting them
    #[arg(long, conflicts_with = "dry_run")]
    pub trash: bool,

    /// Abort on the first unreadable OEM file instead of skipping it
    #[arg(long)]
    pub strict: bool,

    /// Follow symbolic links to directories during the scan
    #[arg(long)]
    pub follow_symlinks: bool,

    /// Skip hidden files and directories (starting with .)
    #[arg(long)]
    pub skip_hidden: bool,

    /// Report format printed after the pass
    #[arg(short, long, value_enum, default_value = "none")]
    pub output: OutputFormat,

    /// Increase verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Print errors as JSON
    #[arg(long)]
    pub json_errors: bool,
}

/// Report format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Print nothing
    #[default]
    #[value(name = "none")]
    Silent,
    /// Human-readable listing
    Text,
    /// JSON for scripting
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Silent => write!(f, "none"),
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}
