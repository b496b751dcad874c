//! oemdedupe - Duplicate OEM File Remover
//!
//! Finds orbit ephemeris message (OEM) files that describe the same tracked
//! object, keeps the copy with the latest `START_TIME`, and removes the
//! stale copies. Object ids are normalized through an optional object
//! catalog before comparison.

pub mod actions;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod dedupe;
pub mod error;
pub mod logging;
pub mod output;
pub mod scanner;

use anyhow::{Context, Result};

use crate::catalog::{CatalogLoad, IdentityMap};
use crate::cli::Cli;
use crate::config::{CatalogSource, Settings};
use crate::dedupe::Deduplicator;
use crate::error::ExitCode;

/// Run the application with parsed CLI arguments.
///
/// # Errors
///
/// Returns an error if the pass is aborted (bad root, or an unreadable
/// file in strict mode) or the report cannot be written.
pub fn run_app(cli: Cli) -> Result<ExitCode> {
    logging::init_logging(cli.verbose, cli.quiet);

    let settings = Settings::from_cli(&cli);
    let ids = load_identity_map(&settings.catalog);

    let report = Deduplicator::new(settings.dedupe)
        .run(&settings.root, &ids)
        .with_context(|| format!("failed to deduplicate {}", settings.root.display()))?;

    let mut stdout = std::io::stdout().lock();
    output::write_report(&report, settings.output, &mut stdout)
        .context("failed to write report")?;

    Ok(ExitCode::Success)
}

/// Load the object catalog, warning once and falling back to an empty map
/// if it cannot be read.
#[must_use]
pub fn load_identity_map(source: &CatalogSource) -> IdentityMap {
    let path = match source.resolve() {
        Ok(path) => path,
        Err(reason) => {
            log::warn!("Object catalog not loaded: {}", reason);
            return IdentityMap::new();
        }
    };

    let outcome = IdentityMap::load_or_empty(&path);
    if let CatalogLoad::Failed { reason, .. } = &outcome {
        log::warn!("Object catalog not loaded: {}", reason);
    }
    outcome.into_map()
}
