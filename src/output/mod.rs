//! Report formatters for deduplication results.
//!
//! This module provides the report formats printed after a pass:
//! - Text for reading at a terminal
//! - JSON for automation and scripting
//!
//! # Example
//!
//! ```no_run
//! use oemdedupe::catalog::IdentityMap;
//! use oemdedupe::cli::OutputFormat;
//! use oemdedupe::dedupe::Deduplicator;
//! use oemdedupe::output::write_report;
//! use std::path::Path;
//!
//! let report = Deduplicator::with_defaults()
//!     .scan(Path::new("."), &IdentityMap::new())
//!     .unwrap();
//! write_report(&report, OutputFormat::Json, &mut std::io::stdout()).unwrap();
//! ```

pub mod json;
pub mod text;

use std::io::Write;

pub use json::JsonOutput;
pub use text::TextOutput;

use crate::cli::OutputFormat;
use crate::dedupe::DedupeReport;

/// Errors that can occur while writing a report.
#[derive(thiserror::Error, Debug)]
pub enum OutputError {
    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error writing output
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Write `report` to `writer` in the requested format.
///
/// [`OutputFormat::Silent`] writes nothing.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn write_report<W: Write>(
    report: &DedupeReport,
    format: OutputFormat,
    writer: &mut W,
) -> Result<(), OutputError> {
    match format {
        OutputFormat::Silent => Ok(()),
        OutputFormat::Text => TextOutput::new(report).write_to(writer),
        OutputFormat::Json => JsonOutput::new(report).write_to(writer, true),
    }
}
