//! JSON output formatter for deduplication results.
//!
//! # Output Schema
//!
//! ```json
//! {
//!   "root": "/data/ephemerides",
//!   "fresh": {
//!     "25544": { "path": "/data/ephemerides/b.oem", "start_time": "2021-06-01T00:00:00" }
//!   },
//!   "stale": ["/data/ephemerides/a.oem"],
//!   "files_scanned": 2,
//!   "files_excluded": 0,
//!   "scan_errors": [],
//!   "deletion": {
//!     "successes": [{ "path": "/data/ephemerides/a.oem", "size": 512 }],
//!     "failures": [],
//!     "bytes_freed": 512
//!   }
//! }
//! ```

use std::io::Write;

use super::OutputError;
use crate::dedupe::DedupeReport;

/// JSON view of a [`DedupeReport`].
#[derive(Debug)]
pub struct JsonOutput<'a> {
    report: &'a DedupeReport,
}

impl<'a> JsonOutput<'a> {
    /// Wrap a report for JSON output.
    #[must_use]
    pub fn new(report: &'a DedupeReport) -> Self {
        Self { report }
    }

    /// Serialize to a compact JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self.report)
    }

    /// Serialize to pretty-printed JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self.report)
    }

    /// Write JSON to a writer, followed by a newline.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn write_to<W: Write>(&self, writer: &mut W, pretty: bool) -> Result<(), OutputError> {
        let json = if pretty {
            self.to_json_pretty()?
        } else {
            self.to_json()?
        };
        writer.write_all(json.as_bytes())?;
        writer.write_all(b"\n")?;
        Ok(())
    }
}
