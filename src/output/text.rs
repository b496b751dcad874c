//! Plain text formatter for deduplication results.
//!
//! One `KEEP` line per canonical object id, one `STALE` line per
//! superseded file, then a summary:
//!
//! ```text
//! KEEP  25544  2021-06-01T00:00:00  /data/b.oem
//! STALE /data/a.oem
//! 2 file(s) scanned, 1 object id(s), 1 stale, 0 excluded, 0 unreadable
//! Deleted 1 stale file(s), freed 512 bytes
//! ```

use std::io::Write;

use super::OutputError;
use crate::dedupe::DedupeReport;

/// Text view of a [`DedupeReport`].
#[derive(Debug)]
pub struct TextOutput<'a> {
    report: &'a DedupeReport,
}

impl<'a> TextOutput<'a> {
    /// Wrap a report for text output.
    #[must_use]
    pub fn new(report: &'a DedupeReport) -> Self {
        Self { report }
    }

    /// Write the report to a writer.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<(), OutputError> {
        let report = self.report;

        for (object_id, entry) in &report.fresh {
            writeln!(
                writer,
                "KEEP  {}  {}  {}",
                object_id,
                entry.start_time,
                entry.path.display()
            )?;
        }
        for path in &report.stale {
            writeln!(writer, "STALE {}", path.display())?;
        }
        for error in &report.scan_errors {
            writeln!(writer, "SKIP  {}", error)?;
        }

        writeln!(
            writer,
            "{} file(s) scanned, {} object id(s), {} stale, {} excluded, {} unreadable",
            report.files_scanned,
            report.fresh.len(),
            report.stale.len(),
            report.files_excluded,
            report.scan_errors.len()
        )?;

        if let Some(deletion) = &report.deletion {
            writeln!(writer, "{}", deletion.summary())?;
            for (path, message) in &deletion.failures {
                writeln!(writer, "FAILED {}: {}", path.display(), message)?;
            }
        }

        Ok(())
    }
}
