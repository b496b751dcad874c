//! `OBJECT_ID` / `START_TIME` extraction from OEM files.
//!
//! Only two `KEY = VALUE` lines matter; everything else in the file is
//! ignored. Reading stops as soon as both fields have been captured, and
//! the file handle is released when the read returns.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use super::{OemRecord, ScanError};
use crate::catalog::IdentityMap;

/// Key carrying the object identifier.
pub const OBJECT_ID_KEY: &str = "OBJECT_ID";

/// Key carrying the start time token.
pub const START_TIME_KEY: &str = "START_TIME";

/// Split a `KEY = VALUE` line into its trimmed key and value.
///
/// The value ends at the next `=`, if any. Lines without `=` are not
/// assignments.
///
/// ```
/// use oemdedupe::scanner::parse_assignment;
///
/// assert_eq!(parse_assignment(" OBJECT_ID = 25544 "), Some(("OBJECT_ID", "25544")));
/// assert_eq!(parse_assignment("COMMENT no assignment"), None);
/// ```
#[must_use]
pub fn parse_assignment(line: &str) -> Option<(&str, &str)> {
    let mut parts = line.split('=');
    let key = parts.next()?.trim();
    let value = parts.next()?.trim();
    Some((key, value))
}

/// Read the record fields from an OEM file.
///
/// Returns `Ok(None)` when the file ends before both fields are seen.
///
/// # Errors
///
/// Returns a [`ScanError`] if the file cannot be opened or a line cannot
/// be read (including invalid UTF-8).
pub fn read_record(path: &Path, ids: &IdentityMap) -> Result<Option<OemRecord>, ScanError> {
    let file = File::open(path).map_err(|e| ScanError::from_io(path, e))?;
    extract_record(path, BufReader::new(file), ids)
}

/// Extract the record fields from any line source.
///
/// The first non-empty occurrence of each key wins. The object id is
/// resolved through `ids` when captured.
///
/// # Errors
///
/// Returns a [`ScanError`] attributed to `path` if a line cannot be read.
pub fn extract_record<R: BufRead>(
    path: &Path,
    reader: R,
    ids: &IdentityMap,
) -> Result<Option<OemRecord>, ScanError> {
    let mut object_id: Option<String> = None;
    let mut start_time: Option<String> = None;

    // A lone `\r` also ends a line.
    'lines: for line in reader.lines() {
        let line = line.map_err(|e| ScanError::from_io(path, e))?;

        for segment in line.split('\r') {
            let Some((key, value)) = parse_assignment(segment) else {
                continue;
            };
            if value.is_empty() {
                continue;
            }

            match key {
                OBJECT_ID_KEY if object_id.is_none() => {
                    object_id = Some(ids.resolve(value).to_string());
                }
                START_TIME_KEY if start_time.is_none() => {
                    start_time = Some(value.to_string());
                }
                _ => {}
            }

            if object_id.is_some() && start_time.is_some() {
                break 'lines;
            }
        }
    }

    let record = object_id
        .zip(start_time)
        .map(|(object_id, start_time)| OemRecord::new(path, object_id, start_time));

    if record.is_none() {
        log::debug!("Missing OBJECT_ID or START_TIME: {}", path.display());
    }

    Ok(record)
}
