//! Freshest-file table and the keep-freshest decision rule.
//!
//! # Overview
//!
//! [`Partition`] consumes one [`OemRecord`] at a time and sorts its path
//! into one of two places:
//!
//! - the [`FreshestTable`], which holds the current winner per object id
//! - the stale list, which is append-only
//!
//! A newcomer replaces the incumbent only when its start time is strictly
//! greater; on equal start times the incumbent is kept.
//!
//! # Example
//!
//! ```
//! use oemdedupe::dedupe::Partition;
//! use oemdedupe::scanner::OemRecord;
//! use std::path::PathBuf;
//!
//! let mut partition = Partition::default();
//! partition.observe(OemRecord::new("a.oem", "25544", "2020-01-01T00:00:00"));
//! partition.observe(OemRecord::new("b.oem", "25544", "2021-06-01T00:00:00"));
//!
//! assert_eq!(partition.fresh.get("25544").unwrap().path, PathBuf::from("b.oem"));
//! assert_eq!(partition.stale, vec![PathBuf::from("a.oem")]);
//! ```

use std::collections::btree_map::{self, BTreeMap};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::scanner::OemRecord;

/// The winning file for one object id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FreshEntry {
    /// Path of the winning file
    pub path: PathBuf,
    /// Its start time token
    pub start_time: String,
}

/// Canonical object id → currently winning file.
///
/// Ordered by object id so reports are stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FreshestTable {
    entries: BTreeMap<String, FreshEntry>,
}

impl FreshestTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Winning entry for an object id.
    #[must_use]
    pub fn get(&self, object_id: &str) -> Option<&FreshEntry> {
        self.entries.get(object_id)
    }

    /// Whether `path` is the winner for some object id.
    #[must_use]
    pub fn holds_path(&self, path: &Path) -> bool {
        self.entries.values().any(|entry| entry.path == path)
    }

    /// Number of distinct object ids.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(object_id, entry)` in object id order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, FreshEntry> {
        self.entries.iter()
    }

    /// Apply the decision rule to one record.
    ///
    /// Returns the path that this record made stale: the previous winner if
    /// the record is strictly newer, otherwise the record's own path. The
    /// first record for an id makes nothing stale.
    pub fn observe(&mut self, record: OemRecord) -> Option<PathBuf> {
        let OemRecord {
            path,
            object_id,
            start_time,
        } = record;

        match self.entries.entry(object_id) {
            btree_map::Entry::Vacant(slot) => {
                slot.insert(FreshEntry { path, start_time });
                None
            }
            btree_map::Entry::Occupied(mut slot) => {
                if slot.get().start_time < start_time {
                    let previous = std::mem::replace(slot.get_mut(), FreshEntry { path, start_time });
                    Some(previous.path)
                } else {
                    Some(path)
                }
            }
        }
    }
}

impl<'a> IntoIterator for &'a FreshestTable {
    type Item = (&'a String, &'a FreshEntry);
    type IntoIter = btree_map::Iter<'a, String, FreshEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Running result of a deduplication pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Partition {
    /// Current winner per object id
    pub fresh: FreshestTable,
    /// Superseded files, in the order they were superseded
    pub stale: Vec<PathBuf>,
}

impl Partition {
    /// Feed one record through the decision rule.
    pub fn observe(&mut self, record: OemRecord) {
        if let Some(superseded) = self.fresh.observe(record) {
            log::debug!("Stale: {}", superseded.display());
            self.stale.push(superseded);
        }
    }

    /// Split into the table and the stale list.
    #[must_use]
    pub fn into_parts(self) -> (FreshestTable, Vec<PathBuf>) {
        (self.fresh, self.stale)
    }
}

impl Extend<OemRecord> for Partition {
    fn extend<I: IntoIterator<Item = OemRecord>>(&mut self, records: I) {
        for record in records {
            self.observe(record);
        }
    }
}

impl FromIterator<OemRecord> for Partition {
    fn from_iter<I: IntoIterator<Item = OemRecord>>(records: I) -> Self {
        let mut partition = Self::default();
        partition.extend(records);
        partition
    }
}
