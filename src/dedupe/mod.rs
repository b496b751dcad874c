//! Duplicate OEM detection module.
//!
//! This module provides functionality for:
//! - Keep-freshest decisions per canonical object id ([`table`])
//! - Full passes over a directory tree with optional removal ([`engine`])

pub mod engine;
pub mod table;

pub use engine::{dedupe, DedupeConfig, DedupeError, DedupeReport, Deduplicator};
pub use table::{FreshEntry, FreshestTable, Partition};
