//! File actions module.
//!
//! The only action is removal of stale files once a deduplication pass
//! has decided which copies are superseded. Removal is either permanent
//! or a move to the system trash.
//!
//! ```no_run
//! use oemdedupe::actions::{delete_stale, DeleteMode};
//! use std::path::PathBuf;
//!
//! let result = delete_stale(&[PathBuf::from("/data/old.oem")], DeleteMode::Trash);
//! assert!(result.all_succeeded());
//! ```

pub mod delete;

pub use delete::{
    delete_stale, delete_to_trash, permanent_delete, BatchDeleteResult, DeleteError, DeleteMode,
    DeleteResult,
};
