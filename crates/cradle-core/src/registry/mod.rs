//! High-level registry API for the recall list.
//!
//! This module provides the main [`Registry`] interface: the parent-screen
//! side of the assistant. It owns the persistent recall list, applies flow
//! outcomes (`Resolved` / `NotApplicable`) to it, and stores the
//! fire-and-forget checklist-progress snapshots.
//!
//! # Architecture Overview
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │    Handlers     │    │   Operations    │    │     Store       │
//! │ (recall_        │───▶│ (recall_ops)    │───▶│   (via store/)  │
//! │    handlers)    │    │                 │    │                 │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//!     User Interface      Business Logic         Data Persistence
//! ```
//!
//! All operations are async; SQLite work runs on the blocking thread pool.
//! The guided flow never calls into this module directly; the parent wires
//! flow events back into it.
//!
//! # Usage Examples
//!
//! ```rust
//! use cradle_core::{params::ListRecalls, RegistryBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = RegistryBuilder::new()
//!     .with_database_path(Some("recalls.db"))
//!     .build()
//!     .await?;
//!
//! let open = registry.list_summaries(&ListRecalls::default()).await?;
//! for recall in &open {
//!     println!("{}: {}", recall.id, recall.product);
//! }
//! # Ok(())
//! # }
//! ```

use std::path::PathBuf;

use crate::flow::ProgressSink;
use crate::store::Database;

// Module declarations
pub mod builder;
pub mod recall_handlers;
pub mod recall_ops;

#[cfg(test)]
mod tests;

// Re-export the main types
pub use builder::RegistryBuilder;

/// Main registry interface for the persistent recall list.
pub struct Registry {
    pub(crate) db_path: PathBuf,
}

impl Registry {
    /// Creates a new registry with the specified database path.
    pub(crate) fn new(db_path: PathBuf) -> Self {
        Self { db_path }
    }

    /// A [`ProgressSink`] that persists checklist snapshots into this
    /// registry's database.
    ///
    /// Intended to be attached to a
    /// [`FlowController`](crate::flow::FlowController); saves run
    /// synchronously on the caller's thread, which is acceptable for the
    /// single-user flow session this backs.
    pub fn progress_sink(&self) -> StoreProgressSink {
        StoreProgressSink {
            db_path: self.db_path.clone(),
        }
    }
}

/// Checklist-progress sink backed by the registry database.
pub struct StoreProgressSink {
    db_path: PathBuf,
}

impl ProgressSink for StoreProgressSink {
    fn save_progress(&self, recall_id: &str, acknowledged: &[usize]) -> Result<(), String> {
        Database::new(&self.db_path)
            .and_then(|mut db| db.save_progress(recall_id, acknowledged))
            .map_err(|e| e.to_string())
    }
}
