//! # Storage Layer
//!
//! The [`DataStore`] trait is the persistence boundary: it reads the complete
//! entity set and writes the complete entity set. There is no partial update,
//! no merge and no query; repositories keep the working copy in memory and hand
//! the whole thing back on save.
//!
//! ## Implementations
//!
//! - [`file::FileStore`]: production store, one file per entity type.
//!   - Reads: a missing file is an empty set, not an error.
//!   - Writes: parent directories are created on demand, content goes to a
//!     temporary sibling that is renamed over the target.
//!   - A single async mutex wraps both load and save, so they never interleave
//!     on one store instance. Waiters are served in arrival order.
//!
//! - [`memory::MemoryStore`]: keeps the snapshot in memory, for tests. Can
//!   simulate I/O failures.
//!
//! ## Corrupt Data
//!
//! A malformed or empty file reads as "no records" by default
//! ([`CorruptDataPolicy::TreatAsEmpty`]). This means the next save overwrites
//! whatever was in the damaged file. Hosts that would rather stop than lose data
//! can opt into [`CorruptDataPolicy::Fail`].
//!
//! ## Storage Layout
//!
//! ```text
//! <data dir>/
//! └── Data/
//!     └── Products.json    # JSON array of products
//! ```

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub mod file;
pub mod memory;

/// What a store does when the persisted content cannot be decoded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorruptDataPolicy {
    /// Log a warning and behave as if the file held no records
    #[default]
    TreatAsEmpty,
    /// Return [`crate::error::StockpileError::CorruptData`]
    Fail,
}

/// Abstract interface for whole-set entity persistence.
#[async_trait]
pub trait DataStore<T>: Send + Sync {
    /// Load every stored entity. Replaces, never merges.
    async fn load(&self) -> Result<Vec<T>>;

    /// Overwrite storage with `entities`, returning how many were written.
    async fn save(&self, entities: &[T]) -> Result<usize>;
}
