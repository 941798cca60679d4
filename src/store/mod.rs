//! Item store module.
//!
//! Provides:
//! - The `ItemStore` contract the paginator persists through
//! - A filesystem implementation
//! - Existence-checked item persistence

pub mod local;

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::RunMode;
use crate::error::Result;
use crate::item::BackupItem;

pub use local::FsStore;

/// Persistence for one resource's items and their media.
///
/// Every write error is fatal to the run.
pub trait ItemStore {
    /// Directory the store writes into.
    fn root(&self) -> &Path;

    /// Get the root directory ready for a run.
    fn prepare(&self, mode: RunMode) -> Result<()>;

    /// Whether an item with this id is already stored.
    fn exists(&self, id: &str) -> bool;

    /// Serialize and write an item.
    fn save<T: Serialize + ?Sized>(&self, id: &str, item: &T) -> Result<()>;

    /// Create the media directory of an item and return its path.
    fn create_media_dir(&self, id: &str) -> Result<PathBuf>;

    /// Write one media asset of an item.
    fn save_asset(&self, id: &str, filename: &str, data: &[u8]) -> Result<()>;
}

/// What `persist_item` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Persisted {
    Written,
    AlreadyPresent,
}

/// Write an item unless one with the same id is already stored.
pub fn persist_item<S, T>(store: &S, item: &T) -> Result<Persisted>
where
    S: ItemStore,
    T: BackupItem,
{
    if store.exists(item.id()) {
        tracing::debug!("Skipping existing item: {}", item.id());
        return Ok(Persisted::AlreadyPresent);
    }

    store.save(item.id(), item)?;
    Ok(Persisted::Written)
}
