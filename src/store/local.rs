//! Filesystem item store.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::RunMode;
use crate::error::Result;
use crate::fs::naming::{item_filename, media_dir_name, sanitize_filename};
use crate::fs::paths::{ensure_dir, prepare_directory, write_private};
use crate::store::ItemStore;

/// Stores items as `<root>/<id>.json` and media as `<root>/<id>-media/<file>`.
#[derive(Debug, Clone)]
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Path of the file an item is stored in.
    pub fn item_path(&self, id: &str) -> Result<PathBuf> {
        Ok(self.root.join(item_filename(id)?))
    }

    /// Path of an item's media directory.
    pub fn media_dir(&self, id: &str) -> Result<PathBuf> {
        Ok(self.root.join(media_dir_name(id)?))
    }
}

impl ItemStore for FsStore {
    fn root(&self) -> &Path {
        &self.root
    }

    fn prepare(&self, mode: RunMode) -> Result<()> {
        prepare_directory(&self.root, mode)
    }

    fn exists(&self, id: &str) -> bool {
        self.item_path(id).map(|p| p.exists()).unwrap_or(false)
    }

    fn save<T: Serialize + ?Sized>(&self, id: &str, item: &T) -> Result<()> {
        let path = self.item_path(id)?;
        let data = serde_json::to_vec_pretty(item)?;
        write_private(&path, &data)
    }

    fn create_media_dir(&self, id: &str) -> Result<PathBuf> {
        let dir = self.media_dir(id)?;
        ensure_dir(&dir)?;
        Ok(dir)
    }

    fn save_asset(&self, id: &str, filename: &str, data: &[u8]) -> Result<()> {
        let path = self.media_dir(id)?.join(sanitize_filename(filename)?);
        write_private(&path, data)
    }
}
