//! Directory management and owner-only file writes.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::Path;

use crate::config::RunMode;
use crate::error::{Error, Result};

/// Permissions for created directories.
#[cfg(unix)]
const DIR_MODE: u32 = 0o700;

/// Permissions for created files.
#[cfg(unix)]
const FILE_MODE: u32 = 0o600;

/// Get a resource directory ready for a run.
///
/// `Fresh` removes whatever is at `path` first; `Resume` keeps it.
pub fn prepare_directory(path: &Path, mode: RunMode) -> Result<()> {
    if mode == RunMode::Fresh {
        match fs::remove_dir_all(path) {
            Ok(()) => tracing::debug!("Removed previous backup at {}", path.display()),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(Error::persistence(path, e)),
        }
    }

    ensure_dir(path)
}

/// Ensure a directory exists, creating it (and its parents) if necessary.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if path.is_dir() {
        return Ok(());
    }

    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(DIR_MODE);
    }

    builder
        .create(path)
        .map_err(|e| Error::persistence(path, e))
}

/// Write `data` to `path`, replacing any previous content.
pub fn write_private(path: &Path, data: &[u8]) -> Result<()> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(FILE_MODE);
    }

    let mut file = options
        .open(path)
        .map_err(|e| Error::persistence(path, e))?;
    file.write_all(data)
        .and_then(|()| file.flush())
        .map_err(|e| Error::persistence(path, e))
}

/// Total size in bytes of all files below `path`.
pub fn directory_size(path: &Path) -> Result<u64> {
    let mut size = 0;

    for entry in fs::read_dir(path)? {
        let entry = entry?;
        let metadata = entry.metadata()?;

        if metadata.is_dir() {
            size += directory_size(&entry.path())?;
        } else {
            size += metadata.len();
        }
    }

    Ok(size)
}
