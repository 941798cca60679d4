//! Filesystem module.
//!
//! Provides:
//! - Directory preparation and size reporting
//! - Item, media directory and asset naming

pub mod naming;
pub mod paths;

pub use naming::{filename_from_url, item_filename, media_dir_name, sanitize_filename};
pub use paths::{directory_size, ensure_dir, prepare_directory, write_private};
