//! twitter-backup - back up liked tweets and followed accounts.
//!
//! This library walks the paginated favorites and friends endpoints of the
//! Twitter v1.1 API and writes every record to disk as JSON.
//!
//! # Features
//!
//! - OAuth 1.0a signed requests
//! - Max-id watermark and cursor pagination behind one paginator
//! - Photo attachments of liked tweets stored next to the tweet
//! - Fixed pacing derived from the documented rate limits
//! - Fresh or resumable runs
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use twitter_backup::{run_backup, Config, TwitterClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load(Path::new("config.toml"))?;
//!     let api = TwitterClient::new(&config.credentials, &config.options.api_base)?;
//!
//!     let report = run_backup(&api, &config).await?;
//!     println!("{} items saved", report.total_saved());
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod backup;
pub mod cli;
pub mod config;
pub mod error;
pub mod fs;
pub mod item;
pub mod output;
pub mod store;

#[cfg(test)]
pub(crate) mod testing;

// Re-exports for convenience
pub use api::{TwitterApi, TwitterClient};
pub use backup::{run_backup, BackupReport, RunState, StopReason};
pub use config::{BackupMode, Config, RunMode};
pub use error::{Error, Result};
pub use item::BackupItem;
pub use store::{FsStore, ItemStore};
