//! Backup module for paginated resource retrieval.
//!
//! Provides:
//! - Liked tweet and followed account endpoints
//! - The page loop persisting items and their media
//! - Quota-based pacing between pages
//! - Per-resource run state and the overall report

pub mod endpoint;
pub mod media;
pub mod orchestrator;
pub mod pacer;
pub mod paginator;
pub mod state;

pub use endpoint::{Advance, Continuation, Endpoint, FollowedAccounts, LikedTweets, Page};
pub use media::{MediaFetcher, MediaOutcome};
pub use orchestrator::{back_up_resources, run_backup, verify_account};
pub use pacer::{Pacer, DEFAULT_MARGIN};
pub use paginator::{Paginator, PaginatorOptions};
pub use state::{BackupReport, RunState, StopReason};
