//! Backed-up records and the attachments they point to.

pub mod attachment;
pub mod record;
pub mod snowflake;

pub use attachment::Attachment;
pub use record::BackupItem;
pub use snowflake::{snowflake_time, tweet_time};
