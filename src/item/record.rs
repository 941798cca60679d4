//! The record contract shared by liked tweets and followed accounts.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::api::types::{Tweet, User};
use crate::item::attachment::{tweet_attachments, Attachment};
use crate::item::snowflake::tweet_time;

/// A record the paginator can persist.
pub trait BackupItem: Serialize + Send + Sync {
    /// Stable identifier, the decimal string of the numeric id.
    fn id(&self) -> &str;

    /// Numeric id, used as the max-id watermark.
    fn numeric_id(&self) -> u64;

    /// Reference time used for the reported date range.
    fn timestamp(&self) -> Option<DateTime<Utc>> {
        None
    }

    /// Media to store next to the record.
    fn attachments(&self) -> Vec<Attachment> {
        Vec::new()
    }

    /// Line printed after the record was saved, if any.
    fn progress_line(&self) -> Option<String> {
        None
    }
}

impl BackupItem for Tweet {
    fn id(&self) -> &str {
        &self.id_str
    }

    fn numeric_id(&self) -> u64 {
        self.id
    }

    fn timestamp(&self) -> Option<DateTime<Utc>> {
        tweet_time(self.id, self.created_at.as_deref())
    }

    fn attachments(&self) -> Vec<Attachment> {
        tweet_attachments(self)
    }
}

impl BackupItem for User {
    fn id(&self) -> &str {
        &self.id_str
    }

    fn numeric_id(&self) -> u64 {
        self.id
    }

    fn progress_line(&self) -> Option<String> {
        Some(format!(
            "+ saved user {} https://twitter.com/{}",
            self.name, self.screen_name
        ))
    }
}
