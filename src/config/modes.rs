//! Backup mode definitions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which resources a backup run covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackupMode {
    /// Back up liked tweets, then followed accounts (default).
    #[default]
    All,
    /// Back up only liked tweets.
    Likes,
    /// Back up only followed accounts.
    Following,
}

impl BackupMode {
    /// Whether the liked tweets stream is part of this mode.
    pub fn includes_likes(self) -> bool {
        matches!(self, BackupMode::All | BackupMode::Likes)
    }

    /// Whether the followed accounts stream is part of this mode.
    pub fn includes_following(self) -> bool {
        matches!(self, BackupMode::All | BackupMode::Following)
    }
}

impl fmt::Display for BackupMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackupMode::All => write!(f, "all"),
            BackupMode::Likes => write!(f, "likes"),
            BackupMode::Following => write!(f, "following"),
        }
    }
}

impl FromStr for BackupMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(BackupMode::All),
            "likes" => Ok(BackupMode::Likes),
            "following" => Ok(BackupMode::Following),
            _ => Err(format!("Unknown backup mode: {}", s)),
        }
    }
}

/// How an output directory is treated at the start of a run.
///
/// `Fresh` wipes the directory, which makes the per-item existence check
/// redundant except for items a page re-includes within the same run.
/// `Resume` keeps what a previous run left behind and relies on the
/// existence check alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    #[default]
    Fresh,
    Resume,
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunMode::Fresh => write!(f, "fresh"),
            RunMode::Resume => write!(f, "resume"),
        }
    }
}

/// What happens when a media asset cannot be retrieved at the transport level.
///
/// Non-success HTTP statuses are always skipped; this only governs network
/// failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaErrorPolicy {
    /// Abort the whole run (default).
    #[default]
    Abort,
    /// Log the failure and continue with the next asset.
    Skip,
}

/// The two resource streams a backup is made of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Likes,
    Following,
}

impl ResourceKind {
    /// Plural noun used in progress lines.
    pub fn noun(self) -> &'static str {
        match self {
            ResourceKind::Likes => "tweets",
            ResourceKind::Following => "users",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKind::Likes => write!(f, "likes"),
            ResourceKind::Following => write!(f, "followed users"),
        }
    }
}
