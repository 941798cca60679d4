//! API request parameters and response type definitions.
//!
//! Records that end up on disk (`Tweet`, `User`) keep every field the API
//! returned in a flattened map, so the stored file is the full record and not
//! just the fields this crate reads.

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Outcome of a request that reached the server.
///
/// Transport failures are reported as `Err`; a response with a non-success
/// status is not an error at this level, callers decide what it means.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fetched<T> {
    Ok(T),
    Status(StatusCode),
}

/// Parameters for `account/verify_credentials`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerifyParams {
    pub skip_status: bool,
    pub include_email: bool,
}

impl Default for VerifyParams {
    fn default() -> Self {
        Self {
            skip_status: true,
            include_email: true,
        }
    }
}

/// Parameters for `favorites/list`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavoritesParams {
    pub count: u32,
    pub tweet_mode: String,
    pub include_entities: bool,
    /// Newest id to return; omitted on the first request.
    pub max_id: Option<u64>,
}

/// Parameters for `friends/list`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FriendsParams {
    pub count: u32,
    pub include_user_entities: bool,
    pub cursor: i64,
}

/// Authenticated account as returned by identity verification.
#[derive(Debug, Clone, Deserialize)]
pub struct Account {
    pub id_str: String,
    pub screen_name: String,
    #[serde(default)]
    pub name: String,
}

/// A liked tweet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tweet {
    pub id: u64,
    pub id_str: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entities: Option<Entities>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extended_entities: Option<Entities>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Entities node of a tweet; only the media list is read.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Entities {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub media: Vec<MediaEntity>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A media attachment of a tweet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaEntity {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_url_https: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl MediaEntity {
    /// Preferred download URL: https first.
    pub fn url(&self) -> Option<&str> {
        self.media_url_https
            .as_deref()
            .or(self.media_url.as_deref())
    }
}

/// A followed account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub id_str: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub screen_name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One page of `friends/list`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FriendsPage {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub next_cursor: i64,
}
