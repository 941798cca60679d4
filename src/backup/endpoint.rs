//! Paginated resources and how each one continues from page to page.

use async_trait::async_trait;

use crate::api::{FavoritesParams, Fetched, FriendsParams, Tweet, TwitterApi, User};
use crate::backup::state::StopReason;
use crate::config::{FollowingConfig, LikesConfig, ResourceKind};
use crate::error::Result;
use crate::item::BackupItem;

/// Cursor value the followed accounts stream starts from.
pub const FIRST_CURSOR: i64 = -1;

/// Cursor value marking the end of a cursored stream.
pub const LAST_CURSOR: i64 = 0;

/// Items of one response and the cursor to continue with, if the resource
/// hands one out.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub next_cursor: Option<i64>,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items,
            next_cursor: None,
        }
    }

    pub fn with_cursor(items: Vec<T>, next_cursor: i64) -> Self {
        Self {
            items,
            next_cursor: Some(next_cursor),
        }
    }
}

/// Token carried from one request to the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Continuation {
    /// Newest id to return. `None` asks for the newest page.
    MaxId(Option<u64>),
    /// Opaque cursor. `0` ends the stream.
    Cursor(i64),
}

/// Where to go after a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    Next(Continuation),
    Stop(StopReason),
}

impl Continuation {
    /// Whether `item` is the watermark item itself.
    ///
    /// A max-id request includes the item with that id, so every page after
    /// the first starts with the last item of the page before.
    pub fn repeats<T: BackupItem>(&self, item: &T) -> bool {
        matches!(self, Continuation::MaxId(Some(max_id)) if item.numeric_id() == *max_id)
    }

    /// Derive the next token from a non-empty page.
    ///
    /// A page holding only the watermark item ends the stream. An item newer
    /// than the watermark, or a cursor that does not change, would request
    /// the same pages again and stops the run as stalled.
    pub fn advance<T: BackupItem>(self, page: &Page<T>) -> Advance {
        match self {
            Continuation::MaxId(previous) => {
                let Some(last) = page.items.last() else {
                    return Advance::Stop(StopReason::Exhausted);
                };
                let next = last.numeric_id();
                if let Some(previous) = previous {
                    if page.items.iter().any(|item| item.numeric_id() > previous) {
                        return Advance::Stop(StopReason::Stalled);
                    }
                    if next == previous {
                        return Advance::Stop(StopReason::Exhausted);
                    }
                }
                Advance::Next(Continuation::MaxId(Some(next)))
            }
            Continuation::Cursor(previous) => match page.next_cursor {
                None | Some(LAST_CURSOR) => Advance::Stop(StopReason::EndOfCursor),
                Some(next) if next == previous => Advance::Stop(StopReason::Stalled),
                Some(next) => Advance::Next(Continuation::Cursor(next)),
            },
        }
    }
}

/// A paginated resource.
#[async_trait]
pub trait Endpoint: Send + Sync {
    type Item: BackupItem;

    fn kind(&self) -> ResourceKind;

    /// Token for the first request.
    fn start(&self) -> Continuation;

    /// Request one page.
    async fn fetch(
        &self,
        api: &dyn TwitterApi,
        token: Continuation,
        count: u32,
    ) -> Result<Fetched<Page<Self::Item>>>;
}

/// Liked tweets, paginated by max-id watermark.
#[derive(Debug, Clone, Default)]
pub struct LikedTweets {
    pub config: LikesConfig,
}

impl LikedTweets {
    pub fn new(config: LikesConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Endpoint for LikedTweets {
    type Item = Tweet;

    fn kind(&self) -> ResourceKind {
        ResourceKind::Likes
    }

    fn start(&self) -> Continuation {
        Continuation::MaxId(None)
    }

    async fn fetch(
        &self,
        api: &dyn TwitterApi,
        token: Continuation,
        count: u32,
    ) -> Result<Fetched<Page<Tweet>>> {
        let max_id = match token {
            Continuation::MaxId(max_id) => max_id,
            Continuation::Cursor(_) => None,
        };
        let params = FavoritesParams {
            count,
            tweet_mode: self.config.tweet_mode.clone(),
            include_entities: self.config.include_entities,
            max_id,
        };

        Ok(match api.favorites(&params).await? {
            Fetched::Ok(tweets) => Fetched::Ok(Page::new(tweets)),
            Fetched::Status(status) => Fetched::Status(status),
        })
    }
}

/// Followed accounts, paginated by cursor.
#[derive(Debug, Clone, Default)]
pub struct FollowedAccounts {
    pub config: FollowingConfig,
}

impl FollowedAccounts {
    pub fn new(config: FollowingConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Endpoint for FollowedAccounts {
    type Item = User;

    fn kind(&self) -> ResourceKind {
        ResourceKind::Following
    }

    fn start(&self) -> Continuation {
        Continuation::Cursor(FIRST_CURSOR)
    }

    async fn fetch(
        &self,
        api: &dyn TwitterApi,
        token: Continuation,
        count: u32,
    ) -> Result<Fetched<Page<User>>> {
        let cursor = match token {
            Continuation::Cursor(cursor) => cursor,
            Continuation::MaxId(_) => FIRST_CURSOR,
        };
        let params = FriendsParams {
            count,
            include_user_entities: self.config.include_user_entities,
            cursor,
        };

        Ok(match api.friends(&params).await? {
            Fetched::Ok(page) => Fetched::Ok(Page::with_cursor(page.users, page.next_cursor)),
            Fetched::Status(status) => Fetched::Status(status),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{tweet, user};

    #[test]
    fn test_max_id_follows_last_item() {
        let page = Page::new(vec![tweet(900, &[]), tweet(800, &[]), tweet(700, &[])]);

        assert_eq!(
            Continuation::MaxId(None).advance(&page),
            Advance::Next(Continuation::MaxId(Some(700)))
        );
        assert_eq!(
            Continuation::MaxId(Some(950)).advance(&page),
            Advance::Next(Continuation::MaxId(Some(700)))
        );
    }

    #[test]
    fn test_watermark_only_page_ends_stream() {
        let page = Page::new(vec![tweet(700, &[])]);
        let token = Continuation::MaxId(Some(700));

        assert!(token.repeats(&page.items[0]));
        assert_eq!(token.advance(&page), Advance::Stop(StopReason::Exhausted));
    }

    #[test]
    fn test_watermark_repeat_then_older_items_advance() {
        let page = Page::new(vec![tweet(700, &[]), tweet(650, &[]), tweet(600, &[])]);
        let token = Continuation::MaxId(Some(700));

        assert!(token.repeats(&page.items[0]));
        assert!(!token.repeats(&page.items[1]));
        assert!(!Continuation::MaxId(None).repeats(&page.items[0]));
        assert_eq!(
            token.advance(&page),
            Advance::Next(Continuation::MaxId(Some(600)))
        );
    }

    #[test]
    fn test_item_newer_than_watermark_stalls() {
        let page = Page::new(vec![tweet(750, &[]), tweet(600, &[])]);

        assert_eq!(
            Continuation::MaxId(Some(700)).advance(&page),
            Advance::Stop(StopReason::Stalled)
        );
    }

    #[test]
    fn test_cursor_end_and_stall() {
        let users = vec![user(1, "one")];

        assert_eq!(
            Continuation::Cursor(FIRST_CURSOR).advance(&Page::with_cursor(users.clone(), 55)),
            Advance::Next(Continuation::Cursor(55))
        );
        assert_eq!(
            Continuation::Cursor(55).advance(&Page::with_cursor(users.clone(), 0)),
            Advance::Stop(StopReason::EndOfCursor)
        );
        assert_eq!(
            Continuation::Cursor(55).advance(&Page::with_cursor(users.clone(), 55)),
            Advance::Stop(StopReason::Stalled)
        );
        assert_eq!(
            Continuation::Cursor(55).advance(&Page::new(users)),
            Advance::Stop(StopReason::EndOfCursor)
        );
    }
}
