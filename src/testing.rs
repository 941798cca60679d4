//! Fixtures shared by the unit tests: a scripted API and store wrappers.

use std::collections::{HashMap, VecDeque};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Serialize;
use serde_json::json;

use crate::api::{
    Account, FavoritesParams, Fetched, FriendsPage, FriendsParams, Tweet, TwitterApi, User,
    VerifyParams,
};
use crate::config::RunMode;
use crate::error::{Error, Result};
use crate::store::ItemStore;

/// A tweet with the given id and photo URLs.
pub fn tweet(id: u64, media_urls: &[&str]) -> Tweet {
    let mut value = json!({
        "id": id,
        "id_str": id.to_string(),
        "full_text": format!("tweet {}", id),
    });
    if !media_urls.is_empty() {
        let media: Vec<_> = media_urls
            .iter()
            .map(|url| json!({ "media_url_https": url, "type": "photo" }))
            .collect();
        value["entities"] = json!({ "media": [media[0].clone()] });
        value["extended_entities"] = json!({ "media": media });
    }
    serde_json::from_value(value).expect("valid tweet fixture")
}

/// A followed account.
pub fn user(id: u64, screen_name: &str) -> User {
    serde_json::from_value(json!({
        "id": id,
        "id_str": id.to_string(),
        "name": screen_name.to_uppercase(),
        "screen_name": screen_name,
    }))
    .expect("valid user fixture")
}

/// Scripted answer to one request.
#[derive(Debug, Clone)]
pub enum FakeReply<T> {
    Page(T),
    Status(StatusCode),
    Transport,
}

fn transport_error() -> Error {
    Error::Api("connection reset by peer".to_string())
}

/// `TwitterApi` answering from queues and recording every request.
///
/// Once a queue runs dry the endpoint answers with an empty final page.
#[derive(Default)]
pub struct FakeApi {
    reject_credentials: bool,
    likes: Mutex<VecDeque<FakeReply<Vec<Tweet>>>>,
    friends: Mutex<VecDeque<FakeReply<(Vec<User>, i64)>>>,
    media: HashMap<String, FakeReply<Vec<u8>>>,
    like_requests: Mutex<Vec<FavoritesParams>>,
    friend_requests: Mutex<Vec<FriendsParams>>,
    media_requests: Mutex<Vec<String>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rejecting_credentials(mut self) -> Self {
        self.reject_credentials = true;
        self
    }

    pub fn with_likes(mut self, reply: FakeReply<Vec<Tweet>>) -> Self {
        self.likes.get_mut().unwrap().push_back(reply);
        self
    }

    pub fn with_friends(mut self, reply: FakeReply<(Vec<User>, i64)>) -> Self {
        self.friends.get_mut().unwrap().push_back(reply);
        self
    }

    pub fn with_media(mut self, url: &str, data: &[u8]) -> Self {
        self.media
            .insert(url.to_string(), FakeReply::Page(data.to_vec()));
        self
    }

    pub fn with_media_status(mut self, url: &str, status: StatusCode) -> Self {
        self.media.insert(url.to_string(), FakeReply::Status(status));
        self
    }

    pub fn like_requests(&self) -> Vec<FavoritesParams> {
        self.like_requests.lock().unwrap().clone()
    }

    pub fn friend_requests(&self) -> Vec<FriendsParams> {
        self.friend_requests.lock().unwrap().clone()
    }

    pub fn media_requests(&self) -> Vec<String> {
        self.media_requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl TwitterApi for FakeApi {
    async fn verify_credentials(&self, _params: &VerifyParams) -> Result<Account> {
        if self.reject_credentials {
            return Err(Error::Authentication(
                "identity verification rejected: HTTP 401 Unauthorized".to_string(),
            ));
        }

        Ok(Account {
            id_str: "783214".to_string(),
            screen_name: "backup_owner".to_string(),
            name: "Backup Owner".to_string(),
        })
    }

    async fn favorites(&self, params: &FavoritesParams) -> Result<Fetched<Vec<Tweet>>> {
        self.like_requests.lock().unwrap().push(params.clone());

        match self.likes.lock().unwrap().pop_front() {
            Some(FakeReply::Page(tweets)) => Ok(Fetched::Ok(tweets)),
            Some(FakeReply::Status(status)) => Ok(Fetched::Status(status)),
            Some(FakeReply::Transport) => Err(transport_error()),
            None => Ok(Fetched::Ok(Vec::new())),
        }
    }

    async fn friends(&self, params: &FriendsParams) -> Result<Fetched<FriendsPage>> {
        self.friend_requests.lock().unwrap().push(*params);

        match self.friends.lock().unwrap().pop_front() {
            Some(FakeReply::Page((users, next_cursor))) => {
                Ok(Fetched::Ok(FriendsPage { users, next_cursor }))
            }
            Some(FakeReply::Status(status)) => Ok(Fetched::Status(status)),
            Some(FakeReply::Transport) => Err(transport_error()),
            None => Ok(Fetched::Ok(FriendsPage::default())),
        }
    }

    async fn fetch_media(&self, url: &str) -> Result<Fetched<Vec<u8>>> {
        self.media_requests.lock().unwrap().push(url.to_string());

        match self.media.get(url) {
            Some(FakeReply::Page(data)) => Ok(Fetched::Ok(data.clone())),
            Some(FakeReply::Status(status)) => Ok(Fetched::Status(*status)),
            Some(FakeReply::Transport) | None => Err(transport_error()),
        }
    }
}

/// Store wrapper counting successful item saves.
pub struct CountingStore<S> {
    inner: S,
    saves: AtomicUsize,
}

impl<S> CountingStore<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            saves: AtomicUsize::new(0),
        }
    }

    pub fn saves(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

impl<S: ItemStore> ItemStore for CountingStore<S> {
    fn root(&self) -> &Path {
        self.inner.root()
    }

    fn prepare(&self, mode: RunMode) -> Result<()> {
        self.inner.prepare(mode)
    }

    fn exists(&self, id: &str) -> bool {
        self.inner.exists(id)
    }

    fn save<T: Serialize + ?Sized>(&self, id: &str, item: &T) -> Result<()> {
        self.inner.save(id, item)?;
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn create_media_dir(&self, id: &str) -> Result<PathBuf> {
        self.inner.create_media_dir(id)
    }

    fn save_asset(&self, id: &str, filename: &str, data: &[u8]) -> Result<()> {
        self.inner.save_asset(id, filename, data)
    }
}

/// Store wrapper whose item saves start failing after `allowed` successes.
pub struct FailingStore<S> {
    inner: CountingStore<S>,
    allowed: usize,
}

impl<S> FailingStore<S> {
    pub fn new(inner: S, allowed: usize) -> Self {
        Self {
            inner: CountingStore::new(inner),
            allowed,
        }
    }
}

impl<S: ItemStore> ItemStore for FailingStore<S> {
    fn root(&self) -> &Path {
        self.inner.root()
    }

    fn prepare(&self, mode: RunMode) -> Result<()> {
        self.inner.prepare(mode)
    }

    fn exists(&self, id: &str) -> bool {
        self.inner.exists(id)
    }

    fn save<T: Serialize + ?Sized>(&self, id: &str, item: &T) -> Result<()> {
        if self.inner.saves() >= self.allowed {
            return Err(Error::persistence(
                self.root().join(format!("{}.json", id)),
                io::Error::new(io::ErrorKind::Other, "no space left on device"),
            ));
        }
        self.inner.save(id, item)
    }

    fn create_media_dir(&self, id: &str) -> Result<PathBuf> {
        self.inner.create_media_dir(id)
    }

    fn save_asset(&self, id: &str, filename: &str, data: &[u8]) -> Result<()> {
        self.inner.save_asset(id, filename, data)
    }
}
