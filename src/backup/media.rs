//! Media asset downloading.

use crate::api::{Fetched, TwitterApi};
use crate::config::MediaErrorPolicy;
use crate::error::Result;
use crate::item::Attachment;
use crate::output::print_warning;
use crate::store::ItemStore;

/// Assets written and skipped for one item.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MediaOutcome {
    pub saved: u64,
    pub skipped: u64,
}

/// Downloads an item's attachments into its media directory, one at a time.
pub struct MediaFetcher<'a> {
    api: &'a dyn TwitterApi,
    policy: MediaErrorPolicy,
}

impl<'a> MediaFetcher<'a> {
    pub fn new(api: &'a dyn TwitterApi, policy: MediaErrorPolicy) -> Self {
        Self { api, policy }
    }

    /// Fetch and store every attachment of `item_id`.
    ///
    /// A non-success status skips that asset only. Transport failures follow
    /// the configured policy. Directory and write failures always abort.
    pub async fn fetch_all<S: ItemStore>(
        &self,
        store: &S,
        item_id: &str,
        attachments: &[Attachment],
    ) -> Result<MediaOutcome> {
        let mut outcome = MediaOutcome::default();
        if attachments.is_empty() {
            return Ok(outcome);
        }

        let dir = store.create_media_dir(item_id)?;
        tracing::debug!(
            "Downloading {} asset(s) into {}",
            attachments.len(),
            dir.display()
        );

        for attachment in attachments {
            match self.api.fetch_media(&attachment.url).await {
                Ok(Fetched::Ok(data)) => {
                    store.save_asset(item_id, &attachment.filename, &data)?;
                    outcome.saved += 1;
                }
                Ok(Fetched::Status(status)) => {
                    print_warning(&format!("{} skipping {}", status, attachment.url));
                    outcome.skipped += 1;
                }
                Err(e) => match self.policy {
                    MediaErrorPolicy::Abort => return Err(e),
                    MediaErrorPolicy::Skip => {
                        tracing::warn!("Failed to download {}: {}", attachment.url, e);
                        outcome.skipped += 1;
                    }
                },
            }
        }

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::store::FsStore;
    use crate::testing::FakeApi;
    use reqwest::StatusCode;
    use tokio_test::{assert_err, assert_ok};

    fn attachments(names: &[&str]) -> Vec<Attachment> {
        names
            .iter()
            .map(|n| Attachment::from_url(&format!("https://pbs.twimg.com/media/{}", n)).unwrap())
            .collect()
    }

    #[tokio::test]
    async fn test_partial_failure_is_contained() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsStore::new(dir.path());
        let api = FakeApi::new()
            .with_media("https://pbs.twimg.com/media/1.jpg", b"one")
            .with_media_status("https://pbs.twimg.com/media/2.jpg", StatusCode::NOT_FOUND)
            .with_media("https://pbs.twimg.com/media/3.jpg", b"three");

        let fetcher = MediaFetcher::new(&api, MediaErrorPolicy::Abort);
        let outcome = assert_ok!(
            fetcher
                .fetch_all(&store, "42", &attachments(&["1.jpg", "2.jpg", "3.jpg"]))
                .await
        );

        assert_eq!(outcome, MediaOutcome { saved: 2, skipped: 1 });
        let media = dir.path().join("42-media");
        assert_eq!(std::fs::read(media.join("1.jpg")).unwrap(), b"one");
        assert!(!media.join("2.jpg").exists());
        assert_eq!(std::fs::read(media.join("3.jpg")).unwrap(), b"three");
        assert_eq!(api.media_requests().len(), 3);
    }

    #[tokio::test]
    async fn test_transport_failure_aborts_by_default() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsStore::new(dir.path());
        // 1.jpg is unknown to the fake and fails like a dropped connection.
        let api = FakeApi::new().with_media("https://pbs.twimg.com/media/2.jpg", b"two");

        let fetcher = MediaFetcher::new(&api, MediaErrorPolicy::Abort);
        let err = assert_err!(
            fetcher
                .fetch_all(&store, "42", &attachments(&["1.jpg", "2.jpg"]))
                .await
        );

        assert!(matches!(err, Error::Api(_)));
        assert_eq!(api.media_requests().len(), 1);
    }

    #[tokio::test]
    async fn test_transport_failure_skipped_when_configured() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsStore::new(dir.path());
        let api = FakeApi::new().with_media("https://pbs.twimg.com/media/2.jpg", b"two");

        let fetcher = MediaFetcher::new(&api, MediaErrorPolicy::Skip);
        let outcome = assert_ok!(
            fetcher
                .fetch_all(&store, "42", &attachments(&["1.jpg", "2.jpg"]))
                .await
        );

        assert_eq!(outcome, MediaOutcome { saved: 1, skipped: 1 });
    }

    #[tokio::test]
    async fn test_no_attachments_creates_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsStore::new(dir.path());
        let api = FakeApi::new();

        let fetcher = MediaFetcher::new(&api, MediaErrorPolicy::Abort);
        let outcome = assert_ok!(fetcher.fetch_all(&store, "42", &[]).await);

        assert_eq!(outcome, MediaOutcome::default());
        assert!(!dir.path().join("42-media").exists());
    }

    #[tokio::test]
    async fn test_media_dir_failure_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        // A file where the media directory should go.
        std::fs::write(dir.path().join("42-media"), b"").unwrap();
        let store = FsStore::new(dir.path());
        let api = FakeApi::new().with_media("https://pbs.twimg.com/media/1.jpg", b"one");

        let fetcher = MediaFetcher::new(&api, MediaErrorPolicy::Skip);
        let err = assert_err!(
            fetcher
                .fetch_all(&store, "42", &attachments(&["1.jpg"]))
                .await
        );

        assert!(matches!(err, Error::Persistence { .. }));
        assert!(api.media_requests().is_empty());
    }
}
