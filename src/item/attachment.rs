//! Attachment descriptors.

use crate::api::types::{MediaEntity, Tweet};
use crate::fs::naming::filename_from_url;

/// A remote media asset belonging to an item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    /// Where the asset is downloaded from.
    pub url: String,
    /// Name it is stored under: the URL's last path segment.
    pub filename: String,
}

impl Attachment {
    /// Build a descriptor, or `None` if the URL has no usable filename.
    pub fn from_url(url: &str) -> Option<Self> {
        let filename = filename_from_url(url)?;
        Some(Self {
            url: url.to_string(),
            filename,
        })
    }
}

/// Attachments of a tweet.
///
/// The extended entities list every photo of a multi-photo tweet while the
/// plain entities only carry the first, so the extended list wins when it
/// has anything in it.
pub fn tweet_attachments(tweet: &Tweet) -> Vec<Attachment> {
    let media: &[MediaEntity] = match (&tweet.extended_entities, &tweet.entities) {
        (Some(extended), _) if !extended.media.is_empty() => &extended.media,
        (_, Some(entities)) => &entities.media,
        _ => &[],
    };

    media
        .iter()
        .filter_map(|m| {
            let url = m.url()?;
            let attachment = Attachment::from_url(url);
            if attachment.is_none() {
                tracing::debug!("Ignoring media without a usable filename: {}", url);
            }
            attachment
        })
        .collect()
}
