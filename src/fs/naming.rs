//! File and directory names derived from item ids and media URLs.

use url::Url;

use crate::error::{Error, Result};

/// Extension of serialized item files.
pub const ITEM_EXTENSION: &str = "json";

/// Suffix of the per-item media directory.
pub const MEDIA_DIR_SUFFIX: &str = "-media";

/// Validate and sanitize a filename by removing or replacing invalid characters.
///
/// Returns an error if the filename contains path traversal patterns.
pub fn sanitize_filename(name: &str) -> Result<String> {
    if name.contains("..") {
        return Err(Error::InvalidFilename(format!(
            "Path traversal detected: '{}'",
            name
        )));
    }

    if name.contains('/') || name.contains('\\') {
        return Err(Error::InvalidFilename(format!(
            "Path separators not allowed in filename: '{}'",
            name
        )));
    }

    if name.contains('\0') {
        return Err(Error::InvalidFilename(format!(
            "Null bytes not allowed in filename: '{}'",
            name
        )));
    }

    let sanitized: String = name
        .chars()
        .map(|c| match c {
            ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    if sanitized.trim().is_empty() {
        return Err(Error::InvalidFilename(
            "Filename cannot be empty or whitespace-only".to_string(),
        ));
    }

    Ok(sanitized)
}

/// File name an item with the given id is stored under: `<id>.json`.
pub fn item_filename(id: &str) -> Result<String> {
    let id = sanitize_filename(id)?;
    Ok(format!("{}.{}", id, ITEM_EXTENSION))
}

/// Directory name holding an item's media: `<id>-media`.
pub fn media_dir_name(id: &str) -> Result<String> {
    let id = sanitize_filename(id)?;
    Ok(format!("{}{}", id, MEDIA_DIR_SUFFIX))
}

/// Local filename for a media URL: its last path segment.
///
/// Query strings and fragments are ignored. Returns `None` when the URL does
/// not parse or its last segment is not a usable filename.
pub fn filename_from_url(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let segment = parsed.path_segments()?.last()?;
    sanitize_filename(segment).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_filename_valid() {
        assert_eq!(sanitize_filename("normal.txt").unwrap(), "normal.txt");
        assert_eq!(sanitize_filename("file:name.txt").unwrap(), "file_name.txt");
    }

    #[test]
    fn test_sanitize_filename_rejects() {
        assert!(sanitize_filename("../etc/passwd").is_err());
        assert!(sanitize_filename("path\\to\\file.txt").is_err());
        assert!(sanitize_filename("file\0name.txt").is_err());
        assert!(sanitize_filename("   ").is_err());
    }

    #[test]
    fn test_item_and_media_names() {
        assert_eq!(
            item_filename("1050118621198921728").unwrap(),
            "1050118621198921728.json"
        );
        assert_eq!(
            media_dir_name("1050118621198921728").unwrap(),
            "1050118621198921728-media"
        );
        assert!(item_filename("../1").is_err());
    }

    #[test]
    fn test_filename_from_url() {
        assert_eq!(
            filename_from_url("https://pbs.twimg.com/media/DpCIyA3U0AAaB9y.jpg").as_deref(),
            Some("DpCIyA3U0AAaB9y.jpg")
        );
        assert_eq!(
            filename_from_url("https://video.twimg.com/ext_tw_video/1/pu/vid/720x1280/abc.mp4?tag=10")
                .as_deref(),
            Some("abc.mp4")
        );
        assert_eq!(filename_from_url("https://pbs.twimg.com/"), None);
        assert_eq!(filename_from_url("not a url"), None);
    }
}
