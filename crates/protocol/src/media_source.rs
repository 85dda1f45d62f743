use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Locator of a playable media item (URI or asset path).
///
/// Wraps `Arc<str>` because every frame snapshot hands the same five
/// locators to the card views; cloning is a refcount bump.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MediaSource(Arc<str>);

impl MediaSource {
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Last path segment, with any query or fragment stripped.
    pub fn file_name(&self) -> &str {
        let path = self
            .0
            .split(['?', '#'])
            .next()
            .unwrap_or_default();
        path.rsplit('/').next().unwrap_or(path)
    }
}

impl std::ops::Deref for MediaSource {
    type Target = str;

    #[inline]
    fn deref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for MediaSource {
    fn from(s: &str) -> Self {
        MediaSource(Arc::from(s))
    }
}

impl From<String> for MediaSource {
    fn from(s: String) -> Self {
        MediaSource(Arc::from(s))
    }
}

impl std::fmt::Display for MediaSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl Serialize for MediaSource {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for MediaSource {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(MediaSource::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_name_strips_query() {
        let src = MediaSource::from("https://cdn.example.com/clips/intro.mp4?v=3");
        assert_eq!(src.file_name(), "intro.mp4");
        assert_eq!(MediaSource::from("local.mp4").file_name(), "local.mp4");
    }

    #[test]
    fn blank_is_empty() {
        assert!(MediaSource::from("  ").is_empty());
        assert!(!MediaSource::from("a.mp4").is_empty());
    }

    #[test]
    fn deserializes_escaped_strings() {
        let src: MediaSource = serde_json::from_str(r#""clips\/a b.mp4""#).unwrap();
        assert_eq!(src.as_str(), "clips/a b.mp4");
    }
}
