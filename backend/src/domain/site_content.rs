//! Editable site text stored as key/value entries.

use std::fmt;

/// Content type tag applied when none is supplied.
pub const DEFAULT_CONTENT_TYPE: &str = "text";

/// Validation failures for content keys.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContentKeyError {
    #[error("content key must not be empty")]
    Empty,
}

/// Unique key of a site content entry, e.g. `hero_title`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContentKey(String);

impl ContentKey {
    pub fn new(value: impl AsRef<str>) -> Result<Self, ContentKeyError> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ContentKeyError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for ContentKey {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ContentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single site content entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteContentEntry {
    pub key: ContentKey,
    pub value: String,
    pub content_type: String,
}

impl SiteContentEntry {
    /// Build a plain text entry.
    pub fn text(key: ContentKey, value: impl Into<String>) -> Self {
        Self {
            key,
            value: value.into(),
            content_type: DEFAULT_CONTENT_TYPE.to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("hero_title", "hero_title")]
    #[case("  countdown_days ", "countdown_days")]
    fn keys_are_trimmed(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(ContentKey::new(raw).expect("valid key").as_str(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn blank_keys_are_rejected(#[case] raw: &str) {
        assert_eq!(ContentKey::new(raw), Err(ContentKeyError::Empty));
    }

    #[rstest]
    fn text_entries_use_default_type() {
        let entry = SiteContentEntry::text(ContentKey::new("site_title").expect("key"), "Gamics");
        assert_eq!(entry.content_type, DEFAULT_CONTENT_TYPE);
    }
}
