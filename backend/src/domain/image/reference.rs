//! Classification of stored image reference strings.
//!
//! A game's `image` column holds either a bundled asset path shipped with the
//! site or the public path of a file in the uploads directory. Only the
//! canonical forms below are recognised; anything else fails closed.

use std::fmt;

/// Public prefix of bundled assets.
pub const BUNDLED_ASSET_PREFIX: &str = "./assets/images/";
/// Public prefix of uploaded files.
pub const UPLOADS_PREFIX: &str = "/uploads/";

const MAX_FILE_NAME_LEN: usize = 255;

/// Reasons a reference string cannot be classified.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ImageReferenceError {
    /// The reference string was empty.
    #[error("image reference must not be empty")]
    Empty,
    /// Starts with neither [`BUNDLED_ASSET_PREFIX`] nor [`UPLOADS_PREFIX`].
    #[error("image reference `{value}` is neither a bundled asset nor an uploaded file")]
    UnknownPrefix { value: String },
    /// Asset path that is absolute or has empty, `.` or `..` segments.
    #[error("bundled asset path `{value}` is not a plain relative path")]
    InvalidAssetPath { value: String },
    /// Uploaded file name that is not a single safe path component.
    #[error("uploaded file name `{value}` is not a bare file name")]
    InvalidFileName { value: String },
}

/// A bare file name inside the uploads directory.
///
/// ## Invariants
/// - Only ASCII letters, digits, `.`, `_` and `-`.
/// - Does not start with `.`; between 1 and 255 bytes.
///
/// # Examples
/// ```
/// use gamics::domain::UploadedFileName;
///
/// assert!(UploadedFileName::new("1700000000000-42.png").is_ok());
/// assert!(UploadedFileName::new("../etc/passwd").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UploadedFileName(String);

impl UploadedFileName {
    /// Validate a bare file name against the invariants above.
    ///
    /// # Errors
    /// [`ImageReferenceError::InvalidFileName`] when any invariant fails.
    ///
    /// # Examples
    /// ```
    /// use gamics::domain::{ImageReferenceError, UploadedFileName};
    ///
    /// assert!(matches!(
    ///     UploadedFileName::new(".hidden.png"),
    ///     Err(ImageReferenceError::InvalidFileName { .. })
    /// ));
    /// ```
    pub fn new(value: impl Into<String>) -> Result<Self, ImageReferenceError> {
        let value = value.into();
        let well_formed = !value.is_empty()
            && value.len() <= MAX_FILE_NAME_LEN
            && !value.starts_with('.')
            && value
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'.' | b'_' | b'-'));
        if well_formed {
            Ok(Self(value))
        } else {
            Err(ImageReferenceError::InvalidFileName { value })
        }
    }

    /// Name for a fresh upload: `<unix millis>-<suffix>.<extension>`.
    pub fn generated(
        unix_millis: i64,
        suffix: u32,
        extension: &str,
    ) -> Result<Self, ImageReferenceError> {
        Self::new(format!("{unix_millis}-{suffix}.{extension}"))
    }

    /// The bare name, without the uploads prefix.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UploadedFileName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Classified image reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ImageReference {
    /// Static asset shipped with the site; never deleted. Holds the path
    /// relative to [`BUNDLED_ASSET_PREFIX`].
    BundledAsset(String),
    /// File in the uploads directory owned by the record that references it.
    UploadedFile(UploadedFileName),
}

impl ImageReference {
    /// Classify a stored or client-supplied reference string.
    ///
    /// # Examples
    /// ```
    /// use gamics::domain::ImageReference;
    ///
    /// let asset = ImageReference::parse("./assets/images/featured-game-1.jpg").unwrap();
    /// assert!(!asset.is_uploaded());
    /// let upload = ImageReference::parse("/uploads/1700000000000-42.png").unwrap();
    /// assert!(upload.is_uploaded());
    /// assert!(ImageReference::parse("/uploads/../../etc/passwd").is_err());
    /// ```
    pub fn parse(value: &str) -> Result<Self, ImageReferenceError> {
        if value.is_empty() {
            return Err(ImageReferenceError::Empty);
        }
        if let Some(rest) = value.strip_prefix(UPLOADS_PREFIX) {
            return UploadedFileName::new(rest)
                .map(Self::UploadedFile)
                .map_err(|_| ImageReferenceError::InvalidFileName {
                    value: value.to_owned(),
                });
        }
        if let Some(rest) = value.strip_prefix(BUNDLED_ASSET_PREFIX) {
            return if is_plain_relative_path(rest) {
                Ok(Self::BundledAsset(rest.to_owned()))
            } else {
                Err(ImageReferenceError::InvalidAssetPath {
                    value: value.to_owned(),
                })
            };
        }
        Err(ImageReferenceError::UnknownPrefix {
            value: value.to_owned(),
        })
    }

    /// Reference for a freshly stored upload.
    pub fn uploaded(name: UploadedFileName) -> Self {
        Self::UploadedFile(name)
    }

    pub fn is_uploaded(&self) -> bool {
        matches!(self, Self::UploadedFile(_))
    }

    /// The uploaded file name, if this reference owns one.
    pub fn uploaded_file(&self) -> Option<&UploadedFileName> {
        match self {
            Self::UploadedFile(name) => Some(name),
            Self::BundledAsset(_) => None,
        }
    }

    /// Canonical string form as persisted and returned to clients.
    pub fn to_stored(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ImageReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BundledAsset(path) => write!(f, "{BUNDLED_ASSET_PREFIX}{path}"),
            Self::UploadedFile(name) => write!(f, "{UPLOADS_PREFIX}{name}"),
        }
    }
}

fn is_plain_relative_path(path: &str) -> bool {
    !path.is_empty()
        && !path.starts_with('/')
        && !path.contains(['\\', '\0'])
        && path
            .split('/')
            .all(|segment| !segment.is_empty() && segment != "." && segment != "..")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("./assets/images/featured-game-1.jpg", "featured-game-1.jpg")]
    #[case("./assets/images/banners/summer.webp", "banners/summer.webp")]
    fn classifies_bundled_assets(#[case] raw: &str, #[case] path: &str) {
        let parsed = ImageReference::parse(raw).expect("bundled asset");
        assert_eq!(parsed, ImageReference::BundledAsset(path.to_owned()));
        assert_eq!(parsed.to_stored(), raw);
    }

    #[rstest]
    #[case("/uploads/1700000000000-123456789.png")]
    #[case("/uploads/123-a.png")]
    #[case("/uploads/cover_final-v2.JPG")]
    fn classifies_uploaded_files(#[case] raw: &str) {
        let parsed = ImageReference::parse(raw).expect("uploaded file");
        assert!(parsed.is_uploaded());
        assert_eq!(parsed.to_stored(), raw);
    }

    #[rstest]
    #[case("/uploads/../../etc/passwd")]
    #[case("/uploads/nested/file.png")]
    #[case("/uploads/.hidden")]
    #[case("/uploads/")]
    #[case("/uploads/a b.png")]
    #[case("/uploads/%2e%2e.png")]
    fn rejects_unsafe_upload_names(#[case] raw: &str) {
        assert!(matches!(
            ImageReference::parse(raw),
            Err(ImageReferenceError::InvalidFileName { .. })
        ));
    }

    #[rstest]
    #[case("./assets/images/")]
    #[case("./assets/images/../../secret.txt")]
    #[case("./assets/images//double.png")]
    #[case("./assets/images/a\\b.png")]
    #[case("./assets/images/./x.png")]
    fn rejects_unsafe_asset_paths(#[case] raw: &str) {
        assert!(matches!(
            ImageReference::parse(raw),
            Err(ImageReferenceError::InvalidAssetPath { .. })
        ));
    }

    #[rstest]
    #[case("https://cdn.example.com/a.png")]
    #[case("uploads/a.png")]
    #[case("/etc/passwd")]
    #[case("assets/images/a.png")]
    fn rejects_unknown_prefixes(#[case] raw: &str) {
        assert!(matches!(
            ImageReference::parse(raw),
            Err(ImageReferenceError::UnknownPrefix { .. })
        ));
    }

    #[rstest]
    fn rejects_empty_reference() {
        assert_eq!(ImageReference::parse(""), Err(ImageReferenceError::Empty));
    }

    #[rstest]
    fn generated_names_follow_the_pattern() {
        let name = UploadedFileName::generated(1_700_000_000_000, 42, "webp").expect("valid");
        assert_eq!(name.as_str(), "1700000000000-42.webp");
    }

    #[rstest]
    fn file_names_are_length_limited() {
        assert!(UploadedFileName::new("a".repeat(255)).is_ok());
        assert!(UploadedFileName::new("a".repeat(256)).is_err());
    }
}
