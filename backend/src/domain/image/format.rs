//! Allow-list of image formats accepted for uploads.
//!
//! Both the declared media type and the filename extension must be on the
//! list; they are checked before any upload bytes are read.

use std::fmt;

/// Image formats accepted for upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    Jpeg,
    Png,
    Gif,
    Webp,
}

impl ImageFormat {
    /// Match a lowercased filename extension without the leading dot.
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension {
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "png" => Some(Self::Png),
            "gif" => Some(Self::Gif),
            "webp" => Some(Self::Webp),
            _ => None,
        }
    }

    /// Match a media type essence such as `image/png`.
    pub fn from_media_type(media_type: &str) -> Option<Self> {
        match media_type.trim().to_ascii_lowercase().as_str() {
            "image/jpeg" | "image/jpg" => Some(Self::Jpeg),
            "image/png" => Some(Self::Png),
            "image/gif" => Some(Self::Gif),
            "image/webp" => Some(Self::Webp),
            _ => None,
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Jpeg => "jpeg",
            Self::Png => "png",
            Self::Gif => "gif",
            Self::Webp => "webp",
        })
    }
}

/// Reasons an upload is refused before its bytes are accepted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ImageFormatError {
    #[error("only image files are allowed (jpeg, jpg, png, gif, webp)")]
    UnsupportedMediaType { media_type: String },
    #[error("only image files are allowed (jpeg, jpg, png, gif, webp)")]
    UnsupportedExtension { filename: String },
}

/// Upload metadata that passed the allow-list.
///
/// ## Invariants
/// - `extension` is lowercased, non-empty and maps to an [`ImageFormat`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclaredImage {
    format: ImageFormat,
    extension: String,
}

impl DeclaredImage {
    /// Check the declared media type and original filename of an upload.
    ///
    /// # Examples
    /// ```
    /// use gamics::domain::{DeclaredImage, ImageFormat};
    ///
    /// let declared = DeclaredImage::check(Some("image/png"), "Cover.PNG").unwrap();
    /// assert_eq!(declared.format(), ImageFormat::Png);
    /// assert_eq!(declared.extension(), "png");
    /// assert!(DeclaredImage::check(Some("text/plain"), "notes.png").is_err());
    /// ```
    pub fn check(media_type: Option<&str>, filename: &str) -> Result<Self, ImageFormatError> {
        let media_type = media_type.unwrap_or_default();
        if ImageFormat::from_media_type(media_type).is_none() {
            return Err(ImageFormatError::UnsupportedMediaType {
                media_type: media_type.to_owned(),
            });
        }

        let extension = extension_of(filename).ok_or_else(|| {
            ImageFormatError::UnsupportedExtension {
                filename: filename.to_owned(),
            }
        })?;
        let format = ImageFormat::from_extension(&extension).ok_or_else(|| {
            ImageFormatError::UnsupportedExtension {
                filename: filename.to_owned(),
            }
        })?;

        Ok(Self { format, extension })
    }

    pub fn format(&self) -> ImageFormat {
        self.format
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }
}

fn extension_of(filename: &str) -> Option<String> {
    let base = filename.rsplit(['/', '\\']).next().unwrap_or(filename);
    let (stem, extension) = base.rsplit_once('.')?;
    if stem.is_empty() || extension.is_empty() {
        return None;
    }
    Some(extension.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("image/jpeg", "photo.jpg", ImageFormat::Jpeg, "jpg")]
    #[case("image/jpeg", "photo.JPEG", ImageFormat::Jpeg, "jpeg")]
    #[case("image/png", "C:\\Users\\me\\cover.png", ImageFormat::Png, "png")]
    #[case("IMAGE/GIF", "anim.gif", ImageFormat::Gif, "gif")]
    #[case("image/webp", "hero.final.webp", ImageFormat::Webp, "webp")]
    fn accepts_allow_listed_uploads(
        #[case] media_type: &str,
        #[case] filename: &str,
        #[case] format: ImageFormat,
        #[case] extension: &str,
    ) {
        let declared = DeclaredImage::check(Some(media_type), filename).expect("allowed");
        assert_eq!(declared.format(), format);
        assert_eq!(declared.extension(), extension);
    }

    #[rstest]
    #[case(Some("text/plain"), "cover.png")]
    #[case(Some("image/svg+xml"), "cover.png")]
    #[case(None, "cover.png")]
    fn rejects_unlisted_media_types(#[case] media_type: Option<&str>, #[case] filename: &str) {
        let err = DeclaredImage::check(media_type, filename).expect_err("rejected");
        assert!(matches!(err, ImageFormatError::UnsupportedMediaType { .. }));
    }

    #[rstest]
    #[case("cover.exe")]
    #[case("cover.svg")]
    #[case("cover")]
    #[case(".png")]
    #[case("cover.")]
    fn rejects_unlisted_extensions(#[case] filename: &str) {
        let err = DeclaredImage::check(Some("image/png"), filename).expect_err("rejected");
        assert!(matches!(err, ImageFormatError::UnsupportedExtension { .. }));
    }
}
