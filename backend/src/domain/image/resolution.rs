//! Pure image resolution for create and update requests.
//!
//! The resolver decides which image a write should persist from three inputs:
//! whether a fresh upload is present, the optional client-supplied
//! `existing_image`, and (for updates) the currently persisted value. All I/O
//! happens before (classifying the candidate) or after (writing and
//! reclaiming files) in [`crate::domain::CatalogService`].

use super::{ImageReference, ImageReferenceError, UploadedFileName};

/// Which kind of write the image is being resolved for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteIntent<'a> {
    Create,
    Update { current: &'a str },
}

/// Why a client-supplied reference cannot be used.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ImageRejection {
    /// Not a bundled asset or uploaded file reference at all.
    #[error(transparent)]
    Unrecognised(#[from] ImageReferenceError),
    /// The reference names a file the uploads directory does not hold.
    #[error("uploaded file `{0}` does not exist")]
    MissingUpload(UploadedFileName),
    /// Another game already stores this upload; files are never shared.
    #[error("uploaded file `{0}` belongs to another game")]
    ClaimedUpload(UploadedFileName),
}

/// A client-supplied `existing_image` together with its classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateImage {
    raw: String,
    verdict: Result<ImageReference, ImageRejection>,
}

impl CandidateImage {
    /// Candidate that classified as usable.
    pub fn usable(raw: impl Into<String>, reference: ImageReference) -> Self {
        Self {
            raw: raw.into(),
            verdict: Ok(reference),
        }
    }

    /// Candidate that failed classification.
    pub fn rejected(raw: impl Into<String>, rejection: ImageRejection) -> Self {
        Self {
            raw: raw.into(),
            verdict: Err(rejection),
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }
}

/// Image a write should persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedImage {
    /// Store the fresh upload under a generated name.
    FreshUpload,
    /// Persist this reference.
    Reference(ImageReference),
    /// Keep the persisted value untouched (updates only).
    Unchanged,
}

/// Validation failures raised while resolving an image.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ImageResolutionError {
    #[error("an image upload or existing_image is required")]
    MissingImage,
    #[error("existing_image `{raw}` is not a usable image: {reason}")]
    InvalidReference { raw: String, reason: ImageRejection },
}

/// Decide which image to persist.
///
/// Priority: fresh upload, then a usable `existing_image`, then (updates only)
/// the persisted value. An unusable candidate equal to the persisted value is
/// tolerated on update so legacy rows stay editable.
///
/// # Examples
/// ```
/// use gamics::domain::{resolve_image, ImageResolutionError, ResolvedImage, WriteIntent};
///
/// assert_eq!(
///     resolve_image(WriteIntent::Create, false, None),
///     Err(ImageResolutionError::MissingImage)
/// );
/// assert_eq!(
///     resolve_image(WriteIntent::Update { current: "/uploads/1-2.png" }, false, None),
///     Ok(ResolvedImage::Unchanged)
/// );
/// ```
pub fn resolve_image(
    intent: WriteIntent<'_>,
    has_upload: bool,
    candidate: Option<CandidateImage>,
) -> Result<ResolvedImage, ImageResolutionError> {
    if has_upload {
        return Ok(ResolvedImage::FreshUpload);
    }

    let Some(CandidateImage { raw, verdict }) = candidate else {
        return match intent {
            WriteIntent::Create => Err(ImageResolutionError::MissingImage),
            WriteIntent::Update { .. } => Ok(ResolvedImage::Unchanged),
        };
    };

    let matches_current = matches!(intent, WriteIntent::Update { current } if current == raw);
    match verdict {
        Ok(_) if matches_current => Ok(ResolvedImage::Unchanged),
        Ok(reference) => Ok(ResolvedImage::Reference(reference)),
        Err(_) if matches_current => Ok(ResolvedImage::Unchanged),
        Err(reason) => Err(ImageResolutionError::InvalidReference { raw, reason }),
    }
}

/// The uploaded file a write makes obsolete, if any.
///
/// Returns the previous file when the image changed and the previous value was
/// an uploaded file. Bundled assets and unrecognised values are never reclaimed.
pub fn superseded_upload(previous: &str, next: &str) -> Option<UploadedFileName> {
    if previous == next {
        return None;
    }
    owned_upload(previous)
}

/// The uploaded file owned by a stored image value, if any.
pub fn owned_upload(stored: &str) -> Option<UploadedFileName> {
    match ImageReference::parse(stored) {
        Ok(ImageReference::UploadedFile(name)) => Some(name),
        _ => None,
    }
}
