//! Image lifecycle: formats, reference classification and resolution.

mod format;
mod naming;
mod reference;
mod resolution;

pub use format::{DeclaredImage, ImageFormat, ImageFormatError};
pub use naming::{RandomSuffix, SUFFIX_RANGE, UploadNameSuffix};
pub use reference::{
    BUNDLED_ASSET_PREFIX, ImageReference, ImageReferenceError, UPLOADS_PREFIX, UploadedFileName,
};
pub use resolution::{
    CandidateImage, ImageRejection, ImageResolutionError, ResolvedImage, WriteIntent,
    owned_upload, resolve_image, superseded_upload,
};

/// A fresh upload whose format passed the allow-list and whose bytes are
/// buffered in memory, not yet written anywhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    declared: DeclaredImage,
    bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new(declared: DeclaredImage, bytes: Vec<u8>) -> Self {
        Self { declared, bytes }
    }

    pub fn declared(&self) -> &DeclaredImage {
        &self.declared
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}
