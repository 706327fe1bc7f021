//! Port abstraction for the uploads directory.
use async_trait::async_trait;

use crate::domain::UploadedFileName;

use super::define_port_error;

define_port_error! {
    /// Failures raised by upload store adapters.
    pub enum UploadStoreError {
        /// Reading or writing the uploads directory failed.
        Io { message: String } => "upload store I/O failed: {message}",
    }
}

/// Named files in the uploads directory.
///
/// Names are [`UploadedFileName`]s, so adapters never see path separators.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UploadStore: Send + Sync {
    /// Whether a regular file with this name is present.
    async fn exists(&self, name: &UploadedFileName) -> Result<bool, UploadStoreError>;

    /// Create a new file. Fails if the name is already taken.
    async fn write(&self, name: &UploadedFileName, bytes: Vec<u8>) -> Result<(), UploadStoreError>;

    /// Delete a file. An absent file counts as success.
    async fn remove(&self, name: &UploadedFileName) -> Result<(), UploadStoreError>;
}
