//! Filesystem adapter for the uploads directory.

mod cap_std_upload_store;

pub use cap_std_upload_store::CapStdUploadStore;
