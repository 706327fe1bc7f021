//! Test utilities for the gamics crate.
//!
//! Shared by unit tests (in `src/`) and integration tests (in `tests/`).
//! Compiled for `cfg(test)` and behind the `test-support` feature.

pub mod cap_fs;
pub mod clock;
pub mod memory;
pub mod multipart;

pub use clock::{MutableClock, SequenceSuffix};
pub use memory::{InMemoryGameRepository, InMemoryUploadStore};
pub use multipart::MultipartBody;
