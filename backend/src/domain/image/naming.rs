//! Random suffixes for generated upload names.

use rand::Rng;

/// Upper bound (exclusive) of generated suffixes.
pub const SUFFIX_RANGE: u32 = 1_000_000_000;

/// Source of the random component in `<millis>-<suffix>.<ext>` names.
pub trait UploadNameSuffix: Send + Sync {
    fn next_suffix(&self) -> u32;
}

/// Thread-local RNG suffixes in `0..1_000_000_000`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomSuffix;

impl UploadNameSuffix for RandomSuffix {
    fn next_suffix(&self) -> u32 {
        rand::thread_rng().gen_range(0..SUFFIX_RANGE)
    }
}
