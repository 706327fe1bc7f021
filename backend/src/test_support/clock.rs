//! Deterministic clock and upload-name doubles.

use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};

use chrono::{DateTime, Local, TimeDelta, Utc};
use mockable::Clock;

use crate::domain::UploadNameSuffix;

/// Clock whose time only moves when told to.
pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    pub fn advance_seconds(&self, seconds: i64) {
        *self.lock_clock() += TimeDelta::seconds(seconds);
    }

    fn lock_clock(&self) -> std::sync::MutexGuard<'_, DateTime<Utc>> {
        match self.0.lock() {
            Ok(guard) => guard,
            Err(_) => panic!("clock mutex"),
        }
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.lock_clock()
    }
}

/// Upload-name suffixes counting up from a start value.
#[derive(Debug, Default)]
pub struct SequenceSuffix(AtomicU32);

impl SequenceSuffix {
    pub fn starting_at(first: u32) -> Self {
        Self(AtomicU32::new(first))
    }
}

impl UploadNameSuffix for SequenceSuffix {
    fn next_suffix(&self) -> u32 {
        self.0.fetch_add(1, Ordering::Relaxed)
    }
}
