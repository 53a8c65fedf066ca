//! Time sources for the mint cooldown
//!
//! The ledger never reads a clock itself. Whoever drives it samples a
//! [`Clock`] once per call and passes the timestamp in.

use chrono::Utc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Unix timestamp in seconds
pub type Timestamp = u64;

/// Seconds in one day
pub const SECONDS_PER_DAY: u64 = 60 * 60 * 24;

/// A monotonically non-decreasing source of unix seconds
pub trait Clock {
    fn now(&self) -> Timestamp;
}

/// Wall clock backed by the system time
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        // Timestamps before the epoch clamp to zero
        u64::try_from(Utc::now().timestamp()).unwrap_or(0)
    }
}

/// Clock that only moves when told to
#[derive(Debug, Default)]
pub struct ManualClock {
    now: AtomicU64,
}

impl ManualClock {
    pub fn new(start: Timestamp) -> Self {
        Self {
            now: AtomicU64::new(start),
        }
    }

    /// Move the clock forward by `secs`
    pub fn advance(&self, secs: u64) {
        self.now.fetch_add(secs, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        self.now.load(Ordering::SeqCst)
    }
}
