//! Clock Module
//!
//! Second-resolution time source used to age cache entries.

use std::fmt::Debug;
use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;

// == Clock ==
/// Source of the current time in whole seconds.
pub trait Clock: Debug + Send + Sync {
    /// Returns the current Unix timestamp in seconds.
    fn now_secs(&self) -> i64;
}

// == System Clock ==
/// Wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_secs(&self) -> i64 {
        Utc::now().timestamp()
    }
}

// == Manual Clock ==
/// Clock that only moves when told to. Used to simulate time.
#[derive(Debug, Default)]
pub struct ManualClock {
    secs: AtomicI64,
}

impl ManualClock {
    pub fn new(start_secs: i64) -> Self {
        Self {
            secs: AtomicI64::new(start_secs),
        }
    }

    /// Moves the clock forward by `secs`.
    pub fn advance(&self, secs: i64) {
        self.secs.fetch_add(secs, Ordering::SeqCst);
    }

    pub fn set(&self, secs: i64) {
        self.secs.store(secs, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_secs(&self) -> i64 {
        self.secs.load(Ordering::SeqCst)
    }
}
