//! Time sources for the timer.
//!
//! The timer needs two notions of time: wall-clock time to stamp entries, and
//! a monotonic reading to measure how long it ran. Both come from a [`Clock`]
//! so tests can drive them explicitly.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};

/// Provides wall-clock and monotonic time.
pub trait Clock: Send + Sync {
    /// Current wall-clock time.
    fn now(&self) -> DateTime<Utc>;

    /// Monotonic time elapsed since an arbitrary, fixed origin.
    fn monotonic(&self) -> Duration;
}

/// The real system clock.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn monotonic(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// A clock that only moves when told to.
///
/// Clones share the same underlying time, so a test can keep one handle and
/// give another to the timer.
#[derive(Debug, Clone)]
pub struct ManualClock {
    start: DateTime<Utc>,
    elapsed_ms: Arc<AtomicU64>,
}

impl ManualClock {
    /// Creates a clock whose wall time starts at `start`.
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            start,
            elapsed_ms: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Moves both wall and monotonic time forward.
    pub fn advance(&self, by: Duration) {
        let ms = u64::try_from(by.as_millis()).unwrap_or(u64::MAX);
        self.elapsed_ms.fetch_add(ms, Ordering::SeqCst);
    }

    /// Moves time forward by whole seconds.
    pub fn advance_secs(&self, secs: u64) {
        self.advance(Duration::from_secs(secs));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        let ms = i64::try_from(self.elapsed_ms.load(Ordering::SeqCst)).unwrap_or(i64::MAX);
        self.start + chrono::Duration::milliseconds(ms)
    }

    fn monotonic(&self) -> Duration {
        Duration::from_millis(self.elapsed_ms.load(Ordering::SeqCst))
    }
}
