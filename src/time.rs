//! Clock abstraction used by the rate limiter and request timing
//!
//! Production code runs on [`SystemClock`], which measures monotonic time and
//! sleeps through tokio. Tests inject a [`ManualClock`] whose `sleep` advances
//! virtual time instantly, so rate-limit spacing can be asserted without waiting.

use std::fmt;
use std::future::Future;
use std::ops::Add;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Boxed future returned by [`Clock::sleep`]
pub type SleepFuture<'a> = Pin<Box<dyn Future<Output = ()> + Send + 'a>>;

/// A point in time, measured as an offset from the owning clock's origin
///
/// Instants from different clocks are not comparable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Instant {
    offset: Duration,
}

impl Instant {
    /// Instant at the given offset from the clock origin
    pub fn from_offset(offset: Duration) -> Self {
        Self { offset }
    }

    /// Offset from the clock origin
    pub fn offset(&self) -> Duration {
        self.offset
    }

    /// Time elapsed from `earlier` to `self`, saturating at zero
    pub fn duration_since(&self, earlier: Instant) -> Duration {
        self.offset.saturating_sub(earlier.offset)
    }
}

impl Add<Duration> for Instant {
    type Output = Instant;

    fn add(self, rhs: Duration) -> Instant {
        Instant {
            offset: self.offset + rhs,
        }
    }
}

/// Source of time and sleeping for the client
pub trait Clock: Send + Sync + fmt::Debug {
    /// Current time
    fn now(&self) -> Instant;

    /// Suspend the caller for `duration`
    fn sleep(&self, duration: Duration) -> SleepFuture<'_>;
}

/// Wall clock backed by the OS monotonic timer and `tokio::time::sleep`
#[derive(Debug, Clone)]
pub struct SystemClock {
    origin: std::time::Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: std::time::Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::from_offset(self.origin.elapsed())
    }

    fn sleep(&self, duration: Duration) -> SleepFuture<'_> {
        Box::pin(tokio::time::sleep(duration))
    }
}

/// Virtual clock for deterministic tests
///
/// `sleep` returns immediately after moving the clock forward by the requested
/// duration. Clones share the same underlying time.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use pubmed_entrez::time::{Clock, ManualClock};
///
/// let clock = ManualClock::new();
/// let start = clock.now();
/// clock.advance(Duration::from_millis(250));
/// assert_eq!(clock.now().duration_since(start), Duration::from_millis(250));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    current: Arc<Mutex<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move virtual time forward
    pub fn advance(&self, duration: Duration) {
        let mut current = self
            .current
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *current += duration;
    }

    /// Total virtual time elapsed since creation
    pub fn elapsed(&self) -> Duration {
        self.now().offset()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        let current = self
            .current
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        Instant::from_offset(*current)
    }

    fn sleep(&self, duration: Duration) -> SleepFuture<'_> {
        Box::pin(async move {
            self.advance(duration);
            tokio::task::yield_now().await;
        })
    }
}
