use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, instrument, warn};

use crate::time::{Clock, Instant, SystemClock};

/// Minimum-spacing rate limiter for NCBI API compliance
///
/// NCBI E-utilities rate limits:
/// - 3 requests per second without API key
/// - 10 requests per second with API key
/// - Violations can result in IP blocking
///
/// No two calls to [`acquire`](RateLimiter::acquire) return less than
/// `1/rate` seconds apart. Clones share the same departure record, so the
/// limit holds across every task using one client.
#[derive(Clone, Debug)]
pub struct RateLimiter {
    rate: f64,
    interval: Duration,
    clock: Arc<dyn Clock>,
    last_departure: Arc<Mutex<Option<Instant>>>,
}

impl RateLimiter {
    /// Create a new rate limiter with the specified rate
    ///
    /// # Arguments
    ///
    /// * `rate` - Maximum requests per second (e.g., 3.0 for NCBI without API key)
    ///
    /// # Example
    ///
    /// ```
    /// use pubmed_entrez::rate_limit::RateLimiter;
    ///
    /// // NCBI rate limit without API key
    /// let limiter = RateLimiter::new(3.0);
    ///
    /// // NCBI rate limit with API key
    /// let limiter_with_key = RateLimiter::new(10.0);
    /// ```
    pub fn new(rate: f64) -> Self {
        Self::with_clock(rate, Arc::new(SystemClock::new()))
    }

    /// Create a rate limiter driven by the given clock
    pub fn with_clock(rate: f64, clock: Arc<dyn Clock>) -> Self {
        let rate = if rate.is_finite() && rate > 0.0 {
            rate
        } else {
            warn!(rate, "Invalid rate limit, falling back to 3 requests/second");
            3.0
        };

        Self {
            rate,
            // Rounded up so N departures never span less than (N-1)/rate
            interval: Duration::from_nanos((1e9 / rate).ceil() as u64),
            clock,
            last_departure: Arc::new(Mutex::new(None)),
        }
    }

    /// Create rate limiter for NCBI API without API key (3 requests/second)
    pub fn ncbi_default() -> Self {
        Self::new(3.0)
    }

    /// Create rate limiter for NCBI API with API key (10 requests/second)
    pub fn ncbi_with_key() -> Self {
        Self::new(10.0)
    }

    /// Wait until the next request may depart, then record the departure
    ///
    /// The lock is held while sleeping, so concurrent callers queue behind
    /// each other and each observes the full interval.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use pubmed_entrez::rate_limit::RateLimiter;
    ///
    /// #[tokio::main]
    /// async fn main() {
    ///     let limiter = RateLimiter::ncbi_default();
    ///
    ///     limiter.acquire().await;
    ///     // Make API call here
    ///
    ///     limiter.acquire().await;
    ///     // At least 1/3 s after the first call
    /// }
    /// ```
    #[instrument(skip(self))]
    pub async fn acquire(&self) -> Instant {
        let mut last = self.last_departure.lock().await;

        if let Some(previous) = *last {
            let earliest = previous + self.interval;
            let now = self.clock.now();
            if now < earliest {
                let wait = earliest.duration_since(now);
                debug!(wait_ms = wait.as_millis() as u64, "Sleeping to respect rate limit");
                self.clock.sleep(wait).await;
            }
        }

        let departure = self.clock.now();
        *last = Some(departure);
        departure
    }

    /// Get the configured rate limit (requests per second)
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Minimum spacing between departures
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Clock used for waiting and departure timestamps
    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }
}
