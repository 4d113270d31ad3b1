//! Client-side request throttle.
//!
//! Cooperative and best effort: a one-cell governor quota that spaces
//! requests made through one provider handle. It never rejects a request.

use std::fmt;
use std::time::Duration;

use governor::clock::{Clock, DefaultClock};
use governor::{DefaultDirectRateLimiter, Quota};

pub struct Throttle {
    min_interval: Duration,
    /// `None` when the interval is zero.
    limiter: Option<DefaultDirectRateLimiter>,
    clock: DefaultClock,
}

impl Throttle {
    pub fn new(min_interval: Duration) -> Self {
        let limiter = Quota::with_period(min_interval).map(DefaultDirectRateLimiter::direct);
        Self {
            min_interval,
            limiter,
            clock: DefaultClock::default(),
        }
    }

    /// A throttle that never waits.
    pub fn disabled() -> Self {
        Self::new(Duration::ZERO)
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    pub fn is_enabled(&self) -> bool {
        self.limiter.is_some()
    }

    /// Take a slot without waiting. Returns the remaining wait when the
    /// quota is exhausted.
    pub fn try_acquire(&self) -> Result<(), Duration> {
        match &self.limiter {
            Some(limiter) => limiter
                .check()
                .map_err(|not_until| not_until.wait_time_from(self.clock.now())),
            None => Ok(()),
        }
    }

    /// Block until the next request is allowed, then mark it as sent.
    pub fn acquire(&self) {
        while let Err(wait) = self.try_acquire() {
            tracing::trace!(wait_ms = wait.as_millis() as u64, "throttling request");
            std::thread::sleep(wait);
        }
    }
}

impl fmt::Debug for Throttle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Throttle")
            .field("min_interval", &self.min_interval)
            .field("enabled", &self.is_enabled())
            .finish()
    }
}
