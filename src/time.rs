//! Time abstraction traits for platform-agnostic timing.
//!
//! Also provides [`Periodic`], the rate limiter that gates the turn-signal
//! progress counter.

/// Trait for abstracting time sources.
pub trait TimeSource<I: TimeInstant> {
    /// Returns the current time instant.
    fn now(&self) -> I;
}

/// Trait abstraction for duration types.
pub trait TimeDuration: Copy + PartialEq + core::fmt::Debug {
    /// Converts duration to milliseconds.
    fn as_millis(&self) -> u64;

    /// Creates duration from milliseconds.
    fn from_millis(millis: u64) -> Self;
}

/// Trait abstraction for instant types.
pub trait TimeInstant: Copy + core::fmt::Debug {
    /// Duration type for this instant.
    type Duration: TimeDuration;

    /// Calculates duration since an earlier instant, saturating at zero.
    fn duration_since(&self, earlier: Self) -> Self::Duration;
}

/// Fires at most once per period, measured against a monotonic clock.
///
/// The first poll arms the timer and never fires. Every later poll fires when
/// at least one period has elapsed since the last trigger, and re-arms at the
/// polled instant. Missed periods are not caught up.
#[derive(Debug, Clone, Copy)]
pub struct Periodic<I: TimeInstant> {
    period: I::Duration,
    last: Option<I>,
}

impl<I: TimeInstant> Periodic<I> {
    /// Creates an unarmed periodic trigger.
    pub fn new(period: I::Duration) -> Self {
        Self { period, last: None }
    }

    /// Returns true if a period has elapsed since the last trigger.
    pub fn poll(&mut self, now: I) -> bool {
        let Some(last) = self.last else {
            self.last = Some(now);
            return false;
        };

        if now.duration_since(last).as_millis() >= self.period.as_millis() {
            self.last = Some(now);
            true
        } else {
            false
        }
    }

    /// Returns the configured period.
    pub fn period(&self) -> I::Duration {
        self.period
    }

    /// Returns true once the first poll has armed the trigger.
    pub fn is_armed(&self) -> bool {
        self.last.is_some()
    }
}
