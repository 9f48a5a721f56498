//! Millisecond clock types for unit tests.

use crate::time::{TimeDuration, TimeInstant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Millis(pub(crate) u64);

impl TimeDuration for Millis {
    fn as_millis(&self) -> u64 {
        self.0
    }

    fn from_millis(millis: u64) -> Self {
        Millis(millis)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Tick(pub(crate) u64);

impl TimeInstant for Tick {
    type Duration = Millis;

    fn duration_since(&self, earlier: Self) -> Millis {
        Millis(self.0.saturating_sub(earlier.0))
    }
}
