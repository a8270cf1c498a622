//! Test clock adapters.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::domain::foundation::Timestamp;
use crate::ports::Clock;

/// Clock pinned to a settable instant, for deterministic tests.
#[derive(Debug)]
pub struct FixedClock {
    unix_secs: AtomicU64,
}

impl FixedClock {
    /// Creates a clock pinned to the given instant.
    pub fn at(ts: Timestamp) -> Self {
        Self {
            unix_secs: AtomicU64::new(ts.as_unix_secs()),
        }
    }

    /// Moves the clock to a new instant.
    pub fn set(&self, ts: Timestamp) {
        self.unix_secs.store(ts.as_unix_secs(), Ordering::SeqCst);
    }

    /// Advances the clock by whole hours.
    pub fn advance_hours(&self, hours: u64) {
        self.unix_secs.fetch_add(hours * 3_600, Ordering::SeqCst);
    }

    /// Advances the clock by whole days.
    pub fn advance_days(&self, days: u64) {
        self.unix_secs.fetch_add(days * 86_400, Ordering::SeqCst);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        Timestamp::from_unix_secs(self.unix_secs.load(Ordering::SeqCst))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_stays_pinned() {
        let ts = Timestamp::from_unix_secs(1_700_000_000);
        let clock = FixedClock::at(ts);
        assert_eq!(clock.now(), ts);
        assert_eq!(clock.now(), ts);
    }

    #[test]
    fn fixed_clock_advances_on_demand() {
        let ts = Timestamp::from_unix_secs(1_700_000_000);
        let clock = FixedClock::at(ts);
        clock.advance_hours(4);
        assert_eq!(clock.now(), ts.plus_hours(4));
        clock.advance_days(1);
        assert_eq!(clock.now(), ts.plus_hours(28));
    }
}
