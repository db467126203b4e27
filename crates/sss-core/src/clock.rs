use std::cell::Cell;

use time::OffsetDateTime;

/// Source of "now", in seconds since the Unix epoch.
pub trait Clock {
    fn now(&self) -> f64;
}

/// Wall clock in UTC.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> f64 {
        OffsetDateTime::now_utc().unix_timestamp_nanos() as f64 / 1e9
    }
}

/// Clock that only moves when told to.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Cell<f64>,
}

impl ManualClock {
    pub fn new(now: f64) -> Self {
        Self {
            now: Cell::new(now),
        }
    }

    pub fn set(&self, now: f64) {
        self.now.set(now);
    }

    pub fn advance(&self, seconds: f64) {
        self.now.set(self.now.get() + seconds);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 {
        self.now.get()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> f64 {
        (**self).now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_clock_is_after_2020() {
        assert!(SystemClock.now() > 1_577_836_800.0);
    }

    #[test]
    fn manual_clock_moves_on_demand() {
        let clock = ManualClock::new(100.0);
        clock.advance(5.5);
        assert_eq!(clock.now(), 105.5);
        clock.set(1.0);
        assert_eq!(clock.now(), 1.0);
    }
}
