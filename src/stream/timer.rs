//! src/stream/timer.rs
//!
//! Fixed-interval timer driven by the host loop's clock.
//!
//! The host polls [`IntervalTimer::due`] with the current monotonic time; the
//! timer reports how many periods elapsed since the last poll. Cancelling it
//! makes every later poll return zero.

use std::time::Duration;

#[derive(Clone, Debug)]
pub struct IntervalTimer {
    period: Duration,
    /// `None` once cancelled or before `start`.
    next_due: Option<Duration>,
}

impl IntervalTimer {
    pub fn new(period: Duration) -> Self {
        Self {
            period: period.max(Duration::from_millis(1)),
            next_due: None,
        }
    }

    /// Arm the timer; the first period ends at `now + period`.
    pub fn start(&mut self, now: Duration) {
        self.next_due = Some(now + self.period);
    }

    pub fn cancel(&mut self) {
        self.next_due = None;
    }

    pub fn is_active(&self) -> bool {
        self.next_due.is_some()
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Number of whole periods that ended since the previous poll.
    pub fn due(&mut self, now: Duration) -> u32 {
        let Some(mut next) = self.next_due else {
            return 0;
        };
        let mut fired = 0;
        while next <= now {
            fired += 1;
            next += self.period;
        }
        self.next_due = Some(next);
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn fires_once_per_elapsed_period() {
        let mut t = IntervalTimer::new(ms(100));
        t.start(ms(0));
        assert_eq!(t.due(ms(99)), 0);
        assert_eq!(t.due(ms(100)), 1);
        assert_eq!(t.due(ms(150)), 0);
        assert_eq!(t.due(ms(420)), 3);
    }

    #[test]
    fn unarmed_and_cancelled_timers_never_fire() {
        let mut t = IntervalTimer::new(ms(10));
        assert_eq!(t.due(ms(1_000)), 0);
        t.start(ms(0));
        t.cancel();
        assert!(!t.is_active());
        assert_eq!(t.due(ms(1_000)), 0);
    }
}
