//! src/monitor/timing.rs
//!
//! Small timing helpers: scoped measurement, FPS from frame stamps, and
//! clock-driven throttle/debounce gates.

use std::time::{Duration, Instant};

/// Run `f` and log how long it took at debug level.
pub fn measure<T>(label: &str, f: impl FnOnce() -> T) -> T {
    let start = Instant::now();
    let result = f();
    let elapsed = start.elapsed();
    tracing::debug!(
        label,
        elapsed_ms = elapsed.as_secs_f64() * 1_000.0,
        "timed"
    );
    result
}

/// Average FPS across consecutive frame timestamps. Fewer than two stamps
/// (or no elapsed time) yields 0.
pub fn calculate_fps<'a>(frame_times: impl IntoIterator<Item = &'a Duration>) -> u32 {
    let mut iter = frame_times.into_iter();
    let Some(first) = iter.next() else {
        return 0;
    };
    let (mut last, mut deltas) = (*first, 0u32);
    for t in iter {
        last = *t;
        deltas += 1;
    }
    if deltas == 0 || last <= *first {
        return 0;
    }
    let avg_ms = (last - *first).as_secs_f64() * 1_000.0 / f64::from(deltas);
    (1_000.0 / avg_ms).round() as u32
}

/// Lets an action through at most once per `delay`.
#[derive(Clone, Debug)]
pub struct Throttle {
    delay: Duration,
    last: Option<Duration>,
}

impl Throttle {
    pub fn new(delay: Duration) -> Self {
        Self { delay, last: None }
    }

    /// `true` if the action may run now; records `now` when it does.
    pub fn ready(&mut self, now: Duration) -> bool {
        match self.last {
            Some(last) if now.saturating_sub(last) < self.delay => false,
            _ => {
                self.last = Some(now);
                true
            }
        }
    }
}

/// Fires once, `delay` after the most recent trigger.
#[derive(Clone, Debug)]
pub struct Debounce {
    delay: Duration,
    deadline: Option<Duration>,
}

impl Debounce {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    /// Restart the quiet period.
    pub fn trigger(&mut self, now: Duration) {
        self.deadline = Some(now + self.delay);
    }

    /// `true` exactly once after the quiet period has passed.
    pub fn fire(&mut self, now: Duration) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
