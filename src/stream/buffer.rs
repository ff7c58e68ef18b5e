//! src/stream/buffer.rs
//!
//! Fixed-capacity, FIFO-evicting sample buffer with copy-on-write snapshots.
//!
//! Readers hold a [`Snapshot`] (an `Arc` of the deque). `append` goes through
//! `Arc::make_mut`, so a buffer nobody is reading is updated in place, while a
//! buffer somebody still holds is cloned first: an outstanding snapshot only
//! ever shows the state from before or after an append, never in between.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use super::generator::{PointGenerator, Tick};
use super::sample::Sample;

/// Immutable view of the buffer at one point in time (oldest at front).
pub type Snapshot = Arc<VecDeque<Sample>>;

#[derive(Clone, Debug)]
pub struct StreamBuffer {
    samples: Snapshot,
    capacity: usize,
    interval_ms: i64,
    /// Total samples ever generated into this buffer.
    generated: u64,
}

impl StreamBuffer {
    /// Empty buffer. `capacity` below 1 is treated as 1.
    pub fn new(capacity: usize, interval: Duration) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: Arc::new(VecDeque::with_capacity(capacity)),
            capacity,
            interval_ms: interval.as_millis() as i64,
            generated: 0,
        }
    }

    /// Buffer filled to capacity with samples whose last timestamp is `now_ms`.
    pub fn initialize(
        capacity: usize,
        interval: Duration,
        now_ms: i64,
        generator: &mut dyn PointGenerator,
    ) -> Self {
        let mut buffer = Self::new(capacity, interval);
        let start = now_ms - (buffer.capacity as i64 - 1) * buffer.interval_ms;
        let mut fill = VecDeque::with_capacity(buffer.capacity);
        for i in 0..buffer.capacity {
            let tick = Tick {
                timestamp: start + i as i64 * buffer.interval_ms,
                index: i as u64,
            };
            let next = generator.next(fill.back(), tick);
            fill.push_back(next);
        }
        buffer.generated = buffer.capacity as u64;
        buffer.samples = Arc::new(fill);
        tracing::debug!(
            capacity = buffer.capacity,
            interval_ms = buffer.interval_ms,
            "stream buffer initialized"
        );
        buffer
    }

    /// Build a buffer from existing samples, keeping only the newest `capacity`.
    #[cfg(test)]
    pub fn from_samples(
        capacity: usize,
        interval: Duration,
        samples: impl IntoIterator<Item = Sample>,
    ) -> Self {
        let mut buffer = Self::new(capacity, interval);
        let mut deque: VecDeque<Sample> = samples.into_iter().collect();
        buffer.generated = deque.len() as u64;
        while deque.len() > buffer.capacity {
            deque.pop_front();
        }
        buffer.samples = Arc::new(deque);
        buffer
    }

    /// Append one generated sample `interval` after the newest one, evicting
    /// the oldest at capacity. An empty buffer is seeded at `now_ms`.
    pub fn append(&mut self, generator: &mut dyn PointGenerator, now_ms: i64) -> &Sample {
        let timestamp = self
            .samples
            .back()
            .map(|last| last.timestamp + self.interval_ms)
            .unwrap_or(now_ms);
        let tick = Tick {
            timestamp,
            index: self.generated,
        };
        let next = generator.next(self.samples.back(), tick);
        self.generated += 1;

        let capacity = self.capacity;
        let samples = Arc::make_mut(&mut self.samples);
        if samples.len() >= capacity {
            samples.pop_front();
        }
        samples.push_back(next);
        // non-empty: just pushed
        &samples[samples.len() - 1]
    }

    pub fn snapshot(&self) -> Snapshot {
        Arc::clone(&self.samples)
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn generated(&self) -> u64 {
        self.generated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stream::generator::RandomWalk;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const INTERVAL: Duration = Duration::from_millis(100);

    fn flat() -> RandomWalk {
        RandomWalk::new(StdRng::seed_from_u64(0)).with_amplitude(0.0)
    }

    fn values(b: &StreamBuffer) -> Vec<f64> {
        b.snapshot().iter().map(|s| s.value).collect()
    }

    fn stamps(b: &StreamBuffer) -> Vec<i64> {
        b.snapshot().iter().map(|s| s.timestamp).collect()
    }

    #[test]
    fn append_at_capacity_drops_oldest() {
        let seed = [10.0, 20.0, 30.0, 40.0, 50.0]
            .iter()
            .enumerate()
            .map(|(i, v)| Sample::new(i as i64 * 100, *v));
        let mut buffer = StreamBuffer::from_samples(5, INTERVAL, seed);

        buffer.append(&mut flat(), 0);

        assert_eq!(values(&buffer), vec![20.0, 30.0, 40.0, 50.0, 50.0]);
        assert_eq!(stamps(&buffer), vec![100, 200, 300, 400, 500]);
    }

    #[test]
    fn initialize_ends_at_now() {
        let buffer = StreamBuffer::initialize(4, INTERVAL, 10_000, &mut flat());
        assert_eq!(stamps(&buffer), vec![9_700, 9_800, 9_900, 10_000]);
        assert_eq!(buffer.generated(), 4);
        assert!(values(&buffer).iter().all(|v| *v == 50.0));
    }

    #[test]
    fn empty_buffer_is_seeded_at_now() {
        let mut buffer = StreamBuffer::new(3, INTERVAL);
        assert_eq!(buffer.len(), 0);
        let ts = buffer.append(&mut flat(), 1_234).timestamp;
        assert_eq!(ts, 1_234);
        assert_eq!(buffer.len(), 1);
    }

    #[test]
    fn held_snapshot_is_unaffected_by_append() {
        let mut buffer = StreamBuffer::initialize(3, INTERVAL, 300, &mut flat());
        let before = buffer.snapshot();
        buffer.append(&mut flat(), 0);
        let after = buffer.snapshot();

        assert_eq!(
            before.iter().map(|s| s.timestamp).collect::<Vec<_>>(),
            vec![100, 200, 300]
        );
        assert_eq!(
            after.iter().map(|s| s.timestamp).collect::<Vec<_>>(),
            vec![200, 300, 400]
        );
    }

    #[test]
    fn zero_capacity_holds_one() {
        let mut buffer = StreamBuffer::new(0, INTERVAL);
        buffer.append(&mut flat(), 0);
        buffer.append(&mut flat(), 0);
        assert_eq!(buffer.capacity(), 1);
        assert_eq!(buffer.len(), 1);
    }

    proptest! {
        #[test]
        fn length_and_step_law(
            capacity in 1usize..64,
            prefill in any::<bool>(),
            appends in 0usize..200,
            interval_ms in 1u64..1_000,
            seed in any::<u64>(),
        ) {
            let interval = Duration::from_millis(interval_ms);
            let mut walk = RandomWalk::new(StdRng::seed_from_u64(seed));
            let mut buffer = if prefill {
                StreamBuffer::initialize(capacity, interval, 1_000_000, &mut walk)
            } else {
                StreamBuffer::new(capacity, interval)
            };
            let seeded = buffer.len();
            for _ in 0..appends {
                buffer.append(&mut walk, 1_000_000);
            }

            prop_assert_eq!(buffer.len(), capacity.min(seeded + appends));
            let snap = buffer.snapshot();
            for pair in snap.iter().collect::<Vec<_>>().windows(2) {
                prop_assert_eq!(pair[1].timestamp - pair[0].timestamp, interval_ms as i64);
            }
            prop_assert!(snap.iter().all(|s| (0.0..=100.0).contains(&s.value)));
        }
    }
}
