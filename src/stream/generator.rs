//! src/stream/generator.rs
//!
//! Pluggable point generators. The live stream uses a bounded random walk;
//! the trend, seasonal and spike strategies are demo sources that can be
//! swapped in at runtime.
//!
//! Every strategy tags samples with the A, B, C category cycle by index.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use super::sample::{Category, Metadata, Sample};

/// Value used when a generator has no previous sample to walk from.
pub const ORIGIN_VALUE: f64 = 50.0;

/// Upward bias of the trend walk, as a fraction of the step amplitude.
const TREND_DRIFT: f64 = 0.02;

/// Position of the sample being generated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tick {
    pub timestamp: i64,
    /// Number of samples generated before this one.
    pub index: u64,
}

/// Produces the successor of `prev` for the given tick.
pub trait PointGenerator {
    fn name(&self) -> &'static str;

    fn next(&mut self, prev: Option<&Sample>, tick: Tick) -> Sample;
}

/// Bounded random walk: `clamp(prev + uniform(-amplitude/2, amplitude/2), 0, 100)`.
pub struct RandomWalk<R = StdRng> {
    rng: R,
    amplitude: f64,
    drift: f64,
}

impl<R: Rng> RandomWalk<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            amplitude: 10.0,
            drift: 0.0,
        }
    }

    /// Total width of the perturbation window.
    #[cfg(test)]
    pub fn with_amplitude(mut self, amplitude: f64) -> Self {
        self.amplitude = amplitude.max(0.0);
        self
    }

    /// Shifts the perturbation window; `0.02` gives a slight upward trend.
    pub fn with_drift(mut self, drift: f64) -> Self {
        self.drift = drift;
        self
    }

    fn perturbation(&mut self) -> f64 {
        (self.rng.random::<f64>() - 0.5 + self.drift) * self.amplitude
    }
}

impl<R: Rng> PointGenerator for RandomWalk<R> {
    fn name(&self) -> &'static str {
        if self.drift == 0.0 {
            "random walk"
        } else {
            "trend"
        }
    }

    fn next(&mut self, prev: Option<&Sample>, tick: Tick) -> Sample {
        let base = prev.map(|p| p.value).unwrap_or(ORIGIN_VALUE);
        let value = base + self.perturbation();

        let mut metadata = Metadata::new();
        metadata.insert("id".into(), tick.index.to_string());
        metadata.insert("source".into(), "real-time".into());
        let quality = if self.rng.random_bool(0.5) {
            "high"
        } else {
            "medium"
        };
        metadata.insert("quality".into(), quality.into());

        Sample::new(tick.timestamp, value)
            .with_category(Category::cycle(tick.index as usize))
            .with_metadata(metadata)
    }
}

/// Sine wave around 50 with additive noise; ignores the previous value.
pub struct Seasonal<R = StdRng> {
    rng: R,
    /// Samples per radian of phase.
    wavelength: f64,
    swing: f64,
    noise: f64,
}

impl<R: Rng> Seasonal<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            wavelength: 100.0,
            swing: 30.0,
            noise: 20.0,
        }
    }
}

impl<R: Rng> PointGenerator for Seasonal<R> {
    fn name(&self) -> &'static str {
        "seasonal"
    }

    fn next(&mut self, _prev: Option<&Sample>, tick: Tick) -> Sample {
        let phase = tick.index as f64 / self.wavelength;
        let seasonal = ORIGIN_VALUE + self.swing * phase.sin();
        let noise = (self.rng.random::<f64>() - 0.5) * self.noise;
        Sample::new(tick.timestamp, seasonal + noise)
            .with_category(Category::cycle(tick.index as usize))
    }
}

/// Flat noisy band (40..60) with a high spike (90..100) every `every` samples.
pub struct Spike<R = StdRng> {
    rng: R,
    every: u64,
}

impl<R: Rng> Spike<R> {
    pub fn new(rng: R, every: u64) -> Self {
        Self {
            rng,
            every: every.max(1),
        }
    }
}

impl<R: Rng> PointGenerator for Spike<R> {
    fn name(&self) -> &'static str {
        "spike"
    }

    fn next(&mut self, _prev: Option<&Sample>, tick: Tick) -> Sample {
        let value = if tick.index % self.every == 0 {
            90.0 + self.rng.random::<f64>() * 10.0
        } else {
            40.0 + self.rng.random::<f64>() * 20.0
        };
        Sample::new(tick.timestamp, value).with_category(Category::cycle(tick.index as usize))
    }
}

/// Generator selection as it appears in the config file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    #[default]
    RandomWalk,
    Seasonal,
    Spike,
    /// Random walk drifting slowly upward.
    Trend,
}

impl Strategy {
    pub fn next_strategy(self) -> Self {
        match self {
            Strategy::RandomWalk => Strategy::Seasonal,
            Strategy::Seasonal => Strategy::Spike,
            Strategy::Spike => Strategy::Trend,
            Strategy::Trend => Strategy::RandomWalk,
        }
    }

    /// Build a boxed generator; a fixed `seed` makes the stream reproducible.
    pub fn build(self, seed: Option<u64>) -> Box<dyn PointGenerator> {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_os_rng(),
        };
        match self {
            Strategy::RandomWalk => Box::new(RandomWalk::new(rng)),
            Strategy::Seasonal => Box::new(Seasonal::new(rng)),
            Strategy::Spike => Box::new(Spike::new(rng, 100)),
            Strategy::Trend => Box::new(RandomWalk::new(rng).with_drift(TREND_DRIFT)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::Strategy;
    use crate::stream::sample::{VALUE_MAX, VALUE_MIN};
    use proptest::prelude::*;

    fn tick(index: u64) -> Tick {
        Tick {
            timestamp: index as i64 * 100,
            index,
        }
    }

    #[test]
    fn zero_amplitude_walk_repeats_previous_value() {
        let mut g = RandomWalk::new(StdRng::seed_from_u64(1)).with_amplitude(0.0);
        let prev = Sample::new(0, 42.5);
        let next = g.next(Some(&prev), tick(1));
        assert_eq!(next.value, 42.5);
        assert_eq!(next.timestamp, 100);
        assert_eq!(next.category, Some(Category::B));
    }

    #[test]
    fn walk_starts_at_origin_without_previous() {
        let mut g = RandomWalk::new(StdRng::seed_from_u64(1)).with_amplitude(0.0);
        assert_eq!(g.next(None, tick(0)).value, ORIGIN_VALUE);
    }

    #[test]
    fn walk_attaches_metadata() {
        let mut g = RandomWalk::new(StdRng::seed_from_u64(3));
        let s = g.next(None, tick(7));
        let meta = s.metadata.expect("walk samples carry metadata");
        assert_eq!(meta.get("id").map(String::as_str), Some("7"));
        assert_eq!(meta.get("source").map(String::as_str), Some("real-time"));
        assert!(matches!(
            meta.get("quality").map(String::as_str),
            Some("high") | Some("medium")
        ));
    }

    #[test]
    fn spike_hits_high_band_on_schedule() {
        let mut g = Spike::new(StdRng::seed_from_u64(9), 10);
        for i in 0..50 {
            let v = g.next(None, tick(i)).value;
            if i % 10 == 0 {
                assert!(v >= 90.0, "index {i} value {v}");
            } else {
                assert!((40.0..=60.0).contains(&v), "index {i} value {v}");
            }
        }
    }

    #[test]
    fn every_strategy_cycles_categories() {
        for strategy in [Strategy::RandomWalk, Strategy::Seasonal, Strategy::Spike, Strategy::Trend] {
            let mut g = strategy.build(Some(4));
            let cats: Vec<_> = (0..4).map(|i| g.next(None, tick(i)).category).collect();
            assert_eq!(
                cats,
                vec![Some(Category::A), Some(Category::B), Some(Category::C), Some(Category::A)],
                "{strategy:?}"
            );
        }
    }

    #[test]
    fn drift_biases_the_walk_upward() {
        let mut g = RandomWalk::new(StdRng::seed_from_u64(2)).with_drift(0.5);
        // (u - 0.5 + 0.5) * 10 is never negative
        let mut prev = Sample::new(0, 20.0);
        for i in 1..50 {
            let next = g.next(Some(&prev), tick(i));
            assert!(next.value >= prev.value, "step {i}: {} < {}", next.value, prev.value);
            prev = next;
        }
        assert_eq!(g.name(), "trend");
    }

    #[test]
    fn strategies_cycle_back_to_start() {
        let s = Strategy::RandomWalk;
        let mut t = s.next_strategy();
        let mut seen = 1;
        while t != s {
            t = t.next_strategy();
            seen += 1;
        }
        assert_eq!(seen, 4);
        assert_eq!(Strategy::Seasonal.build(Some(1)).name(), "seasonal");
        assert_eq!(Strategy::Trend.build(Some(1)).name(), "trend");
    }

    proptest! {
        #[test]
        fn every_strategy_stays_in_range(
            seed in any::<u64>(),
            amplitude in 0.0f64..500.0,
            steps in 1usize..300,
        ) {
            let mut gens: Vec<Box<dyn PointGenerator>> = vec![
                Box::new(RandomWalk::new(StdRng::seed_from_u64(seed)).with_amplitude(amplitude)),
                Strategy::Seasonal.build(Some(seed)),
                Strategy::Spike.build(Some(seed)),
                Strategy::Trend.build(Some(seed)),
            ];
            for g in gens.iter_mut() {
                let mut prev: Option<Sample> = None;
                for i in 0..steps {
                    let s = g.next(prev.as_ref(), tick(i as u64));
                    prop_assert!(s.value >= VALUE_MIN && s.value <= VALUE_MAX);
                    prev = Some(s);
                }
            }
        }
    }
}
