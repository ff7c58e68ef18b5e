//! src/stream/sample.rs
//!
//! A single timestamped observation and its optional annotations.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Lower bound of every generated value.
pub const VALUE_MIN: f64 = 0.0;
/// Upper bound of every generated value.
pub const VALUE_MAX: f64 = 100.0;

/// Opaque per-sample annotations.
pub type Metadata = BTreeMap<String, String>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    A,
    B,
    C,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::A, Category::B, Category::C];

    /// Category at position `i` of the repeating A, B, C cycle.
    pub fn cycle(i: usize) -> Self {
        Self::ALL[i % Self::ALL.len()]
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Category::A => "A",
            Category::B => "B",
            Category::C => "C",
        };
        f.write_str(s)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Sample {
    /// Milliseconds since the unix epoch.
    pub timestamp: i64,
    /// Always within `[VALUE_MIN, VALUE_MAX]`.
    pub value: f64,
    pub category: Option<Category>,
    pub metadata: Option<Metadata>,
}

impl Sample {
    /// Plain sample; `value` is clamped into range and rounded to one decimal.
    pub fn new(timestamp: i64, value: f64) -> Self {
        Self {
            timestamp,
            value: quantize(value),
            category: None,
            metadata: None,
        }
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

/// Clamp into the value range, then round to one decimal place.
pub fn quantize(value: f64) -> f64 {
    let v = if value.is_nan() { VALUE_MIN } else { value };
    (v.clamp(VALUE_MIN, VALUE_MAX) * 10.0).round() / 10.0
}
