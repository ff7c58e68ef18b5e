//! src/stream.rs
//!
//! Sample model, generators, the bounded stream buffer, and its timer.

pub mod buffer;
pub mod generator;
pub mod sample;
pub mod timer;

pub use buffer::{Snapshot, StreamBuffer};
pub use generator::{PointGenerator, Strategy};
pub use timer::IntervalTimer;
