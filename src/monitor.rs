//! src/monitor.rs
//!
//! Performance instrumentation: frame-driven metrics, heap capability probe,
//! and timing helpers.

pub mod heap;
pub mod perf;
pub mod timing;

pub use heap::HeapProbe;
pub use perf::{MetricSnapshot, PerformanceMonitor};
