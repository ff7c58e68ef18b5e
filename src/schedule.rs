//! src/schedule.rs
//!
//! Frame-boundary scheduling.

pub mod frame;

pub use frame::FrameScheduler;
