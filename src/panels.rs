//! src/panels.rs
//!
//! Top-level panels module and re-exports.

pub mod canvas;
pub mod charts;
pub mod metrics;
pub mod samples;
pub mod title;

pub use canvas::CanvasPanel;
pub use charts::ChartListPanel;
pub use metrics::MetricsPanel;
pub use samples::SamplesPanel;
pub use title::TitlePanel;
