//! src/render.rs
//!
//! Drawing surface, stateless drawing helpers, and the chart paint pass.

pub mod chart;
pub mod draw;
pub mod sampling;
pub mod surface;

pub use chart::{ChartConfig, ChartKind, RenderStyle, draw_dashboard};
pub use surface::{DisplayList, DrawCommand, Surface, SurfaceBinding, setup_surface};
