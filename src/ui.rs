//! src/ui.rs
//!
//! Top-level UI module re-exporting layout helpers.

pub mod layout;

pub use layout::{DashboardAreas, Panel, panel_block};
