//! src/config.rs
//!
//! Dashboard configuration: buffer sizing, stream cadence, frame pacing, and
//! the chart set. Every field has a default, so a config file only needs the
//! values it overrides.

use std::path::{Path, PathBuf};
use std::time::Duration;

use ratatui::style::Color;
use serde::Deserialize;

use crate::error::Result;
use crate::render::{ChartConfig, ChartKind};
use crate::stream::Strategy;

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    /// Maximum number of samples kept in the stream buffer.
    pub capacity: usize,

    /// Milliseconds between generated samples.
    pub interval_ms: u64,

    /// Upper bound on points drawn per chart per frame. `None` draws all.
    pub max_points: Option<usize>,

    /// Target frame period of the terminal loop in milliseconds.
    pub frame_ms: u64,

    pub generator: Strategy,

    /// Fixed RNG seed for a reproducible stream.
    pub seed: Option<u64>,

    pub charts: Vec<ChartConfig>,

    /// Where tracing output goes. Without it, logging is off.
    pub log_file: Option<PathBuf>,
}

impl DashboardConfig {
    /// Read a TOML file; missing keys fall back to defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms.max(1))
    }

    pub fn frame_time(&self) -> Duration {
        Duration::from_millis(self.frame_ms.max(1))
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        let mut bars = ChartConfig::new(ChartKind::Bar, Color::Yellow, "Value bars");
        bars.visible = false;
        Self {
            capacity: 10_000,
            interval_ms: 100,
            max_points: None,
            frame_ms: 16,
            generator: Strategy::RandomWalk,
            seed: None,
            charts: vec![
                ChartConfig::new(ChartKind::Line, Color::Cyan, "Live value"),
                ChartConfig::new(ChartKind::Heatmap, Color::Magenta, "Value heatmap"),
                bars,
            ],
            log_file: None,
        }
    }
}
