//! src/render/chart.rs
//!
//! Per-series chart configuration and the full dashboard paint pass.
//!
//! `draw_dashboard` is what the frame scheduler runs: it clears the surface,
//! stacks the visible charts in equal rows, and paints grid, axes, series and
//! labels for each one from a single buffer snapshot.

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

use super::draw::{clear, draw_axes, draw_grid, draw_label, heatmap_color};
use super::sampling::downsample;
use super::surface::{Region, Surface};
use crate::stream::sample::{Sample, VALUE_MAX, VALUE_MIN};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    #[default]
    Line,
    Bar,
    Scatter,
    Heatmap,
}

impl ChartKind {
    pub fn next_kind(self) -> Self {
        match self {
            ChartKind::Line => ChartKind::Bar,
            ChartKind::Bar => ChartKind::Scatter,
            ChartKind::Scatter => ChartKind::Heatmap,
            ChartKind::Heatmap => ChartKind::Line,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ChartKind::Line => "line",
            ChartKind::Bar => "bar",
            ChartKind::Scatter => "scatter",
            ChartKind::Heatmap => "heatmap",
        }
    }
}

/// How one series is drawn. Swapped wholesale between passes, never mutated
/// during one.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    pub kind: ChartKind,
    /// `value`, `timestamp`, or a metadata key holding a number.
    #[serde(default = "default_data_key")]
    pub data_key: String,
    #[serde(default = "default_color")]
    pub color: Color,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default)]
    pub title: Option<String>,
}

fn default_data_key() -> String {
    "value".to_string()
}

fn default_color() -> Color {
    Color::Cyan
}

fn default_visible() -> bool {
    true
}

impl ChartConfig {
    pub fn new(kind: ChartKind, color: Color, title: &str) -> Self {
        Self {
            kind,
            data_key: default_data_key(),
            color,
            visible: true,
            title: Some(title.to_string()),
        }
    }

    fn display_title(&self) -> String {
        self.title
            .clone()
            .unwrap_or_else(|| format!("{} ({})", self.data_key, self.kind.label()))
    }
}

/// Colors and spacing shared by every chart in a pass.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderStyle {
    pub grid_spacing: f64,
    pub grid_color: Color,
    pub axis_color: Color,
    pub padding: f64,
    pub label_bg: Color,
    pub label_fg: Color,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            grid_spacing: 8.0,
            grid_color: Color::Rgb(0x2a, 0x2f, 0x3e),
            axis_color: Color::Rgb(0x5a, 0x60, 0x70),
            padding: 2.0,
            label_bg: Color::Rgb(0x1a, 0x1f, 0x2e),
            label_fg: Color::White,
        }
    }
}

/// Read the numeric field `key` from a sample.
pub fn extract(sample: &Sample, key: &str) -> Option<f64> {
    match key {
        "value" => Some(sample.value),
        "timestamp" => Some(sample.timestamp as f64),
        other => sample
            .metadata
            .as_ref()
            .and_then(|m| m.get(other))
            .and_then(|v| v.parse::<f64>().ok()),
    }
}

/// `value` has a fixed range; anything else is scaled to its observed extent.
fn value_range(key: &str, values: &[f64]) -> (f64, f64) {
    if key == "value" {
        return (VALUE_MIN, VALUE_MAX);
    }
    let lo = values.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if lo.is_finite() && hi.is_finite() {
        (lo, hi)
    } else {
        (VALUE_MIN, VALUE_MAX)
    }
}

/// Paint one series inside `surface`, leaving `padding` free on every side.
///
/// Points sit at their sample's position in `samples`, so samples lacking
/// `data_key` leave a gap instead of shifting the rest of the series.
pub fn draw_series(
    surface: &mut dyn Surface,
    samples: &[&Sample],
    config: &ChartConfig,
    padding: f64,
) {
    let keyed: Vec<(usize, f64)> = samples
        .iter()
        .enumerate()
        .filter_map(|(i, s)| extract(s, &config.data_key).map(|v| (i, v)))
        .collect();
    if keyed.is_empty() {
        if !samples.is_empty() {
            tracing::debug!(key = %config.data_key, "series key not present in samples");
        }
        return;
    }
    let values: Vec<f64> = keyed.iter().map(|&(_, v)| v).collect();

    let (width, height) = surface.size();
    let inner_w = (width - 2.0 * padding).max(0.0);
    let inner_h = (height - 2.0 * padding).max(0.0);
    let (lo, hi) = value_range(&config.data_key, &values);
    let span = if hi > lo { hi - lo } else { 1.0 };
    let step = if samples.len() > 1 {
        inner_w / (samples.len() - 1) as f64
    } else {
        0.0
    };
    let bottom = height - padding;

    let points: Vec<(f64, f64)> = keyed
        .iter()
        .map(|&(i, v)| {
            let x = padding + i as f64 * step;
            let y = bottom - (v - lo) / span * inner_h;
            (x, y)
        })
        .collect();

    match config.kind {
        ChartKind::Line => {
            for pair in points.windows(2) {
                surface.stroke_line(pair[0], pair[1], config.color);
            }
            if points.len() == 1 {
                surface.plot_points(&points, config.color);
            }
        }
        ChartKind::Bar => {
            for &(x, y) in &points {
                surface.stroke_line((x, bottom), (x, y), config.color);
            }
        }
        ChartKind::Scatter => surface.plot_points(&points, config.color),
        ChartKind::Heatmap => {
            let column = step.max(1.0 / f64::from(crate::render::SurfaceBinding::BRAILLE.0));
            for (&(x, _), v) in points.iter().zip(&values) {
                let color = heatmap_color(*v, lo, hi).into();
                surface.fill_rect(x, padding, column, inner_h, color);
            }
        }
    }
}

/// Full paint pass: clear, then one row per visible chart.
pub fn draw_dashboard<'a, I>(
    surface: &mut dyn Surface,
    samples: I,
    charts: &[ChartConfig],
    max_points: Option<usize>,
    style: &RenderStyle,
) where
    I: IntoIterator<Item = &'a Sample>,
    I::IntoIter: ExactSizeIterator,
{
    clear(surface);
    let visible: Vec<&ChartConfig> = charts.iter().filter(|c| c.visible).collect();
    if visible.is_empty() {
        return;
    }

    let picked = downsample(samples, max_points);
    let (width, height) = surface.size();
    let row_h = height / visible.len() as f64;

    for (row, config) in visible.iter().enumerate() {
        let mut region = Region::new(surface, (0.0, row as f64 * row_h), (width, row_h));
        draw_grid(&mut region, style.grid_spacing, style.grid_color);
        draw_axes(&mut region, style.padding, style.axis_color);
        draw_series(&mut region, &picked, config, style.padding);

        draw_label(
            &mut region,
            &config.display_title(),
            style.padding + 1.0,
            0.0,
            style.label_bg,
            style.label_fg,
        );
        if let Some(last) = picked.last().and_then(|s| extract(s, &config.data_key)) {
            let text = format!("{last:.1}");
            let x = width - style.padding - region.measure_text(&text) - 1.0;
            draw_label(&mut region, &text, x, 0.0, style.label_bg, config.color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::surface::{DrawCommand, SurfaceBinding, setup_surface};
    use ratatui::layout::Rect;

    fn surface() -> crate::render::surface::DisplayList {
        setup_surface(SurfaceBinding::braille(Rect::new(0, 0, 40, 20))).unwrap()
    }

    fn samples(values: &[f64]) -> Vec<Sample> {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| Sample::new(i as i64 * 100, *v))
            .collect()
    }

    fn count(list: &crate::render::surface::DisplayList, f: fn(&DrawCommand) -> bool) -> usize {
        list.commands().iter().filter(|c| f(c)).count()
    }

    #[test]
    fn line_connects_consecutive_points() {
        let data = samples(&[0.0, 50.0, 100.0]);
        let refs: Vec<&Sample> = data.iter().collect();
        let mut s = surface();
        draw_series(&mut s, &refs, &ChartConfig::new(ChartKind::Line, Color::Red, "v"), 2.0);

        assert_eq!(
            s.commands(),
            &[
                DrawCommand::Line {
                    from: (2.0, 18.0),
                    to: (20.0, 10.0),
                    color: Color::Red
                },
                DrawCommand::Line {
                    from: (20.0, 10.0),
                    to: (38.0, 2.0),
                    color: Color::Red
                },
            ]
        );
    }

    #[test]
    fn heatmap_colors_columns_by_value() {
        let data = samples(&[0.0, 100.0]);
        let refs: Vec<&Sample> = data.iter().collect();
        let mut s = surface();
        draw_series(&mut s, &refs, &ChartConfig::new(ChartKind::Heatmap, Color::Red, "h"), 2.0);

        let colors: Vec<Color> = s
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Rect { color, .. } => Some(*color),
                _ => None,
            })
            .collect();
        assert_eq!(colors, vec![Color::Rgb(0, 60, 255), Color::Rgb(255, 60, 0)]);
    }

    #[test]
    fn keyed_points_keep_their_position() {
        // older half lacks the key, as after switching to a generator without ids
        let data: Vec<Sample> = (0..5)
            .map(|i| {
                let s = Sample::new(i * 100, 50.0);
                if i < 2 {
                    return s;
                }
                let mut meta = crate::stream::sample::Metadata::new();
                meta.insert("id".into(), i.to_string());
                s.with_metadata(meta)
            })
            .collect();
        let refs: Vec<&Sample> = data.iter().collect();
        let mut config = ChartConfig::new(ChartKind::Scatter, Color::Red, "ids");
        config.data_key = "id".into();
        let mut s = surface();
        draw_series(&mut s, &refs, &config, 2.0);

        let xs: Vec<f64> = s
            .commands()
            .iter()
            .flat_map(|c| match c {
                DrawCommand::Points { coords, .. } => coords.iter().map(|p| p.0).collect(),
                _ => Vec::new(),
            })
            .collect();
        // step = 36 / 4 = 9
        assert_eq!(xs, vec![20.0, 29.0, 38.0]);
    }

    #[test]
    fn unknown_key_draws_nothing() {
        let data = samples(&[10.0, 20.0]);
        let refs: Vec<&Sample> = data.iter().collect();
        let mut config = ChartConfig::new(ChartKind::Scatter, Color::Red, "x");
        config.data_key = "pressure".into();
        let mut s = surface();
        draw_series(&mut s, &refs, &config, 2.0);
        assert!(s.is_empty());
    }

    #[test]
    fn dashboard_skips_hidden_charts_and_clears_first() {
        let data = samples(&[10.0, 20.0, 30.0]);
        let mut hidden = ChartConfig::new(ChartKind::Bar, Color::Blue, "hidden");
        hidden.visible = false;
        let charts = vec![ChartConfig::new(ChartKind::Scatter, Color::Green, "shown"), hidden];

        let mut s = surface();
        s.fill_text("stale", 0.0, 0.0, Color::White, None);
        draw_dashboard(&mut s, &data, &charts, None, &RenderStyle::default());

        let texts: Vec<&str> = s
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(texts, vec![" shown ", " 30.0 "]);
        assert_eq!(count(&s, |c| matches!(c, DrawCommand::Points { .. })), 1);
    }

    #[test]
    fn dashboard_respects_point_budget() {
        let data = samples(&vec![50.0; 1_000]);
        let charts = vec![ChartConfig::new(ChartKind::Bar, Color::Green, "bars")];
        let mut s = surface();
        let style = RenderStyle {
            grid_spacing: 0.0,
            ..RenderStyle::default()
        };
        draw_dashboard(&mut s, &data, &charts, Some(100), &style);

        // two axis lines plus one line per bar
        assert_eq!(count(&s, |c| matches!(c, DrawCommand::Line { .. })), 2 + 100);
    }

    #[test]
    fn chart_config_reads_from_toml() {
        let config: ChartConfig = toml::from_str(
            r#"
            kind = "heatmap"
            color = "yellow"
            "#,
        )
        .unwrap();
        assert_eq!(config.kind, ChartKind::Heatmap);
        assert_eq!(config.color, Color::Yellow);
        assert_eq!(config.data_key, "value");
        assert!(config.visible);
    }
}
