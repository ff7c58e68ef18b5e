//! src/panels/metrics.rs
//!
//! Performance panel: FPS, render time, memory, and point count.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::monitor::MetricSnapshot;
use crate::ui::{Panel, panel_block};

/// Frames slower than this are highlighted.
const SLOW_FRAME_MS: f64 = 33.0;

pub struct MetricsPanel {
    pub metrics: MetricSnapshot,
    pub recent_fps: u32,
    pub rendering: bool,
    /// A paint is waiting for the next frame with a surface.
    pub queued: bool,
}

impl MetricsPanel {
    pub fn new(metrics: MetricSnapshot, recent_fps: u32, rendering: bool, queued: bool) -> Self {
        Self {
            metrics,
            recent_fps,
            rendering,
            queued,
        }
    }

    fn status(&self) -> &'static str {
        if self.rendering {
            "rendering"
        } else if self.queued {
            "paint queued"
        } else {
            "idle"
        }
    }
}

fn row<'a>(label: &'a str, value: String, color: Color) -> Line<'a> {
    Line::from(vec![
        Span::styled(label, Style::default().fg(Color::Yellow)),
        Span::styled(value, Style::default().fg(color)),
    ])
}

impl Panel for MetricsPanel {
    fn draw(&self, f: &mut Frame<'_>, area: Rect) {
        let m = &self.metrics;
        let frame_color = if m.render_time_ms > SLOW_FRAME_MS {
            Color::Red
        } else {
            Color::Green
        };
        let memory = if m.memory_usage_mb > 0.0 {
            format!("{:.0} MB", m.memory_usage_mb)
        } else {
            "n/a".to_string()
        };

        let lines = vec![
            row("FPS:     ", format!("{} (recent {})", m.fps, self.recent_fps), Color::Cyan),
            row("Frame:   ", format!("{:.2} ms", m.render_time_ms), frame_color),
            row("Memory:  ", memory, Color::Cyan),
            row("Points:  ", m.data_point_count.to_string(), Color::Cyan),
            Line::from(Span::styled(
                self.status(),
                Style::default().add_modifier(Modifier::DIM),
            )),
        ];

        f.render_widget(Paragraph::new(lines).block(panel_block("Performance")), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{Terminal, backend::TestBackend};

    #[test]
    fn shows_every_metric() {
        let mut terminal = Terminal::new(TestBackend::new(40, 8)).unwrap();
        let metrics = MetricSnapshot {
            fps: 60,
            memory_usage_mb: 42.0,
            render_time_ms: 16.67,
            data_point_count: 10_000,
        };
        terminal
            .draw(|f| MetricsPanel::new(metrics, 59, false, false).draw(f, f.area()))
            .unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        for needle in ["60 (recent 59)", "16.67 ms", "42 MB", "10000", "idle"] {
            assert!(text.contains(needle), "missing {needle}");
        }
    }

    #[test]
    fn queued_paint_is_reported() {
        let panel = MetricsPanel::new(MetricSnapshot::default(), 0, false, true);
        assert_eq!(panel.status(), "paint queued");
        let panel = MetricsPanel::new(MetricSnapshot::default(), 0, true, true);
        assert_eq!(panel.status(), "rendering");
    }
}
