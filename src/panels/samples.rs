//! src/panels/samples.rs
//!
//! Recent samples panel: the newest entries of the stream buffer, latest
//! highlighted.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::stream::Snapshot;
use crate::ui::{Panel, panel_block};

pub struct SamplesPanel {
    pub snapshot: Snapshot,
}

impl SamplesPanel {
    pub fn new(snapshot: Snapshot) -> Self {
        Self { snapshot }
    }
}

impl Panel for SamplesPanel {
    fn draw(&self, f: &mut Frame<'_>, area: Rect) {
        let rows = area.height.saturating_sub(2) as usize;
        let len = self.snapshot.len();
        let start = len.saturating_sub(rows);
        let last_index = len.saturating_sub(1);

        let lines: Vec<Line> = self
            .snapshot
            .iter()
            .enumerate()
            .skip(start)
            .map(|(i, s)| {
                let value_style = if i == last_index {
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::Cyan)
                };
                let category = s.category.map(|c| c.to_string()).unwrap_or_else(|| "-".into());
                Line::from(vec![
                    Span::styled("t ", Style::default().fg(Color::Yellow)),
                    Span::styled(
                        format!("{:>6}", s.timestamp % 1_000_000),
                        Style::default().fg(Color::Green),
                    ),
                    Span::raw("  "),
                    Span::styled(format!("{:>5.1}", s.value), value_style),
                    Span::raw("  "),
                    Span::styled(category, Style::default().fg(Color::Magenta)),
                ])
            })
            .collect();

        f.render_widget(Paragraph::new(lines).block(panel_block("Samples")), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stream::sample::{Category, Sample};
    use ratatui::{Terminal, backend::TestBackend};
    use std::collections::VecDeque;
    use std::sync::Arc;

    #[test]
    fn shows_only_the_newest_rows() {
        let samples: VecDeque<Sample> = (0..10)
            .map(|i| Sample::new(i * 100, 10.0 * i as f64).with_category(Category::cycle(i as usize)))
            .collect();
        let mut terminal = Terminal::new(TestBackend::new(30, 5)).unwrap();
        terminal
            .draw(|f| SamplesPanel::new(Arc::new(samples)).draw(f, f.area()))
            .unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        // three inner rows: samples 7, 8, 9
        assert!(text.contains(" 70.0"));
        assert!(text.contains(" 90.0"));
        assert!(!text.contains(" 60.0"));
    }
}
