//! src/panels/title.rs
//!
//! Header strip: dashboard name plus stream status.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::ui::{Panel, panel_block};

pub struct TitlePanel {
    pub title: String,
    pub generator: String,
    pub paused: bool,
}

impl TitlePanel {
    pub fn new(title: &str, generator: &str, paused: bool) -> Self {
        Self {
            title: title.to_string(),
            generator: generator.to_string(),
            paused,
        }
    }
}

impl Panel for TitlePanel {
    fn draw(&self, f: &mut Frame<'_>, area: Rect) {
        let (state, color) = if self.paused {
            ("PAUSED", Color::Yellow)
        } else {
            ("LIVE", Color::Green)
        };
        let line = Line::from(vec![
            Span::styled(&self.title, Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("  source="),
            Span::styled(&self.generator, Style::default().fg(Color::Cyan)),
            Span::raw("  "),
            Span::styled(state, Style::default().fg(color).add_modifier(Modifier::BOLD)),
        ]);
        f.render_widget(Paragraph::new(line).block(panel_block("Dashboard")), area);
    }
}
