//! src/panels/charts.rs
//!
//! Chart list panel: every configured chart with its kind and visibility,
//! the focused one highlighted, plus the key bindings.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::render::ChartConfig;
use crate::ui::{Panel, panel_block};

pub const KEY_HELP: &str = "TAB=Focus  V=Visible  K=Kind  G=Generator  P=Pause  Q=Quit";

pub struct ChartListPanel<'a> {
    pub charts: &'a [ChartConfig],
    pub focused: usize,
}

impl<'a> ChartListPanel<'a> {
    pub fn new(charts: &'a [ChartConfig], focused: usize) -> Self {
        Self { charts, focused }
    }
}

impl Panel for ChartListPanel<'_> {
    fn draw(&self, f: &mut Frame<'_>, area: Rect) {
        let mut lines: Vec<Line> = self
            .charts
            .iter()
            .enumerate()
            .map(|(i, c)| {
                let marker = if i == self.focused { "> " } else { "  " };
                let mut name_style = Style::default().fg(c.color);
                if i == self.focused {
                    name_style = name_style.add_modifier(Modifier::BOLD);
                }
                if !c.visible {
                    name_style = name_style.add_modifier(Modifier::DIM);
                }
                Line::from(vec![
                    Span::raw(marker),
                    Span::styled(c.title.clone().unwrap_or_else(|| c.data_key.clone()), name_style),
                    Span::raw(format!(
                        "  kind={}  key={}  {}",
                        c.kind.label(),
                        c.data_key,
                        if c.visible { "shown" } else { "hidden" }
                    )),
                ])
            })
            .collect();
        lines.push(Line::from(Span::styled(
            KEY_HELP,
            Style::default().fg(Color::DarkGray),
        )));

        f.render_widget(Paragraph::new(lines).block(panel_block("Charts")), area);
    }
}
