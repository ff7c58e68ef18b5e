//! src/ui/layout.rs
//!
//! Screen regions and the `Panel` trait every region renderer implements.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::widgets::{Block, Borders};

/// Panel trait: any renderable surface implements this.
pub trait Panel {
    fn draw(&self, f: &mut Frame<'_>, area: Rect);
}

/// Rects for every panel of one screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DashboardAreas {
    pub title: Rect,
    pub chart: Rect,
    pub metrics: Rect,
    pub samples: Rect,
    pub charts_list: Rect,
}

impl DashboardAreas {
    /// Title strip on top, chart beside a metrics/samples column, chart list
    /// at the bottom.
    pub fn split(area: Rect) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(8),
                Constraint::Length(7),
            ])
            .split(area);
        let main = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
            .split(rows[1]);
        let side = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(8), Constraint::Min(3)])
            .split(main[1]);

        Self {
            title: rows[0],
            chart: main[0],
            metrics: side[0],
            samples: side[1],
            charts_list: rows[2],
        }
    }

    /// Where the chart canvas actually draws: the chart rect minus its border.
    pub fn canvas(&self) -> Rect {
        panel_block("").inner(self.chart)
    }
}

/// Standard bordered block shared by all panels.
pub fn panel_block(title: &str) -> Block<'_> {
    Block::default().title(title).borders(Borders::ALL)
}
