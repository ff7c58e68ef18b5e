//! src/panels/canvas.rs
//!
//! Chart canvas panel: replays the session's display list into a braille
//! canvas. Display-list coordinates have `y` growing downward; the canvas
//! has it growing upward, so every `y` is flipped against the height.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    symbols::Marker,
    text::{Line as TextLine, Span},
    widgets::canvas::{Canvas, Context, Line, Points},
    widgets::{Block, Paragraph, Wrap},
};

use crate::render::surface::SurfaceBinding;
use crate::render::{DisplayList, DrawCommand, Surface};
use crate::ui::{Panel, panel_block};

pub struct CanvasPanel<'a> {
    pub list: Option<&'a DisplayList>,
    pub title: String,
}

impl<'a> CanvasPanel<'a> {
    pub fn new(list: Option<&'a DisplayList>, title: &str) -> Self {
        Self {
            list,
            title: title.to_string(),
        }
    }
}

/// Dot pitch of the braille marker in logical units.
const DOT_W: f64 = 1.0 / SurfaceBinding::BRAILLE.0 as f64;

fn replay(ctx: &mut Context<'_>, list: &DisplayList) {
    let (_, height) = list.size();
    let flip = |y: f64| height - y;

    for cmd in list.commands() {
        match cmd {
            DrawCommand::Line { from, to, color } => {
                ctx.draw(&Line::new(from.0, flip(from.1), to.0, flip(to.1), *color));
            }
            DrawCommand::Rect {
                x,
                y,
                width,
                height,
                color,
            } => {
                // fill as vertical strokes, one per dot column
                let mut cx = *x;
                loop {
                    ctx.draw(&Line::new(cx, flip(*y), cx, flip(y + height), *color));
                    cx += DOT_W;
                    if cx >= x + width {
                        break;
                    }
                }
            }
            DrawCommand::Points { coords, color } => {
                let flipped: Vec<(f64, f64)> = coords.iter().map(|(x, y)| (*x, flip(*y))).collect();
                ctx.draw(&Points {
                    coords: &flipped,
                    color: *color,
                });
            }
            DrawCommand::Text {
                text,
                x,
                y,
                fg,
                bg,
            } => {
                let mut style = Style::default().fg(*fg);
                if let Some(bg) = bg {
                    style = style.bg(*bg);
                }
                ctx.print(*x, flip(*y), TextLine::from(Span::styled(text.clone(), style)));
            }
        }
    }
}

fn notice(f: &mut Frame<'_>, area: Rect, block: Block<'_>, text: &str) {
    let paragraph = Paragraph::new(text)
        .style(Style::default().fg(Color::DarkGray))
        .wrap(Wrap { trim: true })
        .block(block);
    f.render_widget(paragraph, area);
}

impl Panel for CanvasPanel<'_> {
    fn draw(&self, f: &mut Frame<'_>, area: Rect) {
        let block = panel_block(&self.title);
        let list = match self.list {
            Some(list) if !list.is_empty() => list,
            Some(_) => return notice(f, area, block, "No visible charts; press v to show one."),
            None => return notice(f, area, block, "Drawing surface unavailable; resize the terminal."),
        };

        let (width, height) = list.size();
        let canvas = Canvas::default()
            .block(block)
            .marker(Marker::Braille)
            .x_bounds([0.0, width])
            .y_bounds([0.0, height])
            .paint(|ctx| replay(ctx, list));
        f.render_widget(canvas, area);
    }
}
