//! src/render/surface.rs
//!
//! Drawing surface abstraction plus the retained display list the terminal
//! canvas replays.
//!
//! Coordinates are logical units with the origin at the top-left corner and
//! `y` growing downward. One logical unit is one terminal cell; the backing
//! resolution is the cell grid multiplied by the marker's dots per cell.

use ratatui::layout::Rect;
use ratatui::style::Color;

use crate::error::{DashboardError, Result};

/// A 2D drawing target. Implementations keep no state between passes other
/// than what has been drawn.
pub trait Surface {
    /// Logical `(width, height)`.
    fn size(&self) -> (f64, f64);

    /// Erase everything drawn so far.
    fn clear(&mut self);

    fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), color: Color);

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color);

    fn plot_points(&mut self, points: &[(f64, f64)], color: Color);

    fn fill_text(&mut self, text: &str, x: f64, y: f64, fg: Color, bg: Option<Color>);

    /// Width of `text` in logical units.
    fn measure_text(&self, text: &str) -> f64 {
        text.chars().count() as f64
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Line {
        from: (f64, f64),
        to: (f64, f64),
        color: Color,
    },
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        color: Color,
    },
    Points {
        coords: Vec<(f64, f64)>,
        color: Color,
    },
    Text {
        text: String,
        x: f64,
        y: f64,
        fg: Color,
        bg: Option<Color>,
    },
}

/// What a surface gets bound to: a target rectangle in cells and the number
/// of device dots per cell along each axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SurfaceBinding {
    pub area: Rect,
    pub pixel_ratio: (u16, u16),
}

impl SurfaceBinding {
    /// Braille markers resolve 2x4 dots per cell.
    pub const BRAILLE: (u16, u16) = (2, 4);

    pub fn braille(area: Rect) -> Self {
        Self {
            area,
            pixel_ratio: Self::BRAILLE,
        }
    }
}

/// Retained list of draw commands in logical coordinates.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DisplayList {
    width: f64,
    height: f64,
    backing: (u32, u32),
    commands: Vec<DrawCommand>,
}

impl DisplayList {
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Device resolution in dots.
    pub fn backing(&self) -> (u32, u32) {
        self.backing
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

/// Size a fresh display list for `binding`. Call once per resize, not per frame.
pub fn setup_surface(binding: SurfaceBinding) -> Result<DisplayList> {
    let Rect { width, height, .. } = binding.area;
    if width == 0 || height == 0 {
        return Err(DashboardError::SurfaceUnavailable);
    }
    let (rx, ry) = binding.pixel_ratio;
    let backing = (
        u32::from(width) * u32::from(rx.max(1)),
        u32::from(height) * u32::from(ry.max(1)),
    );
    tracing::trace!(width, height, "surface set up");
    Ok(DisplayList {
        width: f64::from(width),
        height: f64::from(height),
        backing,
        commands: Vec::new(),
    })
}

impl Surface for DisplayList {
    fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn clear(&mut self) {
        self.commands.clear();
    }

    fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), color: Color) {
        self.commands.push(DrawCommand::Line { from, to, color });
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color) {
        self.commands.push(DrawCommand::Rect {
            x,
            y,
            width,
            height,
            color,
        });
    }

    fn plot_points(&mut self, points: &[(f64, f64)], color: Color) {
        if points.is_empty() {
            return;
        }
        self.commands.push(DrawCommand::Points {
            coords: points.to_vec(),
            color,
        });
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, fg: Color, bg: Option<Color>) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            x,
            y,
            fg,
            bg,
        });
    }
}

/// A rectangular window onto a parent surface. Drawing is translated by the
/// region's origin; clearing is left to the parent, which owns the backing.
pub struct Region<'a> {
    parent: &'a mut dyn Surface,
    origin: (f64, f64),
    size: (f64, f64),
}

impl<'a> Region<'a> {
    pub fn new(parent: &'a mut dyn Surface, origin: (f64, f64), size: (f64, f64)) -> Self {
        Self {
            parent,
            origin,
            size,
        }
    }

    fn at(&self, (x, y): (f64, f64)) -> (f64, f64) {
        (x + self.origin.0, y + self.origin.1)
    }
}

impl Surface for Region<'_> {
    fn size(&self) -> (f64, f64) {
        self.size
    }

    fn clear(&mut self) {}

    fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), color: Color) {
        let (from, to) = (self.at(from), self.at(to));
        self.parent.stroke_line(from, to, color);
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color) {
        let (x, y) = self.at((x, y));
        self.parent.fill_rect(x, y, width, height, color);
    }

    fn plot_points(&mut self, points: &[(f64, f64)], color: Color) {
        let shifted: Vec<_> = points.iter().map(|p| self.at(*p)).collect();
        self.parent.plot_points(&shifted, color);
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, fg: Color, bg: Option<Color>) {
        let (x, y) = self.at((x, y));
        self.parent.fill_text(text, x, y, fg, bg);
    }

    fn measure_text(&self, text: &str) -> f64 {
        self.parent.measure_text(text)
    }
}
