//! src/render/draw.rs
//!
//! Stateless drawing helpers: clear, grid, axes, labels, and the heatmap
//! color ramp.

use std::fmt;

use ratatui::style::Color;

use super::surface::Surface;

/// Horizontal padding around label text, in logical units.
const LABEL_PADDING: f64 = 1.0;

pub fn clear(surface: &mut dyn Surface) {
    surface.clear();
}

/// Vertical and horizontal lines every `spacing` units, starting at the origin.
pub fn draw_grid(surface: &mut dyn Surface, spacing: f64, color: Color) {
    if spacing <= 0.0 {
        return;
    }
    let (width, height) = surface.size();

    let mut x = 0.0;
    while x <= width {
        surface.stroke_line((x, 0.0), (x, height), color);
        x += spacing;
    }

    let mut y = 0.0;
    while y <= height {
        surface.stroke_line((0.0, y), (width, y), color);
        y += spacing;
    }
}

/// X axis along the bottom and Y axis along the left, inset by `padding`.
pub fn draw_axes(surface: &mut dyn Surface, padding: f64, color: Color) {
    let (width, height) = surface.size();
    let bottom = height - padding;
    surface.stroke_line((padding, bottom), (width - padding, bottom), color);
    surface.stroke_line((padding, padding), (padding, bottom), color);
}

/// Text on a solid background strip.
pub fn draw_label(surface: &mut dyn Surface, text: &str, x: f64, y: f64, bg: Color, fg: Color) {
    let padded = format!(
        "{pad}{text}{pad}",
        pad = " ".repeat(LABEL_PADDING as usize)
    );
    surface.fill_text(&padded, x - LABEL_PADDING, y, fg, Some(bg));
}

/// An opaque RGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.0, self.1, self.2)
    }
}

impl From<Rgb> for Color {
    fn from(Rgb(r, g, b): Rgb) -> Self {
        Color::Rgb(r, g, b)
    }
}

/// Blue at `min`, red at `max`, linear in between. A degenerate range is
/// treated as width 1, so every value maps near the `min` end.
pub fn heatmap_color(value: f64, min: f64, max: f64) -> Rgb {
    let span = max - min;
    let span = if span == 0.0 { 1.0 } else { span };
    let normalized = ((value - min) / span).clamp(0.0, 1.0);
    let normalized = if normalized.is_nan() { 0.0 } else { normalized };
    let r = (255.0 * normalized).round() as u8;
    let b = (255.0 * (1.0 - normalized)).round() as u8;
    Rgb(r, 60, b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::surface::{DrawCommand, SurfaceBinding, setup_surface};
    use proptest::prelude::*;
    use ratatui::layout::Rect;

    fn list(w: u16, h: u16) -> crate::render::surface::DisplayList {
        setup_surface(SurfaceBinding::braille(Rect::new(0, 0, w, h))).unwrap()
    }

    #[test]
    fn grid_covers_both_edges() {
        let mut s = list(20, 10);
        draw_grid(&mut s, 10.0, Color::Gray);
        // x = 0, 10, 20 and y = 0, 10
        assert_eq!(s.commands().len(), 5);
    }

    #[test]
    fn non_positive_spacing_draws_nothing() {
        let mut s = list(20, 10);
        draw_grid(&mut s, 0.0, Color::Gray);
        assert!(s.is_empty());
    }

    #[test]
    fn axes_are_inset_by_padding() {
        let mut s = list(30, 12);
        draw_axes(&mut s, 2.0, Color::Gray);
        assert_eq!(
            s.commands(),
            &[
                DrawCommand::Line {
                    from: (2.0, 10.0),
                    to: (28.0, 10.0),
                    color: Color::Gray
                },
                DrawCommand::Line {
                    from: (2.0, 2.0),
                    to: (2.0, 10.0),
                    color: Color::Gray
                },
            ]
        );
    }

    #[test]
    fn label_has_background() {
        let mut s = list(30, 12);
        draw_label(&mut s, "42.0", 5.0, 1.0, Color::Black, Color::White);
        match &s.commands()[0] {
            DrawCommand::Text { text, x, bg, .. } => {
                assert_eq!(text, " 42.0 ");
                assert_eq!(*x, 4.0);
                assert_eq!(*bg, Some(Color::Black));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn heatmap_endpoints() {
        assert_eq!(heatmap_color(0.0, 0.0, 100.0), Rgb(0, 60, 255));
        assert_eq!(heatmap_color(100.0, 0.0, 100.0), Rgb(255, 60, 0));
        assert_eq!(heatmap_color(50.0, 0.0, 100.0).to_string(), "rgb(128, 60, 128)");
    }

    #[test]
    fn heatmap_degenerate_range_is_min_end() {
        assert_eq!(heatmap_color(7.0, 7.0, 7.0), Rgb(0, 60, 255));
    }

    proptest! {
        #[test]
        fn heatmap_is_monotonic(
            lo in -1_000.0f64..1_000.0,
            width in 0.001f64..1_000.0,
            a in 0.0f64..1.0,
            b in 0.0f64..1.0,
        ) {
            let hi = lo + width;
            let (va, vb) = (lo + a.min(b) * width, lo + a.max(b) * width);
            let (ca, cb) = (heatmap_color(va, lo, hi), heatmap_color(vb, lo, hi));
            prop_assert!(ca.0 <= cb.0);
            prop_assert!(ca.2 >= cb.2);
        }
    }
}
