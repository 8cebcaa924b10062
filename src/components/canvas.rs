use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Style, Stylize},
    widgets::Widget,
};

use crate::{
    constants::game,
    pages::game::surface::{Canvas, Shape},
};

/// Draws a [`Canvas`] stretched over the whole area.
///
/// Rectangles become cell backgrounds. Text is drawn last and centered on its anchor.
pub struct CanvasView<'a> {
    canvas: &'a Canvas,
}

impl<'a> CanvasView<'a> {
    pub fn new(canvas: &'a Canvas) -> Self {
        Self { canvas }
    }
}

/// Maps a logical span onto `[0, cells)`, rounding outward.
fn cell_span(start: f32, end: f32, logical: f32, cells: u16) -> (u16, u16) {
    let scale = f32::from(cells) / logical;
    let from = (start * scale).floor().clamp(0.0, f32::from(cells)) as u16;
    let to = (end * scale).ceil().clamp(0.0, f32::from(cells)) as u16;
    (from, to)
}

impl Widget for CanvasView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, Style::new().bg(game::CANVAS_COLOR));

        for (_, shape) in self.canvas.shapes() {
            let Shape::Rect { bounds, color } = shape else {
                continue;
            };
            let (left, right) = cell_span(bounds.left, bounds.right, game::CANVAS_WIDTH, area.width);
            let (top, bottom) = cell_span(bounds.top, bounds.bottom, game::CANVAS_HEIGHT, area.height);
            for y in top..bottom {
                for x in left..right {
                    if let Some(cell) = buf.cell_mut((area.x + x, area.y + y)) {
                        cell.set_bg(*color);
                    }
                }
            }
        }

        for (_, shape) in self.canvas.shapes() {
            let Shape::Text { x, y, text, color } = shape else {
                continue;
            };
            let col = (x * f32::from(area.width) / game::CANVAS_WIDTH) as i32 - text.chars().count() as i32 / 2;
            let row = (y * f32::from(area.height) / game::CANVAS_HEIGHT) as i32;
            if col < 0 || row < 0 || row >= i32::from(area.height) {
                continue;
            }
            let (col, row) = (col as u16, row as u16);
            let room = usize::from(area.width.saturating_sub(col));
            buf.set_stringn(area.x + col, area.y + row, text, room, Style::new().fg(*color).bold());
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use ratatui::style::Color;

    use super::*;
    use crate::pages::game::surface::{Bounds, Surface};

    #[test]
    fn test_rect_scaled_to_cells() {
        let mut canvas = Canvas::new();
        canvas.create_rect(Bounds::new(100.0, 100.0, 200.0, 200.0), Color::Red);

        let area = Rect::new(0, 0, 60, 40);
        let mut buf = Buffer::empty(area);
        CanvasView::new(&canvas).render(area, &mut buf);

        assert_eq!(buf[(10, 10)].bg, Color::Red);
        assert_eq!(buf[(19, 19)].bg, Color::Red);
        assert_eq!(buf[(20, 20)].bg, game::CANVAS_COLOR);
        assert_eq!(buf[(9, 15)].bg, game::CANVAS_COLOR);
    }

    #[test]
    fn test_offscreen_parts_clipped() {
        let mut canvas = Canvas::new();
        canvas.create_rect(Bounds::new(-50.0, 0.0, 30.0, 400.0), Color::Green);
        canvas.create_rect(Bounds::new(590.0, 0.0, 640.0, 40.0), Color::Green);

        let area = Rect::new(2, 1, 60, 40);
        let mut buf = Buffer::empty(Rect::new(0, 0, 64, 42));
        CanvasView::new(&canvas).render(area, &mut buf);

        assert_eq!(buf[(2, 1)].bg, Color::Green);
        assert_eq!(buf[(4, 40)].bg, Color::Green);
        assert_eq!(buf[(5, 40)].bg, game::CANVAS_COLOR);
        assert_eq!(buf[(61, 1)].bg, Color::Green);
        assert_eq!(buf[(62, 1)].bg, Color::Reset);
        assert_eq!(buf[(1, 1)].bg, Color::Reset);
    }

    #[test]
    fn test_text_centered_over_rects() {
        let mut canvas = Canvas::new();
        canvas.create_text(300.0, 200.0, "12", Color::White);
        canvas.create_rect(Bounds::new(280.0, 180.0, 320.0, 220.0), Color::Green);

        let area = Rect::new(0, 0, 60, 40);
        let mut buf = Buffer::empty(area);
        CanvasView::new(&canvas).render(area, &mut buf);

        assert_eq!(buf[(29, 20)].symbol(), "1");
        assert_eq!(buf[(30, 20)].symbol(), "2");
        assert_eq!(buf[(29, 20)].fg, Color::White);
        assert_eq!(buf[(29, 20)].bg, Color::Green);
    }
}
