//! Canvas to terminal output.
//!
//! Each cell shows two canvas samples with the upper half block `▀`: the
//! foreground is the top sample, the background the bottom one. Colors are
//! 24-bit SGR sequences, emitted only when they change.

use std::io::{self, Write};

use crate::backend::Canvas;
use crate::types::Color;

const HALF_BLOCK: &str = "▀";

#[derive(Debug, Default)]
pub struct HalfBlockPresenter {
    out: Vec<u8>,
    last_fg: Option<Color>,
    last_bg: Option<Color>,
}

impl HalfBlockPresenter {
    pub fn new() -> Self {
        Self {
            out: Vec::with_capacity(64 * 1024),
            last_fg: None,
            last_bg: None,
        }
    }

    /// Encode a full frame for a `cols` x `rows` terminal.
    pub fn compose(&mut self, canvas: &Canvas, cols: u16, rows: u16) -> &[u8] {
        self.out.clear();
        self.last_fg = None;
        self.last_bg = None;

        let (cols, rows) = (cols.max(1), rows.max(1));
        let sample_rows = rows as u32 * 2;
        for row in 0..rows {
            // cursor to row start, 1-based
            write!(self.out, "\x1b[{};1H", row + 1).ok();
            for col in 0..cols {
                let top = sample(canvas, col as u32, row as u32 * 2, cols as u32, sample_rows);
                let bottom = sample(canvas, col as u32, row as u32 * 2 + 1, cols as u32, sample_rows);
                self.cell(top, bottom);
            }
        }
        self.out.extend_from_slice(b"\x1b[0m");
        &self.out
    }

    /// Encode a frame and write it out in one go.
    pub fn present<W: Write>(&mut self, canvas: &Canvas, cols: u16, rows: u16, writer: &mut W) -> io::Result<()> {
        let frame = self.compose(canvas, cols, rows);
        writer.write_all(frame)?;
        writer.flush()
    }

    fn cell(&mut self, top: Color, bottom: Color) {
        if self.last_fg != Some(top) {
            write!(self.out, "\x1b[38;2;{};{};{}m", top.r, top.g, top.b).ok();
            self.last_fg = Some(top);
        }
        if self.last_bg != Some(bottom) {
            write!(self.out, "\x1b[48;2;{};{};{}m", bottom.r, bottom.g, bottom.b).ok();
            self.last_bg = Some(bottom);
        }
        self.out.extend_from_slice(HALF_BLOCK.as_bytes());
    }
}

/// Nearest canvas pixel for a sample in a `cols` x `rows` sample grid.
fn sample(canvas: &Canvas, sx: u32, sy: u32, cols: u32, rows: u32) -> Color {
    let x = (2 * sx as u64 + 1) * canvas.width() as u64 / (2 * cols as u64);
    let y = (2 * sy as u64 + 1) * canvas.height() as u64 / (2 * rows as u64);
    canvas.pixel(x as i32, y as i32).unwrap_or(Color::BLACK)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::RenderContext;
    use crate::types::Rect;

    fn two_tone() -> Canvas {
        let mut canvas = Canvas::new(2, 2);
        canvas.clear(Color::rgb(0, 0, 255));
        canvas.set_draw_color(Color::rgb(255, 0, 0));
        canvas.fill_rect(Rect::new(0, 0, 2, 1));
        canvas
    }

    #[test]
    fn test_top_is_foreground_bottom_is_background() {
        let canvas = two_tone();
        let mut presenter = HalfBlockPresenter::new();
        let frame = String::from_utf8(presenter.compose(&canvas, 1, 1).to_vec()).unwrap();
        assert_eq!(frame, "\x1b[1;1H\x1b[38;2;255;0;0m\x1b[48;2;0;0;255m▀\x1b[0m");
    }

    #[test]
    fn test_repeated_colors_are_not_re_emitted() {
        let canvas = two_tone();
        let mut presenter = HalfBlockPresenter::new();
        let frame = String::from_utf8(presenter.compose(&canvas, 2, 1).to_vec()).unwrap();
        assert_eq!(frame.matches("38;2;").count(), 1);
        assert_eq!(frame.matches('▀').count(), 2);
    }

    #[test]
    fn test_present_writes_frame() {
        let canvas = two_tone();
        let mut presenter = HalfBlockPresenter::new();
        let mut sink = Vec::new();
        presenter.present(&canvas, 1, 2, &mut sink).unwrap();
        let text = String::from_utf8(sink).unwrap();
        assert!(text.contains("\x1b[2;1H"));
    }
}
