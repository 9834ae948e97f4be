//! Input field drawing.
//!
//! Layout inside the field:
//!
//! ```text
//! ┌──────────────────────────────────┐
//! │<pad_x>text that scrolls left|    │  pad_y = (h - font_size) / 2
//! └──────────────────────────────────┘
//! ```
//!
//! Text wider than `w - 2 * pad_x` is clipped on the left so the tail (and
//! the end of what is being typed) stays visible.

use std::borrow::Cow;

use super::field::InputField;
use crate::backend::{text_texture, FontEngine, RenderContext};
use crate::engine::Sequence;
use crate::types::{Color, Rect};

/// Horizontal text padding.
pub const PAD_X: i32 = 10;

const BORDER_FOCUSED: Color = Color::new(255, 255, 255, 220);
const BORDER_IDLE: Color = Color::new(180, 180, 180, 120);
const BORDER_INNER: Color = Color::new(255, 255, 255, 80);
const PLACEHOLDER_IDLE: Color = Color::new(160, 160, 160, 140);
const PLACEHOLDER_FOCUSED: Color = Color::new(200, 200, 200, 160);
const CURSOR: Color = Color::new(255, 255, 255, 220);

/// Draw a sequence as an input field.
pub(crate) fn draw_input_field<T, F, R, E>(
    seq: &Sequence<T, F>,
    field: &InputField,
    ctx: &mut R,
    fonts: &E,
) where
    R: RenderContext,
    E: FontEngine<Font = F>,
{
    let rect = seq.rect();

    // Box
    ctx.set_draw_color(seq.color());
    ctx.fill_rect(rect);
    ctx.set_draw_color(if field.focused { BORDER_FOCUSED } else { BORDER_IDLE });
    ctx.draw_rect(rect);
    if field.focused {
        ctx.set_draw_color(BORDER_INNER);
        ctx.draw_rect(rect.inset(1));
    }

    let Some(font) = seq.font() else {
        return;
    };
    let pad_y = (rect.h - seq.font_size() as i32) / 2;
    let empty = field.buffer.is_empty();

    // Placeholder or typed text
    let (shown, color) = if empty {
        let color = if field.focused { PLACEHOLDER_FOCUSED } else { PLACEHOLDER_IDLE };
        (Cow::Borrowed(field.placeholder()), color)
    } else {
        (field.text(), seq.text_color)
    };
    if let Some((texture, tw, th)) = text_texture(ctx, fonts, font, &shown, color) {
        let (tw, th) = (tw as i32, th as i32);
        let draw_w = tw.min(rect.w - PAD_X * 2);
        if draw_w > 0 {
            let src = Rect::new(tw - draw_w, 0, draw_w, th);
            let dst = Rect::new(rect.x + PAD_X, rect.y + pad_y, draw_w, th);
            ctx.copy(&texture, Some(src), dst);
        }
    }

    // Cursor
    if !field.focused || !field.cursor_visible {
        return;
    }
    let mut cursor_x = rect.x + PAD_X;
    if !empty {
        let before = field.buffer.before_cursor();
        if !before.is_empty() {
            cursor_x += fonts.measure_text(font, &before).0 as i32;
        }
        if cursor_x > rect.x + rect.w - PAD_X {
            return;
        }
    }
    let (y1, y2) = (rect.y + pad_y, rect.y + rect.h - pad_y);
    ctx.set_draw_color(CURSOR);
    ctx.draw_line(cursor_x, y1, cursor_x, y2);
    ctx.draw_line(cursor_x + 1, y1, cursor_x + 1, y2);
}
