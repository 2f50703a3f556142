//! Box and line drawing.

use super::TextSink;
use crate::ansi::styled;
use crate::buffer::Style;
use crate::engine::EngineError;
use crate::layout::Rect;
use std::ops::Range;

/// Border style of a box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BoxVariant {
    /// `┌─┐ │ └─┘`
    #[default]
    Single,
    /// `╔═╗ ║ ╚═╝`
    Double,
    /// `╭─╮ │ ╰─╯`
    Rounded,
}

/// Glyph table for one [`BoxVariant`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoxGlyphs {
    /// Top-left corner.
    pub top_left: char,
    /// Top-right corner.
    pub top_right: char,
    /// Bottom-left corner.
    pub bottom_left: char,
    /// Bottom-right corner.
    pub bottom_right: char,
    /// Top and bottom edges.
    pub horizontal: char,
    /// Left and right edges.
    pub vertical: char,
}

impl BoxVariant {
    /// The glyphs this variant draws with.
    pub const fn glyphs(self) -> BoxGlyphs {
        match self {
            Self::Single => BoxGlyphs {
                top_left: '┌',
                top_right: '┐',
                bottom_left: '└',
                bottom_right: '┘',
                horizontal: '─',
                vertical: '│',
            },
            Self::Double => BoxGlyphs {
                top_left: '╔',
                top_right: '╗',
                bottom_left: '╚',
                bottom_right: '╝',
                horizontal: '═',
                vertical: '║',
            },
            Self::Rounded => BoxGlyphs {
                top_left: '╭',
                top_right: '╮',
                bottom_left: '╰',
                bottom_right: '╯',
                horizontal: '─',
                vertical: '│',
            },
        }
    }
}

/// Draw the outline of `area`.
///
/// The top and bottom edges are one write each (corner, `w - 2`
/// horizontals, corner); the sides are one write per interior row. Only
/// the part inside the sink's bounds is built and written, so the cost is
/// bounded by the visible area whatever the requested size. Areas narrower
/// or shorter than 2 draw nothing. The interior is left as is.
///
/// # Errors
///
/// Whatever the sink returns; the first error stops drawing.
pub fn draw_box(
    sink: &mut impl TextSink,
    area: Rect,
    variant: BoxVariant,
    style: Option<Style>,
) -> Result<(), EngineError> {
    if area.width < 2 || area.height < 2 {
        return Ok(());
    }
    let (width, height) = sink.bounds();
    let g = variant.glyphs();
    let style = style.unwrap_or_default();

    let left = i64::from(area.x);
    let right = area.right() - 1;
    let top = i64::from(area.y);
    let bottom = area.bottom() - 1;
    let columns = visible(left, right + 1, width);

    let edge = |l: char, r: char| -> String {
        columns
            .clone()
            .map(|col| match i64::from(col) {
                c if c == left => l,
                c if c == right => r,
                _ => g.horizontal,
            })
            .collect()
    };

    if let Some(y) = on_axis(top, height).filter(|_| !columns.is_empty()) {
        sink.write_at(columns.start, y, &styled(&edge(g.top_left, g.top_right), style))?;
    }

    let side = styled(&g.vertical.to_string(), style);
    let left_col = on_axis(left, width);
    let right_col = on_axis(right, width);
    if left_col.is_some() || right_col.is_some() {
        for y in visible(top + 1, bottom, height) {
            if let Some(x) = left_col {
                sink.write_at(x, y, &side)?;
            }
            if let Some(x) = right_col {
                sink.write_at(x, y, &side)?;
            }
        }
    }

    if let Some(y) = on_axis(bottom, height).filter(|_| !columns.is_empty()) {
        sink.write_at(columns.start, y, &styled(&edge(g.bottom_left, g.bottom_right), style))?;
    }
    Ok(())
}

/// Draw `len` horizontal edge glyphs starting at `(x, y)`, in one write.
///
/// Only the visible part is built and written.
///
/// # Errors
///
/// Whatever the sink returns.
pub fn draw_hline(
    sink: &mut impl TextSink,
    x: i32,
    y: i32,
    len: i32,
    variant: BoxVariant,
    style: Option<Style>,
) -> Result<(), EngineError> {
    let (width, height) = sink.bounds();
    let columns = visible(i64::from(x), i64::from(x) + i64::from(len), width);
    let Some(row) = on_axis(i64::from(y), height).filter(|_| !columns.is_empty()) else {
        return Ok(());
    };
    let glyph = variant.glyphs().horizontal;
    let line: String = columns.clone().map(|_| glyph).collect();
    sink.write_at(columns.start, row, &styled(&line, style.unwrap_or_default()))
}

/// Draw `len` vertical edge glyphs downward from `(x, y)`, one write per
/// visible row.
///
/// # Errors
///
/// Whatever the sink returns; the first error stops drawing.
pub fn draw_vline(
    sink: &mut impl TextSink,
    x: i32,
    y: i32,
    len: i32,
    variant: BoxVariant,
    style: Option<Style>,
) -> Result<(), EngineError> {
    let (width, height) = sink.bounds();
    if on_axis(i64::from(x), width).is_none() {
        return Ok(());
    }
    let glyph = styled(&variant.glyphs().vertical.to_string(), style.unwrap_or_default());
    for row in visible(i64::from(y), i64::from(y) + i64::from(len), height) {
        sink.write_at(x, row, &glyph)?;
    }
    Ok(())
}

/// The part of `[start, end)` inside `[0, limit)`.
fn visible(start: i64, end: i64, limit: u16) -> Range<i32> {
    let lo = start.clamp(0, i64::from(limit));
    let hi = end.clamp(lo, i64::from(limit));
    // Both ends are within 0..=u16::MAX after clamping.
    narrow(lo)..narrow(hi)
}

/// `pos` as a coordinate, if it lies inside `[0, limit)`.
fn on_axis(pos: i64, limit: u16) -> Option<i32> {
    (0..i64::from(limit)).contains(&pos).then(|| narrow(pos))
}

fn narrow(value: i64) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}
