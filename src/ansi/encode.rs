//! Control-sequence encoders.
//!
//! Pure functions appending VT100/ANSI sequences to a byte buffer. No
//! state and no decisions about *when* to emit; that belongs to the diff.
//! Coordinates are 0-indexed here and converted to the 1-indexed wire
//! format.
//!
//! Writing into a `Vec<u8>` cannot fail, so the `io::Result` from
//! `write!` is discarded.

use crate::buffer::{Modifiers, Rgb, Style};
use std::io::Write;

/// SGR 0.
pub const RESET: &[u8] = b"\x1b[0m";
/// Hide the cursor (DECTCEM reset).
pub const CURSOR_HIDE: &[u8] = b"\x1b[?25l";
/// Show the cursor (DECTCEM set).
pub const CURSOR_SHOW: &[u8] = b"\x1b[?25h";
/// Erase the whole display (ED 2).
pub const CLEAR_SCREEN: &[u8] = b"\x1b[2J";
/// Erase the whole line the cursor is on (EL 2).
pub const CLEAR_LINE: &[u8] = b"\x1b[2K";
/// Enter the alternate screen (DEC 1049).
pub const ALT_SCREEN_ENTER: &[u8] = b"\x1b[?1049h";
/// Leave the alternate screen (DEC 1049).
pub const ALT_SCREEN_LEAVE: &[u8] = b"\x1b[?1049l";
/// Begin synchronized output (DEC 2026).
pub const SYNC_BEGIN: &[u8] = b"\x1b[?2026h";
/// End synchronized output (DEC 2026).
pub const SYNC_END: &[u8] = b"\x1b[?2026l";

/// Move the cursor to `(x, y)`.
///
/// Uses the most compact CUP form:
/// - `\x1b[H` for home
/// - `\x1b[{row}H` for column 1
/// - `\x1b[{row};{col}H` otherwise
#[inline]
pub fn cursor_to(out: &mut Vec<u8>, x: u16, y: u16) {
    let row = u32::from(y) + 1;
    let col = u32::from(x) + 1;

    if row == 1 && col == 1 {
        out.extend_from_slice(b"\x1b[H");
    } else if col == 1 {
        let _ = write!(out, "\x1b[{row}H");
    } else {
        let _ = write!(out, "\x1b[{row};{col}H");
    }
}

/// Set a 24-bit foreground color.
#[inline]
pub fn fg(out: &mut Vec<u8>, color: Rgb) {
    let _ = write!(out, "\x1b[38;2;{};{};{}m", color.r, color.g, color.b);
}

/// Set a 24-bit background color.
#[inline]
pub fn bg(out: &mut Vec<u8>, color: Rgb) {
    let _ = write!(out, "\x1b[48;2;{};{};{}m", color.r, color.g, color.b);
}

/// Emit one `\x1b[Nm` token per attribute.
pub fn modifiers(out: &mut Vec<u8>, modifiers: Modifiers) {
    if modifiers.contains(Modifiers::BOLD) {
        out.extend_from_slice(b"\x1b[1m");
    }
    if modifiers.contains(Modifiers::ITALIC) {
        out.extend_from_slice(b"\x1b[3m");
    }
    if modifiers.contains(Modifiers::UNDERLINE) {
        out.extend_from_slice(b"\x1b[4m");
    }
    if modifiers.contains(Modifiers::REVERSE) {
        out.extend_from_slice(b"\x1b[7m");
    }
}

/// Emit the full SGR prefix for `style`, independent of any prior state.
///
/// Always starts with a reset, so the result is correct no matter what the
/// terminal had active before.
pub fn style(out: &mut Vec<u8>, style: Style) {
    out.extend_from_slice(RESET);
    if let Some(color) = style.fg {
        fg(out, color);
    }
    if let Some(color) = style.bg {
        bg(out, color);
    }
    modifiers(out, style.modifiers);
}

/// Build a pre-styled string: the style's SGR prefix followed by `text`.
///
/// A default style yields `text` unchanged. The decoder restores exactly
/// `style` for every character of `text`.
pub fn styled(text: &str, with: Style) -> String {
    if with.is_default() {
        return text.to_owned();
    }
    let mut out = Vec::with_capacity(text.len() + 32);
    style(&mut out, with);
    out.extend_from_slice(text.as_bytes());
    // Only ASCII escape bytes and the UTF-8 input were written.
    String::from_utf8(out).unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoded(f: impl FnOnce(&mut Vec<u8>)) -> String {
        let mut out = Vec::new();
        f(&mut out);
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_cursor_move_forms() {
        assert_eq!(encoded(|o| cursor_to(o, 0, 0)), "\x1b[H");
        assert_eq!(encoded(|o| cursor_to(o, 0, 5)), "\x1b[6H");
        assert_eq!(encoded(|o| cursor_to(o, 10, 5)), "\x1b[6;11H");
        assert_eq!(encoded(|o| cursor_to(o, u16::MAX, u16::MAX)), "\x1b[65536;65536H");
    }

    #[test]
    fn test_colors() {
        assert_eq!(encoded(|o| fg(o, Rgb::new(255, 0, 0))), "\x1b[38;2;255;0;0m");
        assert_eq!(encoded(|o| bg(o, Rgb::new(1, 2, 3))), "\x1b[48;2;1;2;3m");
    }

    #[test]
    fn test_modifier_tokens() {
        assert_eq!(encoded(|o| modifiers(o, Modifiers::empty())), "");
        assert_eq!(
            encoded(|o| modifiers(o, Modifiers::all())),
            "\x1b[1m\x1b[3m\x1b[4m\x1b[7m"
        );
    }

    #[test]
    fn test_style_prefix() {
        assert_eq!(encoded(|o| style(o, Style::DEFAULT)), "\x1b[0m");
        let s = Style::new()
            .fg(Rgb::new(9, 8, 7))
            .add_modifiers(Modifiers::UNDERLINE);
        assert_eq!(
            encoded(|o| style(o, s)),
            "\x1b[0m\x1b[38;2;9;8;7m\x1b[4m"
        );
    }

    #[test]
    fn test_styled_default_is_plain() {
        assert_eq!(styled("plain", Style::DEFAULT), "plain");
        assert_eq!(
            styled("x", Style::new().add_modifiers(Modifiers::BOLD)),
            "\x1b[0m\x1b[1mx"
        );
    }
}
