//! Decoder for text with embedded SGR sequences.
//!
//! Callers throughout an application hand the renderer pre-styled strings
//! such as `"\x1b[1mDone\x1b[0m"`. This module turns them into
//! `(char, Style)` pairs, carrying a cumulative style from left to right.
//!
//! Recognized inside `ESC [ params m`:
//!
//! | code            | effect                         |
//! |-----------------|--------------------------------|
//! | `0` (or empty)  | reset to the default style     |
//! | `1` `3` `4` `7` | bold, italic, underline, reverse on |
//! | `38;2;r;g;b`    | foreground color               |
//! | `48;2;r;g;b`    | background color               |
//! | `38;5;n` `48;5;n` | consumed and ignored (palette index) |
//!
//! Every other code is ignored. Anything that is not a complete
//! `ESC [ <digits and ;> m` sequence is literal text. The decoder never
//! panics and never fails, whatever the input.

use crate::buffer::{Modifiers, Rgb, Style};

const ESC: u8 = 0x1b;

/// Decode `text` into a list of characters paired with their style.
///
/// The style starts at [`Style::DEFAULT`] for every call; nothing carries
/// over between calls.
pub fn decode(text: &str) -> Vec<(char, Style)> {
    let mut out = Vec::with_capacity(text.len());
    decode_with(text, |ch, style| out.push((ch, style)));
    out
}

/// Decode `text`, handing each visible character and its style to `emit`.
pub fn decode_with(text: &str, mut emit: impl FnMut(char, Style)) {
    let bytes = text.as_bytes();
    let mut style = Style::DEFAULT;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == ESC {
            if let Some((params, end)) = scan_sgr(bytes, i) {
                apply_sgr(&mut style, params);
                i = end;
                continue;
            }
        }
        // `i` only ever lands on char boundaries: it advances by whole
        // chars, or past an ASCII `m`.
        let Some(ch) = text.get(i..).and_then(|rest| rest.chars().next()) else {
            break;
        };
        emit(ch, style);
        i += ch.len_utf8();
    }
}

/// Remove every recognized SGR sequence, keeping literal text.
pub fn strip(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    decode_with(text, |ch, _| out.push(ch));
    out
}

/// Number of cells `text` occupies once decoded (one per character).
pub fn visible_len(text: &str) -> usize {
    let mut len = 0;
    decode_with(text, |_, _| len += 1);
    len
}

/// Match `ESC [ [0-9;]* m` at `start`.
///
/// Returns the parameter bytes and the index just past the `m`.
fn scan_sgr(bytes: &[u8], start: usize) -> Option<(&[u8], usize)> {
    if bytes.get(start + 1) != Some(&b'[') {
        return None;
    }
    let params_start = start + 2;
    let mut j = params_start;
    while j < bytes.len() && (bytes[j].is_ascii_digit() || bytes[j] == b';') {
        j += 1;
    }
    if bytes.get(j) == Some(&b'm') {
        Some((&bytes[params_start..j], j + 1))
    } else {
        None
    }
}

/// Parse one parameter. Empty means 0; huge values saturate.
fn parse_param(digits: &[u8]) -> u32 {
    digits.iter().fold(0u32, |acc, b| {
        acc.saturating_mul(10).saturating_add(u32::from(b - b'0'))
    })
}

fn apply_sgr(style: &mut Style, params: &[u8]) {
    let mut codes = params.split(|b| *b == b';').map(parse_param);

    while let Some(code) = codes.next() {
        match code {
            0 => *style = Style::DEFAULT,
            1 => style.modifiers |= Modifiers::BOLD,
            3 => style.modifiers |= Modifiers::ITALIC,
            4 => style.modifiers |= Modifiers::UNDERLINE,
            7 => style.modifiers |= Modifiers::REVERSE,
            38 | 48 => {
                let color = match codes.next() {
                    Some(2) => read_rgb(&mut codes),
                    Some(5) => {
                        codes.next();
                        None
                    }
                    _ => None,
                };
                if let Some(color) = color {
                    if code == 38 {
                        style.fg = Some(color);
                    } else {
                        style.bg = Some(color);
                    }
                }
            }
            _ => {}
        }
    }
}

/// Take `r;g;b`. Consumes up to three codes even when they are invalid.
fn read_rgb(codes: &mut impl Iterator<Item = u32>) -> Option<Rgb> {
    let r = codes.next();
    let g = codes.next();
    let b = codes.next();
    let channel = |v: Option<u32>| v.and_then(|v| u8::try_from(v).ok());
    Some(Rgb::new(channel(r)?, channel(g)?, channel(b)?))
}
