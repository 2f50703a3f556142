//! Cell: The atomic unit of terminal display.
//!
//! # Memory Layout
//!
//! A `Cell` is a single-width glyph plus its [`Style`] and a flag byte.
//! It stays at 16 bytes so four cells share a cache line:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  Cell Layout (16 bytes)                                      │
//! ├──────────┬──────────────┬──────────────┬───────┬───────┬─────┤
//! │  glyph   │      fg      │      bg      │  mod  │ flags │ pad │
//! │  char    │ Option<Rgb>  │ Option<Rgb>  │  u8   │  u8   │     │
//! │  4 bytes │   4 bytes    │   4 bytes    │  1b   │  1b   │ 2b  │
//! └──────────┴──────────────┴──────────────┴───────┴───────┴─────┘
//! ```
//!
//! Every glyph occupies exactly one column. Wide (CJK, emoji) glyphs are
//! not supported and are stored as U+FFFD, so the terminal cursor always
//! advances in step with the buffer.

use bitflags::bitflags;
use unicode_width::UnicodeWidthChar;

/// True-color RGB representation.
#[derive(Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Rgb {
    /// Red channel (0-255)
    pub r: u8,
    /// Green channel (0-255)
    pub g: u8,
    /// Blue channel (0-255)
    pub b: u8,
}

impl Rgb {
    /// Create a new RGB color.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Black (0, 0, 0)
    pub const BLACK: Self = Self::new(0, 0, 0);
    /// White (255, 255, 255)
    pub const WHITE: Self = Self::new(255, 255, 255);

    /// Create from a 24-bit hex color (e.g., 0xFF5500).
    #[inline]
    pub const fn from_u32(hex: u32) -> Self {
        Self::new(
            ((hex >> 16) & 0xFF) as u8,
            ((hex >> 8) & 0xFF) as u8,
            (hex & 0xFF) as u8,
        )
    }
}

impl std::fmt::Debug for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl From<(u8, u8, u8)> for Rgb {
    #[inline]
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::new(r, g, b)
    }
}

impl From<u32> for Rgb {
    #[inline]
    fn from(hex: u32) -> Self {
        Self::from_u32(hex)
    }
}

bitflags! {
    /// Text attributes understood by the renderer.
    ///
    /// Each flag maps to one SGR on-code: bold=1, italic=3, underline=4,
    /// reverse=7.
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        /// Bold text
        const BOLD = 0b0000_0001;
        /// Italic text
        const ITALIC = 0b0000_0010;
        /// Underlined text
        const UNDERLINE = 0b0000_0100;
        /// Reversed colors (fg/bg swapped)
        const REVERSE = 0b0000_1000;
    }
}

impl std::fmt::Debug for Modifiers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        bitflags::parser::to_writer(self, f)
    }
}

bitflags! {
    /// Cell-level bookkeeping flags. Not part of a cell's visible identity.
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct CellFlags: u8 {
        /// Cell was written since the last committed frame.
        const DIRTY = 0b0000_0001;
    }
}

impl std::fmt::Debug for CellFlags {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        bitflags::parser::to_writer(self, f)
    }
}

/// Foreground, background and attributes of a glyph.
///
/// `None` colors mean "terminal default". Two styles are equal iff every
/// field matches; [`Style::DEFAULT`] has no colors and no attributes.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Debug)]
pub struct Style {
    /// Foreground color, `None` for the terminal default.
    pub fg: Option<Rgb>,
    /// Background color, `None` for the terminal default.
    pub bg: Option<Rgb>,
    /// Attribute flags.
    pub modifiers: Modifiers,
}

impl Style {
    /// The unstyled style.
    pub const DEFAULT: Self = Self {
        fg: None,
        bg: None,
        modifiers: Modifiers::empty(),
    };

    /// Same as [`Style::DEFAULT`].
    #[inline]
    pub const fn new() -> Self {
        Self::DEFAULT
    }

    /// Set the foreground color (builder pattern).
    #[inline]
    #[must_use]
    pub const fn fg(mut self, color: Rgb) -> Self {
        self.fg = Some(color);
        self
    }

    /// Set the background color (builder pattern).
    #[inline]
    #[must_use]
    pub const fn bg(mut self, color: Rgb) -> Self {
        self.bg = Some(color);
        self
    }

    /// Add modifiers (builder pattern).
    #[inline]
    #[must_use]
    pub const fn add_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = self.modifiers.union(modifiers);
        self
    }

    /// Check whether this is the default style.
    #[inline]
    pub const fn is_default(&self) -> bool {
        self.fg.is_none() && self.bg.is_none() && self.modifiers.is_empty()
    }

    /// Bold attribute.
    #[inline]
    pub const fn is_bold(&self) -> bool {
        self.modifiers.contains(Modifiers::BOLD)
    }

    /// Italic attribute.
    #[inline]
    pub const fn is_italic(&self) -> bool {
        self.modifiers.contains(Modifiers::ITALIC)
    }

    /// Underline attribute.
    #[inline]
    pub const fn is_underline(&self) -> bool {
        self.modifiers.contains(Modifiers::UNDERLINE)
    }

    /// Reverse-video attribute.
    #[inline]
    pub const fn is_reverse(&self) -> bool {
        self.modifiers.contains(Modifiers::REVERSE)
    }
}

/// A single terminal cell: one glyph, its style and bookkeeping flags.
///
/// The glyph is never a control character and always one column wide.
/// Constructors replace control, zero-width and wide characters with
/// U+FFFD, so hostile text can never put raw control bytes on the wire.
#[derive(Clone, Copy)]
pub struct Cell {
    glyph: char,
    style: Style,
    flags: CellFlags,
}

// Cell must stay exactly 16 bytes
const _: () = assert!(
    std::mem::size_of::<Cell>() == 16,
    "Cell must be exactly 16 bytes for cache efficiency"
);

impl Default for Cell {
    fn default() -> Self {
        Self::BLANK
    }
}

impl Cell {
    /// A blank cell: space glyph, default style, clean.
    pub const BLANK: Self = Self {
        glyph: ' ',
        style: Style::DEFAULT,
        flags: CellFlags::empty(),
    };

    /// Glyph stored in place of control characters.
    pub const REPLACEMENT: char = '\u{FFFD}';

    /// Create a cell with the default style.
    #[inline]
    pub fn new(glyph: char) -> Self {
        Self::styled(glyph, Style::DEFAULT)
    }

    /// Create a cell with the given style.
    #[inline]
    pub fn styled(glyph: char, style: Style) -> Self {
        Self {
            glyph: sanitize(glyph),
            style,
            flags: CellFlags::empty(),
        }
    }

    /// Get the glyph.
    #[inline]
    pub const fn glyph(&self) -> char {
        self.glyph
    }

    /// Get the style.
    #[inline]
    pub const fn style(&self) -> Style {
        self.style
    }

    /// Get the flags.
    #[inline]
    pub const fn flags(&self) -> CellFlags {
        self.flags
    }

    /// Whether the cell was written since the last commit.
    #[inline]
    pub const fn is_dirty(&self) -> bool {
        self.flags.contains(CellFlags::DIRTY)
    }

    /// Whether the cell is a space in the default style.
    #[inline]
    pub const fn is_blank(&self) -> bool {
        self.glyph == ' ' && self.style.is_default()
    }

    #[inline]
    pub(crate) fn mark_dirty(&mut self) {
        self.flags = self.flags.union(CellFlags::DIRTY);
    }

    #[inline]
    pub(crate) fn mark_clean(&mut self) {
        self.flags = self.flags.difference(CellFlags::DIRTY);
    }

    /// Reset the cell to blank.
    #[inline]
    pub fn reset(&mut self) {
        *self = Self::BLANK;
    }
}

/// Only glyphs exactly one column wide may own a cell.
#[inline]
fn sanitize(glyph: char) -> char {
    match glyph.width() {
        Some(1) => glyph,
        _ => Cell::REPLACEMENT,
    }
}

impl PartialEq for Cell {
    /// Visible equality: glyph and style. Flags are bookkeeping and ignored.
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.glyph == other.glyph && self.style == other.style
    }
}

impl Eq for Cell {}

impl std::fmt::Debug for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cell")
            .field("glyph", &self.glyph)
            .field("style", &self.style)
            .field("flags", &self.flags)
            .finish()
    }
}
