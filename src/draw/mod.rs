//! Drawing primitives built on the engine's public write contract.
//!
//! Nothing here touches a [`Buffer`](crate::Buffer) directly: every glyph
//! goes through [`TextSink::write_at`], so any caller holding an
//! [`Engine`](crate::Engine) could reproduce these functions.

mod boxes;

pub use boxes::{draw_box, draw_hline, draw_vline, BoxGlyphs, BoxVariant};

use crate::engine::EngineError;

/// Anything that accepts pre-styled text at a cell position.
pub trait TextSink {
    /// Write `text` (which may embed SGR sequences) starting at `(x, y)`.
    ///
    /// # Errors
    ///
    /// Implementation defined; the engine rejects writes outside a frame.
    fn write_at(&mut self, x: i32, y: i32, text: &str) -> Result<(), EngineError>;

    /// Drawable area as `(columns, rows)`. Anything outside it is clipped
    /// before a write is issued.
    fn bounds(&self) -> (u16, u16);
}

impl<B: crate::terminal::Backend> TextSink for crate::Engine<B> {
    fn write_at(&mut self, x: i32, y: i32, text: &str) -> Result<(), EngineError> {
        crate::Engine::write_at(self, x, y, text)
    }

    fn bounds(&self) -> (u16, u16) {
        self.back().map_or((0, 0), |back| (back.width(), back.height()))
    }
}
