//! # Cellframe
//!
//! A differential terminal renderer.
//!
//! Callers draw into an in-memory grid of styled cells; at the end of each
//! frame the engine compares it with what the terminal already shows and
//! writes only the difference, batched into a single write.
//!
//! ## Core Concepts
//!
//! - **Double-buffered rendering**: front (on screen) and back (being drawn)
//!   buffers with a run-based diff between them
//! - **Pre-styled text**: callers pass strings with embedded SGR sequences;
//!   they are decoded into structured [`Style`]s before touching a buffer
//! - **Frame lifecycle**: `initialize`, then `begin_frame` / draw /
//!   `end_frame` per frame, then `cleanup`
//!
//! ## Example
//!
//! ```rust
//! use cellframe::{BoxVariant, Engine, EngineConfig, TestBackend};
//!
//! let mut engine = Engine::new(TestBackend::new(30, 8), EngineConfig::default());
//! engine.initialize()?;
//!
//! engine.begin_frame()?;
//! engine.draw_box(0, 0, 30, 8, BoxVariant::Rounded, None)?;
//! engine.write_at(2, 1, "\x1b[1mBuild\x1b[0m \x1b[38;2;0;200;0mpassing\x1b[0m")?;
//! engine.end_frame()?;
//!
//! assert_eq!(engine.cell(2, 1).map(|c| c.glyph()), Some('B'));
//! engine.cleanup();
//! # Ok::<(), cellframe::EngineError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod ansi;
pub mod buffer;
pub mod draw;
pub mod engine;
pub mod layout;
pub mod terminal;

// Re-exports for convenience
pub use ansi::{decode, strip, styled, visible_len, SequenceCache};
pub use buffer::diff::{render_diff, DiffResult};
pub use buffer::{Buffer, Cell, CellFlags, Modifiers, Rgb, Style};
pub use draw::{BoxGlyphs, BoxVariant, TextSink};
pub use engine::{Engine, EngineConfig, EngineError, PerformanceStats, Phase};
pub use layout::Rect;
pub use terminal::{Backend, CrosstermBackend, TestBackend};
