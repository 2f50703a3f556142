//! Buffer module: Core data structures for the double-buffer rendering system.
//!
//! This module contains:
//! - [`Cell`]: One glyph, its [`Style`] and a dirty flag
//! - [`Buffer`]: A grid of cells representing the terminal screen
//! - [`Rgb`]: True-color representation
//! - [`Modifiers`]: Text attribute bitflags
//! - [`diff`]: Run-based diff producing minimal ANSI output

mod cell;
#[allow(clippy::module_inception)]
mod buffer;
pub mod diff;

pub use cell::{Cell, CellFlags, Modifiers, Rgb, Style};
pub use buffer::Buffer;
