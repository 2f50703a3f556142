//! Layout module: rectangle geometry and clipping.
//!
//! Drawing coordinates are signed so callers can place content partly
//! off-screen; [`Rect::clip`] turns them into in-bounds cell ranges.

mod rect;

pub use rect::{ClippedRect, Rect};
