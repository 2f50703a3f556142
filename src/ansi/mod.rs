//! ANSI codec: the one wire protocol the renderer speaks in both directions.
//!
//! - [`encode`]: control sequences written to the terminal at frame end.
//! - [`decode`]: the embedded-SGR mini-language callers use in styled text.
//! - [`cache`]: memoized encoder output, owned by the renderer.

pub mod cache;
pub mod decode;
pub mod encode;

pub use cache::SequenceCache;
pub use decode::{decode, decode_with, strip, visible_len};
pub use encode::styled;
