//! Terminal module: the I/O boundary of the renderer.

mod backend;

pub use backend::{Backend, CrosstermBackend, TestBackend};
