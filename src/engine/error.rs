//! Engine errors.

use super::Phase;
use std::io;
use thiserror::Error;

/// Errors returned by [`Engine`](super::Engine) operations.
///
/// Lifecycle violations are caller bugs and are always surfaced, never
/// retried. Out-of-bounds drawing and malformed styled text are not errors
/// at all; they are clipped and rendered literally.
#[derive(Debug, Error)]
pub enum EngineError {
    /// An operation was called outside the phase it requires.
    #[error("`{operation}` is not allowed while the engine is {phase}")]
    InvalidState {
        /// The rejected operation.
        operation: &'static str,
        /// The phase the engine was in.
        phase: Phase,
    },

    /// `initialize` was called twice without `cleanup` in between.
    #[error("engine is already initialized")]
    AlreadyInitialized,

    /// The operation needs an initialized engine.
    #[error("engine is not initialized")]
    NotInitialized,

    /// Writing to or configuring the terminal failed.
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
}

impl EngineError {
    /// Check whether this is a lifecycle violation.
    pub const fn is_state_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidState { .. } | Self::AlreadyInitialized | Self::NotInitialized
        )
    }
}
