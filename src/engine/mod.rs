//! Engine module: the render lifecycle.
//!
//! - [`Engine`]: owns the front/back buffers and drives the frame cycle
//! - [`Phase`]: where an engine is in its lifecycle
//! - [`EngineConfig`]: terminal setup and buffer tuning
//! - [`EngineError`]: lifecycle and I/O failures
//! - [`PerformanceStats`]: counters for diagnostics

mod config;
#[allow(clippy::module_inception)]
mod engine;
mod error;
mod stats;

pub use config::EngineConfig;
pub use engine::{Engine, Phase};
pub use error::EngineError;
pub use stats::PerformanceStats;
