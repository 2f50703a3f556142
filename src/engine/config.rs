//! Engine configuration.

use std::time::Duration;

/// Configuration for the [`Engine`](super::Engine).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Whether to use the alternate screen buffer.
    pub alternate_screen: bool,
    /// Whether to hide the cursor while the engine is initialized.
    pub hide_cursor: bool,
    /// Whether the backend should put the terminal in raw mode.
    pub raw_mode: bool,
    /// Wrap each non-empty frame in synchronized-output markers.
    pub synchronized_output: bool,
    /// Size used when the terminal reports an error or a zero dimension.
    pub fallback_size: (u16, u16),
    /// Initial capacity of the per-frame output buffer.
    pub output_capacity: usize,
    /// Maximum entries per sequence-cache table.
    pub cache_capacity: usize,
    /// Frames slower than this are logged at debug level.
    pub slow_frame: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            alternate_screen: false,
            hide_cursor: true,
            raw_mode: false,
            synchronized_output: false,
            fallback_size: (80, 24),
            output_capacity: 65536,
            cache_capacity: 4096,
            slow_frame: Duration::from_millis(16),
        }
    }
}

impl EngineConfig {
    /// Defaults overlaid with `CELLFRAME_ALT_SCREEN` and
    /// `CELLFRAME_SYNC_OUTPUT` from the environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(on) = lookup("CELLFRAME_ALT_SCREEN").as_deref().and_then(parse_flag) {
            config.alternate_screen = on;
        }
        if let Some(on) = lookup("CELLFRAME_SYNC_OUTPUT").as_deref().and_then(parse_flag) {
            config.synchronized_output = on;
        }
        config
    }

    /// Set `alternate_screen` (builder pattern).
    #[must_use]
    pub const fn with_alternate_screen(mut self, on: bool) -> Self {
        self.alternate_screen = on;
        self
    }

    /// Set `hide_cursor` (builder pattern).
    #[must_use]
    pub const fn with_hide_cursor(mut self, on: bool) -> Self {
        self.hide_cursor = on;
        self
    }

    /// Set `raw_mode` (builder pattern).
    #[must_use]
    pub const fn with_raw_mode(mut self, on: bool) -> Self {
        self.raw_mode = on;
        self
    }

    /// Set `synchronized_output` (builder pattern).
    #[must_use]
    pub const fn with_synchronized_output(mut self, on: bool) -> Self {
        self.synchronized_output = on;
        self
    }

    /// Set `fallback_size` (builder pattern). Zero dimensions become 1.
    #[must_use]
    pub fn with_fallback_size(mut self, width: u16, height: u16) -> Self {
        self.fallback_size = (width.max(1), height.max(1));
        self
    }

    /// Set `cache_capacity` (builder pattern).
    #[must_use]
    pub const fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = capacity;
        self
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert!(!config.alternate_screen);
        assert!(config.hide_cursor);
        assert_eq!(config.fallback_size, (80, 24));
    }

    #[test]
    fn test_builder() {
        let config = EngineConfig::default()
            .with_alternate_screen(true)
            .with_synchronized_output(true)
            .with_fallback_size(0, 10);
        assert!(config.alternate_screen);
        assert!(config.synchronized_output);
        assert_eq!(config.fallback_size, (1, 10));
    }

    #[test]
    fn test_env_overlay() {
        let config = EngineConfig::from_lookup(|key| match key {
            "CELLFRAME_ALT_SCREEN" => Some("Yes".to_string()),
            "CELLFRAME_SYNC_OUTPUT" => Some("maybe".to_string()),
            _ => None,
        });
        assert!(config.alternate_screen);
        assert!(!config.synchronized_output);
    }
}
