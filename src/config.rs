// SPDX-License-Identifier: GPL-3.0-only

use std::time::Duration;

use cosmic::cosmic_config;
use cosmic::cosmic_config::{cosmic_config_derive::CosmicConfigEntry, CosmicConfigEntry};

use crate::app_settings;
use crate::renderer::state::LONG_PRESS_THRESHOLD_MS;

/// User configuration that persists between application runs.
#[derive(Debug, Clone, CosmicConfigEntry, Eq, PartialEq)]
#[version = 1]
pub struct Config {
    /// How long a key must be held before its alternates pop up.
    pub long_press_ms: u64,
    /// Adds the next-input-mode key to the action row.
    pub show_input_mode_key: bool,
    /// Custom layout JSON. Empty means the built-in layout.
    pub layout_path: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            long_press_ms: LONG_PRESS_THRESHOLD_MS,
            show_input_mode_key: false,
            layout_path: String::new(),
        }
    }
}

impl Config {
    /// Long press threshold, raised to the accepted minimum.
    #[must_use]
    pub fn long_press_threshold(&self) -> Duration {
        Duration::from_millis(self.long_press_ms.max(app_settings::MIN_LONG_PRESS_MS))
    }

    /// The custom layout file, if one is configured.
    #[must_use]
    pub fn layout_file(&self) -> Option<&str> {
        let trimmed = self.layout_path.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_threshold() {
        let config = Config::default();
        assert_eq!(
            config.long_press_threshold(),
            Duration::from_millis(LONG_PRESS_THRESHOLD_MS)
        );
        assert!(config.layout_file().is_none());
    }

    #[test]
    fn test_threshold_is_clamped() {
        let config = Config {
            long_press_ms: 5,
            ..Config::default()
        };
        assert_eq!(config.long_press_threshold(), Duration::from_millis(100));
    }

    #[test]
    fn test_layout_path_is_trimmed() {
        let config = Config {
            layout_path: "  /tmp/coders.json ".to_string(),
            ..Config::default()
        };
        assert_eq!(config.layout_file(), Some("/tmp/coders.json"));
    }
}
