// SPDX-License-Identifier: GPL-3.0-only

use crate::app_settings;
use cosmic::cosmic_config;
use cosmic::cosmic_config::{cosmic_config_derive::CosmicConfigEntry, CosmicConfigEntry};

/// Window state that persists between application runs.
#[derive(Debug, Clone, CosmicConfigEntry, PartialEq)]
#[version = 1]
pub struct WindowState {
    /// Window width.
    pub width: f32,
    /// Window height.
    pub height: f32,
}

impl Default for WindowState {
    fn default() -> Self {
        Self {
            width: app_settings::DEFAULT_WIDTH,
            height: app_settings::DEFAULT_HEIGHT,
        }
    }
}

impl WindowState {
    /// Size left for the keys once the preview strip is taken off.
    #[must_use]
    pub fn keyboard_size(&self) -> (f32, f32) {
        (
            self.width.max(0.0),
            (self.height - app_settings::PREVIEW_HEIGHT).max(0.0),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_dimensions() {
        let state = WindowState::default();
        assert_eq!(state.width, app_settings::DEFAULT_WIDTH);
        assert_eq!(state.height, app_settings::DEFAULT_HEIGHT);
    }

    #[test]
    fn test_keyboard_size_excludes_preview() {
        let state = WindowState {
            width: 320.0,
            height: 300.0,
        };
        assert_eq!(state.keyboard_size(), (320.0, 300.0 - app_settings::PREVIEW_HEIGHT));

        let tiny = WindowState {
            width: 10.0,
            height: 10.0,
        };
        assert_eq!(tiny.keyboard_size(), (10.0, 0.0));
    }
}
