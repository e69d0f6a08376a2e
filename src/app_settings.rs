// SPDX-License-Identifier: GPL-3.0-only

//! Centralized application settings and constants.

/// Application ID in RDNN (reverse domain name notation) format.
pub const APP_ID: &str = "io.github.coderskey.CodersKey";

/// Default window width in pixels.
pub const DEFAULT_WIDTH: f32 = 390.0;

/// Default window height in pixels.
pub const DEFAULT_HEIGHT: f32 = 380.0;

/// Minimum window width in pixels.
pub const MIN_WIDTH: f32 = 320.0;

/// Minimum window height in pixels.
pub const MIN_HEIGHT: f32 = 300.0;

/// Height of the document preview above the keys.
pub const PREVIEW_HEIGHT: f32 = 72.0;

/// Shortest long press threshold accepted from configuration.
pub const MIN_LONG_PRESS_MS: u64 = 100;
