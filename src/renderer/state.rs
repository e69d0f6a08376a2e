// SPDX-License-Identifier: GPL-3.0-only

//! Presentation overlay for the keyboard.
//!
//! The layout is immutable; everything that changes how a key looks
//! (enabled, highlighted, shift-aware label) lives here, keyed by
//! [`KeyId`].

use std::collections::BTreeSet;

use crate::layout::{Key, KeyId, KeyKind};

/// Long press detection threshold in milliseconds.
///
/// A press on a key with alternates held at least this long opens the
/// alternate picker.
pub const LONG_PRESS_THRESHOLD_MS: u64 = 300;

/// Timer tick interval for long press detection in milliseconds.
///
/// The long press timer emits ticks at this interval while a press is
/// pending so the threshold is noticed without waiting for release.
pub const LONG_PRESS_TIMER_INTERVAL_MS: u64 = 50;

/// Per-key presentation flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyOverlay {
    /// Whether the key accepts input
    pub enabled: bool,
    /// Whether the key is drawn pressed
    pub highlighted: bool,
}

/// Render-state overlay for a whole layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderState {
    enabled: bool,
    highlighted: BTreeSet<KeyId>,
    shift_active: bool,
}

impl Default for RenderState {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderState {
    /// Creates an overlay with every key enabled and nothing highlighted.
    #[must_use]
    pub fn new() -> Self {
        Self {
            enabled: true,
            highlighted: BTreeSet::new(),
            shift_active: false,
        }
    }

    /// Enables or disables every key at once.
    pub fn set_all_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.highlighted.clear();
        }
    }

    /// Draws a key pressed or not.
    pub fn set_highlighted(&mut self, id: KeyId, highlighted: bool) {
        if highlighted {
            self.highlighted.insert(id);
        } else {
            self.highlighted.remove(&id);
        }
    }

    /// Removes every highlight.
    pub fn clear_highlights(&mut self) {
        self.highlighted.clear();
    }

    /// Mirrors the shift state for labels and the shift key colour.
    pub fn set_shift_active(&mut self, active: bool) {
        self.shift_active = active;
    }

    /// Checks if shift is drawn active.
    #[must_use]
    pub fn shift_active(&self) -> bool {
        self.shift_active
    }

    /// Checks if keys accept input.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Checks if a key is drawn pressed.
    #[must_use]
    pub fn is_highlighted(&self, id: KeyId) -> bool {
        self.highlighted.contains(&id)
    }

    /// Flags for one key.
    #[must_use]
    pub fn overlay(&self, id: KeyId) -> KeyOverlay {
        KeyOverlay {
            enabled: self.enabled,
            highlighted: self.is_highlighted(id),
        }
    }

    /// The text drawn on a character key. Letters follow shift.
    #[must_use]
    pub fn label(&self, key: &Key) -> String {
        if key.kind == KeyKind::Letter && self.shift_active {
            key.symbol.to_uppercase()
        } else {
            key.symbol.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{KeyLayout, Section};

    #[test]
    fn test_new_overlay_is_enabled() {
        let state = RenderState::new();
        let id = KeyId::new(Section::Symbolic, 0, 0);
        assert_eq!(
            state.overlay(id),
            KeyOverlay {
                enabled: true,
                highlighted: false
            }
        );
    }

    #[test]
    fn test_disable_all_clears_highlights() {
        let mut state = RenderState::new();
        let id = KeyId::new(Section::Alphabetic, 0, 0);
        state.set_highlighted(id, true);
        state.set_all_enabled(false);

        assert!(!state.is_enabled());
        assert!(!state.overlay(id).enabled);
        assert!(!state.is_highlighted(id));

        state.set_all_enabled(true);
        assert!(state.overlay(id).enabled);
    }

    #[test]
    fn test_labels_follow_shift() {
        let layout = KeyLayout::coders();
        let mut state = RenderState::new();
        let q = layout.find("q").unwrap();
        let bracket = layout.find("[").unwrap();

        assert_eq!(state.label(q), "q");
        state.set_shift_active(true);
        assert_eq!(state.label(q), "Q");
        assert_eq!(state.label(bracket), "[");
    }
}
