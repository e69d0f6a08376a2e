// SPDX-License-Identifier: GPL-3.0-only

//! One-shot shift state.
//!
//! Shift applies to exactly one subsequent letter. Pressing shift toggles it;
//! committing a letter consumes it; losing focus resets it.
//!
//! # Example
//!
//! ```rust,ignore
//! use coderskey::input::ShiftState;
//!
//! let mut shift = ShiftState::new();
//! shift.toggle();
//!
//! // The next letter sees shift, the one after does not.
//! assert!(shift.consume_and_reset());
//! assert!(!shift.consume_and_reset());
//! ```

/// Tracks whether the next letter should be upper-cased.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShiftState {
    active: bool,
}

impl ShiftState {
    /// Creates an inactive shift state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips shift on or off.
    ///
    /// # Returns
    ///
    /// `true` if shift is now active
    pub fn toggle(&mut self) -> bool {
        self.active = !self.active;
        self.active
    }

    /// Returns the current value and leaves shift inactive.
    ///
    /// Called once per letter insertion, so shift never outlives the letter
    /// it applied to.
    pub fn consume_and_reset(&mut self) -> bool {
        std::mem::take(&mut self.active)
    }

    /// Deactivates shift. Idempotent.
    pub fn reset(&mut self) {
        self.active = false;
    }

    /// Checks if shift is active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_inactive() {
        assert!(!ShiftState::new().is_active());
    }

    #[test]
    fn test_toggle_flips() {
        let mut shift = ShiftState::new();
        assert!(shift.toggle());
        assert!(shift.is_active());
        assert!(!shift.toggle());
        assert!(!shift.is_active());
    }

    #[test]
    fn test_consume_is_one_shot() {
        let mut shift = ShiftState::new();
        shift.toggle();

        assert!(shift.consume_and_reset());
        assert!(!shift.is_active());
        assert!(!shift.consume_and_reset());
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut shift = ShiftState::new();
        shift.toggle();
        shift.reset();
        shift.reset();
        assert!(!shift.is_active());
    }

    #[test]
    fn test_every_toggle_consume_sequence_leaves_shift_inactive_after_consume() {
        const MAX_LEN: u32 = 10;

        // Bit i of `pattern` picks the i-th call: 1 toggles, 0 consumes.
        for len in 0..=MAX_LEN {
            for pattern in 0..(1u32 << len) {
                let mut shift = ShiftState::new();
                let mut expected = false;

                for step in 0..len {
                    if pattern & (1 << step) != 0 {
                        expected = !expected;
                        assert_eq!(shift.toggle(), expected);
                    } else {
                        assert_eq!(
                            shift.consume_and_reset(),
                            expected,
                            "pattern {pattern:b} step {step}"
                        );
                        expected = false;
                        assert!(!shift.is_active(), "pattern {pattern:b} step {step}");
                    }
                }
            }
        }
    }
}
