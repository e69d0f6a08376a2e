// SPDX-License-Identifier: GPL-3.0-only

//! Readiness gate.
//!
//! Key actions are only forwarded once a host is attached. The gate is
//! raised on attachment and forced down on teardown or memory reclaim.

/// Boolean guard checked before every user-triggered key action.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReadinessGate {
    ready: bool,
}

impl ReadinessGate {
    /// Creates a closed gate.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens or closes the gate. Idempotent.
    pub fn set_ready(&mut self, ready: bool) {
        self.ready = ready;
    }

    /// Checks if key actions may reach the host.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.ready
    }
}
