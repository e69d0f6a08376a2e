// SPDX-License-Identifier: GPL-3.0-only

//! Keyboard controller.
//!
//! The controller owns the layout, the shift and readiness state, the
//! long-press picker and the render overlay, and turns key events into
//! calls on a [`TextSink`]. Time is passed in with every pointer event so
//! the long-press threshold is deterministic.
//!
//! # Event flow
//!
//! ```text
//! key_down ──> pending press ──long_press_tick──> picker open
//!                  │                                  │
//!               key_up                          pointer_moved / key_up
//!                  │                                  │
//!              commit(key)                  insert_text(alternate)
//! ```
//!
//! Every emission goes through the readiness gate. While not ready, only
//! the next-input-mode key reaches the host.

use std::time::{Duration, Instant};

use crate::input::{HostCommand, ReadinessGate, ShiftState, TextSink};
use crate::layout::{KeyId, KeyKind, KeyLayout, KeyboardGeometry, Point};
use crate::picker::{LongPressPicker, Resolution};
use crate::renderer::state::{RenderState, LONG_PRESS_THRESHOLD_MS};

/// A press that has not been released yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingPress {
    /// The pressed key
    pub key: KeyId,
    /// When the pointer went down
    pub started: Instant,
    /// Whether the long-press threshold has already fired
    pub long_press: bool,
}

/// Dispatches key events to a host.
#[derive(Debug)]
pub struct KeyboardController<S: TextSink> {
    layout: KeyLayout,
    geometry: KeyboardGeometry,
    sink: S,
    shift: ShiftState,
    readiness: ReadinessGate,
    picker: LongPressPicker,
    render: RenderState,
    enabled: bool,
    pending: Option<PendingPress>,
    long_press_threshold: Duration,
}

impl<S: TextSink> KeyboardController<S> {
    /// Creates a controller. It starts enabled but not ready: nothing
    /// reaches `sink` until [`attach`](Self::attach) is called.
    pub fn new(layout: KeyLayout, sink: S) -> Self {
        Self {
            layout,
            geometry: KeyboardGeometry::default(),
            sink,
            shift: ShiftState::new(),
            readiness: ReadinessGate::new(),
            picker: LongPressPicker::new(),
            render: RenderState::new(),
            enabled: true,
            pending: None,
            long_press_threshold: Duration::from_millis(LONG_PRESS_THRESHOLD_MS),
        }
    }

    /// Overrides the long-press threshold.
    #[must_use]
    pub fn with_long_press_threshold(mut self, threshold: Duration) -> Self {
        self.long_press_threshold = threshold;
        self
    }

    /// Changes the long-press threshold.
    pub fn set_long_press_threshold(&mut self, threshold: Duration) {
        self.long_press_threshold = threshold;
    }

    /// The current long-press threshold.
    #[must_use]
    pub fn long_press_threshold(&self) -> Duration {
        self.long_press_threshold
    }

    // ------------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------------

    /// Marks the host as attached. Idempotent.
    pub fn attach(&mut self) {
        if !self.readiness.is_ready() {
            tracing::info!("Host attached, keyboard ready");
        }
        self.readiness.set_ready(true);
    }

    /// Marks the host as detached and drops any interaction in flight.
    pub fn detach(&mut self) {
        tracing::info!("Host detached, keyboard not ready");
        self.readiness.set_ready(false);
        self.abort_interaction();
    }

    /// Tears down after memory pressure. Like [`detach`](Self::detach); the
    /// host must [`attach`](Self::attach) again before input flows.
    pub fn reclaim(&mut self) {
        tracing::warn!("Reclaiming keyboard state after memory pressure");
        self.readiness.set_ready(false);
        self.abort_interaction();
    }

    /// The keyboard lost focus: shift is reset, readiness is untouched.
    pub fn focus_lost(&mut self) {
        self.shift.reset();
        self.sync_render();
    }

    /// Checks if the host is attached.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.readiness.is_ready()
    }

    /// Locks or unlocks every key. Disabling resets shift and drops any
    /// press or popup in flight; enabling restores nothing.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.shift.reset();
            self.abort_interaction();
        }
        self.render.set_all_enabled(enabled);
        self.sync_render();
    }

    /// Checks if keys accept input.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Recomputes key frames for a new container size. An open popup is
    /// cancelled since its anchor moved.
    pub fn set_container_size(&mut self, width: f32, height: f32) {
        if (self.geometry.width(), self.geometry.height()) == (width, height) {
            return;
        }
        self.geometry = KeyboardGeometry::compute(&self.layout, width, height);
        if self.picker.cancel() {
            self.abort_interaction();
        }
    }

    /// Replaces the layout. Shift and readiness are kept.
    pub fn set_layout(&mut self, layout: KeyLayout) {
        self.abort_interaction();
        self.geometry =
            KeyboardGeometry::compute(&layout, self.geometry.width(), self.geometry.height());
        self.layout = layout;
    }

    // ------------------------------------------------------------------------
    // Pointer events
    // ------------------------------------------------------------------------

    /// The pointer went down on `id`.
    pub fn key_down(&mut self, id: KeyId, now: Instant) {
        if self.layout.key(id).is_none() {
            return;
        }
        if !self.enabled {
            tracing::debug!("Key {} is disabled, ignoring press", id);
            return;
        }

        self.picker.cancel();
        self.render.clear_highlights();
        self.render.set_highlighted(id, true);
        self.pending = Some(PendingPress {
            key: id,
            started: now,
            long_press: false,
        });
    }

    /// Opens the picker once a press on a key with alternates has been held
    /// past the threshold.
    ///
    /// # Returns
    ///
    /// `true` if this tick opened the popup
    pub fn long_press_tick(&mut self, now: Instant) -> bool {
        let Some(pending) = self.pending.as_mut() else {
            return false;
        };
        if pending.long_press
            || now.saturating_duration_since(pending.started) < self.long_press_threshold
        {
            return false;
        }

        let Some(key) = self.layout.key(pending.key) else {
            return false;
        };
        if !key.has_alternates {
            return false;
        }
        if !self.readiness.is_ready() {
            tracing::debug!("Keyboard not ready, long press on {} ignored", key.id());
            return false;
        }

        pending.long_press = true;
        let anchor = self.geometry.frame(key.id()).unwrap_or_default();
        self.picker.begin(
            key,
            anchor,
            self.layout.alternates_for(&key.symbol),
            self.geometry.width(),
        )
    }

    /// The pointer moved. Updates the hovered alternate while the picker
    /// is open.
    pub fn pointer_moved(&mut self, point: Point) -> Option<usize> {
        self.picker.update_hover(point)
    }

    /// The pointer was released at `point`.
    ///
    /// With the picker open, the alternate under the pointer is committed.
    /// Otherwise the pressed key is committed if the pointer is still on it.
    pub fn key_up(&mut self, point: Point, now: Instant) {
        self.long_press_tick(now);

        let Some(pending) = self.pending.take() else {
            return;
        };
        self.render.clear_highlights();

        if self.picker.is_open() {
            if let Resolution::Committed(symbol) = self.picker.resolve(point) {
                self.emit(HostCommand::InsertText(symbol));
            }
            return;
        }
        if pending.long_press {
            return;
        }

        let released_on_key = self.geometry.frame(pending.key).is_none()
            || self.geometry.key_at(point) == Some(pending.key);
        if released_on_key {
            self.commit(pending.key);
        } else {
            tracing::debug!("Released outside {}, press dropped", pending.key);
        }
    }

    /// The gesture was interrupted. Nothing is emitted.
    pub fn pointer_cancelled(&mut self) {
        self.abort_interaction();
    }

    /// Commits `id` directly, without long-press handling.
    pub fn tap(&mut self, id: KeyId) {
        if !self.enabled {
            tracing::debug!("Key {} is disabled, ignoring tap", id);
            return;
        }
        self.commit(id);
    }

    // ------------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------------

    /// The layout.
    #[must_use]
    pub fn layout(&self) -> &KeyLayout {
        &self.layout
    }

    /// Key frames for the current container size.
    #[must_use]
    pub fn geometry(&self) -> &KeyboardGeometry {
        &self.geometry
    }

    /// The alternate picker.
    #[must_use]
    pub fn picker(&self) -> &LongPressPicker {
        &self.picker
    }

    /// The render overlay.
    #[must_use]
    pub fn render_state(&self) -> &RenderState {
        &self.render
    }

    /// Checks if shift is active.
    #[must_use]
    pub fn shift_active(&self) -> bool {
        self.shift.is_active()
    }

    /// The press awaiting release, if any.
    #[must_use]
    pub fn pending_press(&self) -> Option<&PendingPress> {
        self.pending.as_ref()
    }

    /// Checks if the long-press timer should keep ticking.
    #[must_use]
    pub fn has_pending_long_press(&self) -> bool {
        self.pending.is_some_and(|pending| {
            !pending.long_press
                && self
                    .layout
                    .key(pending.key)
                    .is_some_and(|key| key.has_alternates)
        })
    }

    /// The host.
    #[must_use]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// The host, mutably.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    // ------------------------------------------------------------------------
    // Dispatch
    // ------------------------------------------------------------------------

    fn commit(&mut self, id: KeyId) {
        let Some(key) = self.layout.key(id) else {
            return;
        };

        if !self.readiness.is_ready() && key.kind != KeyKind::NextInputMode {
            tracing::debug!("Keyboard not ready, dropping {}", id);
            return;
        }

        let command = match key.kind {
            KeyKind::Shift => {
                let active = self.shift.toggle();
                tracing::debug!("Shift {}", if active { "on" } else { "off" });
                self.sync_render();
                return;
            }
            KeyKind::Letter => {
                let text = if self.shift.consume_and_reset() {
                    key.symbol.to_uppercase()
                } else {
                    key.symbol.clone()
                };
                HostCommand::InsertText(text)
            }
            KeyKind::Symbol => HostCommand::InsertText(key.symbol.clone()),
            KeyKind::Space => HostCommand::InsertText(" ".to_string()),
            KeyKind::Backspace => HostCommand::DeleteBackward,
            KeyKind::CursorLeft => HostCommand::MoveCursor(-1),
            KeyKind::CursorRight => HostCommand::MoveCursor(1),
            KeyKind::Return => HostCommand::InsertReturn,
            KeyKind::NextInputMode => HostCommand::SwitchToNextInputMode,
        };

        self.emit(command);
        self.sync_render();
    }

    fn emit(&mut self, command: HostCommand) {
        if !self.readiness.is_ready() && command != HostCommand::SwitchToNextInputMode {
            tracing::debug!("Keyboard not ready, dropping {:?}", command);
            return;
        }
        tracing::trace!("Emitting {:?}", command);
        command.apply_to(&mut self.sink);
    }

    fn abort_interaction(&mut self) {
        self.picker.cancel();
        self.pending = None;
        self.render.clear_highlights();
    }

    fn sync_render(&mut self) {
        self.render.set_shift_active(self.shift.is_active());
    }
}

// ============================================================================
// Tests
// ============================================================================
