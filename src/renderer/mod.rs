// SPDX-License-Identifier: GPL-3.0-only

//! Keyboard rendering for CodersKey.
//!
//! This module turns the controller's layout, key frames and presentation
//! overlay into libcosmic widgets.
//!
//! # Architecture
//!
//! - **state**: the per-key presentation overlay (`RenderState`) and the
//!   long press timing constants.
//! - **theme**: light/dark palettes and key colour categories.
//! - **key**: a single key, reporting presses through `mouse_area`.
//! - **keyboard**: all rows, placed from `KeyboardGeometry`.
//! - **popup**: the alternate picker overlay.
//! - **message**: messages emitted by the widgets.
//!
//! # Usage
//!
//! ```rust,ignore
//! use coderskey::renderer::{colors_for, render_keyboard, Appearance};
//!
//! let palette = colors_for(Appearance::Dark);
//! let element = render_keyboard(
//!     controller.layout(),
//!     controller.geometry(),
//!     controller.render_state(),
//!     &palette,
//! );
//! ```

pub mod key;
pub mod keyboard;
pub mod message;
pub mod popup;
pub mod state;
pub mod theme;

pub use key::{display_label, render_key};
pub use keyboard::render_keyboard;
pub use message::RendererMessage;
pub use popup::{render_popup, render_popup_layer};
pub use state::{KeyOverlay, RenderState, LONG_PRESS_THRESHOLD_MS, LONG_PRESS_TIMER_INTERVAL_MS};
pub use theme::{
    appearance_of, category_for, colors_for, key_background, symbol_category, Appearance,
    KeyCategory, Palette,
};
