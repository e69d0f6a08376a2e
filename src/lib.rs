// SPDX-License-Identifier: GPL-3.0-only

//! CodersKey - a soft keyboard for typing programming symbols
//!
//! The keyboard puts digits, operators, brackets and quotes one tap away
//! above a compact alphabet, with long-press alternates for the keys that
//! need them.
//!
//! # Architecture
//!
//! The interaction core is plain state machines driven by pointer events
//! with explicit timestamps, so it runs and tests without a display:
//!
//! - `layout`: the key layout model, JSON loading and key geometry
//! - `input`: one-shot shift, the readiness gate, the `TextSink` host
//!   interface and the hosts shipped with the crate
//! - `picker`: the long-press alternate picker
//! - `controller`: the dispatcher tying the above together
//!
//! The COSMIC application around it:
//!
//! - `app`: main application model and COSMIC Application trait implementation
//! - `renderer`: keys, rows and the picker popup as libcosmic widgets
//! - `app_settings`: centralized application constants
//! - `config`: user configuration with cosmic_config persistence
//! - `state`: window size persistence
//! - `i18n`: localization support using fluent translations

pub mod app;
pub mod app_settings;
pub mod config;
pub mod controller;
pub mod i18n;
pub mod input;
pub mod layout;
pub mod picker;
pub mod renderer;
pub mod state;

pub use crate::controller::KeyboardController;
pub use crate::i18n::LANGUAGE_LOADER;

// ============================================================================
// Integration Tests
// ============================================================================

#[cfg(test)]
mod integration_tests {
    use std::time::{Duration, Instant};

    use crate::controller::KeyboardController;
    use crate::input::{Document, HostCommand};
    use crate::layout::{parse_layout_from_string, KeyLayout, KeyboardGeometry, Point};

    fn center_of(geometry: &KeyboardGeometry, layout: &KeyLayout, symbol: &str) -> Point {
        let key = layout.find(symbol).unwrap();
        geometry.frame(key.id()).unwrap().center()
    }

    /// Typing through taps, shift and cursor keys lands in the document.
    #[test]
    fn test_typing_session_into_document() {
        let layout = KeyLayout::coders();
        let mut controller = KeyboardController::new(layout.clone(), Document::new());
        controller.set_container_size(320.0, 300.0);
        controller.attach();

        let tap = |controller: &mut KeyboardController<Document>, symbol: &str| {
            let id = controller.layout().find(symbol).unwrap().id();
            controller.tap(id);
        };

        tap(&mut controller, "⇧");
        for symbol in ["f", "n", "("] {
            tap(&mut controller, symbol);
        }
        tap(&mut controller, ")");
        tap(&mut controller, "←");
        tap(&mut controller, "x");
        tap(&mut controller, "⏎");

        assert_eq!(controller.sink().text(), "Fn(x\n)");
        assert!(!controller.shift_active());
    }

    /// A long press resolved over an alternate is typed into the document.
    #[test]
    fn test_long_press_alternate_reaches_document() {
        let layout = KeyLayout::coders();
        let mut controller = KeyboardController::new(layout.clone(), Document::new());
        controller.set_container_size(320.0, 300.0);
        controller.attach();

        let dot = layout.find(".").unwrap().id();
        let start = Instant::now();
        controller.key_down(dot, start);
        assert!(controller.long_press_tick(start + Duration::from_millis(350)));

        let first_cell = controller.picker().session().unwrap().cell_frame(0).unwrap();
        controller.pointer_moved(first_cell.center());
        controller.key_up(first_cell.center(), start + Duration::from_millis(500));

        assert_eq!(controller.sink().text(), ";");
        assert_eq!(controller.sink().cursor(), 1);
        assert!(!controller.picker().is_open());
    }

    /// A press released on its own key commits it, even via a loaded layout.
    #[test]
    fn test_loaded_layout_press_and_release() {
        let json = r#"{
            "name": "Minimal",
            "symbolic": [["=", ">"]],
            "alphabetic": [["a"]],
            "actions": [[{"action": "space"}, {"action": "return"}]],
            "alternates": {"=": ["==", "=>"]}
        }"#;
        let layout = parse_layout_from_string(json).unwrap().into_layout();
        let mut controller = KeyboardController::new(layout.clone(), Vec::<HostCommand>::new());
        controller.set_container_size(200.0, 200.0);
        controller.attach();

        let geometry = controller.geometry().clone();
        let gt = layout.find(">").unwrap().id();
        let now = Instant::now();
        controller.key_down(gt, now);
        controller.key_up(center_of(&geometry, &layout, ">"), now);

        assert_eq!(controller.sink(), &vec![HostCommand::InsertText(">".to_string())]);
    }
}
