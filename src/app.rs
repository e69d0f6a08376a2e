// SPDX-License-Identifier: GPL-3.0-only

use std::time::{Duration, Instant};

use crate::app_settings;
use crate::config::Config;
use crate::controller::KeyboardController;
use crate::fl;
use crate::input::{Document, TextSink};
use crate::layout::{parse_layout_file, KeyLayout, LayoutDefinition, Point};
use crate::renderer::{
    appearance_of, colors_for, render_keyboard, render_popup_layer, RendererMessage,
    LONG_PRESS_TIMER_INTERVAL_MS,
};
use crate::state::WindowState;
use cosmic::cosmic_config::{self, CosmicConfigEntry};
use cosmic::iced::widget::Stack;
use cosmic::iced::{event, mouse, window, Event, Length, Subscription};
use cosmic::prelude::*;
use cosmic::widget::{self, container};

/// The application model stores app-specific state used to describe its interface and
/// drive its logic.
pub struct AppModel {
    /// Application state which is managed by the COSMIC runtime.
    core: cosmic::Core,
    /// Configuration data that persists between application runs.
    config: Config,
    /// Window size that persists between runs.
    window_state: WindowState,
    /// Config handle for state persistence.
    state_config: Option<cosmic_config::Config>,
    /// The keyboard itself, typing into the on-screen preview.
    controller: KeyboardController<Document>,
    /// Last pointer position, in window coordinates.
    cursor: cosmic::iced::Point,
}

/// Messages emitted by the application and its widgets.
#[derive(Debug, Clone)]
pub enum Message {
    /// A keyboard widget reported an event.
    Keyboard(RendererMessage),
    /// The pointer moved inside the window.
    PointerMoved(cosmic::iced::Point),
    /// The primary button was released.
    PointerReleased,
    /// The window gained or lost focus, or was closed.
    Lifecycle(WindowLifecycle),
    /// Long press timer fired.
    LongPressTick,
    /// Configuration has been updated.
    UpdateConfig(Config),
}

/// Create a COSMIC application from the app model
impl cosmic::Application for AppModel {
    /// The async executor that will be used to run your application's commands.
    type Executor = cosmic::executor::Default;

    /// Data that your application receives to its init method.
    type Flags = ();

    /// Messages which the application and its widgets will emit.
    type Message = Message;

    /// Unique identifier in RDNN (reverse domain name notation) format.
    const APP_ID: &'static str = app_settings::APP_ID;

    fn core(&self) -> &cosmic::Core {
        &self.core
    }

    fn core_mut(&mut self) -> &mut cosmic::Core {
        &mut self.core
    }

    /// Initializes the application with any given flags and startup commands.
    fn init(
        mut core: cosmic::Core,
        _flags: Self::Flags,
    ) -> (Self, Task<cosmic::Action<Self::Message>>) {
        // Load configuration
        let config = cosmic_config::Config::new(Self::APP_ID, Config::VERSION)
            .map(|context| match Config::get_entry(&context) {
                Ok(config) => config,
                Err((_errors, config)) => config,
            })
            .unwrap_or_default();

        // Load window state
        let state_config =
            cosmic_config::Config::new_state(Self::APP_ID, WindowState::VERSION).ok();
        let window_state = state_config
            .as_ref()
            .map(|context| match WindowState::get_entry(context) {
                Ok(state) => state,
                Err((_errors, state)) => state,
            })
            .unwrap_or_default();

        // Pointer coordinates are taken relative to the window content
        core.window.show_headerbar = false;

        let mut controller = KeyboardController::new(load_layout(&config), Document::new())
            .with_long_press_threshold(config.long_press_threshold());
        let (width, height) = window_state.keyboard_size();
        controller.set_container_size(width, height);
        controller.attach();

        let app = AppModel {
            core,
            config,
            window_state,
            state_config,
            controller,
            cursor: cosmic::iced::Point::ORIGIN,
        };
        (app, Task::none())
    }

    /// Describes the interface based on the current state of the application model.
    fn view(&self) -> Element<'_, Self::Message> {
        let palette = colors_for(appearance_of(&cosmic::theme::active()));

        let document = self.controller.sink();
        let preview_text = if document.is_empty() {
            fl!("preview-placeholder")
        } else {
            let (before, after) = document.split_at_cursor();
            format!("{before}│{after}")
        };
        let preview = container(widget::text::monotext(preview_text))
            .width(Length::Fill)
            .height(Length::Fixed(app_settings::PREVIEW_HEIGHT))
            .padding([8, 12])
            .class(cosmic::style::Container::Card);

        let keyboard = render_keyboard(
            self.controller.layout(),
            self.controller.geometry(),
            self.controller.render_state(),
            &palette,
        )
        .map(Message::Keyboard);

        let base = widget::column::column().push(preview).push(keyboard);

        let mut layers = Stack::<'_, Message, cosmic::Theme, cosmic::Renderer>::new()
            .push(base)
            .width(Length::Fill)
            .height(Length::Fill);
        if let Some(session) = self.controller.picker().session() {
            layers = layers.push(
                render_popup_layer(session, &palette, app_settings::PREVIEW_HEIGHT)
                    .map(Message::Keyboard),
            );
        }

        container(layers)
            .width(Length::Fill)
            .height(Length::Fill)
            .class(cosmic::style::Container::Background)
            .into()
    }

    /// Register subscriptions for this application.
    fn subscription(&self) -> Subscription<Self::Message> {
        let mut subscriptions = vec![];

        // Watch for configuration changes
        let config_subscription = self
            .core()
            .watch_config::<Config>(Self::APP_ID)
            .map(|update| Message::UpdateConfig(update.config));
        subscriptions.push(config_subscription);

        // The press may leave its key before release, so pointer events are
        // taken from the whole window
        subscriptions.push(event::listen_with(|event, _, _id| match event {
            Event::Mouse(mouse::Event::CursorMoved { position }) => {
                Some(Message::PointerMoved(position))
            }
            Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)) => {
                Some(Message::PointerReleased)
            }
            Event::Window(window::Event::Focused) => {
                Some(Message::Lifecycle(WindowLifecycle::Focused))
            }
            Event::Window(window::Event::Unfocused) => {
                Some(Message::Lifecycle(WindowLifecycle::Unfocused))
            }
            Event::Window(window::Event::Closed) => {
                Some(Message::Lifecycle(WindowLifecycle::Closed))
            }
            _ => None,
        }));

        if self.controller.has_pending_long_press() {
            subscriptions.push(
                cosmic::iced::time::every(Duration::from_millis(LONG_PRESS_TIMER_INTERVAL_MS))
                    .map(|_| Message::LongPressTick),
            );
        }

        Subscription::batch(subscriptions)
    }

    /// Handles messages emitted by the application and its widgets.
    fn update(&mut self, message: Self::Message) -> Task<cosmic::Action<Self::Message>> {
        match message {
            Message::Keyboard(RendererMessage::KeyDown(id)) => {
                self.controller.key_down(id, Instant::now());
            }
            Message::PointerMoved(position) => {
                self.cursor = position;
                self.controller.pointer_moved(keyboard_point(position));
            }
            Message::PointerReleased => {
                self.controller
                    .key_up(keyboard_point(self.cursor), Instant::now());
            }
            Message::Lifecycle(event) => {
                apply_lifecycle(&mut self.controller, event);
            }
            Message::LongPressTick => {
                if self.controller.long_press_tick(Instant::now()) {
                    tracing::debug!("Alternate picker opened");
                }
            }
            Message::UpdateConfig(config) => {
                self.apply_config(config);
            }
        }

        Task::none()
    }

    /// Called when a window is resized.
    fn on_window_resize(&mut self, _id: window::Id, width: f32, height: f32) {
        self.window_state.width = width;
        self.window_state.height = height;

        tracing::debug!("on_window_resize: {}x{}", width, height);

        let (keyboard_width, keyboard_height) = self.window_state.keyboard_size();
        self.controller
            .set_container_size(keyboard_width, keyboard_height);

        self.save_state();
    }
}

impl AppModel {
    /// Applies a configuration change, reloading the layout if it is affected.
    fn apply_config(&mut self, config: Config) {
        if config == self.config {
            return;
        }

        self.controller
            .set_long_press_threshold(config.long_press_threshold());

        if config.layout_path != self.config.layout_path
            || config.show_input_mode_key != self.config.show_input_mode_key
        {
            self.controller.set_layout(load_layout(&config));
            tracing::info!("Layout reloaded");
        }

        self.config = config;
    }

    /// Save the current window state to cosmic_config for persistence.
    fn save_state(&self) {
        if let Some(ref state_config) = self.state_config {
            if let Err(err) = self.window_state.write_entry(state_config) {
                tracing::error!("Failed to save window state: {:?}", err);
            } else {
                tracing::debug!(
                    "Window state saved: {}x{}",
                    self.window_state.width,
                    self.window_state.height
                );
            }
        }
    }
}

/// Window events the keyboard reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowLifecycle {
    /// The window came to the front: input may flow again.
    Focused,
    /// Focus moved elsewhere: the gesture in flight and shift are dropped.
    Unfocused,
    /// The window went away: nothing reaches the host until it is focused.
    Closed,
}

/// Drives the controller's readiness from window events.
pub fn apply_lifecycle<S: TextSink>(
    controller: &mut KeyboardController<S>,
    event: WindowLifecycle,
) {
    match event {
        WindowLifecycle::Focused => controller.attach(),
        WindowLifecycle::Unfocused => {
            controller.pointer_cancelled();
            controller.focus_lost();
        }
        WindowLifecycle::Closed => controller.detach(),
    }
}

/// Loads the configured layout, falling back to the built-in one.
pub fn load_layout(config: &Config) -> KeyLayout {
    let builtin = || KeyLayout::from_definition(&LayoutDefinition::coders(config.show_input_mode_key));

    let Some(path) = config.layout_file() else {
        return builtin();
    };

    match parse_layout_file(path) {
        Ok(result) => {
            for warning in &result.warnings {
                tracing::warn!("{}", warning);
            }
            tracing::info!("Loaded layout '{}' from {}", result.layout.name, path);
            result.into_layout()
        }
        Err(e) => {
            tracing::error!("{}", e);
            tracing::warn!("{}", fl!("layout-load-failed", path = path));
            builtin()
        }
    }
}

/// Converts a window position to keyboard coordinates.
fn keyboard_point(position: cosmic::iced::Point) -> Point {
    Point::new(position.x, position.y - app_settings::PREVIEW_HEIGHT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{KeyKind, Section};
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_builtin_layout_by_default() {
        let layout = load_layout(&Config::default());
        assert_eq!(layout.name, "Coders");
        assert!(layout
            .rows(Section::Actions)
            .iter()
            .flatten()
            .all(|key| key.kind != KeyKind::NextInputMode));
    }

    #[test]
    fn test_input_mode_key_from_config() {
        let config = Config {
            show_input_mode_key: true,
            ..Config::default()
        };
        let layout = load_layout(&config);
        assert!(layout
            .rows(Section::Actions)
            .iter()
            .flatten()
            .any(|key| key.kind == KeyKind::NextInputMode));
    }

    #[test]
    fn test_missing_layout_file_falls_back() {
        let config = Config {
            layout_path: "/nonexistent/coderskey/layout.json".to_string(),
            ..Config::default()
        };
        assert_eq!(load_layout(&config).name, "Coders");
    }

    #[test]
    fn test_layout_file_is_loaded() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "name": "Tiny",
                "symbolic": [["1", "2"]],
                "alphabetic": [["a", "b"]],
                "actions": [[{{"action": "space"}}]],
                "alternates": {{}}
            }}"#
        )
        .unwrap();

        let config = Config {
            layout_path: file.path().to_string_lossy().into_owned(),
            ..Config::default()
        };
        let layout = load_layout(&config);
        assert_eq!(layout.name, "Tiny");
        assert_eq!(layout.find("b").unwrap().kind, KeyKind::Letter);
    }

    #[test]
    fn test_window_lifecycle_gates_input() {
        let layout = KeyLayout::coders();
        let a = layout.find("a").unwrap().id();
        let shift = layout.find("⇧").unwrap().id();
        let mut controller = KeyboardController::new(layout, Document::new());

        apply_lifecycle(&mut controller, WindowLifecycle::Focused);
        assert!(controller.is_ready());
        controller.tap(a);
        assert_eq!(controller.sink().text(), "a");

        controller.tap(shift);
        apply_lifecycle(&mut controller, WindowLifecycle::Unfocused);
        assert!(controller.is_ready());
        assert!(!controller.shift_active());

        apply_lifecycle(&mut controller, WindowLifecycle::Closed);
        assert!(!controller.is_ready());
        controller.tap(a);
        assert_eq!(controller.sink().text(), "a");

        apply_lifecycle(&mut controller, WindowLifecycle::Focused);
        controller.tap(a);
        assert_eq!(controller.sink().text(), "aa");
    }

    #[test]
    fn test_keyboard_point_offsets_preview() {
        let point = keyboard_point(cosmic::iced::Point::new(40.0, 100.0));
        assert_eq!(point, Point::new(40.0, 100.0 - app_settings::PREVIEW_HEIGHT));
    }
}
