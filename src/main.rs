// SPDX-License-Identifier: GPL-3.0-only

//! CodersKey Main Application
//!
//! Entry point for the CodersKey soft keyboard window.

use coderskey::{app, app_settings, i18n};
use tracing_subscriber::EnvFilter;

fn main() -> cosmic::iced::Result {
    // Initialize logging
    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = "coderskey=info".parse() {
        filter = filter.add_directive(directive);
    }
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // Get the system's preferred languages.
    let requested_languages = i18n_embed::DesktopLanguageRequester::requested_languages();

    // Enable localizations to be applied.
    i18n::init(&requested_languages);

    // Settings for configuring the application window and iced runtime.
    let settings = cosmic::app::Settings::default()
        .size(cosmic::iced::Size::new(
            app_settings::DEFAULT_WIDTH,
            app_settings::DEFAULT_HEIGHT,
        ))
        .size_limits(
            cosmic::iced::Limits::NONE
                .min_width(app_settings::MIN_WIDTH)
                .min_height(app_settings::MIN_HEIGHT),
        );

    tracing::info!("Starting {}", app_settings::APP_ID);

    // Starts the application's event loop with `()` as the application's flags.
    cosmic::app::run::<app::AppModel>(settings, ())
}
