// SPDX-License-Identifier: GPL-3.0-only

//! Key rendering for the keyboard.
//!
//! Keys are drawn as fixed-size containers wrapped in a `mouse_area`, so the
//! press is reported on pointer down rather than on click, which the long
//! press timer needs.

use cosmic::iced::{Alignment, Background, Border, Color, Length, Shadow};
use cosmic::widget::{self, container, mouse_area};
use cosmic::Element;

use crate::fl;
use crate::layout::{Key, KeyKind, Rectangle};
use crate::renderer::message::RendererMessage;
use crate::renderer::state::RenderState;
use crate::renderer::theme::{key_background, Palette};

/// Corner radius of a key.
pub const KEY_BORDER_RADIUS: f32 = 5.0;

/// Renders a single key at the size of its frame.
///
/// Disabled keys are dimmed and do not report presses.
pub fn render_key<'a>(
    key: &Key,
    frame: Rectangle,
    state: &RenderState,
    palette: &Palette,
) -> Element<'a, RendererMessage> {
    let id = key.id();
    let overlay = state.overlay(id);

    let mut background = key_background(palette, key, state.shift_active(), overlay.enabled);
    if overlay.highlighted {
        background = pressed(background);
    }
    let text_color = if overlay.enabled {
        palette.text
    } else {
        palette.text.scale_alpha(crate::renderer::theme::DISABLED_ALPHA)
    };

    let body = container(widget::text::body(display_label(key, state)))
        .width(Length::Fixed(frame.width))
        .height(Length::Fixed(frame.height))
        .align_x(Alignment::Center)
        .align_y(Alignment::Center)
        .class(cosmic::style::Container::custom(move |_theme| {
            container::Style {
                background: Some(Background::Color(background)),
                border: Border {
                    color: Color::TRANSPARENT,
                    width: 0.0,
                    radius: KEY_BORDER_RADIUS.into(),
                },
                icon_color: Some(text_color),
                text_color: Some(text_color),
                shadow: Shadow::default(),
            }
        }));

    let area = mouse_area(body);
    if overlay.enabled {
        area.on_press(RendererMessage::KeyDown(id)).into()
    } else {
        area.into()
    }
}

/// Text drawn on a key.
///
/// Letters follow shift; space and return carry a word like the rest of
/// the platform's keyboards; other action keys draw their glyph.
#[must_use]
pub fn display_label(key: &Key, state: &RenderState) -> String {
    match key.kind {
        KeyKind::Space => fl!("key-space"),
        KeyKind::Return => fl!("key-return"),
        _ => state.label(key),
    }
}

/// Darkens a background to show it held down.
fn pressed(color: Color) -> Color {
    Color {
        r: color.r * 0.8,
        g: color.g * 0.8,
        b: color.b * 0.8,
        a: color.a,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::KeyLayout;

    #[test]
    fn test_display_labels() {
        let layout = KeyLayout::coders();
        let mut state = RenderState::new();

        let a = layout.find("a").unwrap();
        let shift = layout.find("⇧").unwrap();
        let space = layout.find(" ").unwrap();

        assert_eq!(display_label(a, &state), "a");
        assert_eq!(display_label(shift, &state), "⇧");
        assert_eq!(display_label(space, &state), "space");

        state.set_shift_active(true);
        assert_eq!(display_label(a, &state), "A");
    }

    #[test]
    fn test_pressed_darkens() {
        let base = Color::from_rgb(0.5, 0.5, 0.5);
        let held = pressed(base);
        assert!(held.r < base.r);
        assert_eq!(held.a, base.a);
    }
}
