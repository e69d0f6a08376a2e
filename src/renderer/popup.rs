// SPDX-License-Identifier: GPL-3.0-only

//! Alternate picker popup rendering.
//!
//! The popup is drawn as an overlay layer on top of the keyboard. Its
//! position and cell sizes come straight from the open
//! [`PopupSession`](crate::picker::PopupSession), so what is drawn is what
//! the picker hit-tests against.

use cosmic::iced::{Alignment, Background, Border, Color, Length, Shadow, Vector};
use cosmic::widget::{self, container, Space};
use cosmic::Element;

use crate::picker::{PopupSession, POPUP_CELL_SPACING, POPUP_CELL_WIDTH};
use crate::renderer::message::RendererMessage;
use crate::renderer::theme::Palette;

/// Corner radius of the popup.
pub const POPUP_BORDER_RADIUS: f32 = 8.0;

/// Renders the popup box for a session.
pub fn render_popup<'a>(
    session: &PopupSession,
    palette: &Palette,
) -> Element<'a, RendererMessage> {
    let frame = session.frame();
    let hovered = session.hovered_index();

    let cells = session
        .alternatives()
        .iter()
        .enumerate()
        .fold(widget::row::row(), |row, (index, alternate)| {
            row.push(render_cell(alternate, hovered == Some(index), palette, frame.height))
        })
        .spacing(POPUP_CELL_SPACING)
        .align_y(Alignment::Center);

    let background = palette.special;
    container(cells)
        .width(Length::Fixed(frame.width))
        .height(Length::Fixed(frame.height))
        .class(cosmic::style::Container::custom(move |_theme| {
            container::Style {
                background: Some(Background::Color(background)),
                border: Border {
                    color: Color::TRANSPARENT,
                    width: 0.0,
                    radius: POPUP_BORDER_RADIUS.into(),
                },
                icon_color: None,
                text_color: None,
                shadow: Shadow {
                    color: Color::from_rgba(0.0, 0.0, 0.0, 0.3),
                    offset: Vector::new(0.0, 2.0),
                    blur_radius: 4.0,
                },
            }
        }))
        .into()
}

/// Renders the popup positioned inside a layer the size of the window.
///
/// `origin_y` is the window offset of the keyboard's top edge. A popup that
/// would start above the window is pinned to its top.
pub fn render_popup_layer<'a>(
    session: &PopupSession,
    palette: &Palette,
    origin_y: f32,
) -> Element<'a, RendererMessage> {
    let frame = session.frame();
    let top = (origin_y + frame.y).max(0.0);
    let left = frame.x.max(0.0);

    widget::column::column()
        .push(Space::new(Length::Fill, Length::Fixed(top)))
        .push(
            widget::row::row()
                .push(Space::new(Length::Fixed(left), Length::Shrink))
                .push(render_popup(session, palette)),
        )
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

/// Renders one alternate.
fn render_cell<'a>(
    alternate: &str,
    hovered: bool,
    palette: &Palette,
    height: f32,
) -> Element<'a, RendererMessage> {
    let (background, text) = if hovered {
        (palette.popup_highlight, palette.highlight_text)
    } else {
        (Color::TRANSPARENT, palette.text)
    };

    container(widget::text::title4(alternate.to_string()))
        .width(Length::Fixed(POPUP_CELL_WIDTH))
        .height(Length::Fixed(height))
        .align_x(Alignment::Center)
        .align_y(Alignment::Center)
        .class(cosmic::style::Container::custom(move |_theme| {
            container::Style {
                background: Some(Background::Color(background)),
                border: Border {
                    color: Color::TRANSPARENT,
                    width: 0.0,
                    radius: (POPUP_BORDER_RADIUS / 2.0).into(),
                },
                icon_color: Some(text),
                text_color: Some(text),
                shadow: Shadow::default(),
            }
        }))
        .into()
}
