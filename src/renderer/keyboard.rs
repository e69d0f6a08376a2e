// SPDX-License-Identifier: GPL-3.0-only

//! Whole-keyboard rendering.
//!
//! Keys are placed from the computed [`KeyboardGeometry`] rather than by
//! flex layout: gaps between frames become fixed spacers, so the drawn keys
//! sit exactly where the controller hit-tests and anchors the popup.

use cosmic::iced::Length;
use cosmic::widget::{self, container, Space};
use cosmic::Element;

use crate::layout::{Key, KeyLayout, KeyboardGeometry, Section};
use crate::renderer::key::render_key;
use crate::renderer::message::RendererMessage;
use crate::renderer::state::RenderState;
use crate::renderer::theme::Palette;

/// Renders every section of the layout.
pub fn render_keyboard<'a>(
    layout: &KeyLayout,
    geometry: &KeyboardGeometry,
    state: &RenderState,
    palette: &Palette,
) -> Element<'a, RendererMessage> {
    let mut column = widget::column::column();
    let mut bottom = 0.0_f32;

    for section in Section::ALL {
        for row in layout.rows(section) {
            let Some(top) = row_top(row, geometry) else {
                continue;
            };
            if top > bottom {
                column = column.push(Space::new(Length::Fill, Length::Fixed(top - bottom)));
            }
            let (element, row_bottom) = render_row(row, geometry, state, palette, top);
            column = column.push(element);
            bottom = row_bottom;
        }
    }

    container(column)
        .width(Length::Fixed(geometry.width()))
        .height(Length::Fixed(geometry.height()))
        .into()
}

/// Top edge of the first framed key in a row.
fn row_top(row: &[Key], geometry: &KeyboardGeometry) -> Option<f32> {
    row.iter()
        .find_map(|key| geometry.frame(key.id()))
        .map(|frame| frame.y)
}

/// Renders one row and returns it with its bottom edge.
fn render_row<'a>(
    row: &[Key],
    geometry: &KeyboardGeometry,
    state: &RenderState,
    palette: &Palette,
    top: f32,
) -> (Element<'a, RendererMessage>, f32) {
    let mut line = widget::row::row();
    let mut cursor = 0.0_f32;
    let mut bottom = top;

    for key in row {
        let Some(frame) = geometry.frame(key.id()) else {
            continue;
        };
        if frame.x > cursor {
            line = line.push(Space::new(Length::Fixed(frame.x - cursor), Length::Shrink));
        }
        line = line.push(render_key(key, frame, state, palette));
        cursor = frame.max_x();
        bottom = bottom.max(frame.max_y());
    }

    (line.into(), bottom)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_tops_follow_section_order() {
        let layout = KeyLayout::coders();
        let geometry = KeyboardGeometry::compute(&layout, 320.0, 260.0);

        let tops: Vec<f32> = Section::ALL
            .iter()
            .flat_map(|section| layout.rows(*section))
            .filter_map(|row| row_top(row, &geometry))
            .collect();

        assert_eq!(tops.len(), 7);
        assert!(tops.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn test_unframed_rows_are_skipped() {
        let layout = KeyLayout::coders();
        let geometry = KeyboardGeometry::default();
        assert!(row_top(&layout.rows(Section::Symbolic)[0], &geometry).is_none());
    }
}
