// SPDX-License-Identifier: GPL-3.0-only

//! Key frame geometry.
//!
//! Computes the on-screen rectangle of every key for a given container size.
//! The frames anchor the long-press popup and resolve pointer positions back
//! to keys. Everything here is a pure function of the layout and the size.

use crate::layout::types::{KeyId, KeyKind, KeyLayout, Section};
use std::collections::BTreeMap;

/// Horizontal padding between the container edge and the keys.
pub const HORIZONTAL_PADDING: f32 = 5.0;

/// Vertical padding above and below the keys.
pub const VERTICAL_PADDING: f32 = 8.0;

/// Vertical gap between rows and between sections.
pub const ROW_SPACING: f32 = 8.0;

/// Horizontal gap between keys in a row.
pub const KEY_SPACING: f32 = 6.0;

/// Fixed height of each action row.
pub const ACTION_ROW_HEIGHT: f32 = 48.0;

/// Width of shift and backspace.
pub const WIDE_KEY_WIDTH: f32 = 60.0;

/// Leading inset of character rows that are shorter than their section.
pub const SHORT_ROW_INSET: f32 = 20.0;

/// A point in container coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    /// Creates a new point.
    #[must_use]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle in container coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rectangle {
    /// X coordinate of the left edge
    pub x: f32,
    /// Y coordinate of the top edge
    pub y: f32,
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

impl Rectangle {
    /// Creates a new rectangle.
    #[must_use]
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// X coordinate of the right edge.
    #[must_use]
    pub fn max_x(&self) -> f32 {
        self.x + self.width
    }

    /// Y coordinate of the bottom edge.
    #[must_use]
    pub fn max_y(&self) -> f32 {
        self.y + self.height
    }

    /// Returns the center X coordinate.
    #[must_use]
    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    /// Returns the center Y coordinate.
    #[must_use]
    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    /// Returns the center point.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.center_x(), self.center_y())
    }

    /// Containment test, inclusive on the left/top edges and exclusive on
    /// the right/bottom edges, so adjacent rectangles never share a point.
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x < self.max_x() && point.y >= self.y && point.y < self.max_y()
    }
}

/// Frames of every key in a layout for one container size.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct KeyboardGeometry {
    width: f32,
    height: f32,
    frames: BTreeMap<KeyId, Rectangle>,
}

impl KeyboardGeometry {
    /// Lays out `layout` in a `width` x `height` container.
    ///
    /// Character rows share the height left over after the padding and the
    /// fixed-height action rows. Within a row, shift and backspace take
    /// [`WIDE_KEY_WIDTH`], cursor keys take one share, every other action key
    /// two shares, and character keys one share each.
    #[must_use]
    pub fn compute(layout: &KeyLayout, width: f32, height: f32) -> Self {
        let character_rows =
            layout.rows(Section::Symbolic).len() + layout.rows(Section::Alphabetic).len();
        let action_rows = layout.rows(Section::Actions).len();
        let total_rows = character_rows + action_rows;

        let gaps = total_rows.saturating_sub(1) as f32 * ROW_SPACING;
        let available = height
            - 2.0 * VERTICAL_PADDING
            - gaps
            - action_rows as f32 * ACTION_ROW_HEIGHT;
        let row_height = if character_rows == 0 {
            0.0
        } else {
            (available / character_rows as f32).max(0.0)
        };

        let inner_width = (width - 2.0 * HORIZONTAL_PADDING).max(0.0);
        let mut frames = BTreeMap::new();
        let mut y = VERTICAL_PADDING;

        for section in Section::ALL {
            let rows = layout.rows(section);
            let widest = rows.iter().map(Vec::len).max().unwrap_or(0);
            let section_row_height = if section == Section::Actions {
                ACTION_ROW_HEIGHT
            } else {
                row_height
            };

            for row in rows {
                let inset = if section != Section::Actions
                    && row.len() < widest
                    && row.iter().all(|key| key.kind.inserts_symbol())
                {
                    SHORT_ROW_INSET
                } else {
                    0.0
                };

                let row_width = (inner_width - inset).max(0.0);
                let gaps = row.len().saturating_sub(1) as f32 * KEY_SPACING;
                let fixed: f32 = row.iter().filter_map(|key| fixed_width(key.kind)).sum();
                let total_shares: f32 = row.iter().map(|key| shares(key.kind)).sum();
                let share = if total_shares > 0.0 {
                    ((row_width - gaps - fixed) / total_shares).max(0.0)
                } else {
                    0.0
                };

                let mut x = HORIZONTAL_PADDING + inset;
                for key in row {
                    let key_width =
                        fixed_width(key.kind).unwrap_or_else(|| shares(key.kind) * share);
                    frames.insert(
                        key.id(),
                        Rectangle::new(x, y, key_width, section_row_height),
                    );
                    x += key_width + KEY_SPACING;
                }

                y += section_row_height + ROW_SPACING;
            }
        }

        Self {
            width,
            height,
            frames,
        }
    }

    /// Container width the frames were computed for.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Container height the frames were computed for.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Frame of a key.
    #[must_use]
    pub fn frame(&self, id: KeyId) -> Option<Rectangle> {
        self.frames.get(&id).copied()
    }

    /// The key whose frame contains `point`. Gaps between keys hit nothing.
    #[must_use]
    pub fn key_at(&self, point: Point) -> Option<KeyId> {
        self.frames
            .iter()
            .find(|(_, frame)| frame.contains(point))
            .map(|(id, _)| *id)
    }
}

fn fixed_width(kind: KeyKind) -> Option<f32> {
    match kind {
        KeyKind::Shift | KeyKind::Backspace => Some(WIDE_KEY_WIDTH),
        _ => None,
    }
}

fn shares(kind: KeyKind) -> f32 {
    match kind {
        KeyKind::Shift | KeyKind::Backspace => 0.0,
        KeyKind::Letter | KeyKind::Symbol | KeyKind::CursorLeft | KeyKind::CursorRight => 1.0,
        KeyKind::Space | KeyKind::Return | KeyKind::NextInputMode => 2.0,
    }
}
