// SPDX-License-Identifier: GPL-3.0-only

//! Long-press alternate picker.
//!
//! Holding a key that has alternates opens a popup above it with one cell
//! per alternate. Moving the pointer hovers a cell; releasing over a cell
//! commits that alternate, releasing anywhere else cancels.
//!
//! ```text
//! Idle --begin--> Open --resolve(hit)--> Committed --> Idle
//!                   |----resolve(miss)/cancel------> Cancelled --> Idle
//! ```
//!
//! At most one session exists at a time: `begin` while open cancels the
//! current session before opening the next one.

use crate::layout::{Key, Point, Rectangle};

/// Width of one alternate cell.
pub const POPUP_CELL_WIDTH: f32 = 44.0;

/// Gap between alternate cells.
pub const POPUP_CELL_SPACING: f32 = 1.0;

/// Height of the popup.
pub const POPUP_HEIGHT: f32 = 54.0;

/// Vertical gap between the popup and the top of its anchor key.
pub const POPUP_ANCHOR_GAP: f32 = 10.0;

/// Minimum distance between the popup and the container's side edges.
pub const POPUP_EDGE_PADDING: f32 = 5.0;

/// Outcome of releasing the pointer on an open popup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The pointer was over this alternate.
    Committed(String),
    /// The pointer missed every cell, or no popup was open.
    Cancelled,
}

/// Total popup width for `count` alternates.
#[must_use]
pub fn popup_width(count: usize) -> f32 {
    let n = count as f32;
    POPUP_CELL_WIDTH * n + POPUP_CELL_SPACING * (n - 1.0).max(0.0)
}

/// Computes the popup frame for an anchor key.
///
/// The popup is centred horizontally on the anchor and placed above it.
/// When it would cross a side edge it is shifted by the minimum amount that
/// keeps it [`POPUP_EDGE_PADDING`] inside the container; if it is wider than
/// the container it is pinned to the left edge.
#[must_use]
pub fn popup_frame(anchor: Rectangle, count: usize, container_width: f32) -> Rectangle {
    let width = popup_width(count);
    let mut x = anchor.center_x() - width / 2.0;

    let right_edge = container_width - POPUP_EDGE_PADDING;
    if x + width > right_edge {
        x = right_edge - width;
    }
    if x < POPUP_EDGE_PADDING {
        x = POPUP_EDGE_PADDING;
    }

    Rectangle::new(x, anchor.y - POPUP_HEIGHT - POPUP_ANCHOR_GAP, width, POPUP_HEIGHT)
}

/// An open popup.
#[derive(Debug, Clone, PartialEq)]
pub struct PopupSession {
    anchor: Key,
    alternatives: Vec<String>,
    hovered_index: Option<usize>,
    frame: Rectangle,
}

impl PopupSession {
    /// The key the popup was opened from.
    #[must_use]
    pub fn anchor(&self) -> &Key {
        &self.anchor
    }

    /// The alternates, in display order.
    #[must_use]
    pub fn alternatives(&self) -> &[String] {
        &self.alternatives
    }

    /// The hovered cell, if any.
    #[must_use]
    pub fn hovered_index(&self) -> Option<usize> {
        self.hovered_index
    }

    /// The popup rectangle in container coordinates.
    #[must_use]
    pub fn frame(&self) -> Rectangle {
        self.frame
    }

    /// Hit region of cell `index`.
    ///
    /// Regions are equal-width slices of the whole popup, so the one-pixel
    /// spacing between drawn cells still belongs to a cell.
    #[must_use]
    pub fn cell_frame(&self, index: usize) -> Option<Rectangle> {
        if index >= self.alternatives.len() {
            return None;
        }
        let cell_width = self.frame.width / self.alternatives.len() as f32;
        Some(Rectangle::new(
            self.frame.x + cell_width * index as f32,
            self.frame.y,
            cell_width,
            self.frame.height,
        ))
    }

    /// The cell containing `point`, if any.
    #[must_use]
    pub fn hit_index(&self, point: Point) -> Option<usize> {
        if !self.frame.contains(point) {
            return None;
        }
        let cell_width = self.frame.width / self.alternatives.len() as f32;
        let index = ((point.x - self.frame.x) / cell_width) as usize;
        Some(index.min(self.alternatives.len() - 1))
    }
}

/// The picker state machine. `None` is `Idle`, `Some` is `Open`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LongPressPicker {
    session: Option<PopupSession>,
}

impl LongPressPicker {
    /// Creates an idle picker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a popup over `anchor`.
    ///
    /// Any open session is cancelled first. A key without alternates leaves
    /// the picker idle.
    ///
    /// # Returns
    ///
    /// `true` if a popup is now open
    pub fn begin(
        &mut self,
        anchor: &Key,
        anchor_frame: Rectangle,
        alternatives: &[String],
        container_width: f32,
    ) -> bool {
        self.cancel();

        if !anchor.has_alternates || alternatives.is_empty() {
            tracing::debug!("Key {} has no alternates, picker stays idle", anchor.id());
            return false;
        }

        let frame = popup_frame(anchor_frame, alternatives.len(), container_width);
        tracing::debug!(
            "Opening popup for '{}' with {} alternates at x={:.1}",
            anchor.symbol,
            alternatives.len(),
            frame.x
        );

        self.session = Some(PopupSession {
            anchor: anchor.clone(),
            alternatives: alternatives.to_vec(),
            hovered_index: None,
            frame,
        });
        true
    }

    /// Recomputes the hovered cell. Returns `None` while idle.
    pub fn update_hover(&mut self, point: Point) -> Option<usize> {
        let session = self.session.as_mut()?;
        session.hovered_index = session.hit_index(point);
        session.hovered_index
    }

    /// Closes the popup, committing the alternate under `point` if any.
    pub fn resolve(&mut self, point: Point) -> Resolution {
        let Some(session) = self.session.take() else {
            return Resolution::Cancelled;
        };

        match session.hit_index(point) {
            Some(index) => {
                let symbol = session.alternatives[index].clone();
                tracing::debug!("Popup resolved to '{}'", symbol);
                Resolution::Committed(symbol)
            }
            None => {
                tracing::debug!("Popup released outside its cells");
                Resolution::Cancelled
            }
        }
    }

    /// Closes the popup without committing. Idempotent.
    ///
    /// # Returns
    ///
    /// `true` if a popup was open
    pub fn cancel(&mut self) -> bool {
        let was_open = self.session.take().is_some();
        if was_open {
            tracing::debug!("Popup cancelled");
        }
        was_open
    }

    /// Checks if a popup is open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    /// The open session, if any.
    #[must_use]
    pub fn session(&self) -> Option<&PopupSession> {
        self.session.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{KeyLayout, KeyboardGeometry, Section};

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 0.01
    }

    fn dot_key() -> (Key, Vec<String>) {
        let layout = KeyLayout::coders();
        let key = layout.find(".").unwrap().clone();
        let alternates = layout.alternates_for(".").to_vec();
        (key, alternates)
    }

    fn three_alternates() -> (Key, Vec<String>) {
        let (mut key, _) = dot_key();
        key.symbol = "-".to_string();
        (key, vec!["_".into(), "->".into(), "=>".into()])
    }

    #[test]
    fn test_popup_width_matches_cells() {
        assert!(approx(popup_width(1), 44.0));
        assert!(approx(popup_width(2), 89.0));
        assert!(approx(popup_width(3), 134.0));
    }

    #[test]
    fn test_popup_centred_when_it_fits() {
        let anchor = Rectangle::new(100.0, 200.0, 30.0, 40.0);
        let frame = popup_frame(anchor, 2, 320.0);
        assert!(approx(frame.center_x(), anchor.center_x()));
        assert!(approx(frame.y, 200.0 - 54.0 - 10.0));
        assert!(approx(frame.height, POPUP_HEIGHT));
    }

    #[test]
    fn test_popup_clamped_by_minimum_shift() {
        let right = popup_frame(Rectangle::new(300.0, 100.0, 15.0, 40.0), 2, 320.0);
        assert!(approx(right.max_x(), 315.0));

        let left = popup_frame(Rectangle::new(0.0, 100.0, 10.0, 40.0), 2, 320.0);
        assert!(approx(left.x, 5.0));
    }

    #[test]
    fn test_popup_wider_than_container_pins_left() {
        let frame = popup_frame(Rectangle::new(20.0, 100.0, 10.0, 40.0), 3, 100.0);
        assert!(approx(frame.x, 5.0));
    }

    #[test]
    fn test_begin_without_alternates_stays_idle() {
        let layout = KeyLayout::coders();
        let key = layout.find("a").unwrap();
        let mut picker = LongPressPicker::new();

        assert!(!picker.begin(key, Rectangle::new(0.0, 100.0, 30.0, 40.0), &[], 320.0));
        assert!(!picker.is_open());
    }

    #[test]
    fn test_second_begin_replaces_first() {
        let (dot, dot_alts) = dot_key();
        let (dash, dash_alts) = three_alternates();
        let mut picker = LongPressPicker::new();

        picker.begin(&dot, Rectangle::new(280.0, 100.0, 30.0, 40.0), &dot_alts, 320.0);
        picker.begin(&dash, Rectangle::new(100.0, 100.0, 30.0, 40.0), &dash_alts, 320.0);

        let session = picker.session().unwrap();
        assert_eq!(session.anchor().symbol, "-");
        assert_eq!(session.alternatives().len(), 3);
    }

    #[test]
    fn test_hover_every_cell_and_outside() {
        let (key, alternates) = three_alternates();
        let mut picker = LongPressPicker::new();
        picker.begin(&key, Rectangle::new(140.0, 200.0, 30.0, 40.0), &alternates, 320.0);

        let frame = picker.session().unwrap().frame();
        let cell = frame.width / 3.0;
        let y = frame.center_y();

        for i in 0..3 {
            let x = frame.x + cell * i as f32 + cell / 2.0;
            assert_eq!(picker.update_hover(Point::new(x, y)), Some(i));
            assert_eq!(picker.update_hover(Point::new(x, y)), Some(i));
        }
        assert_eq!(picker.update_hover(Point::new(frame.x - 1.0, y)), None);
        assert_eq!(picker.update_hover(Point::new(frame.max_x(), y)), None);
        assert_eq!(picker.session().unwrap().hovered_index(), None);
    }

    #[test]
    fn test_cells_cover_popup_without_gaps() {
        let (key, alternates) = three_alternates();
        let mut picker = LongPressPicker::new();
        picker.begin(&key, Rectangle::new(140.0, 200.0, 30.0, 40.0), &alternates, 320.0);
        let session = picker.session().unwrap();

        let first = session.cell_frame(0).unwrap();
        let last = session.cell_frame(2).unwrap();
        assert!(approx(first.x, session.frame().x));
        assert!(approx(last.max_x(), session.frame().max_x()));
        assert!(session.cell_frame(3).is_none());
    }

    #[test]
    fn test_resolve_hit_and_miss_return_to_idle() {
        let (key, alternates) = three_alternates();
        let mut picker = LongPressPicker::new();

        picker.begin(&key, Rectangle::new(140.0, 200.0, 30.0, 40.0), &alternates, 320.0);
        let middle = picker.session().unwrap().cell_frame(1).unwrap().center();
        assert_eq!(picker.resolve(middle), Resolution::Committed("->".to_string()));
        assert!(!picker.is_open());

        picker.begin(&key, Rectangle::new(140.0, 200.0, 30.0, 40.0), &alternates, 320.0);
        assert_eq!(picker.resolve(Point::new(0.0, 0.0)), Resolution::Cancelled);
        assert!(!picker.is_open());
    }

    #[test]
    fn test_resolve_and_hover_from_idle() {
        let mut picker = LongPressPicker::new();
        assert_eq!(picker.update_hover(Point::new(1.0, 1.0)), None);
        assert_eq!(picker.resolve(Point::new(1.0, 1.0)), Resolution::Cancelled);
        assert!(!picker.cancel());
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let (key, alternates) = dot_key();
        let mut picker = LongPressPicker::new();
        picker.begin(&key, Rectangle::new(140.0, 200.0, 30.0, 40.0), &alternates, 320.0);

        assert!(picker.cancel());
        assert!(!picker.cancel());
        assert!(!picker.is_open());
    }

    #[test]
    fn test_dot_scenario_in_320_container() {
        let layout = KeyLayout::coders();
        let geometry = KeyboardGeometry::compute(&layout, 320.0, 310.0);
        let dot = layout.find(".").unwrap();
        let anchor = geometry.frame(dot.id()).unwrap();
        assert_eq!(dot.section, Section::Symbolic);

        let mut picker = LongPressPicker::new();
        assert!(picker.begin(dot, anchor, layout.alternates_for("."), 320.0));
        let frame = picker.session().unwrap().frame();
        assert!(frame.x >= POPUP_EDGE_PADDING);
        assert!(frame.max_x() <= 320.0 - POPUP_EDGE_PADDING + 0.01);

        let y = frame.center_y();
        let left_half = Point::new(frame.x + frame.width * 0.25, y);
        let right_half = Point::new(frame.x + frame.width * 0.75, y);
        let below = Point::new(frame.center_x(), frame.max_y() + 1.0);

        assert_eq!(picker.update_hover(left_half), Some(0));
        assert_eq!(picker.resolve(left_half), Resolution::Committed(";".to_string()));

        picker.begin(dot, anchor, layout.alternates_for("."), 320.0);
        assert_eq!(picker.resolve(right_half), Resolution::Committed(",".to_string()));

        picker.begin(dot, anchor, layout.alternates_for("."), 320.0);
        assert_eq!(picker.resolve(below), Resolution::Cancelled);
    }
}
