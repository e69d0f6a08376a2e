// SPDX-License-Identifier: GPL-3.0-only

//! Keyboard layout model for CodersKey.
//!
//! A layout is three sections shown at once, top to bottom: the symbolic
//! rows (digits, operators, brackets), the alphabetic rows (letters with
//! shift and backspace) and the action row (space, cursor keys, return).
//! Keys are immutable once the layout is built. Symbols that offer
//! alternates on long press are listed in an [`AlternatesTable`].
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use coderskey::layout::{KeyLayout, Section};
//!
//! let layout = KeyLayout::coders();
//! let dot = layout.key_at(Section::Symbolic, 2, 9).unwrap();
//! assert_eq!(layout.alternates_for(&dot.symbol), [";", ","]);
//! ```
//!
//! Layouts can also be loaded from JSON, where each cell is either a symbol
//! string or an action object:
//!
//! ```json
//! {
//!     "name": "Coders",
//!     "symbolic": [["1", "2", "3"]],
//!     "alphabetic": [[{"action": "shift"}, "z", "x", {"action": "backspace"}]],
//!     "actions": [[{"action": "space"}, {"action": "return"}]],
//!     "alternates": {".": [";", ","]}
//! }
//! ```
//!
//! ## Error Handling
//!
//! Loading is permissive: cosmetic issues are returned as warnings in the
//! `ParseResult`, while JSON syntax errors, unknown actions and empty
//! alternates lists return a `LayoutError`.

pub mod geometry;
pub mod parser;
pub mod types;
pub mod validation;

pub use geometry::{KeyboardGeometry, Point, Rectangle};
pub use parser::{parse_layout_file, parse_layout_from_string};
pub use types::{
    ActionKey, AlternatesTable, CellDefinition, Key, KeyId, KeyKind, KeyLayout, LayoutDefinition,
    LayoutError, ParseResult, Section, Severity, ValidationIssue,
};

use std::collections::BTreeMap;

const SYMBOLIC_ROWS: [&[&str]; 3] = [
    &["1", "2", "3", "4", "5", "6", "7", "8", "9", "0"],
    &["+", "-", "*", "/", "=", "<", ">", "!", "&", "|"],
    &["(", ")", "[", "]", "{", "}", "'", "\"", ":", "."],
];

const ALPHABETIC_ROWS: [&[&str]; 3] = [
    &["q", "w", "e", "r", "t", "y", "u", "i", "o", "p"],
    &["a", "s", "d", "f", "g", "h", "j", "k", "l"],
    &["z", "x", "c", "v", "b", "n", "m"],
];

fn symbols(row: &[&str]) -> Vec<CellDefinition> {
    row.iter()
        .map(|s| CellDefinition::Symbol((*s).to_string()))
        .collect()
}

fn action(action: ActionKey) -> CellDefinition {
    CellDefinition::Action { action }
}

impl LayoutDefinition {
    /// The built-in programmer layout.
    ///
    /// `with_input_mode_key` appends a next-input-mode key to the action row,
    /// for hosts that need the keyboard to offer its own switch key.
    #[must_use]
    pub fn coders(with_input_mode_key: bool) -> Self {
        let symbolic = SYMBOLIC_ROWS.iter().map(|row| symbols(row)).collect();

        let mut alphabetic: Vec<Vec<CellDefinition>> =
            ALPHABETIC_ROWS.iter().map(|row| symbols(row)).collect();
        if let Some(last) = alphabetic.last_mut() {
            last.insert(0, action(ActionKey::Shift));
            last.push(action(ActionKey::Backspace));
        }

        let mut action_row = vec![
            action(ActionKey::Space),
            action(ActionKey::CursorLeft),
            action(ActionKey::CursorRight),
            action(ActionKey::Return),
        ];
        if with_input_mode_key {
            action_row.push(action(ActionKey::NextInputMode));
        }

        let mut alternates = BTreeMap::new();
        alternates.insert(".".to_string(), vec![";".to_string(), ",".to_string()]);

        Self {
            name: "Coders".to_string(),
            symbolic,
            alphabetic,
            actions: vec![action_row],
            alternates,
        }
    }
}

impl KeyLayout {
    /// The built-in programmer layout without a next-input-mode key.
    #[must_use]
    pub fn coders() -> Self {
        Self::from_definition(&LayoutDefinition::coders(false))
    }

    /// Builds a layout from a definition.
    ///
    /// Single-word alphabetic symbols in the alphabetic section become letter
    /// keys subject to shift; every other symbol is inserted verbatim. The
    /// definition is expected to have passed validation: empty alternates
    /// lists are dropped rather than attached to a key.
    #[must_use]
    pub fn from_definition(definition: &LayoutDefinition) -> Self {
        let mut alternates = AlternatesTable::new();
        for (symbol, list) in &definition.alternates {
            alternates.insert(symbol.clone(), list.clone());
        }

        let build = |section: Section| -> Vec<Vec<Key>> {
            definition
                .rows(section)
                .iter()
                .enumerate()
                .map(|(row, cells)| {
                    cells
                        .iter()
                        .enumerate()
                        .map(|(col, cell)| build_key(cell, section, row, col, &alternates))
                        .collect()
                })
                .collect()
        };

        Self {
            name: definition.name.clone(),
            symbolic: build(Section::Symbolic),
            alphabetic: build(Section::Alphabetic),
            actions: build(Section::Actions),
            alternates,
        }
    }

    /// Returns the key at a position, if any.
    #[must_use]
    pub fn key_at(&self, section: Section, row: usize, col: usize) -> Option<&Key> {
        self.rows(section).get(row)?.get(col)
    }

    /// Returns the key with the given id, if any.
    #[must_use]
    pub fn key(&self, id: KeyId) -> Option<&Key> {
        self.key_at(id.section, id.row, id.col)
    }

    /// Returns the alternates for a symbol, or an empty slice.
    #[must_use]
    pub fn alternates_for(&self, symbol: &str) -> &[String] {
        self.alternates.get(symbol)
    }

    /// Returns the rows of a section.
    #[must_use]
    pub fn rows(&self, section: Section) -> &[Vec<Key>] {
        match section {
            Section::Symbolic => &self.symbolic,
            Section::Alphabetic => &self.alphabetic,
            Section::Actions => &self.actions,
        }
    }

    /// Iterates over every key, section by section.
    pub fn keys(&self) -> impl Iterator<Item = &Key> {
        Section::ALL
            .into_iter()
            .flat_map(move |section| self.rows(section).iter().flatten())
    }

    /// Finds the first key carrying a symbol.
    #[must_use]
    pub fn find(&self, symbol: &str) -> Option<&Key> {
        self.keys().find(|key| key.symbol == symbol)
    }

    /// Returns the alternates table.
    #[must_use]
    pub fn alternates(&self) -> &AlternatesTable {
        &self.alternates
    }
}

fn build_key(
    cell: &CellDefinition,
    section: Section,
    row: usize,
    col: usize,
    alternates: &AlternatesTable,
) -> Key {
    match cell {
        CellDefinition::Symbol(symbol) => {
            let is_letter = section == Section::Alphabetic
                && !symbol.is_empty()
                && symbol.chars().all(char::is_alphabetic);
            Key {
                symbol: symbol.clone(),
                section,
                kind: if is_letter {
                    KeyKind::Letter
                } else {
                    KeyKind::Symbol
                },
                row,
                col,
                has_alternates: alternates.contains(symbol),
            }
        }
        CellDefinition::Action { action } => Key {
            symbol: action.glyph().to_string(),
            section,
            kind: action.kind(),
            row,
            col,
            has_alternates: false,
        },
    }
}

// ============================================================================
// Tests
// ============================================================================
