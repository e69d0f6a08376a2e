// SPDX-License-Identifier: GPL-3.0-only

//! Core data types for keyboard layouts.
//!
//! This module defines the immutable key layout model (keys, sections, the
//! alternates table), the serde-facing definition types used to load layouts
//! from JSON, and the error types produced while loading them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// ============================================================================
// Error Handling Types
// ============================================================================

/// Severity level for validation issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal error that prevents layout from being used
    Error,
    /// Non-fatal issue that should be addressed
    Warning,
}

/// A validation issue discovered while checking a layout definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// Severity level (Error or Warning)
    pub severity: Severity,
    /// Human-readable description of the issue
    pub message: String,
    /// Path to the field that caused the issue (e.g., "alphabetic[2][0]")
    pub field_path: String,
    /// Optional suggestion for how to fix the issue
    pub suggestion: Option<String>,
}

impl ValidationIssue {
    /// Creates a new validation issue.
    pub fn new(
        severity: Severity,
        message: impl Into<String>,
        field_path: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            message: message.into(),
            field_path: field_path.into(),
            suggestion: None,
        }
    }

    /// Adds a suggestion to the validation issue.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let severity_str = match self.severity {
            Severity::Error => "ERROR",
            Severity::Warning => "WARNING",
        };

        write!(f, "[{}] {}: {}", severity_str, self.field_path, self.message)?;

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\n  Suggestion: {}", suggestion)?;
        }

        Ok(())
    }
}

/// Error type for layout loading operations.
///
/// Each variant carries enough context (file path, line, suggestion) to
/// produce a helpful message without the caller re-wrapping it.
#[derive(Debug)]
pub enum LayoutError {
    /// I/O error occurred while reading a layout file
    IoError {
        /// The underlying I/O error
        source: std::io::Error,
        /// Optional file path that caused the error
        file_path: Option<String>,
        /// Optional suggestion for fixing the error
        suggestion: Option<String>,
    },

    /// JSON parsing error, including unknown action names
    JsonError {
        /// The underlying JSON parsing error
        source: serde_json::Error,
        /// Optional file path being parsed
        file_path: Option<String>,
        /// Line number where the error occurred (from serde_json)
        line_number: Option<usize>,
        /// Optional suggestion for fixing the error
        suggestion: Option<String>,
    },

    /// Fatal validation errors found in the definition
    ValidationError {
        /// List of validation issues found
        issues: Vec<ValidationIssue>,
        /// Optional file path being validated
        file_path: Option<String>,
    },
}

impl LayoutError {
    /// Creates an I/O error with file path.
    pub fn io_error_with_path(source: std::io::Error, file_path: impl Into<String>) -> Self {
        Self::IoError {
            source,
            file_path: Some(file_path.into()),
            suggestion: Some("Check that the file exists and you have read permissions".into()),
        }
    }

    /// Creates a JSON parsing error with context.
    pub fn json_error(source: serde_json::Error) -> Self {
        let line_number = Some(source.line());
        Self::JsonError {
            source,
            file_path: None,
            line_number,
            suggestion: Some(
                "Check the JSON syntax; actions must be one of shift, backspace, space, \
                 cursor-left, cursor-right, return, next-input-mode"
                    .into(),
            ),
        }
    }

    /// Creates a JSON parsing error with file path.
    pub fn json_error_with_path(source: serde_json::Error, file_path: impl Into<String>) -> Self {
        Self::json_error(source).with_file_path(file_path)
    }

    /// Creates a validation error from a list of issues.
    pub fn validation_error(issues: Vec<ValidationIssue>) -> Self {
        Self::ValidationError {
            issues,
            file_path: None,
        }
    }

    /// Attaches a file path to the error if it does not carry one yet.
    pub fn with_file_path(self, path: impl Into<String>) -> Self {
        match self {
            Self::ValidationError {
                issues,
                file_path: None,
            } => Self::ValidationError {
                issues,
                file_path: Some(path.into()),
            },
            Self::JsonError {
                source,
                file_path: None,
                line_number,
                suggestion,
            } => Self::JsonError {
                source,
                file_path: Some(path.into()),
                line_number,
                suggestion,
            },
            other => other,
        }
    }
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutError::IoError {
                source,
                file_path,
                suggestion,
            } => {
                write!(f, "I/O error")?;
                if let Some(path) = file_path {
                    write!(f, " reading file '{}'", path)?;
                }
                write!(f, ": {}", source)?;
                if let Some(suggestion) = suggestion {
                    write!(f, "\n  Suggestion: {}", suggestion)?;
                }
                Ok(())
            }
            LayoutError::JsonError {
                source,
                file_path,
                line_number,
                suggestion,
            } => {
                write!(f, "JSON parse error")?;
                if let Some(path) = file_path {
                    write!(f, " in '{}'", path)?;
                }
                if let Some(line) = line_number {
                    write!(f, " at line {}", line)?;
                }
                write!(f, ": {}", source)?;
                if let Some(suggestion) = suggestion {
                    write!(f, "\n  Suggestion: {}", suggestion)?;
                }
                Ok(())
            }
            LayoutError::ValidationError { issues, file_path } => {
                write!(f, "Layout validation failed")?;
                if let Some(path) = file_path {
                    write!(f, " for '{}'", path)?;
                }
                write!(f, " with {} issue(s)", issues.len())?;
                for issue in issues {
                    write!(f, "\n  {}", issue)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for LayoutError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LayoutError::IoError { source, .. } => Some(source),
            LayoutError::JsonError { source, .. } => Some(source),
            LayoutError::ValidationError { .. } => None,
        }
    }
}

/// Result of successfully loading a layout with optional warnings.
///
/// Loading is permissive: cosmetic problems are reported here instead of
/// failing the load.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseResult<T> {
    /// The successfully loaded layout
    pub layout: T,
    /// Non-fatal validation warnings
    pub warnings: Vec<ValidationIssue>,
}

impl<T> ParseResult<T> {
    /// Creates a new parse result with warnings.
    pub fn with_warnings(layout: T, warnings: Vec<ValidationIssue>) -> Self {
        Self { layout, warnings }
    }

    /// Returns true if there are any warnings.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Consumes the result and returns the layout, discarding warnings.
    pub fn into_layout(self) -> T {
        self.layout
    }
}

// ============================================================================
// Layout Model
// ============================================================================

/// The visible sections of the keyboard, top to bottom.
///
/// Both character sections are always on screen at once; there is no mode
/// switch between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    /// Numbers, operators and brackets
    Symbolic,
    /// Letters plus shift and backspace
    Alphabetic,
    /// Space, cursor movement and return
    Actions,
}

impl Section {
    /// All sections in display order.
    pub const ALL: [Section; 3] = [Section::Symbolic, Section::Alphabetic, Section::Actions];

    /// Returns the section name as used in layout files.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Symbolic => "symbolic",
            Section::Alphabetic => "alphabetic",
            Section::Actions => "actions",
        }
    }
}

/// What a key does when it is committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyKind {
    /// Letter subject to one-shot shift
    Letter,
    /// Symbol inserted verbatim
    Symbol,
    /// Toggles shift, emits nothing
    Shift,
    /// Deletes backward
    Backspace,
    /// Inserts a single space
    Space,
    /// Moves the cursor one character left
    CursorLeft,
    /// Moves the cursor one character right
    CursorRight,
    /// Inserts a line break
    Return,
    /// Asks the host to switch to the next input method
    NextInputMode,
}

impl KeyKind {
    /// Returns `true` for keys that insert their symbol as text.
    #[must_use]
    pub fn inserts_symbol(&self) -> bool {
        matches!(self, KeyKind::Letter | KeyKind::Symbol)
    }
}

/// Named action keys accepted in layout definitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActionKey {
    Shift,
    Backspace,
    Space,
    CursorLeft,
    CursorRight,
    Return,
    NextInputMode,
}

impl ActionKey {
    /// The key kind this action produces.
    #[must_use]
    pub fn kind(&self) -> KeyKind {
        match self {
            ActionKey::Shift => KeyKind::Shift,
            ActionKey::Backspace => KeyKind::Backspace,
            ActionKey::Space => KeyKind::Space,
            ActionKey::CursorLeft => KeyKind::CursorLeft,
            ActionKey::CursorRight => KeyKind::CursorRight,
            ActionKey::Return => KeyKind::Return,
            ActionKey::NextInputMode => KeyKind::NextInputMode,
        }
    }

    /// The glyph stored as the key's symbol.
    #[must_use]
    pub fn glyph(&self) -> &'static str {
        match self {
            ActionKey::Shift => "⇧",
            ActionKey::Backspace => "⌫",
            ActionKey::Space => " ",
            ActionKey::CursorLeft => "←",
            ActionKey::CursorRight => "→",
            ActionKey::Return => "⏎",
            ActionKey::NextInputMode => "🌐",
        }
    }
}

/// Position of a key in the layout, used as the key of presentation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyId {
    pub section: Section,
    pub row: usize,
    pub col: usize,
}

impl KeyId {
    /// Creates a new key id.
    #[must_use]
    pub fn new(section: Section, row: usize, col: usize) -> Self {
        Self { section, row, col }
    }
}

impl fmt::Display for KeyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}][{}]", self.section.as_str(), self.row, self.col)
    }
}

/// A single key. Immutable once the layout is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key {
    /// Base symbol (lowercase for letters, a glyph for action keys)
    pub symbol: String,
    /// Section the key lives in
    pub section: Section,
    /// What committing the key does
    pub kind: KeyKind,
    /// Row index within the section
    pub row: usize,
    /// Column index within the row
    pub col: usize,
    /// Whether a long press offers alternates
    pub has_alternates: bool,
}

impl Key {
    /// Returns the key's position id.
    #[must_use]
    pub fn id(&self) -> KeyId {
        KeyId::new(self.section, self.row, self.col)
    }

    /// Returns `true` if the key is a letter.
    #[must_use]
    pub fn is_letter(&self) -> bool {
        self.kind == KeyKind::Letter
    }
}

/// Mapping from a base symbol to its ordered, non-empty alternates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlternatesTable {
    entries: BTreeMap<String, Vec<String>>,
}

impl AlternatesTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds alternates for a symbol. Empty lists are ignored so the table
    /// never holds an entry a long press could not show.
    pub fn insert(&mut self, symbol: impl Into<String>, alternates: Vec<String>) {
        if !alternates.is_empty() {
            self.entries.insert(symbol.into(), alternates);
        }
    }

    /// Returns the alternates for a symbol, or an empty slice.
    #[must_use]
    pub fn get(&self, symbol: &str) -> &[String] {
        self.entries.get(symbol).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Returns `true` if the symbol has alternates.
    #[must_use]
    pub fn contains(&self, symbol: &str) -> bool {
        self.entries.contains_key(symbol)
    }

    /// Iterates over all entries in symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<String>)> {
        self.entries.iter()
    }

    /// Number of symbols with alternates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no symbol has alternates.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The full keyboard: ordered rows per section plus the alternates table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyLayout {
    /// Display name of the layout
    pub name: String,
    pub(crate) symbolic: Vec<Vec<Key>>,
    pub(crate) alphabetic: Vec<Vec<Key>>,
    pub(crate) actions: Vec<Vec<Key>>,
    pub(crate) alternates: AlternatesTable,
}

// ============================================================================
// Layout Definition (JSON)
// ============================================================================

/// One cell of a row in a layout definition.
///
/// A plain string is a character key; an object names an action key:
///
/// ```json
/// ["z", "x", { "action": "backspace" }]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellDefinition {
    /// Character key inserting this symbol
    Symbol(String),
    /// Named action key
    Action {
        /// Which action the key performs
        action: ActionKey,
    },
}

/// Serializable description of a layout, as read from JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutDefinition {
    /// Display name of the layout
    #[serde(default)]
    pub name: String,
    /// Rows of the symbolic section
    #[serde(default)]
    pub symbolic: Vec<Vec<CellDefinition>>,
    /// Rows of the alphabetic section
    #[serde(default)]
    pub alphabetic: Vec<Vec<CellDefinition>>,
    /// Rows of the bottom action section
    #[serde(default)]
    pub actions: Vec<Vec<CellDefinition>>,
    /// Long-press alternates keyed by base symbol
    #[serde(default)]
    pub alternates: BTreeMap<String, Vec<String>>,
}

impl LayoutDefinition {
    /// Returns the rows of a section.
    #[must_use]
    pub fn rows(&self, section: Section) -> &[Vec<CellDefinition>] {
        match section {
            Section::Symbolic => &self.symbolic,
            Section::Alphabetic => &self.alphabetic,
            Section::Actions => &self.actions,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
