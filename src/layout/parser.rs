// SPDX-License-Identifier: GPL-3.0-only

//! Layout parsing logic for loading JSON layout definitions.
//!
//! This module reads keyboard layout definitions from JSON files and strings,
//! validates them, and builds the immutable [`KeyLayout`] the controller uses.

use crate::layout::types::{KeyLayout, LayoutDefinition, LayoutError, ParseResult};
use crate::layout::validation::validate_definition;
use std::fs;

/// Parses a keyboard layout from a JSON file.
///
/// I/O errors (file not found, permission denied) and JSON errors (malformed
/// syntax, unknown action names) are reported separately, both carrying the
/// file path.
///
/// # Example
///
/// ```rust,ignore
/// use coderskey::layout::parser::parse_layout_file;
///
/// match parse_layout_file("layouts/coders.json") {
///     Ok(result) => {
///         println!("Loaded layout: {}", result.layout.name);
///         for warning in &result.warnings {
///             println!("{}", warning);
///         }
///     }
///     Err(e) => eprintln!("Failed to parse layout: {}", e),
/// }
/// ```
pub fn parse_layout_file(path: &str) -> Result<ParseResult<KeyLayout>, LayoutError> {
    let json_str =
        fs::read_to_string(path).map_err(|e| LayoutError::io_error_with_path(e, path))?;

    let definition: LayoutDefinition = serde_json::from_str(&json_str)
        .map_err(|e| LayoutError::json_error_with_path(e, path))?;

    build_layout(definition).map_err(|e| e.with_file_path(path))
}

/// Parses a keyboard layout from a JSON string.
///
/// Use this when the JSON is already in memory, or for testing.
pub fn parse_layout_from_string(json: &str) -> Result<ParseResult<KeyLayout>, LayoutError> {
    let definition: LayoutDefinition =
        serde_json::from_str(json).map_err(LayoutError::json_error)?;

    build_layout(definition)
}

/// Validates a definition and builds the layout, keeping the warnings.
pub fn build_layout(definition: LayoutDefinition) -> Result<ParseResult<KeyLayout>, LayoutError> {
    let warnings = validate_definition(&definition)?;
    Ok(ParseResult::with_warnings(
        KeyLayout::from_definition(&definition),
        warnings,
    ))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::types::{KeyKind, Section};
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SMALL_LAYOUT: &str = r#"{
        "name": "Small",
        "symbolic": [["1", "2", "."]],
        "alphabetic": [[{"action": "shift"}, "a", "b", {"action": "backspace"}]],
        "actions": [[{"action": "space"}, {"action": "return"}]],
        "alternates": {".": [";", ","]}
    }"#;

    #[test]
    fn test_parse_valid_json_string() {
        let result = parse_layout_from_string(SMALL_LAYOUT).unwrap();
        assert!(!result.has_warnings());

        let layout = result.layout;
        assert_eq!(layout.name, "Small");

        let dot = layout.key_at(Section::Symbolic, 0, 2).unwrap();
        assert_eq!(dot.symbol, ".");
        assert!(dot.has_alternates);
        assert_eq!(layout.alternates_for("."), [";", ","]);

        let shift = layout.key_at(Section::Alphabetic, 0, 0).unwrap();
        assert_eq!(shift.kind, KeyKind::Shift);
        assert_eq!(
            layout.key_at(Section::Alphabetic, 0, 1).unwrap().kind,
            KeyKind::Letter
        );
    }

    #[test]
    fn test_parse_missing_file() {
        let err = parse_layout_file("/nonexistent/path/to/layout.json").unwrap_err();
        let display_str = format!("{}", err);

        match &err {
            LayoutError::IoError {
                file_path,
                suggestion,
                ..
            } => {
                assert!(file_path.is_some(), "Error should include file path");
                assert!(suggestion.is_some(), "Error should include suggestion");
                assert!(display_str.contains("I/O error"));
                assert!(display_str.contains("/nonexistent/path/to/layout.json"));
            }
            _ => panic!("Expected IoError variant"),
        }
    }

    #[test]
    fn test_malformed_json_with_line_number() {
        let json = r#"{
            "name": "Test",
            "symbolic":
        }"#;

        let err = parse_layout_from_string(json).unwrap_err();
        let display_str = format!("{}", err);

        match &err {
            LayoutError::JsonError {
                line_number,
                suggestion,
                ..
            } => {
                assert!(line_number.is_some(), "Should include line number");
                assert!(suggestion.is_some(), "Should include suggestion");
                assert!(display_str.contains("line"));
                assert!(display_str.contains("Suggestion"));
            }
            _ => panic!("Expected JsonError variant"),
        }
    }

    #[test]
    fn test_unknown_action_is_json_error() {
        let json = r#"{"name": "Bad", "actions": [[{"action": "warp"}]]}"#;
        assert!(matches!(
            parse_layout_from_string(json),
            Err(LayoutError::JsonError { .. })
        ));
    }

    #[test]
    fn test_empty_alternates_fails_with_path() {
        let json = r#"{"name": "Bad", "symbolic": [["."]], "alternates": {".": []}}"#;

        let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
        temp_file
            .write_all(json.as_bytes())
            .expect("Failed to write temp file");
        let path = temp_file.path().to_str().unwrap();

        match parse_layout_file(path) {
            Err(LayoutError::ValidationError { file_path, issues }) => {
                assert_eq!(file_path.as_deref(), Some(path));
                assert_eq!(issues[0].field_path, "alternates[.]");
            }
            other => panic!("Expected ValidationError, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_layout_file_keeps_warnings() {
        let json = r##"{"symbolic": [["1"]], "alternates": {"#": ["$"]}}"##;

        let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
        temp_file
            .write_all(json.as_bytes())
            .expect("Failed to write temp file");
        let path = temp_file.path().to_str().unwrap();

        let result = parse_layout_file(path).unwrap();
        assert_eq!(result.warnings.len(), 2);
        assert_eq!(result.layout.alternates_for("#"), ["$"]);
        assert_eq!(result.layout.key_at(Section::Symbolic, 0, 0).unwrap().symbol, "1");
    }

    #[test]
    fn test_builtin_definition_round_trips_through_json() {
        let json = serde_json::to_string(&LayoutDefinition::coders(false)).unwrap();
        let result = parse_layout_from_string(&json).unwrap();
        assert!(!result.has_warnings());
        assert_eq!(result.into_layout(), KeyLayout::coders());
    }
}
