// SPDX-License-Identifier: GPL-3.0-only

//! Validation rules for keyboard layout definitions.
//!
//! Validation is permissive: problems that would break the interaction core
//! (an empty alternates list, a key with no symbol) are fatal, everything
//! else is collected as a warning and the layout still loads.

use crate::layout::types::{
    ActionKey, CellDefinition, LayoutDefinition, LayoutError, Section, Severity, ValidationIssue,
};
use std::collections::HashSet;

/// Validates a layout definition.
///
/// Returns the collected warnings sorted by field path, or a
/// `LayoutError::ValidationError` carrying every fatal issue found.
pub fn validate_definition(definition: &LayoutDefinition) -> Result<Vec<ValidationIssue>, LayoutError> {
    let mut issues = Vec::new();

    validate_required_fields(definition, &mut issues);
    validate_cells(definition, &mut issues);
    validate_alternates(definition, &mut issues);

    let (mut errors, mut warnings): (Vec<_>, Vec<_>) = issues
        .into_iter()
        .partition(|issue| issue.severity == Severity::Error);

    if !errors.is_empty() {
        errors.sort_by(|a, b| a.field_path.cmp(&b.field_path));
        return Err(LayoutError::validation_error(errors));
    }

    warnings.sort_by(|a, b| a.field_path.cmp(&b.field_path));
    Ok(warnings)
}

/// Checks the layout-level fields.
pub fn validate_required_fields(definition: &LayoutDefinition, issues: &mut Vec<ValidationIssue>) {
    if definition.name.is_empty() {
        issues.push(
            ValidationIssue::new(Severity::Warning, "Layout name is empty", "name")
                .with_suggestion("Provide a descriptive name for the layout"),
        );
    }

    if Section::ALL
        .iter()
        .all(|section| definition.rows(*section).iter().all(Vec::is_empty))
    {
        issues.push(
            ValidationIssue::new(Severity::Warning, "Layout has no keys", "")
                .with_suggestion("Add rows to the symbolic, alphabetic or actions section"),
        );
    }
}

/// Checks every cell: symbols must be non-empty, shift needs letters to act on.
fn validate_cells(definition: &LayoutDefinition, issues: &mut Vec<ValidationIssue>) {
    let mut seen_symbols = HashSet::new();
    let mut has_shift = false;
    let mut has_letters = false;

    for section in Section::ALL {
        for (row_idx, row) in definition.rows(section).iter().enumerate() {
            for (col_idx, cell) in row.iter().enumerate() {
                let path = format!("{}[{}][{}]", section.as_str(), row_idx, col_idx);

                match cell {
                    CellDefinition::Symbol(symbol) if symbol.is_empty() => {
                        issues.push(
                            ValidationIssue::new(Severity::Error, "Key symbol is empty", path)
                                .with_suggestion(
                                    "Use a non-empty string or an action object like {\"action\": \"space\"}",
                                ),
                        );
                    }
                    CellDefinition::Symbol(symbol) => {
                        if section == Section::Alphabetic && symbol.chars().all(char::is_alphabetic) {
                            has_letters = true;
                        }
                        if !seen_symbols.insert(symbol.clone()) {
                            issues.push(ValidationIssue::new(
                                Severity::Warning,
                                format!("Symbol '{}' appears on more than one key", symbol),
                                path,
                            ));
                        }
                    }
                    CellDefinition::Action {
                        action: ActionKey::Shift,
                    } => has_shift = true,
                    CellDefinition::Action { .. } => {}
                }
            }
        }
    }

    if has_shift && !has_letters {
        issues.push(
            ValidationIssue::new(
                Severity::Warning,
                "Shift key present but the alphabetic section has no letters",
                "alphabetic",
            )
            .with_suggestion("Shift only affects letter keys in the alphabetic section"),
        );
    }
}

/// Checks the alternates table against the keys.
pub fn validate_alternates(definition: &LayoutDefinition, issues: &mut Vec<ValidationIssue>) {
    let symbols: HashSet<&str> = Section::ALL
        .iter()
        .flat_map(|section| definition.rows(*section).iter().flatten())
        .filter_map(|cell| match cell {
            CellDefinition::Symbol(symbol) => Some(symbol.as_str()),
            CellDefinition::Action { .. } => None,
        })
        .collect();

    for (symbol, alternates) in &definition.alternates {
        let path = format!("alternates[{}]", symbol);

        if alternates.is_empty() {
            issues.push(
                ValidationIssue::new(Severity::Error, "Alternates list is empty", &path)
                    .with_suggestion("List at least one alternate or remove the entry"),
            );
        }

        if let Some(index) = alternates.iter().position(String::is_empty) {
            issues.push(ValidationIssue::new(
                Severity::Error,
                format!("Alternate {} is an empty string", index),
                &path,
            ));
        }

        if !symbols.contains(symbol.as_str()) {
            issues.push(
                ValidationIssue::new(
                    Severity::Warning,
                    format!("No key carries the symbol '{}'", symbol),
                    &path,
                )
                .with_suggestion("Alternates are only reachable from a key with the same symbol"),
            );
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
