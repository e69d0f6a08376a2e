// SPDX-License-Identifier: GPL-3.0-only

//! Key colours for light and dark appearance.
//!
//! Every key falls into a [`KeyCategory`] decided by its kind and symbol.
//! [`colors_for`] maps the ambient [`Appearance`] to a [`Palette`] holding
//! one colour per category, so the presentation layer can recolour the whole
//! keyboard in one pass whenever the desktop theme flips.
//!
//! # Color Functions
//!
//! - `colors_for`: the palette for an appearance
//! - `category_for`: the category of a key
//! - `key_background`: the final background of a key, including the
//!   shift-active and disabled treatments
//! - `appearance_of`: reads the appearance from a COSMIC theme

use cosmic::iced::Color;
use cosmic::Theme;

use crate::layout::{Key, KeyKind};

/// Alpha applied to keys while input is blocked.
pub const DISABLED_ALPHA: f32 = 0.6;

// ============================================================================
// Public API
// ============================================================================

/// Ambient light or dark style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Appearance {
    #[default]
    Light,
    Dark,
}

/// Colour group a key belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCategory {
    /// Letters on the alphabetic section
    Alphabet,
    /// Digits
    Number,
    /// `+ - * / = < > !`
    Operator,
    /// `( ) [ ] { }`
    Bracket,
    /// `& | ; :` and anything else on the symbolic section
    Punctuation,
    /// `" ' .`
    Quote,
    /// `_`
    Underscore,
    /// Action keys and shift
    Special,
}

/// One colour per key category plus the few extras the keyboard draws.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub alphabet: Color,
    pub number: Color,
    pub operator: Color,
    pub bracket: Color,
    pub punctuation: Color,
    pub quote: Color,
    pub underscore: Color,
    pub special: Color,
    /// Shift key while the one-shot shift is armed
    pub shift_active: Color,
    /// Hovered cell in the alternate picker
    pub popup_highlight: Color,
    /// Key label text
    pub text: Color,
    /// Label text on the hovered picker cell
    pub highlight_text: Color,
}

impl Palette {
    /// Colour of a category.
    #[must_use]
    pub fn category(&self, category: KeyCategory) -> Color {
        match category {
            KeyCategory::Alphabet => self.alphabet,
            KeyCategory::Number => self.number,
            KeyCategory::Operator => self.operator,
            KeyCategory::Bracket => self.bracket,
            KeyCategory::Punctuation => self.punctuation,
            KeyCategory::Quote => self.quote,
            KeyCategory::Underscore => self.underscore,
            KeyCategory::Special => self.special,
        }
    }
}

/// Returns the palette for an appearance.
///
/// The accent colours are shared between both appearances; only the neutral
/// greys behind letters and action keys, and the label colour, change.
#[must_use]
pub fn colors_for(appearance: Appearance) -> Palette {
    match appearance {
        Appearance::Light => Palette {
            alphabet: Color::from_rgb8(209, 209, 214),
            number: Color::from_rgb8(255, 149, 0),
            operator: Color::from_rgb8(255, 59, 48),
            bracket: Color::from_rgb8(0, 122, 255),
            punctuation: Color::from_rgb8(175, 82, 222),
            quote: Color::from_rgb8(255, 204, 0),
            underscore: Color::from_rgb8(52, 199, 89),
            special: Color::from_rgb8(199, 199, 204),
            shift_active: Color::from_rgb8(0, 122, 255),
            popup_highlight: Color::from_rgb8(0, 122, 255),
            text: Color::BLACK,
            highlight_text: Color::WHITE,
        },
        Appearance::Dark => Palette {
            alphabet: Color::from_rgb8(28, 28, 30),
            number: Color::from_rgb8(255, 159, 10),
            operator: Color::from_rgb8(255, 69, 58),
            bracket: Color::from_rgb8(10, 132, 255),
            punctuation: Color::from_rgb8(191, 90, 242),
            quote: Color::from_rgb8(255, 214, 10),
            underscore: Color::from_rgb8(48, 209, 88),
            special: Color::from_rgb8(44, 44, 46),
            shift_active: Color::from_rgb8(10, 132, 255),
            popup_highlight: Color::from_rgb8(10, 132, 255),
            text: Color::WHITE,
            highlight_text: Color::WHITE,
        },
    }
}

/// Returns the colour category of a key.
#[must_use]
pub fn category_for(key: &Key) -> KeyCategory {
    match key.kind {
        KeyKind::Letter => KeyCategory::Alphabet,
        KeyKind::Symbol => symbol_category(&key.symbol),
        _ => KeyCategory::Special,
    }
}

/// Returns the colour category of a symbol key's text.
#[must_use]
pub fn symbol_category(symbol: &str) -> KeyCategory {
    let mut chars = symbol.chars();
    let (Some(c), None) = (chars.next(), chars.next()) else {
        return KeyCategory::Punctuation;
    };

    match c {
        '0'..='9' => KeyCategory::Number,
        '(' | ')' | '[' | ']' | '{' | '}' => KeyCategory::Bracket,
        '+' | '-' | '*' | '/' | '=' | '<' | '>' | '!' => KeyCategory::Operator,
        '"' | '\'' | '.' => KeyCategory::Quote,
        '_' => KeyCategory::Underscore,
        c if c.is_alphabetic() => KeyCategory::Alphabet,
        _ => KeyCategory::Punctuation,
    }
}

/// Background colour of a key as drawn.
///
/// # Arguments
///
/// * `palette` - Palette for the current appearance
/// * `key` - The key being drawn
/// * `shift_active` - Whether the one-shot shift is armed
/// * `enabled` - Whether the key accepts input
#[must_use]
pub fn key_background(palette: &Palette, key: &Key, shift_active: bool, enabled: bool) -> Color {
    let color = if key.kind == KeyKind::Shift && shift_active {
        palette.shift_active
    } else {
        palette.category(category_for(key))
    };

    if enabled {
        color
    } else {
        color.scale_alpha(DISABLED_ALPHA)
    }
}

/// Reads the appearance from a COSMIC theme.
#[must_use]
pub fn appearance_of(theme: &Theme) -> Appearance {
    if theme.cosmic().is_dark {
        Appearance::Dark
    } else {
        Appearance::Light
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::KeyLayout;

    fn brightness(color: Color) -> f32 {
        (color.r + color.g + color.b) / 3.0
    }

    #[test]
    fn test_symbol_categories() {
        assert_eq!(symbol_category("7"), KeyCategory::Number);
        assert_eq!(symbol_category("{"), KeyCategory::Bracket);
        assert_eq!(symbol_category("!"), KeyCategory::Operator);
        assert_eq!(symbol_category("'"), KeyCategory::Quote);
        assert_eq!(symbol_category("."), KeyCategory::Quote);
        assert_eq!(symbol_category("_"), KeyCategory::Underscore);
        assert_eq!(symbol_category("|"), KeyCategory::Punctuation);
        assert_eq!(symbol_category("#"), KeyCategory::Punctuation);
        assert_eq!(symbol_category("=>"), KeyCategory::Punctuation);
    }

    #[test]
    fn test_key_categories_from_layout() {
        let layout = KeyLayout::coders();
        assert_eq!(category_for(layout.find("q").unwrap()), KeyCategory::Alphabet);
        assert_eq!(category_for(layout.find("0").unwrap()), KeyCategory::Number);
        assert_eq!(category_for(layout.find("⇧").unwrap()), KeyCategory::Special);
        assert_eq!(category_for(layout.find("⏎").unwrap()), KeyCategory::Special);
    }

    #[test]
    fn test_appearances_differ_in_neutrals() {
        let light = colors_for(Appearance::Light);
        let dark = colors_for(Appearance::Dark);

        assert!(brightness(light.alphabet) > brightness(dark.alphabet) + 0.1);
        assert!(brightness(light.special) > brightness(dark.special) + 0.1);
        assert_ne!(light.text, dark.text);
    }

    #[test]
    fn test_shift_and_disabled_backgrounds() {
        let layout = KeyLayout::coders();
        let palette = colors_for(Appearance::Light);
        let shift = layout.find("⇧").unwrap();

        assert_eq!(key_background(&palette, shift, false, true), palette.special);
        assert_eq!(key_background(&palette, shift, true, true), palette.shift_active);

        let dimmed = key_background(&palette, shift, false, false);
        assert!((dimmed.a - DISABLED_ALPHA).abs() < f32::EPSILON);
    }

    #[test]
    fn test_appearance_of_cosmic_themes() {
        assert_eq!(appearance_of(&Theme::dark()), Appearance::Dark);
        assert_eq!(appearance_of(&Theme::light()), Appearance::Light);
    }
}
