// ABOUTME: Ingredient quantity parsing and culinary fraction formatting
// ABOUTME: Handles decimals, fractions, mixed numbers, ranges, and unicode vulgar fractions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Milk Blend Contributors

//! Quantity text handling.
//!
//! Parsing accepts the forms recipe authors actually write: `"2"`, `"0.5"`,
//! `"1/2"`, `"1 1/2"`, `"2-3"` (lower bound), `"1½"`. Anything else, such as
//! `"to taste"`, has no numeric value and is passed through untouched by
//! callers.
//!
//! Formatting snaps to the fractions found on measuring cups and spoons
//! (eighths, sixths, thirds) when close enough, and otherwise prints up to
//! two decimals.

use regex::Regex;
use std::sync::LazyLock;

/// Unicode vulgar fractions and their ASCII spelling
const VULGAR_FRACTIONS: &[(char, &str)] = &[
    ('½', "1/2"),
    ('⅓', "1/3"),
    ('⅔', "2/3"),
    ('¼', "1/4"),
    ('¾', "3/4"),
    ('⅕', "1/5"),
    ('⅙', "1/6"),
    ('⅚', "5/6"),
    ('⅛', "1/8"),
    ('⅜', "3/8"),
    ('⅝', "5/8"),
    ('⅞', "7/8"),
];

/// Display fractions as (numerator, denominator)
const CULINARY_FRACTIONS: &[(u8, u8)] = &[
    (1, 8),
    (1, 6),
    (1, 4),
    (1, 3),
    (3, 8),
    (1, 2),
    (5, 8),
    (2, 3),
    (3, 4),
    (5, 6),
    (7, 8),
];

static RANGE_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^([\d./ ]+?)\s*(?:-|–|—|\bto\b)\s*[\d.]").ok());
static MIXED_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^(\d+)\s+(\d+)\s*/\s*(\d+)").ok());
static FRACTION_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^(\d+)\s*/\s*(\d+)").ok());
static DECIMAL_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^(\d+(?:\.\d+)?|\.\d+)").ok());

fn expand_vulgar_fractions(text: &str) -> String {
    let mut expanded = String::with_capacity(text.len() + 4);
    for ch in text.chars() {
        if let Some((_, ascii)) = VULGAR_FRACTIONS.iter().find(|(glyph, _)| *glyph == ch) {
            expanded.push(' ');
            expanded.push_str(ascii);
        } else {
            expanded.push(ch);
        }
    }
    expanded.trim().to_owned()
}

fn divide(numerator: &str, denominator: &str) -> Option<f64> {
    let numerator: f64 = numerator.parse().ok()?;
    let denominator: f64 = denominator.parse().ok()?;
    if denominator == 0.0 {
        None
    } else {
        Some(numerator / denominator)
    }
}

fn parse_single(text: &str) -> Option<f64> {
    let text = text.trim();

    if let Some(caps) = MIXED_RE.as_ref().and_then(|re| re.captures(text)) {
        let whole: f64 = caps[1].parse().ok()?;
        return divide(&caps[2], &caps[3]).map(|fraction| whole + fraction);
    }

    if let Some(caps) = FRACTION_RE.as_ref().and_then(|re| re.captures(text)) {
        return divide(&caps[1], &caps[2]);
    }

    DECIMAL_RE
        .as_ref()
        .and_then(|re| re.captures(text))
        .and_then(|caps| caps[1].parse().ok())
}

/// Numeric value of a quantity string, or `None` for free text.
///
/// Ranges yield their lower bound.
#[must_use]
pub fn parse_quantity(quantity: &str) -> Option<f64> {
    let text = expand_vulgar_fractions(&quantity.to_lowercase());
    if text.is_empty() {
        return None;
    }

    if let Some(caps) = RANGE_RE.as_ref().and_then(|re| re.captures(&text)) {
        if let Some(lower) = parse_single(&caps[1]) {
            return Some(lower);
        }
    }

    parse_single(&text)
}

fn format_decimal(value: f64) -> String {
    let fixed = format!("{value:.2}");
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    if trimmed.is_empty() {
        "0".to_owned()
    } else {
        trimmed.to_owned()
    }
}

/// Display a quantity, snapping to a culinary fraction when the fractional
/// part lies strictly within `tolerance` of one.
#[must_use]
pub fn format_quantity(value: f64, tolerance: f64) -> String {
    if !value.is_finite() || value <= 0.0 {
        return "0".to_owned();
    }

    let whole = value.trunc();
    let fraction = value - whole;

    if fraction < tolerance {
        return if whole > 0.0 {
            format!("{whole:.0}")
        } else {
            format_decimal(value)
        };
    }
    if 1.0 - fraction < tolerance {
        return format!("{:.0}", whole + 1.0);
    }

    let closest = CULINARY_FRACTIONS
        .iter()
        .map(|&(num, den)| {
            let distance = (fraction - f64::from(num) / f64::from(den)).abs();
            (num, den, distance)
        })
        .filter(|(_, _, distance)| *distance < tolerance)
        .min_by(|a, b| a.2.total_cmp(&b.2));

    match closest {
        Some((num, den, _)) if whole > 0.0 => format!("{whole:.0} {num}/{den}"),
        Some((num, den, _)) => format!("{num}/{den}"),
        None => format_decimal(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use milk_blend_core::constants::blend::DEFAULT_FRACTION_SNAP_TOLERANCE as TOL;

    #[test]
    fn test_parse_forms() {
        assert_eq!(parse_quantity("2"), Some(2.0));
        assert_eq!(parse_quantity("0.5"), Some(0.5));
        assert_eq!(parse_quantity(".25"), Some(0.25));
        assert_eq!(parse_quantity("1/2"), Some(0.5));
        assert_eq!(parse_quantity("1 1/2"), Some(1.5));
        assert_eq!(parse_quantity("2-3"), Some(2.0));
        assert_eq!(parse_quantity("2 to 3"), Some(2.0));
        assert_eq!(parse_quantity("1/2 – 1"), Some(0.5));
        assert_eq!(parse_quantity("1½"), Some(1.5));
        assert_eq!(parse_quantity("¼"), Some(0.25));
    }

    #[test]
    fn test_parse_free_text() {
        assert_eq!(parse_quantity("to taste"), None);
        assert_eq!(parse_quantity(""), None);
        assert_eq!(parse_quantity("1/0"), None);
    }

    #[test]
    fn test_format_snaps_to_culinary_fractions() {
        assert_eq!(format_quantity(0.5, TOL), "1/2");
        assert_eq!(format_quantity(1.1, TOL), "1 1/8");
        assert_eq!(format_quantity(1.333, TOL), "1 1/3");
        assert_eq!(format_quantity(0.17, TOL), "1/6");
        assert_eq!(format_quantity(2.0, TOL), "2");
        assert_eq!(format_quantity(0.97, TOL), "1");
    }

    #[test]
    fn test_format_falls_back_to_decimal() {
        assert_eq!(format_quantity(0.55, TOL), "0.55");
        assert_eq!(format_quantity(0.02, TOL), "0.02");
        assert_eq!(format_quantity(0.0, TOL), "0");
    }
}
