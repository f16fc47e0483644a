// ABOUTME: Free-text volume unit conversion to and from the canonical cup
// ABOUTME: Unknown units are logged and treated as cups rather than rejected
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Milk Blend Contributors

use milk_blend_core::models::VolumeUnit;
use tracing::warn;

/// Convert `value` expressed in `unit` to cups.
///
/// Unknown unit strings are treated as already being cups.
#[must_use]
pub fn convert_to_cups(value: f64, unit: &str) -> f64 {
    VolumeUnit::parse(unit).map_or_else(
        || {
            warn!(unit, "unknown volume unit, treating value as cups");
            value
        },
        |parsed| parsed.to_cups(value),
    )
}

/// Convert `cups` to `unit`.
///
/// Unknown unit strings are treated as cups.
#[must_use]
pub fn convert_from_cups(cups: f64, unit: &str) -> f64 {
    VolumeUnit::parse(unit).map_or_else(
        || {
            warn!(unit, "unknown volume unit, returning cups unchanged");
            cups
        },
        |parsed| parsed.from_cups(cups),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quart_to_cups() {
        assert!((convert_to_cups(2.0, "quarts") - 8.0).abs() < 1e-12);
    }

    #[test]
    fn test_unknown_unit_is_identity() {
        assert!((convert_to_cups(3.0, "splash") - 3.0).abs() < f64::EPSILON);
        assert!((convert_from_cups(3.0, "splash") - 3.0).abs() < f64::EPSILON);
    }
}
