// ABOUTME: Volume units accepted for milk volume entry
// ABOUTME: Parses free-text unit names and converts to and from the canonical cup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Milk Blend Contributors

use crate::constants::units::{
    CUPS_PER_CUP, CUPS_PER_GALLON, CUPS_PER_LITER, CUPS_PER_MILLILITER, CUPS_PER_PINT,
    CUPS_PER_QUART, CUPS_PER_TABLESPOON, CUPS_PER_TEASPOON,
};
use serde::{Deserialize, Serialize};

/// Volume measurement unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum VolumeUnit {
    /// US teaspoon
    Teaspoon,
    /// US tablespoon
    Tablespoon,
    /// US cup (canonical unit)
    #[default]
    Cup,
    /// US pint
    Pint,
    /// US quart
    Quart,
    /// US gallon
    Gallon,
    /// Milliliter
    Milliliter,
    /// Liter
    Liter,
}

impl VolumeUnit {
    /// Every supported unit
    pub const ALL: [Self; 8] = [
        Self::Teaspoon,
        Self::Tablespoon,
        Self::Cup,
        Self::Pint,
        Self::Quart,
        Self::Gallon,
        Self::Milliliter,
        Self::Liter,
    ];

    /// Parse a free-text unit name ("tbsp", "Cups", "l", "gallons")
    #[must_use]
    pub fn parse(unit: &str) -> Option<Self> {
        let normalized = unit.trim().trim_end_matches('.').to_lowercase();
        let unit = match normalized.as_str() {
            "tsp" | "teaspoon" | "teaspoons" => Self::Teaspoon,
            "tbsp" | "tbs" | "tbl" | "tablespoon" | "tablespoons" => Self::Tablespoon,
            "c" | "cup" | "cups" => Self::Cup,
            "pt" | "pint" | "pints" => Self::Pint,
            "qt" | "quart" | "quarts" => Self::Quart,
            "gal" | "gallon" | "gallons" => Self::Gallon,
            "ml" | "milliliter" | "milliliters" | "millilitre" | "millilitres" => {
                Self::Milliliter
            }
            "l" | "liter" | "liters" | "litre" | "litres" => Self::Liter,
            _ => return None,
        };
        Some(unit)
    }

    /// How many cups one of this unit holds
    #[must_use]
    pub const fn cups_per_unit(&self) -> f64 {
        match self {
            Self::Teaspoon => CUPS_PER_TEASPOON,
            Self::Tablespoon => CUPS_PER_TABLESPOON,
            Self::Cup => CUPS_PER_CUP,
            Self::Pint => CUPS_PER_PINT,
            Self::Quart => CUPS_PER_QUART,
            Self::Gallon => CUPS_PER_GALLON,
            Self::Milliliter => CUPS_PER_MILLILITER,
            Self::Liter => CUPS_PER_LITER,
        }
    }

    /// Convert an amount in this unit to cups
    #[must_use]
    pub fn to_cups(&self, value: f64) -> f64 {
        value * self.cups_per_unit()
    }

    /// Convert an amount in cups to this unit
    #[must_use]
    pub fn from_cups(&self, cups: f64) -> f64 {
        cups / self.cups_per_unit()
    }

    /// Abbreviation for display
    #[must_use]
    pub const fn abbreviation(&self) -> &'static str {
        match self {
            Self::Teaspoon => "tsp",
            Self::Tablespoon => "tbsp",
            Self::Cup => "cup",
            Self::Pint => "pt",
            Self::Quart => "qt",
            Self::Gallon => "gal",
            Self::Milliliter => "ml",
            Self::Liter => "l",
        }
    }
}
