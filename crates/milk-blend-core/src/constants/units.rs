// ABOUTME: Volume conversion constants expressed in US cups
// ABOUTME: The cup is the canonical unit for every blend volume calculation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Milk Blend Contributors

/// Milliliters in one US cup
pub const ML_PER_CUP: f64 = 236.588;

/// Cups per teaspoon (48 tsp per cup)
pub const CUPS_PER_TEASPOON: f64 = 1.0 / 48.0;
/// Cups per tablespoon (16 tbsp per cup)
pub const CUPS_PER_TABLESPOON: f64 = 1.0 / 16.0;
/// Cups per cup
pub const CUPS_PER_CUP: f64 = 1.0;
/// Cups per US pint
pub const CUPS_PER_PINT: f64 = 2.0;
/// Cups per US quart
pub const CUPS_PER_QUART: f64 = 4.0;
/// Cups per US gallon
pub const CUPS_PER_GALLON: f64 = 16.0;
/// Cups per milliliter
pub const CUPS_PER_MILLILITER: f64 = 1.0 / ML_PER_CUP;
/// Cups per liter
pub const CUPS_PER_LITER: f64 = 1000.0 / ML_PER_CUP;
