// ABOUTME: Core data models for milk reference data and recipe input/output
// ABOUTME: Re-exports milk types, nutrition records, units, reference data, and recipe types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Milk Blend Contributors

/// Milk type identifiers and per-type properties
pub mod milk;
/// Nutrition per cup records
pub mod nutrition;
/// Recipe input and adjusted ingredient output
pub mod recipe;
/// Complete reference dataset with validation
pub mod reference;
/// Volume units with conversion to the canonical cup
pub mod units;

pub use milk::{CoagulationSpeed, MilkType, MilkTypeId};
pub use nutrition::NutritionPerCup;
pub use recipe::{
    AdjustedIngredient, Ingredient, IngredientCategory, Instruction, MilkSubstitutions, Recipe,
};
pub use reference::{
    CalciumChlorideGuideline, CalciumChlorideGuidelines, FactorTable, ReferenceData,
};
pub use units::VolumeUnit;
