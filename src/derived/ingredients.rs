// ABOUTME: Ingredient categorization and blend-aware quantity adjustment
// ABOUTME: Milk by volume factor, rennet by strength factor, calcium chloride suppression, batch scaling
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Milk Blend Contributors

//! Ingredient adjustment.
//!
//! Each line is categorized by keyword, checked in the order milk, rennet,
//! calcium chloride. A line matching several categories takes the first.
//!
//! | Category          | Factor                                          |
//! |-------------------|-------------------------------------------------|
//! | milk              | volume conversion factor × batch multiplier     |
//! | rennet            | rennet adjustment × batch multiplier            |
//! | calcium chloride  | omitted when sheep ≥ 50%, else batch multiplier |
//! | other             | batch multiplier                                |
//!
//! Lines whose quantity has no numeric value pass through untouched.

use super::milk_info::blend_label;
use crate::blend::BlendState;
use crate::classifier::is_dairy_milk_text;
use crate::quantity::{format_quantity, parse_quantity};
use milk_blend_core::constants::blend::{
    CALCIUM_CHLORIDE_SHEEP_OMIT_PERCENT, DEFAULT_FRACTION_SNAP_TOLERANCE, RATIO_TOTAL,
    SHEEP_MILK_TYPE,
};
use milk_blend_core::constants::keywords::{
    contains_any, CALCIUM_CHLORIDE_KEYWORDS, RAW_MILK_KEYWORDS, RENNET_KEYWORDS,
};
use milk_blend_core::models::{
    AdjustedIngredient, Ingredient, IngredientCategory, MilkTypeId, ReferenceData,
};

/// Factors closer than this to 1.0 leave a line unchanged
const UNIT_FACTOR_EPSILON: f64 = 1e-9;

/// Per-call settings for ingredient adjustment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdjustOptions {
    /// Fraction snapping tolerance for formatted quantities
    pub fraction_tolerance: f64,
    /// The recipe's milk is raw; selects the raw calcium chloride advice
    pub raw_milk: bool,
}

impl Default for AdjustOptions {
    fn default() -> Self {
        Self {
            fraction_tolerance: DEFAULT_FRACTION_SNAP_TOLERANCE,
            raw_milk: false,
        }
    }
}

/// Category of an ingredient line by keyword, milk first
#[must_use]
pub fn categorize_ingredient(ingredient: &Ingredient) -> IngredientCategory {
    let item = ingredient.item.to_lowercase();
    if is_dairy_milk_text(&item) {
        IngredientCategory::Milk
    } else if contains_any(&item, RENNET_KEYWORDS) {
        IngredientCategory::Rennet
    } else if contains_any(&item, CALCIUM_CHLORIDE_KEYWORDS) {
        IngredientCategory::CalciumChloride
    } else {
        IngredientCategory::Other
    }
}

/// Whether the recipe's milk line says the milk is raw
#[must_use]
pub fn recipe_uses_raw_milk(ingredients: &[Ingredient]) -> bool {
    ingredients.iter().any(|ingredient| {
        let item = ingredient.item.to_lowercase();
        is_dairy_milk_text(&item) && contains_any(&item, RAW_MILK_KEYWORDS)
    })
}

/// Multiplier turning the original milk quantity into the blend quantity.
///
/// `Σ ratio / 100 × factor(original → type)` over the blend.
#[must_use]
pub fn volume_conversion_factor(reference: &ReferenceData, state: &BlendState) -> f64 {
    let original = state.original_milk_type();
    state
        .contributing()
        .map(|(id, ratio)| ratio / RATIO_TOTAL * reference.conversion_factor(original, id))
        .sum()
}

/// Blend rennet factor relative to the original milk's rennet factor
#[must_use]
pub fn rennet_adjustment(reference: &ReferenceData, state: &BlendState) -> f64 {
    let blended: f64 = state
        .contributing()
        .map(|(id, ratio)| ratio / RATIO_TOTAL * reference.rennet_factor(id))
        .sum();
    let original = reference.rennet_factor(state.original_milk_type());
    if original > 0.0 {
        blended / original
    } else {
        1.0
    }
}

/// Sheep share is high enough that calcium chloride should be left out
#[must_use]
pub fn calcium_chloride_suppressed(state: &BlendState) -> bool {
    state.ratio(&MilkTypeId::from(SHEEP_MILK_TYPE)) >= CALCIUM_CHLORIDE_SHEEP_OMIT_PERCENT
}

fn is_unit_factor(factor: f64) -> bool {
    (factor - 1.0).abs() < UNIT_FACTOR_EPSILON
}

fn milk_display_item(reference: &ReferenceData, state: &BlendState, source: &Ingredient) -> String {
    if state.is_unchanged_from_original() {
        return source.item.clone();
    }
    let mut contributing = state.contributing();
    match (contributing.next(), contributing.next()) {
        (Some((id, _)), None) => format!("{} milk", reference.display_name(id)),
        _ => format!("milk blend ({})", blend_label(reference, state)),
    }
}

/// Scale a parsed amount; a unit factor keeps the source quantity text
fn scaled(
    source: &Ingredient,
    category: IngredientCategory,
    amount: f64,
    factor: f64,
    tolerance: f64,
) -> AdjustedIngredient {
    let mut adjusted = AdjustedIngredient::passthrough(source, category);
    if is_unit_factor(factor) {
        adjusted.amount = Some(amount);
    } else {
        let value = amount * factor;
        adjusted.amount = Some(value);
        adjusted.quantity = format_quantity(value, tolerance);
    }
    adjusted
}

fn adjust_milk(
    reference: &ReferenceData,
    state: &BlendState,
    source: &Ingredient,
    amount: f64,
    options: AdjustOptions,
) -> AdjustedIngredient {
    let factor = volume_conversion_factor(reference, state);
    let mut adjusted = scaled(
        source,
        IngredientCategory::Milk,
        amount,
        factor * state.batch_multiplier(),
        options.fraction_tolerance,
    );
    if !state.is_unchanged_from_original() {
        adjusted.adjusted = true;
        adjusted.display_item = milk_display_item(reference, state, source);
        adjusted.note = Some(format!(
            "Converted from {} milk, volume factor {factor:.2}",
            reference.display_name(state.original_milk_type())
        ));
    }
    adjusted
}

fn adjust_rennet(
    reference: &ReferenceData,
    state: &BlendState,
    source: &Ingredient,
    amount: f64,
    options: AdjustOptions,
) -> AdjustedIngredient {
    let factor = rennet_adjustment(reference, state);
    let mut adjusted = scaled(
        source,
        IngredientCategory::Rennet,
        amount,
        factor * state.batch_multiplier(),
        options.fraction_tolerance,
    );
    if !is_unit_factor(factor) {
        adjusted.adjusted = true;
        adjusted.note = Some(format!("Rennet strength adjusted ×{factor:.2} for the blend"));
    }
    adjusted
}

fn calcium_chloride_note(
    reference: &ReferenceData,
    state: &BlendState,
    options: AdjustOptions,
) -> Option<String> {
    let dominant = state.dominant_milk_type();
    reference
        .calcium_chloride_guideline(dominant)
        .map(|guideline| {
            if options.raw_milk {
                guideline.raw.clone()
            } else {
                guideline.pasteurized.clone()
            }
        })
        .filter(|note| !note.is_empty())
}

/// Adjust one ingredient line for the current blend and batch size.
///
/// The source line is never modified.
#[must_use]
pub fn adjust_ingredient(
    reference: &ReferenceData,
    state: &BlendState,
    ingredient: &Ingredient,
    options: AdjustOptions,
) -> AdjustedIngredient {
    let category = categorize_ingredient(ingredient);

    if category == IngredientCategory::CalciumChloride && calcium_chloride_suppressed(state) {
        let mut adjusted = AdjustedIngredient::passthrough(ingredient, category);
        adjusted.amount = Some(0.0);
        adjusted.quantity = "0".to_owned();
        adjusted.adjusted = true;
        adjusted.omit = true;
        adjusted.note = Some(format!(
            "Omit: sheep milk at {CALCIUM_CHLORIDE_SHEEP_OMIT_PERCENT}% or more supplies enough calcium"
        ));
        return adjusted;
    }

    let Some(amount) = parse_quantity(&ingredient.quantity) else {
        return AdjustedIngredient::passthrough(ingredient, category);
    };

    match category {
        IngredientCategory::Milk => adjust_milk(reference, state, ingredient, amount, options),
        IngredientCategory::Rennet => adjust_rennet(reference, state, ingredient, amount, options),
        IngredientCategory::CalciumChloride => {
            let mut adjusted = scaled(
                ingredient,
                category,
                amount,
                state.batch_multiplier(),
                options.fraction_tolerance,
            );
            adjusted.note = calcium_chloride_note(reference, state, options);
            adjusted
        }
        IngredientCategory::Other => scaled(
            ingredient,
            category,
            amount,
            state.batch_multiplier(),
            options.fraction_tolerance,
        ),
    }
}

/// Adjust every line, preserving order
#[must_use]
pub fn adjust_ingredients(
    reference: &ReferenceData,
    state: &BlendState,
    ingredients: &[Ingredient],
    options: AdjustOptions,
) -> Vec<AdjustedIngredient> {
    ingredients
        .iter()
        .map(|ingredient| adjust_ingredient(reference, state, ingredient, options))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_priority() {
        let milk_rennet = Ingredient::new("1", "tsp", "rennet diluted in milk");
        assert_eq!(categorize_ingredient(&milk_rennet), IngredientCategory::Milk);

        let cacl = Ingredient::new("1/4", "tsp", "Calcium Chloride (30%)");
        assert_eq!(
            categorize_ingredient(&cacl),
            IngredientCategory::CalciumChloride
        );

        let buttermilk = Ingredient::new("1/4", "cup", "cultured buttermilk");
        assert_eq!(categorize_ingredient(&buttermilk), IngredientCategory::Other);

        let coconut = Ingredient::new("1", "can", "coconut milk");
        assert_eq!(categorize_ingredient(&coconut), IngredientCategory::Other);
    }

    #[test]
    fn test_raw_milk_detection() {
        let raw = [Ingredient::new("1", "gallon", "Raw goat milk")];
        let pasteurized = [Ingredient::new("1", "gallon", "whole milk")];
        assert!(recipe_uses_raw_milk(&raw));
        assert!(!recipe_uses_raw_milk(&pasteurized));
    }
}
