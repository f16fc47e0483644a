// ABOUTME: Weighted nutrition per cup for the current milk blend
// ABOUTME: Calories and milligram fields are whole numbers, gram fields one decimal
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Milk Blend Contributors

use super::round_to;
use crate::blend::BlendState;
use milk_blend_core::constants::blend::RATIO_TOTAL;
use milk_blend_core::models::{NutritionPerCup, ReferenceData};

/// Nutrition per cup of the blend.
///
/// Types without a nutrition entry contribute nothing.
#[must_use]
pub fn blended_nutrition(reference: &ReferenceData, state: &BlendState) -> NutritionPerCup {
    let total = state
        .contributing()
        .filter_map(|(id, ratio)| {
            reference
                .nutrition(id)
                .map(|nutrition| nutrition.scaled(ratio / RATIO_TOTAL))
        })
        .fold(NutritionPerCup::default(), |acc, part| acc.plus(&part));

    NutritionPerCup {
        calories: round_to(total.calories, 0),
        protein_g: round_to(total.protein_g, 1),
        fat_g: round_to(total.fat_g, 1),
        carbohydrates_g: round_to(total.carbohydrates_g, 1),
        sugar_g: round_to(total.sugar_g, 1),
        calcium_mg: round_to(total.calcium_mg, 0),
        cholesterol_mg: round_to(total.cholesterol_mg, 0),
        sodium_mg: round_to(total.sodium_mg, 0),
    }
}
