// ABOUTME: Derived quantities computed from the blend state and reference data
// ABOUTME: Weighted milk properties, nutrition, ingredient adjustment, and impact narrative
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Milk Blend Contributors

//! Derived-quantity engine.
//!
//! Everything here is a pure function of `&ReferenceData` and `&BlendState`.
//! Weighted aggregates sum `ratio / 100 * value` over the types with a
//! non-zero share, in canonical order.

/// Substitution impact assessment
pub mod impact;
/// Ingredient classification and quantity adjustment
pub mod ingredients;
/// Blended milk properties and substitute recommendations
pub mod milk_info;
/// Blended nutrition per cup
pub mod nutrition;

pub use impact::{
    substitution_impact, ImpactAspect, ImpactChange, OverallAssessment, SubstitutionImpact,
};
pub use ingredients::{
    adjust_ingredient, adjust_ingredients, calcium_chloride_suppressed, categorize_ingredient,
    recipe_uses_raw_milk, rennet_adjustment, volume_conversion_factor, AdjustOptions,
};
pub use milk_info::{
    blend_label, blended_milk_info, majority_coagulation_speed, recommend_substitute,
    weighted_property, BlendedMilkInfo, SubstituteRecommendation,
};
pub use nutrition::blended_nutrition;

/// Round half away from zero to `places` decimals
#[must_use]
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10_f64.powi(places);
    (value * factor).round() / factor
}

/// Percent for display: whole numbers without decimals, otherwise one decimal
#[must_use]
pub fn format_percent(value: f64) -> String {
    let rounded = round_to(value, 1);
    if rounded.fract() == 0.0 {
        format!("{rounded:.0}")
    } else {
        format!("{rounded:.1}")
    }
}
