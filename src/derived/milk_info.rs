// ABOUTME: Weighted fat, protein, yield, coagulation, flavor, and texture for a blend
// ABOUTME: Also resolves exotic milk types to their recommended available substitute
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Milk Blend Contributors

use super::{format_percent, round_to};
use crate::blend::BlendState;
use milk_blend_core::constants::blend::RATIO_TOTAL;
use milk_blend_core::models::{CoagulationSpeed, MilkType, MilkTypeId, ReferenceData};
use serde::{Deserialize, Serialize};

/// Blend-wide milk properties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlendedMilkInfo {
    /// Display label, e.g. `"50% Cow, 50% Goat"`
    pub label: String,
    /// Weighted butterfat (percent, 1 dp)
    pub fat_percent: f64,
    /// Weighted protein (percent, 1 dp)
    pub protein_percent: f64,
    /// Weighted cheese yield (lb per gallon, 2 dp)
    pub cheese_yield_per_gallon_lb: f64,
    /// Speed bucket carrying the most ratio weight
    pub coagulation_speed: CoagulationSpeed,
    /// Flavor tags from types at or above the flavor threshold
    pub flavor_profile: Vec<String>,
    /// `"<ratio>% <name>: <notes>"` for the same types
    pub texture_notes: Vec<String>,
    /// Types with a non-zero share, in canonical order
    pub contributing_types: Vec<MilkTypeId>,
}

/// Recommended stand-in for a milk type that cannot be selected directly
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubstituteRecommendation {
    /// The requested type
    pub milk_type: MilkTypeId,
    /// The available type to use instead
    pub substitute: MilkTypeId,
    /// Dataset notes about the swap
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// `Σ ratio / 100 × property` over contributing types known to the dataset
pub fn weighted_property<F>(reference: &ReferenceData, state: &BlendState, property: F) -> f64
where
    F: Fn(&MilkType) -> f64,
{
    state
        .contributing()
        .filter_map(|(id, ratio)| {
            reference
                .milk_type(id)
                .map(|milk| ratio / RATIO_TOTAL * property(milk))
        })
        .sum()
}

/// Coagulation bucket with the largest accumulated ratio weight.
///
/// Buckets are tallied in canonical milk-type order; on a tie the bucket
/// reached first wins.
#[must_use]
pub fn majority_coagulation_speed(reference: &ReferenceData, state: &BlendState) -> CoagulationSpeed {
    let mut tally: Vec<(CoagulationSpeed, f64)> = Vec::with_capacity(CoagulationSpeed::ALL.len());
    for (id, ratio) in state.contributing() {
        let Some(milk) = reference.milk_type(id) else {
            continue;
        };
        match tally
            .iter_mut()
            .find(|(speed, _)| *speed == milk.coagulation_speed)
        {
            Some((_, weight)) => *weight += ratio,
            None => tally.push((milk.coagulation_speed, ratio)),
        }
    }

    let mut winner: Option<(CoagulationSpeed, f64)> = None;
    for (speed, weight) in tally {
        if winner.is_none_or(|(_, best)| weight > best) {
            winner = Some((speed, weight));
        }
    }
    winner.map_or_else(CoagulationSpeed::default, |(speed, _)| speed)
}

/// `"50% Cow, 50% Goat"` style label in canonical order
#[must_use]
pub fn blend_label(reference: &ReferenceData, state: &BlendState) -> String {
    state
        .contributing()
        .map(|(id, ratio)| format!("{}% {}", format_percent(ratio), reference.display_name(id)))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Weighted properties of the current blend.
///
/// Types below `flavor_threshold` percent still count toward the numeric
/// fields but are left out of the flavor and texture summaries.
#[must_use]
pub fn blended_milk_info(
    reference: &ReferenceData,
    state: &BlendState,
    flavor_threshold: f64,
) -> BlendedMilkInfo {
    let mut flavor_profile: Vec<String> = Vec::new();
    let mut texture_notes = Vec::new();

    for (id, ratio) in state.contributing() {
        if ratio < flavor_threshold {
            continue;
        }
        let Some(milk) = reference.milk_type(id) else {
            continue;
        };
        for tag in &milk.flavor_profile {
            if !flavor_profile.contains(tag) {
                flavor_profile.push(tag.clone());
            }
        }
        if !milk.texture_notes.is_empty() {
            texture_notes.push(format!(
                "{}% {}: {}",
                format_percent(ratio),
                milk.display_name(id),
                milk.texture_notes
            ));
        }
    }

    BlendedMilkInfo {
        label: blend_label(reference, state),
        fat_percent: round_to(weighted_property(reference, state, |m| m.fat_percent), 1),
        protein_percent: round_to(weighted_property(reference, state, |m| m.protein_percent), 1),
        cheese_yield_per_gallon_lb: round_to(
            weighted_property(reference, state, |m| m.cheese_yield_per_gallon_lb),
            2,
        ),
        coagulation_speed: majority_coagulation_speed(reference, state),
        flavor_profile,
        texture_notes,
        contributing_types: state.contributing().map(|(id, _)| id.clone()).collect(),
    }
}

/// Best available substitute for `milk_type`, with the dataset's notes.
///
/// Returns `None` only when the dataset offers no available type at all.
#[must_use]
pub fn recommend_substitute(
    reference: &ReferenceData,
    milk_type: &MilkTypeId,
) -> Option<SubstituteRecommendation> {
    let substitute = reference.substitute_for(milk_type)?.clone();
    let notes = if &substitute == milk_type {
        None
    } else {
        reference
            .milk_type(milk_type)
            .and_then(|milk| milk.substitute_notes.clone())
    };
    Some(SubstituteRecommendation {
        milk_type: milk_type.clone(),
        substitute,
        notes,
    })
}
