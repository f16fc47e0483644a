// ABOUTME: Rule-based narrative comparing the blend with the recipe's original milk
// ABOUTME: Emits fat, protein, yield, coagulation, and flavor change statements plus canned advice
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Milk Blend Contributors

//! Substitution impact.
//!
//! Change statements are counted to bucket the overall assessment:
//! 0 very similar, 1-2 similar, 3-4 noticeably different, 5+ significantly
//! different. Goat and sheep advice is reported alongside and does not
//! count toward the bucket.

use super::milk_info::{blended_milk_info, BlendedMilkInfo};
use super::round_to;
use crate::blend::BlendState;
use crate::config::ImpactConfig;
use milk_blend_core::constants::blend::{GOAT_MILK_TYPE, SHEEP_MILK_TYPE};
use milk_blend_core::models::{MilkType, MilkTypeId, ReferenceData};
use serde::{Deserialize, Serialize};

/// Overall similarity of the blend to the original milk
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverallAssessment {
    /// No change statements
    VerySimilar,
    /// One or two
    Similar,
    /// Three or four
    NoticeablyDifferent,
    /// Five or more
    SignificantlyDifferent,
}

impl OverallAssessment {
    /// Bucket for a number of change statements
    #[must_use]
    pub const fn from_change_count(count: usize) -> Self {
        match count {
            0 => Self::VerySimilar,
            1 | 2 => Self::Similar,
            3 | 4 => Self::NoticeablyDifferent,
            _ => Self::SignificantlyDifferent,
        }
    }
}

/// What a change statement is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImpactAspect {
    /// Butterfat
    Fat,
    /// Protein
    Protein,
    /// Cheese yield
    Yield,
    /// Rennet set speed
    Coagulation,
    /// Flavor tags gained
    FlavorGained,
    /// Flavor tags lost
    FlavorLost,
}

/// One qualitative change
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImpactChange {
    /// Aspect that changed
    pub aspect: ImpactAspect,
    /// Human-readable statement
    pub message: String,
}

/// Impact of the current blend relative to the original milk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubstitutionImpact {
    /// Milk the recipe was written for
    pub original_milk_type: MilkTypeId,
    /// Blend label
    pub blend_label: String,
    /// Blend fat minus original fat (points, 1 dp)
    pub fat_delta: f64,
    /// Blend protein minus original protein (points, 1 dp)
    pub protein_delta: f64,
    /// Blend yield divided by original yield (2 dp); `None` when the original has no yield
    pub yield_ratio: Option<f64>,
    /// Change statements
    pub changes: Vec<ImpactChange>,
    /// Milk-specific advice
    pub advice: Vec<String>,
    /// Bucket by number of change statements
    pub overall: OverallAssessment,
}

fn original_info(original: &MilkType) -> (f64, f64, f64) {
    (
        round_to(original.fat_percent, 1),
        round_to(original.protein_percent, 1),
        original.cheese_yield_per_gallon_lb,
    )
}

fn push(changes: &mut Vec<ImpactChange>, aspect: ImpactAspect, message: String) {
    changes.push(ImpactChange { aspect, message });
}

fn compare_composition(
    blend: &BlendedMilkInfo,
    original: &MilkType,
    config: &ImpactConfig,
    changes: &mut Vec<ImpactChange>,
) -> (f64, f64, Option<f64>) {
    let (fat, protein, yield_lb) = original_info(original);
    let fat_delta = round_to(blend.fat_percent - fat, 1);
    let protein_delta = round_to(blend.protein_percent - protein, 1);

    if fat_delta.abs() >= config.fat_delta_threshold {
        let message = if fat_delta > 0.0 {
            format!("Higher butterfat (+{fat_delta:.1} pts): richer, creamier paste")
        } else {
            format!("Lower butterfat ({fat_delta:.1} pts): leaner, firmer paste")
        };
        push(changes, ImpactAspect::Fat, message);
    }

    if protein_delta.abs() >= config.protein_delta_threshold {
        let message = if protein_delta > 0.0 {
            format!("More protein (+{protein_delta:.1} pts): firmer set and more curd")
        } else {
            format!("Less protein ({protein_delta:.1} pts): softer set and less curd")
        };
        push(changes, ImpactAspect::Protein, message);
    }

    let yield_ratio = (yield_lb > 0.0).then(|| blend.cheese_yield_per_gallon_lb / yield_lb);
    if let Some(ratio) = yield_ratio {
        if ratio > config.higher_yield_ratio {
            push(
                changes,
                ImpactAspect::Yield,
                format!("Higher yield: about {ratio:.2}× the original per gallon"),
            );
        } else if ratio < config.lower_yield_ratio {
            push(
                changes,
                ImpactAspect::Yield,
                format!("Lower yield: about {ratio:.2}× the original per gallon"),
            );
        }
    }

    (fat_delta, protein_delta, yield_ratio.map(|r| round_to(r, 2)))
}

fn compare_character(
    blend: &BlendedMilkInfo,
    original: &MilkType,
    original_name: &str,
    changes: &mut Vec<ImpactChange>,
) {
    if blend.coagulation_speed != original.coagulation_speed {
        let direction = if blend.coagulation_speed > original.coagulation_speed {
            "faster"
        } else {
            "slower"
        };
        push(
            changes,
            ImpactAspect::Coagulation,
            format!(
                "Sets {direction} than {original_name} milk ({} vs {}); adjust flocculation timing",
                blend.coagulation_speed.label(),
                original.coagulation_speed.label()
            ),
        );
    }

    let gained: Vec<&str> = blend
        .flavor_profile
        .iter()
        .filter(|tag| !original.flavor_profile.contains(tag))
        .map(String::as_str)
        .collect();
    if !gained.is_empty() {
        push(
            changes,
            ImpactAspect::FlavorGained,
            format!("Adds {} notes", gained.join(", ")),
        );
    }

    let lost: Vec<&str> = original
        .flavor_profile
        .iter()
        .filter(|tag| !blend.flavor_profile.contains(tag))
        .map(String::as_str)
        .collect();
    if !lost.is_empty() {
        push(
            changes,
            ImpactAspect::FlavorLost,
            format!("Loses {} notes", lost.join(", ")),
        );
    }
}

fn milk_specific_advice(state: &BlendState, config: &ImpactConfig) -> Vec<String> {
    let mut advice = Vec::new();
    let original = state.original_milk_type();

    let goat = MilkTypeId::from(GOAT_MILK_TYPE);
    let goat_share = state.ratio(&goat);
    if *original != goat {
        if goat_share >= config.advice_share_percent {
            advice.push(
                "Goat milk makes a softer, more fragile curd: cut gently and stir slowly".to_owned(),
            );
        }
        if goat_share >= config.dominant_share_percent {
            advice.push(
                "Goat-dominant blends taste tangier; consider a milder culture and shorter ripening"
                    .to_owned(),
            );
        }
    }

    let sheep = MilkTypeId::from(SHEEP_MILK_TYPE);
    let sheep_share = state.ratio(&sheep);
    if *original != sheep {
        if sheep_share >= config.advice_share_percent {
            advice.push(
                "Sheep milk is rich in solids: expect more curd and a denser paste".to_owned(),
            );
        }
        if sheep_share >= config.dominant_share_percent {
            advice.push(
                "Sheep-dominant blends set quickly: check for a clean break early and skip calcium chloride"
                    .to_owned(),
            );
        }
    }

    advice
}

/// Compare the blend with the original milk.
///
/// Returns `None` when the original milk type is not in the dataset.
#[must_use]
pub fn substitution_impact(
    reference: &ReferenceData,
    state: &BlendState,
    flavor_threshold: f64,
    config: &ImpactConfig,
) -> Option<SubstitutionImpact> {
    let original_id = state.original_milk_type();
    let original = reference.milk_type(original_id)?;
    let blend = blended_milk_info(reference, state, flavor_threshold);

    let mut changes = Vec::new();
    let (fat_delta, protein_delta, yield_ratio) =
        compare_composition(&blend, original, config, &mut changes);
    compare_character(
        &blend,
        original,
        reference.display_name(original_id),
        &mut changes,
    );

    Some(SubstitutionImpact {
        original_milk_type: original_id.clone(),
        blend_label: blend.label,
        fat_delta,
        protein_delta,
        yield_ratio,
        overall: OverallAssessment::from_change_count(changes.len()),
        advice: milk_specific_advice(state, config),
        changes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_boundaries() {
        assert_eq!(
            OverallAssessment::from_change_count(0),
            OverallAssessment::VerySimilar
        );
        assert_eq!(
            OverallAssessment::from_change_count(2),
            OverallAssessment::Similar
        );
        assert_eq!(
            OverallAssessment::from_change_count(3),
            OverallAssessment::NoticeablyDifferent
        );
        assert_eq!(
            OverallAssessment::from_change_count(5),
            OverallAssessment::SignificantlyDifferent
        );
    }
}
