// ABOUTME: Blend ratio state with the sum-to-100 invariant and three entry modes
// ABOUTME: Single milk, percentage blend, and volume blend with proportional redistribution
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Milk Blend Contributors

//! Blend state.
//!
//! Ratios are percentages keyed by milk type. Every public mutator leaves
//! the ratios summing to exactly 100 before returning. Iteration always
//! follows the canonical milk-type order given at construction, which is
//! also the tie-break order when picking the dominant type.

use super::volume::convert_to_cups;
use milk_blend_core::constants::blend::{
    DEFAULT_MILK_TYPE, FALLBACK_MILK_TYPES, RATIO_SUM_EPSILON, RATIO_TOTAL,
};
use milk_blend_core::errors::{AppError, AppResult};
use milk_blend_core::models::MilkTypeId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Which representation drives the ratios
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BlendMode {
    /// One milk type at 100%
    #[default]
    Single,
    /// Percentages entered directly
    PercentageBlend,
    /// Volumes entered, percentages derived
    VolumeBlend,
}

/// Mutable blend state for one recipe session
#[derive(Debug, Clone, PartialEq)]
pub struct BlendState {
    milk_types: Vec<MilkTypeId>,
    ratios: BTreeMap<MilkTypeId, f64>,
    volumes: BTreeMap<MilkTypeId, f64>,
    mode: BlendMode,
    batch_multiplier: f64,
    original_milk_type: MilkTypeId,
    fallback_milk_type: MilkTypeId,
}

impl BlendState {
    /// Create a state at 100% of `initial`.
    ///
    /// `milk_types` is the canonical blend order; duplicates are dropped and
    /// an empty list falls back to cow, goat, sheep. An `initial` type that
    /// is not blendable falls back to `fallback`, then to the first type.
    #[must_use]
    pub fn new(
        milk_types: Vec<MilkTypeId>,
        original_milk_type: MilkTypeId,
        initial: &MilkTypeId,
        fallback: MilkTypeId,
    ) -> Self {
        let mut ordered: Vec<MilkTypeId> = Vec::with_capacity(milk_types.len());
        for id in milk_types {
            if !ordered.contains(&id) {
                ordered.push(id);
            }
        }
        if ordered.is_empty() {
            ordered = FALLBACK_MILK_TYPES
                .iter()
                .map(|id| MilkTypeId::from(*id))
                .collect();
        }

        let fallback_milk_type = if ordered.contains(&fallback) {
            fallback
        } else {
            ordered[0].clone()
        };

        let ratios = ordered.iter().map(|id| (id.clone(), 0.0)).collect();
        let volumes = ordered.iter().map(|id| (id.clone(), 0.0)).collect();

        let mut state = Self {
            milk_types: ordered,
            ratios,
            volumes,
            mode: BlendMode::Single,
            batch_multiplier: 1.0,
            original_milk_type,
            fallback_milk_type,
        };

        let start = if state.contains(initial) {
            initial.clone()
        } else {
            state.fallback_milk_type.clone()
        };
        state.reset_to(&start);
        state
    }

    /// State over the fallback milk types, starting at 100% cow
    #[must_use]
    pub fn with_defaults() -> Self {
        let cow = MilkTypeId::from(DEFAULT_MILK_TYPE);
        Self::new(Vec::new(), cow.clone(), &cow, cow.clone())
    }

    /// Canonical milk-type order
    #[must_use]
    pub fn milk_types(&self) -> &[MilkTypeId] {
        &self.milk_types
    }

    /// Whether `id` takes part in this blend
    #[must_use]
    pub fn contains(&self, id: &MilkTypeId) -> bool {
        self.ratios.contains_key(id)
    }

    /// Share of `id` in percent; 0 for types outside the blend
    #[must_use]
    pub fn ratio(&self, id: &MilkTypeId) -> f64 {
        self.ratios.get(id).copied().unwrap_or(0.0)
    }

    /// All ratios
    #[must_use]
    pub fn ratios(&self) -> &BTreeMap<MilkTypeId, f64> {
        &self.ratios
    }

    /// Entered volume for `id` in cups
    #[must_use]
    pub fn volume_cups(&self, id: &MilkTypeId) -> f64 {
        self.volumes.get(id).copied().unwrap_or(0.0)
    }

    /// All entered volumes in cups
    #[must_use]
    pub fn volumes(&self) -> &BTreeMap<MilkTypeId, f64> {
        &self.volumes
    }

    /// Sum of entered volumes in cups
    #[must_use]
    pub fn total_volume_cups(&self) -> f64 {
        self.volumes.values().sum()
    }

    /// Active entry mode
    #[must_use]
    pub const fn mode(&self) -> BlendMode {
        self.mode
    }

    /// Multiplier applied to every quantity
    #[must_use]
    pub const fn batch_multiplier(&self) -> f64 {
        self.batch_multiplier
    }

    /// Milk the recipe was written for
    #[must_use]
    pub const fn original_milk_type(&self) -> &MilkTypeId {
        &self.original_milk_type
    }

    /// Sum of all ratios
    #[must_use]
    pub fn ratio_sum(&self) -> f64 {
        self.ratios.values().sum()
    }

    /// Types with a non-zero share, in canonical order
    pub fn contributing(&self) -> impl Iterator<Item = (&MilkTypeId, f64)> + '_ {
        self.milk_types
            .iter()
            .map(|id| (id, self.ratio(id)))
            .filter(|(_, ratio)| *ratio > 0.0)
    }

    /// Type with the strictly largest share; the earliest type wins ties
    #[must_use]
    pub fn dominant_milk_type(&self) -> &MilkTypeId {
        let mut dominant = &self.milk_types[0];
        let mut best = self.ratio(dominant);
        for id in &self.milk_types[1..] {
            let ratio = self.ratio(id);
            if ratio > best {
                dominant = id;
                best = ratio;
            }
        }
        dominant
    }

    /// True when the blend is entirely the original milk
    #[must_use]
    pub fn is_unchanged_from_original(&self) -> bool {
        (self.ratio(&self.original_milk_type) - RATIO_TOTAL).abs() < RATIO_SUM_EPSILON
    }

    fn require_known(&self, id: &MilkTypeId) -> AppResult<()> {
        if self.contains(id) {
            Ok(())
        } else {
            Err(AppError::unknown_milk_type(id.as_str()))
        }
    }

    fn reset_to(&mut self, id: &MilkTypeId) {
        for (key, ratio) in &mut self.ratios {
            *ratio = if key == id { RATIO_TOTAL } else { 0.0 };
        }
    }

    /// Use a single milk type at 100%.
    ///
    /// # Errors
    ///
    /// Returns `UnknownMilkType` when `id` is not part of the blend.
    pub fn set_single_milk(&mut self, id: &MilkTypeId) -> AppResult<()> {
        self.require_known(id)?;
        self.reset_to(id);
        for volume in self.volumes.values_mut() {
            *volume = 0.0;
        }
        self.mode = BlendMode::Single;
        debug!(milk_type = %id, "blend set to single milk");
        Ok(())
    }

    /// Set one type's share and redistribute the difference over the others.
    ///
    /// The value is clamped to `[0, 100]`. The other types absorb the change
    /// in proportion to their current share of the non-`id` total, rounded
    /// to whole percents. When the others are all zero and the share drops,
    /// the remainder goes to the first other type. The mode is unchanged.
    ///
    /// # Errors
    ///
    /// Returns `UnknownMilkType` for ids outside the blend and
    /// `ValueOutOfRange` for non-finite values.
    pub fn set_milk_ratio(&mut self, id: &MilkTypeId, value: f64) -> AppResult<()> {
        self.require_known(id)?;
        if !value.is_finite() {
            return Err(AppError::out_of_range("ratio", value));
        }

        let new_value = value.clamp(0.0, RATIO_TOTAL);
        let old_value = self.ratio(id);
        let delta = new_value - old_value;

        let others: Vec<MilkTypeId> = self
            .milk_types
            .iter()
            .filter(|other| *other != id)
            .cloned()
            .collect();
        let others_total: f64 = others.iter().map(|other| self.ratio(other)).sum();

        self.ratios.insert(id.clone(), new_value);

        if others_total > 0.0 {
            for other in &others {
                let current = self.ratio(other);
                let share = current / others_total;
                let adjusted = (current - delta * share).round();
                self.ratios
                    .insert(other.clone(), if adjusted <= 0.0 { 0.0 } else { adjusted });
            }
        } else if delta < 0.0 {
            if let Some(first) = others.first() {
                self.ratios.insert(first.clone(), RATIO_TOTAL - new_value);
            }
        }

        self.normalize_ratios();
        debug!(milk_type = %id, ratio = new_value, "blend ratio updated");
        Ok(())
    }

    /// Replace every share at once; unlisted types drop to zero.
    ///
    /// Values are clamped to `[0, 100]` and then normalized. The mode is
    /// unchanged.
    ///
    /// # Errors
    ///
    /// Returns `UnknownMilkType`, `ValueOutOfRange` or `InvalidInput` (a type
    /// listed twice) for the first bad entry, leaving the state untouched.
    pub fn set_ratios(&mut self, entries: &[(MilkTypeId, f64)]) -> AppResult<()> {
        for (index, (id, value)) in entries.iter().enumerate() {
            self.require_known(id)?;
            if !value.is_finite() {
                return Err(AppError::out_of_range("ratio", *value));
            }
            if entries[..index].iter().any(|(seen, _)| seen == id) {
                return Err(AppError::invalid_input(format!(
                    "milk type '{id}' is listed more than once"
                )));
            }
        }

        for ratio in self.ratios.values_mut() {
            *ratio = 0.0;
        }
        for (id, value) in entries {
            self.ratios.insert(id.clone(), value.clamp(0.0, RATIO_TOTAL));
        }
        self.normalize_ratios();
        debug!(entries = entries.len(), "blend ratios replaced");
        Ok(())
    }

    /// Restore the sum-to-100 invariant.
    ///
    /// A sum of 100 is left alone. A zero sum puts 100% on the fallback
    /// type. Otherwise every share is scaled by `100 / sum` and rounded, and
    /// the rounding residual is added to the dominant type.
    pub fn normalize_ratios(&mut self) {
        let sum = self.ratio_sum();
        if (sum - RATIO_TOTAL).abs() < RATIO_SUM_EPSILON {
            return;
        }

        if sum < RATIO_SUM_EPSILON {
            let fallback = self.fallback_milk_type.clone();
            self.reset_to(&fallback);
            return;
        }

        let scale = RATIO_TOTAL / sum;
        for ratio in self.ratios.values_mut() {
            *ratio = (*ratio * scale).round();
        }

        let residual = RATIO_TOTAL - self.ratio_sum();
        if residual != 0.0 {
            let dominant = self.dominant_milk_type().clone();
            if let Some(ratio) = self.ratios.get_mut(&dominant) {
                *ratio += residual;
            }
        }
    }

    /// Record an on-hand volume and derive the ratios from all volumes.
    ///
    /// Negative volumes are treated as zero. Unknown units are treated as
    /// cups. When every volume is zero the ratios fall back to 100% of the
    /// fallback type. The mode is unchanged.
    ///
    /// # Errors
    ///
    /// Returns `UnknownMilkType` for ids outside the blend and
    /// `ValueOutOfRange` for non-finite values.
    pub fn set_milk_volume(&mut self, id: &MilkTypeId, value: f64, unit: &str) -> AppResult<()> {
        self.require_known(id)?;
        if !value.is_finite() {
            return Err(AppError::out_of_range("volume", value));
        }

        let cups = convert_to_cups(value.max(0.0), unit);
        self.volumes.insert(id.clone(), cups);
        self.recompute_ratios_from_volumes();
        debug!(milk_type = %id, cups, "blend volume updated");
        Ok(())
    }

    fn recompute_ratios_from_volumes(&mut self) {
        let total = self.total_volume_cups();
        if total <= 0.0 {
            let fallback = self.fallback_milk_type.clone();
            self.reset_to(&fallback);
            return;
        }

        for id in &self.milk_types {
            let share = (self.volume_cups(id) / total * RATIO_TOTAL).round();
            self.ratios.insert(id.clone(), share);
        }
        self.normalize_ratios();
    }

    /// Switch to percentage entry; current ratios are kept
    pub fn enter_mixed_mode(&mut self) {
        self.mode = BlendMode::PercentageBlend;
        debug!("blend entered percentage mode");
    }

    /// Switch to volume entry; all volumes start again at zero
    pub fn enter_volume_mode(&mut self) {
        for volume in self.volumes.values_mut() {
            *volume = 0.0;
        }
        self.mode = BlendMode::VolumeBlend;
        debug!("blend entered volume mode");
    }

    /// Scale every quantity by `multiplier`.
    ///
    /// # Errors
    ///
    /// Returns `ValueOutOfRange` unless `multiplier` is positive and finite.
    pub fn set_batch_multiplier(&mut self, multiplier: f64) -> AppResult<()> {
        if !multiplier.is_finite() || multiplier <= 0.0 {
            return Err(AppError::out_of_range("batch_multiplier", multiplier));
        }
        self.batch_multiplier = multiplier;
        debug!(multiplier, "batch multiplier updated");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(name: &str) -> MilkTypeId {
        MilkTypeId::from(name)
    }

    #[test]
    fn test_new_starts_at_initial_type() {
        let state = BlendState::new(
            vec![id("cow"), id("goat"), id("sheep")],
            id("goat"),
            &id("goat"),
            id("cow"),
        );
        assert_eq!(state.ratio(&id("goat")), 100.0);
        assert_eq!(state.ratio_sum(), 100.0);
        assert_eq!(state.mode(), BlendMode::Single);
    }

    #[test]
    fn test_exotic_initial_falls_back() {
        let state = BlendState::new(
            vec![id("cow"), id("goat")],
            id("camel"),
            &id("camel"),
            id("cow"),
        );
        assert_eq!(state.ratio(&id("cow")), 100.0);
        assert_eq!(state.original_milk_type(), &id("camel"));
    }

    #[test]
    fn test_dominant_tie_breaks_on_canonical_order() {
        let mut state = BlendState::with_defaults();
        state.set_milk_ratio(&id("goat"), 50.0).unwrap();
        assert_eq!(state.ratio(&id("cow")), 50.0);
        assert_eq!(state.dominant_milk_type(), &id("cow"));
    }

    #[test]
    fn test_redistribution_is_proportional() {
        let mut state = BlendState::with_defaults();
        state.set_milk_ratio(&id("goat"), 40.0).unwrap();
        state.set_milk_ratio(&id("sheep"), 20.0).unwrap();
        // cow 60 / goat 40 absorb -20 in a 60:40 split
        assert_eq!(state.ratio(&id("cow")), 48.0);
        assert_eq!(state.ratio(&id("goat")), 32.0);
        assert_eq!(state.ratio(&id("sheep")), 20.0);
    }

    #[test]
    fn test_zero_others_take_remainder_on_first() {
        let mut state = BlendState::with_defaults();
        state.set_milk_ratio(&id("cow"), 70.0).unwrap();
        assert_eq!(state.ratio(&id("goat")), 30.0);
        assert_eq!(state.ratio(&id("sheep")), 0.0);
    }

    #[test]
    fn test_normalize_scales_and_fixes_residual() {
        let mut state = BlendState::with_defaults();
        state.ratios.insert(id("cow"), 1.0);
        state.ratios.insert(id("goat"), 1.0);
        state.ratios.insert(id("sheep"), 1.0);
        state.normalize_ratios();
        assert_eq!(state.ratio(&id("cow")), 34.0);
        assert_eq!(state.ratio(&id("goat")), 33.0);
        assert_eq!(state.ratio(&id("sheep")), 33.0);
    }

    #[test]
    fn test_normalize_zero_sum_uses_fallback() {
        let mut state = BlendState::with_defaults();
        state.ratios.insert(id("cow"), 0.0);
        state.normalize_ratios();
        assert_eq!(state.ratio(&id("cow")), 100.0);
    }

    #[test]
    fn test_volume_mode_resets_volumes() {
        let mut state = BlendState::with_defaults();
        state.set_milk_volume(&id("goat"), 2.0, "cups").unwrap();
        state.enter_volume_mode();
        assert_eq!(state.total_volume_cups(), 0.0);
        assert_eq!(state.mode(), BlendMode::VolumeBlend);
    }

    #[test]
    fn test_rejects_unknown_type_without_mutation() {
        let mut state = BlendState::with_defaults();
        let before = state.clone();
        let error = state.set_milk_ratio(&id("yak"), 10.0).unwrap_err();
        assert_eq!(
            error.code,
            milk_blend_core::errors::ErrorCode::UnknownMilkType
        );
        assert_eq!(state, before);
    }

    #[test]
    fn test_set_ratios_replaces_and_normalizes() {
        let mut state = BlendState::with_defaults();
        state
            .set_ratios(&[(id("goat"), 30.0), (id("sheep"), 30.0)])
            .unwrap();
        assert_eq!(state.ratio(&id("cow")), 0.0);
        assert_eq!(state.ratio(&id("goat")), 50.0);
        assert_eq!(state.ratio(&id("sheep")), 50.0);

        let before = state.clone();
        assert!(state
            .set_ratios(&[(id("cow"), 50.0), (id("yak"), 50.0)])
            .is_err());
        assert_eq!(state, before);
    }

    #[test]
    fn test_rejects_non_positive_batch_multiplier() {
        let mut state = BlendState::with_defaults();
        assert!(state.set_batch_multiplier(0.0).is_err());
        assert!(state.set_batch_multiplier(f64::NAN).is_err());
        state.set_batch_multiplier(2.5).unwrap();
        assert_eq!(state.batch_multiplier(), 2.5);
    }
}
