// ABOUTME: Per-recipe substitution session owning blend state, reference data, and observers
// ABOUTME: Every successful mutation publishes a BlendSnapshot, the sole contract with renderers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Milk Blend Contributors

//! Substitution session.
//!
//! A session is created for one recipe. It detects the original milk,
//! starts the blend at 100% of that milk (or its recommended substitute for
//! exotic types), and exposes the blend mutators. After each successful
//! mutation the ratios sum to 100 and a [`BlendSnapshot`] is sent to every
//! registered [`BlendObserver`]. Failed mutations leave the state untouched
//! and publish nothing.
//!
//! Without reference data the blend still works, but every derived value is
//! `None`.

use crate::blend::{BlendMode, BlendState};
use crate::classifier::{classify_recipe, resolve_original_milk_type, ClassificationOutcome};
use crate::config::EngineConfig;
use crate::derived::{
    self, AdjustOptions, BlendedMilkInfo, SubstituteRecommendation, SubstitutionImpact,
};
use milk_blend_core::errors::AppResult;
use milk_blend_core::models::{
    AdjustedIngredient, MilkTypeId, NutritionPerCup, Recipe, ReferenceData,
};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Everything a renderer needs after a change
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlendSnapshot {
    /// Milk the recipe was written for
    pub original_milk_type: MilkTypeId,
    /// Current shares in percent
    pub ratios: BTreeMap<MilkTypeId, f64>,
    /// Entered volumes in cups
    pub volumes: BTreeMap<MilkTypeId, f64>,
    /// Active entry mode
    pub mode: BlendMode,
    /// Batch multiplier
    pub batch_multiplier: f64,
    /// Sum of entered volumes in cups
    pub total_volume_cups: f64,
    /// Adjusted ingredient lines; `None` without reference data
    pub adjusted_ingredients: Option<Vec<AdjustedIngredient>>,
    /// Blend nutrition per cup; `None` without reference data
    pub nutrition: Option<NutritionPerCup>,
    /// Blend milk properties; `None` without reference data
    pub milk_info: Option<BlendedMilkInfo>,
}

/// Receives a snapshot after every successful blend change
pub trait BlendObserver: Send + Sync {
    /// Called with the new state
    fn on_blend_changed(&self, snapshot: &BlendSnapshot);
}

/// Blend session for a single recipe
pub struct SubstitutionSession {
    recipe: Recipe,
    reference: Option<Arc<ReferenceData>>,
    config: EngineConfig,
    state: BlendState,
    raw_milk: bool,
    observers: Vec<Arc<dyn BlendObserver>>,
}

impl fmt::Debug for SubstitutionSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubstitutionSession")
            .field("recipe_id", &self.recipe.id)
            .field("has_reference", &self.reference.is_some())
            .field("state", &self.state)
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}

fn initial_state(
    recipe: &Recipe,
    reference: Option<&ReferenceData>,
    config: &EngineConfig,
) -> BlendState {
    let original = resolve_original_milk_type(recipe);
    let milk_types = reference
        .map(|data| data.available_milk_types.clone())
        .unwrap_or_default();
    let start = reference
        .and_then(|data| derived::recommend_substitute(data, &original))
        .map_or_else(|| original.clone(), |rec| rec.substitute);

    BlendState::new(
        milk_types,
        original,
        &start,
        config.default_milk_type.clone(),
    )
}

impl SubstitutionSession {
    /// Start a session for `recipe`
    #[must_use]
    pub fn new(
        recipe: Recipe,
        reference: Option<Arc<ReferenceData>>,
        config: EngineConfig,
    ) -> Self {
        let state = initial_state(&recipe, reference.as_deref(), &config);
        let raw_milk = derived::recipe_uses_raw_milk(recipe.ingredient_list());
        info!(
            recipe_id = %recipe.id,
            original_milk = %state.original_milk_type(),
            start_milk = %state.dominant_milk_type(),
            has_reference = reference.is_some(),
            "substitution session started"
        );
        Self {
            recipe,
            reference,
            config,
            state,
            raw_milk,
            observers: Vec::new(),
        }
    }

    /// Recipe being adjusted
    #[must_use]
    pub const fn recipe(&self) -> &Recipe {
        &self.recipe
    }

    /// Loaded reference data, if any
    #[must_use]
    pub fn reference(&self) -> Option<&ReferenceData> {
        self.reference.as_deref()
    }

    /// Current blend state
    #[must_use]
    pub const fn state(&self) -> &BlendState {
        &self.state
    }

    /// Engine settings
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Milk the recipe was written for
    #[must_use]
    pub const fn original_milk_type(&self) -> &MilkTypeId {
        self.state.original_milk_type()
    }

    /// Classifier verdict for the recipe
    #[must_use]
    pub fn classification(&self) -> ClassificationOutcome {
        classify_recipe(&self.recipe)
    }

    /// Register an observer; it receives the next change onwards
    pub fn subscribe(&mut self, observer: Arc<dyn BlendObserver>) {
        self.observers.push(observer);
    }

    /// Replace the recipe and start over from its original milk
    pub fn load_recipe(&mut self, recipe: Recipe) {
        self.state = initial_state(&recipe, self.reference.as_deref(), &self.config);
        self.raw_milk = derived::recipe_uses_raw_milk(recipe.ingredient_list());
        self.recipe = recipe;
        info!(recipe_id = %self.recipe.id, "recipe loaded into session");
        self.publish();
    }

    /// Attach reference data after a late or retried load; the blend restarts
    pub fn set_reference_data(&mut self, reference: Arc<ReferenceData>) {
        self.reference = Some(reference);
        self.state = initial_state(&self.recipe, self.reference.as_deref(), &self.config);
        self.publish();
    }

    /// Milk types offered for this recipe, in canonical order.
    ///
    /// A recipe declaring `supported_types` limits the list to those types;
    /// when none of them is blendable the full list is offered.
    #[must_use]
    pub fn selectable_milk_types(&self) -> Vec<MilkTypeId> {
        let all = self.state.milk_types();
        let supported = self
            .recipe
            .milk_substitutions
            .as_ref()
            .map(|subs| subs.supported_types.as_slice())
            .unwrap_or_default();
        if supported.is_empty() {
            return all.to_vec();
        }
        let limited: Vec<MilkTypeId> = all
            .iter()
            .filter(|id| supported.contains(id))
            .cloned()
            .collect();
        if limited.is_empty() {
            all.to_vec()
        } else {
            limited
        }
    }

    fn apply<F>(&mut self, action: &str, mutate: F) -> AppResult<()>
    where
        F: FnOnce(&mut BlendState) -> AppResult<()>,
    {
        match mutate(&mut self.state) {
            Ok(()) => {
                debug!(action, ratio_sum = self.state.ratio_sum(), "blend changed");
                self.publish();
                Ok(())
            }
            Err(e) => {
                warn!(action, error = %e, "blend change rejected");
                Err(e)
            }
        }
    }

    /// Use one milk at 100%
    ///
    /// # Errors
    ///
    /// Returns `UnknownMilkType` when the type is not blendable
    pub fn set_single_milk(&mut self, milk_type: &MilkTypeId) -> AppResult<()> {
        self.apply("set_single_milk", |state| state.set_single_milk(milk_type))
    }

    /// Set one type's share, redistributing over the rest
    ///
    /// # Errors
    ///
    /// Returns `UnknownMilkType` or `ValueOutOfRange`
    pub fn set_milk_ratio(&mut self, milk_type: &MilkTypeId, percent: f64) -> AppResult<()> {
        self.apply("set_milk_ratio", |state| {
            state.set_milk_ratio(milk_type, percent)
        })
    }

    /// Replace every share at once, normalizing the result
    ///
    /// # Errors
    ///
    /// Returns `UnknownMilkType` or `ValueOutOfRange`
    pub fn set_ratios(&mut self, entries: &[(MilkTypeId, f64)]) -> AppResult<()> {
        self.apply("set_ratios", |state| state.set_ratios(entries))
    }

    /// Record an on-hand volume and derive the ratios
    ///
    /// # Errors
    ///
    /// Returns `UnknownMilkType` or `ValueOutOfRange`
    pub fn set_milk_volume(&mut self, milk_type: &MilkTypeId, value: f64, unit: &str) -> AppResult<()> {
        self.apply("set_milk_volume", |state| {
            state.set_milk_volume(milk_type, value, unit)
        })
    }

    /// Switch to percentage entry
    pub fn enter_mixed_mode(&mut self) {
        self.state.enter_mixed_mode();
        self.publish();
    }

    /// Switch to volume entry; volumes restart at zero
    pub fn enter_volume_mode(&mut self) {
        self.state.enter_volume_mode();
        self.publish();
    }

    /// Scale the whole recipe
    ///
    /// # Errors
    ///
    /// Returns `ValueOutOfRange` unless the multiplier is positive and finite
    pub fn set_batch_multiplier(&mut self, multiplier: f64) -> AppResult<()> {
        self.apply("set_batch_multiplier", |state| {
            state.set_batch_multiplier(multiplier)
        })
    }

    fn adjust_options(&self) -> AdjustOptions {
        AdjustOptions {
            fraction_tolerance: self.config.fraction_snap_tolerance,
            raw_milk: self.raw_milk,
        }
    }

    /// Adjusted ingredient lines
    #[must_use]
    pub fn adjusted_ingredients(&self) -> Option<Vec<AdjustedIngredient>> {
        self.reference().map(|data| {
            derived::adjust_ingredients(
                data,
                &self.state,
                self.recipe.ingredient_list(),
                self.adjust_options(),
            )
        })
    }

    /// Blend nutrition per cup
    #[must_use]
    pub fn blended_nutrition(&self) -> Option<NutritionPerCup> {
        self.reference()
            .map(|data| derived::blended_nutrition(data, &self.state))
    }

    /// Blend milk properties
    #[must_use]
    pub fn blended_milk_info(&self) -> Option<BlendedMilkInfo> {
        self.reference().map(|data| {
            derived::blended_milk_info(data, &self.state, self.config.flavor_threshold_percent)
        })
    }

    /// Multiplier applied to milk lines
    #[must_use]
    pub fn volume_conversion_factor(&self) -> Option<f64> {
        self.reference()
            .map(|data| derived::volume_conversion_factor(data, &self.state))
    }

    /// Multiplier applied to rennet lines
    #[must_use]
    pub fn rennet_adjustment(&self) -> Option<f64> {
        self.reference()
            .map(|data| derived::rennet_adjustment(data, &self.state))
    }

    /// Impact of the blend relative to the original milk
    #[must_use]
    pub fn substitution_impact(&self) -> Option<SubstitutionImpact> {
        self.reference().and_then(|data| {
            derived::substitution_impact(
                data,
                &self.state,
                self.config.flavor_threshold_percent,
                &self.config.impact,
            )
        })
    }

    /// Recommended stand-in when the original milk cannot be selected
    #[must_use]
    pub fn recommended_substitute(&self) -> Option<SubstituteRecommendation> {
        self.reference()
            .and_then(|data| derived::recommend_substitute(data, self.original_milk_type()))
    }

    /// Current state and derived values
    #[must_use]
    pub fn snapshot(&self) -> BlendSnapshot {
        BlendSnapshot {
            original_milk_type: self.state.original_milk_type().clone(),
            ratios: self.state.ratios().clone(),
            volumes: self.state.volumes().clone(),
            mode: self.state.mode(),
            batch_multiplier: self.state.batch_multiplier(),
            total_volume_cups: self.state.total_volume_cups(),
            adjusted_ingredients: self.adjusted_ingredients(),
            nutrition: self.blended_nutrition(),
            milk_info: self.blended_milk_info(),
        }
    }

    fn publish(&self) {
        if self.observers.is_empty() {
            return;
        }
        let snapshot = self.snapshot();
        for observer in &self.observers {
            observer.on_blend_changed(&snapshot);
        }
    }
}
