// ABOUTME: Complete milk reference dataset loaded once per process
// ABOUTME: Milk properties, conversion and rennet factors, nutrition, and calcium chloride guidance
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Milk Blend Contributors

//! Reference dataset.
//!
//! The JSON document has these top-level keys:
//!
//! ```text
//! milk_types                                  id -> MilkType
//! available_milk_types                        [id, ...]  (canonical blend order)
//! volume_conversions.factors                  "{from}_to_{to}" -> factor
//! rennet_adjustments.factors                  id -> factor
//! nutrition_per_cup                           id -> NutritionPerCup
//! calcium_chloride_guidelines.recommendations id -> { raw, pasteurized }
//! ```
//!
//! The dataset is immutable once validated.

use super::milk::{MilkType, MilkTypeId};
use super::nutrition::NutritionPerCup;
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Separator between source and target ids in conversion keys
const CONVERSION_KEY_SEPARATOR: &str = "_to_";

/// A table of named multiplicative factors
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FactorTable {
    /// Factor by key
    pub factors: BTreeMap<String, f64>,
    /// Free-text provenance notes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Calcium chloride advice for one milk type
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalciumChlorideGuideline {
    /// Advice for raw milk
    pub raw: String,
    /// Advice for pasteurized milk
    pub pasteurized: String,
}

/// Calcium chloride advice by milk type
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalciumChlorideGuidelines {
    /// Advice by milk id
    pub recommendations: BTreeMap<MilkTypeId, CalciumChlorideGuideline>,
}

/// The complete reference dataset
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferenceData {
    /// Properties by milk id
    pub milk_types: BTreeMap<MilkTypeId, MilkType>,
    /// Ids offered for direct selection, in canonical order
    pub available_milk_types: Vec<MilkTypeId>,
    /// Volume conversion factors keyed `"{from}_to_{to}"`
    pub volume_conversions: FactorTable,
    /// Rennet strength factors keyed by milk id
    pub rennet_adjustments: FactorTable,
    /// Nutrition per cup by milk id
    pub nutrition_per_cup: BTreeMap<MilkTypeId, NutritionPerCup>,
    /// Calcium chloride advice by milk id
    pub calcium_chloride_guidelines: CalciumChlorideGuidelines,
}

impl ReferenceData {
    /// Parse and validate a JSON document
    ///
    /// # Errors
    ///
    /// Returns `SerializationError` for malformed JSON and
    /// `InvalidReferenceData` when validation fails.
    pub fn from_json(json: &str) -> AppResult<Self> {
        let data: Self = serde_json::from_str(json)?;
        data.validate()?;
        Ok(data)
    }

    /// Check internal consistency
    ///
    /// # Errors
    ///
    /// Returns `InvalidReferenceData` naming the first inconsistency found.
    pub fn validate(&self) -> AppResult<()> {
        if self.available_milk_types.is_empty() {
            return Err(AppError::invalid_reference(
                "available_milk_types must list at least one milk type",
            ));
        }

        for id in &self.available_milk_types {
            if !self.milk_types.contains_key(id) {
                return Err(AppError::invalid_reference(format!(
                    "available milk type '{id}' has no milk_types entry"
                )));
            }
        }

        for (id, milk) in &self.milk_types {
            let numbers = [
                milk.fat_percent,
                milk.protein_percent,
                milk.cheese_yield_per_gallon_lb,
            ];
            if numbers.iter().any(|n| !n.is_finite() || *n < 0.0) {
                return Err(AppError::invalid_reference(format!(
                    "milk type '{id}' has a negative or non-finite property"
                )));
            }
            if let Some(substitute) = &milk.best_substitute {
                if !self.milk_types.contains_key(substitute) {
                    return Err(AppError::invalid_reference(format!(
                        "milk type '{id}' names unknown substitute '{substitute}'"
                    )));
                }
            }
        }

        for (key, factor) in &self.volume_conversions.factors {
            let Some((from, to)) = key.split_once(CONVERSION_KEY_SEPARATOR) else {
                return Err(AppError::invalid_reference(format!(
                    "volume conversion key '{key}' is not of the form from_to_to"
                )));
            };
            if from.is_empty() || to.is_empty() {
                return Err(AppError::invalid_reference(format!(
                    "volume conversion key '{key}' is missing a milk type"
                )));
            }
            Self::check_factor("volume conversion", key, *factor)?;
        }

        for (key, factor) in &self.rennet_adjustments.factors {
            Self::check_factor("rennet adjustment", key, *factor)?;
        }

        for (id, nutrition) in &self.nutrition_per_cup {
            if nutrition.min_value() < 0.0 {
                return Err(AppError::invalid_reference(format!(
                    "nutrition for '{id}' has a negative value"
                )));
            }
        }

        Ok(())
    }

    fn check_factor(table: &str, key: &str, factor: f64) -> AppResult<()> {
        if factor.is_finite() && factor > 0.0 {
            Ok(())
        } else {
            Err(AppError::invalid_reference(format!(
                "{table} factor '{key}' must be positive, got {factor}"
            )))
        }
    }

    /// Properties of a milk type
    #[must_use]
    pub fn milk_type(&self, id: &MilkTypeId) -> Option<&MilkType> {
        self.milk_types.get(id)
    }

    /// Display name for a milk type, falling back to the id
    #[must_use]
    pub fn display_name<'a>(&'a self, id: &'a MilkTypeId) -> &'a str {
        self.milk_type(id)
            .map_or(id.as_str(), |milk| milk.display_name(id))
    }

    /// Whether a type is offered for direct selection
    #[must_use]
    pub fn is_available(&self, id: &MilkTypeId) -> bool {
        self.available_milk_types.contains(id)
    }

    /// Volume factor converting `from` milk into `to` milk; identity when absent
    #[must_use]
    pub fn conversion_factor(&self, from: &MilkTypeId, to: &MilkTypeId) -> f64 {
        if from == to {
            return 1.0;
        }
        let key = format!("{from}{CONVERSION_KEY_SEPARATOR}{to}");
        self.volume_conversions
            .factors
            .get(&key)
            .copied()
            .unwrap_or(1.0)
    }

    /// Rennet strength factor for a milk type; identity when absent
    #[must_use]
    pub fn rennet_factor(&self, id: &MilkTypeId) -> f64 {
        self.rennet_adjustments
            .factors
            .get(id.as_str())
            .copied()
            .unwrap_or(1.0)
    }

    /// Nutrition per cup for a milk type
    #[must_use]
    pub fn nutrition(&self, id: &MilkTypeId) -> Option<&NutritionPerCup> {
        self.nutrition_per_cup.get(id)
    }

    /// Calcium chloride advice for a milk type
    #[must_use]
    pub fn calcium_chloride_guideline(&self, id: &MilkTypeId) -> Option<&CalciumChlorideGuideline> {
        self.calcium_chloride_guidelines.recommendations.get(id)
    }

    /// Best available stand-in for a milk type.
    ///
    /// Available types stand for themselves. Exotic types resolve to their
    /// declared `best_substitute` when that is available, otherwise to the
    /// first available type.
    #[must_use]
    pub fn substitute_for(&self, id: &MilkTypeId) -> Option<&MilkTypeId> {
        if self.is_available(id) {
            return self.available_milk_types.iter().find(|a| *a == id);
        }
        self.milk_type(id)
            .and_then(|milk| milk.best_substitute.as_ref())
            .filter(|substitute| self.is_available(substitute))
            .or_else(|| self.available_milk_types.first())
    }
}
