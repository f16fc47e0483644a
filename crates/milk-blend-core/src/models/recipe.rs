// ABOUTME: Recipe input records and the adjusted ingredient output
// ABOUTME: Defines Recipe, Ingredient, Instruction, MilkSubstitutions, and AdjustedIngredient
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Milk Blend Contributors

use super::milk::MilkTypeId;
use serde::{Deserialize, Deserializer, Serialize};

/// A recipe record as published by the archive
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Recipe {
    /// Recipe identifier
    pub id: String,
    /// Title shown to readers
    pub title: String,
    /// Archive category ("cheese", "desserts", ...)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Free-form tags
    pub tags: Vec<String>,
    /// Ingredient lines; `None` when the record carries no ingredient data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ingredients: Option<Vec<Ingredient>>,
    /// Method steps
    pub instructions: Vec<Instruction>,
    /// Explicit substitution metadata
    #[serde(skip_serializing_if = "Option::is_none")]
    pub milk_substitutions: Option<MilkSubstitutions>,
}

impl Recipe {
    /// Ingredient lines, empty when absent
    #[must_use]
    pub fn ingredient_list(&self) -> &[Ingredient] {
        self.ingredients.as_deref().unwrap_or_default()
    }

    /// Whether the record carries any ingredient data at all
    #[must_use]
    pub fn has_ingredients(&self) -> bool {
        !self.ingredient_list().is_empty()
    }
}

/// Explicit milk substitution declaration on a recipe
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MilkSubstitutions {
    /// Recipe opts in to the substitution calculator
    pub enabled: bool,
    /// Milk the recipe was written for
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_milk: Option<MilkTypeId>,
    /// Milk types the author considers suitable
    pub supported_types: Vec<MilkTypeId>,
}

/// One method step; the archive stores either plain strings or `{ "text": ... }`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Instruction {
    /// Bare string step
    Text(String),
    /// Structured step
    Step {
        /// Step text
        text: String,
    },
}

impl Instruction {
    /// Step text regardless of representation
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Text(text) | Self::Step { text } => text,
        }
    }
}

/// Source ingredient line. Read-only input to the engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Ingredient {
    /// Ingredient name as written
    pub item: String,
    /// Quantity text: "1", "1/2", "1 1/2", "2-3", "to taste"
    #[serde(deserialize_with = "quantity_text")]
    pub quantity: String,
    /// Unit text as written
    pub unit: String,
}

impl Ingredient {
    /// Build an ingredient line
    #[must_use]
    pub fn new(quantity: impl Into<String>, unit: impl Into<String>, item: impl Into<String>) -> Self {
        Self {
            item: item.into(),
            quantity: quantity.into(),
            unit: unit.into(),
        }
    }
}

/// Accept quantities written as JSON strings, numbers, or null
fn quantity_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(text) => text,
        serde_json::Value::Number(number) => number.to_string(),
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    })
}

/// Which adjustment rule applies to an ingredient line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IngredientCategory {
    /// Dairy milk, scaled by the blend volume factor
    Milk,
    /// Rennet, scaled by the blend rennet factor
    Rennet,
    /// Calcium chloride, suppressed for sheep-heavy blends
    CalciumChloride,
    /// Everything else, batch multiplier only
    Other,
}

/// An ingredient line after blend and batch adjustment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdjustedIngredient {
    /// The untouched source line
    pub source: Ingredient,
    /// Adjustment rule that was applied
    pub category: IngredientCategory,
    /// Item text to display; milk lines name the blend
    pub display_item: String,
    /// Recomputed numeric amount, `None` when the source had no number
    pub amount: Option<f64>,
    /// Formatted quantity for display
    pub quantity: String,
    /// Unit text (unchanged from the source)
    pub unit: String,
    /// A milk-specific factor changed this line
    pub adjusted: bool,
    /// The line should be left out entirely
    pub omit: bool,
    /// Human-readable explanation of the adjustment
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl AdjustedIngredient {
    /// Carry a line through without any change
    #[must_use]
    pub fn passthrough(source: &Ingredient, category: IngredientCategory) -> Self {
        Self {
            source: source.clone(),
            category,
            display_item: source.item.clone(),
            amount: None,
            quantity: source.quantity.clone(),
            unit: source.unit.clone(),
            adjusted: false,
            omit: false,
            note: None,
        }
    }
}
