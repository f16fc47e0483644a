// ABOUTME: Nutrition per cup of milk, used for weighted blend nutrition
// ABOUTME: NutritionPerCup record with scaling and accumulation helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Milk Blend Contributors

use serde::{Deserialize, Serialize};

/// Nutrition facts for one US cup of milk
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct NutritionPerCup {
    /// Energy (kcal)
    pub calories: f64,
    /// Protein (grams)
    pub protein_g: f64,
    /// Total fat (grams)
    pub fat_g: f64,
    /// Carbohydrates (grams)
    pub carbohydrates_g: f64,
    /// Sugars, mostly lactose (grams)
    pub sugar_g: f64,
    /// Calcium (milligrams)
    pub calcium_mg: f64,
    /// Cholesterol (milligrams)
    pub cholesterol_mg: f64,
    /// Sodium (milligrams)
    pub sodium_mg: f64,
}

impl NutritionPerCup {
    /// Every field multiplied by `weight`
    #[must_use]
    pub fn scaled(&self, weight: f64) -> Self {
        Self {
            calories: self.calories * weight,
            protein_g: self.protein_g * weight,
            fat_g: self.fat_g * weight,
            carbohydrates_g: self.carbohydrates_g * weight,
            sugar_g: self.sugar_g * weight,
            calcium_mg: self.calcium_mg * weight,
            cholesterol_mg: self.cholesterol_mg * weight,
            sodium_mg: self.sodium_mg * weight,
        }
    }

    /// Field-wise sum
    #[must_use]
    pub fn plus(&self, other: &Self) -> Self {
        Self {
            calories: self.calories + other.calories,
            protein_g: self.protein_g + other.protein_g,
            fat_g: self.fat_g + other.fat_g,
            carbohydrates_g: self.carbohydrates_g + other.carbohydrates_g,
            sugar_g: self.sugar_g + other.sugar_g,
            calcium_mg: self.calcium_mg + other.calcium_mg,
            cholesterol_mg: self.cholesterol_mg + other.cholesterol_mg,
            sodium_mg: self.sodium_mg + other.sodium_mg,
        }
    }

    /// Smallest field value, used to reject negative reference entries
    #[must_use]
    pub fn min_value(&self) -> f64 {
        [
            self.calories,
            self.protein_g,
            self.fat_g,
            self.carbohydrates_g,
            self.sugar_g,
            self.calcium_mg,
            self.cholesterol_mg,
            self.sodium_mg,
        ]
        .into_iter()
        .fold(f64::INFINITY, f64::min)
    }
}
