// ABOUTME: Engine configuration with defaults, environment overrides, and validation
// ABOUTME: Reference data path, default milk, flavor threshold, fraction tolerance, impact thresholds
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Milk Blend Contributors

//! Engine configuration.
//!
//! | Variable                                 | Field                              |
//! |------------------------------------------|------------------------------------|
//! | `MILK_BLEND_REFERENCE_PATH`              | `reference_path`                   |
//! | `MILK_BLEND_DEFAULT_MILK`                | `default_milk_type`                |
//! | `MILK_BLEND_FLAVOR_THRESHOLD`            | `flavor_threshold_percent`         |
//! | `MILK_BLEND_FRACTION_TOLERANCE`          | `fraction_snap_tolerance`          |
//! | `MILK_BLEND_IMPACT_FAT_DELTA`            | `impact.fat_delta_threshold`       |
//! | `MILK_BLEND_IMPACT_PROTEIN_DELTA`        | `impact.protein_delta_threshold`   |
//! | `MILK_BLEND_IMPACT_HIGHER_YIELD`         | `impact.higher_yield_ratio`        |
//! | `MILK_BLEND_IMPACT_LOWER_YIELD`          | `impact.lower_yield_ratio`         |
//! | `MILK_BLEND_IMPACT_ADVICE_SHARE`         | `impact.advice_share_percent`      |
//! | `MILK_BLEND_IMPACT_DOMINANT_SHARE`       | `impact.dominant_share_percent`    |

/// Configuration error types
pub mod error;
/// Impact assessment thresholds
pub mod impact;

pub use error::ConfigError;
pub use impact::ImpactConfig;

use milk_blend_core::constants::blend::{
    DEFAULT_FLAVOR_THRESHOLD_PERCENT, DEFAULT_FRACTION_SNAP_TOLERANCE, DEFAULT_MILK_TYPE,
    RATIO_TOTAL,
};
use milk_blend_core::errors::AppError;
use milk_blend_core::models::MilkTypeId;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

/// Default location of the reference dataset
pub const DEFAULT_REFERENCE_PATH: &str = "data/milk_reference.json";

/// Largest fraction snapping tolerance; half of the gap between eighths
const MAX_FRACTION_TOLERANCE: f64 = 0.0625;

/// Engine settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Reference dataset file
    pub reference_path: PathBuf,
    /// Milk used when nothing else is known and as the normalization fallback
    pub default_milk_type: MilkTypeId,
    /// Minimum share (percent) for flavor and texture summaries
    pub flavor_threshold_percent: f64,
    /// Distance within which quantities snap to culinary fractions
    pub fraction_snap_tolerance: f64,
    /// Impact narrative thresholds
    pub impact: ImpactConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            reference_path: PathBuf::from(DEFAULT_REFERENCE_PATH),
            default_milk_type: MilkTypeId::from(DEFAULT_MILK_TYPE),
            flavor_threshold_percent: DEFAULT_FLAVOR_THRESHOLD_PERCENT,
            fraction_snap_tolerance: DEFAULT_FRACTION_SNAP_TOLERANCE,
            impact: ImpactConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Defaults with environment overrides applied, then validated
    ///
    /// # Errors
    ///
    /// Returns an error if an environment variable cannot be parsed or the
    /// resulting configuration fails validation
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = Self::default().apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Helper function to parse and apply an environment variable override
    fn apply_env_var<T: FromStr>(env_var_name: &str, target: &mut T) -> Result<(), ConfigError> {
        match env::var(env_var_name) {
            Ok(val) => {
                *target = val
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::Parse(format!("Invalid {env_var_name}")))?;
                Ok(())
            }
            Err(env::VarError::NotPresent) => Ok(()),
            Err(err) => Err(ConfigError::EnvVar(err)),
        }
    }

    fn apply_env_overrides(mut self) -> Result<Self, ConfigError> {
        Self::apply_env_var("MILK_BLEND_REFERENCE_PATH", &mut self.reference_path)?;

        let mut default_milk = self.default_milk_type.as_str().to_owned();
        Self::apply_env_var("MILK_BLEND_DEFAULT_MILK", &mut default_milk)?;
        self.default_milk_type = MilkTypeId::new(default_milk);

        Self::apply_env_var(
            "MILK_BLEND_FLAVOR_THRESHOLD",
            &mut self.flavor_threshold_percent,
        )?;
        Self::apply_env_var(
            "MILK_BLEND_FRACTION_TOLERANCE",
            &mut self.fraction_snap_tolerance,
        )?;

        // Impact narrative overrides
        Self::apply_env_var(
            "MILK_BLEND_IMPACT_FAT_DELTA",
            &mut self.impact.fat_delta_threshold,
        )?;
        Self::apply_env_var(
            "MILK_BLEND_IMPACT_PROTEIN_DELTA",
            &mut self.impact.protein_delta_threshold,
        )?;
        Self::apply_env_var(
            "MILK_BLEND_IMPACT_HIGHER_YIELD",
            &mut self.impact.higher_yield_ratio,
        )?;
        Self::apply_env_var(
            "MILK_BLEND_IMPACT_LOWER_YIELD",
            &mut self.impact.lower_yield_ratio,
        )?;
        Self::apply_env_var(
            "MILK_BLEND_IMPACT_ADVICE_SHARE",
            &mut self.impact.advice_share_percent,
        )?;
        Self::apply_env_var(
            "MILK_BLEND_IMPACT_DOMINANT_SHARE",
            &mut self.impact.dominant_share_percent,
        )?;

        Ok(self)
    }

    /// Check every threshold
    ///
    /// # Errors
    ///
    /// Returns the first invalid setting found
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_milk_type.as_str().is_empty() {
            return Err(ConfigError::MissingField("default_milk_type"));
        }
        if self.reference_path.as_os_str().is_empty() {
            return Err(ConfigError::MissingField("reference_path"));
        }
        if !(0.0..=RATIO_TOTAL).contains(&self.flavor_threshold_percent) {
            return Err(ConfigError::ValueOutOfRange(
                "flavor_threshold_percent must be between 0 and 100",
            ));
        }
        if !(self.fraction_snap_tolerance > 0.0
            && self.fraction_snap_tolerance <= MAX_FRACTION_TOLERANCE)
        {
            return Err(ConfigError::ValueOutOfRange(
                "fraction_snap_tolerance must be in (0, 0.0625]",
            ));
        }

        let impact = &self.impact;
        let positive = |value: f64| value.is_finite() && value > 0.0;
        if !positive(impact.fat_delta_threshold) || !positive(impact.protein_delta_threshold) {
            return Err(ConfigError::ValueOutOfRange(
                "fat and protein delta thresholds must be positive",
            ));
        }
        if !(impact.lower_yield_ratio > 0.0
            && impact.lower_yield_ratio < 1.0
            && impact.higher_yield_ratio > 1.0)
        {
            return Err(ConfigError::InvalidRange(
                "yield ratios must satisfy 0 < lower < 1 < higher",
            ));
        }
        if !(impact.advice_share_percent > 0.0
            && impact.advice_share_percent < impact.dominant_share_percent
            && impact.dominant_share_percent <= RATIO_TOTAL)
        {
            return Err(ConfigError::InvalidRange(
                "advice shares must satisfy 0 < advice < dominant <= 100",
            ));
        }

        Ok(())
    }
}

impl From<ConfigError> for AppError {
    fn from(error: ConfigError) -> Self {
        Self::config(error.to_string())
    }
}
