// ABOUTME: Thresholds for the substitution impact narrative
// ABOUTME: Fat and protein deltas, yield ratio bounds, and milk-specific advice shares
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Milk Blend Contributors

use serde::{Deserialize, Serialize};

/// Impact assessment thresholds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImpactConfig {
    /// Fat difference (percentage points) that counts as a change
    pub fat_delta_threshold: f64,
    /// Protein difference (percentage points) that counts as a change
    pub protein_delta_threshold: f64,
    /// Blend/original yield ratio above which yield is reported higher
    pub higher_yield_ratio: f64,
    /// Blend/original yield ratio below which yield is reported lower
    pub lower_yield_ratio: f64,
    /// Share (percent) at which goat or sheep advice starts
    pub advice_share_percent: f64,
    /// Share (percent) at which the stronger goat or sheep advice is added
    pub dominant_share_percent: f64,
}

impl Default for ImpactConfig {
    fn default() -> Self {
        Self {
            fat_delta_threshold: 0.5,
            protein_delta_threshold: 0.3,
            higher_yield_ratio: 1.15,
            lower_yield_ratio: 0.87,
            advice_share_percent: 25.0,
            dominant_share_percent: 50.0,
        }
    }
}
