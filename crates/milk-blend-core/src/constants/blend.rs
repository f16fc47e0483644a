// ABOUTME: Blend-level thresholds and defaults for ratio handling
// ABOUTME: Percent totals, default milk type, and the hard-coded calcium chloride rule
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Milk Blend Contributors

/// Ratios across all milk types always sum to this value
pub const RATIO_TOTAL: f64 = 100.0;

/// Milk type used when nothing else is known
pub const DEFAULT_MILK_TYPE: &str = "cow";

/// Blendable milk types when no reference data is loaded, in canonical order
pub const FALLBACK_MILK_TYPES: &[&str] = &["cow", "goat", "sheep"];

/// Milk type whose share suppresses calcium chloride
pub const SHEEP_MILK_TYPE: &str = "sheep";

/// Goat milk id, used for milk-specific impact advice
pub const GOAT_MILK_TYPE: &str = "goat";

/// Sheep share (percent) at or above which calcium chloride is omitted
pub const CALCIUM_CHLORIDE_SHEEP_OMIT_PERCENT: f64 = 50.0;

/// Minimum share (percent) for a milk type to appear in flavor and texture summaries
pub const DEFAULT_FLAVOR_THRESHOLD_PERCENT: f64 = 25.0;

/// Maximum distance from a culinary fraction that still snaps to it
pub const DEFAULT_FRACTION_SNAP_TOLERANCE: f64 = 0.05;

/// Ratio sums closer than this to the total are treated as already normalized
pub const RATIO_SUM_EPSILON: f64 = 1e-9;
