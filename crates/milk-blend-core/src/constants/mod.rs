// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Keyword tables, unit factors, and blend thresholds for the milk blend engine
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Milk Blend Contributors

//! Constants module
//!
//! Constants are grouped by domain rather than kept in a single large file.

/// Keyword tables used by the recipe classifier and ingredient categorizer
pub mod keywords;
/// Blend-level thresholds and defaults
pub mod blend;
/// Volume unit conversion factors (canonical unit: US cup)
pub mod units;
