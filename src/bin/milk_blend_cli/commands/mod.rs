// ABOUTME: Re-exports command modules for milk-blend
// ABOUTME: Recipe commands (classify, adjust, impact) and unit conversion
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Milk Blend Contributors

pub mod recipe;
pub mod units;
