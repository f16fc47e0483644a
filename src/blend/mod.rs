// ABOUTME: Blend state management for milk substitution sessions
// ABOUTME: Ratio invariant, entry modes, and volume unit conversion
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Milk Blend Contributors

/// Ratio state, entry modes, and normalization
pub mod state;
/// Free-text unit conversion to and from cups
pub mod volume;

pub use state::{BlendMode, BlendState};
pub use volume::{convert_from_cups, convert_to_cups};
