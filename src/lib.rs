// ABOUTME: Main library entry point for the milk substitution engine
// ABOUTME: Recipe classification, blend state, ingredient adjustment, nutrition, and impact narrative
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Milk Blend Contributors

#![deny(unsafe_code)]

//! # Milk Blend
//!
//! Milk substitution engine for cheesemaking recipes. Given a recipe and a
//! reference dataset of milk properties, it decides whether the recipe makes
//! cheese, detects the milk it was written for, and lets a caller blend
//! cow, goat, and sheep milk by percentage or by on-hand volume. Every change
//! recomputes the ingredient list, blended nutrition, and blended milk
//! properties.
//!
//! ## Architecture
//!
//! - **Classifier**: ordered rule list deciding "is this cheese?"
//! - **Blend**: ratio state with the sum-to-100 invariant
//! - **Derived**: pure functions over reference data and blend state
//! - **Session**: per-recipe adapter publishing snapshots to observers
//! - **Reference**: one-shot async dataset loading that degrades to `None`
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use milk_blend::config::EngineConfig;
//! use milk_blend::reference::{load_reference_data, StaticReferenceSource};
//! use milk_blend::session::SubstitutionSession;
//! use milk_blend_core::models::{MilkTypeId, Recipe};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let reference = load_reference_data(&StaticReferenceSource::bundled()).await;
//!     let recipe: Recipe = serde_json::from_str(r#"{"title": "Fresh Chèvre"}"#)?;
//!
//!     let mut session = SubstitutionSession::new(recipe, reference, EngineConfig::default());
//!     session.enter_mixed_mode();
//!     session.set_milk_ratio(&MilkTypeId::from("goat"), 50.0)?;
//!
//!     println!("{}", serde_json::to_string_pretty(&session.snapshot())?);
//!     Ok(())
//! }
//! ```

/// Blend ratio state and volume units
pub mod blend;

/// Cheese recipe and original milk detection
pub mod classifier;

/// Engine configuration
pub mod config;

/// Derived quantities: milk info, nutrition, ingredients, impact
pub mod derived;

/// Structured logging setup
pub mod logging;

/// Ingredient quantity parsing and formatting
pub mod quantity;

/// Reference dataset loading
pub mod reference;

/// Per-recipe substitution session
pub mod session;

pub use milk_blend_core::errors::{AppError, AppResult, ErrorCode};
