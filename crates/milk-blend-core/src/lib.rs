// ABOUTME: Core types and constants for the milk blend engine
// ABOUTME: Foundation crate with error handling, reference-data and recipe models, and keyword tables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Milk Blend Contributors

#![deny(unsafe_code)]

//! # Milk Blend Core
//!
//! Foundation crate providing the shared types used by the milk substitution
//! engine. This crate is designed to change infrequently, enabling
//! incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **constants**: Keyword tables, unit factors, and domain thresholds
//! - **models**: Reference data (milk types, factors, nutrition) and recipe input/output

/// Unified error handling system with standard error codes
pub mod errors;

/// Keyword tables, unit conversion factors, and domain thresholds
pub mod constants;

/// Reference data and recipe models
pub mod models;
