// ABOUTME: Unified error handling for the milk blend engine
// ABOUTME: Defines ErrorCode, AppError, and AppResult with conversion from serde errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Milk Blend Contributors

//! # Unified Error Handling System
//!
//! Every fallible engine operation returns [`AppResult`]. Errors carry a
//! stable [`ErrorCode`], a human-readable message, optional JSON details,
//! and an optional source error for chaining.
//!
//! Nothing in the engine treats these errors as fatal: a rejected mutation
//! leaves the blend state untouched, and a failed reference-data load
//! degrades the session instead of aborting it.

use serde::{Deserialize, Serialize};
use std::error::Error as StdError;
use std::fmt;
use thiserror::Error;

/// Standard error codes used throughout the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    // Validation (3000-3999)
    /// Input failed validation
    #[serde(rename = "INVALID_INPUT")]
    InvalidInput = 3000,
    /// Numeric value outside its permitted range
    #[serde(rename = "VALUE_OUT_OF_RANGE")]
    ValueOutOfRange = 3003,
    /// Milk type id not present in the active blend
    #[serde(rename = "UNKNOWN_MILK_TYPE")]
    UnknownMilkType = 3010,

    // Reference data (4000-4999)
    /// Reference dataset has not been loaded
    #[serde(rename = "REFERENCE_DATA_UNAVAILABLE")]
    ReferenceDataUnavailable = 4003,
    /// Reference dataset failed validation
    #[serde(rename = "INVALID_REFERENCE_DATA")]
    InvalidReferenceData = 4010,

    // Configuration (6000-6999)
    /// Configuration is invalid
    #[serde(rename = "CONFIG_INVALID")]
    ConfigInvalid = 6002,

    // Internal Errors (9000-9999)
    /// JSON serialization or deserialization failed
    #[serde(rename = "SERIALIZATION_ERROR")]
    SerializationError = 9003,
}

impl ErrorCode {
    /// Get a user-friendly description of this error
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::InvalidInput => "The provided input is invalid",
            Self::ValueOutOfRange => "The provided value is outside the acceptable range",
            Self::UnknownMilkType => "The milk type is not part of this blend",
            Self::ReferenceDataUnavailable => "Milk reference data is not loaded",
            Self::InvalidReferenceData => "Milk reference data is invalid",
            Self::ConfigInvalid => "Configuration is invalid",
            Self::SerializationError => "Data serialization/deserialization failed",
        }
    }

    /// Whether the caller can continue in degraded mode after this error
    #[must_use]
    pub const fn is_degradable(&self) -> bool {
        matches!(
            self,
            Self::ReferenceDataUnavailable
                | Self::InvalidReferenceData
                | Self::SerializationError
        )
    }
}

/// Unified error type for the engine
#[derive(Debug, Error)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Additional structured context
    pub details: serde_json::Value,
    /// Source error for error chaining
    #[source]
    pub source: Option<Box<dyn StdError + Send + Sync>>,
}

impl AppError {
    /// Create a new `AppError` with the given code and message
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: serde_json::Value::Null,
            source: None,
        }
    }

    /// Add details to the error context
    #[must_use]
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = details;
        self
    }

    /// Add a source error for error chaining
    #[must_use]
    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Invalid input
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Value outside the permitted range
    #[must_use]
    pub fn out_of_range(field: &str, value: f64) -> Self {
        Self::new(
            ErrorCode::ValueOutOfRange,
            format!("{field} is out of range: {value}"),
        )
        .with_details(serde_json::json!({ "field": field, "value": value }))
    }

    /// Milk type not present in the blend
    #[must_use]
    pub fn unknown_milk_type(milk_type: &str) -> Self {
        Self::new(
            ErrorCode::UnknownMilkType,
            format!("unknown milk type '{milk_type}'"),
        )
        .with_details(serde_json::json!({ "milk_type": milk_type }))
    }

    /// Reference data is not available
    #[must_use]
    pub fn reference_unavailable() -> Self {
        Self::new(
            ErrorCode::ReferenceDataUnavailable,
            "milk reference data has not been loaded",
        )
    }

    /// Reference data failed validation
    #[must_use]
    pub fn invalid_reference(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidReferenceData, message)
    }

    /// Configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigInvalid, message)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::new(ErrorCode::SerializationError, error.to_string()).with_source(error)
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;
