// ABOUTME: One-shot asynchronous loading of the milk reference dataset
// ABOUTME: File and in-memory sources behind a trait; failures degrade to None with an error log
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Milk Blend Contributors

//! Reference data loading.
//!
//! A failed load is never fatal. [`load_reference_data`] logs the error and
//! returns `None`, and every derived computation then reports nothing. The
//! caller may call it again later.

use async_trait::async_trait;
use milk_blend_core::errors::{AppError, AppResult};
use milk_blend_core::models::ReferenceData;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info};

/// Dataset shipped with the crate
pub const BUNDLED_REFERENCE_JSON: &str = include_str!("../data/milk_reference.json");

/// Where reference JSON comes from
#[async_trait]
pub trait ReferenceSource: Send + Sync {
    /// Human-readable origin for log messages
    fn describe(&self) -> String;

    /// Fetch the raw JSON document
    ///
    /// # Errors
    ///
    /// Returns `ReferenceDataUnavailable` when the document cannot be read
    async fn fetch(&self) -> AppResult<String>;
}

/// Reads the dataset from a file
#[derive(Debug, Clone)]
pub struct FileReferenceSource {
    path: PathBuf,
}

impl FileReferenceSource {
    /// Source reading `path`
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// File being read
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ReferenceSource for FileReferenceSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch(&self) -> AppResult<String> {
        tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            AppError::reference_unavailable()
                .with_details(serde_json::json!({ "path": self.describe() }))
                .with_source(e)
        })
    }
}

/// Serves an in-memory JSON document
#[derive(Debug, Clone)]
pub struct StaticReferenceSource {
    json: Arc<str>,
}

impl StaticReferenceSource {
    /// Source serving `json`
    #[must_use]
    pub fn new(json: impl Into<Arc<str>>) -> Self {
        Self { json: json.into() }
    }

    /// The dataset bundled with the crate
    #[must_use]
    pub fn bundled() -> Self {
        Self::new(BUNDLED_REFERENCE_JSON)
    }
}

#[async_trait]
impl ReferenceSource for StaticReferenceSource {
    fn describe(&self) -> String {
        "in-memory reference data".to_owned()
    }

    async fn fetch(&self) -> AppResult<String> {
        Ok(self.json.to_string())
    }
}

/// Fetch, parse, and validate the dataset
///
/// # Errors
///
/// Returns the fetch error, `SerializationError` for malformed JSON, or
/// `InvalidReferenceData` when validation fails
pub async fn try_load_reference_data(source: &dyn ReferenceSource) -> AppResult<ReferenceData> {
    let json = source.fetch().await?;
    ReferenceData::from_json(&json)
}

/// Load the dataset, logging and swallowing any failure
pub async fn load_reference_data(source: &dyn ReferenceSource) -> Option<Arc<ReferenceData>> {
    match try_load_reference_data(source).await {
        Ok(data) => {
            info!(
                source = %source.describe(),
                milk_types = data.milk_types.len(),
                available = data.available_milk_types.len(),
                "reference data loaded"
            );
            Some(Arc::new(data))
        }
        Err(e) => {
            error!(
                source = %source.describe(),
                error = %e,
                "failed to load reference data, continuing without derived values"
            );
            None
        }
    }
}

/// Parse the bundled dataset synchronously
///
/// # Errors
///
/// Returns an error only if the bundled file is malformed
pub fn bundled_reference_data() -> AppResult<ReferenceData> {
    ReferenceData::from_json(BUNDLED_REFERENCE_JSON)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_dataset_is_valid() {
        let data = bundled_reference_data().unwrap();
        assert_eq!(data.available_milk_types.len(), 3);
        assert!(data.milk_types.contains_key("buffalo"));
    }

    #[tokio::test]
    async fn test_missing_file_degrades_to_none() {
        let source = FileReferenceSource::new("/nonexistent/milk_reference.json");
        assert!(load_reference_data(&source).await.is_none());
    }

    #[tokio::test]
    async fn test_static_source_loads() {
        let loaded = load_reference_data(&StaticReferenceSource::bundled()).await;
        assert!(loaded.is_some());
    }
}
