// ABOUTME: Integration tests for asynchronous reference data loading
// ABOUTME: Valid files load, malformed or inconsistent files fail with typed errors and degrade to None
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Milk Blend Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::{init_test_logging, milk};
use milk_blend::reference::{
    load_reference_data, try_load_reference_data, FileReferenceSource, ReferenceSource,
    StaticReferenceSource, BUNDLED_REFERENCE_JSON,
};
use milk_blend_core::errors::ErrorCode;
use std::fs;
use std::path::PathBuf;

fn write_dataset(dir: &tempfile::TempDir, json: &str) -> PathBuf {
    let path = dir.path().join("milk_reference.json");
    fs::write(&path, json).unwrap();
    path
}

#[tokio::test]
async fn test_loads_dataset_from_file() {
    init_test_logging();
    let dir = tempfile::tempdir().unwrap();
    let path = write_dataset(&dir, BUNDLED_REFERENCE_JSON);

    let source = FileReferenceSource::new(&path);
    assert_eq!(source.path(), path.as_path());
    let data = load_reference_data(&source).await.unwrap();

    assert_eq!(
        data.available_milk_types,
        [milk("cow"), milk("goat"), milk("sheep")]
    );
    assert_eq!(data.conversion_factor(&milk("goat"), &milk("cow")), 1.1);
    assert_eq!(data.rennet_factor(&milk("sheep")), 0.75);
    assert_eq!(data.display_name(&milk("buffalo")), "Water Buffalo");
}

#[tokio::test]
async fn test_missing_file_is_unavailable() {
    init_test_logging();
    let dir = tempfile::tempdir().unwrap();
    let source = FileReferenceSource::new(dir.path().join("absent.json"));

    let error = try_load_reference_data(&source).await.unwrap_err();
    assert_eq!(error.code, ErrorCode::ReferenceDataUnavailable);
    assert!(error.code.is_degradable());
    assert!(load_reference_data(&source).await.is_none());
}

#[tokio::test]
async fn test_malformed_json_is_a_serialization_error() {
    init_test_logging();
    let dir = tempfile::tempdir().unwrap();
    let path = write_dataset(&dir, r#"{"milk_types": {"cow": "#);

    let source = FileReferenceSource::new(path);
    let error = try_load_reference_data(&source).await.unwrap_err();
    assert_eq!(error.code, ErrorCode::SerializationError);
    assert!(load_reference_data(&source).await.is_none());
}

#[tokio::test]
async fn test_unknown_available_type_is_invalid() {
    let source = StaticReferenceSource::new(
        r#"{
            "milk_types": {"cow": {"name": "Cow", "available": true}},
            "available_milk_types": ["cow", "reindeer"]
        }"#,
    );
    let error = try_load_reference_data(&source).await.unwrap_err();
    assert_eq!(error.code, ErrorCode::InvalidReferenceData);
    assert!(error.message.contains("reindeer"));
}

#[tokio::test]
async fn test_non_positive_factor_is_invalid() {
    let source = StaticReferenceSource::new(
        r#"{
            "milk_types": {"cow": {"name": "Cow", "available": true}},
            "available_milk_types": ["cow"],
            "rennet_adjustments": {"factors": {"cow": 0.0}}
        }"#,
    );
    let error = try_load_reference_data(&source).await.unwrap_err();
    assert_eq!(error.code, ErrorCode::InvalidReferenceData);
}

#[tokio::test]
async fn test_empty_available_list_is_invalid() {
    let source = StaticReferenceSource::new(r#"{"milk_types": {}}"#);
    let error = try_load_reference_data(&source).await.unwrap_err();
    assert_eq!(error.code, ErrorCode::InvalidReferenceData);
}

#[tokio::test]
async fn test_sources_describe_themselves() {
    let file = FileReferenceSource::new("/data/milk.json");
    assert_eq!(file.describe(), "/data/milk.json");
    assert_eq!(
        StaticReferenceSource::bundled().describe(),
        "in-memory reference data"
    );
    assert!(load_reference_data(&StaticReferenceSource::bundled())
        .await
        .is_some());
}
