// ABOUTME: Integration tests for engine configuration defaults and environment overrides
// ABOUTME: Environment-mutating tests run serially to avoid interfering with each other
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Milk Blend Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use milk_blend::config::{ConfigError, EngineConfig, DEFAULT_REFERENCE_PATH};
use milk_blend_core::errors::{AppError, ErrorCode};
use serial_test::serial;
use std::env;
use std::path::PathBuf;

const OVERRIDE_VARS: &[&str] = &[
    "MILK_BLEND_REFERENCE_PATH",
    "MILK_BLEND_DEFAULT_MILK",
    "MILK_BLEND_FLAVOR_THRESHOLD",
    "MILK_BLEND_FRACTION_TOLERANCE",
    "MILK_BLEND_IMPACT_FAT_DELTA",
    "MILK_BLEND_IMPACT_ADVICE_SHARE",
];

fn clear_overrides() {
    for var in OVERRIDE_VARS {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_defaults_without_environment() {
    clear_overrides();
    let config = EngineConfig::from_env().unwrap();
    assert_eq!(config, EngineConfig::default());
    assert_eq!(config.reference_path, PathBuf::from(DEFAULT_REFERENCE_PATH));
    assert_eq!(config.flavor_threshold_percent, 25.0);
    assert_eq!(config.fraction_snap_tolerance, 0.05);
}

#[test]
#[serial]
fn test_environment_variable_override() {
    clear_overrides();
    env::set_var("MILK_BLEND_REFERENCE_PATH", "/srv/milk/reference.json");
    env::set_var("MILK_BLEND_DEFAULT_MILK", " Goat ");
    env::set_var("MILK_BLEND_FLAVOR_THRESHOLD", "10");
    env::set_var("MILK_BLEND_IMPACT_FAT_DELTA", "0.25");

    let config = EngineConfig::from_env().unwrap();
    assert_eq!(
        config.reference_path,
        PathBuf::from("/srv/milk/reference.json")
    );
    assert_eq!(config.default_milk_type.as_str(), "goat");
    assert_eq!(config.flavor_threshold_percent, 10.0);
    assert_eq!(config.impact.fat_delta_threshold, 0.25);

    clear_overrides();
}

#[test]
#[serial]
fn test_unparseable_override_is_rejected() {
    clear_overrides();
    env::set_var("MILK_BLEND_FLAVOR_THRESHOLD", "a quarter");

    let error = EngineConfig::from_env().unwrap_err();
    assert!(matches!(error, ConfigError::Parse(_)));
    assert!(error.to_string().contains("MILK_BLEND_FLAVOR_THRESHOLD"));

    clear_overrides();
}

#[test]
#[serial]
fn test_override_failing_validation_is_rejected() {
    clear_overrides();
    env::set_var("MILK_BLEND_FRACTION_TOLERANCE", "0.2");
    assert!(matches!(
        EngineConfig::from_env(),
        Err(ConfigError::ValueOutOfRange(_))
    ));

    env::set_var("MILK_BLEND_FRACTION_TOLERANCE", "0.03");
    env::set_var("MILK_BLEND_IMPACT_ADVICE_SHARE", "60");
    assert!(matches!(
        EngineConfig::from_env(),
        Err(ConfigError::InvalidRange(_))
    ));

    clear_overrides();
}

#[test]
#[serial]
fn test_non_finite_impact_delta_is_rejected() {
    clear_overrides();
    env::set_var("MILK_BLEND_IMPACT_FAT_DELTA", "NaN");
    assert!(matches!(
        EngineConfig::from_env(),
        Err(ConfigError::ValueOutOfRange(_))
    ));

    env::set_var("MILK_BLEND_IMPACT_FAT_DELTA", "inf");
    assert!(matches!(
        EngineConfig::from_env(),
        Err(ConfigError::ValueOutOfRange(_))
    ));

    clear_overrides();
}

#[test]
fn test_config_error_maps_to_app_error() {
    let error: AppError = ConfigError::MissingField("default_milk_type").into();
    assert_eq!(error.code, ErrorCode::ConfigInvalid);
    assert!(error.message.contains("default_milk_type"));
}

#[test]
fn test_config_deserializes_with_partial_fields() {
    let config: EngineConfig =
        serde_json::from_str(r#"{"flavor_threshold_percent": 30.0, "impact": {"lower_yield_ratio": 0.8}}"#)
            .unwrap();
    assert_eq!(config.flavor_threshold_percent, 30.0);
    assert_eq!(config.impact.lower_yield_ratio, 0.8);
    assert_eq!(config.impact.higher_yield_ratio, 1.15);
    assert!(config.validate().is_ok());
}
