// ABOUTME: Integration tests for substitution sessions and change notification
// ABOUTME: Covers observer publishing, rejected mutations, exotic milk starts, and degraded mode
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Milk Blend Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::{
    chevre_recipe, init_test_logging, milk, recipe, reference, session, tomme_recipe,
    RecordingObserver,
};
use milk_blend::blend::BlendMode;
use milk_blend::config::EngineConfig;
use milk_blend::session::SubstitutionSession;
use milk_blend_core::errors::ErrorCode;
use milk_blend_core::models::{MilkSubstitutions, Recipe};
use std::sync::Arc;

// ============================================================================
// Observers
// ============================================================================

#[test]
fn test_every_successful_change_is_published() {
    let mut session = session(tomme_recipe());
    let observer = Arc::new(RecordingObserver::default());
    session.subscribe(observer.clone());

    session.enter_mixed_mode();
    session.set_milk_ratio(&milk("goat"), 30.0).unwrap();
    session.set_batch_multiplier(2.0).unwrap();
    assert_eq!(observer.count(), 3);

    let last = observer.last().unwrap();
    assert_eq!(last.mode, BlendMode::PercentageBlend);
    assert_eq!(last.batch_multiplier, 2.0);
    assert_eq!(last.ratios[&milk("cow")], 70.0);
    assert_eq!(last.ratios[&milk("goat")], 30.0);
    assert!(last.adjusted_ingredients.is_some());
    assert!(last.milk_info.is_some());
    assert!(last.nutrition.is_some());
}

#[test]
fn test_rejected_change_publishes_nothing() {
    let mut session = session(tomme_recipe());
    let observer = Arc::new(RecordingObserver::default());
    session.subscribe(observer.clone());
    let before = session.state().clone();

    let error = session.set_single_milk(&milk("buffalo")).unwrap_err();
    assert_eq!(error.code, ErrorCode::UnknownMilkType);
    let error = session.set_batch_multiplier(-1.0).unwrap_err();
    assert_eq!(error.code, ErrorCode::ValueOutOfRange);

    assert_eq!(observer.count(), 0);
    assert_eq!(session.state(), &before);
}

#[test]
fn test_snapshot_serializes_for_renderers() {
    let mut session = session(tomme_recipe());
    session.enter_volume_mode();
    session
        .set_milk_volume(&milk("goat"), 1.0, "quart")
        .unwrap();

    let json = serde_json::to_value(session.snapshot()).unwrap();
    assert_eq!(json["mode"], "volume_blend");
    assert_eq!(json["total_volume_cups"], 4.0);
    assert_eq!(json["ratios"]["goat"], 100.0);
    assert_eq!(json["original_milk_type"], "cow");
}

// ============================================================================
// Starting state
// ============================================================================

#[test]
fn test_exotic_original_starts_on_substitute() {
    let buffalo = recipe(
        "Buffalo Mozzarella",
        &[("1", "gallon", "water buffalo milk"), ("1/4", "tsp", "rennet")],
    );
    let session = session(buffalo);

    assert_eq!(session.original_milk_type(), &milk("buffalo"));
    assert_eq!(session.state().ratio(&milk("sheep")), 100.0);

    let recommendation = session.recommended_substitute().unwrap();
    assert_eq!(recommendation.substitute, milk("sheep"));
    assert!(recommendation.notes.is_some());

    assert!((session.volume_conversion_factor().unwrap() - 0.9).abs() < 1e-9);
    let lines = session.adjusted_ingredients().unwrap();
    assert_eq!(lines[0].display_item, "Sheep milk");
    assert!(lines[0].adjusted);
}

#[test]
fn test_available_original_recommends_itself() {
    let session = session(chevre_recipe());
    let recommendation = session.recommended_substitute().unwrap();
    assert_eq!(recommendation.substitute, milk("goat"));
    assert_eq!(recommendation.notes, None);
}

#[test]
fn test_selectable_types_follow_recipe_declaration() {
    let mut declared = tomme_recipe();
    declared.milk_substitutions = Some(MilkSubstitutions {
        enabled: true,
        original_milk: None,
        supported_types: vec![milk("sheep"), milk("cow")],
    });
    let session = session(declared);
    assert_eq!(session.selectable_milk_types(), [milk("cow"), milk("sheep")]);

    let plain = common::session(tomme_recipe());
    assert_eq!(
        plain.selectable_milk_types(),
        [milk("cow"), milk("goat"), milk("sheep")]
    );
}

// ============================================================================
// Degraded mode and reloads
// ============================================================================

#[test]
fn test_without_reference_data_blend_still_works() {
    init_test_logging();
    let mut session = SubstitutionSession::new(chevre_recipe(), None, EngineConfig::default());

    assert_eq!(session.state().ratio(&milk("goat")), 100.0);
    session.set_milk_ratio(&milk("cow"), 40.0).unwrap();
    assert_eq!(session.state().ratio_sum(), 100.0);

    assert!(session.adjusted_ingredients().is_none());
    assert!(session.blended_nutrition().is_none());
    assert!(session.blended_milk_info().is_none());
    assert!(session.substitution_impact().is_none());
    assert!(session.rennet_adjustment().is_none());
    assert!(session.snapshot().milk_info.is_none());
}

#[test]
fn test_late_reference_data_restarts_blend() {
    init_test_logging();
    let mut session = SubstitutionSession::new(tomme_recipe(), None, EngineConfig::default());
    session.set_milk_ratio(&milk("goat"), 40.0).unwrap();

    let observer = Arc::new(RecordingObserver::default());
    session.subscribe(observer.clone());
    session.set_reference_data(reference());

    assert_eq!(observer.count(), 1);
    assert_eq!(session.state().ratio(&milk("cow")), 100.0);
    assert!(session.adjusted_ingredients().is_some());
}

#[test]
fn test_load_recipe_starts_over() {
    let mut session = session(tomme_recipe());
    session.set_milk_ratio(&milk("sheep"), 70.0).unwrap();
    session.set_batch_multiplier(3.0).unwrap();

    session.load_recipe(chevre_recipe());
    assert_eq!(session.original_milk_type(), &milk("goat"));
    assert_eq!(session.state().ratio(&milk("goat")), 100.0);
    assert_eq!(session.state().batch_multiplier(), 1.0);
    assert_eq!(session.state().mode(), BlendMode::Single);
    assert_eq!(session.recipe().title, "Fresh Chevre");
}

#[test]
fn test_declared_milk_ids_are_case_insensitive() {
    let declared: Recipe = serde_json::from_value(serde_json::json!({
        "id": "declared-chevre",
        "title": "Fresh Chevre",
        "ingredients": [{"quantity": "1/2", "unit": "cup", "item": "milk"}],
        "milk_substitutions": {
            "enabled": true,
            "original_milk": "Goat",
            "supported_types": ["Cow", "Goat"]
        }
    }))
    .unwrap();
    let session = session(declared);

    assert_eq!(session.original_milk_type(), &milk("goat"));
    assert_eq!(session.state().ratio(&milk("goat")), 100.0);
    assert_eq!(session.selectable_milk_types(), [milk("cow"), milk("goat")]);
    assert!(session.substitution_impact().is_some());
}

#[test]
fn test_classification_is_available_from_session() {
    let session = session(tomme_recipe());
    let outcome = session.classification();
    assert!(outcome.is_cheese);
    assert_eq!(outcome.rule, "title_keyword");
}
