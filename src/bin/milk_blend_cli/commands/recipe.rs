// ABOUTME: Recipe commands for milk-blend: classify, adjust, and impact
// ABOUTME: Each builds a substitution session from a recipe file and prints JSON
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Milk Blend Contributors

use crate::helpers::{apply_ratio_specs, open_session, parse_volume_spec, print_json};
use anyhow::Result;
use milk_blend::classifier::{detect_original_milk_type, ClassificationOutcome};
use milk_blend::config::EngineConfig;
use milk_blend::derived::SubstituteRecommendation;
use milk_blend_core::models::MilkTypeId;
use serde::Serialize;
use std::path::Path;
use tracing::warn;

#[derive(Serialize)]
struct ClassifyReport<'a> {
    recipe_id: &'a str,
    title: &'a str,
    classification: ClassificationOutcome,
    detected_milk_type: MilkTypeId,
    original_milk_type: &'a MilkTypeId,
    #[serde(skip_serializing_if = "Option::is_none")]
    recommended_substitute: Option<SubstituteRecommendation>,
    selectable_milk_types: Vec<MilkTypeId>,
}

/// `milk-blend classify <recipe>`
pub async fn classify(config: &EngineConfig, explicit_reference: bool, recipe: &Path) -> Result<()> {
    let session = open_session(config, explicit_reference, recipe).await?;
    let report = ClassifyReport {
        recipe_id: &session.recipe().id,
        title: &session.recipe().title,
        classification: session.classification(),
        detected_milk_type: detect_original_milk_type(session.recipe()),
        original_milk_type: session.original_milk_type(),
        recommended_substitute: session
            .recommended_substitute()
            .filter(|rec| rec.substitute != rec.milk_type),
        selectable_milk_types: session.selectable_milk_types(),
    };
    print_json(&report)
}

/// `milk-blend adjust <recipe> [--milk T=P]... [--volume T=A[:U]]... [--batch N]`
pub async fn adjust(
    config: &EngineConfig,
    explicit_reference: bool,
    recipe: &Path,
    milks: &[String],
    volumes: &[String],
    batch: f64,
) -> Result<()> {
    let mut session = open_session(config, explicit_reference, recipe).await?;
    if !session.classification().is_cheese {
        warn!(recipe = %recipe.display(), "recipe does not look like a cheesemaking recipe");
    }

    session.set_batch_multiplier(batch)?;
    apply_ratio_specs(&mut session, milks)?;

    if !volumes.is_empty() {
        session.enter_volume_mode();
        for spec in volumes {
            let (milk, value, unit) = parse_volume_spec(spec)?;
            session.set_milk_volume(&milk, value, &unit)?;
        }
    }

    print_json(&session.snapshot())
}

/// `milk-blend impact <recipe> [--milk T=P]...`
pub async fn impact(
    config: &EngineConfig,
    explicit_reference: bool,
    recipe: &Path,
    milks: &[String],
) -> Result<()> {
    let mut session = open_session(config, explicit_reference, recipe).await?;
    apply_ratio_specs(&mut session, milks)?;
    print_json(&session.substitution_impact())
}
