// ABOUTME: Argument parsing and I/O helpers shared by milk-blend commands
// ABOUTME: Parses TYPE=PERCENT and TYPE=AMOUNT[:UNIT] specs, reads recipes, loads reference data
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Milk Blend Contributors

use anyhow::{bail, Context, Result};
use milk_blend::config::EngineConfig;
use milk_blend::reference::{load_reference_data, FileReferenceSource, StaticReferenceSource};
use milk_blend::session::SubstitutionSession;
use milk_blend_core::models::{MilkTypeId, Recipe, ReferenceData};
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Unit used when a volume spec has none
const DEFAULT_VOLUME_UNIT: &str = "cup";

/// Parse `cow=50`
pub fn parse_ratio_spec(spec: &str) -> Result<(MilkTypeId, f64)> {
    let Some((milk, percent)) = spec.split_once('=') else {
        bail!("expected TYPE=PERCENT, got '{spec}'");
    };
    let percent: f64 = percent
        .trim()
        .trim_end_matches('%')
        .parse()
        .with_context(|| format!("invalid percent in '{spec}'"))?;
    Ok((MilkTypeId::new(milk), percent))
}

/// Parse `goat=2:quart`; the unit defaults to cups
pub fn parse_volume_spec(spec: &str) -> Result<(MilkTypeId, f64, String)> {
    let Some((milk, amount)) = spec.split_once('=') else {
        bail!("expected TYPE=AMOUNT[:UNIT], got '{spec}'");
    };
    let (value, unit) = amount
        .split_once(':')
        .unwrap_or((amount, DEFAULT_VOLUME_UNIT));
    let value: f64 = value
        .trim()
        .parse()
        .with_context(|| format!("invalid amount in '{spec}'"))?;
    Ok((MilkTypeId::new(milk), value, unit.trim().to_owned()))
}

/// Read and parse a recipe file
pub async fn read_recipe(path: &Path) -> Result<Recipe> {
    let json = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read recipe {}", path.display()))?;
    serde_json::from_str(&json).with_context(|| format!("invalid recipe JSON in {}", path.display()))
}

/// Load reference data from the configured file.
///
/// Without an explicit `--reference`, a missing file falls back to the
/// bundled dataset.
pub async fn load_reference(
    config: &EngineConfig,
    explicit: bool,
) -> Option<Arc<ReferenceData>> {
    let file = FileReferenceSource::new(config.reference_path.clone());
    if explicit || file.path().exists() {
        return load_reference_data(&file).await;
    }
    info!(
        path = %file.path().display(),
        "reference file not found, using bundled dataset"
    );
    load_reference_data(&StaticReferenceSource::bundled()).await
}

/// Build a session for the recipe file
pub async fn open_session(
    config: &EngineConfig,
    explicit_reference: bool,
    recipe_path: &Path,
) -> Result<SubstitutionSession> {
    let recipe = read_recipe(recipe_path).await?;
    let reference = load_reference(config, explicit_reference).await;
    Ok(SubstitutionSession::new(recipe, reference, config.clone()))
}

/// Apply `--milk` specs as a full ratio set
pub fn apply_ratio_specs(session: &mut SubstitutionSession, specs: &[String]) -> Result<()> {
    if specs.is_empty() {
        return Ok(());
    }
    let entries = specs
        .iter()
        .map(|spec| parse_ratio_spec(spec))
        .collect::<Result<Vec<_>>>()?;
    session.enter_mixed_mode();
    session.set_ratios(&entries)?;
    Ok(())
}

/// Print a value as pretty JSON on stdout
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ratio_spec() {
        let (milk, percent) = parse_ratio_spec("Goat=35%").unwrap();
        assert_eq!(milk.as_str(), "goat");
        assert_eq!(percent, 35.0);
        assert!(parse_ratio_spec("goat").is_err());
        assert!(parse_ratio_spec("goat=lots").is_err());
    }

    #[test]
    fn test_parse_volume_spec_defaults_to_cups() {
        let (milk, value, unit) = parse_volume_spec("sheep=2").unwrap();
        assert_eq!(milk.as_str(), "sheep");
        assert_eq!(value, 2.0);
        assert_eq!(unit, "cup");

        let (_, _, unit) = parse_volume_spec("cow=1:gallon").unwrap();
        assert_eq!(unit, "gallon");
    }
}
