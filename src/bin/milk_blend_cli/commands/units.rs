// ABOUTME: Unit conversion command for milk-blend
// ABOUTME: Converts a volume between any two supported kitchen units via cups
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Milk Blend Contributors

use anyhow::{anyhow, Result};
use milk_blend::blend::{convert_from_cups, convert_to_cups};
use milk_blend_core::models::VolumeUnit;
use serde::Serialize;

#[derive(Serialize)]
struct Conversion {
    value: f64,
    from: VolumeUnit,
    to: VolumeUnit,
    cups: f64,
    result: f64,
}

fn parse_unit(unit: &str) -> Result<VolumeUnit> {
    VolumeUnit::parse(unit).ok_or_else(|| anyhow!("unknown volume unit '{unit}'"))
}

/// `milk-blend units <value> <from> <to>`
pub fn convert(value: f64, from: &str, to: &str) -> Result<()> {
    let from_unit = parse_unit(from)?;
    let to_unit = parse_unit(to)?;
    let cups = convert_to_cups(value, from);
    let conversion = Conversion {
        value,
        from: from_unit,
        to: to_unit,
        cups,
        result: convert_from_cups(cups, to),
    };
    crate::helpers::print_json(&conversion)
}
