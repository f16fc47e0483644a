// ABOUTME: Milk type identifiers and immutable per-type reference properties
// ABOUTME: Defines MilkTypeId, CoagulationSpeed, and MilkType
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Milk Blend Contributors

use serde::{Deserialize, Deserializer, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Identifier of a milk type, as used for keys in the reference dataset
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct MilkTypeId(String);

impl<'de> Deserialize<'de> for MilkTypeId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::new)
    }
}

impl MilkTypeId {
    /// Create an identifier; ids are stored lower-case
    #[must_use]
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(id.as_ref().trim().to_lowercase())
    }

    /// Borrow the id as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MilkTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MilkTypeId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl Borrow<str> for MilkTypeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for MilkTypeId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// How quickly a milk sets with rennet, slowest to fastest
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum CoagulationSpeed {
    /// Slowest set (e.g. camel milk)
    #[serde(alias = "slow")]
    Slowest,
    /// Typical cow milk set
    #[default]
    Standard,
    /// Faster than cow
    #[serde(alias = "fast")]
    Faster,
    /// Fastest set (e.g. sheep milk)
    Fastest,
}

impl CoagulationSpeed {
    /// All buckets in ordinal order
    pub const ALL: [Self; 4] = [Self::Slowest, Self::Standard, Self::Faster, Self::Fastest];

    /// Display label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Slowest => "slowest",
            Self::Standard => "standard",
            Self::Faster => "faster",
            Self::Fastest => "fastest",
        }
    }
}

/// Properties of a single milk type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MilkType {
    /// Display name ("Cow", "Goat", ...)
    pub name: String,
    /// Butterfat content (percent)
    pub fat_percent: f64,
    /// Protein content (percent)
    pub protein_percent: f64,
    /// Typical cheese yield per gallon of milk (pounds)
    pub cheese_yield_per_gallon_lb: f64,
    /// Rennet set speed bucket
    pub coagulation_speed: CoagulationSpeed,
    /// Flavor descriptors
    pub flavor_profile: Vec<String>,
    /// Free-text texture description
    pub texture_notes: String,
    /// Whether the type is offered for direct selection
    pub available: bool,
    /// Recommended stand-in when the type is not available
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_substitute: Option<MilkTypeId>,
    /// Notes on substituting this type
    #[serde(skip_serializing_if = "Option::is_none")]
    pub substitute_notes: Option<String>,
}

impl MilkType {
    /// Name to show, falling back to the id when the dataset has none
    #[must_use]
    pub fn display_name<'a>(&'a self, id: &'a MilkTypeId) -> &'a str {
        if self.name.is_empty() {
            id.as_str()
        } else {
            &self.name
        }
    }
}
