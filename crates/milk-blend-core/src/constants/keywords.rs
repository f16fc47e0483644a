// ABOUTME: Keyword tables for cheese recipe detection and ingredient categorization
// ABOUTME: All matching is case-insensitive substring containment against these lists
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Milk Blend Contributors

//! Keyword tables.
//!
//! Every entry is lower-case. Callers lower-case the text under test and
//! check `contains`; there is no fuzzy matching.

/// Category value that marks a cheese recipe
pub const CHEESE_CATEGORY: &str = "cheese";

/// Tags that mark a recipe as cheesemaking (compared for equality after lower-casing)
pub const CHEESEMAKING_TAGS: &[&str] = &[
    "cheesemaking",
    "cheese-making",
    "cheese making",
    "homemade-cheese",
    "homemade cheese",
    "fresh-cheese",
    "fresh cheese",
    "aged-cheese",
    "aged cheese",
    "soft-cheese",
    "hard-cheese",
    "cultured-dairy",
];

/// Title phrases where cheese is an ingredient of some other dish
pub const TITLE_EXCLUSIONS: &[&str] = &[
    "grilled cheese",
    "cheesecake",
    "cheese cake",
    "mac and cheese",
    "mac & cheese",
    "mac n cheese",
    "macaroni and cheese",
    "macaroni & cheese",
    "cheeseburger",
    "cheese burger",
    "cheese sauce",
    "cheese dip",
    "cheese ball",
    "cheese straws",
    "cheese bread",
    "cheese biscuits",
    "cheese scones",
    "cheese soup",
    "cheese fries",
    "cheese grits",
    "cheese danish",
    "cheese omelet",
    "cheese omelette",
    "cheese pizza",
    "cheese puffs",
    "cheese crisps",
    "cheese enchiladas",
    "cheesesteak",
    "cheese steak",
    "cheesy",
    "stuffed with",
    "quesadilla",
];

/// Cheese styles that identify a cheesemaking title
pub const CHEESE_TITLE_KEYWORDS: &[&str] = &[
    "cheese",
    "cheddar",
    "brie",
    "camembert",
    "mozzarella",
    "burrata",
    "ricotta",
    "feta",
    "halloumi",
    "paneer",
    "queso",
    "chevre",
    "chèvre",
    "gouda",
    "edam",
    "colby",
    "monterey jack",
    "havarti",
    "gruyere",
    "gruyère",
    "emmental",
    "manchego",
    "pecorino",
    "parmesan",
    "parmigiano",
    "romano",
    "asiago",
    "provolone",
    "mascarpone",
    "quark",
    "labneh",
    "fromage",
    "stilton",
    "roquefort",
    "gorgonzola",
    "caciotta",
    "tomme",
    "reblochon",
    "jarlsberg",
];

/// Ingredient text that identifies a dairy milk line
pub const MILK_KEYWORDS: &[&str] = &["milk", "lait", "leche", "latte", "milch"];

/// Ingredient text that looks like milk but is not a dairy milk line (matched as whole words)
pub const NON_DAIRY_MILK_EXCLUSIONS: &[&str] = &[
    "buttermilk",
    "coconut milk",
    "almond milk",
    "oat milk",
    "soy milk",
    "soya milk",
    "rice milk",
    "cashew milk",
    "milk powder",
    "powdered milk",
    "dry milk",
    "condensed milk",
    "evaporated milk",
];

/// Ingredient text that identifies rennet
pub const RENNET_KEYWORDS: &[&str] = &["rennet", "chymosin", "cuajo", "présure", "presure"];

/// Ingredient text that identifies calcium chloride
pub const CALCIUM_CHLORIDE_KEYWORDS: &[&str] =
    &["calcium chloride", "cacl2", "cacl₂", "chlorure de calcium"];

/// Ingredient text that identifies a starter culture
pub const CULTURE_KEYWORDS: &[&str] = &[
    "culture",
    "mesophilic",
    "thermophilic",
    "starter",
    "flora danica",
    "penicillium",
    "geotrichum",
    "kefir grains",
    "buttermilk",
];

/// Ingredient text that identifies an acid coagulant
pub const ACID_KEYWORDS: &[&str] = &[
    "vinegar",
    "lemon juice",
    "lime juice",
    "citric acid",
    "tartaric acid",
    "lemon",
];

/// Instruction text that indicates curd handling
pub const CURD_INSTRUCTION_KEYWORDS: &[&str] =
    &["curd", "drain", "whey", "coagul", "strain", "press"];

/// Ingredient text that marks raw (unpasteurized) milk
pub const RAW_MILK_KEYWORDS: &[&str] = &["raw", "unpasteurized", "unpasteurised", "farm fresh"];

/// Language variants per milk type, in detection order.
///
/// Detection returns the first variant that matches, so more specific
/// animals are listed before the generic cow entries.
pub const MILK_TYPE_VARIANTS: &[(&str, &[&str])] = &[
    (
        "sheep",
        &["sheep", "ewe", "brebis", "oveja", "pecora", "schaf"],
    ),
    (
        "goat",
        &["goat", "chèvre", "chevre", "cabra", "capra", "ziege"],
    ),
    ("buffalo", &["buffalo", "bufala", "búfala", "buffle"]),
    ("camel", &["camel", "chameau", "camello"]),
    (
        "cow",
        &["cow", "whole milk", "vache", "vaca", "mucca", "kuh"],
    ),
];

/// True when `haystack` (already lower-cased) contains any of `needles`
#[must_use]
pub fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}
