// ABOUTME: Cheese recipe detection and original milk type detection
// ABOUTME: Ordered rule list with early return so exclusions always run before title inclusion
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Milk Blend Contributors

//! Recipe classifier.
//!
//! [`is_cheese_recipe`] walks [`CLASSIFIER_RULES`] in order. Each rule either
//! decides the outcome or defers to the next one. The title exclusion rule
//! sits ahead of the title keyword rule in the table, so a "Grilled Cheese
//! Sandwich" is rejected before the word "cheese" can count for it. An
//! exclusion phrase only rejects a title that also carries a cheese keyword;
//! other titles fall through to the ingredient evidence.
//!
//! All keyword tests are case-insensitive substring checks against the
//! tables in [`milk_blend_core::constants::keywords`].

use milk_blend_core::constants::blend::DEFAULT_MILK_TYPE;
use milk_blend_core::constants::keywords::{
    contains_any, ACID_KEYWORDS, CHEESEMAKING_TAGS, CHEESE_CATEGORY, CHEESE_TITLE_KEYWORDS,
    CULTURE_KEYWORDS, CURD_INSTRUCTION_KEYWORDS, MILK_KEYWORDS, MILK_TYPE_VARIANTS,
    NON_DAIRY_MILK_EXCLUSIONS, RENNET_KEYWORDS, TITLE_EXCLUSIONS,
};
use milk_blend_core::models::{MilkTypeId, Recipe};
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;
use tracing::debug;

/// Non-dairy milk phrases as whole words, so "goat milk" never matches "oat milk"
static NON_DAIRY_MILK_RE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    let alternatives = NON_DAIRY_MILK_EXCLUSIONS
        .iter()
        .map(|phrase| regex::escape(phrase))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"\b(?:{alternatives})\b")).ok()
});

/// Result of a single classifier rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleOutcome {
    /// Stop and return this answer
    Decide(bool),
    /// Defer to the next rule
    Continue,
}

/// One entry in the classifier's ordered rule list
#[derive(Debug, Clone, Copy)]
pub struct ClassifierRule {
    /// Rule name, reported with the outcome
    pub name: &'static str,
    /// Predicate over the pre-computed recipe facts
    pub evaluate: fn(&RecipeFacts) -> RuleOutcome,
}

/// Classification answer plus the rule that produced it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ClassificationOutcome {
    /// Whether the recipe makes cheese
    pub is_cheese: bool,
    /// Name of the deciding rule, `"default"` when none matched
    pub rule: &'static str,
}

/// Lower-cased text and keyword hits computed once per recipe
#[derive(Debug, Clone, Default)]
pub struct RecipeFacts {
    explicitly_enabled: bool,
    category: String,
    tags: Vec<String>,
    title: String,
    has_ingredients: bool,
    has_milk: bool,
    has_rennet: bool,
    has_culture: bool,
    has_acid: bool,
    has_curd_instructions: bool,
}

impl RecipeFacts {
    /// Gather facts from a recipe record
    #[must_use]
    pub fn from_recipe(recipe: &Recipe) -> Self {
        let items: Vec<String> = recipe
            .ingredient_list()
            .iter()
            .map(|ingredient| ingredient.item.to_lowercase())
            .collect();
        let any_item = |keywords: &[&str]| items.iter().any(|item| contains_any(item, keywords));

        Self {
            explicitly_enabled: recipe
                .milk_substitutions
                .as_ref()
                .is_some_and(|subs| subs.enabled),
            category: recipe
                .category
                .as_deref()
                .unwrap_or_default()
                .trim()
                .to_lowercase(),
            tags: recipe
                .tags
                .iter()
                .map(|tag| tag.trim().to_lowercase())
                .collect(),
            title: recipe.title.to_lowercase(),
            has_ingredients: !items.is_empty(),
            has_milk: items.iter().any(|item| is_dairy_milk_text(item)),
            has_rennet: any_item(RENNET_KEYWORDS),
            has_culture: any_item(CULTURE_KEYWORDS),
            has_acid: any_item(ACID_KEYWORDS),
            has_curd_instructions: recipe
                .instructions
                .iter()
                .any(|step| contains_any(&step.text().to_lowercase(), CURD_INSTRUCTION_KEYWORDS)),
        }
    }
}

/// True when lower-cased ingredient text names dairy milk
#[must_use]
pub fn is_dairy_milk_text(item: &str) -> bool {
    contains_any(item, MILK_KEYWORDS)
        && !NON_DAIRY_MILK_RE
            .as_ref()
            .is_some_and(|re| re.is_match(item))
}

fn explicit_declaration(facts: &RecipeFacts) -> RuleOutcome {
    if facts.explicitly_enabled {
        RuleOutcome::Decide(true)
    } else {
        RuleOutcome::Continue
    }
}

fn cheese_category(facts: &RecipeFacts) -> RuleOutcome {
    if facts.category == CHEESE_CATEGORY {
        RuleOutcome::Decide(true)
    } else {
        RuleOutcome::Continue
    }
}

fn cheesemaking_tags(facts: &RecipeFacts) -> RuleOutcome {
    if facts
        .tags
        .iter()
        .any(|tag| CHEESEMAKING_TAGS.contains(&tag.as_str()))
    {
        RuleOutcome::Decide(true)
    } else {
        RuleOutcome::Continue
    }
}

fn title_exclusion(facts: &RecipeFacts) -> RuleOutcome {
    if contains_any(&facts.title, CHEESE_TITLE_KEYWORDS)
        && contains_any(&facts.title, TITLE_EXCLUSIONS)
    {
        RuleOutcome::Decide(false)
    } else {
        RuleOutcome::Continue
    }
}

fn title_keyword(facts: &RecipeFacts) -> RuleOutcome {
    if !contains_any(&facts.title, CHEESE_TITLE_KEYWORDS) {
        return RuleOutcome::Continue;
    }
    if !facts.has_ingredients {
        return RuleOutcome::Decide(true);
    }
    if facts.has_milk && (facts.has_rennet || facts.has_culture || facts.has_acid) {
        RuleOutcome::Decide(true)
    } else {
        RuleOutcome::Continue
    }
}

fn ingredient_evidence(facts: &RecipeFacts) -> RuleOutcome {
    if facts.has_milk && facts.has_rennet {
        return RuleOutcome::Decide(true);
    }
    if facts.has_milk && facts.has_culture && facts.has_curd_instructions {
        return RuleOutcome::Decide(true);
    }
    RuleOutcome::Continue
}

/// Classifier rules in evaluation order
pub const CLASSIFIER_RULES: &[ClassifierRule] = &[
    ClassifierRule {
        name: "explicit_declaration",
        evaluate: explicit_declaration,
    },
    ClassifierRule {
        name: "cheese_category",
        evaluate: cheese_category,
    },
    ClassifierRule {
        name: "cheesemaking_tags",
        evaluate: cheesemaking_tags,
    },
    ClassifierRule {
        name: "title_exclusion",
        evaluate: title_exclusion,
    },
    ClassifierRule {
        name: "title_keyword",
        evaluate: title_keyword,
    },
    ClassifierRule {
        name: "ingredient_evidence",
        evaluate: ingredient_evidence,
    },
];

/// Run the rule list and report which rule decided
#[must_use]
pub fn classify_recipe(recipe: &Recipe) -> ClassificationOutcome {
    let facts = RecipeFacts::from_recipe(recipe);
    let outcome = CLASSIFIER_RULES
        .iter()
        .find_map(|rule| match (rule.evaluate)(&facts) {
            RuleOutcome::Decide(is_cheese) => Some(ClassificationOutcome {
                is_cheese,
                rule: rule.name,
            }),
            RuleOutcome::Continue => None,
        })
        .unwrap_or(ClassificationOutcome {
            is_cheese: false,
            rule: "default",
        });
    debug!(
        recipe_id = %recipe.id,
        is_cheese = outcome.is_cheese,
        rule = outcome.rule,
        "recipe classified"
    );
    outcome
}

/// Whether the recipe makes cheese
#[must_use]
pub fn is_cheese_recipe(recipe: &Recipe) -> bool {
    classify_recipe(recipe).is_cheese
}

/// Milk type named by the first ingredient that mentions one; cow otherwise.
///
/// Only the first textual match counts. A recipe listing several milks
/// reports whichever appears first.
#[must_use]
pub fn detect_original_milk_type(recipe: &Recipe) -> MilkTypeId {
    recipe
        .ingredient_list()
        .iter()
        .find_map(|ingredient| {
            let item = ingredient.item.to_lowercase();
            MILK_TYPE_VARIANTS
                .iter()
                .find(|(_, variants)| contains_any(&item, variants))
                .map(|(milk_type, _)| MilkTypeId::from(*milk_type))
        })
        .unwrap_or_else(|| MilkTypeId::from(DEFAULT_MILK_TYPE))
}

/// Declared `milk_substitutions.original_milk` when present, detection otherwise
#[must_use]
pub fn resolve_original_milk_type(recipe: &Recipe) -> MilkTypeId {
    recipe
        .milk_substitutions
        .as_ref()
        .and_then(|subs| subs.original_milk.clone())
        .unwrap_or_else(|| detect_original_milk_type(recipe))
}

#[cfg(test)]
mod tests {
    use super::*;
    use milk_blend_core::models::{Ingredient, Instruction, MilkSubstitutions};

    fn titled(title: &str) -> Recipe {
        Recipe {
            title: title.to_owned(),
            ..Recipe::default()
        }
    }

    #[test]
    fn test_exclusion_precedes_title_keyword() {
        let outcome = classify_recipe(&titled("Grilled Cheese Sandwich"));
        assert!(!outcome.is_cheese);
        assert_eq!(outcome.rule, "title_exclusion");
    }

    #[test]
    fn test_title_without_ingredients_is_enough() {
        let outcome = classify_recipe(&titled("Brie with Herbs"));
        assert!(outcome.is_cheese);
        assert_eq!(outcome.rule, "title_keyword");
    }

    #[test]
    fn test_category_wins_before_exclusion() {
        let recipe = Recipe {
            category: Some(" Cheese ".to_owned()),
            ..titled("Cheesecake")
        };
        assert_eq!(classify_recipe(&recipe).rule, "cheese_category");
    }

    #[test]
    fn test_culture_needs_curd_instructions() {
        let mut recipe = Recipe {
            ingredients: Some(vec![
                Ingredient::new("1", "gallon", "whole milk"),
                Ingredient::new("1/8", "tsp", "mesophilic culture"),
            ]),
            ..titled("Weekend Project")
        };
        assert!(!is_cheese_recipe(&recipe));

        recipe.instructions = vec![Instruction::Text("Drain the curds overnight".to_owned())];
        assert_eq!(classify_recipe(&recipe).rule, "ingredient_evidence");
    }

    #[test]
    fn test_explicit_declaration() {
        let recipe = Recipe {
            milk_substitutions: Some(MilkSubstitutions {
                enabled: true,
                ..MilkSubstitutions::default()
            }),
            ..titled("Grilled Cheese")
        };
        assert!(is_cheese_recipe(&recipe));
    }

    #[test]
    fn test_almond_milk_is_not_dairy() {
        assert!(!is_dairy_milk_text("unsweetened almond milk"));
        assert!(!is_dairy_milk_text("oat milk"));
        assert!(!is_dairy_milk_text("buttermilk"));
        assert!(is_dairy_milk_text("raw goat milk"));
        assert!(is_dairy_milk_text("fresh goat milk, pasteurized"));
    }

    #[test]
    fn test_goat_milk_and_rennet_is_cheese() {
        let recipe = Recipe {
            ingredients: Some(vec![
                Ingredient::new("1", "gallon", "goat milk"),
                Ingredient::new("1/4", "tsp", "liquid rennet"),
            ]),
            ..titled("Weekend Project")
        };
        let outcome = classify_recipe(&recipe);
        assert!(outcome.is_cheese);
        assert_eq!(outcome.rule, "ingredient_evidence");
    }

    #[test]
    fn test_exclusion_phrase_without_cheese_keyword_falls_through() {
        let recipe = Recipe {
            ingredients: Some(vec![
                Ingredient::new("1", "gallon", "whole milk"),
                Ingredient::new("1/4", "tsp", "liquid rennet"),
            ]),
            ..titled("Peppers Stuffed with Fresh Curds")
        };
        let outcome = classify_recipe(&recipe);
        assert!(outcome.is_cheese);
        assert_eq!(outcome.rule, "ingredient_evidence");
    }

    #[test]
    fn test_first_milk_mention_wins() {
        let recipe = Recipe {
            ingredients: Some(vec![
                Ingredient::new("2", "quarts", "lait de brebis"),
                Ingredient::new("2", "quarts", "goat milk"),
            ]),
            ..titled("Tomme")
        };
        assert_eq!(detect_original_milk_type(&recipe), MilkTypeId::from("sheep"));
    }

    #[test]
    fn test_declared_original_overrides_detection() {
        let recipe = Recipe {
            ingredients: Some(vec![Ingredient::new("1", "gallon", "goat milk")]),
            milk_substitutions: Some(MilkSubstitutions {
                original_milk: Some(MilkTypeId::from("buffalo")),
                ..MilkSubstitutions::default()
            }),
            ..titled("Mozzarella di Bufala")
        };
        assert_eq!(
            resolve_original_milk_type(&recipe),
            MilkTypeId::from("buffalo")
        );
    }
}
