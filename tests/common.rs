// ABOUTME: Shared test utilities and fixtures for integration tests
// ABOUTME: Provides the bundled reference data, recipe builders, sessions, and a recording observer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Milk Blend Contributors
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used
)]
//! Shared test utilities for `milk_blend`

use milk_blend::config::EngineConfig;
use milk_blend::reference::bundled_reference_data;
use milk_blend::session::{BlendObserver, BlendSnapshot, SubstitutionSession};
use milk_blend_core::models::{Ingredient, Instruction, MilkTypeId, Recipe, ReferenceData};
use std::sync::{Arc, Mutex, Once};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Milk type id shorthand
pub fn milk(id: &str) -> MilkTypeId {
    MilkTypeId::from(id)
}

/// Bundled reference dataset
pub fn reference() -> Arc<ReferenceData> {
    Arc::new(bundled_reference_data().expect("bundled reference data is valid"))
}

/// Recipe with a title and `(quantity, unit, item)` ingredient lines
pub fn recipe(title: &str, lines: &[(&str, &str, &str)]) -> Recipe {
    Recipe {
        id: title.to_lowercase().replace(' ', "-"),
        title: title.to_owned(),
        ingredients: Some(
            lines
                .iter()
                .map(|(quantity, unit, item)| Ingredient::new(*quantity, *unit, *item))
                .collect(),
        ),
        ..Recipe::default()
    }
}

/// Recipe with a title and no ingredient data at all
pub fn titled(title: &str) -> Recipe {
    Recipe {
        title: title.to_owned(),
        ..Recipe::default()
    }
}

/// Cow milk recipe with rennet, calcium chloride, culture, and salt
pub fn tomme_recipe() -> Recipe {
    let mut tomme = recipe(
        "Farmhouse Tomme",
        &[
            ("2", "gallons", "pasteurized whole milk"),
            ("1/4", "tsp", "mesophilic culture"),
            ("1/2", "tsp", "liquid rennet"),
            ("1/2", "tsp", "calcium chloride"),
            ("1", "tbsp", "cheese salt"),
            ("", "", "salt to taste"),
        ],
    );
    tomme.instructions = vec![
        Instruction::Text("Warm the milk to 90F and add culture".to_owned()),
        Instruction::Step {
            text: "Cut the curd and press overnight".to_owned(),
        },
    ];
    tomme
}

/// Goat milk recipe measured in cups
pub fn chevre_recipe() -> Recipe {
    recipe(
        "Fresh Chevre",
        &[
            ("1/2", "cup", "goat milk"),
            ("1/8", "tsp", "mesophilic culture"),
            ("2", "drops", "rennet"),
        ],
    )
}

/// Session over the bundled dataset with default settings
pub fn session(recipe: Recipe) -> SubstitutionSession {
    init_test_logging();
    SubstitutionSession::new(recipe, Some(reference()), EngineConfig::default())
}

/// Observer that keeps every snapshot it receives
#[derive(Default)]
pub struct RecordingObserver {
    snapshots: Mutex<Vec<BlendSnapshot>>,
}

impl RecordingObserver {
    /// Number of snapshots received
    pub fn count(&self) -> usize {
        self.snapshots.lock().unwrap().len()
    }

    /// Most recent snapshot
    pub fn last(&self) -> Option<BlendSnapshot> {
        self.snapshots.lock().unwrap().last().cloned()
    }
}

impl BlendObserver for RecordingObserver {
    fn on_blend_changed(&self, snapshot: &BlendSnapshot) {
        self.snapshots.lock().unwrap().push(snapshot.clone());
    }
}

/// Assert two floats agree to within `1e-9`
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
