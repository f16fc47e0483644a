// ABOUTME: milk-blend CLI - command-line adapter over the substitution session
// ABOUTME: Classifies recipes, adjusts ingredients for a blend, reports impact, converts units
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Milk Blend Contributors
//!
//! Usage:
//! ```bash
//! # Is this a cheese recipe, and which milk was it written for?
//! milk-blend classify recipes/chevre.json
//!
//! # Adjust for a 50/50 cow and goat blend, doubled
//! milk-blend adjust recipes/chevre.json --milk cow=50 --milk goat=50 --batch 2
//!
//! # Adjust for the milk actually on hand
//! milk-blend adjust recipes/tomme.json --volume cow=1:gallon --volume sheep=2:quart
//!
//! # How different will the cheese be?
//! milk-blend impact recipes/tomme.json --milk sheep=60 --milk cow=40
//!
//! # Unit conversion
//! milk-blend units 2 quarts cups
//! ```

mod commands;
mod helpers;

use anyhow::Result;
use clap::{Parser, Subcommand};
use milk_blend::config::EngineConfig;
use milk_blend::logging::LoggingConfig;
use std::path::PathBuf;
use tracing::debug;

#[derive(Parser)]
#[command(
    name = "milk-blend",
    about = "Milk substitution calculator for cheesemaking recipes",
    long_about = "Detects cheesemaking recipes and recalculates milk, rennet, calcium chloride, and batch quantities for cow, goat, and sheep milk blends."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Reference dataset (JSON); defaults to MILK_BLEND_REFERENCE_PATH or the bundled data
    #[arg(long, global = true)]
    reference: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Classify a recipe and detect its original milk
    Classify {
        /// Recipe JSON file
        recipe: PathBuf,
    },

    /// Print the adjusted ingredient list and blend snapshot
    Adjust {
        /// Recipe JSON file
        recipe: PathBuf,

        /// Blend share as TYPE=PERCENT (repeatable)
        #[arg(long = "milk", value_name = "TYPE=PERCENT", conflicts_with = "volumes")]
        milks: Vec<String>,

        /// On-hand volume as TYPE=AMOUNT[:UNIT] (repeatable, unit defaults to cup)
        #[arg(long = "volume", value_name = "TYPE=AMOUNT[:UNIT]")]
        volumes: Vec<String>,

        /// Batch multiplier
        #[arg(long, default_value_t = 1.0)]
        batch: f64,
    },

    /// Describe how the blend changes the cheese
    Impact {
        /// Recipe JSON file
        recipe: PathBuf,

        /// Blend share as TYPE=PERCENT (repeatable)
        #[arg(long = "milk", value_name = "TYPE=PERCENT")]
        milks: Vec<String>,
    },

    /// Convert a volume between units
    Units {
        /// Amount to convert
        value: f64,
        /// Source unit
        from: String,
        /// Target unit
        to: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let logging = LoggingConfig::from_env();
    let logging = if cli.verbose { logging.verbose() } else { logging };
    logging.init()?;

    let mut config = EngineConfig::from_env()?;
    let explicit_reference = cli.reference.is_some();
    if let Some(path) = cli.reference {
        config.reference_path = path;
    }
    debug!(reference = %config.reference_path.display(), "configuration loaded");

    match cli.command {
        Command::Classify { recipe } => {
            commands::recipe::classify(&config, explicit_reference, &recipe).await?;
        }
        Command::Adjust {
            recipe,
            milks,
            volumes,
            batch,
        } => {
            commands::recipe::adjust(&config, explicit_reference, &recipe, &milks, &volumes, batch)
                .await?;
        }
        Command::Impact { recipe, milks } => {
            commands::recipe::impact(&config, explicit_reference, &recipe, &milks).await?;
        }
        Command::Units { value, from, to } => {
            commands::units::convert(value, &from, &to)?;
        }
    }

    Ok(())
}
