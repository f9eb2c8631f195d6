// ABOUTME: Meal planner CLI - command-line front end for the meal composition engine
// ABOUTME: Builds structures, suggests slot candidates and swaps, and totals day plans as JSON
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Split 2000 kcal over the three-meal template
//! meal-planner structure --template three_meals --calories 2000
//!
//! # List built-in templates
//! meal-planner templates
//!
//! # Recipes for a 700 kcal dinner, vegetarian only
//! meal-planner candidates --catalog catalog.json --slot dinner --calories 700 --filter vegetarian
//!
//! # Candidates for every slot of a day
//! meal-planner day --catalog catalog.json --template five_meals --calories 1800
//!
//! # Substitutes for 150 g of rice
//! meal-planner swaps --catalog catalog.json --item rice-white --amount 150
//!
//! # Totals for a plan file
//! meal-planner totals --catalog catalog.json --plan plan.json
//! ```

mod commands;

use clap::{Parser, Subcommand};
use pierre_meals::{
    config::EngineConfig,
    errors::{AppError, AppResult},
    logging::LoggingConfig,
    models::DietaryFilter,
};
use std::path::PathBuf;
use tracing::debug;

type Result<T> = AppResult<T>;

#[derive(Parser)]
#[command(
    name = "meal-planner",
    about = "Pierre meal composition engine CLI",
    long_about = "Build meal structures, find portion-scaled recipes, rank swaps and total daily plans. Output is JSON on stdout."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging on stderr
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// List built-in meal templates
    Templates,

    /// Build a meal structure from a template
    Structure {
        /// Template id (three_meals, five_meals, fasting_three_meals, ...)
        #[arg(long)]
        template: String,

        /// Daily calorie budget
        #[arg(long)]
        calories: f64,
    },

    /// Find recipes that scale onto a slot's calorie target
    Candidates {
        /// Catalog JSON file
        #[arg(long)]
        catalog: PathBuf,

        /// Slot name or category (breakfast, dinner, late_snack, ...)
        #[arg(long)]
        slot: String,

        /// Calorie target for the slot
        #[arg(long)]
        calories: f64,

        /// Dietary filter, repeatable (vegetarian, vegan, gluten_free, dairy_free)
        #[arg(long = "filter")]
        filters: Vec<DietaryFilter>,

        /// Maximum number of candidates
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Suggest candidates for every slot of a template
    Day {
        /// Catalog JSON file
        #[arg(long)]
        catalog: PathBuf,

        /// Template id
        #[arg(long)]
        template: String,

        /// Daily calorie budget
        #[arg(long)]
        calories: f64,

        /// Dietary filter, repeatable
        #[arg(long = "filter")]
        filters: Vec<DietaryFilter>,

        /// Maximum number of candidates per slot
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Rank same-group substitutes for an item
    Swaps {
        /// Catalog JSON file
        #[arg(long)]
        catalog: PathBuf,

        /// Id of the item to replace
        #[arg(long)]
        item: String,

        /// Calories the substitute should match
        #[arg(long, conflicts_with = "amount")]
        calories: Option<f64>,

        /// Amount of the original item, in its own unit
        #[arg(long)]
        amount: Option<f64>,

        /// Maximum number of swaps
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Total a day plan's nutrition
    Totals {
        /// Catalog JSON file
        #[arg(long)]
        catalog: PathBuf,

        /// Plan JSON file mapping slot names to item entries
        #[arg(long)]
        plan: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut logging = LoggingConfig::from_env();
    if cli.verbose {
        "debug".clone_into(&mut logging.level);
    }
    logging
        .init()
        .map_err(|e| AppError::internal(format!("Failed to initialize logging: {e}")))?;

    let config = EngineConfig::load()?;
    debug!(?config, "Engine configuration loaded");

    match cli.command {
        Command::Templates => commands::structure::templates()?,
        Command::Structure { template, calories } => {
            commands::structure::build(&config, &template, calories)?;
        }
        Command::Candidates {
            catalog,
            slot,
            calories,
            filters,
            limit,
        } => {
            commands::matching::candidates(&config, &catalog, slot, calories, filters, limit)
                .await?;
        }
        Command::Day {
            catalog,
            template,
            calories,
            filters,
            limit,
        } => {
            commands::matching::day(&config, &catalog, &template, calories, &filters, limit)
                .await?;
        }
        Command::Swaps {
            catalog,
            item,
            calories,
            amount,
            limit,
        } => {
            commands::matching::swaps(&config, &catalog, &item, calories, amount, limit).await?;
        }
        Command::Totals { catalog, plan } => {
            commands::totals::totals(&catalog, &plan).await?;
        }
    }

    Ok(())
}
