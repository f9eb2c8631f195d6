// ABOUTME: Main library entry point for the Pierre meal composition engine
// ABOUTME: Meal structures, portion-scaled matching, macro similarity swaps and daily totals
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

// Crate-level attributes:
// - deny(unsafe_code): Zero-tolerance unsafe policy
#![deny(unsafe_code)]

//! # Pierre Meals
//!
//! Nutritional matching and meal composition for diet tracking.
//!
//! Given a daily calorie budget, a set of named meal slots with percentage
//! allocations and a catalog of recipes and ingredients, the engine:
//!
//! - builds and validates meal structures and their per-slot calorie targets
//! - finds recipes that scale exactly onto a slot target within bounds
//! - scores macro similarity to rank ingredient and recipe substitutes
//! - aggregates a day's chosen items into cached totals
//!
//! ## Architecture
//!
//! - **Intelligence**: the pure engine algorithms
//! - **Catalog / Settings / Database**: contracts for the external
//!   collaborators, with in-memory implementations
//! - **Services**: orchestration of the engine over the collaborators
//! - **Config**: tuning knobs with documented defaults
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use pierre_meals::errors::AppResult;
//! use pierre_meals::intelligence::build_from_template;
//!
//! fn main() -> AppResult<()> {
//!     let structure = build_from_template("three_meals", 2000.0)?;
//!     for slot in &structure.slots {
//!         println!("{}: {} kcal", slot.label, slot.target_calories);
//!     }
//!     Ok(())
//! }
//! ```

/// Catalog lookup contract and in-memory catalog
pub mod catalog;

/// Engine configuration
pub mod config;

/// Daily plan storage contract and in-memory repository
pub mod database;

/// Unified error handling
pub mod errors;

/// Nutritional matching and meal composition algorithms
pub mod intelligence;

/// Structured logging setup
pub mod logging;

/// Meal planning orchestration
pub mod services;

/// Settings lookup contract and default resolution
pub mod settings;

/// Foundation models re-exported from `pierre-meals-core`
pub mod models {
    pub use pierre_meals_core::models::*;
}

/// Shared constants re-exported from `pierre-meals-core`
pub mod constants {
    pub use pierre_meals_core::constants::*;
}
