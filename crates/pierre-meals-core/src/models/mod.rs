// ABOUTME: Core data models for the meal composition engine
// ABOUTME: Re-exports nutrition values, catalog items and daily plan types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! - `NutritionValues` / `MacroProfile`: absolute and relative nutrition
//! - `CandidateItem`: a recipe or ingredient as exposed by the catalog
//! - `DailyPlan`: a user's slot assignments for one date and variant

mod catalog;
mod nutrition;
mod plan;

pub use catalog::{CandidateItem, DietaryFilter, GroupKey, ItemKind, ServingUnit};
pub use nutrition::{round_one_decimal, MacroProfile, NutritionValues};
pub use plan::{DailyPlan, PlanEntry, PlanKey, PlanSlots, PlanVariant};
