// ABOUTME: Nutritional matching and meal composition algorithms
// ABOUTME: Macro profiles, similarity scoring, meal structures, portion matching, swaps and totals
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Intelligence Module
//!
//! The meal composition engine. Every operation here is a pure function of
//! its inputs plus, where noted, read-only catalog lookups.
//!
//! - [`macro_profile`]: absolute nutrition to percent-of-calories profile
//! - [`similarity`]: weighted macro similarity score and quality tiers
//! - [`meal_structure`]: templates, validation and calorie allocation
//! - [`slot_categories`]: slot to catalog tag aliasing
//! - [`portion_matcher`]: recipes scalable onto a calorie target
//! - [`swap_resolver`]: same-group substitutes with equivalent amounts
//! - [`daily_totals`]: day totals from slot assignments

/// Daily totals aggregation
pub mod daily_totals;
/// Nutrition to macro profile conversion
pub mod macro_profile;
/// Meal structure templates and validation
pub mod meal_structure;
/// Portion scaling matcher
pub mod portion_matcher;
/// Macro similarity scoring
pub mod similarity;
/// Slot category alias table
pub mod slot_categories;
/// Swap resolver
pub mod swap_resolver;

pub use daily_totals::{aggregate, aggregate_with, unresolved_items};
pub use macro_profile::to_macro_profile;
pub use meal_structure::{
    build_from_template, canonical_slot_name, fasting_slot_bounds, find_template,
    normalize_legacy, prepare, recalculate_targets, templates, validate, MealSlot,
    MealStructure, MealTemplate, SlotBounds, StructureMode, StructureValidation,
    StructureViolation,
};
pub use portion_matcher::{CandidateQuery, PortionMatcher, ScaledCandidate};
pub use similarity::{quality_tier, similarity, SwapQuality};
pub use slot_categories::SlotCategoryTable;
pub use swap_resolver::{resolve_target_calories, SwapOption, SwapResolver, SwapTarget};
