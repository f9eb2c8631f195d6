// ABOUTME: Domain service layer orchestrating the meal engine over its collaborators
// ABOUTME: Reusable by the CLI and any embedding application
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Domain service layer
//!
//! Services combine the pure engine with catalog, settings and plan storage
//! so entry points share one set of business rules.

/// Meal structure, suggestion, swap and daily plan operations
pub mod meal_planning;

pub use meal_planning::{DaySuggestions, MealPlanningService, SlotSuggestions};
