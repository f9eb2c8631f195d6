// ABOUTME: Benchmark fixtures generating synthetic recipe and ingredient catalogs
// ABOUTME: Provides deterministic data generation for reproducible performance measurements
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Benchmark fixtures generating synthetic catalogs.
//!
//! Items are derived from their index only, so every run sees the same data.

use pierre_meals::models::{
    CandidateItem, DietaryFilter, NutritionValues, PlanEntry, PlanSlots, ServingUnit,
};

/// Predefined catalog sizes for benchmark scenarios
#[derive(Debug, Clone, Copy)]
pub enum CatalogSize {
    /// Small catalog (100 items) - a personal recipe box
    Small,
    /// Medium catalog (1,000 items) - a typical shared catalog
    Medium,
    /// Large catalog (10,000 items) - stress testing
    Large,
}

impl CatalogSize {
    #[must_use]
    pub const fn count(self) -> usize {
        match self {
            Self::Small => 100,
            Self::Medium => 1_000,
            Self::Large => 10_000,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }
}

const CATEGORIES: [&str; 4] = ["breakfast", "lunch", "snack", "dessert"];
const FOOD_GROUPS: [&str; 3] = ["grains", "dairy", "protein"];
const SUBGROUPS: [&str; 4] = ["whole", "refined", "fermented", "fresh"];

fn nutrition(index: usize) -> NutritionValues {
    #[allow(clippy::cast_precision_loss)]
    let spread = (index * 37 % 500) as f64;
    let protein_g = 5.0 + spread % 40.0;
    let carbs_g = 10.0 + (spread * 1.7) % 80.0;
    let fat_g = 2.0 + (spread * 0.9) % 30.0;
    NutritionValues::from_macros(protein_g, carbs_g, fat_g).unwrap_or_default()
}

/// Generate a recipe for benchmarking
fn generate_recipe(index: usize) -> CandidateItem {
    let mut recipe = CandidateItem::recipe(
        format!("recipe_{index}"),
        format!("Benchmark Recipe {index}"),
        nutrition(index),
    )
    .with_category(CATEGORIES[index % CATEGORIES.len()]);
    if index % 3 == 0 {
        recipe = recipe.with_dietary_tag(DietaryFilter::Vegetarian);
    }
    if index % 5 == 0 {
        recipe = recipe.with_dietary_tag(DietaryFilter::GlutenFree);
    }
    recipe
}

/// Generate an ingredient for benchmarking
fn generate_ingredient(index: usize) -> CandidateItem {
    CandidateItem::ingredient(
        format!("ingredient_{index}"),
        format!("Benchmark Ingredient {index}"),
        nutrition(index),
        100.0,
        ServingUnit::Grams,
    )
    .with_food_group(FOOD_GROUPS[index % FOOD_GROUPS.len()])
    .with_subgroup(SUBGROUPS[index % SUBGROUPS.len()])
}

/// Generate a catalog with equal numbers of recipes and ingredients
#[must_use]
pub fn generate_catalog(size: CatalogSize) -> Vec<CandidateItem> {
    let half = size.count() / 2;
    (0..half)
        .map(generate_recipe)
        .chain((0..half).map(generate_ingredient))
        .collect()
}

/// Generate a plan referencing `entries` catalog items across five slots
#[must_use]
pub fn generate_plan(entries: usize) -> PlanSlots {
    const SLOTS: [&str; 5] = [
        "breakfast",
        "morning_snack",
        "lunch",
        "afternoon_snack",
        "dinner",
    ];
    let mut slots = PlanSlots::new();
    for index in 0..entries {
        #[allow(clippy::cast_precision_loss)]
        let servings = 0.5 + (index % 4) as f64 * 0.5;
        if let Ok(entry) = PlanEntry::new(format!("recipe_{index}"), servings) {
            slots
                .entry(SLOTS[index % SLOTS.len()].to_owned())
                .or_default()
                .push(entry);
        }
    }
    slots
}
