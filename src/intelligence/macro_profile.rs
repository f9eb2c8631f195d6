// ABOUTME: Converts absolute nutrition values into percentage-of-calories macro profiles
// ABOUTME: Uses 4/4/9 kcal per gram against the stated calorie total
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use pierre_meals_core::constants::energy::{
    KCAL_PER_GRAM_CARBS, KCAL_PER_GRAM_FAT, KCAL_PER_GRAM_PROTEIN,
};
use pierre_meals_core::models::{MacroProfile, NutritionValues};

/// Share of `calories` contributed by `grams` of a macro, as a whole percentage
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn percent_of_calories(grams: f64, kcal_per_gram: f64, calories: f64) -> u8 {
    let pct = (grams * kcal_per_gram / calories * 100.0).round();
    // Clamped to 0..=100 before the cast
    pct.clamp(0.0, 100.0) as u8
}

/// Convert nutrition values into a macro profile
///
/// Each percentage is rounded independently, so the three values may not sum
/// to exactly 100. Values are clamped to `[0, 100]` when catalog data states
/// fewer calories than the macros imply. When `calories <= 0` the profile is
/// all zeros.
#[must_use]
pub fn to_macro_profile(values: &NutritionValues) -> MacroProfile {
    let calories = values.calories();
    if calories <= 0.0 || !calories.is_finite() {
        return MacroProfile::zero();
    }

    MacroProfile {
        protein_pct: percent_of_calories(values.protein_g(), KCAL_PER_GRAM_PROTEIN, calories),
        carbs_pct: percent_of_calories(values.carbs_g(), KCAL_PER_GRAM_CARBS, calories),
        fat_pct: percent_of_calories(values.fat_g(), KCAL_PER_GRAM_FAT, calories),
    }
}
