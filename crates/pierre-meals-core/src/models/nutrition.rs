// ABOUTME: Nutrition value types shared by the catalog, matcher and aggregator
// ABOUTME: NutritionValues (absolute kcal and grams) and MacroProfile (percent of kcal)
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::energy::{KCAL_PER_GRAM_CARBS, KCAL_PER_GRAM_FAT, KCAL_PER_GRAM_PROTEIN};
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::iter::Sum;
use std::ops::Add;

/// Absolute nutrition for a serving, a unit, or a whole day
///
/// All fields are finite and non-negative. The stated `calories` value is
/// authoritative: macro-derived energy (4/4/9 kcal per gram) is only used
/// when no calorie value is known, never to override a stated one.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "RawNutritionValues")]
pub struct NutritionValues {
    calories: f64,
    protein_g: f64,
    carbs_g: f64,
    fat_g: f64,
}

/// Unvalidated wire form of [`NutritionValues`]
#[derive(Debug, Deserialize)]
struct RawNutritionValues {
    calories: Option<f64>,
    #[serde(default)]
    protein_g: f64,
    #[serde(default)]
    carbs_g: f64,
    #[serde(default)]
    fat_g: f64,
}

impl TryFrom<RawNutritionValues> for NutritionValues {
    type Error = AppError;

    fn try_from(raw: RawNutritionValues) -> Result<Self, Self::Error> {
        match raw.calories {
            Some(calories) => Self::new(calories, raw.protein_g, raw.carbs_g, raw.fat_g),
            None => Self::from_macros(raw.protein_g, raw.carbs_g, raw.fat_g),
        }
    }
}

fn check_non_negative(field: &str, value: f64) -> AppResult<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(AppError::invalid_input(format!(
            "{field} must be a finite, non-negative number, got {value}"
        )))
    }
}

impl NutritionValues {
    /// Create validated nutrition values
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if any value is negative or not finite
    pub fn new(calories: f64, protein_g: f64, carbs_g: f64, fat_g: f64) -> AppResult<Self> {
        Ok(Self {
            calories: check_non_negative("calories", calories)?,
            protein_g: check_non_negative("protein_g", protein_g)?,
            carbs_g: check_non_negative("carbs_g", carbs_g)?,
            fat_g: check_non_negative("fat_g", fat_g)?,
        })
    }

    /// Create nutrition values whose calories are derived from macro grams
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if any gram value is negative or not finite
    pub fn from_macros(protein_g: f64, carbs_g: f64, fat_g: f64) -> AppResult<Self> {
        let protein_g = check_non_negative("protein_g", protein_g)?;
        let carbs_g = check_non_negative("carbs_g", carbs_g)?;
        let fat_g = check_non_negative("fat_g", fat_g)?;
        let calories = fat_g.mul_add(
            KCAL_PER_GRAM_FAT,
            protein_g.mul_add(KCAL_PER_GRAM_PROTEIN, carbs_g * KCAL_PER_GRAM_CARBS),
        );
        Ok(Self {
            calories,
            protein_g,
            carbs_g,
            fat_g,
        })
    }

    /// All-zero values
    #[must_use]
    pub const fn zero() -> Self {
        Self {
            calories: 0.0,
            protein_g: 0.0,
            carbs_g: 0.0,
            fat_g: 0.0,
        }
    }

    /// Energy in kcal
    #[must_use]
    pub const fn calories(&self) -> f64 {
        self.calories
    }

    /// Protein in grams
    #[must_use]
    pub const fn protein_g(&self) -> f64 {
        self.protein_g
    }

    /// Carbohydrates in grams
    #[must_use]
    pub const fn carbs_g(&self) -> f64 {
        self.carbs_g
    }

    /// Fat in grams
    #[must_use]
    pub const fn fat_g(&self) -> f64 {
        self.fat_g
    }

    /// Multiply every field by `factor`
    ///
    /// Negative or non-finite factors yield zero values so the non-negative
    /// invariant holds.
    #[must_use]
    pub fn scaled(&self, factor: f64) -> Self {
        if !factor.is_finite() || factor <= 0.0 {
            return Self::zero();
        }
        Self {
            calories: self.calories * factor,
            protein_g: self.protein_g * factor,
            carbs_g: self.carbs_g * factor,
            fat_g: self.fat_g * factor,
        }
    }

    /// Round for display: whole kcal, grams to one decimal place
    #[must_use]
    pub fn rounded_for_display(&self) -> Self {
        Self {
            calories: self.calories.round(),
            protein_g: round_one_decimal(self.protein_g),
            carbs_g: round_one_decimal(self.carbs_g),
            fat_g: round_one_decimal(self.fat_g),
        }
    }
}

/// Round to one decimal place
#[must_use]
pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

impl Add for NutritionValues {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            calories: self.calories + other.calories,
            protein_g: self.protein_g + other.protein_g,
            carbs_g: self.carbs_g + other.carbs_g,
            fat_g: self.fat_g + other.fat_g,
        }
    }
}

impl Sum for NutritionValues {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), |acc, n| acc + n)
    }
}

/// Macro distribution as whole percentages of total calories
///
/// Percentages are rounded independently and need not sum to exactly 100.
/// Never persisted; always recomputed from [`NutritionValues`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct MacroProfile {
    /// Protein share of calories (0-100)
    pub protein_pct: u8,
    /// Carbohydrate share of calories (0-100)
    pub carbs_pct: u8,
    /// Fat share of calories (0-100)
    pub fat_pct: u8,
}

impl MacroProfile {
    /// Create a profile, clamping each percentage to 100
    #[must_use]
    pub fn new(protein_pct: u8, carbs_pct: u8, fat_pct: u8) -> Self {
        Self {
            protein_pct: protein_pct.min(100),
            carbs_pct: carbs_pct.min(100),
            fat_pct: fat_pct.min(100),
        }
    }

    /// The all-zero profile used when calories are not positive
    #[must_use]
    pub const fn zero() -> Self {
        Self {
            protein_pct: 0,
            carbs_pct: 0,
            fat_pct: 0,
        }
    }
}
