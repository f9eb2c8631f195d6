// ABOUTME: Energy conversion factors and documented default tuning values
// ABOUTME: Single source for kcal-per-gram factors and engine defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Engine constants organized by domain.

/// Atwater energy factors (kcal per gram)
pub mod energy {
    /// Protein: 4 kcal/g
    pub const KCAL_PER_GRAM_PROTEIN: f64 = 4.0;
    /// Carbohydrates: 4 kcal/g
    pub const KCAL_PER_GRAM_CARBS: f64 = 4.0;
    /// Fat: 9 kcal/g
    pub const KCAL_PER_GRAM_FAT: f64 = 9.0;
}

/// Default values used when the settings store has nothing configured
pub mod defaults {
    /// Smallest portion multiplier a candidate may need
    pub const MIN_SCALE_FACTOR: f64 = 0.5;
    /// Largest portion multiplier a candidate may need
    pub const MAX_SCALE_FACTOR: f64 = 2.0;

    /// Protein weight in the macro similarity score
    pub const PROTEIN_WEIGHT: f64 = 0.5;
    /// Carbohydrate weight in the macro similarity score
    pub const CARBS_WEIGHT: f64 = 0.3;
    /// Fat weight in the macro similarity score
    pub const FAT_WEIGHT: f64 = 0.2;
    /// Score points lost per percentage point of macro difference
    pub const SIMILARITY_DECAY_PER_POINT: f64 = 1.5;

    /// Allowed deviation of a structure's percentage sum from 100
    pub const PERCENTAGE_SUM_TOLERANCE: f64 = 0.5;
    /// Percentage sums at or below this are treated as fractions of 1
    pub const LEGACY_FRACTION_THRESHOLD: f64 = 1.5;

    /// Candidates returned per slot when the caller gives no limit
    pub const CANDIDATE_LIMIT: usize = 10;
    /// Swap options returned when the caller gives no limit
    pub const SWAP_LIMIT: usize = 20;
    /// Optimistic-concurrency retries for a plan write
    pub const PLAN_WRITE_RETRIES: u32 = 3;
}

/// Swap quality tier thresholds (inclusive lower bounds)
pub mod swap_quality {
    /// Scores at or above this are excellent
    pub const EXCELLENT: u8 = 80;
    /// Scores at or above this are good
    pub const GOOD: u8 = 60;
    /// Scores at or above this are acceptable
    pub const ACCEPTABLE: u8 = 40;
}

/// Service names used in structured logs
pub mod service_names {
    /// Meal planning engine
    pub const PIERRE_MEALS: &str = "pierre-meals";
}
