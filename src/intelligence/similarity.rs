// ABOUTME: Macro similarity scoring between two macro profiles
// ABOUTME: Weighted linear-decay score in 0..=100 and the swap quality tiers built on it
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Macro Similarity Scorer
//!
//! Each macro contributes `max(0, 100 - diff * decay)` where `diff` is the
//! absolute percentage-point difference. The final score is the weighted
//! average of the three components, rounded to the nearest integer. The
//! score is symmetric and a profile always scores 100 against itself.

use crate::config::{SimilarityConfig, SimilarityWeights};
use pierre_meals_core::constants::{defaults, swap_quality};
use pierre_meals_core::models::MacroProfile;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

/// Quality tier for a similarity score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwapQuality {
    /// Below 40
    Poor,
    /// 40 to 59
    Acceptable,
    /// 60 to 79
    Good,
    /// 80 and above
    Excellent,
}

impl SwapQuality {
    /// Map a similarity score onto its tier
    #[must_use]
    pub const fn from_score(score: u8) -> Self {
        if score >= swap_quality::EXCELLENT {
            Self::Excellent
        } else if score >= swap_quality::GOOD {
            Self::Good
        } else if score >= swap_quality::ACCEPTABLE {
            Self::Acceptable
        } else {
            Self::Poor
        }
    }

    /// Tier name as used in serialized output
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::Acceptable => "acceptable",
            Self::Poor => "poor",
        }
    }
}

impl fmt::Display for SwapQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shorthand for [`SwapQuality::from_score`]
#[must_use]
pub const fn quality_tier(score: u8) -> SwapQuality {
    SwapQuality::from_score(score)
}

fn component_score(a: u8, b: u8, decay: f64) -> f64 {
    let diff = f64::from(a.abs_diff(b));
    diff.mul_add(-decay, 100.0).max(0.0)
}

/// Score the macro similarity of two profiles on a 0 to 100 scale
///
/// Unusable weights (negative, non-finite or summing to zero) and a
/// non-positive decay fall back to the documented defaults.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn similarity(a: &MacroProfile, b: &MacroProfile, config: &SimilarityConfig) -> u8 {
    let weights = if config.weights.is_usable() {
        config.weights
    } else {
        warn!(weights = ?config.weights, "Unusable similarity weights, using defaults");
        SimilarityWeights::default()
    };
    let decay = if config.decay_per_point.is_finite() && config.decay_per_point > 0.0 {
        config.decay_per_point
    } else {
        defaults::SIMILARITY_DECAY_PER_POINT
    };

    let weighted = component_score(a.protein_pct, b.protein_pct, decay) * weights.protein
        + component_score(a.carbs_pct, b.carbs_pct, decay) * weights.carbs
        + component_score(a.fat_pct, b.fat_pct, decay) * weights.fat;

    // Weighted mean of values in 0..=100 stays in range
    (weighted / weights.total()).round().clamp(0.0, 100.0) as u8
}
