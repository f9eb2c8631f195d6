// ABOUTME: Engine configuration for portion scaling, macro similarity and structure validation
// ABOUTME: Documented defaults, environment overrides and validation for every tuning knob
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Meal Engine Configuration
//!
//! Every numeric constant that drives matching, scoring or validation lives
//! here with a documented default. The configuration is an immutable value
//! handed to each call; nothing in the engine reads it from global state.
//!
//! The similarity decay (1.5 points per percentage point) and the
//! protein-weighted defaults (0.5 / 0.3 / 0.2) are product tuning choices and
//! can be overridden per deployment.

use super::error::ConfigError;
use pierre_meals_core::constants::defaults;
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use tracing::warn;

/// Bounds on the portion multiplier a candidate may need to hit a target
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScalingLimits {
    /// Smallest accepted multiplier (default 0.5)
    pub min_scale_factor: f64,
    /// Largest accepted multiplier (default 2.0)
    pub max_scale_factor: f64,
}

impl Default for ScalingLimits {
    fn default() -> Self {
        Self {
            min_scale_factor: defaults::MIN_SCALE_FACTOR,
            max_scale_factor: defaults::MAX_SCALE_FACTOR,
        }
    }
}

impl ScalingLimits {
    /// Create limits without validation
    #[must_use]
    pub const fn new(min_scale_factor: f64, max_scale_factor: f64) -> Self {
        Self {
            min_scale_factor,
            max_scale_factor,
        }
    }

    /// Whether the bounds are finite, positive and ordered
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.min_scale_factor.is_finite()
            && self.max_scale_factor.is_finite()
            && self.min_scale_factor > 0.0
            && self.min_scale_factor <= self.max_scale_factor
    }

    /// These limits if valid, otherwise the defaults
    #[must_use]
    pub fn sanitized(self) -> Self {
        if self.is_valid() {
            self
        } else {
            warn!(
                min = self.min_scale_factor,
                max = self.max_scale_factor,
                "Invalid scaling limits, falling back to defaults"
            );
            Self::default()
        }
    }

    /// Whether a scale factor lies within the closed interval
    #[must_use]
    pub fn contains(&self, scale_factor: f64) -> bool {
        (self.min_scale_factor..=self.max_scale_factor).contains(&scale_factor)
    }
}

/// Relative importance of each macro in the similarity score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimilarityWeights {
    /// Protein weight (default 0.5)
    pub protein: f64,
    /// Carbohydrate weight (default 0.3)
    pub carbs: f64,
    /// Fat weight (default 0.2)
    pub fat: f64,
}

impl Default for SimilarityWeights {
    fn default() -> Self {
        Self {
            protein: defaults::PROTEIN_WEIGHT,
            carbs: defaults::CARBS_WEIGHT,
            fat: defaults::FAT_WEIGHT,
        }
    }
}

impl SimilarityWeights {
    /// Create weights without validation
    #[must_use]
    pub const fn new(protein: f64, carbs: f64, fat: f64) -> Self {
        Self {
            protein,
            carbs,
            fat,
        }
    }

    /// Sum of all weights
    #[must_use]
    pub fn total(&self) -> f64 {
        self.protein + self.carbs + self.fat
    }

    /// Whether every weight is finite and non-negative with a positive sum
    #[must_use]
    pub fn is_usable(&self) -> bool {
        [self.protein, self.carbs, self.fat]
            .iter()
            .all(|w| w.is_finite() && *w >= 0.0)
            && self.total() > 0.0
    }
}

/// Macro similarity scoring configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimilarityConfig {
    /// Per-macro weights
    pub weights: SimilarityWeights,
    /// Points lost per percentage point of difference on one macro (default 1.5)
    pub decay_per_point: f64,
}

impl Default for SimilarityConfig {
    fn default() -> Self {
        Self {
            weights: SimilarityWeights::default(),
            decay_per_point: defaults::SIMILARITY_DECAY_PER_POINT,
        }
    }
}

/// Meal structure validation configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StructureConfig {
    /// Allowed deviation of the percentage sum from 100 (default 0.5)
    pub percentage_tolerance: f64,
    /// Sums at or below this are legacy fractions of 1 (default 1.5)
    pub legacy_fraction_threshold: f64,
}

impl Default for StructureConfig {
    fn default() -> Self {
        Self {
            percentage_tolerance: defaults::PERCENTAGE_SUM_TOLERANCE,
            legacy_fraction_threshold: defaults::LEGACY_FRACTION_THRESHOLD,
        }
    }
}

/// Result-size defaults for matching and swaps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchingConfig {
    /// Candidates per slot when the caller gives no limit (default 10)
    pub default_candidate_limit: usize,
    /// Swap options when the caller gives no limit (default 20)
    pub default_swap_limit: usize,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            default_candidate_limit: defaults::CANDIDATE_LIMIT,
            default_swap_limit: defaults::SWAP_LIMIT,
        }
    }
}

/// Daily plan persistence configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanningConfig {
    /// Attempts for a read-modify-write that hits a version conflict (default 3)
    pub plan_write_retries: u32,
}

impl Default for PlanningConfig {
    fn default() -> Self {
        Self {
            plan_write_retries: defaults::PLAN_WRITE_RETRIES,
        }
    }
}

/// Complete engine configuration
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Portion scaling bounds
    pub scaling: ScalingLimits,
    /// Macro similarity scoring
    pub similarity: SimilarityConfig,
    /// Meal structure validation
    pub structure: StructureConfig,
    /// Result-size defaults
    pub matching: MatchingConfig,
    /// Plan persistence
    pub planning: PlanningConfig,
}

impl EngineConfig {
    /// Load configuration from defaults plus environment overrides
    ///
    /// # Errors
    ///
    /// Returns an error if an override cannot be parsed or the resulting
    /// configuration fails validation
    pub fn load() -> Result<Self, ConfigError> {
        let config = Self::default().apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns the first inconsistency found
    pub fn validate(&self) -> Result<(), ConfigError> {
        let scaling = &self.scaling;
        if !scaling.min_scale_factor.is_finite() || scaling.min_scale_factor <= 0.0 {
            return Err(ConfigError::ValueOutOfRange(
                "min_scale_factor must be a positive number",
            ));
        }
        if !scaling.max_scale_factor.is_finite() {
            return Err(ConfigError::ValueOutOfRange(
                "max_scale_factor must be a finite number",
            ));
        }
        if scaling.min_scale_factor > 1.0 || scaling.max_scale_factor < 1.0 {
            return Err(ConfigError::InvalidRange(
                "scaling limits must satisfy min <= 1.0 <= max",
            ));
        }

        let weights = &self.similarity.weights;
        if !weights.is_usable() {
            return Err(ConfigError::InvalidWeights(
                "Similarity weights must be non-negative with a positive sum",
            ));
        }
        if (weights.total() - 1.0).abs() > 0.01 {
            return Err(ConfigError::InvalidWeights(
                "Similarity weights should sum to 1.0",
            ));
        }
        if !self.similarity.decay_per_point.is_finite() || self.similarity.decay_per_point <= 0.0
        {
            return Err(ConfigError::ValueOutOfRange(
                "Similarity decay must be a positive number",
            ));
        }

        let structure = &self.structure;
        if !(0.0..=10.0).contains(&structure.percentage_tolerance) {
            return Err(ConfigError::ValueOutOfRange(
                "Percentage tolerance must be between 0 and 10",
            ));
        }
        if !(0.0..=10.0).contains(&structure.legacy_fraction_threshold) {
            return Err(ConfigError::ValueOutOfRange(
                "Legacy fraction threshold must be between 0 and 10",
            ));
        }

        if self.matching.default_candidate_limit == 0 || self.matching.default_swap_limit == 0 {
            return Err(ConfigError::ValueOutOfRange(
                "Result limits must be at least 1",
            ));
        }
        if self.planning.plan_write_retries == 0 {
            return Err(ConfigError::ValueOutOfRange(
                "Plan write retries must be at least 1",
            ));
        }

        Ok(())
    }

    /// Helper function to parse and apply an environment variable override
    fn apply_env_var<T: FromStr>(env_var_name: &str, target: &mut T) -> Result<(), ConfigError> {
        if let Ok(val) = env::var(env_var_name) {
            *target = val
                .trim()
                .parse()
                .map_err(|_| ConfigError::Parse(format!("Invalid {env_var_name}: {val}")))?;
        }
        Ok(())
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(mut self) -> Result<Self, ConfigError> {
        // Scaling limits
        Self::apply_env_var("MEALS_MIN_SCALE_FACTOR", &mut self.scaling.min_scale_factor)?;
        Self::apply_env_var("MEALS_MAX_SCALE_FACTOR", &mut self.scaling.max_scale_factor)?;

        // Similarity scoring
        Self::apply_env_var(
            "MEALS_WEIGHT_PROTEIN",
            &mut self.similarity.weights.protein,
        )?;
        Self::apply_env_var("MEALS_WEIGHT_CARBS", &mut self.similarity.weights.carbs)?;
        Self::apply_env_var("MEALS_WEIGHT_FAT", &mut self.similarity.weights.fat)?;
        Self::apply_env_var(
            "MEALS_SIMILARITY_DECAY",
            &mut self.similarity.decay_per_point,
        )?;

        // Structure validation
        Self::apply_env_var(
            "MEALS_PERCENTAGE_TOLERANCE",
            &mut self.structure.percentage_tolerance,
        )?;

        // Result sizes and persistence
        Self::apply_env_var(
            "MEALS_CANDIDATE_LIMIT",
            &mut self.matching.default_candidate_limit,
        )?;
        Self::apply_env_var("MEALS_SWAP_LIMIT", &mut self.matching.default_swap_limit)?;
        Self::apply_env_var(
            "MEALS_PLAN_WRITE_RETRIES",
            &mut self.planning.plan_write_retries,
        )?;

        Ok(self)
    }
}
