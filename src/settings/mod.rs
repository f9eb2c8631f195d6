// ABOUTME: Settings lookup contract for scaling limits and similarity weights
// ABOUTME: Resolves absent values to documented defaults and surfaces lookup failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Settings Lookup
//!
//! Scaling limits and similarity weights are owned by an external settings
//! store. Both are optional tuning knobs: when the store has no value the
//! engine uses the configured defaults instead of failing.

use crate::config::{EngineConfig, ScalingLimits, SimilarityWeights};
use crate::errors::AppResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Read-only access to admin-managed tuning values
#[async_trait]
pub trait SettingsProvider: Send + Sync {
    /// Stored scaling limits, `None` when unset
    ///
    /// # Errors
    ///
    /// Returns an error if the settings store cannot be read
    async fn scaling_limits(&self) -> AppResult<Option<ScalingLimits>>;

    /// Stored similarity weights, `None` when unset
    ///
    /// # Errors
    ///
    /// Returns an error if the settings store cannot be read
    async fn similarity_weights(&self) -> AppResult<Option<SimilarityWeights>>;
}

/// Settings provider returning fixed values
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticSettings {
    scaling_limits: Option<ScalingLimits>,
    similarity_weights: Option<SimilarityWeights>,
}

impl StaticSettings {
    /// Settings with nothing stored
    #[must_use]
    pub const fn unset() -> Self {
        Self {
            scaling_limits: None,
            similarity_weights: None,
        }
    }

    /// Store scaling limits
    #[must_use]
    pub const fn with_scaling_limits(mut self, limits: ScalingLimits) -> Self {
        self.scaling_limits = Some(limits);
        self
    }

    /// Store similarity weights
    #[must_use]
    pub const fn with_similarity_weights(mut self, weights: SimilarityWeights) -> Self {
        self.similarity_weights = Some(weights);
        self
    }
}

#[async_trait]
impl SettingsProvider for StaticSettings {
    async fn scaling_limits(&self) -> AppResult<Option<ScalingLimits>> {
        Ok(self.scaling_limits)
    }

    async fn similarity_weights(&self) -> AppResult<Option<SimilarityWeights>> {
        Ok(self.similarity_weights)
    }
}

/// Tuning values in effect for one request
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngineSettings {
    /// Portion scaling bounds
    pub scaling_limits: ScalingLimits,
    /// Macro similarity weights
    pub similarity_weights: SimilarityWeights,
}

/// Read settings, substituting configured defaults for absent values
///
/// Stored values that are unusable (inverted limits, negative weights) are
/// also replaced by the defaults.
///
/// # Errors
///
/// Propagates settings store failures
pub async fn resolve_engine_settings(
    provider: &dyn SettingsProvider,
    config: &EngineConfig,
) -> AppResult<EngineSettings> {
    let scaling_limits = match provider.scaling_limits().await? {
        Some(limits) if limits.is_valid() => limits,
        Some(limits) => {
            warn!(?limits, "Stored scaling limits are invalid, using defaults");
            config.scaling
        }
        None => {
            debug!("No stored scaling limits, using defaults");
            config.scaling
        }
    };

    let similarity_weights = match provider.similarity_weights().await? {
        Some(weights) if weights.is_usable() => weights,
        Some(weights) => {
            warn!(?weights, "Stored similarity weights are unusable, using defaults");
            config.similarity.weights
        }
        None => {
            debug!("No stored similarity weights, using defaults");
            config.similarity.weights
        }
    };

    Ok(EngineSettings {
        scaling_limits,
        similarity_weights,
    })
}
