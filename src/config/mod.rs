// ABOUTME: Configuration module for the meal composition engine
// ABOUTME: Engine tuning knobs, logging settings and configuration errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration module for the meal composition engine
//!
//! - **Engine**: scaling limits, similarity weights, structure tolerance
//! - **Error**: configuration validation errors

/// Engine tuning configuration with documented defaults
pub mod engine;
/// Configuration error types
pub mod error;

pub use engine::{
    EngineConfig, MatchingConfig, PlanningConfig, ScalingLimits, SimilarityConfig,
    SimilarityWeights, StructureConfig,
};
pub use error::ConfigError;
