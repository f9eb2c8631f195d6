// ABOUTME: Portion scaling matcher selecting recipes that scale exactly onto a calorie target
// ABOUTME: Filters by accepted slot tags and scaling limits, ranks by closeness to a 1x portion
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Portion Scaling Matcher
//!
//! For a slot target, every candidate with positive base calories gets
//! `scale_factor = target / base_calories`. Candidates needing a factor
//! outside the scaling limits are dropped; the rest are ordered by
//! `|scale_factor - 1|` so the most natural portions come first. Ties keep
//! catalog order.
//!
//! An empty result is a normal outcome meaning nothing fits.

use super::slot_categories::SlotCategoryTable;
use crate::catalog::CatalogProvider;
use crate::config::ScalingLimits;
use crate::errors::{AppError, AppResult};
use pierre_meals_core::constants::defaults;
use pierre_meals_core::models::{CandidateItem, DietaryFilter, NutritionValues};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// What to match for one slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateQuery {
    /// Slot name or category, resolved through the alias table
    pub slot_category: String,
    /// Calories the scaled portion must hit
    pub target_calories: f64,
    /// Hard dietary excludes
    #[serde(default)]
    pub filters: Vec<DietaryFilter>,
    /// Maximum number of results
    pub limit: usize,
}

impl CandidateQuery {
    /// Create a query with no filters and the default limit
    #[must_use]
    pub fn new(slot_category: impl Into<String>, target_calories: f64) -> Self {
        Self {
            slot_category: slot_category.into(),
            target_calories,
            filters: Vec::new(),
            limit: defaults::CANDIDATE_LIMIT,
        }
    }

    /// Set dietary filters
    #[must_use]
    pub fn with_filters(mut self, filters: Vec<DietaryFilter>) -> Self {
        self.filters = filters;
        self
    }

    /// Set the result limit
    #[must_use]
    pub const fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }
}

/// A candidate scaled onto a specific calorie target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaledCandidate {
    /// The catalog item
    pub item: CandidateItem,
    /// Multiplier applied to the base amount
    pub scale_factor: f64,
    /// Calories of the scaled portion, equal to the target
    pub scaled_calories: f64,
    /// Scaled amount in the item's unit
    pub scaled_amount: f64,
    /// Scaled nutrition rounded for display
    pub scaled_nutrition: NutritionValues,
}

impl ScaledCandidate {
    /// Distance of the portion from the catalog's own serving
    #[must_use]
    pub fn distance_from_unit(&self) -> f64 {
        (self.scale_factor - 1.0).abs()
    }
}

/// Selects and ranks portion-scalable candidates
#[derive(Debug, Clone, Default)]
pub struct PortionMatcher {
    limits: ScalingLimits,
    aliases: SlotCategoryTable,
}

impl PortionMatcher {
    /// Create a matcher; invalid limits fall back to the defaults
    #[must_use]
    pub fn new(limits: ScalingLimits, aliases: SlotCategoryTable) -> Self {
        Self {
            limits: limits.sanitized(),
            aliases,
        }
    }

    /// Limits in effect
    #[must_use]
    pub const fn limits(&self) -> &ScalingLimits {
        &self.limits
    }

    /// Alias table in effect
    #[must_use]
    pub const fn aliases(&self) -> &SlotCategoryTable {
        &self.aliases
    }

    /// Query the catalog for a slot and rank the scalable candidates
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a non-positive or non-finite target and
    /// propagates catalog failures
    pub async fn find_candidates(
        &self,
        catalog: &dyn CatalogProvider,
        query: &CandidateQuery,
    ) -> AppResult<Vec<ScaledCandidate>> {
        if !query.target_calories.is_finite() || query.target_calories <= 0.0 {
            return Err(AppError::invalid_input(format!(
                "target calories must be a positive number, got {}",
                query.target_calories
            ))
            .with_resource_id(query.slot_category.clone()));
        }

        let tags = self.aliases.accepted_tags(&query.slot_category);
        let items = catalog.find_by_category(&tags, &query.filters).await?;
        let fetched = items.len();
        let ranked = self.rank_candidates(items, query.target_calories, query.limit);

        debug!(
            slot = %query.slot_category,
            ?tags,
            target_calories = query.target_calories,
            fetched,
            returned = ranked.len(),
            "Matched slot candidates"
        );
        Ok(ranked)
    }

    /// Scale, filter and rank already-fetched items against a target
    ///
    /// Items keep their relative order on equal distance from a 1x portion.
    #[must_use]
    pub fn rank_candidates(
        &self,
        items: Vec<CandidateItem>,
        target_calories: f64,
        limit: usize,
    ) -> Vec<ScaledCandidate> {
        let mut scaled: Vec<ScaledCandidate> = items
            .into_iter()
            .filter_map(|item| self.scale(item, target_calories))
            .collect();

        // Stable sort keeps catalog order for ties
        scaled.sort_by(|a, b| a.distance_from_unit().total_cmp(&b.distance_from_unit()));
        scaled.truncate(limit);
        scaled
    }

    fn scale(&self, item: CandidateItem, target_calories: f64) -> Option<ScaledCandidate> {
        let base_calories = item.nutrition.calories();
        if base_calories <= 0.0 {
            debug!(item_id = %item.id, "Skipping candidate without calories");
            return None;
        }

        let scale_factor = target_calories / base_calories;
        if !self.limits.contains(scale_factor) {
            debug!(
                item_id = %item.id,
                scale_factor,
                "Candidate outside scaling limits"
            );
            return None;
        }

        Some(ScaledCandidate {
            scale_factor,
            scaled_calories: target_calories,
            scaled_amount: item.base_unit_size * scale_factor,
            scaled_nutrition: item.nutrition.scaled(scale_factor).rounded_for_display(),
            item,
        })
    }
}
