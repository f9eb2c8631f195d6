// ABOUTME: Swap resolver finding same-group substitutes with equivalent amounts
// ABOUTME: Suggests practical amounts per unit and ranks by subgroup match then name
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Swap Resolver
//!
//! Substitutes come from the original item's group: the food group for
//! ingredients, overlapping category tags for recipes. Each substitute gets
//! an amount whose calories approximate the target, rounded to a step that
//! makes sense for its unit, plus a macro similarity score against the
//! original.
//!
//! Ordering puts items from the original's subgroup first regardless of
//! their score, then sorts by name.

use super::macro_profile::to_macro_profile;
use super::similarity::{similarity, SwapQuality};
use crate::catalog::CatalogProvider;
use crate::config::SimilarityConfig;
use crate::errors::{AppError, AppResult};
use pierre_meals_core::models::{round_one_decimal, CandidateItem};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::debug;

/// What a substitute should be equivalent to
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type", content = "value")]
pub enum SwapTarget {
    /// Absolute calories
    Calories(f64),
    /// Amount of the original item, in the original's unit
    Amount(f64),
}

/// A ranked substitute
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwapOption {
    /// The substitute item
    pub item: CandidateItem,
    /// Suggested amount in the substitute's unit
    pub suggested_amount: f64,
    /// Calories of the suggested amount
    pub suggested_calories: f64,
    /// Signed gap between suggested and target calories, in percent
    pub calorie_diff_percent: f64,
    /// Macro similarity with the original, 0 to 100
    pub macro_similarity_score: u8,
    /// Tier of the similarity score
    pub swap_quality: SwapQuality,
    /// Whether the substitute shares the original's subgroup
    pub same_subgroup: bool,
}

/// Finds and ranks substitutes for a chosen item
#[derive(Debug, Clone, Copy, Default)]
pub struct SwapResolver {
    similarity: SimilarityConfig,
}

impl SwapResolver {
    /// Create a resolver with the given scoring configuration
    #[must_use]
    pub const fn new(similarity: SimilarityConfig) -> Self {
        Self { similarity }
    }

    /// Find substitutes for `original` in the catalog
    ///
    /// Returns an empty list when the original has no group.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when no positive calorie target can be derived
    /// and propagates catalog failures
    pub async fn find_swaps(
        &self,
        catalog: &dyn CatalogProvider,
        original: &CandidateItem,
        target: Option<SwapTarget>,
        limit: usize,
    ) -> AppResult<Vec<SwapOption>> {
        let Some(group_key) = original.group_key() else {
            debug!(item_id = %original.id, "Item has no group, no swaps");
            return Ok(Vec::new());
        };

        let target_calories = resolve_target_calories(original, target)?;
        let candidates = catalog.find_by_group(&group_key, &original.id).await?;
        Ok(self.rank_swaps(original, candidates, target_calories, limit))
    }

    /// Build and order swap options from already-fetched candidates
    #[must_use]
    pub fn rank_swaps(
        &self,
        original: &CandidateItem,
        candidates: Vec<CandidateItem>,
        target_calories: f64,
        limit: usize,
    ) -> Vec<SwapOption> {
        let original_profile = to_macro_profile(&original.nutrition);

        let mut options: Vec<SwapOption> = candidates
            .into_iter()
            .filter(|candidate| candidate.id != original.id)
            .filter_map(|candidate| {
                let density = candidate.calorie_density()?;
                let step = candidate.unit.rounding_step();
                let raw_amount = target_calories / density;
                let suggested_amount = ((raw_amount / step).round() * step).max(step);
                let suggested_calories = suggested_amount * density;

                let score = similarity(
                    &original_profile,
                    &to_macro_profile(&candidate.nutrition),
                    &self.similarity,
                );
                let same_subgroup = original.subgroup.is_some()
                    && candidate.subgroup.as_deref() == original.subgroup.as_deref();

                Some(SwapOption {
                    suggested_amount,
                    suggested_calories: suggested_calories.round(),
                    calorie_diff_percent: round_one_decimal(
                        (suggested_calories - target_calories) / target_calories * 100.0,
                    ),
                    macro_similarity_score: score,
                    swap_quality: SwapQuality::from_score(score),
                    same_subgroup,
                    item: candidate,
                })
            })
            .collect();

        options.sort_by(compare_swaps);
        options.truncate(limit);

        debug!(
            item_id = %original.id,
            target_calories,
            returned = options.len(),
            "Ranked swap options"
        );
        options
    }
}

fn compare_swaps(a: &SwapOption, b: &SwapOption) -> Ordering {
    b.same_subgroup
        .cmp(&a.same_subgroup)
        .then_with(|| {
            a.item
                .name
                .to_lowercase()
                .cmp(&b.item.name.to_lowercase())
        })
        .then_with(|| a.item.id.cmp(&b.item.id))
}

/// Calories a substitute should match
///
/// # Errors
///
/// Returns `InvalidInput` for a non-positive or non-finite target, or when
/// the original has no calories to default to
pub fn resolve_target_calories(
    original: &CandidateItem,
    target: Option<SwapTarget>,
) -> AppResult<f64> {
    let calories = match target {
        Some(SwapTarget::Calories(calories)) => calories,
        Some(SwapTarget::Amount(amount)) => {
            if !amount.is_finite() || amount <= 0.0 {
                return Err(AppError::invalid_input(format!(
                    "swap amount must be a positive number, got {amount}"
                )));
            }
            amount * original.calorie_density().unwrap_or(0.0)
        }
        None => original.nutrition.calories(),
    };

    if calories.is_finite() && calories > 0.0 {
        Ok(calories)
    } else {
        Err(AppError::invalid_input(format!(
            "cannot derive a positive calorie target for swaps, got {calories}"
        ))
        .with_resource_id(original.id.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pierre_meals_core::models::{NutritionValues, ServingUnit};

    fn grain(id: &str, name: &str, kcal_per_100g: f64, subgroup: &str) -> CandidateItem {
        let nutrition = NutritionValues::new(kcal_per_100g, 10.0, 70.0, 3.0).unwrap_or_default();
        CandidateItem::ingredient(id, name, nutrition, 100.0, ServingUnit::Grams)
            .with_food_group("grains")
            .with_subgroup(subgroup)
    }

    #[test]
    fn test_amount_rounds_to_unit_step() {
        let original = grain("rice", "Rice", 130.0, "rice");
        // 130 kcal / 3.6 kcal per g = 36.1 g -> 35 g -> 126 kcal
        let options =
            SwapResolver::default().rank_swaps(&original, vec![grain("oats", "Oats", 360.0, "flakes")], 130.0, 10);
        assert_eq!(options.len(), 1);
        assert!((options[0].suggested_amount - 35.0).abs() < f64::EPSILON);
        assert!((options[0].calorie_diff_percent - -3.1).abs() < 1e-9);
    }

    #[test]
    fn test_amount_never_below_one_step() {
        let original = grain("rice", "Rice", 130.0, "rice");
        let options = SwapResolver::default().rank_swaps(
            &original,
            vec![grain("oil", "Oil", 900.0, "fats")],
            10.0,
            10,
        );
        assert!((options[0].suggested_amount - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_subgroup_before_name() {
        let original = grain("rice", "Rice", 130.0, "rice");
        let options = SwapResolver::default().rank_swaps(
            &original,
            vec![
                grain("barley", "Barley", 350.0, "whole"),
                grain("wild", "Wild rice", 100.0, "rice"),
                grain("amaranth", "amaranth", 370.0, "whole"),
            ],
            130.0,
            10,
        );
        let ids: Vec<&str> = options.iter().map(|o| o.item.id.as_str()).collect();
        assert_eq!(ids, vec!["wild", "amaranth", "barley"]);
    }

    #[test]
    fn test_target_resolution() {
        let original = grain("rice", "Rice", 130.0, "rice");
        assert!((resolve_target_calories(&original, None).unwrap_or_default() - 130.0).abs() < 1e-9);
        let from_amount =
            resolve_target_calories(&original, Some(SwapTarget::Amount(200.0))).unwrap_or_default();
        assert!((from_amount - 260.0).abs() < 1e-9);
        assert!(resolve_target_calories(&original, Some(SwapTarget::Calories(-1.0))).is_err());
        assert!(resolve_target_calories(&original, Some(SwapTarget::Amount(0.0))).is_err());
    }
}
