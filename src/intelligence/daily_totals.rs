// ABOUTME: Daily totals aggregation over a plan's slot assignments
// ABOUTME: Sums per-serving nutrition times servings, tolerating unresolved items as zero
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Daily Totals Aggregator
//!
//! Totals are rounded for storage and display: whole kcal, grams to one
//! decimal place. An item id that does not resolve contributes nothing;
//! callers that need strictness check [`unresolved_items`] first.

use crate::catalog::CatalogProvider;
use crate::errors::AppResult;
use futures_util::future::try_join_all;
use pierre_meals_core::models::{NutritionValues, PlanSlots};
use std::collections::{BTreeSet, HashMap};
use tracing::warn;

fn unique_item_ids(slots: &PlanSlots) -> BTreeSet<&str> {
    slots
        .values()
        .flatten()
        .map(|entry| entry.item_id.as_str())
        .collect()
}

/// Fetch per-serving nutrition for every referenced item, `None` when unknown
async fn fetch_nutrition<'a>(
    slots: &'a PlanSlots,
    catalog: &dyn CatalogProvider,
) -> AppResult<HashMap<&'a str, Option<NutritionValues>>> {
    let lookups = unique_item_ids(slots).into_iter().map(|id| async move {
        match catalog.get_by_id(id).await {
            Ok(item) => Ok((id, item.map(|item| item.nutrition))),
            Err(e) if e.is_not_found() => Ok((id, None)),
            Err(e) => Err(e),
        }
    });
    Ok(try_join_all(lookups).await?.into_iter().collect())
}

/// Sum a plan's nutrition using a lookup function
///
/// `lookup` returns `Ok(None)` for an unknown id, which contributes zero.
///
/// # Errors
///
/// Propagates any error returned by `lookup`
pub fn aggregate_with<F>(slots: &PlanSlots, mut lookup: F) -> AppResult<NutritionValues>
where
    F: FnMut(&str) -> AppResult<Option<NutritionValues>>,
{
    let mut total = NutritionValues::zero();
    for (slot, entries) in slots {
        for entry in entries {
            match lookup(&entry.item_id)? {
                Some(per_serving) => total = total + per_serving.scaled(entry.servings),
                None => warn!(
                    slot = %slot,
                    item_id = %entry.item_id,
                    "Unresolved plan item contributes zero to daily totals"
                ),
            }
        }
    }
    Ok(total.rounded_for_display())
}

/// Sum a plan's nutrition by resolving items through the catalog
///
/// # Errors
///
/// Propagates catalog failures other than not-found
pub async fn aggregate(
    slots: &PlanSlots,
    catalog: &dyn CatalogProvider,
) -> AppResult<NutritionValues> {
    let nutrition = fetch_nutrition(slots, catalog).await?;
    aggregate_with(slots, |id| Ok(nutrition.get(id).copied().flatten()))
}

/// Item ids referenced by the plan that the catalog cannot resolve
///
/// # Errors
///
/// Propagates catalog failures other than not-found
pub async fn unresolved_items(
    slots: &PlanSlots,
    catalog: &dyn CatalogProvider,
) -> AppResult<Vec<String>> {
    let nutrition = fetch_nutrition(slots, catalog).await?;
    let mut missing: Vec<String> = nutrition
        .into_iter()
        .filter(|(_, values)| values.is_none())
        .map(|(id, _)| id.to_owned())
        .collect();
    missing.sort();
    Ok(missing)
}
