// ABOUTME: Daily totals command for the meal-planner CLI
// ABOUTME: Reads a plan file, sums its nutrition and reports unresolved item ids
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::print_json;
use pierre_meals::{
    catalog::InMemoryCatalog,
    errors::{AppError, AppResult},
    intelligence::{aggregate, unresolved_items},
    models::PlanSlots,
};
use serde_json::json;
use std::path::Path;
use tracing::warn;

/// Print the totals of a plan file
pub async fn totals(catalog_path: &Path, plan_path: &Path) -> AppResult<()> {
    let catalog = InMemoryCatalog::from_json_file(catalog_path).await?;
    let contents = tokio::fs::read_to_string(plan_path).await.map_err(|e| {
        AppError::storage(format!("Failed to read plan {}", plan_path.display())).with_source(e)
    })?;
    let slots: PlanSlots = serde_json::from_str(&contents)?;

    let missing = unresolved_items(&slots, &catalog).await?;
    if !missing.is_empty() {
        warn!(?missing, "Plan references items missing from the catalog");
    }
    let totals = aggregate(&slots, &catalog).await?;

    print_json(&json!({
        "totals": totals,
        "unresolved_items": missing,
    }))
}
