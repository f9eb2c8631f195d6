// ABOUTME: Matching commands for the meal-planner CLI
// ABOUTME: Slot candidates, whole-day suggestions and swap ranking over a catalog file
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::print_json;
use pierre_meals::{
    catalog::InMemoryCatalog,
    config::EngineConfig,
    database::InMemoryPlanRepository,
    errors::AppResult,
    intelligence::{CandidateQuery, PortionMatcher, SlotCategoryTable, SwapTarget},
    models::DietaryFilter,
    services::MealPlanningService,
    settings::StaticSettings,
};
use serde_json::json;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

async fn service_for(config: &EngineConfig, catalog_path: &Path) -> AppResult<MealPlanningService> {
    let catalog = InMemoryCatalog::from_json_file(catalog_path).await?;
    info!(items = catalog.len(), "Catalog loaded");
    let settings = StaticSettings::unset()
        .with_scaling_limits(config.scaling)
        .with_similarity_weights(config.similarity.weights);
    Ok(MealPlanningService::new(
        Arc::new(catalog),
        Arc::new(settings),
        Arc::new(InMemoryPlanRepository::new()),
        *config,
    ))
}

/// Print ranked candidates for one slot target
pub async fn candidates(
    config: &EngineConfig,
    catalog_path: &Path,
    slot: String,
    target_calories: f64,
    filters: Vec<DietaryFilter>,
    limit: Option<usize>,
) -> AppResult<()> {
    let catalog = InMemoryCatalog::from_json_file(catalog_path).await?;
    let matcher = PortionMatcher::new(config.scaling, SlotCategoryTable::default());
    let query = CandidateQuery::new(slot, target_calories)
        .with_filters(filters)
        .with_limit(limit.unwrap_or(config.matching.default_candidate_limit));

    let ranked = matcher.find_candidates(&catalog, &query).await?;
    print_json(&json!({
        "query": query,
        "accepted_tags": matcher.aliases().accepted_tags(&query.slot_category),
        "candidates": ranked,
    }))
}

/// Print candidates for every slot of a template
pub async fn day(
    config: &EngineConfig,
    catalog_path: &Path,
    template_id: &str,
    daily_calories: f64,
    filters: &[DietaryFilter],
    limit: Option<usize>,
) -> AppResult<()> {
    let service = service_for(config, catalog_path).await?;
    let structure = service.build_structure(template_id, daily_calories)?;
    let suggestions = service
        .plan_day(&structure, daily_calories, filters, limit)
        .await?;
    print_json(&suggestions)
}

/// Print ranked swaps for an item
pub async fn swaps(
    config: &EngineConfig,
    catalog_path: &Path,
    item_id: &str,
    calories: Option<f64>,
    amount: Option<f64>,
    limit: Option<usize>,
) -> AppResult<()> {
    let service = service_for(config, catalog_path).await?;
    let target = calories
        .map(SwapTarget::Calories)
        .or_else(|| amount.map(SwapTarget::Amount));
    let options = service.suggest_swaps(item_id, target, limit).await?;
    print_json(&json!({
        "item": item_id,
        "target": target,
        "swaps": options,
    }))
}
