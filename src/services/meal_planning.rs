// ABOUTME: Meal planning service wiring the composition engine to catalog, settings and storage
// ABOUTME: Builds structures, suggests per-slot candidates and swaps, maintains daily plans
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Meal planning orchestration
//!
//! The engine itself holds no state. This service gathers what each call
//! needs (settings, catalog items, the stored plan) and hands it to the pure
//! algorithms in [`crate::intelligence`].

use crate::catalog::CatalogProvider;
use crate::config::{EngineConfig, SimilarityConfig};
use crate::database::PlanRepository;
use crate::errors::{AppError, AppResult};
use crate::intelligence::{
    aggregate, build_from_template, canonical_slot_name, normalize_legacy, prepare,
    recalculate_targets, unresolved_items, validate, CandidateQuery, MealStructure,
    PortionMatcher, ScaledCandidate, SlotCategoryTable, SwapOption, SwapResolver, SwapTarget,
};
use crate::settings::{resolve_engine_settings, EngineSettings, SettingsProvider};
use futures_util::future::try_join_all;
use pierre_meals_core::models::{
    CandidateItem, DailyPlan, DietaryFilter, PlanEntry, PlanKey, PlanVariant,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Candidates suggested for one slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotSuggestions {
    /// Slot name
    pub slot: String,
    /// Slot label
    pub label: String,
    /// Calorie target of the slot
    pub target_calories: f64,
    /// Ranked candidates, possibly empty
    pub candidates: Vec<ScaledCandidate>,
}

/// Suggestions for every slot of a day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaySuggestions {
    /// Prepared structure with calorie targets
    pub structure: MealStructure,
    /// One entry per slot, in structure order
    pub slots: Vec<SlotSuggestions>,
}

impl DaySuggestions {
    /// Slots for which nothing could be matched
    pub fn unmatched_slots(&self) -> impl Iterator<Item = &str> {
        self.slots
            .iter()
            .filter(|slot| slot.candidates.is_empty())
            .map(|slot| slot.slot.as_str())
    }
}

/// Orchestrates meal planning over the external collaborators
#[derive(Clone)]
pub struct MealPlanningService {
    catalog: Arc<dyn CatalogProvider>,
    settings: Arc<dyn SettingsProvider>,
    plans: Arc<dyn PlanRepository>,
    config: EngineConfig,
    aliases: SlotCategoryTable,
}

impl MealPlanningService {
    /// Create a service with the default slot alias table
    #[must_use]
    pub fn new(
        catalog: Arc<dyn CatalogProvider>,
        settings: Arc<dyn SettingsProvider>,
        plans: Arc<dyn PlanRepository>,
        config: EngineConfig,
    ) -> Self {
        Self {
            catalog,
            settings,
            plans,
            config,
            aliases: SlotCategoryTable::default(),
        }
    }

    /// Replace the slot alias table
    #[must_use]
    pub fn with_aliases(mut self, aliases: SlotCategoryTable) -> Self {
        self.aliases = aliases;
        self
    }

    /// Configuration in effect
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Tuning values for this request, with defaults for anything unset
    ///
    /// # Errors
    ///
    /// Propagates settings store failures
    pub async fn engine_settings(&self) -> AppResult<EngineSettings> {
        resolve_engine_settings(self.settings.as_ref(), &self.config).await
    }

    /// Build a structure from a built-in template
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown template, `InvalidInput`
    /// for a bad budget and `InvalidStructure` if the template does not meet
    /// the configured tolerance
    pub fn build_structure(
        &self,
        template_id: &str,
        daily_calories: f64,
    ) -> AppResult<MealStructure> {
        let structure = build_from_template(template_id, daily_calories)?;
        validate(&structure, &self.config.structure).into_result()?;
        Ok(structure)
    }

    /// Re-derive slot targets after the daily budget changed
    ///
    /// Percentages are left as they are apart from the legacy fraction
    /// normalization; they are not re-validated.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a negative or non-finite budget and
    /// `InvalidStructure` for percentages that cannot be normalized
    pub fn rebudget(
        &self,
        structure: &MealStructure,
        daily_calories: f64,
    ) -> AppResult<MealStructure> {
        if !daily_calories.is_finite() || daily_calories < 0.0 {
            return Err(AppError::invalid_input(format!(
                "daily calories must be a finite, non-negative number, got {daily_calories}"
            )));
        }
        let normalized = normalize_legacy(structure, &self.config.structure)?;
        Ok(recalculate_targets(&normalized, daily_calories))
    }

    /// Suggest candidates for every slot of a structure
    ///
    /// The structure is normalized and validated first. Slots are resolved
    /// against the catalog concurrently; an empty candidate list for a slot
    /// is a normal result.
    ///
    /// # Errors
    ///
    /// Returns `InvalidStructure` when the structure is not assignable and
    /// propagates settings or catalog failures
    pub async fn plan_day(
        &self,
        structure: &MealStructure,
        daily_calories: f64,
        filters: &[DietaryFilter],
        limit: Option<usize>,
    ) -> AppResult<DaySuggestions> {
        let prepared = prepare(structure, daily_calories, &self.config.structure)?;
        let settings = self.engine_settings().await?;
        let matcher = PortionMatcher::new(settings.scaling_limits, self.aliases.clone());
        let limit = limit.unwrap_or(self.config.matching.default_candidate_limit);

        let lookups = prepared.slots.iter().map(|slot| {
            let matcher = &matcher;
            let query = CandidateQuery::new(slot.name.clone(), slot.target_calories)
                .with_filters(filters.to_vec())
                .with_limit(limit);
            async move {
                let candidates = if query.target_calories > 0.0 {
                    matcher
                        .find_candidates(self.catalog.as_ref(), &query)
                        .await?
                } else {
                    Vec::new()
                };
                Ok::<_, AppError>(SlotSuggestions {
                    slot: slot.name.clone(),
                    label: slot.label.clone(),
                    target_calories: slot.target_calories,
                    candidates,
                })
            }
        });
        let slots = try_join_all(lookups).await?;

        let suggestions = DaySuggestions {
            structure: prepared,
            slots,
        };
        for slot in suggestions.unmatched_slots() {
            debug!(slot, "No candidate fits the slot target");
        }
        Ok(suggestions)
    }

    /// Look up a single catalog item, failing when it does not exist
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown id and propagates catalog
    /// failures
    pub async fn resolve_item(&self, item_id: &str) -> AppResult<CandidateItem> {
        self.catalog.get_by_id(item_id).await?.ok_or_else(|| {
            AppError::not_found(format!("Catalog item '{item_id}'")).with_resource_id(item_id)
        })
    }

    /// Suggest substitutes for a catalog item
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown item, `InvalidInput` for a
    /// bad target and propagates settings or catalog failures
    pub async fn suggest_swaps(
        &self,
        item_id: &str,
        target: Option<SwapTarget>,
        limit: Option<usize>,
    ) -> AppResult<Vec<SwapOption>> {
        let original = self.resolve_item(item_id).await?;
        let settings = self.engine_settings().await?;
        let resolver = SwapResolver::new(SimilarityConfig {
            weights: settings.similarity_weights,
            decay_per_point: self.config.similarity.decay_per_point,
        });
        let limit = limit.unwrap_or(self.config.matching.default_swap_limit);
        resolver
            .find_swaps(self.catalog.as_ref(), &original, target, limit)
            .await
    }

    /// Current plan for one variant of a day
    ///
    /// # Errors
    ///
    /// Propagates storage failures
    pub async fn get_plan(&self, key: PlanKey, variant: PlanVariant) -> AppResult<Option<DailyPlan>> {
        self.plans.read_plan(key, variant).await
    }

    /// Item ids in a stored plan that no longer resolve in the catalog
    ///
    /// # Errors
    ///
    /// Propagates storage or catalog failures
    pub async fn unresolved_plan_items(
        &self,
        key: PlanKey,
        variant: PlanVariant,
    ) -> AppResult<Vec<String>> {
        match self.plans.read_plan(key, variant).await? {
            Some(plan) => unresolved_items(&plan.slots, self.catalog.as_ref()).await,
            None => Ok(Vec::new()),
        }
    }

    /// Replace the items assigned to one slot of one plan variant
    ///
    /// Creates the plan on first assignment and recomputes its cached
    /// totals. The sibling variant for the same date is never touched.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for an empty slot name, no entries or invalid
    /// servings, `ResourceNotFound` for an item missing from the catalog,
    /// `ResourceConflict` when concurrent writers keep winning, and
    /// propagates storage or catalog failures
    pub async fn assign_slot(
        &self,
        key: PlanKey,
        variant: PlanVariant,
        slot: &str,
        entries: Vec<PlanEntry>,
    ) -> AppResult<DailyPlan> {
        let slot = canonical_slot_name(slot);
        if slot.is_empty() {
            return Err(AppError::invalid_input("slot name must not be empty"));
        }
        if entries.is_empty() {
            return Err(AppError::invalid_input(format!(
                "no items given for slot '{slot}', clear the slot instead"
            )));
        }
        let entries = entries
            .into_iter()
            .map(|entry| PlanEntry::new(entry.item_id, entry.servings))
            .collect::<AppResult<Vec<_>>>()?;
        try_join_all(entries.iter().map(|entry| self.resolve_item(&entry.item_id))).await?;

        let updated = self
            .update_plan(key, variant, |plan| {
                plan.slots.insert(slot.clone(), entries.clone());
                true
            })
            .await?;
        updated.ok_or_else(|| AppError::internal("assigned plan unexpectedly empty"))
    }

    /// Remove one slot's items from one plan variant
    ///
    /// Removing the last assignment deletes that variant's plan and returns
    /// `None`.
    ///
    /// # Errors
    ///
    /// Returns `ResourceConflict` when concurrent writers keep winning and
    /// propagates storage or catalog failures
    pub async fn clear_slot(
        &self,
        key: PlanKey,
        variant: PlanVariant,
        slot: &str,
    ) -> AppResult<Option<DailyPlan>> {
        let slot = canonical_slot_name(slot);
        self.update_plan(key, variant, |plan| plan.slots.remove(&slot).is_some())
            .await
    }

    /// Read-modify-write one plan variant with optimistic retries
    ///
    /// `mutate` returns whether it changed the plan. An emptied plan is
    /// deleted rather than stored.
    async fn update_plan<F>(
        &self,
        key: PlanKey,
        variant: PlanVariant,
        mutate: F,
    ) -> AppResult<Option<DailyPlan>>
    where
        F: Fn(&mut DailyPlan) -> bool + Send + Sync,
    {
        let attempts = self.config.planning.plan_write_retries.max(1);
        let mut attempt = 1;
        loop {
            let current = self.plans.read_plan(key, variant).await?;
            let existed = current.is_some();
            let mut plan = current.unwrap_or_default();
            if !mutate(&mut plan) {
                return Ok(existed.then_some(plan));
            }
            plan.slots.retain(|_, entries| !entries.is_empty());

            let outcome = if plan.is_empty() {
                if existed {
                    self.plans
                        .delete_plan(key, variant, plan.version)
                        .await
                        .map(|_| None)
                } else {
                    Ok(None)
                }
            } else {
                plan.totals = aggregate(&plan.slots, self.catalog.as_ref()).await?;
                self.plans.write_plan(key, variant, plan).await.map(Some)
            };

            match outcome {
                Err(e) if e.code.is_retryable() && attempt < attempts => {
                    warn!(
                        plan_key = %key,
                        %variant,
                        attempt,
                        "Plan write conflicted, retrying"
                    );
                    attempt += 1;
                }
                Ok(stored) => {
                    info!(
                        plan_key = %key,
                        %variant,
                        deleted = stored.is_none(),
                        "Updated daily plan"
                    );
                    return Ok(stored);
                }
                Err(e) => return Err(e),
            }
        }
    }
}
