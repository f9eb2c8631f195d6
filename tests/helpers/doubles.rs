// ABOUTME: Collaborator doubles for catalog, settings and plan storage failures
// ABOUTME: Injects unavailable catalogs, broken settings stores and write conflicts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use async_trait::async_trait;
use pierre_meals::catalog::CatalogProvider;
use pierre_meals::config::{ScalingLimits, SimilarityWeights};
use pierre_meals::database::{InMemoryPlanRepository, PlanRepository};
use pierre_meals::errors::{AppError, AppResult};
use pierre_meals::models::{CandidateItem, DailyPlan, DietaryFilter, GroupKey, PlanKey, PlanVariant};
use pierre_meals::settings::SettingsProvider;
use std::sync::atomic::{AtomicU32, Ordering};

/// Catalog whose every lookup fails as if the backing service were down
#[derive(Debug, Default)]
pub struct UnavailableCatalog;

fn unavailable() -> AppError {
    AppError::external_service("catalog", "connection refused")
}

#[async_trait]
impl CatalogProvider for UnavailableCatalog {
    async fn find_by_category(
        &self,
        _category_tags: &[String],
        _filters: &[DietaryFilter],
    ) -> AppResult<Vec<CandidateItem>> {
        Err(unavailable())
    }

    async fn find_by_group(
        &self,
        _group_key: &GroupKey,
        _exclude_id: &str,
    ) -> AppResult<Vec<CandidateItem>> {
        Err(unavailable())
    }

    async fn get_by_id(&self, _id: &str) -> AppResult<Option<CandidateItem>> {
        Err(unavailable())
    }
}

/// Settings store whose reads fail
#[derive(Debug, Default)]
pub struct BrokenSettings;

#[async_trait]
impl SettingsProvider for BrokenSettings {
    async fn scaling_limits(&self) -> AppResult<Option<ScalingLimits>> {
        Err(AppError::storage("settings table missing"))
    }

    async fn similarity_weights(&self) -> AppResult<Option<SimilarityWeights>> {
        Err(AppError::storage("settings table missing"))
    }
}

/// Repository that rejects the first `conflicts` writes with a version conflict
#[derive(Debug, Default)]
pub struct ContendedRepository {
    inner: InMemoryPlanRepository,
    remaining_conflicts: AtomicU32,
    write_attempts: AtomicU32,
}

impl ContendedRepository {
    pub fn new(conflicts: u32) -> Self {
        Self {
            inner: InMemoryPlanRepository::new(),
            remaining_conflicts: AtomicU32::new(conflicts),
            write_attempts: AtomicU32::new(0),
        }
    }

    pub fn write_attempts(&self) -> u32 {
        self.write_attempts.load(Ordering::SeqCst)
    }

    fn take_conflict(&self) -> bool {
        self.remaining_conflicts
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| left.checked_sub(1))
            .is_ok()
    }
}

#[async_trait]
impl PlanRepository for ContendedRepository {
    async fn read_plan(&self, key: PlanKey, variant: PlanVariant) -> AppResult<Option<DailyPlan>> {
        self.inner.read_plan(key, variant).await
    }

    async fn write_plan(
        &self,
        key: PlanKey,
        variant: PlanVariant,
        plan: DailyPlan,
    ) -> AppResult<DailyPlan> {
        self.write_attempts.fetch_add(1, Ordering::SeqCst);
        if self.take_conflict() {
            return Err(AppError::conflict("plan was modified concurrently"));
        }
        self.inner.write_plan(key, variant, plan).await
    }

    async fn delete_plan(
        &self,
        key: PlanKey,
        variant: PlanVariant,
        expected_version: u64,
    ) -> AppResult<bool> {
        self.inner.delete_plan(key, variant, expected_version).await
    }
}
