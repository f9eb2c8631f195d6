// ABOUTME: In-memory plan repository using a sharded concurrent map
// ABOUTME: One record per user and date holding separate standard and fasting plans
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::PlanRepository;
use crate::errors::{AppError, AppResult};
use async_trait::async_trait;
use chrono::Utc;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use pierre_meals_core::models::{DailyPlan, PlanKey, PlanVariant};
use serde_json::json;
use std::sync::Arc;
use tracing::info;

/// Stored state for one user and date
#[derive(Debug, Clone, Default)]
struct PlanRecord {
    standard: Option<DailyPlan>,
    fasting: Option<DailyPlan>,
}

impl PlanRecord {
    const fn variant(&self, variant: PlanVariant) -> Option<&DailyPlan> {
        match variant {
            PlanVariant::Standard => self.standard.as_ref(),
            PlanVariant::Fasting => self.fasting.as_ref(),
        }
    }

    fn variant_mut(&mut self, variant: PlanVariant) -> &mut Option<DailyPlan> {
        match variant {
            PlanVariant::Standard => &mut self.standard,
            PlanVariant::Fasting => &mut self.fasting,
        }
    }

    fn stored_version(&self, variant: PlanVariant) -> u64 {
        self.variant(variant).map_or(0, |plan| plan.version)
    }

    const fn is_empty(&self) -> bool {
        self.standard.is_none() && self.fasting.is_none()
    }
}

fn version_conflict(key: PlanKey, variant: PlanVariant, stored: u64, incoming: u64) -> AppError {
    AppError::conflict(format!(
        "{variant} plan for {key} was modified concurrently (stored version {stored}, write based on {incoming})"
    ))
    .with_resource_id(key.to_string())
    .with_details(json!({
        "variant": variant,
        "stored_version": stored,
        "expected_version": incoming,
    }))
}

/// Plan repository held in memory
///
/// Uses `DashMap` entry locking so each record is read and updated
/// atomically per key without a global lock.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPlanRepository {
    records: Arc<DashMap<PlanKey, PlanRecord>>,
}

impl InMemoryPlanRepository {
    /// Create an empty repository
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored user/date records
    #[must_use]
    pub fn record_count(&self) -> usize {
        self.records.len()
    }
}

#[async_trait]
impl PlanRepository for InMemoryPlanRepository {
    async fn read_plan(&self, key: PlanKey, variant: PlanVariant) -> AppResult<Option<DailyPlan>> {
        Ok(self
            .records
            .get(&key)
            .and_then(|record| record.variant(variant).cloned()))
    }

    async fn write_plan(
        &self,
        key: PlanKey,
        variant: PlanVariant,
        plan: DailyPlan,
    ) -> AppResult<DailyPlan> {
        let mut record = self.records.entry(key).or_default();
        let stored_version = record.stored_version(variant);
        if stored_version != plan.version {
            let vacant = record.is_empty();
            drop(record);
            if vacant {
                self.records.remove_if(&key, |_, record| record.is_empty());
            }
            return Err(version_conflict(key, variant, stored_version, plan.version));
        }

        let stored = DailyPlan {
            version: stored_version + 1,
            updated_at: Utc::now(),
            ..plan
        };
        *record.variant_mut(variant) = Some(stored.clone());
        drop(record);

        info!(
            plan_key = %key,
            %variant,
            version = stored.version,
            slots = stored.slots.len(),
            "Stored daily plan"
        );
        Ok(stored)
    }

    async fn delete_plan(
        &self,
        key: PlanKey,
        variant: PlanVariant,
        expected_version: u64,
    ) -> AppResult<bool> {
        let Entry::Occupied(mut occupied) = self.records.entry(key) else {
            return Ok(false);
        };

        let stored_version = match occupied.get().variant(variant) {
            Some(plan) => plan.version,
            None => return Ok(false),
        };
        if stored_version != expected_version {
            return Err(version_conflict(key, variant, stored_version, expected_version));
        }

        *occupied.get_mut().variant_mut(variant) = None;
        if occupied.get().is_empty() {
            occupied.remove();
        }

        info!(plan_key = %key, %variant, "Deleted daily plan");
        Ok(true)
    }
}
