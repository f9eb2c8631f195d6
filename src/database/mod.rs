// ABOUTME: Daily plan storage contract with optimistic concurrency
// ABOUTME: Keyed by user and date with standard and fasting variants stored independently
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Plan Storage
//!
//! A plan update reads the whole day, changes one slot and writes the day
//! back. Two such updates racing on the same user, date and variant would
//! lose one of them, so writes carry the version they were based on and the
//! store rejects stale versions with `ResourceConflict`.
//!
//! The standard and fasting variants share a key but are separate fields of
//! the stored record: an operation on one never reads into or overwrites
//! the other.

/// In-memory plan repository
pub mod memory;

pub use memory::InMemoryPlanRepository;

use crate::errors::AppResult;
use async_trait::async_trait;
use pierre_meals_core::models::{DailyPlan, PlanKey, PlanVariant};

/// Storage for daily plans
#[async_trait]
pub trait PlanRepository: Send + Sync {
    /// Read one variant of a day's plan
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read
    async fn read_plan(&self, key: PlanKey, variant: PlanVariant) -> AppResult<Option<DailyPlan>>;

    /// Write one variant of a day's plan
    ///
    /// `plan.version` must equal the stored version (0 when nothing is
    /// stored). On success the stored copy carries `version + 1` and is
    /// returned.
    ///
    /// # Errors
    ///
    /// Returns `ResourceConflict` on a version mismatch and `StorageError`
    /// if the store cannot be written
    async fn write_plan(
        &self,
        key: PlanKey,
        variant: PlanVariant,
        plan: DailyPlan,
    ) -> AppResult<DailyPlan>;

    /// Delete one variant of a day's plan
    ///
    /// Returns whether a plan was removed. A stored plan whose version
    /// differs from `expected_version` is left in place.
    ///
    /// # Errors
    ///
    /// Returns `ResourceConflict` on a version mismatch and `StorageError`
    /// if the store cannot be written
    async fn delete_plan(
        &self,
        key: PlanKey,
        variant: PlanVariant,
        expected_version: u64,
    ) -> AppResult<bool>;
}
