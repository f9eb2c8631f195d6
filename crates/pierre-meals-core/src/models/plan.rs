// ABOUTME: Daily plan models: slot assignments, cached totals and storage keys
// ABOUTME: DailyPlan, PlanEntry, PlanKey and the standard/fasting PlanVariant discriminator
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::nutrition::NutritionValues;
use crate::errors::{AppError, AppResult};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

/// Which of the two independent plans for a date is addressed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PlanVariant {
    /// Regular meal structure
    #[default]
    Standard,
    /// Alternate fasting structure
    Fasting,
}

impl fmt::Display for PlanVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Standard => f.write_str("standard"),
            Self::Fasting => f.write_str("fasting"),
        }
    }
}

/// Storage key shared by both variants of a day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlanKey {
    /// Owning user
    pub user_id: Uuid,
    /// Calendar date
    pub date: NaiveDate,
}

impl PlanKey {
    /// Create a key
    #[must_use]
    pub const fn new(user_id: Uuid, date: NaiveDate) -> Self {
        Self { user_id, date }
    }
}

impl fmt::Display for PlanKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.user_id, self.date)
    }
}

/// One chosen item in a slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanEntry {
    /// Catalog identifier
    pub item_id: String,
    /// Number of base servings (may be fractional)
    pub servings: f64,
}

impl PlanEntry {
    /// Create an entry
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the id is blank or servings are not a
    /// finite positive number
    pub fn new(item_id: impl Into<String>, servings: f64) -> AppResult<Self> {
        let item_id = item_id.into();
        if item_id.trim().is_empty() {
            return Err(AppError::invalid_input("item_id must not be empty"));
        }
        if !servings.is_finite() || servings <= 0.0 {
            return Err(AppError::invalid_input(format!(
                "servings must be a positive number, got {servings}"
            ))
            .with_resource_id(item_id));
        }
        Ok(Self { item_id, servings })
    }
}

/// Slot name to assigned entries
pub type PlanSlots = BTreeMap<String, Vec<PlanEntry>>;

/// Assignments for one user, date and variant, with cached day totals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyPlan {
    /// Slot name to chosen items
    pub slots: PlanSlots,
    /// Cached totals, recomputed whenever `slots` changes
    pub totals: NutritionValues,
    /// Optimistic-concurrency version; 0 for a plan never stored
    #[serde(default)]
    pub version: u64,
    /// Last modification time
    pub updated_at: DateTime<Utc>,
}

impl DailyPlan {
    /// Create an empty, never-stored plan
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: BTreeMap::new(),
            totals: NutritionValues::zero(),
            version: 0,
            updated_at: Utc::now(),
        }
    }

    /// Whether no slot has any assignment
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.values().all(Vec::is_empty)
    }
}

impl Default for DailyPlan {
    fn default() -> Self {
        Self::new()
    }
}
