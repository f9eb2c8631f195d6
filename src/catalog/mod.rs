// ABOUTME: Catalog lookup contract used by the matcher, swap resolver and aggregator
// ABOUTME: Async trait over recipe and ingredient storage plus an in-memory implementation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Catalog Lookup
//!
//! The engine never owns catalog data. It reads candidates through
//! [`CatalogProvider`], which a deployment backs with whatever store holds
//! its recipes. [`memory::InMemoryCatalog`] serves tests and the CLI.

/// In-memory catalog backed by a vector of items
pub mod memory;

pub use memory::InMemoryCatalog;

use crate::errors::AppResult;
use async_trait::async_trait;
use pierre_meals_core::models::{CandidateItem, DietaryFilter, GroupKey};

/// Read-only access to recipes and ingredients
///
/// Implementations must preserve catalog order in list results: the matcher
/// breaks ranking ties by that order.
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Items carrying any of `tags` and every dietary filter in `filters`
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store cannot be queried
    async fn find_by_category(
        &self,
        tags: &[String],
        filters: &[DietaryFilter],
    ) -> AppResult<Vec<CandidateItem>>;

    /// Items in the same group as `group_key`, excluding `exclude_id`
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store cannot be queried
    async fn find_by_group(
        &self,
        group_key: &GroupKey,
        exclude_id: &str,
    ) -> AppResult<Vec<CandidateItem>>;

    /// A single item by id, `None` when it does not exist
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store cannot be queried
    async fn get_by_id(&self, id: &str) -> AppResult<Option<CandidateItem>>;
}
