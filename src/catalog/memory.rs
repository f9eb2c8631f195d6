// ABOUTME: In-memory catalog implementation over a vector of candidate items
// ABOUTME: Loads items from JSON and answers category, group and id lookups in catalog order
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::CatalogProvider;
use crate::errors::{AppError, AppResult};
use async_trait::async_trait;
use pierre_meals_core::models::{CandidateItem, DietaryFilter, GroupKey};
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

/// Catalog held entirely in memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    items: Vec<CandidateItem>,
}

impl InMemoryCatalog {
    /// Create a catalog from items
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if an id is blank or used twice
    pub fn new(items: Vec<CandidateItem>) -> AppResult<Self> {
        let mut seen = HashSet::new();
        for item in &items {
            if item.id.trim().is_empty() {
                return Err(AppError::invalid_input(format!(
                    "catalog item '{}' has an empty id",
                    item.name
                )));
            }
            if !seen.insert(item.id.as_str()) {
                return Err(AppError::invalid_input("duplicate catalog item id")
                    .with_resource_id(item.id.clone()));
            }
        }
        Ok(Self { items })
    }

    /// Parse a catalog from a JSON array of items
    ///
    /// # Errors
    ///
    /// Returns `SerializationError` for malformed JSON or invalid nutrition
    /// values and `InvalidInput` for bad ids
    pub fn from_json_str(json: &str) -> AppResult<Self> {
        let items: Vec<CandidateItem> = serde_json::from_str(json)?;
        Self::new(items)
    }

    /// Load a catalog from a JSON file
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the file cannot be read, otherwise as
    /// [`Self::from_json_str`]
    pub async fn from_json_file(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let contents = tokio::fs::read_to_string(path).await.map_err(|e| {
            AppError::storage(format!("Failed to read catalog {}", path.display())).with_source(e)
        })?;
        let catalog = Self::from_json_str(&contents)?;
        debug!(path = %path.display(), items = catalog.len(), "Loaded catalog");
        Ok(catalog)
    }

    /// Number of items
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the catalog holds no items
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// All items in catalog order
    #[must_use]
    pub fn items(&self) -> &[CandidateItem] {
        &self.items
    }
}

#[async_trait]
impl CatalogProvider for InMemoryCatalog {
    async fn find_by_category(
        &self,
        tags: &[String],
        filters: &[DietaryFilter],
    ) -> AppResult<Vec<CandidateItem>> {
        Ok(self
            .items
            .iter()
            .filter(|item| item.matches_any_category(tags) && item.satisfies_all(filters))
            .cloned()
            .collect())
    }

    async fn find_by_group(
        &self,
        group_key: &GroupKey,
        exclude_id: &str,
    ) -> AppResult<Vec<CandidateItem>> {
        Ok(self
            .items
            .iter()
            .filter(|item| item.id != exclude_id && item.in_group(group_key))
            .cloned()
            .collect())
    }

    async fn get_by_id(&self, id: &str) -> AppResult<Option<CandidateItem>> {
        Ok(self.items.iter().find(|item| item.id == id).cloned())
    }
}
