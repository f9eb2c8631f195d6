// ABOUTME: Explicit lookup table from meal slot names to accepted catalog category tags
// ABOUTME: Holds the aliasing rules such as dinner slots drawing from lunch recipes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Slot category aliasing
//!
//! The catalog has no dedicated dinner tag, so a dinner slot accepts lunch
//! recipes. Fasting slots likewise reuse regular tags. Every such rule lives
//! in [`SlotCategoryTable`] so it can be inspected and tested on its own.

use super::meal_structure::canonical_slot_name;
use std::collections::HashMap;

/// Mapping from slot category to the catalog tags it accepts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotCategoryTable {
    entries: HashMap<String, Vec<String>>,
}

const DEFAULT_ROWS: &[(&str, &[&str])] = &[
    ("breakfast", &["breakfast"]),
    ("morning_snack", &["snack"]),
    ("afternoon_snack", &["snack"]),
    ("lunch", &["lunch"]),
    ("dinner", &["lunch"]),
    ("pre_fast", &["snack"]),
    ("break_fast", &["lunch"]),
    ("supplemental_meal", &["lunch"]),
    ("late_snack", &["snack", "dessert"]),
    ("pre_dawn", &["breakfast"]),
];

impl Default for SlotCategoryTable {
    fn default() -> Self {
        Self::from_entries(DEFAULT_ROWS.iter().copied())
    }
}

impl SlotCategoryTable {
    /// A table with no rows; every category maps to itself
    #[must_use]
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Build a table from `(slot_category, accepted_tags)` rows
    #[must_use]
    pub fn from_entries<'a, I>(rows: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a [&'a str])>,
    {
        let entries = rows
            .into_iter()
            .map(|(category, tags)| {
                (
                    canonical_slot_name(category),
                    tags.iter().map(|tag| (*tag).to_owned()).collect(),
                )
            })
            .collect();
        Self { entries }
    }

    /// Replace the accepted tags for one slot category
    #[must_use]
    pub fn with_entry(mut self, slot_category: &str, tags: Vec<String>) -> Self {
        self.entries.insert(canonical_slot_name(slot_category), tags);
        self
    }

    /// Catalog tags accepted for a slot category
    ///
    /// Categories without a row map to themselves as a single tag.
    #[must_use]
    pub fn accepted_tags(&self, slot_category: &str) -> Vec<String> {
        let key = canonical_slot_name(slot_category);
        self.entries
            .get(&key)
            .cloned()
            .unwrap_or_else(|| vec![key])
    }
}
