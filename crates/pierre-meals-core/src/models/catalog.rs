// ABOUTME: Catalog item models exposed by the recipe/ingredient catalog
// ABOUTME: CandidateItem, ItemKind, ServingUnit, DietaryFilter and GroupKey definitions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::nutrition::NutritionValues;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Whether a catalog entry is a composed recipe or a single ingredient
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    /// Composed dish, grouped by its category tags
    #[default]
    Recipe,
    /// Single food, grouped by its food group
    Ingredient,
}

/// Unit in which an item's base amount is expressed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ServingUnit {
    /// Whole servings of a recipe
    #[default]
    Serving,
    /// Weight in grams
    Grams,
    /// Volume in milliliters
    Milliliters,
    /// Count of whole items (eggs, slices, ...)
    Pieces,
}

impl ServingUnit {
    /// Smallest practical step when suggesting an amount in this unit
    #[must_use]
    pub const fn rounding_step(&self) -> f64 {
        match self {
            Self::Grams | Self::Milliliters => 5.0,
            Self::Pieces => 0.5,
            Self::Serving => 0.25,
        }
    }
}

/// Dietary requirement applied as a hard exclude when querying the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DietaryFilter {
    /// No meat or fish
    Vegetarian,
    /// No animal products
    Vegan,
    /// No gluten-containing ingredients
    GlutenFree,
    /// No dairy products
    DairyFree,
}

impl DietaryFilter {
    /// Stable tag name used in catalog data
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Vegetarian => "vegetarian",
            Self::Vegan => "vegan",
            Self::GlutenFree => "gluten_free",
            Self::DairyFree => "dairy_free",
        }
    }
}

impl fmt::Display for DietaryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DietaryFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "vegetarian" => Ok(Self::Vegetarian),
            "vegan" => Ok(Self::Vegan),
            "gluten_free" => Ok(Self::GlutenFree),
            "dairy_free" => Ok(Self::DairyFree),
            other => Err(format!("unknown dietary filter: {other}")),
        }
    }
}

/// Key used to find same-group substitutes for an item
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type", content = "value")]
pub enum GroupKey {
    /// Ingredients sharing a food group ("grains", "dairy", ...)
    FoodGroup(String),
    /// Recipes sharing at least one category tag
    Categories(Vec<String>),
}

/// A recipe or ingredient as exposed by the catalog
///
/// `nutrition` is the nutrition of `base_unit_size` units of `unit`
/// (one serving for recipes, for example 100 g for most ingredients).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateItem {
    /// Catalog identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Recipe or ingredient
    #[serde(default)]
    pub kind: ItemKind,
    /// Category tags (breakfast, lunch, snack, ...)
    #[serde(default)]
    pub category_tags: Vec<String>,
    /// Dietary properties the item satisfies
    #[serde(default)]
    pub dietary_tags: Vec<DietaryFilter>,
    /// Nutrition of one base amount
    pub nutrition: NutritionValues,
    /// Size of the base amount in `unit`
    #[serde(default = "default_base_unit_size")]
    pub base_unit_size: f64,
    /// Unit of the base amount
    #[serde(default)]
    pub unit: ServingUnit,
    /// Food group for ingredients
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub food_group: Option<String>,
    /// Finer grouping used to rank visually/texturally similar swaps first
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subgroup: Option<String>,
}

const fn default_base_unit_size() -> f64 {
    1.0
}

impl CandidateItem {
    /// Create a recipe item with a one-serving base amount
    #[must_use]
    pub fn recipe(id: impl Into<String>, name: impl Into<String>, nutrition: NutritionValues) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: ItemKind::Recipe,
            category_tags: Vec::new(),
            dietary_tags: Vec::new(),
            nutrition,
            base_unit_size: 1.0,
            unit: ServingUnit::Serving,
            food_group: None,
            subgroup: None,
        }
    }

    /// Create an ingredient item with the given base amount
    #[must_use]
    pub fn ingredient(
        id: impl Into<String>,
        name: impl Into<String>,
        nutrition: NutritionValues,
        base_unit_size: f64,
        unit: ServingUnit,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: ItemKind::Ingredient,
            category_tags: Vec::new(),
            dietary_tags: Vec::new(),
            nutrition,
            base_unit_size,
            unit,
            food_group: None,
            subgroup: None,
        }
    }

    /// Add a category tag
    #[must_use]
    pub fn with_category(mut self, tag: impl Into<String>) -> Self {
        self.category_tags.push(tag.into());
        self
    }

    /// Add a dietary tag
    #[must_use]
    pub fn with_dietary_tag(mut self, tag: DietaryFilter) -> Self {
        self.dietary_tags.push(tag);
        self
    }

    /// Set the food group
    #[must_use]
    pub fn with_food_group(mut self, group: impl Into<String>) -> Self {
        self.food_group = Some(group.into());
        self
    }

    /// Set the subgroup
    #[must_use]
    pub fn with_subgroup(mut self, subgroup: impl Into<String>) -> Self {
        self.subgroup = Some(subgroup.into());
        self
    }

    /// Whether the item carries any of the given category tags
    #[must_use]
    pub fn matches_any_category(&self, tags: &[String]) -> bool {
        self.category_tags.iter().any(|tag| tags.contains(tag))
    }

    /// Whether the item satisfies every dietary filter
    #[must_use]
    pub fn satisfies_all(&self, filters: &[DietaryFilter]) -> bool {
        filters.iter().all(|filter| self.dietary_tags.contains(filter))
    }

    /// Grouping key used for swaps
    ///
    /// Ingredients group by food group, recipes by their category tags.
    /// Returns `None` when the item has nothing to group by.
    #[must_use]
    pub fn group_key(&self) -> Option<GroupKey> {
        match self.kind {
            ItemKind::Ingredient => self
                .food_group
                .as_ref()
                .filter(|group| !group.trim().is_empty())
                .map(|group| GroupKey::FoodGroup(group.clone())),
            ItemKind::Recipe if self.category_tags.is_empty() => None,
            ItemKind::Recipe => Some(GroupKey::Categories(self.category_tags.clone())),
        }
    }

    /// Whether the item belongs to the given group
    #[must_use]
    pub fn in_group(&self, key: &GroupKey) -> bool {
        match key {
            GroupKey::FoodGroup(group) => self.food_group.as_deref() == Some(group.as_str()),
            GroupKey::Categories(tags) => self.matches_any_category(tags),
        }
    }

    /// Calories per single unit of `unit`, or `None` if not positive
    #[must_use]
    pub fn calorie_density(&self) -> Option<f64> {
        if self.base_unit_size <= 0.0 || !self.base_unit_size.is_finite() {
            return None;
        }
        let density = self.nutrition.calories() / self.base_unit_size;
        (density > 0.0).then_some(density)
    }
}
