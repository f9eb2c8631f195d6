// ABOUTME: Deterministic catalog and plan fixtures for integration tests
// ABOUTME: Small recipe and ingredient catalog covering every slot category and dietary tag
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::NaiveDate;
use pierre_meals::catalog::InMemoryCatalog;
use pierre_meals::models::{
    CandidateItem, DietaryFilter, NutritionValues, PlanEntry, PlanKey, PlanSlots, ServingUnit,
};
use uuid::Uuid;

/// Nutrition values that are known to be valid
pub fn nutrition(calories: f64, protein_g: f64, carbs_g: f64, fat_g: f64) -> NutritionValues {
    NutritionValues::new(calories, protein_g, carbs_g, fat_g).unwrap()
}

/// A recipe with one category tag
pub fn recipe(id: &str, name: &str, category: &str, calories: f64) -> CandidateItem {
    CandidateItem::recipe(id, name, nutrition(calories, 20.0, 40.0, 10.0)).with_category(category)
}

/// Recipes for every slot category plus grain, dairy and protein ingredients
pub fn sample_items() -> Vec<CandidateItem> {
    vec![
        // Breakfast
        CandidateItem::recipe("oat-porridge", "Oat porridge", nutrition(350.0, 12.0, 55.0, 9.0))
            .with_category("breakfast")
            .with_dietary_tag(DietaryFilter::Vegetarian),
        CandidateItem::recipe("veggie-omelette", "Veggie omelette", nutrition(300.0, 20.0, 6.0, 21.0))
            .with_category("breakfast")
            .with_dietary_tag(DietaryFilter::Vegetarian)
            .with_dietary_tag(DietaryFilter::GlutenFree),
        // Lunch (dinner slots draw from these too)
        CandidateItem::recipe("chicken-rice-bowl", "Chicken rice bowl", nutrition(600.0, 45.0, 70.0, 14.0))
            .with_category("lunch")
            .with_dietary_tag(DietaryFilter::GlutenFree)
            .with_dietary_tag(DietaryFilter::DairyFree),
        CandidateItem::recipe("lentil-curry", "Lentil curry", nutrition(500.0, 24.0, 70.0, 13.0))
            .with_category("lunch")
            .with_dietary_tag(DietaryFilter::Vegan)
            .with_dietary_tag(DietaryFilter::Vegetarian)
            .with_dietary_tag(DietaryFilter::GlutenFree)
            .with_dietary_tag(DietaryFilter::DairyFree),
        CandidateItem::recipe("beef-lasagna", "Beef lasagna", nutrition(800.0, 42.0, 70.0, 38.0))
            .with_category("lunch"),
        // Snacks and desserts
        CandidateItem::recipe("greek-yogurt-bowl", "Greek yogurt bowl", nutrition(200.0, 17.0, 20.0, 6.0))
            .with_category("snack")
            .with_dietary_tag(DietaryFilter::Vegetarian)
            .with_dietary_tag(DietaryFilter::GlutenFree),
        CandidateItem::recipe("apple-almonds", "Apple with almonds", nutrition(180.0, 5.0, 22.0, 9.0))
            .with_category("snack")
            .with_dietary_tag(DietaryFilter::Vegan)
            .with_dietary_tag(DietaryFilter::Vegetarian),
        CandidateItem::recipe("chocolate-mousse", "Chocolate mousse", nutrition(250.0, 5.0, 25.0, 15.0))
            .with_category("dessert")
            .with_dietary_tag(DietaryFilter::Vegetarian),
        // Grain ingredients, per 100 g
        CandidateItem::ingredient("rice-white", "White rice", nutrition(130.0, 2.7, 28.0, 0.3), 100.0, ServingUnit::Grams)
            .with_food_group("grains")
            .with_subgroup("rice"),
        CandidateItem::ingredient("rice-brown", "Brown rice", nutrition(112.0, 2.6, 23.0, 0.9), 100.0, ServingUnit::Grams)
            .with_food_group("grains")
            .with_subgroup("rice"),
        CandidateItem::ingredient("quinoa", "Quinoa", nutrition(120.0, 4.4, 21.3, 1.9), 100.0, ServingUnit::Grams)
            .with_food_group("grains")
            .with_subgroup("seeds"),
        CandidateItem::ingredient("bulgur", "Bulgur", nutrition(83.0, 3.1, 18.6, 0.2), 100.0, ServingUnit::Grams)
            .with_food_group("grains")
            .with_subgroup("wheat"),
        // Other groups
        CandidateItem::ingredient("egg", "Egg", nutrition(78.0, 6.3, 0.6, 5.3), 1.0, ServingUnit::Pieces)
            .with_food_group("protein"),
        CandidateItem::ingredient("milk", "Milk", nutrition(62.0, 3.3, 4.8, 3.3), 100.0, ServingUnit::Milliliters)
            .with_food_group("dairy"),
        CandidateItem::ingredient("salt", "Salt", nutrition(0.0, 0.0, 0.0, 0.0), 1.0, ServingUnit::Grams),
    ]
}

/// The sample items as an in-memory catalog
pub fn sample_catalog() -> InMemoryCatalog {
    InMemoryCatalog::new(sample_items()).unwrap()
}

/// A fixed user and date
pub fn plan_key() -> PlanKey {
    PlanKey::new(
        Uuid::from_u128(0x5eed_0000_0000_0000_0000_0000_0000_0001),
        NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
    )
}

/// A plan entry that is known to be valid
pub fn entry(item_id: &str, servings: f64) -> PlanEntry {
    PlanEntry::new(item_id, servings).unwrap()
}

/// Plan slots from `(slot, item_id, servings)` rows
pub fn plan_slots(rows: &[(&str, &str, f64)]) -> PlanSlots {
    let mut slots = PlanSlots::new();
    for (slot, item_id, servings) in rows {
        slots
            .entry((*slot).to_owned())
            .or_default()
            .push(entry(item_id, *servings));
    }
    slots
}
