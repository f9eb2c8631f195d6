// ABOUTME: Integration tests for same-group swap suggestions
// ABOUTME: Covers group lookup, amount rounding, subgroup-first ordering and target resolution
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod helpers;

use helpers::doubles::UnavailableCatalog;
use helpers::fixtures::{nutrition, sample_catalog, sample_items};
use helpers::init_test_logging;
use pierre_meals::config::SimilarityConfig;
use pierre_meals::errors::ErrorCode;
use pierre_meals::intelligence::{
    resolve_target_calories, SwapOption, SwapQuality, SwapResolver, SwapTarget,
};
use pierre_meals::models::{CandidateItem, NutritionValues, ServingUnit};

fn item(id: &str) -> CandidateItem {
    sample_items()
        .into_iter()
        .find(|item| item.id == id)
        .unwrap()
}

fn ids(options: &[SwapOption]) -> Vec<&str> {
    options.iter().map(|o| o.item.id.as_str()).collect()
}

fn resolver() -> SwapResolver {
    SwapResolver::new(SimilarityConfig::default())
}

// ============================================================================
// Group Lookup Tests
// ============================================================================

#[tokio::test]
async fn test_grain_swaps_put_same_subgroup_first() {
    init_test_logging();
    let options = resolver()
        .find_swaps(&sample_catalog(), &item("rice-white"), None, 20)
        .await
        .unwrap();

    // Brown rice shares the "rice" subgroup; the rest follow by name
    assert_eq!(ids(&options), vec!["rice-brown", "bulgur", "quinoa"]);
    assert!(options[0].same_subgroup);
    assert!(options[1..].iter().all(|o| !o.same_subgroup));
}

#[tokio::test]
async fn test_swap_amounts_match_original_calories() {
    let options = resolver()
        .find_swaps(&sample_catalog(), &item("rice-white"), None, 20)
        .await
        .unwrap();

    let brown = &options[0];
    // 130 kcal / 1.12 kcal per g = 116 g, rounded to the 5 g step
    assert!((brown.suggested_amount - 115.0).abs() < 1e-9);
    assert!((brown.suggested_calories - 129.0).abs() < f64::EPSILON);
    assert!((brown.calorie_diff_percent - -0.9).abs() < 1e-9);
    assert_eq!(brown.macro_similarity_score, 96);
    assert_eq!(brown.swap_quality, SwapQuality::Excellent);

    let quinoa = &options[2];
    assert!((quinoa.suggested_amount - 110.0).abs() < 1e-9);
    assert!((quinoa.calorie_diff_percent - 1.5).abs() < 1e-9);
}

#[tokio::test]
async fn test_recipes_swap_within_shared_categories() {
    let options = resolver()
        .find_swaps(&sample_catalog(), &item("oat-porridge"), None, 20)
        .await
        .unwrap();

    assert_eq!(ids(&options), vec!["veggie-omelette"]);
    // 350 kcal of a 300 kcal serving, rounded to quarter servings
    assert!((options[0].suggested_amount - 1.25).abs() < 1e-9);
}

#[tokio::test]
async fn test_limit_applies_after_ordering() {
    let options = resolver()
        .find_swaps(&sample_catalog(), &item("rice-white"), None, 2)
        .await
        .unwrap();
    assert_eq!(ids(&options), vec!["rice-brown", "bulgur"]);
}

#[tokio::test]
async fn test_items_without_group_or_peers_have_no_swaps() {
    let catalog = sample_catalog();

    // No food group at all
    let none = resolver()
        .find_swaps(&catalog, &item("salt"), None, 20)
        .await
        .unwrap();
    assert!(none.is_empty());

    // Alone in its food group
    let alone = resolver()
        .find_swaps(&catalog, &item("egg"), None, 20)
        .await
        .unwrap();
    assert!(alone.is_empty());
}

// ============================================================================
// Ordering Tests
// ============================================================================

#[test]
fn test_subgroup_outranks_macro_similarity() {
    let original = CandidateItem::ingredient(
        "penne",
        "Penne",
        nutrition(158.0, 5.8, 30.9, 0.9),
        100.0,
        ServingUnit::Grams,
    )
    .with_food_group("grains")
    .with_subgroup("pasta");

    let candidates = vec![
        // Near-identical macros, different subgroup
        CandidateItem::ingredient(
            "couscous",
            "Couscous",
            nutrition(112.0, 3.8, 23.2, 0.2),
            100.0,
            ServingUnit::Grams,
        )
        .with_food_group("grains")
        .with_subgroup("wheat"),
        // Fatty filled pasta, same subgroup
        CandidateItem::ingredient(
            "tortellini",
            "Tortellini",
            nutrition(300.0, 12.0, 30.0, 15.0),
            100.0,
            ServingUnit::Grams,
        )
        .with_food_group("grains")
        .with_subgroup("pasta"),
    ];

    let options = resolver().rank_swaps(&original, candidates, 158.0, 20);
    assert_eq!(ids(&options), vec!["tortellini", "couscous"]);
    assert!(options[0].macro_similarity_score < options[1].macro_similarity_score);
}

#[test]
fn test_name_order_ignores_case() {
    let original = item("rice-white");
    let candidates = vec![
        item("quinoa"),
        CandidateItem::ingredient(
            "amaranth",
            "amaranth",
            nutrition(102.0, 3.8, 18.7, 1.6),
            100.0,
            ServingUnit::Grams,
        )
        .with_food_group("grains"),
        item("bulgur"),
    ];

    let options = resolver().rank_swaps(&original, candidates, 130.0, 20);
    assert_eq!(ids(&options), vec!["amaranth", "bulgur", "quinoa"]);
}

// ============================================================================
// Amount Rounding Tests
// ============================================================================

#[test]
fn test_amounts_never_round_to_zero() {
    let options = resolver().rank_swaps(&item("rice-white"), vec![item("rice-brown")], 1.0, 20);
    assert!((options[0].suggested_amount - 5.0).abs() < f64::EPSILON);
}

#[test]
fn test_piece_units_round_to_half_pieces() {
    let quail_egg = CandidateItem::ingredient(
        "quail-egg",
        "Quail egg",
        nutrition(14.0, 1.2, 0.04, 1.0),
        1.0,
        ServingUnit::Pieces,
    )
    .with_food_group("protein");

    let options = resolver().rank_swaps(&item("egg"), vec![quail_egg], 78.0, 20);
    // 78 / 14 = 5.57 pieces
    assert!((options[0].suggested_amount - 5.5).abs() < f64::EPSILON);
}

// ============================================================================
// Target Resolution Tests
// ============================================================================

#[tokio::test]
async fn test_amount_target_uses_original_density() {
    let options = resolver()
        .find_swaps(
            &sample_catalog(),
            &item("rice-white"),
            Some(SwapTarget::Amount(200.0)),
            1,
        )
        .await
        .unwrap();

    // 200 g white rice = 260 kcal, 232 g brown rice rounds to 230 g
    assert!((options[0].suggested_amount - 230.0).abs() < 1e-9);
}

#[test]
fn test_target_resolution() {
    let rice = item("rice-white");
    assert!((resolve_target_calories(&rice, None).unwrap() - 130.0).abs() < f64::EPSILON);
    assert!(
        (resolve_target_calories(&rice, Some(SwapTarget::Calories(65.0))).unwrap() - 65.0).abs()
            < f64::EPSILON
    );
    assert!(
        (resolve_target_calories(&rice, Some(SwapTarget::Amount(50.0))).unwrap() - 65.0).abs()
            < 1e-9
    );

    for bad in [
        SwapTarget::Calories(0.0),
        SwapTarget::Calories(f64::NAN),
        SwapTarget::Amount(-10.0),
    ] {
        let err = resolve_target_calories(&rice, Some(bad)).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidInput, "{bad:?}");
    }
}

#[tokio::test]
async fn test_zero_calorie_original_needs_explicit_target() {
    let water = CandidateItem::ingredient(
        "water",
        "Water",
        NutritionValues::zero(),
        100.0,
        ServingUnit::Milliliters,
    )
    .with_food_group("dairy");

    let err = resolver()
        .find_swaps(&sample_catalog(), &water, None, 20)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidInput);
    assert_eq!(err.resource_id.as_deref(), Some("water"));

    let options = resolver()
        .find_swaps(
            &sample_catalog(),
            &water,
            Some(SwapTarget::Calories(124.0)),
            20,
        )
        .await
        .unwrap();
    assert_eq!(ids(&options), vec!["milk"]);
    assert!((options[0].suggested_amount - 200.0).abs() < 1e-9);
}

#[test]
fn test_swap_target_wire_format() {
    let json = serde_json::to_value(SwapTarget::Amount(150.0)).unwrap();
    assert_eq!(json, serde_json::json!({"type": "amount", "value": 150.0}));
}

#[tokio::test]
async fn test_catalog_failure_propagates() {
    let err = resolver()
        .find_swaps(&UnavailableCatalog, &item("rice-white"), None, 20)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ExternalServiceError);
}
