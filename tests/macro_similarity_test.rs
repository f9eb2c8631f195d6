// ABOUTME: Integration tests for macro profiles and the macro similarity score
// ABOUTME: Covers identity, symmetry, quality tiers and weight handling over catalog items
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod helpers;

use helpers::fixtures::{nutrition, sample_items};
use pierre_meals::config::{SimilarityConfig, SimilarityWeights};
use pierre_meals::intelligence::{quality_tier, similarity, to_macro_profile, SwapQuality};
use pierre_meals::models::MacroProfile;

// ============================================================================
// Macro Profile Tests
// ============================================================================

#[test]
fn test_profile_of_catalog_rice() {
    // 2.7 g protein, 28 g carbs, 0.3 g fat in 130 kcal
    let profile = to_macro_profile(&nutrition(130.0, 2.7, 28.0, 0.3));
    assert_eq!(profile, MacroProfile::new(8, 86, 2));
}

#[test]
fn test_profile_percentages_stay_in_range() {
    // Stated calories lower than the macros imply
    let profile = to_macro_profile(&nutrition(100.0, 40.0, 10.0, 5.0));
    assert_eq!(profile.protein_pct, 100);
    assert_eq!(profile.carbs_pct, 40);
    assert_eq!(profile.fat_pct, 45);

    for item in sample_items() {
        let profile = to_macro_profile(&item.nutrition);
        assert!(profile.protein_pct <= 100, "{}", item.id);
        assert!(profile.carbs_pct <= 100, "{}", item.id);
        assert!(profile.fat_pct <= 100, "{}", item.id);
    }
}

#[test]
fn test_zero_calorie_item_has_zero_profile() {
    let salt = sample_items()
        .into_iter()
        .find(|item| item.id == "salt")
        .unwrap();
    assert_eq!(to_macro_profile(&salt.nutrition), MacroProfile::zero());
}

// ============================================================================
// Similarity Score Tests
// ============================================================================

#[test]
fn test_every_item_is_identical_to_itself() {
    let config = SimilarityConfig::default();
    for item in sample_items() {
        let profile = to_macro_profile(&item.nutrition);
        assert_eq!(similarity(&profile, &profile, &config), 100, "{}", item.id);
    }
}

#[test]
fn test_score_is_symmetric_across_catalog() {
    let config = SimilarityConfig::default();
    let profiles: Vec<_> = sample_items()
        .iter()
        .map(|item| (item.id.clone(), to_macro_profile(&item.nutrition)))
        .collect();

    for (id_a, a) in &profiles {
        for (id_b, b) in &profiles {
            let forward = similarity(a, b, &config);
            assert_eq!(forward, similarity(b, a, &config), "{id_a} vs {id_b}");
            assert!(forward <= 100);
        }
    }
}

#[test]
fn test_default_weighting() {
    let config = SimilarityConfig::default();
    let a = MacroProfile::new(30, 40, 30);
    let b = MacroProfile::new(20, 50, 30);
    // 85 * 0.5 + 85 * 0.3 + 100 * 0.2
    assert_eq!(similarity(&a, &b, &config), 88);
}

#[test]
fn test_white_and_brown_rice_are_excellent_swaps() {
    let config = SimilarityConfig::default();
    let white = to_macro_profile(&nutrition(130.0, 2.7, 28.0, 0.3));
    let brown = to_macro_profile(&nutrition(112.0, 2.6, 23.0, 0.9));
    let score = similarity(&white, &brown, &config);
    assert_eq!(score, 96);
    assert_eq!(quality_tier(score), SwapQuality::Excellent);
}

#[test]
fn test_opposite_profiles_floor_at_zero_per_macro() {
    let config = SimilarityConfig::default();
    let protein_only = MacroProfile::new(100, 0, 0);
    let carbs_only = MacroProfile::new(0, 100, 0);
    // Only the fat component (weight 0.2) still agrees
    let score = similarity(&protein_only, &carbs_only, &config);
    assert_eq!(score, 20);
    assert_eq!(quality_tier(score), SwapQuality::Poor);
}

#[test]
fn test_weights_are_normalized_by_their_sum() {
    let config = SimilarityConfig {
        weights: SimilarityWeights::new(1.0, 1.0, 1.0),
        ..SimilarityConfig::default()
    };
    let a = MacroProfile::new(30, 40, 30);
    let b = MacroProfile::new(20, 50, 30);
    assert_eq!(similarity(&a, &b, &config), 90);
}

#[test]
fn test_unusable_weights_fall_back_to_defaults() {
    let a = MacroProfile::new(30, 40, 30);
    let b = MacroProfile::new(20, 50, 30);
    for weights in [
        SimilarityWeights::new(0.0, 0.0, 0.0),
        SimilarityWeights::new(-1.0, 1.0, 1.0),
        SimilarityWeights::new(f64::NAN, 0.3, 0.2),
    ] {
        let config = SimilarityConfig {
            weights,
            ..SimilarityConfig::default()
        };
        assert_eq!(similarity(&a, &b, &config), 88, "{weights:?}");
    }
}

// ============================================================================
// Quality Tier Tests
// ============================================================================

#[test]
fn test_quality_tier_boundaries() {
    let cases = [
        (0, SwapQuality::Poor),
        (39, SwapQuality::Poor),
        (40, SwapQuality::Acceptable),
        (59, SwapQuality::Acceptable),
        (60, SwapQuality::Good),
        (79, SwapQuality::Good),
        (80, SwapQuality::Excellent),
        (100, SwapQuality::Excellent),
    ];
    for (score, expected) in cases {
        assert_eq!(quality_tier(score), expected, "score {score}");
    }
}

#[test]
fn test_quality_tier_serializes_snake_case() {
    let json = serde_json::to_string(&SwapQuality::Acceptable).unwrap();
    assert_eq!(json, "\"acceptable\"");
    assert_eq!(SwapQuality::Excellent.to_string(), "excellent");
}
