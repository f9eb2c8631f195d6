// ABOUTME: Meal structure templates, validation, legacy normalization and calorie allocation
// ABOUTME: Builds named slot lists, checks percentage sums and fasting slot bounds per slot
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Meal Structure Validator/Builder
//!
//! A [`MealStructure`] is an ordered list of named slots, each holding a share
//! of the daily calorie budget. Structures are assignable once their
//! percentages sum to 100 within the configured tolerance; fasting
//! structures additionally keep every known slot inside its own band.
//!
//! Validation never raises: [`validate`] returns a [`StructureValidation`]
//! report listing every violation so a caller can point at the slot to fix.

use crate::config::StructureConfig;
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::HashSet;
use std::fmt;
use tracing::debug;

/// Whether a structure follows regular or fasting-day rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StructureMode {
    /// Regular day, only the percentage sum is checked
    #[default]
    Standard,
    /// Fasting day, known slots must also stay inside their bounds
    Fasting,
}

/// One named share of the daily calorie budget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealSlot {
    /// Unique key within the structure
    pub name: String,
    /// Display label
    #[serde(default)]
    pub label: String,
    /// Share of daily calories, 0 to 100
    pub percentage: f64,
    /// Derived calorie target, whole kcal
    #[serde(default)]
    pub target_calories: f64,
}

impl MealSlot {
    /// Create a slot with no calorie target yet
    #[must_use]
    pub fn new(name: impl Into<String>, label: impl Into<String>, percentage: f64) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            percentage,
            target_calories: 0.0,
        }
    }
}

/// Ordered list of meal slots
///
/// When deserialized without a `mode`, the mode is inferred from the slot
/// names: any slot with a fasting band makes the structure a fasting one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(from = "StoredMealStructure")]
pub struct MealStructure {
    /// Validation rules that apply
    pub mode: StructureMode,
    /// Slots in display order
    pub slots: Vec<MealSlot>,
}

#[derive(Deserialize)]
struct StoredMealStructure {
    #[serde(default)]
    mode: Option<StructureMode>,
    slots: Vec<MealSlot>,
}

impl From<StoredMealStructure> for MealStructure {
    fn from(stored: StoredMealStructure) -> Self {
        let mode = stored
            .mode
            .unwrap_or_else(|| StructureMode::infer(&stored.slots));
        Self {
            mode,
            slots: stored.slots,
        }
    }
}

impl StructureMode {
    /// Fasting when any slot name carries a fasting band, standard otherwise
    #[must_use]
    pub fn infer(slots: &[MealSlot]) -> Self {
        if slots
            .iter()
            .any(|slot| fasting_slot_bounds(&slot.name).is_some())
        {
            Self::Fasting
        } else {
            Self::Standard
        }
    }
}

impl MealStructure {
    /// Create a structure
    #[must_use]
    pub const fn new(mode: StructureMode, slots: Vec<MealSlot>) -> Self {
        Self { mode, slots }
    }

    /// Sum of all slot percentages
    #[must_use]
    pub fn total_percentage(&self) -> f64 {
        self.slots.iter().map(|slot| slot.percentage).sum()
    }

    /// Sum of all slot targets
    #[must_use]
    pub fn total_target_calories(&self) -> f64 {
        self.slots.iter().map(|slot| slot.target_calories).sum()
    }

    /// Find a slot by name
    #[must_use]
    pub fn slot(&self, name: &str) -> Option<&MealSlot> {
        let wanted = canonical_slot_name(name);
        self.slots
            .iter()
            .find(|slot| canonical_slot_name(&slot.name) == wanted)
    }
}

/// Lowercase a slot name and join words with underscores
///
/// `"Pre-Dawn"`, `"pre dawn"` and `"pre_dawn"` all map to `"pre_dawn"`.
#[must_use]
pub fn canonical_slot_name(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .chars()
        .map(|c| if c == '-' || c.is_whitespace() { '_' } else { c })
        .collect()
}

// ============================================================================
// Templates
// ============================================================================

/// A built-in structure with preset percentages
#[derive(Debug, Clone, Copy)]
pub struct MealTemplate {
    /// Template identifier
    pub id: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Validation rules for structures built from it
    pub mode: StructureMode,
    /// `(name, label, percentage)` per slot
    pub slots: &'static [(&'static str, &'static str, f64)],
}

const TEMPLATES: &[MealTemplate] = &[
    MealTemplate {
        id: "three_meals",
        description: "Breakfast, lunch and dinner",
        mode: StructureMode::Standard,
        slots: &[
            ("breakfast", "Breakfast", 25.0),
            ("lunch", "Lunch", 40.0),
            ("dinner", "Dinner", 35.0),
        ],
    },
    MealTemplate {
        id: "four_meals",
        description: "Three meals plus an afternoon snack",
        mode: StructureMode::Standard,
        slots: &[
            ("breakfast", "Breakfast", 25.0),
            ("lunch", "Lunch", 35.0),
            ("afternoon_snack", "Afternoon snack", 10.0),
            ("dinner", "Dinner", 30.0),
        ],
    },
    MealTemplate {
        id: "five_meals",
        description: "Three meals plus morning and afternoon snacks",
        mode: StructureMode::Standard,
        slots: &[
            ("breakfast", "Breakfast", 20.0),
            ("morning_snack", "Morning snack", 10.0),
            ("lunch", "Lunch", 30.0),
            ("afternoon_snack", "Afternoon snack", 10.0),
            ("dinner", "Dinner", 30.0),
        ],
    },
    MealTemplate {
        id: "fasting_three_meals",
        description: "Fasting day: break-fast, late snack and pre-dawn meal",
        mode: StructureMode::Fasting,
        slots: &[
            ("break_fast", "Break-fast", 40.0),
            ("late_snack", "Late snack", 20.0),
            ("pre_dawn", "Pre-dawn", 40.0),
        ],
    },
    MealTemplate {
        id: "fasting_five_meals",
        description: "Fasting day with pre-fast bite and supplemental meal",
        mode: StructureMode::Fasting,
        slots: &[
            ("pre_fast", "Pre-fast", 5.0),
            ("break_fast", "Break-fast", 30.0),
            ("supplemental_meal", "Supplemental meal", 25.0),
            ("late_snack", "Late snack", 15.0),
            ("pre_dawn", "Pre-dawn", 25.0),
        ],
    },
];

/// All built-in templates
#[must_use]
pub const fn templates() -> &'static [MealTemplate] {
    TEMPLATES
}

/// Look up a built-in template by id
///
/// Numbered ids such as `"3 meals"` resolve to their spelled-out template.
#[must_use]
pub fn find_template(template_id: &str) -> Option<&'static MealTemplate> {
    let wanted = canonical_slot_name(template_id);
    let wanted = match wanted.as_str() {
        "3_meals" => "three_meals",
        "4_meals" => "four_meals",
        "5_meals" => "five_meals",
        other => other,
    };
    TEMPLATES.iter().find(|template| template.id == wanted)
}

fn check_daily_calories(daily_calories: f64) -> AppResult<()> {
    if daily_calories.is_finite() && daily_calories >= 0.0 {
        Ok(())
    } else {
        Err(AppError::invalid_input(format!(
            "daily calories must be a finite, non-negative number, got {daily_calories}"
        )))
    }
}

/// Build a structure from a named template and stamp its calorie targets
///
/// # Errors
///
/// Returns `ResourceNotFound` for an unknown template id and `InvalidInput`
/// for a negative or non-finite budget
pub fn build_from_template(template_id: &str, daily_calories: f64) -> AppResult<MealStructure> {
    let template = find_template(template_id)
        .ok_or_else(|| AppError::not_found(format!("Meal template '{template_id}'")))?;
    check_daily_calories(daily_calories)?;

    let slots = template
        .slots
        .iter()
        .map(|(name, label, percentage)| MealSlot::new(*name, *label, *percentage))
        .collect();
    Ok(recalculate_targets(
        &MealStructure::new(template.mode, slots),
        daily_calories,
    ))
}

/// Re-derive every slot's calorie target without touching percentages
///
/// `target = round(daily_calories * percentage / 100)`. A negative or
/// non-finite budget yields zero targets.
#[must_use]
pub fn recalculate_targets(structure: &MealStructure, daily_calories: f64) -> MealStructure {
    let budget = if daily_calories.is_finite() {
        daily_calories.max(0.0)
    } else {
        0.0
    };
    let slots = structure
        .slots
        .iter()
        .map(|slot| MealSlot {
            target_calories: (budget * slot.percentage / 100.0).round(),
            ..slot.clone()
        })
        .collect();
    MealStructure::new(structure.mode, slots)
}

// ============================================================================
// Validation
// ============================================================================

/// Inclusive percentage band a fasting slot must stay within
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlotBounds {
    /// Lowest accepted percentage
    pub min: f64,
    /// Highest accepted percentage
    pub max: f64,
}

/// Bounds for a fasting slot, `None` for slots without a rule
#[must_use]
pub fn fasting_slot_bounds(slot_name: &str) -> Option<SlotBounds> {
    let (min, max) = match canonical_slot_name(slot_name).as_str() {
        "pre_fast" => (0.0, 10.0),
        "break_fast" => (25.0, 45.0),
        "late_snack" => (15.0, 20.0),
        "supplemental_meal" => (25.0, 30.0),
        "pre_dawn" => (25.0, 45.0),
        _ => return None,
    };
    Some(SlotBounds { min, max })
}

/// A single reason a structure is not assignable
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StructureViolation {
    /// The structure has no slots
    EmptyStructure,
    /// Percentages do not sum to 100 within tolerance
    TotalPercentage {
        /// Actual sum
        actual: f64,
        /// Allowed deviation from 100
        tolerance: f64,
    },
    /// A slot percentage is outside 0 to 100 or not a number
    PercentageOutOfRange {
        /// Slot name
        slot: String,
        /// Offending percentage
        actual: f64,
    },
    /// A fasting slot is outside its band
    SlotOutOfBounds {
        /// Slot name
        slot: String,
        /// Offending percentage
        actual: f64,
        /// Lowest accepted percentage
        min: f64,
        /// Highest accepted percentage
        max: f64,
    },
    /// Two slots share a name
    DuplicateSlotName {
        /// Repeated name
        slot: String,
    },
}

impl StructureViolation {
    /// Slot the violation refers to, if any
    #[must_use]
    pub fn slot(&self) -> Option<&str> {
        match self {
            Self::EmptyStructure | Self::TotalPercentage { .. } => None,
            Self::PercentageOutOfRange { slot, .. }
            | Self::SlotOutOfBounds { slot, .. }
            | Self::DuplicateSlotName { slot } => Some(slot),
        }
    }
}

impl fmt::Display for StructureViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyStructure => f.write_str("structure has no slots"),
            Self::TotalPercentage { actual, tolerance } => write!(
                f,
                "slot percentages sum to {actual}, expected 100 (tolerance {tolerance})"
            ),
            Self::PercentageOutOfRange { slot, actual } => {
                write!(f, "slot '{slot}' has percentage {actual}, expected 0-100")
            }
            Self::SlotOutOfBounds {
                slot,
                actual,
                min,
                max,
            } => write!(
                f,
                "slot '{slot}' has percentage {actual}, expected {min}-{max}"
            ),
            Self::DuplicateSlotName { slot } => write!(f, "slot name '{slot}' is used twice"),
        }
    }
}

/// Outcome of validating a structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructureValidation {
    /// Sum of slot percentages
    pub total_percentage: f64,
    /// Everything that is wrong, empty when valid
    pub violations: Vec<StructureViolation>,
}

impl StructureValidation {
    /// Whether the structure is assignable
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// Violations attached to one slot
    pub fn violations_for<'a>(
        &'a self,
        slot_name: &'a str,
    ) -> impl Iterator<Item = &'a StructureViolation> + 'a {
        self.violations
            .iter()
            .filter(move |violation| violation.slot() == Some(slot_name))
    }

    /// Convert into a result, carrying the violations as error details
    ///
    /// # Errors
    ///
    /// Returns `InvalidStructure` when any violation was found
    pub fn into_result(self) -> AppResult<()> {
        if self.is_valid() {
            return Ok(());
        }
        let summary = self
            .violations
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        Err(AppError::invalid_structure(summary).with_details(json!({
            "total_percentage": self.total_percentage,
            "violations": self.violations,
        })))
    }
}

/// Check a structure against the percentage-sum and per-slot rules
#[must_use]
pub fn validate(structure: &MealStructure, config: &StructureConfig) -> StructureValidation {
    let total_percentage = structure.total_percentage();
    let mut violations = Vec::new();

    if structure.slots.is_empty() {
        violations.push(StructureViolation::EmptyStructure);
    }

    let mut seen = HashSet::new();
    for slot in &structure.slots {
        if !seen.insert(canonical_slot_name(&slot.name)) {
            violations.push(StructureViolation::DuplicateSlotName {
                slot: slot.name.clone(),
            });
        }

        if !(0.0..=100.0).contains(&slot.percentage) {
            violations.push(StructureViolation::PercentageOutOfRange {
                slot: slot.name.clone(),
                actual: slot.percentage,
            });
            continue;
        }

        if structure.mode == StructureMode::Fasting {
            if let Some(bounds) = fasting_slot_bounds(&slot.name) {
                if !(bounds.min..=bounds.max).contains(&slot.percentage) {
                    violations.push(StructureViolation::SlotOutOfBounds {
                        slot: slot.name.clone(),
                        actual: slot.percentage,
                        min: bounds.min,
                        max: bounds.max,
                    });
                }
            }
        }
    }

    let sum_within_tolerance = (total_percentage - 100.0).abs() <= config.percentage_tolerance;
    if !structure.slots.is_empty() && !sum_within_tolerance {
        violations.push(StructureViolation::TotalPercentage {
            actual: total_percentage,
            tolerance: config.percentage_tolerance,
        });
    }

    debug!(
        slots = structure.slots.len(),
        total_percentage,
        violations = violations.len(),
        "Validated meal structure"
    );
    StructureValidation {
        total_percentage,
        violations,
    }
}

/// Convert a structure stored as fractions of 1 into percentages
///
/// When the percentages sum to at most the legacy threshold (1.5 by
/// default) every percentage is multiplied by 100; otherwise the structure
/// is returned unchanged. Must run before [`validate`].
///
/// # Errors
///
/// Returns `InvalidStructure` when a percentage is negative or not finite
pub fn normalize_legacy(
    structure: &MealStructure,
    config: &StructureConfig,
) -> AppResult<MealStructure> {
    if let Some(slot) = structure
        .slots
        .iter()
        .find(|slot| !slot.percentage.is_finite() || slot.percentage < 0.0)
    {
        return Err(AppError::invalid_structure(format!(
            "slot '{}' has percentage {} which cannot be normalized",
            slot.name, slot.percentage
        ))
        .with_details(json!({ "slot": slot.name })));
    }

    let total = structure.total_percentage();
    if structure.slots.is_empty() || total > config.legacy_fraction_threshold {
        return Ok(structure.clone());
    }

    debug!(total, "Normalizing legacy fractional meal structure");
    let slots = structure
        .slots
        .iter()
        .map(|slot| MealSlot {
            percentage: slot.percentage * 100.0,
            ..slot.clone()
        })
        .collect();
    Ok(MealStructure::new(structure.mode, slots))
}

/// Normalize, validate and stamp calorie targets in one step
///
/// # Errors
///
/// Returns `InvalidInput` for a bad budget and `InvalidStructure` when the
/// structure cannot be normalized or fails validation
pub fn prepare(
    structure: &MealStructure,
    daily_calories: f64,
    config: &StructureConfig,
) -> AppResult<MealStructure> {
    check_daily_calories(daily_calories)?;
    let normalized = normalize_legacy(structure, config)?;
    validate(&normalized, config).into_result()?;
    Ok(recalculate_targets(&normalized, daily_calories))
}
