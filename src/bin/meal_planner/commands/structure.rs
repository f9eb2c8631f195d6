// ABOUTME: Meal structure commands for the meal-planner CLI
// ABOUTME: Lists templates and builds calorie-stamped structures from them
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::print_json;
use pierre_meals::{
    config::EngineConfig,
    errors::AppResult,
    intelligence::{build_from_template, templates as builtin_templates, validate},
};
use serde_json::json;

/// Print every built-in template with its slots
pub fn templates() -> AppResult<()> {
    let listing: Vec<_> = builtin_templates()
        .iter()
        .map(|template| {
            json!({
                "id": template.id,
                "description": template.description,
                "mode": template.mode,
                "slots": template
                    .slots
                    .iter()
                    .map(|(name, label, percentage)| json!({
                        "name": name,
                        "label": label,
                        "percentage": percentage,
                    }))
                    .collect::<Vec<_>>(),
            })
        })
        .collect();
    print_json(&listing)
}

/// Build a structure and print it with its validation report
pub fn build(config: &EngineConfig, template_id: &str, daily_calories: f64) -> AppResult<()> {
    let structure = build_from_template(template_id, daily_calories)?;
    let report = validate(&structure, &config.structure);
    print_json(&json!({
        "template": template_id,
        "daily_calories": daily_calories,
        "structure": structure,
        "total_target_calories": structure.total_target_calories(),
        "validation": report,
    }))
}
