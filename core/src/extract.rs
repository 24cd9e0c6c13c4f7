//! Pulls the four tracked macros out of an FDC detail record.
//!
//! # Design
//! Nutrients are matched by the provider's stable numeric ids through a
//! static table, so tracking another nutrient is one more row. The list is
//! scanned once and a repeated id overwrites the earlier value.

use serde_json::Value;

use crate::types::{FoodRecord, NutritionInfo};

pub const DEFAULT_SERVING_SIZE_G: f64 = 100.0;
pub const DEFAULT_SERVING_TEXT: &str = "None specified";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Macro {
    Calories,
    Protein,
    Carbs,
    Fat,
}

/// FDC nutrient id -> field.
const TRACKED_NUTRIENTS: [(u32, Macro); 4] = [
    (1008, Macro::Calories),
    (1003, Macro::Protein),
    (1004, Macro::Fat),
    (1005, Macro::Carbs),
];

fn tracked(id: u32) -> Option<Macro> {
    TRACKED_NUTRIENTS
        .iter()
        .find(|(known, _)| *known == id)
        .map(|(_, field)| *field)
}

/// Extract nutrition facts from a detail record.
///
/// Returns `None` when there is no record or the record has no
/// `foodNutrients` list. Nutrients that never appear stay at zero.
pub fn extract_nutrition(record: Option<&FoodRecord>) -> Option<NutritionInfo> {
    let record = record?;
    let entries = record.food_nutrients.as_ref()?;

    let mut info = NutritionInfo {
        calories_kcal: 0.0,
        protein_g: 0.0,
        carbs_g: 0.0,
        fat_g: 0.0,
        serving_size_g: serving_size_g(record),
        allergens: record
            .household_serving_full_text
            .clone()
            .unwrap_or_else(|| DEFAULT_SERVING_TEXT.to_string()),
    };

    for entry in entries {
        let Some(id) = entry.nutrient.as_ref().and_then(|n| n.id) else {
            continue;
        };
        let amount = entry.amount.unwrap_or(0.0);
        match tracked(id) {
            Some(Macro::Calories) => info.calories_kcal = amount,
            Some(Macro::Protein) => info.protein_g = amount,
            Some(Macro::Carbs) => info.carbs_g = amount,
            Some(Macro::Fat) => info.fat_g = amount,
            None => {}
        }
    }

    Some(info)
}

/// The record's serving size when it is expressed in grams, else 100 g.
fn serving_size_g(record: &FoodRecord) -> f64 {
    let in_grams = record
        .serving_size_unit
        .as_deref()
        .is_some_and(|unit| unit.eq_ignore_ascii_case("g"));
    if !in_grams {
        return DEFAULT_SERVING_SIZE_G;
    }
    record
        .serving_size
        .as_ref()
        .and_then(coerce_f64)
        .unwrap_or(DEFAULT_SERVING_SIZE_G)
}

/// Read a JSON number, or a string holding a decimal number.
pub fn coerce_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
