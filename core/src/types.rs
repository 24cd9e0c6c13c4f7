//! Domain DTOs for the FoodData Central API and the service's own payloads.
//!
//! # Design
//! Provider documents are deserialized leniently: every field the service
//! does not strictly need is optional, and unknown fields are ignored. The
//! provider adds fields between releases and the service only reads a handful.
//! `servingSize` stays a raw JSON value because some records carry it as a
//! string; it is only coerced when the unit says grams.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of `GET /foods/search`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FoodSearchResponse {
    #[serde(default)]
    pub foods: Option<Vec<FoodCandidate>>,
}

/// One hit in a search response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodCandidate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fdc_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gtin_upc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branded_food_category: Option<String>,
}

impl FoodCandidate {
    /// True when the provider filed this hit under a non-empty branded category.
    pub fn is_branded(&self) -> bool {
        self.branded_food_category
            .as_deref()
            .is_some_and(|category| !category.is_empty())
    }
}

/// Body of `GET /food/{fdcId}`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodRecord {
    #[serde(default)]
    pub food_nutrients: Option<Vec<FoodNutrientEntry>>,
    #[serde(default)]
    pub serving_size: Option<Value>,
    #[serde(default)]
    pub serving_size_unit: Option<String>,
    #[serde(default)]
    pub household_serving_full_text: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FoodNutrientEntry {
    #[serde(default)]
    pub nutrient: Option<NutrientRef>,
    #[serde(default)]
    pub amount: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NutrientRef {
    #[serde(default)]
    pub id: Option<u32>,
}

/// Nutrition facts returned by both lookup endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionInfo {
    pub calories_kcal: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
    pub serving_size_g: f64,
    pub allergens: String,
}

/// The four macro values accepted and returned by the scale endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacroNutrients {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn candidate_reads_camel_case_fields() {
        let candidate: FoodCandidate = serde_json::from_str(
            r#"{"fdcId":2001,"description":"Peanut Butter","dataType":"Branded","brandedFoodCategory":"Nut & Seed Butters","score":812.4}"#,
        )
        .unwrap();
        assert_eq!(candidate.fdc_id, Some(2001));
        assert_eq!(candidate.data_type.as_deref(), Some("Branded"));
        assert!(candidate.is_branded());
    }

    #[test]
    fn empty_category_is_not_branded() {
        let candidate: FoodCandidate =
            serde_json::from_str(r#"{"fdcId":1,"brandedFoodCategory":""}"#).unwrap();
        assert!(!candidate.is_branded());

        let candidate: FoodCandidate = serde_json::from_str(r#"{"fdcId":1}"#).unwrap();
        assert!(!candidate.is_branded());
    }

    #[test]
    fn candidate_without_fdc_id_still_parses() {
        let candidate: FoodCandidate =
            serde_json::from_str(r#"{"description":"x","brandedFoodCategory":"Snacks"}"#).unwrap();
        assert!(candidate.fdc_id.is_none());
        assert!(candidate.is_branded());
    }

    #[test]
    fn search_response_tolerates_missing_and_null_foods() {
        let response: FoodSearchResponse = serde_json::from_str(r#"{"totalHits":0}"#).unwrap();
        assert!(response.foods.is_none());

        let response: FoodSearchResponse = serde_json::from_str(r#"{"foods":null}"#).unwrap();
        assert!(response.foods.is_none());
    }

    #[test]
    fn food_record_keeps_string_serving_size_raw() {
        let record: FoodRecord =
            serde_json::from_str(r#"{"servingSize":"30","servingSizeUnit":"g"}"#).unwrap();
        assert_eq!(record.serving_size, Some(Value::String("30".to_string())));
        assert!(record.food_nutrients.is_none());
    }

    #[test]
    fn macro_nutrients_accept_integers() {
        let macros: MacroNutrients =
            serde_json::from_str(r#"{"calories":100,"protein":10,"carbs":20.5,"fat":5}"#).unwrap();
        assert_eq!(macros.calories, 100.0);
        assert_eq!(macros.carbs, 20.5);
    }

    #[test]
    fn macro_nutrients_reject_missing_field() {
        let result: Result<MacroNutrients, _> =
            serde_json::from_str(r#"{"calories":100,"protein":10,"carbs":20}"#);
        assert!(result.is_err());
    }
}
