//! Verify extraction and scaling against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector file lists inputs and expected outcomes. Comparing parsed
//! values (not raw strings) avoids false negatives from field ordering.

use nutrition_core::{extract_nutrition, FoodRecord, MacroNutrients, NutritionInfo, ScaleRequest};

fn assert_close(actual: f64, expected: f64, what: &str) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "{what}: expected {expected}, got {actual}"
    );
}

// ---------------------------------------------------------------------------
// Extraction
// ---------------------------------------------------------------------------

#[test]
fn extract_test_vectors() {
    let raw = include_str!("../../test-vectors/extract.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let record: Option<FoodRecord> = serde_json::from_value(case["record"].clone()).unwrap();
        let expected: Option<NutritionInfo> =
            serde_json::from_value(case["expected"].clone()).unwrap();

        let actual = extract_nutrition(record.as_ref());
        assert_eq!(actual, expected, "{name}");
    }
}

// ---------------------------------------------------------------------------
// Scaling
// ---------------------------------------------------------------------------

#[test]
fn scale_test_vectors() {
    let raw = include_str!("../../test-vectors/scale.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let body = serde_json::to_vec(&case["body"]).unwrap();
        let result = ScaleRequest::from_json(&body);

        match case.get("error").and_then(|e| e.as_str()) {
            Some(message) => {
                let err = result.expect_err(name);
                assert_eq!(err.to_string(), message, "{name}");
            }
            None => {
                let expected: MacroNutrients =
                    serde_json::from_value(case["expected"].clone()).unwrap();
                let scaled = result.unwrap().scale();
                assert_close(scaled.calories, expected.calories, &format!("{name}: calories"));
                assert_close(scaled.protein, expected.protein, &format!("{name}: protein"));
                assert_close(scaled.carbs, expected.carbs, &format!("{name}: carbs"));
                assert_close(scaled.fat, expected.fat, &format!("{name}: fat"));
            }
        }
    }
}
