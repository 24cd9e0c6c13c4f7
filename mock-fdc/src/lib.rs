use std::{sync::Arc, time::Duration};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::net::TcpListener;

pub const PEANUT_BUTTER_UPC: &str = "051500255162";
pub const SPARKLING_WATER_UPC: &str = "012000161155";
pub const WHOLE_MILK_UPC: &str = "070852993201";
pub const SNACK_MIX_UPC: &str = "099999000001";

/// Search-hit view of a food, as `/foods/search` lists it.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodSummary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fdc_id: Option<u64>,
    pub description: String,
    pub data_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gtin_upc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branded_food_category: Option<String>,
}

#[derive(Clone, Debug)]
struct Fixture {
    summary: FoodSummary,
    detail: Option<Value>,
}

/// In-memory stand-in for the provider's food database.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    foods: Vec<Fixture>,
    latency: Duration,
    detail_latency: Duration,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_food(mut self, summary: FoodSummary, detail: Value) -> Self {
        self.foods.push(Fixture {
            summary,
            detail: Some(detail),
        });
        self
    }

    /// A search hit whose detail record answers 404.
    pub fn with_listing(mut self, summary: FoodSummary) -> Self {
        self.foods.push(Fixture {
            summary,
            detail: None,
        });
        self
    }

    /// Delay every response by `latency`.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Delay only `/food/{fdcId}` responses, on top of `with_latency`.
    pub fn with_detail_latency(mut self, latency: Duration) -> Self {
        self.detail_latency = latency;
        self
    }

    /// A handful of branded and SR Legacy foods covering the lookup paths.
    pub fn sample() -> Self {
        Self::new()
            .with_food(
                branded(2001, "Crunchy Peanut Butter", PEANUT_BUTTER_UPC, "Nut & Seed Butters"),
                json!({
                    "fdcId": 2001,
                    "description": "Crunchy Peanut Butter",
                    "dataType": "Branded",
                    "servingSize": 32.0,
                    "servingSizeUnit": "g",
                    "householdServingFullText": "2 Tbsp",
                    "foodNutrients": [
                        nutrient(1008, "Energy", "kcal", 588.0),
                        nutrient(1003, "Protein", "g", 25.0),
                        nutrient(1004, "Total lipid (fat)", "g", 50.0),
                        nutrient(1005, "Carbohydrate, by difference", "g", 20.0),
                        nutrient(1093, "Sodium, Na", "mg", 459.0),
                    ],
                }),
            )
            .with_food(
                branded(2002, "Sparkling Water, Lime", SPARKLING_WATER_UPC, ""),
                json!({
                    "fdcId": 2002,
                    "description": "Sparkling Water, Lime",
                    "dataType": "Branded",
                    "foodNutrients": [nutrient(1008, "Energy", "kcal", 0.0)],
                }),
            )
            .with_food(
                branded(2003, "Whole Milk", WHOLE_MILK_UPC, "Milk"),
                json!({
                    "fdcId": 2003,
                    "description": "Whole Milk",
                    "dataType": "Branded",
                    "servingSize": 240.0,
                    "servingSizeUnit": "ml",
                    "foodNutrients": [
                        nutrient(1008, "Energy", "kcal", 61.0),
                        nutrient(1003, "Protein", "g", 3.28),
                        nutrient(1004, "Total lipid (fat)", "g", 3.2),
                        nutrient(1005, "Carbohydrate, by difference", "g", 4.8),
                    ],
                }),
            )
            .with_food(
                branded(2004, "Mystery Snack Mix", SNACK_MIX_UPC, "Snacks"),
                json!({
                    "fdcId": 2004,
                    "description": "Mystery Snack Mix",
                    "dataType": "Branded",
                }),
            )
            .with_food(
                branded(2005, "Trail Mix", SNACK_MIX_UPC, "Snacks"),
                json!({
                    "fdcId": 2005,
                    "description": "Trail Mix",
                    "dataType": "Branded",
                    "servingSize": "30",
                    "servingSizeUnit": "G",
                    "householdServingFullText": "1/4 cup",
                    "foodNutrients": [
                        nutrient(1008, "Energy", "kcal", 467.0),
                        nutrient(1003, "Protein", "g", 13.3),
                        nutrient(1004, "Total lipid (fat)", "g", 30.0),
                        nutrient(1005, "Carbohydrate, by difference", "g", 43.3),
                    ],
                }),
            )
            .with_food(
                FoodSummary {
                    fdc_id: Some(171688),
                    description: "Apples, raw, with skin".to_string(),
                    data_type: "SR Legacy".to_string(),
                    gtin_upc: None,
                    branded_food_category: None,
                },
                json!({
                    "fdcId": 171688,
                    "description": "Apples, raw, with skin",
                    "dataType": "SR Legacy",
                    "foodNutrients": [
                        nutrient(1003, "Protein", "g", 0.26),
                        nutrient(1004, "Total lipid (fat)", "g", 0.17),
                        nutrient(1005, "Carbohydrate, by difference", "g", 13.81),
                        nutrient(1008, "Energy", "kcal", 52.0),
                    ],
                }),
            )
    }

    fn search(&self, query: &str, data_types: &[&str], page_size: usize) -> Vec<FoodSummary> {
        let needle = query.to_lowercase();
        self.foods
            .iter()
            .map(|f| &f.summary)
            .filter(|s| data_types.is_empty() || data_types.contains(&s.data_type.as_str()))
            .filter(|s| {
                s.description.to_lowercase().contains(&needle)
                    || s.gtin_upc.as_deref().is_some_and(|upc| upc.contains(query))
            })
            .take(page_size)
            .cloned()
            .collect()
    }

    fn detail(&self, fdc_id: u64) -> Option<&Value> {
        self.foods
            .iter()
            .find(|f| f.summary.fdc_id == Some(fdc_id))
            .and_then(|f| f.detail.as_ref())
    }
}

/// Summary of a branded product.
pub fn branded(fdc_id: u64, description: &str, upc: &str, category: &str) -> FoodSummary {
    FoodSummary {
        fdc_id: Some(fdc_id),
        description: description.to_string(),
        data_type: "Branded".to_string(),
        gtin_upc: Some(upc.to_string()),
        branded_food_category: Some(category.to_string()),
    }
}

fn nutrient(id: u32, name: &str, unit: &str, amount: f64) -> Value {
    json!({
        "type": "FoodNutrient",
        "nutrient": { "id": id, "name": name, "unitName": unit },
        "amount": amount,
    })
}

pub type Db = Arc<Catalog>;

/// Query pairs kept as a list so repeated `dataType` keys survive.
type Params = Vec<(String, String)>;

type ApiResult = Result<Json<Value>, (StatusCode, Json<Value>)>;

pub fn app() -> Router {
    app_with(Catalog::sample())
}

pub fn app_with(catalog: Catalog) -> Router {
    Router::new()
        .route("/foods/search", get(search_foods))
        .route("/food/{fdc_id}", get(get_food))
        .with_state(Arc::new(catalog))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_with(listener, Catalog::sample()).await
}

pub async fn run_with(listener: TcpListener, catalog: Catalog) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(catalog)).await
}

fn param<'a>(params: &'a Params, key: &str) -> Option<&'a str> {
    params
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

fn require_api_key(params: &Params) -> Result<(), (StatusCode, Json<Value>)> {
    match param(params, "api_key") {
        Some(key) if !key.is_empty() => Ok(()),
        _ => Err((
            StatusCode::FORBIDDEN,
            Json(json!({
                "error": {
                    "code": "API_KEY_MISSING",
                    "message": "No api_key was supplied. Get one at https://api.data.gov:443"
                }
            })),
        )),
    }
}

async fn search_foods(State(db): State<Db>, Query(params): Query<Params>) -> ApiResult {
    tokio::time::sleep(db.latency).await;
    require_api_key(&params)?;

    let query = param(&params, "query").unwrap_or_default();
    let data_types: Vec<&str> = params
        .iter()
        .filter(|(k, _)| k == "dataType")
        .map(|(_, v)| v.as_str())
        .collect();
    let page_size = param(&params, "pageSize")
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(50)
        .clamp(1, 200);

    let foods = db.search(query, &data_types, page_size);
    Ok(Json(json!({
        "totalHits": foods.len(),
        "currentPage": 1,
        "foods": foods,
    })))
}

async fn get_food(
    State(db): State<Db>,
    Path(fdc_id): Path<u64>,
    Query(params): Query<Params>,
) -> ApiResult {
    tokio::time::sleep(db.latency + db.detail_latency).await;
    require_api_key(&params)?;

    db.detail(fdc_id).cloned().map(Json).ok_or_else(|| {
        (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": format!("food {fdc_id} not found") })),
        )
    })
}
