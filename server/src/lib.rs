//! HTTP front end for nutrition lookups.
//!
//! # Routes
//! - `GET /` static landing page
//! - `GET /api/product/{barcode}` nutrition facts by barcode
//! - `GET /api/search_food?q=` nutrition facts by food name
//! - `POST /api/scale_nutrition` rescale a macro set to another weight

pub mod config;
pub mod error;
pub mod service;
pub mod transport;

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    response::Html,
    routing::{get, post},
    Json, Router,
};
use nutrition_core::{MacroNutrients, NutritionInfo, ScaleRequest};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

pub use config::{Cli, Config};
pub use error::{AppError, ErrorBody, UpstreamError};
pub use service::NutritionService;

const INDEX_HTML: &str = include_str!("../static/index.html");

pub type AppState = Arc<NutritionService>;

pub fn app(service: NutritionService) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/product/{barcode}", get(product_by_barcode))
        .route("/api/search_food", get(search_food))
        .route("/api/scale_nutrition", post(scale_nutrition))
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(service))
}

pub async fn run(listener: TcpListener, service: NutritionService) -> Result<(), std::io::Error> {
    axum::serve(listener, app(service)).await
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn product_by_barcode(
    State(service): State<AppState>,
    Path(barcode): Path<String>,
) -> Result<Json<NutritionInfo>, AppError> {
    service.lookup_barcode(&barcode).await.map(Json)
}

/// Query pairs kept as a list; a repeated key never fails extraction.
type QueryPairs = Vec<(String, String)>;

/// The first non-empty `q` in the query string.
fn label_param(params: &QueryPairs) -> Option<&str> {
    params
        .iter()
        .find(|(k, _)| k == "q")
        .map(|(_, v)| v.as_str())
        .filter(|q| !q.is_empty())
}

async fn search_food(
    State(service): State<AppState>,
    Query(params): Query<QueryPairs>,
) -> Result<Json<NutritionInfo>, AppError> {
    let label = label_param(&params)
        .ok_or_else(|| AppError::InvalidInput("Query parameter 'q' is required.".to_string()))?;
    service.lookup_label(label).await.map(Json)
}

/// The body is read raw so every malformed payload gets the same 400.
async fn scale_nutrition(body: Bytes) -> Result<Json<MacroNutrients>, AppError> {
    let request = ScaleRequest::from_json(&body)?;
    Ok(Json(request.scale()))
}
