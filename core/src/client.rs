//! Stateless HTTP request builder and response parser for FoodData Central.
//!
//! # Design
//! `FdcClient` holds only its immutable configuration and carries no mutable
//! state between calls. Each provider call is split into a `build_*` method
//! that produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. The caller executes the actual HTTP round-trip.
//!
//! The search request carries a timeout and the detail request does not.
//! Both can be overridden with the `with_*_timeout` builders.

use std::fmt;
use std::time::Duration;

use crate::error::FdcError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{FoodCandidate, FoodRecord, FoodSearchResponse};

pub const DEFAULT_BASE_URL: &str = "https://api.nal.usda.gov/fdc/v1";
pub const DEFAULT_SEARCH_TIMEOUT: Duration = Duration::from_secs(10);

pub const BRANDED: &str = "Branded";
pub const SR_LEGACY: &str = "SR Legacy";

/// Stateless client for the FoodData Central API.
#[derive(Clone)]
pub struct FdcClient {
    base_url: String,
    api_key: String,
    search_timeout: Option<Duration>,
    detail_timeout: Option<Duration>,
}

impl FdcClient {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            search_timeout: Some(DEFAULT_SEARCH_TIMEOUT),
            detail_timeout: None,
        }
    }

    pub fn with_search_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.search_timeout = timeout;
        self
    }

    pub fn with_detail_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.detail_timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Search restricted to branded products, matching the barcode as text.
    pub fn build_barcode_search(&self, barcode: &str) -> HttpRequest {
        self.build_search(barcode, &[BRANDED], None)
    }

    /// Search branded and SR Legacy foods by name, keeping only the top hit.
    pub fn build_label_search(&self, label: &str) -> HttpRequest {
        self.build_search(label, &[BRANDED, SR_LEGACY], Some(1))
    }

    pub fn build_food_details(&self, fdc_id: u64) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: format!("{}/food/{fdc_id}", self.base_url),
            query: vec![("api_key".to_string(), self.api_key.clone())],
            headers: accept_json(),
            timeout: self.detail_timeout,
        }
    }

    fn build_search(&self, query: &str, data_types: &[&str], page_size: Option<u32>) -> HttpRequest {
        let mut params = vec![
            ("api_key".to_string(), self.api_key.clone()),
            ("query".to_string(), query.to_string()),
        ];
        params.extend(
            data_types
                .iter()
                .map(|data_type| ("dataType".to_string(), data_type.to_string())),
        );
        if let Some(size) = page_size {
            params.push(("pageSize".to_string(), size.to_string()));
        }
        HttpRequest {
            method: HttpMethod::Get,
            url: format!("{}/foods/search", self.base_url),
            query: params,
            headers: accept_json(),
            timeout: self.search_timeout,
        }
    }

    /// Candidates in provider order. A missing `foods` list is an empty result.
    pub fn parse_search(&self, response: HttpResponse) -> Result<Vec<FoodCandidate>, FdcError> {
        check_status(&response)?;
        let parsed: FoodSearchResponse = serde_json::from_str(&response.body)
            .map_err(|e| FdcError::DeserializationError(e.to_string()))?;
        Ok(parsed.foods.unwrap_or_default())
    }

    /// The detail record, or `None` when the provider answered `null`.
    pub fn parse_food_details(&self, response: HttpResponse) -> Result<Option<FoodRecord>, FdcError> {
        check_status(&response)?;
        serde_json::from_str(&response.body).map_err(|e| FdcError::DeserializationError(e.to_string()))
    }
}

impl fmt::Debug for FdcClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FdcClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("search_timeout", &self.search_timeout)
            .field("detail_timeout", &self.detail_timeout)
            .finish()
    }
}

fn accept_json() -> Vec<(String, String)> {
    vec![("accept".to_string(), "application/json".to_string())]
}

/// Map non-success status codes to `FdcError::HttpError`.
fn check_status(response: &HttpResponse) -> Result<(), FdcError> {
    if response.is_success() {
        return Ok(());
    }
    Err(FdcError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}
