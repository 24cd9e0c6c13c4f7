//! I/O-free core of the nutrition lookup service.
//!
//! # Overview
//! Builds `HttpRequest` values for the USDA FoodData Central API and parses
//! the `HttpResponse` values that come back, without touching the network
//! (host-does-IO pattern). Also holds the two pure transforms the service
//! exposes: nutrient extraction from a detail record, and serving-size
//! scaling.
//!
//! # Design
//! - `FdcClient` holds immutable configuration only (base URL, API key,
//!   timeouts).
//! - Each provider call is split into `build_*` and `parse_*` so the I/O
//!   boundary is explicit and every decision is unit-testable.
//! - Provider DTOs are lenient; the service reads only the fields it needs.

pub mod client;
pub mod error;
pub mod extract;
pub mod http;
pub mod scale;
pub mod types;

pub use client::FdcClient;
pub use error::{FdcError, ScaleError};
pub use extract::extract_nutrition;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use scale::ScaleRequest;
pub use types::{FoodCandidate, FoodRecord, MacroNutrients, NutritionInfo};
