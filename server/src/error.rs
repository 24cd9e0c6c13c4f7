//! Handler-boundary errors and their HTTP rendering.
//!
//! Every failure leaves the service as `{"error": "<message>"}`. Upstream
//! failures always render the same generic message; their cause only goes
//! to the log.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use nutrition_core::{FdcError, ScaleError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A failed exchange with FoodData Central.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("request to FDC failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("FDC response rejected: {0}")]
    Fdc(#[from] FdcError),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Failed to connect to the nutrition database.")]
    Upstream(#[from] UpstreamError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ScaleError> for AppError {
    fn from(err: ScaleError) -> Self {
        AppError::InvalidInput(err.to_string())
    }
}

/// JSON body of every error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Upstream(cause) => {
                tracing::error!(error = %cause, "failed to connect to USDA API");
            }
            AppError::InvalidInput(message) => tracing::warn!(reason = %message, "rejected request"),
            AppError::NotFound(message) => tracing::info!(reason = %message, "lookup found nothing"),
        }
        let body = ErrorBody {
            error: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_message_is_generic() {
        let err = AppError::from(UpstreamError::from(FdcError::HttpError {
            status: 503,
            body: "maintenance window".to_string(),
        }));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "Failed to connect to the nutrition database.");
    }

    #[test]
    fn scale_errors_are_bad_requests() {
        let err = AppError::from(ScaleError::NonPositiveServingSize);
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Serving size must be greater than zero.");
    }

    #[test]
    fn not_found_keeps_its_message() {
        let err = AppError::NotFound("Product not found.".to_string());
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "Product not found.");
    }
}
