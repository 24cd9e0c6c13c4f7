//! Error types for the FDC client and the scaling transform.
//!
//! # Design
//! The provider is treated as a black box: any non-2xx status is an
//! `HttpError` carrying the raw status and body for server-side logs. A 404 on
//! a detail record is not special-cased because callers report every provider
//! failure the same way.

use thiserror::Error;

/// Errors returned by `FdcClient` parse methods.
#[derive(Debug, Error)]
pub enum FdcError {
    /// The provider returned a non-2xx status.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),
}

/// Rejections produced while reading a scale request.
///
/// The `Display` strings are returned to API callers verbatim.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScaleError {
    /// A field is missing, not numeric, or the body is not a JSON object.
    #[error("Invalid input for scaling nutrition.")]
    InvalidInput,

    #[error("Serving size must be greater than zero.")]
    NonPositiveServingSize,
}
