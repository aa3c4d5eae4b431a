//! Response types for the Salary Engine API.
//!
//! Successful results are wrapped in a [`CalculationResponse`] envelope;
//! failures are returned as an [`ApiError`] body with a matching status.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::EngineError;

/// Envelope for every successful calculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationResponse<T> {
    /// Unique id of this calculation, also logged as the correlation id.
    pub calculation_id: Uuid,
    /// When the calculation ran.
    pub timestamp: DateTime<Utc>,
    /// Crate version that produced the result.
    pub engine_version: String,
    /// The calculation result.
    pub result: T,
}

impl<T> CalculationResponse<T> {
    /// Wraps a result under the given calculation id.
    pub fn new(calculation_id: Uuid, result: T) -> Self {
        Self {
            calculation_id,
            timestamp: Utc::now(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            result,
        }
    }
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// A 400 response with the given body.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        match error {
            EngineError::UnsupportedCountry { code } => ApiErrorResponse::bad_request(
                ApiError::with_details(
                    "UNSUPPORTED_COUNTRY",
                    message,
                    format!("The country code '{}' is not supported by this engine", code),
                ),
            ),
            EngineError::UnknownStateCode { code } => ApiErrorResponse::bad_request(
                ApiError::with_details(
                    "UNKNOWN_STATE_CODE",
                    message,
                    format!("'{}' is not a US state or DC postal code", code),
                ),
            ),
            EngineError::InvalidOption { field, .. } => ApiErrorResponse::bad_request(
                ApiError::with_details("INVALID_OPTION", message, field),
            ),
            EngineError::InvalidBracketTable { .. } => {
                ApiErrorResponse::bad_request(ApiError::new("INVALID_BRACKET_TABLE", message))
            }
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => {
                ApiErrorResponse {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    error: ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
                }
            }
        }
    }
}
