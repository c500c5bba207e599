//! Shared API types
//!
//! Common types used across all API endpoints: error handling and the
//! listing response envelope.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::Value;
use validator::ValidationError;

use crate::data::DataError;
use crate::domain::request_parameters::{
    DEFAULT_LIMIT, DEFAULT_PAGE, RequestParameters, RequestParametersError,
};

/// Maximum items per page for paginated endpoints
pub const MAX_PAGE_LIMIT: u32 = 500;
/// Maximum page number to prevent expensive offset scans
pub const MAX_PAGE: u32 = 10_000;

/// Validator function for the page parameter.
///
/// Range policing happens here at the API boundary; `RequestParameters`
/// itself accepts whatever it is given.
pub fn validate_page(page: u32) -> Result<(), ValidationError> {
    if page < 1 {
        return Err(ValidationError::new("page_min").with_message("Page must be >= 1".into()));
    }
    if page > MAX_PAGE {
        return Err(ValidationError::new("page_max")
            .with_message(format!("Page must be <= {}", MAX_PAGE).into()));
    }
    Ok(())
}

/// Validator function for the limit parameter
pub fn validate_limit(limit: u32) -> Result<(), ValidationError> {
    if limit > MAX_PAGE_LIMIT {
        return Err(ValidationError::new("limit_range")
            .with_message(format!("Limit must be <= {}", MAX_PAGE_LIMIT).into()));
    }
    Ok(())
}

pub fn default_page() -> u32 {
    DEFAULT_PAGE
}

pub fn default_limit() -> u32 {
    DEFAULT_LIMIT
}

/// Standard API error response
#[derive(Debug)]
pub enum ApiError {
    BadRequest { code: String, message: String },
    NotFound { code: String, message: String },
    Internal { message: String },
}

impl ApiError {
    pub fn bad_request(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::BadRequest {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn not_found(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::NotFound {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub fn from_data(e: DataError) -> Self {
        tracing::error!(error = %e, "Data error");
        Self::Internal {
            message: "Query operation failed".to_string(),
        }
    }
}

impl From<RequestParametersError> for ApiError {
    fn from(e: RequestParametersError) -> Self {
        let code = match e {
            RequestParametersError::InvalidSortFormat => "INVALID_SORT_BY",
            RequestParametersError::InvalidSearchJson(_) => "INVALID_SEARCH",
        };
        Self::bad_request(code, e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, code, message) = match self {
            Self::BadRequest { code, message } => {
                (StatusCode::BAD_REQUEST, "bad_request", code, message)
            }
            Self::NotFound { code, message } => (StatusCode::NOT_FOUND, "not_found", code, message),
            Self::Internal { message } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "INTERNAL".to_string(),
                message,
            ),
        };
        (
            status,
            Json(serde_json::json!({
                "error": error_type,
                "code": code,
                "message": message
            })),
        )
            .into_response()
    }
}

/// Listing response envelope: the matched rows plus the request-parameter
/// snapshot (`page`, `limit`, `search`, `sort`, `total`) as metadata.
#[derive(Debug, Serialize)]
pub struct ListingResponse<T> {
    pub result: Vec<T>,
    pub meta: Value,
}

impl<T> ListingResponse<T> {
    pub fn new(result: Vec<T>, params: &RequestParameters) -> Self {
        Self {
            result,
            meta: params.to_json(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_validation_bounds() {
        assert!(validate_page(0).is_err());
        assert!(validate_page(1).is_ok());
        assert!(validate_page(MAX_PAGE).is_ok());
        assert!(validate_page(MAX_PAGE + 1).is_err());
    }

    #[test]
    fn limit_validation_bounds() {
        assert!(validate_limit(0).is_ok());
        assert!(validate_limit(MAX_PAGE_LIMIT).is_ok());
        assert!(validate_limit(MAX_PAGE_LIMIT + 1).is_err());
    }

    #[test]
    fn listing_response_carries_parameter_snapshot() {
        let params = RequestParameters::new();
        let response = ListingResponse::new(vec![serde_json::json!({"id": 1})], &params);
        assert_eq!(response.meta["page"], 1);
        assert_eq!(response.meta["limit"], 10);
        assert_eq!(response.meta["total"], 0);
    }
}
