//! API route handlers

pub mod health;
pub mod hostgroups;
pub mod timeperiods;

use serde::Deserialize;
use validator::Validate;

use crate::api::types::{ApiError, default_limit, default_page, validate_limit, validate_page};
use crate::domain::request_parameters::RequestParameters;

/// Query-string contract shared by listing endpoints:
/// `page`, `limit`, `sort_by` (JSON object or bare field), `search` (JSON)
#[derive(Debug, Deserialize, Validate)]
pub struct ListingQuery {
    #[serde(default = "default_page")]
    #[validate(custom(function = "validate_page"))]
    pub page: u32,
    #[serde(default = "default_limit")]
    #[validate(custom(function = "validate_limit"))]
    pub limit: u32,
    pub sort_by: Option<String>,
    pub search: Option<String>,
}

impl ListingQuery {
    /// Parse the raw sort/search values into request parameters
    pub fn to_request_parameters(&self) -> Result<RequestParameters, ApiError> {
        RequestParameters::from_query(
            Some(self.page),
            Some(self.limit),
            self.sort_by.as_deref(),
            self.search.as_deref(),
        )
        .map_err(ApiError::from)
    }
}
