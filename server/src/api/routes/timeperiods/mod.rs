//! Timeperiod API endpoints

use std::sync::Arc;

use axum::Json;
use axum::Router;
use axum::extract::{Path, State};
use axum::routing::get;
use serde_json::Value;

use self::types::TimeperiodDto;
use crate::api::extractors::ValidatedQuery;
use crate::api::types::{ApiError, ListingResponse};
use crate::data::memory::TimeperiodCatalog;

use super::ListingQuery;

pub mod types;

pub fn routes(catalog: Arc<TimeperiodCatalog>) -> Router {
    Router::new()
        .route("/api/v1/timeperiods", get(list_timeperiods))
        .route("/api/v1/timeperiods/{id}", get(get_timeperiod))
        .with_state(catalog)
}

/// List timeperiods with pagination, sort, and search filter
#[utoipa::path(
    get,
    path = "/api/v1/timeperiods",
    tag = "timeperiods",
    params(
        ("page" = Option<u32>, Query, description = "Page number"),
        ("limit" = Option<u32>, Query, description = "Items per page"),
        ("sort_by" = Option<String>, Query, description = "Bare field name or JSON object of field to ASC/DESC"),
        ("search" = Option<String>, Query, description = "JSON search filter ($and/$or groups over conditions)")
    ),
    responses(
        (status = 200, description = "Matching timeperiods with request metadata"),
        (status = 400, description = "Malformed sort_by or search parameter")
    )
)]
pub async fn list_timeperiods(
    State(catalog): State<Arc<TimeperiodCatalog>>,
    ValidatedQuery(query): ValidatedQuery<ListingQuery>,
) -> Result<Json<ListingResponse<Value>>, ApiError> {
    let mut params = query.to_request_parameters()?;
    let rows = catalog.list(&mut params).map_err(ApiError::from_data)?;
    Ok(Json(ListingResponse::new(rows, &params)))
}

/// Get one timeperiod by id
#[utoipa::path(
    get,
    path = "/api/v1/timeperiods/{id}",
    tag = "timeperiods",
    params(("id" = u64, Path, description = "Timeperiod id")),
    responses(
        (status = 200, description = "The timeperiod", body = TimeperiodDto),
        (status = 404, description = "No such timeperiod")
    )
)]
pub async fn get_timeperiod(
    State(catalog): State<Arc<TimeperiodCatalog>>,
    Path(id): Path<u64>,
) -> Result<Json<TimeperiodDto>, ApiError> {
    catalog
        .get(id)
        .map(TimeperiodDto::from)
        .map(Json)
        .ok_or_else(|| {
            ApiError::not_found("TIMEPERIOD_NOT_FOUND", format!("Timeperiod {} not found", id))
        })
}
