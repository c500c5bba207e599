//! Host group API endpoints

use std::sync::Arc;

use axum::Json;
use axum::Router;
use axum::extract::{Path, State};
use axum::routing::get;
use serde_json::Value;

use self::types::HostGroupDto;
use crate::api::extractors::ValidatedQuery;
use crate::api::types::{ApiError, ListingResponse};
use crate::data::memory::HostGroupCatalog;

use super::ListingQuery;

pub mod types;

pub fn routes(catalog: Arc<HostGroupCatalog>) -> Router {
    Router::new()
        .route("/api/v1/monitoring/hostgroups", get(list_host_groups))
        .route("/api/v1/monitoring/hostgroups/{id}", get(get_host_group))
        .with_state(catalog)
}

/// List host groups with pagination, sort, and search filter
#[utoipa::path(
    get,
    path = "/api/v1/monitoring/hostgroups",
    tag = "hostgroups",
    params(
        ("page" = Option<u32>, Query, description = "Page number"),
        ("limit" = Option<u32>, Query, description = "Items per page"),
        ("sort_by" = Option<String>, Query, description = "Bare field name or JSON object of field to ASC/DESC"),
        ("search" = Option<String>, Query, description = "JSON search filter ($and/$or groups over conditions)")
    ),
    responses(
        (status = 200, description = "Matching host groups with request metadata"),
        (status = 400, description = "Malformed sort_by or search parameter")
    )
)]
pub async fn list_host_groups(
    State(catalog): State<Arc<HostGroupCatalog>>,
    ValidatedQuery(query): ValidatedQuery<ListingQuery>,
) -> Result<Json<ListingResponse<Value>>, ApiError> {
    let mut params = query.to_request_parameters()?;
    let rows = catalog.list(&mut params).map_err(ApiError::from_data)?;
    Ok(Json(ListingResponse::new(rows, &params)))
}

/// Get one host group by id
#[utoipa::path(
    get,
    path = "/api/v1/monitoring/hostgroups/{id}",
    tag = "hostgroups",
    params(("id" = u64, Path, description = "Host group id")),
    responses(
        (status = 200, description = "The host group", body = HostGroupDto),
        (status = 404, description = "No such host group")
    )
)]
pub async fn get_host_group(
    State(catalog): State<Arc<HostGroupCatalog>>,
    Path(id): Path<u64>,
) -> Result<Json<HostGroupDto>, ApiError> {
    catalog
        .get(id)
        .map(HostGroupDto::from)
        .map(Json)
        .ok_or_else(|| {
            ApiError::not_found("HOST_GROUP_NOT_FOUND", format!("Host group {} not found", id))
        })
}
