//! OpenAPI specification

use axum::http::header;
use axum::response::{IntoResponse, Json};
use utoipa::OpenApi;

use crate::api::routes::{health, hostgroups, timeperiods};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Watchtower API",
        version = env!("CARGO_PKG_VERSION"),
        description = "Monitoring configuration API"
    ),
    tags(
        (name = "health", description = "Health check endpoint"),
        (name = "hostgroups", description = "Host group listings"),
        (name = "timeperiods", description = "Timeperiod listings")
    ),
    paths(
        health::health,
        hostgroups::list_host_groups,
        hostgroups::get_host_group,
        timeperiods::list_timeperiods,
        timeperiods::get_timeperiod,
    ),
    components(schemas(
        health::HealthResponse,
        hostgroups::types::HostDto,
        hostgroups::types::HostGroupDto,
        timeperiods::types::TimeperiodDto,
    ))
)]
pub struct ApiDoc;

/// Serve the OpenAPI JSON specification
pub async fn openapi_json() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/json")],
        Json(ApiDoc::openapi()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_covers_every_route() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/v1/health",
            "/api/v1/monitoring/hostgroups",
            "/api/v1/monitoring/hostgroups/{id}",
            "/api/v1/timeperiods",
            "/api/v1/timeperiods/{id}",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing path: {path}");
        }
    }
}
