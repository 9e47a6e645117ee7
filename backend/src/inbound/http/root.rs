//! Service metadata served from `/`.

use actix_web::{get, web};
use serde::Serialize;

/// API version advertised by the root endpoint.
pub const API_VERSION: &str = "1.0.0";

/// Paths of the public routes.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct EndpointIndex {
    /// Health report route.
    #[schema(example = "/api/health")]
    pub health: String,
    /// Employee collection route.
    #[schema(example = "/api/employees")]
    pub employees: String,
    /// Single employee route template.
    #[schema(example = "/api/employees/<id>")]
    pub employee_by_id: String,
}

/// Body of `GET /`.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct ServiceInfo {
    /// Service name.
    #[schema(example = "Employee Management System API")]
    pub message: String,
    /// API version.
    #[schema(example = "1.0.0")]
    pub version: String,
    /// Public route paths.
    pub endpoints: EndpointIndex,
}

/// Describe the service and its routes.
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Service metadata", body = ServiceInfo)),
    tags = ["meta"],
    operation_id = "serviceInfo"
)]
#[get("/")]
pub async fn service_info() -> web::Json<ServiceInfo> {
    web::Json(ServiceInfo {
        message: "Employee Management System API".to_owned(),
        version: API_VERSION.to_owned(),
        endpoints: EndpointIndex {
            health: "/api/health".to_owned(),
            employees: "/api/employees".to_owned(),
            employee_by_id: "/api/employees/<id>".to_owned(),
        },
    })
}
