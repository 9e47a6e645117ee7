//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint from the inbound layer together
//! with the schema wrappers from [`crate::inbound::http::schemas`]. The
//! document backs Swagger UI in debug builds and is exported by
//! `cargo run --bin openapi-dump`.

use utoipa::OpenApi;

use crate::inbound::http::health::{DatabaseStatus, HealthReport};
use crate::inbound::http::root::{EndpointIndex, ServiceInfo};
use crate::inbound::http::schemas::{EmployeeSchema, ErrorCodeSchema, ErrorSchema};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Employee Management System API",
        version = "1.0.0",
        description = "Create, read, update and delete employee records stored in MongoDB."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::employees::list_employees,
        crate::inbound::http::employees::get_employee,
        crate::inbound::http::employees::create_employee,
        crate::inbound::http::employees::update_employee,
        crate::inbound::http::employees::delete_employee,
        crate::inbound::http::health::api_health,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
        crate::inbound::http::root::service_info,
    ),
    components(schemas(
        EmployeeSchema,
        ErrorSchema,
        ErrorCodeSchema,
        HealthReport,
        DatabaseStatus,
        ServiceInfo,
        EndpointIndex
    )),
    tags(
        (name = "employees", description = "Employee record operations"),
        (name = "health", description = "Endpoints for health checks"),
        (name = "meta", description = "Service metadata")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[test]
    fn error_schema_matches_wire_shape() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error_schema = schemas.get("Error").expect("Error schema");

        assert_object_schema_has_field(error_schema, "error");
        assert_object_schema_has_field(error_schema, "code");
    }

    #[test]
    fn employee_schema_lists_record_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let employee = schemas.get("Employee").expect("Employee schema");

        for field in ["_id", "name", "email", "position", "department", "salary", "hire_date"] {
            assert_object_schema_has_field(employee, field);
        }
    }

    #[test]
    fn every_route_is_documented() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/employees",
            "/api/employees/{id}",
            "/api/health",
            "/health/ready",
            "/health/live",
            "/",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
