//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. The
//! wrappers here mirror their serialised shape and exist only for the
//! generated document.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request body is malformed or misses a required field.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// No employee matches the identifier.
    #[schema(rename = "not_found")]
    NotFound,
    /// The document store is not connected.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// The storage backend rejected the operation.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = Error, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Human-readable message.
    #[schema(example = "Employee not found")]
    error: String,
    /// Stable machine-readable error code.
    #[schema(example = "not_found")]
    code: ErrorCodeSchema,
    /// Correlation identifier, also sent in the `trace-id` header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Supplementary details, such as the name of a missing field.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::Employee`].
///
/// Requests omit `_id`; `hire_date` is optional on create.
#[derive(ToSchema)]
#[schema(as = Employee)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct EmployeeSchema {
    /// Storage-assigned identifier, a 24-character hex string.
    #[schema(rename = "_id", example = "65f1c0ffee0000000000beef")]
    id: Option<String>,
    #[schema(example = "Ada Lovelace")]
    name: String,
    #[schema(example = "ada@example.com")]
    email: String,
    #[schema(example = "Analyst")]
    position: String,
    #[schema(example = "Engineering")]
    department: String,
    #[schema(example = 98000)]
    salary: f64,
    /// Calendar date formatted `YYYY-MM-DD`.
    #[schema(example = "2024-05-17")]
    hire_date: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use utoipa::PartialSchema;

    fn schema_to_json<T: PartialSchema>() -> String {
        serde_json::to_string(&T::schema()).expect("schema serialises")
    }

    #[test]
    fn error_schema_uses_wire_field_names() {
        let json = schema_to_json::<ErrorSchema>();
        assert!(json.contains("\"error\""));
        assert!(json.contains("\"traceId\""));
        assert!(!json.contains("\"message\""));
    }

    #[test]
    fn error_code_schema_lists_every_code() {
        let json = schema_to_json::<ErrorCodeSchema>();
        for code in ["invalid_request", "not_found", "service_unavailable", "internal_error"] {
            assert!(json.contains(code), "missing {code}");
        }
    }

    #[test]
    fn employee_schema_exposes_storage_identifier() {
        let json = schema_to_json::<EmployeeSchema>();
        assert!(json.contains("\"_id\""));
        assert!(json.contains("\"hire_date\""));
    }
}
