//! Employee API handlers.
//!
//! ```text
//! GET    /api/employees
//! GET    /api/employees/{id}
//! POST   /api/employees {"name":"Ada","email":"ada@example.com",...}
//! PUT    /api/employees/{id} {"salary":120000}
//! DELETE /api/employees/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde_json::{Value, json};

use crate::domain::Employee;
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{EmployeeSchema, ErrorSchema};
use crate::inbound::http::state::HttpState;

/// Message returned after a successful delete.
pub const EMPLOYEE_DELETED: &str = "Employee deleted successfully";

// A body the JSON extractor rejected is only reported once storage is known
// to be reachable, so a disconnected service answers 503 regardless of input.
fn request_body(
    state: &HttpState,
    payload: Result<web::Json<Value>, actix_web::Error>,
) -> actix_web::Result<Value> {
    match payload {
        Ok(body) => Ok(body.into_inner()),
        Err(err) => {
            state.employees.ensure_connected()?;
            Err(err)
        }
    }
}

/// List every employee record.
#[utoipa::path(
    get,
    path = "/api/employees",
    responses(
        (status = 200, description = "All employee records", body = [EmployeeSchema]),
        (status = 500, description = "Storage error", body = ErrorSchema),
        (status = 503, description = "Database not connected", body = ErrorSchema)
    ),
    tags = ["employees"],
    operation_id = "listEmployees"
)]
#[get("/employees")]
pub async fn list_employees(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<Employee>>> {
    let employees = state.employees.list().await?;
    Ok(web::Json(employees))
}

/// Fetch a single employee by identifier.
#[utoipa::path(
    get,
    path = "/api/employees/{id}",
    params(("id" = String, Path, description = "24-character hex identifier")),
    responses(
        (status = 200, description = "Employee record", body = EmployeeSchema),
        (status = 404, description = "Employee not found", body = ErrorSchema),
        (status = 500, description = "Malformed identifier or storage error", body = ErrorSchema),
        (status = 503, description = "Database not connected", body = ErrorSchema)
    ),
    tags = ["employees"],
    operation_id = "getEmployee"
)]
#[get("/employees/{id}")]
pub async fn get_employee(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Employee>> {
    let employee = state.employees.get(&path.into_inner()).await?;
    Ok(web::Json(employee))
}

/// Create an employee record.
///
/// `hire_date` defaults to today's date when omitted.
#[utoipa::path(
    post,
    path = "/api/employees",
    request_body = EmployeeSchema,
    responses(
        (status = 201, description = "Employee created", body = EmployeeSchema),
        (status = 400, description = "Missing required field", body = ErrorSchema),
        (status = 500, description = "Storage error", body = ErrorSchema),
        (status = 503, description = "Database not connected", body = ErrorSchema)
    ),
    tags = ["employees"],
    operation_id = "createEmployee"
)]
#[post("/employees")]
pub async fn create_employee(
    state: web::Data<HttpState>,
    payload: Result<web::Json<Value>, actix_web::Error>,
) -> actix_web::Result<HttpResponse> {
    let body = request_body(&state, payload)?;
    let employee = state.employees.create(&body).await?;
    Ok(HttpResponse::Created().json(employee))
}

/// Apply a partial update to an employee record.
///
/// Only supplied fields change; any `_id` in the body is ignored.
#[utoipa::path(
    put,
    path = "/api/employees/{id}",
    params(("id" = String, Path, description = "24-character hex identifier")),
    request_body = EmployeeSchema,
    responses(
        (status = 200, description = "Updated employee record", body = EmployeeSchema),
        (status = 400, description = "Body is not a JSON object", body = ErrorSchema),
        (status = 404, description = "Employee not found", body = ErrorSchema),
        (status = 500, description = "Malformed identifier or storage error", body = ErrorSchema),
        (status = 503, description = "Database not connected", body = ErrorSchema)
    ),
    tags = ["employees"],
    operation_id = "updateEmployee"
)]
#[put("/employees/{id}")]
pub async fn update_employee(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: Result<web::Json<Value>, actix_web::Error>,
) -> actix_web::Result<web::Json<Employee>> {
    let body = request_body(&state, payload)?;
    let employee = state.employees.update(&path.into_inner(), &body).await?;
    Ok(web::Json(employee))
}

/// Delete an employee record.
#[utoipa::path(
    delete,
    path = "/api/employees/{id}",
    params(("id" = String, Path, description = "24-character hex identifier")),
    responses(
        (status = 200, description = "Employee deleted"),
        (status = 404, description = "Employee not found", body = ErrorSchema),
        (status = 500, description = "Malformed identifier or storage error", body = ErrorSchema),
        (status = 503, description = "Database not connected", body = ErrorSchema)
    ),
    tags = ["employees"],
    operation_id = "deleteEmployee"
)]
#[delete("/employees/{id}")]
pub async fn delete_employee(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    state.employees.delete(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({ "message": EMPLOYEE_DELETED })))
}

#[cfg(test)]
mod tests;
