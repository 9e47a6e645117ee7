//! Tests for employee API handlers.

use super::*;
use crate::inbound::http::json_config;
use crate::test_support::{disconnected_http_state, in_memory_http_state};
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test};
use rstest::{fixture, rstest};
use serde_json::Value;

fn test_app(
    state: web::Data<HttpState>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new().app_data(state).app_data(json_config()).service(
        web::scope("/api")
            .service(list_employees)
            .service(get_employee)
            .service(create_employee)
            .service(update_employee)
            .service(delete_employee),
    )
}

#[fixture]
fn payload() -> Value {
    json!({
        "name": "Grace Hopper",
        "email": "grace@example.com",
        "position": "Rear Admiral",
        "department": "Computing",
        "salary": 120000,
    })
}

async fn error_body(response: actix_web::dev::ServiceResponse) -> Value {
    actix_test::read_body_json(response).await
}

#[rstest]
#[actix_web::test]
async fn create_then_fetch_round_trips(payload: Value) {
    let (state, _) = in_memory_http_state();
    let app = actix_test::init_service(test_app(state)).await;

    let created = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/employees")
            .set_json(&payload)
            .to_request(),
    )
    .await;
    assert_eq!(created.status(), StatusCode::CREATED);
    let created: Value = actix_test::read_body_json(created).await;
    let id = created["_id"].as_str().expect("created record has an id").to_owned();
    assert!(!id.is_empty());
    assert_eq!(created["hire_date"], json!("2024-05-17"));

    let fetched = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("/api/employees/{id}"))
            .to_request(),
    )
    .await;
    assert_eq!(fetched.status(), StatusCode::OK);
    let fetched: Value = actix_test::read_body_json(fetched).await;
    assert_eq!(fetched, created);
    for (key, value) in payload.as_object().expect("fixture is an object") {
        assert_eq!(&fetched[key], value, "field {key}");
    }
}

#[rstest]
#[case("name")]
#[case("email")]
#[case("position")]
#[case("department")]
#[case("salary")]
#[actix_web::test]
async fn create_rejects_missing_field(mut payload: Value, #[case] field: &str) {
    let (state, repository) = in_memory_http_state();
    let app = actix_test::init_service(test_app(state)).await;
    payload
        .as_object_mut()
        .expect("fixture is an object")
        .remove(field);

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/employees")
            .set_json(&payload)
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = error_body(response).await;
    assert_eq!(body["error"], json!(format!("Missing required field: {field}")));
    assert_eq!(body["details"]["field"], json!(field));
    assert!(repository.is_empty());
}

#[rstest]
#[actix_web::test]
async fn update_changes_only_supplied_fields(payload: Value) {
    let (state, _) = in_memory_http_state();
    let app = actix_test::init_service(test_app(state)).await;
    let created: Value = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/employees")
            .set_json(&payload)
            .to_request(),
    )
    .await;
    let id = created["_id"].as_str().expect("created record has an id");

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::put()
            .uri(&format!("/api/employees/{id}"))
            .set_json(json!({ "salary": 135000, "_id": "000000000000000000000000" }))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated: Value = actix_test::read_body_json(response).await;
    assert_eq!(updated["_id"], json!(id));
    assert_eq!(updated["salary"], json!(135000));
    for field in ["name", "email", "position", "department", "hire_date"] {
        assert_eq!(updated[field], created[field], "field {field}");
    }
}

#[rstest]
#[actix_web::test]
async fn delete_removes_record(payload: Value) {
    let (state, repository) = in_memory_http_state();
    let app = actix_test::init_service(test_app(state)).await;
    let created: Value = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/employees")
            .set_json(&payload)
            .to_request(),
    )
    .await;
    let uri = format!(
        "/api/employees/{}",
        created["_id"].as_str().expect("created record has an id")
    );

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete().uri(&uri).to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body, json!({ "message": EMPLOYEE_DELETED }));
    assert!(repository.is_empty());

    let again = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete().uri(&uri).to_request(),
    )
    .await;
    assert_eq!(again.status(), StatusCode::NOT_FOUND);
}

#[rstest]
#[case("65f1c0ffee0000000000beef", StatusCode::NOT_FOUND)]
#[case("not-an-object-id", StatusCode::INTERNAL_SERVER_ERROR)]
#[actix_web::test]
async fn unknown_and_malformed_identifiers(#[case] id: &str, #[case] expected: StatusCode) {
    let (state, _) = in_memory_http_state();
    let app = actix_test::init_service(test_app(state)).await;
    let uri = format!("/api/employees/{id}");

    let requests = [
        actix_test::TestRequest::get().uri(&uri).to_request(),
        actix_test::TestRequest::put()
            .uri(&uri)
            .set_json(json!({ "salary": 1 }))
            .to_request(),
        actix_test::TestRequest::delete().uri(&uri).to_request(),
    ];
    for request in requests {
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), expected);
        let body = error_body(response).await;
        assert!(body["error"].as_str().is_some_and(|msg| !msg.is_empty()));
    }
}

#[rstest]
#[actix_web::test]
async fn list_returns_every_record(payload: Value) {
    let (state, _) = in_memory_http_state();
    let app = actix_test::init_service(test_app(state)).await;
    for _ in 0..2 {
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/employees")
                .set_json(&payload)
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let listed: Value = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::get().uri("/api/employees").to_request(),
    )
    .await;
    assert_eq!(listed.as_array().map(Vec::len), Some(2));
}

#[actix_web::test]
async fn malformed_json_is_a_bad_request() {
    let (state, _) = in_memory_http_state();
    let app = actix_test::init_service(test_app(state)).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/employees")
            .insert_header(("content-type", "application/json"))
            .set_payload("{not json")
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = error_body(response).await;
    assert_eq!(body["code"], json!("invalid_request"));
}

#[rstest]
#[actix_web::test]
async fn disconnected_storage_answers_service_unavailable() {
    let app = actix_test::init_service(test_app(disconnected_http_state())).await;
    let id = "65f1c0ffee0000000000beef";

    let requests = [
        actix_test::TestRequest::get().uri("/api/employees").to_request(),
        actix_test::TestRequest::get()
            .uri(&format!("/api/employees/{id}"))
            .to_request(),
        actix_test::TestRequest::post()
            .uri("/api/employees")
            .set_json(json!({}))
            .to_request(),
        actix_test::TestRequest::post()
            .uri("/api/employees")
            .insert_header(("content-type", "application/json"))
            .set_payload("{not json")
            .to_request(),
        actix_test::TestRequest::put()
            .uri(&format!("/api/employees/{id}"))
            .set_json(json!({ "salary": 1 }))
            .to_request(),
        actix_test::TestRequest::delete()
            .uri(&format!("/api/employees/{id}"))
            .to_request(),
    ];
    for request in requests {
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body = error_body(response).await;
        assert_eq!(body["error"], json!("Database not connected"));
    }
}
