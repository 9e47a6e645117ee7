//! Tests for server assembly, covering readiness signalling, draining,
//! storage fallback and cross-origin headers.

use super::*;
use crate::test_support::disconnected_http_state;
use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use rstest::{fixture, rstest};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

#[fixture]
fn deps() -> AppDependencies {
    AppDependencies {
        health_state: web::Data::new(HealthState::new()),
        http_state: disconnected_http_state(),
    }
}

#[fixture]
fn settings() -> ServerSettings {
    ServerSettings {
        store: None,
        bind_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 0),
    }
}

#[rstest]
#[actix_rt::test]
async fn create_server_marks_ready(deps: AppDependencies, settings: ServerSettings) {
    let health_state = deps.health_state.clone();
    assert!(!health_state.is_ready(), "state should start unready");

    let _server = create_server(
        deps,
        &settings,
        #[cfg(feature = "metrics")]
        None,
    )
    .expect("server should build");

    assert!(health_state.is_ready(), "server creation should mark readiness");
}

#[rstest]
#[actix_rt::test]
async fn drain_fails_liveness_and_stops_server(deps: AppDependencies, settings: ServerSettings) {
    let health_state = deps.health_state.clone();
    let server = create_server(
        deps,
        &settings,
        #[cfg(feature = "metrics")]
        None,
    )
    .expect("server should build");
    let handle = server.handle();
    let running = actix_rt::spawn(server);
    assert!(health_state.is_alive(), "state should start live");

    drain(health_state.clone(), handle).await;

    assert!(!health_state.is_alive(), "draining should fail liveness");
    running
        .await
        .expect("server task should join")
        .expect("server should stop cleanly");
}

#[cfg(feature = "metrics")]
#[rstest]
#[actix_rt::test]
async fn create_server_accepts_metrics(deps: AppDependencies, settings: ServerSettings) {
    let metrics = initialize_metrics("1.0.0");
    assert!(metrics.is_some(), "metrics should initialise");

    let _server = create_server(deps, &settings, metrics).expect("server should build");
}

#[rstest]
#[tokio::test]
async fn missing_store_config_yields_disconnected_repository() {
    let repository = connect_repository(None).await;
    assert!(!repository.is_connected());
}

#[rstest]
#[actix_rt::test]
async fn permissive_cors_echoes_any_origin(deps: AppDependencies) {
    let app = actix_test::init_service(build_app(deps)).await;
    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/health")
            .insert_header(("Origin", "https://dashboard.example.org"))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .and_then(|value| value.to_str().ok()),
        Some("https://dashboard.example.org")
    );
    assert!(response.headers().contains_key("trace-id"));
}

#[rstest]
#[actix_rt::test]
async fn root_and_probes_are_mounted(deps: AppDependencies) {
    deps.health_state.mark_ready();
    let app = actix_test::init_service(build_app(deps)).await;

    for uri in ["/", "/health/ready", "/health/live"] {
        let response =
            actix_test::call_service(&app, actix_test::TestRequest::get().uri(uri).to_request())
                .await;
        assert_eq!(response.status(), StatusCode::OK, "{uri}");
    }
}
