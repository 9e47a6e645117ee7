//! Server construction and middleware wiring.

mod config;
#[cfg(feature = "metrics")]
mod metrics;

pub use config::{ConfigError, DEFAULT_HOST, DEFAULT_PORT, ServerSettings};

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::body::MessageBody;
use actix_web::dev::{Server, ServerHandle, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
#[cfg(feature = "metrics")]
use actix_web_prom::PrometheusMetrics;
use tracing::{info, warn};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(feature = "metrics")]
use self::metrics::MetricsLayer;
use crate::Trace;
#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::domain::ports::{DisconnectedEmployeeRepository, EmployeeRepository};
use crate::inbound::http::employees::{
    create_employee, delete_employee, get_employee, list_employees, update_employee,
};
use crate::inbound::http::health::{HealthState, api_health, live, ready};
use crate::inbound::http::json_config;
use crate::inbound::http::root::service_info;
use crate::inbound::http::state::HttpState;
use crate::outbound::persistence::{MongoStore, StoreConfig};

/// Shared state handed to every worker's app factory.
#[derive(Clone)]
pub struct AppDependencies {
    /// Readiness and liveness flags served by the probes.
    pub health_state: web::Data<HealthState>,
    /// Employee use-cases backing the `/api` routes.
    pub http_state: web::Data<HttpState>,
}

/// Assemble the application: routes, CORS, tracing and API docs.
pub fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
    } = deps;

    let api = web::scope("/api")
        .service(api_health)
        .service(list_employees)
        .service(get_employee)
        .service(create_employee)
        .service(update_employee)
        .service(delete_employee);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(json_config())
        .wrap(Cors::permissive())
        .wrap(Trace)
        .service(api)
        .service(service_info)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Open the document store, falling back to the disconnected repository.
///
/// A missing URI or a failed connection never aborts startup; the API keeps
/// serving with every record route answering 503.
pub async fn connect_repository(store: Option<&StoreConfig>) -> Arc<dyn EmployeeRepository> {
    let Some(config) = store else {
        return Arc::new(DisconnectedEmployeeRepository);
    };
    match MongoStore::connect(config).await {
        Ok(store) => Arc::new(store.employees()),
        Err(error) => {
            warn!(%error, "MongoDB unavailable; continuing without a database");
            Arc::new(DisconnectedEmployeeRepository)
        }
    }
}

/// Build the optional Prometheus middleware, logging rather than failing.
#[cfg(feature = "metrics")]
pub fn initialize_metrics(version: &str) -> Option<PrometheusMetrics> {
    match crate::outbound::metrics::build_http_metrics(version) {
        Ok(metrics) => Some(metrics),
        Err(error) => {
            warn!(%error, "metrics disabled");
            None
        }
    }
}

/// Construct the HTTP server.
///
/// # Returns
/// A [`Server`] that must be awaited to drive the listener. `health_state` is
/// marked ready once the socket is bound. Built-in signal handling is
/// disabled; pair the server with [`drain_on_signal`] to stop it.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    deps: AppDependencies,
    settings: &ServerSettings,
    #[cfg(feature = "metrics")] prometheus: Option<PrometheusMetrics>,
) -> std::io::Result<Server> {
    let health_state = deps.health_state.clone();
    #[cfg(feature = "metrics")]
    let metrics_layer = MetricsLayer::from_option(prometheus);

    let server = HttpServer::new(move || {
        let app = build_app(deps.clone());

        #[cfg(feature = "metrics")]
        let app = app.wrap(metrics_layer.clone());

        app
    })
    .disable_signals()
    .bind(settings.bind_addr)?
    .run();

    info!(addr = %settings.bind_addr, "listening");
    health_state.mark_ready();
    Ok(server)
}

/// Fail liveness, then stop the server once in-flight requests finish.
pub async fn drain(health_state: web::Data<HealthState>, handle: ServerHandle) {
    health_state.mark_unhealthy();
    info!("draining connections");
    handle.stop(true).await;
}

/// Wait for `SIGINT` or `SIGTERM`, then [`drain`] the server.
pub async fn drain_on_signal(health_state: web::Data<HealthState>, handle: ServerHandle) {
    if let Err(error) = shutdown_signal().await {
        warn!(%error, "cannot listen for shutdown signals");
        return;
    }
    drain(health_state, handle).await;
}

#[cfg(unix)]
async fn shutdown_signal() -> std::io::Result<()> {
    use tokio::signal::unix::{SignalKind, signal};

    let mut terminate = signal(SignalKind::terminate())?;
    tokio::select! {
        result = tokio::signal::ctrl_c() => result,
        _ = terminate.recv() => Ok(()),
    }
}

#[cfg(not(unix))]
async fn shutdown_signal() -> std::io::Result<()> {
    tokio::signal::ctrl_c().await
}

#[cfg(test)]
mod tests;
