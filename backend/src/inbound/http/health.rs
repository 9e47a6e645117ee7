//! Health endpoints.
//!
//! `/api/health` reports whether the document store is connected and never
//! fails. `/health/ready` and `/health/live` are bare probes for
//! orchestrators and load balancers.

use std::sync::atomic::{AtomicBool, Ordering};

use actix_web::{HttpResponse, get, http::header, web};
use serde::Serialize;

use crate::inbound::http::state::HttpState;

/// Message reported by `/api/health`.
pub const HEALTHY_MESSAGE: &str = "Employee Management API is running";

/// Shared readiness and liveness flags.
pub struct HealthState {
    ready: AtomicBool,
    live: AtomicBool,
}

impl Default for HealthState {
    fn default() -> Self {
        Self {
            ready: AtomicBool::new(false),
            live: AtomicBool::new(true),
        }
    }
}

impl HealthState {
    /// Create a new health state starting as not ready but live.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the service as ready.
    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    /// Flag the service as draining so liveness probes fail during shutdown.
    pub fn mark_unhealthy(&self) {
        self.live.store(false, Ordering::Release);
    }

    /// Return readiness state.
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    /// Return liveness state. When false, liveness probes emit 503.
    pub fn is_alive(&self) -> bool {
        self.live.load(Ordering::Acquire)
    }

    fn probe_response(probe_ok: bool) -> HttpResponse {
        let mut response = if probe_ok {
            HttpResponse::Ok()
        } else {
            HttpResponse::ServiceUnavailable()
        };

        response
            .insert_header((header::CACHE_CONTROL, "no-store"))
            .finish()
    }
}

/// Connection status of the document store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseStatus {
    /// The document store answered at startup.
    Connected,
    /// The service is running without a document store.
    Disconnected,
}

/// Body of `GET /api/health`.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct HealthReport {
    /// Always `healthy` while the process serves requests.
    #[schema(example = "healthy")]
    pub status: String,
    /// Fixed human-readable summary.
    #[schema(example = "Employee Management API is running")]
    pub message: String,
    /// Whether the document store is reachable.
    pub database: DatabaseStatus,
}

/// Report API health and document store connectivity.
#[utoipa::path(
    get,
    path = "/api/health",
    responses((status = 200, description = "API is running", body = HealthReport)),
    tags = ["health"],
    operation_id = "health"
)]
#[get("/health")]
pub async fn api_health(state: web::Data<HttpState>) -> web::Json<HealthReport> {
    let database = if state.employees.is_connected() {
        DatabaseStatus::Connected
    } else {
        DatabaseStatus::Disconnected
    };
    web::Json(HealthReport {
        status: "healthy".to_owned(),
        message: HEALTHY_MESSAGE.to_owned(),
        database,
    })
}

/// Readiness probe. Return 200 once the server has finished starting.
#[utoipa::path(
    get,
    path = "/health/ready",
    tags = ["health"],
    responses(
        (status = 200, description = "Server is ready to handle traffic"),
        (status = 503, description = "Server is not ready")
    )
)]
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    HealthState::probe_response(state.is_ready())
}

/// Liveness probe. Return 200 while the process is marked alive and 503 once draining.
#[utoipa::path(
    get,
    path = "/health/live",
    tags = ["health"],
    responses(
        (status = 200, description = "Server is alive"),
        (status = 503, description = "Server is shutting down")
    )
)]
#[get("/health/live")]
pub async fn live(state: web::Data<HealthState>) -> HttpResponse {
    HealthState::probe_response(state.is_alive())
}
