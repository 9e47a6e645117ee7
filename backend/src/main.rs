//! Backend entry-point: resolves settings, connects storage and serves the
//! employee API.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::net::IpAddr;
use std::sync::Arc;

use actix_web::web;
use clap::Parser;
use mockable::{DefaultClock, DefaultEnv};
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use employee_api::domain::EmployeeService;
use employee_api::inbound::http::health::HealthState;
use employee_api::inbound::http::root::API_VERSION;
use employee_api::inbound::http::state::HttpState;
#[cfg(feature = "metrics")]
use employee_api::server::initialize_metrics;
use employee_api::server::{
    AppDependencies, ServerSettings, connect_repository, create_server, drain_on_signal,
};

/// `employee-api` command arguments. Flags override the environment.
#[derive(Debug, Parser)]
#[command(name = "employee-api", about = "Employee management REST API", version)]
struct Cli {
    /// Port to listen on; overrides `PORT`.
    #[arg(long)]
    port: Option<u16>,
    /// Address to bind; overrides `BIND_HOST`.
    #[arg(long)]
    host: Option<IpAddr>,
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let cli = Cli::parse();
    let mut settings = ServerSettings::from_env(&DefaultEnv::new()).map_err(std::io::Error::other)?;
    if let Some(port) = cli.port {
        settings = settings.with_port(port);
    }
    if let Some(host) = cli.host {
        settings = settings.with_host(host);
    }

    let repository = connect_repository(settings.store.as_ref()).await;
    let service = EmployeeService::new(repository, Arc::new(DefaultClock));
    let health_state = web::Data::new(HealthState::new());
    let deps = AppDependencies {
        health_state: health_state.clone(),
        http_state: web::Data::new(HttpState::new(service)),
    };

    let server = create_server(
        deps,
        &settings,
        #[cfg(feature = "metrics")]
        initialize_metrics(API_VERSION),
    )?;
    actix_web::rt::spawn(drain_on_signal(health_state, server.handle()));
    server.await
}
