//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: MongoDB-backed employee repository
//! - **metrics**: Prometheus registry and middleware (feature-gated)

#[cfg(feature = "metrics")]
pub mod metrics;
pub mod persistence;
