//! HTTP inbound adapter exposing REST endpoints.

pub mod employees;
pub mod error;
pub mod health;
pub mod root;
pub mod schemas;
pub mod state;

pub use error::{ApiResult, json_config};
