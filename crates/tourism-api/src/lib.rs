//! Tourism API - REST surface for the governance ledger.
//!
//! This crate provides:
//! - The axum router under `/api/governance`
//! - Error to HTTP status mapping
//! - Prometheus request and ledger metrics

pub mod dto;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult, ErrorResponse};
pub use metrics::Metrics;
pub use routes::{create_router, DEFAULT_MAX_BODY_SIZE};
pub use state::{AppState, Ledger};
