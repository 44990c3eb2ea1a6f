//! HTTP surface for memory game proofs.
//!
//! Exposes the [`Bridge`] over two routes:
//! - `POST /api/generate-proof` validates game telemetry and answers with a
//!   proof record, real or simulated
//! - `GET /health` reports liveness and bridge metrics
pub mod config;
pub mod error;
pub mod logging;
pub mod response;
pub mod routes;

use axum::Router;
use axum::routing::{get, post};
use proof_bridge::Bridge;

pub use config::ServerConfig;
pub use error::ApiError;
pub use routes::AppState;

/// Builds the application router around a bridge.
pub fn app(bridge: Bridge) -> Router {
    Router::new()
        .route("/api/generate-proof", post(routes::generate_proof))
        .route("/health", get(routes::health))
        .with_state(AppState::new(bridge))
}
