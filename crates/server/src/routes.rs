//! Request handlers.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use chrono::Utc;
use proof_bridge::{Bridge, TracingNarrative};
use serde_json::Value;
use tracing::info;

use crate::error::ApiError;
use crate::response::{HealthResponse, ProofResponse, iso_timestamp};

/// Shared handler state.
#[derive(Clone, Debug)]
pub struct AppState {
    bridge: Bridge,
    requests: Arc<AtomicU64>,
}

impl AppState {
    pub fn new(bridge: Bridge) -> Self {
        Self {
            bridge,
            requests: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn bridge(&self) -> &Bridge {
        &self.bridge
    }

    fn next_request_id(&self) -> String {
        format!("req-{}", self.requests.fetch_add(1, Ordering::Relaxed) + 1)
    }
}

/// `POST /api/generate-proof`
///
/// The body is taken as raw JSON so that type and range problems are reported
/// with the same 400 shape as syntax errors.
pub async fn generate_proof(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<ProofResponse>, ApiError> {
    let Json(body) = payload?;
    let request_id = state.next_request_id();
    info!(request = %request_id, game_data = %body, "Received game data");

    let narrative = TracingNarrative::for_request(request_id);
    let record = state.bridge.prove_json(&body, &narrative).await?;

    Ok(Json(ProofResponse::from(&record)))
}

/// `GET /health`
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        timestamp: iso_timestamp(Utc::now()),
        metrics: state.bridge.metrics().snapshot(),
    })
}
