//! HTTP contract tests driven through the router without a socket.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use memory_zk::ScriptedProver;
use proof_bridge::{Bridge, SimulationPacing};
use serde_json::{Value, json};
use tower::ServiceExt;

fn router(prover: Option<ScriptedProver>) -> Router {
    let builder = Bridge::builder().pacing(SimulationPacing::Instant);
    let bridge = match prover {
        Some(prover) => builder.invoker(prover).build(),
        None => builder.build(),
    };
    proof_server::app(bridge)
}

fn proof_request(body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/generate-proof")
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap()
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_real_proof_response_shape() {
    let app = router(Some(ScriptedProver::verified(Some(42))));
    let body = json!({ "moves": 10, "time": 80, "matchedPairs": 8 }).to_string();

    let (status, json) = send(app, proof_request(body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(json["proofHash"], "0xSP1_002a_000a_0050_REAL");
    assert_eq!(json["calculatedScore"], 42);
    assert_eq!(json["isRealProof"], true);
    assert_eq!(
        json["gameData"],
        json!({ "moves": 10, "time": 80, "matchedPairs": 8 })
    );
    assert_eq!(json["remainingTime"], 40);

    let details = &json["proofDetails"];
    assert_eq!(details["algorithm"], "SP1 ZK-STARK");
    assert_eq!(details["verificationMethod"], "Real SP1 RISC-V zkVM");
    assert_eq!(details["scoreFormula"], "Remaining Time - Moves");
    let created_at = details["createdAt"].as_str().unwrap();
    assert!(created_at.ends_with('Z'));
    assert_eq!(created_at.len(), "2024-01-01T00:00:00.000Z".len());
}

#[tokio::test]
async fn test_failed_prover_answers_with_simulation() {
    let app = router(Some(ScriptedProver::failing("prover exited with status 1")));
    let body = json!({ "moves": 10, "time": 80, "matchedPairs": 8 }).to_string();

    let (status, json) = send(app, proof_request(body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["isRealProof"], false);
    assert_eq!(json["calculatedScore"], 30);
    assert!(json["proofHash"].as_str().unwrap().starts_with("0xSIM_001e_000a_0050_"));
    assert_eq!(json["proofDetails"]["verificationMethod"], "Simulation");
}

#[tokio::test]
async fn test_time_over_limit_scores_zero() {
    let app = router(None);
    let body = json!({ "moves": 200, "time": 150, "matchedPairs": 8 }).to_string();

    let (status, json) = send(app, proof_request(body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["calculatedScore"], 0);
    assert_eq!(json["remainingTime"], 0);
    assert_eq!(json["isRealProof"], false);
}

#[tokio::test]
async fn test_negative_moves_is_bad_request() {
    let prover = ScriptedProver::verified(None);
    let app = router(Some(prover.clone()));
    let body = json!({ "moves": -1, "time": 80, "matchedPairs": 8 }).to_string();

    let (status, json) = send(app, proof_request(body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["success"], false);
    assert!(json["error"].as_str().unwrap().contains("moves"));
    assert_eq!(prover.calls(), 0);
}

#[tokio::test]
async fn test_missing_field_is_bad_request() {
    let app = router(None);
    let body = json!({ "moves": 10, "time": 80 }).to_string();

    let (status, json) = send(app, proof_request(body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("matchedPairs"));
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let app = router(None);

    let (status, json) = send(app, proof_request("{\"moves\": 10,")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["success"], false);
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn test_oversized_verified_score_answers_with_simulation() {
    let app = router(Some(ScriptedProver::verified(Some(70_000))));
    let body = json!({ "moves": 10, "time": 80, "matchedPairs": 8 }).to_string();

    let (status, json) = send(app, proof_request(body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(json["isRealProof"], false);
    assert_eq!(json["calculatedScore"], 30);
    assert!(json["proofHash"].as_str().unwrap().starts_with("0xSIM_001e_000a_0050_"));
    assert_eq!(json["proofDetails"]["verificationMethod"], "Simulation");
}

#[tokio::test]
async fn test_health_reports_metrics() {
    let app = router(None);
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();

    let (status, json) = send(app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert!(json["timestamp"].as_str().unwrap().ends_with('Z'));
    assert_eq!(json["metrics"]["verified"], 0);
    assert_eq!(json["metrics"]["peakInFlight"], 0);
}
