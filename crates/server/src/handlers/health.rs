//! Health check handler.

use axum::Json;
use serde_json::{Value, json};

/// `GET /health`: liveness probe, intentionally outside the origin guard so
/// load balancers can hit it without an `Origin` header.
pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
