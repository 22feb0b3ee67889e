//! `/save` handlers.

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use axum::body::Bytes;
use axum::extract::State;
use axum::extract::rejection::BytesRejection;
use axum::http::StatusCode;
use stash_spool::QueuedRequest;

/// `POST /save`: validate the JSON body and queue it for persistence.
///
/// Returns as soon as the item is queued. The disk write happens on the next
/// persister wake; the client has no way to observe its outcome.
pub async fn save_json(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> ApiResult<(StatusCode, &'static str)> {
    let body = body.map_err(|_| ApiError::BodyRead)?;
    let payload = stash_core::payload::validate(body)?;

    tracing::debug!(name = %payload.name, major_run_id = %payload.major_run_id, "payload queued");
    state.queue.enqueue(QueuedRequest::from(payload));

    Ok((StatusCode::OK, "JSON received successfully"))
}

/// `OPTIONS /save`: CORS preflight. The origin guard has already run and
/// attaches the CORS headers on the way out; nothing left to check here.
pub async fn save_preflight() -> StatusCode {
    StatusCode::OK
}
