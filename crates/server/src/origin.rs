//! Origin allowlist middleware.
//!
//! The allowlist is the security boundary here: comparison is exact string
//! equality against the literal `Origin` header, with no scheme, port, or
//! case normalization. On an allowed request the received origin is echoed
//! back verbatim in `Access-Control-Allow-Origin`, so only allowlisted pages
//! ever see a permissive CORS response.

use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::{Request, State};
use axum::http::{HeaderValue, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use stash_core::OriginConfig;
use std::collections::HashSet;

/// Static allow/deny decision for request origins.
#[derive(Clone, Debug)]
pub struct OriginPolicy {
    check_enabled: bool,
    allowlist: HashSet<String>,
}

impl OriginPolicy {
    /// Build a policy from configuration.
    pub fn from_config(config: &OriginConfig) -> Self {
        Self {
            check_enabled: config.check_enabled,
            allowlist: config.allowlist.iter().cloned().collect(),
        }
    }

    /// Whether a request carrying this `Origin` header may proceed.
    ///
    /// Always true when checking is disabled. When enabled, a missing header
    /// is denied like any unlisted origin.
    pub fn allows(&self, origin: Option<&str>) -> bool {
        if !self.check_enabled {
            return true;
        }
        origin.is_some_and(|origin| self.allowlist.contains(origin))
    }
}

/// Middleware guarding the `/save` routes.
///
/// Denied requests are rejected before the body is read or the queue is
/// touched. Allowed requests get the CORS response headers on the way out.
pub async fn origin_guard(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let origin = request
        .headers()
        .get(header::ORIGIN)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);

    if !state.origin.allows(origin.as_deref()) {
        return ApiError::InvalidOrigin.into_response();
    }

    let mut response = next.run(request).await;
    if let Some(origin) = origin
        && let Ok(value) = HeaderValue::from_str(&origin)
    {
        let headers = response.headers_mut();
        headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, value);
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("POST, OPTIONS"),
        );
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Content-Type"),
        );
    }
    response
}
