//! HTTP capture surface for Stash.
//!
//! This crate provides the HTTP endpoint:
//! - `POST /save` — validate a JSON payload and queue it for persistence
//! - `OPTIONS /save` — CORS preflight
//! - `GET /health` — liveness probe

pub mod error;
pub mod handlers;
pub mod origin;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use origin::OriginPolicy;
pub use routes::create_router;
pub use state::AppState;
