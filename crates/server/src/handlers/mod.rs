//! HTTP request handlers.

mod health;
mod save;

pub use health::health_check;
pub use save::{save_json, save_preflight};
