//! Core domain types and shared logic for the Stash capture endpoint.
//!
//! This crate defines what the other crates agree on:
//! - Application configuration (server bind, origin policy, spool layout)
//! - Payload validation for `/save` request bodies

pub mod config;
pub mod error;
pub mod payload;

pub use config::{AppConfig, OriginConfig, ServerConfig, SpoolConfig};
pub use error::{Error, Result};
pub use payload::SavePayload;
