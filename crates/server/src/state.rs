//! Application state shared across handlers.

use crate::origin::OriginPolicy;
use stash_core::AppConfig;
use stash_spool::SpoolQueue;
use std::sync::Arc;

/// Shared application state.
///
/// The queue is the only shared mutable resource; it is handed to both the
/// request handlers and the background persister.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Ingestion queue feeding the background persister.
    pub queue: Arc<SpoolQueue>,
    /// Origin allow/deny policy.
    pub origin: Arc<OriginPolicy>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Panics
    ///
    /// Panics if spool configuration validation fails; a zero flush interval
    /// would make the persister spin.
    pub fn new(config: AppConfig, queue: Arc<SpoolQueue>) -> Self {
        if let Err(error) = config.spool.validate() {
            panic!("Invalid spool configuration: {error}");
        }

        let origin = OriginPolicy::from_config(&config.origin);
        Self {
            config: Arc::new(config),
            queue,
            origin: Arc::new(origin),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_builds_policy_from_config() {
        let mut config = AppConfig::for_testing("/tmp/out");
        config.origin.check_enabled = true;
        config.origin.allowlist = vec!["http://127.0.0.1".to_string()];

        let state = AppState::new(config, Arc::new(SpoolQueue::new()));
        assert!(state.origin.allows(Some("http://127.0.0.1")));
        assert!(!state.origin.allows(Some("http://example.com")));
    }

    #[test]
    #[should_panic(expected = "Invalid spool configuration")]
    fn new_rejects_zero_flush_interval() {
        let mut config = AppConfig::for_testing("/tmp/out");
        config.spool.flush_interval_secs = 0;
        AppState::new(config, Arc::new(SpoolQueue::new()));
    }
}
