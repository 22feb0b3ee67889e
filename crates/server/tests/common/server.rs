//! Server test utilities.

use stash_core::AppConfig;
use stash_server::{AppState, create_router};
use stash_spool::{FlushStats, SpoolQueue, flush};
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

/// A test server wrapper with all dependencies.
/// Note: #[allow(dead_code)] because each test file compiles common/ separately.
#[allow(dead_code)]
pub struct TestServer {
    pub router: axum::Router,
    pub state: AppState,
    pub output_dir: PathBuf,
    _temp_dir: TempDir,
}

#[allow(dead_code)]
impl TestServer {
    /// Create a new test server writing under a temporary directory.
    /// Origin checking is disabled; use [`TestServer::with_config`] to turn
    /// it on.
    pub async fn new() -> Self {
        Self::with_config(|_| {}).await
    }

    /// Create a test server with custom config modifications.
    pub async fn with_config<F>(modifier: F) -> Self
    where
        F: FnOnce(&mut AppConfig),
    {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
        let output_dir = temp_dir.path().join("json_out");

        let mut config = AppConfig::for_testing(&output_dir);
        modifier(&mut config);

        let queue = Arc::new(SpoolQueue::new());
        let state = AppState::new(config, queue);
        let router = create_router(state.clone());

        Self {
            router,
            state,
            output_dir,
            _temp_dir: temp_dir,
        }
    }

    /// Get access to the underlying queue.
    pub fn queue(&self) -> Arc<SpoolQueue> {
        self.state.queue.clone()
    }

    /// Drain the queue to disk, the way one persister wake would.
    pub async fn flush(&self) -> FlushStats {
        flush(&self.state.queue, &self.output_dir).await
    }
}
