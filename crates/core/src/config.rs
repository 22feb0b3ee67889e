//! Configuration types shared across crates.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Server configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1:3000").
    #[serde(default = "default_bind")]
    pub bind: String,
}

fn default_bind() -> String {
    "127.0.0.1:3000".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

/// Origin check configuration.
///
/// The allowlist holds literal `Origin` header values; matching is exact
/// string equality with no scheme or port normalization.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OriginConfig {
    /// Whether to enforce the allowlist (default: true). When false, every
    /// origin is accepted.
    #[serde(default = "default_check_enabled")]
    pub check_enabled: bool,
    /// Permitted `Origin` header values.
    #[serde(default = "default_allowlist")]
    pub allowlist: Vec<String>,
}

fn default_check_enabled() -> bool {
    true
}

fn default_allowlist() -> Vec<String> {
    vec![
        "https://yudshj.synology.me".to_string(),
        "http://127.0.0.1".to_string(),
    ]
}

impl Default for OriginConfig {
    fn default() -> Self {
        Self {
            check_enabled: default_check_enabled(),
            allowlist: default_allowlist(),
        }
    }
}

/// Spool configuration: where payloads land and how often the persister wakes.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SpoolConfig {
    /// Root directory for persisted payloads.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Seconds between persister wakes (default: 5). Must be non-zero.
    #[serde(default = "default_flush_interval_secs")]
    pub flush_interval_secs: u64,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./json_out")
}

fn default_flush_interval_secs() -> u64 {
    5
}

impl Default for SpoolConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            flush_interval_secs: default_flush_interval_secs(),
        }
    }
}

impl SpoolConfig {
    /// Get the flush interval as a Duration.
    pub fn flush_interval(&self) -> Duration {
        Duration::from_secs(self.flush_interval_secs)
    }

    /// Validate spool configuration invariants.
    pub fn validate(&self) -> Result<(), String> {
        if self.flush_interval_secs == 0 {
            return Err("spool.flush_interval_secs must be non-zero".to_string());
        }
        Ok(())
    }
}

/// Top-level application configuration.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub origin: OriginConfig,
    #[serde(default)]
    pub spool: SpoolConfig,
}

impl AppConfig {
    /// Create a test configuration writing under the given directory.
    ///
    /// **For testing only.** Origin checking is disabled so plain requests
    /// pass; tests exercising the origin guard flip it back on.
    pub fn for_testing(output_dir: impl AsRef<Path>) -> Self {
        Self {
            server: ServerConfig::default(),
            origin: OriginConfig {
                check_enabled: false,
                ..Default::default()
            },
            spool: SpoolConfig {
                output_dir: output_dir.as_ref().to_path_buf(),
                flush_interval_secs: 1,
            },
        }
    }
}
