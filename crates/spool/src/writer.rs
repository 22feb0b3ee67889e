//! Batch persister: drains the queue and writes payloads to disk.

use crate::queue::{QueuedRequest, SpoolQueue};
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Counters for one flush pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FlushStats {
    /// Files written successfully.
    pub written: usize,
    /// Items dropped after a directory or write failure.
    pub failed: usize,
}

/// Drain the queue and write every item under `output_root`.
///
/// An empty queue touches nothing on disk. Items land at
/// `<output_root>/<majorRunId>/<name>.json`, with the subdirectory omitted
/// when `major_run_id` is empty; existing files of the same name are
/// overwritten (last write wins). Per-item failures are logged and the batch
/// continues; failed items are dropped, never re-enqueued. The queue lock is
/// released before any I/O starts.
pub async fn flush(queue: &SpoolQueue, output_root: &Path) -> FlushStats {
    let batch = queue.drain_all();
    if batch.is_empty() {
        return FlushStats::default();
    }

    let mut stats = FlushStats::default();
    for item in batch {
        match write_item(output_root, &item).await {
            Ok(path) => {
                tracing::debug!(name = %item.name, path = %path.display(), "payload persisted");
                stats.written += 1;
            }
            Err(err) => {
                tracing::warn!(name = %item.name, error = %err, "dropping payload after write failure");
                stats.failed += 1;
            }
        }
    }

    tracing::info!(
        written = stats.written,
        failed = stats.failed,
        "spool flush complete"
    );
    stats
}

/// Why a single item could not be persisted.
#[derive(Debug, thiserror::Error)]
enum WriteError {
    #[error("unsafe path component: {0:?}")]
    UnsafeComponent(String),

    #[error("failed to create directory {dir}: {source}")]
    CreateDir {
        dir: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write file {path}: {source}")]
    WriteFile {
        path: PathBuf,
        source: std::io::Error,
    },
}

async fn write_item(output_root: &Path, item: &QueuedRequest) -> Result<PathBuf, WriteError> {
    if !is_safe_component(&item.name) {
        return Err(WriteError::UnsafeComponent(item.name.clone()));
    }

    let dir = if item.major_run_id.is_empty() {
        output_root.to_path_buf()
    } else {
        if !is_safe_component(&item.major_run_id) {
            return Err(WriteError::UnsafeComponent(item.major_run_id.clone()));
        }
        output_root.join(&item.major_run_id)
    };

    tokio::fs::create_dir_all(&dir)
        .await
        .map_err(|source| WriteError::CreateDir {
            dir: dir.clone(),
            source,
        })?;

    let path = dir.join(format!("{}.json", item.name));
    tokio::fs::write(&path, &item.body)
        .await
        .map_err(|source| WriteError::WriteFile {
            path: path.clone(),
            source,
        })?;

    Ok(path)
}

/// A value usable as a single normal path component: no separators, no
/// `.`/`..`, no NUL. Anything else could escape the output root.
fn is_safe_component(value: &str) -> bool {
    if value.is_empty() || value.contains('\0') || value.contains('/') || value.contains('\\') {
        return false;
    }
    let mut components = Path::new(value).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

/// The single long-lived background writer.
///
/// Wakes on a fixed interval, drains the queue, and writes the batch. The
/// returned handle carries a shutdown channel so tests and graceful shutdown
/// can stop the loop deterministically instead of waiting out the timer.
pub struct Persister {
    queue: Arc<SpoolQueue>,
    output_root: PathBuf,
    interval: Duration,
}

impl Persister {
    /// Create a persister draining `queue` into `output_root` every `interval`.
    pub fn new(queue: Arc<SpoolQueue>, output_root: impl AsRef<Path>, interval: Duration) -> Self {
        Self {
            queue,
            output_root: output_root.as_ref().to_path_buf(),
            interval,
        }
    }

    /// Spawn the persister loop on the current runtime.
    pub fn spawn(self) -> PersisterHandle {
        let (shutdown_tx, mut shutdown_rx) = watch::channel(());
        let handle = tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = tokio::time::sleep(self.interval) => {
                        flush(&self.queue, &self.output_root).await;
                    }
                    _ = shutdown_rx.changed() => {
                        // Final drain so a graceful stop does not strand
                        // items a later timer tick would have written.
                        flush(&self.queue, &self.output_root).await;
                        break;
                    }
                }
            }
        });

        PersisterHandle {
            shutdown: shutdown_tx,
            handle,
        }
    }
}

/// Handle to a spawned [`Persister`].
pub struct PersisterHandle {
    shutdown: watch::Sender<()>,
    handle: JoinHandle<()>,
}

impl PersisterHandle {
    /// Signal the loop to stop and wait for its final flush.
    pub async fn shutdown(self) {
        let _ = self.shutdown.send(());
        if let Err(err) = self.handle.await {
            tracing::error!(error = ?err, "persister task failed during shutdown");
        }
    }
}
