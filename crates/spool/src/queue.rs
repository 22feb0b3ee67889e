//! The mutex-guarded ingestion queue.

use bytes::Bytes;
use stash_core::SavePayload;
use std::sync::{Mutex, MutexGuard};

/// One accepted, not-yet-persisted submission.
#[derive(Clone, Debug, PartialEq)]
pub struct QueuedRequest {
    /// Validated, non-empty identifier; becomes the base filename.
    pub name: String,
    /// Output subdirectory; empty means the output root itself.
    pub major_run_id: String,
    /// The exact received payload, persisted byte-for-byte.
    pub body: Bytes,
}

impl From<SavePayload> for QueuedRequest {
    fn from(payload: SavePayload) -> Self {
        Self {
            name: payload.name,
            major_run_id: payload.major_run_id,
            body: payload.body,
        }
    }
}

/// Unbounded queue of accepted requests awaiting persistence.
///
/// Append-only between drains; a drain replaces the whole sequence rather
/// than removing items one by one, so every item is observed by exactly one
/// drain. Growth is intentionally uncapped: a stalled persister lets memory
/// grow rather than applying backpressure.
#[derive(Debug, Default)]
pub struct SpoolQueue {
    items: Mutex<Vec<QueuedRequest>>,
}

impl SpoolQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an item. Returns immediately; no backpressure, no size limit.
    pub fn enqueue(&self, item: QueuedRequest) {
        self.lock().push(item);
    }

    /// Atomically take every queued item, leaving the queue empty.
    ///
    /// FIFO order is preserved per producer; interleaving across concurrent
    /// producers is unspecified.
    pub fn drain_all(&self) -> Vec<QueuedRequest> {
        std::mem::take(&mut *self.lock())
    }

    /// Number of items currently queued.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<QueuedRequest>> {
        // A poisoned lock means a producer panicked mid-call; the Vec itself
        // is still structurally valid, so keep serving.
        self.items
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
