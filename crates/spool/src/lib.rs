//! In-memory ingestion spool and batch persister.
//!
//! Accepted `/save` submissions are appended to a mutex-guarded queue and
//! written to disk by a single background persister on a fixed interval.
//! The lock guards only the O(1) append and the O(1) drain swap, never any
//! file I/O, so producers are never blocked by slow writes.

pub mod queue;
pub mod writer;

pub use queue::{QueuedRequest, SpoolQueue};
pub use writer::{FlushStats, Persister, PersisterHandle, flush};
