//! # findex Store
//!
//! Ordered byte-key/byte-value storage abstraction for findex.
//!
//! The index core never talks to a storage engine directly. It consumes the
//! [`Backend`] trait, which models the small surface the index needs from any
//! ordered key-value engine:
//!
//! - point lookups ([`Backend::get`])
//! - atomic multi-key batch application ([`Backend::write`])
//! - point-in-time read views ([`Backend::snapshot`])
//! - ordered prefix/range iteration ([`Snapshot::iter_range`],
//!   [`Snapshot::iter_prefix`])
//!
//! Engine internals (WAL, compaction, caching) belong to the backend
//! implementation, not to this crate. The one implementation shipped here is
//! [`InMemoryBackend`], used for tests and ephemeral indexes.
//!
//! # Ordering contract
//!
//! Iteration must yield keys in ascending lexicographic byte order. The index
//! core's merge algorithms depend on this; a backend that violates it will
//! corrupt the derived global index.

mod backend;
mod batch;
mod error;
mod memory;

pub use backend::{Backend, KvIter, Snapshot};
pub use batch::{BatchOp, WriteBatch};
pub use error::{StoreError, StoreResult};
pub use memory::InMemoryBackend;
