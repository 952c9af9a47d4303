//! Backend trait definitions.

use crate::batch::WriteBatch;
use crate::error::StoreResult;

/// An ordered key/value cursor yielding owned `(key, value)` pairs in
/// ascending lexicographic key order.
pub type KvIter<'a> = Box<dyn Iterator<Item = (Vec<u8>, Vec<u8>)> + 'a>;

/// An ordered byte-keyed storage engine.
///
/// Backends are **opaque ordered byte stores**. The index core owns all key
/// and value interpretation; backends only move bytes.
///
/// # Invariants
///
/// - `write` applies the whole batch atomically: after a crash, either all
///   operations in the batch are visible or none are.
/// - `snapshot` returns a read view that is unaffected by later writes.
/// - Iteration order is ascending lexicographic byte order of keys.
///
/// # Implementors
///
/// - [`crate::InMemoryBackend`] for tests and ephemeral indexes.
/// - Persistent engines (LSM trees, B-trees) supplied by the embedding
///   application.
pub trait Backend: Send + Sync {
    /// Reads the value stored under `key`, or `None` if the key is absent.
    ///
    /// Absence is not an error; it is an expected outcome on lookups.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine fails to read.
    fn get(&self, key: &[u8]) -> StoreResult<Option<Vec<u8>>>;

    /// Applies all operations in `batch` atomically.
    ///
    /// The batch is not consumed; the caller may clear and reuse it.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine fails to apply the batch. On error no
    /// operation from the batch may be visible.
    fn write(&self, batch: &WriteBatch) -> StoreResult<()>;

    /// Opens a consistent point-in-time read view.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine cannot create a snapshot.
    fn snapshot(&self) -> StoreResult<Box<dyn Snapshot>>;
}

/// A consistent point-in-time read view of a [`Backend`].
///
/// All reads through one snapshot observe the same state, no matter how many
/// writes land on the backend in the meantime. Dropping the snapshot releases
/// it.
pub trait Snapshot: Send {
    /// Reads the value stored under `key` in this view, or `None` if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine fails to read.
    fn get(&self, key: &[u8]) -> StoreResult<Option<Vec<u8>>>;

    /// Iterates keys in `start..end` (end exclusive) in ascending order.
    ///
    /// An empty or inverted range yields nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine cannot open a cursor.
    fn iter_range(&self, start: &[u8], end: &[u8]) -> StoreResult<KvIter<'_>>;

    /// Iterates all keys beginning with `prefix` in ascending order.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine cannot open a cursor.
    fn iter_prefix(&self, prefix: &[u8]) -> StoreResult<KvIter<'_>>;
}
