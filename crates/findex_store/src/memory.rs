//! In-memory ordered backend.

use std::collections::BTreeMap;
use std::ops::Bound;

use parking_lot::RwLock;

use crate::backend::{Backend, KvIter, Snapshot};
use crate::batch::{BatchOp, WriteBatch};
use crate::error::StoreResult;

/// An in-memory ordered key-value backend.
///
/// Keys live in a `BTreeMap`, which gives the ascending byte ordering the
/// [`Backend`] contract requires for free. Snapshots clone the whole tree,
/// which is cheap enough for the test and ephemeral-index workloads this
/// backend targets; a persistent engine would use its own MVCC machinery
/// instead.
///
/// # Example
///
/// ```rust
/// use findex_store::{Backend, InMemoryBackend, WriteBatch};
///
/// let backend = InMemoryBackend::new();
/// let mut batch = WriteBatch::new();
/// batch.put(b"k".to_vec(), b"v".to_vec());
/// backend.write(&batch).unwrap();
/// assert_eq!(backend.get(b"k").unwrap(), Some(b"v".to_vec()));
/// ```
#[derive(Debug, Default)]
pub struct InMemoryBackend {
    data: RwLock<BTreeMap<Vec<u8>, Vec<u8>>>,
}

impl InMemoryBackend {
    /// Creates a new empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    /// Returns true if no keys are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.read().is_empty()
    }
}

impl Backend for InMemoryBackend {
    fn get(&self, key: &[u8]) -> StoreResult<Option<Vec<u8>>> {
        Ok(self.data.read().get(key).cloned())
    }

    fn write(&self, batch: &WriteBatch) -> StoreResult<()> {
        let mut data = self.data.write();
        for op in batch.ops() {
            match op {
                BatchOp::Put { key, value } => {
                    data.insert(key.clone(), value.clone());
                }
                BatchOp::Delete { key } => {
                    data.remove(key);
                }
            }
        }
        Ok(())
    }

    fn snapshot(&self) -> StoreResult<Box<dyn Snapshot>> {
        Ok(Box::new(MemorySnapshot {
            data: self.data.read().clone(),
        }))
    }
}

/// A point-in-time copy of the backend contents.
struct MemorySnapshot {
    data: BTreeMap<Vec<u8>, Vec<u8>>,
}

impl Snapshot for MemorySnapshot {
    fn get(&self, key: &[u8]) -> StoreResult<Option<Vec<u8>>> {
        Ok(self.data.get(key).cloned())
    }

    fn iter_range(&self, start: &[u8], end: &[u8]) -> StoreResult<KvIter<'_>> {
        if start >= end {
            return Ok(Box::new(std::iter::empty()));
        }
        let iter = self
            .data
            .range::<[u8], _>((Bound::Included(start), Bound::Excluded(end)))
            .map(|(k, v)| (k.clone(), v.clone()));
        Ok(Box::new(iter))
    }

    fn iter_prefix(&self, prefix: &[u8]) -> StoreResult<KvIter<'_>> {
        let prefix = prefix.to_vec();
        let iter = self
            .data
            .range::<[u8], _>((Bound::Included(prefix.as_slice()), Bound::Unbounded))
            .take_while(move |(k, _)| k.starts_with(&prefix))
            .map(|(k, v)| (k.clone(), v.clone()));
        Ok(Box::new(iter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn put(backend: &InMemoryBackend, key: &[u8], value: &[u8]) {
        let mut batch = WriteBatch::new();
        batch.put(key.to_vec(), value.to_vec());
        backend.write(&batch).unwrap();
    }

    #[test]
    fn get_absent_returns_none() {
        let backend = InMemoryBackend::new();
        assert_eq!(backend.get(b"missing").unwrap(), None);
    }

    #[test]
    fn write_applies_all_ops_in_order() {
        let backend = InMemoryBackend::new();
        let mut batch = WriteBatch::new();
        batch.put(b"a".to_vec(), b"1".to_vec());
        batch.put(b"a".to_vec(), b"2".to_vec());
        batch.put(b"b".to_vec(), b"3".to_vec());
        batch.delete(b"b".to_vec());
        backend.write(&batch).unwrap();

        assert_eq!(backend.get(b"a").unwrap(), Some(b"2".to_vec()));
        assert_eq!(backend.get(b"b").unwrap(), None);
    }

    #[test]
    fn snapshot_is_isolated_from_later_writes() {
        let backend = InMemoryBackend::new();
        put(&backend, b"k", b"old");

        let snap = backend.snapshot().unwrap();
        put(&backend, b"k", b"new");

        assert_eq!(snap.get(b"k").unwrap(), Some(b"old".to_vec()));
        assert_eq!(backend.get(b"k").unwrap(), Some(b"new".to_vec()));
    }

    #[test]
    fn range_iteration_is_ordered_and_end_exclusive() {
        let backend = InMemoryBackend::new();
        for key in [b"a", b"b", b"c", b"d"] {
            put(&backend, key, b"v");
        }

        let snap = backend.snapshot().unwrap();
        let keys: Vec<_> = snap
            .iter_range(b"b", b"d")
            .unwrap()
            .map(|(k, _)| k)
            .collect();
        assert_eq!(keys, vec![b"b".to_vec(), b"c".to_vec()]);
    }

    #[test]
    fn inverted_range_yields_nothing() {
        let backend = InMemoryBackend::new();
        put(&backend, b"a", b"v");

        let snap = backend.snapshot().unwrap();
        assert_eq!(snap.iter_range(b"z", b"a").unwrap().count(), 0);
    }

    #[test]
    fn prefix_iteration_stops_at_prefix_end() {
        let backend = InMemoryBackend::new();
        put(&backend, b"ab1", b"v");
        put(&backend, b"ab2", b"v");
        put(&backend, b"ac0", b"v");

        let snap = backend.snapshot().unwrap();
        let keys: Vec<_> = snap
            .iter_prefix(b"ab")
            .unwrap()
            .map(|(k, _)| k)
            .collect();
        assert_eq!(keys, vec![b"ab1".to_vec(), b"ab2".to_vec()]);
    }

    #[test]
    fn prefix_iteration_with_high_bytes() {
        let backend = InMemoryBackend::new();
        put(&backend, &[0xff, 0x01], b"v");
        put(&backend, &[0xff, 0xff], b"v");

        let snap = backend.snapshot().unwrap();
        assert_eq!(snap.iter_prefix(&[0xff]).unwrap().count(), 2);
    }
}
