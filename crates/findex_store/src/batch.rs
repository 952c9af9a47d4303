//! Buffered write batches.

/// A single buffered write operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchOp {
    /// Insert or overwrite a key.
    Put {
        /// The key to write.
        key: Vec<u8>,
        /// The value to store under the key.
        value: Vec<u8>,
    },
    /// Remove a key. Deleting an absent key is a no-op.
    Delete {
        /// The key to remove.
        key: Vec<u8>,
    },
}

/// An ordered collection of writes applied atomically by
/// [`Backend::write`](crate::Backend::write).
///
/// Operations are applied in insertion order, so a later operation on the
/// same key wins.
#[derive(Debug, Default)]
pub struct WriteBatch {
    ops: Vec<BatchOp>,
}

impl WriteBatch {
    /// Creates an empty batch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Buffers a put operation.
    pub fn put(&mut self, key: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>) {
        self.ops.push(BatchOp::Put {
            key: key.into(),
            value: value.into(),
        });
    }

    /// Buffers a delete operation.
    pub fn delete(&mut self, key: impl Into<Vec<u8>>) {
        self.ops.push(BatchOp::Delete { key: key.into() });
    }

    /// Returns the number of buffered operations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Returns true if no operations are buffered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Discards all buffered operations, keeping the allocation.
    pub fn clear(&mut self) {
        self.ops.clear();
    }

    /// Returns the buffered operations in insertion order.
    #[must_use]
    pub fn ops(&self) -> &[BatchOp] {
        &self.ops
    }
}
