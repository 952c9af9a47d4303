//! Error types for the index core.

use findex_protocol::ProtocolError;
use findex_store::StoreError;
use thiserror::Error;

/// Result type for index operations.
pub type IndexResult<T> = Result<T, IndexError>;

/// Errors that can occur in index operations.
///
/// Expected absence (a key that simply is not there) is never an error; it
/// surfaces as `Option::None` from lookups. The variants here are genuine
/// failures that abort the current operation.
#[derive(Debug, Error)]
pub enum IndexError {
    /// The underlying storage engine failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// A stored value read back from the store failed to parse.
    ///
    /// This is store corruption: the value was written by this code and
    /// must parse. It is surfaced rather than skipped so the data loss is
    /// visible.
    #[error("corrupt record at key {key:02x?}: {source}")]
    CorruptRecord {
        /// The key whose value failed to parse.
        key: Vec<u8>,
        /// The decode failure.
        source: ProtocolError,
    },

    /// The stored state violates an index invariant.
    ///
    /// Examples: a persisted global entry with zero versions, a global
    /// entry referencing a device record that does not exist (outside the
    /// repair pass), a key shorter than its fixed-width prefix.
    #[error("storage inconsistency at key {key:02x?}: {message}")]
    Inconsistent {
        /// The offending key.
        key: Vec<u8>,
        /// What invariant was violated.
        message: &'static str,
    },
}

impl IndexError {
    /// Creates a corrupt-record error for `key`.
    pub fn corrupt(key: &[u8], source: ProtocolError) -> Self {
        Self::CorruptRecord {
            key: key.to_vec(),
            source,
        }
    }

    /// Creates an inconsistency error for `key`.
    pub fn inconsistent(key: &[u8], message: &'static str) -> Self {
        Self::Inconsistent {
            key: key.to_vec(),
            message,
        }
    }
}
