//! # findex Protocol
//!
//! The primitives the findex index core is built on:
//!
//! - [`DeviceId`] — fixed 32-byte peer identity, with the 64-bit short form
//!   used as a version-vector counter id.
//! - [`Vector`] — causal version vector with a five-way comparison outcome
//!   ([`VectorOrdering`]) covering both ordered and concurrent histories.
//! - [`FileRecord`] / [`TruncatedRecord`] — per-file metadata records with a
//!   flag bitset, modification time, local-version stamp and (full records
//!   only) a block list.
//! - [`wire`] — the big-endian, length-prefixed binary encoding everything
//!   persisted by the index serializes through.
//!
//! ## Encoding
//!
//! All persisted values implement [`Encode`] and [`Decode`]. Encoding is
//! deterministic: identical values produce identical bytes, which the index
//! relies on when comparing stored records. Decoding malformed input returns
//! a [`ProtocolError`]; it never panics.

mod deviceid;
mod error;
mod fileinfo;
mod vector;
pub mod wire;

pub use deviceid::{DeviceId, DEVICE_ID_LEN};
pub use error::{ProtocolError, ProtocolResult};
pub use fileinfo::{
    BlockInfo, FileRecord, TruncatedRecord, FLAG_DELETED, FLAG_DIRECTORY, FLAG_INVALID,
    FLAG_NO_PERMISSION_BITS,
};
pub use vector::{Counter, Vector, VectorOrdering};

/// Trait for types that serialize to the findex wire format.
pub trait Encode {
    /// Encodes this value to bytes.
    fn encode(&self) -> Vec<u8>;
}

/// Trait for types that deserialize from the findex wire format.
pub trait Decode: Sized {
    /// Decodes a value from bytes, failing on malformed input.
    ///
    /// # Errors
    ///
    /// Returns a [`ProtocolError`] if the input is truncated or otherwise
    /// malformed.
    fn decode(bytes: &[u8]) -> ProtocolResult<Self>;
}
