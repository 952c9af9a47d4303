//! Error types for the protocol primitives.

use thiserror::Error;

/// Result type for protocol operations.
pub type ProtocolResult<T> = Result<T, ProtocolError>;

/// Errors raised while decoding wire-format values.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// The input ended before the value was complete.
    #[error("unexpected end of input: needed {needed} more bytes")]
    UnexpectedEnd {
        /// How many further bytes the decoder required.
        needed: usize,
    },

    /// Bytes remained after the value was fully decoded.
    #[error("trailing data: {remaining} bytes left after decode")]
    TrailingData {
        /// Number of unconsumed bytes.
        remaining: usize,
    },

    /// A length prefix exceeded the remaining input.
    #[error("length prefix {length} exceeds remaining input ({remaining} bytes)")]
    LengthOutOfBounds {
        /// The declared length.
        length: usize,
        /// Bytes actually remaining.
        remaining: usize,
    },

    /// A string field did not hold valid UTF-8.
    #[error("string field is not valid UTF-8")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    /// A device id field had the wrong length.
    #[error("invalid device id length: {len}, expected {expected}")]
    InvalidDeviceId {
        /// The length encountered.
        len: usize,
        /// The required length.
        expected: usize,
    },
}
