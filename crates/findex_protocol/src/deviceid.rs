//! Device identities.

use std::fmt;

use crate::error::{ProtocolError, ProtocolResult};

/// Length of a device id in bytes.
pub const DEVICE_ID_LEN: usize = 32;

/// A synchronization peer identity.
///
/// Device ids are opaque fixed-width byte strings (in practice the digest of
/// the peer's certificate). They appear verbatim in device keys and in
/// global version lists, so their width is load-bearing for the key layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DeviceId([u8; DEVICE_ID_LEN]);

impl DeviceId {
    /// Creates a device id from its raw bytes.
    #[must_use]
    pub const fn new(bytes: [u8; DEVICE_ID_LEN]) -> Self {
        Self(bytes)
    }

    /// Creates a device id from a slice, failing unless it is exactly
    /// [`DEVICE_ID_LEN`] bytes long.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::InvalidDeviceId`] on any other length.
    pub fn from_slice(bytes: &[u8]) -> ProtocolResult<Self> {
        let raw: [u8; DEVICE_ID_LEN] =
            bytes
                .try_into()
                .map_err(|_| ProtocolError::InvalidDeviceId {
                    len: bytes.len(),
                    expected: DEVICE_ID_LEN,
                })?;
        Ok(Self(raw))
    }

    /// Returns the raw bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; DEVICE_ID_LEN] {
        &self.0
    }

    /// Returns the 64-bit short form of this id.
    ///
    /// The short form is what version-vector counters are keyed by; it is
    /// the big-endian interpretation of the id's first eight bytes.
    #[must_use]
    pub fn short_id(&self) -> u64 {
        let mut b = [0u8; 8];
        b.copy_from_slice(&self.0[..8]);
        u64::from_be_bytes(b)
    }
}

impl fmt::Display for DeviceId {
    /// Formats the first seven bytes as hex, enough to tell devices apart
    /// in logs.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in &self.0[..7] {
            write!(f, "{b:02x}")?;
        }
        Ok(())
    }
}

impl From<[u8; DEVICE_ID_LEN]> for DeviceId {
    fn from(bytes: [u8; DEVICE_ID_LEN]) -> Self {
        Self(bytes)
    }
}
