//! Global version lists.

use findex_protocol::wire::{Reader, Writer};
use findex_protocol::{Decode, DeviceId, Encode, ProtocolResult, Vector, VectorOrdering};

/// One holder entry in a [`VersionList`]: a device and the version of the
/// file it announced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileVersion {
    /// The holding device.
    pub device: DeviceId,
    /// The version that device holds.
    pub version: Vector,
}

/// The global version list for one (folder, name): every known holder,
/// strongest version first.
///
/// Invariants: a device appears at most once, and a persisted list is never
/// empty — emptying a list deletes its key instead.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionList {
    /// Holder entries, winning version first.
    pub versions: Vec<FileVersion>,
}

impl VersionList {
    /// Returns true if the list has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }

    /// Returns the winning entry, if any.
    #[must_use]
    pub fn winner(&self) -> Option<&FileVersion> {
        self.versions.first()
    }

    /// Sets `device`'s entry to `version`, keeping the list ordered.
    ///
    /// Returns false without modifying anything if the device already holds
    /// exactly this version (the idempotent no-op case). Otherwise any old
    /// entry for the device is removed and the new one inserted before the
    /// first entry whose version compares Equal, Lesser or ConcurrentLesser
    /// against it. Comparing against ConcurrentLesser too is what forces a
    /// deterministic total order when causality alone does not decide.
    pub fn update(&mut self, device: DeviceId, version: Vector) -> bool {
        if let Some(i) = self.versions.iter().position(|v| v.device == device) {
            if self.versions[i].version.equal(&version) {
                return false;
            }
            self.versions.remove(i);
        }

        let entry = FileVersion { device, version };
        let at = self.versions.iter().position(|v| {
            matches!(
                v.version.compare(&entry.version),
                VectorOrdering::Equal | VectorOrdering::Lesser | VectorOrdering::ConcurrentLesser
            )
        });
        match at {
            Some(i) => self.versions.insert(i, entry),
            None => self.versions.push(entry),
        }
        true
    }

    /// Removes `device`'s entry. Returns false if it was not present, which
    /// is a legal no-op.
    pub fn remove(&mut self, device: &DeviceId) -> bool {
        match self.versions.iter().position(|v| v.device == *device) {
            Some(i) => {
                self.versions.remove(i);
                true
            }
            None => false,
        }
    }

    /// Returns the devices holding the winning version.
    ///
    /// Entries are sorted with equals contiguous at the front, so this walks
    /// from the head and stops at the first non-equal version.
    #[must_use]
    pub fn available(&self) -> Vec<DeviceId> {
        let Some(winner) = self.winner() else {
            return Vec::new();
        };
        self.versions
            .iter()
            .take_while(|v| v.version.equal(&winner.version))
            .map(|v| v.device)
            .collect()
    }
}

impl Encode for VersionList {
    fn encode(&self) -> Vec<u8> {
        let mut w = Writer::with_capacity(4 + self.versions.len() * 48);
        w.put_u32(self.versions.len() as u32);
        for v in &self.versions {
            w.put_bytes(v.device.as_bytes());
            w.put_bytes(&v.version.encode());
        }
        w.into_bytes()
    }
}

impl Decode for VersionList {
    fn decode(bytes: &[u8]) -> ProtocolResult<Self> {
        let mut r = Reader::new(bytes);
        let count = r.u32()? as usize;
        let mut versions = Vec::with_capacity(count.min(64));
        for _ in 0..count {
            let device = DeviceId::from_slice(r.bytes()?)?;
            let version = Vector::decode(r.bytes()?)?;
            versions.push(FileVersion { device, version });
        }
        r.expect_end()?;
        Ok(Self { versions })
    }
}
