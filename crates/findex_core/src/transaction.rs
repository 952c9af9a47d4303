//! Snapshot/batch transactions.
//!
//! Every mutating index operation runs against one [`Transaction`]: a
//! consistent snapshot for all of its reads, plus two deferred write
//! batches (device records and global entries). Writes are buffered, never
//! applied mid-scan, so an operation can iterate the snapshot while
//! mutating the same key range. [`Transaction::flush_if_large`] bounds peak
//! batch memory on large folders; [`Transaction::commit`] applies whatever
//! remains.

use findex_protocol::{Decode, DeviceId, Encode, FileRecord, Vector};
use findex_store::{Backend, Snapshot, WriteBatch};
use tracing::debug;

use crate::clock::Clock;
use crate::error::{IndexError, IndexResult};
use crate::keys;
use crate::version_list::VersionList;

/// Flush batches to the backend once they hold this many operations.
pub(crate) const BATCH_FLUSH_SIZE: usize = 64;

/// An open transaction: two deferred write batches against one backend.
///
/// The matching snapshot is handed out separately by [`Transaction::open`]
/// so callers can iterate it while buffering writes here.
pub(crate) struct Transaction<'a> {
    backend: &'a dyn Backend,
    pub(crate) device_batch: WriteBatch,
    pub(crate) global_batch: WriteBatch,
}

impl<'a> Transaction<'a> {
    /// Opens a transaction and its consistent read view.
    pub(crate) fn open(backend: &'a dyn Backend) -> IndexResult<(Self, Box<dyn Snapshot>)> {
        let snapshot = backend.snapshot()?;
        Ok((
            Self {
                backend,
                device_batch: WriteBatch::new(),
                global_batch: WriteBatch::new(),
            },
            snapshot,
        ))
    }

    /// Applies and clears any batch that has grown past
    /// [`BATCH_FLUSH_SIZE`] operations.
    ///
    /// The open snapshot is unaffected: reads keep observing the state from
    /// when the transaction opened.
    pub(crate) fn flush_if_large(&mut self) -> IndexResult<()> {
        if self.device_batch.len() > BATCH_FLUSH_SIZE {
            debug!(writes = self.device_batch.len(), "flush device batch");
            self.backend.write(&self.device_batch)?;
            self.device_batch.clear();
        }
        if self.global_batch.len() > BATCH_FLUSH_SIZE {
            debug!(writes = self.global_batch.len(), "flush global batch");
            self.backend.write(&self.global_batch)?;
            self.global_batch.clear();
        }
        Ok(())
    }

    /// Applies all remaining buffered writes.
    pub(crate) fn commit(self) -> IndexResult<()> {
        if !self.device_batch.is_empty() {
            debug!(writes = self.device_batch.len(), "commit device batch");
            self.backend.write(&self.device_batch)?;
        }
        if !self.global_batch.is_empty() {
            debug!(writes = self.global_batch.len(), "commit global batch");
            self.backend.write(&self.global_batch)?;
        }
        Ok(())
    }

    /// Buffers a device record write, stamping a fresh local version if the
    /// record has none. Returns the record's local version.
    pub(crate) fn insert(
        &mut self,
        clock: &Clock,
        folder: &[u8],
        device: &DeviceId,
        record: &FileRecord,
    ) -> i64 {
        debug!(
            folder = %String::from_utf8_lossy(folder),
            %device,
            name = %record.name,
            "insert"
        );

        let mut record = record.clone();
        if record.local_version == 0 {
            record.local_version = clock.advance(0);
        }
        let local_version = record.local_version;

        let key = keys::device_key(folder, device, record.name.as_bytes());
        self.device_batch.put(key, record.encode());

        local_version
    }

    /// Adds or moves `device` with `version` in the global version list for
    /// `(folder, name)`, creating the entry if needed.
    ///
    /// Returns false if the device already held exactly this version.
    pub(crate) fn update_global(
        &mut self,
        snap: &dyn Snapshot,
        folder: &[u8],
        device: &DeviceId,
        name: &str,
        version: &Vector,
    ) -> IndexResult<bool> {
        debug!(
            folder = %String::from_utf8_lossy(folder),
            %device,
            name,
            ?version,
            "update global"
        );

        let key = keys::global_key(folder, name.as_bytes());
        let mut list = match snap.get(&key)? {
            Some(raw) => {
                VersionList::decode(&raw).map_err(|e| IndexError::corrupt(&key, e))?
            }
            None => VersionList::default(),
        };

        if !list.update(*device, version.clone()) {
            return Ok(false);
        }

        self.global_batch.put(key, list.encode());
        Ok(true)
    }

    /// Removes `device` from the global version list for `(folder, name)`,
    /// deleting the entry outright if the list empties.
    ///
    /// A missing entry is a no-op: the first update for a file may already
    /// be flagged invalid, in which case it never appeared globally.
    pub(crate) fn remove_from_global(
        &mut self,
        snap: &dyn Snapshot,
        folder: &[u8],
        device: &DeviceId,
        name: &str,
    ) -> IndexResult<()> {
        debug!(
            folder = %String::from_utf8_lossy(folder),
            %device,
            name,
            "remove from global"
        );

        let key = keys::global_key(folder, name.as_bytes());
        let Some(raw) = snap.get(&key)? else {
            return Ok(());
        };
        let mut list = VersionList::decode(&raw).map_err(|e| IndexError::corrupt(&key, e))?;

        list.remove(device);

        if list.is_empty() {
            self.global_batch.delete(key);
        } else {
            self.global_batch.put(key, list.encode());
        }
        Ok(())
    }
}
