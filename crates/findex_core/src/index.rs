//! The file index: per-device file lists plus the derived global index.

use std::collections::BTreeSet;
use std::sync::Arc;

use findex_protocol::{
    Decode, DeviceId, Encode, FileRecord, TruncatedRecord, VectorOrdering, FLAG_DELETED,
};
use findex_store::{Backend, InMemoryBackend, Snapshot, WriteBatch};
use tracing::{debug, info};

use crate::clock::Clock;
use crate::error::{IndexError, IndexResult};
use crate::keys::{self, KEY_TYPE_DEVICE, KEY_TYPE_GLOBAL};
use crate::transaction::Transaction;
use crate::version_list::VersionList;

/// Upper bound for name ranges. File names are UTF-8 and UTF-8 never
/// contains 0xff, so this sorts after every real name.
const NAME_RANGE_END: [u8; 4] = [0xff; 4];

/// What [`FileIndex::replace_with_policy`] does with stored files the
/// device no longer announces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeletePolicy {
    /// Remove the device record and its global reference outright. Used
    /// for full-trust local replaces.
    Purge,
    /// Replace the record with a tombstone: deleted flag set, version
    /// advanced for the local device, fresh local-version stamp,
    /// modification time preserved. Used when deletions must propagate to
    /// other peers as causally-ordered facts.
    Tombstone {
        /// Short id of the local device, advanced in the tombstone's
        /// version vector.
        short_id: u64,
    },
}

/// The persistent metadata index.
///
/// One instance serves every folder; the folder id is a parameter of each
/// call. Stored state lives in two key namespaces of one ordered backend:
/// per-device file records, and the derived global version lists that say
/// which devices hold which versions of each name and which version wins.
///
/// # Concurrency contract
///
/// Any number of queries, and writers touching *different* (folder,
/// device) pairs, may run concurrently. Two replace/update calls for the
/// **same** (folder, device) must not run concurrently; the surrounding
/// synchronization layer serializes them. This is a documented contract,
/// not something the index enforces.
///
/// # Panics
///
/// All operations panic if `folder` is longer than
/// [`keys::FOLDER_LEN`] bytes. That is a programming error, not a
/// runtime condition.
pub struct FileIndex {
    backend: Arc<dyn Backend>,
    clock: Clock,
}

impl FileIndex {
    /// Creates an index on top of `backend`.
    #[must_use]
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self {
            backend,
            clock: Clock::new(),
        }
    }

    /// Creates an ephemeral index backed by [`InMemoryBackend`].
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryBackend::new()))
    }

    /// Runs `body` inside a transaction, committing buffered writes on
    /// every exit path, errors included. The body's error wins over a
    /// commit error.
    fn with_txn<T>(
        &self,
        body: impl FnOnce(&mut Transaction<'_>, &dyn Snapshot) -> IndexResult<T>,
    ) -> IndexResult<T> {
        let (mut txn, snapshot) = Transaction::open(self.backend.as_ref())?;
        let result = body(&mut txn, snapshot.as_ref());
        let committed = txn.commit();
        match result {
            Ok(value) => {
                committed?;
                Ok(value)
            }
            Err(e) => Err(e),
        }
    }

    /// Replaces `device`'s entire stored file list with `files`, purging
    /// files no longer announced.
    ///
    /// Returns the highest local-version stamp issued during the pass;
    /// callers use it as the high-water mark for change notification.
    pub fn replace(
        &self,
        folder: &[u8],
        device: &DeviceId,
        files: Vec<FileRecord>,
    ) -> IndexResult<i64> {
        self.replace_with_policy(folder, device, files, DeletePolicy::Purge)
    }

    /// Replaces `device`'s stored file list, tombstoning files no longer
    /// announced so the deletions propagate to other peers.
    ///
    /// `short_id` is the local device's short id; each tombstone's version
    /// vector is advanced for it.
    pub fn replace_with_delete(
        &self,
        folder: &[u8],
        device: &DeviceId,
        files: Vec<FileRecord>,
        short_id: u64,
    ) -> IndexResult<i64> {
        self.replace_with_policy(folder, device, files, DeletePolicy::Tombstone { short_id })
    }

    /// Replaces `device`'s stored file list with `files`, applying
    /// `policy` to files the device no longer announces.
    ///
    /// This is a single-pass sorted merge of the incoming list against the
    /// stored key range; the stored list is never loaded into memory as a
    /// whole.
    pub fn replace_with_policy(
        &self,
        folder: &[u8],
        device: &DeviceId,
        mut files: Vec<FileRecord>,
        policy: DeletePolicy,
    ) -> IndexResult<i64> {
        // Same order as the stored keys, so the two sides merge by name.
        files.sort_by(|a, b| a.name.cmp(&b.name));

        let start = keys::device_key(folder, device, b"");
        let end = keys::device_key(folder, device, &NAME_RANGE_END);

        self.with_txn(|txn, snap| {
            enum Step {
                InsertNew,
                CompareBoth,
                RemoveStored,
            }

            let mut stored = snap.iter_range(&start, &end)?.peekable();
            let mut incoming = files.iter().peekable();
            let mut max_local = 0i64;

            loop {
                let step = match (incoming.peek(), stored.peek()) {
                    (None, None) => break,
                    (Some(_), None) => Step::InsertNew,
                    (None, Some(_)) => Step::RemoveStored,
                    (Some(new), Some((key, _))) => {
                        let old_name = keys::device_key_name(key).ok_or_else(|| {
                            IndexError::inconsistent(key, "device key shorter than fixed prefix")
                        })?;
                        match new.name.as_bytes().cmp(old_name) {
                            std::cmp::Ordering::Less => Step::InsertNew,
                            std::cmp::Ordering::Equal => Step::CompareBoth,
                            std::cmp::Ordering::Greater => Step::RemoveStored,
                        }
                    }
                };

                match step {
                    Step::InsertNew => {
                        // The store is missing this file.
                        let Some(new) = incoming.next() else { break };
                        debug!(name = %new.name, "replace; missing - insert");
                        let lv = txn.insert(&self.clock, folder, device, new);
                        max_local = max_local.max(lv);
                        self.set_global(txn, snap, folder, device, new)?;
                    }
                    Step::CompareBoth => {
                        let (Some(new), Some((key, value))) = (incoming.next(), stored.next())
                        else {
                            break;
                        };
                        let old = TruncatedRecord::decode(&value)
                            .map_err(|e| IndexError::corrupt(&key, e))?;
                        // An equal version with different flags is still an
                        // update: the invalid flag can be set without a
                        // version bump.
                        if !new.version.equal(&old.version) || new.flags != old.flags {
                            debug!(name = %new.name, "replace; differs - insert");
                            let lv = txn.insert(&self.clock, folder, device, new);
                            max_local = max_local.max(lv);
                            self.set_global(txn, snap, folder, device, new)?;
                        }
                    }
                    Step::RemoveStored => {
                        // The device no longer announces this file.
                        let Some((key, value)) = stored.next() else { break };
                        let lv =
                            self.apply_delete(txn, snap, folder, device, &key, &value, policy)?;
                        max_local = max_local.max(lv);
                    }
                }

                txn.flush_if_large()?;
            }

            Ok(max_local)
        })
    }

    /// Applies a batch of announced changes without touching files that
    /// are not mentioned. Additive only: this path never deletes.
    ///
    /// Returns the highest local-version stamp issued.
    pub fn update(
        &self,
        folder: &[u8],
        device: &DeviceId,
        files: &[FileRecord],
    ) -> IndexResult<i64> {
        self.with_txn(|txn, snap| {
            let mut max_local = 0i64;
            for new in files {
                let key = keys::device_key(folder, device, new.name.as_bytes());
                let differs = match snap.get(&key)? {
                    None => true,
                    Some(raw) => {
                        let old = TruncatedRecord::decode(&raw)
                            .map_err(|e| IndexError::corrupt(&key, e))?;
                        !old.version.equal(&new.version) || old.flags != new.flags
                    }
                };
                if differs {
                    let lv = txn.insert(&self.clock, folder, device, new);
                    max_local = max_local.max(lv);
                    self.set_global(txn, snap, folder, device, new)?;
                }
                txn.flush_if_large()?;
            }
            Ok(max_local)
        })
    }

    /// Routes a freshly written record into or out of the global index:
    /// invalid records are withdrawn, everything else is (re)announced.
    fn set_global(
        &self,
        txn: &mut Transaction<'_>,
        snap: &dyn Snapshot,
        folder: &[u8],
        device: &DeviceId,
        record: &FileRecord,
    ) -> IndexResult<()> {
        if record.is_invalid() {
            txn.remove_from_global(snap, folder, device, &record.name)
        } else {
            txn.update_global(snap, folder, device, &record.name, &record.version)
                .map(|_| ())
        }
    }

    fn apply_delete(
        &self,
        txn: &mut Transaction<'_>,
        snap: &dyn Snapshot,
        folder: &[u8],
        device: &DeviceId,
        key: &[u8],
        value: &[u8],
        policy: DeletePolicy,
    ) -> IndexResult<i64> {
        match policy {
            DeletePolicy::Purge => {
                let name_raw = keys::device_key_name(key).ok_or_else(|| {
                    IndexError::inconsistent(key, "device key shorter than fixed prefix")
                })?;
                let name = std::str::from_utf8(name_raw).map_err(|_| {
                    IndexError::inconsistent(key, "device key name is not valid UTF-8")
                })?;
                debug!(name, "replace; unannounced - purge");
                txn.remove_from_global(snap, folder, device, name)?;
                txn.device_batch.delete(key.to_vec());
                Ok(0)
            }
            DeletePolicy::Tombstone { short_id } => {
                let old =
                    TruncatedRecord::decode(value).map_err(|e| IndexError::corrupt(key, e))?;
                if old.is_deleted() {
                    return Ok(0);
                }
                debug!(name = %old.name, "replace; unannounced - mark deleted");
                let stamp = self.clock.advance(old.local_version);
                let tombstone = FileRecord {
                    name: old.name.clone(),
                    version: old.version.clone().update(short_id),
                    local_version: stamp,
                    flags: old.flags | FLAG_DELETED,
                    modified: old.modified,
                    blocks: Vec::new(),
                };
                txn.device_batch.put(key.to_vec(), tombstone.encode());
                txn.update_global(snap, folder, device, &tombstone.name, &tombstone.version)?;
                Ok(stamp)
            }
        }
    }

    /// Yields every record `device` has in `folder`, in name order.
    /// `visit` returning false stops the scan.
    pub fn with_have(
        &self,
        folder: &[u8],
        device: &DeviceId,
        mut visit: impl FnMut(FileRecord) -> bool,
    ) -> IndexResult<()> {
        let snap = self.backend.snapshot()?;
        let prefix = keys::device_key(folder, device, b"");
        for (key, value) in snap.iter_prefix(&prefix)? {
            let record =
                FileRecord::decode(&value).map_err(|e| IndexError::corrupt(&key, e))?;
            if !visit(record) {
                return Ok(());
            }
        }
        Ok(())
    }

    /// Yields every (device, record) pair in `folder` across all devices.
    ///
    /// Records with obviously invalid names are dropped from the index as
    /// they are encountered instead of being yielded.
    pub fn with_all_folder(
        &self,
        folder: &[u8],
        mut visit: impl FnMut(DeviceId, TruncatedRecord) -> bool,
    ) -> IndexResult<()> {
        self.with_txn(|txn, snap| {
            let prefix = keys::folder_device_prefix(folder);
            for (key, value) in snap.iter_prefix(&prefix)? {
                let device = keys::device_key_device(&key).ok_or_else(|| {
                    IndexError::inconsistent(&key, "device key shorter than fixed prefix")
                })?;
                let record = TruncatedRecord::decode(&value)
                    .map_err(|e| IndexError::corrupt(&key, e))?;

                if matches!(record.name.as_str(), "" | "." | ".." | "/") {
                    info!(name = %record.name, "dropping invalid filename from index");
                    txn.remove_from_global(snap, folder, &device, &record.name)?;
                    txn.device_batch.delete(key);
                    continue;
                }

                if !visit(device, record) {
                    return Ok(());
                }
            }
            Ok(())
        })
    }

    /// Yields the winning record of every name in `folder` that starts
    /// with `prefix` (empty prefix: all names), in name order.
    pub fn with_global(
        &self,
        folder: &[u8],
        prefix: &[u8],
        mut visit: impl FnMut(FileRecord) -> bool,
    ) -> IndexResult<()> {
        let snap = self.backend.snapshot()?;
        let key_prefix = keys::global_key(folder, prefix);
        for (key, value) in snap.iter_prefix(&key_prefix)? {
            let list =
                VersionList::decode(&value).map_err(|e| IndexError::corrupt(&key, e))?;
            let winner = list
                .winner()
                .ok_or_else(|| IndexError::inconsistent(&key, "global entry with zero versions"))?;
            let name = keys::global_key_name(&key).ok_or_else(|| {
                IndexError::inconsistent(&key, "global key shorter than fixed prefix")
            })?;

            let record_key = keys::device_key(folder, &winner.device, name);
            let raw = snap.get(&record_key)?.ok_or_else(|| {
                IndexError::inconsistent(&record_key, "global entry references missing record")
            })?;
            let record =
                FileRecord::decode(&raw).map_err(|e| IndexError::corrupt(&record_key, e))?;

            if !visit(record) {
                return Ok(());
            }
        }
        Ok(())
    }

    /// Yields, for every name `device` is missing or behind on, the
    /// winning record it should fetch, served by a valid holder.
    ///
    /// Only a device whose version is causally dominated by the winner
    /// needs it; a *concurrent* divergence from the winner is a conflict,
    /// not a need, and is never reported. Holders flagged invalid are skipped as
    /// sources, and a deleted winner is not offered to a device that never
    /// had the file. Names with no valid holder of the winning version are
    /// skipped entirely.
    pub fn with_need(
        &self,
        folder: &[u8],
        device: &DeviceId,
        mut visit: impl FnMut(FileRecord) -> bool,
    ) -> IndexResult<()> {
        let snap = self.backend.snapshot()?;
        let start = keys::global_key(folder, b"");
        let end = keys::global_key(folder, &NAME_RANGE_END);

        'files: for (key, value) in snap.iter_range(&start, &end)? {
            let list =
                VersionList::decode(&value).map_err(|e| IndexError::corrupt(&key, e))?;
            let winner = list
                .winner()
                .ok_or_else(|| IndexError::inconsistent(&key, "global entry with zero versions"))?
                .version
                .clone();

            let mut have = false;
            let mut need = false;
            for holder in &list.versions {
                if holder.device == *device {
                    have = true;
                    // Only a causally-dominated holder needs the winner. A
                    // concurrent divergence is a conflict, not a need, and
                    // is never reported here.
                    need = matches!(
                        holder.version.compare(&winner),
                        VectorOrdering::Lesser
                    );
                    break;
                }
            }

            if have && !need {
                continue;
            }

            let name = keys::global_key_name(&key).ok_or_else(|| {
                IndexError::inconsistent(&key, "global key shorter than fixed prefix")
            })?;

            for holder in &list.versions {
                if !holder.version.equal(&winner) {
                    // Out of holders of the winning version without finding
                    // a valid source; skip the file.
                    continue 'files;
                }

                let record_key = keys::device_key(folder, &holder.device, name);
                let raw = snap.get(&record_key)?.ok_or_else(|| {
                    IndexError::inconsistent(&record_key, "global entry references missing record")
                })?;
                let record = FileRecord::decode(&raw)
                    .map_err(|e| IndexError::corrupt(&record_key, e))?;

                if record.is_invalid() {
                    continue;
                }
                if record.is_deleted() && !have {
                    continue 'files;
                }

                debug!(
                    %device,
                    name = %record.name,
                    have,
                    "need"
                );
                if !visit(record) {
                    return Ok(());
                }
                continue 'files;
            }
        }
        Ok(())
    }

    /// Looks up `device`'s record of `name`, `None` if it has none.
    pub fn get(
        &self,
        folder: &[u8],
        device: &DeviceId,
        name: &str,
    ) -> IndexResult<Option<FileRecord>> {
        let key = keys::device_key(folder, device, name.as_bytes());
        match self.backend.get(&key)? {
            None => Ok(None),
            Some(raw) => Ok(Some(
                FileRecord::decode(&raw).map_err(|e| IndexError::corrupt(&key, e))?,
            )),
        }
    }

    /// Looks up the winning record of `name`, `None` if the name is not
    /// known globally.
    pub fn get_global(&self, folder: &[u8], name: &str) -> IndexResult<Option<FileRecord>> {
        let key = keys::global_key(folder, name.as_bytes());
        let Some(raw) = self.backend.get(&key)? else {
            return Ok(None);
        };
        let list = VersionList::decode(&raw).map_err(|e| IndexError::corrupt(&key, e))?;
        let winner = list
            .winner()
            .ok_or_else(|| IndexError::inconsistent(&key, "global entry with zero versions"))?;

        let record_key = keys::device_key(folder, &winner.device, name.as_bytes());
        // An orphaned reference surfaces as absence here; the repair pass
        // cleans it up.
        let Some(raw) = self.backend.get(&record_key)? else {
            return Ok(None);
        };
        Ok(Some(
            FileRecord::decode(&raw).map_err(|e| IndexError::corrupt(&record_key, e))?,
        ))
    }

    /// Returns the devices currently holding the winning version of
    /// `name`, or an empty list if the name is not known globally.
    pub fn availability(&self, folder: &[u8], name: &str) -> IndexResult<Vec<DeviceId>> {
        let key = keys::global_key(folder, name.as_bytes());
        let Some(raw) = self.backend.get(&key)? else {
            return Ok(Vec::new());
        };
        let list = VersionList::decode(&raw).map_err(|e| IndexError::corrupt(&key, e))?;
        Ok(list.available())
    }

    /// Returns every folder id present in the index, sorted.
    pub fn list_folders(&self) -> IndexResult<Vec<Vec<u8>>> {
        let snap = self.backend.snapshot()?;
        let mut folders = BTreeSet::new();
        for (key, _) in snap.iter_prefix(&[KEY_TYPE_GLOBAL])? {
            if let Some(folder) = keys::global_key_folder(&key) {
                folders.insert(folder.to_vec());
            }
        }
        Ok(folders.into_iter().collect())
    }

    /// Deletes every device record and global entry of `folder`.
    pub fn drop_folder(&self, folder: &[u8]) -> IndexResult<()> {
        self.with_txn(|txn, snap| {
            for (key, _) in snap.iter_prefix(&[KEY_TYPE_DEVICE])? {
                if keys::device_key_folder(&key) == Some(folder) {
                    txn.device_batch.delete(key);
                    txn.flush_if_large()?;
                }
            }
            for (key, _) in snap.iter_prefix(&[KEY_TYPE_GLOBAL])? {
                if keys::global_key_folder(&key) == Some(folder) {
                    txn.global_batch.delete(key);
                    txn.flush_if_large()?;
                }
            }
            Ok(())
        })
    }

    /// Verifies every global entry of `folder` against the device records
    /// it references, pruning references to records that no longer exist.
    ///
    /// Write reordering in the underlying engine across a crash can leave
    /// such orphans behind; this pass is the self-healing counterpart.
    /// Entries whose lists empty out are deleted. Returns the number of
    /// entries rewritten or deleted; running the pass twice in a row
    /// returns zero the second time.
    pub fn check_and_repair_globals(&self, folder: &[u8]) -> IndexResult<usize> {
        let snap = self.backend.snapshot()?;
        let start = keys::global_key(folder, b"");
        let end = keys::global_key(folder, &NAME_RANGE_END);

        let mut batch = WriteBatch::new();
        let mut repaired = 0usize;

        for (key, value) in snap.iter_range(&start, &end)? {
            let list =
                VersionList::decode(&value).map_err(|e| IndexError::corrupt(&key, e))?;
            let name = keys::global_key_name(&key).ok_or_else(|| {
                IndexError::inconsistent(&key, "global key shorter than fixed prefix")
            })?;

            let mut kept = VersionList::default();
            for holder in &list.versions {
                let record_key = keys::device_key(folder, &holder.device, name);
                if snap.get(&record_key)?.is_some() {
                    kept.versions.push(holder.clone());
                }
            }

            if kept.versions.len() != list.versions.len() {
                info!(
                    folder = %String::from_utf8_lossy(folder),
                    name = %String::from_utf8_lossy(name),
                    dropped = list.versions.len() - kept.versions.len(),
                    "repair: rewriting global version list"
                );
                repaired += 1;
                if kept.is_empty() {
                    batch.delete(key);
                } else {
                    batch.put(key, kept.encode());
                }
            }
        }

        if !batch.is_empty() {
            self.backend.write(&batch)?;
        }
        Ok(repaired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use findex_protocol::Vector;

    fn dev(b: u8) -> DeviceId {
        DeviceId::new([b; 32])
    }

    fn file(name: &str, pairs: &[(u64, u64)]) -> FileRecord {
        FileRecord {
            name: name.to_string(),
            version: Vector::from_pairs(pairs),
            ..FileRecord::default()
        }
    }

    fn names_of(index: &FileIndex, folder: &[u8], device: &DeviceId) -> Vec<String> {
        let mut names = Vec::new();
        index
            .with_have(folder, device, |f| {
                names.push(f.name);
                true
            })
            .unwrap();
        names
    }

    #[test]
    fn replace_inserts_sorted_list() {
        let index = FileIndex::in_memory();
        let files = vec![file("b", &[(1, 1)]), file("a", &[(1, 1)])];
        let max = index.replace(b"f", &dev(1), files).unwrap();
        assert!(max > 0);
        assert_eq!(names_of(&index, b"f", &dev(1)), vec!["a", "b"]);
    }

    #[test]
    fn replace_removes_unannounced() {
        let index = FileIndex::in_memory();
        index
            .replace(
                b"f",
                &dev(1),
                vec![file("a", &[(1, 1)]), file("b", &[(1, 1)])],
            )
            .unwrap();
        index.replace(b"f", &dev(1), vec![file("b", &[(1, 1)])]).unwrap();

        assert_eq!(names_of(&index, b"f", &dev(1)), vec!["b"]);
        assert!(index.availability(b"f", "a").unwrap().is_empty());
    }

    #[test]
    fn replace_unchanged_issues_no_stamp() {
        let index = FileIndex::in_memory();
        let max1 = index
            .replace(b"f", &dev(1), vec![file("a", &[(1, 1)])])
            .unwrap();
        let max2 = index
            .replace(b"f", &dev(1), vec![file("a", &[(1, 1)])])
            .unwrap();
        assert!(max1 > 0);
        assert_eq!(max2, 0);
    }

    #[test]
    fn update_is_additive_only() {
        let index = FileIndex::in_memory();
        index
            .replace(b"f", &dev(1), vec![file("a", &[(1, 1)])])
            .unwrap();
        index.update(b"f", &dev(1), &[file("b", &[(1, 1)])]).unwrap();

        assert_eq!(names_of(&index, b"f", &dev(1)), vec!["a", "b"]);
    }

    #[test]
    fn invalid_records_are_withdrawn_from_global() {
        let index = FileIndex::in_memory();
        index
            .replace(b"f", &dev(1), vec![file("a", &[(1, 1)])])
            .unwrap();
        assert_eq!(index.availability(b"f", "a").unwrap(), vec![dev(1)]);

        let mut invalid = file("a", &[(1, 1)]);
        invalid.flags |= findex_protocol::FLAG_INVALID;
        index.update(b"f", &dev(1), &[invalid]).unwrap();

        assert!(index.availability(b"f", "a").unwrap().is_empty());
        // The device record itself remains.
        assert!(index.get(b"f", &dev(1), "a").unwrap().is_some());
    }

    #[test]
    fn with_all_folder_drops_bad_names() {
        let index = FileIndex::in_memory();
        index
            .replace(
                b"f",
                &dev(1),
                vec![file(".", &[(1, 1)]), file("ok", &[(1, 1)])],
            )
            .unwrap();

        let mut seen = Vec::new();
        index
            .with_all_folder(b"f", |_, record| {
                seen.push(record.name);
                true
            })
            .unwrap();
        assert_eq!(seen, vec!["ok"]);
        assert!(index.get(b"f", &dev(1), ".").unwrap().is_none());
    }

    #[test]
    fn large_folder_exercises_periodic_flush() {
        let index = FileIndex::in_memory();
        let files: Vec<_> = (0..500)
            .map(|i| file(&format!("file-{i:04}"), &[(1, 1)]))
            .collect();
        index.replace(b"f", &dev(1), files).unwrap();
        assert_eq!(names_of(&index, b"f", &dev(1)).len(), 500);

        index.replace(b"f", &dev(1), Vec::new()).unwrap();
        assert!(names_of(&index, b"f", &dev(1)).is_empty());
    }
}
