//! File metadata records and their codec.

use crate::error::ProtocolResult;
use crate::vector::{self, Vector};
use crate::wire::{Reader, Writer};
use crate::{Decode, Encode};

/// The file is deleted; the record is a tombstone.
pub const FLAG_DELETED: u32 = 1 << 12;
/// The record is not authoritative (for example locally ignored) and must
/// not be used as a sync source.
pub const FLAG_INVALID: u32 = 1 << 13;
/// The record describes a directory.
pub const FLAG_DIRECTORY: u32 = 1 << 14;
/// Permission bits are not meaningful for this record.
pub const FLAG_NO_PERMISSION_BITS: u32 = 1 << 15;

/// One content block of a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockInfo {
    /// Block size in bytes.
    pub size: u32,
    /// Content hash of the block.
    pub hash: Vec<u8>,
}

/// Full per-file metadata record as stored in the index.
///
/// `local_version` is the process-local change stamp, distinct from the
/// causal `version`; a zero `local_version` means "not yet stamped" and is
/// filled in by the index on insert.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileRecord {
    /// File name, relative to the folder root.
    pub name: String,
    /// Flag bitset (`FLAG_*` constants, plus permission bits).
    pub flags: u32,
    /// Modification time, seconds since the epoch.
    pub modified: i64,
    /// Causal version of this file state.
    pub version: Vector,
    /// Process-local monotonic change stamp.
    pub local_version: i64,
    /// Content block list. Empty for deleted files and directories.
    pub blocks: Vec<BlockInfo>,
}

impl FileRecord {
    /// Returns true if the deleted flag is set.
    #[must_use]
    pub fn is_deleted(&self) -> bool {
        self.flags & FLAG_DELETED != 0
    }

    /// Returns true if the invalid flag is set.
    #[must_use]
    pub fn is_invalid(&self) -> bool {
        self.flags & FLAG_INVALID != 0
    }

    /// Returns true if the directory flag is set.
    #[must_use]
    pub fn is_directory(&self) -> bool {
        self.flags & FLAG_DIRECTORY != 0
    }

    /// Returns the metadata-only view of this record.
    #[must_use]
    pub fn truncated(&self) -> TruncatedRecord {
        TruncatedRecord {
            name: self.name.clone(),
            flags: self.flags,
            modified: self.modified,
            version: self.version.clone(),
            local_version: self.local_version,
        }
    }
}

/// Metadata-only view of a stored record, parsed without its block list.
///
/// Comparison and tombstone paths in the index never need blocks, so they
/// parse stored values through this cheaper type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TruncatedRecord {
    /// File name, relative to the folder root.
    pub name: String,
    /// Flag bitset.
    pub flags: u32,
    /// Modification time, seconds since the epoch.
    pub modified: i64,
    /// Causal version of this file state.
    pub version: Vector,
    /// Process-local monotonic change stamp.
    pub local_version: i64,
}

impl TruncatedRecord {
    /// Returns true if the deleted flag is set.
    #[must_use]
    pub fn is_deleted(&self) -> bool {
        self.flags & FLAG_DELETED != 0
    }

    /// Returns true if the invalid flag is set.
    #[must_use]
    pub fn is_invalid(&self) -> bool {
        self.flags & FLAG_INVALID != 0
    }

    /// Expands into a full record with an empty block list.
    #[must_use]
    pub fn into_full(self) -> FileRecord {
        FileRecord {
            name: self.name,
            flags: self.flags,
            modified: self.modified,
            version: self.version,
            local_version: self.local_version,
            blocks: Vec::new(),
        }
    }
}

// Wire layout, in field order: name, flags, modified, local_version,
// version vector, block list. Blocks come last so a truncated parse can
// stop right before them.

fn decode_head(r: &mut Reader<'_>) -> ProtocolResult<TruncatedRecord> {
    let name = String::from_utf8(r.bytes()?.to_vec())?;
    let flags = r.u32()?;
    let modified = r.i64()?;
    let local_version = r.i64()?;
    let version = vector::decode_from(r)?;
    Ok(TruncatedRecord {
        name,
        flags,
        modified,
        version,
        local_version,
    })
}

impl Encode for FileRecord {
    fn encode(&self) -> Vec<u8> {
        let mut w = Writer::with_capacity(64 + self.name.len());
        w.put_bytes(self.name.as_bytes());
        w.put_u32(self.flags);
        w.put_i64(self.modified);
        w.put_i64(self.local_version);
        vector::encode_into(&self.version, &mut w);
        w.put_u32(self.blocks.len() as u32);
        for block in &self.blocks {
            w.put_u32(block.size);
            w.put_bytes(&block.hash);
        }
        w.into_bytes()
    }
}

impl Decode for FileRecord {
    fn decode(bytes: &[u8]) -> ProtocolResult<Self> {
        let mut r = Reader::new(bytes);
        let head = decode_head(&mut r)?;
        let count = r.u32()? as usize;
        let mut blocks = Vec::with_capacity(count.min(1024));
        for _ in 0..count {
            let size = r.u32()?;
            let hash = r.bytes()?.to_vec();
            blocks.push(BlockInfo { size, hash });
        }
        r.expect_end()?;
        let mut record = head.into_full();
        record.blocks = blocks;
        Ok(record)
    }
}

impl Decode for TruncatedRecord {
    /// Decodes the metadata head of a stored record, skipping the block
    /// list without validating it.
    fn decode(bytes: &[u8]) -> ProtocolResult<Self> {
        let mut r = Reader::new(bytes);
        decode_head(&mut r)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> FileRecord {
        FileRecord {
            name: "docs/readme.md".to_string(),
            flags: 0o644,
            modified: 1_714_000_000,
            version: Vector::from_pairs(&[(1, 3), (2, 1)]),
            local_version: 42,
            blocks: vec![
                BlockInfo {
                    size: 128 * 1024,
                    hash: vec![0xaa; 32],
                },
                BlockInfo {
                    size: 4096,
                    hash: vec![0xbb; 32],
                },
            ],
        }
    }

    #[test]
    fn full_record_round_trips() {
        let record = sample();
        let decoded = FileRecord::decode(&record.encode()).unwrap();
        assert_eq!(decoded, record);
    }

    #[test]
    fn truncated_parse_drops_blocks_only() {
        let record = sample();
        let truncated = TruncatedRecord::decode(&record.encode()).unwrap();
        assert_eq!(truncated, record.truncated());
    }

    #[test]
    fn truncated_into_full_has_no_blocks() {
        let full = sample().truncated().into_full();
        assert!(full.blocks.is_empty());
        assert_eq!(full.name, "docs/readme.md");
    }

    #[test]
    fn flag_helpers() {
        let mut record = sample();
        assert!(!record.is_deleted());
        record.flags |= FLAG_DELETED | FLAG_INVALID;
        assert!(record.is_deleted());
        assert!(record.is_invalid());
        assert!(record.truncated().is_deleted());
    }

    #[test]
    fn decode_garbage_fails() {
        assert!(FileRecord::decode(&[0xff, 0x00]).is_err());
        assert!(TruncatedRecord::decode(b"short").is_err());
    }

    #[test]
    fn decode_invalid_utf8_name_fails() {
        let mut w = crate::wire::Writer::new();
        w.put_bytes(&[0xff, 0xfe]);
        let result = TruncatedRecord::decode(&w.into_bytes());
        assert!(matches!(
            result,
            Err(crate::ProtocolError::InvalidUtf8(_) | crate::ProtocolError::UnexpectedEnd { .. })
        ));
    }
}
