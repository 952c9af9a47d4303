//! Persistent file metadata index for folder synchronization.
//!
//! The index tracks, per shared folder, which version of each file every
//! device holds. From the per-device lists it derives a global index: for
//! each name, the list of holders ordered by version strength, whose head
//! is the version the cluster should converge on. On top of those two
//! structures it answers the questions a synchronization engine asks:
//! what does a device have, what does it need, and who can serve it.
//!
//! State is persisted in any ordered key-value store implementing
//! [`findex_store::Backend`]; [`FileIndex::in_memory`] gives an ephemeral
//! instance for tests and tooling.
//!
//! ```
//! use findex_core::FileIndex;
//! use findex_protocol::{DeviceId, FileRecord, Vector};
//!
//! let index = FileIndex::in_memory();
//! let local = DeviceId::new([1; 32]);
//!
//! index.replace(b"default", &local, vec![FileRecord {
//!     name: "notes.txt".into(),
//!     version: Vector::from_pairs(&[(1, 1)]),
//!     ..FileRecord::default()
//! }])?;
//!
//! assert_eq!(index.availability(b"default", "notes.txt")?, vec![local]);
//! # Ok::<(), findex_core::IndexError>(())
//! ```

pub mod clock;
mod error;
mod index;
pub mod keys;
mod transaction;
pub mod version_list;

pub use clock::Clock;
pub use error::{IndexError, IndexResult};
pub use index::{DeletePolicy, FileIndex};
pub use version_list::{FileVersion, VersionList};
