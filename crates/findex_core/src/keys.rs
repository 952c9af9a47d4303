//! Binary key encoding.
//!
//! Two logical namespaces share one physical key space, distinguished by a
//! one-byte type tag:
//!
//! ```text
//! device key:  tag(1) ‖ folder(64, NUL-padded) ‖ device(32) ‖ name(...)
//! global key:  tag(1) ‖ folder(64, NUL-padded) ‖ name(...)
//! ```
//!
//! The fixed-width, zero-padded folder segment makes lexicographic byte
//! ordering of raw keys group all records of a (folder, device) — and all
//! global records of a folder — contiguously, sorted by name. The merge
//! algorithms in [`crate::FileIndex`] depend on exactly this ordering.

use findex_protocol::{DeviceId, DEVICE_ID_LEN};

/// Type tag for device keys.
pub const KEY_TYPE_DEVICE: u8 = 0;
/// Type tag for global keys.
pub const KEY_TYPE_GLOBAL: u8 = 1;

/// Width of the padded folder segment.
pub const FOLDER_LEN: usize = 64;

const DEVICE_OFFSET: usize = 1 + FOLDER_LEN;
const DEVICE_NAME_OFFSET: usize = 1 + FOLDER_LEN + DEVICE_ID_LEN;
const GLOBAL_NAME_OFFSET: usize = 1 + FOLDER_LEN;

fn check_folder(folder: &[u8]) {
    assert!(
        folder.len() <= FOLDER_LEN,
        "folder id longer than {FOLDER_LEN} bytes"
    );
}

/// Encodes the device key for `(folder, device, name)`.
///
/// # Panics
///
/// Panics if `folder` is longer than [`FOLDER_LEN`] bytes; that is a caller
/// bug, not a runtime condition.
#[must_use]
pub fn device_key(folder: &[u8], device: &DeviceId, name: &[u8]) -> Vec<u8> {
    check_folder(folder);
    let mut key = vec![0u8; DEVICE_NAME_OFFSET + name.len()];
    key[0] = KEY_TYPE_DEVICE;
    key[1..1 + folder.len()].copy_from_slice(folder);
    key[DEVICE_OFFSET..DEVICE_NAME_OFFSET].copy_from_slice(device.as_bytes());
    key[DEVICE_NAME_OFFSET..].copy_from_slice(name);
    key
}

/// Encodes the global key for `(folder, name)`.
///
/// # Panics
///
/// Panics if `folder` is longer than [`FOLDER_LEN`] bytes.
#[must_use]
pub fn global_key(folder: &[u8], name: &[u8]) -> Vec<u8> {
    check_folder(folder);
    let mut key = vec![0u8; GLOBAL_NAME_OFFSET + name.len()];
    key[0] = KEY_TYPE_GLOBAL;
    key[1..1 + folder.len()].copy_from_slice(folder);
    key[GLOBAL_NAME_OFFSET..].copy_from_slice(name);
    key
}

/// Encodes the common prefix of all device keys in `folder`, regardless of
/// device.
#[must_use]
pub fn folder_device_prefix(folder: &[u8]) -> Vec<u8> {
    check_folder(folder);
    let mut key = vec![0u8; 1 + FOLDER_LEN];
    key[0] = KEY_TYPE_DEVICE;
    key[1..1 + folder.len()].copy_from_slice(folder);
    key
}

fn folder_segment(key: &[u8]) -> Option<&[u8]> {
    let folder = key.get(1..1 + FOLDER_LEN)?;
    // Folder ids are NUL-padded; stop at the first zero byte so padding is
    // never read as content.
    match folder.iter().position(|&b| b == 0) {
        Some(end) => Some(&folder[..end]),
        None => Some(folder),
    }
}

/// Extracts the name from a device key, or `None` if the key is too short.
#[must_use]
pub fn device_key_name(key: &[u8]) -> Option<&[u8]> {
    key.get(DEVICE_NAME_OFFSET..)
}

/// Extracts the folder id from a device key, without padding.
#[must_use]
pub fn device_key_folder(key: &[u8]) -> Option<&[u8]> {
    if key.len() < DEVICE_NAME_OFFSET {
        return None;
    }
    folder_segment(key)
}

/// Extracts the device id from a device key.
#[must_use]
pub fn device_key_device(key: &[u8]) -> Option<DeviceId> {
    let raw = key.get(DEVICE_OFFSET..DEVICE_NAME_OFFSET)?;
    DeviceId::from_slice(raw).ok()
}

/// Extracts the name from a global key, or `None` if the key is too short.
#[must_use]
pub fn global_key_name(key: &[u8]) -> Option<&[u8]> {
    key.get(GLOBAL_NAME_OFFSET..)
}

/// Extracts the folder id from a global key, without padding.
#[must_use]
pub fn global_key_folder(key: &[u8]) -> Option<&[u8]> {
    if key.len() < GLOBAL_NAME_OFFSET {
        return None;
    }
    folder_segment(key)
}
