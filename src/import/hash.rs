//! Content hashing for deck imports.
//!
//! Two fingerprints are produced here:
//! - a version tag for the whole export file (truncated SHA256), stored on
//!   the deck row so re-uploads of the same export can be recognized
//! - a content-derived card id (truncated MD5 of front + back) for exports
//!   that carry no id column
//!
//! Neither is meant to detect tampering.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use md5::Md5;
use sha2::{Digest, Sha256};

use crate::error::{Error, Result};

/// Hex characters kept from the file digest.
pub const VERSION_TAG_LEN: usize = 16;

/// Hex characters kept from the card content digest.
pub const CARD_ID_LEN: usize = 12;

const CHUNK_SIZE: usize = 4096;

/// Compute the version tag of an export file.
///
/// The file is read in fixed-size chunks so large exports are never held in
/// memory just for hashing. The handle is closed before this returns.
///
/// # Errors
///
/// Returns [`Error::FileNotFound`] if the path does not exist, or an I/O
/// error if the file cannot be read.
pub fn file_version_hash(path: &Path) -> Result<String> {
    let mut file = File::open(path).map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            Error::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            Error::Io(e)
        }
    })?;

    let mut hasher = Sha256::new();
    let mut buf = [0u8; CHUNK_SIZE];
    loop {
        let n = file.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }

    let mut tag = format!("{:x}", hasher.finalize());
    tag.truncate(VERSION_TAG_LEN);
    Ok(tag)
}

/// Derive a card id from its cleaned front and back text.
///
/// Deterministic per content: the same pair always yields the same id, so
/// re-importing an unchanged basic export upserts onto the same rows.
#[must_use]
pub fn content_card_id(front: &str, back: &str) -> String {
    let mut hasher = Md5::new();
    hasher.update(front.as_bytes());
    hasher.update(back.as_bytes());

    let mut id = format!("{:x}", hasher.finalize());
    id.truncate(CARD_ID_LEN);
    id
}
