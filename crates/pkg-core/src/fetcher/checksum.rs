//! SHA-256 digests of artifact files.

use sha2::{Digest, Sha256};
use std::fs::File;
use std::io;
use std::path::Path;

use crate::error::{PkgError, Result};

/// Length of a SHA-256 digest in hex
pub const CHECKSUM_HEX_LEN: usize = 64;

/// Compute the SHA-256 of a file as lowercase hex.
pub fn sha256_file(path: &Path) -> Result<String> {
    let mut file = File::open(path).map_err(|e| PkgError::io("open", path, e))?;
    let mut hasher = Sha256::new();
    io::copy(&mut file, &mut hasher).map_err(|e| PkgError::io("read", path, e))?;
    Ok(format!("{:x}", hasher.finalize()))
}

/// Whether `s` looks like a SHA-256 hex digest.
pub fn is_valid_checksum(s: &str) -> bool {
    s.len() == CHECKSUM_HEX_LEN && s.bytes().all(|b| b.is_ascii_hexdigit())
}
