//! Verified artifact fetching.
//!
//! Artifacts are mirrored under the cache directory at their repository
//! path. A fetch downloads into a temporary file next to the destination,
//! checks its SHA-256 and only then renames it into place, so the cache
//! never holds a partial or unverified artifact.

mod checksum;
mod downloader;
mod fetcher;

pub use checksum::{is_valid_checksum, sha256_file, CHECKSUM_HEX_LEN};
pub use downloader::Downloader;
pub use fetcher::Fetcher;
