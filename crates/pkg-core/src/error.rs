use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PkgError {
    // Repository configuration errors
    #[error("Cannot open repository configuration {}: {source}", path.display())]
    ConfigUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // IO errors
    #[error("{op}({}): {source}", path.display())]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Download errors
    #[error("Download failed for {url}: {reason}")]
    DownloadFailed { url: String, reason: String },

    #[error("Checksum mismatch for {package}: expected {expected}, got {actual}")]
    ChecksumMismatch {
        package: String,
        expected: String,
        actual: String,
    },

    // Config errors
    #[error("Configuration error: {0}")]
    Config(String),
}

impl PkgError {
    /// Build an I/O error tagged with the failing operation and path.
    pub fn io(op: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PkgError::Io {
            op,
            path: path.into(),
            source,
        }
    }

    /// Whether this error came from checksum verification rather than I/O or transport.
    pub fn is_checksum_mismatch(&self) -> bool {
        matches!(self, PkgError::ChecksumMismatch { .. })
    }
}

pub type Result<T> = std::result::Result<T, PkgError>;
