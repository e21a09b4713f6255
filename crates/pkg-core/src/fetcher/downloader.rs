use std::path::Path;

use crate::error::{PkgError, Result};
use crate::http::HttpClient;

/// Blocking transfer of a remote file to a local path.
pub trait Downloader {
    /// Download `url` into `dest`, replacing its contents.
    fn download_to_file(&self, url: &str, dest: &Path) -> Result<()>;
}

impl Downloader for HttpClient {
    fn download_to_file(&self, url: &str, dest: &Path) -> Result<()> {
        self.download(url, dest)
            .map(|_| ())
            .map_err(|e| PkgError::DownloadFailed {
                url: url.to_string(),
                reason: e.to_string(),
            })
    }
}

impl<D: Downloader + ?Sized> Downloader for &D {
    fn download_to_file(&self, url: &str, dest: &Path) -> Result<()> {
        (**self).download_to_file(url, dest)
    }
}

impl<D: Downloader + ?Sized> Downloader for Box<D> {
    fn download_to_file(&self, url: &str, dest: &Path) -> Result<()> {
        (**self).download_to_file(url, dest)
    }
}
