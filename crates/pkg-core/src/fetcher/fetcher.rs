use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use super::checksum::sha256_file;
use super::downloader::Downloader;
use crate::config::{Config, ConfigKey};
use crate::error::{PkgError, Result};
use crate::event::{EventDispatcher, PkgEvent};
use crate::http::HttpClient;
use crate::package::Package;

/// Mode of artifacts in the cache. Temp files start out owner-only.
#[cfg(unix)]
const ARTIFACT_MODE: u32 = 0o644;

#[cfg(unix)]
fn set_artifact_mode(file: &fs::File) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    file.set_permissions(fs::Permissions::from_mode(ARTIFACT_MODE))
}

#[cfg(not(unix))]
fn set_artifact_mode(_file: &fs::File) -> io::Result<()> {
    Ok(())
}

/// Fetches package artifacts into the local cache and verifies them.
pub struct Fetcher<D = HttpClient> {
    downloader: D,
    cache_dir: PathBuf,
    package_site: String,
    events: EventDispatcher,
}

impl<D: Downloader> Fetcher<D> {
    pub fn new(downloader: D, cache_dir: impl Into<PathBuf>, package_site: impl Into<String>) -> Self {
        Self {
            downloader,
            cache_dir: cache_dir.into(),
            package_site: package_site.into(),
            events: EventDispatcher::with_logging(),
        }
    }

    /// Create a fetcher reading `PKG_CACHEDIR` and `PACKAGESITE` from `config`.
    pub fn from_config(config: &Config, downloader: D) -> Result<Self> {
        let cache_dir = config
            .get(ConfigKey::CacheDir)
            .ok_or_else(|| PkgError::Config(format!("{} is not set", ConfigKey::CacheDir)))?;
        let package_site = config.require_package_site()?;

        Ok(Self::new(downloader, cache_dir, package_site))
    }

    /// Replace the event dispatcher.
    pub fn with_events(mut self, events: EventDispatcher) -> Self {
        self.events = events;
        self
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    pub fn package_site(&self) -> &str {
        &self.package_site
    }

    /// Where the artifact of `pkg` lives in the cache.
    pub fn cache_path(&self, pkg: &Package) -> PathBuf {
        self.cache_dir.join(pkg.repo_path.trim_start_matches('/'))
    }

    /// URL the artifact of `pkg` is downloaded from.
    pub fn package_url(&self, pkg: &Package) -> String {
        format!(
            "{}/{}",
            self.package_site.trim_end_matches('/'),
            pkg.repo_path.trim_start_matches('/')
        )
    }

    /// Make a verified copy of the artifact of `pkg` available in the cache.
    ///
    /// An artifact already in the cache is only checked; if its checksum
    /// is wrong it is removed and downloaded again. On failure nothing
    /// unverified is left at the cache path.
    ///
    /// # Panics
    ///
    /// If `pkg` is not a remote package.
    pub fn fetch(&self, pkg: &Package) -> Result<PathBuf> {
        assert!(
            pkg.kind.is_remote(),
            "fetch called for non-remote package {}",
            pkg
        );

        let dest = self.cache_path(pkg);

        if dest.exists() {
            match self.verify(pkg, &dest) {
                Ok(()) => {
                    self.events.dispatch(PkgEvent::AlreadyCached {
                        package: pkg.to_string(),
                        path: dest.clone(),
                    });
                    return Ok(dest);
                }
                Err(e) => {
                    self.remove(&dest);
                    if !e.is_checksum_mismatch() {
                        return Err(e);
                    }
                    log::warn!("Cached {} is corrupt, downloading it again", pkg);
                }
            }
        }

        let dir = dest.parent().ok_or_else(|| {
            self.errno(
                "dirname",
                &dest,
                io::Error::new(io::ErrorKind::InvalidInput, "no parent directory"),
            )
        })?;
        fs::create_dir_all(dir).map_err(|e| self.errno("mkdirs", dir, e))?;

        let url = self.package_url(pkg);
        self.events.dispatch(PkgEvent::FetchStarted {
            package: pkg.to_string(),
            url: url.clone(),
        });

        // Dropping the temp file on an early return removes it
        let tmp = NamedTempFile::new_in(dir).map_err(|e| self.errno("mkstemp", dir, e))?;
        self.downloader.download_to_file(&url, tmp.path())?;
        self.verify(pkg, tmp.path())?;
        set_artifact_mode(tmp.as_file()).map_err(|e| self.errno("chmod", tmp.path(), e))?;

        tmp.persist(&dest)
            .map_err(|e| self.errno("rename", &dest, e.error))?;

        self.events.dispatch(PkgEvent::FetchFinished {
            package: pkg.to_string(),
            path: dest.clone(),
        });

        Ok(dest)
    }

    /// Fetch packages in order, stopping at the first failure.
    pub fn fetch_all(&self, packages: &[Package]) -> Result<Vec<PathBuf>> {
        packages.iter().map(|pkg| self.fetch(pkg)).collect()
    }

    fn verify(&self, pkg: &Package, path: &Path) -> Result<()> {
        let actual = sha256_file(path).inspect_err(|e| {
            if let PkgError::Io { op, path, source } = e {
                self.events.dispatch(PkgEvent::Errno {
                    op: *op,
                    path: path.clone(),
                    message: source.to_string(),
                });
            }
        })?;

        if actual.eq_ignore_ascii_case(&pkg.checksum) {
            return Ok(());
        }

        self.events.dispatch(PkgEvent::FailedChecksum {
            package: pkg.to_string(),
        });
        Err(PkgError::ChecksumMismatch {
            package: pkg.to_string(),
            expected: pkg.checksum.clone(),
            actual,
        })
    }

    fn remove(&self, path: &Path) {
        if let Err(e) = fs::remove_file(path) {
            if e.kind() != io::ErrorKind::NotFound {
                self.errno("unlink", path, e);
            }
        }
    }

    fn errno(&self, op: &'static str, path: &Path, source: io::Error) -> PkgError {
        self.events.dispatch(PkgEvent::Errno {
            op,
            path: path.to_path_buf(),
            message: source.to_string(),
        });
        PkgError::io(op, path, source)
    }
}
