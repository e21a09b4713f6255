//! Package references handed to the fetcher.

use std::fmt;

/// Where a package comes from, relative to this machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageKind {
    /// Already installed locally
    Local,
    /// Available from a remote repository
    Remote,
    /// Remote package replacing an installed one
    UpgradeRemote,
}

impl PackageKind {
    /// Whether artifacts of this kind can be fetched from a repository.
    pub fn is_remote(self) -> bool {
        matches!(self, PackageKind::Remote | PackageKind::UpgradeRemote)
    }
}

/// A package as known to a remote repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    pub name: String,
    pub version: String,
    /// Path of the artifact inside the repository's URL space
    pub repo_path: String,
    /// Expected SHA-256 of the artifact, 64 hex characters
    pub checksum: String,
    pub kind: PackageKind,
}

impl Package {
    /// Create a remote package reference.
    pub fn remote(
        name: impl Into<String>,
        version: impl Into<String>,
        repo_path: impl Into<String>,
        checksum: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            repo_path: repo_path.into(),
            checksum: checksum.into(),
            kind: PackageKind::Remote,
        }
    }

    pub fn with_kind(mut self, kind: PackageKind) -> Self {
        self.kind = kind;
        self
    }
}

impl fmt::Display for Package {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.name, self.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_is_remote() {
        assert!(!PackageKind::Local.is_remote());
        assert!(PackageKind::Remote.is_remote());
        assert!(PackageKind::UpgradeRemote.is_remote());
    }

    #[test]
    fn test_display() {
        let pkg = Package::remote("foo", "1.0", "All/foo-1.0.txz", "00");
        assert_eq!(pkg.to_string(), "foo-1.0");
        assert_eq!(pkg.kind, PackageKind::Remote);
    }
}
