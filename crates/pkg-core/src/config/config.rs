use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use super::source::{ConfigLoader, ConfigSource, RawConfig};
use crate::error::{PkgError, Result};
use crate::registry::DEFAULT_REPOSITORIES_PATH;

/// Config file read when no explicit path is given
pub const DEFAULT_CONFIG_PATH: &str = "/etc/pkg.toml";

/// Cache directory used when none is configured
pub const DEFAULT_CACHE_DIR: &str = "/var/cache/pkg";

/// Settings that can be looked up by name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigKey {
    /// Local directory holding downloaded artifacts
    CacheDir,
    /// Base URL of the active package source
    PackageSite,
    /// Path of the repositories file
    Repositories,
}

impl ConfigKey {
    /// Name of the key, also the environment variable it is read from
    pub fn as_str(self) -> &'static str {
        match self {
            ConfigKey::CacheDir => "PKG_CACHEDIR",
            ConfigKey::PackageSite => "PACKAGESITE",
            ConfigKey::Repositories => "PKG_REPOS",
        }
    }

    pub fn all() -> &'static [ConfigKey] {
        &[ConfigKey::CacheDir, ConfigKey::PackageSite, ConfigKey::Repositories]
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::all().iter().copied().find(|k| k.as_str() == name)
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Merged client configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub cache_dir: PathBuf,
    pub package_site: Option<String>,
    pub repositories_file: PathBuf,
    sources: HashMap<ConfigKey, ConfigSource>,
}

impl Default for Config {
    fn default() -> Self {
        let sources = ConfigKey::all()
            .iter()
            .map(|k| (*k, ConfigSource::Default))
            .collect();

        Self {
            cache_dir: PathBuf::from(DEFAULT_CACHE_DIR),
            package_site: None,
            repositories_file: PathBuf::from(DEFAULT_REPOSITORIES_PATH),
            sources,
        }
    }
}

impl Config {
    /// Build the configuration from defaults, a config file and the environment.
    ///
    /// With `config_file` set the file must exist; otherwise
    /// [`DEFAULT_CONFIG_PATH`] is read when present.
    pub fn build(config_file: Option<&Path>, use_environment: bool) -> Result<Self> {
        let loader = ConfigLoader::new(use_environment);
        let mut config = Config::default();

        let raw = match config_file {
            Some(path) => {
                if !path.exists() {
                    return Err(PkgError::Config(format!(
                        "Config file {} does not exist",
                        path.display()
                    )));
                }
                loader.load_config_file(path)?
            }
            None => loader.load_config_file(DEFAULT_CONFIG_PATH)?,
        };
        config.merge_raw(raw, ConfigSource::File);

        for key in ConfigKey::all() {
            if let Some(value) = loader.get_env(key.as_str()) {
                config.set(*key, value, ConfigSource::Environment(key.as_str().to_string()));
            }
        }

        log::debug!(
            "Config: cache dir {} ({}), package site {:?} ({})",
            config.cache_dir.display(),
            config.source(ConfigKey::CacheDir).as_str(),
            config.package_site,
            config.source(ConfigKey::PackageSite).as_str(),
        );

        Ok(config)
    }

    /// Overlay the values present in `raw`.
    pub fn merge_raw(&mut self, raw: RawConfig, source: ConfigSource) {
        if let Some(v) = raw.cache_dir {
            self.set(ConfigKey::CacheDir, v, source.clone());
        }
        if let Some(v) = raw.package_site {
            self.set(ConfigKey::PackageSite, v, source.clone());
        }
        if let Some(v) = raw.repositories {
            self.set(ConfigKey::Repositories, v, source);
        }
    }

    /// Set a value, recording where it came from.
    pub fn set(&mut self, key: ConfigKey, value: impl Into<String>, source: ConfigSource) {
        let value = value.into();
        match key {
            ConfigKey::CacheDir => self.cache_dir = PathBuf::from(value),
            ConfigKey::PackageSite => self.package_site = Some(value),
            ConfigKey::Repositories => self.repositories_file = PathBuf::from(value),
        }
        self.sources.insert(key, source);
    }

    /// Look up a value by key. Unset keys yield `None`.
    pub fn get(&self, key: ConfigKey) -> Option<String> {
        match key {
            ConfigKey::CacheDir => Some(self.cache_dir.to_string_lossy().into_owned()),
            ConfigKey::PackageSite => self.package_site.clone(),
            ConfigKey::Repositories => Some(self.repositories_file.to_string_lossy().into_owned()),
        }
    }

    /// Where the value of `key` came from.
    pub fn source(&self, key: ConfigKey) -> &ConfigSource {
        self.sources.get(&key).unwrap_or(&ConfigSource::Default)
    }

    /// The package site, which has no default.
    pub fn require_package_site(&self) -> Result<&str> {
        self.package_site
            .as_deref()
            .ok_or_else(|| PkgError::Config(format!("{} is not set", ConfigKey::PackageSite)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();

        assert_eq!(config.cache_dir, PathBuf::from("/var/cache/pkg"));
        assert_eq!(config.package_site, None);
        assert_eq!(config.repositories_file, PathBuf::from("/etc/pkg/repositories"));
        assert_eq!(config.source(ConfigKey::PackageSite), &ConfigSource::Default);
    }

    #[test]
    fn test_get_by_key() {
        let mut config = Config::default();
        config.set(ConfigKey::PackageSite, "https://example.com", ConfigSource::Command);

        assert_eq!(config.get(ConfigKey::CacheDir).as_deref(), Some("/var/cache/pkg"));
        assert_eq!(config.get(ConfigKey::PackageSite).as_deref(), Some("https://example.com"));
        assert_eq!(config.source(ConfigKey::PackageSite), &ConfigSource::Command);
    }

    #[test]
    fn test_require_package_site() {
        let config = Config::default();
        assert!(matches!(config.require_package_site(), Err(PkgError::Config(_))));
    }

    #[test]
    fn test_merge_raw_only_overrides_present_values() {
        let mut config = Config::default();
        config.merge_raw(
            RawConfig {
                package_site: Some("https://example.com".to_string()),
                ..Default::default()
            },
            ConfigSource::File,
        );

        assert_eq!(config.cache_dir, PathBuf::from(DEFAULT_CACHE_DIR));
        assert_eq!(config.source(ConfigKey::CacheDir), &ConfigSource::Default);
        assert_eq!(config.source(ConfigKey::PackageSite), &ConfigSource::File);
    }

    #[test]
    fn test_key_names() {
        assert_eq!(ConfigKey::from_name("PKG_CACHEDIR"), Some(ConfigKey::CacheDir));
        assert_eq!(ConfigKey::from_name("PACKAGESITE"), Some(ConfigKey::PackageSite));
        assert_eq!(ConfigKey::from_name("PKG_REPOS"), Some(ConfigKey::Repositories));
        assert_eq!(ConfigKey::from_name("OTHER"), None);
    }
}
