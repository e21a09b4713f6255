use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;

use crate::error::{PkgError, Result};

/// Where a configuration value came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Built-in value
    Default,
    /// From the config file
    File,
    /// From the named environment variable
    Environment(String),
    /// Set programmatically
    Command,
}

impl ConfigSource {
    pub fn as_str(&self) -> &str {
        match self {
            ConfigSource::Default => "default",
            ConfigSource::File => "file",
            ConfigSource::Environment(var) => var,
            ConfigSource::Command => "command",
        }
    }
}

/// Settings as written in the config file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawConfig {
    #[serde(rename = "PKG_CACHEDIR", default, skip_serializing_if = "Option::is_none")]
    pub cache_dir: Option<String>,

    #[serde(rename = "PACKAGESITE", default, skip_serializing_if = "Option::is_none")]
    pub package_site: Option<String>,

    #[serde(rename = "PKG_REPOS", default, skip_serializing_if = "Option::is_none")]
    pub repositories: Option<String>,
}

/// Reads configuration layers
#[derive(Debug)]
pub struct ConfigLoader {
    use_environment: bool,
}

impl ConfigLoader {
    pub fn new(use_environment: bool) -> Self {
        Self { use_environment }
    }

    /// Value of an environment variable, ignoring empty ones
    pub fn get_env(&self, var: &str) -> Option<String> {
        if !self.use_environment {
            return None;
        }

        env::var(var).ok().filter(|s| !s.is_empty())
    }

    /// Load a TOML config file. A missing file yields an empty config.
    pub fn load_config_file<P: AsRef<Path>>(&self, path: P) -> Result<RawConfig> {
        let path = path.as_ref();

        if !path.exists() {
            return Ok(RawConfig::default());
        }

        let contents = fs::read_to_string(path)
            .map_err(|e| PkgError::Config(format!("Failed to read {}: {}", path.display(), e)))?;

        toml::from_str(&contents)
            .map_err(|e| PkgError::Config(format!("Failed to parse {}: {}", path.display(), e)))
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new(true)
    }
}
