//! Process-wide settings consumed by the registry and the fetcher.
//!
//! Values are looked up by key and merged from three layers, highest
//! priority first:
//!
//! 1. Environment variables named after the key (`PKG_CACHEDIR`, `PACKAGESITE`, `PKG_REPOS`)
//! 2. The TOML config file (`/etc/pkg.toml` unless another path is given)
//! 3. Built-in defaults
//!
//! # Example
//!
//! ```rust,no_run
//! use pkg_core::config::{Config, ConfigKey};
//!
//! let config = Config::build(None, true).unwrap();
//! println!("Cache dir: {:?}", config.get(ConfigKey::CacheDir));
//! println!("Package site: {:?}", config.get(ConfigKey::PackageSite));
//! ```

mod config;
mod source;

pub use config::{Config, ConfigKey, DEFAULT_CACHE_DIR, DEFAULT_CONFIG_PATH};
pub use source::{ConfigLoader, ConfigSource, RawConfig};
