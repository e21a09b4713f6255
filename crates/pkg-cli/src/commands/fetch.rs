//! Fetch command - download a package artifact into the cache.

use anyhow::{bail, Context, Result};
use clap::Args;
use console::style;
use pkg_core::config::Config;
use pkg_core::fetcher::is_valid_checksum;
use pkg_core::http::{HttpClient, HttpClientConfig};
use pkg_core::{Fetcher, Package, PackageKind, PkgError};
use std::path::PathBuf;
use std::time::Duration;

const MAX_RETRIES: i64 = 10;

#[derive(Args, Debug)]
pub struct FetchArgs {
    /// Path of the artifact inside the package site (e.g. All/foo-1.0.txz)
    #[arg(value_name = "REPO_PATH")]
    pub repo_path: String,

    /// Expected SHA-256 of the artifact
    #[arg(short, long)]
    pub checksum: String,

    /// Package name, used in messages
    #[arg(long)]
    pub name: Option<String>,

    /// Package version, used in messages
    #[arg(long, default_value = "0")]
    pub version: String,

    /// The package replaces an installed one
    #[arg(long)]
    pub upgrade: bool,

    /// Package site to download from instead of PACKAGESITE
    #[arg(long, value_name = "URL")]
    pub site: Option<String>,

    /// Number of HTTP retries on transient failures
    #[arg(long, default_value = "3", value_parser = clap::value_parser!(u32).range(0..=MAX_RETRIES))]
    pub retries: u32,

    /// Proxy URL for all HTTP traffic
    #[arg(long, value_name = "URL")]
    pub proxy: Option<String>,

    /// PEM file with an extra root certificate to trust
    #[arg(long, value_name = "FILE")]
    pub cafile: Option<PathBuf>,

    /// HTTP timeout in seconds
    #[arg(long, default_value = "300")]
    pub timeout: u64,
}

pub fn execute(args: FetchArgs, config: &Config) -> Result<i32> {
    if !is_valid_checksum(&args.checksum) {
        bail!("Invalid checksum '{}': expected 64 hex characters", args.checksum);
    }

    let mut http_config = HttpClientConfig::new()
        .with_max_retries(args.retries)
        .with_timeout(Duration::from_secs(args.timeout));
    if let Some(proxy) = args.proxy.clone() {
        http_config = http_config.with_proxy(proxy);
    }
    if let Some(cafile) = args.cafile.clone() {
        http_config = http_config.with_cafile(cafile);
    }

    let client = HttpClient::with_config(http_config).context("Failed to create HTTP client")?;

    let fetcher = match &args.site {
        Some(site) => Fetcher::new(client, &config.cache_dir, site.as_str()),
        None => Fetcher::from_config(config, client)?,
    };

    let name = args.name.clone().unwrap_or_else(|| file_stem(&args.repo_path));
    let kind = if args.upgrade { PackageKind::UpgradeRemote } else { PackageKind::Remote };
    let pkg = Package::remote(name, args.version, args.repo_path, args.checksum).with_kind(kind);

    match fetcher.fetch(&pkg) {
        Ok(path) => {
            println!("{} {}", style("Fetched").green().bold(), path.display());
            Ok(0)
        }
        Err(e @ PkgError::ChecksumMismatch { .. }) => {
            eprintln!("{} {}", style("Checksum failed:").red().bold(), e);
            Ok(2)
        }
        Err(e) => Err(e).with_context(|| format!("Failed to fetch {}", pkg)),
    }
}

fn file_stem(repo_path: &str) -> String {
    let file = repo_path.rsplit('/').next().unwrap_or(repo_path);
    file.rsplit_once('.').map_or(file, |(stem, _)| stem).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser, Debug)]
    struct Cli {
        #[command(flatten)]
        fetch: FetchArgs,
    }

    const SUM: &str = "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9";

    #[test]
    fn test_retries_are_bounded() {
        let ok = Cli::try_parse_from(["pkg", "foo-1.0.txz", "-c", SUM, "--retries", "10"]).unwrap();
        assert_eq!(ok.fetch.retries, 10);

        assert!(Cli::try_parse_from(["pkg", "foo-1.0.txz", "-c", SUM, "--retries", "40"]).is_err());
    }

    #[test]
    fn test_proxy_and_cafile_options() {
        let cli = Cli::try_parse_from([
            "pkg",
            "foo-1.0.txz",
            "-c",
            SUM,
            "--proxy",
            "http://proxy.example.com:8080",
            "--cafile",
            "/etc/ssl/extra.pem",
        ])
        .unwrap();

        assert_eq!(cli.fetch.proxy.as_deref(), Some("http://proxy.example.com:8080"));
        assert_eq!(cli.fetch.cafile, Some(PathBuf::from("/etc/ssl/extra.pem")));
    }

    #[test]
    fn test_file_stem() {
        assert_eq!(file_stem("All/foo-1.0.txz"), "foo-1.0");
        assert_eq!(file_stem("bar"), "bar");
        assert_eq!(file_stem("a/b/c.tar"), "c");
    }
}
