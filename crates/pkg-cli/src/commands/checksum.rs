//! Checksum command - print SHA-256 digests like sha256sum.

use anyhow::{Context, Result};
use clap::Args;
use pkg_core::fetcher::sha256_file;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct ChecksumArgs {
    /// Files to hash
    #[arg(value_name = "FILES", required = true)]
    pub files: Vec<PathBuf>,
}

pub fn execute(args: ChecksumArgs) -> Result<i32> {
    for file in &args.files {
        let digest = sha256_file(file).with_context(|| format!("Failed to hash {}", file.display()))?;
        println!("{}  {}", digest, file.display());
    }
    Ok(0)
}
