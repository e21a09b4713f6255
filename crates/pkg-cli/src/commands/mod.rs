//! Subcommands of the `pkg` binary.

mod checksum;
mod config;
mod fetch;
mod repos;

use anyhow::Result;
use clap::Subcommand;
use pkg_core::config::Config;

pub use checksum::ChecksumArgs;
pub use config::ConfigArgs;
pub use fetch::FetchArgs;
pub use repos::ReposArgs;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the configured remote repositories
    #[command(alias = "repositories")]
    Repos(ReposArgs),

    /// Download a package artifact into the cache and verify it
    Fetch(FetchArgs),

    /// Print the SHA-256 of files
    #[command(alias = "sha256")]
    Checksum(ChecksumArgs),

    /// Show configuration values and where they come from
    Config(ConfigArgs),
}

pub fn execute(command: Commands, config: &Config) -> Result<i32> {
    match command {
        Commands::Repos(args) => repos::execute(args, config),
        Commands::Fetch(args) => fetch::execute(args, config),
        Commands::Checksum(args) => checksum::execute(args),
        Commands::Config(args) => config::execute(args, config),
    }
}
