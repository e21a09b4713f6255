//! Repos command - list the configured remote repositories.

use anyhow::{Context, Result};
use clap::Args;
use console::style;
use pkg_core::config::Config;
use pkg_core::RepositoryRegistry;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct ReposArgs {
    /// Repositories file to read instead of the configured one
    #[arg(short, long, value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Only print repository names
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Exit with an error if any line of the file is malformed
    #[arg(long)]
    pub strict: bool,
}

pub fn execute(args: ReposArgs, config: &Config) -> Result<i32> {
    let path = args.file.unwrap_or_else(|| config.repositories_file.clone());

    let mut registry = RepositoryRegistry::new();
    let report = registry
        .load(&path)
        .with_context(|| format!("Failed to load repositories from {}", path.display()))?;

    let width = registry.iter().map(|r| r.name.len()).max().unwrap_or(0);

    for repo in registry.cursor() {
        if args.quiet {
            println!("{}", repo.name);
        } else {
            println!("{}  {}", style(format!("{:width$}", repo.name)).green(), repo.url);
        }
    }

    if !report.rejected.is_empty() {
        eprintln!(
            "{} {} malformed line(s) ignored in {}",
            style("Warning:").yellow(),
            report.rejected.len(),
            path.display()
        );
        if args.strict {
            return Ok(1);
        }
    }

    Ok(0)
}
