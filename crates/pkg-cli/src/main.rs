mod commands;

use anyhow::{Context, Result};
use clap::Parser;
use pkg_core::config::Config;
use std::path::PathBuf;
use std::process::ExitCode;

use commands::Commands;

#[derive(Parser, Debug)]
#[command(name = "pkg")]
#[command(about = "Repository registry and verified package fetching")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Commands,

    /// Config file to read instead of /etc/pkg.toml
    #[arg(short = 'C', long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

fn run() -> Result<i32> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = Config::build(args.config.as_deref(), true).context("Failed to load configuration")?;

    commands::execute(args.command, &config)
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => ExitCode::from(code as u8),
        Err(e) => {
            eprintln!("Error: {}", e);
            for cause in e.chain().skip(1) {
                eprintln!("  Caused by: {}", cause);
            }
            ExitCode::FAILURE
        }
    }
}
