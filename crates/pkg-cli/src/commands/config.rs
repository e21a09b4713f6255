//! Config command - show configuration values.

use anyhow::{bail, Result};
use clap::Args;
use console::style;
use pkg_core::config::{Config, ConfigKey};

#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Only print the value of this key (e.g. PKG_CACHEDIR)
    #[arg(value_name = "KEY")]
    pub key: Option<String>,

    /// Show where each value comes from
    #[arg(long)]
    pub source: bool,
}

pub fn execute(args: ConfigArgs, config: &Config) -> Result<i32> {
    let keys: Vec<ConfigKey> = match &args.key {
        Some(name) => match ConfigKey::from_name(name) {
            Some(key) => vec![key],
            None => bail!("Unknown configuration key '{}'", name),
        },
        None => ConfigKey::all().to_vec(),
    };

    for key in keys {
        let value = config.get(key).unwrap_or_default();

        if args.key.is_some() && !args.source {
            println!("{}", value);
        } else if args.source {
            println!("{} = {} {}", style(key).cyan(), value, style(format!("({})", config.source(key).as_str())).dim());
        } else {
            println!("{} = {}", style(key).cyan(), value);
        }
    }

    Ok(0)
}
