//! `recall config` command
//!
//! Shows the settings the plugin would use.
//!
//! # Usage
//! ```bash
//! recall config            # resolved settings as TOML
//! recall config --path     # where settings and facts live
//! recall config --init     # write defaults to ./recall.toml
//! ```

use anyhow::{bail, Result};
use clap::Args;

use crate::config::{Config, SettingsSource};

#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Show config and database paths
    #[arg(long)]
    pub path: bool,

    /// Write a default config file to ./recall.toml
    #[arg(long)]
    pub init: bool,
}

pub fn run(args: ConfigArgs, settings: &SettingsSource) -> Result<()> {
    if args.init {
        let path = Config::local_config_path();
        if path.exists() {
            bail!("{} already exists", path.display());
        }
        Config::default().save_to(&path)?;
        println!("Created {}", path.display());
        return Ok(());
    }

    let config = settings.load()?;

    if args.path {
        match &settings.config_path {
            Some(path) => println!("Config:   {}", path.display()),
            None => {
                println!("Local:    {}", Config::local_config_path().display());
                if let Some(global) = Config::global_config_path() {
                    println!("Global:   {}", global.display());
                }
            }
        }
        println!("Database: {}", config.database_path().display());
        return Ok(());
    }

    print!("{}", toml::to_string_pretty(&config)?);
    println!("\n# database: {}", config.database_path().display());
    Ok(())
}
