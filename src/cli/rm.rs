//! `recall rm` command
//!
//! Deletes every fact whose key matches exactly. Missing keys are not an
//! error.

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use super::utils::open_store;
use crate::config::SettingsSource;

#[derive(Args, Debug)]
pub struct RmArgs {
    /// Key to delete
    pub key: String,
}

pub fn run(args: RmArgs, settings: &SettingsSource) -> Result<()> {
    let store = open_store(settings)?;

    match store.try_delete(&args.key)? {
        0 => println!("No fact with key {:?}", args.key),
        n => println!("{} Deleted {} fact(s): {}", "✓".green(), n, args.key.bold()),
    }

    Ok(())
}
