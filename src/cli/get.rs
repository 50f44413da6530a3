//! `recall get` command
//!
//! Prints the value stored under a key, one line per matching fact, so the
//! output can be piped into a clipboard tool.

use anyhow::{bail, Result};
use clap::Args;

use super::utils::open_store;
use crate::config::SettingsSource;

#[derive(Args, Debug)]
pub struct GetArgs {
    /// Key to look up (exact match)
    pub key: String,
}

pub fn run(args: GetArgs, settings: &SettingsSource) -> Result<()> {
    let store = open_store(settings)?;

    let values: Vec<String> = store
        .try_list_all()?
        .into_iter()
        .filter(|fact| fact.key == args.key)
        .map(|fact| fact.value)
        .collect();

    if values.is_empty() {
        bail!("No fact with key {:?}", args.key);
    }

    for value in values {
        println!("{}", value);
    }
    Ok(())
}
