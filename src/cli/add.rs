//! `recall add` command
//!
//! Stores a new fact. Missing parts are prompted for, key first.
//!
//! # Usage
//! ```bash
//! recall add "Pet Name" "Rex"
//! recall add "Pet Name"        # prompts for the value
//! recall add                   # prompts for both
//! ```

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use dialoguer::Input;

use super::utils::open_store;
use crate::config::SettingsSource;

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Label shown in the launcher
    pub key: Option<String>,

    /// Text copied to the clipboard
    pub value: Option<String>,
}

fn prompt(label: &str) -> Result<String> {
    let text = Input::<String>::new()
        .with_prompt(label)
        .allow_empty(true)
        .interact_text()?;
    Ok(text)
}

pub fn run(args: AddArgs, settings: &SettingsSource) -> Result<()> {
    let store = open_store(settings)?;

    let key = match args.key {
        Some(key) => key,
        None => prompt("Key")?,
    };
    let value = match args.value {
        Some(value) => value,
        None => prompt("Value")?,
    };

    store.try_insert(&key, &value)?;

    println!("{} Fact added: {}", "✓".green(), key.bold());
    Ok(())
}
