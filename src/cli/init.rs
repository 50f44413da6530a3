//! `recall init` command
//!
//! Creates the fact table. A brand-new table gets four example facts.
//!
//! # Usage
//! ```bash
//! recall init
//! recall --db ~/facts.db init
//! ```

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use crate::config::SettingsSource;
use crate::core::storage::FactStore;

#[derive(Args, Debug)]
pub struct InitArgs {}

pub fn run(_args: InitArgs, settings: &SettingsSource) -> Result<()> {
    let config = settings.load()?;
    let store = FactStore::new(config.database_path());

    if store.try_initialize()? {
        println!(
            "{} Initialized {} with example facts",
            "✓".green(),
            store.path().display()
        );
        println!("\nNext steps:");
        println!("  recall ls");
        println!("  recall add \"Pet Name\" \"Rex\"");
    } else {
        println!("Already initialized: {}", store.path().display());
    }

    Ok(())
}
