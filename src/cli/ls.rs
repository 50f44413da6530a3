//! `recall ls` command
//!
//! # Usage
//! ```bash
//! recall ls
//! recall ls --plain      # key<TAB>value, one per line
//! ```

use anyhow::Result;
use clap::Args;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::utils::open_store;
use crate::config::SettingsSource;

#[derive(Args, Debug)]
pub struct LsArgs {
    /// Tab-separated output without a table
    #[arg(long)]
    pub plain: bool,
}

#[derive(Tabled)]
struct FactRow {
    #[tabled(rename = "Key")]
    key: String,
    #[tabled(rename = "Value")]
    value: String,
}

pub fn run(args: LsArgs, settings: &SettingsSource) -> Result<()> {
    let store = open_store(settings)?;
    let facts = store.try_list_all()?;

    if args.plain {
        for fact in facts {
            println!("{}\t{}", fact.key, fact.value);
        }
        return Ok(());
    }

    if facts.is_empty() {
        println!("No facts stored.");
        return Ok(());
    }

    let rows = facts.into_iter().map(|fact| FactRow {
        key: fact.key,
        value: fact.value,
    });
    println!("{}", Table::new(rows).with(Style::rounded()));

    Ok(())
}
