//! `recall suggest` command
//!
//! Prints what the launcher would show for a selection chain. Chain entries
//! are menu labels picked after the keyword. Facts are only read; a missing
//! database is not created (run `recall init` first).
//!
//! # Usage
//! ```bash
//! recall suggest                                          # root menu
//! recall suggest --chain "Add Entry" "Pet Name"           # key step
//! recall suggest --chain "Add Entry" --chain "Pet Name" Rex
//! recall suggest --chain "Delete Entry"
//! ```

use anyhow::Result;
use clap::Args;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::config::SettingsSource;
use crate::core::fact::Fact;
use crate::plugin::item::{ADD_ENTRY_LABEL, DELETE_ENTRY_LABEL};
use crate::plugin::{Category, Item, MemoryHost, Recall};

#[derive(Args, Debug)]
pub struct SuggestArgs {
    /// Labels picked after the keyword, in order
    #[arg(long)]
    pub chain: Vec<String>,

    /// Text typed after the last pick
    #[arg(default_value = "")]
    pub input: String,
}

#[derive(Tabled)]
struct SuggestionRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Label")]
    label: String,
    #[tabled(rename = "Description")]
    description: String,
}

/// Rebuild the items a user would have picked to produce `labels`
pub fn build_chain(keyword_item: Item, labels: &[String]) -> Vec<Item> {
    let mut chain = vec![keyword_item];

    for label in labels {
        let item = match (chain.get(1).map(|item| item.category), label.as_str()) {
            (None, ADD_ENTRY_LABEL) => Item::add_command(),
            (None, DELETE_ENTRY_LABEL) => Item::delete_command(),
            (Some(Category::AddCommand), _) => Item::pending_key(label),
            _ => Item::fact(&Fact::new(label.as_str(), "")),
        };
        chain.push(item);
    }

    chain
}

pub fn run(args: SuggestArgs, settings: &SettingsSource) -> Result<()> {
    let config = settings.load()?;
    let mut recall = Recall::new(&config);
    let mut host = MemoryHost::new();

    recall.on_catalog(&mut host);

    let keyword_item = host.catalog.first().cloned().unwrap_or_else(|| {
        Item::keyword(
            &config.plugin.keyword,
            &config.plugin.item_label,
            &config.plugin.item_desc,
        )
    });
    let chain = build_chain(keyword_item, &args.chain);

    recall.on_suggest(&mut host, &args.input, &chain);

    let Some(items) = host.suggestions else {
        println!("(no suggestions)");
        return Ok(());
    };

    let rows = items.into_iter().map(|item| SuggestionRow {
        category: item.category.to_string(),
        label: item.label,
        description: item.short_desc,
    });
    println!("{}", Table::new(rows).with(Style::rounded()));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(labels: &[&str]) -> Vec<String> {
        labels.iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn test_build_chain_add_flow() {
        let kw = Item::keyword("fact", "Recall...", "");
        let chain = build_chain(kw, &labels(&["Add Entry", "Pet Name"]));

        assert_eq!(chain.len(), 3);
        assert_eq!(chain[1].category, Category::AddCommand);
        assert_eq!(chain[2], Item::pending_key("Pet Name"));
    }

    #[test]
    fn test_build_chain_delete_and_other() {
        let kw = Item::keyword("fact", "Recall...", "");

        let chain = build_chain(kw.clone(), &labels(&["Delete Entry"]));
        assert_eq!(chain[1].category, Category::DeleteCommand);

        let chain = build_chain(kw, &labels(&["Lottery Numbers"]));
        assert_eq!(chain[1].category, Category::Fact);
    }
}
