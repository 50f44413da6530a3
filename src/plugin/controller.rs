//! Suggestion controller
//!
//! Turns the launcher's selection chain into the next list of choices and
//! commits chosen items against the fact store.
//!
//! The chain is re-read from scratch on every call. Its shape maps to a
//! [`SuggestState`]:
//!
//! ```text
//! [] or [kw]                  Root        Add Entry, Delete Entry, facts...
//! [kw, Add Entry] + text       AddKey      text as the new key
//! [kw, Add Entry, key] + text  AddValue    text as the value for key
//! [kw, Delete Entry]           DeleteList  facts, committing deletes
//! ```

use tracing::debug;

use super::host::Host;
use super::item::{Category, Item};
use crate::config::{Config, PluginConfig};
use crate::core::fact::Fact;
use crate::core::storage::FactStore;

/// Which prompt the current chain asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestState<'a> {
    /// Chain starts at another plugin's item
    Foreign,
    /// Nothing to offer yet (e.g. add flow without typed text)
    Idle,
    Root,
    AddKey { key: &'a str },
    AddValue { key: &'a str, value: &'a str },
    DeleteList,
}

impl<'a> SuggestState<'a> {
    pub fn from_chain(keyword: &str, chain: &'a [Item], input: &'a str) -> Self {
        // An empty chain gets the root menu
        if let Some(root) = chain.first() {
            if root.category != Category::Keyword || root.target != keyword {
                return Self::Foreign;
            }
        }

        match chain.get(1).map(|item| item.category) {
            Some(Category::AddCommand) => {
                if input.is_empty() {
                    return Self::Idle;
                }
                match chain {
                    [_, _] => Self::AddKey { key: input },
                    [_, _, key] => Self::AddValue {
                        key: &key.label,
                        value: input,
                    },
                    _ => Self::Idle,
                }
            }
            Some(Category::DeleteCommand) => Self::DeleteList,
            _ => Self::Root,
        }
    }
}

/// The recall plugin
#[derive(Debug)]
pub struct Recall {
    plugin: PluginConfig,
    store: FactStore,
    facts: Vec<Fact>,
}

impl Recall {
    pub fn new(config: &Config) -> Self {
        Self {
            plugin: config.plugin.clone(),
            store: FactStore::new(config.database_path()),
            facts: Vec::new(),
        }
    }

    pub fn keyword(&self) -> &str {
        &self.plugin.keyword
    }

    pub fn store(&self) -> &FactStore {
        &self.store
    }

    /// Cached facts as of the last reload
    pub fn facts(&self) -> &[Fact] {
        &self.facts
    }

    fn apply_settings(&mut self, config: &Config) {
        self.plugin = config.plugin.clone();
        self.store = FactStore::new(config.database_path());
        debug!("Using database file {}", self.store.path().display());
    }

    fn reload(&mut self) {
        self.facts = self.store.list_all();
    }

    pub fn on_start(&mut self, config: &Config) {
        debug!("On Start");
        self.apply_settings(config);
        self.store.initialize();
    }

    pub fn on_catalog(&mut self, host: &mut dyn Host) {
        debug!("On Catalog");
        self.reload();
        host.set_catalog(vec![Item::keyword(
            &self.plugin.keyword,
            &self.plugin.item_label,
            &self.plugin.item_desc,
        )]);
    }

    pub fn on_settings_changed(&mut self, host: &mut dyn Host, config: &Config) {
        debug!("On Settings Changed");
        self.apply_settings(config);
        self.store.initialize();
        self.on_catalog(host);
    }

    pub fn on_suggest(&self, host: &mut dyn Host, input: &str, chain: &[Item]) {
        debug!("On Suggest {:?} (chain[{}])", input, chain.len());

        match SuggestState::from_chain(&self.plugin.keyword, chain, input) {
            SuggestState::Foreign | SuggestState::Idle => {}
            SuggestState::Root => {
                let mut items = Vec::with_capacity(self.facts.len() + 2);
                items.push(Item::add_command());
                items.push(Item::delete_command());
                items.extend(self.facts.iter().map(Item::fact));
                host.set_suggestions(items);
            }
            SuggestState::AddKey { key } => {
                host.set_suggestions(vec![Item::pending_key(key)]);
            }
            SuggestState::AddValue { key, value } => {
                host.set_suggestions(vec![Item::save(key, value)]);
            }
            SuggestState::DeleteList => {
                debug!("Displaying facts for deletion");
                host.set_suggestions(self.facts.iter().map(Item::deletable).collect());
            }
        }
    }

    /// Commit a chosen item. Unknown categories and `None` are ignored.
    pub fn on_execute(&mut self, host: &mut dyn Host, item: Option<&Item>, action: Option<&str>) {
        debug!("On Execute {:?} (action: {:?})", item.map(|i| &i.label), action);

        let Some(item) = item else {
            return;
        };

        match item.category {
            Category::Fact => host.set_clipboard(item.data()),
            Category::Save => {
                self.store.insert(item.data(), &item.label);
                self.reload();
            }
            Category::Delete => {
                self.store.delete(&item.label);
                self.reload();
            }
            Category::Keyword | Category::AddCommand | Category::DeleteCommand => {}
        }
    }
}
