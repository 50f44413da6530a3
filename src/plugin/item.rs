//! Items exchanged with the launcher
//!
//! Every entry the plugin publishes (catalog keyword, menu actions, facts)
//! is an [`Item`]. The launcher hands chosen items back in the selection
//! chain and in `execute`, so items must survive a round trip over the wire.

use serde::{Deserialize, Serialize};

use crate::core::fact::Fact;

pub const ADD_ENTRY_LABEL: &str = "Add Entry";
pub const DELETE_ENTRY_LABEL: &str = "Delete Entry";

/// What an item is and what committing it does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Catalog keyword opening the plugin menu
    Keyword,
    /// Stored fact; committing copies its value
    Fact,
    /// "Add Entry", and the pending key typed after it
    AddCommand,
    /// "Delete Entry"
    DeleteCommand,
    /// Value entry; committing stores the fact
    Save,
    /// Fact listed for deletion; committing deletes it
    Delete,
}

impl Category {
    /// Wire name (matches the serde representation)
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Keyword => "keyword",
            Self::Fact => "fact",
            Self::AddCommand => "add_command",
            Self::DeleteCommand => "delete_command",
            Self::Save => "save",
            Self::Delete => "delete",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether the launcher should collect free text after the item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArgsHint {
    Required,
    Accepted,
    Forbidden,
}

/// How the launcher treats a direct hit on the item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HitHint {
    NoArgs,
    Ignore,
}

/// A selectable entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub category: Category,
    pub label: String,
    #[serde(default)]
    pub short_desc: String,
    #[serde(default)]
    pub target: String,
    /// Opaque payload (a fact value, or the key carried into the value step)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_bag: Option<String>,
    pub args_hint: ArgsHint,
    pub hit_hint: HitHint,
}

impl Item {
    pub fn keyword(keyword: &str, label: &str, short_desc: &str) -> Self {
        Self {
            category: Category::Keyword,
            label: label.to_string(),
            short_desc: short_desc.to_string(),
            target: keyword.to_string(),
            data_bag: None,
            args_hint: ArgsHint::Required,
            hit_hint: HitHint::NoArgs,
        }
    }

    pub fn add_command() -> Self {
        Self::command(Category::AddCommand, ADD_ENTRY_LABEL, "Add a new entry")
    }

    pub fn delete_command() -> Self {
        Self::command(Category::DeleteCommand, DELETE_ENTRY_LABEL, "Delete an entry")
    }

    fn command(category: Category, label: &str, short_desc: &str) -> Self {
        Self {
            category,
            label: label.to_string(),
            short_desc: short_desc.to_string(),
            target: label.to_string(),
            data_bag: None,
            args_hint: ArgsHint::Required,
            hit_hint: HitHint::Ignore,
        }
    }

    /// Committing copies the fact's value
    pub fn fact(fact: &Fact) -> Self {
        Self {
            category: Category::Fact,
            label: fact.key.clone(),
            short_desc: format!("{} (Press Enter to copy to clipboard)", fact.value),
            target: fact.key.clone(),
            data_bag: Some(fact.value.clone()),
            args_hint: ArgsHint::Accepted,
            hit_hint: HitHint::Ignore,
        }
    }

    /// Committing deletes every fact with this key
    pub fn deletable(fact: &Fact) -> Self {
        Self {
            category: Category::Delete,
            label: fact.key.clone(),
            short_desc: format!("{} (Press Enter to delete)", fact.value),
            target: fact.key.clone(),
            data_bag: Some(fact.value.clone()),
            args_hint: ArgsHint::Accepted,
            hit_hint: HitHint::Ignore,
        }
    }

    /// The typed text, offered as the new fact's key
    pub fn pending_key(input: &str) -> Self {
        Self {
            category: Category::AddCommand,
            label: input.to_string(),
            short_desc: input.to_string(),
            target: input.to_string(),
            data_bag: None,
            args_hint: ArgsHint::Required,
            hit_hint: HitHint::NoArgs,
        }
    }

    /// The typed text, offered as the value stored under `key`
    pub fn save(key: &str, input: &str) -> Self {
        Self {
            category: Category::Save,
            label: input.to_string(),
            short_desc: input.to_string(),
            target: input.to_string(),
            data_bag: Some(key.to_string()),
            args_hint: ArgsHint::Forbidden,
            hit_hint: HitHint::NoArgs,
        }
    }

    /// `data_bag` or the empty string
    pub fn data(&self) -> &str {
        self.data_bag.as_deref().unwrap_or_default()
    }
}
