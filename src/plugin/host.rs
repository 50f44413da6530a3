//! Host seam
//!
//! The controller never talks to the launcher directly; it publishes
//! through a [`Host`]. The stdio server implements it for a real launcher,
//! [`MemoryHost`] records calls for the CLI preview and for tests.

use super::item::Item;

/// Launcher services available to the plugin
pub trait Host {
    /// Replace the plugin's root-level catalog entries
    fn set_catalog(&mut self, items: Vec<Item>);

    /// Publish the suggestion list, in the given order
    fn set_suggestions(&mut self, items: Vec<Item>);

    /// Write text to the clipboard
    fn set_clipboard(&mut self, text: &str);
}

/// Host that keeps whatever was last published
#[derive(Debug, Default)]
pub struct MemoryHost {
    pub catalog: Vec<Item>,
    /// `None` until the controller publishes a list
    pub suggestions: Option<Vec<Item>>,
    /// Every clipboard write, oldest first
    pub clipboard: Vec<String>,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Labels of the last published suggestions
    pub fn suggestion_labels(&self) -> Vec<&str> {
        self.suggestions
            .iter()
            .flatten()
            .map(|item| item.label.as_str())
            .collect()
    }

    /// Forget the last suggestion list
    pub fn clear_suggestions(&mut self) {
        self.suggestions = None;
    }
}

impl Host for MemoryHost {
    fn set_catalog(&mut self, items: Vec<Item>) {
        self.catalog = items;
    }

    fn set_suggestions(&mut self, items: Vec<Item>) {
        self.suggestions = Some(items);
    }

    fn set_clipboard(&mut self, text: &str) {
        self.clipboard.push(text.to_string());
    }
}
