//! Fact - Core data structure
//!
//! A fact is a user-visible label (`key`) and the payload recalled for it
//! (`value`). Keys are not unique: two facts may share a label and both
//! are listed.

use serde::{Deserialize, Serialize};

/// A stored key/value pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fact {
    pub key: String,
    pub value: String,
}

impl Fact {
    /// Create a new fact
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl std::fmt::Display for Fact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.key, self.value)
    }
}

/// Example rows written when the table is first created
pub const SEED_FACTS: [(&str, &str); 4] = [
    ("Favourite Ice-cream flavour", "Chocolate"),
    ("Lottery Numbers", "43,12,10,24,55"),
    ("Wife's birthday", "3rd March"),
    ("Licence Plate Number", "JWD-334"),
];

/// Seed rows as facts, in insertion order
pub fn seed_facts() -> Vec<Fact> {
    SEED_FACTS
        .iter()
        .map(|(key, value)| Fact::new(*key, *value))
        .collect()
}
