//! recall - key/value facts for a desktop launcher
//!
//! Store short facts (a licence plate, a lottery sequence) and copy them to
//! the clipboard from the launcher.
//!
//! ## Key Concepts
//!
//! - **Fact**: a key/value pair in a single-table SQLite file
//! - **Selection chain**: the items the user picked so far, replayed by the
//!   launcher on every keystroke
//! - **Host**: the launcher side, reached over stdio JSON-RPC

pub mod cli;
pub mod config;
pub mod core;
pub mod plugin;

pub use config::{Config, SettingsSource};
pub use core::fact::Fact;
pub use core::storage::FactStore;
pub use plugin::{run_plugin_server, Recall};
