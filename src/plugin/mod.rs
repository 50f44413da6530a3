//! Launcher plugin
//!
//! - `item` - selectable entries and their categories
//! - `host` - the launcher seam (catalog, suggestions, clipboard)
//! - `controller` - the selection state machine
//! - `server` - line-delimited JSON-RPC over stdio

pub mod controller;
pub mod host;
pub mod item;
pub mod jsonrpc;
mod server;

pub use controller::{Recall, SuggestState};
pub use host::{Host, MemoryHost};
pub use item::{ArgsHint, Category, HitHint, Item};
pub use server::{run_plugin_server, PluginServer, ProtocolError};
