//! Core module - Business logic
//!
//! The fact model and its SQLite-backed store.

pub mod fact;
pub mod storage;

pub use fact::Fact;
pub use storage::FactStore;
