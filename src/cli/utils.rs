//! CLI utility functions

use anyhow::Result;

use crate::config::SettingsSource;
use crate::core::storage::FactStore;

/// Open the configured store, creating and seeding it on first use
pub fn open_store(settings: &SettingsSource) -> Result<FactStore> {
    let config = settings.load()?;
    let store = FactStore::new(config.database_path());
    store.try_initialize()?;
    Ok(store)
}
