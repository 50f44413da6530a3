//! Configuration module
//!
//! Settings live in a TOML file with two sections:
//!
//! ```toml
//! [main]
//! database_file = "~/facts.db"
//!
//! [plugin]
//! keyword = "fact"
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

/// Config file name, both in the working directory and the config dir
pub const CONFIG_FILE_NAME: &str = "recall.toml";

/// Database file name used when `main.database_file` is unset
pub const DEFAULT_DATABASE_FILE_NAME: &str = "facts.db";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub main: MainConfig,

    #[serde(default)]
    pub plugin: PluginConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MainConfig {
    /// Path of the SQLite file holding the facts
    #[serde(default)]
    pub database_file: Option<String>,
}

/// How the plugin presents itself to the launcher
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginConfig {
    /// Catalog keyword that opens the fact menu
    #[serde(default = "default_keyword")]
    pub keyword: String,

    #[serde(default = "default_item_label")]
    pub item_label: String,

    #[serde(default = "default_item_desc")]
    pub item_desc: String,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            keyword: default_keyword(),
            item_label: default_item_label(),
            item_desc: default_item_desc(),
        }
    }
}

fn default_keyword() -> String {
    "fact".to_string()
}

fn default_item_label() -> String {
    "Recall...".to_string()
}

fn default_item_desc() -> String {
    "Copy to clipboard".to_string()
}

impl Config {
    /// Load config from default locations
    pub fn load() -> Result<Self> {
        // Working directory first, then the user config dir
        let local = Self::local_config_path();
        if local.exists() {
            return Self::load_from(&local);
        }

        if let Some(global) = Self::global_config_path() {
            if global.exists() {
                return Self::load_from(&global);
            }
        }

        Ok(Self::default())
    }

    /// Load config from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        Ok(config)
    }

    /// Save config to a file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// `./recall.toml`
    pub fn local_config_path() -> PathBuf {
        PathBuf::from(CONFIG_FILE_NAME)
    }

    /// Per-user config file (e.g. `~/.config/recall/recall.toml`)
    pub fn global_config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Per-user database file, or `./facts.db` without a home directory
    pub fn default_database_path() -> PathBuf {
        project_dirs()
            .map(|dirs| dirs.data_dir().join(DEFAULT_DATABASE_FILE_NAME))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE_FILE_NAME))
    }

    /// `main.database_file` with surrounding whitespace stripped.
    /// Blank values count as unset.
    pub fn database_file(&self) -> Option<PathBuf> {
        self.main
            .database_file
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
    }

    /// Database path: the configured file, else the default
    pub fn database_path(&self) -> PathBuf {
        self.database_file()
            .unwrap_or_else(Self::default_database_path)
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "recall")
}

/// Where settings come from, re-read whenever the launcher reports a change
#[derive(Debug, Clone, Default)]
pub struct SettingsSource {
    /// Explicit config file (`--config` / `RECALL_CONFIG`)
    pub config_path: Option<PathBuf>,
    /// Database path that wins over the file (`--db` / `RECALL_DATABASE`)
    pub database_override: Option<PathBuf>,
}

impl SettingsSource {
    pub fn new(config_path: Option<PathBuf>, database_override: Option<PathBuf>) -> Self {
        Self {
            config_path,
            database_override,
        }
    }

    /// Read the current settings
    pub fn load(&self) -> Result<Config> {
        let mut config = match &self.config_path {
            Some(path) => Config::load_from(path)?,
            None => Config::load()?,
        };

        if let Some(db) = &self.database_override {
            config.main.database_file = Some(db.display().to_string());
        }

        Ok(config)
    }

    /// Like [`load`](Self::load), falling back to defaults on error
    pub fn load_or_default(&self) -> Config {
        match self.load() {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Unable to read settings, using defaults: {:#}", e);
                let mut config = Config::default();
                if let Some(db) = &self.database_override {
                    config.main.database_file = Some(db.display().to_string());
                }
                config
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.plugin.keyword, "fact");
        assert_eq!(config.plugin.item_label, "Recall...");
        assert_eq!(config.plugin.item_desc, "Copy to clipboard");
        assert!(config.database_file().is_none());
    }

    #[test]
    fn test_database_file_is_stripped() {
        let config: Config =
            toml::from_str("[main]\ndatabase_file = \"  /tmp/facts.db \"\n").unwrap();
        assert_eq!(config.database_path(), PathBuf::from("/tmp/facts.db"));
    }

    #[test]
    fn test_blank_database_file_uses_default() {
        let config: Config = toml::from_str("[main]\ndatabase_file = \"   \"\n").unwrap();
        assert!(config.database_file().is_none());
        assert_eq!(config.database_path(), Config::default_database_path());
    }

    #[test]
    fn test_settings_source_override() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let config_path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(
            &config_path,
            "[main]\ndatabase_file = \"a.db\"\n[plugin]\nkeyword = \"kv\"\n",
        )?;

        let source = SettingsSource::new(Some(config_path.clone()), None);
        let config = source.load()?;
        assert_eq!(config.database_path(), PathBuf::from("a.db"));
        assert_eq!(config.plugin.keyword, "kv");

        let source = SettingsSource::new(Some(config_path), Some(PathBuf::from("b.db")));
        assert_eq!(source.load()?.database_path(), PathBuf::from("b.db"));
        Ok(())
    }

    #[test]
    fn test_missing_explicit_config_falls_back() {
        let source = SettingsSource::new(
            Some(PathBuf::from("/nonexistent/recall.toml")),
            Some(PathBuf::from("c.db")),
        );
        assert!(source.load().is_err());

        let config = source.load_or_default();
        assert_eq!(config.database_path(), PathBuf::from("c.db"));
        assert_eq!(config.plugin.keyword, "fact");
    }

    #[test]
    fn test_save_and_load() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("sub").join(CONFIG_FILE_NAME);

        let mut config = Config::default();
        config.main.database_file = Some("x.db".to_string());
        config.save_to(&path)?;

        let loaded = Config::load_from(&path)?;
        assert_eq!(loaded.database_path(), PathBuf::from("x.db"));
        Ok(())
    }
}
