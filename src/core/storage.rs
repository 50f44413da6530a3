//! Storage - SQLite backend
//!
//! A single table, `Facts(id, key, value)`, in a local database file.
//!
//! # Key Points
//! - Every operation opens and closes its own connection
//! - Only `initialize` creates the file; reads open it read-only
//! - `initialize`, `list_all`, `insert` and `delete` log failures and
//!   carry on; the `try_*` twins return them

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rusqlite::types::Value;
use rusqlite::{params, Connection, OpenFlags};
use tracing::{debug, warn};

use super::fact::{Fact, SEED_FACTS};

const CREATE_TABLE: &str =
    "CREATE TABLE IF NOT EXISTS Facts (id INTEGER PRIMARY KEY AUTOINCREMENT, key TEXT, value TEXT)";

/// Fact database handle (holds only the file path)
#[derive(Debug, Clone)]
pub struct FactStore {
    path: PathBuf,
}

impl FactStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the database file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn open_or_create(&self) -> Result<Connection> {
        Connection::open_with_flags(
            &self.path,
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .with_context(|| format!("Failed to open database {}", self.path.display()))
    }

    fn open(&self) -> Result<Connection> {
        Connection::open_with_flags(
            &self.path,
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .with_context(|| format!("Failed to open database {}", self.path.display()))
    }

    fn open_read_only(&self) -> Result<Connection> {
        Connection::open_with_flags(
            &self.path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .with_context(|| format!("Failed to open database {}", self.path.display()))
    }

    /// Create the table if absent, seeding it when this call created it.
    ///
    /// Returns `true` when the table was created.
    pub fn try_initialize(&self) -> Result<bool> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create directory {}", parent.display())
                })?;
            }
        }

        let mut conn = self.open_or_create()?;
        let tx = conn.transaction()?;

        let exists: bool = tx.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'Facts')",
            [],
            |row| row.get(0),
        )?;
        if exists {
            return Ok(false);
        }

        tx.execute_batch(CREATE_TABLE)?;
        {
            let mut stmt = tx.prepare("INSERT INTO Facts VALUES (NULL, ?1, ?2)")?;
            for (key, value) in SEED_FACTS {
                stmt.execute(params![key, value])?;
            }
        }
        tx.commit()?;

        Ok(true)
    }

    /// All facts, in the table's natural row order
    pub fn try_list_all(&self) -> Result<Vec<Fact>> {
        let conn = self.open_read_only()?;
        let mut stmt = conn.prepare("SELECT key, value FROM Facts")?;

        let facts = stmt
            .query_map([], |row| Self::row_to_fact(row))?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(facts)
    }

    /// Append a fact. Duplicate keys are allowed.
    pub fn try_insert(&self, key: &str, value: &str) -> Result<()> {
        let conn = self.open()?;
        conn.execute(
            "INSERT INTO Facts VALUES (NULL, ?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    /// Delete every fact whose key equals `key`. Returns the number removed.
    pub fn try_delete(&self, key: &str) -> Result<usize> {
        let conn = self.open()?;
        let deleted = conn.execute("DELETE FROM Facts WHERE key = ?1", params![key])?;
        Ok(deleted)
    }

    pub fn initialize(&self) {
        match self.try_initialize() {
            Ok(true) => debug!(
                "Successfully initialised database file: {}",
                self.path.display()
            ),
            Ok(false) => debug!("Database file already initialised: {}", self.path.display()),
            Err(e) => warn!(
                "Unable to initialise database file: {} {:#}",
                self.path.display(),
                e
            ),
        }
    }

    /// All facts, or an empty list if the file cannot be read
    pub fn list_all(&self) -> Vec<Fact> {
        match self.try_list_all() {
            Ok(facts) => {
                debug!(
                    "Successfully loaded and read database file: {}",
                    self.path.display()
                );
                for fact in &facts {
                    debug!("Adding {}", fact);
                }
                facts
            }
            Err(e) => {
                warn!(
                    "Unable to load database file: {}: {:#}",
                    self.path.display(),
                    e
                );
                Vec::new()
            }
        }
    }

    pub fn insert(&self, key: &str, value: &str) {
        debug!("Saving {}:{}", key, value);
        if let Err(e) = self.try_insert(key, value) {
            warn!("Unable to save to database: {:#}", e);
        }
    }

    pub fn delete(&self, key: &str) {
        debug!("Deleting {}", key);
        match self.try_delete(key) {
            Ok(0) => debug!("No facts matched {}", key),
            Ok(n) => debug!("Deleted {} fact(s)", n),
            Err(e) => warn!("Unable to delete from database: {:#}", e),
        }
    }

    /// Convert a database row to a Fact, coercing any cell type to text
    fn row_to_fact(row: &rusqlite::Row) -> rusqlite::Result<Fact> {
        Ok(Fact {
            key: coerce_text(row.get(0)?),
            value: coerce_text(row.get(1)?),
        })
    }
}

fn coerce_text(value: Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Integer(i) => i.to_string(),
        Value::Real(f) => f.to_string(),
        Value::Text(s) => s,
        Value::Blob(b) => String::from_utf8_lossy(&b).into_owned(),
    }
}
