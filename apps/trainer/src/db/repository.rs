//! Repository pattern for database access.

use crate::db::error::DbError;
use crate::db::schema::{PREFS_KEY, SCHEMA, SCHEMA_VERSION, STATS_KEY};
use chrono::Utc;
use kana_core::{Preferences, StatisticsStore};
use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

type Result<T> = std::result::Result<T, DbError>;

/// Repository for per-item statistics.
pub trait StatsRepository {
    /// Missing or unreadable data yields an empty store.
    fn load_stats(&self) -> StatisticsStore;
    fn save_stats(&self, stats: &StatisticsStore) -> Result<()>;
    fn clear_stats(&self) -> Result<()>;
}

/// Repository for UI preferences.
pub trait PreferencesRepository {
    /// Missing or unreadable data yields the defaults.
    fn load_preferences(&self) -> Preferences;
    fn save_preferences(&self, prefs: &Preferences) -> Result<()>;
}

/// SQLite implementation of repositories.
pub struct SqliteRepository {
    conn: Connection,
}

impl SqliteRepository {
    /// Open database at path, creating if necessary.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        let repo = Self { conn };
        repo.initialize()?;
        Ok(repo)
    }

    /// Open in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let repo = Self { conn };
        repo.initialize()?;
        Ok(repo)
    }

    fn initialize(&self) -> Result<()> {
        self.conn.execute_batch(SCHEMA)?;
        self.conn.execute(
            "INSERT OR IGNORE INTO schema_version (version) VALUES (?1)",
            params![SCHEMA_VERSION],
        )?;
        Ok(())
    }

    fn read_value<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let raw: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;

        match raw {
            None => Ok(None),
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|source| DbError::Corrupt {
                    key: key.to_string(),
                    source,
                }),
        }
    }

    fn write_value<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value)?;
        self.conn.execute(
            "INSERT OR REPLACE INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)",
            params![key, raw, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    fn remove_value(&self, key: &str) -> Result<()> {
        self.conn
            .execute("DELETE FROM kv_store WHERE key = ?1", params![key])?;
        Ok(())
    }

    fn load_or_default<T: DeserializeOwned + Default>(&self, key: &str) -> T {
        match self.read_value(key) {
            Ok(Some(value)) => value,
            Ok(None) => T::default(),
            Err(e) => {
                tracing::warn!(key, error = %e, "failed to read stored value, using default");
                T::default()
            }
        }
    }
}

#[cfg(test)]
impl SqliteRepository {
    /// Drop the value table so every later write fails.
    pub(crate) fn break_storage(&self) {
        self.conn.execute_batch("DROP TABLE kv_store").unwrap();
    }
}

impl StatsRepository for SqliteRepository {
    fn load_stats(&self) -> StatisticsStore {
        self.load_or_default(STATS_KEY)
    }

    fn save_stats(&self, stats: &StatisticsStore) -> Result<()> {
        self.write_value(STATS_KEY, stats)
    }

    fn clear_stats(&self) -> Result<()> {
        self.remove_value(STATS_KEY)
    }
}

impl PreferencesRepository for SqliteRepository {
    fn load_preferences(&self) -> Preferences {
        self.load_or_default::<Preferences>(PREFS_KEY).sanitized()
    }

    fn save_preferences(&self, prefs: &Preferences) -> Result<()> {
        self.write_value(PREFS_KEY, prefs)
    }
}
