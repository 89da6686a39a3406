//! SQLite schema definitions.

/// Current schema version for migrations.
pub const SCHEMA_VERSION: i32 = 1;

/// Key under which the statistics store is saved.
pub const STATS_KEY: &str = "kana-stats";

/// Key under which UI preferences are saved.
pub const PREFS_KEY: &str = "kana-ui-prefs";

/// Complete schema for the local SQLite database.
///
/// Values are whole JSON documents; every save overwrites the previous one.
pub const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS kv_store (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

-- Schema version tracking
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER PRIMARY KEY
);
"#;

