//! Local SQLite persistence for statistics and preferences.

pub mod error;
pub mod repository;
pub mod schema;

pub use error::DbError;
pub use repository::{PreferencesRepository, SqliteRepository, StatsRepository};
