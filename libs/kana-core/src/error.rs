//! Error types for kana-core.

use thiserror::Error;

/// Result type alias using CoreError.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors surfaced by the core when a caller breaks a precondition.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("no items to select from; select at least one category")]
    EmptyPool,

    #[error("unknown kana id: {0}")]
    UnknownItem(String),
}
