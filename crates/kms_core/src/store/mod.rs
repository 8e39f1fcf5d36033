//! Key-value storage collaborators for repository persistence.
//!
//! # Responsibility
//! - Define the string-keyed store contract the repository persists through.
//! - Provide in-memory and SQLite-backed implementations.
//!
//! # Invariants
//! - `set_many` writes every entry or none of them.
//! - Values are opaque strings; the store never interprets payloads.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteKvStore;

/// Storage key holding the JSON article array.
pub const ARTICLES_KEY: &str = "kms_articles";
/// Storage key holding the JSON category array.
pub const CATEGORIES_KEY: &str = "kms_categories";

pub type StoreResult<T> = Result<T, StoreError>;

/// Failure reported by a key-value store backend.
#[derive(Debug)]
pub enum StoreError {
    Db(DbError),
    /// Store schema is missing a required table.
    MissingRequiredTable(&'static str),
    /// Backend refused or lost the operation.
    Unavailable(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::MissingRequiredTable(table) => {
                write!(f, "store schema is missing table `{table}`")
            }
            Self::Unavailable(message) => write!(f, "store unavailable: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::MissingRequiredTable(_) | Self::Unavailable(_) => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// String-keyed storage used to persist repository state.
pub trait KeyValueStore {
    /// Returns the value stored under `key`, if any.
    fn get(&self, key: &str) -> StoreResult<Option<String>>;
    /// Replaces every listed entry as one unit.
    fn set_many(&mut self, entries: &[(&str, String)]) -> StoreResult<()>;
}
