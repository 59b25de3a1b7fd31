//! Repository Module
//!
//! Data access over the embedded SurrealDB instance. Each table gets its own
//! repository; all of them share [`BaseRepository`] and the [`RepoError`]
//! taxonomy.

pub mod admin;
pub mod order;
pub mod product;

// Re-exports
pub use admin::AdminRepository;
pub use order::OrderRepository;
pub use product::ProductRepository;

use shared::error::ApiError;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

impl From<RepoError> for ApiError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(resource) => ApiError::not_found(resource),
            RepoError::Duplicate(message) => ApiError::validation(message),
            RepoError::Validation(message) => ApiError::validation(message),
            RepoError::Database(message) => ApiError::database(message),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Parse an id that may be either `"table:id"` or a bare key
///
/// A prefix for a different table is treated as part of the key, so a
/// `"product:x"` id can never address an `order` row.
pub(crate) fn parse_record_id(table: &str, id: &str) -> RecordId {
    if let Ok(parsed) = id.parse::<RecordId>()
        && parsed.table() == table
    {
        return parsed;
    }
    RecordId::from_table_key(table, id)
}

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}
