//! Database Module
//!
//! Embedded SurrealDB storage. Opens the RocksDB-backed instance and applies
//! the startup schema: the unique index that guards order numbers.

pub mod models;
pub mod repository;

use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};

use shared::error::ApiError;

const NAMESPACE: &str = "refugio";
const DATABASE: &str = "main";

/// Database service, owner of the embedded SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open the RocksDB-backed database at `db_path` and apply the schema
    pub async fn new(db_path: &str) -> Result<Self, ApiError> {
        let db = Surreal::new::<RocksDb>(db_path)
            .await
            .map_err(|e| ApiError::database(format!("Failed to open database: {}", e)))?;

        Self::initialize(&db).await?;
        tracing::info!(path = %db_path, "Database connection established (embedded SurrealDB)");

        Ok(Self { db })
    }

    /// Open an in-memory database (tests)
    pub async fn new_in_memory() -> Result<Self, ApiError> {
        use surrealdb::engine::local::Mem;

        let db = Surreal::new::<Mem>(())
            .await
            .map_err(|e| ApiError::database(format!("Failed to open database: {}", e)))?;

        Self::initialize(&db).await?;
        Ok(Self { db })
    }

    /// Select namespace/database and apply schema definitions
    ///
    /// The unique index on `orderNumber` is the storage-level guarantee that
    /// no two orders ever share a number, whatever the sequence allocator
    /// does under concurrency.
    async fn initialize(db: &Surreal<Db>) -> Result<(), ApiError> {
        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| ApiError::database(format!("Failed to select namespace: {}", e)))?;

        db.query(
            "DEFINE INDEX IF NOT EXISTS uniq_order_number ON TABLE order FIELDS orderNumber UNIQUE;
             DEFINE INDEX IF NOT EXISTS uniq_admin_email ON TABLE admin FIELDS email UNIQUE;
             DEFINE INDEX IF NOT EXISTS idx_order_created ON TABLE order FIELDS createdAt;",
        )
        .await
        .map_err(|e| ApiError::database(format!("Failed to apply schema: {}", e)))?;

        tracing::info!("Database schema applied");
        Ok(())
    }
}
