//! # Quanda Persistence
//!
//! SQLite persistence layer for the Quanda moderation core.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use quanda_persistence::{Database, UserRepo};
//!
//! // Initialize database
//! let db = Database::new("sqlite:quanda.db?mode=rwc").await?;
//!
//! // Query via repos
//! let author = UserRepo::get_by_id(db.pool(), "USR_001").await?;
//! ```

pub mod error;
pub mod sqlite;

pub use error::{PersistenceError, PersistenceResult};
pub use sqlite::{create_memory_pool, create_pool, init_database, AnswerRepo, UserRepo};
pub use sqlite::schema::{AnswerRow, UserRow};

use sqlx::SqlitePool;

/// Database facade - owns the SQLite connection pool
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open (creating if missing) a database and initialize the schema
    ///
    /// # Arguments
    /// * `db_url` - SQLite database URL (e.g., "sqlite:quanda.db?mode=rwc")
    pub async fn new(db_url: &str) -> PersistenceResult<Self> {
        let pool = sqlite::init_database(db_url).await?;
        Ok(Self { pool })
    }

    /// Create an in-memory database (for testing)
    pub async fn in_memory() -> PersistenceResult<Self> {
        let pool = sqlite::create_memory_pool().await?;
        Ok(Self { pool })
    }

    /// Get the SQLite connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close the pool, flushing outstanding connections
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quanda_core::User;

    #[tokio::test]
    async fn test_in_memory_database() {
        let db = Database::in_memory().await.unwrap();
        let user = User::member("USR_001");

        UserRepo::insert(db.pool(), &user).await.unwrap();
        let row = UserRepo::get_by_id(db.pool(), "USR_001").await.unwrap();
        assert_eq!(row.id, "USR_001");
    }

    #[tokio::test]
    async fn test_file_database_persists() {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}", dir.path().join("quanda.db").display());

        let db = Database::new(&url).await.unwrap();
        UserRepo::insert(db.pool(), &User::supervisor("USR_002"))
            .await
            .unwrap();
        db.close().await;

        // Reopen and read the same record back
        let db = Database::new(&url).await.unwrap();
        let row = UserRepo::get_by_id(db.pool(), "USR_002").await.unwrap();
        assert_eq!(row.role, "supervisor");
    }
}
