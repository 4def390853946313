//! Repository implementations for SQLite
//!
//! Methods are generic over the executor so the same call runs on the
//! pool or inside a transaction.

use crate::error::{PersistenceError, PersistenceResult};
use crate::sqlite::schema::*;
use quanda_core::{Answer, AnswerStatus, Role, User};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{SqliteExecutor, SqlitePool};

// ============================================================================
// User Repository
// ============================================================================

/// Repository for the `users` table
pub struct UserRepo;

impl UserRepo {
    /// Get a user by ID
    pub async fn get_by_id(
        executor: impl SqliteExecutor<'_>,
        id: &str,
    ) -> PersistenceResult<UserRow> {
        sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(executor)
            .await?
            .ok_or_else(|| PersistenceError::not_found("User", id))
    }

    /// Insert a new user
    pub async fn insert(executor: impl SqliteExecutor<'_>, user: &User) -> PersistenceResult<()> {
        let row = UserRow::from(user);
        sqlx::query(
            "INSERT INTO users (id, role, valid_answers_count, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(&row.id)
        .bind(&row.role)
        .bind(row.valid_answers_count)
        .bind(row.created_at)
        .execute(executor)
        .await?;
        Ok(())
    }

    /// Increment the validated-answer counter by one.
    ///
    /// A single UPDATE, so the read-modify-write is atomic at the
    /// storage layer; concurrent approvals of different answers by the
    /// same author cannot lose an increment.
    pub async fn increment_valid_answers(
        executor: impl SqliteExecutor<'_>,
        id: &str,
    ) -> PersistenceResult<()> {
        let result = sqlx::query(
            "UPDATE users SET valid_answers_count = valid_answers_count + 1 WHERE id = ?",
        )
        .bind(id)
        .execute(executor)
        .await?;

        if result.rows_affected() == 0 {
            return Err(PersistenceError::not_found("User", id));
        }
        Ok(())
    }

    /// Update a user's role
    pub async fn set_role(
        executor: impl SqliteExecutor<'_>,
        id: &str,
        role: Role,
    ) -> PersistenceResult<()> {
        let result = sqlx::query("UPDATE users SET role = ? WHERE id = ?")
            .bind(role.as_str())
            .bind(id)
            .execute(executor)
            .await?;

        if result.rows_affected() == 0 {
            return Err(PersistenceError::not_found("User", id));
        }
        Ok(())
    }
}

// ============================================================================
// Answer Repository
// ============================================================================

/// Repository for the `answers` table
pub struct AnswerRepo;

impl AnswerRepo {
    /// Get an answer by ID
    pub async fn get_by_id(
        executor: impl SqliteExecutor<'_>,
        id: &str,
    ) -> PersistenceResult<AnswerRow> {
        sqlx::query_as::<_, AnswerRow>("SELECT * FROM answers WHERE id = ?")
            .bind(id)
            .fetch_optional(executor)
            .await?
            .ok_or_else(|| PersistenceError::not_found("Answer", id))
    }

    /// Insert a new answer
    pub async fn insert(
        executor: impl SqliteExecutor<'_>,
        answer: &Answer,
    ) -> PersistenceResult<()> {
        let row = AnswerRow::from(answer);
        sqlx::query(
            "INSERT INTO answers (id, question_id, user_id, content, status, created_at)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&row.id)
        .bind(&row.question_id)
        .bind(&row.user_id)
        .bind(&row.content)
        .bind(&row.status)
        .bind(row.created_at)
        .execute(executor)
        .await?;
        Ok(())
    }

    /// Update an answer's status
    pub async fn update_status(
        executor: impl SqliteExecutor<'_>,
        id: &str,
        status: AnswerStatus,
    ) -> PersistenceResult<()> {
        let result = sqlx::query("UPDATE answers SET status = ? WHERE id = ?")
            .bind(status.as_str())
            .bind(id)
            .execute(executor)
            .await?;

        if result.rows_affected() == 0 {
            return Err(PersistenceError::not_found("Answer", id));
        }
        Ok(())
    }
}

// ============================================================================
// Pool setup
// ============================================================================

/// Create a connection pool from a database URL
pub async fn create_pool(database_url: &str) -> PersistenceResult<SqlitePool> {
    let pool = SqlitePool::connect(database_url).await?;
    Ok(pool)
}

/// Create the schema if it does not exist yet
pub async fn init_schema(pool: &SqlitePool) -> PersistenceResult<()> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS users (
            id TEXT PRIMARY KEY,
            role TEXT NOT NULL,
            valid_answers_count INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL
        )",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS answers (
            id TEXT PRIMARY KEY,
            question_id TEXT NOT NULL,
            user_id TEXT NOT NULL,
            content TEXT NOT NULL,
            status TEXT NOT NULL DEFAULT 'pending',
            created_at TEXT NOT NULL
        )",
    )
    .execute(pool)
    .await?;

    // Indexes for the common lookups
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_answers_user_id ON answers(user_id)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_answers_question_id ON answers(question_id)")
        .execute(pool)
        .await?;

    Ok(())
}

/// Create a new database file (if missing) with the schema
pub async fn init_database(database_url: &str) -> PersistenceResult<SqlitePool> {
    let pool = SqlitePool::connect_with(
        database_url
            .parse::<sqlx::sqlite::SqliteConnectOptions>()?
            .create_if_missing(true),
    )
    .await?;

    init_schema(&pool).await?;

    Ok(pool)
}

/// Create an in-memory database with the schema (for testing).
///
/// Pinned to a single connection: every `sqlite::memory:` connection
/// is otherwise a separate database.
pub async fn create_memory_pool() -> PersistenceResult<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await?;

    init_schema(&pool).await?;

    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_user_insert_and_get() {
        let pool = create_memory_pool().await.unwrap();
        let user = User::member("USR_001").with_valid_answers(3);

        UserRepo::insert(&pool, &user).await.unwrap();
        let row = UserRepo::get_by_id(&pool, "USR_001").await.unwrap();

        assert_eq!(row.id, "USR_001");
        assert_eq!(row.role, "member");
        assert_eq!(row.valid_answers_count, 3);
    }

    #[tokio::test]
    async fn test_user_not_found() {
        let pool = create_memory_pool().await.unwrap();

        let err = UserRepo::get_by_id(&pool, "USR_404").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_increment_valid_answers() {
        let pool = create_memory_pool().await.unwrap();
        let user = User::member("USR_001");
        UserRepo::insert(&pool, &user).await.unwrap();

        UserRepo::increment_valid_answers(&pool, "USR_001").await.unwrap();
        UserRepo::increment_valid_answers(&pool, "USR_001").await.unwrap();

        let row = UserRepo::get_by_id(&pool, "USR_001").await.unwrap();
        assert_eq!(row.valid_answers_count, 2);
    }

    #[tokio::test]
    async fn test_increment_missing_user() {
        let pool = create_memory_pool().await.unwrap();

        let err = UserRepo::increment_valid_answers(&pool, "USR_404")
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_set_role() {
        let pool = create_memory_pool().await.unwrap();
        let user = User::member("USR_001");
        UserRepo::insert(&pool, &user).await.unwrap();

        UserRepo::set_role(&pool, "USR_001", Role::Supervisor)
            .await
            .unwrap();

        let row = UserRepo::get_by_id(&pool, "USR_001").await.unwrap();
        assert_eq!(row.role, "supervisor");
    }

    #[tokio::test]
    async fn test_answer_insert_and_get() {
        let pool = create_memory_pool().await.unwrap();
        let answer = Answer::new("QST_001", "USR_001", "Use async-trait.");

        AnswerRepo::insert(&pool, &answer).await.unwrap();
        let row = AnswerRepo::get_by_id(&pool, &answer.id).await.unwrap();

        assert_eq!(row.user_id, "USR_001");
        assert_eq!(row.status, "pending");
        assert_eq!(row.content, "Use async-trait.");
    }

    #[tokio::test]
    async fn test_update_status() {
        let pool = create_memory_pool().await.unwrap();
        let answer = Answer::new("QST_001", "USR_001", "Use async-trait.");
        AnswerRepo::insert(&pool, &answer).await.unwrap();

        AnswerRepo::update_status(&pool, &answer.id, AnswerStatus::Approved)
            .await
            .unwrap();

        let row = AnswerRepo::get_by_id(&pool, &answer.id).await.unwrap();
        assert_eq!(row.status, "approved");
    }

    #[tokio::test]
    async fn test_update_status_missing_answer() {
        let pool = create_memory_pool().await.unwrap();

        let err = AnswerRepo::update_status(&pool, "ANS-404", AnswerStatus::Approved)
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_repos_inside_transaction() {
        let pool = create_memory_pool().await.unwrap();
        let user = User::member("USR_001");
        UserRepo::insert(&pool, &user).await.unwrap();

        let mut tx = pool.begin().await.unwrap();
        UserRepo::increment_valid_answers(&mut *tx, "USR_001")
            .await
            .unwrap();
        // Rolled back on drop: the increment must not stick
        drop(tx);

        let row = UserRepo::get_by_id(&pool, "USR_001").await.unwrap();
        assert_eq!(row.valid_answers_count, 0);
    }
}
