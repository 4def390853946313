//! Database schema definitions
//!
//! Row types for sqlx mapping from the SQLite tables, plus
//! conversions to and from the domain types. Enums are stored as
//! lowercase TEXT, counters as INTEGER.

use crate::error::PersistenceError;
use chrono::{DateTime, Utc};
use quanda_core::{Answer, AnswerStatus, Role, User};
use serde::{Deserialize, Serialize};

/// Row type for the `users` table
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct UserRow {
    pub id: String,
    pub role: String,
    pub valid_answers_count: i64,
    pub created_at: DateTime<Utc>,
}

/// Row type for the `answers` table
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct AnswerRow {
    pub id: String,
    pub question_id: String,
    pub user_id: String,
    pub content: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

// === Conversion implementations ===

impl From<&User> for UserRow {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            role: user.role.as_str().to_string(),
            valid_answers_count: i64::from(user.valid_answers_count),
            created_at: user.created_at,
        }
    }
}

impl TryFrom<UserRow> for User {
    type Error = PersistenceError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let role = Role::from_str(&row.role)
            .ok_or_else(|| PersistenceError::invalid_enum("role", &row.role))?;
        let valid_answers_count = u32::try_from(row.valid_answers_count).map_err(|_| {
            PersistenceError::invalid_enum(
                "valid_answers_count",
                &row.valid_answers_count.to_string(),
            )
        })?;

        Ok(User {
            id: row.id,
            role,
            valid_answers_count,
            created_at: row.created_at,
        })
    }
}

impl From<&Answer> for AnswerRow {
    fn from(answer: &Answer) -> Self {
        Self {
            id: answer.id.clone(),
            question_id: answer.question_id.clone(),
            user_id: answer.user_id.clone(),
            content: answer.content.clone(),
            status: answer.status.as_str().to_string(),
            created_at: answer.created_at,
        }
    }
}

impl TryFrom<AnswerRow> for Answer {
    type Error = PersistenceError;

    fn try_from(row: AnswerRow) -> Result<Self, Self::Error> {
        let status = AnswerStatus::from_str(&row.status)
            .ok_or_else(|| PersistenceError::invalid_enum("status", &row.status))?;

        Ok(Answer {
            id: row.id,
            question_id: row.question_id,
            user_id: row.user_id,
            content: row.content,
            status,
            created_at: row.created_at,
        })
    }
}
