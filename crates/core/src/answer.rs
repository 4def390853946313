//! Answer data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Status of an answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnswerStatus {
    /// Posted, awaiting supervisor review
    Pending,
    /// Validated by a supervisor
    Approved,
}

impl AnswerStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnswerStatus::Pending => "pending",
            AnswerStatus::Approved => "approved",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(AnswerStatus::Pending),
            "approved" => Some(AnswerStatus::Approved),
            _ => None,
        }
    }
}

impl fmt::Display for AnswerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A member's answer to a question.
///
/// Created pending by the posting flow; only the approval transition
/// moves it to approved. Content is opaque to this core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Answer {
    /// Unique answer id
    pub id: String,
    /// Owning question (carried for the platform, not interpreted here)
    pub question_id: String,
    /// Authoring user
    pub user_id: String,
    /// Answer body
    pub content: String,
    /// Current status
    pub status: AnswerStatus,
    /// Creation time
    pub created_at: DateTime<Utc>,
}

impl Answer {
    /// Create a new pending answer
    pub fn new(question_id: &str, user_id: &str, content: &str) -> Self {
        let id = format!("ANS-{}", uuid::Uuid::new_v4().to_string()[..8].to_uppercase());

        Self {
            id,
            question_id: question_id.to_string(),
            user_id: user_id.to_string(),
            content: content.to_string(),
            status: AnswerStatus::Pending,
            created_at: Utc::now(),
        }
    }

    /// Whether this answer has been validated
    pub fn is_approved(&self) -> bool {
        self.status == AnswerStatus::Approved
    }
}
