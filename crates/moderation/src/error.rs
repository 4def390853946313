//! Moderation engine errors
//!
//! Authorization, not-found and persistence failures stay distinct so
//! the request-handling layer can map them to different responses.

use quanda_persistence::PersistenceError;
use std::fmt;
use thiserror::Error;

/// The step of the approval unit at which a storage write failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApproveStage {
    /// Flipping the answer status to approved
    ApproveAnswer,
    /// Incrementing the author's validated-answer counter
    IncrementCounter,
    /// Upgrading the author's role
    PromoteAuthor,
    /// Committing the transaction
    Commit,
}

impl ApproveStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApproveStage::ApproveAnswer => "approve-answer",
            ApproveStage::IncrementCounter => "increment-counter",
            ApproveStage::PromoteAuthor => "promote-author",
            ApproveStage::Commit => "commit",
        }
    }
}

impl fmt::Display for ApproveStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Errors from the moderation engine
#[derive(Debug, Error)]
pub enum ModerationError {
    #[error("Actor {actor_id} is not permitted to {action}")]
    Unauthorized { actor_id: String, action: String },

    #[error("Answer not found: {0}")]
    AnswerNotFound(String),

    #[error("User not found: {0}")]
    UserNotFound(String),

    /// A write failed mid-unit; the transaction was rolled back, so no
    /// partial approval persisted. `stage` names the failing step for
    /// callers that implement retries.
    #[error("Approval failed at {stage}, transaction rolled back: {source}")]
    ApprovalFailed {
        stage: ApproveStage,
        #[source]
        source: PersistenceError,
    },

    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),
}

/// Result type alias for moderation operations
pub type ModerationResult<T> = Result<T, ModerationError>;

impl ModerationError {
    /// Create an Unauthorized error
    pub fn unauthorized(actor_id: &str, action: &str) -> Self {
        Self::Unauthorized {
            actor_id: actor_id.to_string(),
            action: action.to_string(),
        }
    }

    /// Create an ApprovalFailed error
    pub fn approval_failed(stage: ApproveStage, source: PersistenceError) -> Self {
        Self::ApprovalFailed { stage, source }
    }

    /// Check whether this is an authorization failure
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    /// Check whether this is a not-found failure
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::AnswerNotFound(_) | Self::UserNotFound(_))
    }
}
