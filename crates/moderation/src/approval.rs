//! Approval workflow logic

use crate::error::{ApproveStage, ModerationError, ModerationResult};
use quanda_core::{policy, Answer, AnswerStatus, Role, User};
use quanda_persistence::{AnswerRepo, Database, PersistenceError, UserRepo};
use sqlx::SqlitePool;

/// Outcome of a successful approval.
///
/// Carries the records as persisted, plus whether this approval
/// promoted the author.
#[derive(Debug, Clone)]
pub struct ApprovalOutcome {
    /// The answer with its status flipped to approved
    pub answer: Answer,
    /// The author with the incremented counter (and possibly new role)
    pub author: User,
    /// True when this approval crossed the promotion threshold
    pub promoted: bool,
}

/// Moderation engine - executes the approval transition
pub struct ModerationService {
    pool: SqlitePool,
}

impl ModerationService {
    /// Create a new service on a database
    pub fn new(db: &Database) -> Self {
        Self {
            pool: db.pool().clone(),
        }
    }

    /// Create a service from a pool directly
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Approve an answer on behalf of `actor`.
    ///
    /// One transactional unit: flips the answer to approved,
    /// increments the author's validated-answer counter, and promotes
    /// the author to supervisor once the counter strictly exceeds
    /// [`quanda_core::PROMOTION_THRESHOLD`]. A failure at any step
    /// rolls the whole unit back.
    ///
    /// Re-approval is not guarded: approving an already-approved
    /// answer increments the author's counter again.
    pub async fn approve(
        &self,
        actor: &User,
        answer: &Answer,
    ) -> ModerationResult<ApprovalOutcome> {
        // Gate check, re-verified here regardless of the caller
        if !policy::can_approve(actor, answer) {
            tracing::warn!(
                actor_id = %actor.id,
                answer_id = %answer.id,
                "Approval denied: actor is not a supervisor"
            );
            return Err(ModerationError::unauthorized(&actor.id, "approve"));
        }

        let mut tx = self.pool.begin().await.map_err(PersistenceError::from)?;

        // Flip the answer status
        AnswerRepo::update_status(&mut *tx, &answer.id, AnswerStatus::Approved)
            .await
            .map_err(|err| match err {
                PersistenceError::NotFound { .. } => {
                    ModerationError::AnswerNotFound(answer.id.clone())
                }
                err => ModerationError::approval_failed(ApproveStage::ApproveAnswer, err),
            })?;

        let updated_answer: Answer = AnswerRepo::get_by_id(&mut *tx, &answer.id)
            .await
            .and_then(Answer::try_from)
            .map_err(|err| ModerationError::approval_failed(ApproveStage::ApproveAnswer, err))?;

        // Credit the author; a single atomic UPDATE at the storage layer
        UserRepo::increment_valid_answers(&mut *tx, &answer.user_id)
            .await
            .map_err(|err| match err {
                PersistenceError::NotFound { .. } => {
                    ModerationError::UserNotFound(answer.user_id.clone())
                }
                err => ModerationError::approval_failed(ApproveStage::IncrementCounter, err),
            })?;

        // Promotion rule runs on the counter as incremented above
        let mut author: User = UserRepo::get_by_id(&mut *tx, &answer.user_id)
            .await
            .and_then(User::try_from)
            .map_err(|err| {
                ModerationError::approval_failed(ApproveStage::IncrementCounter, err)
            })?;

        let promoted = author.qualifies_for_promotion();
        if promoted {
            UserRepo::set_role(&mut *tx, &author.id, Role::Supervisor)
                .await
                .map_err(|err| {
                    ModerationError::approval_failed(ApproveStage::PromoteAuthor, err)
                })?;
            author.role = Role::Supervisor;

            tracing::info!(
                user_id = %author.id,
                valid_answers = author.valid_answers_count,
                "Author promoted to supervisor"
            );
        }

        tx.commit().await.map_err(|err| {
            ModerationError::approval_failed(ApproveStage::Commit, PersistenceError::from(err))
        })?;

        tracing::info!(
            answer_id = %updated_answer.id,
            author_id = %author.id,
            valid_answers = author.valid_answers_count,
            "Answer approved"
        );

        Ok(ApprovalOutcome {
            answer: updated_answer,
            author,
            promoted,
        })
    }
}
