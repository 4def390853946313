//! Authorization policies for answer actions
//!
//! One predicate per action, evaluated over the acting user and the
//! target answer. Pure functions: no I/O, no mutation, never fail.
//! The calling layer maps a `false` result to its own
//! permission-denied response.

use crate::answer::Answer;
use crate::user::User;

/// Policy for author-only edits of an answer.
///
/// Kept as an explicit policy object so the edit rule can change
/// without touching call sites.
pub struct AnswerPolicy;

impl AnswerPolicy {
    /// Only the author may update an answer's content. Supervisors get
    /// no special access here.
    pub fn can_update(actor: &User, answer: &Answer) -> bool {
        actor.id == answer.user_id
    }
}

/// Only the author may delete an answer.
///
/// Same ownership comparison as [`AnswerPolicy::can_update`], kept as
/// an independent rule; the two may diverge.
pub fn can_delete(actor: &User, answer: &Answer) -> bool {
    actor.id == answer.user_id
}

/// Only supervisors may approve. Authorship is irrelevant: a
/// supervisor may approve any answer, including their own.
pub fn can_approve(actor: &User, _answer: &Answer) -> bool {
    actor.role.can_approve()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::user::Role;

    fn member_answer() -> Answer {
        Answer::new("QST_001", "USR_001", "Try rebasing first.")
    }

    #[test]
    fn test_author_can_update_and_delete() {
        let author = User::member("USR_001");
        let answer = member_answer();

        assert!(AnswerPolicy::can_update(&author, &answer));
        assert!(can_delete(&author, &answer));
    }

    #[test]
    fn test_non_author_cannot_update_or_delete() {
        let other = User::member("USR_002");
        let answer = member_answer();

        assert!(!AnswerPolicy::can_update(&other, &answer));
        assert!(!can_delete(&other, &answer));
    }

    #[test]
    fn test_supervisor_cannot_update_or_delete_others_answers() {
        // Approval rights do not extend to editing
        let supervisor = User::supervisor("USR_003");
        let answer = member_answer();

        assert!(!AnswerPolicy::can_update(&supervisor, &answer));
        assert!(!can_delete(&supervisor, &answer));
    }

    #[test]
    fn test_only_supervisors_approve() {
        let answer = member_answer();

        assert!(can_approve(&User::supervisor("USR_003"), &answer));
        assert!(!can_approve(&User::member("USR_002"), &answer));
        // The author's own role decides, not authorship
        assert!(!can_approve(&User::member("USR_001"), &answer));
    }

    #[test]
    fn test_supervisor_may_approve_own_answer() {
        let supervisor = User::supervisor("USR_003");
        let own_answer = Answer::new("QST_001", "USR_003", "Self-answered.");

        assert!(can_approve(&supervisor, &own_answer));
    }

    #[test]
    fn test_policies_do_not_depend_on_role_for_ownership() {
        let author_supervisor = User::new("USR_004".to_string(), Role::Supervisor);
        let answer = Answer::new("QST_002", "USR_004", "From a supervisor.");

        assert!(AnswerPolicy::can_update(&author_supervisor, &answer));
        assert!(can_delete(&author_supervisor, &answer));
    }
}
