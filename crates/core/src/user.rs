//! # User Module
//!
//! Defines Role and User for the two roles in the system.
//! - Member: posts answers, may edit/delete their own
//! - Supervisor: approves answers, regardless of authorship

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A member is promoted to supervisor once their validated-answer
/// count strictly exceeds this value (the 11th approval promotes).
pub const PROMOTION_THRESHOLD: u32 = 10;

/// Role of a user in the system.
///
/// A closed enumeration: there is no demotion path, a supervisor
/// stays a supervisor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Regular member - posts answers
    Member,
    /// Supervisor - approves answers
    Supervisor,
}

impl Role {
    /// Code string for DB storage
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Member => "member",
            Role::Supervisor => "supervisor",
        }
    }

    /// Parse from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "member" => Some(Role::Member),
            "supervisor" => Some(Role::Supervisor),
            _ => None,
        }
    }

    /// Whether this role may approve answers
    pub fn can_approve(&self) -> bool {
        matches!(self, Role::Supervisor)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A platform user.
///
/// Identity is owned by the platform's identity subsystem; this core
/// only reads it and mutates `role` and `valid_answers_count` through
/// the approval transition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Opaque user id (assigned by the identity subsystem)
    pub id: String,
    /// Current role
    pub role: Role,
    /// Number of this user's answers that have been approved
    pub valid_answers_count: u32,
    /// Creation time
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a user with the given role
    pub fn new(id: String, role: Role) -> Self {
        Self {
            id,
            role,
            valid_answers_count: 0,
            created_at: Utc::now(),
        }
    }

    /// Create a member
    pub fn member(id: &str) -> Self {
        Self::new(id.to_string(), Role::Member)
    }

    /// Create a supervisor
    pub fn supervisor(id: &str) -> Self {
        Self::new(id.to_string(), Role::Supervisor)
    }

    /// Set the validated-answer counter (seeding helper)
    pub fn with_valid_answers(mut self, count: u32) -> Self {
        self.valid_answers_count = count;
        self
    }

    /// Whether the promotion rule applies to this user: strictly more
    /// than [`PROMOTION_THRESHOLD`] validated answers and not already
    /// a supervisor.
    pub fn qualifies_for_promotion(&self) -> bool {
        self.valid_answers_count > PROMOTION_THRESHOLD && self.role != Role::Supervisor
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.id, self.role)
    }
}
