//! # Quanda Moderation
//!
//! The moderation engine for the Quanda Q&A platform: executes the
//! approval transition and the supervisor-promotion rule it triggers.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use quanda_moderation::ModerationService;
//! use quanda_persistence::Database;
//!
//! let db = Database::new("sqlite:quanda.db?mode=rwc").await?;
//! let moderation = ModerationService::new(&db);
//!
//! let outcome = moderation.approve(&supervisor, &answer).await?;
//! if outcome.promoted {
//!     // the author just became a supervisor
//! }
//! ```

pub mod approval;
pub mod error;

pub use approval::{ApprovalOutcome, ModerationService};
pub use error::{ApproveStage, ModerationError, ModerationResult};
