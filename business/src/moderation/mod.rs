//! Record status changes made by admins, with an audit trail.

mod audit;
mod commands;
mod transitions;

pub use audit::{AuditAction, AuditEntry, AuditLog};
pub use commands::{
    DeleteUserCommand, MarkFeedbackReadCommand, MarkReportReadCommand, ModerationInput,
    ReactivateUserCommand, SetVerificationStatusCommand, SuspendUserCommand,
};
pub use transitions::{
    Actor, delete_user, mark_feedback_read, mark_report_read, reactivate_user,
    set_verification_status, suspend_user,
};
