//! Status changes on records.
//!
//! Each function checks its input, swaps the changed record into its source and returns
//! the audit entry. On error nothing is changed.

use chrono::{DateTime, Utc};

use super::audit::{AuditAction, AuditEntry};
use crate::{
    error::{ModerationError, ValidationError},
    query::RecordSource,
    records::{
        Deletion, Feedback, ReadState, Report, Suspension, User, UserStatus, Verification,
        VerificationStatus,
    },
};

/// Who acts and when.
#[derive(Debug, Clone, Copy)]
pub struct Actor<'a> {
    pub name: &'a str,
    pub at: DateTime<Utc>,
}

fn required_reason(reason: &str) -> Result<String, ValidationError> {
    let reason = reason.trim();
    if reason.is_empty() {
        return Err(ValidationError::required("reason"));
    }
    Ok(reason.to_owned())
}

fn user<'s>(users: &'s RecordSource<User>, id: &str) -> Result<&'s User, ModerationError> {
    users
        .get(id)
        .ok_or_else(|| ModerationError::not_found("user", id))
}

/// Any status may be set from any other. Approving marks the user verified; moving away
/// from approved clears it.
pub fn set_verification_status(
    verifications: &mut RecordSource<Verification>,
    users: &mut RecordSource<User>,
    id: &str,
    status: VerificationStatus,
    note: Option<String>,
    actor: Actor<'_>,
) -> Result<AuditEntry, ModerationError> {
    let current = verifications
        .get(id)
        .ok_or_else(|| ModerationError::not_found("verification", id))?;
    let owner = user(users, &current.user_id)?;

    let from = current.status;
    let verified = match (from, status) {
        (_, VerificationStatus::Approved) => Some(true),
        (VerificationStatus::Approved, _) => Some(false),
        _ => None,
    };

    let updated_owner = verified.map(|verified| User {
        verified,
        ..owner.clone()
    });
    let updated = Verification {
        status,
        reviewed_at: Some(actor.at),
        reviewer: Some(actor.name.to_owned()),
        note: note.clone().or_else(|| current.note.clone()),
        ..current.clone()
    };

    verifications.replace(updated);
    if let Some(owner) = updated_owner {
        users.replace(owner);
    }

    Ok(AuditEntry::builder()
        .at(actor.at)
        .actor(actor.name)
        .action(AuditAction::SetVerificationStatus)
        .record_id(id)
        .from(from.as_str())
        .to(status.as_str())
        .maybe_reason(note)
        .build())
}

/// Active users only. A reason is required.
pub fn suspend_user(
    users: &mut RecordSource<User>,
    id: &str,
    reason: &str,
    actor: Actor<'_>,
) -> Result<AuditEntry, ModerationError> {
    let reason = required_reason(reason)?;
    let current = user(users, id)?;
    if !current.status.is_active() {
        return Err(ModerationError::NotAllowed {
            kind: "user",
            id: id.to_owned(),
            action: "suspend",
            status: current.status.as_str(),
        });
    }

    let updated = User {
        status: UserStatus::Suspended(Suspension {
            reason: reason.clone(),
            by: actor.name.to_owned(),
            at: actor.at,
        }),
        ..current.clone()
    };
    users.replace(updated);

    Ok(AuditEntry::builder()
        .at(actor.at)
        .actor(actor.name)
        .action(AuditAction::SuspendUser)
        .record_id(id)
        .from("active")
        .to("suspended")
        .reason(reason)
        .build())
}

/// Suspended or deleted back to active.
pub fn reactivate_user(
    users: &mut RecordSource<User>,
    id: &str,
    actor: Actor<'_>,
) -> Result<AuditEntry, ModerationError> {
    let current = user(users, id)?;
    let from = current.status.as_str();
    if current.status.is_active() {
        return Err(ModerationError::NotAllowed {
            kind: "user",
            id: id.to_owned(),
            action: "reactivate",
            status: from,
        });
    }

    let updated = User {
        status: UserStatus::Active,
        ..current.clone()
    };
    users.replace(updated);

    Ok(AuditEntry::builder()
        .at(actor.at)
        .actor(actor.name)
        .action(AuditAction::ReactivateUser)
        .record_id(id)
        .from(from)
        .to("active")
        .build())
}

/// Active or suspended users. A reason is required.
pub fn delete_user(
    users: &mut RecordSource<User>,
    id: &str,
    reason: &str,
    actor: Actor<'_>,
) -> Result<AuditEntry, ModerationError> {
    let reason = required_reason(reason)?;
    let current = user(users, id)?;
    let from = current.status.as_str();
    if current.status.deletion().is_some() {
        return Err(ModerationError::NotAllowed {
            kind: "user",
            id: id.to_owned(),
            action: "delete",
            status: from,
        });
    }

    let updated = User {
        status: UserStatus::Deleted(Deletion {
            reason: reason.clone(),
            by: actor.name.to_owned(),
            at: actor.at,
        }),
        ..current.clone()
    };
    users.replace(updated);

    Ok(AuditEntry::builder()
        .at(actor.at)
        .actor(actor.name)
        .action(AuditAction::DeleteUser)
        .record_id(id)
        .from(from)
        .to("deleted")
        .reason(reason)
        .build())
}

/// `Ok(None)` when the report was already read.
pub fn mark_report_read(
    reports: &mut RecordSource<Report>,
    id: &str,
    actor: Actor<'_>,
) -> Result<Option<AuditEntry>, ModerationError> {
    let current = reports
        .get(id)
        .ok_or_else(|| ModerationError::not_found("report", id))?;
    if current.read.is_read() {
        return Ok(None);
    }

    let updated = Report {
        read: ReadState::Read,
        ..current.clone()
    };
    reports.replace(updated);

    Ok(Some(read_entry(AuditAction::MarkReportRead, id, actor)))
}

/// `Ok(None)` when the feedback was already read.
pub fn mark_feedback_read(
    feedback: &mut RecordSource<Feedback>,
    id: &str,
    actor: Actor<'_>,
) -> Result<Option<AuditEntry>, ModerationError> {
    let current = feedback
        .get(id)
        .ok_or_else(|| ModerationError::not_found("feedback", id))?;
    if current.read.is_read() {
        return Ok(None);
    }

    let updated = Feedback {
        read: ReadState::Read,
        ..current.clone()
    };
    feedback.replace(updated);

    Ok(Some(read_entry(AuditAction::MarkFeedbackRead, id, actor)))
}

fn read_entry(action: AuditAction, id: &str, actor: Actor<'_>) -> AuditEntry {
    AuditEntry::builder()
        .at(actor.at)
        .actor(actor.name)
        .action(action)
        .record_id(id)
        .from(ReadState::Unread.as_str())
        .to(ReadState::Read.as_str())
        .build()
}
