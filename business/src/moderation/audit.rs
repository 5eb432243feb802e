use std::any::Any;

use bon::Builder;
use chrono::{DateTime, Utc};
use linkup_states::{State, state_assign_impl};
use ustr::Ustr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuditAction {
    SetVerificationStatus,
    SuspendUser,
    ReactivateUser,
    DeleteUser,
    MarkReportRead,
    MarkFeedbackRead,
    AddStaff,
}

impl AuditAction {
    pub fn label(self) -> &'static str {
        match self {
            Self::SetVerificationStatus => "Set verification status",
            Self::SuspendUser => "Suspend user",
            Self::ReactivateUser => "Reactivate user",
            Self::DeleteUser => "Delete user",
            Self::MarkReportRead => "Mark report read",
            Self::MarkFeedbackRead => "Mark feedback read",
            Self::AddStaff => "Add staff member",
        }
    }
}

/// Who changed what, when, and why.
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
pub struct AuditEntry {
    pub at: DateTime<Utc>,
    #[builder(into)]
    pub actor: String,
    pub action: AuditAction,
    #[builder(into)]
    pub record_id: Ustr,
    pub from: &'static str,
    pub to: &'static str,
    #[builder(into)]
    pub reason: Option<String>,
}

/// Append-only history of record changes made in this session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditLog {
    entries: Vec<AuditEntry>,
}

impl AuditLog {
    pub fn push(&mut self, entry: AuditEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[AuditEntry] {
        &self.entries
    }

    pub fn for_record(&self, id: &str) -> impl Iterator<Item = &AuditEntry> {
        self.entries
            .iter()
            .filter(move |entry| entry.record_id.as_str() == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl State for AuditLog {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
        state_assign_impl(self, new_self);
    }
}
