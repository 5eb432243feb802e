use bon::Builder;
use chrono::{DateTime, Utc};
use ustr::Ustr;

use crate::query::{FieldKind, FieldValue, Record};

/// Any status may move to any other; see `moderation::set_verification_status`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum VerificationStatus {
    #[default]
    Pending,
    Approved,
    Denied,
}

impl VerificationStatus {
    pub const ALL: [Self; 3] = [Self::Pending, Self::Approved, Self::Denied];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Denied => "denied",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Denied => "Denied",
        }
    }

    pub fn rank(self) -> u8 {
        match self {
            Self::Pending => 0,
            Self::Approved => 1,
            Self::Denied => 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Builder)]
pub struct Verification {
    #[builder(into)]
    pub id: Ustr,
    #[builder(into)]
    pub user_id: Ustr,
    #[builder(into)]
    pub user_name: String,
    /// "Passport", "Driver's license", ...
    #[builder(into)]
    pub document: String,
    pub submitted_at: DateTime<Utc>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub reviewer: Option<String>,
    pub note: Option<String>,
    #[builder(default)]
    pub status: VerificationStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum VerificationField {
    UserName,
    Document,
    SubmittedAt,
    ReviewedAt,
    Status,
}

impl Record for Verification {
    type Field = VerificationField;

    const SEARCHABLE: &'static [VerificationField] =
        &[VerificationField::UserName, VerificationField::Document];

    fn id(&self) -> Ustr {
        self.id
    }

    fn field(&self, field: VerificationField) -> FieldValue<'_> {
        match field {
            VerificationField::UserName => FieldValue::Text(&self.user_name),
            VerificationField::Document => FieldValue::Text(&self.document),
            VerificationField::SubmittedAt => FieldValue::Date(Some(self.submitted_at)),
            VerificationField::ReviewedAt => FieldValue::Date(self.reviewed_at),
            VerificationField::Status => FieldValue::Text(self.status.as_str()),
        }
    }

    fn field_kind(field: VerificationField) -> FieldKind {
        match field {
            VerificationField::SubmittedAt | VerificationField::ReviewedAt => FieldKind::Date,
            VerificationField::UserName
            | VerificationField::Document
            | VerificationField::Status => FieldKind::Text,
        }
    }
}
