use bon::Builder;
use chrono::{DateTime, Utc};
use ustr::Ustr;

use super::ReadState;
use crate::query::{FieldKind, FieldValue, Record};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportTarget {
    User,
    Linkup,
}

impl ReportTarget {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Linkup => "linkup",
        }
    }
}

/// A member's complaint about a user or a linkup.
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
pub struct Report {
    #[builder(into)]
    pub id: Ustr,
    pub target: ReportTarget,
    #[builder(into)]
    pub target_id: Ustr,
    #[builder(into)]
    pub target_name: String,
    #[builder(into)]
    pub reporter_name: String,
    #[builder(into)]
    pub reason: String,
    #[builder(into, default)]
    pub details: String,
    pub created_at: DateTime<Utc>,
    #[builder(default)]
    pub read: ReadState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ReportField {
    Target,
    TargetName,
    Reporter,
    Reason,
    Details,
    CreatedAt,
    Read,
}

impl Record for Report {
    type Field = ReportField;

    const SEARCHABLE: &'static [ReportField] = &[
        ReportField::TargetName,
        ReportField::Reporter,
        ReportField::Reason,
        ReportField::Details,
    ];

    fn id(&self) -> Ustr {
        self.id
    }

    fn field(&self, field: ReportField) -> FieldValue<'_> {
        match field {
            ReportField::Target => FieldValue::Text(self.target.as_str()),
            ReportField::TargetName => FieldValue::Text(&self.target_name),
            ReportField::Reporter => FieldValue::Text(&self.reporter_name),
            ReportField::Reason => FieldValue::Text(&self.reason),
            ReportField::Details => FieldValue::Text(&self.details),
            ReportField::CreatedAt => FieldValue::Date(Some(self.created_at)),
            ReportField::Read => FieldValue::Text(self.read.as_str()),
        }
    }

    fn field_kind(field: ReportField) -> FieldKind {
        match field {
            ReportField::CreatedAt => FieldKind::Date,
            _ => FieldKind::Text,
        }
    }
}
