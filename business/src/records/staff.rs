use bon::Builder;
use chrono::{DateTime, Utc};
use ustr::Ustr;

use crate::query::{FieldKind, FieldValue, Record};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StaffRole {
    Admin,
    Moderator,
    Support,
}

impl StaffRole {
    pub const ALL: [Self; 3] = [Self::Admin, Self::Moderator, Self::Support];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Moderator => "moderator",
            Self::Support => "support",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::Moderator => "Moderator",
            Self::Support => "Support",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Builder)]
pub struct StaffMember {
    #[builder(into)]
    pub id: Ustr,
    #[builder(into)]
    pub name: String,
    #[builder(into)]
    pub email: String,
    pub role: StaffRole,
    pub added_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StaffField {
    Name,
    Email,
    Role,
    AddedAt,
}

impl Record for StaffMember {
    type Field = StaffField;

    const SEARCHABLE: &'static [StaffField] = &[StaffField::Name, StaffField::Email];

    fn id(&self) -> Ustr {
        self.id
    }

    fn field(&self, field: StaffField) -> FieldValue<'_> {
        match field {
            StaffField::Name => FieldValue::Text(&self.name),
            StaffField::Email => FieldValue::Text(&self.email),
            StaffField::Role => FieldValue::Text(self.role.as_str()),
            StaffField::AddedAt => FieldValue::Date(Some(self.added_at)),
        }
    }

    fn field_kind(field: StaffField) -> FieldKind {
        match field {
            StaffField::AddedAt => FieldKind::Date,
            _ => FieldKind::Text,
        }
    }
}
