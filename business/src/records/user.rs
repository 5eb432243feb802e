use bon::Builder;
use chrono::{DateTime, Utc};
use ustr::Ustr;

use crate::query::{FieldKind, FieldValue, Record};

/// Why and when a user was suspended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suspension {
    pub reason: String,
    pub by: String,
    pub at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deletion {
    pub reason: String,
    pub by: String,
    pub at: DateTime<Utc>,
}

/// Account status. Suspended and deleted users stay in the same source as active ones;
/// the suspended/deleted tables are filtered views over it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum UserStatus {
    #[default]
    Active,
    Suspended(Suspension),
    Deleted(Deletion),
}

impl UserStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Suspended(_) => "suspended",
            Self::Deleted(_) => "deleted",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Suspended(_) => "Suspended",
            Self::Deleted(_) => "Deleted",
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }

    pub fn suspension(&self) -> Option<&Suspension> {
        match self {
            Self::Suspended(suspension) => Some(suspension),
            _ => None,
        }
    }

    pub fn deletion(&self) -> Option<&Deletion> {
        match self {
            Self::Deleted(deletion) => Some(deletion),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Builder)]
pub struct User {
    #[builder(into)]
    pub id: Ustr,
    #[builder(into)]
    pub name: String,
    #[builder(into)]
    pub username: String,
    #[builder(into)]
    pub email: String,
    pub age: u32,
    #[builder(into)]
    pub gender: String,
    #[builder(into)]
    pub city: String,
    pub joined_at: DateTime<Utc>,
    pub last_active: Option<DateTime<Utc>>,
    #[builder(default)]
    pub verified: bool,
    #[builder(default)]
    pub friend_ids: Vec<Ustr>,
    #[builder(default)]
    pub linkups_created: u32,
    #[builder(default)]
    pub status: UserStatus,
}

impl User {
    pub fn is_friend_of(&self, other: &str) -> bool {
        self.friend_ids.iter().any(|id| id.as_str() == other)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum UserField {
    Name,
    Username,
    Email,
    Age,
    Gender,
    City,
    JoinedAt,
    LastActive,
    Verified,
    LinkupsCreated,
    Status,
    StatusChangedAt,
    StatusReason,
}

impl Record for User {
    type Field = UserField;

    const SEARCHABLE: &'static [UserField] = &[
        UserField::Name,
        UserField::Username,
        UserField::Email,
        UserField::City,
        UserField::StatusReason,
    ];

    fn id(&self) -> Ustr {
        self.id
    }

    fn field(&self, field: UserField) -> FieldValue<'_> {
        match field {
            UserField::Name => FieldValue::Text(&self.name),
            UserField::Username => FieldValue::Text(&self.username),
            UserField::Email => FieldValue::Text(&self.email),
            UserField::Age => FieldValue::Number(f64::from(self.age)),
            UserField::Gender => FieldValue::Text(&self.gender),
            UserField::City => FieldValue::Text(&self.city),
            UserField::JoinedAt => FieldValue::Date(Some(self.joined_at)),
            UserField::LastActive => FieldValue::Date(self.last_active),
            UserField::Verified => FieldValue::Flag(self.verified),
            UserField::LinkupsCreated => FieldValue::Number(f64::from(self.linkups_created)),
            UserField::Status => FieldValue::Text(self.status.as_str()),
            UserField::StatusChangedAt => FieldValue::Date(match &self.status {
                UserStatus::Active => None,
                UserStatus::Suspended(suspension) => Some(suspension.at),
                UserStatus::Deleted(deletion) => Some(deletion.at),
            }),
            UserField::StatusReason => match &self.status {
                UserStatus::Active => FieldValue::Missing,
                UserStatus::Suspended(suspension) => FieldValue::Text(&suspension.reason),
                UserStatus::Deleted(deletion) => FieldValue::Text(&deletion.reason),
            },
        }
    }

    fn field_kind(field: UserField) -> FieldKind {
        match field {
            UserField::Age | UserField::LinkupsCreated => FieldKind::Number,
            UserField::JoinedAt | UserField::LastActive | UserField::StatusChangedAt => {
                FieldKind::Date
            }
            UserField::Verified => FieldKind::Flag,
            UserField::Name
            | UserField::Username
            | UserField::Email
            | UserField::Gender
            | UserField::City
            | UserField::Status
            | UserField::StatusReason => FieldKind::Text,
        }
    }
}
