use bon::Builder;
use chrono::{DateTime, Utc};
use ustr::Ustr;

use crate::query::{FieldKind, FieldValue, Record};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum LinkupStatus {
    #[default]
    Upcoming,
    Happening,
    Happened,
    Cancelled,
}

impl LinkupStatus {
    pub const ALL: [Self; 4] = [
        Self::Upcoming,
        Self::Happening,
        Self::Happened,
        Self::Cancelled,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Upcoming => "upcoming",
            Self::Happening => "happening",
            Self::Happened => "happened",
            Self::Cancelled => "cancelled",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Upcoming => "Upcoming",
            Self::Happening => "Happening",
            Self::Happened => "Happened",
            Self::Cancelled => "Cancelled",
        }
    }

    /// Lifecycle position, used to sort the status column.
    pub fn rank(self) -> u8 {
        match self {
            Self::Upcoming => 0,
            Self::Happening => 1,
            Self::Happened => 2,
            Self::Cancelled => 3,
        }
    }
}

/// An event created by a user.
#[derive(Debug, Clone, PartialEq, Builder)]
pub struct Linkup {
    #[builder(into)]
    pub id: Ustr,
    #[builder(into)]
    pub title: String,
    #[builder(into)]
    pub creator_id: Ustr,
    #[builder(into)]
    pub creator_name: String,
    #[builder(into)]
    pub category: String,
    #[builder(into)]
    pub location: String,
    pub starts_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    #[builder(default)]
    pub attendees: u32,
    pub capacity: u32,
    /// Ticket price in dollars, `0.0` for free events.
    #[builder(default)]
    pub price: f64,
    #[builder(default)]
    pub status: LinkupStatus,
}

impl Linkup {
    pub fn is_free(&self) -> bool {
        self.price <= 0.0
    }

    pub fn fill_ratio(&self) -> f32 {
        if self.capacity == 0 {
            return 0.0;
        }
        self.attendees as f32 / self.capacity as f32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LinkupField {
    Title,
    Creator,
    Category,
    Location,
    StartsAt,
    CreatedAt,
    Attendees,
    Capacity,
    Price,
    Free,
    Status,
}

impl Record for Linkup {
    type Field = LinkupField;

    const SEARCHABLE: &'static [LinkupField] = &[
        LinkupField::Title,
        LinkupField::Creator,
        LinkupField::Category,
        LinkupField::Location,
    ];

    fn id(&self) -> Ustr {
        self.id
    }

    fn field(&self, field: LinkupField) -> FieldValue<'_> {
        match field {
            LinkupField::Title => FieldValue::Text(&self.title),
            LinkupField::Creator => FieldValue::Text(&self.creator_name),
            LinkupField::Category => FieldValue::Text(&self.category),
            LinkupField::Location => FieldValue::Text(&self.location),
            LinkupField::StartsAt => FieldValue::Date(Some(self.starts_at)),
            LinkupField::CreatedAt => FieldValue::Date(Some(self.created_at)),
            LinkupField::Attendees => FieldValue::Number(f64::from(self.attendees)),
            LinkupField::Capacity => FieldValue::Number(f64::from(self.capacity)),
            LinkupField::Price => FieldValue::Number(self.price),
            LinkupField::Free => FieldValue::Flag(self.is_free()),
            LinkupField::Status => FieldValue::Text(self.status.as_str()),
        }
    }

    fn field_kind(field: LinkupField) -> FieldKind {
        match field {
            LinkupField::Title
            | LinkupField::Creator
            | LinkupField::Category
            | LinkupField::Location
            | LinkupField::Status => FieldKind::Text,
            LinkupField::StartsAt | LinkupField::CreatedAt => FieldKind::Date,
            LinkupField::Attendees | LinkupField::Capacity | LinkupField::Price => {
                FieldKind::Number
            }
            LinkupField::Free => FieldKind::Flag,
        }
    }
}
