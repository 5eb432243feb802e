use chrono::{DateTime, TimeZone, Utc};
use ustr::Ustr;

use super::record::{FieldKind, FieldValue, Record};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub id: Ustr,
    pub name: String,
    pub status: &'static str,
    pub score: i64,
    pub created_at: Option<DateTime<Utc>>,
    pub pinned: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ItemField {
    Name,
    Status,
    Score,
    CreatedAt,
    Pinned,
}

impl Record for Item {
    type Field = ItemField;

    const SEARCHABLE: &'static [ItemField] = &[ItemField::Name];

    fn id(&self) -> Ustr {
        self.id
    }

    fn field(&self, field: ItemField) -> FieldValue<'_> {
        match field {
            ItemField::Name => FieldValue::Text(&self.name),
            ItemField::Status => FieldValue::Text(self.status),
            ItemField::Score => FieldValue::Number(self.score as f64),
            ItemField::CreatedAt => FieldValue::Date(self.created_at),
            ItemField::Pinned => FieldValue::Flag(self.pinned),
        }
    }

    fn field_kind(field: ItemField) -> FieldKind {
        match field {
            ItemField::Name | ItemField::Status => FieldKind::Text,
            ItemField::Score => FieldKind::Number,
            ItemField::CreatedAt => FieldKind::Date,
            ItemField::Pinned => FieldKind::Flag,
        }
    }
}

pub fn item(
    id: &str,
    name: &str,
    status: &'static str,
    score: i64,
    day: Option<u32>,
    pinned: bool,
) -> Item {
    Item {
        id: Ustr::from(id),
        name: name.to_owned(),
        status,
        score,
        created_at: day.map(|day| Utc.with_ymd_and_hms(2024, 3, day, 12, 0, 0).unwrap()),
        pinned,
    }
}

pub fn items() -> Vec<Item> {
    vec![
        item("1", "Alice", "open", 3, Some(1), true),
        item("2", "Bob", "open", 4, Some(2), false),
        item("3", "Berta", "closed", 8, None, true),
        item("4", "alicia", "closed", 5, Some(3), false),
        item("5", "Émile", "open", 4, Some(4), true),
    ]
}
