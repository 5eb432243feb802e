use bon::Builder;
use chrono::{DateTime, Utc};
use ustr::Ustr;

use super::ReadState;
use crate::query::{FieldKind, FieldValue, Record};

#[derive(Debug, Clone, PartialEq, Eq, Builder)]
pub struct Feedback {
    #[builder(into)]
    pub id: Ustr,
    #[builder(into)]
    pub user_name: String,
    /// "bug", "feature", "general", ...
    #[builder(into)]
    pub category: String,
    /// "ios", "android" or "web".
    #[builder(into)]
    pub platform: String,
    #[builder(into)]
    pub message: String,
    /// 1 to 5 stars.
    pub rating: u8,
    pub submitted_at: DateTime<Utc>,
    #[builder(default)]
    pub read: ReadState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FeedbackField {
    UserName,
    Category,
    Platform,
    Message,
    Rating,
    SubmittedAt,
    Read,
}

impl Record for Feedback {
    type Field = FeedbackField;

    const SEARCHABLE: &'static [FeedbackField] = &[
        FeedbackField::UserName,
        FeedbackField::Category,
        FeedbackField::Message,
    ];

    fn id(&self) -> Ustr {
        self.id
    }

    fn field(&self, field: FeedbackField) -> FieldValue<'_> {
        match field {
            FeedbackField::UserName => FieldValue::Text(&self.user_name),
            FeedbackField::Category => FieldValue::Text(&self.category),
            FeedbackField::Platform => FieldValue::Text(&self.platform),
            FeedbackField::Message => FieldValue::Text(&self.message),
            FeedbackField::Rating => FieldValue::Number(f64::from(self.rating)),
            FeedbackField::SubmittedAt => FieldValue::Date(Some(self.submitted_at)),
            FeedbackField::Read => FieldValue::Text(self.read.as_str()),
        }
    }

    fn field_kind(field: FeedbackField) -> FieldKind {
        match field {
            FeedbackField::Rating => FieldKind::Number,
            FeedbackField::SubmittedAt => FieldKind::Date,
            _ => FieldKind::Text,
        }
    }
}
