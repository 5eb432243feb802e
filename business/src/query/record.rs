//! The shape every listable record exposes to the query pipeline.

use std::fmt::Debug;

use chrono::{DateTime, Utc};
use ustr::Ustr;

/// How a field compares and which sort direction it starts in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Number,
    Date,
    Flag,
}

/// A single field value as seen by filters and comparators.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Number(f64),
    /// `None` when the record has no value for this date (never set, not applicable).
    Date(Option<DateTime<Utc>>),
    Flag(bool),
    Missing,
}

impl<'a> FieldValue<'a> {
    pub fn as_text(&self) -> Option<&'a str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Date(date) => *date,
            _ => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            Self::Flag(flag) => Some(*flag),
            _ => None,
        }
    }
}

/// A record that can be listed, filtered and sorted.
///
/// Records are immutable from the pipeline's point of view: edits produce a new value that
/// replaces the old one in its [`RecordSource`](super::RecordSource).
pub trait Record: Clone + Send + Sync + 'static {
    /// Field selector, usually a fieldless enum.
    type Field: Copy + Ord + Debug + Send + Sync + 'static;

    /// Fields the free-text search box looks at.
    const SEARCHABLE: &'static [Self::Field];

    fn id(&self) -> Ustr;

    fn field(&self, field: Self::Field) -> FieldValue<'_>;

    fn field_kind(field: Self::Field) -> FieldKind;
}
