//! Sort selection, locale-aware collation and the comparator registry.

use std::{cmp::Ordering, collections::BTreeMap, fmt};

use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

use super::record::{FieldKind, FieldValue, Record};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// Dates start newest first, everything else starts ascending.
    pub fn default_for(kind: FieldKind) -> Self {
        match kind {
            FieldKind::Date => Self::Desc,
            FieldKind::Text | FieldKind::Number | FieldKind::Flag => Self::Asc,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// The single active sort field and its direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState<F> {
    field: F,
    direction: SortDirection,
}

impl<F: Copy + PartialEq> SortState<F> {
    pub fn new(field: F, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Sort by `field` in the default direction for its kind.
    pub fn by(field: F, kind: FieldKind) -> Self {
        Self::new(field, SortDirection::default_for(kind))
    }

    pub fn field(&self) -> F {
        self.field
    }

    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    /// Header click: the active field flips direction, a new field starts at its default.
    pub fn select(&mut self, field: F, kind: FieldKind) {
        if self.field == field {
            self.direction = self.direction.toggled();
        } else {
            *self = Self::by(field, kind);
        }
    }

    pub fn set_direction(&mut self, direction: SortDirection) {
        self.direction = direction;
    }
}

struct CollationKey {
    base: Vec<char>,
    accents: Vec<char>,
    case: Vec<u8>,
}

impl CollationKey {
    fn new(text: &str) -> Self {
        let mut base = Vec::with_capacity(text.len());
        let mut accents = Vec::with_capacity(text.len());
        let mut case = Vec::with_capacity(text.len());
        for c in text.nfd() {
            accents.extend(c.to_lowercase());
            if !is_combining_mark(c) {
                base.extend(c.to_lowercase());
                case.push(u8::from(c.is_uppercase()));
            }
        }
        Self {
            base,
            accents,
            case,
        }
    }
}

/// Locale-style string ordering: letters first, then accents, then lowercase before uppercase.
pub fn collate(a: &str, b: &str) -> Ordering {
    let (a, b) = (CollationKey::new(a), CollationKey::new(b));
    a.base
        .cmp(&b.base)
        .then_with(|| a.accents.cmp(&b.accents))
        .then_with(|| a.case.cmp(&b.case))
}

fn kind_rank(value: &FieldValue<'_>) -> u8 {
    match value {
        FieldValue::Missing => 0,
        FieldValue::Flag(_) => 1,
        FieldValue::Number(_) => 2,
        FieldValue::Date(_) => 3,
        FieldValue::Text(_) => 4,
    }
}

/// Default ordering for two field values.
///
/// A missing date counts as the epoch. A missing value of any other kind sorts first.
pub fn compare_values(a: FieldValue<'_>, b: FieldValue<'_>) -> Ordering {
    match (a, b) {
        (FieldValue::Text(a), FieldValue::Text(b)) => collate(a, b),
        (FieldValue::Number(a), FieldValue::Number(b)) => a.total_cmp(&b),
        (FieldValue::Date(a), FieldValue::Date(b)) => {
            let millis = |date: Option<chrono::DateTime<chrono::Utc>>| {
                date.map_or(0, |date| date.timestamp_millis())
            };
            millis(a).cmp(&millis(b))
        }
        (FieldValue::Flag(a), FieldValue::Flag(b)) => a.cmp(&b),
        (a, b) => kind_rank(&a).cmp(&kind_rank(&b)),
    }
}

pub type Comparator<R> = Box<dyn Fn(&R, &R) -> Ordering + Send + Sync>;

/// Per-field comparators. Fields without an override use [`compare_values`].
pub struct ComparatorSet<R: Record> {
    overrides: BTreeMap<R::Field, Comparator<R>>,
}

impl<R: Record> Default for ComparatorSet<R> {
    fn default() -> Self {
        Self {
            overrides: BTreeMap::new(),
        }
    }
}

impl<R: Record> fmt::Debug for ComparatorSet<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComparatorSet")
            .field("overrides", &self.overrides.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl<R: Record> ComparatorSet<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(
        mut self,
        field: R::Field,
        comparator: impl Fn(&R, &R) -> Ordering + Send + Sync + 'static,
    ) -> Self {
        self.overrides.insert(field, Box::new(comparator));
        self
    }

    /// Order `field` by a derived key, e.g. a lifecycle rank.
    pub fn with_key<K: Ord>(
        self,
        field: R::Field,
        key: impl Fn(&R) -> K + Send + Sync + 'static,
    ) -> Self {
        self.with(field, move |a, b| key(a).cmp(&key(b)))
    }

    pub fn has_override(&self, field: R::Field) -> bool {
        self.overrides.contains_key(&field)
    }

    /// Ascending comparison of `a` and `b` on `field`.
    pub fn compare(&self, field: R::Field, a: &R, b: &R) -> Ordering {
        match self.overrides.get(&field) {
            Some(comparator) => comparator(a, b),
            None => compare_values(a.field(field), b.field(field)),
        }
    }

    /// Stable sort: ties keep their input order in both directions.
    pub fn sort(&self, rows: &mut [&R], sort: &SortState<R::Field>) {
        let (field, direction) = (sort.field(), sort.direction());
        rows.sort_by(|a, b| direction.apply(self.compare(field, a, b)));
    }
}
