//! Filter selections and the predicate registry compiled from them.

use std::{
    collections::{BTreeMap, BTreeSet},
    fmt,
};

use chrono::{DateTime, Utc};

use super::record::{FieldValue, Record};

/// Inclusive date bounds. A missing bound leaves that side open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

impl DateRange {
    pub fn new(from: Option<DateTime<Utc>>, to: Option<DateTime<Utc>>) -> Self {
        Self { from, to }
    }

    pub fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    /// A record without a date never satisfies a set bound.
    pub fn contains(&self, date: Option<DateTime<Utc>>) -> bool {
        if self.is_unbounded() {
            return true;
        }
        let Some(date) = date else {
            return false;
        };
        self.from.is_none_or(|from| date >= from) && self.to.is_none_or(|to| date <= to)
    }
}

/// Inclusive `[min, max]`, either side optional.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NumericRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl NumericRange {
    pub fn new(min: Option<f64>, max: Option<f64>) -> Self {
        Self { min, max }
    }

    pub fn between(min: f64, max: f64) -> Self {
        Self::new(Some(min), Some(max))
    }

    pub fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    pub fn contains(&self, value: Option<f64>) -> bool {
        if self.is_unbounded() {
            return true;
        }
        let Some(value) = value else {
            return false;
        };
        self.min.is_none_or(|min| value >= min) && self.max.is_none_or(|max| value <= max)
    }
}

/// Current filter selections for one table.
///
/// The default value selects everything. Inactive criteria are never stored, so
/// [`FilterState::is_default`] is a plain emptiness check.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterState<F: Ord> {
    search: String,
    sets: BTreeMap<F, BTreeSet<String>>,
    dates: BTreeMap<F, DateRange>,
    ranges: BTreeMap<F, NumericRange>,
    flags: BTreeMap<F, bool>,
}

impl<F: Ord> Default for FilterState<F> {
    fn default() -> Self {
        Self {
            search: String::new(),
            sets: BTreeMap::new(),
            dates: BTreeMap::new(),
            ranges: BTreeMap::new(),
            flags: BTreeMap::new(),
        }
    }
}

impl<F: Ord + Copy> FilterState<F> {
    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    pub fn selection(&self, field: F) -> Option<&BTreeSet<String>> {
        self.sets.get(&field)
    }

    pub fn is_selected(&self, field: F, value: &str) -> bool {
        self.sets.get(&field).is_some_and(|set| set.contains(value))
    }

    pub fn set_selection<I, S>(&mut self, field: F, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let set: BTreeSet<String> = values.into_iter().map(Into::into).collect();
        if set.is_empty() {
            self.sets.remove(&field);
        } else {
            self.sets.insert(field, set);
        }
    }

    /// Add `value` to the selection if absent, remove it otherwise.
    pub fn toggle_selection(&mut self, field: F, value: &str) {
        let set = self.sets.entry(field).or_default();
        if !set.remove(value) {
            set.insert(value.to_owned());
        }
        if set.is_empty() {
            self.sets.remove(&field);
        }
    }

    pub fn clear_selection(&mut self, field: F) {
        self.sets.remove(&field);
    }

    pub fn date_range(&self, field: F) -> DateRange {
        self.dates.get(&field).copied().unwrap_or_default()
    }

    pub fn set_date_range(&mut self, field: F, range: DateRange) {
        if range.is_unbounded() {
            self.dates.remove(&field);
        } else {
            self.dates.insert(field, range);
        }
    }

    pub fn numeric_range(&self, field: F) -> NumericRange {
        self.ranges.get(&field).copied().unwrap_or_default()
    }

    pub fn set_numeric_range(&mut self, field: F, range: NumericRange) {
        if range.is_unbounded() {
            self.ranges.remove(&field);
        } else {
            self.ranges.insert(field, range);
        }
    }

    pub fn flag(&self, field: F) -> Option<bool> {
        self.flags.get(&field).copied()
    }

    /// `None` clears the flag filter.
    pub fn set_flag(&mut self, field: F, value: Option<bool>) {
        match value {
            Some(value) => {
                self.flags.insert(field, value);
            }
            None => {
                self.flags.remove(&field);
            }
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_default(&self) -> bool {
        self.search.trim().is_empty()
            && self.sets.is_empty()
            && self.dates.is_empty()
            && self.ranges.is_empty()
            && self.flags.is_empty()
    }

    /// Number of criteria that currently restrict the result.
    pub fn active_count(&self) -> usize {
        usize::from(!self.search.trim().is_empty())
            + self.sets.len()
            + self.dates.len()
            + self.ranges.len()
            + self.flags.len()
    }
}

/// Key of one entry in a [`PredicateSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FilterKey<F> {
    Search,
    Set(F),
    Date(F),
    Range(F),
    Flag(F),
    Custom(&'static str),
}

pub type Predicate<R> = Box<dyn Fn(&R) -> bool + Send + Sync>;

/// Keyed registry of active predicates. A record passes when every entry accepts it.
pub struct PredicateSet<R: Record> {
    entries: BTreeMap<FilterKey<R::Field>, Predicate<R>>,
}

impl<R: Record> Default for PredicateSet<R> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

impl<R: Record> fmt::Debug for PredicateSet<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.entries.keys()).finish()
    }
}

impl<R: Record> PredicateSet<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// One entry per active criterion in `filter`.
    pub fn compile(filter: &FilterState<R::Field>) -> Self {
        let mut set = Self::new();

        let needle = filter.search().trim().to_lowercase();
        if !needle.is_empty() {
            set.insert(
                FilterKey::Search,
                Box::new(move |record: &R| matches_search(record, &needle)),
            );
        }
        for (field, values) in &filter.sets {
            let (field, values) = (*field, values.clone());
            set.insert(
                FilterKey::Set(field),
                Box::new(move |record: &R| matches_selection(record.field(field), &values)),
            );
        }
        for (field, range) in &filter.dates {
            let (field, range) = (*field, *range);
            set.insert(
                FilterKey::Date(field),
                Box::new(move |record: &R| range.contains(record.field(field).as_date())),
            );
        }
        for (field, range) in &filter.ranges {
            let (field, range) = (*field, *range);
            set.insert(
                FilterKey::Range(field),
                Box::new(move |record: &R| range.contains(record.field(field).as_number())),
            );
        }
        for (field, expected) in &filter.flags {
            let (field, expected) = (*field, *expected);
            set.insert(
                FilterKey::Flag(field),
                Box::new(move |record: &R| record.field(field).as_flag() == Some(expected)),
            );
        }
        set
    }

    /// Replaces any predicate already registered under `key`.
    pub fn insert(&mut self, key: FilterKey<R::Field>, predicate: Predicate<R>) {
        self.entries.insert(key, predicate);
    }

    pub fn remove(&mut self, key: &FilterKey<R::Field>) -> bool {
        self.entries.remove(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &FilterKey<R::Field>> {
        self.entries.keys()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn matches(&self, record: &R) -> bool {
        self.entries.values().all(|predicate| predicate(record))
    }
}

/// Case-insensitive substring match over the record's searchable fields.
/// `needle` must already be lowercased.
pub fn matches_search<R: Record>(record: &R, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    R::SEARCHABLE.iter().any(|field| {
        record
            .field(*field)
            .as_text()
            .is_some_and(|text| text.to_lowercase().contains(needle))
    })
}

/// An empty selection matches everything.
pub fn matches_selection(value: FieldValue<'_>, selection: &BTreeSet<String>) -> bool {
    if selection.is_empty() {
        return true;
    }
    match value {
        FieldValue::Text(text) => selection.contains(text),
        FieldValue::Flag(flag) => selection.contains(if flag { "true" } else { "false" }),
        FieldValue::Number(n) => selection.contains(&n.to_string()),
        FieldValue::Date(_) | FieldValue::Missing => false,
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::query::test_record::{Item, ItemField, items};

    fn utc(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, day, 12, 0, 0).unwrap()
    }

    #[test]
    fn default_filter_compiles_to_nothing() {
        let filter = FilterState::<ItemField>::default();
        assert!(filter.is_default());
        assert!(PredicateSet::<Item>::compile(&filter).is_empty());
    }

    #[test]
    fn whitespace_search_is_inactive() {
        let mut filter = FilterState::<ItemField>::default();
        filter.set_search("   ");
        assert!(filter.is_default());
        assert!(PredicateSet::<Item>::compile(&filter).is_empty());
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let mut filter = FilterState::default();
        filter.set_search("ALIC");
        let predicates = PredicateSet::<Item>::compile(&filter);

        let names: Vec<_> = items()
            .into_iter()
            .filter(|item| predicates.matches(item))
            .map(|item| item.name)
            .collect();
        assert_eq!(names, vec!["Alice", "alicia"]);
    }

    #[test]
    fn toggling_the_last_value_clears_the_selection() {
        let mut filter = FilterState::default();
        filter.toggle_selection(ItemField::Status, "open");
        assert!(filter.is_selected(ItemField::Status, "open"));
        filter.toggle_selection(ItemField::Status, "open");
        assert!(filter.selection(ItemField::Status).is_none());
        assert!(filter.is_default());
    }

    #[test]
    fn criteria_are_combined_with_and() {
        let mut filter = FilterState::default();
        filter.set_selection(ItemField::Status, ["open"]);
        filter.set_search("b");
        let predicates = PredicateSet::<Item>::compile(&filter);
        assert_eq!(predicates.len(), 2);

        let ids: Vec<_> = items()
            .into_iter()
            .filter(|item| predicates.matches(item))
            .map(|item| item.id.as_str().to_owned())
            .collect();
        // "Bob" is open, "Berta" is closed
        assert_eq!(ids, vec!["2"]);
    }

    #[test]
    fn missing_date_never_matches_a_bound() {
        let range = DateRange::new(Some(utc(1)), None);
        assert!(!range.contains(None));
        assert!(range.contains(Some(utc(1))));
        assert!(DateRange::default().contains(None));
    }

    #[test]
    fn date_bounds_are_inclusive() {
        let range = DateRange::new(Some(utc(2)), Some(utc(4)));
        assert!(range.contains(Some(utc(2))));
        assert!(range.contains(Some(utc(4))));
        assert!(!range.contains(Some(utc(5))));
    }

    #[test]
    fn numeric_range_is_inclusive_and_half_open_when_unset() {
        let range = NumericRange::between(20.0, 50.0);
        assert!(range.contains(Some(20.0)));
        assert!(range.contains(Some(50.0)));
        assert!(!range.contains(Some(19.0)));
        assert!(!range.contains(None));

        let at_least = NumericRange::new(Some(30.0), None);
        assert!(at_least.contains(Some(1_000.0)));
    }

    #[test]
    fn unbounded_ranges_are_not_stored() {
        let mut filter = FilterState::default();
        filter.set_numeric_range(ItemField::Score, NumericRange::between(1.0, 2.0));
        filter.set_numeric_range(ItemField::Score, NumericRange::default());
        filter.set_date_range(ItemField::CreatedAt, DateRange::default());
        assert!(filter.is_default());
    }

    #[test]
    fn flag_filter_matches_exact_value() {
        let mut filter = FilterState::default();
        filter.set_flag(ItemField::Pinned, Some(true));
        let predicates = PredicateSet::<Item>::compile(&filter);
        assert!(
            items()
                .iter()
                .filter(|item| predicates.matches(item))
                .all(|item| item.pinned)
        );
        assert_eq!(filter.active_count(), 1);
    }

    #[test]
    fn custom_predicates_join_the_conjunction() {
        let mut predicates = PredicateSet::<Item>::new();
        predicates.insert(FilterKey::Custom("even"), Box::new(|item: &Item| item.score % 2 == 0));
        assert!(predicates.keys().any(|key| *key == FilterKey::Custom("even")));

        let all = items();
        assert!(all.iter().filter(|item| predicates.matches(item)).all(|item| item.score % 2 == 0));
        assert!(predicates.remove(&FilterKey::Custom("even")));
        assert!(all.iter().all(|item| predicates.matches(item)));
    }
}
