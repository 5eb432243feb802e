use std::any::Any;

use linkup_states::{State, state_assign_impl};

use super::record::Record;

/// The ordered in-memory collection a table reads from.
///
/// Records are never edited in place: a change builds a new record and swaps it in
/// with [`RecordSource::replace`], keeping its position.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordSource<R> {
    records: Vec<R>,
}

impl<R> Default for RecordSource<R> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

impl<R: Record> From<Vec<R>> for RecordSource<R> {
    fn from(records: Vec<R>) -> Self {
        Self::new(records)
    }
}

impl<R: Record> RecordSource<R> {
    pub fn new(records: Vec<R>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, R> {
        self.records.iter()
    }

    pub fn get(&self, id: &str) -> Option<&R> {
        self.records.iter().find(|record| record.id().as_str() == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Appends `record`. Returns `false` and leaves the source untouched if the id is taken.
    pub fn insert(&mut self, record: R) -> bool {
        if self.contains(&record.id()) {
            return false;
        }
        self.records.push(record);
        true
    }

    /// Swaps in `record` for the one with the same id and returns the old value.
    pub fn replace(&mut self, record: R) -> Option<R> {
        let id = record.id();
        let slot = self.records.iter_mut().find(|existing| existing.id() == id)?;
        Some(std::mem::replace(slot, record))
    }

    pub fn remove(&mut self, id: &str) -> Option<R> {
        let index = self.records.iter().position(|record| record.id().as_str() == id)?;
        Some(self.records.remove(index))
    }
}

impl<'a, R: Record> IntoIterator for &'a RecordSource<R> {
    type Item = &'a R;
    type IntoIter = std::slice::Iter<'a, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<R: Record> State for RecordSource<R> {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
        state_assign_impl(self, new_self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::test_record::{item, items};

    #[test]
    fn replace_keeps_position_and_returns_old() {
        let mut source = RecordSource::new(items());
        let old = source.replace(item("2", "Bobby", "closed", 4, Some(2), false));

        assert_eq!(old.map(|item| item.name), Some("Bob".to_owned()));
        let names: Vec<_> = source.iter().map(|item| item.name.as_str()).collect();
        assert_eq!(names, vec!["Alice", "Bobby", "Berta", "alicia", "Émile"]);
    }

    #[test]
    fn replace_of_unknown_id_changes_nothing() {
        let mut source = RecordSource::new(items());
        assert!(source.replace(item("99", "Ghost", "open", 0, None, false)).is_none());
        assert_eq!(source.len(), 5);
    }

    #[test]
    fn insert_rejects_duplicate_ids() {
        let mut source = RecordSource::new(items());
        assert!(!source.insert(item("1", "Again", "open", 0, None, false)));
        assert!(source.insert(item("6", "Fay", "open", 0, None, false)));
        assert_eq!(source.get("6").map(|item| item.name.as_str()), Some("Fay"));
        assert!(source.remove("6").is_some());
        assert!(!source.contains("6"));
    }
}
