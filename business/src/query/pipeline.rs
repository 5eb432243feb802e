//! `source -> predicates -> stable sort -> page slice`.

use std::{fmt, sync::Arc};

use ustr::Ustr;

use super::{
    filter::{FilterKey, FilterState, PredicateSet},
    page::{PageState, PageWindow},
    record::{FieldKind, Record},
    sort::{ComparatorSet, SortState},
    source::RecordSource,
};

/// Everything the user controls about one table: filters, sort, page and scope.
///
/// Any change that can alter the filtered set (filter edits, scope, sort, page size)
/// resets the current page to 1. A source that shrinks underneath a stored page is
/// handled by [`ListPipeline::run`], which clamps before slicing.
#[derive(Debug, Clone, PartialEq)]
pub struct ListQuery<F: Ord> {
    filter: FilterState<F>,
    sort: SortState<F>,
    page: PageState,
    scope: Option<Ustr>,
}

impl<F: Ord + Copy> ListQuery<F> {
    pub fn new(sort: SortState<F>, items_per_page: usize) -> Self {
        Self {
            filter: FilterState::default(),
            sort,
            page: PageState::new(items_per_page),
            scope: None,
        }
    }

    pub fn filter(&self) -> &FilterState<F> {
        &self.filter
    }

    pub fn sort(&self) -> &SortState<F> {
        &self.sort
    }

    pub fn page(&self) -> &PageState {
        &self.page
    }

    pub fn scope(&self) -> Option<Ustr> {
        self.scope
    }

    /// The only way to change filters.
    pub fn edit_filter(&mut self, edit: impl FnOnce(&mut FilterState<F>)) {
        edit(&mut self.filter);
        self.page.reset();
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        let search = search.into();
        self.edit_filter(|filter| filter.set_search(search));
    }

    pub fn toggle_selection(&mut self, field: F, value: &str) {
        self.edit_filter(|filter| filter.toggle_selection(field, value));
    }

    pub fn clear_filters(&mut self) {
        self.edit_filter(FilterState::clear);
    }

    pub fn set_scope(&mut self, scope: Option<Ustr>) {
        self.scope = scope;
        self.page.reset();
    }

    pub fn sort_by(&mut self, field: F, kind: FieldKind) {
        self.sort.select(field, kind);
        self.page.reset();
    }

    pub fn set_sort(&mut self, sort: SortState<F>) {
        self.sort = sort;
        self.page.reset();
    }

    pub fn set_items_per_page(&mut self, items_per_page: usize) {
        self.page.set_items_per_page(items_per_page);
    }

    pub fn set_page(&mut self, page: usize) {
        self.page.set_page(page);
    }

    pub fn next_page(&mut self, total: usize) {
        self.page.next(total);
    }

    pub fn prev_page(&mut self) {
        self.page.prev();
    }
}

/// One page of rows plus the counts the pager needs.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryPage<R> {
    pub rows: Vec<R>,
    pub window: PageWindow,
    /// Rows left after filtering, across all pages.
    pub filtered: usize,
    pub current_page: usize,
    pub total_pages: usize,
}

impl<R> Default for QueryPage<R> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            window: PageWindow::default(),
            filtered: 0,
            current_page: 1,
            total_pages: 1,
        }
    }
}

impl<R> QueryPage<R> {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// A predicate that also sees the query's scope (e.g. "friends of this user").
pub type ScopedPredicate<R> = Arc<dyn Fn(&R, Option<Ustr>) -> bool + Send + Sync>;

/// Generic list pipeline, configured once per table.
pub struct ListPipeline<R: Record> {
    comparators: ComparatorSet<R>,
    predicates: Vec<(&'static str, ScopedPredicate<R>)>,
}

impl<R: Record> Default for ListPipeline<R> {
    fn default() -> Self {
        Self {
            comparators: ComparatorSet::new(),
            predicates: Vec::new(),
        }
    }
}

impl<R: Record> fmt::Debug for ListPipeline<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListPipeline")
            .field("comparators", &self.comparators)
            .field(
                "predicates",
                &self.predicates.iter().map(|(name, _)| name).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl<R: Record> ListPipeline<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_comparators(mut self, comparators: ComparatorSet<R>) -> Self {
        self.comparators = comparators;
        self
    }

    /// Adds a predicate that applies on top of the user's filters.
    pub fn with_predicate(
        mut self,
        name: &'static str,
        predicate: impl Fn(&R, Option<Ustr>) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.predicates.push((name, Arc::new(predicate)));
        self
    }

    pub fn comparators(&self) -> &ComparatorSet<R> {
        &self.comparators
    }

    /// The full predicate set for `query`: its filters plus this pipeline's predicates.
    pub fn predicate_set(&self, query: &ListQuery<R::Field>) -> PredicateSet<R> {
        let mut set = PredicateSet::compile(query.filter());
        let scope = query.scope();
        for (name, predicate) in &self.predicates {
            let predicate = Arc::clone(predicate);
            set.insert(
                FilterKey::Custom(*name),
                Box::new(move |record: &R| predicate(record, scope)),
            );
        }
        set
    }

    /// Filtered and sorted, before paging.
    pub fn filtered<'a>(
        &self,
        source: impl IntoIterator<Item = &'a R>,
        query: &ListQuery<R::Field>,
    ) -> Vec<&'a R> {
        let predicates = self.predicate_set(query);
        let mut rows: Vec<&R> = source
            .into_iter()
            .filter(|record| predicates.matches(record))
            .collect();
        self.comparators.sort(&mut rows, query.sort());
        rows
    }

    /// One page of rows. A stored page past the end lands on the last page.
    pub fn run(&self, source: &RecordSource<R>, query: &ListQuery<R::Field>) -> QueryPage<R> {
        let rows = self.filtered(source, query);
        let mut page = *query.page();
        page.clamp(rows.len());
        let window = page.window(rows.len());
        QueryPage {
            rows: rows[window.range()].iter().copied().cloned().collect(),
            window,
            filtered: rows.len(),
            current_page: page.current_page(),
            total_pages: page.total_pages(rows.len()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{
        sort::SortDirection,
        test_record::{Item, ItemField, items},
    };

    fn query() -> ListQuery<ItemField> {
        ListQuery::new(SortState::new(ItemField::Name, SortDirection::Asc), 2)
    }

    fn ids(page: &QueryPage<Item>) -> Vec<&str> {
        page.rows.iter().map(|item| item.id.as_str()).collect()
    }

    #[test]
    fn every_filter_edit_resets_the_page() {
        let mut query = query();
        query.set_page(3);
        query.set_search("a");
        assert_eq!(query.page().current_page(), 1);

        query.set_page(2);
        query.toggle_selection(ItemField::Status, "open");
        assert_eq!(query.page().current_page(), 1);

        query.set_page(2);
        query.set_scope(Some(Ustr::from("1")));
        assert_eq!(query.page().current_page(), 1);

        query.set_page(2);
        query.sort_by(ItemField::Score, FieldKind::Number);
        assert_eq!(query.page().current_page(), 1);

        query.set_page(2);
        query.set_items_per_page(5);
        assert_eq!(query.page().current_page(), 1);
    }

    #[test]
    fn run_filters_sorts_and_slices() {
        let source = RecordSource::new(items());
        let pipeline = ListPipeline::new();
        let mut query = query();
        query.toggle_selection(ItemField::Status, "open");

        let first = pipeline.run(&source, &query);
        assert_eq!(ids(&first), vec!["1", "2"]);
        assert_eq!(first.filtered, 3);
        assert_eq!(first.total_pages, 2);

        query.set_page(2);
        assert_eq!(ids(&pipeline.run(&source, &query)), vec!["5"]);

        query.set_page(3);
        let past_end = pipeline.run(&source, &query);
        assert_eq!(ids(&past_end), vec!["5"]);
        assert_eq!(past_end.current_page, 2);
        assert_eq!(past_end.total_pages, 2);
    }

    #[test]
    fn scoped_predicates_see_the_scope() {
        let source = RecordSource::new(items());
        let pipeline = ListPipeline::new()
            .with_predicate("status", |item: &Item, scope| {
                scope.is_none_or(|scope| item.status == scope.as_str())
            });
        let mut query = query();
        query.set_items_per_page(10);

        assert_eq!(pipeline.run(&source, &query).filtered, 5);

        query.set_scope(Some(Ustr::from("closed")));
        assert_eq!(ids(&pipeline.run(&source, &query)), vec!["4", "3"]);
    }
}
