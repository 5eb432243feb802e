//! The list query pipeline shared by every table: filter, then sort, then paginate.

mod filter;
mod page;
mod pipeline;
mod record;
mod sort;
mod source;

#[cfg(test)]
pub(crate) mod test_record;

pub use filter::{
    DateRange, FilterKey, FilterState, NumericRange, Predicate, PredicateSet, matches_search,
    matches_selection,
};
pub use page::{PAGE_SIZES, PageState, PageWindow};
pub use pipeline::{ListPipeline, ListQuery, QueryPage, ScopedPredicate};
pub use record::{FieldKind, FieldValue, Record};
pub use sort::{Comparator, ComparatorSet, SortDirection, SortState, collate, compare_values};
pub use source::RecordSource;
