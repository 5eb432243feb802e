//! Every list in the dashboard, bound to the shared query pipeline.
//!
//! A [`Table`] names its record type, the rows it shows (a base predicate, optionally
//! scoped to one parent record), its sort overrides and page sizes. The UI edits a
//! [`TableQuery`] and reads the resulting page from the matching [`TableView`].

use std::{any::Any, fmt, marker::PhantomData};

use linkup_states::{Compute, ComputeDeps, Dep, State, Updater, assign_impl, state_assign_impl};
use ustr::Ustr;

use crate::{
    query::{ListPipeline, ListQuery, PAGE_SIZES, QueryPage, Record, RecordSource, SortState},
    records::{
        Feedback, FeedbackField, Linkup, LinkupField, Report, ReportField, ReportTarget,
        StaffField, StaffMember, User, UserField, UserStatus, Verification, VerificationField,
    },
};

pub type FieldOf<T> = <<T as Table>::Record as Record>::Field;

/// Static description of one table.
pub trait Table: Send + Sync + 'static {
    type Record: Record;

    const TITLE: &'static str;

    const PAGE_SIZES: &'static [usize] = &PAGE_SIZES;

    fn default_sort() -> SortState<FieldOf<Self>>;

    fn default_page_size() -> usize {
        PAGE_SIZES[1]
    }

    fn pipeline() -> ListPipeline<Self::Record>;
}

/// The user-controlled query of table `T`.
pub struct TableQuery<T: Table> {
    query: ListQuery<FieldOf<T>>,
    _table: PhantomData<fn() -> T>,
}

impl<T: Table> Default for TableQuery<T> {
    fn default() -> Self {
        Self {
            query: ListQuery::new(T::default_sort(), T::default_page_size()),
            _table: PhantomData,
        }
    }
}

impl<T: Table> Clone for TableQuery<T> {
    fn clone(&self) -> Self {
        Self {
            query: self.query.clone(),
            _table: PhantomData,
        }
    }
}

impl<T: Table> fmt::Debug for TableQuery<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableQuery")
            .field("table", &T::TITLE)
            .field("query", &self.query)
            .finish()
    }
}

impl<T: Table> TableQuery<T> {
    /// Starts at `items_per_page` when the table offers it, at its default otherwise.
    pub fn with_page_size(items_per_page: usize) -> Self {
        let mut table = Self::default();
        table.set_items_per_page(items_per_page);
        table
    }

    pub fn query(&self) -> &ListQuery<FieldOf<T>> {
        &self.query
    }

    /// Direct access for filter and page edits; `ListQuery` keeps the page consistent.
    pub fn query_mut(&mut self) -> &mut ListQuery<FieldOf<T>> {
        &mut self.query
    }

    /// Header click.
    pub fn sort_by(&mut self, field: FieldOf<T>) {
        self.query.sort_by(field, <T::Record as Record>::field_kind(field));
    }

    /// Ignores sizes the table does not offer.
    pub fn set_items_per_page(&mut self, items_per_page: usize) {
        if T::PAGE_SIZES.contains(&items_per_page) {
            self.query.set_items_per_page(items_per_page);
        }
    }

    /// Changes the scope, resetting the page only when it actually changes.
    pub fn scope_to(&mut self, scope: Option<Ustr>) {
        if self.query.scope() != scope {
            self.query.set_scope(scope);
        }
    }
}

impl<T: Table> State for TableQuery<T> {
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

/// Cached page of table `T`, re-run when its source or query changes.
pub struct TableView<T: Table> {
    page: QueryPage<T::Record>,
    _table: PhantomData<fn() -> T>,
}

impl<T: Table> Default for TableView<T> {
    fn default() -> Self {
        Self {
            page: QueryPage::default(),
            _table: PhantomData,
        }
    }
}

impl<T: Table> fmt::Debug for TableView<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableView")
            .field("table", &T::TITLE)
            .field("rows", &self.page.rows.len())
            .field("filtered", &self.page.filtered)
            .finish()
    }
}

impl<T: Table> TableView<T> {
    pub fn page(&self) -> &QueryPage<T::Record> {
        &self.page
    }
}

impl<T: Table> Compute for TableView<T> {
    fn deps(&self) -> ComputeDeps {
        ComputeDeps::none()
            .state::<RecordSource<T::Record>>()
            .state::<TableQuery<T>>()
    }

    fn compute(&self, deps: Dep<'_>, updater: Updater) {
        let source = deps.state::<RecordSource<T::Record>>();
        let query = deps.state::<TableQuery<T>>();
        updater.set(Self {
            page: T::pipeline().run(source, query.query()),
            _table: PhantomData,
        });
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
        assign_impl(self, new_self);
    }
}

fn in_scope(scope: Option<Ustr>, id: Ustr) -> bool {
    scope.is_none_or(|scope| scope == id)
}

#[derive(Debug)]
pub struct UsersTable;

impl Table for UsersTable {
    type Record = User;

    const TITLE: &'static str = "Users";

    fn default_sort() -> SortState<UserField> {
        SortState::by(UserField::JoinedAt, User::field_kind(UserField::JoinedAt))
    }

    fn pipeline() -> ListPipeline<User> {
        ListPipeline::new().with_predicate("active", |user: &User, _| user.status.is_active())
    }
}

#[derive(Debug)]
pub struct SuspendedUsersTable;

impl Table for SuspendedUsersTable {
    type Record = User;

    const TITLE: &'static str = "Suspended users";

    fn default_sort() -> SortState<UserField> {
        SortState::by(
            UserField::StatusChangedAt,
            User::field_kind(UserField::StatusChangedAt),
        )
    }

    fn pipeline() -> ListPipeline<User> {
        ListPipeline::new().with_predicate("suspended", |user: &User, _| {
            matches!(user.status, UserStatus::Suspended(_))
        })
    }
}

#[derive(Debug)]
pub struct DeletedUsersTable;

impl Table for DeletedUsersTable {
    type Record = User;

    const TITLE: &'static str = "Deleted users";

    fn default_sort() -> SortState<UserField> {
        SortState::by(
            UserField::StatusChangedAt,
            User::field_kind(UserField::StatusChangedAt),
        )
    }

    fn pipeline() -> ListPipeline<User> {
        ListPipeline::new().with_predicate("deleted", |user: &User, _| {
            matches!(user.status, UserStatus::Deleted(_))
        })
    }
}

/// Friends of the user in scope. Nothing without a scope.
#[derive(Debug)]
pub struct FriendsTable;

impl Table for FriendsTable {
    type Record = User;

    const TITLE: &'static str = "Friends";

    const PAGE_SIZES: &'static [usize] = &[5, 10, 25];

    fn default_sort() -> SortState<UserField> {
        SortState::by(UserField::Name, User::field_kind(UserField::Name))
    }

    fn default_page_size() -> usize {
        5
    }

    fn pipeline() -> ListPipeline<User> {
        ListPipeline::new().with_predicate("friend_of", |user: &User, scope| {
            scope.is_some_and(|id| user.is_friend_of(&id))
        })
    }
}

/// Reports about users, optionally about one user.
#[derive(Debug)]
pub struct UserReportsTable;

impl Table for UserReportsTable {
    type Record = Report;

    const TITLE: &'static str = "User reports";

    fn default_sort() -> SortState<ReportField> {
        SortState::by(ReportField::CreatedAt, Report::field_kind(ReportField::CreatedAt))
    }

    fn pipeline() -> ListPipeline<Report> {
        ListPipeline::new().with_predicate("user_target", |report: &Report, scope| {
            report.target == ReportTarget::User && in_scope(scope, report.target_id)
        })
    }
}

#[derive(Debug)]
pub struct LinkupsTable;

fn linkup_pipeline() -> ListPipeline<Linkup> {
    ListPipeline::new().with_comparators(
        crate::query::ComparatorSet::new()
            .with_key(LinkupField::Status, |linkup: &Linkup| linkup.status.rank()),
    )
}

impl Table for LinkupsTable {
    type Record = Linkup;

    const TITLE: &'static str = "Linkups";

    fn default_sort() -> SortState<LinkupField> {
        SortState::by(LinkupField::StartsAt, Linkup::field_kind(LinkupField::StartsAt))
    }

    fn pipeline() -> ListPipeline<Linkup> {
        linkup_pipeline()
    }
}

/// Linkups created by the user in scope.
#[derive(Debug)]
pub struct UserLinkupsTable;

impl Table for UserLinkupsTable {
    type Record = Linkup;

    const TITLE: &'static str = "Created linkups";

    const PAGE_SIZES: &'static [usize] = &[5, 10, 25];

    fn default_sort() -> SortState<LinkupField> {
        SortState::by(LinkupField::StartsAt, Linkup::field_kind(LinkupField::StartsAt))
    }

    fn default_page_size() -> usize {
        5
    }

    fn pipeline() -> ListPipeline<Linkup> {
        linkup_pipeline().with_predicate("created_by", |linkup: &Linkup, scope| {
            scope.is_some_and(|id| linkup.creator_id == id)
        })
    }
}

/// Reports about linkups, optionally about one linkup.
#[derive(Debug)]
pub struct LinkupReportsTable;

impl Table for LinkupReportsTable {
    type Record = Report;

    const TITLE: &'static str = "Linkup reports";

    fn default_sort() -> SortState<ReportField> {
        SortState::by(ReportField::CreatedAt, Report::field_kind(ReportField::CreatedAt))
    }

    fn pipeline() -> ListPipeline<Report> {
        ListPipeline::new().with_predicate("linkup_target", |report: &Report, scope| {
            report.target == ReportTarget::Linkup && in_scope(scope, report.target_id)
        })
    }
}

#[derive(Debug)]
pub struct VerificationsTable;

impl Table for VerificationsTable {
    type Record = Verification;

    const TITLE: &'static str = "Verifications";

    fn default_sort() -> SortState<VerificationField> {
        SortState::by(
            VerificationField::SubmittedAt,
            Verification::field_kind(VerificationField::SubmittedAt),
        )
    }

    fn pipeline() -> ListPipeline<Verification> {
        ListPipeline::new().with_comparators(crate::query::ComparatorSet::new().with_key(
            VerificationField::Status,
            |verification: &Verification| verification.status.rank(),
        ))
    }
}

#[derive(Debug)]
pub struct FeedbackTable;

impl Table for FeedbackTable {
    type Record = Feedback;

    const TITLE: &'static str = "Feedback";

    fn default_sort() -> SortState<FeedbackField> {
        SortState::by(
            FeedbackField::SubmittedAt,
            Feedback::field_kind(FeedbackField::SubmittedAt),
        )
    }

    fn pipeline() -> ListPipeline<Feedback> {
        ListPipeline::new()
    }
}

#[derive(Debug)]
pub struct StaffTable;

impl Table for StaffTable {
    type Record = StaffMember;

    const TITLE: &'static str = "Staff";

    fn default_sort() -> SortState<StaffField> {
        SortState::by(StaffField::Name, StaffMember::field_kind(StaffField::Name))
    }

    fn pipeline() -> ListPipeline<StaffMember> {
        ListPipeline::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{query::SortDirection, records::LinkupStatus, seed};

    fn run<T: Table>(source: Vec<T::Record>, query: &TableQuery<T>) -> QueryPage<T::Record> {
        T::pipeline().run(&RecordSource::new(source), query.query())
    }

    fn ids<R: Record>(page: &QueryPage<R>) -> Vec<String> {
        page.rows.iter().map(|row| row.id().to_string()).collect()
    }

    #[test]
    fn user_tables_split_by_status() {
        let users = seed::users();
        let active = run(users.clone(), &TableQuery::<UsersTable>::default());
        let suspended = run(users.clone(), &TableQuery::<SuspendedUsersTable>::default());
        let deleted = run(users.clone(), &TableQuery::<DeletedUsersTable>::default());

        assert_eq!(active.filtered + suspended.filtered + deleted.filtered, users.len());
        assert!(active.rows.iter().all(|u| u.status.is_active()));
        assert_eq!(ids(&suspended), vec!["u-7", "u-8"]);
        assert_eq!(ids(&deleted), vec!["u-9"]);
    }

    #[test]
    fn friends_need_a_scope() {
        let mut query = TableQuery::<FriendsTable>::default();
        assert!(run(seed::users(), &query).is_empty());

        query.scope_to(Some(Ustr::from("u-1")));
        assert_eq!(ids(&run(seed::users(), &query)), vec!["u-3", "u-2", "u-6"]);
    }

    #[test]
    fn scope_change_resets_the_page_once() {
        let mut query = TableQuery::<UserLinkupsTable>::default();
        query.scope_to(Some(Ustr::from("u-1")));
        query.query_mut().set_page(2);

        query.scope_to(Some(Ustr::from("u-1")));
        assert_eq!(query.query().page().current_page(), 2);

        query.scope_to(Some(Ustr::from("u-2")));
        assert_eq!(query.query().page().current_page(), 1);
    }

    #[test]
    fn report_tables_split_by_target() {
        let users = run(seed::reports(), &TableQuery::<UserReportsTable>::default());
        let linkups = run(seed::reports(), &TableQuery::<LinkupReportsTable>::default());
        assert_eq!(users.filtered + linkups.filtered, seed::reports().len());

        let mut one = TableQuery::<LinkupReportsTable>::default();
        one.scope_to(Some(Ustr::from("l-5")));
        assert_eq!(ids(&run(seed::reports(), &one)), vec!["r-3"]);
    }

    #[test]
    fn linkup_status_sorts_by_lifecycle() {
        let mut query = TableQuery::<LinkupsTable>::default();
        query.sort_by(LinkupField::Status);
        assert_eq!(query.query().sort().direction(), SortDirection::Asc);

        let page = run(seed::linkups(), &query);
        let ranks: Vec<u8> = page.rows.iter().map(|l| l.status.rank()).collect();
        assert!(ranks.is_sorted());
        assert_eq!(page.rows[0].status, LinkupStatus::Upcoming);
    }

    #[test]
    fn date_columns_start_newest_first() {
        let query = TableQuery::<FeedbackTable>::default();
        assert_eq!(query.query().sort().direction(), SortDirection::Desc);

        let page = run(seed::feedback(), &query);
        assert_eq!(ids(&page)[0], "f-5");
    }

    #[test]
    fn unsupported_page_sizes_are_ignored() {
        let mut query = TableQuery::<FriendsTable>::with_page_size(100);
        assert_eq!(query.query().page().items_per_page(), 5);
        query.set_items_per_page(25);
        assert_eq!(query.query().page().items_per_page(), 25);
    }
}
