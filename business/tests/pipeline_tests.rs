//! Properties and scenarios of the list query pipeline, run through real records.

use chrono::{DateTime, TimeZone, Utc};
use linkup_business::{
    query::{
        FieldKind, ListPipeline, ListQuery, NumericRange, QueryPage, Record, RecordSource,
        SortDirection, SortState,
    },
    records::{Feedback, FeedbackField, Linkup, LinkupField, LinkupStatus, User, UserField},
};
use proptest::prelude::*;

const GENDERS: [&str; 3] = ["female", "male", "other"];

fn day(n: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, n, 12, 0, 0).unwrap()
}

fn user(index: usize, age: u32, gender: &str) -> User {
    User::builder()
        .id(format!("u-{index}"))
        .name(format!("User {index}"))
        .username(format!("user{index}"))
        .email(format!("user{index}@example.com"))
        .age(age)
        .gender(gender)
        .city("Lagos")
        .joined_at(day(1))
        .build()
}

fn users_from(rows: &[(u32, usize)]) -> Vec<User> {
    rows.iter()
        .enumerate()
        .map(|(index, &(age, gender))| user(index, age, GENDERS[gender]))
        .collect()
}

fn ids<'a, R: Record + 'a>(rows: impl IntoIterator<Item = &'a R>) -> Vec<String> {
    rows.into_iter().map(|row| row.id().to_string()).collect()
}

fn user_query(field: UserField, direction: SortDirection, size: usize) -> ListQuery<UserField> {
    ListQuery::new(SortState::new(field, direction), size)
}

fn rows_strategy() -> impl Strategy<Value = Vec<(u32, usize)>> {
    prop::collection::vec((0u32..100, 0usize..GENDERS.len()), 0..40)
}

proptest! {
    #[test]
    fn filtered_rows_satisfy_every_criterion(
        rows in rows_strategy(),
        min in 0u32..100,
        span in 0u32..100,
        gender in 0usize..GENDERS.len(),
    ) {
        let users = users_from(&rows);
        let max = min + span;
        let mut query = user_query(UserField::Name, SortDirection::Asc, 10);
        query.edit_filter(|filter| {
            filter.set_numeric_range(UserField::Age, NumericRange::between(f64::from(min), f64::from(max)));
            filter.toggle_selection(UserField::Gender, GENDERS[gender]);
        });

        let pipeline = ListPipeline::<User>::new();
        let kept = pipeline.filtered(&users, &query);
        let expected = users
            .iter()
            .filter(|u| (min..=max).contains(&u.age) && u.gender == GENDERS[gender])
            .count();

        prop_assert_eq!(kept.len(), expected);
        for user in kept {
            prop_assert!((min..=max).contains(&user.age));
            prop_assert_eq!(user.gender.as_str(), GENDERS[gender]);
        }
    }

    #[test]
    fn empty_filter_keeps_every_row_in_order(rows in rows_strategy()) {
        let users = users_from(&rows);
        // every user is unverified, so the sort key ties everywhere
        let query = user_query(UserField::Verified, SortDirection::Desc, 10);
        let kept = ListPipeline::<User>::new().filtered(&users, &query);
        prop_assert_eq!(ids(kept), ids(&users));
    }

    #[test]
    fn ties_keep_input_order_in_both_directions(rows in rows_strategy()) {
        let users = users_from(&rows);
        for direction in [SortDirection::Asc, SortDirection::Desc] {
            let query = user_query(UserField::Gender, direction, 10);
            let kept = ListPipeline::<User>::new().filtered(&users, &query);
            for pair in kept.windows(2) {
                if pair[0].gender == pair[1].gender {
                    let index = |u: &User| users.iter().position(|x| x.id == u.id).unwrap();
                    prop_assert!(index(pair[0]) < index(pair[1]));
                }
            }
        }
    }

    #[test]
    fn descending_is_ascending_reversed_without_ties(
        ages in prop::collection::hash_set(0u32..1000, 0..30),
    ) {
        let users: Vec<User> = ages
            .into_iter()
            .enumerate()
            .map(|(index, age)| user(index, age, "other"))
            .collect();
        let pipeline = ListPipeline::<User>::new();
        let asc = ids(pipeline.filtered(&users, &user_query(UserField::Age, SortDirection::Asc, 10)));
        let mut desc = ids(pipeline.filtered(&users, &user_query(UserField::Age, SortDirection::Desc, 10)));
        desc.reverse();
        prop_assert_eq!(asc, desc);
    }

    #[test]
    fn pages_cover_the_filtered_rows_exactly_once(
        rows in rows_strategy(),
        size in prop::sample::select(vec![5usize, 10, 25]),
    ) {
        let source = RecordSource::new(users_from(&rows));
        let pipeline = ListPipeline::<User>::new();
        let mut query = user_query(UserField::Age, SortDirection::Asc, size);
        let all = ids(pipeline.filtered(&source, &query));

        let first = pipeline.run(&source, &query);
        prop_assert_eq!(first.total_pages, all.len().div_ceil(size).max(1));

        let mut seen = Vec::new();
        for page in 1..=first.total_pages {
            query.set_page(page);
            let result = pipeline.run(&source, &query);
            prop_assert!(result.rows.len() <= size);
            seen.extend(ids(&result.rows));
        }
        prop_assert_eq!(seen, all);
    }

    #[test]
    fn filter_and_size_changes_return_to_page_one(page in 2usize..50, age in 0u32..100) {
        let mut query = user_query(UserField::Age, SortDirection::Asc, 10);

        query.set_page(page);
        query.edit_filter(|filter| {
            filter.set_numeric_range(UserField::Age, NumericRange::new(Some(f64::from(age)), None));
        });
        prop_assert_eq!(query.page().current_page(), 1);

        query.set_page(page);
        query.set_items_per_page(25);
        prop_assert_eq!(query.page().current_page(), 1);
    }

    #[test]
    fn pages_past_the_end_land_on_the_last_page(rows in rows_strategy(), extra in 1usize..10) {
        let source = RecordSource::new(users_from(&rows));
        let pipeline = ListPipeline::<User>::new();
        let mut query = user_query(UserField::Age, SortDirection::Asc, 5);
        let total_pages = pipeline.run(&source, &query).total_pages;

        query.set_page(total_pages + extra);
        let page = pipeline.run(&source, &query);
        prop_assert_eq!(page.current_page, total_pages);
        prop_assert!(page.current_page <= page.total_pages);
        prop_assert_eq!(page.is_empty(), rows.is_empty());
        prop_assert_eq!(page.filtered, rows.len());
    }
}

fn linkup(index: usize, status: LinkupStatus) -> Linkup {
    Linkup::builder()
        .id(format!("l-{index}"))
        .title(format!("Linkup {index}"))
        .creator_id("u-1")
        .creator_name("Amara Okafor")
        .category("Social")
        .location("Lagos")
        .starts_at(day(20))
        .created_at(day(1))
        .capacity(10)
        .status(status)
        .build()
}

#[test]
fn status_filter_keeps_matching_rows_in_order() {
    use LinkupStatus::*;
    let linkups: Vec<Linkup> = [Upcoming, Happening, Happened, Cancelled, Upcoming]
        .into_iter()
        .enumerate()
        .map(|(index, status)| linkup(index, status))
        .collect();

    let mut query = ListQuery::new(
        SortState::by(LinkupField::Status, FieldKind::Text),
        10,
    );
    query.toggle_selection(LinkupField::Status, "upcoming");

    let page = ListPipeline::<Linkup>::new().run(&RecordSource::new(linkups), &query);
    assert_eq!(ids(&page.rows), vec!["l-0", "l-4"]);
    assert_eq!(page.filtered, 2);
}

#[test]
fn age_range_is_inclusive() {
    let users: Vec<User> = [28, 45, 19, 62]
        .into_iter()
        .enumerate()
        .map(|(index, age)| user(index, age, "other"))
        .collect();

    let mut query = user_query(UserField::Verified, SortDirection::Asc, 10);
    query.edit_filter(|filter| {
        filter.set_numeric_range(UserField::Age, NumericRange::between(20.0, 50.0));
    });

    let page = ListPipeline::<User>::new().run(&RecordSource::new(users), &query);
    let ages: Vec<u32> = page.rows.iter().map(|u| u.age).collect();
    assert_eq!(ages, vec![28, 45]);
}

fn feedback_page(query: &ListQuery<FeedbackField>) -> QueryPage<Feedback> {
    let items: Vec<Feedback> = (1..=7)
        .map(|n| {
            Feedback::builder()
                .id(format!("f-{n}"))
                .user_name(format!("User {n}"))
                .category("Bug")
                .platform("Web")
                .message("Something broke")
                .rating(3)
                .submitted_at(day(n))
                .build()
        })
        .collect();
    ListPipeline::<Feedback>::new().run(&RecordSource::new(items), query)
}

#[test]
fn seven_items_in_pages_of_three() {
    let mut query = ListQuery::new(
        SortState::by(FeedbackField::SubmittedAt, FieldKind::Date),
        3,
    );
    assert_eq!(query.sort().direction(), SortDirection::Desc);

    let first = feedback_page(&query);
    assert_eq!(ids(&first.rows), vec!["f-7", "f-6", "f-5"]);
    assert_eq!(first.total_pages, 3);
    assert_eq!(first.filtered, 7);

    query.set_page(3);
    let third = feedback_page(&query);
    assert_eq!(ids(&third.rows), vec!["f-1"]);
    assert_eq!((third.window.start, third.window.end), (6, 7));

    query.set_page(4);
    let clamped = feedback_page(&query);
    assert_eq!(ids(&clamped.rows), vec!["f-1"]);
    assert_eq!((clamped.current_page, clamped.total_pages), (3, 3));
}

#[test]
fn toggling_the_sort_field_reverses_the_rows() {
    let users: Vec<User> = [28, 45, 19, 62]
        .into_iter()
        .enumerate()
        .map(|(index, age)| user(index, age, "other"))
        .collect();
    let source = RecordSource::new(users);
    let pipeline = ListPipeline::<User>::new();

    let mut query = user_query(UserField::Name, SortDirection::Asc, 10);
    query.sort_by(UserField::Age, FieldKind::Number);
    assert_eq!(query.sort().direction(), SortDirection::Asc);
    let asc = ids(&pipeline.run(&source, &query).rows);
    assert_eq!(asc, vec!["u-2", "u-0", "u-1", "u-3"]);

    query.sort_by(UserField::Age, FieldKind::Number);
    assert_eq!(query.sort().direction(), SortDirection::Desc);
    let desc = ids(&pipeline.run(&source, &query).rows);
    assert_eq!(desc, vec!["u-3", "u-1", "u-0", "u-2"]);
}
