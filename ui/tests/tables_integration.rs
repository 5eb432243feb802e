use kittest::Queryable;
use linkup_business::{
    Route, RouteState,
    moderation::ModerationInput,
    tables::{SuspendedUsersTable, TableQuery},
};

use crate::common::TestCtx;

mod common;

/// Tests that the users table lists active users and leaves out the others.
#[test]
fn test_users_table_lists_active_users() {
    let mut ctx = TestCtx::signed_in(Route::Users);
    let harness = ctx.harness_mut();
    harness.run();

    assert!(harness.query_by_label("Amara Okafor").is_some());
    assert!(harness.query_by_label("Kwame Mensah").is_some());
    assert!(
        harness.query_by_label("Noor Haddad").is_none(),
        "suspended users belong to their own view"
    );
    assert!(harness.query_by_label("Showing 1-7 of 7").is_some());
}

/// Tests that a search with no matches shows the empty state.
#[test]
fn test_search_without_matches_shows_no_results() {
    let mut ctx = TestCtx::signed_in(Route::SuspendedUsers);
    ctx.harness_mut().run();
    assert!(ctx.harness().query_by_label("Noor Haddad").is_some());

    ctx.arrange(|state_ctx| {
        state_ctx.update::<TableQuery<SuspendedUsersTable>>(|query| {
            query.query_mut().set_search("nobody by this name");
        });
    });
    let harness = ctx.harness_mut();

    assert!(harness.query_by_label("No results").is_some());
    assert!(harness.query_by_label("Noor Haddad").is_none());
}

/// Tests that a missing record replaces only the page with the fallback.
#[test]
fn test_missing_user_shows_fallback() {
    let mut ctx = TestCtx::signed_in(Route::parse("/users/u-404"));
    let harness = ctx.harness_mut();
    harness.run();

    assert!(harness.query_by_label("Something went wrong").is_some());
    assert!(
        harness.query_by_label("Sign out").is_some(),
        "the shell stays up around a failed page"
    );

    harness.get_by_label("Back to dashboard").click();
    harness.run();

    assert_eq!(
        harness.state().state().ctx.state::<RouteState>().current(),
        &Route::Dashboard
    );
}

/// Tests the suspend dialog end to end from the user detail page.
#[test]
fn test_suspend_user_from_detail_page() {
    let mut ctx = TestCtx::signed_in(Route::parse("/users/u-1"));
    ctx.harness_mut().run();

    let harness = ctx.harness_mut();
    harness.get_by_label("Suspend").click();
    harness.run();
    assert!(harness.query_by_label("Reason (required):").is_some());

    ctx.arrange(|state_ctx| {
        state_ctx.update::<ModerationInput>(|input| input.reason = "Fake profile".to_owned());
    });
    let harness = ctx.harness_mut();
    harness.get_by_label("Suspend user").click();
    harness.run();

    assert!(harness.query_by_label("Reason (required):").is_none());
    assert!(
        harness
            .query_by_label_contains("by Linkup Admin: Fake profile")
            .is_some()
    );
    assert!(harness.query_by_label("Reactivate").is_some());
}
