use kittest::Queryable;
use linkup_business::{
    Route,
    query::RecordSource,
    records::{StaffMember, StaffRole},
    staff::StaffInput,
};

use crate::common::TestCtx;

mod common;

/// Tests adding a staff member through the dialog updates the open staff page.
#[test]
fn test_added_member_shows_up() {
    let mut ctx = TestCtx::signed_in(Route::Staff);
    ctx.harness_mut().run();
    assert!(ctx.harness().query_by_label("Priya Nair").is_some());
    assert_eq!(
        ctx.state_ctx()
            .subscriber_count::<RecordSource<StaffMember>>(),
        1
    );

    let harness = ctx.harness_mut();
    harness.get_by_label("Add staff member").click();
    harness.run();
    assert!(harness.query_by_label("Name:").is_some());

    ctx.arrange(|state_ctx| {
        state_ctx.update::<StaffInput>(|input| {
            input.name = "Dana Kim".to_owned();
            input.email = "dana@linkup.com".to_owned();
            input.role = Some(StaffRole::Support);
        });
    });
    let harness = ctx.harness_mut();
    harness.get_by_label("Add").click();
    harness.run();

    assert!(harness.query_by_label("Name:").is_none(), "dialog closes on success");
    assert!(harness.query_by_label("Dana Kim").is_some());
    assert!(harness.query_by_label("Staff list updated").is_some());
}

/// Tests that an invalid email keeps the dialog open.
#[test]
fn test_invalid_email_keeps_dialog_open() {
    let mut ctx = TestCtx::signed_in(Route::Staff);
    ctx.harness_mut().run();
    let harness = ctx.harness_mut();
    harness.get_by_label("Add staff member").click();
    harness.run();

    ctx.arrange(|state_ctx| {
        state_ctx.update::<StaffInput>(|input| {
            input.name = "Dana Kim".to_owned();
            input.email = "dana.linkup.com".to_owned();
            input.role = Some(StaffRole::Support);
        });
    });
    let harness = ctx.harness_mut();
    assert!(harness.query_by_label("Email must contain @").is_some());

    harness.get_by_label("Add").click();
    harness.run();

    assert!(harness.query_by_label("Name:").is_some());
    assert!(harness.query_by_label("Dana Kim").is_none());
}

/// Tests that leaving the staff page drops its subscription.
#[test]
fn test_leaving_staff_page_unsubscribes() {
    let mut ctx = TestCtx::signed_in(Route::Staff);
    ctx.harness_mut().run();
    assert_eq!(
        ctx.state_ctx()
            .subscriber_count::<RecordSource<StaffMember>>(),
        1
    );

    ctx.harness_mut().get_by_label("Dashboard").click();
    ctx.harness_mut().run();

    assert_eq!(
        ctx.state_ctx()
            .subscriber_count::<RecordSource<StaffMember>>(),
        0
    );
}
