//! Flows through a fully wired `StateCtx`: sign-in, navigation, moderation and staff.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use linkup_business::{
    AdminConfig, AuthCompute, AuthUser, ErrorKind, FileSessionStore, LoginCommand, LoginInput,
    LogoutCommand, MemorySessionStore, NavigateCommand, NavigationInput, NoticeLevel, Notices,
    Records, Route, RouteState, SessionHandle, SessionStore, admin_ctx,
    dashboard::DashboardSummary,
    moderation::{
        AuditAction, AuditLog, MarkReportReadCommand, ModerationInput, ReactivateUserCommand,
        SetVerificationStatusCommand, SuspendUserCommand,
    },
    query::{QueryPage, RecordSource},
    records::{Report, StaffMember, StaffRole, User, Verification, VerificationStatus},
    session::PersistedSession,
    staff::{AddStaffCommand, StaffInput},
    tables::{StaffTable, SuspendedUsersTable, TableQuery, TableView, UsersTable},
};
use linkup_states::{StateCtx, Time};

fn admin() -> AuthUser {
    AuthUser {
        email: "admin@linkup.com".to_owned(),
        name: "Linkup Admin".to_owned(),
    }
}

fn ctx_with(session: SessionHandle, initial: Route) -> StateCtx {
    let mut ctx = admin_ctx(AdminConfig::default(), session, Records::seed(), initial);
    ctx.update::<Time>(|time| time.set(Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap()));
    ctx
}

fn signed_in_ctx() -> StateCtx {
    let store = MemorySessionStore::new();
    store.save(&admin()).unwrap();
    ctx_with(SessionHandle::new(Arc::new(store)), Route::Dashboard)
}

fn last_notice(ctx: &StateCtx) -> (NoticeLevel, Option<ErrorKind>) {
    let notice = ctx.state::<Notices>().latest().unwrap();
    (notice.level, notice.error)
}

mod auth_tests {
    use super::*;

    fn login(ctx: &mut StateCtx, email: &str, password: &str) {
        ctx.update::<LoginInput>(|input| {
            input.email = email.to_owned();
            input.password = password.to_owned();
        });
        ctx.dispatch::<LoginCommand>();
    }

    #[test]
    fn test_protected_route_redirects_and_returns_after_login() {
        let mut ctx = ctx_with(SessionHandle::in_memory(), Route::Verifications);
        assert_eq!(ctx.state::<RouteState>().current(), &Route::Login);

        login(&mut ctx, "admin@linkup.com", "admin123");

        assert!(ctx.cached::<AuthCompute>().unwrap().is_authenticated());
        assert_eq!(ctx.state::<RouteState>().current(), &Route::Verifications);
        assert_eq!(ctx.state::<LoginInput>(), &LoginInput::default());
    }

    #[test]
    fn test_wrong_password_stays_on_login_with_a_notice() {
        let mut ctx = ctx_with(SessionHandle::in_memory(), Route::Dashboard);
        login(&mut ctx, "admin@linkup.com", "wrong");

        let auth = ctx.cached::<AuthCompute>().unwrap();
        assert!(!auth.is_authenticated());
        assert!(auth.status.error().is_some());
        assert_eq!(ctx.state::<RouteState>().current(), &Route::Login);
        assert_eq!(last_notice(&ctx), (NoticeLevel::Error, Some(ErrorKind::Auth)));
    }

    #[test]
    fn test_stored_session_skips_login() {
        let mut ctx = signed_in_ctx();
        assert_eq!(ctx.state::<RouteState>().current(), &Route::Dashboard);

        ctx.update::<NavigationInput>(|nav| nav.target = Some(Route::Login));
        ctx.dispatch::<NavigateCommand>();
        assert_eq!(ctx.state::<RouteState>().current(), &Route::Dashboard);
    }

    #[test]
    fn test_logout_clears_the_session() {
        let store = Arc::new(MemorySessionStore::new());
        store.save(&admin()).unwrap();
        let mut ctx = ctx_with(SessionHandle::new(store.clone()), Route::Users);

        ctx.dispatch::<LogoutCommand>();

        assert_eq!(ctx.state::<RouteState>().current(), &Route::Login);
        assert!(!ctx.cached::<AuthCompute>().unwrap().is_authenticated());
        assert_eq!(store.read().unwrap(), None);
    }

    #[test]
    fn test_unknown_path_is_reachable_signed_out() {
        let mut ctx = ctx_with(SessionHandle::in_memory(), Route::Login);
        ctx.update::<NavigationInput>(|nav| nav.target = Some(Route::parse("/nope")));
        ctx.dispatch::<NavigateCommand>();
        assert_eq!(
            ctx.state::<RouteState>().current(),
            &Route::NotFound("/nope".to_owned())
        );
    }
}

mod session_file_tests {
    use super::*;

    #[test]
    fn test_login_writes_and_restart_restores() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");
        let handle = || SessionHandle::new(Arc::new(FileSessionStore::new(&path)));

        let mut ctx = ctx_with(handle(), Route::Staff);
        ctx.update::<LoginInput>(|input| {
            input.email = "admin@linkup.com".to_owned();
            input.password = "admin123".to_owned();
        });
        ctx.dispatch::<LoginCommand>();

        let json = std::fs::read_to_string(&path).unwrap();
        assert_eq!(PersistedSession::from_json(&json).unwrap().user, admin());

        let restarted = ctx_with(handle(), Route::Staff);
        assert_eq!(restarted.state::<RouteState>().current(), &Route::Staff);
    }

    #[test]
    fn test_old_versions_are_discarded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(
            &path,
            r#"{"version":0,"user":{"email":"admin@linkup.com","name":"Linkup Admin"}}"#,
        )
        .unwrap();

        let ctx = ctx_with(
            SessionHandle::new(Arc::new(FileSessionStore::new(&path))),
            Route::Dashboard,
        );
        assert_eq!(ctx.state::<RouteState>().current(), &Route::Login);
        assert!(!path.exists());
    }
}

mod moderation_tests {
    use super::*;

    #[test]
    fn test_suspending_moves_the_user_between_tables() {
        let mut ctx = signed_in_ctx();
        let active_before = ctx.cached::<TableView<UsersTable>>().unwrap().page().filtered;

        ctx.update::<ModerationInput>(|input| {
            *input = ModerationInput::for_target("u-2").with_reason("Fake profile");
        });
        ctx.dispatch::<SuspendUserCommand>();

        let users = ctx.state::<RecordSource<User>>();
        let suspension = users.get("u-2").unwrap().status.suspension().unwrap();
        assert_eq!(suspension.by, "Linkup Admin");
        assert_eq!(suspension.at, Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap());

        let active = ctx.cached::<TableView<UsersTable>>().unwrap().page();
        assert_eq!(active.filtered, active_before - 1);
        let suspended = ctx.cached::<TableView<SuspendedUsersTable>>().unwrap().page();
        assert!(suspended.rows.iter().any(|u| u.id.as_str() == "u-2"));

        let log = ctx.state::<AuditLog>();
        assert_eq!(log.len(), 1);
        assert_eq!(log.entries()[0].action, AuditAction::SuspendUser);
        assert_eq!(ctx.state::<ModerationInput>(), &ModerationInput::default());
        assert_eq!(last_notice(&ctx), (NoticeLevel::Success, None));
    }

    #[test]
    fn test_missing_reason_keeps_the_dialog_open() {
        let mut ctx = signed_in_ctx();
        let input = ModerationInput::for_target("u-2");
        ctx.update::<ModerationInput>(|current| *current = input.clone());
        ctx.dispatch::<SuspendUserCommand>();

        assert!(ctx.state::<RecordSource<User>>().get("u-2").unwrap().status.is_active());
        assert_eq!(ctx.state::<ModerationInput>(), &input);
        assert!(ctx.state::<AuditLog>().is_empty());
        assert_eq!(last_notice(&ctx), (NoticeLevel::Error, Some(ErrorKind::Validation)));
    }

    #[test]
    fn test_reactivating_an_active_user_is_refused() {
        let mut ctx = signed_in_ctx();
        ctx.update::<ModerationInput>(|input| *input = ModerationInput::for_target("u-1"));
        ctx.dispatch::<ReactivateUserCommand>();

        assert_eq!(last_notice(&ctx), (NoticeLevel::Error, Some(ErrorKind::Moderation)));
        assert_eq!(ctx.state::<ModerationInput>(), &ModerationInput::default());
    }

    #[test]
    fn test_approval_verifies_the_user_and_updates_the_summary() {
        let mut ctx = signed_in_ctx();
        let pending_before = ctx.cached::<DashboardSummary>().unwrap().pending_verifications;

        ctx.update::<ModerationInput>(|input| {
            *input = ModerationInput::for_target("v-2").with_status(VerificationStatus::Approved);
        });
        ctx.dispatch::<SetVerificationStatusCommand>();

        let verification = ctx.state::<RecordSource<Verification>>().get("v-2").unwrap();
        assert_eq!(verification.status, VerificationStatus::Approved);
        assert!(ctx.state::<RecordSource<User>>().get("u-2").unwrap().verified);
        assert_eq!(
            ctx.cached::<DashboardSummary>().unwrap().pending_verifications,
            pending_before - 1
        );
    }

    #[test]
    fn test_marking_read_twice_logs_once() {
        let mut ctx = signed_in_ctx();
        for _ in 0..2 {
            ctx.update::<ModerationInput>(|input| *input = ModerationInput::for_target("r-2"));
            ctx.dispatch::<MarkReportReadCommand>();
        }

        assert!(ctx.state::<RecordSource<Report>>().get("r-2").unwrap().read.is_read());
        assert_eq!(ctx.state::<AuditLog>().len(), 1);
    }

    /// Shows `page` of the users table at `per_page`, then suspends every user on it.
    fn suspend_whole_page(ctx: &mut StateCtx, per_page: usize, page: usize) -> QueryPage<User> {
        ctx.update::<TableQuery<UsersTable>>(|query| {
            query.set_items_per_page(per_page);
            query.query_mut().set_page(page);
        });
        ctx.run_computed();
        let before = ctx.cached::<TableView<UsersTable>>().unwrap().page().clone();
        assert_eq!(before.current_page, page);

        for user in &before.rows {
            ctx.update::<ModerationInput>(|input| {
                *input = ModerationInput::for_target(user.id).with_reason("Spam");
            });
            ctx.dispatch::<SuspendUserCommand>();
        }
        before
    }

    #[test]
    fn test_emptying_the_last_page_lands_on_the_new_last_page() {
        let mut ctx = signed_in_ctx();
        let before = suspend_whole_page(&mut ctx, 3, 3);
        assert_eq!((before.total_pages, before.filtered, before.rows.len()), (3, 7, 1));

        let page = ctx.cached::<TableView<UsersTable>>().unwrap().page();
        assert_eq!(page.filtered, 6);
        assert_eq!((page.current_page, page.total_pages), (2, 2));
        assert_eq!(page.rows.len(), 3);
        assert!(!page.window.is_empty());
    }

    #[test]
    fn test_page_stays_inside_the_range_when_the_source_shrinks() {
        let mut ctx = signed_in_ctx();
        let before = suspend_whole_page(&mut ctx, 5, 2);
        assert_eq!(before.rows.len(), 2);

        let page = ctx.cached::<TableView<UsersTable>>().unwrap().page();
        assert!(page.current_page <= page.total_pages);
        assert_eq!((page.current_page, page.total_pages), (1, 1));
        assert_eq!(page.rows.len(), 5);
        assert!(before.rows.iter().all(|gone| page.rows.iter().all(|u| u.id != gone.id)));
    }
}

mod staff_tests {
    use super::*;

    fn fill(ctx: &mut StateCtx, name: &str, email: &str, role: Option<StaffRole>) {
        ctx.update::<StaffInput>(|input| {
            input.name = name.to_owned();
            input.email = email.to_owned();
            input.role = role;
        });
    }

    #[test]
    fn test_subscribers_hear_about_new_staff() {
        let mut ctx = signed_in_ctx();
        let subscription = ctx.subscribe::<RecordSource<StaffMember>>();
        let view = ctx.subscribe::<TableView<StaffTable>>();

        fill(&mut ctx, "Dana Cruz", "dana@linkup.com", Some(StaffRole::Support));
        ctx.dispatch::<AddStaffCommand>();

        assert!(subscription.has_changed());
        assert!(view.has_changed());
        let page = ctx.cached::<TableView<StaffTable>>().unwrap().page();
        assert!(page.rows.iter().any(|m| m.email == "dana@linkup.com"));
        assert_eq!(ctx.state::<StaffInput>(), &StaffInput::default());

        ctx.unsubscribe(subscription);
        assert_eq!(ctx.subscriber_count::<RecordSource<StaffMember>>(), 0);
    }

    #[test]
    fn test_duplicate_email_is_rejected() {
        let mut ctx = signed_in_ctx();
        let before = ctx.state::<RecordSource<StaffMember>>().len();
        let subscription = ctx.subscribe::<RecordSource<StaffMember>>();

        fill(&mut ctx, "Someone", "PRIYA@linkup.com", Some(StaffRole::Admin));
        ctx.dispatch::<AddStaffCommand>();

        assert!(!subscription.has_changed());
        assert_eq!(ctx.state::<RecordSource<StaffMember>>().len(), before);
        assert_eq!(last_notice(&ctx), (NoticeLevel::Error, Some(ErrorKind::Validation)));
        assert_eq!(ctx.state::<StaffInput>().name, "Someone");
    }
}
