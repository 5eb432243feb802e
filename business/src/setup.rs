//! Registers every state, compute and command of the dashboard in one [`StateCtx`].

use linkup_states::{StateCtx, Time};
use log::info;

use crate::{
    auth::{AuthCompute, LoginCommand, LoginInput, LogoutCommand},
    config::AdminConfig,
    dashboard::{DashboardSummary, LinkupStats},
    moderation::{
        AuditLog, DeleteUserCommand, MarkFeedbackReadCommand, MarkReportReadCommand,
        ModerationInput, ReactivateUserCommand, SetVerificationStatusCommand, SuspendUserCommand,
    },
    notice::Notices,
    query::RecordSource,
    records::{Feedback, Linkup, Report, StaffMember, User, Verification},
    route::{NavigateCommand, NavigationInput, Route, RouteState},
    seed,
    session::SessionHandle,
    staff::{AddStaffCommand, StaffInput},
    tables::{
        DeletedUsersTable, FeedbackTable, FriendsTable, LinkupReportsTable, LinkupsTable,
        StaffTable, SuspendedUsersTable, Table, TableQuery, TableView, UserLinkupsTable,
        UserReportsTable, UsersTable, VerificationsTable,
    },
};

/// The records the context starts with.
#[derive(Debug, Clone, Default)]
pub struct Records {
    pub users: Vec<User>,
    pub linkups: Vec<Linkup>,
    pub reports: Vec<Report>,
    pub verifications: Vec<Verification>,
    pub feedback: Vec<Feedback>,
    pub staff: Vec<StaffMember>,
}

impl Records {
    pub fn seed() -> Self {
        Self {
            users: seed::users(),
            linkups: seed::linkups(),
            reports: seed::reports(),
            verifications: seed::verifications(),
            feedback: seed::feedback(),
            staff: seed::staff(),
        }
    }
}

fn register_table<T: Table>(ctx: &mut StateCtx, page_size: usize) {
    ctx.add_state(TableQuery::<T>::with_page_size(page_size));
    ctx.record_compute(TableView::<T>::default());
}

/// Builds the context and opens `initial`, restoring the stored session first.
pub fn admin_ctx(
    config: AdminConfig,
    session: SessionHandle,
    records: Records,
    initial: Route,
) -> StateCtx {
    let mut ctx = StateCtx::new();
    let page_size = config.page_size();

    let auth = AuthCompute::from_session(session.store().load());
    let mut routes = RouteState::default();
    routes.resolve(initial, auth.is_authenticated());
    let restored = if auth.is_authenticated() {
        "session restored"
    } else {
        "signed out"
    };
    info!("Starting at {} ({restored})", routes.current());

    ctx.add_state(Time::default());
    ctx.add_state(config);
    ctx.add_state(session);
    ctx.add_state(Notices::default());
    ctx.add_state(AuditLog::default());
    ctx.add_state(LoginInput::default());
    ctx.add_state(NavigationInput::default());
    ctx.add_state(routes);
    ctx.add_state(ModerationInput::default());
    ctx.add_state(StaffInput::default());

    let Records {
        users,
        linkups,
        reports,
        verifications,
        feedback,
        staff,
    } = records;
    ctx.add_state(RecordSource::new(users));
    ctx.add_state(RecordSource::new(linkups));
    ctx.add_state(RecordSource::new(reports));
    ctx.add_state(RecordSource::new(verifications));
    ctx.add_state(RecordSource::new(feedback));
    ctx.add_state(RecordSource::new(staff));

    ctx.record_compute(auth);
    ctx.record_compute(DashboardSummary::default());
    ctx.record_compute(LinkupStats::default());

    register_table::<UsersTable>(&mut ctx, page_size);
    register_table::<SuspendedUsersTable>(&mut ctx, page_size);
    register_table::<DeletedUsersTable>(&mut ctx, page_size);
    register_table::<FriendsTable>(&mut ctx, page_size);
    register_table::<UserReportsTable>(&mut ctx, page_size);
    register_table::<LinkupsTable>(&mut ctx, page_size);
    register_table::<UserLinkupsTable>(&mut ctx, page_size);
    register_table::<LinkupReportsTable>(&mut ctx, page_size);
    register_table::<VerificationsTable>(&mut ctx, page_size);
    register_table::<FeedbackTable>(&mut ctx, page_size);
    register_table::<StaffTable>(&mut ctx, page_size);

    ctx.record_command(LoginCommand);
    ctx.record_command(LogoutCommand);
    ctx.record_command(NavigateCommand);
    ctx.record_command(SuspendUserCommand);
    ctx.record_command(ReactivateUserCommand);
    ctx.record_command(DeleteUserCommand);
    ctx.record_command(SetVerificationStatusCommand);
    ctx.record_command(MarkReportReadCommand);
    ctx.record_command(MarkFeedbackReadCommand);
    ctx.record_command(AddStaffCommand);

    ctx.run_computed();
    ctx
}
