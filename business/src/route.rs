//! Page routes and the sign-in guard.

use std::{any::Any, fmt};

use linkup_states::{Command, Dep, State, Updater, state_assign_impl};
use log::{debug, info};
use ustr::Ustr;

use crate::auth::AuthCompute;

/// Every page of the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Route {
    #[default]
    Login,
    Dashboard,
    Users,
    UserDetail(Ustr),
    UserManagement,
    UserReports,
    SuspendedUsers,
    DeletedUsers,
    Linkups,
    LinkupDetail(Ustr),
    LinkupManagement,
    LinkupStatistics,
    LinkupReports,
    ReportsUsers,
    ReportsLinkups,
    Verifications,
    Feedback,
    Settings,
    AdminSettings,
    Staff,
    Account,
    /// Catch-all, keeps the path that was asked for.
    NotFound(String),
}

impl Route {
    /// Trailing slashes are ignored. Unknown paths become [`Route::NotFound`].
    pub fn parse(path: &str) -> Self {
        let trimmed = path.trim().trim_end_matches('/');
        let segments: Vec<&str> = trimmed.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Self::Dashboard,
            ["login"] => Self::Login,
            ["users"] => Self::Users,
            ["users", "management"] => Self::UserManagement,
            ["users", "reports"] => Self::UserReports,
            ["users", "suspended"] => Self::SuspendedUsers,
            ["users", "deleted"] => Self::DeletedUsers,
            ["users", id] => Self::UserDetail(Ustr::from(id)),
            ["linkups"] => Self::Linkups,
            ["linkups", "management"] => Self::LinkupManagement,
            ["linkups", "statistics"] => Self::LinkupStatistics,
            ["linkups", "reports"] => Self::LinkupReports,
            ["linkups", id] => Self::LinkupDetail(Ustr::from(id)),
            ["reports", "users"] => Self::ReportsUsers,
            ["reports", "linkups"] => Self::ReportsLinkups,
            ["verifications"] => Self::Verifications,
            ["feedback"] => Self::Feedback,
            ["settings"] => Self::Settings,
            ["settings", "admin"] => Self::AdminSettings,
            ["staff"] => Self::Staff,
            ["account"] => Self::Account,
            _ => Self::NotFound(path.to_owned()),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Self::Login => "/login".to_owned(),
            Self::Dashboard => "/".to_owned(),
            Self::Users => "/users".to_owned(),
            Self::UserDetail(id) => format!("/users/{id}"),
            Self::UserManagement => "/users/management".to_owned(),
            Self::UserReports => "/users/reports".to_owned(),
            Self::SuspendedUsers => "/users/suspended".to_owned(),
            Self::DeletedUsers => "/users/deleted".to_owned(),
            Self::Linkups => "/linkups".to_owned(),
            Self::LinkupDetail(id) => format!("/linkups/{id}"),
            Self::LinkupManagement => "/linkups/management".to_owned(),
            Self::LinkupStatistics => "/linkups/statistics".to_owned(),
            Self::LinkupReports => "/linkups/reports".to_owned(),
            Self::ReportsUsers => "/reports/users".to_owned(),
            Self::ReportsLinkups => "/reports/linkups".to_owned(),
            Self::Verifications => "/verifications".to_owned(),
            Self::Feedback => "/feedback".to_owned(),
            Self::Settings => "/settings".to_owned(),
            Self::AdminSettings => "/settings/admin".to_owned(),
            Self::Staff => "/staff".to_owned(),
            Self::Account => "/account".to_owned(),
            Self::NotFound(path) => path.clone(),
        }
    }

    /// Everything but the login page and the not-found page needs a signed-in admin.
    pub fn is_protected(&self) -> bool {
        !matches!(self, Self::Login | Self::NotFound(_))
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Login => "Sign in",
            Self::Dashboard => "Dashboard",
            Self::Users => "Users",
            Self::UserDetail(_) => "User",
            Self::UserManagement => "User management",
            Self::UserReports => "User reports",
            Self::SuspendedUsers => "Suspended users",
            Self::DeletedUsers => "Deleted users",
            Self::Linkups => "Linkups",
            Self::LinkupDetail(_) => "Linkup",
            Self::LinkupManagement => "Linkup management",
            Self::LinkupStatistics => "Linkup statistics",
            Self::LinkupReports => "Linkup reports",
            Self::ReportsUsers => "Reported users",
            Self::ReportsLinkups => "Reported linkups",
            Self::Verifications => "Verifications",
            Self::Feedback => "Feedback",
            Self::Settings => "Settings",
            Self::AdminSettings => "Admin settings",
            Self::Staff => "Staff",
            Self::Account => "Account",
            Self::NotFound(_) => "Not found",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Outcome of the sign-in guard for a requested route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Guard {
    Allow(Route),
    /// Signed out on a protected page; `from` is where to go after signing in.
    ToLogin { from: Route },
    /// Signed in but asked for the login page.
    ToDashboard,
}

pub fn guard(requested: Route, authenticated: bool) -> Guard {
    match (requested.is_protected(), authenticated, requested == Route::Login) {
        (true, false, _) => Guard::ToLogin { from: requested },
        (false, true, true) => Guard::ToDashboard,
        _ => Guard::Allow(requested),
    }
}

/// The page on screen and where to return after signing in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteState {
    current: Route,
    redirect: Option<Route>,
}

impl RouteState {
    pub fn at(route: Route) -> Self {
        Self {
            current: route,
            redirect: None,
        }
    }

    pub fn current(&self) -> &Route {
        &self.current
    }

    pub fn redirect(&self) -> Option<&Route> {
        self.redirect.as_ref()
    }

    /// Move to `requested`, applying the sign-in guard.
    pub fn resolve(&mut self, requested: Route, authenticated: bool) {
        match guard(requested, authenticated) {
            Guard::Allow(route) => self.current = route,
            Guard::ToLogin { from } => {
                debug!("{from} needs a signed-in admin, redirecting to /login");
                self.redirect = Some(from);
                self.current = Route::Login;
            }
            Guard::ToDashboard => self.current = Route::Dashboard,
        }
    }

    /// After a successful login: go to the preserved route, or the dashboard.
    pub fn finish_login(&mut self) {
        self.current = self.redirect.take().unwrap_or(Route::Dashboard);
    }

    pub fn sign_out(&mut self) {
        self.current = Route::Login;
        self.redirect = None;
    }
}

impl State for RouteState {
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

/// Where the UI wants to go next.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationInput {
    pub target: Option<Route>,
}

impl State for NavigationInput {
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

/// Applies [`NavigationInput`] through the sign-in guard.
///
/// Dispatch explicitly via `ctx.dispatch::<NavigateCommand>()`.
#[derive(Debug, Default)]
pub struct NavigateCommand;

impl Command for NavigateCommand {
    fn run(&self, deps: Dep<'_>, updater: Updater) {
        let Some(target) = deps.state::<NavigationInput>().target.clone() else {
            return;
        };
        let authenticated = deps
            .try_compute::<AuthCompute>()
            .is_ok_and(AuthCompute::is_authenticated);

        let mut routes = deps.state::<RouteState>().clone();
        routes.resolve(target, authenticated);
        info!("NavigateCommand: now at {}", routes.current());
        updater.set(routes);
        updater.set(NavigationInput::default());
    }
}
