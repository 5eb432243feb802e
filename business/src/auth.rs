//! Sign-in against the configured admin credentials.
//!
//! The login form writes [`LoginInput`]; [`LoginCommand`] checks it, persists the session
//! and moves to the page that was requested before signing in. [`AuthCompute`] caches the
//! result for the rest of the UI.

use std::any::Any;

use linkup_states::{
    Command, Compute, ComputeDeps, Dep, State, Updater, assign_impl, state_assign_impl,
};
use log::{info, warn};

use crate::{
    config::AdminConfig,
    error::{AdminError, AuthError},
    notice::Notices,
    route::RouteState,
    session::{AuthUser, SessionHandle},
};

/// Editable fields of the login form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

impl State for LoginInput {
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

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AuthStatus {
    #[default]
    SignedOut,
    SignedIn(AuthUser),
    /// Last attempt failed; the form stays editable.
    Failed(AuthError),
}

impl AuthStatus {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::SignedIn(_))
    }

    pub fn user(&self) -> Option<&AuthUser> {
        match self {
            Self::SignedIn(user) => Some(user),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<AuthError> {
        match self {
            Self::Failed(err) => Some(*err),
            _ => None,
        }
    }
}

/// Compute-shaped cache for the authentication status.
///
/// `compute()` does nothing: the value only changes through [`LoginCommand`] and
/// [`LogoutCommand`], and is seeded from the stored session at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthCompute {
    pub status: AuthStatus,
}

impl AuthCompute {
    pub fn signed_in(user: AuthUser) -> Self {
        Self {
            status: AuthStatus::SignedIn(user),
        }
    }

    /// Signed in when a session was restored, signed out otherwise.
    pub fn from_session(user: Option<AuthUser>) -> Self {
        user.map(Self::signed_in).unwrap_or_default()
    }

    pub fn is_authenticated(&self) -> bool {
        self.status.is_authenticated()
    }

    pub fn user(&self) -> Option<&AuthUser> {
        self.status.user()
    }
}

impl Compute for AuthCompute {
    fn deps(&self) -> ComputeDeps {
        ComputeDeps::none()
    }

    fn compute(&self, _deps: Dep<'_>, _updater: Updater) {}

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
        assign_impl(self, new_self);
    }
}

/// Checks one credential pair against the configured admin.
///
/// The email is compared case-insensitively, the password exactly.
pub fn authenticate(
    config: &AdminConfig,
    email: &str,
    password: &str,
) -> Result<AuthUser, AuthError> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err(AuthError::MissingCredentials);
    }
    if !email.eq_ignore_ascii_case(config.admin_email()) || password != config.admin_password() {
        return Err(AuthError::InvalidCredentials);
    }
    Ok(AuthUser {
        email: config.admin_email().to_owned(),
        name: config.admin_name().to_owned(),
    })
}

/// Dispatch explicitly via `ctx.dispatch::<LoginCommand>()`.
#[derive(Debug, Default)]
pub struct LoginCommand;

impl Command for LoginCommand {
    fn run(&self, deps: Dep<'_>, updater: Updater) {
        let input = deps.state::<LoginInput>();
        let config = deps.state::<AdminConfig>();
        let mut notices = deps.state::<Notices>().clone();

        let user = match authenticate(config, &input.email, &input.password) {
            Ok(user) => user,
            Err(err) => {
                info!("LoginCommand: rejected: {err}");
                notices.error(&AdminError::Auth(err));
                updater.set(notices);
                updater.set(AuthCompute {
                    status: AuthStatus::Failed(err),
                });
                return;
            }
        };

        if let Err(err) = deps.state::<SessionHandle>().store().save(&user) {
            // still signed in for this run
            warn!("LoginCommand: session not persisted: {err}");
            notices.error(&AdminError::Session(err));
            updater.set(notices);
        }

        let mut routes = deps.state::<RouteState>().clone();
        routes.finish_login();
        info!(
            "LoginCommand: {} signed in, opening {}",
            user.email,
            routes.current()
        );

        updater.set(routes);
        updater.set(LoginInput::default());
        updater.set(AuthCompute::signed_in(user));
    }
}

/// Clears the stored session and returns to the login page.
///
/// Dispatch explicitly via `ctx.dispatch::<LogoutCommand>()`.
#[derive(Debug, Default)]
pub struct LogoutCommand;

impl Command for LogoutCommand {
    fn run(&self, deps: Dep<'_>, updater: Updater) {
        if let Err(err) = deps.state::<SessionHandle>().store().clear() {
            warn!("LogoutCommand: session not cleared: {err}");
            let mut notices = deps.state::<Notices>().clone();
            notices.error(&AdminError::Session(err));
            updater.set(notices);
        }

        let mut routes = deps.state::<RouteState>().clone();
        routes.sign_out();
        info!("LogoutCommand: signed out");

        updater.set(routes);
        updater.set(AuthCompute::default());
    }
}
