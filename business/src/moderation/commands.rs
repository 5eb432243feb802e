use std::any::Any;

use linkup_states::{Command, Dep, State, Time, Updater, state_assign_impl};
use log::info;
use ustr::Ustr;

use super::{
    audit::{AuditEntry, AuditLog},
    transitions::{self, Actor},
};
use crate::{
    auth::AuthCompute,
    error::{AdminError, ModerationError, ValidationError},
    notice::Notices,
    query::RecordSource,
    records::{Feedback, Report, User, Verification, VerificationStatus},
};

/// What the moderation dialogs collect before a command runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModerationInput {
    pub target: Option<Ustr>,
    pub reason: String,
    pub verification_status: Option<VerificationStatus>,
    pub note: String,
}

impl ModerationInput {
    pub fn for_target(id: impl Into<Ustr>) -> Self {
        Self {
            target: Some(id.into()),
            ..Self::default()
        }
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = reason.into();
        self
    }

    pub fn with_status(mut self, status: VerificationStatus) -> Self {
        self.verification_status = Some(status);
        self
    }
}

impl State for ModerationInput {
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

struct Context<'a> {
    input: &'a ModerationInput,
    actor: String,
    at: chrono::DateTime<chrono::Utc>,
}

impl<'a> Context<'a> {
    fn read(deps: Dep<'a>) -> Self {
        let actor = deps
            .try_compute::<AuthCompute>()
            .ok()
            .and_then(AuthCompute::user)
            .map_or_else(|| "admin".to_owned(), |user| user.name.clone());
        let at = deps
            .try_state::<Time>()
            .map_or_else(|_| chrono::Utc::now(), Time::now);
        Self {
            input: deps.state::<ModerationInput>(),
            actor,
            at,
        }
    }

    fn actor(&self) -> Actor<'_> {
        Actor {
            name: &self.actor,
            at: self.at,
        }
    }

    fn target(&self) -> Result<&str, ModerationError> {
        self.input
            .target
            .as_ref()
            .map(Ustr::as_str)
            .ok_or_else(|| ValidationError::required("target").into())
    }
}

/// Writes the audit entry and a success notice, or an error notice. Clears the input
/// either way except on validation errors, so the dialog can be corrected.
fn finish(
    deps: Dep<'_>,
    updater: &Updater,
    name: &str,
    outcome: Result<Option<AuditEntry>, ModerationError>,
) {
    let mut notices = deps.state::<Notices>().clone();
    match outcome {
        Ok(Some(entry)) => {
            info!("{name}: {} {} -> {}", entry.record_id, entry.from, entry.to);
            notices.success(format!("{}: {}", entry.action.label(), entry.record_id));
            let mut log = deps.state::<AuditLog>().clone();
            log.push(entry);
            updater.set(log);
            updater.set(ModerationInput::default());
        }
        Ok(None) => {
            info!("{name}: nothing to change");
            updater.set(ModerationInput::default());
        }
        Err(err @ ModerationError::Validation(_)) => {
            notices.error(&AdminError::Moderation(err));
        }
        Err(err) => {
            notices.error(&AdminError::Moderation(err));
            updater.set(ModerationInput::default());
        }
    }
    updater.set(notices);
}

/// Suspends `ModerationInput::target` with `ModerationInput::reason`.
#[derive(Debug, Default)]
pub struct SuspendUserCommand;

impl Command for SuspendUserCommand {
    fn run(&self, deps: Dep<'_>, updater: Updater) {
        let ctx = Context::read(deps);
        let mut users = deps.state::<RecordSource<User>>().clone();
        let outcome = ctx.target().and_then(|id| {
            transitions::suspend_user(&mut users, id, &ctx.input.reason, ctx.actor())
        });
        if outcome.is_ok() {
            updater.set(users);
        }
        finish(deps, &updater, "SuspendUserCommand", outcome.map(Some));
    }
}

#[derive(Debug, Default)]
pub struct ReactivateUserCommand;

impl Command for ReactivateUserCommand {
    fn run(&self, deps: Dep<'_>, updater: Updater) {
        let ctx = Context::read(deps);
        let mut users = deps.state::<RecordSource<User>>().clone();
        let outcome = ctx
            .target()
            .and_then(|id| transitions::reactivate_user(&mut users, id, ctx.actor()));
        if outcome.is_ok() {
            updater.set(users);
        }
        finish(deps, &updater, "ReactivateUserCommand", outcome.map(Some));
    }
}

#[derive(Debug, Default)]
pub struct DeleteUserCommand;

impl Command for DeleteUserCommand {
    fn run(&self, deps: Dep<'_>, updater: Updater) {
        let ctx = Context::read(deps);
        let mut users = deps.state::<RecordSource<User>>().clone();
        let outcome = ctx.target().and_then(|id| {
            transitions::delete_user(&mut users, id, &ctx.input.reason, ctx.actor())
        });
        if outcome.is_ok() {
            updater.set(users);
        }
        finish(deps, &updater, "DeleteUserCommand", outcome.map(Some));
    }
}

/// Needs `ModerationInput::verification_status`; `note` is optional.
#[derive(Debug, Default)]
pub struct SetVerificationStatusCommand;

impl Command for SetVerificationStatusCommand {
    fn run(&self, deps: Dep<'_>, updater: Updater) {
        let ctx = Context::read(deps);
        let mut verifications = deps.state::<RecordSource<Verification>>().clone();
        let mut users = deps.state::<RecordSource<User>>().clone();

        let note = Some(ctx.input.note.trim())
            .filter(|note| !note.is_empty())
            .map(str::to_owned);
        let outcome = ctx.target().and_then(|id| {
            let status = ctx
                .input
                .verification_status
                .ok_or_else(|| ValidationError::required("status"))?;
            transitions::set_verification_status(
                &mut verifications,
                &mut users,
                id,
                status,
                note,
                ctx.actor(),
            )
        });
        if outcome.is_ok() {
            updater.set(verifications);
            updater.set(users);
        }
        finish(deps, &updater, "SetVerificationStatusCommand", outcome.map(Some));
    }
}

#[derive(Debug, Default)]
pub struct MarkReportReadCommand;

impl Command for MarkReportReadCommand {
    fn run(&self, deps: Dep<'_>, updater: Updater) {
        let ctx = Context::read(deps);
        let mut reports = deps.state::<RecordSource<Report>>().clone();
        let outcome = ctx
            .target()
            .and_then(|id| transitions::mark_report_read(&mut reports, id, ctx.actor()));
        if matches!(outcome, Ok(Some(_))) {
            updater.set(reports);
        }
        finish(deps, &updater, "MarkReportReadCommand", outcome);
    }
}

#[derive(Debug, Default)]
pub struct MarkFeedbackReadCommand;

impl Command for MarkFeedbackReadCommand {
    fn run(&self, deps: Dep<'_>, updater: Updater) {
        let ctx = Context::read(deps);
        let mut feedback = deps.state::<RecordSource<Feedback>>().clone();
        let outcome = ctx
            .target()
            .and_then(|id| transitions::mark_feedback_read(&mut feedback, id, ctx.actor()));
        if matches!(outcome, Ok(Some(_))) {
            updater.set(feedback);
        }
        finish(deps, &updater, "MarkFeedbackReadCommand", outcome);
    }
}
