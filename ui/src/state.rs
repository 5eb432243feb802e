use linkup_business::{AdminConfig, Records, Route, SessionHandle, admin_ctx};
use linkup_states::{StateCtx, Subscription};
use ustr::Ustr;

/// Which dialog is on screen, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Dialog {
    #[default]
    None,
    Suspend(Ustr),
    Delete(Ustr),
    Reactivate(Ustr),
    Review(Ustr),
    AddStaff,
}

/// The main application state.
pub struct State {
    /// Business states, computes and commands.
    pub ctx: StateCtx,
    pub dialog: Dialog,
    /// Held while the staff page is open.
    pub staff_changes: Option<Subscription>,
    /// Set when the staff list changed since the page was opened.
    pub staff_updated: bool,
}

impl State {
    pub fn new(config: AdminConfig, session: SessionHandle, initial: Route) -> Self {
        Self::from_ctx(admin_ctx(config, session, Records::seed(), initial))
    }

    /// Default credentials, an in-memory session and the seed records.
    pub fn test(initial: Route) -> Self {
        Self::new(AdminConfig::new_for_test(), SessionHandle::in_memory(), initial)
    }

    pub fn from_ctx(ctx: StateCtx) -> Self {
        Self {
            ctx,
            dialog: Dialog::None,
            staff_changes: None,
            staff_updated: false,
        }
    }
}
