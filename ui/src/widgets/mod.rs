pub mod dialogs;
mod error_boundary;
pub mod filters;
mod login;
pub mod nav;
mod notices;
pub mod pager;
pub mod shell;
pub mod table;

use linkup_business::{
    Route,
    moderation::{MarkFeedbackReadCommand, MarkReportReadCommand, ModerationInput},
};
use ustr::Ustr;

use crate::state::{Dialog, State};

pub use dialogs::{dialogs, open_dialog};
pub use error_boundary::error_boundary;
pub use login::login_widget;
pub use nav::{nav_link, navigate};
pub use notices::notices;
pub use table::{ColumnDef, record_table};

/// What a table cell asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowAction {
    Open(Route),
    Dialog(Dialog),
    MarkReportRead(Ustr),
    MarkFeedbackRead(Ustr),
}

pub fn apply(state: &mut State, action: RowAction) {
    match action {
        RowAction::Open(route) => navigate(&mut state.ctx, route),
        RowAction::Dialog(dialog) => open_dialog(state, dialog),
        RowAction::MarkReportRead(id) => {
            state
                .ctx
                .update::<ModerationInput>(|input| *input = ModerationInput::for_target(id));
            state.ctx.dispatch::<MarkReportReadCommand>();
        }
        RowAction::MarkFeedbackRead(id) => {
            state
                .ctx
                .update::<ModerationInput>(|input| *input = ModerationInput::for_target(id));
            state.ctx.dispatch::<MarkFeedbackReadCommand>();
        }
    }
}
