//! Modal dialogs for moderation and staff actions.
//!
//! A dialog edits the shared input state and dispatches its command on confirm. It closes
//! when the command reset the input, which only happens on success; on failure it stays
//! open with the input intact and the error shows as a notice.

use egui::{ComboBox, RichText, TextEdit, Ui, Window};
use linkup_business::{
    moderation::{
        DeleteUserCommand, ModerationInput, ReactivateUserCommand, SetVerificationStatusCommand,
        SuspendUserCommand,
    },
    query::RecordSource,
    records::{StaffRole, User, Verification, VerificationStatus},
    staff::{AddStaffCommand, StaffInput},
};
use linkup_states::{Command, StateCtx};
use ustr::Ustr;

use crate::{
    state::{Dialog, State},
    utils::colors::{COLOR_RED, verification_status},
};

/// Open `dialog` with a fresh input.
pub fn open_dialog(state: &mut State, dialog: Dialog) {
    match &dialog {
        Dialog::None => {}
        Dialog::AddStaff => state.ctx.update::<StaffInput>(|input| *input = StaffInput::default()),
        Dialog::Suspend(id) | Dialog::Delete(id) | Dialog::Reactivate(id) | Dialog::Review(id) => {
            let id = *id;
            state
                .ctx
                .update::<ModerationInput>(|input| *input = ModerationInput::for_target(id));
        }
    }
    state.dialog = dialog;
}

/// Shows the open dialog, if any.
pub fn dialogs(state: &mut State, ctx: &egui::Context) {
    let dialog = state.dialog.clone();
    let keep_open = match &dialog {
        Dialog::None => return,
        Dialog::Suspend(id) => {
            let title = format!("Suspend {}", user_name(&state.ctx, *id));
            reason_dialog::<SuspendUserCommand>(&mut state.ctx, ctx, &title, "Suspend user")
        }
        Dialog::Delete(id) => {
            let title = format!("Delete {}", user_name(&state.ctx, *id));
            reason_dialog::<DeleteUserCommand>(&mut state.ctx, ctx, &title, "Delete user")
        }
        Dialog::Reactivate(id) => {
            let title = format!("Reactivate {}", user_name(&state.ctx, *id));
            reactivate_dialog(&mut state.ctx, ctx, &title)
        }
        Dialog::Review(id) => review_dialog(&mut state.ctx, ctx, *id),
        Dialog::AddStaff => add_staff_dialog(&mut state.ctx, ctx),
    };

    if !keep_open {
        state.dialog = Dialog::None;
    }
}

fn user_name(state_ctx: &StateCtx, id: Ustr) -> String {
    state_ctx
        .state::<RecordSource<User>>()
        .get(&id)
        .map_or_else(|| id.to_string(), |user| user.name.clone())
}

/// `true` while the input still targets a record, i.e. the command has not succeeded.
fn pending(state_ctx: &StateCtx) -> bool {
    state_ctx.state::<ModerationInput>().target.is_some()
}

enum Outcome {
    Open,
    Confirm,
    Cancel,
}

fn buttons(ui: &mut Ui, confirm: &str) -> Outcome {
    let mut outcome = Outcome::Open;
    ui.horizontal(|ui| {
        if ui.button("Cancel").clicked() {
            outcome = Outcome::Cancel;
        }
        ui.add_space(8.0);
        if ui.button(RichText::new(confirm).strong()).clicked() {
            outcome = Outcome::Confirm;
        }
    });
    outcome
}

/// Runs `C` on confirm. Returns whether the dialog stays open.
fn finish<C: Command>(state_ctx: &mut StateCtx, open: bool, outcome: Outcome) -> bool {
    match outcome {
        Outcome::Cancel => false,
        Outcome::Open => open,
        Outcome::Confirm => {
            state_ctx.dispatch::<C>();
            pending(state_ctx)
        }
    }
}

fn reason_dialog<C: Command>(
    state_ctx: &mut StateCtx,
    ctx: &egui::Context,
    title: &str,
    confirm: &str,
) -> bool {
    let mut open = true;
    let mut outcome = Outcome::Open;

    Window::new(title)
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .show(ctx, |ui| {
            ui.label("Reason (required):");
            let mut reason = state_ctx.state::<ModerationInput>().reason.clone();
            if ui
                .add(TextEdit::multiline(&mut reason).desired_rows(3))
                .changed()
            {
                state_ctx.update::<ModerationInput>(|input| input.reason = reason);
            }
            ui.add_space(12.0);
            outcome = buttons(ui, confirm);
        });

    finish::<C>(state_ctx, open, outcome)
}

fn reactivate_dialog(state_ctx: &mut StateCtx, ctx: &egui::Context, title: &str) -> bool {
    let mut open = true;
    let mut outcome = Outcome::Open;

    Window::new(title)
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .show(ctx, |ui| {
            ui.label("The user will be able to sign in and use Linkup again.");
            ui.add_space(12.0);
            outcome = buttons(ui, "Reactivate user");
        });

    finish::<ReactivateUserCommand>(state_ctx, open, outcome)
}

fn review_dialog(state_ctx: &mut StateCtx, ctx: &egui::Context, id: Ustr) -> bool {
    let Some(verification) = state_ctx.state::<RecordSource<Verification>>().get(&id).cloned()
    else {
        return false;
    };

    let mut open = true;
    let mut outcome = Outcome::Open;
    Window::new(format!("Review {}", verification.user_name))
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .show(ctx, |ui| {
            ui.label(format!("Document: {}", verification.document));
            ui.label(
                RichText::new(format!("Currently {}", verification.status.label()))
                    .color(verification_status(verification.status)),
            );
            ui.add_space(8.0);

            let input = state_ctx.state::<ModerationInput>().clone();
            let mut status = input.verification_status;
            ui.horizontal(|ui| {
                for option in VerificationStatus::ALL {
                    ui.radio_value(&mut status, Some(option), option.label());
                }
            });
            ui.label("Note:");
            let mut note = input.note.clone();
            ui.add(TextEdit::multiline(&mut note).desired_rows(2));
            if status != input.verification_status || note != input.note {
                state_ctx.update::<ModerationInput>(|input| {
                    input.verification_status = status;
                    input.note = note;
                });
            }

            ui.add_space(12.0);
            outcome = buttons(ui, "Save");
        });

    finish::<SetVerificationStatusCommand>(state_ctx, open, outcome)
}

fn add_staff_dialog(state_ctx: &mut StateCtx, ctx: &egui::Context) -> bool {
    let mut open = true;
    let mut outcome = Outcome::Open;

    Window::new("Add staff member")
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .show(ctx, |ui| {
            let input = state_ctx.state::<StaffInput>().clone();
            let mut edited = input.clone();

            egui::Grid::new("add_staff_form")
                .num_columns(2)
                .spacing([8.0, 8.0])
                .show(ui, |ui| {
                    ui.label("Name:");
                    ui.text_edit_singleline(&mut edited.name);
                    ui.end_row();

                    ui.label("Email:");
                    ui.text_edit_singleline(&mut edited.email);
                    ui.end_row();

                    ui.label("Role:");
                    ComboBox::from_id_salt("staff_role")
                        .selected_text(edited.role.map_or("Choose…", StaffRole::label))
                        .show_ui(ui, |ui| {
                            for role in StaffRole::ALL {
                                ui.selectable_value(&mut edited.role, Some(role), role.label());
                            }
                        });
                    ui.end_row();
                });

            if edited != input {
                state_ctx.update::<StaffInput>(|input| *input = edited);
            }

            if !input.email.is_empty() && !input.email.contains('@') {
                ui.colored_label(COLOR_RED, "Email must contain @");
            }
            ui.add_space(12.0);
            outcome = buttons(ui, "Add");
        });

    match outcome {
        Outcome::Cancel => false,
        Outcome::Open => open,
        Outcome::Confirm => {
            state_ctx.dispatch::<AddStaffCommand>();
            state_ctx.state::<StaffInput>() != &StaffInput::default()
        }
    }
}
