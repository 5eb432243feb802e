//! User lists, the per-status views and the user detail page.

use egui::{RichText, Ui};
use linkup_business::{
    Route,
    error::RenderError,
    moderation::AuditLog,
    query::RecordSource,
    records::{User, UserField, UserStatus},
    tables::{
        DeletedUsersTable, FriendsTable, SuspendedUsersTable, Table, TableQuery, UserLinkupsTable,
        UserReportsTable, UsersTable,
    },
};
use linkup_states::Time;
use ustr::Ustr;

use super::{linkups::linkup_columns, reports::report_columns};
use crate::{
    format,
    state::{Dialog, State},
    utils::colors,
    widgets::{ColumnDef, RowAction, apply, filters, record_table, table::scope_table},
};

const GENDERS: [(&str, &str); 3] = [("female", "Female"), ("male", "Male"), ("other", "Other")];

fn name_cell(user: &User, ui: &mut Ui) -> Option<RowAction> {
    ui.link(&user.name)
        .clicked()
        .then(|| RowAction::Open(Route::UserDetail(user.id)))
}

fn username_cell(user: &User, ui: &mut Ui) -> Option<RowAction> {
    ui.label(format!("@{}", user.username));
    None
}

fn email_cell(user: &User, ui: &mut Ui) -> Option<RowAction> {
    ui.label(&user.email);
    None
}

fn age_cell(user: &User, ui: &mut Ui) -> Option<RowAction> {
    ui.label(user.age.to_string());
    None
}

fn city_cell(user: &User, ui: &mut Ui) -> Option<RowAction> {
    ui.label(&user.city);
    None
}

fn joined_cell(user: &User, ui: &mut Ui) -> Option<RowAction> {
    ui.label(format::date(user.joined_at));
    None
}

fn verified_cell(user: &User, ui: &mut Ui) -> Option<RowAction> {
    if user.verified {
        ui.label(RichText::new("✔ Verified").color(colors::COLOR_GREEN));
    } else {
        ui.label(RichText::new("—").weak());
    }
    None
}

fn linkups_cell(user: &User, ui: &mut Ui) -> Option<RowAction> {
    ui.label(user.linkups_created.to_string());
    None
}

fn status_cell(user: &User, ui: &mut Ui) -> Option<RowAction> {
    ui.label(RichText::new(user.status.label()).color(colors::user_status(&user.status)));
    None
}

fn reason_cell(user: &User, ui: &mut Ui) -> Option<RowAction> {
    let reason = match &user.status {
        UserStatus::Active => "",
        UserStatus::Suspended(suspension) => suspension.reason.as_str(),
        UserStatus::Deleted(deletion) => deletion.reason.as_str(),
    };
    ui.label(reason);
    None
}

fn changed_cell(user: &User, ui: &mut Ui) -> Option<RowAction> {
    let (at, by) = match &user.status {
        UserStatus::Active => return None,
        UserStatus::Suspended(suspension) => (suspension.at, &suspension.by),
        UserStatus::Deleted(deletion) => (deletion.at, &deletion.by),
    };
    ui.label(format!("{} by {by}", format::date(at)));
    None
}

fn manage_cell(user: &User, ui: &mut Ui) -> Option<RowAction> {
    let mut action = None;
    ui.horizontal(|ui| action = status_buttons(user, ui));
    action
}

/// The status changes allowed from the user's current status.
fn status_buttons(user: &User, ui: &mut Ui) -> Option<RowAction> {
    let mut action = None;
    match user.status {
        UserStatus::Active => {
            if ui.button("Suspend").clicked() {
                action = Some(RowAction::Dialog(Dialog::Suspend(user.id)));
            }
            if ui.button("Delete").clicked() {
                action = Some(RowAction::Dialog(Dialog::Delete(user.id)));
            }
        }
        UserStatus::Suspended(_) => {
            if ui.button("Reactivate").clicked() {
                action = Some(RowAction::Dialog(Dialog::Reactivate(user.id)));
            }
            if ui.button("Delete").clicked() {
                action = Some(RowAction::Dialog(Dialog::Delete(user.id)));
            }
        }
        UserStatus::Deleted(_) => {}
    }
    action
}

fn user_columns() -> Vec<ColumnDef<User>> {
    vec![
        ColumnDef::sorted("Name", UserField::Name, name_cell),
        ColumnDef::sorted("Username", UserField::Username, username_cell),
        ColumnDef::sorted("Email", UserField::Email, email_cell),
        ColumnDef::sorted("Age", UserField::Age, age_cell),
        ColumnDef::sorted("City", UserField::City, city_cell),
        ColumnDef::sorted("Joined", UserField::JoinedAt, joined_cell),
        ColumnDef::sorted("Verified", UserField::Verified, verified_cell),
        ColumnDef::sorted("Linkups", UserField::LinkupsCreated, linkups_cell),
    ]
}

fn user_filters<T: Table<Record = User>>(
    now: chrono::DateTime<chrono::Utc>,
) -> impl FnOnce(&mut Ui, &mut TableQuery<T>) {
    move |ui, edited| {
        filters::search_box(ui, edited);
        filters::selection_filter(ui, edited, "Gender", UserField::Gender, &GENDERS);
        filters::flag_filter(ui, edited, "Verified", UserField::Verified);
        filters::range_filter(ui, edited, "Age", UserField::Age);
        filters::date_filter(ui, edited, "Joined", UserField::JoinedAt, now);
        filters::clear_filters(ui, edited);
    }
}

pub fn users_page(state: &mut State, ui: &mut Ui) -> Result<(), RenderError> {
    ui.heading(UsersTable::TITLE);
    let now = state.ctx.state::<Time>().now();
    let columns = user_columns();
    let action = record_table::<UsersTable>(&mut state.ctx, ui, &columns, user_filters(now));
    if let Some(action) = action {
        apply(state, action);
    }
    Ok(())
}

pub fn user_management_page(state: &mut State, ui: &mut Ui) -> Result<(), RenderError> {
    ui.heading("User management");
    ui.label("Suspend or delete active users. A reason is required for both.");
    ui.add_space(8.0);

    let now = state.ctx.state::<Time>().now();
    let mut columns = user_columns();
    columns.truncate(3);
    columns.push(ColumnDef::sorted("Status", UserField::Status, status_cell));
    columns.push(ColumnDef::plain("Actions", manage_cell));

    let action = record_table::<UsersTable>(&mut state.ctx, ui, &columns, user_filters(now));
    if let Some(action) = action {
        apply(state, action);
    }
    Ok(())
}

pub fn suspended_users_page(state: &mut State, ui: &mut Ui) -> Result<(), RenderError> {
    ui.heading(SuspendedUsersTable::TITLE);
    let columns = [
        ColumnDef::sorted("Name", UserField::Name, name_cell),
        ColumnDef::sorted("Email", UserField::Email, email_cell),
        ColumnDef::sorted("Reason", UserField::StatusReason, reason_cell),
        ColumnDef::sorted("Suspended", UserField::StatusChangedAt, changed_cell),
        ColumnDef::plain("Actions", manage_cell),
    ];
    let action = record_table::<SuspendedUsersTable>(&mut state.ctx, ui, &columns, |ui, edited| {
        filters::search_box(ui, edited);
        filters::clear_filters(ui, edited);
    });
    if let Some(action) = action {
        apply(state, action);
    }
    Ok(())
}

pub fn deleted_users_page(state: &mut State, ui: &mut Ui) -> Result<(), RenderError> {
    ui.heading(DeletedUsersTable::TITLE);
    let columns = [
        ColumnDef::sorted("Name", UserField::Name, name_cell),
        ColumnDef::sorted("Email", UserField::Email, email_cell),
        ColumnDef::sorted("Reason", UserField::StatusReason, reason_cell),
        ColumnDef::sorted("Deleted", UserField::StatusChangedAt, changed_cell),
    ];
    let action = record_table::<DeletedUsersTable>(&mut state.ctx, ui, &columns, |ui, edited| {
        filters::search_box(ui, edited);
        filters::clear_filters(ui, edited);
    });
    if let Some(action) = action {
        apply(state, action);
    }
    Ok(())
}

pub fn user_detail_page(state: &mut State, ui: &mut Ui, id: Ustr) -> Result<(), RenderError> {
    let user = state
        .ctx
        .state::<RecordSource<User>>()
        .get(&id)
        .cloned()
        .ok_or_else(|| RenderError::MissingRecord {
            kind: "user",
            id: id.to_string(),
        })?;

    scope_table::<FriendsTable>(&mut state.ctx, Some(id));
    scope_table::<UserLinkupsTable>(&mut state.ctx, Some(id));
    scope_table::<UserReportsTable>(&mut state.ctx, Some(id));

    let mut action = None;

    ui.horizontal(|ui| {
        ui.heading(&user.name);
        status_cell(&user, ui);
        if user.verified {
            verified_cell(&user, ui);
        }
    });
    egui::Grid::new("user_profile")
        .num_columns(2)
        .spacing([24.0, 4.0])
        .show(ui, |ui| {
            for (label, value) in [
                ("Username", format!("@{}", user.username)),
                ("Email", user.email.clone()),
                ("Age", user.age.to_string()),
                ("Gender", user.gender.clone()),
                ("City", user.city.clone()),
                ("Joined", format::date(user.joined_at)),
                ("Last active", format::maybe_date(user.last_active)),
                ("Linkups created", user.linkups_created.to_string()),
            ] {
                ui.label(RichText::new(label).weak());
                ui.label(value);
                ui.end_row();
            }
        });
    if let Some(suspension) = user.status.suspension() {
        ui.label(format!(
            "Suspended {} by {}: {}",
            format::date(suspension.at),
            suspension.by,
            suspension.reason
        ));
    }
    if let Some(deletion) = user.status.deletion() {
        ui.label(format!(
            "Deleted {} by {}: {}",
            format::date(deletion.at),
            deletion.by,
            deletion.reason
        ));
    }
    ui.horizontal(|ui| action = status_buttons(&user, ui));

    ui.separator();
    ui.heading(FriendsTable::TITLE);
    let friends = [
        ColumnDef::sorted("Name", UserField::Name, name_cell),
        ColumnDef::sorted("City", UserField::City, city_cell),
        ColumnDef::sorted("Status", UserField::Status, status_cell),
    ];
    let friend_action = record_table::<FriendsTable>(&mut state.ctx, ui, &friends, |ui, edited| {
        filters::search_box(ui, edited);
    });
    action = action.or(friend_action);

    ui.separator();
    ui.heading(UserLinkupsTable::TITLE);
    let linkups_action =
        record_table::<UserLinkupsTable>(&mut state.ctx, ui, &linkup_columns(), |_, _| {});
    action = action.or(linkups_action);

    ui.separator();
    ui.heading("Reports about this user");
    let reports_action =
        record_table::<UserReportsTable>(&mut state.ctx, ui, &report_columns(), |_, _| {});
    action = action.or(reports_action);

    history(state, ui, id);

    if let Some(action) = action {
        apply(state, action);
    }
    Ok(())
}

/// Audit entries for one record, newest first.
pub fn history(state: &State, ui: &mut Ui, id: Ustr) {
    let log = state.ctx.state::<AuditLog>();
    let mut entries: Vec<_> = log.for_record(&id).collect();
    if entries.is_empty() {
        return;
    }
    entries.reverse();

    ui.separator();
    ui.heading("History");
    for entry in entries {
        let reason = entry
            .reason
            .as_deref()
            .map(|reason| format!(": {reason}"))
            .unwrap_or_default();
        ui.label(format!(
            "{} {} by {} ({} → {}){reason}",
            format::date_time(entry.at),
            entry.action.label(),
            entry.actor,
            entry.from,
            entry.to,
        ));
    }
}
