use egui::{RichText, Ui};
use linkup_business::{
    error::RenderError,
    records::{StaffField, StaffMember},
    tables::{StaffTable, Table},
};
use linkup_states::Subscription;

use crate::{
    format,
    state::{Dialog, State},
    utils::colors::COLOR_GREEN,
    widgets::{ColumnDef, RowAction, apply, filters, open_dialog, record_table},
};

const ROLES: [(&str, &str); 3] = [
    ("admin", "Admin"),
    ("moderator", "Moderator"),
    ("support", "Support"),
];

fn name_cell(member: &StaffMember, ui: &mut Ui) -> Option<RowAction> {
    ui.label(&member.name);
    None
}

fn email_cell(member: &StaffMember, ui: &mut Ui) -> Option<RowAction> {
    ui.label(&member.email);
    None
}

fn role_cell(member: &StaffMember, ui: &mut Ui) -> Option<RowAction> {
    ui.label(member.role.label());
    None
}

fn added_cell(member: &StaffMember, ui: &mut Ui) -> Option<RowAction> {
    ui.label(format::date(member.added_at));
    None
}

pub fn staff_page(state: &mut State, ui: &mut Ui) -> Result<(), RenderError> {
    if state
        .staff_changes
        .as_ref()
        .is_some_and(Subscription::has_changed)
    {
        state.staff_updated = true;
    }

    ui.horizontal(|ui| {
        ui.heading(StaffTable::TITLE);
        if state.staff_updated {
            ui.label(RichText::new("Staff list updated").color(COLOR_GREEN));
        }
    });
    if ui.button("Add staff member").clicked() {
        open_dialog(state, Dialog::AddStaff);
    }
    ui.add_space(8.0);

    let columns = [
        ColumnDef::sorted("Name", StaffField::Name, name_cell),
        ColumnDef::sorted("Email", StaffField::Email, email_cell),
        ColumnDef::sorted("Role", StaffField::Role, role_cell),
        ColumnDef::sorted("Added", StaffField::AddedAt, added_cell),
    ];
    let action = record_table::<StaffTable>(&mut state.ctx, ui, &columns, |ui, edited| {
        filters::search_box(ui, edited);
        filters::selection_filter(ui, edited, "Role", StaffField::Role, &ROLES);
        filters::clear_filters(ui, edited);
    });
    if let Some(action) = action {
        apply(state, action);
    }
    Ok(())
}
