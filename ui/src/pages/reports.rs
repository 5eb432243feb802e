use egui::{RichText, Ui};
use linkup_business::{
    Route,
    error::RenderError,
    records::{ReadState, Report, ReportField, ReportTarget},
    tables::{LinkupReportsTable, Table, TableQuery, UserReportsTable},
};
use linkup_states::Time;

use crate::{
    format,
    state::State,
    utils::colors,
    widgets::{ColumnDef, RowAction, apply, filters, record_table, table::scope_table},
};

const READ_STATES: [(&str, &str); 2] = [("unread", "Unread"), ("read", "Read")];

fn target_cell(report: &Report, ui: &mut Ui) -> Option<RowAction> {
    let route = match report.target {
        ReportTarget::User => Route::UserDetail(report.target_id),
        ReportTarget::Linkup => Route::LinkupDetail(report.target_id),
    };
    ui.link(&report.target_name)
        .clicked()
        .then_some(RowAction::Open(route))
}

fn reporter_cell(report: &Report, ui: &mut Ui) -> Option<RowAction> {
    ui.label(&report.reporter_name);
    None
}

fn reason_cell(report: &Report, ui: &mut Ui) -> Option<RowAction> {
    let response = ui.label(&report.reason);
    if !report.details.is_empty() {
        response.on_hover_text(&report.details);
    }
    None
}

fn created_cell(report: &Report, ui: &mut Ui) -> Option<RowAction> {
    ui.label(format::date_time(report.created_at));
    None
}

fn read_cell(report: &Report, ui: &mut Ui) -> Option<RowAction> {
    ui.label(RichText::new(report.read.label()).color(colors::read_state(report.read)));
    match report.read {
        ReadState::Unread => ui
            .small_button("Mark read")
            .clicked()
            .then_some(RowAction::MarkReportRead(report.id)),
        ReadState::Read => None,
    }
}

pub fn report_columns() -> Vec<ColumnDef<Report>> {
    vec![
        ColumnDef::sorted("Reported", ReportField::TargetName, target_cell),
        ColumnDef::sorted("Reporter", ReportField::Reporter, reporter_cell),
        ColumnDef::sorted("Reason", ReportField::Reason, reason_cell),
        ColumnDef::sorted("Submitted", ReportField::CreatedAt, created_cell),
        ColumnDef::sorted("Status", ReportField::Read, read_cell),
    ]
}

fn report_filters<T: Table<Record = Report>>(
    now: chrono::DateTime<chrono::Utc>,
) -> impl FnOnce(&mut Ui, &mut TableQuery<T>) {
    move |ui, edited| {
        filters::search_box(ui, edited);
        filters::selection_filter(ui, edited, "Status", ReportField::Read, &READ_STATES);
        filters::date_filter(ui, edited, "Submitted", ReportField::CreatedAt, now);
        filters::clear_filters(ui, edited);
    }
}

/// Every report about a user.
pub fn user_reports_page(state: &mut State, ui: &mut Ui) -> Result<(), RenderError> {
    ui.heading(UserReportsTable::TITLE);
    scope_table::<UserReportsTable>(&mut state.ctx, None);
    let now = state.ctx.state::<Time>().now();
    let columns = report_columns();
    let action =
        record_table::<UserReportsTable>(&mut state.ctx, ui, &columns, report_filters(now));
    if let Some(action) = action {
        apply(state, action);
    }
    Ok(())
}

/// Every report about a linkup.
pub fn linkup_reports_page(state: &mut State, ui: &mut Ui) -> Result<(), RenderError> {
    ui.heading(LinkupReportsTable::TITLE);
    scope_table::<LinkupReportsTable>(&mut state.ctx, None);
    let now = state.ctx.state::<Time>().now();
    let columns = report_columns();
    let action =
        record_table::<LinkupReportsTable>(&mut state.ctx, ui, &columns, report_filters(now));
    if let Some(action) = action {
        apply(state, action);
    }
    Ok(())
}
