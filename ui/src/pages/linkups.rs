use egui::{ProgressBar, RichText, Ui};
use linkup_business::{
    Route,
    dashboard::LinkupStats,
    error::RenderError,
    query::RecordSource,
    records::{Linkup, LinkupField, LinkupStatus},
    tables::{LinkupReportsTable, LinkupsTable, Table, TableQuery},
};
use linkup_states::Time;
use ustr::Ustr;

use super::{reports::report_columns, users::history};
use crate::{
    format,
    state::State,
    utils::colors,
    widgets::{ColumnDef, RowAction, apply, filters, record_table, table::scope_table},
};

const STATUSES: [(&str, &str); 4] = [
    ("upcoming", "Upcoming"),
    ("happening", "Happening"),
    ("happened", "Happened"),
    ("cancelled", "Cancelled"),
];

fn title_cell(linkup: &Linkup, ui: &mut Ui) -> Option<RowAction> {
    ui.link(&linkup.title)
        .clicked()
        .then(|| RowAction::Open(Route::LinkupDetail(linkup.id)))
}

fn creator_cell(linkup: &Linkup, ui: &mut Ui) -> Option<RowAction> {
    ui.link(&linkup.creator_name)
        .clicked()
        .then(|| RowAction::Open(Route::UserDetail(linkup.creator_id)))
}

fn category_cell(linkup: &Linkup, ui: &mut Ui) -> Option<RowAction> {
    ui.label(&linkup.category);
    None
}

fn location_cell(linkup: &Linkup, ui: &mut Ui) -> Option<RowAction> {
    ui.label(&linkup.location);
    None
}

fn starts_cell(linkup: &Linkup, ui: &mut Ui) -> Option<RowAction> {
    ui.label(format::date_time(linkup.starts_at));
    None
}

fn created_cell(linkup: &Linkup, ui: &mut Ui) -> Option<RowAction> {
    ui.label(format::date(linkup.created_at));
    None
}

fn attendees_cell(linkup: &Linkup, ui: &mut Ui) -> Option<RowAction> {
    ui.label(format!("{}/{}", linkup.attendees, linkup.capacity));
    None
}

fn price_cell(linkup: &Linkup, ui: &mut Ui) -> Option<RowAction> {
    ui.label(format::price(linkup.price));
    None
}

fn status_cell(linkup: &Linkup, ui: &mut Ui) -> Option<RowAction> {
    ui.label(RichText::new(linkup.status.label()).color(colors::linkup_status(linkup.status)));
    None
}

fn open_cell(linkup: &Linkup, ui: &mut Ui) -> Option<RowAction> {
    ui.button("Open")
        .clicked()
        .then(|| RowAction::Open(Route::LinkupDetail(linkup.id)))
}

pub fn linkup_columns() -> Vec<ColumnDef<Linkup>> {
    vec![
        ColumnDef::sorted("Title", LinkupField::Title, title_cell),
        ColumnDef::sorted("Category", LinkupField::Category, category_cell),
        ColumnDef::sorted("Starts", LinkupField::StartsAt, starts_cell),
        ColumnDef::sorted("Attendees", LinkupField::Attendees, attendees_cell),
        ColumnDef::sorted("Price", LinkupField::Price, price_cell),
        ColumnDef::sorted("Status", LinkupField::Status, status_cell),
    ]
}

fn categories(state: &State) -> Vec<String> {
    let mut categories: Vec<String> = state
        .ctx
        .state::<RecordSource<Linkup>>()
        .iter()
        .map(|linkup| linkup.category.clone())
        .collect();
    categories.sort();
    categories.dedup();
    categories
}

fn linkup_filters(
    categories: Vec<String>,
    now: chrono::DateTime<chrono::Utc>,
) -> impl FnOnce(&mut Ui, &mut TableQuery<LinkupsTable>) {
    move |ui, edited| {
        let options: Vec<(&str, &str)> = categories
            .iter()
            .map(|category| (category.as_str(), category.as_str()))
            .collect();
        filters::search_box(ui, edited);
        filters::selection_filter(ui, edited, "Status", LinkupField::Status, &STATUSES);
        filters::selection_filter(ui, edited, "Category", LinkupField::Category, &options);
        filters::flag_filter(ui, edited, "Free", LinkupField::Free);
        filters::range_filter(ui, edited, "Price", LinkupField::Price);
        filters::date_filter(ui, edited, "Created", LinkupField::CreatedAt, now);
        filters::clear_filters(ui, edited);
    }
}

pub fn linkups_page(state: &mut State, ui: &mut Ui) -> Result<(), RenderError> {
    ui.heading(LinkupsTable::TITLE);
    let filters = linkup_filters(categories(state), state.ctx.state::<Time>().now());
    let mut columns = linkup_columns();
    columns.insert(1, ColumnDef::sorted("Creator", LinkupField::Creator, creator_cell));

    let action = record_table::<LinkupsTable>(&mut state.ctx, ui, &columns, filters);
    if let Some(action) = action {
        apply(state, action);
    }
    Ok(())
}

pub fn linkup_management_page(state: &mut State, ui: &mut Ui) -> Result<(), RenderError> {
    ui.heading("Linkup management");
    if let Some(stats) = state.ctx.cached::<LinkupStats>() {
        ui.horizontal(|ui| {
            for status in LinkupStatus::ALL {
                let count = stats.by_status.get(status.as_str()).copied().unwrap_or(0);
                ui.label(
                    RichText::new(format!("{}: {count}", status.label()))
                        .color(colors::linkup_status(status)),
                );
                ui.separator();
            }
        });
    }
    ui.add_space(8.0);

    let filters = linkup_filters(categories(state), state.ctx.state::<Time>().now());
    let columns = [
        ColumnDef::sorted("Title", LinkupField::Title, title_cell),
        ColumnDef::sorted("Creator", LinkupField::Creator, creator_cell),
        ColumnDef::sorted("Created", LinkupField::CreatedAt, created_cell),
        ColumnDef::sorted("Location", LinkupField::Location, location_cell),
        ColumnDef::sorted("Status", LinkupField::Status, status_cell),
        ColumnDef::plain("", open_cell),
    ];

    let action = record_table::<LinkupsTable>(&mut state.ctx, ui, &columns, filters);
    if let Some(action) = action {
        apply(state, action);
    }
    Ok(())
}

pub fn linkup_detail_page(state: &mut State, ui: &mut Ui, id: Ustr) -> Result<(), RenderError> {
    let linkup = state
        .ctx
        .state::<RecordSource<Linkup>>()
        .get(&id)
        .cloned()
        .ok_or_else(|| RenderError::MissingRecord {
            kind: "linkup",
            id: id.to_string(),
        })?;
    scope_table::<LinkupReportsTable>(&mut state.ctx, Some(id));

    let mut action = None;
    ui.horizontal(|ui| {
        ui.heading(&linkup.title);
        status_cell(&linkup, ui);
    });
    egui::Grid::new("linkup_profile")
        .num_columns(2)
        .spacing([24.0, 4.0])
        .show(ui, |ui| {
            ui.label(RichText::new("Creator").weak());
            action = creator_cell(&linkup, ui);
            ui.end_row();

            for (label, value) in [
                ("Category", linkup.category.clone()),
                ("Location", linkup.location.clone()),
                ("Starts", format::date_time(linkup.starts_at)),
                ("Created", format::date(linkup.created_at)),
                ("Price", format::price(linkup.price)),
            ] {
                ui.label(RichText::new(label).weak());
                ui.label(value);
                ui.end_row();
            }

            ui.label(RichText::new("Attendance").weak());
            ui.add(
                ProgressBar::new(linkup.fill_ratio())
                    .desired_width(200.0)
                    .text(format!("{}/{}", linkup.attendees, linkup.capacity)),
            );
            ui.end_row();
        });

    ui.separator();
    ui.heading("Reports about this linkup");
    let reports_action =
        record_table::<LinkupReportsTable>(&mut state.ctx, ui, &report_columns(), |_, _| {});
    action = action.or(reports_action);

    history(state, ui, id);

    if let Some(action) = action {
        apply(state, action);
    }
    Ok(())
}

pub fn linkup_statistics_page(state: &mut State, ui: &mut Ui) -> Result<(), RenderError> {
    ui.heading("Linkup statistics");
    let stats = state
        .ctx
        .cached::<LinkupStats>()
        .cloned()
        .ok_or_else(|| RenderError::Page {
            page: "Linkup statistics",
            message: "statistics are not available".to_owned(),
        })?;

    egui::Grid::new("linkup_totals")
        .num_columns(2)
        .spacing([24.0, 4.0])
        .show(ui, |ui| {
            for status in LinkupStatus::ALL {
                let count = stats.by_status.get(status.as_str()).copied().unwrap_or(0);
                ui.label(RichText::new(status.label()).color(colors::linkup_status(status)));
                ui.label(count.to_string());
                ui.end_row();
            }
            ui.label("Free / paid");
            ui.label(format!("{} / {}", stats.free, stats.paid));
            ui.end_row();
            ui.label("Average ticket");
            ui.label(stats.average_price.map_or_else(|| "—".to_owned(), format::price));
            ui.end_row();
            ui.label("Seats taken");
            ui.add(
                ProgressBar::new(stats.fill_ratio())
                    .desired_width(200.0)
                    .text(format!(
                        "{}/{} ({})",
                        stats.attendees,
                        stats.capacity,
                        format::percent(stats.fill_ratio())
                    )),
            );
            ui.end_row();
        });

    ui.separator();
    ui.heading("By category");
    egui::Grid::new("linkup_categories")
        .num_columns(3)
        .striped(true)
        .spacing([24.0, 4.0])
        .show(ui, |ui| {
            ui.strong("Category");
            ui.strong("Linkups");
            ui.strong("Attendees");
            ui.end_row();
            for (category, counts) in &stats.by_category {
                ui.label(category);
                ui.label(counts.linkups.to_string());
                ui.label(counts.attendees.to_string());
                ui.end_row();
            }
        });
    Ok(())
}
