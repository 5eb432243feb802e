//! One table widget for every list in the dashboard.
//!
//! The widget renders the cached [`TableView`] page of a [`Table`] and edits a copy of
//! its [`TableQuery`]. The copy is written back only when it differs, so rendering alone
//! never marks the query as changed.

use egui::{Align, Layout, RichText, Ui};
use egui_extras::{Column, TableBuilder};
use linkup_business::{
    query::{QueryPage, Record, SortDirection},
    tables::{FieldOf, Table, TableQuery, TableView},
};
use linkup_states::StateCtx;
use ustr::Ustr;

use super::{RowAction, pager::pager};

pub const ROW_HEIGHT: f32 = 28.0;
pub const HEADER_HEIGHT: f32 = 24.0;

/// One column: its header, the field a header click sorts by, and how a cell renders.
pub struct ColumnDef<R: Record> {
    pub title: &'static str,
    pub sort: Option<R::Field>,
    pub cell: fn(&R, &mut Ui) -> Option<RowAction>,
}

impl<R: Record> ColumnDef<R> {
    pub fn sorted(
        title: &'static str,
        field: R::Field,
        cell: fn(&R, &mut Ui) -> Option<RowAction>,
    ) -> Self {
        Self {
            title,
            sort: Some(field),
            cell,
        }
    }

    pub fn plain(title: &'static str, cell: fn(&R, &mut Ui) -> Option<RowAction>) -> Self {
        Self {
            title,
            sort: None,
            cell,
        }
    }
}

/// Current page of table `T`, empty when its view is not registered.
pub fn current_page<T: Table>(state_ctx: &StateCtx) -> QueryPage<T::Record> {
    state_ctx
        .cached::<TableView<T>>()
        .map(|view| view.page().clone())
        .unwrap_or_default()
}

/// Write `edited` back if it differs from the stored query, then refresh the view.
pub fn commit_query<T: Table>(state_ctx: &mut StateCtx, edited: TableQuery<T>) {
    if state_ctx.state::<TableQuery<T>>().query() == edited.query() {
        return;
    }
    state_ctx.update::<TableQuery<T>>(|query| *query = edited);
    state_ctx.run_computed();
}

/// Scope table `T` to one parent record, or clear the scope with `None`.
pub fn scope_table<T: Table>(state_ctx: &mut StateCtx, scope: Option<Ustr>) {
    let mut edited = state_ctx.state::<TableQuery<T>>().clone();
    edited.scope_to(scope);
    commit_query(state_ctx, edited);
}

/// Filters above, sortable headers, rows, then the pager.
///
/// Returns the action of the first cell that produced one this frame.
pub fn record_table<T: Table>(
    state_ctx: &mut StateCtx,
    ui: &mut Ui,
    columns: &[ColumnDef<T::Record>],
    filters: impl FnOnce(&mut Ui, &mut TableQuery<T>),
) -> Option<RowAction> {
    let page = current_page::<T>(state_ctx);
    let mut edited = state_ctx.state::<TableQuery<T>>().clone();
    // the view clamps a page the source shrank under; store that page before any edits
    if edited.query().page().current_page() > page.total_pages {
        edited.query_mut().set_page(page.current_page);
    }
    let mut action = None;

    ui.push_id(T::TITLE, |ui| {
        ui.horizontal_wrapped(|ui| filters(ui, &mut edited));
        ui.add_space(4.0);

        let sort = *edited.query().sort();
        TableBuilder::new(ui)
            .striped(true)
            .vscroll(false)
            .cell_layout(Layout::left_to_right(Align::Center))
            .columns(Column::auto().at_least(60.0), columns.len().saturating_sub(1))
            .column(Column::remainder().at_least(60.0))
            .header(HEADER_HEIGHT, |mut header| {
                for column in columns {
                    header.col(|ui| {
                        header_cell(ui, column, sort.field(), sort.direction(), &mut edited);
                    });
                }
            })
            .body(|mut body| {
                if page.rows.is_empty() {
                    body.row(ROW_HEIGHT, |mut row| {
                        row.col(|ui| {
                            ui.label(RichText::new("No results").italics().weak());
                        });
                        for _ in 1..columns.len() {
                            row.col(|_| {});
                        }
                    });
                }
                for record in &page.rows {
                    body.row(ROW_HEIGHT, |mut row| {
                        for column in columns {
                            row.col(|ui| {
                                let event = (column.cell)(record, ui);
                                if action.is_none() {
                                    action = event;
                                }
                            });
                        }
                    });
                }
            });

        ui.add_space(4.0);
        pager(ui, &mut edited, &page);
    });

    commit_query(state_ctx, edited);
    action
}

fn header_cell<T: Table>(
    ui: &mut Ui,
    column: &ColumnDef<T::Record>,
    sorted_by: FieldOf<T>,
    direction: SortDirection,
    edited: &mut TableQuery<T>,
) {
    let Some(field) = column.sort else {
        ui.strong(column.title);
        return;
    };

    let text = if field == sorted_by {
        let arrow = match direction {
            SortDirection::Asc => "⬆",
            SortDirection::Desc => "⬇",
        };
        format!("{} {arrow}", column.title)
    } else {
        column.title.to_owned()
    };

    if ui
        .add(egui::Button::new(RichText::new(text).strong()).frame(false))
        .clicked()
    {
        edited.sort_by(field);
    }
}
