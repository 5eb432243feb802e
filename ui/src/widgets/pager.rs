use egui::{ComboBox, Ui};
use linkup_business::{
    query::QueryPage,
    tables::{Table, TableQuery},
};

/// Page links shown around the current page.
const MAX_PAGE_LINKS: usize = 7;

/// Previous/next, numbered page links, the visible range and the page size selector.
pub fn pager<T: Table>(ui: &mut Ui, edited: &mut TableQuery<T>, page: &QueryPage<T::Record>) {
    ui.horizontal(|ui| {
        let state = *edited.query().page();

        if ui
            .add_enabled(state.has_prev(), egui::Button::new("Previous"))
            .clicked()
        {
            edited.query_mut().prev_page();
        }

        for number in state.page_links(page.filtered, MAX_PAGE_LINKS) {
            if ui
                .selectable_label(number == page.current_page, number.to_string())
                .clicked()
            {
                edited.query_mut().set_page(number);
            }
        }

        if ui
            .add_enabled(state.has_next(page.filtered), egui::Button::new("Next"))
            .clicked()
        {
            edited.query_mut().next_page(page.filtered);
        }

        ui.separator();
        ui.label(range_label(page));

        ui.separator();
        let mut size = state.items_per_page();
        ComboBox::from_id_salt("page_size")
            .selected_text(format!("{size} per page"))
            .show_ui(ui, |ui| {
                for &option in T::PAGE_SIZES {
                    ui.selectable_value(&mut size, option, option.to_string());
                }
            });
        if size != state.items_per_page() {
            edited.set_items_per_page(size);
        }
    });
}

/// "Showing 11-20 of 42", or "0 results".
pub fn range_label<R>(page: &QueryPage<R>) -> String {
    if page.window.is_empty() {
        return "0 results".to_owned();
    }
    format!(
        "Showing {}-{} of {}",
        page.window.start + 1,
        page.window.end,
        page.filtered
    )
}
