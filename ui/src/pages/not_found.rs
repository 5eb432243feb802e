use egui::{RichText, Ui};
use linkup_business::{Route, error::RenderError};

use crate::{state::State, utils::colors::COLOR_GRAY, widgets::navigate};

pub fn not_found_page(state: &mut State, ui: &mut Ui, path: &str) -> Result<(), RenderError> {
    ui.heading("Page not found");
    ui.label(RichText::new(format!("Nothing lives at {path}")).color(COLOR_GRAY));
    ui.add_space(12.0);
    if ui.button("Go to dashboard").clicked() {
        navigate(&mut state.ctx, Route::Dashboard);
    }
    Ok(())
}
