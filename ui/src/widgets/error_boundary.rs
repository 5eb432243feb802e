use std::{
    any::Any,
    panic::{AssertUnwindSafe, catch_unwind},
};

use egui::{Frame, Margin, RichText, Stroke, Ui};
use linkup_business::{Route, error::RenderError};
use log::error;

use crate::utils::colors::COLOR_RED;

/// Renders a page, replacing only that page with a fallback when it fails.
///
/// A page fails by returning a [`RenderError`] or by panicking; a panic is caught
/// here and shown like any other render error.
///
/// Returns the route the fallback asked for, if its button was clicked.
pub fn error_boundary(
    ui: &mut Ui,
    page: &'static str,
    render: impl FnOnce(&mut Ui) -> Result<(), RenderError>,
) -> Option<Route> {
    let err = match catch_unwind(AssertUnwindSafe(|| render(ui))) {
        Ok(result) => result.err()?,
        Err(payload) => RenderError::Page {
            page,
            message: panic_message(payload.as_ref()),
        },
    };
    error!("{page}: {err}");
    fallback(ui, &err)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_owned()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "panicked".to_owned()
    }
}

fn fallback(ui: &mut Ui, err: &RenderError) -> Option<Route> {
    let mut target = None;
    Frame::NONE
        .stroke(Stroke::new(1.0, COLOR_RED))
        .inner_margin(Margin::same(16))
        .corner_radius(4.0)
        .show(ui, |ui| {
            ui.heading(RichText::new("Something went wrong").color(COLOR_RED));
            ui.add_space(8.0);
            ui.label(err.to_string());
            ui.add_space(12.0);
            if ui.button("Back to dashboard").clicked() {
                target = Some(Route::Dashboard);
            }
        });
    target
}

#[cfg(test)]
mod tests {
    use egui_kittest::Harness;
    use kittest::Queryable;

    use super::*;

    #[test]
    fn test_failing_page_is_replaced() {
        let mut harness = Harness::new_ui(|ui| {
            ui.label("Sidebar stays");
            error_boundary(ui, "Broken", |_| {
                Err(RenderError::Page {
                    page: "Broken",
                    message: "boom".to_owned(),
                })
            });
        });
        harness.run();

        assert!(harness.query_by_label_contains("Sidebar stays").is_some());
        assert!(harness.query_by_label_contains("Something went wrong").is_some());
        assert!(harness.query_by_label_contains("boom").is_some());
    }

    #[test]
    fn test_panicking_page_is_replaced() {
        let mut harness = Harness::new_ui(|ui| {
            ui.label("Sidebar stays");
            error_boundary(ui, "Panicky", |ui| {
                ui.label("half drawn");
                panic!("row index out of range");
            });
        });
        harness.run();

        assert!(harness.query_by_label_contains("Sidebar stays").is_some());
        assert!(harness.query_by_label_contains("Something went wrong").is_some());
        assert!(
            harness
                .query_by_label_contains("row index out of range")
                .is_some()
        );
    }

    #[test]
    fn test_healthy_page_renders_normally() {
        let mut harness = Harness::new_ui(|ui| {
            let target = error_boundary(ui, "Fine", |ui| {
                ui.label("All good");
                Ok(())
            });
            assert!(target.is_none());
        });
        harness.run();

        assert!(harness.query_by_label("All good").is_some());
        assert!(harness.query_by_label_contains("Something went wrong").is_none());
    }
}
