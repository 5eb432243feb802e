//! Settings, the audit log and the signed-in account.

use egui::{RichText, Ui};
use linkup_business::{
    AdminConfig, AuthCompute, LogoutCommand, error::RenderError, moderation::AuditLog,
    query::PAGE_SIZES,
};

use crate::{format, state::State};

fn row(ui: &mut Ui, label: &str, value: impl Into<String>) {
    ui.label(RichText::new(label).weak());
    ui.label(value.into());
    ui.end_row();
}

pub fn settings_page(state: &mut State, ui: &mut Ui) -> Result<(), RenderError> {
    ui.heading("Settings");
    ui.label("Read from LINKUP_* environment variables at startup.");
    ui.add_space(8.0);

    let config = state.ctx.state::<AdminConfig>();
    egui::Grid::new("settings")
        .num_columns(2)
        .spacing([24.0, 4.0])
        .show(ui, |ui| {
            row(ui, "Admin email", config.admin_email());
            row(ui, "Admin name", config.admin_name());
            row(ui, "Rows per page", config.page_size().to_string());
            row(ui, "Page sizes offered", format!("{PAGE_SIZES:?}"));
            row(
                ui,
                "Session file",
                config
                    .session_file()
                    .map_or_else(|| "default location".to_owned(), |path| {
                        path.display().to_string()
                    }),
            );
        });
    Ok(())
}

/// Every change made in this session, newest first.
pub fn admin_settings_page(state: &mut State, ui: &mut Ui) -> Result<(), RenderError> {
    ui.heading("Audit log");
    let log = state.ctx.state::<AuditLog>();
    if log.is_empty() {
        ui.label(RichText::new("No changes yet.").weak());
        return Ok(());
    }

    egui::Grid::new("audit_log")
        .num_columns(5)
        .striped(true)
        .spacing([16.0, 4.0])
        .show(ui, |ui| {
            for title in ["When", "Who", "What", "Record", "Change"] {
                ui.strong(title);
            }
            ui.end_row();
            for entry in log.entries().iter().rev() {
                ui.label(format::date_time(entry.at));
                ui.label(&entry.actor);
                let action = ui.label(entry.action.label());
                if let Some(reason) = &entry.reason {
                    action.on_hover_text(reason);
                }
                ui.label(entry.record_id.as_str());
                ui.label(format!("{} → {}", entry.from, entry.to));
                ui.end_row();
            }
        });
    Ok(())
}

pub fn account_page(state: &mut State, ui: &mut Ui) -> Result<(), RenderError> {
    ui.heading("Account");
    let user = state
        .ctx
        .cached::<AuthCompute>()
        .and_then(AuthCompute::user)
        .cloned()
        .ok_or_else(|| RenderError::Page {
            page: "Account",
            message: "no admin is signed in".to_owned(),
        })?;

    egui::Grid::new("account")
        .num_columns(2)
        .spacing([24.0, 4.0])
        .show(ui, |ui| {
            row(ui, "Name", user.name);
            row(ui, "Email", user.email);
        });
    ui.add_space(12.0);
    if ui.button("Sign out").clicked() {
        state.ctx.dispatch::<LogoutCommand>();
    }
    Ok(())
}
