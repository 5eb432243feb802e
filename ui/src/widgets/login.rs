//! Login widget for admin authentication.
//!
//! Displays a centered login form with email and password fields. The form stays
//! editable after a failed attempt and shows why it failed.

use egui::{Align, Layout, Response, RichText, TextEdit, Ui};
use linkup_business::{AuthCompute, LoginCommand, LoginInput, error::AuthError};
use linkup_states::StateCtx;

use crate::utils::colors::COLOR_RED;

/// Displays the login form and dispatches [`LoginCommand`] on submit.
pub fn login_widget(state_ctx: &mut StateCtx, ui: &mut Ui) -> Response {
    let error = state_ctx
        .cached::<AuthCompute>()
        .and_then(|auth| auth.status.error());

    show_login_form(state_ctx, ui, error)
}

fn show_login_form(state_ctx: &mut StateCtx, ui: &mut Ui, error: Option<AuthError>) -> Response {
    let input = state_ctx.state::<LoginInput>();
    let mut email = input.email.clone();
    let mut password = input.password.clone();
    let mut should_login = false;

    let response = ui
        .with_layout(Layout::top_down(Align::Center), |ui| {
            ui.add_space(20.0);
            ui.heading("Linkup Admin");
            ui.add_space(40.0);

            if let Some(err) = error {
                ui.colored_label(COLOR_RED, err.to_string());
                ui.add_space(8.0);
            }

            ui.horizontal(|ui| {
                ui.label("Email:");
                ui.add(
                    TextEdit::singleline(&mut email)
                        .desired_width(220.0)
                        .hint_text("admin@linkup.com"),
                );
            });

            ui.add_space(8.0);

            ui.horizontal(|ui| {
                ui.label("Password:");
                let password_response = ui.add(
                    TextEdit::singleline(&mut password)
                        .password(true)
                        .desired_width(220.0),
                );

                if password_response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter))
                {
                    should_login = true;
                }
            });

            ui.add_space(16.0);

            let can_login = !email.trim().is_empty() && !password.is_empty();
            if ui
                .add_enabled(can_login, egui::Button::new("Sign in"))
                .clicked()
            {
                should_login = true;
            }

            ui.add_space(8.0);
            ui.label(RichText::new("Default: admin@linkup.com / admin123").small().weak());
        })
        .response;

    // Only touch the state when something was typed, so computes are not dirtied each frame.
    let input = state_ctx.state::<LoginInput>();
    if input.email != email || input.password != password {
        state_ctx.update::<LoginInput>(|input| {
            input.email = email;
            input.password = password;
        });
    }

    if should_login {
        state_ctx.dispatch::<LoginCommand>();
    }

    response
}
