//! Top bar and side navigation around every signed-in page.

use egui::{Align, Color32, Frame, Layout, Margin, RichText, Ui};
use linkup_business::{AuthCompute, LogoutCommand, Route, RouteState, dashboard::DashboardSummary};
use linkup_states::StateCtx;

use super::nav::nav_link;
use crate::utils::colors::{COLOR_GREEN, COLOR_RED};

pub fn top_bar(state_ctx: &mut StateCtx, ui: &mut Ui) {
    let title = state_ctx.state::<RouteState>().current().title();
    let name = state_ctx
        .cached::<AuthCompute>()
        .and_then(AuthCompute::user)
        .map(|user| user.name.clone())
        .unwrap_or_default();

    ui.horizontal(|ui| {
        ui.heading("Linkup Admin");
        ui.separator();
        ui.label(title);

        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
            if ui.button("Sign out").clicked() {
                state_ctx.dispatch::<LogoutCommand>();
            }
            Frame::NONE
                .fill(COLOR_GREEN)
                .inner_margin(Margin::symmetric(12, 4))
                .corner_radius(4.0)
                .show(ui, |ui| {
                    ui.label(RichText::new(format!("👤 {name}")).color(Color32::WHITE));
                });
        });
    });
}

pub fn side_nav(state_ctx: &mut StateCtx, ui: &mut Ui) {
    let summary = state_ctx
        .cached::<DashboardSummary>()
        .cloned()
        .unwrap_or_default();

    nav_link(state_ctx, ui, "Dashboard", Route::Dashboard);

    section(ui, "Users");
    nav_link(state_ctx, ui, "All users", Route::Users);
    nav_link(state_ctx, ui, "Management", Route::UserManagement);
    nav_link(state_ctx, ui, "Suspended", Route::SuspendedUsers);
    nav_link(state_ctx, ui, "Deleted", Route::DeletedUsers);
    counted_link(state_ctx, ui, "Reports", Route::UserReports, summary.unread_user_reports);

    section(ui, "Linkups");
    nav_link(state_ctx, ui, "All linkups", Route::Linkups);
    nav_link(state_ctx, ui, "Management", Route::LinkupManagement);
    nav_link(state_ctx, ui, "Statistics", Route::LinkupStatistics);
    counted_link(
        state_ctx,
        ui,
        "Reports",
        Route::LinkupReports,
        summary.unread_linkup_reports,
    );

    section(ui, "Moderation");
    counted_link(
        state_ctx,
        ui,
        "Verifications",
        Route::Verifications,
        summary.pending_verifications,
    );
    counted_link(state_ctx, ui, "Feedback", Route::Feedback, summary.unread_feedback);

    section(ui, "Admin");
    nav_link(state_ctx, ui, "Staff", Route::Staff);
    nav_link(state_ctx, ui, "Settings", Route::Settings);
    nav_link(state_ctx, ui, "Audit log", Route::AdminSettings);
    nav_link(state_ctx, ui, "Account", Route::Account);
}

fn section(ui: &mut Ui, title: &str) {
    ui.add_space(10.0);
    ui.label(RichText::new(title).small().strong());
}

/// A nav link with a red badge while `count` is non-zero.
fn counted_link(state_ctx: &mut StateCtx, ui: &mut Ui, label: &str, route: Route, count: usize) {
    ui.horizontal(|ui| {
        nav_link(state_ctx, ui, label, route);
        if count > 0 {
            ui.label(RichText::new(count.to_string()).small().color(COLOR_RED));
        }
    });
}
