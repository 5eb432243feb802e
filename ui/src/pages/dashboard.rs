//! Headline totals and the work queues waiting for an admin.

use egui::{Color32, Frame, Margin, RichText, Stroke, Ui};
use linkup_business::{AuthCompute, Route, dashboard::DashboardSummary, error::RenderError};

use crate::{
    state::State,
    utils::colors::{COLOR_AMBER, COLOR_BLUE, COLOR_GRAY, COLOR_GREEN, COLOR_RED},
    widgets::navigate,
};

const CARD_WIDTH: f32 = 180.0;

struct Card {
    label: &'static str,
    count: usize,
    color: Color32,
    route: Route,
}

fn card(ui: &mut Ui, card: &Card) -> bool {
    let mut open = false;
    Frame::NONE
        .stroke(Stroke::new(1.0, card.color))
        .inner_margin(Margin::same(12))
        .corner_radius(6.0)
        .show(ui, |ui| {
            ui.set_width(CARD_WIDTH);
            ui.label(RichText::new(card.label).color(card.color));
            ui.heading(card.count.to_string());
            open = ui.small_button("View").clicked();
        });
    open
}

fn card_row(ui: &mut Ui, cards: &[Card]) -> Option<Route> {
    let mut target = None;
    ui.horizontal_wrapped(|ui| {
        for entry in cards {
            if card(ui, entry) {
                target = Some(entry.route.clone());
            }
        }
    });
    target
}

pub fn dashboard_page(state: &mut State, ui: &mut Ui) -> Result<(), RenderError> {
    let summary = state
        .ctx
        .cached::<DashboardSummary>()
        .cloned()
        .unwrap_or_default();
    let greeting = state
        .ctx
        .cached::<AuthCompute>()
        .and_then(AuthCompute::user)
        .map_or_else(|| "Welcome".to_owned(), |user| format!("Welcome, {}", user.name));

    ui.heading(greeting);
    if summary.open_items() == 0 {
        ui.label(RichText::new("Nothing waiting for review.").color(COLOR_GREEN));
    } else {
        ui.label(format!("{} items waiting for review.", summary.open_items()));
    }
    ui.add_space(12.0);

    ui.strong("Needs attention");
    let queues = [
        Card {
            label: "Unread user reports",
            count: summary.unread_user_reports,
            color: COLOR_RED,
            route: Route::UserReports,
        },
        Card {
            label: "Unread linkup reports",
            count: summary.unread_linkup_reports,
            color: COLOR_RED,
            route: Route::LinkupReports,
        },
        Card {
            label: "Pending verifications",
            count: summary.pending_verifications,
            color: COLOR_AMBER,
            route: Route::Verifications,
        },
        Card {
            label: "Unread feedback",
            count: summary.unread_feedback,
            color: COLOR_BLUE,
            route: Route::Feedback,
        },
    ];
    let mut target = card_row(ui, &queues);
    ui.add_space(12.0);

    ui.strong("Totals");
    let totals = [
        Card {
            label: "Active users",
            count: summary.active_users,
            color: COLOR_GREEN,
            route: Route::Users,
        },
        Card {
            label: "Verified users",
            count: summary.verified_users,
            color: COLOR_GREEN,
            route: Route::Users,
        },
        Card {
            label: "Suspended users",
            count: summary.suspended_users,
            color: COLOR_AMBER,
            route: Route::SuspendedUsers,
        },
        Card {
            label: "Deleted users",
            count: summary.deleted_users,
            color: COLOR_GRAY,
            route: Route::DeletedUsers,
        },
        Card {
            label: "Linkups",
            count: summary.linkups,
            color: COLOR_BLUE,
            route: Route::Linkups,
        },
        Card {
            label: "Upcoming linkups",
            count: summary.upcoming_linkups,
            color: COLOR_BLUE,
            route: Route::LinkupStatistics,
        },
    ];
    target = target.or(card_row(ui, &totals));

    if let Some(route) = target {
        navigate(&mut state.ctx, route);
    }
    Ok(())
}
