//! One function per route.
//!
//! [`show`] picks the page for the current route. Pages return a [`RenderError`] instead of
//! drawing half a page, and the app wraps them in an error boundary.

mod dashboard;
mod linkups;
mod login_page;
mod moderation;
mod not_found;
mod reports;
mod settings;
mod staff;
mod users;

use egui::Ui;
use linkup_business::{Route, error::RenderError};

use crate::state::State;

pub use login_page::login_page;

pub fn show(state: &mut State, ui: &mut Ui, route: &Route) -> Result<(), RenderError> {
    match route {
        Route::Dashboard => dashboard::dashboard_page(state, ui),
        Route::Users => users::users_page(state, ui),
        Route::UserDetail(id) => users::user_detail_page(state, ui, *id),
        Route::UserManagement => users::user_management_page(state, ui),
        Route::SuspendedUsers => users::suspended_users_page(state, ui),
        Route::DeletedUsers => users::deleted_users_page(state, ui),
        Route::UserReports | Route::ReportsUsers => reports::user_reports_page(state, ui),
        Route::Linkups => linkups::linkups_page(state, ui),
        Route::LinkupDetail(id) => linkups::linkup_detail_page(state, ui, *id),
        Route::LinkupManagement => linkups::linkup_management_page(state, ui),
        Route::LinkupStatistics => linkups::linkup_statistics_page(state, ui),
        Route::LinkupReports | Route::ReportsLinkups => reports::linkup_reports_page(state, ui),
        Route::Verifications => moderation::verifications_page(state, ui),
        Route::Feedback => moderation::feedback_page(state, ui),
        Route::Staff => staff::staff_page(state, ui),
        Route::Settings => settings::settings_page(state, ui),
        Route::AdminSettings => settings::admin_settings_page(state, ui),
        Route::Account => settings::account_page(state, ui),
        Route::NotFound(path) => not_found::not_found_page(state, ui, path),
        Route::Login => {
            login_page(state, ui);
            Ok(())
        }
    }
}
