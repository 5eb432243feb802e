use chrono::Utc;
use linkup_business::{AuthCompute, Route, RouteState, query::RecordSource, records::StaffMember};
use linkup_states::Time;

use crate::{pages, state::State, widgets};

pub struct LinkupAdminApp {
    state: State,
}

impl LinkupAdminApp {
    /// Called once before the first frame.
    pub fn new(state: State) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut State {
        &mut self.state
    }

    fn is_authenticated(&self) -> bool {
        self.state
            .ctx
            .cached::<AuthCompute>()
            .is_some_and(AuthCompute::is_authenticated)
    }

    /// Holds a staff subscription only while the staff page is open.
    fn watch_staff(&mut self, route: &Route) {
        let on_staff = *route == Route::Staff;
        if on_staff && self.state.staff_changes.is_none() {
            let subscription = self.state.ctx.subscribe::<RecordSource<StaffMember>>();
            self.state.staff_changes = Some(subscription);
            self.state.staff_updated = false;
        } else if !on_staff && let Some(subscription) = self.state.staff_changes.take() {
            self.state.ctx.unsubscribe(subscription);
        }
    }

    fn signed_out(&mut self, ctx: &egui::Context, route: &Route) {
        egui::CentralPanel::default().show(ctx, |ui| match route {
            Route::NotFound(_) => {
                let target = widgets::error_boundary(ui, route.title(), |ui| {
                    pages::show(&mut self.state, ui, route)
                });
                if let Some(target) = target {
                    widgets::navigate(&mut self.state.ctx, target);
                }
            }
            _ => {
                pages::login_page(&mut self.state, ui);
            }
        });
    }

    fn signed_in(&mut self, ctx: &egui::Context, route: &Route) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            widgets::shell::top_bar(&mut self.state.ctx, ui);
        });

        egui::SidePanel::left("side_nav")
            .resizable(false)
            .default_width(200.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    widgets::shell::side_nav(&mut self.state.ctx, ui);
                });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .id_salt(route.path())
                .show(ui, |ui| {
                    let target = widgets::error_boundary(ui, route.title(), |ui| {
                        pages::show(&mut self.state, ui, route)
                    });
                    if let Some(target) = target {
                        widgets::navigate(&mut self.state.ctx, target);
                    }
                });
        });
    }
}

impl eframe::App for LinkupAdminApp {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.state.ctx.update::<Time>(|time| time.set(Utc::now()));
        // Sync Compute for render
        self.state.ctx.sync_computes();

        let route = self.state.ctx.state::<RouteState>().current().clone();
        self.watch_staff(&route);

        if route == Route::Login || (!self.is_authenticated() && route.is_protected()) {
            self.signed_out(ctx, &Route::Login);
        } else if !self.is_authenticated() {
            self.signed_out(ctx, &route);
        } else {
            self.signed_in(ctx, &route);
        }

        widgets::dialogs(&mut self.state, ctx);
        widgets::notices(&mut self.state.ctx, ctx);

        // Run background jobs
        self.state.ctx.run_computed();
    }
}
