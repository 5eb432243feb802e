use egui::{Response, Ui};
use linkup_business::{NavigateCommand, NavigationInput, Route, RouteState};
use linkup_states::StateCtx;

/// Go to `route` through the sign-in guard.
pub fn navigate(state_ctx: &mut StateCtx, route: Route) {
    state_ctx.update::<NavigationInput>(|nav| nav.target = Some(route));
    state_ctx.dispatch::<NavigateCommand>();
}

/// A link that is highlighted while its route is on screen.
pub fn nav_link(state_ctx: &mut StateCtx, ui: &mut Ui, label: &str, route: Route) -> Response {
    let selected = state_ctx.state::<RouteState>().current() == &route;
    let response = ui.selectable_label(selected, label);
    if response.clicked() && !selected {
        navigate(state_ctx, route);
    }
    response
}
