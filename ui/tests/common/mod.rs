use std::sync::Arc;

use egui_kittest::Harness;
use linkup_business::{
    AdminConfig, AuthUser, MemorySessionStore, Route, SessionHandle, SessionStore,
};
use linkup_states::StateCtx;
use linkup_ui::{LinkupAdminApp, state::State};

pub struct TestCtx<'a> {
    harness: Harness<'a, LinkupAdminApp>,
}

impl<'a> TestCtx<'a> {
    /// Signed out, with an empty in-memory session.
    #[allow(unused)]
    pub fn new_app(initial: Route) -> Self {
        Self::with_state(State::test(initial))
    }

    /// Starts with a stored session for the default admin.
    #[allow(unused)]
    pub fn signed_in(initial: Route) -> Self {
        let config = AdminConfig::new_for_test();
        let store = MemorySessionStore::new();
        store
            .save(&AuthUser {
                email: config.admin_email().to_owned(),
                name: config.admin_name().to_owned(),
            })
            .expect("memory store accepts the session");
        let session = SessionHandle::new(Arc::new(store));
        Self::with_state(State::new(config, session, initial))
    }

    fn with_state(state: State) -> Self {
        let app = LinkupAdminApp::new(state);
        let harness = Harness::new_eframe(|_| app);
        Self { harness }
    }

    pub fn harness_mut(&mut self) -> &mut Harness<'a, LinkupAdminApp> {
        &mut self.harness
    }

    #[allow(unused)]
    pub fn harness(&self) -> &Harness<'a, LinkupAdminApp> {
        &self.harness
    }

    #[allow(unused)]
    pub fn state_ctx(&mut self) -> &mut StateCtx {
        &mut self.harness.state_mut().state_mut().ctx
    }

    /// Change business state between frames, refresh the computes, then render.
    #[allow(unused)]
    pub fn arrange(&mut self, f: impl FnOnce(&mut StateCtx)) {
        let state_ctx = self.state_ctx();
        f(state_ctx);
        state_ctx.run_computed();
        self.harness.run();
    }
}
