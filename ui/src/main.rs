#![warn(clippy::all, rust_2018_idioms)]
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use std::sync::Arc;

use anyhow::anyhow;
use linkup_business::{AdminConfig, FileSessionStore, Route, SessionHandle};
use linkup_ui::{LinkupAdminApp, state::State};
use log::warn;

mod alloc {
    #[global_allocator]
    static MALLOC: mimalloc::MiMalloc = mimalloc::MiMalloc;
}

fn session_for(config: &AdminConfig) -> SessionHandle {
    match FileSessionStore::from_config(config) {
        Ok(store) => SessionHandle::new(Arc::new(store)),
        Err(err) => {
            warn!("no session file available, keeping the session in memory: {err}");
            SessionHandle::in_memory()
        }
    }
}

fn main() -> anyhow::Result<()> {
    // Log to stderr (if you run with `RUST_LOG=debug`).
    env_logger::Builder::from_env(env_logger::Env::default()).init();

    let config = AdminConfig::init()?;
    let session = session_for(&config);

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([900.0, 600.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Linkup Admin",
        native_options,
        Box::new(move |_cc| {
            let state = State::new(config, session, Route::Dashboard);
            Ok(Box::new(LinkupAdminApp::new(state)))
        }),
    )
    .map_err(|err| anyhow!("failed to start the dashboard: {err}"))
}
