// Prevent console window in addition to Slint window in Windows release builds when, e.g., starting the app via file manager. Ignored on other platforms.
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

slint::include_modules!();

mod config;
mod error;
mod events;
mod file_utils;
mod router;
mod services;
mod startup;
mod state;
mod ui;

#[cfg(test)]
mod test_support;

use slint::ComponentHandle;
use std::sync::{Arc, Mutex};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(debug_assertions)]
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Debug)
        .init();
    #[cfg(not(debug_assertions))]
    env_logger::init();

    let app = AppWindow::new()?;

    let (sink, inbox) = events::channel();
    let backend = services::TargetDirBackend::new(sink.clone());
    let store = services::JsonSettingsStore::open_default()?;
    log::info!("Settings file: {}", store.path().display());

    let router = Arc::new(Mutex::new(router::EventRouter::new(
        Box::new(backend.clone()),
        Box::new(ui::SlintPresenter::new(app.as_weak())),
        Box::new(store),
        inbox,
    )));

    // Setup all UI event handlers
    ui::connect_inbox(&sink, &router);
    ui::setup_handlers(&app, router.clone(), sink.clone());
    startup::configure_startup(&app, &router, backend, sink);

    app.run()?;

    Ok(())
}
