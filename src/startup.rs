use crate::events::{BackendEvent, EventSink};
use crate::router::EventRouter;
use crate::services::TargetDirBackend;
use log::{info, warn};
use slint::ComponentHandle;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// First non-flag argument naming an existing directory.
fn startup_dir_from_args() -> Option<String> {
    std::env::args_os()
        .skip(1)
        .filter_map(|arg| {
            let arg_str = arg.to_string_lossy();
            if arg_str.starts_with('-') {
                None
            } else {
                Some(PathBuf::from(arg))
            }
        })
        .find(|path| path.is_dir())
        .map(|path| path.to_string_lossy().into_owned())
}

/// Copies files dropped on the window into the target directory.
fn setup_file_drop(app: &crate::AppWindow, backend: TargetDirBackend, sink: EventSink) {
    use i_slint_backend_winit::WinitWindowAccessor;
    use i_slint_backend_winit::{EventResult, winit::event::WindowEvent};

    app.window().on_winit_window_event(move |_window, event| {
        if let WindowEvent::DroppedFile(path) = event {
            match backend.drop_files(std::slice::from_ref(&path)) {
                Ok(0) => info!("Ignored dropped file: {}", path.display()),
                Ok(_) => {}
                Err(e) => {
                    warn!("Failed to import dropped file: {}", e);
                    sink.emit(BackendEvent::ShowToast(format!(
                        "Failed to import dropped file: {}",
                        e
                    )));
                }
            }
        }

        EventResult::Propagate
    });
}

/// Starts the router and applies startup inputs (command line, file drop hook).
pub fn configure_startup(
    app: &crate::AppWindow,
    router: &Arc<Mutex<EventRouter>>,
    backend: TargetDirBackend,
    sink: EventSink,
) {
    setup_file_drop(app, backend, sink.clone());

    if let Ok(mut router) = router.lock() {
        if let Err(e) = router.start() {
            warn!("Startup incomplete: {}", e);
        }
    }

    if let Some(dir) = startup_dir_from_args() {
        info!("Opening directory from command line: {}", dir);
        sink.emit(BackendEvent::SetNewDir(dir));
    }
}
