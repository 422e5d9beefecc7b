//! Event handlers for UI callbacks.
//!
//! Sets up all Logic callbacks (select_dir, template_edited, paste, etc.)
//! and forwards them to the router as [`UserAction`]s.

use crate::events::EventSink;
use crate::router::{EventRouter, UserAction};
use crate::services::ClipboardService;
use crate::services::dir_picker::{pick_directory, select_dir_and_notify};
use log::{debug, error};
use slint::ComponentHandle;
use std::sync::{Arc, Mutex};

/// Runs one action on the router. Failures were already shown by the router.
fn run_action(router: &Arc<Mutex<EventRouter>>, action: UserAction) {
    match router.lock() {
        Ok(mut router) => {
            if let Err(e) = router.handle(action) {
                debug!("Action failed: {}", e);
            }
        }
        Err(_) => error!("Router lock poisoned, dropping action {:?}", action),
    }
}

/// Wakes the router on the UI thread whenever the backend emits an event.
pub fn connect_inbox(sink: &EventSink, router: &Arc<Mutex<EventRouter>>) {
    let router = Arc::downgrade(router);
    sink.set_waker(move || {
        let router = router.clone();
        let _ = slint::invoke_from_event_loop(move || {
            let Some(router) = router.upgrade() else {
                return;
            };
            if let Ok(mut router) = router.lock() {
                router.pump();
            }
        });
    });
}

/// Sets up all UI event handlers for the application.
///
/// Takes the UI handle, the shared router and the event sink, then registers
/// callbacks for directory selection, template edits, history and gallery actions.
pub fn setup_handlers(ui: &crate::AppWindow, router: Arc<Mutex<EventRouter>>, sink: EventSink) {
    let logic = ui.global::<crate::Logic>();

    // Directory selection handler
    // AsyncFileDialogはメインスレッドで実行する必要があるのでrayon禁止。
    logic.on_select_dir({
        let router = router.clone();
        move || {
            let router = router.clone();
            let _ = slint::spawn_local(async move {
                let dir = pick_directory().await.unwrap_or_default();
                run_action(&router, UserAction::SelectDirectory(dir));
            });
        }
    });

    // Ctrl/Cmd+O: the choice comes back as a set-new-dir event
    logic.on_open_dir(move || select_dir_and_notify(sink.clone()));

    logic.on_template_edited({
        let router = router.clone();
        move |text| run_action(&router, UserAction::EditTemplate(text.to_string()))
    });

    logic.on_reset_template({
        let router = router.clone();
        move || run_action(&router, UserAction::ResetTemplate)
    });

    logic.on_open_history({
        let router = router.clone();
        move || run_action(&router, UserAction::OpenHistory)
    });

    logic.on_select_history({
        let router = router.clone();
        move |index| {
            let index = usize::try_from(index).unwrap_or(usize::MAX);
            run_action(&router, UserAction::SelectHistory(index));
        }
    });

    logic.on_close_history({
        let ui_handle = ui.as_weak();
        move || {
            if let Some(ui) = ui_handle.upgrade() {
                ui.global::<crate::ViewState>().set_history_open(false);
            }
        }
    });

    logic.on_copy_url({
        let router = router.clone();
        move |name| run_action(&router, UserAction::CopyUrl(name.to_string()))
    });

    logic.on_delete_file({
        let router = router.clone();
        move |name| run_action(&router, UserAction::DeleteFile(name.to_string()))
    });

    logic.on_paste({
        let router = router.clone();
        let ui_handle = ui.as_weak();
        move || match ClipboardService::new().read_items() {
            Ok(items) => run_action(&router, UserAction::Paste(items)),
            Err(e) => {
                if let Some(ui) = ui_handle.upgrade() {
                    crate::ui::set_error_with_prefix(&ui, "Failed to read clipboard", e.to_string());
                }
            }
        }
    });

    logic.on_reload(move || run_action(&router, UserAction::Reload));
}
