//! Slint implementation of the router's [`Presenter`].

use crate::config::TOAST_DURATION;
use crate::router::Presenter;
use crate::services::FileReference;
use crate::state::HistoryItem;
use crate::ui::state_helpers;
use slint::ComponentHandle;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Writes router output into the window's ViewState global.
pub struct SlintPresenter {
    ui: slint::Weak<crate::AppWindow>,
    /// Bumped per toast so an older timer never clears a newer message.
    toast_generation: Arc<AtomicU64>,
}

impl SlintPresenter {
    pub fn new(ui: slint::Weak<crate::AppWindow>) -> Self {
        Self {
            ui,
            toast_generation: Arc::new(AtomicU64::new(0)),
        }
    }
}

impl Presenter for SlintPresenter {
    fn render_images(&mut self, files: &[FileReference]) {
        if let Some(ui) = self.ui.upgrade() {
            state_helpers::set_images(&ui, files);
            state_helpers::clear_error(&ui);
        }
    }

    fn show_toast(&mut self, message: &str) {
        let Some(ui) = self.ui.upgrade() else {
            return;
        };
        ui.global::<crate::ViewState>()
            .set_toast_message(message.into());

        let generation = self.toast_generation.fetch_add(1, Ordering::SeqCst) + 1;
        let current = self.toast_generation.clone();
        let ui_handle = self.ui.clone();
        slint::Timer::single_shot(TOAST_DURATION, move || {
            if current.load(Ordering::SeqCst) != generation {
                return;
            }
            if let Some(ui) = ui_handle.upgrade() {
                ui.global::<crate::ViewState>().set_toast_message("".into());
            }
        });
    }

    fn show_error(&mut self, message: &str) {
        if let Some(ui) = self.ui.upgrade() {
            ui.global::<crate::ViewState>()
                .set_error_message(message.into());
        }
    }

    fn show_directory(&mut self, directory: Option<&str>) {
        if let Some(ui) = self.ui.upgrade() {
            ui.global::<crate::ViewState>()
                .set_target_dir(directory.unwrap_or("No directory selected").into());
        }
    }

    fn show_template(&mut self, template: &str) {
        if let Some(ui) = self.ui.upgrade() {
            ui.global::<crate::ViewState>()
                .set_template_text(template.into());
        }
    }

    fn show_directory_notice(&mut self, visible: bool) {
        if let Some(ui) = self.ui.upgrade() {
            ui.global::<crate::ViewState>()
                .set_show_dir_notice(visible);
        }
    }

    fn show_history(&mut self, items: &[HistoryItem]) {
        if let Some(ui) = self.ui.upgrade() {
            state_helpers::set_history(&ui, items, true);
        }
    }

    fn close_history(&mut self) {
        if let Some(ui) = self.ui.upgrade() {
            ui.global::<crate::ViewState>().set_history_open(false);
        }
    }
}
