//! Helper functions to set multiple ViewState properties in a grouped manner.
//!
//! Instead of calling individual setters like set_images, set_history, set_history_open, etc.,
//! these functions group related properties together for better code organization and maintainability.

use crate::services::FileReference;
use crate::state::HistoryItem;
use log::error;
use slint::ComponentHandle;

/// Replaces the gallery entries.
///
/// Files that fail to decode are shown with an empty image.
pub fn set_images(ui: &crate::AppWindow, files: &[FileReference]) {
    let entries: Vec<crate::ImageEntry> = files
        .iter()
        .map(|file| crate::ImageEntry {
            name: file.name.as_str().into(),
            image: slint::Image::load_from_path(&file.path).unwrap_or_default(),
        })
        .collect();

    ui.global::<crate::ViewState>()
        .set_images(slint::ModelRc::new(slint::VecModel::from(entries)));
}

/// Sets all history dialog properties at once.
///
/// Groups: history, history-open
pub fn set_history(ui: &crate::AppWindow, items: &[HistoryItem], open: bool) {
    let entries: Vec<crate::HistoryEntry> = items
        .iter()
        .map(|item| crate::HistoryEntry {
            directory: item.directory.as_str().into(),
            template: item.template.as_str().into(),
        })
        .collect();

    let view_state = ui.global::<crate::ViewState>();
    view_state.set_history(slint::ModelRc::new(slint::VecModel::from(entries)));
    view_state.set_history_open(open);
}

/// Sets an error message in the UI with a prefix.
///
/// Logs the error and updates the ViewState error-message property.
pub fn set_error_with_prefix(ui: &crate::AppWindow, prefix: &str, error: String) {
    let error_message = format!("{}: {}", prefix, error);
    error!("{}", error_message);
    ui.global::<crate::ViewState>()
        .set_error_message(error_message.into());
}

pub fn clear_error(ui: &crate::AppWindow) {
    ui.global::<crate::ViewState>().set_error_message("".into());
}
