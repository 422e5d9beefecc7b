//! Native folder chooser.
//!
//! AsyncFileDialog must run on the main thread, so both entry points are
//! driven by `slint::spawn_local`, never by rayon.

use crate::events::{BackendEvent, EventSink};
use log::{debug, error};
use rfd::AsyncFileDialog;

/// Shows the folder chooser and returns the picked path, or `None` when cancelled.
pub async fn pick_directory() -> Option<String> {
    let handle = AsyncFileDialog::new()
        .set_title("Select target directory")
        .pick_folder()
        .await?;

    Some(handle.path().to_string_lossy().into_owned())
}

/// Shows the folder chooser and pushes the choice as `set-new-dir`.
pub fn select_dir_and_notify(sink: EventSink) {
    let spawned = slint::spawn_local(async move {
        match pick_directory().await {
            Some(dir) => sink.emit(BackendEvent::SetNewDir(dir)),
            None => debug!("Directory chooser cancelled"),
        }
    });

    if let Err(e) = spawned {
        error!("Failed to open directory chooser: {}", e);
    }
}
