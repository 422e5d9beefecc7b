//! Watches the target directory and asks the UI to re-list on changes.

use crate::config::WATCH_DEBOUNCE;
use crate::error::{AppError, Result};
use crate::events::{BackendEvent, EventSink};
use crate::file_utils::{PathExt, is_supported_image};
use log::{debug, warn};
use notify_debouncer_mini::notify::{PollWatcher, RecursiveMode};
use notify_debouncer_mini::{Config, DebounceEventResult, DebouncedEvent, Debouncer, new_debouncer_opt};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Live watcher; dropping it stops watching.
pub type DirWatcher = Debouncer<PollWatcher>;

/// Service creating debounced directory watchers.
#[derive(Clone)]
pub struct DirWatchService {
    sink: EventSink,
}

fn handle_debounced_events(events: Vec<DebouncedEvent>, sink: &EventSink) {
    for event in &events {
        debug!("  - {:?} for {}", event.kind, event.path.format_for_log());
    }

    let paths: Vec<PathBuf> = events.into_iter().map(|event| event.path).collect();
    notify_if_images_changed(&paths, sink);
}

/// Emits one `image-list-update` for a batch touching any image file.
fn notify_if_images_changed(paths: &[PathBuf], sink: &EventSink) -> bool {
    let changed = paths.iter().filter(|path| is_supported_image(path)).count();
    if changed == 0 {
        return false;
    }

    debug!("Debounced file system events: {} image path(s)", changed);
    sink.emit(BackendEvent::ImageListUpdate);
    true
}

impl DirWatchService {
    /// Creates a new watch service reporting to `sink`.
    pub fn new(sink: EventSink) -> Self {
        Self { sink }
    }

    /// Starts watching `directory` (non-recursive).
    pub fn start_watching(&self, directory: &Path) -> Result<DirWatcher> {
        let sink = self.sink.clone();

        let notify_config = notify_debouncer_mini::notify::Config::default()
            .with_poll_interval(Duration::from_secs(2));
        let debouncer_config = Config::default()
            .with_timeout(WATCH_DEBOUNCE)
            .with_notify_config(notify_config);

        let mut debouncer = new_debouncer_opt::<_, PollWatcher>(
            debouncer_config,
            move |res: DebounceEventResult| match res {
                Ok(events) => handle_debounced_events(events, &sink),
                Err(error) => warn!("File watcher error: {}", error),
            },
        )
        .map_err(|e| AppError::Watch(format!("Failed to create debouncer: {}", e)))?;

        debouncer
            .watcher()
            .watch(directory, RecursiveMode::NonRecursive)
            .map_err(|e| AppError::Watch(format!("Failed to watch directory: {}", e)))?;

        debug!("Watching {}", directory.display());
        Ok(debouncer)
    }
}
