//! In-memory fakes for the router's collaborators.

use crate::error::{AppError, Result};
use crate::router::Presenter;
use crate::services::settings_service::{PersistedSettings, SettingsStore};
use crate::services::{Backend, FileReference};
use crate::state::{HistoryItem, StoreOp};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// Ordered record of calls made across all fakes.
#[derive(Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<String>>>);

impl CallLog {
    pub fn push(&self, entry: impl Into<String>) {
        self.0.lock().unwrap().push(entry.into());
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.entries().iter().filter(|e| e.starts_with(prefix)).count()
    }

    pub fn position(&self, entry: &str) -> Option<usize> {
        self.entries().iter().position(|e| e == entry)
    }

    pub fn clear(&self) {
        self.0.lock().unwrap().clear();
    }
}

pub fn file(name: &str) -> FileReference {
    FileReference::new(name, format!("/images/{}", name))
}

/// Backend that records commands and serves queued listings.
#[derive(Clone)]
pub struct FakeBackend {
    log: CallLog,
    listings: Arc<Mutex<VecDeque<Vec<FileReference>>>>,
    failing: Arc<AtomicBool>,
}

impl FakeBackend {
    pub fn new(log: CallLog) -> Self {
        Self {
            log,
            listings: Arc::new(Mutex::new(VecDeque::new())),
            failing: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Queues the result of a future `list_files` call.
    pub fn push_listing(&self, names: &[&str]) {
        let files = names.iter().map(|n| file(n)).collect();
        self.listings.lock().unwrap().push_back(files);
    }

    pub fn fail_commands(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn call(&self, entry: String) -> Result<()> {
        self.log.push(entry);
        if self.failing.load(Ordering::SeqCst) {
            Err(AppError::Io("backend offline".to_string()))
        } else {
            Ok(())
        }
    }
}

impl Backend for FakeBackend {
    fn list_files(&self) -> Result<Vec<FileReference>> {
        self.call("backend:list_files".to_string())?;
        Ok(self.listings.lock().unwrap().pop_front().unwrap_or_default())
    }

    fn copy_url(&self, file: &FileReference) -> Result<()> {
        self.call(format!("backend:copy_url={}", file.name))
    }

    fn delete_file(&self, file: &FileReference) -> Result<()> {
        self.call(format!("backend:delete_file={}", file.name))
    }

    fn save_image(&self, data_url: &str) -> Result<()> {
        self.call(format!("backend:save_image={}", data_url))
    }

    fn select_dir_and_notify(&self) -> Result<()> {
        self.call("backend:select_dir_and_notify".to_string())
    }

    fn set_target_dir(&self, directory: &str) -> Result<()> {
        self.call(format!("backend:set_target_dir={}", directory))
    }

    fn set_template(&self, template: &str) -> Result<()> {
        self.call(format!("backend:set_template={}", template))
    }
}

/// Presenter that records what would be shown.
pub struct FakePresenter {
    log: CallLog,
}

impl FakePresenter {
    pub fn new(log: CallLog) -> Self {
        Self { log }
    }
}

impl Presenter for FakePresenter {
    fn render_images(&mut self, files: &[FileReference]) {
        let names: Vec<&str> = files.iter().map(|f| f.name.as_str()).collect();
        self.log.push(format!("view:render={}", names.join(",")));
    }

    fn show_toast(&mut self, message: &str) {
        self.log.push(format!("view:toast={}", message));
    }

    fn show_error(&mut self, message: &str) {
        self.log.push(format!("view:error={}", message));
    }

    fn show_directory(&mut self, directory: Option<&str>) {
        self.log
            .push(format!("view:directory={}", directory.unwrap_or("<unset>")));
    }

    fn show_template(&mut self, template: &str) {
        self.log.push(format!("view:template={}", template));
    }

    fn show_directory_notice(&mut self, visible: bool) {
        self.log.push(format!("view:notice={}", visible));
    }

    fn show_history(&mut self, items: &[HistoryItem]) {
        self.log.push(format!("view:history={}", items.len()));
    }

    fn close_history(&mut self) {
        self.log.push("view:history_closed");
    }
}

/// Settings store kept in memory.
pub struct MemoryStore {
    log: CallLog,
    settings: PersistedSettings,
    failing_history_writes: usize,
}

impl MemoryStore {
    pub fn new(log: CallLog, settings: PersistedSettings) -> Self {
        Self {
            log,
            settings,
            failing_history_writes: 0,
        }
    }

    /// Makes the next `count` history writes fail without storing anything.
    pub fn failing_history_writes(mut self, count: usize) -> Self {
        self.failing_history_writes = count;
        self
    }
}

impl SettingsStore for MemoryStore {
    fn load(&self) -> PersistedSettings {
        self.settings.clone()
    }

    fn apply(&mut self, op: &StoreOp) -> Result<()> {
        if matches!(op, StoreOp::History(_)) && self.failing_history_writes > 0 {
            self.failing_history_writes -= 1;
            self.log.push("store:history_failed");
            return Err(AppError::Settings("disk full".to_string()));
        }

        let entry = match op {
            StoreOp::TargetDir(dir) => format!("store:target_dir={}", dir),
            StoreOp::Template(template) => format!("store:template={}", template),
            StoreOp::History(history) => format!("store:history={}", history.len()),
        };
        self.log.push(entry);
        self.settings.apply(op);
        Ok(())
    }
}
