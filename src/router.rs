//! Event ingestion router.
//!
//! Owns the session, the history and the image list snapshot. Backend
//! events and user actions are handled one at a time on the UI thread, each
//! running to completion before the next starts. Every state change is
//! persisted before the backend is told about it.

use crate::config::INITIAL_TEMPLATE;
use crate::error::{AppError, Result};
use crate::events::{BackendEvent, Inbox};
use crate::services::clipboard_service::ClipboardItem;
use crate::services::paste_service::PasteService;
use crate::services::settings_service::SettingsStore;
use crate::services::{Backend, FileReference};
use crate::state::{
    ActiveSession, BackendNotice, HistoryItem, HistoryList, ImageListViewModel, SessionUpdate,
    StoreOp,
};
use log::{debug, error, info, warn};

/// Where the router shows results.
pub trait Presenter: Send {
    /// Replaces the whole gallery.
    fn render_images(&mut self, files: &[FileReference]);
    fn show_toast(&mut self, message: &str);
    fn show_error(&mut self, message: &str);
    fn show_directory(&mut self, directory: Option<&str>);
    fn show_template(&mut self, template: &str);
    /// Toggles the "choose a directory first" notice.
    fn show_directory_notice(&mut self, visible: bool);
    fn show_history(&mut self, items: &[HistoryItem]);
    fn close_history(&mut self);
}

/// Input originating from the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    /// Result of the directory chooser; empty when cancelled.
    SelectDirectory(String),
    EditTemplate(String),
    ResetTemplate,
    OpenHistory,
    SelectHistory(usize),
    CopyUrl(String),
    DeleteFile(String),
    Paste(Vec<ClipboardItem>),
    Reload,
}

/// Single owner of session and history state.
pub struct EventRouter {
    session: ActiveSession,
    history: HistoryList,
    image_list: ImageListViewModel,
    backend: Box<dyn Backend>,
    presenter: Box<dyn Presenter>,
    store: Box<dyn SettingsStore>,
    inbox: Inbox,
    paste: PasteService,
}

impl EventRouter {
    /// Builds the router from persisted state. Nothing is sent until [`start`](Self::start).
    pub fn new(
        backend: Box<dyn Backend>,
        presenter: Box<dyn Presenter>,
        store: Box<dyn SettingsStore>,
        inbox: Inbox,
    ) -> Self {
        let settings = store.load();
        let template = settings
            .template
            .unwrap_or_else(|| INITIAL_TEMPLATE.to_string());

        Self {
            session: ActiveSession::restore(settings.target_dir, template),
            history: settings.history,
            image_list: ImageListViewModel::new(),
            backend,
            presenter,
            store,
            inbox,
            paste: PasteService::new(),
        }
    }

    pub fn session(&self) -> &ActiveSession {
        &self.session
    }

    pub fn history(&self) -> &HistoryList {
        &self.history
    }

    pub fn files(&self) -> &[FileReference] {
        self.image_list.files()
    }

    /// Pushes the restored session to the view and backend.
    ///
    /// Without a stored directory the user is asked to pick one and the
    /// notice stays up until a directory arrives. With one, the gallery is
    /// filled by the `image-list-update` the backend pushes for it.
    pub fn start(&mut self) -> Result<()> {
        let template = self.session.template().to_string();
        if self.store.load().template.is_none() {
            self.store.apply(&StoreOp::Template(template.clone()))?;
        }

        self.presenter.show_template(&template);
        self.presenter.show_directory(self.session.directory());
        self.backend.set_template(&template)?;

        match self.session.directory().map(str::to_string) {
            Some(dir) => {
                info!("Restored target directory: {}", dir);
                self.presenter.show_directory_notice(false);
                self.backend.set_target_dir(&dir)
            }
            None => {
                info!("No target directory stored, asking the user");
                self.presenter.show_directory_notice(true);
                self.backend.select_dir_and_notify()?;
                self.refresh()
            }
        }
    }

    /// Drains the inbox, dispatching events in arrival order.
    pub fn pump(&mut self) -> usize {
        let mut handled = 0;
        while let Some(event) = self.inbox.try_next() {
            self.dispatch(event);
            handled += 1;
        }
        handled
    }

    /// Handles one backend event. Failures are reported, not returned.
    pub fn dispatch(&mut self, event: BackendEvent) {
        debug!("Dispatch {}", event.name());
        let result = match event {
            BackendEvent::ImageListUpdate => self.refresh(),
            BackendEvent::ShowToast(message) => {
                self.presenter.show_toast(&message);
                Ok(())
            }
            BackendEvent::SetNewDir(dir) => self.set_directory(&dir),
        };

        if let Err(e) = result {
            self.report(&e);
        }
    }

    /// Handles one user action and reports any failure.
    ///
    /// The error is also returned so callers can inspect it.
    pub fn handle(&mut self, action: UserAction) -> Result<()> {
        let result = match action {
            UserAction::SelectDirectory(dir) => self.set_directory(&dir),
            UserAction::EditTemplate(template) => self.set_template(&template),
            UserAction::ResetTemplate => self.reset_template(),
            UserAction::OpenHistory => self.open_history(),
            UserAction::SelectHistory(index) => self.select_history(index),
            UserAction::CopyUrl(name) => self.copy_url(&name),
            UserAction::DeleteFile(name) => self.delete_file(&name),
            UserAction::Paste(items) => self.paste(&items),
            UserAction::Reload => self.refresh(),
        };

        if let Err(e) = &result {
            self.report(e);
        }
        result
    }

    fn report(&mut self, e: &AppError) {
        match e {
            AppError::EmptyDirectorySelection => debug!("Directory selection cancelled"),
            AppError::EmptyHistory => self.presenter.show_toast(&e.to_string()),
            AppError::InvalidSelection { .. } => {
                warn!("{}", e);
                self.presenter.show_error(&e.to_string());
            }
            other => {
                error!("{}", other);
                self.presenter.show_error(&other.to_string());
            }
        }
    }

    /// Re-lists the target directory and replaces the gallery.
    fn refresh(&mut self) -> Result<()> {
        let files = self.image_list.refresh(self.backend.as_ref())?;
        self.presenter.render_images(files);
        Ok(())
    }

    /// Writes every store op, then issues every notification.
    fn commit(&mut self, update: SessionUpdate) -> Result<()> {
        for op in &update.store {
            if let Err(e) = self.store.apply(op) {
                self.session.forget_last_saved();
                return Err(e);
            }
        }
        for notice in &update.notify {
            match notice {
                BackendNotice::TargetDir(dir) => self.backend.set_target_dir(dir)?,
                BackendNotice::Template(template) => self.backend.set_template(template)?,
            }
        }
        Ok(())
    }

    fn set_directory(&mut self, dir: &str) -> Result<()> {
        if dir.is_empty() {
            return Err(AppError::EmptyDirectorySelection);
        }

        info!("Target directory: {}", dir);
        let update = self.session.set_directory(&mut self.history, dir);
        self.presenter.show_directory(self.session.directory());
        self.presenter.show_directory_notice(false);
        self.commit(update)
    }

    fn set_template(&mut self, template: &str) -> Result<()> {
        let update = self.session.set_template(&mut self.history, template);
        self.commit(update)
    }

    fn reset_template(&mut self) -> Result<()> {
        let update = self.session.reset_template(&mut self.history);
        self.presenter.show_template(self.session.template());
        self.commit(update)
    }

    fn open_history(&mut self) -> Result<()> {
        if self.history.is_empty() {
            return Err(AppError::EmptyHistory);
        }
        self.presenter.show_history(self.history.items());
        Ok(())
    }

    fn select_history(&mut self, index: usize) -> Result<()> {
        let item = self.history.select(index)?.clone();
        info!("Restoring history entry: {} / {}", item.directory, item.template);

        let update = self.session.apply_history_item(&mut self.history, item);
        self.presenter.close_history();
        self.presenter.show_directory(self.session.directory());
        self.presenter.show_template(self.session.template());
        self.presenter.show_directory_notice(false);
        self.commit(update)
    }

    fn find_file(&self, name: &str) -> Option<FileReference> {
        self.image_list.files().iter().find(|f| f.name == name).cloned()
    }

    fn copy_url(&mut self, name: &str) -> Result<()> {
        match self.find_file(name) {
            Some(file) => self.backend.copy_url(&file),
            None => {
                warn!("Copy requested for unlisted file: {}", name);
                Ok(())
            }
        }
    }

    fn delete_file(&mut self, name: &str) -> Result<()> {
        match self.find_file(name) {
            Some(file) => self.backend.delete_file(&file),
            None => {
                warn!("Delete requested for unlisted file: {}", name);
                Ok(())
            }
        }
    }

    fn paste(&mut self, items: &[ClipboardItem]) -> Result<()> {
        let forwarded = self.paste.ingest(items, self.backend.as_ref())?;
        debug!("Pasted {} image(s)", forwarded);
        Ok(())
    }
}
