//! The currently selected target directory and link template.
//!
//! Mutations never perform I/O. Each returns a [`SessionUpdate`] listing the
//! persistence writes and backend notifications the caller must issue, in
//! that order.

use crate::config::INITIAL_TEMPLATE;
use crate::state::history::{HistoryItem, HistoryList};

/// A write to persisted key/value state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreOp {
    TargetDir(String),
    Template(String),
    History(HistoryList),
}

/// A change the backend collaborator must be told about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendNotice {
    TargetDir(String),
    Template(String),
}

/// Side effects produced by a session mutation.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SessionUpdate {
    pub store: Vec<StoreOp>,
    pub notify: Vec<BackendNotice>,
}

impl SessionUpdate {
    pub fn is_empty(&self) -> bool {
        self.store.is_empty() && self.notify.is_empty()
    }
}

/// In-memory projection of the persisted directory and template.
#[derive(Debug, Clone)]
pub struct ActiveSession {
    directory: Option<String>,
    template: String,
    /// Last pair written to history; suppresses repeated identical writes.
    last_saved: Option<HistoryItem>,
}

impl Default for ActiveSession {
    fn default() -> Self {
        Self::restore(None, INITIAL_TEMPLATE.to_string())
    }
}

impl ActiveSession {
    /// Rebuilds the session from persisted values.
    ///
    /// When a directory is known the pair is treated as already recorded, so
    /// launching the app does not touch history.
    pub fn restore(directory: Option<String>, template: String) -> Self {
        let directory = directory.filter(|d| !d.is_empty());
        let last_saved = directory
            .as_ref()
            .map(|dir| HistoryItem::new(dir.clone(), template.clone()));

        Self {
            directory,
            template,
            last_saved,
        }
    }

    pub fn directory(&self) -> Option<&str> {
        self.directory.as_deref()
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn last_saved(&self) -> Option<&HistoryItem> {
        self.last_saved.as_ref()
    }

    /// Records `candidate` unless it equals the last recorded pair.
    ///
    /// Returns the history write to persist, if any.
    pub fn maybe_record_usage(
        &mut self,
        history: &mut HistoryList,
        candidate: HistoryItem,
    ) -> Option<StoreOp> {
        if self.last_saved.as_ref() == Some(&candidate) {
            return None;
        }

        *history = history.record_usage(candidate.clone());
        self.last_saved = Some(candidate);
        Some(StoreOp::History(history.clone()))
    }

    /// Forgets the last recorded pair so the next identical usage is written again.
    pub fn forget_last_saved(&mut self) {
        self.last_saved = None;
    }

    /// Switches the target directory. Empty input is ignored.
    pub fn set_directory(&mut self, history: &mut HistoryList, dir: &str) -> SessionUpdate {
        if dir.is_empty() {
            return SessionUpdate::default();
        }

        self.directory = Some(dir.to_string());

        let mut update = SessionUpdate {
            store: vec![StoreOp::TargetDir(dir.to_string())],
            notify: vec![BackendNotice::TargetDir(dir.to_string())],
        };
        let candidate = HistoryItem::new(dir, self.template.clone());
        update.store.extend(self.maybe_record_usage(history, candidate));
        update
    }

    /// Replaces the template. History is only touched once a directory is set.
    pub fn set_template(&mut self, history: &mut HistoryList, template: &str) -> SessionUpdate {
        self.template = template.to_string();

        let mut update = SessionUpdate {
            store: vec![StoreOp::Template(template.to_string())],
            notify: vec![BackendNotice::Template(template.to_string())],
        };
        if let Some(dir) = self.directory.clone() {
            let candidate = HistoryItem::new(dir, template);
            update.store.extend(self.maybe_record_usage(history, candidate));
        }
        update
    }

    pub fn reset_template(&mut self, history: &mut HistoryList) -> SessionUpdate {
        self.set_template(history, INITIAL_TEMPLATE)
    }

    /// Restores both fields of a history entry as one transition.
    pub fn apply_history_item(
        &mut self,
        history: &mut HistoryList,
        item: HistoryItem,
    ) -> SessionUpdate {
        self.directory = Some(item.directory.clone());
        self.template = item.template.clone();

        let mut update = SessionUpdate {
            store: vec![
                StoreOp::TargetDir(item.directory.clone()),
                StoreOp::Template(item.template.clone()),
            ],
            notify: vec![
                BackendNotice::Template(item.template.clone()),
                BackendNotice::TargetDir(item.directory.clone()),
            ],
        };
        update.store.extend(self.maybe_record_usage(history, item));
        update
    }
}
