//! Most-recently-used history of (directory, template) pairs.
//!
//! Each directory remembers exactly one template. The list is ordered
//! MRU-first and never holds more than [`MAX_HISTORY`] entries.

use crate::config::MAX_HISTORY;
use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};

/// One remembered directory with the template last used for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryItem {
    pub directory: String,
    pub template: String,
}

impl HistoryItem {
    pub fn new(directory: impl Into<String>, template: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            template: template.into(),
        }
    }
}

/// Deduplicated, bounded, MRU-first list of [`HistoryItem`]s.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistoryList {
    items: Vec<HistoryItem>,
}

impl HistoryList {
    /// Creates an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a history from stored items, dropping later duplicates and
    /// anything past capacity.
    pub fn from_items(items: Vec<HistoryItem>) -> Self {
        let mut normalized: Vec<HistoryItem> = Vec::with_capacity(items.len().min(MAX_HISTORY));
        for item in items {
            if normalized.len() == MAX_HISTORY {
                break;
            }
            if !normalized.iter().any(|i| i.directory == item.directory) {
                normalized.push(item);
            }
        }
        Self { items: normalized }
    }

    /// Returns a new list with `item` at the front.
    ///
    /// Any entry with the same directory is removed first; capacity is
    /// enforced after insertion.
    pub fn record_usage(&self, item: HistoryItem) -> HistoryList {
        let mut items: Vec<HistoryItem> = self
            .items
            .iter()
            .filter(|i| i.directory != item.directory)
            .cloned()
            .collect();

        items.insert(0, item);
        items.truncate(MAX_HISTORY);
        HistoryList { items }
    }

    /// Returns the entry at `index`.
    pub fn select(&self, index: usize) -> Result<&HistoryItem> {
        self.items.get(index).ok_or(AppError::InvalidSelection {
            index,
            len: self.items.len(),
        })
    }

    pub fn items(&self) -> &[HistoryItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
