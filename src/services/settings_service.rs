//! Persisted key/value state: target directory, template and history.
//!
//! Stored as one JSON document under the platform config directory
//! (`~/.config/mdimgr/settings.json` on Linux). The whole file is rewritten
//! on every change.

use crate::config::{APP_DIR_NAME, CONFIG_DIR_ENV, SETTINGS_FILE_NAME};
use crate::error::{AppError, Result};
use crate::state::{HistoryList, StoreOp};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Everything that survives a restart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistedSettings {
    pub target_dir: Option<String>,
    pub template: Option<String>,
    pub history: HistoryList,
}

impl PersistedSettings {
    /// Applies one write to the in-memory copy.
    pub fn apply(&mut self, op: &StoreOp) {
        match op {
            StoreOp::TargetDir(dir) => self.target_dir = Some(dir.clone()),
            StoreOp::Template(template) => self.template = Some(template.clone()),
            StoreOp::History(history) => self.history = history.clone(),
        }
    }
}

/// Durable storage for [`PersistedSettings`].
pub trait SettingsStore: Send {
    /// Returns the currently stored settings.
    fn load(&self) -> PersistedSettings;

    /// Applies and durably records one write.
    fn apply(&mut self, op: &StoreOp) -> Result<()>;
}

/// JSON file backed settings store.
pub struct JsonSettingsStore {
    path: PathBuf,
    current: PersistedSettings,
}

impl JsonSettingsStore {
    /// Opens the store at the default location.
    pub fn open_default() -> Result<Self> {
        Ok(Self::open(Self::settings_dir()?.join(SETTINGS_FILE_NAME)))
    }

    /// Resolves the settings directory, honoring the override variable.
    pub fn settings_dir() -> Result<PathBuf> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV).filter(|d| !d.is_empty()) {
            return Ok(PathBuf::from(dir));
        }

        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR_NAME))
            .ok_or_else(|| AppError::Settings("Cannot find config directory".to_string()))
    }

    /// Opens the store at `path`. A missing or unreadable file yields defaults.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let current = match Self::read(&path) {
            Ok(Some(settings)) => {
                info!("Loaded settings from {}", path.display());
                settings
            }
            Ok(None) => {
                debug!("No settings at {}, using defaults", path.display());
                PersistedSettings::default()
            }
            Err(e) => {
                warn!("Ignoring settings at {}: {}", path.display(), e);
                PersistedSettings::default()
            }
        };

        Self { path, current }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(path: &Path) -> Result<Option<PersistedSettings>> {
        if !path.exists() {
            return Ok(None);
        }

        let text = fs::read_to_string(path)?;
        let mut settings: PersistedSettings = serde_json::from_str(&text)?;
        settings.history = HistoryList::from_items(settings.history.items().to_vec());
        Ok(Some(settings))
    }

    fn write(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(&self.current)?;
        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }
}

impl SettingsStore for JsonSettingsStore {
    fn load(&self) -> PersistedSettings {
        self.current.clone()
    }

    fn apply(&mut self, op: &StoreOp) -> Result<()> {
        self.current.apply(op);
        self.write()
            .map_err(|e| AppError::Settings(format!("{}: {}", self.path.display(), e)))
    }
}
