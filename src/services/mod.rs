//! Service layer: the backend collaborator and its helpers.
//!
//! Separates filesystem, clipboard and persistence work from the router and UI handlers.

pub mod backend;
pub mod clipboard_service;
pub mod dir_picker;
pub mod dir_watch_service;
pub mod paste_service;
pub mod settings_service;
pub mod target_dir_service;

pub use backend::{Backend, FileReference};
pub use clipboard_service::{ClipboardItem, ClipboardService};
pub use dir_watch_service::DirWatchService;
pub use paste_service::PasteService;
pub use settings_service::{JsonSettingsStore, SettingsStore};
pub use target_dir_service::TargetDirBackend;
