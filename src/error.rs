//! Unified error types for the application.

use std::fmt;

/// Application-specific errors.
#[derive(Debug)]
pub enum AppError {
    /// History index outside the current list bounds
    InvalidSelection { index: usize, len: usize },
    /// History dialog requested while no entries exist
    EmptyHistory,
    /// Directory chooser was cancelled
    EmptyDirectorySelection,
    /// A command needs a target directory but none is set
    NoTargetDirectory,
    /// Malformed data URL handed to the save command
    InvalidDataUrl(String),
    /// Filesystem error in the target directory
    Io(String),
    /// Persisted settings could not be read or written
    Settings(String),
    /// OS clipboard access failed
    Clipboard(String),
    /// Clipboard image could not be encoded
    ImageEncode(String),
    /// Directory watcher could not be started
    Watch(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::InvalidSelection { index, len } => {
                write!(f, "Invalid history selection: {} (entries: {})", index, len)
            }
            AppError::EmptyHistory => write!(f, "No history yet"),
            AppError::EmptyDirectorySelection => write!(f, "No directory selected"),
            AppError::NoTargetDirectory => write!(f, "Target directory is not set"),
            AppError::InvalidDataUrl(msg) => write!(f, "Invalid data URL: {}", msg),
            AppError::Io(msg) => write!(f, "File error: {}", msg),
            AppError::Settings(msg) => write!(f, "Settings error: {}", msg),
            AppError::Clipboard(msg) => write!(f, "Clipboard error: {}", msg),
            AppError::ImageEncode(msg) => write!(f, "Image encode error: {}", msg),
            AppError::Watch(msg) => write!(f, "Directory watch error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Settings(err.to_string())
    }
}

impl From<base64::DecodeError> for AppError {
    fn from(err: base64::DecodeError) -> Self {
        AppError::InvalidDataUrl(err.to_string())
    }
}

impl From<image::ImageError> for AppError {
    fn from(err: image::ImageError) -> Self {
        AppError::ImageEncode(err.to_string())
    }
}

/// Type alias for Results in this application.
pub type Result<T> = std::result::Result<T, AppError>;
