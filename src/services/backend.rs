//! Command boundary between the UI core and the backend collaborator.

use crate::error::Result;
use std::fmt;
use std::path::PathBuf;

/// Handle to one image in the target directory, as listed by the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReference {
    /// File name, used for template substitution.
    pub name: String,
    /// Absolute location, used for display.
    pub path: PathBuf,
}

impl FileReference {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

impl fmt::Display for FileReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Requests the core issues to the backend.
///
/// Results of asynchronous work (saved files, deletions, directory changes)
/// come back as [`crate::events::BackendEvent`]s rather than return values.
pub trait Backend: Send {
    /// Lists images in the current target directory.
    fn list_files(&self) -> Result<Vec<FileReference>>;

    /// Copies the file's link, rendered through the current template.
    fn copy_url(&self, file: &FileReference) -> Result<()>;

    fn delete_file(&self, file: &FileReference) -> Result<()>;

    /// Stores an image given as a `data:` URL.
    fn save_image(&self, data_url: &str) -> Result<()>;

    /// Asks the user for a directory; the choice arrives as `set-new-dir`.
    fn select_dir_and_notify(&self) -> Result<()>;

    fn set_target_dir(&self, directory: &str) -> Result<()>;

    fn set_template(&self, template: &str) -> Result<()>;
}
