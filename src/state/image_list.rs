//! Snapshot of the images currently shown in the gallery.

use crate::error::Result;
use crate::services::{Backend, FileReference};
use log::debug;

/// Holds the last listing pulled from the backend.
#[derive(Debug, Default)]
pub struct ImageListViewModel {
    files: Vec<FileReference>,
}

impl ImageListViewModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pulls a fresh listing and replaces the snapshot wholesale.
    ///
    /// On error the previous snapshot is kept.
    pub fn refresh(&mut self, backend: &dyn Backend) -> Result<&[FileReference]> {
        let files = backend.list_files()?;
        debug!("Image list refreshed: {} file(s)", files.len());
        self.files = files;
        Ok(&self.files)
    }

    pub fn files(&self) -> &[FileReference] {
        &self.files
    }
}
