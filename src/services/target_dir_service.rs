//! Backend collaborator owning the target directory.
//!
//! Blocking file writes run on rayon; their outcome is reported back
//! through the event sink instead of return values.

use crate::config::SAVED_FILE_TIME_FORMAT;
use crate::error::{AppError, Result};
use crate::events::{BackendEvent, EventSink};
use crate::file_utils::{
    PathExt, apply_template, decode_data_url, is_supported_image, scan_directory,
    unique_image_path,
};
use crate::services::dir_picker;
use crate::services::dir_watch_service::{DirWatchService, DirWatcher};
use crate::services::{Backend, ClipboardService, FileReference};
use log::{error, info, warn};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Default)]
struct TargetDirState {
    directory: Option<PathBuf>,
    template: String,
    /// Kept alive while the directory is current.
    watcher: Option<DirWatcher>,
}

/// Filesystem and clipboard backed [`Backend`].
#[derive(Clone)]
pub struct TargetDirBackend {
    state: Arc<Mutex<TargetDirState>>,
    sink: EventSink,
    watch: DirWatchService,
    clipboard: Arc<ClipboardService>,
}

fn timestamp() -> String {
    chrono::Local::now().format(SAVED_FILE_TIME_FORMAT).to_string()
}

/// Decodes `data_url` and writes it to a fresh file in `dir`.
pub fn write_data_url(dir: &Path, data_url: &str) -> Result<PathBuf> {
    let (ext, bytes) = decode_data_url(data_url)?;
    let path = unique_image_path(dir, &timestamp(), ext);
    fs::write(&path, &bytes)?;
    info!("Saved: {}, bytesize: {}", path.display(), bytes.len());
    Ok(path)
}

/// Copies an image file into `dir` under a fresh timestamped name.
pub fn copy_into(dir: &Path, source: &Path) -> Result<PathBuf> {
    let ext = source
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
        .unwrap_or_else(|| "png".to_string());
    let dest = unique_image_path(dir, &timestamp(), &ext);
    fs::copy(source, &dest)?;
    info!("Copied {} -> {}", source.display(), dest.display());
    Ok(dest)
}

impl TargetDirBackend {
    /// Creates a backend with no target directory, reporting to `sink`.
    pub fn new(sink: EventSink) -> Self {
        Self {
            state: Arc::new(Mutex::new(TargetDirState::default())),
            watch: DirWatchService::new(sink.clone()),
            sink,
            clipboard: Arc::new(ClipboardService::new()),
        }
    }

    fn state(&self) -> MutexGuard<'_, TargetDirState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Current target directory.
    pub fn directory(&self) -> Result<PathBuf> {
        self.state()
            .directory
            .clone()
            .ok_or(AppError::NoTargetDirectory)
    }

    /// Text placed on the clipboard for `file`.
    pub fn url_for(&self, file: &FileReference) -> String {
        apply_template(&self.state().template, &file.name)
    }

    /// Resolves a listed file inside the target directory.
    ///
    /// Only the final path component of the reference is used.
    fn resolve(&self, file: &FileReference) -> Result<PathBuf> {
        let name = Path::new(&file.name)
            .file_name()
            .ok_or_else(|| AppError::Io(format!("Invalid file name: {}", file.name)))?;
        Ok(self.directory()?.join(name))
    }

    /// Copies dropped image files into the target directory.
    ///
    /// Non-image paths are skipped. Returns how many files were copied.
    pub fn drop_files(&self, paths: &[PathBuf]) -> Result<usize> {
        let dir = self.directory()?;
        let mut copied = 0;
        let mut result = Ok(());

        for path in paths.iter().filter(|p| is_supported_image(p)) {
            if let Err(e) = copy_into(&dir, path) {
                result = Err(e);
                break;
            }
            copied += 1;
        }

        // Files copied before a failure still need listing.
        if copied > 0 {
            self.sink.emit(BackendEvent::ImageListUpdate);
        }
        result.map(|_| copied)
    }
}

impl Backend for TargetDirBackend {
    fn list_files(&self) -> Result<Vec<FileReference>> {
        let Some(dir) = self.state().directory.clone() else {
            return Ok(Vec::new());
        };

        match scan_directory(&dir) {
            Ok(paths) => Ok(paths
                .into_iter()
                .map(|path| FileReference::new(path.format_for_log(), path))
                .collect()),
            Err(e) => {
                warn!("List files failed for {}: {}", dir.display(), e);
                Ok(Vec::new())
            }
        }
    }

    fn copy_url(&self, file: &FileReference) -> Result<()> {
        let text = self.url_for(file);
        self.clipboard.copy_text(&text)?;
        self.sink
            .emit(BackendEvent::ShowToast(format!("Copied: {}", text)));
        Ok(())
    }

    fn delete_file(&self, file: &FileReference) -> Result<()> {
        let path = self.resolve(file)?;
        fs::remove_file(&path)?;
        info!("Deleted: {}", path.display());

        self.sink.emit(BackendEvent::ImageListUpdate);
        self.sink
            .emit(BackendEvent::ShowToast(format!("Deleted: {}", file.name)));
        Ok(())
    }

    fn save_image(&self, data_url: &str) -> Result<()> {
        let dir = self.directory()?;
        let data_url = data_url.to_string();
        let sink = self.sink.clone();

        rayon::spawn(move || match write_data_url(&dir, &data_url) {
            Ok(_) => sink.emit(BackendEvent::ImageListUpdate),
            Err(e) => {
                error!("Failed to save image: {}", e);
                sink.emit(BackendEvent::ShowToast(format!("Failed to save image: {}", e)));
            }
        });
        Ok(())
    }

    fn select_dir_and_notify(&self) -> Result<()> {
        dir_picker::select_dir_and_notify(self.sink.clone());
        Ok(())
    }

    fn set_target_dir(&self, directory: &str) -> Result<()> {
        let path = PathBuf::from(directory);
        let watcher = match self.watch.start_watching(&path) {
            Ok(watcher) => Some(watcher),
            Err(e) => {
                warn!("{}", e);
                None
            }
        };

        {
            let mut state = self.state();
            state.directory = Some(path);
            state.watcher = watcher;
        }

        info!("Target directory set: {}", directory);
        self.sink.emit(BackendEvent::ImageListUpdate);
        Ok(())
    }

    fn set_template(&self, template: &str) -> Result<()> {
        self.state().template = template.to_string();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{self, Inbox};

    fn backend_in(dir: &Path) -> (TargetDirBackend, Inbox) {
        let (sink, inbox) = events::channel();
        let backend = TargetDirBackend::new(sink);
        backend.set_target_dir(&dir.to_string_lossy()).unwrap();
        while inbox.try_next().is_some() {}
        (backend, inbox)
    }

    #[test]
    fn lists_nothing_without_directory() {
        let (sink, _inbox) = events::channel();
        let backend = TargetDirBackend::new(sink);

        assert!(backend.list_files().unwrap().is_empty());
        assert!(matches!(
            backend.save_image("data:image/png;base64,aGVsbG8="),
            Err(AppError::NoTargetDirectory)
        ));
    }

    #[test]
    fn set_target_dir_requests_relist() {
        let dir = tempfile::tempdir().unwrap();
        let (sink, inbox) = events::channel();
        let backend = TargetDirBackend::new(sink);

        backend.set_target_dir(&dir.path().to_string_lossy()).unwrap();

        assert_eq!(inbox.try_next(), Some(BackendEvent::ImageListUpdate));
        assert_eq!(backend.directory().unwrap(), dir.path());
    }

    #[test]
    fn lists_images_by_name() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.png"), b"x").unwrap();
        fs::write(dir.path().join("a.png"), b"x").unwrap();
        fs::write(dir.path().join("readme.md"), b"x").unwrap();
        let (backend, _inbox) = backend_in(dir.path());

        let files = backend.list_files().unwrap();

        assert_eq!(
            files,
            vec![
                FileReference::new("a.png", dir.path().join("a.png")),
                FileReference::new("b.png", dir.path().join("b.png")),
            ]
        );
    }

    #[test]
    fn write_data_url_creates_timestamped_file() {
        let dir = tempfile::tempdir().unwrap();

        let first = write_data_url(dir.path(), "data:image/png;base64,aGVsbG8=").unwrap();
        let second = write_data_url(dir.path(), "data:image/png;base64,aGVsbG8=").unwrap();

        assert_ne!(first, second);
        assert_eq!(fs::read(&first).unwrap(), b"hello");
        assert_eq!(first.extension().unwrap(), "png");
        assert_eq!(scan_directory(dir.path()).unwrap().len(), 2);
    }

    #[test]
    fn delete_removes_file_and_requests_relist() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.png"), b"x").unwrap();
        let (backend, inbox) = backend_in(dir.path());
        let file = backend.list_files().unwrap().remove(0);

        backend.delete_file(&file).unwrap();

        assert!(!dir.path().join("a.png").exists());
        assert_eq!(inbox.try_next(), Some(BackendEvent::ImageListUpdate));
        assert_eq!(
            inbox.try_next(),
            Some(BackendEvent::ShowToast("Deleted: a.png".into()))
        );
    }

    #[test]
    fn delete_stays_inside_target_directory() {
        let outer = tempfile::tempdir().unwrap();
        let target = outer.path().join("target");
        fs::create_dir(&target).unwrap();
        fs::write(outer.path().join("keep.png"), b"x").unwrap();
        let (backend, _inbox) = backend_in(&target);

        let result = backend.delete_file(&FileReference::new("../keep.png", "../keep.png"));

        assert!(result.is_err());
        assert!(outer.path().join("keep.png").exists());
    }

    #[test]
    fn url_uses_current_template() {
        let dir = tempfile::tempdir().unwrap();
        let (backend, _inbox) = backend_in(dir.path());
        backend.set_template("![x]($1)").unwrap();

        let file = FileReference::new("2024_0101_000000.png", dir.path().join("f"));
        assert_eq!(backend.url_for(&file), "![x](2024_0101_000000.png)");
    }

    #[test]
    fn dropped_images_are_copied_in() {
        let source = tempfile::tempdir().unwrap();
        let target = tempfile::tempdir().unwrap();
        let image = source.path().join("shot.PNG");
        let text = source.path().join("notes.txt");
        fs::write(&image, b"png").unwrap();
        fs::write(&text, b"txt").unwrap();
        let (backend, inbox) = backend_in(target.path());

        let copied = backend.drop_files(&[image, text]).unwrap();

        assert_eq!(copied, 1);
        let files = scan_directory(target.path()).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].extension().unwrap(), "png");
        assert_eq!(inbox.try_next(), Some(BackendEvent::ImageListUpdate));
    }

    #[test]
    fn partial_drop_still_requests_relist() {
        let source = tempfile::tempdir().unwrap();
        let target = tempfile::tempdir().unwrap();
        let image = source.path().join("a.png");
        fs::write(&image, b"png").unwrap();
        let missing = source.path().join("gone.png");
        let (backend, inbox) = backend_in(target.path());

        let result = backend.drop_files(&[image, missing]);

        assert!(matches!(result, Err(AppError::Io(_))));
        assert_eq!(scan_directory(target.path()).unwrap().len(), 1);
        assert_eq!(inbox.try_next(), Some(BackendEvent::ImageListUpdate));
    }
}
