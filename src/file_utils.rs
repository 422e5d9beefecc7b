use crate::config::{DEFAULT_IMAGE_EXTENSION, SUPPORTED_IMAGE_EXTENSIONS, TEMPLATE_PLACEHOLDER};
use crate::error::{AppError, Result};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::fs;
use std::path::{Path, PathBuf};

/// Log formatting for paths.
pub trait PathExt {
    fn format_for_log(&self) -> String;
}

impl PathExt for Path {
    fn format_for_log(&self) -> String {
        self.file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.display().to_string())
    }
}

pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext_str| SUPPORTED_IMAGE_EXTENSIONS.contains(&ext_str.to_lowercase().as_str()))
        .unwrap_or(false)
}

pub fn scan_directory(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut image_files: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && is_supported_image(path))
        .collect();

    image_files.sort();
    Ok(image_files)
}

/// Returns `<dir>/<stem>.<ext>`, or `<dir>/<stem>_<n>.<ext>` when that name is taken.
pub fn unique_image_path(dir: &Path, stem: &str, ext: &str) -> PathBuf {
    let candidate = dir.join(format!("{}.{}", stem, ext));
    if !candidate.exists() {
        return candidate;
    }

    (1..)
        .map(|n| dir.join(format!("{}_{}.{}", stem, n, ext)))
        .find(|path| !path.exists())
        .unwrap_or(candidate)
}

/// Splits a `data:<mime>;base64,<payload>` URL and decodes the payload.
///
/// Returns the file extension matching the MIME type with the decoded bytes.
pub fn decode_data_url(data: &str) -> Result<(&'static str, Vec<u8>)> {
    let (header, payload) = data
        .split_once(',')
        .ok_or_else(|| AppError::InvalidDataUrl("missing ',' separator".to_string()))?;

    let bytes = STANDARD.decode(payload.trim())?;
    if bytes.is_empty() {
        return Err(AppError::InvalidDataUrl("empty payload".to_string()));
    }

    Ok((extension_for_mime(header), bytes))
}

fn extension_for_mime(header: &str) -> &'static str {
    let mime = header
        .strip_prefix("data:")
        .unwrap_or(header)
        .split(';')
        .next()
        .unwrap_or("");

    match mime.to_ascii_lowercase().as_str() {
        "image/png" => "png",
        "image/jpeg" | "image/jpg" => "jpg",
        "image/gif" => "gif",
        "image/webp" => "webp",
        "image/bmp" => "bmp",
        _ => DEFAULT_IMAGE_EXTENSION,
    }
}

/// Substitutes every placeholder in `template` with `file_name`.
pub fn apply_template(template: &str, file_name: &str) -> String {
    template.replace(TEMPLATE_PLACEHOLDER, file_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_directory_keeps_only_images_sorted() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.png"), b"x").unwrap();
        fs::write(dir.path().join("a.PNG"), b"x").unwrap();
        fs::write(dir.path().join("notes.txt"), b"x").unwrap();
        fs::create_dir(dir.path().join("sub.png")).unwrap();

        let files = scan_directory(dir.path()).unwrap();
        let names: Vec<_> = files.iter().map(|p| p.format_for_log()).collect();
        assert_eq!(names, vec!["a.PNG", "b.png"]);
    }

    #[test]
    fn unique_image_path_appends_suffix_when_taken() {
        let dir = tempfile::tempdir().unwrap();
        let first = unique_image_path(dir.path(), "2024_0101_120000", "png");
        assert_eq!(first, dir.path().join("2024_0101_120000.png"));

        fs::write(&first, b"x").unwrap();
        let second = unique_image_path(dir.path(), "2024_0101_120000", "png");
        assert_eq!(second, dir.path().join("2024_0101_120000_1.png"));
    }

    #[test]
    fn decode_data_url_reads_mime_and_payload() {
        let (ext, bytes) = decode_data_url("data:image/jpeg;base64,aGVsbG8=").unwrap();
        assert_eq!(ext, "jpg");
        assert_eq!(bytes, b"hello");

        let (ext, _) = decode_data_url("data:application/octet-stream;base64,aGVsbG8=").unwrap();
        assert_eq!(ext, "png");
    }

    #[test]
    fn decode_data_url_rejects_malformed_input() {
        assert!(matches!(
            decode_data_url("no separator"),
            Err(AppError::InvalidDataUrl(_))
        ));
        assert!(matches!(
            decode_data_url("data:image/png;base64,@@@"),
            Err(AppError::InvalidDataUrl(_))
        ));
        assert!(matches!(
            decode_data_url("data:image/png;base64,"),
            Err(AppError::InvalidDataUrl(_))
        ));
    }

    #[test]
    fn apply_template_replaces_every_placeholder() {
        let url = apply_template(r#"![images/MLAA/$1]("/assets/images/MLAA/$1")"#, "a.png");
        assert_eq!(url, r#"![images/MLAA/a.png]("/assets/images/MLAA/a.png")"#);
        assert_eq!(apply_template("plain", "a.png"), "plain");
    }
}
