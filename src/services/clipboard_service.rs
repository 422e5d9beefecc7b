//! Clipboard service for reading pasted content and writing links.
//!
//! Uses arboard on every platform. Clipboard images arrive as raw RGBA and
//! are re-encoded to PNG so they can travel as `image/png` items.

use crate::error::{AppError, Result};
use arboard::Clipboard;
use image::{ImageFormat, RgbaImage};
use log::{debug, info};
use std::io::Cursor;

/// One typed payload found on the clipboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardItem {
    /// MIME type, e.g. `image/png` or `text/plain`.
    pub mime: String,
    pub payload: Vec<u8>,
}

impl ClipboardItem {
    pub fn new(mime: impl Into<String>, payload: impl Into<Vec<u8>>) -> Self {
        Self {
            mime: mime.into(),
            payload: payload.into(),
        }
    }

    /// True when the declared type is an image type.
    pub fn is_image(&self) -> bool {
        self.mime.starts_with("image")
    }
}

/// Service for OS clipboard operations.
pub struct ClipboardService;

impl ClipboardService {
    /// Creates a new clipboard service.
    pub fn new() -> Self {
        Self
    }

    fn open() -> Result<Clipboard> {
        Clipboard::new()
            .map_err(|e| AppError::Clipboard(format!("Failed to access clipboard: {}", e)))
    }

    /// Replaces the clipboard contents with `text`.
    pub fn copy_text(&self, text: &str) -> Result<()> {
        let mut clipboard = Self::open()?;
        clipboard
            .set_text(text.to_string())
            .map_err(|e| AppError::Clipboard(format!("Failed to set clipboard: {}", e)))?;

        info!("Copied {} byte(s) of text to clipboard", text.len());
        Ok(())
    }

    /// Collects whatever image and text the clipboard currently holds.
    pub fn read_items(&self) -> Result<Vec<ClipboardItem>> {
        let mut clipboard = Self::open()?;
        let mut items = Vec::new();

        // Missing content of either kind is not an error.
        match clipboard.get_image() {
            Ok(image) => {
                let png = encode_png(image.width, image.height, image.bytes.into_owned())?;
                items.push(ClipboardItem::new("image/png", png));
            }
            Err(e) => debug!("No clipboard image: {}", e),
        }

        match clipboard.get_text() {
            Ok(text) => items.push(ClipboardItem::new("text/plain", text.into_bytes())),
            Err(e) => debug!("No clipboard text: {}", e),
        }

        Ok(items)
    }
}

impl Default for ClipboardService {
    fn default() -> Self {
        Self::new()
    }
}

/// Encodes raw RGBA pixels as a PNG file.
fn encode_png(width: usize, height: usize, rgba: Vec<u8>) -> Result<Vec<u8>> {
    let image = RgbaImage::from_raw(width as u32, height as u32, rgba).ok_or_else(|| {
        AppError::ImageEncode(format!("Pixel buffer does not match {}x{}", width, height))
    })?;

    let mut png = Cursor::new(Vec::new());
    image.write_to(&mut png, ImageFormat::Png)?;
    Ok(png.into_inner())
}
