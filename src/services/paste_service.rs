//! Turns pasted clipboard items into backend save requests.

use crate::error::Result;
use crate::services::Backend;
use crate::services::clipboard_service::ClipboardItem;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use log::{debug, warn};

/// Encodes `payload` as a `data:<mime>;base64,...` URL.
pub fn to_data_url(mime: &str, payload: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(payload))
}

/// Service forwarding pasted images to the backend.
pub struct PasteService;

impl PasteService {
    /// Creates a new paste service.
    pub fn new() -> Self {
        Self
    }

    /// Sends every image item to the backend; other items are skipped.
    ///
    /// Each image is forwarded on its own, so one failure does not stop the
    /// rest. Returns the number forwarded, or the first failure.
    pub fn ingest(&self, items: &[ClipboardItem], backend: &dyn Backend) -> Result<usize> {
        let mut forwarded = 0;
        let mut first_error = None;

        for item in items.iter().filter(|item| item.is_image()) {
            debug!("Forwarding pasted {} ({} bytes)", item.mime, item.payload.len());
            match backend.save_image(&to_data_url(&item.mime, &item.payload)) {
                Ok(()) => forwarded += 1,
                Err(e) => {
                    warn!("Failed to save pasted image: {}", e);
                    first_error.get_or_insert(e);
                }
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(forwarded),
        }
    }
}

impl Default for PasteService {
    fn default() -> Self {
        Self::new()
    }
}
