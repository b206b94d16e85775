//! Media attachment value object.

use serde::{Deserialize, Serialize};

/// Caption used for images produced by the camera collaborator.
pub const CAPTURED_IMAGE_CAPTION: &str = "captured image";
/// Caption used for files picked from the gallery collaborator.
pub const GALLERY_FILE_CAPTION: &str = "gallery file";

/// Reference to a captured or picked media resource.
///
/// The locator is opaque: core never inspects the bytes behind it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MediaAttachment {
    uri: String,
    caption: String,
}

impl MediaAttachment {
    pub fn new(uri: impl Into<String>, caption: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            caption: caption.into(),
        }
    }

    /// Attachment for an image written by the camera collaborator.
    pub fn captured(uri: impl Into<String>) -> Self {
        Self::new(uri, CAPTURED_IMAGE_CAPTION)
    }

    /// Attachment for a file chosen through the gallery collaborator.
    pub fn from_gallery(uri: impl Into<String>) -> Self {
        Self::new(uri, GALLERY_FILE_CAPTION)
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn caption(&self) -> &str {
        &self.caption
    }
}
