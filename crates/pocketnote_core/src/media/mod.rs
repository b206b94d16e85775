//! Media acquisition: camera capture and gallery pick collaborators.
//!
//! # Responsibility
//! - Define the host-facing camera/gallery seams as traits.
//! - Carry asynchronous completions back to the owning workflow over a
//!   channel with explicit success/cancel/failure variants.
//! - Create the on-disk capture target and broker an opaque locator for it.
//!
//! # Invariants
//! - Core never reads media bytes; only the locator string is stored.
//! - Completions are consumed in arrival order, not request order.
//! - No acquisition failure is fatal.

use crate::model::media::MediaAttachment;
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

mod capture;
mod channel;
pub mod image_file;

pub use capture::{
    request_pick, CaptureHandler, CaptureRequester, CaptureTarget, ContentLocatorBroker,
    GalleryPicker, LocatorBroker,
};
pub use channel::{media_channel, MediaInbox, MediaSender};

/// MIME filter passed to the gallery picker.
pub const IMAGE_MIME_FILTER: &str = "image/*";

const DEFAULT_LOCATOR_AUTHORITY: &str = "pocketnote.fileprovider";
const DEFAULT_PICTURES_DIR_NAME: &str = "pocketnote-pictures";

/// Completion delivered by a host collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaEvent {
    /// Camera finished writing the capture target behind `locator`.
    Captured { locator: String },
    /// User backed out of the camera launched for `locator`.
    CaptureCancelled { locator: String },
    /// Camera launched for `locator` reported a failure.
    CaptureFailed { locator: String, reason: String },
    /// Gallery returned a resource.
    Picked { locator: String },
    /// Gallery closed without a selection.
    PickCancelled,
}

impl MediaEvent {
    /// Attachment to append for this completion, if any.
    pub fn into_attachment(self) -> Option<MediaAttachment> {
        match self {
            Self::Captured { locator } => Some(MediaAttachment::captured(locator)),
            Self::Picked { locator } => Some(MediaAttachment::from_gallery(locator)),
            Self::CaptureCancelled { .. } | Self::CaptureFailed { .. } | Self::PickCancelled => {
                None
            }
        }
    }

    /// Locator of the capture target this completion settles, if any.
    pub fn capture_locator(&self) -> Option<&str> {
        match self {
            Self::Captured { locator }
            | Self::CaptureCancelled { locator }
            | Self::CaptureFailed { locator, .. } => Some(locator),
            Self::Picked { .. } | Self::PickCancelled => None,
        }
    }

    pub(crate) fn label(&self) -> &'static str {
        match self {
            Self::Captured { .. } => "captured",
            Self::CaptureCancelled { .. } => "capture_cancelled",
            Self::CaptureFailed { .. } => "capture_failed",
            Self::Picked { .. } => "picked",
            Self::PickCancelled => "pick_cancelled",
        }
    }
}

/// Reasons a capture request is abandoned before the camera starts.
#[derive(Debug)]
pub enum CaptureError {
    /// No camera handler can be resolved on the host.
    Unavailable,
    /// The capture target file could not be created.
    FileCreation(std::io::Error),
    /// The capture target could not be exposed through a locator.
    Locator(String),
    /// The host refused to start the camera.
    Launch(String),
}

impl Display for CaptureError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable => write!(f, "no camera handler available"),
            Self::FileCreation(err) => write!(f, "failed to create image file: {err}"),
            Self::Locator(message) => write!(f, "failed to broker image locator: {message}"),
            Self::Launch(message) => write!(f, "failed to launch camera: {message}"),
        }
    }
}

impl Error for CaptureError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::FileCreation(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CaptureError {
    fn from(value: std::io::Error) -> Self {
        Self::FileCreation(value)
    }
}

/// Host-provided media settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MediaConfig {
    /// App-private directory receiving capture targets.
    pub pictures_dir: PathBuf,
    /// Authority segment of brokered `content://` locators.
    pub locator_authority: String,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            pictures_dir: std::env::temp_dir().join(DEFAULT_PICTURES_DIR_NAME),
            locator_authority: DEFAULT_LOCATOR_AUTHORITY.to_string(),
        }
    }
}
