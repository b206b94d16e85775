use crate::media::image_file::{create_image_file, display_name, remove_image_file};
use crate::media::{CaptureError, MediaConfig, MediaSender, IMAGE_MIME_FILTER};
use chrono::Local;
use log::{error, info, warn};
use std::path::{Path, PathBuf};

/// Host camera seam.
pub trait CaptureHandler {
    /// Whether a camera handler can be resolved right now.
    fn is_available(&self) -> bool;

    /// Starts the camera writing into the resource behind `locator`.
    ///
    /// The host reports the outcome later through `completion`.
    fn launch(&mut self, locator: &str, completion: MediaSender) -> Result<(), CaptureError>;
}

/// Host gallery seam.
///
/// A cancelled pick is reported as `MediaEvent::PickCancelled`, or not at all.
pub trait GalleryPicker {
    fn launch(&mut self, mime_filter: &str, completion: MediaSender);
}

/// Exposes a local file through an opaque, provider-brokered locator.
pub trait LocatorBroker {
    fn locator_for(&self, path: &Path) -> Result<String, CaptureError>;
}

/// Broker producing `content://<authority>/pictures/<file name>` locators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentLocatorBroker {
    authority: String,
}

impl ContentLocatorBroker {
    pub fn new(authority: impl Into<String>) -> Self {
        Self {
            authority: authority.into(),
        }
    }
}

impl LocatorBroker for ContentLocatorBroker {
    fn locator_for(&self, path: &Path) -> Result<String, CaptureError> {
        let name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| {
                CaptureError::Locator(format!("path has no UTF-8 file name: {}", path.display()))
            })?;
        Ok(format!("content://{}/pictures/{}", self.authority, name))
    }
}

/// A capture target handed to the camera and not yet settled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureTarget {
    locator: String,
    path: PathBuf,
}

impl CaptureTarget {
    /// Brokered locator the camera writes through.
    pub fn locator(&self) -> &str {
        &self.locator
    }

    /// Backing file inside the pictures directory.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn into_locator(self) -> String {
        self.locator
    }
}

/// Prepares capture targets and launches the camera collaborator.
#[derive(Debug, Clone)]
pub struct CaptureRequester<B = ContentLocatorBroker> {
    pictures_dir: PathBuf,
    broker: B,
}

impl CaptureRequester<ContentLocatorBroker> {
    pub fn from_config(config: &MediaConfig) -> Self {
        Self::new(
            config.pictures_dir.clone(),
            ContentLocatorBroker::new(config.locator_authority.clone()),
        )
    }
}

impl<B: LocatorBroker> CaptureRequester<B> {
    pub fn new(pictures_dir: impl Into<PathBuf>, broker: B) -> Self {
        Self {
            pictures_dir: pictures_dir.into(),
            broker,
        }
    }

    pub fn pictures_dir(&self) -> &Path {
        &self.pictures_dir
    }

    /// Creates a capture target and hands its locator to the camera.
    ///
    /// Returns the target once the camera has been launched. The file stays
    /// on disk until the owner attaches or discards it.
    ///
    /// # Errors
    /// - `CaptureError::Unavailable` when the handler cannot be resolved.
    /// - `CaptureError::FileCreation` when the target file cannot be created.
    /// - `CaptureError::Locator` / `CaptureError::Launch` from the broker or
    ///   handler; the target file is removed in both cases.
    pub fn request(
        &self,
        handler: &mut dyn CaptureHandler,
        completion: MediaSender,
    ) -> Result<CaptureTarget, CaptureError> {
        if !handler.is_available() {
            warn!("event=capture_request module=media status=unavailable");
            return Err(CaptureError::Unavailable);
        }

        let path = create_image_file(&self.pictures_dir, Local::now()).map_err(|err| {
            error!("event=capture_request module=media status=error stage=create_file error={err}");
            CaptureError::FileCreation(err)
        })?;

        let launched = self
            .broker
            .locator_for(&path)
            .and_then(|locator| handler.launch(&locator, completion).map(|()| locator));
        match launched {
            Ok(locator) => {
                info!(
                    "event=capture_request module=media status=ok file={}",
                    display_name(&path)
                );
                Ok(CaptureTarget { locator, path })
            }
            Err(err) => {
                error!("event=capture_request module=media status=error stage=launch error={err}");
                remove_image_file(&path);
                Err(err)
            }
        }
    }
}

/// Launches the gallery picker restricted to images.
pub fn request_pick(picker: &mut dyn GalleryPicker, completion: MediaSender) {
    info!("event=pick_request module=media status=ok filter={IMAGE_MIME_FILTER}");
    picker.launch(IMAGE_MIME_FILTER, completion);
}
