//! Core domain logic for PocketNote.
//! This crate is the single source of truth for note/task invariants; host
//! shells only render what it projects and forward user events to it.

pub mod logging;
pub mod media;
pub mod model;
pub mod session;
pub mod store;
pub mod view;
pub mod workflow;

pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use media::{
    media_channel, CaptureError, CaptureHandler, CaptureRequester, CaptureTarget,
    ContentLocatorBroker, GalleryPicker, LocatorBroker, MediaConfig, MediaEvent, MediaInbox,
    MediaSender, IMAGE_MIME_FILTER,
};
pub use model::media::{MediaAttachment, CAPTURED_IMAGE_CAPTION, GALLERY_FILE_CAPTION};
pub use model::note::{Note, NoteFields, NoteId, NoteValidationError};
pub use session::NotesSession;
pub use store::{NoteStore, StoreError, StoreResult, StoreSnapshot, SubscriptionId};
pub use view::{project, Projection, SortMode, ViewQuery};
pub use workflow::{
    ComposerState, EditOutcome, EditorState, NoteComposer, NoteEditor, WorkflowError,
};

/// Minimal health-check API for host integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
