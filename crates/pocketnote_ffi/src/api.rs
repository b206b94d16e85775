//! FFI use-case API for the notes screen.
//!
//! # Responsibility
//! - Expose the single-screen session to Dart via FRB as plain envelopes.
//! - Accept camera/gallery results from the host as completed locators.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - The session lives for the whole process and is never persisted.

use log::warn;
use pocketnote_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    CaptureError, CaptureHandler, EditOutcome, MediaAttachment, MediaConfig, MediaSender, Note,
    NoteFields, NoteId, NotesSession,
};
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, OnceLock};
use uuid::Uuid;

static SESSION: OnceLock<Mutex<NotesSession>> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Exposes core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Returns an empty string on success and the error message otherwise.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Attachment row shown under a note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentItem {
    pub uri: String,
    pub caption: String,
}

/// Note row/detail returned to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteItem {
    pub id: String,
    pub title: String,
    pub description: String,
    pub is_task: bool,
    pub due_date: Option<String>,
    pub reminders: Vec<String>,
    pub attachments: Vec<AttachmentItem>,
}

/// Generic action envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    /// Whether the action changed state as requested.
    pub ok: bool,
    /// Affected note id, if any.
    pub note_id: Option<String>,
    /// Human-readable message for diagnostics/UI.
    pub message: String,
}

impl ActionResponse {
    fn success(message: impl Into<String>, note_id: Option<NoteId>) -> Self {
        Self {
            ok: true,
            note_id: note_id.map(|id| id.to_string()),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            note_id: None,
            message: message.into(),
        }
    }
}

/// Result of preparing a camera capture target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureResponse {
    /// Whether the host should start the camera.
    pub ok: bool,
    /// Brokered locator the camera must write through.
    pub locator: Option<String>,
    /// Human-readable message for diagnostics/UI.
    pub message: String,
}

/// Camera seam for hosts that launch the camera themselves.
///
/// Launch succeeds immediately; the host reports the outcome later through
/// `composer_attach_captured` or `composer_capture_cancelled`.
struct HostCamera {
    available: bool,
}

impl CaptureHandler for HostCamera {
    fn is_available(&self) -> bool {
        self.available
    }

    fn launch(&mut self, _locator: &str, _completion: MediaSender) -> Result<(), CaptureError> {
        Ok(())
    }
}

/// Sets the capture directory and locator authority used by the camera flow.
#[flutter_rust_bridge::frb(sync)]
pub fn configure_media(pictures_dir: String, locator_authority: String) -> ActionResponse {
    let pictures_dir = pictures_dir.trim();
    if pictures_dir.is_empty() {
        return ActionResponse::failure("configure_media failed: pictures_dir cannot be empty");
    }
    let config = MediaConfig {
        pictures_dir: PathBuf::from(pictures_dir),
        locator_authority: locator_authority.trim().to_string(),
    };
    with_session(|session| session.configure_media(&config));
    ActionResponse::success("Media configured.", None)
}

/// Returns the filtered and sorted list for the current search/sort inputs.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_list(search_text: String, sort_by_due_date: bool) -> Vec<NoteItem> {
    with_session(|session| {
        session.set_search_text(search_text);
        session.set_sort_by_due_date(sort_by_due_date);
        session.visible_notes().iter().map(to_note_item).collect()
    })
}

/// Opens a fresh create dialog with an empty attachment buffer.
#[flutter_rust_bridge::frb(sync)]
pub fn composer_open() -> ActionResponse {
    with_session(|session| {
        session.open_composer();
    });
    ActionResponse::success("Composer opened.", None)
}

/// Replaces the fields of the open create dialog.
#[flutter_rust_bridge::frb(sync)]
pub fn composer_set_fields(
    title: String,
    description: String,
    is_task: bool,
    due_date: String,
) -> ActionResponse {
    let fields = NoteFields {
        title,
        description,
        is_task,
        due_date,
    };
    with_session(|session| match session.composer_mut() {
        Some(composer) => match composer.set_fields(fields) {
            Ok(()) => ActionResponse::success("Fields updated.", None),
            Err(err) => ActionResponse::failure(format!("composer_set_fields failed: {err}")),
        },
        None => ActionResponse::failure("composer_set_fields failed: no open composer"),
    })
}

/// Creates a capture target for the open create dialog.
///
/// `camera_available` reports whether the host resolved a camera handler.
/// On success the host launches its camera against the returned locator.
#[flutter_rust_bridge::frb(sync)]
pub fn composer_prepare_capture(camera_available: bool) -> CaptureResponse {
    let mut camera = HostCamera {
        available: camera_available,
    };
    with_session(|session| match session.capture_image(&mut camera) {
        Ok(locator) => CaptureResponse {
            ok: true,
            locator: Some(locator),
            message: "Capture target ready.".to_string(),
        },
        Err(err) => CaptureResponse {
            ok: false,
            locator: None,
            message: format!("composer_prepare_capture failed: {err}"),
        },
    })
}

/// Records a finished camera capture for the open create dialog.
#[flutter_rust_bridge::frb(sync)]
pub fn composer_attach_captured(locator: String) -> ActionResponse {
    complete_capture("composer_attach_captured", |completion| {
        completion.captured(locator)
    })
}

/// Reports that the camera closed without a picture.
///
/// The capture target prepared for `locator` is removed.
#[flutter_rust_bridge::frb(sync)]
pub fn composer_capture_cancelled(locator: String) -> ActionResponse {
    complete_capture("composer_capture_cancelled", |completion| {
        completion.capture_cancelled(locator)
    })
}

/// Records a gallery selection for the open create dialog.
#[flutter_rust_bridge::frb(sync)]
pub fn composer_attach_gallery(locator: String) -> ActionResponse {
    attach(MediaAttachment::from_gallery(locator))
}

/// Commits the open create dialog.
///
/// Blank title/description is refused and the dialog stays open.
#[flutter_rust_bridge::frb(sync)]
pub fn composer_commit() -> ActionResponse {
    with_session(|session| match session.commit_composer() {
        Ok(id) => ActionResponse::success("Note created.", Some(id)),
        Err(err) => ActionResponse::failure(format!("composer_commit failed: {err}")),
    })
}

/// Dismisses the open create dialog and its pending attachments.
#[flutter_rust_bridge::frb(sync)]
pub fn composer_cancel() -> ActionResponse {
    if with_session(NotesSession::cancel_composer) {
        ActionResponse::success("Composer cancelled.", None)
    } else {
        ActionResponse::failure("composer_cancel failed: no open composer")
    }
}

/// Opens the edit dialog and returns the note it loaded.
#[flutter_rust_bridge::frb(sync)]
pub fn note_select(note_id: String) -> Result<NoteItem, String> {
    let id = parse_note_id(&note_id)?;
    with_session(|session| {
        session
            .select(id)
            .map_err(|err| format!("note_select failed: {err}"))?;
        session
            .store()
            .get(id)
            .map(to_note_item)
            .ok_or_else(|| format!("note_select failed: note not found: {id}"))
    })
}

/// Saves the edit dialog with new field values.
#[flutter_rust_bridge::frb(sync)]
pub fn note_save_selection(
    title: String,
    description: String,
    is_task: bool,
    due_date: String,
) -> ActionResponse {
    let fields = NoteFields {
        title,
        description,
        is_task,
        due_date,
    };
    with_session(|session| {
        let Some(editor) = session.editor_mut() else {
            return ActionResponse::failure("note_save_selection failed: no selection");
        };
        if let Err(err) = editor.set_fields(fields) {
            return ActionResponse::failure(format!("note_save_selection failed: {err}"));
        }
        match session.save_selection() {
            Ok(outcome) => outcome_response(outcome),
            Err(err) => ActionResponse::failure(format!("note_save_selection failed: {err}")),
        }
    })
}

/// Deletes the selected note and clears the selection.
#[flutter_rust_bridge::frb(sync)]
pub fn note_delete_selection() -> ActionResponse {
    with_session(|session| match session.delete_selection() {
        Ok(outcome) => outcome_response(outcome),
        Err(err) => ActionResponse::failure(format!("note_delete_selection failed: {err}")),
    })
}

/// List-row delete. Deleting a missing note succeeds as a no-op.
#[flutter_rust_bridge::frb(sync)]
pub fn note_delete(note_id: String) -> ActionResponse {
    let id = match parse_note_id(&note_id) {
        Ok(id) => id,
        Err(err) => return ActionResponse::failure(err),
    };
    match with_session(|session| session.delete_from_list(id)) {
        Some(_) => ActionResponse::success("Note deleted.", Some(id)),
        None => ActionResponse::success("Note already deleted.", Some(id)),
    }
}

fn complete_capture(
    action: &str,
    deliver: impl FnOnce(&MediaSender) -> bool,
) -> ActionResponse {
    with_session(|session| {
        let completion = match session.composer().map(|composer| composer.media_sender()) {
            Some(Ok(completion)) => completion,
            Some(Err(err)) => return ActionResponse::failure(format!("{action} failed: {err}")),
            None => return ActionResponse::failure(format!("{action} failed: no open composer")),
        };
        if !deliver(&completion) {
            return ActionResponse::failure(format!("{action} failed: composer closed"));
        }
        session.poll_media();
        let pending = session
            .composer()
            .map(|composer| composer.pending().len())
            .unwrap_or(0);
        ActionResponse::success(format!("{pending} attachment(s) pending."), None)
    })
}

fn attach(attachment: MediaAttachment) -> ActionResponse {
    with_session(|session| match session.composer_mut() {
        Some(composer) => match composer.attach(attachment) {
            Ok(()) => ActionResponse::success(
                format!("{} attachment(s) pending.", composer.pending().len()),
                None,
            ),
            Err(err) => ActionResponse::failure(format!("attach failed: {err}")),
        },
        None => ActionResponse::failure("attach failed: no open composer"),
    })
}

fn outcome_response(outcome: EditOutcome) -> ActionResponse {
    match outcome {
        EditOutcome::Saved(id) => ActionResponse::success("Note saved.", Some(id)),
        EditOutcome::Deleted(id) => ActionResponse::success("Note deleted.", Some(id)),
        EditOutcome::TargetMissing(id) => ActionResponse {
            ok: false,
            note_id: Some(id.to_string()),
            message: "Note no longer exists.".to_string(),
        },
    }
}

fn parse_note_id(raw: &str) -> Result<NoteId, String> {
    Uuid::parse_str(raw.trim()).map_err(|err| format!("invalid note id `{raw}`: {err}"))
}

fn with_session<T>(f: impl FnOnce(&mut NotesSession) -> T) -> T {
    let mut guard = lock_session();
    f(&mut *guard)
}

fn lock_session() -> MutexGuard<'static, NotesSession> {
    let session = SESSION.get_or_init(|| Mutex::new(NotesSession::new()));
    session.lock().unwrap_or_else(|poisoned| {
        warn!("event=session_lock module=ffi status=recovered reason=poisoned");
        poisoned.into_inner()
    })
}

fn to_note_item(note: &Note) -> NoteItem {
    NoteItem {
        id: note.id.to_string(),
        title: note.title.clone(),
        description: note.description.clone(),
        is_task: note.is_task,
        due_date: note.due_date.clone(),
        reminders: note.reminders.clone(),
        attachments: note
            .attachments
            .iter()
            .map(|item| AttachmentItem {
                uri: item.uri().to_string(),
                caption: item.caption().to_string(),
            })
            .collect(),
    }
}
