//! Single-screen session state.
//!
//! # Responsibility
//! - Tie the store, the list projection and the open dialogs together the
//!   way the notes screen uses them.
//! - Route camera/gallery completions into the open create dialog.
//!
//! # Invariants
//! - At most one composer and one editor (the selection) are open.
//! - Deleting the selected note clears the selection.
//! - All state is owned here and mutated from one thread.

use crate::media::{
    request_pick, CaptureHandler, CaptureRequester, GalleryPicker, MediaConfig,
};
use crate::model::note::{Note, NoteId};
use crate::store::{NoteStore, StoreSnapshot, SubscriptionId};
use crate::view::{Projection, SortMode, ViewQuery};
use crate::workflow::{EditOutcome, NoteComposer, NoteEditor, WorkflowError};
use log::{debug, info};

/// The notes screen: list, search, sort toggle, create and edit dialogs.
#[derive(Debug)]
pub struct NotesSession {
    store: NoteStore,
    query: ViewQuery,
    projection: Projection,
    composer: Option<NoteComposer>,
    editor: Option<NoteEditor>,
    capture: CaptureRequester,
}

impl Default for NotesSession {
    fn default() -> Self {
        Self::new()
    }
}

impl NotesSession {
    pub fn new() -> Self {
        Self::with_media_config(&MediaConfig::default())
    }

    pub fn with_media_config(config: &MediaConfig) -> Self {
        Self {
            store: NoteStore::new(),
            query: ViewQuery::default(),
            projection: Projection::new(),
            composer: None,
            editor: None,
            capture: CaptureRequester::from_config(config),
        }
    }

    /// Replaces the capture target directory and locator authority.
    pub fn configure_media(&mut self, config: &MediaConfig) {
        self.capture = CaptureRequester::from_config(config);
        info!(
            "event=media_configured module=session pictures_dir={}",
            config.pictures_dir.display()
        );
    }

    pub fn store(&self) -> &NoteStore {
        &self.store
    }

    pub fn snapshot(&self) -> StoreSnapshot {
        self.store.snapshot()
    }

    pub fn subscribe(
        &mut self,
        callback: impl Fn(&StoreSnapshot) + Send + 'static,
    ) -> SubscriptionId {
        self.store.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.store.unsubscribe(id)
    }

    pub fn search_text(&self) -> &str {
        &self.query.search_text
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.query.search_text = text.into();
    }

    pub fn sort_mode(&self) -> SortMode {
        self.query.sort_mode
    }

    pub fn set_sort_by_due_date(&mut self, enabled: bool) {
        self.query.sort_mode = SortMode::from_flag(enabled);
    }

    /// Filtered and sorted list currently displayed.
    pub fn visible_notes(&mut self) -> &[Note] {
        let snapshot = self.store.snapshot();
        self.projection.refresh(&snapshot, &self.query);
        self.projection.items()
    }

    /// Opens a fresh create dialog, discarding any previous one.
    pub fn open_composer(&mut self) -> &mut NoteComposer {
        if let Some(mut previous) = self.composer.take() {
            let _ = previous.cancel();
        }
        self.composer.insert(NoteComposer::new())
    }

    pub fn composer(&self) -> Option<&NoteComposer> {
        self.composer.as_ref()
    }

    pub fn composer_mut(&mut self) -> Option<&mut NoteComposer> {
        self.composer.as_mut()
    }

    /// Commits the open create dialog and closes it on success.
    ///
    /// A validation failure keeps the dialog open.
    pub fn commit_composer(&mut self) -> Result<NoteId, WorkflowError> {
        let composer = self.composer.as_mut().ok_or(WorkflowError::Closed)?;
        let id = composer.commit(&mut self.store)?;
        self.composer = None;
        Ok(id)
    }

    /// Closes the create dialog. Returns whether one was open.
    pub fn cancel_composer(&mut self) -> bool {
        match self.composer.take() {
            Some(mut composer) => {
                let _ = composer.cancel();
                true
            }
            None => false,
        }
    }

    /// Moves received media completions into the open composer's buffer.
    pub fn poll_media(&mut self) -> usize {
        self.composer
            .as_mut()
            .map(NoteComposer::poll_media)
            .unwrap_or(0)
    }

    /// Starts a camera capture for the open create dialog.
    ///
    /// # Errors
    /// - `WorkflowError::Closed` without an open composer.
    /// - `WorkflowError::Capture` when the request was abandoned; nothing is
    ///   attached in that case.
    pub fn capture_image(
        &mut self,
        handler: &mut dyn CaptureHandler,
    ) -> Result<String, WorkflowError> {
        let composer = self.composer.as_mut().ok_or(WorkflowError::Closed)?;
        let completion = composer.media_sender()?;
        let target = self.capture.request(handler, completion)?;
        let locator = target.locator().to_string();
        composer.track_capture(target)?;
        Ok(locator)
    }

    /// Starts a gallery pick for the open create dialog.
    pub fn pick_from_gallery(
        &mut self,
        picker: &mut dyn GalleryPicker,
    ) -> Result<(), WorkflowError> {
        let composer = self.composer.as_ref().ok_or(WorkflowError::Closed)?;
        request_pick(picker, composer.media_sender()?);
        Ok(())
    }

    /// Opens the edit dialog for `id`.
    pub fn select(&mut self, id: NoteId) -> Result<&mut NoteEditor, WorkflowError> {
        let editor = NoteEditor::open(&self.store, id)?;
        Ok(self.editor.insert(editor))
    }

    pub fn selection(&self) -> Option<NoteId> {
        self.editor.as_ref().map(NoteEditor::note_id)
    }

    pub fn editor(&self) -> Option<&NoteEditor> {
        self.editor.as_ref()
    }

    pub fn editor_mut(&mut self) -> Option<&mut NoteEditor> {
        self.editor.as_mut()
    }

    /// Saves the edit dialog; it stays open only on validation failure.
    pub fn save_selection(&mut self) -> Result<EditOutcome, WorkflowError> {
        let editor = self.editor.as_mut().ok_or(WorkflowError::Closed)?;
        let outcome = editor.save(&mut self.store)?;
        self.editor = None;
        Ok(outcome)
    }

    /// Deletes the selected note and clears the selection.
    pub fn delete_selection(&mut self) -> Result<EditOutcome, WorkflowError> {
        let editor = self.editor.as_mut().ok_or(WorkflowError::Closed)?;
        let outcome = editor.delete(&mut self.store)?;
        self.editor = None;
        Ok(outcome)
    }

    /// Closes the edit dialog without saving. Returns whether one was open.
    pub fn dismiss_selection(&mut self) -> bool {
        match self.editor.take() {
            Some(mut editor) => {
                let _ = editor.cancel();
                true
            }
            None => false,
        }
    }

    /// List-row delete action. Missing notes are a no-op.
    pub fn delete_from_list(&mut self, id: NoteId) -> Option<Note> {
        let removed = self.store.remove(id);
        if self.selection() == Some(id) {
            debug!("event=selection_cleared module=session id={id}");
            self.editor = None;
        }
        removed
    }
}
