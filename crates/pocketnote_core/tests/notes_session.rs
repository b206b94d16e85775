use pocketnote_core::{
    CaptureError, CaptureHandler, EditOutcome, GalleryPicker, MediaConfig, MediaEvent,
    MediaSender, NoteFields, NotesSession, SortMode, WorkflowError,
};
use std::sync::{Arc, Mutex};

/// Camera that keeps the completion handle so the test decides when it fires.
#[derive(Default)]
struct DeferredCamera {
    pending: Vec<(String, MediaSender)>,
}

impl CaptureHandler for DeferredCamera {
    fn is_available(&self) -> bool {
        true
    }

    fn launch(&mut self, locator: &str, completion: MediaSender) -> Result<(), CaptureError> {
        self.pending.push((locator.to_string(), completion));
        Ok(())
    }
}

#[derive(Default)]
struct DeferredGallery {
    filters: Vec<String>,
    pending: Vec<MediaSender>,
}

impl GalleryPicker for DeferredGallery {
    fn launch(&mut self, mime_filter: &str, completion: MediaSender) {
        self.filters.push(mime_filter.to_string());
        self.pending.push(completion);
    }
}

fn session_in(dir: &tempfile::TempDir) -> NotesSession {
    NotesSession::with_media_config(&MediaConfig {
        pictures_dir: dir.path().to_path_buf(),
        locator_authority: "notes.fileprovider".to_string(),
    })
}

fn create(session: &mut NotesSession, title: &str, description: &str) -> pocketnote_core::NoteId {
    session
        .open_composer()
        .set_fields(NoteFields::new(title, description))
        .unwrap();
    session.commit_composer().unwrap()
}

fn files_in(dir: &tempfile::TempDir) -> usize {
    std::fs::read_dir(dir.path()).map(Iterator::count).unwrap_or(0)
}

fn visible_titles(session: &mut NotesSession) -> Vec<String> {
    session
        .visible_notes()
        .iter()
        .map(|note| note.title.clone())
        .collect()
}

#[test]
fn projection_follows_store_search_and_sort() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = session_in(&dir);
    create(&mut session, "B", "plain");
    session.open_composer().set_fields(NoteFields {
        title: "A".to_string(),
        description: "dated".to_string(),
        is_task: true,
        due_date: "2024-01-01".to_string(),
    }).unwrap();
    session.commit_composer().unwrap();
    create(&mut session, "C", "another plain");

    assert_eq!(visible_titles(&mut session), vec!["A", "B", "C"]);

    session.set_search_text("PLAIN");
    assert_eq!(visible_titles(&mut session), vec!["B", "C"]);

    session.set_search_text("");
    session.set_sort_by_due_date(true);
    assert_eq!(session.sort_mode(), SortMode::TaskDueDate);
    assert_eq!(visible_titles(&mut session), vec!["A", "B", "C"]);
}

#[test]
fn camera_and_gallery_completions_attach_in_arrival_order() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = session_in(&dir);
    let mut camera = DeferredCamera::default();
    let mut gallery = DeferredGallery::default();

    session.open_composer();
    let locator = session.capture_image(&mut camera).unwrap();
    session.pick_from_gallery(&mut gallery).unwrap();
    assert_eq!(gallery.filters, vec!["image/*"]);

    // The UI keeps working while both requests are in flight.
    assert!(session.visible_notes().is_empty());

    gallery.pending[0].picked("content://media/9");
    let (target, completion) = &camera.pending[0];
    assert_eq!(target, &locator);
    completion.captured(target.clone());

    assert_eq!(session.poll_media(), 2);
    session
        .composer_mut()
        .unwrap()
        .set_fields(NoteFields::new("trip", "photos"))
        .unwrap();
    let id = session.commit_composer().unwrap();

    let note = session.store().get(id).unwrap();
    let attached: Vec<(&str, &str)> = note
        .attachments
        .iter()
        .map(|item| (item.uri(), item.caption()))
        .collect();
    assert_eq!(
        attached,
        vec![
            ("content://media/9", "gallery file"),
            (locator.as_str(), "captured image"),
        ]
    );
    assert!(session.composer().is_none());
}

#[test]
fn unsettled_capture_targets_are_removed() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = session_in(&dir);
    let mut camera = DeferredCamera::default();

    session.open_composer();
    let cancelled = session.capture_image(&mut camera).unwrap();
    let failed = session.capture_image(&mut camera).unwrap();
    let kept = session.capture_image(&mut camera).unwrap();
    assert_eq!(files_in(&dir), 3);
    assert_eq!(session.composer().unwrap().outstanding_captures(), 3);

    camera.pending[0].1.capture_cancelled(cancelled);
    camera.pending[1].1.capture_failed(failed, "storage full");
    camera.pending[2].1.captured(kept.clone());

    assert_eq!(session.poll_media(), 1);
    assert_eq!(files_in(&dir), 1);
    let composer = session.composer().unwrap();
    assert_eq!(composer.outstanding_captures(), 0);
    assert_eq!(composer.pending()[0].uri(), kept);
}

#[test]
fn closing_dialog_removes_outstanding_capture_target() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = session_in(&dir);
    let mut camera = DeferredCamera::default();

    session.open_composer();
    session.capture_image(&mut camera).unwrap();
    assert_eq!(files_in(&dir), 1);

    assert!(session.cancel_composer());
    assert_eq!(files_in(&dir), 0);
    // The camera finishing late attaches nothing anywhere.
    let (locator, completion) = &camera.pending[0];
    assert!(!completion.captured(locator.clone()));
}

#[test]
fn pending_media_does_not_leak_into_next_dialog() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = session_in(&dir);
    let mut gallery = DeferredGallery::default();

    session.open_composer();
    session.pick_from_gallery(&mut gallery).unwrap();
    gallery.pending[0].picked("content://media/1");
    session.poll_media();
    assert!(session.cancel_composer());

    // A completion that races the dismissal is dropped with its dialog.
    assert!(!gallery.pending[0].send(MediaEvent::Picked {
        locator: "content://media/late".to_string()
    }));

    let id = create(&mut session, "fresh", "note");
    assert!(session.store().get(id).unwrap().attachments.is_empty());
}

#[test]
fn blank_commit_keeps_dialog_open() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = session_in(&dir);
    session
        .open_composer()
        .set_fields(NoteFields::new("", "x"))
        .unwrap();

    assert!(matches!(
        session.commit_composer(),
        Err(WorkflowError::Validation(_))
    ));
    assert!(session.composer().is_some());
    assert!(session.store().is_empty());
}

#[test]
fn media_requests_need_an_open_composer() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = session_in(&dir);
    let mut camera = DeferredCamera::default();
    let mut gallery = DeferredGallery::default();

    assert!(matches!(
        session.capture_image(&mut camera),
        Err(WorkflowError::Closed)
    ));
    assert!(matches!(
        session.pick_from_gallery(&mut gallery),
        Err(WorkflowError::Closed)
    ));
    assert!(matches!(session.commit_composer(), Err(WorkflowError::Closed)));
}

#[test]
fn edit_dialog_save_and_delete_manage_selection() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = session_in(&dir);
    let id = create(&mut session, "draft", "body");

    session.select(id).unwrap().fields_mut().unwrap().title = "final".to_string();
    assert_eq!(session.selection(), Some(id));
    assert_eq!(session.save_selection().unwrap(), EditOutcome::Saved(id));
    assert_eq!(session.selection(), None);
    assert_eq!(visible_titles(&mut session), vec!["final"]);

    session.select(id).unwrap();
    assert_eq!(session.delete_selection().unwrap(), EditOutcome::Deleted(id));
    assert_eq!(session.selection(), None);
    assert!(session.visible_notes().is_empty());
}

#[test]
fn list_delete_clears_matching_selection_and_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = session_in(&dir);
    let keep = create(&mut session, "keep", "x");
    let gone = create(&mut session, "drop", "x");

    session.select(gone).unwrap();
    assert!(session.delete_from_list(gone).is_some());
    assert_eq!(session.selection(), None);
    assert!(session.delete_from_list(gone).is_none());
    assert_eq!(session.store().len(), 1);

    session.select(keep).unwrap();
    session.delete_from_list(gone);
    assert_eq!(session.selection(), Some(keep));
    assert!(session.dismiss_selection());
    assert!(!session.dismiss_selection());
}

#[test]
fn subscribers_see_every_committed_change() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = session_in(&dir);
    let lengths = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&lengths);
    session.subscribe(move |snapshot| sink.lock().unwrap().push(snapshot.len()));

    let id = create(&mut session, "a", "x");
    create(&mut session, "b", "x");
    session.delete_from_list(id);

    assert_eq!(*lengths.lock().unwrap(), vec![1, 2, 1]);
}
