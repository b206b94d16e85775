use pocketnote_core::{
    EditOutcome, EditorState, MediaAttachment, Note, NoteEditor, NoteStore, WorkflowError,
};
use uuid::Uuid;

fn store_with_attached_note() -> (NoteStore, Note) {
    let mut store = NoteStore::new();
    let note = Note::new("title", "description")
        .with_reminders(vec!["tomorrow 9am".to_string()])
        .with_attachments(vec![
            MediaAttachment::captured("content://app/pictures/1.jpg"),
            MediaAttachment::from_gallery("content://media/2"),
        ]);
    let id = store.add(note);
    let stored = store.get(id).unwrap().clone();
    (store, stored)
}

#[test]
fn open_loads_editable_copies() {
    let mut store = NoteStore::new();
    let id = store.add(Note::new("t", "d").as_task(None));

    let editor = NoteEditor::open(&store, id).unwrap();
    assert_eq!(editor.state(), EditorState::Editing);
    assert_eq!(editor.fields().title, "t");
    assert!(editor.fields().is_task);
    assert_eq!(editor.fields().due_date, "");
}

#[test]
fn open_missing_note_fails() {
    let store = NoteStore::new();
    let missing = Uuid::new_v4();
    assert!(matches!(
        NoteEditor::open(&store, missing),
        Err(WorkflowError::NoteMissing(id)) if id == missing
    ));
}

#[test]
fn save_preserves_attachments_and_reminders() {
    let (mut store, original) = store_with_attached_note();
    let mut editor = NoteEditor::open(&store, original.id).unwrap();
    {
        let fields = editor.fields_mut().unwrap();
        fields.title = "renamed".to_string();
        fields.description = "rewritten".to_string();
    }

    let outcome = editor.save(&mut store).unwrap();

    assert_eq!(outcome, EditOutcome::Saved(original.id));
    assert_eq!(editor.state(), EditorState::Saved);
    let saved = store.get(original.id).unwrap();
    assert_eq!(saved.title, "renamed");
    assert_eq!(saved.description, "rewritten");
    assert_eq!(saved.attachments.len(), 2);
    assert_eq!(saved.attachments, original.attachments);
    assert_eq!(saved.reminders, original.reminders);
    assert_eq!(store.position(original.id), Some(0));
}

#[test]
fn save_rejects_blank_fields_and_stays_open() {
    let (mut store, original) = store_with_attached_note();
    let mut editor = NoteEditor::open(&store, original.id).unwrap();
    editor.fields_mut().unwrap().title = "  ".to_string();
    let version = store.snapshot().version();

    assert!(matches!(
        editor.save(&mut store),
        Err(WorkflowError::Validation(_))
    ));
    assert!(editor.is_editing());
    assert_eq!(store.snapshot().version(), version);
    assert_eq!(store.get(original.id).unwrap(), &original);
}

#[test]
fn save_after_concurrent_delete_is_a_no_op() {
    let (mut store, original) = store_with_attached_note();
    let mut editor = NoteEditor::open(&store, original.id).unwrap();
    store.remove(original.id);

    let outcome = editor.save(&mut store).unwrap();
    assert_eq!(outcome, EditOutcome::TargetMissing(original.id));
    assert!(store.is_empty());
    assert!(!editor.is_editing());
}

#[test]
fn delete_removes_and_second_delete_is_a_no_op() {
    let (mut store, original) = store_with_attached_note();
    let mut editor = NoteEditor::open(&store, original.id).unwrap();

    assert_eq!(
        editor.delete(&mut store).unwrap(),
        EditOutcome::Deleted(original.id)
    );
    assert!(store.is_empty());
    assert!(matches!(editor.delete(&mut store), Err(WorkflowError::Closed)));

    let (mut store, original) = store_with_attached_note();
    let mut stale = NoteEditor::open(&store, original.id).unwrap();
    store.remove(original.id);
    assert_eq!(
        stale.delete(&mut store).unwrap(),
        EditOutcome::TargetMissing(original.id)
    );
    assert_eq!(store.len(), 0);
}

#[test]
fn cancel_discards_edits() {
    let (mut store, original) = store_with_attached_note();
    let mut editor = NoteEditor::open(&store, original.id).unwrap();
    editor.fields_mut().unwrap().title = "discarded".to_string();

    editor.cancel().unwrap();

    assert_eq!(editor.state(), EditorState::Cancelled);
    assert_eq!(store.get(original.id).unwrap().title, "title");
    assert!(matches!(editor.save(&mut store), Err(WorkflowError::Closed)));
}

#[test]
fn clearing_task_flag_drops_due_date() {
    let mut store = NoteStore::new();
    let id = store.add(Note::new("t", "d").as_task(Some("2024-01-01".to_string())));
    let mut editor = NoteEditor::open(&store, id).unwrap();
    editor.fields_mut().unwrap().is_task = false;

    editor.save(&mut store).unwrap();

    let saved = store.get(id).unwrap();
    assert!(!saved.is_task);
    assert_eq!(saved.due_date, None);
}
