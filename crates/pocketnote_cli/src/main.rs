//! CLI smoke entry point.
//!
//! Builds a session with a few notes and prints both list orderings, so core
//! wiring can be checked without a host UI.

use pocketnote_core::{MediaAttachment, NoteFields, NotesSession};

fn main() {
    println!("pocketnote_core ping={}", pocketnote_core::ping());
    println!("pocketnote_core version={}", pocketnote_core::core_version());

    let mut session = NotesSession::new();
    let samples = [
        ("Groceries", "milk and eggs", None),
        ("Dentist", "annual check", Some("2024-03-12")),
        ("Book club", "chapter 4", Some("2024-02-01")),
    ];
    for (title, description, due_date) in samples {
        let composer = session.open_composer();
        let mut fields = NoteFields::new(title, description);
        if let Some(due) = due_date {
            fields.is_task = true;
            fields.due_date = due.to_string();
        }
        if composer.set_fields(fields).is_err() {
            continue;
        }
        if title == "Groceries" {
            let _ = composer.attach(MediaAttachment::from_gallery("content://media/1"));
        }
        if let Err(err) = session.commit_composer() {
            eprintln!("commit failed: {err}");
        }
    }

    for sort_by_due_date in [false, true] {
        session.set_sort_by_due_date(sort_by_due_date);
        println!("sort_by_due_date={sort_by_due_date}");
        for note in session.visible_notes() {
            println!(
                "  {} due={} attachments={}",
                note.title,
                note.due_date.as_deref().unwrap_or("-"),
                note.attachments.len()
            );
        }
    }
}
