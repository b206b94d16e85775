use pocketnote_core::store::NoteStore;
use pocketnote_core::view::{matches_search, sort_key};
use pocketnote_core::{project, Note, Projection, SortMode, ViewQuery};

fn task(title: &str, due: Option<&str>) -> Note {
    Note::new(title, "task body").as_task(due.map(str::to_string))
}

fn titles(notes: &[Note]) -> Vec<&str> {
    notes.iter().map(|note| note.title.as_str()).collect()
}

#[test]
fn empty_search_matches_all() {
    let notes = vec![Note::new("b", "x"), Note::new("a", "y")];
    let visible = project(&notes, &ViewQuery::default());
    assert_eq!(titles(&visible), vec!["a", "b"]);
}

#[test]
fn filter_matches_title_or_description_case_insensitively() {
    let notes = vec![
        Note::new("Shopping list", "milk"),
        Note::new("Work", "Prepare SHOP review"),
        Note::new("Gym", "legs"),
    ];

    let visible = project(&notes, &ViewQuery::new("shop", SortMode::Title));
    assert_eq!(titles(&visible), vec!["Shopping list", "Work"]);

    for note in &notes {
        let expected = note.title.to_lowercase().contains("shop")
            || note.description.to_lowercase().contains("shop");
        assert_eq!(matches_search(note, "shop"), expected);
    }
}

#[test]
fn filter_folds_non_ascii_case() {
    let notes = vec![Note::new("Ärger", "x"), Note::new("other", "y")];
    let visible = project(&notes, &ViewQuery::new("äR", SortMode::Title));
    assert_eq!(titles(&visible), vec!["Ärger"]);
}

#[test]
fn filter_folds_each_character_independently() {
    let notes = vec![Note::new("ΟΔΟΣ", "x"), Note::new("other", "ΣΟΦΙΑ")];

    assert!(matches_search(&notes[0], "οδοσ"));
    assert!(matches_search(&notes[0], "ΟΔΟΣ"));
    assert!(matches_search(&notes[1], "σοφ"));

    let visible = project(&notes, &ViewQuery::new("οσ", SortMode::Title));
    assert_eq!(titles(&visible), vec!["ΟΔΟΣ"]);
}

#[test]
fn title_sort_is_stable_for_equal_keys() {
    let first = Note::new("same", "first");
    let second = Note::new("same", "second");
    let notes = vec![Note::new("z", "x"), first.clone(), second.clone()];

    let visible = project(&notes, &ViewQuery::default());
    assert_eq!(visible[0].id, first.id);
    assert_eq!(visible[1].id, second.id);
    assert_eq!(visible[2].title, "z");
}

#[test]
fn title_mode_ignores_due_dates() {
    let notes = vec![task("b", Some("2020-01-01")), task("a", Some("2030-01-01"))];
    let visible = project(&notes, &ViewQuery::default());
    assert_eq!(titles(&visible), vec!["a", "b"]);
}

#[test]
fn due_date_mode_compares_mixed_keys_in_one_pass() {
    let notes = vec![Note::new("B", "x"), task("A", Some("2024-01-01"))];
    let visible = project(&notes, &ViewQuery::new("", SortMode::TaskDueDate));
    assert_eq!(titles(&visible), vec!["A", "B"]);
}

#[test]
fn due_date_mode_interleaves_tasks_with_titles() {
    let notes = vec![
        Note::new("3 plain", "x"),
        task("zeta", Some("2024-06-01")),
        Note::new("1 plain", "x"),
        task("alpha", Some("2025-01-01")),
    ];

    let visible = project(&notes, &ViewQuery::new("", SortMode::TaskDueDate));
    // Keys: "1 plain" < "2024-06-01" < "2025-01-01" < "3 plain".
    assert_eq!(titles(&visible), vec!["1 plain", "zeta", "alpha", "3 plain"]);
}

#[test]
fn due_date_sort_is_stable_for_equal_due_dates() {
    let first = task("zulu", Some("2024-05-01"));
    let second = task("alpha", Some("2024-05-01"));
    let notes = vec![task("late", Some("2024-09-01")), first.clone(), second.clone()];

    let visible = project(&notes, &ViewQuery::new("", SortMode::TaskDueDate));

    // Equal due dates keep store order even though the titles disagree.
    assert_eq!(visible[0].id, first.id);
    assert_eq!(visible[1].id, second.id);
    assert_eq!(visible[2].title, "late");
}

#[test]
fn task_without_due_date_sorts_first() {
    let notes = vec![Note::new("a", "x"), task("undated", None)];

    assert_eq!(sort_key(&notes[1], SortMode::TaskDueDate), None);
    assert_eq!(sort_key(&notes[1], SortMode::Title), Some("undated"));

    let visible = project(&notes, &ViewQuery::new("", SortMode::TaskDueDate));
    assert_eq!(titles(&visible), vec!["undated", "a"]);
}

#[test]
fn projection_does_not_mutate_input() {
    let notes = vec![Note::new("b", "x"), Note::new("a", "x")];
    let before = notes.clone();
    let _ = project(&notes, &ViewQuery::new("a", SortMode::TaskDueDate));
    assert_eq!(notes, before);
}

#[test]
fn cached_projection_recomputes_only_on_changes() {
    let mut store = NoteStore::new();
    store.add(Note::new("b", "x"));
    let mut projection = Projection::new();
    let query = ViewQuery::default();

    assert!(projection.refresh(&store.snapshot(), &query));
    assert!(!projection.refresh(&store.snapshot(), &query));

    store.add(Note::new("a", "x"));
    assert!(projection.refresh(&store.snapshot(), &query));
    assert_eq!(titles(projection.items()), vec!["a", "b"]);

    let searching = ViewQuery::new("b", SortMode::Title);
    assert!(projection.refresh(&store.snapshot(), &searching));
    assert_eq!(titles(projection.items()), vec!["b"]);

    let sorted = ViewQuery::new("b", SortMode::TaskDueDate);
    assert!(projection.refresh(&store.snapshot(), &sorted));
    assert!(!projection.refresh(&store.snapshot(), &sorted));
}
