//! End-to-end behaviour of the store: mutations, persistence, the open-board
//! view and imports, exercised through the public API only.

use std::fs;

use pretty_assertions::assert_eq;
use serde_json::json;
use taskboard::io::persistence::Persistence;
use taskboard::io::storage::{FileStore, MemoryStore};
use taskboard::model::{DEFAULT_LIST_TITLES, Document, List, Task};
use taskboard::ops::import::{ImportError, ImportMode};
use taskboard::store::{ImportOutcome, Store};
use tempfile::TempDir;

const KEY: &str = "trello-clone-data";

fn empty_store(mem: &MemoryStore) -> Store {
    Store::with_document(Persistence::new(mem.clone(), KEY), Document::default())
}

/// A store with one board and its list ids
fn board_store(mem: &MemoryStore) -> (Store, String, Vec<String>) {
    let mut store = empty_store(mem);
    let board = store.create_board("Board").unwrap();
    let lists = store.document().board(&board).unwrap().lists.iter().map(|l| l.id.clone()).collect();
    (store, board, lists)
}

#[test]
fn launch_board_from_empty_document() {
    let mem = MemoryStore::new();
    let mut store = empty_store(&mem);
    let id = store.create_board("Launch").unwrap();

    let doc = store.document();
    assert_eq!(doc.boards.len(), 1);
    assert_eq!(doc.board_order, vec![id.clone()]);
    let board = doc.board(&id).unwrap();
    assert_eq!(board.title, "Launch");
    let titles: Vec<&str> = board.lists.iter().map(|l| l.title.as_str()).collect();
    assert_eq!(titles, DEFAULT_LIST_TITLES);
    assert!(board.lists.iter().all(|l| l.tasks.is_empty()));
}

#[test]
fn blank_titles_are_rejected_and_others_trimmed() {
    let mem = MemoryStore::new();
    let mut store = empty_store(&mem);
    assert!(store.create_board("   ").is_none());
    assert!(store.create_board("").is_none());
    assert!(store.document().board_order.is_empty());

    let id = store.create_board("  Sprint 1  ").unwrap();
    assert_eq!(store.document().board(&id).unwrap().title, "Sprint 1");
}

#[test]
fn move_is_atomic_and_appends_at_tail() {
    let mem = MemoryStore::new();
    let (mut store, board, lists) = board_store(&mem);
    let task = Task::titled("Ship it");
    store.add_task(&board, &lists[0], task.clone());
    store.add_task(&board, &lists[1], Task::titled("Earlier"));

    assert!(store.move_task(&board, &task, &lists[0], &lists[1]));
    let doc = store.document();
    let b = doc.board(&board).unwrap();
    let occurrences: usize = b
        .lists
        .iter()
        .map(|l| l.tasks.iter().filter(|t| t.id == task.id).count())
        .sum();
    assert_eq!(occurrences, 1);
    assert!(!b.lists[0].contains_task(&task.id));
    assert_eq!(b.lists[1].tasks.last().unwrap().id, task.id);
}

#[test]
fn same_list_move_changes_nothing_and_writes_nothing() {
    let mem = MemoryStore::new();
    let (mut store, board, lists) = board_store(&mem);
    let task = Task::titled("Stay");
    store.add_task(&board, &lists[0], task.clone());
    let before = store.document().clone();
    let writes = mem.write_count();

    assert!(!store.move_task(&board, &task, &lists[0], &lists[0]));
    assert_eq!(store.document(), &before);
    assert_eq!(mem.write_count(), writes);
}

#[test]
fn task_id_is_held_by_at_most_one_list() {
    let mem = MemoryStore::new();
    let (mut store, board, lists) = board_store(&mem);
    let task = Task::titled("Single");
    assert!(store.add_task(&board, &lists[0], task.clone()));
    let writes = mem.write_count();

    assert!(!store.add_task(&board, &lists[1], task.clone()));
    let mut copy = List::new("Copy");
    copy.tasks.push(task.clone());
    assert!(!store.add_list(&board, copy.clone()));
    assert!(!store.update_list(&board, &lists[2], copy));

    let occurrences: usize = store
        .document()
        .board(&board)
        .unwrap()
        .lists
        .iter()
        .map(|l| l.tasks.iter().filter(|t| t.id == task.id).count())
        .sum();
    assert_eq!(occurrences, 1);
    assert_eq!(mem.write_count(), writes);
}

#[test]
fn deleting_board_leaves_nothing_reachable() {
    let mem = MemoryStore::new();
    let (mut store, board, lists) = board_store(&mem);
    let keep = store.create_board("Keep").unwrap();
    for list in &lists {
        store.add_task(&board, list, Task::titled("doomed"));
    }

    assert!(store.delete_board(&board));
    let doc = store.document();
    assert_eq!(doc.board_order, vec![keep.clone()]);
    assert!(doc.board(&board).is_none());
    assert!(
        doc.boards
            .values()
            .flat_map(|b| &b.lists)
            .all(|l| !lists.contains(&l.id))
    );
}

#[test]
fn unknown_references_leave_document_equal() {
    let mem = MemoryStore::new();
    let (mut store, board, lists) = board_store(&mem);
    let task = Task::titled("Present");
    store.add_task(&board, &lists[0], task.clone());
    let before = store.document().clone();
    let writes = mem.write_count();

    assert!(!store.update_task(&board, &lists[0], "nope", Task::titled("X")));
    assert!(!store.delete_task(&board, &lists[0], "nope"));
    assert!(!store.update_list(&board, "nope", List::new("X")));
    assert!(!store.delete_list(&board, "nope"));
    assert!(!store.add_task("nope", &lists[0], Task::titled("X")));
    assert!(!store.delete_task("nope", &lists[0], &task.id));

    assert_eq!(store.document(), &before);
    assert_eq!(mem.write_count(), writes);
}

#[test]
fn import_merge_keeps_local_board() {
    let mem = MemoryStore::new();
    let mut store = empty_store(&mem);
    let local = Document {
        boards: [(
            "b1".to_string(),
            taskboard::model::Board {
                id: "b1".into(),
                title: "Mine".into(),
                lists: vec![],
            },
        )]
        .into_iter()
        .collect(),
        board_order: vec!["b1".into()],
        dark_mode: false,
    };
    store.replace_document(local);

    let ticket = store.begin_import().unwrap();
    let outcome = store
        .complete_import(
            ticket,
            &json!({
                "boards": {
                    "b1": { "id": "b1", "title": "Theirs", "lists": [] },
                    "b2": { "id": "b2", "title": "Extra", "lists": [] }
                },
                "boardOrder": ["b2", "b1", "b2"],
                "darkMode": true
            }),
            ImportMode::Merge,
        )
        .unwrap();

    let doc = store.document();
    assert_eq!(doc.board("b1").unwrap().title, "Mine");
    assert_eq!(doc.board_order, vec!["b1", "b2"]);
    assert!(!doc.dark_mode);
    match outcome {
        ImportOutcome::Merged(report) => assert_eq!(report.added, vec!["b2"]),
        other => panic!("expected merge, got {:?}", other),
    }
}

#[test]
fn deleting_viewed_board_clears_projection() {
    let mem = MemoryStore::new();
    let (mut store, board, _) = board_store(&mem);
    store.select_board(&board);
    assert!(store.current_board().is_some());

    store.delete_board(&board);
    assert!(store.current_board().is_none());
}

#[test]
fn invalid_import_file_leaves_document_unchanged() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("backup.json");
    fs::write(&path, "this is not json").unwrap();

    let mem = MemoryStore::new();
    let (mut store, _, _) = board_store(&mem);
    let before = store.document().clone();

    let err = store.import_file(&path, ImportMode::Merge).unwrap_err();
    assert!(matches!(err, ImportError::InvalidJson(_)));
    assert_eq!(err.to_string(), "Invalid JSON file");
    assert_eq!(store.document(), &before);
    assert!(!store.import_in_progress());
}

#[test]
fn file_backed_store_survives_restart() {
    let tmp = TempDir::new().unwrap();
    let open = || Store::open(Persistence::new(FileStore::new(tmp.path()), KEY), "My First Board");

    let mut store = open();
    let first = store.document().board_order[0].clone();
    let second = store.create_board("Second").unwrap();
    let list = store.document().board(&second).unwrap().lists[2].id.clone();
    store.add_task(&second, &list, Task::new("Persisted", "across runs"));
    store.toggle_dark_mode();
    let expected = store.document().clone();
    drop(store);

    let reopened = open();
    assert_eq!(reopened.document(), &expected);
    assert_eq!(reopened.document().board_order, vec![first, second]);
    assert!(tmp.path().join(format!("{}.json", KEY)).exists());
}

#[test]
fn export_then_import_into_fresh_store_merges_everything() {
    let tmp = TempDir::new().unwrap();
    let mem = MemoryStore::new();
    let (mut source, board, lists) = board_store(&mem);
    source.add_task(&board, &lists[0], Task::titled("Carry me"));
    let path = taskboard::io::persistence::export_to_file(source.document(), tmp.path(), "task-manager-backup.json").unwrap();

    let mut target = empty_store(&MemoryStore::new());
    target.import_file(&path, ImportMode::Merge).unwrap();
    assert_eq!(target.document().board(&board), source.document().board(&board));
    assert_eq!(target.document().board_order, vec![board]);
}
