use std::collections::HashSet;

use crate::model::board::Board;
use crate::model::document::Document;
use crate::model::list::List;
use crate::ops::clean_title;
use crate::ops::task_ops::locate_task;

/// Whether `list` would put a task in two lists: it repeats a task id, or
/// carries a task some other list of `board` already holds. The list being
/// replaced (`replacing`) may keep its own tasks.
fn claims_foreign_task(board: &Board, list: &List, replacing: Option<&str>) -> bool {
    let mut seen = HashSet::new();
    list.tasks.iter().any(|task| {
        !seen.insert(task.id.as_str())
            || matches!(locate_task(board, &task.id), Some((owner, _)) if Some(owner.id.as_str()) != replacing)
    })
}

/// Append a list to a board. The title is trimmed; blank titles are rejected,
/// as are tasks already on the board.
pub fn add_list(doc: &mut Document, board_id: &str, mut list: List) -> bool {
    let Some(title) = clean_title(&list.title) else {
        return false;
    };
    let Some(board) = doc.board_mut(board_id) else {
        return false;
    };
    if board.find_list(&list.id).is_some() || claims_foreign_task(board, &list, None) {
        return false;
    }
    list.title = title;
    board.lists.push(list);
    true
}

/// Replace the list at `list_id` wholesale, keeping its id and position
pub fn update_list(doc: &mut Document, board_id: &str, list_id: &str, mut list: List) -> bool {
    let Some(title) = clean_title(&list.title) else {
        return false;
    };
    let Some(board) = doc.board_mut(board_id) else {
        return false;
    };
    if claims_foreign_task(board, &list, Some(list_id)) {
        return false;
    }
    let Some(slot) = board.find_list_mut(list_id) else {
        return false;
    };
    list.id = list_id.to_string();
    list.title = title;
    if *slot == list {
        return false;
    }
    *slot = list;
    true
}

/// Change only a list's title
pub fn rename_list(doc: &mut Document, board_id: &str, list_id: &str, title: &str) -> bool {
    let Some(list) = doc.board(board_id).and_then(|b| b.find_list(list_id)) else {
        return false;
    };
    let renamed = List {
        title: title.to_string(),
        ..list.clone()
    };
    update_list(doc, board_id, list_id, renamed)
}

/// Remove a list and every task in it
pub fn delete_list(doc: &mut Document, board_id: &str, list_id: &str) -> bool {
    let Some(board) = doc.board_mut(board_id) else {
        return false;
    };
    let before = board.lists.len();
    board.lists.retain(|l| l.id != list_id);
    board.lists.len() != before
}
