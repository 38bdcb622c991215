use crate::model::board::Board;
use crate::model::document::Document;
use crate::model::list::List;
use crate::model::task::Task;
use crate::ops::clean_title;

fn list_mut<'a>(doc: &'a mut Document, board_id: &str, list_id: &str) -> Option<&'a mut List> {
    doc.board_mut(board_id)?.find_list_mut(list_id)
}

// ---------------------------------------------------------------------------
// Task CRUD
// ---------------------------------------------------------------------------

/// Append a task to the end of a list. Title and description are trimmed;
/// a blank title is rejected, as is a task id already on the board.
pub fn add_task(doc: &mut Document, board_id: &str, list_id: &str, mut task: Task) -> bool {
    let Some(title) = clean_title(&task.title) else {
        return false;
    };
    let Some(board) = doc.board_mut(board_id) else {
        return false;
    };
    if locate_task(board, &task.id).is_some() {
        return false;
    }
    let Some(list) = board.find_list_mut(list_id) else {
        return false;
    };
    task.title = title;
    task.description = task.description.trim().to_string();
    list.tasks.push(task);
    true
}

/// Replace a task wholesale, keeping its id and position
pub fn update_task(
    doc: &mut Document,
    board_id: &str,
    list_id: &str,
    task_id: &str,
    mut task: Task,
) -> bool {
    let Some(title) = clean_title(&task.title) else {
        return false;
    };
    let Some(slot) = list_mut(doc, board_id, list_id)
        .and_then(|l| l.tasks.iter_mut().find(|t| t.id == task_id))
    else {
        return false;
    };
    task.id = task_id.to_string();
    task.title = title;
    task.description = task.description.trim().to_string();
    if *slot == task {
        return false;
    }
    *slot = task;
    true
}

/// Inline edit: a blank title keeps the old title, and a missing or blank
/// description keeps the old description.
pub fn edit_task(
    doc: &mut Document,
    board_id: &str,
    list_id: &str,
    task_id: &str,
    title: &str,
    description: Option<&str>,
) -> bool {
    let Some(current) = doc
        .board(board_id)
        .and_then(|b| b.find_list(list_id))
        .and_then(|l| l.find_task(task_id))
    else {
        return false;
    };
    let edited = Task {
        id: current.id.clone(),
        title: clean_title(title).unwrap_or_else(|| current.title.clone()),
        description: description
            .and_then(clean_title)
            .unwrap_or_else(|| current.description.clone()),
    };
    update_task(doc, board_id, list_id, task_id, edited)
}

pub fn delete_task(doc: &mut Document, board_id: &str, list_id: &str, task_id: &str) -> bool {
    let Some(list) = list_mut(doc, board_id, list_id) else {
        return false;
    };
    let before = list.tasks.len();
    list.tasks.retain(|t| t.id != task_id);
    list.tasks.len() != before
}

// ---------------------------------------------------------------------------
// Move
// ---------------------------------------------------------------------------

/// Move a task from one list to the tail of another list on the same board.
///
/// Same-list moves are no-ops. The move only happens when the task is in the
/// source list, the destination exists, and the destination does not already
/// hold a task with that id, so a task never ends up in two lists.
pub fn move_task(doc: &mut Document, board_id: &str, task: &Task, from_list_id: &str, to_list_id: &str) -> bool {
    if from_list_id == to_list_id {
        return false;
    }
    let Some(board) = doc.board_mut(board_id) else {
        return false;
    };
    let Some(from_idx) = board.lists.iter().position(|l| l.id == from_list_id) else {
        return false;
    };
    let Some(to_idx) = board.lists.iter().position(|l| l.id == to_list_id) else {
        return false;
    };
    if board.lists[to_idx].contains_task(&task.id) {
        return false;
    }
    let Some(task_idx) = board.lists[from_idx]
        .tasks
        .iter()
        .position(|t| t.id == task.id)
    else {
        return false;
    };

    let moved = board.lists[from_idx].tasks.remove(task_idx);
    board.lists[to_idx].tasks.push(moved);
    true
}

/// Find which list of a board holds a task
pub fn locate_task<'a>(board: &'a Board, task_id: &str) -> Option<(&'a List, &'a Task)> {
    board
        .lists
        .iter()
        .find_map(|l| l.find_task(task_id).map(|t| (l, t)))
}
