use crate::model::board::Board;
use crate::model::document::Document;
use crate::ops::clean_title;

/// Append a new board with the default lists. Returns the new board's id, or
/// `None` if the title is blank.
pub fn create_board(doc: &mut Document, title: &str) -> Option<String> {
    let title = clean_title(title)?;
    let board = Board::new(title);
    let id = board.id.clone();
    doc.boards.insert(id.clone(), board);
    doc.board_order.push(id.clone());
    Some(id)
}

/// Remove a board, and with it all of its lists and tasks
pub fn delete_board(doc: &mut Document, board_id: &str) -> bool {
    let removed = doc.boards.shift_remove(board_id).is_some();
    let before = doc.board_order.len();
    doc.board_order.retain(|id| id != board_id);
    removed || doc.board_order.len() != before
}

/// Replace a board wholesale. The stored id is kept; the new title is trimmed
/// and a blank title rejects the update.
pub fn update_board(doc: &mut Document, board_id: &str, mut board: Board) -> bool {
    let Some(title) = clean_title(&board.title) else {
        return false;
    };
    let Some(slot) = doc.board_mut(board_id) else {
        return false;
    };
    board.id = board_id.to_string();
    board.title = title;
    if *slot == board {
        return false;
    }
    *slot = board;
    true
}

/// Change only a board's title
pub fn rename_board(doc: &mut Document, board_id: &str, title: &str) -> bool {
    let Some(board) = doc.board(board_id) else {
        return false;
    };
    let renamed = Board {
        title: title.to_string(),
        ..board.clone()
    };
    update_board(doc, board_id, renamed)
}

pub fn toggle_dark_mode(doc: &mut Document) {
    doc.dark_mode = !doc.dark_mode;
}
