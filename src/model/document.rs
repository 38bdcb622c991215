use std::collections::HashSet;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::board::Board;

/// The whole persisted state: every board, their display order, and the theme flag
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Boards keyed by id
    pub boards: IndexMap<String, Board>,
    /// Display order of boards (distinct from map order)
    pub board_order: Vec<String>,
    #[serde(default)]
    pub dark_mode: bool,
}

impl Document {
    /// A document holding a single default board
    pub fn with_default_board(title: &str) -> Self {
        let board = Board::new(title);
        let mut doc = Document::default();
        doc.board_order.push(board.id.clone());
        doc.boards.insert(board.id.clone(), board);
        doc
    }

    pub fn board(&self, board_id: &str) -> Option<&Board> {
        self.boards.get(board_id)
    }

    pub fn board_mut(&mut self, board_id: &str) -> Option<&mut Board> {
        self.boards.get_mut(board_id)
    }

    /// Boards in display order
    pub fn ordered_boards(&self) -> impl Iterator<Item = &Board> {
        self.board_order.iter().filter_map(|id| self.boards.get(id))
    }

    /// Find a board by id, or failing that by exact title (first in display order)
    pub fn resolve_board(&self, id_or_title: &str) -> Option<&Board> {
        self.boards
            .get(id_or_title)
            .or_else(|| self.ordered_boards().find(|b| b.title == id_or_title))
    }

    /// Restore the order invariant: every id in `board_order` has a board, no id
    /// appears twice, and every board appears in `board_order`.
    /// Returns true if anything changed.
    pub fn normalize_order(&mut self) -> bool {
        let mut seen = HashSet::new();
        let before = self.board_order.len();
        let boards = &self.boards;
        self.board_order
            .retain(|id| boards.contains_key(id) && seen.insert(id.clone()));
        let mut changed = self.board_order.len() != before;

        for id in self.boards.keys() {
            if !seen.contains(id) {
                self.board_order.push(id.clone());
                changed = true;
            }
        }
        changed
    }
}
