use crate::model::board::Board;
use crate::model::document::Document;

/// Which board, if any, is open for detailed viewing. `None` means the
/// dashboard of all boards.
///
/// Only the board id is held; the board itself is always looked up in the
/// current document, so the view can never show a stale copy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardView {
    board_id: Option<String>,
}

impl BoardView {
    /// Open a board. Selecting an id that is not in `doc` clears the view.
    pub fn select(&mut self, doc: &Document, board_id: &str) -> bool {
        if doc.boards.contains_key(board_id) {
            self.board_id = Some(board_id.to_string());
            true
        } else {
            self.board_id = None;
            false
        }
    }

    /// Back to the dashboard
    pub fn clear(&mut self) {
        self.board_id = None;
    }

    /// Re-resolve against a freshly published document. Falls back to the
    /// dashboard if the open board no longer exists.
    pub fn resync(&mut self, doc: &Document) {
        if let Some(id) = &self.board_id
            && !doc.boards.contains_key(id)
        {
            tracing::debug!(board = %id, "open board is gone, returning to dashboard");
            self.board_id = None;
        }
    }

    pub fn board_id(&self) -> Option<&str> {
        self.board_id.as_deref()
    }

    pub fn current<'a>(&self, doc: &'a Document) -> Option<&'a Board> {
        self.board_id.as_deref().and_then(|id| doc.board(id))
    }

    pub fn is_dashboard(&self) -> bool {
        self.board_id.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_and_clear() {
        let doc = Document::with_default_board("A");
        let id = doc.board_order[0].clone();
        let mut view = BoardView::default();
        assert!(view.is_dashboard());
        assert!(view.select(&doc, &id));
        assert_eq!(view.current(&doc).unwrap().title, "A");
        view.clear();
        assert!(view.current(&doc).is_none());
    }

    #[test]
    fn selecting_unknown_board_falls_back() {
        let doc = Document::with_default_board("A");
        let mut view = BoardView::default();
        assert!(!view.select(&doc, "missing"));
        assert!(view.is_dashboard());
    }

    #[test]
    fn resync_drops_deleted_board() {
        let mut doc = Document::with_default_board("A");
        let id = doc.board_order[0].clone();
        let mut view = BoardView::default();
        view.select(&doc, &id);

        doc.boards.clear();
        doc.board_order.clear();
        view.resync(&doc);
        assert!(view.is_dashboard());
    }

    #[test]
    fn current_reflects_latest_document() {
        let mut doc = Document::with_default_board("Old");
        let id = doc.board_order[0].clone();
        let mut view = BoardView::default();
        view.select(&doc, &id);
        doc.board_mut(&id).unwrap().title = "New".into();
        view.resync(&doc);
        assert_eq!(view.current(&doc).unwrap().title, "New");
    }
}
