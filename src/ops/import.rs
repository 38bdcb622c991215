use std::collections::HashSet;
use std::path::PathBuf;

use indexmap::IndexMap;
use serde_json::Value;

use crate::model::board::Board;
use crate::model::document::Document;

/// Error type for import operations
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid JSON file")]
    InvalidJson(#[source] serde_json::Error),
    #[error("another import is already in progress")]
    InProgress,
    #[error("import ticket is stale: the import was cancelled or already completed")]
    StaleTicket,
}

/// How imported data is combined with the current document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportMode {
    /// Add boards whose ids are new; local boards always win
    Merge,
    /// Throw the current document away
    Replace,
}

/// Imported data after structural validation. Anything that did not fit the
/// document shape has been dropped or defaulted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportedDocument {
    pub boards: IndexMap<String, Board>,
    pub board_order: Vec<String>,
    pub dark_mode: Option<bool>,
    /// Keys of board entries that could not be read as boards
    pub invalid: Vec<String>,
}

/// Outcome of a merge
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeReport {
    /// Board ids added to the document, in insertion order
    pub added: Vec<String>,
    /// Imported board ids that already existed locally and were ignored
    pub kept_local: Vec<String>,
    /// Imported entries that were not valid boards
    pub invalid: Vec<String>,
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Check an arbitrary JSON value against the document shape.
///
/// A non-object value, or a missing/mistyped `boards` or `boardOrder`, is
/// treated as empty. Board entries without an `id` take their map key; entries
/// that still fail to read as a board are skipped. Non-string order entries
/// are dropped.
pub fn validate_import(value: &Value) -> ImportedDocument {
    let mut imported = ImportedDocument::default();
    let Some(obj) = value.as_object() else {
        tracing::warn!("imported data is not an object; nothing to import");
        return imported;
    };

    if let Some(boards) = obj.get("boards").and_then(Value::as_object) {
        for (key, raw) in boards {
            match read_board(key, raw) {
                Some(board) => {
                    imported.boards.insert(key.clone(), board);
                }
                None => {
                    tracing::warn!(board = %key, "skipping malformed board in import");
                    imported.invalid.push(key.clone());
                }
            }
        }
    }

    if let Some(order) = obj.get("boardOrder").and_then(Value::as_array) {
        imported.board_order = order
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect();
    }

    imported.dark_mode = obj.get("darkMode").and_then(Value::as_bool);
    imported
}

fn read_board(key: &str, raw: &Value) -> Option<Board> {
    let mut raw = raw.clone();
    let fields = raw.as_object_mut()?;
    if !fields.get("id").is_some_and(Value::is_string) {
        fields.insert("id".to_string(), Value::String(key.to_string()));
    }
    let mut board: Board = serde_json::from_value(raw).ok()?;
    // The map key is the board's identity
    board.id = key.to_string();
    Some(board)
}

impl ImportedDocument {
    /// Turn validated import data into a standalone document (for replace)
    pub fn into_document(self) -> Document {
        let mut doc = Document {
            boards: self.boards,
            board_order: self.board_order,
            dark_mode: self.dark_mode.unwrap_or(false),
        };
        doc.normalize_order();
        doc
    }
}

// ---------------------------------------------------------------------------
// Merge
// ---------------------------------------------------------------------------

/// Additive union keyed by board id.
///
/// New board ids are inserted; existing ones are left alone. Imported order
/// entries are appended when they are not already ordered and their board now
/// exists. Boards added without an order entry are appended afterwards, so
/// every board ends up in `board_order`. `dark_mode` is not touched.
pub fn merge_import(doc: &mut Document, imported: ImportedDocument) -> MergeReport {
    let mut report = MergeReport {
        invalid: imported.invalid,
        ..Default::default()
    };

    for (id, board) in imported.boards {
        if doc.boards.contains_key(&id) {
            report.kept_local.push(id);
        } else {
            doc.boards.insert(id.clone(), board);
            report.added.push(id);
        }
    }

    let mut ordered: HashSet<String> = doc.board_order.iter().cloned().collect();
    for id in imported.board_order {
        if doc.boards.contains_key(&id) && ordered.insert(id.clone()) {
            doc.board_order.push(id);
        }
    }
    doc.normalize_order();

    tracing::info!(
        added = report.added.len(),
        kept_local = report.kept_local.len(),
        invalid = report.invalid.len(),
        "import merged"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn board_json(id: &str, title: &str) -> Value {
        json!({ "id": id, "title": title, "lists": [] })
    }

    fn local_doc() -> Document {
        let mut doc = Document::default();
        let mut mine = Board::new("Mine");
        mine.id = "b1".into();
        doc.boards.insert("b1".into(), mine);
        doc.board_order.push("b1".into());
        doc.dark_mode = true;
        doc
    }

    #[test]
    fn local_board_wins_on_id_clash() {
        let mut doc = local_doc();
        let imported = validate_import(&json!({
            "boards": { "b1": board_json("b1", "Theirs"), "b2": board_json("b2", "New") },
            "boardOrder": ["b1", "b2"],
            "darkMode": false
        }));
        let report = merge_import(&mut doc, imported);

        assert_eq!(doc.board("b1").unwrap().title, "Mine");
        assert_eq!(doc.board("b2").unwrap().title, "New");
        assert_eq!(doc.board_order, vec!["b1", "b2"]);
        assert_eq!(report.added, vec!["b2"]);
        assert_eq!(report.kept_local, vec!["b1"]);
        assert!(doc.dark_mode);
    }

    #[test]
    fn order_entries_appended_once() {
        let mut doc = local_doc();
        let imported = validate_import(&json!({
            "boards": { "b2": board_json("b2", "Two"), "b3": board_json("b3", "Three") },
            "boardOrder": ["b3", "b2", "b3", "b2"]
        }));
        merge_import(&mut doc, imported);
        assert_eq!(doc.board_order, vec!["b1", "b3", "b2"]);
    }

    #[test]
    fn dangling_order_ids_are_ignored() {
        let mut doc = local_doc();
        let imported = validate_import(&json!({
            "boards": {},
            "boardOrder": ["ghost", "b1"]
        }));
        merge_import(&mut doc, imported);
        assert_eq!(doc.board_order, vec!["b1"]);
        assert!(doc.board("ghost").is_none());
    }

    #[test]
    fn unordered_imported_boards_still_get_ordered() {
        let mut doc = local_doc();
        let imported = validate_import(&json!({
            "boards": { "b2": board_json("b2", "Two") }
        }));
        merge_import(&mut doc, imported);
        assert_eq!(doc.board_order, vec!["b1", "b2"]);
    }

    #[test]
    fn non_object_imports_nothing() {
        for value in [json!(42), json!("text"), json!([1, 2]), json!(null)] {
            let mut doc = local_doc();
            let before = doc.clone();
            let report = merge_import(&mut doc, validate_import(&value));
            assert_eq!(doc, before);
            assert!(report.added.is_empty());
        }
    }

    #[test]
    fn mistyped_fields_default_to_empty() {
        let imported = validate_import(&json!({ "boards": [1, 2], "boardOrder": "b1" }));
        assert!(imported.boards.is_empty());
        assert!(imported.board_order.is_empty());
        assert_eq!(imported.dark_mode, None);
    }

    #[test]
    fn malformed_board_entries_are_skipped() {
        let imported = validate_import(&json!({
            "boards": {
                "ok": board_json("ok", "Fine"),
                "bad": { "id": "bad", "title": 7 },
                "scalar": 3
            },
            "boardOrder": ["ok", "bad", 5]
        }));
        assert_eq!(imported.boards.keys().collect::<Vec<_>>(), vec!["ok"]);
        assert_eq!(imported.invalid, vec!["bad", "scalar"]);
        assert_eq!(imported.board_order, vec!["ok", "bad"]);

        let mut doc = Document::default();
        let report = merge_import(&mut doc, imported);
        assert_eq!(doc.board_order, vec!["ok"]);
        assert_eq!(report.invalid.len(), 2);
    }

    #[test]
    fn missing_board_id_takes_map_key() {
        let imported = validate_import(&json!({
            "boards": { "k1": { "title": "No id", "lists": [
                { "id": "l1", "title": "To Do", "tasks": [ { "id": "t1", "title": "Task" } ] }
            ] } }
        }));
        let board = imported.boards.get("k1").unwrap();
        assert_eq!(board.id, "k1");
        assert_eq!(board.lists[0].tasks[0].description, "");
    }

    #[test]
    fn replace_document_normalizes() {
        let imported = validate_import(&json!({
            "boards": { "b2": board_json("b2", "Two") },
            "boardOrder": ["zz"],
            "darkMode": true
        }));
        let doc = imported.into_document();
        assert_eq!(doc.board_order, vec!["b2"]);
        assert!(doc.dark_mode);
    }
}
