//! The authoritative in-memory document.
//!
//! Every mutation goes through [`Store`]: it works on a copy of the current
//! document, and if the operation changed anything it persists the copy,
//! swaps it in as the new snapshot, re-resolves the open board, and notifies
//! listeners, in that order. Snapshots handed out earlier are never modified.

pub mod view;

use std::path::Path;
use std::sync::Arc;

use serde_json::Value;

use crate::io::persistence::{self, Persistence};
use crate::model::board::Board;
use crate::model::document::Document;
use crate::model::list::List;
use crate::model::task::Task;
use crate::ops::import::{self, ImportError, ImportMode, MergeReport};
use crate::ops::{board_ops, list_ops, task_ops};
use view::BoardView;

/// Callback invoked with each newly published document
pub type Listener = Box<dyn FnMut(&Document)>;

/// Handle returned by [`Store::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Proof that the caller owns the single in-flight import
#[derive(Debug, PartialEq, Eq)]
pub struct ImportTicket(u64);

/// What an import did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportOutcome {
    Merged(MergeReport),
    Replaced { boards: usize },
}

pub struct Store {
    doc: Arc<Document>,
    persistence: Persistence,
    view: BoardView,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
    pending_import: Option<u64>,
    next_ticket: u64,
}

impl Store {
    /// Start from the stored document, or from a single default board when
    /// nothing usable is stored (the default is persisted right away).
    pub fn open(persistence: Persistence, default_board_title: &str) -> Self {
        match persistence.load() {
            Some(doc) => Self::with_document(persistence, doc),
            None => {
                tracing::debug!("no stored document, starting with a default board");
                let mut store = Self::with_document(persistence, Document::default());
                store.replace_document(Document::with_default_board(default_board_title));
                store
            }
        }
    }

    /// Wrap an existing document without writing it
    pub fn with_document(persistence: Persistence, doc: Document) -> Self {
        Store {
            doc: Arc::new(doc),
            persistence,
            view: BoardView::default(),
            listeners: Vec::new(),
            next_subscription: 0,
            pending_import: None,
            next_ticket: 0,
        }
    }

    /// The current document
    pub fn document(&self) -> &Document {
        &self.doc
    }

    /// A shared handle on the current snapshot
    pub fn snapshot(&self) -> Arc<Document> {
        Arc::clone(&self.doc)
    }

    // -----------------------------------------------------------------------
    // Publishing
    // -----------------------------------------------------------------------

    /// Run `op` on a copy of the document and publish the copy if `op`
    /// reports a change
    fn apply(&mut self, op: impl FnOnce(&mut Document) -> bool) -> bool {
        let mut next = Document::clone(&self.doc);
        if !op(&mut next) {
            return false;
        }
        self.publish(next);
        true
    }

    fn publish(&mut self, next: Document) {
        self.persistence.save(&next);
        self.doc = Arc::new(next);
        self.view.resync(&self.doc);
        let doc: &Document = &self.doc;
        tracing::debug!(boards = doc.boards.len(), "document published");
        for (_, listener) in &mut self.listeners {
            listener(doc);
        }
    }

    pub fn subscribe(&mut self, listener: Listener) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, listener));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    // -----------------------------------------------------------------------
    // Boards
    // -----------------------------------------------------------------------

    /// Returns the new board's id, or `None` for a blank title
    pub fn create_board(&mut self, title: &str) -> Option<String> {
        let mut created = None;
        self.apply(|doc| {
            created = board_ops::create_board(doc, title);
            created.is_some()
        });
        created
    }

    /// Callers are expected to have confirmed the deletion already
    pub fn delete_board(&mut self, board_id: &str) -> bool {
        self.apply(|doc| board_ops::delete_board(doc, board_id))
    }

    pub fn update_board(&mut self, board_id: &str, board: Board) -> bool {
        self.apply(|doc| board_ops::update_board(doc, board_id, board))
    }

    pub fn rename_board(&mut self, board_id: &str, title: &str) -> bool {
        self.apply(|doc| board_ops::rename_board(doc, board_id, title))
    }

    pub fn toggle_dark_mode(&mut self) -> bool {
        self.apply(|doc| {
            board_ops::toggle_dark_mode(doc);
            true
        })
    }

    /// Swap in a whole new document and return to the dashboard
    pub fn replace_document(&mut self, mut doc: Document) {
        doc.normalize_order();
        self.view.clear();
        self.publish(doc);
    }

    // -----------------------------------------------------------------------
    // Lists
    // -----------------------------------------------------------------------

    pub fn add_list(&mut self, board_id: &str, list: List) -> bool {
        self.apply(|doc| list_ops::add_list(doc, board_id, list))
    }

    pub fn update_list(&mut self, board_id: &str, list_id: &str, list: List) -> bool {
        self.apply(|doc| list_ops::update_list(doc, board_id, list_id, list))
    }

    pub fn rename_list(&mut self, board_id: &str, list_id: &str, title: &str) -> bool {
        self.apply(|doc| list_ops::rename_list(doc, board_id, list_id, title))
    }

    /// Callers are expected to have confirmed the deletion already
    pub fn delete_list(&mut self, board_id: &str, list_id: &str) -> bool {
        self.apply(|doc| list_ops::delete_list(doc, board_id, list_id))
    }

    // -----------------------------------------------------------------------
    // Tasks
    // -----------------------------------------------------------------------

    pub fn add_task(&mut self, board_id: &str, list_id: &str, task: Task) -> bool {
        self.apply(|doc| task_ops::add_task(doc, board_id, list_id, task))
    }

    pub fn update_task(&mut self, board_id: &str, list_id: &str, task_id: &str, task: Task) -> bool {
        self.apply(|doc| task_ops::update_task(doc, board_id, list_id, task_id, task))
    }

    pub fn edit_task(
        &mut self,
        board_id: &str,
        list_id: &str,
        task_id: &str,
        title: &str,
        description: Option<&str>,
    ) -> bool {
        self.apply(|doc| task_ops::edit_task(doc, board_id, list_id, task_id, title, description))
    }

    pub fn delete_task(&mut self, board_id: &str, list_id: &str, task_id: &str) -> bool {
        self.apply(|doc| task_ops::delete_task(doc, board_id, list_id, task_id))
    }

    pub fn move_task(&mut self, board_id: &str, task: &Task, from_list_id: &str, to_list_id: &str) -> bool {
        self.apply(|doc| task_ops::move_task(doc, board_id, task, from_list_id, to_list_id))
    }

    // -----------------------------------------------------------------------
    // View projection
    // -----------------------------------------------------------------------

    pub fn select_board(&mut self, board_id: &str) -> bool {
        self.view.select(&self.doc, board_id)
    }

    pub fn clear_selection(&mut self) {
        self.view.clear();
    }

    pub fn view(&self) -> &BoardView {
        &self.view
    }

    /// The open board as it is in the current document
    pub fn current_board(&self) -> Option<&Board> {
        self.view.current(&self.doc)
    }

    // -----------------------------------------------------------------------
    // Import
    // -----------------------------------------------------------------------

    /// Claim the import slot. Fails while another import is outstanding.
    pub fn begin_import(&mut self) -> Result<ImportTicket, ImportError> {
        if self.pending_import.is_some() {
            return Err(ImportError::InProgress);
        }
        let ticket = self.next_ticket;
        self.next_ticket += 1;
        self.pending_import = Some(ticket);
        Ok(ImportTicket(ticket))
    }

    /// Give up an import without touching the document
    pub fn cancel_import(&mut self, ticket: ImportTicket) -> Result<(), ImportError> {
        self.take_ticket(ticket)
    }

    /// Apply parsed import data under a ticket from [`Store::begin_import`]
    pub fn complete_import(
        &mut self,
        ticket: ImportTicket,
        value: &Value,
        mode: ImportMode,
    ) -> Result<ImportOutcome, ImportError> {
        self.take_ticket(ticket)?;
        let imported = import::validate_import(value);
        let outcome = match mode {
            ImportMode::Merge => {
                let mut report = MergeReport::default();
                self.apply(|doc| {
                    report = import::merge_import(doc, imported);
                    !report.added.is_empty()
                });
                ImportOutcome::Merged(report)
            }
            ImportMode::Replace => {
                let doc = imported.into_document();
                let boards = doc.boards.len();
                self.replace_document(doc);
                ImportOutcome::Replaced { boards }
            }
        };
        Ok(outcome)
    }

    /// Read, parse and apply an import file in one go. On a read or parse
    /// error the document is left unchanged.
    pub fn import_file(&mut self, path: &Path, mode: ImportMode) -> Result<ImportOutcome, ImportError> {
        let ticket = self.begin_import()?;
        match persistence::read_import_file(path) {
            Ok(value) => self.complete_import(ticket, &value, mode),
            Err(e) => {
                self.cancel_import(ticket)?;
                Err(e)
            }
        }
    }

    pub fn import_in_progress(&self) -> bool {
        self.pending_import.is_some()
    }

    fn take_ticket(&mut self, ticket: ImportTicket) -> Result<(), ImportError> {
        if self.pending_import != Some(ticket.0) {
            return Err(ImportError::StaleTicket);
        }
        self.pending_import = None;
        Ok(())
    }
}
