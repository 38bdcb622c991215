use serde::{Deserialize, Serialize};

use super::id::next_id;
use super::list::List;

/// Titles of the lists every new board starts with, in order
pub const DEFAULT_LIST_TITLES: [&str; 3] = ["To Do", "In Progress", "Done"];

/// A named, ordered collection of lists
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub id: String,
    pub title: String,
    /// Lists in display order
    #[serde(default)]
    pub lists: Vec<List>,
}

impl Board {
    /// Create a board pre-populated with the default lists, all empty
    pub fn new(title: impl Into<String>) -> Self {
        Board {
            id: next_id(),
            title: title.into(),
            lists: DEFAULT_LIST_TITLES.iter().map(|t| List::new(*t)).collect(),
        }
    }

    pub fn find_list(&self, list_id: &str) -> Option<&List> {
        self.lists.iter().find(|l| l.id == list_id)
    }

    pub fn find_list_mut(&mut self, list_id: &str) -> Option<&mut List> {
        self.lists.iter_mut().find(|l| l.id == list_id)
    }

    /// Total number of tasks across all lists
    pub fn task_count(&self) -> usize {
        self.lists.iter().map(|l| l.tasks.len()).sum()
    }
}
