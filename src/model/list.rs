use serde::{Deserialize, Serialize};

use super::id::next_id;
use super::task::Task;

/// An ordered column of tasks inside a board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct List {
    pub id: String,
    pub title: String,
    /// Tasks in display order
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl List {
    /// Create an empty list with a fresh id
    pub fn new(title: impl Into<String>) -> Self {
        List {
            id: next_id(),
            title: title.into(),
            tasks: Vec::new(),
        }
    }

    pub fn find_task(&self, task_id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == task_id)
    }

    pub fn contains_task(&self, task_id: &str) -> bool {
        self.find_task(task_id).is_some()
    }
}
