use serde::{Deserialize, Serialize};

use super::id::next_id;

/// A single unit of work inside a list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Opaque identifier, assigned once at creation
    pub id: String,
    /// Task title (never empty once accepted by the store)
    pub title: String,
    /// Free-form description, may be empty
    #[serde(default)]
    pub description: String,
}

impl Task {
    /// Create a new task with a fresh id
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Task {
            id: next_id(),
            title: title.into(),
            description: description.into(),
        }
    }

    /// Create a task with no description
    pub fn titled(title: impl Into<String>) -> Self {
        Task::new(title, "")
    }
}
