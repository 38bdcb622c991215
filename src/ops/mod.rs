//! Mutation and query functions over a [`Document`](crate::model::Document).
//!
//! Every mutation is forgiving: an unknown board, list or task id, or a title
//! that is empty after trimming, leaves the document untouched and reports
//! `false`. Only the store decides whether a change gets published.

pub mod board_ops;
pub mod import;
pub mod list_ops;
pub mod search;
pub mod task_ops;

/// Trim a title, rejecting it if nothing is left
pub fn clean_title(title: &str) -> Option<String> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_title_trims_and_rejects_blank() {
        assert_eq!(clean_title("  Sprint 1  ").as_deref(), Some("Sprint 1"));
        assert_eq!(clean_title(""), None);
        assert_eq!(clean_title(" \t\n "), None);
    }
}
