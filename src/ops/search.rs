use regex::{Regex, RegexBuilder};
use serde::Serialize;

use crate::model::board::Board;
use crate::model::list::List;
use crate::model::task::Task;

/// Which field of a task matched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchField {
    Title,
    Description,
}

/// A search hit for a task on a board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub list_id: String,
    pub task_id: String,
    pub field: MatchField,
}

/// Case-insensitive literal matcher for a search term
enum TermMatcher {
    /// The empty term
    Any,
    Literal(Regex),
    /// The term could not be compiled
    Never,
}

impl TermMatcher {
    fn new(term: &str) -> Self {
        Self::with_size_limit(term, SIZE_LIMIT)
    }

    fn with_size_limit(term: &str, size_limit: usize) -> Self {
        if term.is_empty() {
            return TermMatcher::Any;
        }
        match RegexBuilder::new(&regex::escape(term))
            .case_insensitive(true)
            .size_limit(size_limit)
            .build()
        {
            Ok(re) => TermMatcher::Literal(re),
            Err(e) => {
                tracing::warn!(error = %e, "search term rejected, matching nothing");
                TermMatcher::Never
            }
        }
    }

    /// The field a task matched on, title first
    fn field(&self, task: &Task) -> Option<MatchField> {
        match self {
            TermMatcher::Any => Some(MatchField::Title),
            TermMatcher::Literal(re) if re.is_match(&task.title) => Some(MatchField::Title),
            TermMatcher::Literal(re) if re.is_match(&task.description) => Some(MatchField::Description),
            TermMatcher::Literal(_) | TermMatcher::Never => None,
        }
    }
}

/// Compiled size cap for a search term (the regex crate default)
const SIZE_LIMIT: usize = 10 * (1 << 20);

fn filter_with<'a>(matcher: &TermMatcher, list: &'a List) -> Vec<&'a Task> {
    list.tasks
        .iter()
        .filter(|t| matcher.field(t).is_some())
        .collect()
}

/// Tasks of a list whose title or description contains `term`, ignoring case,
/// in list order.
pub fn filter_tasks<'a>(list: &'a List, term: &str) -> Vec<&'a Task> {
    filter_with(&TermMatcher::new(term), list)
}

/// All matching tasks on a board, one hit per task (title wins over description)
pub fn search_board(board: &Board, term: &str) -> Vec<SearchHit> {
    let matcher = TermMatcher::new(term);
    let mut hits = Vec::new();
    for list in &board.lists {
        for task in &list.tasks {
            if let Some(field) = matcher.field(task) {
                hits.push(SearchHit {
                    list_id: list.id.clone(),
                    task_id: task.id.clone(),
                    field,
                });
            }
        }
    }
    hits
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_list() -> List {
        let mut list = List::new("To Do");
        list.tasks.push(Task::new("Deploy API", "needs a maintenance window"));
        list.tasks.push(Task::new("Write changelog", "mention the API (v2)"));
        list.tasks.push(Task::new("Buy coffee", ""));
        list
    }

    fn titles(tasks: &[&Task]) -> Vec<String> {
        tasks.iter().map(|t| t.title.clone()).collect()
    }

    #[test]
    fn empty_term_matches_everything() {
        let list = sample_list();
        assert_eq!(filter_tasks(&list, "").len(), 3);
    }

    #[test]
    fn matches_title_or_description_ignoring_case() {
        let list = sample_list();
        assert_eq!(
            titles(&filter_tasks(&list, "api")),
            vec!["Deploy API", "Write changelog"]
        );
        assert_eq!(titles(&filter_tasks(&list, "COFFEE")), vec!["Buy coffee"]);
    }

    #[test]
    fn term_is_literal_not_a_pattern() {
        let list = sample_list();
        assert_eq!(titles(&filter_tasks(&list, "(v2)")), vec!["Write changelog"]);
        assert!(filter_tasks(&list, ".*").is_empty());
    }

    #[test]
    fn no_match_is_empty() {
        let list = sample_list();
        assert!(filter_tasks(&list, "kubernetes").is_empty());
    }

    #[test]
    fn uncompilable_term_matches_nothing() {
        let list = sample_list();
        let matcher = TermMatcher::with_size_limit("deploy", 1);
        assert!(matches!(matcher, TermMatcher::Never));
        assert!(filter_with(&matcher, &list).is_empty());
    }

    #[test]
    fn search_board_reports_field() {
        let mut board = Board::new("B");
        board.lists[0] = sample_list();
        let hits = search_board(&board, "api");
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].field, MatchField::Title);
        assert_eq!(hits[1].field, MatchField::Description);

        let hits = search_board(&board, "window");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].field, MatchField::Description);
        assert_eq!(hits[0].list_id, board.lists[0].id);
    }
}
