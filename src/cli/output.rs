use std::fmt::Write;

use serde::Serialize;

use crate::model::board::Board;
use crate::model::document::Document;
use crate::model::list::List;
use crate::model::task::Task;
use crate::ops::search::{MatchField, filter_tasks, search_board};
use crate::store::ImportOutcome;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct TaskJson {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
}

#[derive(Serialize)]
pub struct ListJson {
    pub id: String,
    pub title: String,
    pub tasks: Vec<TaskJson>,
}

#[derive(Serialize)]
pub struct MatchJson {
    pub list: String,
    pub task: String,
    pub field: MatchField,
}

#[derive(Serialize)]
pub struct BoardJson {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matches: Option<Vec<MatchJson>>,
    pub lists: Vec<ListJson>,
}

#[derive(Serialize)]
pub struct BoardSummaryJson {
    pub id: String,
    pub title: String,
    pub lists: usize,
    pub tasks: usize,
    pub open: bool,
}

#[derive(Serialize)]
pub struct DashboardJson {
    pub dark_mode: bool,
    pub boards: Vec<BoardSummaryJson>,
}

#[derive(Serialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum ImportJson {
    Merge {
        added: Vec<String>,
        kept_local: Vec<String>,
        invalid: Vec<String>,
    },
    Replace {
        boards: usize,
    },
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

pub fn task_to_json(task: &Task) -> TaskJson {
    TaskJson {
        id: task.id.clone(),
        title: task.title.clone(),
        description: task.description.clone(),
    }
}

fn list_to_json(list: &List, term: &str) -> ListJson {
    ListJson {
        id: list.id.clone(),
        title: list.title.clone(),
        tasks: filter_tasks(list, term).into_iter().map(task_to_json).collect(),
    }
}

/// A board with each list filtered by `search`
pub fn board_to_json(board: &Board, search: Option<&str>) -> BoardJson {
    let term = search.unwrap_or("");
    BoardJson {
        id: board.id.clone(),
        title: board.title.clone(),
        search: search.map(str::to_string),
        matches: search.map(|term| {
            search_board(board, term)
                .into_iter()
                .map(|hit| MatchJson {
                    list: hit.list_id,
                    task: hit.task_id,
                    field: hit.field,
                })
                .collect()
        }),
        lists: board.lists.iter().map(|l| list_to_json(l, term)).collect(),
    }
}

pub fn dashboard_to_json(doc: &Document, open_board: Option<&str>) -> DashboardJson {
    DashboardJson {
        dark_mode: doc.dark_mode,
        boards: doc
            .ordered_boards()
            .map(|b| BoardSummaryJson {
                id: b.id.clone(),
                title: b.title.clone(),
                lists: b.lists.len(),
                tasks: b.task_count(),
                open: open_board == Some(b.id.as_str()),
            })
            .collect(),
    }
}

pub fn import_to_json(outcome: &ImportOutcome) -> ImportJson {
    match outcome {
        ImportOutcome::Merged(report) => ImportJson::Merge {
            added: report.added.clone(),
            kept_local: report.kept_local.clone(),
            invalid: report.invalid.clone(),
        },
        ImportOutcome::Replaced { boards } => ImportJson::Replace { boards: *boards },
    }
}

// ---------------------------------------------------------------------------
// Text rendering
// ---------------------------------------------------------------------------

/// One line per board: marker, id, title, counts
pub fn format_dashboard(doc: &Document, open_board: Option<&str>) -> String {
    let mut out = String::new();
    for board in doc.ordered_boards() {
        let marker = if open_board == Some(board.id.as_str()) { '*' } else { ' ' };
        let _ = writeln!(
            out,
            "{} {}  {}  ({} lists, {} tasks)",
            marker,
            board.id,
            board.title,
            board.lists.len(),
            board.task_count()
        );
    }
    out
}

/// A board's lists and tasks, each list filtered by `search`
pub fn format_board(board: &Board, search: Option<&str>) -> String {
    let term = search.unwrap_or("");
    let mut out = String::new();
    let _ = writeln!(out, "# {}  [{}]", board.title, board.id);
    if let Some(term) = search {
        let _ = writeln!(out, "search: {:?}  ({} matching)", term, search_board(board, term).len());
    }
    for list in &board.lists {
        let tasks = filter_tasks(list, term);
        out.push('\n');
        let _ = writeln!(out, "## {}  [{}]  ({})", list.title, list.id, tasks.len());
        for task in tasks {
            let _ = writeln!(out, "- {}  {}", task.id, task.title);
            for line in task.description.lines() {
                let _ = writeln!(out, "    {}", line);
            }
        }
    }
    out
}

pub fn format_import(outcome: &ImportOutcome) -> String {
    match outcome {
        ImportOutcome::Merged(report) => {
            let mut out = format!("imported {} board(s)", report.added.len());
            if !report.kept_local.is_empty() {
                let _ = write!(out, ", kept {} local board(s)", report.kept_local.len());
            }
            if !report.invalid.is_empty() {
                let _ = write!(out, ", skipped {} invalid entr(ies)", report.invalid.len());
            }
            out
        }
        ImportOutcome::Replaced { boards } => format!("replaced all data with {} board(s)", boards),
    }
}
