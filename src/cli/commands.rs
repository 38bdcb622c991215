use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tb", about = concat!("taskboard v", env!("CARGO_PKG_VERSION"), " - kanban boards that live on your disk"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Use a different data directory
    #[arg(short = 'C', long = "data-dir", global = true)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List all boards in display order
    Boards,
    /// Board management
    Board(BoardCmd),
    /// Show a board's lists and tasks (default: the open board)
    Show(ShowArgs),
    /// List management on a board
    List(ListCmd),
    /// Task management on a board
    Task(TaskCmd),
    /// Toggle dark mode
    DarkMode,
    /// Write a pretty-printed backup of everything
    Export(ExportArgs),
    /// Merge (or replace with) a backup file
    Import(ImportArgs),
}

// ---------------------------------------------------------------------------
// Boards
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct BoardCmd {
    #[command(subcommand)]
    pub action: BoardAction,
}

#[derive(Subcommand)]
pub enum BoardAction {
    /// Create a board with the default lists
    New { title: String },
    /// Rename a board
    Rename { board: String, title: String },
    /// Delete a board and everything on it
    Rm(BoardRmArgs),
    /// Open a board; later commands default to it
    Open { board: String },
    /// Close the open board (back to the dashboard)
    Close,
}

#[derive(Args)]
pub struct BoardRmArgs {
    /// Board id or exact title
    pub board: String,
    /// Confirm the deletion
    #[arg(long)]
    pub yes: bool,
}

#[derive(Args)]
pub struct ShowArgs {
    /// Board id or exact title (default: the open board)
    pub board: Option<String>,
    /// Only show tasks whose title or description contains this text.
    /// Remembered for later `show` runs; an empty term clears it.
    #[arg(long)]
    pub search: Option<String>,
    /// Forget the remembered search and show every task
    #[arg(long, conflicts_with = "search")]
    pub clear_search: bool,
}

// ---------------------------------------------------------------------------
// Lists
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct ListCmd {
    #[command(subcommand)]
    pub action: ListAction,
    /// Board id or exact title (default: the open board)
    #[arg(long, global = true)]
    pub board: Option<String>,
}

#[derive(Subcommand)]
pub enum ListAction {
    /// Append a list
    Add { title: String },
    /// Rename a list
    Rename { list: String, title: String },
    /// Delete a list and its tasks
    Rm {
        list: String,
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
}

// ---------------------------------------------------------------------------
// Tasks
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct TaskCmd {
    #[command(subcommand)]
    pub action: TaskAction,
    /// Board id or exact title (default: the open board)
    #[arg(long, global = true)]
    pub board: Option<String>,
}

#[derive(Subcommand)]
pub enum TaskAction {
    /// Append a task to a list
    Add {
        /// List id or exact title
        list: String,
        title: String,
        /// Task description
        #[arg(long = "desc")]
        description: Option<String>,
    },
    /// Edit a task's title and/or description
    Edit {
        task: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long = "desc")]
        description: Option<String>,
    },
    /// Delete a task
    Rm { task: String },
    /// Move a task to the end of another list
    Mv {
        task: String,
        /// Destination list id or exact title
        to: String,
    },
}

// ---------------------------------------------------------------------------
// Export / import
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct ExportArgs {
    /// Directory to write the backup into (default: current directory)
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(Args)]
pub struct ImportArgs {
    /// JSON backup file
    pub file: PathBuf,
    /// Replace all current data instead of merging
    #[arg(long)]
    pub replace: bool,
    /// Confirm a replace
    #[arg(long)]
    pub yes: bool,
}
