use std::path::{Path, PathBuf};

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::config_io;
use crate::io::lock::DataDirLock;
use crate::io::persistence::{self, Persistence};
use crate::io::state::{self, UiState};
use crate::io::storage::FileStore;
use crate::model::board::Board;
use crate::model::config::Config;
use crate::model::list::List;
use crate::model::task::Task;
use crate::ops::import::ImportMode;
use crate::ops::task_ops;
use crate::store::Store;

type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// Everything a command needs: the store, the persisted view state, and where
/// they live. Holds the data directory lock for its whole lifetime.
struct Session {
    data_dir: PathBuf,
    config: Config,
    store: Store,
    ui: UiState,
    json: bool,
    _lock: DataDirLock,
}

impl Session {
    fn open(data_dir: PathBuf, json: bool) -> Result<Self, Box<dyn std::error::Error>> {
        let lock = DataDirLock::acquire_default(&data_dir)?;
        let config = config_io::read_config(&data_dir)?;
        let persistence = Persistence::new(FileStore::new(&data_dir), config.storage.key.clone());
        let mut store = Store::open(persistence, &config.defaults.board_title);

        let ui = state::read_ui_state(&data_dir).unwrap_or_default();
        if let Some(id) = &ui.open_board {
            store.select_board(id);
        }

        Ok(Session {
            data_dir,
            config,
            store,
            ui,
            json,
            _lock: lock,
        })
    }

    /// Write back the view state (open board and last search)
    fn close(mut self) -> CmdResult {
        self.ui.open_board = self.store.view().board_id().map(str::to_string);
        state::write_ui_state(&self.data_dir, &self.ui)?;
        Ok(())
    }

    /// Resolve a board argument, or fall back to the open board
    fn board_id(&self, arg: Option<&str>) -> Result<String, String> {
        match arg {
            Some(arg) => self
                .store
                .document()
                .resolve_board(arg)
                .map(|b| b.id.clone())
                .ok_or_else(|| format!("board not found: {}", arg)),
            None => self
                .store
                .current_board()
                .map(|b| b.id.clone())
                .ok_or_else(|| "no board open: pass --board or run `tb board open <BOARD>`".to_string()),
        }
    }

    fn board(&self, board_id: &str) -> Result<&Board, String> {
        self.store
            .document()
            .board(board_id)
            .ok_or_else(|| format!("board not found: {}", board_id))
    }

    /// Resolve a list by id, or failing that by exact title
    fn list_id(&self, board_id: &str, arg: &str) -> Result<String, String> {
        let board = self.board(board_id)?;
        board
            .find_list(arg)
            .or_else(|| board.lists.iter().find(|l| l.title == arg))
            .map(|l| l.id.clone())
            .ok_or_else(|| format!("list not found: {}", arg))
    }

    /// The list holding a task, and a copy of the task
    fn locate_task(&self, board_id: &str, task_id: &str) -> Result<(String, Task), String> {
        let board = self.board(board_id)?;
        task_ops::locate_task(board, task_id)
            .map(|(list, task)| (list.id.clone(), task.clone()))
            .ok_or_else(|| format!("task not found: {}", task_id))
    }
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> CmdResult {
    let data_dir = config_io::resolve_data_dir(cli.data_dir.as_deref());
    let mut session = Session::open(data_dir, cli.json)?;

    match cli.command {
        Commands::Boards => cmd_boards(&session),
        Commands::Board(cmd) => cmd_board(&mut session, cmd.action),
        Commands::Show(args) => cmd_show(&mut session, args),
        Commands::List(cmd) => cmd_list(&mut session, cmd),
        Commands::Task(cmd) => cmd_task(&mut session, cmd),
        Commands::DarkMode => cmd_dark_mode(&mut session),
        Commands::Export(args) => cmd_export(&session, args),
        Commands::Import(args) => cmd_import(&mut session, args),
    }?;

    session.close()
}

fn print_json<T: serde::Serialize>(value: &T) -> CmdResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_boards(session: &Session) -> CmdResult {
    let doc = session.store.document();
    let open = session.store.view().board_id();
    if session.json {
        print_json(&dashboard_to_json(doc, open))
    } else {
        print!("{}", format_dashboard(doc, open));
        Ok(())
    }
}

fn cmd_show(session: &mut Session, args: ShowArgs) -> CmdResult {
    if args.clear_search {
        session.ui.last_search = None;
    } else if let Some(term) = args.search {
        session.ui.last_search = Some(term).filter(|t| !t.is_empty());
    }

    let board_id = session.board_id(args.board.as_deref())?;
    let board = session.board(&board_id)?;
    let search = session.ui.last_search.as_deref();
    if session.json {
        print_json(&board_to_json(board, search))
    } else {
        print!("{}", format_board(board, search));
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Boards
// ---------------------------------------------------------------------------

fn cmd_board(session: &mut Session, action: BoardAction) -> CmdResult {
    match action {
        BoardAction::New { title } => {
            let id = session
                .store
                .create_board(&title)
                .ok_or("board title cannot be empty")?;
            println!("{}", id);
        }
        BoardAction::Rename { board, title } => {
            let board_id = session.board_id(Some(&board))?;
            if crate::ops::clean_title(&title).is_none() {
                return Err("board title cannot be empty".into());
            }
            session.store.rename_board(&board_id, &title);
        }
        BoardAction::Rm(args) => {
            let board_id = session.board_id(Some(&args.board))?;
            if !args.yes {
                return Err(format!(
                    "refusing to delete board '{}' and all its lists without --yes",
                    args.board
                )
                .into());
            }
            session.store.delete_board(&board_id);
        }
        BoardAction::Open { board } => {
            let board_id = session.board_id(Some(&board))?;
            session.store.select_board(&board_id);
            println!("{}", board_id);
        }
        BoardAction::Close => session.store.clear_selection(),
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Lists
// ---------------------------------------------------------------------------

fn cmd_list(session: &mut Session, cmd: ListCmd) -> CmdResult {
    let board_id = session.board_id(cmd.board.as_deref())?;
    match cmd.action {
        ListAction::Add { title } => {
            let list = List::new(title);
            let id = list.id.clone();
            if !session.store.add_list(&board_id, list) {
                return Err("list title cannot be empty".into());
            }
            println!("{}", id);
        }
        ListAction::Rename { list, title } => {
            let list_id = session.list_id(&board_id, &list)?;
            if crate::ops::clean_title(&title).is_none() {
                return Err("list title cannot be empty".into());
            }
            session.store.rename_list(&board_id, &list_id, &title);
        }
        ListAction::Rm { list, yes } => {
            let list_id = session.list_id(&board_id, &list)?;
            if !yes {
                return Err(format!(
                    "refusing to delete list '{}' and its tasks without --yes",
                    list
                )
                .into());
            }
            session.store.delete_list(&board_id, &list_id);
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tasks
// ---------------------------------------------------------------------------

fn cmd_task(session: &mut Session, cmd: TaskCmd) -> CmdResult {
    let board_id = session.board_id(cmd.board.as_deref())?;
    match cmd.action {
        TaskAction::Add {
            list,
            title,
            description,
        } => {
            let list_id = session.list_id(&board_id, &list)?;
            let task = Task::new(title, description.unwrap_or_default());
            let id = task.id.clone();
            if !session.store.add_task(&board_id, &list_id, task) {
                return Err("task title cannot be empty".into());
            }
            println!("{}", id);
        }
        TaskAction::Edit {
            task,
            title,
            description,
        } => {
            let (list_id, _) = session.locate_task(&board_id, &task)?;
            session.store.edit_task(
                &board_id,
                &list_id,
                &task,
                title.as_deref().unwrap_or(""),
                description.as_deref(),
            );
        }
        TaskAction::Rm { task } => {
            let (list_id, _) = session.locate_task(&board_id, &task)?;
            session.store.delete_task(&board_id, &list_id, &task);
        }
        TaskAction::Mv { task, to } => {
            let (from_id, found) = session.locate_task(&board_id, &task)?;
            let to_id = session.list_id(&board_id, &to)?;
            session.store.move_task(&board_id, &found, &from_id, &to_id);
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Settings, export, import
// ---------------------------------------------------------------------------

fn cmd_dark_mode(session: &mut Session) -> CmdResult {
    session.store.toggle_dark_mode();
    let on = session.store.document().dark_mode;
    println!("dark mode {}", if on { "on" } else { "off" });
    Ok(())
}

fn cmd_export(session: &Session, args: ExportArgs) -> CmdResult {
    let dir = match args.out {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };
    let path = persistence::export_to_file(
        session.store.document(),
        &dir,
        &session.config.export.file_name,
    )?;
    println!("{}", path.display());
    Ok(())
}

fn cmd_import(session: &mut Session, args: ImportArgs) -> CmdResult {
    let mode = if args.replace {
        if !args.yes {
            return Err("this will replace all current data; rerun with --yes to confirm".into());
        }
        ImportMode::Replace
    } else {
        ImportMode::Merge
    };
    let outcome = session.store.import_file(Path::new(&args.file), mode)?;
    if session.json {
        print_json(&import_to_json(&outcome))
    } else {
        println!("{}", format_import(&outcome));
        Ok(())
    }
}
