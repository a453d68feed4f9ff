//! Command-line front end.
//!
//! One-shot subcommands map to a single action each. `shell` reads actions
//! line by line until end of input. Both trim task text and ignore adds or
//! edits whose text is empty; the reducer itself accepts any string.

use crate::app::TodoApp;
use crate::error::{Result, TodoError};
use crate::filter::TodoView;
use crate::hook::TransitionHook;
use crate::types::{FilterMode, TaskId, TodoAction};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use taskflow_core::storage::KeyValueStore;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

/// Help text printed by the shell's `help` command
pub const SHELL_HELP: &str = "\
Commands:
  add <text>          add a task
  toggle <id>         flip a task between active and completed
  edit <id> <text>    replace the text of a task
  delete <id>         remove a task
  clear-completed     remove every completed task
  check-all           complete everything (or reopen everything)
  filter <mode>       show all, active or completed tasks
  list                show the list
  dispatch <json>     send a raw action, e.g. {\"type\":\"CHECK_ALL\"}
  help                show this help
  quit                leave the shell";

/// Manage a persistent todo list
#[derive(Parser, Debug)]
#[command(name = "todo", author, version, about, long_about = None)]
pub struct Cli {
    /// Directory holding the list (overrides `TODO_DATA_DIR`)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Print the resulting view as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// What to do; lists the tasks when omitted
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Subcommands of the `todo` binary
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Add a task
    Add {
        /// Task text; several words are joined with spaces
        #[arg(required = true)]
        text: Vec<String>,
    },

    /// Flip a task between active and completed
    Toggle {
        /// Task id as shown by `list`
        id: TaskId,
    },

    /// Remove a task
    Delete {
        /// Task id as shown by `list`
        id: TaskId,
    },

    /// Replace the text of a task
    Edit {
        /// Task id as shown by `list`
        id: TaskId,
        /// New text
        #[arg(required = true)]
        text: Vec<String>,
    },

    /// Remove every completed task
    ClearCompleted,

    /// Complete every task, or reopen all of them if all are completed
    CheckAll,

    /// Show the list
    List {
        /// Only show `all`, `active` or `completed` tasks
        #[arg(short, long)]
        filter: Option<FilterMode>,
    },

    /// Read commands interactively from standard input
    Shell,
}

impl Command {
    /// The action this command dispatches, if any.
    ///
    /// `None` for `shell`, for a plain `list`, and for add or edit commands
    /// whose text is blank.
    #[must_use]
    pub fn to_action(&self) -> Option<TodoAction> {
        match self {
            Self::Add { text } => non_blank(&text.join(" ")).map(TodoAction::AddTodo),
            Self::Toggle { id } => Some(TodoAction::ToggleTodo(*id)),
            Self::Delete { id } => Some(TodoAction::DeleteTodo(*id)),
            Self::Edit { id, text } => {
                non_blank(&text.join(" ")).map(|text| TodoAction::EditTodo { id: *id, text })
            },
            Self::ClearCompleted => Some(TodoAction::ClearComplete),
            Self::CheckAll => Some(TodoAction::CheckAll),
            Self::List { filter } => filter.map(TodoAction::SetFilter),
            Self::Shell => None,
        }
    }
}

/// One parsed shell line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellInput {
    /// Dispatch this action
    Action(TodoAction),
    /// Print the current view
    List,
    /// Print the command summary
    Help,
    /// Leave the shell
    Quit,
    /// Nothing to do (blank line, or add/edit with blank text)
    Empty,
}

/// Parses one line typed into the shell.
///
/// # Errors
///
/// Returns [`TodoError::InvalidCommand`] for unknown commands or bad
/// arguments, and [`TodoError::Serialization`] for `dispatch` with invalid JSON.
pub fn parse_line(line: &str) -> Result<ShellInput> {
    let line = line.trim();
    let (command, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(command, rest)| (command, rest.trim()));

    let input = match command.to_ascii_lowercase().as_str() {
        "" => ShellInput::Empty,
        "add" => non_blank(rest).map_or(ShellInput::Empty, |text| {
            ShellInput::Action(TodoAction::AddTodo(text))
        }),
        "toggle" => ShellInput::Action(TodoAction::ToggleTodo(parse_id(rest)?)),
        "delete" | "rm" => ShellInput::Action(TodoAction::DeleteTodo(parse_id(rest)?)),
        "edit" => {
            let (id, text) = rest
                .split_once(char::is_whitespace)
                .unwrap_or((rest, ""));
            let id = parse_id(id)?;
            non_blank(text).map_or(ShellInput::Empty, |text| {
                ShellInput::Action(TodoAction::EditTodo { id, text })
            })
        },
        "clear-completed" | "clear" => ShellInput::Action(TodoAction::ClearComplete),
        "check-all" => ShellInput::Action(TodoAction::CheckAll),
        "filter" => {
            let mode = rest
                .parse::<FilterMode>()
                .map_err(|error| TodoError::InvalidCommand(error.to_string()))?;
            ShellInput::Action(TodoAction::SetFilter(mode))
        },
        "dispatch" => ShellInput::Action(serde_json::from_str(rest)?),
        "list" | "ls" => ShellInput::List,
        "help" | "?" => ShellInput::Help,
        "quit" | "exit" => ShellInput::Quit,
        other => {
            return Err(TodoError::InvalidCommand(format!(
                "unknown command `{other}` (try `help`)"
            )));
        },
    };

    Ok(input)
}

fn parse_id(raw: &str) -> Result<TaskId> {
    raw.parse()
        .map_err(|_| TodoError::InvalidCommand(format!("expected a task id, got `{raw}`")))
}

fn non_blank(text: &str) -> Option<String> {
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

/// Renders a view as plain text, one task per line plus a footer.
#[must_use]
pub fn render(view: &TodoView) -> String {
    let mut out = String::new();

    if view.is_empty() {
        out.push_str("Nothing to do.\n");
    } else if view.visible.is_empty() {
        out.push_str(&format!("No {} tasks.\n", view.filter.as_str().to_lowercase()));
    }

    for todo in &view.visible {
        let mark = if todo.completed { 'x' } else { ' ' };
        out.push_str(&format!("[{mark}] {:>13}  {}\n", todo.id, todo.text));
    }

    let noun = if view.items_left == 1 { "item" } else { "items" };
    out.push_str(&format!(
        "{} {noun} left | filter: {}",
        view.items_left, view.filter
    ));
    if view.has_completed {
        out.push_str(&format!(" | {} completed (clear-completed)", view.completed()));
    }

    out
}

/// Writes `view` to `out` as text or JSON
///
/// # Errors
///
/// Returns [`TodoError::Io`] or [`TodoError::Serialization`] if writing fails.
pub fn print_view(out: &mut impl Write, view: &TodoView, json: bool) -> Result<()> {
    if json {
        serde_json::to_writer_pretty(&mut *out, view)?;
        writeln!(out)?;
    } else {
        writeln!(out, "{}", render(view))?;
    }
    Ok(())
}

/// Runs the interactive shell until `quit` or end of input.
///
/// Parse errors and storage failures are reported on `out` and the shell
/// keeps going.
///
/// # Errors
///
/// Returns an error if reading `input` or writing `out` fails, or if the
/// app has been shut down.
pub async fn run_shell<K, H, R, W>(
    app: &mut TodoApp<K, H>,
    input: R,
    out: &mut W,
    json: bool,
) -> Result<()>
where
    K: KeyValueStore,
    H: TransitionHook,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    print_view(out, &app.view().await, json)?;

    let mut lines = input.lines();
    loop {
        write!(out, "> ")?;
        out.flush()?;

        let Some(line) = lines.next_line().await? else {
            writeln!(out)?;
            break;
        };

        match parse_line(&line) {
            Ok(ShellInput::Quit) => break,
            Ok(ShellInput::Empty) => {},
            Ok(ShellInput::Help) => writeln!(out, "{SHELL_HELP}")?,
            Ok(ShellInput::List) => print_view(out, &app.view().await, json)?,
            Ok(ShellInput::Action(action)) => match app.dispatch(action).await {
                Ok(view) => print_view(out, &view, json)?,
                Err(error @ TodoError::Store(_)) => return Err(error),
                Err(error) => writeln!(out, "error: {error}")?,
            },
            Err(error) => writeln!(out, "{error}")?,
        }
    }

    tracing::debug!("Shell finished");
    Ok(())
}
