//! Line-oriented terminal front end
//!
//! Parses one input line into an `Input`, applies it to the runtime and
//! renders the sheet as plain text.

use std::fmt::Write as _;

use thiserror::Error;

use crate::history::EditCommand;
use crate::keymap::{parse_key_sequence, KeymapError, Keystroke};
use crate::model::{Field, Item, ItemId, Selection, SheetModel};
use crate::runtime::Runtime;

pub const HELP: &str = "\
Commands:
  list                          show all rows
  select <id> [name|value]      select a row, or one of its cells
  clear                         drop the selection
  add <name> <value>            add a row
  edit <id> <name|value> <text> change one field
  delete                        delete the selected row, or blank the selected cell
  delete <id>                   delete a row without asking
  undo | redo                   step through the edit history
  copy | paste                  copy the selection, paste onto the selection
  key <keys>                    press keys, e.g. `key ctrl+z` or `key delete`
  history                       show the undo and redo stacks
  reload                        fetch all rows again (drops history)
  help                          show this help
  quit                          exit";

/// One parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Empty,
    List,
    Select { id: ItemId, field: Option<Field> },
    Clear,
    Add { name: String, value: String },
    Edit { id: ItemId, field: Field, text: String },
    Delete,
    DeleteItem(ItemId),
    Undo,
    Redo,
    Copy,
    Paste,
    Key(Vec<Keystroke>),
    History,
    Reload,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReplError {
    #[error("Unknown command `{0}` (try `help`)")]
    UnknownCommand(String),
    #[error("Usage: {0}")]
    Usage(&'static str),
    #[error("Unknown field `{0}`, expected name or value")]
    InvalidField(String),
    #[error("Unterminated quote")]
    UnterminatedQuote,
    #[error(transparent)]
    Key(#[from] KeymapError),
}

/// Split a line into words; double quotes group words and may be empty
fn split_args(line: &str) -> Result<Vec<String>, ReplError> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut in_quotes = false;

    for c in line.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                in_word = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if in_word {
                    args.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            c => {
                current.push(c);
                in_word = true;
            }
        }
    }

    if in_quotes {
        return Err(ReplError::UnterminatedQuote);
    }
    if in_word {
        args.push(current);
    }
    Ok(args)
}

fn parse_field(word: &str) -> Result<Field, ReplError> {
    word.parse()
        .map_err(|_| ReplError::InvalidField(word.to_string()))
}

/// Parse one input line
pub fn parse_line(line: &str) -> Result<Input, ReplError> {
    let args = split_args(line)?;
    let Some((command, rest)) = args.split_first() else {
        return Ok(Input::Empty);
    };

    let input = match (command.to_lowercase().as_str(), rest) {
        ("list" | "ls", []) => Input::List,
        ("select" | "sel", [id]) => Input::Select {
            id: ItemId::new(id.as_str()),
            field: None,
        },
        ("select" | "sel", [id, field]) => Input::Select {
            id: ItemId::new(id.as_str()),
            field: Some(parse_field(field)?),
        },
        ("select" | "sel", _) => return Err(ReplError::Usage("select <id> [name|value]")),
        ("clear", []) => Input::Clear,
        ("add", [name, value @ ..]) => Input::Add {
            name: name.clone(),
            value: value.join(" "),
        },
        ("add", _) => return Err(ReplError::Usage("add <name> <value>")),
        ("edit", [id, field, text @ ..]) => Input::Edit {
            id: ItemId::new(id.as_str()),
            field: parse_field(field)?,
            text: text.join(" "),
        },
        ("edit", _) => return Err(ReplError::Usage("edit <id> <name|value> <text>")),
        ("delete" | "del", []) => Input::Delete,
        ("delete" | "del", [id]) => Input::DeleteItem(ItemId::new(id.as_str())),
        ("delete" | "del", _) => return Err(ReplError::Usage("delete [id]")),
        ("undo", []) => Input::Undo,
        ("redo", []) => Input::Redo,
        ("copy", []) => Input::Copy,
        ("paste", []) => Input::Paste,
        ("key", keys) if !keys.is_empty() => Input::Key(parse_key_sequence(&keys.join(" "))?),
        ("key", _) => return Err(ReplError::Usage("key <keys>")),
        ("history", []) => Input::History,
        ("reload", []) => Input::Reload,
        ("help" | "?", _) => Input::Help,
        ("quit" | "exit" | "q", _) => Input::Quit,
        (other, _) => return Err(ReplError::UnknownCommand(other.to_string())),
    };
    Ok(input)
}

/// What the front end should do after applying an input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Redraw the table
    Refresh,
    /// Print text instead of the table
    Print(String),
    Quit,
}

/// Apply a parsed input to the runtime
pub fn apply(runtime: &mut Runtime, input: Input) -> Outcome {
    match input {
        Input::Empty => return Outcome::Print(String::new()),
        Input::List => {}
        Input::Select { id, field } => {
            runtime.on_select(id, field);
        }
        Input::Clear => {
            runtime.on_clear_selection();
        }
        Input::Add { name, value } => {
            runtime.on_add_intent(name, value);
        }
        Input::Edit { id, field, text } => {
            runtime.on_field_edit(id, field, text);
        }
        Input::Delete => {
            runtime.on_delete_intent();
        }
        Input::DeleteItem(id) => {
            runtime.on_delete_item(id);
        }
        Input::Undo => {
            runtime.on_undo_intent();
        }
        Input::Redo => {
            runtime.on_redo_intent();
        }
        Input::Copy => {
            runtime.on_copy_intent();
        }
        Input::Paste => {
            runtime.on_paste_intent();
        }
        Input::Key(keystrokes) => {
            for keystroke in keystrokes {
                runtime.handle_key(keystroke);
            }
        }
        Input::History => return Outcome::Print(render_history(runtime.model())),
        Input::Reload => {
            runtime.on_reload();
        }
        Input::Help => return Outcome::Print(HELP.to_string()),
        Input::Quit => return Outcome::Quit,
    }

    if runtime.quit_requested() {
        Outcome::Quit
    } else {
        Outcome::Refresh
    }
}

/// Render all rows with the selection marked
///
/// A selected row is prefixed with `>`, a selected cell is wrapped in `[ ]`.
pub fn render_table(model: &SheetModel) -> String {
    let selection = model.selection.current();
    let cell = |item: &Item, field: Field| -> String {
        let text = item.get(field);
        match selection {
            Selection::Cell { id, field: f } if *id == item.id && *f == field => {
                format!("[{}]", text)
            }
            _ => text.to_string(),
        }
    };

    let rows: Vec<(bool, String, String, String)> = model
        .store
        .iter()
        .map(|item| {
            let row_selected = matches!(selection, Selection::Row { id } if *id == item.id);
            (
                row_selected,
                item.id.to_string(),
                cell(item, Field::Name),
                cell(item, Field::Value),
            )
        })
        .collect();

    let id_width = rows.iter().map(|r| r.1.chars().count()).max().unwrap_or(0).max(2);
    let name_width = rows.iter().map(|r| r.2.chars().count()).max().unwrap_or(0).max(4);

    let mut out = String::new();
    let _ = writeln!(
        out,
        "  {:<id_width$}  {:<name_width$}  value",
        "id", "name"
    );
    for (selected, id, name, value) in &rows {
        let marker = if *selected { '>' } else { ' ' };
        let _ = writeln!(
            out,
            "{} {:<id_width$}  {:<name_width$}  {}",
            marker, id, name, value
        );
    }
    if rows.is_empty() {
        out.push_str("  (no rows)\n");
    }
    out
}

/// One-line status: last message, selection and history depth
pub fn render_status(model: &SheetModel) -> String {
    let mut status = format!(
        "[{}] undo {} / redo {}",
        model.selection.current().describe(),
        model.history.undo_count(),
        model.history.redo_count()
    );
    if let Some(payload) = model.clipboard.payload() {
        let _ = write!(status, " | clipboard: {}", payload.shape());
    }
    if model.is_busy() {
        status.push_str(" | working...");
    }
    if !model.ui.status_message.is_empty() {
        let _ = write!(status, " | {}", model.ui.status_message);
    }
    status
}

fn describe_command(command: &EditCommand) -> String {
    match command {
        EditCommand::Added { item } => {
            format!("add {} ({} = {})", item.id, item.name, item.value)
        }
        EditCommand::Updated { before, after } => format!(
            "edit {} ({} = {} -> {} = {})",
            after.id, before.name, before.value, after.name, after.value
        ),
        EditCommand::Deleted { item, position } => format!(
            "delete {} ({} = {}, row {})",
            item.id,
            item.name,
            item.value,
            position + 1
        ),
    }
}

/// Both history stacks, newest first
pub fn render_history(model: &SheetModel) -> String {
    let mut out = String::new();
    for (title, stack) in [
        ("Undo", model.history.undo_stack()),
        ("Redo", model.history.redo_stack()),
    ] {
        let _ = writeln!(out, "{} ({}):", title, stack.len());
        for command in stack.iter().rev() {
            let _ = writeln!(out, "  {}", describe_command(command));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SheetConfig;
    use crate::keymap::KeyCode;

    #[test]
    fn test_parse_basic_commands() {
        assert_eq!(parse_line("   ").unwrap(), Input::Empty);
        assert_eq!(parse_line("undo").unwrap(), Input::Undo);
        assert_eq!(
            parse_line("select 3 value").unwrap(),
            Input::Select {
                id: ItemId::from(3),
                field: Some(Field::Value)
            }
        );
        assert_eq!(
            parse_line("SEL 3").unwrap(),
            Input::Select {
                id: ItemId::from(3),
                field: None
            }
        );
        assert_eq!(parse_line("delete").unwrap(), Input::Delete);
        assert_eq!(
            parse_line("del 4").unwrap(),
            Input::DeleteItem(ItemId::from(4))
        );
    }

    #[test]
    fn test_parse_rest_of_line_and_quotes() {
        assert_eq!(
            parse_line("add \"Full Name\" some longer value").unwrap(),
            Input::Add {
                name: "Full Name".into(),
                value: "some longer value".into()
            }
        );
        assert_eq!(
            parse_line("edit 1 name \"\"").unwrap(),
            Input::Edit {
                id: ItemId::from(1),
                field: Field::Name,
                text: String::new()
            }
        );
        assert_eq!(parse_line("add \"open"), Err(ReplError::UnterminatedQuote));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            parse_line("frobnicate"),
            Err(ReplError::UnknownCommand("frobnicate".into()))
        );
        assert_eq!(
            parse_line("select 1 color"),
            Err(ReplError::InvalidField("color".into()))
        );
        assert!(matches!(parse_line("edit 1"), Err(ReplError::Usage(_))));
        assert!(matches!(parse_line("key ctrl+nope"), Err(ReplError::Key(_))));
    }

    #[test]
    fn test_parse_keys() {
        let Input::Key(keys) = parse_line("key ctrl+k ctrl+r").unwrap() else {
            panic!("expected key input");
        };
        assert_eq!(keys.len(), 2);
        assert_eq!(
            parse_line("key delete").unwrap(),
            Input::Key(vec![Keystroke::key(KeyCode::Delete)])
        );
    }

    #[test]
    fn test_render_marks_selection() {
        let mut model = SheetModel::with_items(
            vec![Item::new(1, "A", "10"), Item::new(2, "B", "20")],
            SheetConfig::default(),
        );
        model.selection.select(ItemId::from(2), Some(Field::Value));
        let table = render_table(&model);
        assert!(table.contains("[20]"));
        assert!(!table.contains('>'));

        model.selection.select(ItemId::from(1), None);
        let table = render_table(&model);
        assert!(table.lines().any(|l| l.starts_with("> 1")));
    }

    #[test]
    fn test_render_history_newest_first() {
        let mut model = SheetModel::default();
        model.history.record(EditCommand::Added {
            item: Item::new(1, "A", "10"),
        });
        model.history.record(EditCommand::Updated {
            before: Item::new(1, "A", "10"),
            after: Item::new(1, "A", "11"),
        });
        let text = render_history(&model);
        let edit = text.find("edit 1").unwrap();
        let add = text.find("add 1").unwrap();
        assert!(edit < add);
        assert!(text.contains("Redo (0):"));
    }
}
