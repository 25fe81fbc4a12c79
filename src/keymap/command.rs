//! Command enum representing every key-bindable sheet action
//!
//! Commands are the bridge between keybindings and the message system.
//! Each command maps to one or more `Msg` values for the Elm-style update loop.

use std::fmt;
use std::str::FromStr;

use crate::messages::{AppMsg, Msg, SheetMsg};

/// Sheet actions that can be bound to keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Remove the selected row or blank the selected cell
    DeleteSelection,
    Undo,
    Redo,
    Copy,
    Paste,
    ClearSelection,
    /// Re-fetch all rows from the backend
    Reload,
    Quit,
    /// Removes a default binding when used in a user keymap
    Unbound,
}

impl Command {
    /// Convert command to the messages it triggers
    pub fn to_msgs(self) -> Vec<Msg> {
        use Command::*;

        match self {
            DeleteSelection => vec![Msg::Sheet(SheetMsg::DeleteSelection)],
            Undo => vec![Msg::Sheet(SheetMsg::Undo)],
            Redo => vec![Msg::Sheet(SheetMsg::Redo)],
            Copy => vec![Msg::Sheet(SheetMsg::Copy)],
            Paste => vec![Msg::Sheet(SheetMsg::Paste)],
            ClearSelection => vec![Msg::Sheet(SheetMsg::ClearSelection)],
            Reload => vec![Msg::App(AppMsg::Reload)],
            Quit => vec![Msg::App(AppMsg::Quit)],
            Unbound => vec![],
        }
    }

    /// Human-readable name for help output
    pub fn display_name(self) -> &'static str {
        match self {
            Command::DeleteSelection => "Delete Selection",
            Command::Undo => "Undo",
            Command::Redo => "Redo",
            Command::Copy => "Copy",
            Command::Paste => "Paste",
            Command::ClearSelection => "Clear Selection",
            Command::Reload => "Reload",
            Command::Quit => "Quit",
            Command::Unbound => "Unbound",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Parse the command names used in keymap YAML
impl FromStr for Command {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DeleteSelection" => Ok(Command::DeleteSelection),
            "Undo" => Ok(Command::Undo),
            "Redo" => Ok(Command::Redo),
            "Copy" => Ok(Command::Copy),
            "Paste" => Ok(Command::Paste),
            "ClearSelection" => Ok(Command::ClearSelection),
            "Reload" => Ok(Command::Reload),
            "Quit" => Ok(Command::Quit),
            "Unbound" => Ok(Command::Unbound),
            _ => Err(()),
        }
    }
}
