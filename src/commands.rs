//! Command types for the Elm-style architecture
//!
//! Commands represent side effects that should be performed after an update.
//! The runtime executes them and feeds results back as messages.

use crate::model::item::ItemId;
use crate::persistence::MutationRequest;

/// Side effects requested by `update`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Cmd {
    /// No command - do nothing
    #[default]
    None,
    /// Model changed, front end should re-render
    Redraw,
    /// Fetch all rows; answers with `PersistMsg::Loaded`
    LoadItems { ticket: u64 },
    /// Send one mutation to the backend; answers with `PersistMsg::Completed`
    Persist {
        ticket: u64,
        request: MutationRequest,
    },
    /// Ask the user before deleting a row; answers with
    /// `SheetMsg::ConfirmDelete` or `SheetMsg::CancelDelete`
    ConfirmDelete { id: ItemId, prompt: String },
    /// Mirror a copy to the OS clipboard
    WriteSystemClipboard { text: String },
    /// Execute multiple commands
    Batch(Vec<Cmd>),
    /// Request application exit
    Quit,
}

impl Cmd {
    /// Create a batch of commands
    pub fn batch(cmds: Vec<Cmd>) -> Self {
        Cmd::Batch(cmds)
    }

    /// Check if this command requires a redraw
    pub fn needs_redraw(&self) -> bool {
        match self {
            Cmd::None => false,
            Cmd::Redraw => true,
            // In-flight state shows in the status line
            Cmd::LoadItems { .. } => true,
            Cmd::Persist { .. } => true,
            // The prompt answer triggers its own redraw
            Cmd::ConfirmDelete { .. } => false,
            Cmd::WriteSystemClipboard { .. } => false,
            Cmd::Batch(cmds) => cmds.iter().any(|c| c.needs_redraw()),
            Cmd::Quit => false,
        }
    }

    /// The backend request carried by this command (first one in a batch)
    pub fn persist_request(&self) -> Option<(u64, &MutationRequest)> {
        match self {
            Cmd::Persist { ticket, request } => Some((*ticket, request)),
            Cmd::Batch(cmds) => cmds.iter().find_map(|c| c.persist_request()),
            _ => None,
        }
    }
}

// Allow converting Option<Cmd> to Cmd
impl From<Option<Cmd>> for Cmd {
    fn from(opt: Option<Cmd>) -> Self {
        opt.unwrap_or(Cmd::None)
    }
}
