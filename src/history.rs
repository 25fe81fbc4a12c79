//! Edit history (undo/redo) for row edits
//!
//! Every confirmed edit is recorded as an `EditCommand`. Undo and redo move
//! commands between the two stacks and hand back the backend request that
//! replays them. The move is provisional until the backend answers:
//! `settle()` keeps it, `rollback()` puts the command back where it was.

use crate::error::SheetError;
use crate::model::item::{Item, ItemId};
use crate::persistence::MutationRequest;

/// One completed, already-applied edit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditCommand {
    /// A row was created
    Added { item: Item },
    /// A row's fields changed
    Updated { before: Item, after: Item },
    /// A row was removed from `position`
    Deleted { item: Item, position: usize },
}

impl EditCommand {
    /// Request that reverts this edit
    pub fn inverse_request(&self) -> MutationRequest {
        match self {
            EditCommand::Added { item } => MutationRequest::Remove {
                id: item.id.clone(),
            },
            EditCommand::Updated { before, .. } => MutationRequest::update_to(before),
            EditCommand::Deleted { item, .. } => MutationRequest::create_from(item),
        }
    }

    /// Request that re-applies this edit
    pub fn forward_request(&self) -> MutationRequest {
        match self {
            EditCommand::Added { item } => MutationRequest::create_from(item),
            EditCommand::Updated { after, .. } => MutationRequest::update_to(after),
            EditCommand::Deleted { item, .. } => MutationRequest::Remove {
                id: item.id.clone(),
            },
        }
    }

    /// Id of the row this command is about
    pub fn subject_id(&self) -> &ItemId {
        match self {
            EditCommand::Added { item } | EditCommand::Deleted { item, .. } => &item.id,
            EditCommand::Updated { after, .. } => &after.id,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EditCommand::Added { .. } => "add",
            EditCommand::Updated { .. } => "edit",
            EditCommand::Deleted { .. } => "delete",
        }
    }

    /// Point this command at a row's new id
    fn remap_id(&mut self, old: &ItemId, new: &ItemId) {
        let items: [Option<&mut Item>; 2] = match self {
            EditCommand::Added { item } | EditCommand::Deleted { item, .. } => [Some(item), None],
            EditCommand::Updated { before, after } => [Some(before), Some(after)],
        };
        for item in items.into_iter().flatten() {
            if &item.id == old {
                item.id = new.clone();
            }
        }
    }
}

/// Direction of a history replay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transfer {
    Undo,
    Redo,
}

impl Transfer {
    pub fn label(self) -> &'static str {
        match self {
            Transfer::Undo => "Undo",
            Transfer::Redo => "Redo",
        }
    }
}

/// A command moved between stacks, with the request that replays it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replay {
    pub transfer: Transfer,
    pub command: EditCommand,
    pub request: MutationRequest,
}

/// Edit history with undo/redo stacks
///
/// Both stacks are unbounded. The only transitions are `record` (push undo,
/// clear redo), `undo` (undo → redo) and `redo` (redo → undo).
#[derive(Debug, Clone, Default)]
pub struct EditHistory {
    undo_stack: Vec<EditCommand>,
    redo_stack: Vec<EditCommand>,
    pending: Option<Transfer>,
}

impl EditHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a freshly confirmed edit (clears redo stack)
    pub fn record(&mut self, command: EditCommand) {
        debug_assert!(
            self.pending.is_none(),
            "recording while a replay is unsettled"
        );
        self.redo_stack.clear();
        self.undo_stack.push(command);
    }

    /// Move the newest command to the redo stack and return its inverse
    pub fn undo(&mut self) -> Result<Replay, SheetError> {
        if self.pending.is_some() {
            return Err(SheetError::Busy);
        }
        let command = self.undo_stack.pop().ok_or(SheetError::EmptyHistory)?;
        let request = command.inverse_request();
        self.redo_stack.push(command.clone());
        self.pending = Some(Transfer::Undo);
        Ok(Replay {
            transfer: Transfer::Undo,
            command,
            request,
        })
    }

    /// Move the newest undone command back and return its forward request
    pub fn redo(&mut self) -> Result<Replay, SheetError> {
        if self.pending.is_some() {
            return Err(SheetError::Busy);
        }
        let command = self.redo_stack.pop().ok_or(SheetError::EmptyRedoHistory)?;
        let request = command.forward_request();
        self.undo_stack.push(command.clone());
        self.pending = Some(Transfer::Redo);
        Ok(Replay {
            transfer: Transfer::Redo,
            command,
            request,
        })
    }

    /// The replay in flight, if any
    pub fn pending(&self) -> Option<Transfer> {
        self.pending
    }

    /// Keep the last transfer
    pub fn settle(&mut self) {
        self.pending = None;
    }

    /// Undo the last transfer after its request failed
    pub fn rollback(&mut self) {
        match self.pending.take() {
            Some(Transfer::Undo) => {
                if let Some(command) = self.redo_stack.pop() {
                    self.undo_stack.push(command);
                }
            }
            Some(Transfer::Redo) => {
                if let Some(command) = self.undo_stack.pop() {
                    self.redo_stack.push(command);
                }
            }
            None => {}
        }
    }

    /// Rewrite references to a row that came back under a new id
    pub fn remap_id(&mut self, old: &ItemId, new: &ItemId) {
        for command in self.undo_stack.iter_mut().chain(self.redo_stack.iter_mut()) {
            command.remap_id(old, new);
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.pending = None;
    }

    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }

    /// Oldest first
    pub fn undo_stack(&self) -> &[EditCommand] {
        &self.undo_stack
    }

    /// Oldest first
    pub fn redo_stack(&self) -> &[EditCommand] {
        &self.redo_stack
    }
}
