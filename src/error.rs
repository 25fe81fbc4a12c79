//! Conditions reported by the sheet core
//!
//! None of these is fatal. Every failure leaves the model as it was and is
//! surfaced through the status line.

use thiserror::Error;

use crate::model::item::ItemId;
use crate::persistence::PersistError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SheetError {
    #[error("Nothing to undo")]
    EmptyHistory,

    #[error("Nothing to redo")]
    EmptyRedoHistory,

    #[error("Row {0} no longer exists")]
    StaleSelection(ItemId),

    #[error("Nothing selected")]
    NoSelection,

    #[error("Clipboard contents do not fit the selection")]
    ClipboardShapeMismatch,

    #[error("Clipboard is empty")]
    EmptyClipboard,

    #[error("Another change is still being saved")]
    Busy,

    #[error("Save failed: {0}")]
    Persistence(#[from] PersistError),
}

impl SheetError {
    /// Silent conditions are logged but not shown to the user
    pub fn is_silent(&self) -> bool {
        matches!(self, SheetError::StaleSelection(_) | SheetError::NoSelection)
    }
}
