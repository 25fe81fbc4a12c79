//! Message types for the Elm-style architecture
//!
//! All state changes flow through these message types: user intents from the
//! front end and completions from backend requests.

use crate::model::item::{Field, Item, ItemId};
use crate::persistence::{MutationOutcome, PersistError};

/// User intents against the sheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SheetMsg {
    // === Selection ===
    /// Select a cell (field given) or the whole row
    Select { id: ItemId, field: Option<Field> },
    /// Drop the current selection
    ClearSelection,

    // === Editing ===
    /// Delete key: remove the selected row or blank the selected cell
    DeleteSelection,
    /// Answer to a row delete prompt
    ConfirmDelete(ItemId),
    /// Row delete prompt declined
    CancelDelete,
    /// Row delete button (no prompt, selection untouched)
    DeleteItem(ItemId),
    /// Direct edit of one field
    EditField {
        id: ItemId,
        field: Field,
        value: String,
    },
    /// Add a new row
    Add { name: String, value: String },

    // === History ===
    Undo,
    Redo,

    // === Clipboard ===
    Copy,
    Paste,
}

/// Backend completions, tagged with the ticket of the request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistMsg {
    /// Result of a full list fetch
    Loaded {
        ticket: u64,
        result: Result<Vec<Item>, PersistError>,
    },
    /// Result of a single mutation
    Completed {
        ticket: u64,
        result: Result<MutationOutcome, PersistError>,
    },
}

/// Application-level messages
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppMsg {
    /// Fetch all rows from the backend (drops history)
    Reload,
    /// Exit the application
    Quit,
}

/// Top-level message type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Sheet intents (selection, edits, history, clipboard)
    Sheet(SheetMsg),
    /// Backend completions
    Persist(PersistMsg),
    /// App messages (loading, quit)
    App(AppMsg),
}

// Convenience constructors for common messages
impl Msg {
    pub fn select_row(id: impl Into<ItemId>) -> Self {
        Msg::Sheet(SheetMsg::Select {
            id: id.into(),
            field: None,
        })
    }

    pub fn select_cell(id: impl Into<ItemId>, field: Field) -> Self {
        Msg::Sheet(SheetMsg::Select {
            id: id.into(),
            field: Some(field),
        })
    }

    pub fn edit(id: impl Into<ItemId>, field: Field, value: impl Into<String>) -> Self {
        Msg::Sheet(SheetMsg::EditField {
            id: id.into(),
            field,
            value: value.into(),
        })
    }

    pub fn add(name: impl Into<String>, value: impl Into<String>) -> Self {
        Msg::Sheet(SheetMsg::Add {
            name: name.into(),
            value: value.into(),
        })
    }

    /// True for intents that need the in-flight slot
    pub fn is_mutation(&self) -> bool {
        match self {
            Msg::Sheet(m) => !matches!(
                m,
                SheetMsg::Select { .. }
                    | SheetMsg::ClearSelection
                    | SheetMsg::Copy
                    | SheetMsg::CancelDelete
            ),
            Msg::App(AppMsg::Reload) => true,
            _ => false,
        }
    }
}
