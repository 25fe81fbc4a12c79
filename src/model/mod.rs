//! Application model - the complete state of the sheet
//!
//! This module contains all the state types following the Elm Architecture pattern.
//! Nothing outside `update` mutates it.

pub mod clipboard;
pub mod item;
pub mod selection;
pub mod store;
pub mod ui;

pub use clipboard::{ClipPayload, Clipboard};
pub use item::{Field, Item, ItemId};
pub use selection::{Selection, SelectionTracker};
pub use store::ItemStore;
pub use ui::UiState;

use crate::config::SheetConfig;
use crate::history::{EditCommand, EditHistory, Transfer};

/// What an in-flight backend request will do once it succeeds
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingOp {
    /// Initial fetch or reload
    Load,
    /// Fresh row creation
    Add,
    /// Fresh field change
    Update { before: Item, clear_selection: bool },
    /// Fresh row removal
    Delete {
        item: Item,
        position: usize,
        clear_selection: bool,
    },
    /// Undo or redo of a recorded command
    Replay {
        transfer: Transfer,
        command: EditCommand,
    },
}

/// The single backend request allowed at a time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InFlight {
    pub ticket: u64,
    pub op: PendingOp,
}

/// The complete application model
#[derive(Debug, Default)]
pub struct SheetModel {
    /// Local mirror of the backend rows
    pub store: ItemStore,
    pub selection: SelectionTracker,
    pub clipboard: Clipboard,
    pub history: EditHistory,
    /// Request awaiting a backend answer
    pub in_flight: Option<InFlight>,
    pub ui: UiState,
    pub config: SheetConfig,
    next_ticket: u64,
}

impl SheetModel {
    pub fn new(config: SheetConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Model pre-populated with rows (tests, offline start)
    pub fn with_items(items: Vec<Item>, config: SheetConfig) -> Self {
        Self {
            store: ItemStore::from_items(items),
            config,
            ..Self::default()
        }
    }

    /// True while a backend request is unresolved
    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Claim the in-flight slot and return the ticket for the request
    pub fn begin(&mut self, op: PendingOp) -> u64 {
        debug_assert!(self.in_flight.is_none(), "request already in flight");
        self.next_ticket += 1;
        let ticket = self.next_ticket;
        self.in_flight = Some(InFlight { ticket, op });
        ticket
    }

    /// Release the in-flight slot if `ticket` matches it
    pub fn finish(&mut self, ticket: u64) -> Option<InFlight> {
        match &self.in_flight {
            Some(in_flight) if in_flight.ticket == ticket => self.in_flight.take(),
            _ => None,
        }
    }

    /// Check model invariants (debug builds)
    #[cfg(debug_assertions)]
    pub fn assert_invariants(&self, context: &str) {
        debug_assert!(
            !self.store.has_duplicate_ids(),
            "[{}] duplicate row ids in store",
            context
        );
        let replay_in_flight = matches!(
            self.in_flight,
            Some(InFlight {
                op: PendingOp::Replay { .. },
                ..
            })
        );
        debug_assert_eq!(
            replay_in_flight,
            self.history.pending().is_some(),
            "[{}] history transfer and in-flight replay out of sync",
            context
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticket_must_match() {
        let mut model = SheetModel::default();
        let ticket = model.begin(PendingOp::Add);
        assert!(model.is_busy());

        assert!(model.finish(ticket + 1).is_none());
        assert!(model.is_busy());

        let in_flight = model.finish(ticket).unwrap();
        assert_eq!(in_flight.op, PendingOp::Add);
        assert!(!model.is_busy());
    }

    #[test]
    fn test_tickets_increase() {
        let mut model = SheetModel::default();
        let first = model.begin(PendingOp::Load);
        model.finish(first);
        let second = model.begin(PendingOp::Load);
        assert!(second > first);
    }
}
