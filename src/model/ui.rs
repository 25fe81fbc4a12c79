//! UI state - status line, reported conditions, pending prompts

use super::item::ItemId;
use crate::error::SheetError;

/// UI state shared with whatever front end renders the sheet
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Message displayed in the status line
    pub status_message: String,
    /// Most recent condition reported by an action
    pub last_error: Option<SheetError>,
    /// Row waiting for a delete confirmation
    pub pending_delete: Option<ItemId>,
    /// Whether the initial list is being fetched
    pub is_loading: bool,
}

impl UiState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the status message and forget the previous condition
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
        self.last_error = None;
    }

    /// Report a condition
    ///
    /// Silent conditions (stale or missing selection) are kept for the caller
    /// but leave the status line alone.
    pub fn report(&mut self, error: SheetError) {
        if error.is_silent() {
            tracing::debug!(%error, "ignored action");
        } else {
            tracing::warn!(%error, "action rejected");
            self.status_message = error.to_string();
        }
        self.last_error = Some(error);
    }
}
