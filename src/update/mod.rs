//! Update functions for the Elm-style architecture
//!
//! All state transformations flow through these functions.

mod app;
mod persist;
mod sheet;

use crate::commands::Cmd;
use crate::error::SheetError;
use crate::messages::{Msg, SheetMsg};
use crate::model::SheetModel;

#[cfg(debug_assertions)]
use crate::tracing::StateSnapshot;
#[cfg(debug_assertions)]
use tracing::{debug, span, Level};

pub use app::update_app;
pub use persist::update_persist;
pub use sheet::update_sheet;

/// Main update function - dispatches to sub-handlers
///
/// In debug builds, this wraps with tracing instrumentation.
/// In release builds, it's a direct dispatch with zero overhead.
#[inline]
pub fn update(model: &mut SheetModel, msg: Msg) -> Option<Cmd> {
    #[cfg(debug_assertions)]
    {
        update_traced(model, msg)
    }
    #[cfg(not(debug_assertions))]
    {
        update_inner(model, msg)
    }
}

/// Inner update logic (no tracing)
fn update_inner(model: &mut SheetModel, msg: Msg) -> Option<Cmd> {
    // One backend request at a time: anything that would issue a second one
    // is turned away until the first resolves
    if msg.is_mutation() && model.is_busy() {
        if matches!(msg, Msg::Sheet(SheetMsg::ConfirmDelete(_))) {
            model.ui.pending_delete = None;
        }
        model.ui.report(SheetError::Busy);
        return Some(Cmd::Redraw);
    }

    match msg {
        Msg::Sheet(m) => sheet::update_sheet(model, m),
        Msg::Persist(m) => persist::update_persist(model, m),
        Msg::App(m) => app::update_app(model, m),
    }
}

/// Traced update wrapper (debug builds only)
///
/// Captures before/after sheet state and logs diffs for debugging.
#[cfg(debug_assertions)]
fn update_traced(model: &mut SheetModel, msg: Msg) -> Option<Cmd> {
    let msg_name = msg_type_name(&msg);
    let _span = span!(Level::DEBUG, "update", msg = %msg_name).entered();

    let before = StateSnapshot::from_model(model);
    debug!(target: "message", msg = %msg_name, "processing");

    let result = update_inner(model, msg);

    let after = StateSnapshot::from_model(model);
    if let Some(diff) = before.diff(&after) {
        debug!(target: "history", %diff, "state changed");
    }

    model.assert_invariants(&msg_name);

    result
}

/// Get a display name for a message type
///
/// Example outputs:
/// - `Sheet::Undo`
/// - `Persist::Completed { ticket: 3, .. }`
#[cfg(debug_assertions)]
fn msg_type_name(msg: &Msg) -> String {
    use crate::messages::PersistMsg;

    match msg {
        Msg::Sheet(m) => format!("Sheet::{:?}", m),
        Msg::Persist(PersistMsg::Loaded { ticket, result }) => format!(
            "Persist::Loaded {{ ticket: {}, ok: {} }}",
            ticket,
            result.is_ok()
        ),
        Msg::Persist(PersistMsg::Completed { ticket, result }) => format!(
            "Persist::Completed {{ ticket: {}, ok: {} }}",
            ticket,
            result.is_ok()
        ),
        Msg::App(m) => format!("App::{:?}", m),
    }
}
