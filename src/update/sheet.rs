//! Sheet intent handlers (selection, edits, history, clipboard)
//!
//! Handlers never touch the store directly. A mutating intent claims the
//! in-flight slot and returns a `Cmd::Persist`; the store and history change
//! when the completion arrives (see `persist.rs`).

use crate::commands::Cmd;
use crate::error::SheetError;
use crate::history::Transfer;
use crate::messages::SheetMsg;
use crate::model::{Field, Item, ItemId, PendingOp, Selection, SheetModel};
use crate::persistence::MutationRequest;

/// Handle sheet intents
pub fn update_sheet(model: &mut SheetModel, msg: SheetMsg) -> Option<Cmd> {
    match msg {
        SheetMsg::Select { id, field } => {
            model.selection.select(id, field);
            model.ui.last_error = None;
            Some(Cmd::Redraw)
        }

        SheetMsg::ClearSelection => {
            model.selection.clear();
            Some(Cmd::Redraw)
        }

        SheetMsg::DeleteSelection => delete_selection(model),

        SheetMsg::ConfirmDelete(id) => {
            if model.ui.pending_delete.as_ref() != Some(&id) {
                tracing::debug!(%id, "confirmation for a delete that was not requested");
                return None;
            }
            model.ui.pending_delete = None;
            remove_row(model, id, true)
        }

        SheetMsg::CancelDelete => {
            model.ui.pending_delete = None;
            model.ui.set_status("Delete cancelled");
            Some(Cmd::Redraw)
        }

        SheetMsg::DeleteItem(id) => remove_row(model, id, false),

        SheetMsg::EditField { id, field, value } => edit_field(model, id, field, value),

        SheetMsg::Add { name, value } => {
            let ticket = model.begin(PendingOp::Add);
            model.ui.set_status("Adding row...");
            Some(Cmd::Persist {
                ticket,
                request: MutationRequest::Create { name, value },
            })
        }

        SheetMsg::Undo => replay(model, Transfer::Undo),
        SheetMsg::Redo => replay(model, Transfer::Redo),

        SheetMsg::Copy => copy(model),
        SheetMsg::Paste => paste(model),
    }
}

/// Report a rejected intent; the model is otherwise untouched
fn reject(model: &mut SheetModel, error: SheetError) -> Option<Cmd> {
    let silent = error.is_silent();
    model.ui.report(error);
    if silent {
        None
    } else {
        Some(Cmd::Redraw)
    }
}

/// Delete key: a row is removed (after confirmation), a cell is blanked
fn delete_selection(model: &mut SheetModel) -> Option<Cmd> {
    match model.selection.current().clone() {
        Selection::None => reject(model, SheetError::NoSelection),

        Selection::Row { id } => {
            let Some(item) = model.store.get(&id) else {
                return reject(model, SheetError::StaleSelection(id));
            };
            if !model.config.confirm_row_delete {
                return remove_row(model, id, true);
            }
            let prompt = format!(
                "Delete row \"{}\" = \"{}\"?",
                item.name, item.value
            );
            model.ui.pending_delete = Some(id.clone());
            Some(Cmd::ConfirmDelete { id, prompt })
        }

        Selection::Cell { id, field } => {
            let Some(before) = model.store.get(&id).cloned() else {
                return reject(model, SheetError::StaleSelection(id));
            };
            let after = before.with_field(field, "");
            begin_update(model, before, after, true)
        }
    }
}

/// Issue the removal of a row
fn remove_row(model: &mut SheetModel, id: ItemId, clear_selection: bool) -> Option<Cmd> {
    let (Some(position), Some(item)) = (model.store.position(&id), model.store.get(&id).cloned())
    else {
        return reject(model, SheetError::StaleSelection(id));
    };

    let ticket = model.begin(PendingOp::Delete {
        item,
        position,
        clear_selection,
    });
    model.ui.set_status("Deleting row...");
    Some(Cmd::Persist {
        ticket,
        request: MutationRequest::Remove { id },
    })
}

fn edit_field(model: &mut SheetModel, id: ItemId, field: Field, value: String) -> Option<Cmd> {
    let Some(before) = model.store.get(&id).cloned() else {
        return reject(model, SheetError::StaleSelection(id));
    };
    let after = before.with_field(field, value);
    begin_update(model, before, after, false)
}

/// Issue a fresh field update; identical content is a no-op
fn begin_update(
    model: &mut SheetModel,
    before: Item,
    after: Item,
    clear_selection: bool,
) -> Option<Cmd> {
    if before.same_content(&after) {
        tracing::debug!(id = %before.id, "update leaves row unchanged");
        if clear_selection {
            model.selection.clear();
            return Some(Cmd::Redraw);
        }
        return None;
    }

    let request = MutationRequest::update_to(&after);
    let ticket = model.begin(PendingOp::Update {
        before,
        clear_selection,
    });
    model.ui.set_status("Saving...");
    Some(Cmd::Persist { ticket, request })
}

/// Undo or redo: the stack transfer happens now, before the request goes out
fn replay(model: &mut SheetModel, transfer: Transfer) -> Option<Cmd> {
    let result = match transfer {
        Transfer::Undo => model.history.undo(),
        Transfer::Redo => model.history.redo(),
    };
    let replay = match result {
        Ok(replay) => replay,
        Err(error) => return reject(model, error),
    };

    tracing::info!(
        transfer = replay.transfer.label(),
        command = replay.command.label(),
        id = %replay.command.subject_id(),
        "replaying history"
    );
    let ticket = model.begin(PendingOp::Replay {
        transfer: replay.transfer,
        command: replay.command,
    });
    model
        .ui
        .set_status(format!("{}...", replay.transfer.label()));
    Some(Cmd::Persist {
        ticket,
        request: replay.request,
    })
}

fn copy(model: &mut SheetModel) -> Option<Cmd> {
    let selection = model.selection.current().clone();
    let text = match model.clipboard.copy(&selection, &model.store) {
        Ok(payload) => {
            let status = format!("Copied {}", payload.shape());
            let text = payload.as_text();
            model.ui.set_status(status);
            text
        }
        Err(error) => return reject(model, error),
    };

    if model.config.mirror_system_clipboard {
        Some(Cmd::batch(vec![
            Cmd::Redraw,
            Cmd::WriteSystemClipboard { text },
        ]))
    } else {
        Some(Cmd::Redraw)
    }
}

/// Paste is a fresh edit: it goes through the normal update path and is recorded
fn paste(model: &mut SheetModel) -> Option<Cmd> {
    let selection = model.selection.current().clone();
    let after = match model.clipboard.paste(&selection, &model.store) {
        Ok(after) => after,
        Err(error) => return reject(model, error),
    };
    let Some(before) = model.store.get(&after.id).cloned() else {
        return reject(model, SheetError::StaleSelection(after.id));
    };
    begin_update(model, before, after, false)
}
