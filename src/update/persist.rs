//! Backend completion handlers
//!
//! This is the only place the local store and the history change. A
//! completion whose ticket doesn't match the in-flight request is dropped.

use crate::commands::Cmd;
use crate::error::SheetError;
use crate::history::{EditCommand, Transfer};
use crate::messages::PersistMsg;
use crate::model::{Item, PendingOp, SheetModel};
use crate::persistence::{MutationOutcome, PersistError};

/// Handle backend completions
pub fn update_persist(model: &mut SheetModel, msg: PersistMsg) -> Option<Cmd> {
    match msg {
        PersistMsg::Loaded { ticket, result } => {
            let Some(in_flight) = model.finish(ticket) else {
                tracing::debug!(ticket, "dropping stale load result");
                return None;
            };
            if in_flight.op != PendingOp::Load {
                tracing::warn!(ticket, op = ?in_flight.op, "list result for a non-load request");
            }
            model.ui.is_loading = false;

            match result {
                Ok(items) => {
                    let count = items.len();
                    model.store.replace_all(items);
                    model.history.clear();
                    model.selection.clear();
                    tracing::info!(count, "Loaded rows");
                    model.ui.set_status(format!("Loaded {} rows", count));
                }
                Err(e) => {
                    tracing::error!(error = %e, "Failed to load rows");
                    model.ui.report(SheetError::Persistence(e));
                }
            }
            Some(Cmd::Redraw)
        }

        PersistMsg::Completed { ticket, result } => {
            let Some(in_flight) = model.finish(ticket) else {
                tracing::debug!(ticket, "dropping stale completion");
                return None;
            };
            match result {
                Ok(outcome) => apply(model, in_flight.op, outcome),
                Err(e) => fail(model, in_flight.op, e),
            }
            Some(Cmd::Redraw)
        }
    }
}

/// The request failed: nothing changes locally except undoing a provisional
/// history transfer
fn fail(model: &mut SheetModel, op: PendingOp, error: PersistError) {
    if let PendingOp::Replay { transfer, command } = &op {
        model.history.rollback();
        tracing::warn!(
            transfer = transfer.label(),
            command = command.label(),
            error = %error,
            "replay failed, history restored"
        );
    } else {
        tracing::warn!(op = ?op, error = %error, "request failed");
    }
    model.ui.report(SheetError::Persistence(error));
}

fn apply(model: &mut SheetModel, op: PendingOp, outcome: MutationOutcome) {
    match (op, outcome) {
        (PendingOp::Add, MutationOutcome::Created(item)) => {
            model.store.push(item.clone());
            model.ui.set_status(format!("Added row {}", item.id));
            model.history.record(EditCommand::Added { item });
        }

        (
            PendingOp::Update {
                before,
                clear_selection,
            },
            MutationOutcome::Updated(after),
        ) => {
            model.store.replace(after.clone());
            if clear_selection {
                model.selection.clear();
            }
            model.ui.set_status("Saved");
            model.history.record(EditCommand::Updated { before, after });
        }

        (
            PendingOp::Delete {
                item,
                position,
                clear_selection,
            },
            MutationOutcome::Removed(id),
        ) => {
            model.store.remove(&id);
            if clear_selection || model.selection.targets(&id) {
                model.selection.clear();
            }
            model.ui.set_status(format!("Deleted row {}", id));
            model.history.record(EditCommand::Deleted { item, position });
        }

        (PendingOp::Replay { transfer, command }, outcome) => {
            apply_replay(model, transfer, &command, outcome);
            model.history.settle();
            model.ui.set_status(format!("{} {}", transfer.label(), command.label()));
        }

        (op, outcome) => {
            tracing::warn!(?op, ?outcome, "backend answer does not match request");
        }
    }
}

/// Mirror a replayed command's backend result into the store
fn apply_replay(
    model: &mut SheetModel,
    transfer: Transfer,
    command: &EditCommand,
    outcome: MutationOutcome,
) {
    match outcome {
        MutationOutcome::Created(item) => {
            // Undoing a delete goes back where the row was; redoing an add appends
            match (transfer, command) {
                (Transfer::Undo, EditCommand::Deleted { position, .. }) => {
                    model.store.insert_at(*position, item.clone());
                }
                _ => model.store.push(item.clone()),
            }
            reassign_id(model, command, &item);
        }
        MutationOutcome::Updated(item) => {
            model.store.replace(item);
        }
        // Replays leave the selection alone; a selection on a missing row
        // just makes later actions no-ops
        MutationOutcome::Removed(id) => {
            model.store.remove(&id);
        }
    }
}

/// A re-created row came back under a new id: every recorded command and the
/// selection follow it
fn reassign_id(model: &mut SheetModel, command: &EditCommand, created: &Item) {
    let old = command.subject_id();
    if *old == created.id {
        return;
    }
    tracing::debug!(old = %old, new = %created.id, "row re-created under new id");
    model.history.remap_id(old, &created.id);
    model.selection.remap_id(old, &created.id);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SheetConfig;
    use crate::model::{Field, ItemId};
    use crate::persistence::MutationRequest;

    fn model() -> SheetModel {
        SheetModel::with_items(
            vec![Item::new(1, "A", "10"), Item::new(2, "B", "20")],
            SheetConfig::default(),
        )
    }

    #[test]
    fn test_stale_ticket_dropped() {
        let mut model = model();
        let ticket = model.begin(PendingOp::Add);

        let cmd = update_persist(
            &mut model,
            PersistMsg::Completed {
                ticket: ticket + 10,
                result: Ok(MutationOutcome::Created(Item::new(3, "C", "30"))),
            },
        );
        assert!(cmd.is_none());
        assert!(model.is_busy());
        assert_eq!(model.store.len(), 2);
    }

    #[test]
    fn test_update_recorded_on_success() {
        let mut model = model();
        let ticket = model.begin(PendingOp::Update {
            before: Item::new(1, "A", "10"),
            clear_selection: false,
        });

        update_persist(
            &mut model,
            PersistMsg::Completed {
                ticket,
                result: Ok(MutationOutcome::Updated(Item::new(1, "A", "11"))),
            },
        );
        assert_eq!(model.store.get(&ItemId::from(1)).unwrap().value, "11");
        assert_eq!(model.history.undo_count(), 1);
        assert!(!model.is_busy());
    }

    #[test]
    fn test_failure_leaves_store_and_history() {
        let mut model = model();
        model.selection.select(ItemId::from(1), Some(Field::Name));
        let ticket = model.begin(PendingOp::Update {
            before: Item::new(1, "A", "10"),
            clear_selection: true,
        });

        update_persist(
            &mut model,
            PersistMsg::Completed {
                ticket,
                result: Err(PersistError::Network("refused".into())),
            },
        );
        assert_eq!(model.store.get(&ItemId::from(1)).unwrap().name, "A");
        assert_eq!(model.history.undo_count(), 0);
        assert!(model.selection.current().is_cell());
        assert!(matches!(
            model.ui.last_error,
            Some(SheetError::Persistence(PersistError::Network(_)))
        ));
    }

    #[test]
    fn test_failed_replay_rolls_back() {
        let mut model = model();
        model.history.record(EditCommand::Updated {
            before: Item::new(1, "Z", "10"),
            after: Item::new(1, "A", "10"),
        });
        let replay = model.history.undo().unwrap();
        assert_eq!(replay.request, MutationRequest::update_to(&Item::new(1, "Z", "10")));
        let ticket = model.begin(PendingOp::Replay {
            transfer: replay.transfer,
            command: replay.command,
        });

        update_persist(
            &mut model,
            PersistMsg::Completed {
                ticket,
                result: Err(PersistError::Http {
                    status: 500,
                    body: "boom".into(),
                }),
            },
        );
        assert_eq!(model.history.undo_count(), 1);
        assert_eq!(model.history.redo_count(), 0);
        assert_eq!(model.history.pending(), None);
        assert_eq!(model.store.get(&ItemId::from(1)).unwrap().name, "A");
    }

    #[test]
    fn test_undo_delete_restores_position_and_remaps() {
        let mut model = model();
        let deleted = Item::new(1, "A", "10");
        model.store.remove(&deleted.id);
        model.selection.select(deleted.id.clone(), None);
        model.history.record(EditCommand::Deleted {
            item: deleted.clone(),
            position: 0,
        });
        let replay = model.history.undo().unwrap();
        let ticket = model.begin(PendingOp::Replay {
            transfer: replay.transfer,
            command: replay.command,
        });

        update_persist(
            &mut model,
            PersistMsg::Completed {
                ticket,
                result: Ok(MutationOutcome::Created(Item::new(9, "A", "10"))),
            },
        );
        assert_eq!(model.store.items()[0].id, ItemId::from(9));
        assert_eq!(model.history.redo_stack()[0].subject_id(), &ItemId::from(9));
        assert_eq!(model.selection.current().id(), Some(&ItemId::from(9)));
    }

    #[test]
    fn test_load_replaces_rows_and_drops_history() {
        let mut model = model();
        model.history.record(EditCommand::Added {
            item: Item::new(2, "B", "20"),
        });
        model.selection.select(ItemId::from(2), None);
        let ticket = model.begin(PendingOp::Load);

        update_persist(
            &mut model,
            PersistMsg::Loaded {
                ticket,
                result: Ok(vec![Item::new(5, "E", "50")]),
            },
        );
        assert_eq!(model.store.len(), 1);
        assert!(!model.history.can_undo());
        assert!(model.selection.current().is_empty());
        assert_eq!(model.ui.status_message, "Loaded 1 rows");
    }
}
