//! Copy/paste through the sheet, including how pastes land in history

mod common;

use common::{rows, test_config, Harness};
use itemsheet::commands::Cmd;
use itemsheet::error::SheetError;
use itemsheet::history::EditCommand;
use itemsheet::messages::{Msg, SheetMsg};
use itemsheet::model::{ClipPayload, Field};
use itemsheet::SheetConfig;

#[test]
fn test_cell_copy_paste_records_one_update() {
    let mut h = Harness::new(&[("A", "10"), ("B", "20")]);

    h.send(Msg::select_cell(1, Field::Value));
    h.sheet(SheetMsg::Copy);
    assert_eq!(
        h.model.clipboard.payload(),
        Some(&ClipPayload::Scalar("10".into()))
    );

    h.send(Msg::select_cell(2, Field::Value));
    h.sheet(SheetMsg::Paste);

    assert_eq!(h.contents(), rows(&[("A", "10"), ("B", "10")]));
    assert_eq!(h.backend_contents(), rows(&[("A", "10"), ("B", "10")]));
    assert_eq!(h.requests.len(), 1);
    assert_eq!(h.model.history.undo_count(), 1);
    assert!(matches!(
        h.model.history.undo_stack().last(),
        Some(EditCommand::Updated { before, after })
            if before.value == "20" && after.value == "10"
    ));

    h.sheet(SheetMsg::Undo);
    assert_eq!(h.contents(), rows(&[("A", "10"), ("B", "20")]));
}

#[test]
fn test_row_copy_paste_replaces_both_fields() {
    let mut h = Harness::new(&[("A", "10"), ("B", "20")]);

    h.send(Msg::select_row(1));
    h.sheet(SheetMsg::Copy);
    h.send(Msg::select_row(2));
    h.sheet(SheetMsg::Paste);

    assert_eq!(h.contents(), rows(&[("A", "10"), ("A", "10")]));
    assert_eq!(h.model.history.undo_count(), 1);
}

#[test]
fn test_row_payload_onto_cell_is_mismatch() {
    let mut h = Harness::new(&[("A", "10"), ("B", "20")]);

    h.send(Msg::select_row(1));
    h.sheet(SheetMsg::Copy);
    h.send(Msg::select_cell(2, Field::Name));
    let cmd = h.sheet(SheetMsg::Paste);

    assert_eq!(cmd, Some(Cmd::Redraw));
    assert_eq!(
        h.model.ui.last_error,
        Some(SheetError::ClipboardShapeMismatch)
    );
    assert!(h.requests.is_empty());
    assert!(!h.model.history.can_undo());
    assert_eq!(h.contents(), rows(&[("A", "10"), ("B", "20")]));
}

#[test]
fn test_paste_with_empty_clipboard() {
    let mut h = Harness::new(&[("A", "10")]);

    h.send(Msg::select_cell(1, Field::Name));
    h.sheet(SheetMsg::Paste);

    assert_eq!(h.model.ui.last_error, Some(SheetError::EmptyClipboard));
    assert!(h.requests.is_empty());
}

#[test]
fn test_paste_of_identical_content_is_noop() {
    let mut h = Harness::new(&[("A", "10")]);

    h.send(Msg::select_cell(1, Field::Value));
    h.sheet(SheetMsg::Copy);
    let cmd = h.sheet(SheetMsg::Paste);

    assert_eq!(cmd, None);
    assert!(h.requests.is_empty());
    assert!(!h.model.history.can_undo());
}

#[test]
fn test_copy_without_selection_is_silent() {
    let mut h = Harness::new(&[("A", "10")]);
    h.model.ui.set_status("Loaded 1 rows");

    let cmd = h.sheet(SheetMsg::Copy);

    assert_eq!(cmd, None);
    assert!(h.model.clipboard.is_empty());
    assert_eq!(h.model.ui.status_message, "Loaded 1 rows");
}

#[test]
fn test_copy_survives_row_delete() {
    let mut h = Harness::new(&[("A", "10"), ("B", "20")]);

    h.send(Msg::select_cell(1, Field::Name));
    h.sheet(SheetMsg::Copy);
    h.sheet(SheetMsg::DeleteItem(1.into()));

    h.send(Msg::select_cell(2, Field::Name));
    h.sheet(SheetMsg::Paste);

    assert_eq!(h.contents(), rows(&[("A", "20")]));
}

#[test]
fn test_copy_is_mirrored_to_system_clipboard() {
    let config = SheetConfig {
        mirror_system_clipboard: true,
        ..test_config()
    };
    let mut h = Harness::with_config(&[("A", "10")], config);

    h.send(Msg::select_row(1));
    let cmd = h.sheet(SheetMsg::Copy);

    assert_eq!(
        cmd,
        Some(Cmd::Batch(vec![
            Cmd::Redraw,
            Cmd::WriteSystemClipboard {
                text: "A\t10".into()
            },
        ]))
    );
}
