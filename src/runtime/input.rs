//! Keyboard input handling
//!
//! Resolves keystrokes through the keymap. The delete key does nothing while
//! a row delete is still awaiting its answer.

use crate::keymap::{Command, KeyAction, Keymap, Keystroke};
use crate::messages::Msg;
use crate::model::SheetModel;

/// Messages triggered by a keystroke (empty while a chord is incomplete)
pub fn handle_key(model: &SheetModel, keymap: &mut Keymap, keystroke: Keystroke) -> Vec<Msg> {
    match keymap.handle_keystroke(keystroke) {
        KeyAction::Execute(command) => {
            tracing::debug!(target: "keymap", key = %keystroke, command = ?command, "key bound");
            if command == Command::DeleteSelection && model.ui.pending_delete.is_some() {
                tracing::debug!("delete already awaiting confirmation");
                return Vec::new();
            }
            command.to_msgs()
        }
        KeyAction::AwaitMore => {
            tracing::debug!(target: "keymap", key = %keystroke, "awaiting chord");
            Vec::new()
        }
        KeyAction::NoMatch => {
            tracing::debug!(target: "keymap", key = %keystroke, "unbound key");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keymap::{default_bindings, KeyCode};
    use crate::messages::SheetMsg;
    use crate::model::ItemId;

    #[test]
    fn test_default_keys_map_to_intents() {
        let model = SheetModel::default();
        let mut keymap = Keymap::with_bindings(default_bindings());

        assert_eq!(
            handle_key(&model, &mut keymap, Keystroke::key(KeyCode::Delete)),
            vec![Msg::Sheet(SheetMsg::DeleteSelection)]
        );
        assert_eq!(
            handle_key(&model, &mut keymap, Keystroke::cmd('z')),
            vec![Msg::Sheet(SheetMsg::Undo)]
        );
        assert_eq!(
            handle_key(&model, &mut keymap, Keystroke::cmd('y')),
            vec![Msg::Sheet(SheetMsg::Redo)]
        );
        assert!(handle_key(&model, &mut keymap, Keystroke::cmd('k')).is_empty());
    }

    #[test]
    fn test_delete_ignored_while_prompting() {
        let mut model = SheetModel::default();
        model.ui.pending_delete = Some(ItemId::from(1));
        let mut keymap = Keymap::with_bindings(default_bindings());

        assert!(handle_key(&model, &mut keymap, Keystroke::key(KeyCode::Delete)).is_empty());
    }
}
