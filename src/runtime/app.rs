use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::commands::Cmd;
use crate::keymap::{Keymap, Keystroke};
use crate::messages::{AppMsg, Msg, PersistMsg, SheetMsg};
use crate::model::{Field, ItemId, SheetModel};
use crate::persistence::Persistence;
use crate::update::update;

use super::confirm::Confirm;
use super::input::handle_key;

/// Owns the model and executes the commands `update` returns
///
/// Backend requests run on their own thread and report back through a
/// channel; results are applied when the front end calls
/// `process_async_messages` or `wait_idle`.
pub struct Runtime {
    model: SheetModel,
    keymap: Keymap,
    store: Arc<dyn Persistence>,
    confirm: Box<dyn Confirm>,
    msg_tx: Sender<Msg>,
    msg_rx: Receiver<Msg>,
    quit_requested: bool,
}

impl Runtime {
    pub fn new(
        model: SheetModel,
        keymap: Keymap,
        store: Arc<dyn Persistence>,
        confirm: Box<dyn Confirm>,
    ) -> Self {
        let (msg_tx, msg_rx) = mpsc::channel();
        Self {
            model,
            keymap,
            store,
            confirm,
            msg_tx,
            msg_rx,
            quit_requested: false,
        }
    }

    pub fn model(&self) -> &SheetModel {
        &self.model
    }

    pub fn keymap(&self) -> &Keymap {
        &self.keymap
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    /// Run one message through `update` and execute the resulting command
    ///
    /// Returns true if the front end should redraw.
    pub fn dispatch(&mut self, msg: Msg) -> bool {
        match update(&mut self.model, msg) {
            Some(cmd) => {
                let needs_redraw = cmd.needs_redraw();
                self.process_cmd(cmd);
                needs_redraw
            }
            None => false,
        }
    }

    fn dispatch_all(&mut self, msgs: Vec<Msg>) -> bool {
        let mut needs_redraw = false;
        for msg in msgs {
            needs_redraw |= self.dispatch(msg);
        }
        needs_redraw
    }

    /// Route a keystroke through the keymap
    pub fn handle_key(&mut self, keystroke: Keystroke) -> bool {
        let msgs = handle_key(&self.model, &mut self.keymap, keystroke);
        self.dispatch_all(msgs)
    }

    // === Front-end triggers ===

    pub fn on_select(&mut self, id: impl Into<ItemId>, field: Option<Field>) -> bool {
        self.dispatch(Msg::Sheet(SheetMsg::Select {
            id: id.into(),
            field,
        }))
    }

    pub fn on_clear_selection(&mut self) -> bool {
        self.dispatch(Msg::Sheet(SheetMsg::ClearSelection))
    }

    pub fn on_delete_intent(&mut self) -> bool {
        self.dispatch(Msg::Sheet(SheetMsg::DeleteSelection))
    }

    /// Row delete button: removes the row without prompting
    pub fn on_delete_item(&mut self, id: impl Into<ItemId>) -> bool {
        self.dispatch(Msg::Sheet(SheetMsg::DeleteItem(id.into())))
    }

    pub fn on_undo_intent(&mut self) -> bool {
        self.dispatch(Msg::Sheet(SheetMsg::Undo))
    }

    pub fn on_redo_intent(&mut self) -> bool {
        self.dispatch(Msg::Sheet(SheetMsg::Redo))
    }

    pub fn on_copy_intent(&mut self) -> bool {
        self.dispatch(Msg::Sheet(SheetMsg::Copy))
    }

    pub fn on_paste_intent(&mut self) -> bool {
        self.dispatch(Msg::Sheet(SheetMsg::Paste))
    }

    pub fn on_field_edit(
        &mut self,
        id: impl Into<ItemId>,
        field: Field,
        value: impl Into<String>,
    ) -> bool {
        self.dispatch(Msg::edit(id, field, value))
    }

    pub fn on_add_intent(&mut self, name: impl Into<String>, value: impl Into<String>) -> bool {
        self.dispatch(Msg::add(name, value))
    }

    pub fn on_reload(&mut self) -> bool {
        self.dispatch(Msg::App(AppMsg::Reload))
    }

    // === Command execution ===

    fn process_cmd(&mut self, cmd: Cmd) {
        match cmd {
            Cmd::None | Cmd::Redraw => {}
            Cmd::LoadItems { ticket } => {
                let tx = self.msg_tx.clone();
                let store = Arc::clone(&self.store);
                std::thread::spawn(move || {
                    let result = store.list();
                    let _ = tx.send(Msg::Persist(PersistMsg::Loaded { ticket, result }));
                });
            }
            Cmd::Persist { ticket, request } => {
                let tx = self.msg_tx.clone();
                let store = Arc::clone(&self.store);
                std::thread::spawn(move || {
                    let _span = tracing::debug_span!("persist", ticket).entered();
                    let result = request.execute(store.as_ref());
                    if let Err(ref e) = result {
                        tracing::debug!(error = %e, ?request, "backend request failed");
                    }
                    let _ = tx.send(Msg::Persist(PersistMsg::Completed { ticket, result }));
                });
            }
            Cmd::ConfirmDelete { id, prompt } => {
                let answer = if self.confirm.confirm(&prompt) {
                    SheetMsg::ConfirmDelete(id)
                } else {
                    SheetMsg::CancelDelete
                };
                self.dispatch(Msg::Sheet(answer));
            }
            Cmd::WriteSystemClipboard { text } => match arboard::Clipboard::new() {
                Ok(mut clipboard) => {
                    if let Err(e) = clipboard.set_text(text) {
                        tracing::warn!("Failed to write system clipboard: {}", e);
                    }
                }
                Err(e) => tracing::debug!("System clipboard unavailable: {}", e),
            },
            Cmd::Batch(cmds) => {
                for cmd in cmds {
                    self.process_cmd(cmd);
                }
            }
            Cmd::Quit => {
                self.quit_requested = true;
            }
        }
    }

    /// Apply every backend result that has arrived so far
    pub fn process_async_messages(&mut self) -> bool {
        let mut needs_redraw = false;
        while let Ok(msg) = self.msg_rx.try_recv() {
            needs_redraw |= self.dispatch(msg);
        }
        needs_redraw
    }

    /// Block until the in-flight request resolves or `timeout` passes
    ///
    /// Returns false on timeout.
    pub fn wait_idle(&mut self, timeout: Duration) -> bool {
        // No deadline if it lies past what `Instant` can represent
        let deadline = Instant::now().checked_add(timeout);
        self.process_async_messages();
        while self.model.is_busy() {
            let remaining = match deadline {
                Some(deadline) => deadline.saturating_duration_since(Instant::now()),
                None => Duration::MAX,
            };
            match self.msg_rx.recv_timeout(remaining) {
                Ok(msg) => {
                    self.dispatch(msg);
                }
                Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => {
                    tracing::warn!("Timed out waiting for backend");
                    return false;
                }
            }
        }
        true
    }
}
