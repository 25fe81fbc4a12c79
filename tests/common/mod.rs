//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use itemsheet::commands::Cmd;
use itemsheet::config::{Backend, SheetConfig};
use itemsheet::messages::{AppMsg, Msg, PersistMsg, SheetMsg};
use itemsheet::model::{Item, ItemId, SheetModel};
use itemsheet::persistence::{MemoryStore, MutationRequest, PersistError, Persistence};
use itemsheet::update::update;

/// Config for tests: no prompts, no OS clipboard
pub fn test_config() -> SheetConfig {
    SheetConfig {
        backend: Backend::Memory,
        confirm_row_delete: false,
        mirror_system_clipboard: false,
        ..SheetConfig::default()
    }
}

/// Memory store wrapper that can be told to fail its next requests
#[derive(Default)]
pub struct FlakyStore {
    pub inner: MemoryStore,
    failures: AtomicUsize,
}

impl FlakyStore {
    pub fn with_rows(rows: &[(&str, &str)]) -> Self {
        Self {
            inner: MemoryStore::with_rows(rows.iter().copied()),
            failures: AtomicUsize::new(0),
        }
    }

    /// Fail the next `n` mutations with a network error
    pub fn fail_next(&self, n: usize) {
        self.failures.store(n, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), PersistError> {
        let remaining = self.failures.load(Ordering::SeqCst);
        if remaining > 0 {
            self.failures.store(remaining - 1, Ordering::SeqCst);
            return Err(PersistError::Network("connection refused".into()));
        }
        Ok(())
    }
}

impl Persistence for FlakyStore {
    fn list(&self) -> Result<Vec<Item>, PersistError> {
        self.inner.list()
    }

    fn create(&self, name: &str, value: &str) -> Result<Item, PersistError> {
        self.check()?;
        self.inner.create(name, value)
    }

    fn update(&self, id: &ItemId, name: &str, value: &str) -> Result<Item, PersistError> {
        self.check()?;
        self.inner.update(id, name, value)
    }

    fn remove(&self, id: &ItemId) -> Result<(), PersistError> {
        self.check()?;
        self.inner.remove(id)
    }
}

/// Drives `update` synchronously against a backend
///
/// Every `Cmd::Persist`/`Cmd::LoadItems` is executed immediately and its
/// completion fed back, so each `send` leaves the model idle.
pub struct Harness {
    pub model: SheetModel,
    pub store: Arc<FlakyStore>,
    /// Answer for row delete prompts
    pub confirm: bool,
    /// Requests sent to the backend, in order
    pub requests: Vec<MutationRequest>,
}

impl Harness {
    /// Backend holding `rows` (ids 1..), mirrored into the model by a load
    pub fn new(rows: &[(&str, &str)]) -> Self {
        Self::with_config(rows, test_config())
    }

    pub fn with_config(rows: &[(&str, &str)], config: SheetConfig) -> Self {
        let mut harness = Self {
            model: SheetModel::new(config),
            store: Arc::new(FlakyStore::with_rows(rows)),
            confirm: true,
            requests: Vec::new(),
        };
        harness.send(Msg::App(AppMsg::Reload));
        harness
    }

    pub fn send(&mut self, msg: Msg) -> Option<Cmd> {
        let cmd = update(&mut self.model, msg);
        if let Some(ref cmd) = cmd {
            self.run(cmd.clone());
        }
        cmd
    }

    pub fn sheet(&mut self, msg: SheetMsg) -> Option<Cmd> {
        self.send(Msg::Sheet(msg))
    }

    /// Send a message but keep its backend request unanswered
    pub fn send_deferred(&mut self, msg: Msg) -> (u64, MutationRequest) {
        let cmd = update(&mut self.model, msg).expect("message produced no command");
        let (ticket, request) = cmd
            .persist_request()
            .map(|(t, r)| (t, r.clone()))
            .expect("message produced no backend request");
        self.requests.push(request.clone());
        (ticket, request)
    }

    /// Start a reload but keep the list request unanswered
    pub fn reload_deferred(&mut self) -> u64 {
        match update(&mut self.model, Msg::App(AppMsg::Reload)) {
            Some(Cmd::LoadItems { ticket }) => ticket,
            other => panic!("reload produced {:?}", other),
        }
    }

    /// Answer a deferred request by running it against the backend
    pub fn complete(&mut self, ticket: u64, request: &MutationRequest) -> Option<Cmd> {
        let result = request.execute(&*self.store);
        self.send(Msg::Persist(PersistMsg::Completed { ticket, result }))
    }

    fn run(&mut self, cmd: Cmd) {
        match cmd {
            Cmd::LoadItems { ticket } => {
                let result = self.store.list();
                self.send(Msg::Persist(PersistMsg::Loaded { ticket, result }));
            }
            Cmd::Persist { ticket, request } => {
                self.requests.push(request.clone());
                self.complete(ticket, &request);
            }
            Cmd::ConfirmDelete { id, .. } => {
                let answer = if self.confirm {
                    SheetMsg::ConfirmDelete(id)
                } else {
                    SheetMsg::CancelDelete
                };
                self.sheet(answer);
            }
            Cmd::Batch(cmds) => {
                for cmd in cmds {
                    self.run(cmd);
                }
            }
            Cmd::None | Cmd::Redraw | Cmd::WriteSystemClipboard { .. } | Cmd::Quit => {}
        }
    }

    /// `(name, value)` of every local row, in order
    pub fn contents(&self) -> Vec<(String, String)> {
        self.model.store.contents()
    }

    /// `(name, value)` of every backend row, in order
    pub fn backend_contents(&self) -> Vec<(String, String)> {
        self.store
            .inner
            .snapshot()
            .into_iter()
            .map(|item| (item.name, item.value))
            .collect()
    }

    /// Id of the local row at `index`
    pub fn id_at(&self, index: usize) -> ItemId {
        self.model.store.items()[index].id.clone()
    }
}

/// `(name, value)` pairs as owned strings
pub fn rows(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|(n, v)| (n.to_string(), v.to_string()))
        .collect()
}
