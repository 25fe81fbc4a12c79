//! Process-local backend
//!
//! Behaves like the REST server: every create assigns a fresh id, so a
//! re-created row never gets its old id back.

use std::sync::{Mutex, MutexGuard};

use super::{PersistError, Persistence};
use crate::model::item::{Item, ItemId};

#[derive(Debug, Default)]
struct MemoryInner {
    items: Vec<Item>,
    next_id: u64,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<MemoryInner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed with rows; ids are assigned 1, 2, 3...
    pub fn with_rows<N, V>(rows: impl IntoIterator<Item = (N, V)>) -> Self
    where
        N: Into<String>,
        V: Into<String>,
    {
        let store = Self::new();
        {
            let mut inner = store.lock();
            for (name, value) in rows {
                inner.next_id += 1;
                let id = ItemId::from(inner.next_id);
                inner.items.push(Item::new(id, name, value));
            }
        }
        store
    }

    /// Current backend content
    pub fn snapshot(&self) -> Vec<Item> {
        self.lock().items.clone()
    }

    fn lock(&self) -> MutexGuard<'_, MemoryInner> {
        // A panic in another thread cannot leave the row list half-written
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Persistence for MemoryStore {
    fn list(&self) -> Result<Vec<Item>, PersistError> {
        Ok(self.snapshot())
    }

    fn create(&self, name: &str, value: &str) -> Result<Item, PersistError> {
        let mut inner = self.lock();
        inner.next_id += 1;
        let item = Item::new(inner.next_id, name, value);
        inner.items.push(item.clone());
        Ok(item)
    }

    fn update(&self, id: &ItemId, name: &str, value: &str) -> Result<Item, PersistError> {
        let mut inner = self.lock();
        let item = inner
            .items
            .iter_mut()
            .find(|item| &item.id == id)
            .ok_or_else(|| PersistError::NotFound(id.clone()))?;
        item.name = name.to_string();
        item.value = value.to_string();
        Ok(item.clone())
    }

    fn remove(&self, id: &ItemId) -> Result<(), PersistError> {
        let mut inner = self.lock();
        let idx = inner
            .items
            .iter()
            .position(|item| &item.id == id)
            .ok_or_else(|| PersistError::NotFound(id.clone()))?;
        inner.items.remove(idx);
        Ok(())
    }
}
