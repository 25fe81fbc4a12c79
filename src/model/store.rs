//! Local mirror of the persisted rows
//!
//! Pure data: the store never talks to the backend itself. Rows keep the
//! order the backend returned them in, new rows are appended.

use super::item::{Item, ItemId};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemStore {
    items: Vec<Item>,
}

impl ItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_items(items: Vec<Item>) -> Self {
        Self { items }
    }

    pub fn get(&self, id: &ItemId) -> Option<&Item> {
        self.items.iter().find(|item| &item.id == id)
    }

    pub fn contains(&self, id: &ItemId) -> bool {
        self.get(id).is_some()
    }

    pub fn position(&self, id: &ItemId) -> Option<usize> {
        self.items.iter().position(|item| &item.id == id)
    }

    /// Replace the row with the same id, returning the previous version
    ///
    /// Unknown ids are appended so a backend response is never dropped.
    pub fn replace(&mut self, item: Item) -> Option<Item> {
        match self.position(&item.id) {
            Some(idx) => Some(std::mem::replace(&mut self.items[idx], item)),
            None => {
                self.items.push(item);
                None
            }
        }
    }

    /// Remove a row, returning its position and content
    pub fn remove(&mut self, id: &ItemId) -> Option<(usize, Item)> {
        let idx = self.position(id)?;
        Some((idx, self.items.remove(idx)))
    }

    pub fn push(&mut self, item: Item) {
        self.items.push(item);
    }

    /// Insert at `position`, clamped to the end of the list
    pub fn insert_at(&mut self, position: usize, item: Item) {
        let idx = position.min(self.items.len());
        self.items.insert(idx, item);
    }

    pub fn replace_all(&mut self, items: Vec<Item>) {
        self.items = items;
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// (name, value) pairs in display order
    pub fn contents(&self) -> Vec<(String, String)> {
        self.items
            .iter()
            .map(|item| (item.name.clone(), item.value.clone()))
            .collect()
    }

    /// True if two rows share an id
    pub fn has_duplicate_ids(&self) -> bool {
        let mut ids: Vec<&ItemId> = self.items.iter().map(|item| &item.id).collect();
        ids.sort();
        ids.windows(2).any(|pair| pair[0] == pair[1])
    }
}
