//! Single-file JSON backend for offline use
//!
//! The whole table is rewritten on every mutation. Fine for the small
//! datasets this tool edits.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use super::{PersistError, Persistence};
use crate::model::item::{Item, ItemId};

/// On-disk layout
#[derive(Debug, Default, Serialize, Deserialize)]
struct DataFile {
    #[serde(default)]
    next_id: u64,
    #[serde(default)]
    items: Vec<Item>,
}

#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    /// Serializes read-modify-write cycles between worker threads
    lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<DataFile, PersistError> {
        if !self.path.exists() {
            return Ok(DataFile::default());
        }
        let content =
            std::fs::read_to_string(&self.path).map_err(|e| PersistError::Io(e.to_string()))?;
        serde_json::from_str(&content).map_err(|e| {
            PersistError::Parse(format!("{}: {}", self.path.display(), e))
        })
    }

    fn write(&self, data: &DataFile) -> Result<(), PersistError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| PersistError::Io(e.to_string()))?;
        }
        let content =
            serde_json::to_string_pretty(data).map_err(|e| PersistError::Parse(e.to_string()))?;
        std::fs::write(&self.path, content).map_err(|e| PersistError::Io(e.to_string()))
    }

    /// Run a read-modify-write cycle under the file lock
    fn modify<T>(
        &self,
        f: impl FnOnce(&mut DataFile) -> Result<T, PersistError>,
    ) -> Result<T, PersistError> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut data = self.read()?;
        let result = f(&mut data)?;
        self.write(&data)?;
        Ok(result)
    }
}

impl Persistence for JsonFileStore {
    fn list(&self) -> Result<Vec<Item>, PersistError> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        Ok(self.read()?.items)
    }

    fn create(&self, name: &str, value: &str) -> Result<Item, PersistError> {
        self.modify(|data| {
            // Files edited by hand may carry ids past the counter
            let highest = data
                .items
                .iter()
                .filter_map(|item| item.id.as_str().parse::<u64>().ok())
                .max()
                .unwrap_or(0);
            data.next_id = data.next_id.max(highest) + 1;
            let item = Item::new(data.next_id, name, value);
            data.items.push(item.clone());
            Ok(item)
        })
    }

    fn update(&self, id: &ItemId, name: &str, value: &str) -> Result<Item, PersistError> {
        self.modify(|data| {
            let item = data
                .items
                .iter_mut()
                .find(|item| &item.id == id)
                .ok_or_else(|| PersistError::NotFound(id.clone()))?;
            item.name = name.to_string();
            item.value = value.to_string();
            Ok(item.clone())
        })
    }

    fn remove(&self, id: &ItemId) -> Result<(), PersistError> {
        self.modify(|data| {
            let before = data.items.len();
            data.items.retain(|item| &item.id != id);
            if data.items.len() == before {
                return Err(PersistError::NotFound(id.clone()));
            }
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("items.json"));
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_changes_survive_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("items.json");

        let store = JsonFileStore::new(&path);
        let a = store.create("A", "10").unwrap();
        let b = store.create("B", "20").unwrap();
        store.update(&a.id, "A2", "11").unwrap();
        store.remove(&b.id).unwrap();

        let reopened = JsonFileStore::new(&path);
        assert_eq!(reopened.list().unwrap(), vec![Item::new(1, "A2", "11")]);

        // The counter keeps moving forward after a delete
        let c = reopened.create("C", "30").unwrap();
        assert_eq!(c.id, ItemId::from(3));
    }

    #[test]
    fn test_remove_unknown_row() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("items.json"));
        assert_eq!(
            store.remove(&ItemId::from(9)),
            Err(PersistError::NotFound(ItemId::from(9)))
        );
    }

    #[test]
    fn test_corrupt_file_reports_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("items.json");
        std::fs::write(&path, "not json").unwrap();
        let store = JsonFileStore::new(&path);
        assert!(matches!(store.list(), Err(PersistError::Parse(_))));
    }
}
