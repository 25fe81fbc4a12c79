//! Shape-typed clipboard
//!
//! A cell copy holds a single scalar, a row copy holds a name/value pair.
//! Paste only applies when the payload shape matches the selection
//! granularity: scalar onto a cell, row payload onto a row.

use super::item::Item;
use super::selection::Selection;
use super::store::ItemStore;
use crate::error::SheetError;

/// What the clipboard currently holds
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClipPayload {
    /// Copied from a single cell
    Scalar(String),
    /// Copied from a whole row
    RowPayload { name: String, value: String },
}

impl ClipPayload {
    pub fn shape(&self) -> &'static str {
        match self {
            ClipPayload::Scalar(_) => "cell",
            ClipPayload::RowPayload { .. } => "row",
        }
    }

    /// Plain-text form for the system clipboard (rows are tab separated)
    pub fn as_text(&self) -> String {
        match self {
            ClipPayload::Scalar(text) => text.clone(),
            ClipPayload::RowPayload { name, value } => format!("{}\t{}", name, value),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Clipboard {
    payload: Option<ClipPayload>,
}

impl Clipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn payload(&self) -> Option<&ClipPayload> {
        self.payload.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.payload.is_none()
    }

    /// Copy the selected cell or row
    ///
    /// Leaves the clipboard untouched when nothing is selected or the
    /// selected row is gone.
    pub fn copy(
        &mut self,
        selection: &Selection,
        store: &ItemStore,
    ) -> Result<&ClipPayload, SheetError> {
        let payload = match selection {
            Selection::None => return Err(SheetError::NoSelection),
            Selection::Cell { id, field } => {
                let item = store
                    .get(id)
                    .ok_or_else(|| SheetError::StaleSelection(id.clone()))?;
                ClipPayload::Scalar(item.get(*field).to_string())
            }
            Selection::Row { id } => {
                let item = store
                    .get(id)
                    .ok_or_else(|| SheetError::StaleSelection(id.clone()))?;
                ClipPayload::RowPayload {
                    name: item.name.clone(),
                    value: item.value.clone(),
                }
            }
        };
        Ok(self.payload.insert(payload))
    }

    /// Compute the row content a paste onto `selection` would produce
    ///
    /// Returns the target row with the pasted field(s) applied. Nothing is
    /// mutated here; the caller issues the update.
    pub fn paste(&self, selection: &Selection, store: &ItemStore) -> Result<Item, SheetError> {
        if selection.is_empty() {
            return Err(SheetError::NoSelection);
        }
        let payload = self.payload.as_ref().ok_or(SheetError::EmptyClipboard)?;

        match (selection, payload) {
            (Selection::Cell { id, field }, ClipPayload::Scalar(text)) => {
                let item = store
                    .get(id)
                    .ok_or_else(|| SheetError::StaleSelection(id.clone()))?;
                Ok(item.with_field(*field, text.clone()))
            }
            (Selection::Row { id }, ClipPayload::RowPayload { name, value }) => {
                let item = store
                    .get(id)
                    .ok_or_else(|| SheetError::StaleSelection(id.clone()))?;
                Ok(Item {
                    id: item.id.clone(),
                    name: name.clone(),
                    value: value.clone(),
                })
            }
            _ => Err(SheetError::ClipboardShapeMismatch),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::item::{Field, ItemId};

    fn store() -> ItemStore {
        ItemStore::from_items(vec![Item::new(1, "A", "10"), Item::new(2, "B", "20")])
    }

    fn cell(id: u64, field: Field) -> Selection {
        Selection::Cell {
            id: ItemId::from(id),
            field,
        }
    }

    fn row(id: u64) -> Selection {
        Selection::Row {
            id: ItemId::from(id),
        }
    }

    #[test]
    fn test_copy_cell_then_paste_cell() {
        let store = store();
        let mut clipboard = Clipboard::new();
        clipboard.copy(&cell(1, Field::Value), &store).unwrap();
        assert_eq!(clipboard.payload(), Some(&ClipPayload::Scalar("10".into())));

        let after = clipboard.paste(&cell(2, Field::Name), &store).unwrap();
        assert_eq!(after, Item::new(2, "10", "20"));
    }

    #[test]
    fn test_copy_row_then_paste_row() {
        let store = store();
        let mut clipboard = Clipboard::new();
        clipboard.copy(&row(1), &store).unwrap();

        let after = clipboard.paste(&row(2), &store).unwrap();
        assert_eq!(after, Item::new(2, "A", "10"));
    }

    #[test]
    fn test_shape_mismatch() {
        let store = store();
        let mut clipboard = Clipboard::new();
        clipboard.copy(&row(1), &store).unwrap();
        assert_eq!(
            clipboard.paste(&cell(2, Field::Name), &store),
            Err(SheetError::ClipboardShapeMismatch)
        );

        clipboard.copy(&cell(1, Field::Name), &store).unwrap();
        assert_eq!(
            clipboard.paste(&row(2), &store),
            Err(SheetError::ClipboardShapeMismatch)
        );
    }

    #[test]
    fn test_copy_without_target_keeps_payload() {
        let store = store();
        let mut clipboard = Clipboard::new();
        clipboard.copy(&cell(1, Field::Name), &store).unwrap();

        assert_eq!(
            clipboard.copy(&Selection::None, &store),
            Err(SheetError::NoSelection)
        );
        assert_eq!(
            clipboard.copy(&row(42), &store),
            Err(SheetError::StaleSelection(ItemId::from(42)))
        );
        assert_eq!(clipboard.payload(), Some(&ClipPayload::Scalar("A".into())));
    }

    #[test]
    fn test_paste_empty_clipboard() {
        let clipboard = Clipboard::new();
        assert_eq!(
            clipboard.paste(&row(1), &store()),
            Err(SheetError::EmptyClipboard)
        );
    }

    #[test]
    fn test_row_text_is_tab_separated() {
        let payload = ClipPayload::RowPayload {
            name: "A".into(),
            value: "10".into(),
        };
        assert_eq!(payload.as_text(), "A\t10");
    }
}
