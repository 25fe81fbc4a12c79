//! Row/cell selection tracking
//!
//! Only one selection is live at a time. The tracker does not validate ids
//! against the store: a selection that points at a deleted row is legal and
//! simply turns later actions into no-ops.

use super::item::{Field, ItemId};

/// The current selection target
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    None,
    /// An entire row
    Row { id: ItemId },
    /// A single field within a row
    Cell { id: ItemId, field: Field },
}

impl Selection {
    pub fn id(&self) -> Option<&ItemId> {
        match self {
            Selection::None => None,
            Selection::Row { id } | Selection::Cell { id, .. } => Some(id),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Selection::None)
    }

    pub fn is_row(&self) -> bool {
        matches!(self, Selection::Row { .. })
    }

    pub fn is_cell(&self) -> bool {
        matches!(self, Selection::Cell { .. })
    }

    /// Short label for status messages and logs
    pub fn describe(&self) -> String {
        match self {
            Selection::None => "none".to_string(),
            Selection::Row { id } => format!("row {}", id),
            Selection::Cell { id, field } => format!("cell {}.{}", id, field),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SelectionTracker {
    current: Selection,
}

impl SelectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a cell when `field` is given, otherwise the whole row
    pub fn select(&mut self, id: ItemId, field: Option<Field>) {
        self.current = match field {
            Some(field) => Selection::Cell { id, field },
            None => Selection::Row { id },
        };
    }

    pub fn clear(&mut self) {
        self.current = Selection::None;
    }

    pub fn current(&self) -> &Selection {
        &self.current
    }

    /// True if the selection targets `id` at any granularity
    pub fn targets(&self, id: &ItemId) -> bool {
        self.current.id() == Some(id)
    }

    /// Follow a row whose id changed after re-creation
    pub fn remap_id(&mut self, old: &ItemId, new: &ItemId) {
        match &mut self.current {
            Selection::Row { id } | Selection::Cell { id, .. } if id == old => {
                *id = new.clone();
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_row_and_cell() {
        let mut tracker = SelectionTracker::new();
        assert!(tracker.current().is_empty());

        tracker.select(ItemId::from(1), None);
        assert_eq!(tracker.current(), &Selection::Row { id: ItemId::from(1) });

        tracker.select(ItemId::from(1), Some(Field::Value));
        assert_eq!(
            tracker.current(),
            &Selection::Cell {
                id: ItemId::from(1),
                field: Field::Value
            }
        );

        tracker.clear();
        assert!(tracker.current().is_empty());
    }

    #[test]
    fn test_remap_only_matching_id() {
        let mut tracker = SelectionTracker::new();
        tracker.select(ItemId::from(1), Some(Field::Name));

        tracker.remap_id(&ItemId::from(2), &ItemId::from(5));
        assert!(tracker.targets(&ItemId::from(1)));

        tracker.remap_id(&ItemId::from(1), &ItemId::from(5));
        assert!(tracker.targets(&ItemId::from(5)));
        assert!(tracker.current().is_cell());
    }
}
