//! Active cell selection and inline editing.

use crate::host::GridHost;
use crate::model::{ColumnId, RowId};
use serde::{Deserialize, Serialize};

/// The single selected cell.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActiveCell {
    pub column: ColumnId,
    pub row: RowId,
}

impl ActiveCell {
    pub fn new(column: impl Into<ColumnId>, row: impl Into<RowId>) -> Self {
        Self {
            column: column.into(),
            row: row.into(),
        }
    }
}

/// Inline edit of the active cell.
#[derive(Debug, Clone, PartialEq)]
pub struct EditSession {
    pub cell: ActiveCell,
    /// Latest raw value from the editor.
    pub buffer: String,
}

/// Selection state. Edit mode only exists on the active cell.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Selection {
    #[default]
    None,
    Active(ActiveCell),
    Editing(EditSession),
}

impl Selection {
    pub fn active(&self) -> Option<&ActiveCell> {
        match self {
            Selection::None => None,
            Selection::Active(cell) => Some(cell),
            Selection::Editing(session) => Some(&session.cell),
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self, Selection::Editing(_))
    }
}

/// Tracks the active cell and its edit mode.
#[derive(Debug, Clone, Default)]
pub struct SelectionController {
    selection: Selection,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn active(&self) -> Option<&ActiveCell> {
        self.selection.active()
    }

    pub fn is_editing(&self) -> bool {
        self.selection.is_editing()
    }

    /// Value in the editor, if editing.
    pub fn edit_buffer(&self) -> Option<&str> {
        match &self.selection {
            Selection::Editing(session) => Some(&session.buffer),
            _ => None,
        }
    }

    /// Select `cell` without editing.
    ///
    /// Editing another cell ends and its buffer is dropped without a commit.
    /// Activating the cell being edited leaves the editor open.
    pub fn primary_activate(&mut self, cell: ActiveCell, host: &mut dyn GridHost) {
        if let Selection::Editing(session) = &self.selection {
            if session.cell == cell {
                return;
            }
            log::debug!("Edit of {}/{} discarded", session.cell.column, session.cell.row);
        }
        log::debug!("Cell selected: {}/{}", cell.column, cell.row);
        host.on_cell_selected(&cell.column, &cell.row);
        self.selection = Selection::Active(cell);
    }

    /// Double activation: select `cell` and open its editor when allowed.
    ///
    /// The editor opens only for an existing, non-image cell and only if the
    /// host accepts edits. Returns whether edit mode is on afterwards.
    pub fn secondary_activate(&mut self, cell: ActiveCell, host: &mut dyn GridHost) -> bool {
        if let Selection::Editing(session) = &self.selection {
            if session.cell == cell {
                return true;
            }
        }
        if self.active() != Some(&cell) {
            self.primary_activate(cell.clone(), host);
        }

        let buffer = match host.model().cell(&cell.column, &cell.row) {
            Some(c) if c.is_editable() => c.display(),
            _ => return false,
        };
        if !host.accepts_edits() {
            return false;
        }

        log::debug!("Editing {}/{}", cell.column, cell.row);
        self.selection = Selection::Editing(EditSession { cell, buffer });
        true
    }

    /// Feed a new raw editor value. Every change is reported to the host.
    /// Returns `false` when no cell is being edited.
    pub fn input(&mut self, value: &str, host: &mut dyn GridHost) -> bool {
        let Selection::Editing(session) = &mut self.selection else {
            return false;
        };
        session.buffer = value.to_string();
        host.on_active_cell_value_change(value);
        true
    }

    /// Apply an active cell chosen by the host. No callback is emitted.
    pub fn sync_active(&mut self, cell: Option<ActiveCell>) {
        match cell {
            None => self.clear(),
            Some(cell) => {
                if self.active() != Some(&cell) {
                    self.selection = Selection::Active(cell);
                }
            }
        }
    }

    /// Drop the selection and any edit.
    pub fn clear(&mut self) {
        self.selection = Selection::None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Cell, CellValue, Column, GridModel, GridModelView, Row};

    /// Records every host callback.
    #[derive(Default)]
    struct RecordingHost {
        model: GridModel,
        editable: bool,
        selected: Vec<(String, String)>,
        values: Vec<String>,
    }

    impl GridHost for RecordingHost {
        fn model(&self) -> &dyn GridModelView {
            &self.model
        }

        fn on_cell_selected(&mut self, column: &ColumnId, row: &RowId) {
            self.selected.push((column.0.clone(), row.0.clone()));
        }

        fn on_active_cell_value_change(&mut self, value: &str) {
            self.values.push(value.to_string());
        }

        fn accepts_edits(&self) -> bool {
            self.editable
        }
    }

    fn host(editable: bool) -> RecordingHost {
        let mut model = GridModel::new();
        for c in ["1", "2"] {
            model.push_column(Column::with_id(c, "H", 100.0)).unwrap();
        }
        model.push_row(Row::with_id("2", 40.0)).unwrap();
        model
            .set_cell(&ColumnId::from("1"), &RowId::from("2"), Cell::new(CellValue::text("one")))
            .unwrap();
        model
            .set_cell(&ColumnId::from("2"), &RowId::from("2"), Cell::image(CellValue::text("pic.png")))
            .unwrap();
        RecordingHost {
            model,
            editable,
            ..Default::default()
        }
    }

    #[test]
    fn test_primary_selects_without_editing() {
        let mut host = host(true);
        let mut selection = SelectionController::new();
        selection.primary_activate(ActiveCell::new("1", "2"), &mut host);
        assert_eq!(selection.active(), Some(&ActiveCell::new("1", "2")));
        assert!(!selection.is_editing());
        assert_eq!(host.selected, vec![("1".to_string(), "2".to_string())]);
    }

    #[test]
    fn test_secondary_enters_edit_mode() {
        let mut host = host(true);
        let mut selection = SelectionController::new();
        assert!(selection.secondary_activate(ActiveCell::new("1", "2"), &mut host));
        assert_eq!(selection.edit_buffer(), Some("one"));
        assert_eq!(host.selected.len(), 1);

        assert!(selection.input("one!", &mut host));
        assert!(selection.input("one!!", &mut host));
        assert_eq!(host.values, vec!["one!".to_string(), "one!!".to_string()]);
        assert_eq!(selection.edit_buffer(), Some("one!!"));
    }

    #[test]
    fn test_secondary_on_active_cell_does_not_reselect() {
        let mut host = host(true);
        let mut selection = SelectionController::new();
        selection.primary_activate(ActiveCell::new("1", "2"), &mut host);
        assert!(selection.secondary_activate(ActiveCell::new("1", "2"), &mut host));
        assert_eq!(host.selected.len(), 1);
    }

    #[test]
    fn test_image_cell_never_edits() {
        let mut host = host(true);
        let mut selection = SelectionController::new();
        selection.primary_activate(ActiveCell::new("2", "2"), &mut host);
        assert!(!selection.secondary_activate(ActiveCell::new("2", "2"), &mut host));
        assert!(!selection.secondary_activate(ActiveCell::new("2", "2"), &mut host));
        assert!(!selection.is_editing());
        assert!(!selection.input("x", &mut host));
        assert!(host.values.is_empty());
    }

    #[test]
    fn test_host_without_edit_callback() {
        let mut host = host(false);
        let mut selection = SelectionController::new();
        assert!(!selection.secondary_activate(ActiveCell::new("1", "2"), &mut host));
        assert_eq!(selection.active(), Some(&ActiveCell::new("1", "2")));
        assert!(!selection.is_editing());
    }

    #[test]
    fn test_new_selection_discards_edit() {
        let mut host = host(true);
        let mut selection = SelectionController::new();
        selection.primary_activate(ActiveCell::new("1", "2"), &mut host);
        selection.secondary_activate(ActiveCell::new("1", "2"), &mut host);
        selection.primary_activate(ActiveCell::new("2", "2"), &mut host);

        assert_eq!(selection.active(), Some(&ActiveCell::new("2", "2")));
        assert!(!selection.is_editing());
        assert!(host.values.is_empty());
    }

    #[test]
    fn test_primary_on_edited_cell_keeps_editing() {
        let mut host = host(true);
        let mut selection = SelectionController::new();
        selection.secondary_activate(ActiveCell::new("1", "2"), &mut host);
        selection.primary_activate(ActiveCell::new("1", "2"), &mut host);
        assert!(selection.is_editing());
        assert_eq!(host.selected.len(), 1);
    }

    #[test]
    fn test_unknown_cell_still_reported() {
        let mut host = host(true);
        let mut selection = SelectionController::new();
        assert!(!selection.secondary_activate(ActiveCell::new("9", "9"), &mut host));
        assert_eq!(host.selected, vec![("9".to_string(), "9".to_string())]);
        assert_eq!(selection.active(), Some(&ActiveCell::new("9", "9")));
    }

    #[test]
    fn test_sync_active() {
        let mut host = host(true);
        let mut selection = SelectionController::new();
        selection.secondary_activate(ActiveCell::new("1", "2"), &mut host);

        selection.sync_active(Some(ActiveCell::new("1", "2")));
        assert!(selection.is_editing());

        selection.sync_active(Some(ActiveCell::new("2", "2")));
        assert!(!selection.is_editing());
        assert_eq!(selection.active(), Some(&ActiveCell::new("2", "2")));

        selection.sync_active(None);
        assert_eq!(selection.selection(), &Selection::None);
        assert_eq!(host.selected.len(), 1);
    }
}
