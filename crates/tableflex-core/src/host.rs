//! Callback surface between the interaction core and its owning application.

use crate::model::{ColumnId, GridModel, GridModelView, RowId};
use crate::selection::ActiveCell;

/// The application that owns the grid.
///
/// The core reads the model through [`model`](Self::model) and reports
/// requested changes through the callbacks. It never mutates the model itself.
pub trait GridHost {
    /// Current grid model.
    fn model(&self) -> &dyn GridModelView;

    /// A drag requests a new column width (already clamped).
    fn on_column_width_change(&mut self, _column: &ColumnId, _width: f64) {}

    /// A drag requests a new row height (already clamped).
    fn on_row_height_change(&mut self, _row: &RowId, _height: f64) {}

    /// A cell became the active cell.
    fn on_cell_selected(&mut self, _column: &ColumnId, _row: &RowId) {}

    /// The host replaced or cleared the active cell through
    /// [`GridInteraction::sync_active`](crate::GridInteraction::sync_active).
    fn on_active_cell_synced(&mut self, _cell: Option<&ActiveCell>) {}

    /// The active cell's editor produced a new raw value.
    fn on_active_cell_value_change(&mut self, _value: &str) {}

    /// Whether the host takes edits. Without it cells never enter edit mode.
    fn accepts_edits(&self) -> bool {
        false
    }
}

/// A host that owns a [`GridModel`] and applies every request to it.
#[derive(Debug, Clone, Default)]
pub struct ModelHost {
    model: GridModel,
    selected: Option<ActiveCell>,
    editable: bool,
}

impl ModelHost {
    pub fn new(model: GridModel) -> Self {
        Self {
            model,
            selected: None,
            editable: false,
        }
    }

    /// Let cells enter edit mode; edits are written back into the model.
    pub fn with_editing(mut self, editable: bool) -> Self {
        self.editable = editable;
        self
    }

    pub fn grid(&self) -> &GridModel {
        &self.model
    }

    pub fn into_grid(self) -> GridModel {
        self.model
    }

    /// Last cell reported as selected.
    pub fn selected(&self) -> Option<&ActiveCell> {
        self.selected.as_ref()
    }
}

impl GridHost for ModelHost {
    fn model(&self) -> &dyn GridModelView {
        &self.model
    }

    fn on_column_width_change(&mut self, column: &ColumnId, width: f64) {
        if let Err(e) = self.model.set_column_width(column, width) {
            log::warn!("Ignoring width change: {}", e);
        }
    }

    fn on_row_height_change(&mut self, row: &RowId, height: f64) {
        if let Err(e) = self.model.set_row_height(row, height) {
            log::warn!("Ignoring height change: {}", e);
        }
    }

    fn on_cell_selected(&mut self, column: &ColumnId, row: &RowId) {
        self.selected = Some(ActiveCell::new(column.clone(), row.clone()));
    }

    fn on_active_cell_synced(&mut self, cell: Option<&ActiveCell>) {
        self.selected = cell.cloned();
    }

    fn on_active_cell_value_change(&mut self, value: &str) {
        let Some(cell) = &self.selected else {
            return;
        };
        if let Err(e) = self.model.set_cell_text(&cell.column, &cell.row, value) {
            log::warn!("Ignoring edit: {}", e);
        }
    }

    fn accepts_edits(&self) -> bool {
        self.editable
    }
}
