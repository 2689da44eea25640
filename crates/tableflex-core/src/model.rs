//! Grid model: columns, rows and cell contents.
//!
//! The model is owned by the host application. The interaction core only
//! reads it through [`GridModelView`] and asks for changes through host
//! callbacks.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Default minimum column width.
pub const MIN_WIDTH: f64 = 60.0;
/// Default minimum row height.
pub const MIN_HEIGHT: f64 = 30.0;

/// Model errors.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Unknown column: {0}")]
    UnknownColumn(String),
    #[error("Unknown row: {0}")]
    UnknownRow(String),
    #[error("Duplicate id: {0}")]
    DuplicateId(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type for model operations.
pub type ModelResult<T> = Result<T, ModelError>;

/// Stable key of a column.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnId(pub String);

/// Stable key of a row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowId(pub String);

macro_rules! impl_id {
    ($name:ident) => {
        impl $name {
            /// Generate a fresh unique id.
            pub fn generate() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }
    };
}

impl_id!(ColumnId);
impl_id!(RowId);

/// Minimum sizes enforced on every column and row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SizeLimits {
    pub min_width: f64,
    pub min_height: f64,
}

impl Default for SizeLimits {
    fn default() -> Self {
        Self {
            min_width: MIN_WIDTH,
            min_height: MIN_HEIGHT,
        }
    }
}

impl SizeLimits {
    pub fn clamp_width(&self, width: f64) -> f64 {
        width.max(self.min_width)
    }

    pub fn clamp_height(&self, height: f64) -> f64 {
        height.max(self.min_height)
    }
}

/// A plain cell value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Text(String),
    Number(f64),
}

impl Scalar {
    /// Text shown for this value (and used to seed an edit buffer).
    pub fn display(&self) -> String {
        match self {
            Scalar::Text(s) => s.clone(),
            Scalar::Number(n) => n.to_string(),
        }
    }
}

impl Default for Scalar {
    fn default() -> Self {
        Scalar::Text(String::new())
    }
}

/// Opaque key of a host-provided cell renderer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RendererHandle(pub String);

/// Content of a cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    /// Shown as-is.
    Scalar(Scalar),
    /// Drawn by a host renderer. `fallback` is the underlying value.
    Rendered {
        handle: RendererHandle,
        #[serde(default)]
        fallback: Scalar,
    },
}

impl CellValue {
    pub fn text(s: impl Into<String>) -> Self {
        CellValue::Scalar(Scalar::Text(s.into()))
    }

    pub fn number(n: f64) -> Self {
        CellValue::Scalar(Scalar::Number(n))
    }

    /// The scalar behind this value.
    pub fn scalar(&self) -> &Scalar {
        match self {
            CellValue::Scalar(s) => s,
            CellValue::Rendered { fallback, .. } => fallback,
        }
    }
}

/// A single cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub value: CellValue,
    /// Image cells are never editable.
    #[serde(default)]
    pub is_image: bool,
}

impl Cell {
    pub fn new(value: CellValue) -> Self {
        Self {
            value,
            is_image: false,
        }
    }

    pub fn image(value: CellValue) -> Self {
        Self {
            value,
            is_image: true,
        }
    }

    /// Whether this cell may enter edit mode.
    pub fn is_editable(&self) -> bool {
        !self.is_image
    }

    /// Text to seed the edit buffer with.
    pub fn display(&self) -> String {
        self.value.scalar().display()
    }
}

/// A column of the grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub id: ColumnId,
    #[serde(default)]
    pub header: String,
    pub width: f64,
}

impl Column {
    /// Create a column with a generated id.
    pub fn new(header: impl Into<String>, width: f64) -> Self {
        Self::with_id(ColumnId::generate(), header, width)
    }

    pub fn with_id(id: impl Into<ColumnId>, header: impl Into<String>, width: f64) -> Self {
        Self {
            id: id.into(),
            header: header.into(),
            width,
        }
    }
}

/// A row of the grid along with its cells, keyed by column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub id: RowId,
    pub height: f64,
    #[serde(default)]
    pub cells: HashMap<ColumnId, Cell>,
}

impl Row {
    /// Create a row with a generated id.
    pub fn new(height: f64) -> Self {
        Self::with_id(RowId::generate(), height)
    }

    pub fn with_id(id: impl Into<RowId>, height: f64) -> Self {
        Self {
            id: id.into(),
            height,
            cells: HashMap::new(),
        }
    }

    pub fn cell(&self, column: &ColumnId) -> Option<&Cell> {
        self.cells.get(column)
    }
}

/// Read access to the grid, as consumed by the interaction core.
pub trait GridModelView {
    /// Columns in display order.
    fn columns(&self) -> &[Column];

    /// Rows in display order.
    fn rows(&self) -> &[Row];

    fn limits(&self) -> SizeLimits;

    fn cell(&self, column: &ColumnId, row: &RowId) -> Option<&Cell> {
        self.rows()
            .iter()
            .find(|r| &r.id == row)
            .and_then(|r| r.cell(column))
    }
}

/// Concrete grid model owned by a host.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GridModel {
    #[serde(default)]
    pub limits: SizeLimits,
    #[serde(default)]
    columns: Vec<Column>,
    #[serde(default)]
    rows: Vec<Row>,
}

impl GridModel {
    /// Create an empty model with default limits.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(limits: SizeLimits) -> Self {
        Self {
            limits,
            ..Self::default()
        }
    }

    /// Append a column, clamping its width.
    pub fn push_column(&mut self, mut column: Column) -> ModelResult<()> {
        if self.column(&column.id).is_some() {
            return Err(ModelError::DuplicateId(column.id.0));
        }
        column.width = self.limits.clamp_width(column.width);
        self.columns.push(column);
        Ok(())
    }

    /// Append a row, clamping its height.
    pub fn push_row(&mut self, mut row: Row) -> ModelResult<()> {
        if self.row(&row.id).is_some() {
            return Err(ModelError::DuplicateId(row.id.0));
        }
        row.height = self.limits.clamp_height(row.height);
        self.rows.push(row);
        Ok(())
    }

    pub fn column(&self, id: &ColumnId) -> Option<&Column> {
        self.columns.iter().find(|c| &c.id == id)
    }

    pub fn row(&self, id: &RowId) -> Option<&Row> {
        self.rows.iter().find(|r| &r.id == id)
    }

    /// Display position of a column.
    pub fn column_order(&self, id: &ColumnId) -> Option<usize> {
        self.columns.iter().position(|c| &c.id == id)
    }

    /// Display position of a row.
    pub fn row_order(&self, id: &RowId) -> Option<usize> {
        self.rows.iter().position(|r| &r.id == id)
    }

    /// Set a column width. Values below the minimum are clamped.
    /// Returns the width actually stored.
    pub fn set_column_width(&mut self, id: &ColumnId, width: f64) -> ModelResult<f64> {
        let limits = self.limits;
        let column = self
            .columns
            .iter_mut()
            .find(|c| &c.id == id)
            .ok_or_else(|| ModelError::UnknownColumn(id.0.clone()))?;
        column.width = limits.clamp_width(width);
        Ok(column.width)
    }

    /// Set a row height. Values below the minimum are clamped.
    /// Returns the height actually stored.
    pub fn set_row_height(&mut self, id: &RowId, height: f64) -> ModelResult<f64> {
        let limits = self.limits;
        let row = self
            .rows
            .iter_mut()
            .find(|r| &r.id == id)
            .ok_or_else(|| ModelError::UnknownRow(id.0.clone()))?;
        row.height = limits.clamp_height(height);
        Ok(row.height)
    }

    /// Put a cell at `(column, row)`, replacing any previous one.
    pub fn set_cell(&mut self, column: &ColumnId, row: &RowId, cell: Cell) -> ModelResult<()> {
        if self.column(column).is_none() {
            return Err(ModelError::UnknownColumn(column.0.clone()));
        }
        let row = self
            .rows
            .iter_mut()
            .find(|r| &r.id == row)
            .ok_or_else(|| ModelError::UnknownRow(row.0.clone()))?;
        row.cells.insert(column.clone(), cell);
        Ok(())
    }

    /// Replace the text of a cell, keeping its renderer and image flag.
    /// A missing cell is created.
    pub fn set_cell_text(&mut self, column: &ColumnId, row: &RowId, text: &str) -> ModelResult<()> {
        if self.column(column).is_none() {
            return Err(ModelError::UnknownColumn(column.0.clone()));
        }
        let row = self
            .rows
            .iter_mut()
            .find(|r| &r.id == row)
            .ok_or_else(|| ModelError::UnknownRow(row.0.clone()))?;
        let scalar = Scalar::Text(text.to_string());
        match row.cells.get_mut(column) {
            Some(cell) => match &mut cell.value {
                CellValue::Scalar(s) => *s = scalar,
                CellValue::Rendered { fallback, .. } => *fallback = scalar,
            },
            None => {
                row.cells.insert(column.clone(), Cell::new(CellValue::Scalar(scalar)));
            }
        }
        Ok(())
    }

    /// Re-apply the size limits to every column and row.
    pub fn normalize(&mut self) {
        let limits = self.limits;
        for column in &mut self.columns {
            column.width = limits.clamp_width(column.width);
        }
        for row in &mut self.rows {
            row.height = limits.clamp_height(row.height);
        }
    }

    /// Parse a model from JSON. Sizes below the limits are clamped.
    pub fn from_json(json: &str) -> ModelResult<Self> {
        let mut model: Self =
            serde_json::from_str(json).map_err(|e| ModelError::Serialization(e.to_string()))?;
        model.normalize();
        Ok(model)
    }

    /// Serialize the model to JSON.
    pub fn to_json(&self) -> ModelResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| ModelError::Serialization(e.to_string()))
    }
}

impl GridModelView for GridModel {
    fn columns(&self) -> &[Column] {
        &self.columns
    }

    fn rows(&self) -> &[Row] {
        &self.rows
    }

    fn limits(&self) -> SizeLimits {
        self.limits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> GridModel {
        let mut model = GridModel::new();
        model.push_column(Column::with_id("c0", "A", 50.0)).unwrap();
        model.push_column(Column::with_id("c1", "B", 150.0)).unwrap();
        model.push_row(Row::with_id("r0", 40.0)).unwrap();
        model
    }

    #[test]
    fn test_push_column_clamps_width() {
        let model = sample();
        let c0 = model.column(&ColumnId::from("c0")).unwrap();
        assert!((c0.width - MIN_WIDTH).abs() < f64::EPSILON);
    }

    #[test]
    fn test_duplicate_column_rejected() {
        let mut model = sample();
        let result = model.push_column(Column::with_id("c1", "dup", 100.0));
        assert!(matches!(result, Err(ModelError::DuplicateId(_))));
    }

    #[test]
    fn test_set_column_width_clamps() {
        let mut model = sample();
        let stored = model.set_column_width(&ColumnId::from("c1"), 10.0).unwrap();
        assert!((stored - MIN_WIDTH).abs() < f64::EPSILON);
        let c1 = model.column(&ColumnId::from("c1")).unwrap();
        assert!((c1.width - MIN_WIDTH).abs() < f64::EPSILON);
    }

    #[test]
    fn test_set_row_height_unknown() {
        let mut model = sample();
        let result = model.set_row_height(&RowId::from("missing"), 80.0);
        assert!(matches!(result, Err(ModelError::UnknownRow(_))));
    }

    #[test]
    fn test_order() {
        let model = sample();
        assert_eq!(model.column_order(&ColumnId::from("c1")), Some(1));
        assert_eq!(model.row_order(&RowId::from("r0")), Some(0));
        assert_eq!(model.column_order(&ColumnId::from("nope")), None);
    }

    #[test]
    fn test_image_cell_not_editable() {
        let cell = Cell::image(CellValue::text("logo.png"));
        assert!(!cell.is_editable());
        let rendered = Cell::new(CellValue::Rendered {
            handle: RendererHandle("badge".to_string()),
            fallback: Scalar::Number(3.0),
        });
        assert!(rendered.is_editable());
        assert_eq!(rendered.display(), "3");
    }

    #[test]
    fn test_set_cell_text_keeps_renderer() {
        let mut model = sample();
        let c1 = ColumnId::from("c1");
        let r0 = RowId::from("r0");
        model
            .set_cell(
                &c1,
                &r0,
                Cell::new(CellValue::Rendered {
                    handle: RendererHandle("badge".to_string()),
                    fallback: Scalar::Text("old".to_string()),
                }),
            )
            .unwrap();
        model.set_cell_text(&c1, &r0, "new").unwrap();

        let cell = model.cell(&c1, &r0).unwrap();
        assert!(matches!(cell.value, CellValue::Rendered { .. }));
        assert_eq!(cell.display(), "new");
    }

    #[test]
    fn test_from_json_normalizes() {
        let json = r#"{
            "columns": [{ "id": "0", "header": "Header", "width": 50 }],
            "rows": [{ "id": "1", "height": 10, "cells": { "0": { "value": "Text" } } }]
        }"#;
        let model = GridModel::from_json(json).unwrap();
        assert!((model.columns()[0].width - MIN_WIDTH).abs() < f64::EPSILON);
        assert!((model.rows()[0].height - MIN_HEIGHT).abs() < f64::EPSILON);

        let cell = model.cell(&ColumnId::from("0"), &RowId::from("1")).unwrap();
        assert_eq!(cell.value, CellValue::text("Text"));
        assert!(!cell.is_image);
    }

    #[test]
    fn test_json_round_trip() {
        let mut model = sample();
        model
            .set_cell(&ColumnId::from("c0"), &RowId::from("r0"), Cell::new(CellValue::number(7.5)))
            .unwrap();
        let json = model.to_json().unwrap();
        let loaded = GridModel::from_json(&json).unwrap();
        assert_eq!(loaded, model);
    }

    #[test]
    fn test_generated_ids_unique() {
        let a = Column::new("A", 100.0);
        let b = Column::new("B", 100.0);
        assert_ne!(a.id, b.id);
    }
}
