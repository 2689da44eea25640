//! Grid geometry: resolves pointer positions to cells.

use crate::model::GridModelView;
use kurbo::{Point, Rect};

/// Vertical slot of a hit: the header band or a body row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowSlot {
    Header,
    Body(usize),
}

/// The cell under a point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellHit {
    /// Column index in display order.
    pub column: usize,
    pub row: RowSlot,
    /// Bounds of the cell in grid coordinates.
    pub rect: Rect,
}

/// Cumulative column and row edges computed from a model.
#[derive(Debug, Clone)]
pub struct GridLayout {
    origin: Point,
    header_height: f64,
    /// `columns + 1` x positions.
    column_edges: Vec<f64>,
    /// `rows + 1` y positions, starting below the header.
    row_edges: Vec<f64>,
}

impl GridLayout {
    /// Lay out `model` with its top-left corner at `origin`.
    /// A `header_height` of zero hides the header band.
    pub fn from_model(model: &dyn GridModelView, origin: Point, header_height: f64) -> Self {
        let header_height = header_height.max(0.0);

        let mut column_edges = Vec::with_capacity(model.columns().len() + 1);
        let mut x = origin.x;
        column_edges.push(x);
        for column in model.columns() {
            x += column.width;
            column_edges.push(x);
        }

        let mut row_edges = Vec::with_capacity(model.rows().len() + 1);
        let mut y = origin.y + header_height;
        row_edges.push(y);
        for row in model.rows() {
            y += row.height;
            row_edges.push(y);
        }

        Self {
            origin,
            header_height,
            column_edges,
            row_edges,
        }
    }

    pub fn column_count(&self) -> usize {
        self.column_edges.len() - 1
    }

    pub fn row_count(&self) -> usize {
        self.row_edges.len() - 1
    }

    pub fn has_header(&self) -> bool {
        self.header_height > 0.0
    }

    /// Bounds of the whole grid, header included.
    pub fn bounds(&self) -> Rect {
        let x1 = self.column_edges.last().copied().unwrap_or(self.origin.x);
        let y1 = self.row_edges.last().copied().unwrap_or(self.origin.y);
        Rect::new(self.origin.x, self.origin.y, x1, y1)
    }

    /// Find the cell containing `point`. Right and bottom edges are exclusive.
    pub fn hit_test(&self, point: Point) -> Option<CellHit> {
        let column = find_span(&self.column_edges, point.x)?;
        let x0 = self.column_edges[column];
        let x1 = self.column_edges[column + 1];

        if self.has_header() && point.y >= self.origin.y && point.y < self.row_edges[0] {
            return Some(CellHit {
                column,
                row: RowSlot::Header,
                rect: Rect::new(x0, self.origin.y, x1, self.row_edges[0]),
            });
        }

        let row = find_span(&self.row_edges, point.y)?;
        Some(CellHit {
            column,
            row: RowSlot::Body(row),
            rect: Rect::new(x0, self.row_edges[row], x1, self.row_edges[row + 1]),
        })
    }
}

/// Index `i` such that `edges[i] <= value < edges[i + 1]`.
fn find_span(edges: &[f64], value: f64) -> Option<usize> {
    if edges.len() < 2 {
        return None;
    }
    // First edge strictly greater than `value`.
    let upper = edges.partition_point(|&e| e <= value);
    if upper == 0 || upper >= edges.len() {
        return None;
    }
    Some(upper - 1)
}
