//! Border proximity detection.
//!
//! Decides whether a pointer is close enough to a cell border to start a
//! resize, and which border it is.

use kurbo::Rect;
use serde::{Deserialize, Serialize};

/// Default distance from a border that still counts as "near".
pub const DEFAULT_CARET_OFFSET: f64 = 10.0;

/// Resize direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    /// Column width (horizontal).
    Column,
    /// Row height (vertical).
    Row,
}

impl Axis {
    /// Coordinate of a point along this axis.
    pub fn coord(self, point: kurbo::Point) -> f64 {
        match self {
            Axis::Column => point.x,
            Axis::Row => point.y,
        }
    }

    /// Leading and trailing edges of `rect` along this axis.
    pub fn span(self, rect: Rect) -> (f64, f64) {
        match self {
            Axis::Column => (rect.x0, rect.x1),
            Axis::Row => (rect.y0, rect.y1),
        }
    }
}

/// Which border of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BorderSide {
    /// Left or top.
    Leading,
    /// Right or bottom.
    Trailing,
}

/// Result of a proximity test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BorderProximity {
    #[default]
    None,
    Near(BorderSide),
}

impl BorderProximity {
    pub fn side(self) -> Option<BorderSide> {
        match self {
            BorderProximity::None => None,
            BorderProximity::Near(side) => Some(side),
        }
    }
}

/// An eligible border of the cell at `index` along `axis`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BorderHit {
    pub axis: Axis,
    pub index: usize,
    pub side: BorderSide,
}

/// Cursor shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CursorAffordance {
    #[default]
    None,
    ColumnResize,
    RowResize,
}

impl CursorAffordance {
    pub fn for_axis(axis: Axis) -> Self {
        match axis {
            Axis::Column => CursorAffordance::ColumnResize,
            Axis::Row => CursorAffordance::RowResize,
        }
    }
}

/// Border hit tester with a fixed threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BorderDetector {
    threshold: f64,
}

impl Default for BorderDetector {
    fn default() -> Self {
        Self::new(DEFAULT_CARET_OFFSET)
    }
}

impl BorderDetector {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Test `coord` against the borders of `rect` along `axis`.
    ///
    /// `index` and `count` place the cell in its sequence: the leading border
    /// of the first cell and the trailing border of the last cell have no
    /// neighbour and are never reported. When both borders are near, the
    /// trailing one wins.
    pub fn detect(
        &self,
        coord: f64,
        rect: Rect,
        axis: Axis,
        index: usize,
        count: usize,
    ) -> BorderProximity {
        let (leading, trailing) = axis.span(rect);
        let leading_gap = coord - leading;
        let trailing_gap = trailing - coord;

        let near_leading = index > 0 && leading_gap < self.threshold;
        let near_trailing = index + 1 < count && trailing_gap < self.threshold;

        if near_trailing {
            BorderProximity::Near(BorderSide::Trailing)
        } else if near_leading {
            BorderProximity::Near(BorderSide::Leading)
        } else {
            BorderProximity::None
        }
    }

    /// Like [`detect`](Self::detect) but returns the full hit.
    pub fn hit(
        &self,
        coord: f64,
        rect: Rect,
        axis: Axis,
        index: usize,
        count: usize,
    ) -> Option<BorderHit> {
        self.detect(coord, rect, axis, index, count)
            .side()
            .map(|side| BorderHit { axis, index, side })
    }
}
