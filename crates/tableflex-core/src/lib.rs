//! TableFlex Core Library
//!
//! Headless interaction core for a resizable grid: border detection under the
//! pointer, the drag-resize state machine, and single active-cell selection
//! with inline editing. Rendering belongs to the host.

pub mod border;
pub mod config;
pub mod drag;
pub mod host;
pub mod input;
pub mod interaction;
pub mod layout;
pub mod model;
pub mod selection;

pub use border::{Axis, BorderDetector, BorderHit, BorderProximity, BorderSide, CursorAffordance};
pub use config::{ConfigError, InteractionConfig, ResizeAxes, ResizeZone};
pub use drag::{DragController, DragState, ResizeDrag, ResizeTarget, SizeChange};
pub use host::{GridHost, ModelHost};
pub use input::{Activation, ClickTracker, GridEvent};
pub use interaction::{EventOutcome, GridInteraction, HoverState, InteractionSession};
pub use layout::{CellHit, GridLayout, RowSlot};
pub use model::{
    Cell, CellValue, Column, ColumnId, GridModel, GridModelView, ModelError, RendererHandle, Row,
    RowId, Scalar, SizeLimits, MIN_HEIGHT, MIN_WIDTH,
};
pub use selection::{ActiveCell, EditSession, Selection, SelectionController};
