//! Drag-resize state machine.

use crate::border::{Axis, BorderHit, BorderSide};
use crate::model::{ColumnId, GridModelView, RowId};
use kurbo::Point;

/// The column or row a drag resizes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ResizeTarget {
    Column(ColumnId),
    Row(RowId),
}

impl ResizeTarget {
    pub fn axis(&self) -> Axis {
        match self {
            ResizeTarget::Column(_) => Axis::Column,
            ResizeTarget::Row(_) => Axis::Row,
        }
    }
}

/// A resize in progress. Origins are captured once at drag start.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeDrag {
    pub target: ResizeTarget,
    /// Pointer coordinate along the axis when the drag started.
    pub pointer_origin: f64,
    /// Target size when the drag started.
    pub size_origin: f64,
    /// Lower bound for emitted sizes.
    pub min_size: f64,
}

impl ResizeDrag {
    pub fn axis(&self) -> Axis {
        self.target.axis()
    }

    /// Size for a pointer at `coord`, clamped to the minimum.
    pub fn size_at(&self, coord: f64) -> f64 {
        (self.size_origin + (coord - self.pointer_origin)).max(self.min_size)
    }
}

/// State of the drag controller.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Resizing(ResizeDrag),
}

impl DragState {
    pub fn is_resizing(&self) -> bool {
        matches!(self, DragState::Resizing(_))
    }
}

/// A size-change request produced by a drag.
#[derive(Debug, Clone, PartialEq)]
pub struct SizeChange {
    pub target: ResizeTarget,
    pub size: f64,
}

/// Resolve the column or row that owns `border`, with its current size.
///
/// A leading border belongs to the previous sibling, a trailing border to the
/// cell itself.
pub fn resolve_target(model: &dyn GridModelView, border: BorderHit) -> Option<(ResizeTarget, f64)> {
    let index = match border.side {
        BorderSide::Leading => border.index.checked_sub(1)?,
        BorderSide::Trailing => border.index,
    };
    match border.axis {
        Axis::Column => model
            .columns()
            .get(index)
            .map(|c| (ResizeTarget::Column(c.id.clone()), c.width)),
        Axis::Row => model
            .rows()
            .get(index)
            .map(|r| (ResizeTarget::Row(r.id.clone()), r.height)),
    }
}

/// Owns the resize lifecycle: `Idle -> Resizing -> Idle`.
#[derive(Debug, Clone, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_resizing(&self) -> bool {
        self.state.is_resizing()
    }

    /// Handle a pointer-down. Starts a drag when `border` is an eligible
    /// border and no drag is active. Returns whether a drag started.
    pub fn pointer_down(
        &mut self,
        model: &dyn GridModelView,
        border: Option<BorderHit>,
        position: Point,
    ) -> bool {
        if self.is_resizing() {
            return false;
        }
        let Some(border) = border else {
            return false;
        };
        let Some((target, size_origin)) = resolve_target(model, border) else {
            return false;
        };

        let limits = model.limits();
        let min_size = match border.axis {
            Axis::Column => limits.min_width,
            Axis::Row => limits.min_height,
        };
        let drag = ResizeDrag {
            target,
            pointer_origin: border.axis.coord(position),
            size_origin,
            min_size,
        };
        log::debug!(
            "Resize started: {:?} from size {} at {}",
            drag.target,
            drag.size_origin,
            drag.pointer_origin
        );
        self.state = DragState::Resizing(drag);
        true
    }

    /// Handle a pointer-move. While resizing, every move yields a size change.
    pub fn pointer_move(&self, position: Point) -> Option<SizeChange> {
        match &self.state {
            DragState::Idle => None,
            DragState::Resizing(drag) => {
                let size = drag.size_at(drag.axis().coord(position));
                log::trace!("Resize {:?} -> {}", drag.target, size);
                Some(SizeChange {
                    target: drag.target.clone(),
                    size,
                })
            }
        }
    }

    /// Handle a pointer-up anywhere. Returns whether a drag ended.
    pub fn pointer_up(&mut self) -> bool {
        let was_resizing = self.is_resizing();
        if was_resizing {
            log::debug!("Resize finished");
        }
        self.state = DragState::Idle;
        was_resizing
    }

    /// Drop any drag without a pointer-up (focus or visibility loss).
    pub fn abandon(&mut self) -> bool {
        let was_resizing = self.is_resizing();
        if was_resizing {
            log::debug!("Resize abandoned");
        }
        self.state = DragState::Idle;
        was_resizing
    }
}
