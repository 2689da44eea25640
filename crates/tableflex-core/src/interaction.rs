//! Event routing between the input stream, the controllers and the host.

use crate::border::{Axis, BorderDetector, BorderHit, CursorAffordance};
use crate::config::{ConfigResult, InteractionConfig, ResizeZone};
use crate::drag::{DragController, DragState, ResizeTarget, SizeChange};
use crate::host::GridHost;
use crate::input::{Activation, ClickTracker, GridEvent};
use crate::layout::{GridLayout, RowSlot};
use crate::model::GridModelView;
use crate::selection::{ActiveCell, Selection, SelectionController};
use kurbo::Point;
use std::ops::{Deref, DerefMut};

/// Border under the pointer, recomputed on every move.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HoverState {
    pub border: Option<BorderHit>,
    pub cursor: CursorAffordance,
}

/// What an event did.
#[derive(Debug, Clone, PartialEq)]
pub enum EventOutcome {
    Ignored,
    Hovered(CursorAffordance),
    ResizeStarted(ResizeTarget),
    Resized(SizeChange),
    ResizeEnded,
    ResizeAbandoned,
    Selected(ActiveCell),
    EditStarted(ActiveCell),
    Edited,
}

/// Interaction core of one grid.
///
/// Feeds events to the border detector, drag controller and selection
/// controller, and reports results through a [`GridHost`]. Controller state is
/// updated before any host callback runs.
#[derive(Debug, Clone)]
pub struct GridInteraction {
    config: InteractionConfig,
    detector: BorderDetector,
    drag: DragController,
    selection: SelectionController,
    clicks: ClickTracker,
    hover: HoverState,
    origin: Point,
    enabled: bool,
    /// The last pointer-down started a resize; the click it produces is not an activation.
    down_started_resize: bool,
}

impl Default for GridInteraction {
    fn default() -> Self {
        Self::build(InteractionConfig::default())
    }
}

impl GridInteraction {
    /// Create an interaction core from a validated configuration.
    pub fn new(config: InteractionConfig) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: InteractionConfig) -> Self {
        Self {
            detector: BorderDetector::new(config.caret_offset),
            drag: DragController::new(),
            selection: SelectionController::new(),
            clicks: ClickTracker::new(config.double_click_ms, config.double_click_distance),
            hover: HoverState::default(),
            origin: Point::ZERO,
            enabled: config.enabled,
            down_started_resize: false,
            config,
        }
    }

    pub fn config(&self) -> &InteractionConfig {
        &self.config
    }

    /// Top-left corner of the grid in event coordinates.
    pub fn set_origin(&mut self, origin: Point) {
        self.origin = origin;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Turn interaction on or off. Turning it off resets drag, hover and
    /// selection; events are ignored until it is turned back on.
    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled == enabled {
            return;
        }
        log::debug!("Grid interaction {}", if enabled { "enabled" } else { "disabled" });
        self.enabled = enabled;
        if !enabled {
            self.reset();
        }
    }

    /// Enable interaction for the lifetime of the returned guard.
    /// Dropping the guard disables interaction and resets all state.
    pub fn session(&mut self) -> InteractionSession<'_> {
        self.set_enabled(true);
        InteractionSession { interaction: self }
    }

    pub fn drag_state(&self) -> &DragState {
        self.drag.state()
    }

    pub fn selection(&self) -> &Selection {
        self.selection.selection()
    }

    pub fn active_cell(&self) -> Option<&ActiveCell> {
        self.selection.active()
    }

    pub fn edit_buffer(&self) -> Option<&str> {
        self.selection.edit_buffer()
    }

    pub fn hover(&self) -> &HoverState {
        &self.hover
    }

    /// Cursor to display. A running drag keeps its resize cursor.
    pub fn cursor(&self) -> CursorAffordance {
        match self.drag.state() {
            DragState::Resizing(drag) => CursorAffordance::for_axis(drag.axis()),
            DragState::Idle => self.hover.cursor,
        }
    }

    /// Replace or clear the active cell from the host side.
    /// The host is told through [`GridHost::on_active_cell_synced`].
    pub fn sync_active(&mut self, cell: Option<ActiveCell>, host: &mut dyn GridHost) {
        self.selection.sync_active(cell);
        host.on_active_cell_synced(self.selection.active());
    }

    /// Route one event.
    pub fn handle_event(&mut self, event: &GridEvent, host: &mut dyn GridHost) -> EventOutcome {
        if !self.enabled {
            return EventOutcome::Ignored;
        }

        match event {
            GridEvent::Move { position } => self.pointer_move(*position, host),
            GridEvent::Down { position } => self.pointer_down(*position, host),
            GridEvent::Up { .. } => {
                if self.drag.pointer_up() {
                    EventOutcome::ResizeEnded
                } else {
                    EventOutcome::Ignored
                }
            }
            GridEvent::PrimaryActivate { position } => {
                self.activate(*position, Activation::Primary, host)
            }
            GridEvent::SecondaryActivate { position } => {
                self.activate(*position, Activation::Secondary, host)
            }
            GridEvent::Click {
                position,
                timestamp_ms,
            } => {
                // The click ending a drag must not pair with the next one.
                if self.drag.is_resizing() || std::mem::take(&mut self.down_started_resize) {
                    self.clicks.reset();
                    return EventOutcome::Ignored;
                }
                let activation = self.clicks.register(*position, *timestamp_ms);
                self.activate(*position, activation, host)
            }
            GridEvent::Input { value } => {
                if self.selection.input(value, host) {
                    EventOutcome::Edited
                } else {
                    EventOutcome::Ignored
                }
            }
            GridEvent::FocusLost => {
                self.hover = HoverState::default();
                self.clicks.reset();
                if self.drag.abandon() {
                    EventOutcome::ResizeAbandoned
                } else {
                    EventOutcome::Ignored
                }
            }
        }
    }

    fn layout(&self, model: &dyn GridModelView) -> GridLayout {
        GridLayout::from_model(model, self.origin, self.config.header_height)
    }

    /// Eligible border under `position`. Columns are checked before rows.
    fn find_border(&self, layout: &GridLayout, position: Point) -> Option<BorderHit> {
        let hit = layout.hit_test(position)?;

        let zone_allows = match (self.config.column_zone, hit.row) {
            (ResizeZone::Anywhere, _) => true,
            (ResizeZone::Header, slot) => slot == RowSlot::Header,
            (ResizeZone::Body, slot) => slot != RowSlot::Header,
        };
        if self.config.axes.columns && zone_allows {
            let border = self.detector.hit(
                Axis::Column.coord(position),
                hit.rect,
                Axis::Column,
                hit.column,
                layout.column_count(),
            );
            if border.is_some() {
                return border;
            }
        }

        if let (true, RowSlot::Body(row)) = (self.config.axes.rows, hit.row) {
            return self.detector.hit(
                Axis::Row.coord(position),
                hit.rect,
                Axis::Row,
                row,
                layout.row_count(),
            );
        }
        None
    }

    fn pointer_move(&mut self, position: Point, host: &mut dyn GridHost) -> EventOutcome {
        let layout = self.layout(host.model());
        let border = self.find_border(&layout, position);
        self.hover = HoverState {
            border,
            cursor: border
                .map(|b| CursorAffordance::for_axis(b.axis))
                .unwrap_or_default(),
        };

        match self.drag.pointer_move(position) {
            Some(change) => {
                match &change.target {
                    ResizeTarget::Column(id) => host.on_column_width_change(id, change.size),
                    ResizeTarget::Row(id) => host.on_row_height_change(id, change.size),
                }
                EventOutcome::Resized(change)
            }
            None => EventOutcome::Hovered(self.hover.cursor),
        }
    }

    fn pointer_down(&mut self, position: Point, host: &mut dyn GridHost) -> EventOutcome {
        if self.drag.is_resizing() {
            return EventOutcome::Ignored;
        }
        let model = host.model();
        let border = self.find_border(&self.layout(model), position);
        self.down_started_resize = self.drag.pointer_down(model, border, position);

        match self.drag.state() {
            DragState::Resizing(drag) if self.down_started_resize => {
                EventOutcome::ResizeStarted(drag.target.clone())
            }
            _ => EventOutcome::Ignored,
        }
    }

    fn activate(&mut self, position: Point, activation: Activation, host: &mut dyn GridHost) -> EventOutcome {
        if self.drag.is_resizing() || std::mem::take(&mut self.down_started_resize) {
            return EventOutcome::Ignored;
        }
        let Some(cell) = self.cell_at(host.model(), position) else {
            return EventOutcome::Ignored;
        };

        match activation {
            Activation::Primary => {
                self.selection.primary_activate(cell.clone(), host);
                EventOutcome::Selected(cell)
            }
            Activation::Secondary => {
                if self.selection.secondary_activate(cell.clone(), host) {
                    EventOutcome::EditStarted(cell)
                } else {
                    EventOutcome::Selected(cell)
                }
            }
        }
    }

    /// Body cell under `position`. Header cells are not selectable.
    fn cell_at(&self, model: &dyn GridModelView, position: Point) -> Option<ActiveCell> {
        let hit = self.layout(model).hit_test(position)?;
        let RowSlot::Body(row) = hit.row else {
            return None;
        };
        let column = model.columns().get(hit.column)?;
        let row = model.rows().get(row)?;
        Some(ActiveCell::new(column.id.clone(), row.id.clone()))
    }

    fn reset(&mut self) {
        self.drag.abandon();
        self.selection.clear();
        self.clicks.reset();
        self.hover = HoverState::default();
        self.down_started_resize = false;
    }
}

/// Scoped enablement of a [`GridInteraction`].
///
/// Interaction is enabled while the session lives; dropping it disables
/// interaction and resets drag, hover and selection on every exit path.
pub struct InteractionSession<'a> {
    interaction: &'a mut GridInteraction,
}

impl Deref for InteractionSession<'_> {
    type Target = GridInteraction;

    fn deref(&self) -> &GridInteraction {
        self.interaction
    }
}

impl DerefMut for InteractionSession<'_> {
    fn deref_mut(&mut self) -> &mut GridInteraction {
        self.interaction
    }
}

impl Drop for InteractionSession<'_> {
    fn drop(&mut self) {
        self.interaction.enabled = false;
        self.interaction.reset();
        log::debug!("Grid interaction session closed");
    }
}
