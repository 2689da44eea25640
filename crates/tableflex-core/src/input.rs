//! Input events delivered to the grid, and click arbitration.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Double-click detection defaults.
pub const DOUBLE_CLICK_TIME_MS: u64 = 500;
pub const DOUBLE_CLICK_DISTANCE: f64 = 5.0;

/// An input event in grid coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GridEvent {
    Move { position: Point },
    Down { position: Point },
    Up { position: Point },
    /// Single activation (click) already recognised by the platform.
    PrimaryActivate { position: Point },
    /// Double activation already recognised by the platform.
    SecondaryActivate { position: Point },
    /// Raw click; arbitrated into single or double activation.
    Click { position: Point, timestamp_ms: u64 },
    /// New raw value typed into the active cell's editor.
    Input { value: String },
    /// The surface lost focus or visibility.
    FocusLost,
}

impl GridEvent {
    pub fn position(&self) -> Option<Point> {
        match self {
            GridEvent::Move { position }
            | GridEvent::Down { position }
            | GridEvent::Up { position }
            | GridEvent::PrimaryActivate { position }
            | GridEvent::SecondaryActivate { position }
            | GridEvent::Click { position, .. } => Some(*position),
            GridEvent::Input { .. } | GridEvent::FocusLost => None,
        }
    }
}

/// Kind of activation a click resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    Primary,
    Secondary,
}

/// Tells single clicks from double clicks.
#[derive(Debug, Clone)]
pub struct ClickTracker {
    window_ms: u64,
    max_distance: f64,
    /// Time and position of the last unpaired click.
    last_click: Option<(u64, Point)>,
}

impl Default for ClickTracker {
    fn default() -> Self {
        Self::new(DOUBLE_CLICK_TIME_MS, DOUBLE_CLICK_DISTANCE)
    }
}

impl ClickTracker {
    pub fn new(window_ms: u64, max_distance: f64) -> Self {
        Self {
            window_ms,
            max_distance,
            last_click: None,
        }
    }

    /// Register a click and classify it.
    pub fn register(&mut self, position: Point, timestamp_ms: u64) -> Activation {
        if let Some((last_time, last_pos)) = self.last_click {
            let elapsed = timestamp_ms.saturating_sub(last_time);
            let distance = position.distance(last_pos);
            if timestamp_ms >= last_time && elapsed < self.window_ms && distance < self.max_distance {
                // Reset so a triple click is not another double click.
                self.last_click = None;
                return Activation::Secondary;
            }
        }
        self.last_click = Some((timestamp_ms, position));
        Activation::Primary
    }

    pub fn reset(&mut self) {
        self.last_click = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_click() {
        let mut clicks = ClickTracker::default();
        assert_eq!(clicks.register(Point::new(100.0, 100.0), 1_000), Activation::Primary);
    }

    #[test]
    fn test_double_click_detection() {
        let mut clicks = ClickTracker::default();
        let pos = Point::new(100.0, 100.0);
        assert_eq!(clicks.register(pos, 1_000), Activation::Primary);
        assert_eq!(clicks.register(pos, 1_200), Activation::Secondary);
        // Third click starts a new pair.
        assert_eq!(clicks.register(pos, 1_300), Activation::Primary);
    }

    #[test]
    fn test_double_click_too_slow() {
        let mut clicks = ClickTracker::default();
        let pos = Point::new(100.0, 100.0);
        clicks.register(pos, 1_000);
        assert_eq!(clicks.register(pos, 1_600), Activation::Primary);
        // The slow click becomes the new first click.
        assert_eq!(clicks.register(pos, 1_700), Activation::Secondary);
    }

    #[test]
    fn test_double_click_too_far() {
        let mut clicks = ClickTracker::default();
        clicks.register(Point::new(100.0, 100.0), 1_000);
        assert_eq!(clicks.register(Point::new(200.0, 200.0), 1_100), Activation::Primary);
    }

    #[test]
    fn test_reset() {
        let mut clicks = ClickTracker::default();
        let pos = Point::new(10.0, 10.0);
        clicks.register(pos, 0);
        clicks.reset();
        assert_eq!(clicks.register(pos, 10), Activation::Primary);
    }

    #[test]
    fn test_event_json() {
        let event: GridEvent =
            serde_json::from_str(r#"{ "type": "click", "position": { "x": 1.0, "y": 2.0 }, "timestamp_ms": 5 }"#)
                .unwrap();
        assert_eq!(
            event,
            GridEvent::Click {
                position: Point::new(1.0, 2.0),
                timestamp_ms: 5
            }
        );
        assert_eq!(event.position(), Some(Point::new(1.0, 2.0)));

        let focus: GridEvent = serde_json::from_str(r#"{ "type": "focus_lost" }"#).unwrap();
        assert_eq!(focus, GridEvent::FocusLost);
        assert_eq!(focus.position(), None);
    }
}
