//! Replays recorded events against a grid.

use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tableflex_core::{
    ActiveCell, ConfigError, EventOutcome, GridEvent, GridInteraction, GridModel, InteractionConfig,
    ModelHost,
};
use thiserror::Error;

/// Application errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Invalid session: {0}")]
    Parse(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// A recorded session: configuration, starting grid and input events.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    #[serde(default)]
    pub config: InteractionConfig,
    pub grid: GridModel,
    /// Whether the host takes cell edits.
    #[serde(default)]
    pub editable: bool,
    /// Top-left corner of the grid in event coordinates.
    #[serde(default)]
    pub origin: Option<Point>,
    #[serde(default)]
    pub events: Vec<GridEvent>,
}

impl Session {
    pub fn from_json(json: &str) -> Result<Self, AppError> {
        serde_json::from_str(json).map_err(|e| AppError::Parse(e.to_string()))
    }
}

/// Result of a replay.
#[derive(Debug, Clone)]
pub struct ReplayReport {
    /// Grid after all host updates.
    pub grid: GridModel,
    pub active_cell: Option<ActiveCell>,
    pub events: usize,
    pub size_changes: usize,
    pub edits: usize,
}

/// Replay a session with a [`ModelHost`] applying every request.
pub fn replay(session: Session) -> Result<ReplayReport, AppError> {
    let mut interaction = GridInteraction::new(session.config)?;
    interaction.set_origin(session.origin.unwrap_or(Point::ZERO));

    let mut grid = session.grid;
    grid.normalize();
    let mut host = ModelHost::new(grid).with_editing(session.editable);

    let mut size_changes = 0;
    let mut edits = 0;
    for (i, event) in session.events.iter().enumerate() {
        let outcome = interaction.handle_event(event, &mut host);
        log::debug!("#{} {:?} -> {:?}", i, event, outcome);
        match outcome {
            EventOutcome::Resized(_) => size_changes += 1,
            EventOutcome::Edited => edits += 1,
            _ => {}
        }
    }

    Ok(ReplayReport {
        active_cell: interaction.active_cell().cloned(),
        grid: host.into_grid(),
        events: session.events.len(),
        size_changes,
        edits,
    })
}

/// Load a session file and replay it.
pub fn replay_file(path: &Path) -> Result<ReplayReport, AppError> {
    let json = fs::read_to_string(path)
        .map_err(|e| AppError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
    let session = Session::from_json(&json)?;
    session.config.validate()?;
    replay(session)
}
