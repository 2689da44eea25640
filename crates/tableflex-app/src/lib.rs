//! TableFlex Application
//!
//! Headless shell that replays a recorded interaction session against a grid.

mod replay;

pub use replay::{AppError, ReplayReport, Session, replay, replay_file};
