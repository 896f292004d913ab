//! Simulation module
//!
//! All gameplay logic lives here. Nothing in this module touches the DOM,
//! the clock or storage:
//! - Time only advances through the `dt_ms` passed to `tick`
//! - Seeded RNG only (one per session)
//! - Input arrives as queued `Command`s, applied at the start of a step

pub mod autopilot;
pub mod collision;
pub mod difficulty;
pub mod motion;
pub mod spawner;
pub mod state;
pub mod tick;

pub use autopilot::autopilot;
pub use collision::{Rect, first_hit, lane_hit};
pub use difficulty::Difficulty;
pub use state::{
    GameEvent, JumperBody, LaneBody, Obstacle, ObstacleBody, Phase, Player, Session,
};
pub use tick::{Command, CommandQueue, apply_command, tick};
