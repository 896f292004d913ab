//! Infinite Runner - endless runner simulation core
//!
//! Core modules:
//! - `sim`: Simulation (state machine, difficulty, motion, spawning, collisions)
//! - `variant`: Per-variant tuning (side-view jumper, perspective lanes, top-down lanes)
//! - `input`: Pointer/touch/keyboard gesture mapping to simulation commands
//! - `runner`: Frame driver that owns a session and feeds it commands
//! - `best_score`: Persisted best score (LocalStorage on web)
//! - `share`: Share text for the current score

pub mod best_score;
pub mod error;
pub mod input;
pub mod runner;
pub mod share;
pub mod sim;
pub mod variant;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use best_score::{BestScore, MemoryStore, ScoreStore};
pub use error::ConfigError;
pub use runner::Runner;
pub use variant::{TimestepMode, Variant, VariantConfig};

/// Game configuration constants
pub mod consts {
    /// Reference frame length (ms). Motion constants are expressed per 60 Hz frame.
    pub const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Fixed simulation step used by `TimestepMode::Fixed`
    pub const SIM_DT_MS: f64 = FRAME_MS;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Largest frame delta fed to the simulation (tab switches, debugger pauses)
    pub const MAX_FRAME_DT_MS: f64 = 100.0;

    /// Score ticks once per this many milliseconds of play
    pub const MS_PER_POINT: f64 = 100.0;
    /// Difficulty level increases once per this many milliseconds of play
    pub const DIFFICULTY_STEP_MS: f64 = 10_000.0;

    /// Pending commands held between frames
    pub const COMMAND_QUEUE_CAPACITY: usize = 16;

    /// Side-view jumper defaults (pixels, per reference frame)
    pub const WORLD_WIDTH: f32 = 800.0;
    pub const WORLD_HEIGHT: f32 = 600.0;
    pub const GROUND_HEIGHT: f32 = 60.0;
    pub const PLAYER_WIDTH: f32 = 30.0;
    pub const PLAYER_HEIGHT: f32 = 40.0;
    pub const PLAYER_X_FRACTION: f32 = 0.15;
    pub const OBSTACLE_WIDTH: f32 = 25.0;
    pub const OBSTACLE_HEIGHT: f32 = 50.0;
    pub const GRAVITY: f32 = 0.6;
    pub const JUMP_STRENGTH: f32 = -12.0;
    pub const DOUBLE_JUMP_FACTOR: f32 = 0.9;
    pub const MAX_FALL_SPEED: f32 = 15.0;
    pub const INITIAL_OBSTACLE_SPEED: f32 = 6.0;

    /// Lane variant defaults
    pub const LANE_COUNT: u8 = 3;
    pub const LANE_SNAP_EPSILON: f32 = 0.01;
    pub const PLAYER_DEPTH: f32 = 0.75;
    pub const DEPTH_HIT_THRESHOLD: f32 = 0.08;
    pub const LANE_OFFSET_HIT_THRESHOLD: f32 = 0.3;

    /// Input timing defaults
    pub const DOUBLE_TAP_WINDOW_MS: f64 = 300.0;
    pub const MOVE_COOLDOWN_MS: f64 = 200.0;
}

/// Scale factor converting a frame delta into reference frames
#[inline]
pub fn frame_scale(dt_ms: f64) -> f32 {
    (dt_ms / consts::FRAME_MS) as f32
}
