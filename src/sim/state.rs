//! Session state and core simulation types
//!
//! A [`Session`] owns everything one runner instance needs: the phase, timers,
//! the player, live obstacles and its own seeded RNG.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use super::collision::Rect;
use super::difficulty::Difficulty;
use crate::variant::{LaneConfig, MotionModel, PhysicsConfig, VariantConfig};

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Phase {
    /// Waiting for the first start command
    Start,
    /// Simulation running
    Playing,
    /// Run ended by a collision; waiting for restart
    GameOver,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Start => "start",
            Phase::Playing => "playing",
            Phase::GameOver => "gameOver",
        }
    }
}

/// Side-view player under gravity
#[derive(Debug, Clone, Serialize)]
pub struct JumperBody {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub vel_y: f32,
    pub is_jumping: bool,
    pub can_double_jump: bool,
}

impl JumperBody {
    /// Standing on the ground at the configured x
    pub fn new(config: &PhysicsConfig) -> Self {
        Self {
            pos: Vec2::new(
                config.player_x(),
                config.ground_y() - config.player_height,
            ),
            size: Vec2::new(config.player_width, config.player_height),
            vel_y: 0.0,
            is_jumping: false,
            can_double_jump: false,
        }
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }
}

/// Player confined to discrete lanes
#[derive(Debug, Clone, Serialize)]
pub struct LaneBody {
    pub current_lane: u8,
    pub target_lane: u8,
    /// Progress toward the target lane, in lane widths relative to `current_lane`
    pub lane_offset: f32,
    /// Play time of the last accepted lane change
    #[serde(skip)]
    pub last_move_ms: Option<f64>,
}

impl LaneBody {
    pub fn new(config: &LaneConfig) -> Self {
        let lane = config.start_lane();
        Self {
            current_lane: lane,
            target_lane: lane,
            lane_offset: 0.0,
            last_move_ms: None,
        }
    }
}

/// The player, in whichever motion model the variant uses
#[derive(Debug, Clone, Serialize)]
pub enum Player {
    Jumper(JumperBody),
    Lane(LaneBody),
}

impl Player {
    pub fn new(motion: &MotionModel) -> Self {
        match motion {
            MotionModel::Physics(physics) => Player::Jumper(JumperBody::new(physics)),
            MotionModel::Lanes(lanes) => Player::Lane(LaneBody::new(lanes)),
        }
    }
}

/// Obstacle geometry
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum ObstacleBody {
    /// Axis-aligned box scrolling left
    Block(Rect),
    /// Lane obstacle approaching the viewer, `z` in [0, 1]
    Lane { lane: u8, z: f32 },
}

/// An obstacle entity
#[derive(Debug, Clone, Serialize)]
pub struct Obstacle {
    pub id: u32,
    pub body: ObstacleBody,
}

/// Things that happened during a step, for HUD/audio collaborators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GameEvent {
    Started { run: u32 },
    Jumped,
    DoubleJumped,
    LaneChanged { target: u8 },
    Spawned { count: u32 },
    Crashed { score: u64 },
    NewBest { score: u64 },
}

/// One runner instance
#[derive(Debug, Clone, Serialize)]
pub struct Session {
    /// Base seed; each run derives its RNG from this and the run counter
    pub seed: u64,
    /// Number of runs started so far
    pub run: u32,
    pub phase: Phase,
    /// Play time of the current run (frozen outside `Playing`)
    pub elapsed_ms: f64,
    /// floor(elapsed_ms / 100)
    pub score: u64,
    pub best_score: u64,
    pub difficulty: f32,
    pub scroll_speed: f32,
    pub spawn_interval_ms: f64,
    /// Play time of the last spawn attempt (0 at restart)
    pub last_spawn_ms: f64,
    pub player: Player,
    /// Live obstacles in spawn order
    pub obstacles: Vec<Obstacle>,
    /// Events since the host last drained them
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    #[serde(skip)]
    pub config: VariantConfig,
    #[serde(skip)]
    pub(crate) rng: Pcg32,
    next_id: u32,
}

impl Session {
    /// Create a session in the `Start` phase
    pub fn new(config: VariantConfig, seed: u64, best_score: u64) -> Self {
        let initial = Difficulty::at(0.0, &config.difficulty);
        Self {
            seed,
            run: 0,
            phase: Phase::Start,
            elapsed_ms: 0.0,
            score: 0,
            best_score,
            difficulty: initial.difficulty,
            scroll_speed: initial.scroll_speed,
            spawn_interval_ms: initial.spawn_interval_ms,
            last_spawn_ms: 0.0,
            player: Player::new(&config.motion),
            obstacles: Vec::new(),
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            config,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Begin a new run from `Start` or `GameOver`
    ///
    /// Resets every run-scoped field; the best score survives.
    pub fn restart(&mut self) {
        self.record_best();

        self.run += 1;
        self.rng = Pcg32::seed_from_u64(self.seed.wrapping_add(u64::from(self.run)));
        self.phase = Phase::Playing;
        self.elapsed_ms = 0.0;
        self.score = 0;
        self.apply_difficulty(Difficulty::at(0.0, &self.config.difficulty));
        self.last_spawn_ms = 0.0;
        self.player = Player::new(&self.config.motion);
        self.obstacles.clear();
        self.next_id = 1;

        self.events.push(GameEvent::Started { run: self.run });
        log::info!("Run {} started ({})", self.run, self.config.variant.as_str());
    }

    /// Collision ended the run
    pub fn end_run(&mut self) {
        self.phase = Phase::GameOver;
        self.events.push(GameEvent::Crashed { score: self.score });
        log::info!("Run {} over with score {}", self.run, self.score);
        self.record_best();
    }

    /// Promote the current score to best score if it beats it
    pub fn record_best(&mut self) -> bool {
        if self.score > self.best_score {
            self.best_score = self.score;
            self.events.push(GameEvent::NewBest { score: self.score });
            log::info!("New best score: {}", self.score);
            true
        } else {
            false
        }
    }

    pub(crate) fn apply_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty.difficulty;
        self.scroll_speed = difficulty.scroll_speed;
        self.spawn_interval_ms = difficulty.spawn_interval_ms;
    }

    /// Take all events recorded since the last call
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Lane player, if this is a lane variant
    pub fn lane_body(&self) -> Option<&LaneBody> {
        match &self.player {
            Player::Lane(body) => Some(body),
            Player::Jumper(_) => None,
        }
    }

    /// Jumper player, if this is the physics variant
    pub fn jumper_body(&self) -> Option<&JumperBody> {
        match &self.player {
            Player::Jumper(body) => Some(body),
            Player::Lane(_) => None,
        }
    }
}
