//! Per-variant tuning
//!
//! The three runner variants share one simulation; everything that differs
//! between them (motion model, lane count, difficulty and spawn constants,
//! input timing windows) lives in a [`VariantConfig`].

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Which runner is being played
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Variant {
    /// Side view, player jumps over obstacles scrolling in from the right
    #[default]
    SideJumper,
    /// Pseudo-3D lanes, obstacles approach from the horizon
    PerspectiveLanes,
    /// Top-down lanes, obstacles fall from the top edge
    TopDownLanes,
}

impl Variant {
    pub const ALL: [Variant; 3] = [
        Variant::SideJumper,
        Variant::PerspectiveLanes,
        Variant::TopDownLanes,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::SideJumper => "side-jumper",
            Variant::PerspectiveLanes => "perspective-lanes",
            Variant::TopDownLanes => "top-down-lanes",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "side-jumper" | "jumper" | "side" => Some(Variant::SideJumper),
            "perspective-lanes" | "perspective" | "3d" => Some(Variant::PerspectiveLanes),
            "top-down-lanes" | "top-down" | "topdown" | "dodger" => Some(Variant::TopDownLanes),
            _ => None,
        }
    }

    /// Default tuning for this variant
    pub fn config(&self) -> VariantConfig {
        match self {
            Variant::SideJumper => VariantConfig::side_jumper(),
            Variant::PerspectiveLanes => VariantConfig::perspective_lanes(),
            Variant::TopDownLanes => VariantConfig::top_down_lanes(),
        }
    }
}

/// How measured frame time is turned into simulation steps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TimestepMode {
    /// One step per frame, sized by the measured frame delta
    #[default]
    Variable,
    /// Accumulate frame time and advance in `SIM_DT_MS` substeps
    Fixed,
}

/// Vertical-physics player and world geometry (pixels, per reference frame)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhysicsConfig {
    pub world_width: f32,
    pub world_height: f32,
    pub ground_height: f32,
    pub player_width: f32,
    pub player_height: f32,
    /// Player x as a fraction of world width
    pub player_x_fraction: f32,
    pub gravity: f32,
    /// Upward impulse (negative is up)
    pub jump_strength: f32,
    /// Double jump impulse as a fraction of `jump_strength`
    pub double_jump_factor: f32,
    pub max_fall_speed: f32,
    pub obstacle_width: f32,
    pub obstacle_min_height: f32,
    pub obstacle_max_height: f32,
}

impl PhysicsConfig {
    /// Y coordinate of the ground surface
    #[inline]
    pub fn ground_y(&self) -> f32 {
        self.world_height - self.ground_height
    }

    #[inline]
    pub fn player_x(&self) -> f32 {
        self.world_width * self.player_x_fraction
    }
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            world_width: WORLD_WIDTH,
            world_height: WORLD_HEIGHT,
            ground_height: GROUND_HEIGHT,
            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            player_x_fraction: PLAYER_X_FRACTION,
            gravity: GRAVITY,
            jump_strength: JUMP_STRENGTH,
            double_jump_factor: DOUBLE_JUMP_FACTOR,
            max_fall_speed: MAX_FALL_SPEED,
            obstacle_width: OBSTACLE_WIDTH,
            obstacle_min_height: OBSTACLE_HEIGHT,
            obstacle_max_height: OBSTACLE_HEIGHT,
        }
    }
}

/// Discrete-lane player and depth geometry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaneConfig {
    pub lane_count: u8,
    /// Fraction of the remaining lane gap closed per reference frame
    pub damping: f32,
    /// Gap (in lane widths) under which the player snaps onto the target lane
    pub snap_epsilon: f32,
    /// Fixed depth of the player along the track
    pub player_depth: f32,
    /// Max |obstacle z - player depth| counted as a hit
    pub depth_threshold: f32,
    /// Max |lane offset| at which the player can still be hit in its current lane
    pub offset_threshold: f32,
    /// Extra scroll per unit of depth (0 = uniform scroll)
    pub depth_acceleration: f32,
}

impl LaneConfig {
    #[inline]
    pub fn max_lane(&self) -> u8 {
        self.lane_count.saturating_sub(1)
    }

    /// Lane the player starts in (middle, rounding down)
    #[inline]
    pub fn start_lane(&self) -> u8 {
        self.max_lane() / 2
    }
}

impl Default for LaneConfig {
    fn default() -> Self {
        Self {
            lane_count: LANE_COUNT,
            damping: 0.15,
            snap_epsilon: LANE_SNAP_EPSILON,
            player_depth: PLAYER_DEPTH,
            depth_threshold: DEPTH_HIT_THRESHOLD,
            offset_threshold: LANE_OFFSET_HIT_THRESHOLD,
            depth_acceleration: 0.0,
        }
    }
}

/// Player motion model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum MotionModel {
    Physics(PhysicsConfig),
    Lanes(LaneConfig),
}

/// Difficulty curve constants
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DifficultyConfig {
    /// Scroll speed at difficulty 1 (px/frame for physics, z/frame for lanes)
    pub base_speed: f32,
    /// Play time per difficulty level
    pub step_ms: f64,
    /// Difficulty added per level
    pub per_level: f64,
    pub max_interval_ms: f64,
    pub min_interval_ms: f64,
    /// Spawn interval reduction per unit of difficulty above 1
    pub reduction_per_difficulty_ms: f64,
    /// Upper bound on the total spawn interval reduction
    pub reduction_cap_ms: f64,
}

impl Default for DifficultyConfig {
    fn default() -> Self {
        Self {
            base_speed: INITIAL_OBSTACLE_SPEED,
            step_ms: DIFFICULTY_STEP_MS,
            per_level: 0.15,
            max_interval_ms: 2500.0,
            min_interval_ms: 1200.0,
            reduction_per_difficulty_ms: 300.0,
            reduction_cap_ms: 1200.0,
        }
    }
}

/// Obstacle generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnConfig {
    /// Chance of a second obstacle in another lane on the same tick
    pub pair_chance: f64,
}

/// Full tuning for one variant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariantConfig {
    pub variant: Variant,
    pub motion: MotionModel,
    pub difficulty: DifficultyConfig,
    pub spawn: SpawnConfig,
    /// Two jump presses closer than this become a double jump
    pub double_tap_window_ms: f64,
    /// Minimum play time between accepted lane changes
    pub move_cooldown_ms: f64,
    #[serde(default)]
    pub timestep: TimestepMode,
}

impl Default for VariantConfig {
    fn default() -> Self {
        Self::side_jumper()
    }
}

impl VariantConfig {
    pub fn side_jumper() -> Self {
        Self {
            variant: Variant::SideJumper,
            motion: MotionModel::Physics(PhysicsConfig::default()),
            difficulty: DifficultyConfig::default(),
            spawn: SpawnConfig { pair_chance: 0.0 },
            double_tap_window_ms: DOUBLE_TAP_WINDOW_MS,
            move_cooldown_ms: MOVE_COOLDOWN_MS,
            timestep: TimestepMode::Variable,
        }
    }

    pub fn perspective_lanes() -> Self {
        Self {
            variant: Variant::PerspectiveLanes,
            motion: MotionModel::Lanes(LaneConfig {
                damping: 0.15,
                depth_acceleration: 1.5,
                ..LaneConfig::default()
            }),
            difficulty: DifficultyConfig {
                base_speed: 0.006,
                per_level: 0.1,
                max_interval_ms: 1500.0,
                min_interval_ms: 600.0,
                reduction_per_difficulty_ms: 1000.0,
                reduction_cap_ms: 900.0,
                ..DifficultyConfig::default()
            },
            spawn: SpawnConfig { pair_chance: 0.3 },
            double_tap_window_ms: DOUBLE_TAP_WINDOW_MS,
            move_cooldown_ms: MOVE_COOLDOWN_MS,
            timestep: TimestepMode::Variable,
        }
    }

    pub fn top_down_lanes() -> Self {
        Self {
            variant: Variant::TopDownLanes,
            motion: MotionModel::Lanes(LaneConfig {
                damping: 0.2,
                player_depth: 0.85,
                depth_threshold: 0.06,
                depth_acceleration: 0.0,
                ..LaneConfig::default()
            }),
            difficulty: DifficultyConfig {
                base_speed: 0.01,
                per_level: 0.1,
                max_interval_ms: 1200.0,
                min_interval_ms: 500.0,
                reduction_per_difficulty_ms: 1000.0,
                reduction_cap_ms: 700.0,
                ..DifficultyConfig::default()
            },
            spawn: SpawnConfig { pair_chance: 0.3 },
            double_tap_window_ms: DOUBLE_TAP_WINDOW_MS,
            move_cooldown_ms: MOVE_COOLDOWN_MS,
            timestep: TimestepMode::Variable,
        }
    }

    /// Lane settings, if this variant uses the lane motion model
    pub fn lanes(&self) -> Option<&LaneConfig> {
        match &self.motion {
            MotionModel::Lanes(lanes) => Some(lanes),
            MotionModel::Physics(_) => None,
        }
    }

    /// Physics settings, if this variant uses the vertical-physics model
    pub fn physics(&self) -> Option<&PhysicsConfig> {
        match &self.motion {
            MotionModel::Physics(physics) => Some(physics),
            MotionModel::Lanes(_) => None,
        }
    }

    /// Parse and validate a JSON configuration
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check the invariants the simulation relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        let d = &self.difficulty;
        if d.min_interval_ms > d.max_interval_ms {
            return Err(ConfigError::IntervalRange {
                min_ms: d.min_interval_ms,
                max_ms: d.max_interval_ms,
            });
        }
        if d.base_speed <= 0.0 {
            return Err(ConfigError::NonPositive("base_speed"));
        }
        if d.step_ms <= 0.0 {
            return Err(ConfigError::NonPositive("step_ms"));
        }
        if !(0.0..=1.0).contains(&self.spawn.pair_chance) {
            return Err(ConfigError::OutOfRange {
                field: "pair_chance",
                value: self.spawn.pair_chance as f32,
            });
        }

        match &self.motion {
            MotionModel::Lanes(lanes) => {
                if lanes.lane_count == 0 {
                    return Err(ConfigError::NoLanes);
                }
                if !(lanes.damping > 0.0 && lanes.damping <= 1.0) {
                    return Err(ConfigError::OutOfRange {
                        field: "damping",
                        value: lanes.damping,
                    });
                }
                if lanes.snap_epsilon <= 0.0 {
                    return Err(ConfigError::NonPositive("snap_epsilon"));
                }
                if !(0.0..=1.0).contains(&lanes.player_depth) {
                    return Err(ConfigError::OutOfRange {
                        field: "player_depth",
                        value: lanes.player_depth,
                    });
                }
            }
            MotionModel::Physics(physics) => {
                if physics.world_width <= 0.0 || physics.world_height <= 0.0 {
                    return Err(ConfigError::NonPositive("world size"));
                }
                if physics.obstacle_width <= 0.0 || physics.obstacle_min_height <= 0.0 {
                    return Err(ConfigError::NonPositive("obstacle size"));
                }
                if physics.obstacle_min_height > physics.obstacle_max_height {
                    return Err(ConfigError::OutOfRange {
                        field: "obstacle_min_height",
                        value: physics.obstacle_min_height,
                    });
                }
            }
        }

        Ok(())
    }
}
