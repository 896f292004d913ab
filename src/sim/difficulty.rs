//! Difficulty curve
//!
//! Pure function of play time: no state is carried between steps, so the
//! same `elapsed_ms` always yields the same speed and spawn interval.

use crate::variant::DifficultyConfig;

/// Derived difficulty values for one point in a run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Difficulty {
    /// floor(elapsed / step)
    pub level: u32,
    /// 1 + level * per_level, never below 1
    pub difficulty: f32,
    pub scroll_speed: f32,
    /// Minimum gap between spawn attempts, never below the configured floor
    pub spawn_interval_ms: f64,
}

impl Difficulty {
    pub fn at(elapsed_ms: f64, config: &DifficultyConfig) -> Self {
        let level = (elapsed_ms.max(0.0) / config.step_ms).floor();
        let difficulty = 1.0 + level * config.per_level;

        let reduction = ((difficulty - 1.0) * config.reduction_per_difficulty_ms)
            .min(config.reduction_cap_ms);
        let spawn_interval_ms = (config.max_interval_ms - reduction).max(config.min_interval_ms);

        Self {
            level: level.min(u32::MAX as f64) as u32,
            difficulty: difficulty as f32,
            scroll_speed: config.base_speed * difficulty as f32,
            spawn_interval_ms,
        }
    }
}
