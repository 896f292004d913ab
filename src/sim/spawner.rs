//! Obstacle spawning
//!
//! Spawn attempts are gated on play time; lane variants may place a second
//! obstacle in a different lane on the same attempt.

use rand::Rng;

use super::collision::Rect;
use super::state::ObstacleBody;
use crate::variant::{MotionModel, SpawnConfig};

/// True once more than `interval_ms` has passed since the last attempt
#[inline]
pub fn spawn_due(now_ms: f64, last_spawn_ms: f64, interval_ms: f64) -> bool {
    now_ms - last_spawn_ms > interval_ms
}

/// Pick up to `count` distinct lanes out of `lane_count`
///
/// Each pick resamples at most `lane_count` times before falling back to the
/// first free lane, so the search always terminates. Never returns more lanes
/// than exist.
pub fn pick_lanes<R: Rng>(rng: &mut R, lane_count: u8, count: usize) -> Vec<u8> {
    let count = count.min(usize::from(lane_count));
    let mut lanes: Vec<u8> = Vec::with_capacity(count);

    while lanes.len() < count {
        let mut lane = rng.random_range(0..lane_count);
        let mut attempts = 1;
        while lanes.contains(&lane) && attempts < lane_count {
            lane = rng.random_range(0..lane_count);
            attempts += 1;
        }
        if lanes.contains(&lane) {
            match (0..lane_count).find(|l| !lanes.contains(l)) {
                Some(free) => lane = free,
                None => break,
            }
        }
        lanes.push(lane);
    }

    lanes
}

/// Obstacles produced by one spawn attempt
pub fn generate<R: Rng>(rng: &mut R, motion: &MotionModel, spawn: &SpawnConfig) -> Vec<ObstacleBody> {
    match motion {
        MotionModel::Physics(physics) => {
            let height = if physics.obstacle_max_height > physics.obstacle_min_height {
                rng.random_range(physics.obstacle_min_height..=physics.obstacle_max_height)
            } else {
                physics.obstacle_min_height
            };
            vec![ObstacleBody::Block(Rect::new(
                physics.world_width,
                physics.ground_y() - height,
                physics.obstacle_width,
                height,
            ))]
        }
        MotionModel::Lanes(lanes) => {
            let count = if lanes.lane_count > 1 && rng.random_bool(spawn.pair_chance) {
                2
            } else {
                1
            };
            pick_lanes(rng, lanes.lane_count, count)
                .into_iter()
                .map(|lane| ObstacleBody::Lane { lane, z: 0.0 })
                .collect()
        }
    }
}
