//! Collision detection
//!
//! Two tests, one per motion model:
//! - physics form: axis-aligned box overlap between player and obstacle
//! - lane form: same lane, not mid-transition, and obstacle depth near the player's

use glam::Vec2;
use serde::Serialize;

use super::state::{Obstacle, ObstacleBody, Player};
use crate::variant::{LaneConfig, MotionModel};

/// Axis-aligned rectangle (top-left corner + size)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.pos + self.size
    }

    /// Strict overlap; touching edges do not count
    pub fn overlaps(&self, other: &Rect) -> bool {
        let a_max = self.max();
        let b_max = other.max();
        self.pos.x < b_max.x && a_max.x > other.pos.x && self.pos.y < b_max.y && a_max.y > other.pos.y
    }
}

/// Lane-form hit test
pub fn lane_hit(
    player_lane: u8,
    lane_offset: f32,
    obstacle_lane: u8,
    obstacle_z: f32,
    config: &LaneConfig,
) -> bool {
    obstacle_lane == player_lane
        && lane_offset.abs() < config.offset_threshold
        && (obstacle_z - config.player_depth).abs() < config.depth_threshold
}

/// First obstacle the player is touching, if any
pub fn first_hit(player: &Player, obstacles: &[Obstacle], motion: &MotionModel) -> Option<u32> {
    match (player, motion) {
        (Player::Jumper(body), MotionModel::Physics(_)) => {
            let player_rect = body.rect();
            obstacles
                .iter()
                .find(|o| match &o.body {
                    ObstacleBody::Block(rect) => player_rect.overlaps(rect),
                    ObstacleBody::Lane { .. } => false,
                })
                .map(|o| o.id)
        }
        (Player::Lane(body), MotionModel::Lanes(lanes)) => obstacles
            .iter()
            .find(|o| match o.body {
                ObstacleBody::Lane { lane, z } => {
                    lane_hit(body.current_lane, body.lane_offset, lane, z, lanes)
                }
                ObstacleBody::Block(_) => false,
            })
            .map(|o| o.id),
        _ => None,
    }
}
