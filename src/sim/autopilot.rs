//! Demo autopilot
//!
//! Picks a command from the current session the way a cautious player would:
//! jump when a block is about to reach the player, sidestep when an obstacle
//! is approaching in the player's lane.

use super::state::{ObstacleBody, Phase, Player, Session};
use super::tick::Command;
use crate::variant::MotionModel;

/// Reference frames of warning the jumper needs before a block arrives
const JUMP_LEAD_FRAMES: f32 = 8.0;
/// Depth ahead of the player that counts as "incoming" for lane variants
const LANE_LOOKAHEAD: f32 = 0.35;

/// Next command for an idle/demo run, if any
pub fn autopilot(session: &Session) -> Option<Command> {
    match session.phase {
        Phase::Start | Phase::GameOver => return Some(Command::Start),
        Phase::Playing => {}
    }

    match (&session.player, &session.config.motion) {
        (Player::Jumper(body), MotionModel::Physics(_)) => {
            if body.is_jumping {
                return None;
            }
            let player_front = body.pos.x + body.size.x;
            let lead = session.scroll_speed * JUMP_LEAD_FRAMES;
            let incoming = session.obstacles.iter().any(|o| match o.body {
                ObstacleBody::Block(rect) => {
                    let gap = rect.pos.x - player_front;
                    (0.0..=lead).contains(&gap)
                }
                ObstacleBody::Lane { .. } => false,
            });
            incoming.then_some(Command::Jump)
        }
        (Player::Lane(body), MotionModel::Lanes(lanes)) => {
            let threatened = |lane: u8| {
                session.obstacles.iter().any(|o| match o.body {
                    ObstacleBody::Lane { lane: l, z } => {
                        l == lane
                            && z <= lanes.player_depth + lanes.depth_threshold
                            && z >= lanes.player_depth - LANE_LOOKAHEAD
                    }
                    ObstacleBody::Block(_) => false,
                })
            };

            if !threatened(body.target_lane) {
                return None;
            }
            // Prefer the neighbour that is clear
            [-1i8, 1]
                .into_iter()
                .filter(|dir| {
                    let lane = i16::from(body.target_lane) + i16::from(*dir);
                    (0..i16::from(lanes.lane_count)).contains(&lane) && !threatened(lane as u8)
                })
                .map(Command::MoveLane)
                .next()
        }
        _ => None,
    }
}
