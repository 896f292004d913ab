//! Entity motion
//!
//! All rates are per 60 Hz reference frame; `scale` is the step length in
//! reference frames (see [`crate::frame_scale`]).

use super::state::{JumperBody, LaneBody, Obstacle, ObstacleBody};
use crate::variant::{LaneConfig, MotionModel, PhysicsConfig};

/// Apply gravity, move, and land on the ground plane
pub fn integrate_jumper(body: &mut JumperBody, config: &PhysicsConfig, scale: f32) {
    body.vel_y = (body.vel_y + config.gravity * scale).min(config.max_fall_speed);
    body.pos.y += body.vel_y * scale;

    let ground = config.ground_y();
    if body.pos.y + body.size.y >= ground {
        body.pos.y = ground - body.size.y;
        body.vel_y = 0.0;
        body.is_jumping = false;
        body.can_double_jump = false;
    }
}

/// Jump from the ground. Returns false while already airborne.
pub fn jump(body: &mut JumperBody, config: &PhysicsConfig) -> bool {
    if body.is_jumping {
        return false;
    }
    body.vel_y = config.jump_strength;
    body.is_jumping = true;
    body.can_double_jump = true;
    true
}

/// Second, weaker jump while airborne; consumes the double-jump eligibility
///
/// A body that jumped this step but has not left the ground yet keeps its
/// eligibility and the full jump impulse.
pub fn double_jump(body: &mut JumperBody, config: &PhysicsConfig) -> bool {
    if !body.is_jumping || !body.can_double_jump || !airborne(body, config) {
        return false;
    }
    body.vel_y = config.jump_strength * config.double_jump_factor;
    body.can_double_jump = false;
    true
}

#[inline]
fn airborne(body: &JumperBody, config: &PhysicsConfig) -> bool {
    body.pos.y + body.size.y < config.ground_y()
}

/// Retarget one lane left (-1) or right (+1), clamped to the track
///
/// Rejected while the cooldown since the last accepted change is running,
/// or when the clamp leaves the target unchanged.
pub fn request_lane_change(
    body: &mut LaneBody,
    config: &LaneConfig,
    direction: i8,
    now_ms: f64,
    cooldown_ms: f64,
) -> bool {
    if let Some(last) = body.last_move_ms {
        if now_ms - last < cooldown_ms {
            return false;
        }
    }

    let target = (i16::from(body.target_lane) + i16::from(direction.signum()))
        .clamp(0, i16::from(config.max_lane())) as u8;
    if target == body.target_lane {
        return false;
    }

    body.target_lane = target;
    body.last_move_ms = Some(now_ms);
    true
}

/// Ease the lane offset toward the target lane, snapping once close enough
pub fn interpolate_lane(body: &mut LaneBody, config: &LaneConfig, scale: f32) {
    let distance = f32::from(body.target_lane) - f32::from(body.current_lane);
    let blend = (config.damping * scale).min(1.0);
    body.lane_offset += (distance - body.lane_offset) * blend;

    if (distance - body.lane_offset).abs() < config.snap_epsilon {
        body.current_lane = body.target_lane;
        body.lane_offset = 0.0;
    }
}

/// Scroll obstacles toward the player and drop the ones past the visible edge
pub fn scroll_obstacles(obstacles: &mut Vec<Obstacle>, motion: &MotionModel, speed: f32, scale: f32) {
    let depth_acceleration = match motion {
        MotionModel::Lanes(lanes) => lanes.depth_acceleration,
        MotionModel::Physics(_) => 0.0,
    };

    for obstacle in obstacles.iter_mut() {
        match &mut obstacle.body {
            ObstacleBody::Block(rect) => rect.pos.x -= speed * scale,
            ObstacleBody::Lane { z, .. } => *z += speed * (1.0 + *z * depth_acceleration) * scale,
        }
    }

    obstacles.retain(|o| match o.body {
        ObstacleBody::Block(rect) => rect.max().x >= 0.0,
        ObstacleBody::Lane { z, .. } => z <= 1.0,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::collision::Rect;
    use proptest::prelude::*;

    fn physics() -> PhysicsConfig {
        PhysicsConfig::default()
    }

    fn lanes(damping: f32) -> LaneConfig {
        LaneConfig {
            damping,
            ..LaneConfig::default()
        }
    }

    #[test]
    fn test_standing_player_stays_grounded() {
        let config = physics();
        let mut body = JumperBody::new(&config);
        let start = body.pos;
        for _ in 0..10 {
            integrate_jumper(&mut body, &config, 1.0);
        }
        assert_eq!(body.pos, start);
        assert_eq!(body.vel_y, 0.0);
    }

    #[test]
    fn test_jump_arc_lands() {
        let config = physics();
        let mut body = JumperBody::new(&config);
        let ground_y = body.pos.y;

        assert!(jump(&mut body, &config));
        assert!(!jump(&mut body, &config), "no jump while airborne");

        integrate_jumper(&mut body, &config, 1.0);
        assert!(body.pos.y < ground_y);
        assert!(body.is_jumping);

        let mut frames = 1;
        while body.is_jumping && frames < 200 {
            integrate_jumper(&mut body, &config, 1.0);
            frames += 1;
        }
        assert!(!body.is_jumping);
        assert!(!body.can_double_jump);
        assert_eq!(body.pos.y, ground_y);
        // -12 impulse against 0.6 gravity: about 40 frames of air time
        assert!((35..=45).contains(&frames), "landed after {frames} frames");
    }

    #[test]
    fn test_fall_speed_clamped() {
        let config = physics();
        let mut body = JumperBody::new(&config);
        body.pos.y = -10_000.0;
        body.is_jumping = true;
        for _ in 0..100 {
            integrate_jumper(&mut body, &config, 1.0);
            assert!(body.vel_y <= config.max_fall_speed);
        }
    }

    #[test]
    fn test_double_jump_requires_airborne_eligibility() {
        let config = physics();
        let mut body = JumperBody::new(&config);
        assert!(!double_jump(&mut body, &config), "grounded");

        jump(&mut body, &config);
        integrate_jumper(&mut body, &config, 1.0);
        assert!(double_jump(&mut body, &config));
        assert_eq!(body.vel_y, config.jump_strength * config.double_jump_factor);
        assert!(!body.can_double_jump);
        assert!(!double_jump(&mut body, &config), "eligibility consumed");
    }

    #[test]
    fn test_double_jump_waits_for_liftoff() {
        let config = physics();
        let mut body = JumperBody::new(&config);
        assert!(jump(&mut body, &config));
        assert!(!double_jump(&mut body, &config));
        assert_eq!(body.vel_y, config.jump_strength);
        assert!(body.can_double_jump);
    }

    #[test]
    fn test_lane_change_clamped_and_cooled_down() {
        let config = lanes(0.15);
        let mut body = LaneBody::new(&config);
        assert_eq!(body.target_lane, 1);

        assert!(request_lane_change(&mut body, &config, 1, 0.0, 200.0));
        assert_eq!(body.target_lane, 2);
        assert!(!request_lane_change(&mut body, &config, -1, 150.0, 200.0), "cooldown");
        assert_eq!(body.target_lane, 2);
        assert!(!request_lane_change(&mut body, &config, 1, 400.0, 200.0), "right edge");
        assert_eq!(body.target_lane, 2);
        assert!(request_lane_change(&mut body, &config, -1, 400.0, 200.0));
        assert_eq!(body.target_lane, 1);
    }

    #[test]
    fn test_lane_convergence() {
        let config = lanes(0.15);
        let mut body = LaneBody::new(&config);
        request_lane_change(&mut body, &config, 1, 0.0, 0.0);

        let mut steps = 0;
        while body.current_lane != body.target_lane && steps < 100 {
            interpolate_lane(&mut body, &config, 1.0);
            steps += 1;
        }
        assert!(steps <= 50, "took {steps} steps");
        assert_eq!(body.current_lane, 2);
        assert_eq!(body.lane_offset, 0.0);
    }

    #[test]
    fn test_offset_moves_toward_target() {
        let config = lanes(0.2);
        let mut body = LaneBody::new(&config);
        request_lane_change(&mut body, &config, -1, 0.0, 0.0);
        interpolate_lane(&mut body, &config, 1.0);
        assert!((body.lane_offset + 0.2).abs() < 1e-6);
        assert_eq!(body.current_lane, 1);
    }

    #[test]
    fn test_scroll_removes_offscreen_blocks() {
        let motion = MotionModel::Physics(physics());
        let mut obstacles = vec![
            Obstacle {
                id: 1,
                body: ObstacleBody::Block(Rect::new(2.0, 490.0, 25.0, 50.0)),
            },
            Obstacle {
                id: 2,
                body: ObstacleBody::Block(Rect::new(-20.0, 490.0, 25.0, 50.0)),
            },
        ];
        scroll_obstacles(&mut obstacles, &motion, 6.0, 1.0);
        assert_eq!(obstacles.len(), 1);
        assert_eq!(obstacles[0].id, 1);
        assert_eq!(obstacles[0].body, ObstacleBody::Block(Rect::new(-4.0, 490.0, 25.0, 50.0)));
    }

    #[test]
    fn test_depth_scaled_scroll() {
        let motion = MotionModel::Lanes(LaneConfig {
            depth_acceleration: 1.0,
            ..LaneConfig::default()
        });
        let mut obstacles = vec![
            Obstacle {
                id: 1,
                body: ObstacleBody::Lane { lane: 0, z: 0.0 },
            },
            Obstacle {
                id: 2,
                body: ObstacleBody::Lane { lane: 1, z: 0.5 },
            },
            Obstacle {
                id: 3,
                body: ObstacleBody::Lane { lane: 2, z: 0.99 },
            },
        ];
        scroll_obstacles(&mut obstacles, &motion, 0.01, 1.0);
        assert_eq!(obstacles.len(), 2);
        assert_eq!(obstacles[0].body, ObstacleBody::Lane { lane: 0, z: 0.01 });
        match obstacles[1].body {
            ObstacleBody::Lane { lane, z } => {
                assert_eq!(lane, 1);
                assert!((z - 0.515).abs() < 1e-6);
            }
            ObstacleBody::Block(_) => panic!("expected lane obstacle"),
        }
    }

    proptest! {
        #[test]
        fn prop_target_lane_stays_on_track(moves in prop::collection::vec(prop_oneof![Just(-1i8), Just(1i8)], 0..64), lane_count in 1u8..6) {
            let config = LaneConfig { lane_count, ..LaneConfig::default() };
            let mut body = LaneBody::new(&config);
            for (i, direction) in moves.into_iter().enumerate() {
                request_lane_change(&mut body, &config, direction, i as f64 * 250.0, 200.0);
                prop_assert!(body.target_lane <= config.max_lane());
                interpolate_lane(&mut body, &config, 1.0);
                prop_assert!(body.current_lane <= config.max_lane());
            }
        }
    }
}
