//! Simulation step
//!
//! One call advances a session by `dt_ms`: queued commands are applied first,
//! then difficulty, player motion, spawning, obstacle motion and collision.

use std::collections::VecDeque;

use super::collision::first_hit;
use super::difficulty::Difficulty;
use super::motion::{
    double_jump, integrate_jumper, interpolate_lane, jump, request_lane_change, scroll_obstacles,
};
use super::spawner::{generate, spawn_due};
use super::state::{GameEvent, Obstacle, Phase, Player, Session};
use crate::consts::{COMMAND_QUEUE_CAPACITY, MS_PER_POINT};
use crate::frame_scale;
use crate::variant::MotionModel;

/// Discrete player intent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Start from the title screen, or restart after game over
    Start,
    Jump,
    DoubleJump,
    /// -1 = left, +1 = right
    MoveLane(i8),
}

/// Bounded FIFO of commands captured between steps
#[derive(Debug, Clone)]
pub struct CommandQueue {
    commands: VecDeque<Command>,
    capacity: usize,
}

impl Default for CommandQueue {
    fn default() -> Self {
        Self::with_capacity(COMMAND_QUEUE_CAPACITY)
    }
}

impl CommandQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            commands: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Queue a command; drops it when the queue is full
    pub fn push(&mut self, command: Command) -> bool {
        if self.commands.len() >= self.capacity {
            log::warn!("Command queue full, dropping {:?}", command);
            return false;
        }
        self.commands.push_back(command);
        true
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Remove and return every queued command in arrival order
    pub fn drain(&mut self) -> Vec<Command> {
        self.commands.drain(..).collect()
    }
}

/// Apply a single command to the session
pub fn apply_command(session: &mut Session, command: Command) {
    match command {
        Command::Start => {
            if session.phase != Phase::Playing {
                session.restart();
            }
        }
        _ if session.phase != Phase::Playing => {}
        Command::Jump => {
            if let (Player::Jumper(body), MotionModel::Physics(physics)) =
                (&mut session.player, &session.config.motion)
            {
                if jump(body, physics) {
                    session.events.push(GameEvent::Jumped);
                }
            }
        }
        Command::DoubleJump => {
            if let (Player::Jumper(body), MotionModel::Physics(physics)) =
                (&mut session.player, &session.config.motion)
            {
                if double_jump(body, physics) {
                    session.events.push(GameEvent::DoubleJumped);
                }
            }
        }
        Command::MoveLane(direction) => {
            if let (Player::Lane(body), MotionModel::Lanes(lanes)) =
                (&mut session.player, &session.config.motion)
            {
                if request_lane_change(
                    body,
                    lanes,
                    direction,
                    session.elapsed_ms,
                    session.config.move_cooldown_ms,
                ) {
                    log::debug!("Lane change -> {}", body.target_lane);
                    session.events.push(GameEvent::LaneChanged {
                        target: body.target_lane,
                    });
                }
            }
        }
    }
}

/// Advance the session by one step of `dt_ms` milliseconds
pub fn tick(session: &mut Session, queue: &mut CommandQueue, dt_ms: f64) {
    for command in queue.drain() {
        apply_command(session, command);
    }

    if session.phase != Phase::Playing {
        return;
    }

    session.elapsed_ms += dt_ms.max(0.0);
    session.apply_difficulty(Difficulty::at(session.elapsed_ms, &session.config.difficulty));
    session.score = (session.elapsed_ms / MS_PER_POINT).floor() as u64;

    let scale = frame_scale(dt_ms.max(0.0));

    // Player
    match (&mut session.player, &session.config.motion) {
        (Player::Jumper(body), MotionModel::Physics(physics)) => {
            integrate_jumper(body, physics, scale);
        }
        (Player::Lane(body), MotionModel::Lanes(lanes)) => {
            interpolate_lane(body, lanes, scale);
        }
        _ => {}
    }

    // Spawn
    if spawn_due(session.elapsed_ms, session.last_spawn_ms, session.spawn_interval_ms) {
        let bodies = generate(
            &mut session.rng,
            &session.config.motion,
            &session.config.spawn,
        );
        let count = bodies.len() as u32;
        for body in bodies {
            let id = session.next_entity_id();
            session.obstacles.push(Obstacle { id, body });
        }
        session.last_spawn_ms = session.elapsed_ms;
        session.events.push(GameEvent::Spawned { count });
        log::debug!("Spawned {} obstacle(s) at {:.0} ms", count, session.elapsed_ms);
    }

    // Obstacles
    scroll_obstacles(
        &mut session.obstacles,
        &session.config.motion,
        session.scroll_speed,
        scale,
    );

    // Collision
    if let Some(id) = first_hit(&session.player, &session.obstacles, &session.config.motion) {
        log::debug!("Hit obstacle {}", id);
        session.end_run();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::FRAME_MS;
    use crate::sim::collision::Rect;
    use crate::sim::state::ObstacleBody;
    use crate::variant::{Variant, VariantConfig};

    fn started(config: VariantConfig, seed: u64) -> (Session, CommandQueue) {
        let mut session = Session::new(config, seed, 0);
        let mut queue = CommandQueue::new();
        queue.push(Command::Start);
        tick(&mut session, &mut queue, FRAME_MS);
        (session, queue)
    }

    #[test]
    fn test_start_to_playing() {
        let mut session = Session::new(Variant::SideJumper.config(), 12345, 0);
        let mut queue = CommandQueue::new();

        // No input - stays on the title screen, time frozen
        tick(&mut session, &mut queue, FRAME_MS);
        assert_eq!(session.phase, Phase::Start);
        assert_eq!(session.elapsed_ms, 0.0);

        queue.push(Command::Start);
        tick(&mut session, &mut queue, FRAME_MS);
        assert_eq!(session.phase, Phase::Playing);
        assert!(queue.is_empty());
        assert_eq!(session.take_events(), vec![GameEvent::Started { run: 1 }]);
    }

    #[test]
    fn test_gameplay_commands_ignored_before_start() {
        let mut session = Session::new(Variant::TopDownLanes.config(), 1, 0);
        apply_command(&mut session, Command::MoveLane(1));
        assert_eq!(session.lane_body().unwrap().target_lane, 1);

        let mut session = Session::new(Variant::SideJumper.config(), 1, 0);
        apply_command(&mut session, Command::Jump);
        assert!(!session.jumper_body().unwrap().is_jumping);
    }

    #[test]
    fn test_start_while_playing_is_ignored() {
        let (mut session, mut queue) = started(Variant::SideJumper.config(), 1);
        for _ in 0..30 {
            tick(&mut session, &mut queue, FRAME_MS);
        }
        let elapsed = session.elapsed_ms;
        queue.push(Command::Start);
        tick(&mut session, &mut queue, FRAME_MS);
        assert_eq!(session.run, 1);
        assert!(session.elapsed_ms > elapsed);
    }

    #[test]
    fn test_score_tracks_play_time() {
        let (mut session, mut queue) = started(Variant::PerspectiveLanes.config(), 1);
        tick(&mut session, &mut queue, 1234.0 - FRAME_MS);
        assert_eq!(session.score, 12);
    }

    #[test]
    fn test_no_obstacles_before_first_spawn_interval() {
        let (mut session, mut queue) = started(Variant::SideJumper.config(), 3);
        while session.elapsed_ms + FRAME_MS <= 2500.0 {
            tick(&mut session, &mut queue, FRAME_MS);
            assert!(session.obstacles.is_empty());
        }
        tick(&mut session, &mut queue, FRAME_MS);
        assert_eq!(session.obstacles.len(), 1);
        assert_eq!(session.last_spawn_ms, session.elapsed_ms);
    }

    #[test]
    fn test_jump_command_launches_player() {
        let (mut session, mut queue) = started(Variant::SideJumper.config(), 1);
        queue.push(Command::Jump);
        tick(&mut session, &mut queue, FRAME_MS);
        let body = session.jumper_body().unwrap();
        assert!(body.is_jumping);
        assert!(body.pos.y < 500.0);
        assert!(session.take_events().contains(&GameEvent::Jumped));
    }

    #[test]
    fn test_jump_and_double_jump_in_one_step_keep_full_impulse() {
        let (mut session, mut queue) = started(Variant::SideJumper.config(), 1);
        let physics = session.config.physics().unwrap().clone();
        queue.push(Command::Jump);
        queue.push(Command::DoubleJump);
        tick(&mut session, &mut queue, FRAME_MS);

        let body = session.jumper_body().unwrap();
        let expected = physics.jump_strength + physics.gravity;
        assert!((body.vel_y - expected).abs() < 1e-4, "vel_y {}", body.vel_y);
        assert!(body.can_double_jump);
        let events = session.take_events();
        assert!(events.contains(&GameEvent::Jumped));
        assert!(!events.contains(&GameEvent::DoubleJumped));

        // Next step the player is airborne and the double jump applies
        queue.push(Command::DoubleJump);
        tick(&mut session, &mut queue, FRAME_MS);
        assert!(!session.jumper_body().unwrap().can_double_jump);
        assert!(session.take_events().contains(&GameEvent::DoubleJumped));
    }

    #[test]
    fn test_double_lane_command_in_one_step_is_debounced() {
        let (mut session, mut queue) = started(Variant::TopDownLanes.config(), 1);
        queue.push(Command::MoveLane(-1));
        queue.push(Command::MoveLane(-1));
        tick(&mut session, &mut queue, FRAME_MS);
        assert_eq!(session.lane_body().unwrap().target_lane, 0);

        // Past the cooldown a new command is accepted
        for _ in 0..15 {
            tick(&mut session, &mut queue, FRAME_MS);
        }
        queue.push(Command::MoveLane(1));
        tick(&mut session, &mut queue, FRAME_MS);
        assert_eq!(session.lane_body().unwrap().target_lane, 1);
    }

    #[test]
    fn test_collision_ends_run_and_freezes() {
        let (mut session, mut queue) = started(Variant::SideJumper.config(), 1);
        let id = session.next_entity_id();
        session.obstacles.push(Obstacle {
            id,
            body: ObstacleBody::Block(Rect::new(126.0, 490.0, 25.0, 50.0)),
        });
        session.score = 0;
        tick(&mut session, &mut queue, FRAME_MS);
        assert_eq!(session.phase, Phase::GameOver);

        let elapsed = session.elapsed_ms;
        let obstacles = session.obstacles.len();
        tick(&mut session, &mut queue, FRAME_MS);
        assert_eq!(session.elapsed_ms, elapsed);
        assert_eq!(session.obstacles.len(), obstacles);
    }

    #[test]
    fn test_lane_collision_ends_run() {
        let (mut session, mut queue) = started(Variant::PerspectiveLanes.config(), 1);
        let id = session.next_entity_id();
        session.obstacles.push(Obstacle {
            id,
            body: ObstacleBody::Lane { lane: 1, z: 0.74 },
        });
        tick(&mut session, &mut queue, FRAME_MS);
        assert_eq!(session.phase, Phase::GameOver);
        assert!(
            session
                .take_events()
                .iter()
                .any(|e| matches!(e, GameEvent::Crashed { .. }))
        );
    }

    #[test]
    fn test_idle_player_eventually_crashes() {
        for variant in Variant::ALL {
            let (mut session, mut queue) = started(variant.config(), 99);
            let mut frames = 0;
            while session.phase == Phase::Playing && frames < 60 * 120 {
                tick(&mut session, &mut queue, FRAME_MS);
                frames += 1;
            }
            assert_eq!(session.phase, Phase::GameOver, "{} never crashed", variant.as_str());
            assert!(session.best_score > 0);
        }
    }

    #[test]
    fn test_determinism() {
        let run = |seed: u64| {
            let (mut session, mut queue) = started(Variant::TopDownLanes.config(), seed);
            let mut trace = Vec::new();
            for frame in 0..600 {
                if frame % 45 == 0 {
                    queue.push(Command::MoveLane(if frame % 90 == 0 { 1 } else { -1 }));
                }
                tick(&mut session, &mut queue, FRAME_MS);
                trace.push((session.phase, session.obstacles.len(), session.score));
            }
            trace
        };
        assert_eq!(run(2024), run(2024));
    }

    #[test]
    fn test_queue_is_bounded() {
        let mut queue = CommandQueue::with_capacity(2);
        assert!(queue.push(Command::Jump));
        assert!(queue.push(Command::Jump));
        assert!(!queue.push(Command::Start));
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.drain(), vec![Command::Jump, Command::Jump]);
        assert!(queue.is_empty());
    }
}
