//! Frame driver
//!
//! Owns a session, its command queue and the best-score store. The host calls
//! [`Runner::frame`] once per display frame with a monotonic timestamp; the
//! runner turns the frame delta into simulation steps and persists new best
//! scores.

use crate::best_score::{BestScore, ScoreStore};
use crate::consts::{MAX_FRAME_DT_MS, MAX_SUBSTEPS, SIM_DT_MS};
use crate::share::share_message;
use crate::sim::{Command, CommandQueue, GameEvent, Phase, Session, tick};
use crate::variant::{TimestepMode, VariantConfig};

/// One runner instance and its collaborators
pub struct Runner<S: ScoreStore> {
    session: Session,
    queue: CommandQueue,
    best: BestScore<S>,
    last_frame_ms: Option<f64>,
    accumulator: f64,
}

impl<S: ScoreStore> Runner<S> {
    pub fn new(config: VariantConfig, seed: u64, store: S) -> Self {
        let best = BestScore::load(store);
        log::info!(
            "{} runner initialized with seed {}",
            config.variant.as_str(),
            seed
        );
        Self {
            session: Session::new(config, seed, best.value()),
            queue: CommandQueue::new(),
            best,
            last_frame_ms: None,
            accumulator: 0.0,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn phase(&self) -> Phase {
        self.session.phase
    }

    pub fn best_score(&self) -> u64 {
        self.best.value()
    }

    pub fn store(&self) -> &S {
        self.best.store()
    }

    /// Queue a command for the next step
    pub fn push(&mut self, command: Command) -> bool {
        self.queue.push(command)
    }

    /// Advance by the time since the previous frame and return the events it produced
    pub fn frame(&mut self, now_ms: f64) -> Vec<GameEvent> {
        let dt = match self.last_frame_ms {
            Some(last) => (now_ms - last).clamp(0.0, MAX_FRAME_DT_MS),
            None => 0.0,
        };
        self.last_frame_ms = Some(now_ms);
        self.advance(dt)
    }

    /// Advance by an explicit frame delta
    pub fn advance(&mut self, dt_ms: f64) -> Vec<GameEvent> {
        let dt_ms = dt_ms.clamp(0.0, MAX_FRAME_DT_MS);
        match self.session.config.timestep {
            TimestepMode::Variable => tick(&mut self.session, &mut self.queue, dt_ms),
            TimestepMode::Fixed => {
                self.accumulator += dt_ms;
                let mut substeps = 0;
                while self.accumulator >= SIM_DT_MS && substeps < MAX_SUBSTEPS {
                    tick(&mut self.session, &mut self.queue, SIM_DT_MS);
                    self.accumulator -= SIM_DT_MS;
                    substeps += 1;
                }
                if substeps == MAX_SUBSTEPS {
                    self.accumulator = self.accumulator.min(SIM_DT_MS);
                }
                // Commands still apply on frames too short for a substep
                if !self.queue.is_empty() {
                    tick(&mut self.session, &mut self.queue, 0.0);
                }
            }
        }

        if self.session.phase != Phase::Playing {
            self.accumulator = 0.0;
        }
        self.persist_best();
        self.session.take_events()
    }

    /// Text for the share collaborator
    pub fn share_message(&self, url: Option<&str>) -> String {
        share_message(self.session.score, url)
    }

    fn persist_best(&mut self) {
        if self.session.best_score > self.best.value() {
            self.best.offer(self.session.best_score);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::best_score::MemoryStore;
    use crate::consts::FRAME_MS;
    use crate::variant::Variant;

    #[test]
    fn test_first_frame_has_zero_delta() {
        let mut runner = Runner::new(Variant::SideJumper.config(), 1, MemoryStore::new());
        runner.push(Command::Start);
        runner.frame(50_000.0);
        assert_eq!(runner.phase(), Phase::Playing);
        assert_eq!(runner.session().elapsed_ms, 0.0);

        runner.frame(50_020.0);
        assert!((runner.session().elapsed_ms - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_long_frames_are_clamped() {
        let mut runner = Runner::new(Variant::TopDownLanes.config(), 1, MemoryStore::new());
        runner.push(Command::Start);
        runner.frame(0.0);
        runner.frame(5_000.0);
        assert_eq!(runner.session().elapsed_ms, MAX_FRAME_DT_MS);
    }

    #[test]
    fn test_fixed_timestep_accumulates() {
        let mut config = Variant::SideJumper.config();
        config.timestep = TimestepMode::Fixed;
        let mut runner = Runner::new(config, 1, MemoryStore::new());
        runner.push(Command::Start);
        runner.advance(0.0);
        assert_eq!(runner.phase(), Phase::Playing);

        runner.advance(10.0);
        assert_eq!(runner.session().elapsed_ms, 0.0);
        runner.advance(10.0);
        assert!((runner.session().elapsed_ms - FRAME_MS).abs() < 1e-9);
    }

    #[test]
    fn test_loads_best_from_store() {
        let runner = Runner::new(Variant::PerspectiveLanes.config(), 1, MemoryStore::with_value(33));
        assert_eq!(runner.best_score(), 33);
        assert_eq!(runner.session().best_score, 33);
    }

    #[test]
    fn test_share_uses_current_score() {
        let mut runner = Runner::new(Variant::SideJumper.config(), 1, MemoryStore::new());
        runner.session_mut().score = 21;
        assert!(runner.share_message(None).contains("21 points"));
    }
}
