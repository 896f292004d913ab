//! Pointer/touch/keyboard input mapping
//!
//! Turns raw host events into simulation [`Command`]s. Gesture handling
//! (tap vs swipe, double tap, click-after-touch suppression) happens here;
//! the simulation still applies its own cooldown and eligibility rules.

use crate::sim::{Command, Phase};
use crate::variant::VariantConfig;

/// Minimum horizontal travel for a touch to count as a swipe
pub const SWIPE_THRESHOLD_PX: f32 = 30.0;
/// Synthetic clicks this soon after a touch end are ignored
pub const CLICK_SUPPRESS_MS: f64 = 500.0;

/// Which control scheme applies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlScheme {
    /// Tap/Space to jump, double tap to double jump
    Jump,
    /// Left/right to change lane
    Lanes,
}

/// Stateful gesture recognizer for one runner
#[derive(Debug, Clone)]
pub struct InputMapper {
    scheme: ControlScheme,
    double_tap_window_ms: f64,
    /// Width of the touch surface, for left/right half taps
    surface_width: f32,
    last_press_ms: Option<f64>,
    touch_start: Option<(f32, f32)>,
    last_touch_end_ms: Option<f64>,
}

impl InputMapper {
    pub fn new(config: &VariantConfig, surface_width: f32) -> Self {
        let scheme = if config.lanes().is_some() {
            ControlScheme::Lanes
        } else {
            ControlScheme::Jump
        };
        Self {
            scheme,
            double_tap_window_ms: config.double_tap_window_ms,
            surface_width,
            last_press_ms: None,
            touch_start: None,
            last_touch_end_ms: None,
        }
    }

    pub fn scheme(&self) -> ControlScheme {
        self.scheme
    }

    pub fn set_surface_width(&mut self, width: f32) {
        self.surface_width = width;
    }

    /// Keyboard key (DOM `KeyboardEvent.key` naming)
    pub fn key_down(&mut self, key: &str, phase: Phase, now_ms: f64) -> Option<Command> {
        if phase != Phase::Playing {
            return matches!(key, " " | "Enter" | "Spacebar").then_some(Command::Start);
        }

        match (self.scheme, key) {
            (ControlScheme::Jump, " " | "Spacebar" | "ArrowUp" | "w" | "W") => {
                Some(self.press(now_ms))
            }
            (ControlScheme::Lanes, "ArrowLeft" | "a" | "A") => Some(Command::MoveLane(-1)),
            (ControlScheme::Lanes, "ArrowRight" | "d" | "D") => Some(Command::MoveLane(1)),
            _ => None,
        }
    }

    pub fn touch_start(&mut self, x: f32, y: f32) {
        self.touch_start = Some((x, y));
    }

    pub fn touch_end(&mut self, x: f32, y: f32, phase: Phase, now_ms: f64) -> Option<Command> {
        let start = self.touch_start.take().unwrap_or((x, y));
        self.last_touch_end_ms = Some(now_ms);

        if phase != Phase::Playing {
            return Some(Command::Start);
        }

        match self.scheme {
            ControlScheme::Jump => Some(self.press(now_ms)),
            ControlScheme::Lanes => {
                let dx = x - start.0;
                let dy = y - start.1;
                if dx.abs() >= SWIPE_THRESHOLD_PX && dx.abs() > dy.abs() {
                    Some(Command::MoveLane(if dx > 0.0 { 1 } else { -1 }))
                } else {
                    Some(self.half_tap(x))
                }
            }
        }
    }

    /// Mouse click; ignored right after a touch (browsers synthesize one)
    pub fn click(&mut self, x: f32, phase: Phase, now_ms: f64) -> Option<Command> {
        if let Some(touched) = self.last_touch_end_ms {
            if now_ms - touched < CLICK_SUPPRESS_MS {
                return None;
            }
        }

        if phase != Phase::Playing {
            return Some(Command::Start);
        }

        match self.scheme {
            // A click is always a plain jump; double jump is a touch/keyboard gesture
            ControlScheme::Jump => {
                self.last_press_ms = Some(now_ms);
                Some(Command::Jump)
            }
            ControlScheme::Lanes => Some(self.half_tap(x)),
        }
    }

    /// Forget gesture history (on restart)
    pub fn reset(&mut self) {
        self.last_press_ms = None;
        self.touch_start = None;
    }

    fn press(&mut self, now_ms: f64) -> Command {
        let double = self
            .last_press_ms
            .is_some_and(|last| now_ms - last < self.double_tap_window_ms);
        self.last_press_ms = Some(now_ms);
        if double {
            Command::DoubleJump
        } else {
            Command::Jump
        }
    }

    fn half_tap(&self, x: f32) -> Command {
        if x < self.surface_width / 2.0 {
            Command::MoveLane(-1)
        } else {
            Command::MoveLane(1)
        }
    }
}
