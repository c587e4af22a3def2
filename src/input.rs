//! Player controls
//!
//! Keyboard and touch handlers write into an `InputState` between frames; the
//! simulation only ever reads a `Controls` snapshot of it.

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec2;

use crate::consts::*;
use crate::sim::GameState;
use crate::sim::camera;

/// Held buttons for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Controls {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

/// Where the round owner reads controls from
pub trait InputSource {
    /// Current held buttons
    fn controls(&self) -> Controls;

    /// Drop anything held over from the previous round
    fn reset(&mut self) {}
}

impl InputSource for Controls {
    fn controls(&self) -> Controls {
        *self
    }

    fn reset(&mut self) {
        *self = Controls::default();
    }
}

/// Keyboard and touch state fed by platform event handlers
#[derive(Debug, Clone)]
pub struct InputState {
    controls: Controls,
    /// Where the current touch started
    touch_origin: Option<Vec2>,
    /// Ignore edges while an overlay is up
    pub enabled: bool,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            controls: Controls::default(),
            touch_origin: None,
            enabled: true,
        }
    }
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the key is one of ours (caller should swallow the event)
    pub fn key_down(&mut self, key: &str) -> bool {
        self.set_key(key, true)
    }

    pub fn key_up(&mut self, key: &str) -> bool {
        self.set_key(key, false)
    }

    fn set_key(&mut self, key: &str, held: bool) -> bool {
        if !self.enabled {
            return false;
        }
        match key {
            "ArrowLeft" => self.controls.left = held,
            "ArrowRight" => self.controls.right = held,
            " " | "Spacebar" | "ArrowUp" => self.controls.jump = held,
            _ => return false,
        }
        true
    }

    /// `touches` is the number of fingers currently down
    pub fn touch_start(&mut self, pos: Vec2, touches: u32) {
        if !self.enabled || touches > 1 {
            return;
        }
        self.touch_origin = Some(pos);
    }

    pub fn touch_move(&mut self, pos: Vec2, touches: u32) {
        if !self.enabled || touches > 1 {
            return;
        }
        let Some(origin) = self.touch_origin else {
            return;
        };
        let delta = pos - origin;
        if delta.x < -SWIPE_X_THRESHOLD {
            self.controls = Controls {
                left: true,
                ..Default::default()
            };
        } else if delta.x > SWIPE_X_THRESHOLD {
            self.controls = Controls {
                right: true,
                ..Default::default()
            };
        } else if delta.y < -SWIPE_JUMP_THRESHOLD {
            self.controls.jump = true;
        }
    }

    pub fn touch_end(&mut self) {
        if !self.enabled {
            return;
        }
        self.controls = Controls::default();
        self.touch_origin = None;
    }

    pub fn clear(&mut self) {
        self.controls = Controls::default();
        self.touch_origin = None;
    }

    /// Replace held buttons wholesale (autopilot)
    pub fn set_controls(&mut self, controls: Controls) {
        if self.enabled {
            self.controls = controls;
        }
    }
}

impl InputSource for InputState {
    fn controls(&self) -> Controls {
        self.controls
    }

    fn reset(&mut self) {
        self.clear();
    }
}

/// Shared between DOM event closures and the round owner
impl<T: InputSource> InputSource for Rc<RefCell<T>> {
    fn controls(&self) -> Controls {
        self.borrow().controls()
    }

    fn reset(&mut self) {
        self.borrow_mut().reset();
    }
}

/// Demo player: runs right and hops over whatever is coming up
#[derive(Debug, Clone, Copy)]
pub struct Autopilot {
    /// Jump when the next obstacle's leading edge is this far ahead (screen pixels)
    pub trigger_min: f32,
    pub trigger_max: f32,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self {
            trigger_min: 8.0,
            trigger_max: 30.0,
        }
    }
}

impl Autopilot {
    pub fn decide(&self, state: &GameState) -> Controls {
        let front = state.player.pos.x + state.player.width;
        let jump = state
            .obstacles
            .iter()
            .filter(|o| o.active)
            .map(|o| camera::screen_x(o.x, state.world_offset) - front)
            .filter(|gap| *gap > -state.player.width)
            .min_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
            .is_some_and(|gap| (self.trigger_min..=self.trigger_max).contains(&gap));

        Controls {
            left: false,
            right: true,
            jump,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyboard_edges() {
        let mut input = InputState::new();
        assert!(input.key_down("ArrowRight"));
        assert!(input.key_down(" "));
        assert_eq!(
            input.controls(),
            Controls {
                left: false,
                right: true,
                jump: true
            }
        );

        assert!(input.key_up(" "));
        assert!(input.key_down("ArrowUp"));
        assert!(input.controls().jump);
        assert!(input.key_up("ArrowUp"));
        assert!(input.key_up("ArrowRight"));
        assert_eq!(input.controls(), Controls::default());

        assert!(!input.key_down("a"));
    }

    #[test]
    fn test_disabled_input_ignores_edges() {
        let mut input = InputState::new();
        input.enabled = false;
        assert!(!input.key_down("ArrowLeft"));
        input.touch_start(Vec2::ZERO, 1);
        input.touch_move(Vec2::new(-50.0, 0.0), 1);
        assert_eq!(input.controls(), Controls::default());
    }

    #[test]
    fn test_horizontal_swipe_is_exclusive() {
        let mut input = InputState::new();
        input.touch_start(Vec2::new(100.0, 100.0), 1);
        input.touch_move(Vec2::new(100.0, 70.0), 1);
        assert!(input.controls().jump);

        input.touch_move(Vec2::new(129.0, 70.0), 1);
        assert_eq!(
            input.controls(),
            Controls {
                left: false,
                right: true,
                jump: false
            }
        );

        input.touch_move(Vec2::new(71.0, 100.0), 1);
        assert_eq!(
            input.controls(),
            Controls {
                left: true,
                right: false,
                jump: false
            }
        );
    }

    #[test]
    fn test_small_swipes_do_nothing() {
        let mut input = InputState::new();
        input.touch_start(Vec2::new(100.0, 100.0), 1);
        input.touch_move(Vec2::new(128.0, 78.0), 1);
        assert_eq!(input.controls(), Controls::default());
    }

    #[test]
    fn test_touch_end_clears_everything() {
        let mut input = InputState::new();
        input.touch_start(Vec2::ZERO, 1);
        input.touch_move(Vec2::new(40.0, 0.0), 1);
        input.touch_end();
        assert_eq!(input.controls(), Controls::default());

        // No origin any more, moves are ignored until the next start
        input.touch_move(Vec2::new(80.0, 0.0), 1);
        assert_eq!(input.controls(), Controls::default());
    }

    #[test]
    fn test_multi_touch_ignored() {
        let mut input = InputState::new();
        input.touch_start(Vec2::ZERO, 2);
        input.touch_move(Vec2::new(80.0, 0.0), 1);
        assert_eq!(input.controls(), Controls::default());
    }

    #[test]
    fn test_shared_source_reset() {
        let shared = Rc::new(RefCell::new(InputState::new()));
        shared.borrow_mut().key_down("ArrowLeft");
        let mut source = shared.clone();
        assert!(source.controls().left);
        source.reset();
        assert!(!shared.borrow().controls().left);
    }

    #[test]
    fn test_autopilot_jumps_before_obstacle() {
        let mut state = GameState::new(3, 0);
        state.obstacles.truncate(1);
        state.obstacles[0].x = 80.0;
        state.obstacles[0].dx = 0.0;
        let pilot = Autopilot::default();

        // Player front edge at 52, obstacle 28 px ahead
        assert!(pilot.decide(&state).jump);

        state.obstacles[0].x = 200.0;
        let controls = pilot.decide(&state);
        assert!(controls.right);
        assert!(!controls.jump);
    }
}
