//! Game state and core simulation types
//!
//! Everything a round needs lives in one `GameState`, replaced wholesale on restart.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::camera;
use super::obstacles::generate_obstacles;
use crate::consts::*;

/// Round progression. Terminal variants carry the committed score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundStatus {
    /// Constructed, waiting for the first `init()`
    Ready,
    /// Active gameplay
    Playing,
    /// Player hit an obstacle
    GameOver { score: u32 },
    /// Player reached the goal post
    LevelComplete { score: u32 },
}

impl RoundStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            RoundStatus::GameOver { .. } | RoundStatus::LevelComplete { .. }
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RoundStatus::Ready => "ready",
            RoundStatus::Playing => "playing",
            RoundStatus::GameOver { .. } => "game_over",
            RoundStatus::LevelComplete { .. } => "level_complete",
        }
    }
}

/// Facing direction, used for sprite mirroring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    Left,
    #[default]
    Right,
}

/// The acrobat
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner; x is screen-relative once the camera scrolls
    pub pos: Vec2,
    pub vel: Vec2,
    pub jumping: bool,
    /// Ticks since the current jump started
    pub jump_time: u32,
    pub width: f32,
    pub height: f32,
    pub alive: bool,
    pub direction: Direction,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::new(PLAYER_START_X, GROUND_Y),
            vel: Vec2::ZERO,
            jumping: false,
            jump_time: 0,
            width: PLAYER_WIDTH,
            height: PLAYER_HEIGHT,
            alive: true,
            direction: Direction::Right,
        }
    }
}

/// Obstacle types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Flaming hoop
    Fire,
    /// Lion
    Animal,
}

impl ObstacleKind {
    /// Points awarded for clearing one
    pub fn points(&self) -> u32 {
        match self {
            ObstacleKind::Fire => FIRE_POINTS,
            ObstacleKind::Animal => ANIMAL_POINTS,
        }
    }
}

/// An obstacle in world space
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub kind: ObstacleKind,
    /// Cleared once passed; never set again within a round
    pub active: bool,
    /// Patrol velocity per tick (0 = static)
    pub dx: f32,
}

impl Obstacle {
    pub fn fire(x: f32, dx: f32) -> Self {
        Self {
            x,
            y: FIRE_Y,
            width: FIRE_SIZE,
            height: FIRE_SIZE,
            kind: ObstacleKind::Fire,
            active: true,
            dx,
        }
    }

    pub fn animal(x: f32, dx: f32) -> Self {
        Self {
            x,
            y: ANIMAL_Y,
            width: ANIMAL_WIDTH,
            height: ANIMAL_HEIGHT,
            kind: ObstacleKind::Animal,
            active: true,
            dx,
        }
    }

    pub fn is_patrolling(&self) -> bool {
        self.dx != 0.0
    }

    /// World-space x of the trailing (right) edge
    pub fn trailing_edge(&self) -> f32 {
        self.x + self.width
    }
}

/// Notable things that happened during a tick.
///
/// Drained by the round owner after every tick and forwarded to audio/persistence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Jumped,
    Scored { kind: ObstacleKind, points: u32 },
    Died { score: u32 },
    LevelCompleted { score: u32 },
    /// The committed high score went up
    NewHighScore { score: u32 },
}

/// Compact state summary for logs
#[derive(Debug, Clone, Serialize)]
pub struct Diagnostics {
    pub seed: u64,
    pub tick: u64,
    pub score: u32,
    pub high_score: u32,
    pub status: &'static str,
    pub world_offset: f32,
    pub player_x: f32,
    pub player_y: f32,
    pub active_obstacles: usize,
}

/// Complete round state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Round seed the obstacle layout was generated from
    pub seed: u64,
    pub score: u32,
    /// Best committed score across rounds
    pub high_score: u32,
    pub player: Player,
    /// World left-to-right spawn order
    pub obstacles: Vec<Obstacle>,
    /// Simulation tick counter
    pub tick: u64,
    pub status: RoundStatus,
    pub ground_y: f32,
    /// Cumulative horizontal scroll
    pub world_offset: f32,
    /// World-space x of the goal post
    pub win_line: f32,
    /// Events produced by the last tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Pre-round state: player in place, no obstacles, not yet playing
    pub fn ready(high_score: u32) -> Self {
        Self {
            seed: 0,
            score: 0,
            high_score,
            player: Player::default(),
            obstacles: Vec::new(),
            tick: 0,
            status: RoundStatus::Ready,
            ground_y: GROUND_Y,
            world_offset: 0.0,
            win_line: WIN_LINE,
            events: Vec::new(),
        }
    }

    /// Fresh playing round with an obstacle layout derived from `seed`
    pub fn new(seed: u64, high_score: u32) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        Self {
            seed,
            obstacles: generate_obstacles(&mut rng),
            status: RoundStatus::Playing,
            ..Self::ready(high_score)
        }
    }

    pub fn is_game_over(&self) -> bool {
        matches!(self.status, RoundStatus::GameOver { .. })
    }

    pub fn is_level_complete(&self) -> bool {
        matches!(self.status, RoundStatus::LevelComplete { .. })
    }

    /// Player position along the course
    pub fn player_world_x(&self) -> f32 {
        camera::world_x(self.player.pos.x, self.world_offset)
    }

    /// Raise the high score to the current score if it beats it
    pub(crate) fn commit_high_score(&mut self) {
        if self.score > self.high_score {
            self.high_score = self.score;
            self.events.push(GameEvent::NewHighScore { score: self.score });
        }
    }

    pub fn diagnostics(&self) -> Diagnostics {
        Diagnostics {
            seed: self.seed,
            tick: self.tick,
            score: self.score,
            high_score: self.high_score,
            status: self.status.as_str(),
            world_offset: self.world_offset,
            player_x: self.player.pos.x,
            player_y: self.player.pos.y,
            active_obstacles: self.obstacles.iter().filter(|o| o.active).count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_round_is_stationary() {
        let state = GameState::new(42, 120);
        assert_eq!(state.status, RoundStatus::Playing);
        assert_eq!(state.player.vel, Vec2::ZERO);
        assert!(!state.player.jumping);
        assert_eq!(state.player.pos, Vec2::new(PLAYER_START_X, GROUND_Y));
        assert_eq!(state.high_score, 120);
        assert_eq!(state.score, 0);
        assert_eq!(state.world_offset, 0.0);
        assert_eq!(state.obstacles.len(), OBSTACLE_COUNT);
    }

    #[test]
    fn test_ready_state_has_no_obstacles() {
        let state = GameState::ready(7);
        assert_eq!(state.status, RoundStatus::Ready);
        assert!(state.obstacles.is_empty());
        assert!(!state.status.is_terminal());
    }

    #[test]
    fn test_same_seed_same_layout() {
        let a = GameState::new(2024, 0);
        let b = GameState::new(2024, 0);
        assert_eq!(a.obstacles, b.obstacles);
    }

    #[test]
    fn test_commit_high_score_only_raises() {
        let mut state = GameState::new(1, 100);
        state.score = 60;
        state.commit_high_score();
        assert_eq!(state.high_score, 100);
        assert!(state.events.is_empty());

        state.score = 130;
        state.commit_high_score();
        assert_eq!(state.high_score, 130);
        assert_eq!(state.events, vec![GameEvent::NewHighScore { score: 130 }]);
    }

    #[test]
    fn test_diagnostics_serialize() {
        let state = GameState::new(9, 0);
        let json = serde_json::to_string(&state.diagnostics()).unwrap();
        assert!(json.contains("\"status\":\"playing\""));
        assert!(json.contains("\"active_obstacles\":14"));
    }
}
