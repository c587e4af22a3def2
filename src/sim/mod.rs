//! Simulation module
//!
//! All gameplay logic lives here. This module stays free of platform code:
//! - Seeded RNG only
//! - Controls and viewport are passed in, never read from globals
//! - Stable iteration order (obstacles in course order)

pub mod camera;
pub mod collision;
pub mod obstacles;
pub mod state;
pub mod tick;

pub use collision::{Aabb, obstacle_box, player_hitbox};
pub use obstacles::generate_obstacles;
pub use state::{
    Diagnostics, Direction, GameEvent, GameState, Obstacle, ObstacleKind, Player, RoundStatus,
};
pub use tick::tick;
