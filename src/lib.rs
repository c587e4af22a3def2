//! Circus Jump - A side-scrolling circus arcade game
//!
//! Core modules:
//! - `sim`: Simulation (physics, collisions, scrolling, game state)
//! - `game`: Round owner wiring the simulation to its collaborators
//! - `driver`: Frame-callback loop driver
//! - `renderer`: Canvas 2D rendering
//! - `persistence`: High score and settings storage

pub mod audio;
pub mod driver;
pub mod error;
pub mod game;
pub mod input;
pub mod menu;
pub mod persistence;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod viewport;

pub use error::GameError;
pub use game::Game;
pub use settings::Settings;
pub use viewport::Viewport;

/// Game configuration constants
///
/// Physics values are per tick and tuned for one tick per ~60 Hz display frame.
pub mod consts {
    /// Canvas limits (the canvas never grows past these)
    pub const CANVAS_MAX_WIDTH: f32 = 430.0;
    pub const CANVAS_MAX_HEIGHT: f32 = 240.0;
    /// Space reserved around the canvas for the page chrome
    pub const CANVAS_MARGIN_X: f32 = 24.0;
    pub const CANVAS_MARGIN_Y: f32 = 120.0;

    /// World layout
    pub const GROUND_Y: f32 = 186.0;
    pub const WIN_LINE: f32 = 2000.0;
    /// Player must get this close to the goal post to finish
    pub const WIN_MARGIN: f32 = 8.0;

    /// Player defaults
    pub const PLAYER_START_X: f32 = 25.0;
    pub const PLAYER_WIDTH: f32 = 27.0;
    pub const PLAYER_HEIGHT: f32 = 34.0;

    /// Horizontal control
    pub const RUN_LEFT_SPEED: f32 = 2.2;
    pub const RUN_RIGHT_SPEED: f32 = 3.2;
    /// Velocity multiplier per tick with no direction held
    pub const FRICTION: f32 = 0.78;
    /// Below this speed the player snaps to a stop
    pub const STOP_THRESHOLD: f32 = 0.15;

    /// Jumping
    pub const JUMP_VELOCITY: f32 = 7.7;
    /// Ticks of the rising phase before gravity switches to FALL_GRAVITY
    pub const RISE_TICKS: u32 = 22;
    pub const RISE_GRAVITY: f32 = 0.38;
    pub const FALL_GRAVITY: f32 = 0.22;
    /// Gravity when airborne without having jumped
    pub const FREE_FALL_GRAVITY: f32 = 0.85;

    /// Forgiving hitbox: inset from the sprite's top-left and total shrink
    pub const HITBOX_INSET_X: f32 = 2.0;
    pub const HITBOX_SHRINK_W: f32 = 6.0;
    pub const HITBOX_INSET_Y: f32 = 8.0;
    pub const HITBOX_SHRINK_H: f32 = 14.0;

    /// Obstacle layout
    pub const OBSTACLE_COUNT: usize = 14;
    pub const FIRST_OBSTACLE_X: f32 = 125.0;
    pub const OBSTACLE_SPACING: f32 = 75.0;
    pub const OBSTACLE_SPACING_JITTER: f32 = 48.0;

    pub const FIRE_Y: f32 = 182.0;
    pub const FIRE_SIZE: f32 = 34.0;
    /// Chance that an eligible fire ring patrols
    pub const FIRE_PATROL_CHANCE: f64 = 0.3;
    pub const FIRE_PATROL_MIN_SPEED: f32 = 0.8;
    pub const FIRE_PATROL_MAX_SPEED: f32 = 2.6;

    pub const ANIMAL_Y: f32 = 192.0;
    pub const ANIMAL_WIDTH: f32 = 36.0;
    pub const ANIMAL_HEIGHT: f32 = 26.0;
    pub const ANIMAL_PATROL_CHANCE: f64 = 0.5;
    pub const ANIMAL_PATROL_MAX_SPEED: f32 = 2.4;

    /// Patrolling obstacles turn around outside [PATROL_MIN_X, WIN_LINE - PATROL_END_MARGIN]
    pub const PATROL_MIN_X: f32 = 30.0;
    pub const PATROL_END_MARGIN: f32 = 50.0;

    /// Points per cleared obstacle
    pub const FIRE_POINTS: u32 = 30;
    pub const ANIMAL_POINTS: u32 = 40;

    /// Touch swipe thresholds (pixels)
    pub const SWIPE_X_THRESHOLD: f32 = 28.0;
    pub const SWIPE_JUMP_THRESHOLD: f32 = 22.0;

    /// Heartbeat log interval (frames)
    pub const HEARTBEAT_FRAMES: u64 = 30;
}
