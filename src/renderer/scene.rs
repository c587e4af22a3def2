//! Screen-space layout of a frame

use crate::sim::camera::screen_x;
use crate::sim::{Direction, GameState, ObstacleKind};
use crate::viewport::Viewport;

/// Vertical tent stripes in the background
pub const STRIPE_COUNT: usize = 8;
pub const STRIPE_SPACING: f32 = 62.0;
pub const STRIPE_START_X: f32 = 35.0;

/// Flames around a fire ring
pub const FLAME_COUNT: usize = 7;

/// Display frames are assumed to be ~60 Hz for the flame flicker
const MS_PER_TICK: f32 = 1000.0 / 60.0;
const FLICKER_PERIOD_MS: f32 = 360.0;

/// Stripe x positions for a world offset; they scroll and wrap every stripe spacing
pub fn stripe_positions(world_offset: f32) -> [f32; STRIPE_COUNT] {
    let shift = world_offset % STRIPE_SPACING;
    std::array::from_fn(|i| STRIPE_START_X + i as f32 * STRIPE_SPACING - shift)
}

/// Goal post position on screen
pub fn goal_screen_x(state: &GameState) -> f32 {
    screen_x(state.win_line, state.world_offset)
}

/// Rotation of each flame around a ring, in radians
pub fn flame_angles(tick: u64, animate: bool) -> [f32; FLAME_COUNT] {
    let step = std::f32::consts::TAU / FLAME_COUNT as f32;
    let phase = tick as f32 * MS_PER_TICK / FLICKER_PERIOD_MS;
    std::array::from_fn(|i| {
        let base = step * i as f32;
        if animate {
            base + (phase + i as f32).sin() / 4.0
        } else {
            base
        }
    })
}

#[derive(Debug, Clone, PartialEq)]
pub struct FireSprite {
    pub flames: [f32; FLAME_COUNT],
}

/// An obstacle at its screen position
#[derive(Debug, Clone, PartialEq)]
pub enum Sprite {
    Fire { x: f32, y: f32, ring: FireSprite },
    /// Greyed out once cleared
    Lion { x: f32, y: f32, passed: bool },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerSprite {
    pub x: f32,
    pub y: f32,
    pub jumping: bool,
    pub facing_left: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub width: f32,
    pub height: f32,
    pub ground_y: f32,
    pub stripes: [f32; STRIPE_COUNT],
    pub sprites: Vec<Sprite>,
    pub goal_x: f32,
    pub player: PlayerSprite,
}

impl Scene {
    /// Lay out a frame. `animate` makes only patrolling fire rings flicker.
    pub fn build(state: &GameState, viewport: &Viewport, animate: bool) -> Self {
        let sprites = state
            .obstacles
            .iter()
            .map(|o| {
                let x = screen_x(o.x, state.world_offset);
                match o.kind {
                    ObstacleKind::Fire => Sprite::Fire {
                        x,
                        y: o.y,
                        ring: FireSprite {
                            flames: flame_angles(state.tick, animate && o.is_patrolling()),
                        },
                    },
                    ObstacleKind::Animal => Sprite::Lion {
                        x,
                        y: o.y,
                        passed: !o.active,
                    },
                }
            })
            .collect();

        let player = &state.player;
        Self {
            width: viewport.width,
            height: viewport.height,
            ground_y: state.ground_y,
            stripes: stripe_positions(state.world_offset),
            sprites,
            goal_x: goal_screen_x(state),
            player: PlayerSprite {
                x: player.pos.x,
                y: player.pos.y,
                jumping: player.jumping,
                facing_left: player.direction == Direction::Left,
            },
        }
    }
}
