//! Collision detection
//!
//! Everything in the world is a rectangle, so a half-open AABB test is all we need.
//! Boxes that only touch along an edge do not collide.

use super::camera::screen_x;
use super::state::{Obstacle, Player};
use crate::consts::*;

/// Axis-aligned bounding box in screen space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Aabb {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Strict overlap test; shared edges are not an overlap
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.x < other.x + other.width
            && self.x + self.width > other.x
            && self.y < other.y + other.height
            && self.y + self.height > other.y
    }
}

/// Player hitbox, smaller than the sprite so near misses feel fair
pub fn player_hitbox(player: &Player) -> Aabb {
    Aabb::new(
        player.pos.x + HITBOX_INSET_X,
        player.pos.y + HITBOX_INSET_Y,
        player.width - HITBOX_SHRINK_W,
        player.height - HITBOX_SHRINK_H,
    )
}

/// Obstacle box moved into screen space
pub fn obstacle_box(obstacle: &Obstacle, world_offset: f32) -> Aabb {
    Aabb::new(
        screen_x(obstacle.x, world_offset),
        obstacle.y,
        obstacle.width,
        obstacle.height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn test_overlap() {
        let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
        assert!(a.overlaps(&Aabb::new(5.0, 5.0, 10.0, 10.0)));
        assert!(a.overlaps(&Aabb::new(2.0, 2.0, 2.0, 2.0)));
        assert!(!a.overlaps(&Aabb::new(20.0, 0.0, 5.0, 5.0)));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
        assert!(!a.overlaps(&Aabb::new(10.0, 0.0, 5.0, 5.0)));
        assert!(!a.overlaps(&Aabb::new(-5.0, 0.0, 5.0, 5.0)));
        assert!(!a.overlaps(&Aabb::new(0.0, 10.0, 5.0, 5.0)));
        assert!(!a.overlaps(&Aabb::new(0.0, -5.0, 5.0, 5.0)));
    }

    #[test]
    fn test_player_hitbox_is_inset() {
        let player = Player {
            pos: Vec2::new(100.0, 50.0),
            ..Default::default()
        };
        let hb = player_hitbox(&player);
        assert_eq!(hb, Aabb::new(102.0, 58.0, 21.0, 20.0));
    }

    #[test]
    fn test_obstacle_box_follows_scroll() {
        let fire = Obstacle::fire(500.0, 0.0);
        let b = obstacle_box(&fire, 320.0);
        assert_eq!(b.x, 180.0);
        assert_eq!(b.y, FIRE_Y);
        assert_eq!(b.width, FIRE_SIZE);
    }

    #[test]
    fn test_obstacle_box_matches_player_world_frame() {
        use crate::sim::{GameState, camera};

        let mut state = GameState::new(1, 0);
        state.world_offset = 437.5;
        state.player.pos.x = 60.0;
        let lion = Obstacle::animal(state.player_world_x(), 0.0);

        // An obstacle at the player's world x sits at the player's screen x
        let b = obstacle_box(&lion, state.world_offset);
        assert_eq!(b.x, state.player.pos.x);
        assert_eq!(camera::world_x(b.x, state.world_offset), lion.x);
        assert_eq!(state.player_world_x(), 497.5);
    }
}
