//! Side-scrolling camera
//!
//! The player runs freely until the middle of the screen. Past that point the
//! world scrolls instead, until the goal post comes into view.

use super::state::Player;
use crate::viewport::Viewport;

/// World x to screen x
#[inline]
pub fn screen_x(world_x: f32, world_offset: f32) -> f32 {
    world_x - world_offset
}

/// Screen x to world x
#[inline]
pub fn world_x(screen_x: f32, world_offset: f32) -> f32 {
    screen_x + world_offset
}

/// Largest world offset the camera scrolls to
#[inline]
pub fn scroll_limit(win_line: f32, viewport: &Viewport) -> f32 {
    win_line - viewport.width * 0.5
}

/// Scroll the world when the player crosses the middle of the screen.
///
/// Moves the excess into `world_offset` and pins the player at the midpoint.
/// Returns the distance scrolled this call.
pub fn follow(player: &mut Player, world_offset: &mut f32, viewport: &Viewport, win_line: f32) -> f32 {
    let midpoint = viewport.half_width();
    if player.pos.x > midpoint && *world_offset < scroll_limit(win_line, viewport) {
        let excess = player.pos.x - midpoint;
        *world_offset += excess;
        player.pos.x = midpoint;
        excess
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn player_at(x: f32) -> Player {
        Player {
            pos: Vec2::new(x, 186.0),
            ..Default::default()
        }
    }

    #[test]
    fn test_no_scroll_before_midpoint() {
        let viewport = Viewport::default();
        let mut player = player_at(200.0);
        let mut offset = 0.0;
        assert_eq!(follow(&mut player, &mut offset, &viewport, 2000.0), 0.0);
        assert_eq!(player.pos.x, 200.0);
        assert_eq!(offset, 0.0);
    }

    #[test]
    fn test_scroll_pins_player_at_midpoint() {
        let viewport = Viewport::default();
        let mut player = player_at(221.0);
        let mut offset = 100.0;
        let scrolled = follow(&mut player, &mut offset, &viewport, 2000.0);
        assert_eq!(scrolled, 6.0);
        assert_eq!(offset, 106.0);
        assert_eq!(player.pos.x, viewport.half_width());
    }

    #[test]
    fn test_scroll_stops_at_limit() {
        let viewport = Viewport::default();
        let limit = scroll_limit(2000.0, &viewport);
        assert_eq!(limit, 1785.0);

        let mut player = player_at(260.0);
        let mut offset = limit;
        follow(&mut player, &mut offset, &viewport, 2000.0);
        // Camera is done; the player runs on screen toward the goal
        assert_eq!(offset, limit);
        assert_eq!(player.pos.x, 260.0);
    }

    #[test]
    fn test_transform_round_trip() {
        assert_eq!(screen_x(500.0, 120.0), 380.0);
        assert_eq!(world_x(screen_x(500.0, 120.0), 120.0), 500.0);
    }
}
