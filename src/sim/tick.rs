//! Per-frame simulation tick
//!
//! Advances the round by one step: controls, jump physics, scrolling, ground,
//! obstacles, and the goal check, in that order.

use super::camera;
use super::collision::{obstacle_box, player_hitbox};
use super::state::{Direction, GameEvent, GameState, Player, RoundStatus};
use crate::consts::*;
use crate::input::Controls;
use crate::viewport::Viewport;

/// Advance the game state by one tick.
///
/// Events from this tick replace whatever was left in `state.events`.
/// Only a `Playing` round is advanced.
pub fn tick(state: &mut GameState, controls: &Controls, viewport: &Viewport) {
    state.events.clear();

    if state.status != RoundStatus::Playing {
        return;
    }

    state.tick += 1;

    steer(&mut state.player, controls);

    if controls.jump && !state.player.jumping {
        let player = &mut state.player;
        player.jumping = true;
        player.vel.y = -JUMP_VELOCITY;
        player.jump_time = 0;
        state.events.push(GameEvent::Jumped);
    }

    apply_gravity(&mut state.player, state.ground_y);

    state.player.pos += state.player.vel;

    camera::follow(
        &mut state.player,
        &mut state.world_offset,
        viewport,
        state.win_line,
    );

    land(&mut state.player, state.ground_y);

    update_obstacles(state);

    if state.status == RoundStatus::Playing && state.player_world_x() > state.win_line - WIN_MARGIN {
        state.commit_high_score();
        state.status = RoundStatus::LevelComplete { score: state.score };
        state.events.push(GameEvent::LevelCompleted { score: state.score });
        log::info!(
            "Level complete at tick={} score={}",
            state.tick,
            state.score
        );
    }
}

/// Run speed from held direction, friction otherwise
fn steer(player: &mut Player, controls: &Controls) {
    if controls.left {
        player.vel.x = -RUN_LEFT_SPEED;
        player.direction = Direction::Left;
    } else if controls.right {
        player.vel.x = RUN_RIGHT_SPEED;
        player.direction = Direction::Right;
    } else {
        player.vel.x *= FRICTION;
        if player.vel.x.abs() < STOP_THRESHOLD {
            player.vel.x = 0.0;
        }
    }
}

/// Floaty rise, then a slower pull down once the rise is over
fn apply_gravity(player: &mut Player, ground_y: f32) {
    if player.jumping {
        player.jump_time += 1;
        player.vel.y += if player.jump_time > RISE_TICKS {
            FALL_GRAVITY
        } else {
            RISE_GRAVITY
        };
    } else if player.pos.y < ground_y {
        player.vel.y += FREE_FALL_GRAVITY;
    }
}

/// The ground is a hard floor
fn land(player: &mut Player, ground_y: f32) {
    if player.pos.y > ground_y {
        player.pos.y = ground_y;
        player.vel.y = 0.0;
        player.jumping = false;
        player.jump_time = 0;
    }
    player.pos.y = player.pos.y.min(ground_y);
}

/// Move patrolling obstacles, then resolve hits and clears in course order.
///
/// Every obstacle moves; after the first hit nothing is resolved, so a dead
/// player scores nothing more.
fn update_obstacles(state: &mut GameState) {
    let patrol_max = state.win_line - PATROL_END_MARGIN;
    let hitbox = player_hitbox(&state.player);
    let player_world_x = state.player_world_x();

    for i in 0..state.obstacles.len() {
        let obstacle = &mut state.obstacles[i];
        obstacle.x += obstacle.dx;
        if obstacle.is_patrolling() && (obstacle.x < PATROL_MIN_X || obstacle.x > patrol_max) {
            obstacle.dx = -obstacle.dx;
        }

        if !obstacle.active || !state.player.alive {
            continue;
        }

        if hitbox.overlaps(&obstacle_box(obstacle, state.world_offset)) {
            let kind = obstacle.kind;
            state.player.alive = false;
            state.commit_high_score();
            state.status = RoundStatus::GameOver { score: state.score };
            state.events.push(GameEvent::Died { score: state.score });
            log::warn!(
                "Game over at tick={} score={} (hit {:?} #{})",
                state.tick,
                state.score,
                kind,
                i
            );
            continue;
        }

        if player_world_x > obstacle.trailing_edge() {
            obstacle.active = false;
            let kind = obstacle.kind;
            let points = kind.points();
            state.score += points;
            state.events.push(GameEvent::Scored { kind, points });
        }
    }
}
