//! Rendering
//!
//! `scene::build` turns a `GameState` into screen-space sprites; backends only
//! draw what the scene tells them to. The browser backend is a Canvas 2D context.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod scene;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
pub use scene::{FireSprite, PlayerSprite, Scene, Sprite};

use crate::error::GameError;
use crate::sim::GameState;
use crate::viewport::Viewport;

/// Draws one frame of a round
pub trait Renderer {
    fn render(&mut self, state: &GameState, viewport: &Viewport) -> Result<(), GameError>;
}

/// Circus palette
pub mod palette {
    pub const SKY_TOP: &str = "#ffd600";
    pub const SKY_BOTTOM: &str = "#e65100";
    pub const SAND: &str = "#caa058";
    pub const RING_EDGE: &str = "#ffd600";
    pub const INK: &str = "#22007b";
    pub const STRIPE: &str = "#e65100";
    pub const GOAL_POST: &str = "#1565c0";
    pub const GOLD: &str = "#ffd600";
    pub const ORANGE: &str = "#e65100";
    pub const BLUE: &str = "#1565c0";
    pub const MANE: &str = "#d98a0f";
    pub const TAIL: &str = "#ffcf6b";
    pub const PASSED: &str = "#aaa";
    pub const FLAME: [&str; 4] = ["#ff7417", "#ffd600", "#e65100", "#fff6c7"];
    pub const EMBER: &str = "#fff6c7";
}

/// Builds the scene every frame without drawing it. Used for headless runs.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub frames: u64,
    pub last_scene: Option<Scene>,
}

impl Renderer for NullRenderer {
    fn render(&mut self, state: &GameState, viewport: &Viewport) -> Result<(), GameError> {
        self.last_scene = Some(Scene::build(state, viewport, false));
        self.frames += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_renderer_keeps_last_scene() {
        let state = GameState::new(5, 0);
        let mut renderer = NullRenderer::default();
        renderer.render(&state, &Viewport::default()).unwrap();
        renderer.render(&state, &Viewport::default()).unwrap();

        assert_eq!(renderer.frames, 2);
        let scene = renderer.last_scene.unwrap();
        assert_eq!(scene.sprites.len(), state.obstacles.len());
    }
}
