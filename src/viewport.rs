//! Canvas dimensions
//!
//! The canvas is sized from the window and capped at the arcade resolution.

use serde::{Deserialize, Serialize};

use crate::consts::*;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: CANVAS_MAX_WIDTH,
            height: CANVAS_MAX_HEIGHT,
        }
    }
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Fit the canvas inside a window of the given inner size
    pub fn fit(inner_width: f32, inner_height: f32) -> Self {
        Self {
            width: (inner_width - CANVAS_MARGIN_X).min(CANVAS_MAX_WIDTH).max(0.0),
            height: (inner_height - CANVAS_MARGIN_Y).min(CANVAS_MAX_HEIGHT).max(0.0),
        }
    }

    /// Screen x where the camera starts scrolling
    pub fn half_width(&self) -> f32 {
        self.width / 2.0
    }
}
