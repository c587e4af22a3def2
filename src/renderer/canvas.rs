//! Canvas 2D backend

use std::f64::consts::{PI, TAU};

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::palette;
use super::scene::{FireSprite, PlayerSprite, Scene, Sprite};
use super::Renderer;
use crate::error::GameError;
use crate::sim::GameState;
use crate::viewport::Viewport;

const TITLE: &str = "Circus Jump Challenge";

pub struct CanvasRenderer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    /// Flicker patrolling fire rings
    pub animate: bool,
}

impl CanvasRenderer {
    pub fn new(canvas: HtmlCanvasElement, animate: bool) -> Result<Self, GameError> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or(GameError::ContextUnavailable)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| GameError::ContextUnavailable)?;
        Ok(Self {
            canvas,
            ctx,
            animate,
        })
    }

    /// Match the backing store to the viewport
    fn fit(&self, viewport: &Viewport) {
        let (w, h) = (viewport.width as u32, viewport.height as u32);
        if self.canvas.width() != w || self.canvas.height() != h {
            self.canvas.set_width(w);
            self.canvas.set_height(h);
        }
    }

    fn draw_backdrop(&self, scene: &Scene) -> Result<(), GameError> {
        let ctx = &self.ctx;
        let (w, h) = (scene.width as f64, scene.height as f64);
        let ground = scene.ground_y as f64;

        ctx.clear_rect(0.0, 0.0, w, h);
        let sky = ctx.create_linear_gradient(0.0, 0.0, 0.0, h);
        sky.add_color_stop(0.0, palette::SKY_TOP)?;
        sky.add_color_stop(0.85, palette::SKY_BOTTOM)?;
        ctx.set_fill_style_canvas_gradient(&sky);
        ctx.fill_rect(0.0, 0.0, w, h);

        ctx.set_fill_style_str(palette::SAND);
        ctx.fill_rect(0.0, ground + 24.0, w, h - ground - 24.0);
        ctx.set_fill_style_str(palette::RING_EDGE);
        ctx.fill_rect(0.0, ground + 18.0, w, 8.0);
        ctx.set_stroke_style_str(palette::INK);
        ctx.set_line_width(4.0);
        ctx.begin_path();
        ctx.move_to(0.0, ground + 18.0);
        ctx.line_to(w, ground + 18.0);
        ctx.stroke();

        ctx.set_stroke_style_str(palette::STRIPE);
        ctx.set_line_width(7.0);
        for x in scene.stripes {
            ctx.begin_path();
            ctx.move_to(x as f64, 0.0);
            ctx.line_to(x as f64, h);
            ctx.stroke();
        }
        Ok(())
    }

    fn draw_fire_ring(&self, x: f32, y: f32, ring: &FireSprite) -> Result<(), GameError> {
        let ctx = &self.ctx;
        ctx.save();
        ctx.translate(x as f64, y as f64 + 9.0)?;
        for (i, angle) in ring.flames.iter().enumerate() {
            ctx.save();
            ctx.rotate(*angle as f64)?;
            ctx.begin_path();
            ctx.move_to(0.0, -22.0);
            ctx.line_to(-5.0, -10.0);
            ctx.line_to(5.0, -10.0);
            ctx.close_path();
            ctx.set_fill_style_str(palette::FLAME[i % palette::FLAME.len()]);
            ctx.fill();
            ctx.restore();
        }
        ctx.begin_path();
        ctx.arc(0.0, 0.0, 17.0, 0.0, TAU)?;
        ctx.set_line_width(4.3);
        ctx.set_stroke_style_str(palette::RING_EDGE);
        ctx.stroke();
        ctx.begin_path();
        ctx.arc(0.0, 0.0, 7.0, 0.0, TAU)?;
        ctx.set_fill_style_str(palette::EMBER);
        ctx.fill();
        ctx.restore();
        Ok(())
    }

    fn draw_lion(&self, x: f32, y: f32, passed: bool) -> Result<(), GameError> {
        let ctx = &self.ctx;
        ctx.save();
        ctx.translate(x as f64, y as f64)?;
        ctx.set_fill_style_str(if passed { palette::PASSED } else { palette::ORANGE });
        ctx.fill_rect(-16.0, 9.0, 34.0, 15.0);
        ctx.begin_path();
        ctx.arc(-5.0, 6.0, 13.0, 0.0, TAU)?;
        ctx.set_fill_style_str(palette::MANE);
        ctx.fill();
        ctx.begin_path();
        ctx.arc(-3.0, 6.0, 9.0, 0.0, TAU)?;
        ctx.set_fill_style_str(palette::GOLD);
        ctx.fill();
        ctx.fill_rect(-6.0, 12.0, 7.0, 4.0);
        ctx.set_fill_style_str(palette::INK);
        ctx.fill_rect(-15.0, 13.0, 4.0, 6.0);
        ctx.begin_path();
        ctx.move_to(16.0, 20.0);
        ctx.line_to(24.0, 27.0);
        ctx.set_line_width(2.7);
        ctx.set_stroke_style_str(palette::TAIL);
        ctx.stroke();
        ctx.restore();
        Ok(())
    }

    fn draw_goal(&self, scene: &Scene) -> Result<(), GameError> {
        let ctx = &self.ctx;
        let (x, ground) = (scene.goal_x as f64, scene.ground_y as f64);
        ctx.save();
        ctx.set_global_alpha(0.83);
        ctx.set_fill_style_str(palette::GOAL_POST);
        ctx.fill_rect(x, ground - 60.0, 13.0, 70.0);
        ctx.set_fill_style_str(palette::GOLD);
        ctx.set_font("bold 27px Arial, monospace");
        ctx.rotate(-0.04)?;
        ctx.fill_text("GOAL!", x - 14.0, ground - 15.0)?;
        ctx.restore();
        Ok(())
    }

    fn draw_acrobat(&self, player: &PlayerSprite) -> Result<(), GameError> {
        let ctx = &self.ctx;
        let jumping = player.jumping;
        ctx.save();
        ctx.translate(player.x as f64, player.y as f64)?;
        if player.facing_left {
            ctx.scale(-1.0, 1.0)?;
        }

        // Body and head
        ctx.set_fill_style_str(if jumping { palette::GOLD } else { palette::ORANGE });
        ctx.fill_rect(-10.0, 2.0, 22.0, 22.0);
        ctx.begin_path();
        ctx.arc(0.0, -8.0, 10.0, 0.0, TAU)?;
        ctx.set_fill_style_str(palette::GOLD);
        ctx.fill();
        ctx.begin_path();
        ctx.arc(0.0, -12.0, 8.0, PI, TAU)?;
        ctx.set_fill_style_str(palette::BLUE);
        ctx.fill();
        ctx.set_stroke_style_str(palette::BLUE);
        ctx.set_line_width(2.5);
        ctx.begin_path();
        ctx.arc(-3.0, -14.0, 2.6, 0.0, TAU)?;
        ctx.stroke();

        // Arms, raised mid-jump
        ctx.set_stroke_style_str(palette::INK);
        ctx.set_line_width(3.5);
        let limb = |from: (f64, f64), to: (f64, f64)| {
            ctx.begin_path();
            ctx.move_to(from.0, from.1);
            ctx.line_to(to.0, to.1);
            ctx.stroke();
        };
        limb((-8.0, 6.0), (-15.0, if jumping { -8.0 } else { 1.0 }));
        limb((8.0, 5.0), (15.0, if jumping { -6.0 } else { 3.0 }));

        // Legs, tucked mid-jump
        ctx.set_line_width(4.0);
        limb((-7.0, 16.0), (-13.0, if jumping { 28.0 } else { 37.0 }));
        limb((7.0, 17.0), (13.0, if jumping { 30.0 } else { 40.0 }));

        ctx.restore();
        Ok(())
    }

    fn draw_watermark(&self) -> Result<(), GameError> {
        let ctx = &self.ctx;
        ctx.save();
        ctx.set_global_alpha(0.29);
        ctx.set_font("22px Arial");
        ctx.set_fill_style_str(palette::INK);
        ctx.fill_text(TITLE, 40.0, 34.0)?;
        ctx.restore();
        Ok(())
    }
}

impl Renderer for CanvasRenderer {
    fn render(&mut self, state: &GameState, viewport: &Viewport) -> Result<(), GameError> {
        self.fit(viewport);
        let scene = Scene::build(state, viewport, self.animate);

        self.draw_backdrop(&scene)?;
        for sprite in &scene.sprites {
            match sprite {
                Sprite::Fire { x, y, ring } => self.draw_fire_ring(*x, *y, ring)?,
                Sprite::Lion { x, y, passed } => self.draw_lion(*x, *y, *passed)?,
            }
        }
        self.draw_goal(&scene)?;
        self.draw_acrobat(&scene.player)?;
        self.draw_watermark()
    }
}
