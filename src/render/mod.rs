//! Canvas2D rendering
//!
//! Draws the level-themed background, scrolling starfield, emoji sprites,
//! glowing projectiles, and particle bursts. Applies screen shake as a
//! canvas translation.

pub mod starfield;

use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::consts::*;
use crate::settings::Settings;
use crate::sim::{EnemyKind, GamePhase, GameState, ParticleColor};
use starfield::Starfield;

/// CSS color for a particle tint
fn particle_css(color: ParticleColor) -> &'static str {
    match color {
        ParticleColor::Crumb => "#d2691e",
        ParticleColor::Toxic => "#00ff00",
        ParticleColor::Hull => "#ff0000",
    }
}

pub struct CanvasRenderer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    stars: Starfield,
}

impl CanvasRenderer {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;

        let stars = Starfield::new(canvas.width() as f64, canvas.height() as f64);

        Ok(Self { canvas, ctx, stars })
    }

    /// Render one frame of the current state
    pub fn draw(&mut self, state: &GameState, settings: &Settings, dt: f32) {
        let w = self.canvas.width() as f64;
        let h = self.canvas.height() as f64;
        let theme = state.level().theme;

        self.stars.advance(dt as f64, w, h);

        self.ctx.save();

        if state.screen_shake > 0.0 && settings.effective_screen_shake() {
            let amp = SHAKE_AMPLITUDE as f64;
            let dx = (js_sys::Math::random() - 0.5) * 2.0 * amp;
            let dy = (js_sys::Math::random() - 0.5) * 2.0 * amp;
            let _ = self.ctx.translate(dx, dy);
        }

        // Oversize clear so shake never exposes the page background
        self.ctx.set_fill_style_str(theme.background);
        self.ctx.fill_rect(-10.0, -10.0, w + 20.0, h + 20.0);

        self.stars.draw(&self.ctx, theme.star);

        if settings.particles {
            self.draw_particles(state);
        }

        if state.phase == GamePhase::Playing {
            self.draw_emoji(state.player.pos.x, state.player.pos.y, "\u{1F680}", 60.0);
            self.draw_shots(state);
            self.draw_enemies(state);
        }

        self.ctx.restore();
    }

    fn draw_particles(&self, state: &GameState) {
        for p in &state.particles {
            self.ctx
                .set_global_alpha((p.life / PARTICLE_LIFE).clamp(0.0, 1.0) as f64);
            self.ctx.set_fill_style_str(particle_css(p.color));
            self.ctx
                .fill_rect(p.pos.x as f64, p.pos.y as f64, p.size as f64, p.size as f64);
        }
        self.ctx.set_global_alpha(1.0);
    }

    fn draw_shots(&self, state: &GameState) {
        // Player shots: warm glow
        for shot in &state.shots {
            self.draw_glow_dot(shot.pos.x as f64, shot.pos.y as f64, 5.0, "#ffaa00", 10.0);
        }
        // Virus shots: toxic green
        for shot in &state.enemy_shots {
            self.draw_glow_dot(shot.pos.x as f64, shot.pos.y as f64, 6.0, "#00ff00", 5.0);
        }
    }

    fn draw_glow_dot(&self, x: f64, y: f64, radius: f64, color: &str, blur: f64) {
        self.ctx.set_fill_style_str(color);
        self.ctx.begin_path();
        let _ = self.ctx.arc(x, y, radius, 0.0, std::f64::consts::TAU);
        self.ctx.fill();

        self.ctx.set_shadow_blur(blur);
        self.ctx.set_shadow_color(color);
        self.ctx.stroke();
        self.ctx.set_shadow_blur(0.0);
    }

    fn draw_enemies(&self, state: &GameState) {
        for enemy in &state.enemies {
            let emoji = match enemy.kind {
                EnemyKind::Virus => "\u{1F9A0}",
                EnemyKind::Cookie => "\u{1F36A}",
            };
            self.draw_emoji(enemy.pos.x, enemy.pos.y, emoji, enemy.size as f64);
        }
    }

    fn draw_emoji(&self, x: f32, y: f32, emoji: &str, size: f64) {
        self.ctx.set_font(&format!("{size}px serif"));
        self.ctx.set_text_align("center");
        self.ctx.set_text_baseline("middle");
        let _ = self.ctx.fill_text(emoji, x as f64, y as f64);
    }
}
