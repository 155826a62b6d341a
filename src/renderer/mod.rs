//! Canvas2D renderer (wasm only)
//!
//! A pure function of the post-step simulation state: draws the road,
//! entities, power-up effects, and overlays. Owns no simulation state;
//! even the stripe scroll is derived from the distance accumulator.

use web_sys::CanvasRenderingContext2d;

use crate::assets::Assets;
use crate::consts::*;
use crate::messages::MessageTicker;
use crate::sim::{GameState, PowerUpKind};

pub struct Renderer {
    ctx: CanvasRenderingContext2d,
    assets: Assets,
}

impl Renderer {
    pub fn new(ctx: CanvasRenderingContext2d, assets: Assets) -> Self {
        ctx.set_image_smoothing_enabled(true);
        Self { ctx, assets }
    }

    pub fn render(&self, state: &GameState, messages: &MessageTicker, show_speed: bool) {
        self.draw_road(state.distance);

        for enemy in &state.enemies {
            let img = self.assets.enemy(enemy.asset);
            if Assets::ready(img) {
                self.ctx.save();
                self.ctx.set_shadow_color("rgba(255,255,255,0.25)");
                self.ctx.set_shadow_blur(14.0);
                let _ = self.ctx.draw_image_with_html_image_element_and_dw_and_dh(
                    img,
                    enemy.pos.x as f64,
                    enemy.pos.y as f64,
                    CAR_W as f64,
                    CAR_H as f64,
                );
                self.ctx.restore();
            }
        }

        let player_img = self.assets.vehicle(state.vehicle);
        if Assets::ready(player_img) {
            self.ctx.save();
            self.ctx.set_shadow_color("rgba(255,255,255,0.35)");
            self.ctx.set_shadow_blur(18.0);
            let _ = self.ctx.draw_image_with_html_image_element_and_dw_and_dh(
                player_img,
                state.player.pos.x as f64,
                state.player.pos.y as f64,
                CAR_W as f64,
                CAR_H as f64,
            );
            self.ctx.restore();
        }

        self.draw_power_effects(state);
        self.draw_announcement(state);
        self.draw_banner(messages);

        if show_speed {
            self.ctx.save();
            self.ctx.set_global_alpha(0.5);
            self.ctx.set_fill_style_str("#fff");
            self.ctx.set_font("12px sans-serif");
            self.ctx.set_text_align("left");
            let _ = self.ctx.fill_text(
                &format!(
                    "Speed: {:.1} | Car: {}",
                    state.speed,
                    state.vehicle_spec().name
                ),
                20.0,
                (SURFACE_H - 20.0) as f64,
            );
            self.ctx.restore();
        }
    }

    /// Road, center stripes, and shoulder markers. The scroll offset is
    /// the accumulated speed (distance * SPEED_TO_DISTANCE), so the road
    /// freezes exactly when the simulation does.
    fn draw_road(&self, distance: f32) {
        let ctx = &self.ctx;
        ctx.clear_rect(0.0, 0.0, SURFACE_W as f64, SURFACE_H as f64);
        ctx.set_fill_style_str("#141414");
        ctx.fill_rect(
            ROAD_LEFT as f64,
            0.0,
            (ROAD_RIGHT - ROAD_LEFT) as f64,
            SURFACE_H as f64,
        );

        let scroll = (distance * SPEED_TO_DISTANCE).rem_euclid(STRIPE_SPACING);
        let mut y = scroll - STRIPE_SPACING;
        while y < SURFACE_H {
            ctx.set_fill_style_str("#bbb");
            ctx.fill_rect((SURFACE_W / 2.0 - 5.0) as f64, y as f64, 10.0, 40.0);
            ctx.set_fill_style_str("#444");
            ctx.fill_rect(ROAD_LEFT as f64, y as f64, 2.0, 40.0);
            ctx.fill_rect((ROAD_RIGHT - 2.0) as f64, y as f64, 2.0, 40.0);
            y += STRIPE_SPACING;
        }

        // Subtle sheen over the asphalt
        ctx.set_fill_style_str("rgba(255,255,255,0.08)");
        ctx.fill_rect(
            ROAD_LEFT as f64,
            0.0,
            (ROAD_RIGHT - ROAD_LEFT) as f64,
            SURFACE_H as f64,
        );
    }

    fn draw_power_effects(&self, state: &GameState) {
        let Some(kind) = state.power.active else {
            return;
        };
        let ctx = &self.ctx;
        let (x, y) = (state.player.pos.x as f64, state.player.pos.y as f64);
        let (w, h) = (CAR_W as f64, CAR_H as f64);

        match kind {
            PowerUpKind::Shield => {
                ctx.save();
                if state.player.shield {
                    ctx.set_stroke_style_str("rgba(0, 255, 255, 0.7)");
                    ctx.set_shadow_color("#00ffff");
                    ctx.set_shadow_blur(15.0);
                } else {
                    ctx.set_stroke_style_str("rgba(255, 100, 100, 0.5)");
                    ctx.set_shadow_color("#ff6464");
                    ctx.set_shadow_blur(8.0);
                }
                ctx.set_line_width(4.0);
                ctx.stroke_rect(x - 6.0, y - 6.0, w + 12.0, h + 12.0);
                ctx.restore();
            }
            PowerUpKind::Slow => {
                ctx.save();
                ctx.set_stroke_style_str("rgba(100, 200, 255, 0.6)");
                for i in 0..3 {
                    let pad = 10.0 + i as f64 * 6.0;
                    ctx.stroke_rect(x - pad, y - pad, w + 2.0 * pad, h + 2.0 * pad);
                }
                ctx.restore();
                self.overlay_label("SLOW", "#00aaff");
            }
            PowerUpKind::DoubleScore => {
                ctx.save();
                ctx.set_fill_style_str("rgba(255, 215, 0, 0.15)");
                ctx.set_shadow_color("#ffd700");
                ctx.set_shadow_blur(20.0);
                ctx.fill_rect(x - 8.0, y - 8.0, w + 16.0, h + 16.0);
                ctx.restore();
                self.overlay_label("2X SCORE MULTIPLIER", "#ffd700");
            }
        }
    }

    fn overlay_label(&self, text: &str, color: &str) {
        let ctx = &self.ctx;
        ctx.save();
        ctx.set_global_alpha(0.3);
        ctx.set_fill_style_str(color);
        ctx.set_font("bold 20px sans-serif");
        ctx.set_text_align("center");
        let _ = ctx.fill_text(text, (SURFACE_W / 2.0) as f64, 40.0);
        ctx.restore();
    }

    /// Fading "X POWER!" line after an activation
    fn draw_announcement(&self, state: &GameState) {
        let ticks = state.power.announce_ticks;
        if ticks == 0 {
            return;
        }
        let Some(kind) = state.power.active else {
            return;
        };
        let ctx = &self.ctx;
        ctx.save();
        ctx.set_global_alpha(ticks as f64 / ANNOUNCE_TICKS as f64);
        ctx.set_fill_style_str("#00ffff");
        ctx.set_font("bold 28px Courier");
        ctx.set_text_align("center");
        let _ = ctx.fill_text(
            &format!("{} POWER!", kind.label()),
            (SURFACE_W / 2.0) as f64,
            (SURFACE_H / 2.0 - 40.0) as f64,
        );
        ctx.restore();
    }

    fn draw_banner(&self, messages: &MessageTicker) {
        let Some((text, alpha)) = messages.visible() else {
            return;
        };
        let ctx = &self.ctx;
        ctx.save();
        ctx.set_global_alpha(alpha as f64);
        ctx.set_fill_style_str("#ff69b4");
        ctx.set_font("bold 18px sans-serif");
        ctx.set_text_align("center");
        let _ = ctx.fill_text(text, (SURFACE_W / 2.0) as f64, 70.0);
        ctx.restore();
    }
}
