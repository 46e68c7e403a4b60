//! Canvas-2D renderer
//!
//! Pure presentation: reads game state, never mutates it. The camera offset
//! is applied as a context translate so all world drawing uses world
//! coordinates; HUD and overlays draw in screen space after the restore.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::consts::{BEST_TIME_SENTINEL, LEVEL_COMPLETE_DELAY_TICKS, VIEW_HEIGHT, WORLD_WIDTH};
use crate::sim::{Coin, GamePhase, GameState, Goal, MovePath, MovingPlatform, Platform, Player};

/// Format 0xRRGGBB as a CSS color string
fn css_color(color: u32) -> String {
    format!("#{color:06X}")
}

const PLAYER_COLOR: &str = "#E74C3C";

pub struct Renderer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    /// Goal pulse phase, advanced every frame
    goal_animation: f64,
    /// Landing squish factor, recovers toward 1.0
    player_squish: f64,
}

impl Renderer {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self {
            canvas,
            ctx,
            goal_animation: 0.0,
            player_squish: 1.0,
        })
    }

    /// Advance presentation-only animations (independent of the sim tick)
    pub fn update_animations(&mut self) {
        self.goal_animation += 0.05;
        if self.player_squish < 1.0 {
            self.player_squish += 0.05;
        }
    }

    /// Trigger the landing squish
    pub fn set_player_squish(&mut self, value: f64) {
        self.player_squish = value;
    }

    /// Draw one complete frame
    pub fn render(&mut self, state: &GameState, left_held: bool, right_held: bool) {
        self.draw_background();

        self.ctx.save();
        let _ = self.ctx.translate(0.0, -state.camera.y as f64);

        self.draw_backdrop_blocks(state.camera.y as f64, state.level_height as f64);
        self.draw_ground(state.ground_y as f64, state.level_height as f64);

        for platform in &state.platforms {
            self.draw_platform(platform);
        }
        for platform in &state.moving_platforms {
            self.draw_moving_platform(platform);
        }
        for coin in &state.coins {
            self.draw_coin(coin);
        }
        self.draw_goal(&state.goal);
        self.draw_player(&state.player, left_held, right_held);
        self.draw_particles(state);

        self.ctx.restore();

        self.draw_hud(state);
        self.draw_overlay(state);
    }

    fn draw_background(&self) {
        let h = self.canvas.height() as f64;
        let gradient = self.ctx.create_linear_gradient(0.0, 0.0, 0.0, h);
        let _ = gradient.add_color_stop(0.0, "#2C3E50");
        let _ = gradient.add_color_stop(0.5, "#34495E");
        let _ = gradient.add_color_stop(1.0, "#2C3E50");
        self.ctx.set_fill_style_canvas_gradient(&gradient);
        self.ctx
            .fill_rect(0.0, 0.0, self.canvas.width() as f64, h);
    }

    /// Faint drifting squares behind the level for depth
    fn draw_backdrop_blocks(&self, camera_y: f64, level_height: f64) {
        self.ctx.set_fill_style_str("rgba(52, 73, 94, 0.3)");
        let w = self.canvas.width() as f64;
        for i in 0..20 {
            let x = (i as f64 * 100.0 + camera_y * 0.1) % w;
            let y = (i as f64 * 150.0) % level_height;
            self.ctx.fill_rect(x, y, 30.0, 30.0);
        }
    }

    fn draw_ground(&self, ground_y: f64, level_height: f64) {
        let gradient = self
            .ctx
            .create_linear_gradient(0.0, ground_y, 0.0, level_height);
        let _ = gradient.add_color_stop(0.0, "#7F8C8D");
        let _ = gradient.add_color_stop(1.0, "#95A5A6");
        self.ctx.set_fill_style_canvas_gradient(&gradient);
        self.ctx.fill_rect(
            0.0,
            ground_y,
            WORLD_WIDTH as f64,
            level_height - ground_y,
        );
    }

    fn draw_platform(&self, platform: &Platform) {
        let r = platform.rect;
        let (x, y, w, h) = (r.x as f64, r.y as f64, r.w as f64, r.h as f64);

        // Shadow, body, top highlight
        self.ctx.set_fill_style_str("rgba(0, 0, 0, 0.2)");
        self.ctx.fill_rect(x + 3.0, y + 3.0, w, h);
        self.ctx.set_fill_style_str(&css_color(platform.color));
        self.ctx.fill_rect(x, y, w, h);
        self.ctx.set_fill_style_str("rgba(255, 255, 255, 0.2)");
        self.ctx.fill_rect(x, y, w, 4.0);
    }

    fn draw_moving_platform(&self, platform: &MovingPlatform) {
        let r = platform.rect;
        let (x, y, w, h) = (r.x as f64, r.y as f64, r.w as f64, r.h as f64);

        self.ctx.set_fill_style_str("rgba(0, 0, 0, 0.3)");
        self.ctx.fill_rect(x + 3.0, y + 3.0, w, h);
        self.ctx.set_fill_style_str(&css_color(platform.color));
        self.ctx.fill_rect(x, y, w, h);

        // Direction arrow at the platform center
        self.ctx.set_fill_style_str("#fff");
        let ax = x + w / 2.0;
        let ay = y + h / 2.0;
        let s = 5.0;
        match platform.path {
            MovePath::Vertical { .. } => {
                self.ctx.fill_rect(ax - 1.0, ay - s, 2.0, s * 2.0);
                if platform.direction > 0.0 {
                    self.ctx.fill_rect(ax - 3.0, ay + s - 3.0, 6.0, 3.0);
                } else {
                    self.ctx.fill_rect(ax - 3.0, ay - s, 6.0, 3.0);
                }
            }
            MovePath::Horizontal { .. } => {
                self.ctx.fill_rect(ax - s, ay - 1.0, s * 2.0, 2.0);
                if platform.direction > 0.0 {
                    self.ctx.fill_rect(ax + s - 3.0, ay - 3.0, 3.0, 6.0);
                } else {
                    self.ctx.fill_rect(ax - s, ay - 3.0, 3.0, 6.0);
                }
            }
        }
    }

    fn draw_coin(&self, coin: &Coin) {
        if coin.collected {
            return;
        }
        let r = coin.rect;
        let pulse = (coin.animation as f64).sin() * 2.0;
        let rotation = coin.animation as f64 * 2.0;

        self.ctx.save();
        let _ = self.ctx.translate(
            (r.x + r.w / 2.0) as f64,
            (r.y + r.h / 2.0) as f64,
        );
        let _ = self.ctx.rotate(rotation);

        self.ctx.set_shadow_color("#F1C40F");
        self.ctx.set_shadow_blur(10.0 + pulse);
        self.ctx.set_fill_style_str("#F1C40F");
        self.ctx.fill_rect(
            -(r.w as f64) / 2.0,
            -(r.h as f64) / 2.0,
            r.w as f64,
            r.h as f64,
        );
        self.ctx.set_shadow_blur(0.0);

        self.ctx.set_fill_style_str("#FFF");
        self.ctx.fill_rect(
            -(r.w as f64) / 4.0,
            -(r.h as f64) / 2.0,
            r.w as f64 / 2.0,
            r.h as f64 / 4.0,
        );

        self.ctx.restore();
    }

    fn draw_goal(&self, goal: &Goal) {
        let r = goal.rect;
        let pulse = self.goal_animation.sin() * 5.0;
        let (x, y) = (r.x as f64 - pulse / 2.0, r.y as f64 - pulse / 2.0);
        let (w, h) = (r.w as f64 + pulse, r.h as f64 + pulse);

        self.ctx.set_shadow_color("#F39C12");
        self.ctx.set_shadow_blur(20.0 + pulse);
        self.ctx.set_fill_style_str(&css_color(goal.color));
        self.ctx.fill_rect(x, y, w, h);
        self.ctx.set_shadow_blur(0.0);

        self.ctx.set_stroke_style_str("#E67E22");
        self.ctx.set_line_width(3.0);
        self.ctx.stroke_rect(x, y, w, h);

        self.ctx.set_fill_style_str("#fff");
        self.ctx.set_font("bold 16px Arial");
        let _ = self
            .ctx
            .fill_text("GOAL", r.x as f64 + 13.0, r.y as f64 + 30.0);
    }

    fn draw_player(&self, player: &Player, left_held: bool, right_held: bool) {
        let r = player.rect;
        let (w, h) = (r.w as f64, r.h as f64);
        let squish_y = 1.0 / self.player_squish;

        self.ctx.save();
        let _ = self
            .ctx
            .translate((r.x + r.w / 2.0) as f64, (r.y + r.h) as f64);
        let _ = self.ctx.scale(self.player_squish, squish_y);

        self.ctx.set_fill_style_str("rgba(0, 0, 0, 0.3)");
        self.ctx.fill_rect(-w / 2.0 + 2.0, -h + 2.0, w, h);

        self.ctx.set_fill_style_str(PLAYER_COLOR);
        self.ctx.fill_rect(-w / 2.0, -h, w, h);

        // Eyes track the held direction
        self.ctx.set_fill_style_str("#fff");
        self.ctx.fill_rect(-15.0, -h + 10.0, 8.0, 8.0);
        self.ctx.fill_rect(7.0, -h + 10.0, 8.0, 8.0);

        self.ctx.set_fill_style_str("#000");
        let eye_offset = if left_held {
            -2.0
        } else if right_held {
            2.0
        } else {
            0.0
        };
        self.ctx
            .fill_rect(-13.0 + eye_offset, -h + 12.0, 4.0, 4.0);
        self.ctx.fill_rect(9.0 + eye_offset, -h + 12.0, 4.0, 4.0);

        self.ctx.restore();
    }

    fn draw_particles(&self, state: &GameState) {
        for p in &state.particles {
            self.ctx.set_global_alpha(p.life.clamp(0.0, 1.0) as f64);
            self.ctx.set_fill_style_str(&css_color(p.color));
            self.ctx.fill_rect(
                p.pos.x as f64,
                p.pos.y as f64,
                p.size as f64,
                p.size as f64,
            );
        }
        self.ctx.set_global_alpha(1.0);
    }

    fn draw_hud(&self, state: &GameState) {
        self.ctx.set_fill_style_str("rgba(0, 0, 0, 0.7)");
        self.ctx.fill_rect(10.0, 10.0, 300.0, 120.0);

        self.ctx.set_fill_style_str("#ECF0F1");
        self.ctx.set_font("bold 16px Arial");
        let _ = self.ctx.fill_text(
            &format!("Level {}: {}", state.current_level + 1, state.level_name),
            20.0,
            30.0,
        );

        self.ctx.set_font("14px Arial");
        let _ = self
            .ctx
            .fill_text(&format!("Time: {:.1}s", state.stats.timer), 20.0, 50.0);
        let _ = self
            .ctx
            .fill_text(&format!("Score: {}", state.stats.score), 20.0, 70.0);
        let _ = self.ctx.fill_text(
            &format!(
                "Coins: {}/{}",
                state.stats.coins_collected,
                state.coins.len()
            ),
            20.0,
            90.0,
        );
        let _ = self.ctx.fill_text(
            &format!("Lives: {}", "\u{2764}".repeat(state.player.lives.max(0) as usize)),
            20.0,
            110.0,
        );

        let level_best = state.best_times.level(state.current_level);
        if level_best < BEST_TIME_SENTINEL {
            let _ = self
                .ctx
                .fill_text(&format!("Best: {level_best:.1}s"), 160.0, 50.0);
        }
    }

    fn draw_overlay(&self, state: &GameState) {
        match state.phase {
            GamePhase::Paused => self.draw_paused_overlay(),
            GamePhase::Dead => self.draw_dead_overlay(),
            GamePhase::GameOver => self.draw_game_over_overlay(state),
            GamePhase::LevelComplete => self.draw_level_complete_overlay(state),
            GamePhase::Won => self.draw_victory_overlay(state),
            GamePhase::Playing => {}
        }
    }

    fn dim_screen(&self, style: &str) {
        self.ctx.set_fill_style_str(style);
        self.ctx
            .fill_rect(0.0, 0.0, WORLD_WIDTH as f64, VIEW_HEIGHT as f64);
    }

    fn centered_text(&self, text: &str, y_offset: f64) {
        let _ = self.ctx.fill_text(
            text,
            WORLD_WIDTH as f64 / 2.0,
            VIEW_HEIGHT as f64 / 2.0 + y_offset,
        );
    }

    fn draw_paused_overlay(&self) {
        self.dim_screen("rgba(0, 0, 0, 0.5)");
        self.ctx.set_fill_style_str("#fff");
        self.ctx.set_text_align("center");
        self.ctx.set_font("bold 48px Arial");
        self.centered_text("PAUSED", -30.0);
        self.ctx.set_font("24px Arial");
        self.centered_text("Press ESC to resume", 20.0);
        self.ctx.set_text_align("left");
    }

    fn draw_dead_overlay(&self) {
        self.dim_screen("rgba(139, 0, 0, 0.5)");
        self.ctx.set_fill_style_str("#fff");
        self.ctx.set_text_align("center");
        self.ctx.set_font("bold 36px Arial");
        self.centered_text("RESPAWNING...", 0.0);
        self.ctx.set_text_align("left");
    }

    fn draw_game_over_overlay(&self, state: &GameState) {
        self.dim_screen("rgba(0, 0, 0, 0.8)");
        self.ctx.set_fill_style_str("#fff");
        self.ctx.set_text_align("center");
        self.ctx.set_font("bold 48px Arial");
        self.centered_text("GAME OVER", -60.0);
        self.ctx.set_font("24px Arial");
        self.centered_text(&format!("Final Score: {}", state.stats.score), -20.0);
        self.centered_text(
            &format!(
                "Coins Collected: {}/{}",
                state.stats.coins_collected,
                state.coins.len()
            ),
            10.0,
        );
        self.centered_text("Press R to Restart", 50.0);
        self.ctx.set_text_align("left");
    }

    fn draw_level_complete_overlay(&self, state: &GameState) {
        self.dim_screen("rgba(0, 100, 0, 0.8)");
        self.ctx.set_fill_style_str("#fff");
        self.ctx.set_text_align("center");
        self.ctx.set_font("bold 48px Arial");
        self.centered_text("LEVEL COMPLETE!", -80.0);
        self.ctx.set_font("24px Arial");
        self.draw_run_summary(state);

        let countdown =
            (state.level_complete_timer.min(LEVEL_COMPLETE_DELAY_TICKS) as f64 / 60.0).ceil();
        self.centered_text(&format!("Next level in {countdown}..."), 80.0);
        self.ctx.set_text_align("left");
    }

    fn draw_victory_overlay(&self, state: &GameState) {
        self.dim_screen("rgba(0, 100, 0, 0.8)");
        self.ctx.set_fill_style_str("#fff");
        self.ctx.set_text_align("center");
        self.ctx.set_font("bold 48px Arial");
        self.centered_text("ALL LEVELS COMPLETE!", -80.0);
        self.ctx.set_font("24px Arial");
        self.draw_run_summary(state);
        self.centered_text("Press R to Restart", 80.0);
        self.ctx.set_text_align("left");
    }

    /// Timer, score, coin count and the record banner shared by both
    /// completion overlays
    fn draw_run_summary(&self, state: &GameState) {
        self.centered_text(&format!("Time: {:.1}s", state.stats.timer), -40.0);
        self.centered_text(&format!("Score: {}", state.stats.score), -10.0);
        self.centered_text(
            &format!(
                "Coins: {}/{}",
                state.stats.coins_collected,
                state.coins.len()
            ),
            20.0,
        );

        let best = state.best_times.level(state.current_level);
        if best < BEST_TIME_SENTINEL && state.stats.timer == best {
            self.ctx.set_fill_style_str("#F1C40F");
            self.centered_text("NEW LEVEL RECORD!", 50.0);
            self.ctx.set_fill_style_str("#fff");
        }
    }
}
