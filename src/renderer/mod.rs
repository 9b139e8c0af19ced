//! Rendering onto a 2D drawing surface
//!
//! The frame is drawn through the small `Surface` trait (filled circles,
//! rectangles, text, global alpha) so the draw order can be checked without
//! a browser. On the web the surface is a canvas 2D context.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod recording;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
pub use recording::{DrawCall, RecordingSurface};

use glam::Vec2;

use crate::sim::{Color, GameState};
use crate::ui::{self, Rect, ReplayButton};

/// Horizontal text anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
}

impl TextAlign {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
        }
    }
}

/// Vertical text anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextBaseline {
    Top,
    Middle,
}

impl TextBaseline {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextBaseline::Top => "top",
            TextBaseline::Middle => "middle",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub font: &'static str,
    pub color: Color,
    pub align: TextAlign,
    pub baseline: TextBaseline,
}

/// Drawing primitives consumed by the game
pub trait Surface {
    /// Logical size in pixels
    fn size(&self) -> Vec2;
    /// Fill the whole surface (a translucent colour leaves motion trails)
    fn fill(&mut self, color: Color);
    fn fill_rect(&mut self, rect: Rect, color: Color);
    fn stroke_rect(&mut self, rect: Rect, color: Color, line_width: f32);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);
    fn fill_text(&mut self, text: &str, pos: Vec2, style: &TextStyle);
    fn set_alpha(&mut self, alpha: f32);
}

/// Draw with a temporary global alpha, restoring full opacity afterwards
pub fn with_alpha<S: Surface + ?Sized>(surface: &mut S, alpha: f32, draw: impl FnOnce(&mut S)) {
    surface.set_alpha(alpha.clamp(0.0, 1.0));
    draw(surface);
    surface.set_alpha(1.0);
}

/// Draw one gameplay frame: background, HUD, player, particles,
/// projectiles, enemies
pub fn draw_frame<S: Surface + ?Sized>(state: &GameState, surface: &mut S) {
    surface.fill(Color::rgba(0, 0, 0, state.config.trail_alpha));

    let score_style = TextStyle {
        font: ui::SCORE_FONT,
        color: ui::SCORE_COLOR,
        align: TextAlign::Left,
        baseline: TextBaseline::Top,
    };
    surface.fill_text(&format!("Score: {}", state.score), ui::SCORE_POS, &score_style);

    let player = &state.player;
    surface.fill_circle(player.pos, player.radius, player.color);

    for particle in &state.particles {
        with_alpha(surface, particle.alpha, |s| {
            s.fill_circle(particle.body.pos, particle.radius, particle.color)
        });
    }

    for projectile in &state.projectiles {
        surface.fill_circle(projectile.body.pos, projectile.radius, projectile.color);
    }

    for enemy in &state.enemies {
        surface.fill_circle(enemy.body.pos, enemy.radius, enemy.color);
    }
}

/// Draw the dimmed game-over overlay with the final score and replay button
pub fn draw_game_over<S: Surface + ?Sized>(state: &GameState, surface: &mut S) {
    let size = surface.size();
    surface.fill_rect(Rect::new(0.0, 0.0, size.x, size.y), ui::OVERLAY_COLOR);

    let button = ReplayButton::for_bounds(size);
    let score_style = TextStyle {
        font: ui::FINAL_SCORE_FONT,
        color: ui::SCORE_COLOR,
        align: TextAlign::Center,
        baseline: TextBaseline::Middle,
    };
    let score_pos = Vec2::new(button.rect.center().x, button.rect.min.y - ui::FINAL_SCORE_GAP);
    surface.fill_text(&format!("Score: {}", state.score), score_pos, &score_style);

    surface.fill_rect(button.rect, ui::BUTTON_FILL);
    surface.stroke_rect(button.rect, ui::BUTTON_BORDER, 2.0);
    let label_style = TextStyle {
        font: ui::BUTTON_FONT,
        color: ui::BUTTON_BORDER,
        align: TextAlign::Center,
        baseline: TextBaseline::Middle,
    };
    surface.fill_text(ui::BUTTON_LABEL, button.rect.center(), &label_style);
}
