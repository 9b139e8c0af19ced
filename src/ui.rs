//! HUD layout and the game-over replay control

use glam::Vec2;

use crate::sim::Color;

/// Score text anchor (top-left aligned)
pub const SCORE_POS: Vec2 = Vec2::new(16.0, 16.0);
pub const SCORE_FONT: &str = "20px sans-serif";
pub const SCORE_COLOR: Color = Color::WHITE;

/// Dimming layer drawn over the final frame
pub const OVERLAY_COLOR: Color = Color::rgba(0, 0, 0, 0.5);

pub const BUTTON_SIZE: Vec2 = Vec2::new(200.0, 60.0);
pub const BUTTON_FILL: Color = Color::rgb(59, 130, 246);
pub const BUTTON_BORDER: Color = Color::WHITE;
pub const BUTTON_LABEL: &str = "Replay";
pub const BUTTON_FONT: &str = "bold 24px sans-serif";

pub const FINAL_SCORE_FONT: &str = "32px sans-serif";
/// Gap between the final score line and the replay button
pub const FINAL_SCORE_GAP: f32 = 24.0;

/// Axis-aligned rectangle in canvas pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    pub fn centered(center: Vec2, size: Vec2) -> Self {
        Self {
            min: center - size / 2.0,
            size,
        }
    }

    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    pub fn center(&self) -> Vec2 {
        self.min + self.size / 2.0
    }

    /// Inclusive point test
    pub fn contains(&self, p: Vec2) -> bool {
        let max = self.max();
        p.x >= self.min.x && p.x <= max.x && p.y >= self.min.y && p.y <= max.y
    }
}

/// Replay button shown at canvas centre while the game is over
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReplayButton {
    pub rect: Rect,
}

impl ReplayButton {
    pub fn for_bounds(bounds: Vec2) -> Self {
        Self {
            rect: Rect::centered(bounds / 2.0, BUTTON_SIZE),
        }
    }

    pub fn hit(&self, p: Vec2) -> bool {
        self.rect.contains(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_centred() {
        let button = ReplayButton::for_bounds(Vec2::new(800.0, 600.0));
        assert_eq!(button.rect.center(), Vec2::new(400.0, 300.0));
        assert_eq!(button.rect.min, Vec2::new(300.0, 270.0));
    }

    #[test]
    fn test_button_hit() {
        let button = ReplayButton::for_bounds(Vec2::new(800.0, 600.0));
        assert!(button.hit(Vec2::new(400.0, 300.0)));
        assert!(button.hit(Vec2::new(300.0, 270.0)));
        assert!(!button.hit(Vec2::new(299.0, 300.0)));
        assert!(!button.hit(Vec2::new(400.0, 331.0)));
    }
}
