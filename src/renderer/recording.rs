//! Surface that records draw calls instead of painting
//!
//! Backs the native headless run and the draw-order tests.

use glam::Vec2;

use super::{Surface, TextStyle};
use crate::sim::Color;
use crate::ui::Rect;

/// Every primitive issued to a `RecordingSurface`
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Fill(Color),
    FillRect(Rect, Color),
    StrokeRect(Rect, Color),
    Circle { center: Vec2, radius: f32, color: Color },
    Text(String, Vec2),
    Alpha(f32),
}

/// Surface that records draw calls instead of painting
pub struct RecordingSurface {
    pub size: Vec2,
    pub calls: Vec<DrawCall>,
}

impl RecordingSurface {
    pub fn new(size: Vec2) -> Self {
        Self {
            size,
            calls: Vec::new(),
        }
    }

    /// Drop recorded calls, keeping the size
    pub fn clear(&mut self) {
        self.calls.clear();
    }

    pub fn circles(&self) -> Vec<(Vec2, f32, Color)> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::Circle {
                    center,
                    radius,
                    color,
                } => Some((*center, *radius, *color)),
                _ => None,
            })
            .collect()
    }

    pub fn texts(&self) -> Vec<String> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::Text(t, _) => Some(t.clone()),
                _ => None,
            })
            .collect()
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> Vec2 {
        self.size
    }
    fn fill(&mut self, color: Color) {
        self.calls.push(DrawCall::Fill(color));
    }
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.calls.push(DrawCall::FillRect(rect, color));
    }
    fn stroke_rect(&mut self, rect: Rect, color: Color, _line_width: f32) {
        self.calls.push(DrawCall::StrokeRect(rect, color));
    }
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.calls.push(DrawCall::Circle {
            center,
            radius,
            color,
        });
    }
    fn fill_text(&mut self, text: &str, pos: Vec2, _style: &TextStyle) {
        self.calls.push(DrawCall::Text(text.to_string(), pos));
    }
    fn set_alpha(&mut self, alpha: f32) {
        self.calls.push(DrawCall::Alpha(alpha));
    }
}
