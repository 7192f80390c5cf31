//! Drawing contract for rendering collaborators.
//!
//! The engine never draws during a tick. A host that wants pixels implements
//! `Surface` over its canvas/GPU backend and calls `World::render` (or
//! `Shape::render`) after stepping. Coordinates are world units with the
//! origin at the bottom-left and +y up; screen transforms belong to the host.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Fill color for a body, RGB in 0.0-1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const BLACK: Color = Color { r: 0.0, g: 0.0, b: 0.0 };

    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

pub trait Surface {
    /// Fill an axis-aligned rectangle whose top-left corner is `top_left`.
    fn fill_rect(&mut self, top_left: Vec2, width: f32, height: f32, color: Color);

    /// Fill a circle.
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);
}
