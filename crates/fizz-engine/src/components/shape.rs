use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::api::error::ConfigError;
use crate::renderer::surface::{Color, Surface};

/// Axis-aligned bounding box of a shape in world coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Edges {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Edges {
    /// Midpoint of the box.
    pub fn center(&self) -> Vec2 {
        Vec2::new(
            (self.left + self.right) * 0.5,
            (self.bottom + self.top) * 0.5,
        )
    }
}

/// What every shape variant knows about itself.
pub trait ShapeGeometry {
    /// Bounding box of the shape placed at `position`.
    fn edges(&self, position: Vec2) -> Edges;

    /// Draw the shape placed at `position`.
    fn render(&self, position: Vec2, color: Color, surface: &mut dyn Surface);

    /// Reject sizes that make edge math meaningless.
    fn validate(&self) -> Result<(), ConfigError>;
}

/// Rectangle anchored at its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    pub width: f32,
    pub height: f32,
}

impl ShapeGeometry for Rectangle {
    fn edges(&self, position: Vec2) -> Edges {
        Edges {
            top: position.y,
            right: position.x + self.width,
            bottom: position.y - self.height,
            left: position.x,
        }
    }

    fn render(&self, position: Vec2, color: Color, surface: &mut dyn Surface) {
        surface.fill_rect(position, self.width, self.height, color);
    }

    fn validate(&self) -> Result<(), ConfigError> {
        check_size("width", self.width)?;
        check_size("height", self.height)
    }
}

/// Circle anchored at its center. Collides as its bounding square.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub radius: f32,
}

impl ShapeGeometry for Circle {
    fn edges(&self, position: Vec2) -> Edges {
        Edges {
            top: position.y + self.radius,
            right: position.x + self.radius,
            bottom: position.y - self.radius,
            left: position.x - self.radius,
        }
    }

    fn render(&self, position: Vec2, color: Color, surface: &mut dyn Surface) {
        surface.fill_circle(position, self.radius, color);
    }

    fn validate(&self) -> Result<(), ConfigError> {
        check_size("radius", self.radius)
    }
}

fn check_size(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::NonFinite(field));
    }
    if value < 0.0 {
        return Err(ConfigError::NegativeSize { field, value });
    }
    Ok(())
}

/// A body's shape, held by value on the entity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Shape {
    Rectangle(Rectangle),
    Circle(Circle),
}

impl Shape {
    pub fn rectangle(width: f32, height: f32) -> Self {
        Shape::Rectangle(Rectangle { width, height })
    }

    pub fn circle(radius: f32) -> Self {
        Shape::Circle(Circle { radius })
    }

    fn geometry(&self) -> &dyn ShapeGeometry {
        match self {
            Shape::Rectangle(rect) => rect,
            Shape::Circle(circle) => circle,
        }
    }
}

impl ShapeGeometry for Shape {
    fn edges(&self, position: Vec2) -> Edges {
        self.geometry().edges(position)
    }

    fn render(&self, position: Vec2, color: Color, surface: &mut dyn Surface) {
        self.geometry().render(position, color, surface)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.geometry().validate()
    }
}
