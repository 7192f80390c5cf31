use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::api::error::ConfigError;
use crate::api::types::CollisionRank;
use crate::components::shape::{Edges, Shape, ShapeGeometry};
use crate::renderer::surface::Color;

/// Serializable description of a body. Infallible to build up;
/// validated once by `build()`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityDesc {
    pub shape: Shape,
    #[serde(default)]
    pub position: Vec2,
    #[serde(default)]
    pub velocity: Vec2,
    #[serde(default)]
    pub acceleration: Vec2,
    /// Multiplier on world gravity for this body.
    #[serde(default = "default_gravity_scale")]
    pub gravity_scale: f32,
    /// Restitution on resolved collisions and ground contact.
    #[serde(default)]
    pub bounciness: f32,
    #[serde(default)]
    pub rank: CollisionRank,
    /// Draw order hint for renderers. Does not affect simulation order.
    #[serde(default = "default_z_index")]
    pub z_index: i32,
    /// Fill color handed to the drawing surface.
    #[serde(default)]
    pub color: Color,
}

fn default_gravity_scale() -> f32 {
    1.0
}

fn default_z_index() -> i32 {
    1
}

impl EntityDesc {
    pub fn new(shape: Shape) -> Self {
        Self {
            shape,
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            acceleration: Vec2::ZERO,
            gravity_scale: default_gravity_scale(),
            bounciness: 0.0,
            rank: CollisionRank::Normal,
            z_index: default_z_index(),
            color: Color::BLACK,
        }
    }

    pub fn rectangle(width: f32, height: f32) -> Self {
        Self::new(Shape::rectangle(width, height))
    }

    pub fn circle(radius: f32) -> Self {
        Self::new(Shape::circle(radius))
    }

    /// Parse a description from a JSON string. Validation still happens in `build()`.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    // -- Builder pattern --

    pub fn with_position(mut self, position: Vec2) -> Self {
        self.position = position;
        self
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_acceleration(mut self, acceleration: Vec2) -> Self {
        self.acceleration = acceleration;
        self
    }

    pub fn with_gravity_scale(mut self, scale: f32) -> Self {
        self.gravity_scale = scale;
        self
    }

    pub fn with_bounciness(mut self, bounciness: f32) -> Self {
        self.bounciness = bounciness;
        self
    }

    pub fn with_rank(mut self, rank: CollisionRank) -> Self {
        self.rank = rank;
        self
    }

    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Validate and produce a body with its edges computed.
    pub fn build(self) -> Result<Entity, ConfigError> {
        self.shape.validate()?;
        if self.bounciness.is_nan() {
            return Err(ConfigError::NonFinite("bounciness"));
        }
        if self.bounciness < 0.0 {
            return Err(ConfigError::NegativeBounciness(self.bounciness));
        }
        if !self.gravity_scale.is_finite() {
            return Err(ConfigError::NonFinite("gravity_scale"));
        }
        if !self.position.is_finite() {
            return Err(ConfigError::NonFinite("position"));
        }
        if !self.velocity.is_finite() {
            return Err(ConfigError::NonFinite("velocity"));
        }
        if !self.acceleration.is_finite() {
            return Err(ConfigError::NonFinite("acceleration"));
        }
        if self.bounciness > 1.0 {
            log::warn!(
                "bounciness {} > 1 adds energy on every bounce",
                self.bounciness
            );
        }

        Ok(Entity {
            edges: self.shape.edges(self.position),
            shape: self.shape,
            position: self.position,
            velocity: self.velocity,
            acceleration: self.acceleration,
            gravity_scale: self.gravity_scale,
            bounciness: self.bounciness,
            rank: self.rank,
            z_index: self.z_index,
            color: self.color,
        })
    }
}

/// A simulated body.
///
/// Position is only writable through `set_position`, so `edges` always
/// matches the current position and shape.
#[derive(Debug, Clone)]
pub struct Entity {
    shape: Shape,
    position: Vec2,
    edges: Edges,
    /// Units per second.
    pub velocity: Vec2,
    /// Units per second squared, on top of gravity.
    pub acceleration: Vec2,
    gravity_scale: f32,
    bounciness: f32,
    rank: CollisionRank,
    /// Draw order hint for renderers.
    pub z_index: i32,
    /// Fill color for renderers.
    pub color: Color,
}

impl Entity {
    /// The body's shape.
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Current position in world units.
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Bounding box at the current position.
    pub fn edges(&self) -> Edges {
        self.edges
    }

    /// Multiplier on world gravity.
    pub fn gravity_scale(&self) -> f32 {
        self.gravity_scale
    }

    /// Restitution coefficient.
    pub fn bounciness(&self) -> f32 {
        self.bounciness
    }

    /// Collision priority.
    pub fn rank(&self) -> CollisionRank {
        self.rank
    }

    /// Move the body and refresh its edges.
    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
        self.refresh_edges();
    }

    /// Bottom edge at or below the ground plane y = 0.
    pub fn touches_ground(&self) -> bool {
        self.edges.bottom <= 0.0
    }

    /// Whether position and velocity are both free of NaN/∞.
    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.velocity.is_finite()
    }

    pub(crate) fn position_mut(&mut self) -> &mut Vec2 {
        &mut self.position
    }

    pub(crate) fn refresh_edges(&mut self) {
        self.edges = self.shape.edges(self.position);
    }
}
