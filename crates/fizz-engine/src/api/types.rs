use serde::{Deserialize, Serialize};

/// Slot handle for an entity registered in a `World`.
/// Identity is the entity's position in the world's ordered collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityIndex(pub usize);

/// One of the two world axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
}

/// Collision priority. Higher ranks are displaced less; `Static` never moves.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum CollisionRank {
    Light = 0,
    #[default]
    Normal = 1,
    Heavy = 2,
    Static = 3,
}

impl CollisionRank {
    pub fn is_static(self) -> bool {
        self == CollisionRank::Static
    }
}

/// Horizontal placement relative to the world's extents.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnchorX {
    /// Bounding box left edge on x = 0.
    Left,
    /// Bounding box centered horizontally.
    Center,
    /// Bounding box right edge on x = world width.
    Right,
    /// Explicit position.
    At(f32),
}

/// Vertical placement relative to the world's extents.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnchorY {
    /// Bounding box bottom edge on the ground, y = 0.
    Bottom,
    /// Bounding box centered vertically.
    Center,
    /// Bounding box top edge on y = world height.
    Top,
    /// Explicit position.
    At(f32),
}

/// Symbolic placement resolved when an entity is registered.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Anchor {
    pub x: AnchorX,
    pub y: AnchorY,
}

impl Anchor {
    pub fn new(x: AnchorX, y: AnchorY) -> Self {
        Self { x, y }
    }
}
