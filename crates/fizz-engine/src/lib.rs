pub mod api;
pub mod components;
pub mod core;
pub mod renderer;

// Re-export key types at crate root for convenience
pub use api::config::{ResolutionMode, WorldConfig};
pub use api::error::ConfigError;
pub use api::types::{Anchor, AnchorX, AnchorY, Axis, CollisionRank, EntityIndex};
pub use components::entity::{Entity, EntityDesc};
pub use components::shape::{Circle, Edges, Rectangle, Shape, ShapeGeometry};
pub use core::collision::{
    apply_pending, check_pair, classify_axis, detect_and_resolve, detect_and_resolve_into,
    separating_axis, split_adjustment, AxisOverlap, Contact, PendingCollision, CONTAINED,
};
pub use core::integrator::integrate;
pub use core::time::StepClock;
pub use core::world::{StepObserver, StepReport, World};
pub use renderer::{BodySnapshot, Color, SnapshotBuffer, Surface};
