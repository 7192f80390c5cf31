pub mod snapshot;
pub mod surface;

pub use snapshot::{BodySnapshot, SnapshotBuffer};
pub use surface::{Color, Surface};
