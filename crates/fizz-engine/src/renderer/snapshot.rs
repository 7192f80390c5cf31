use bytemuck::{Pod, Zeroable};

use crate::components::entity::Entity;

/// Per-body state exposed to a rendering collaborator after a tick.
/// 8 floats = 32 bytes stride, suitable for a flat shared buffer.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct BodySnapshot {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl BodySnapshot {
    pub const FLOATS: usize = 8;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    pub fn of(entity: &Entity) -> Self {
        let position = entity.position();
        let edges = entity.edges();
        Self {
            x: position.x,
            y: position.y,
            vx: entity.velocity.x,
            vy: entity.velocity.y,
            top: edges.top,
            right: edges.right,
            bottom: edges.bottom,
            left: edges.left,
        }
    }
}

/// Snapshots of every body, in collection order.
pub struct SnapshotBuffer {
    snapshots: Vec<BodySnapshot>,
}

impl SnapshotBuffer {
    pub fn new() -> Self {
        Self {
            snapshots: Vec::with_capacity(64),
        }
    }

    /// Rebuild from scratch.
    pub fn rebuild<'a>(&mut self, entities: impl Iterator<Item = &'a Entity>) {
        self.snapshots.clear();
        self.snapshots.extend(entities.map(BodySnapshot::of));
    }

    pub fn snapshots(&self) -> &[BodySnapshot] {
        &self.snapshots
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Flat float view, `FLOATS` per body.
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.snapshots)
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.snapshots)
    }
}

impl Default for SnapshotBuffer {
    fn default() -> Self {
        Self::new()
    }
}
