use glam::Vec2;

use crate::api::config::{ResolutionMode, WorldConfig};
use crate::api::error::ConfigError;
use crate::api::types::{Anchor, AnchorX, AnchorY, EntityIndex};
use crate::components::entity::{Entity, EntityDesc};
use crate::components::shape::{Shape, ShapeGeometry};
use crate::core::collision::{detect_and_resolve_into, PendingCollision};
use crate::core::integrator::integrate;
use crate::core::time::StepClock;
use crate::renderer::surface::Surface;

/// Outcome of one tick.
#[derive(Debug, Clone, PartialEq)]
pub struct StepReport {
    /// Tick number, starting at 1.
    pub tick: u64,
    /// Seconds simulated by this tick.
    pub delta: f32,
    /// Overlapping pairs resolved this tick.
    pub contacts: usize,
    /// Bodies whose position or velocity went NaN/∞ this tick.
    pub non_finite: Vec<EntityIndex>,
}

/// Read-only hook invoked after a tick, e.g. by a renderer.
pub trait StepObserver {
    fn on_step(&mut self, world: &World, report: &StepReport);
}

impl<F> StepObserver for F
where
    F: FnMut(&World, &StepReport),
{
    fn on_step(&mut self, world: &World, report: &StepReport) {
        self(world, report)
    }
}

/// Owns the simulated bodies and advances them one tick at a time.
///
/// Insertion order is integration and collision order. The world never
/// schedules itself; the host calls `step` / `step_at` from its own loop.
pub struct World {
    entities: Vec<Entity>,
    config: WorldConfig,
    clock: StepClock,
    pending: Vec<PendingCollision>,
}

impl World {
    pub fn new(config: WorldConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        log::debug!(
            "world created: gravity {}, extents {}x{}, {:?} resolution",
            config.gravity,
            config.world_width,
            config.world_height,
            config.resolution,
        );
        Ok(Self {
            entities: Vec::with_capacity(64),
            config,
            clock: StepClock::new(),
            pending: Vec::new(),
        })
    }

    /// Append a body. Returns its slot.
    pub fn register(&mut self, entity: Entity) -> EntityIndex {
        let index = EntityIndex(self.entities.len());
        log::debug!(
            "registered entity {} ({:?}, {:?}) at {}",
            index.0,
            entity.shape(),
            entity.rank(),
            entity.position(),
        );
        self.entities.push(entity);
        index
    }

    /// Place a body against the world's extents, then append it.
    pub fn register_anchored(&mut self, mut entity: Entity, anchor: Anchor) -> EntityIndex {
        let position = anchored_position(
            entity.shape(),
            anchor,
            self.config.world_width,
            self.config.world_height,
        );
        entity.set_position(position);
        self.register(entity)
    }

    /// Validate a description and register the resulting body.
    pub fn spawn(&mut self, desc: EntityDesc) -> Result<EntityIndex, ConfigError> {
        let entity = desc.build()?;
        Ok(self.register(entity))
    }

    /// Run one tick covering `delta` seconds. The first tick always uses 0.
    pub fn step(&mut self, delta: f32) -> StepReport {
        let delta = self.clock.advance(delta);
        self.run_tick(delta)
    }

    /// Run one tick at timestamp `now` (seconds); delta is measured from
    /// the previous tick's timestamp.
    pub fn step_at(&mut self, now: f64) -> StepReport {
        let delta = self.clock.record(now);
        self.run_tick(delta)
    }

    /// `step`, then hand the finished state to `observer`.
    pub fn step_observed(&mut self, delta: f32, observer: &mut impl StepObserver) -> StepReport {
        let report = self.step(delta);
        observer.on_step(self, &report);
        report
    }

    fn run_tick(&mut self, delta: f32) -> StepReport {
        let gravity = self.config.gravity;
        for entity in self.entities.iter_mut() {
            integrate(entity, gravity, delta);
        }

        let contacts =
            detect_and_resolve_into(&mut self.entities, self.config.resolution, &mut self.pending);

        let non_finite: Vec<EntityIndex> = self
            .entities
            .iter()
            .enumerate()
            .filter(|(_, e)| !e.is_finite())
            .map(|(i, _)| EntityIndex(i))
            .collect();
        for index in &non_finite {
            let entity = &self.entities[index.0];
            log::warn!(
                "entity {} diverged on tick {}: position {}, velocity {}",
                index.0,
                self.clock.count(),
                entity.position(),
                entity.velocity,
            );
        }

        StepReport {
            tick: self.clock.count(),
            delta,
            contacts,
            non_finite,
        }
    }

    /// Indices in draw order: ascending z-index, ties in insertion order.
    pub fn render_order(&self) -> Vec<EntityIndex> {
        let mut order: Vec<EntityIndex> = (0..self.entities.len()).map(EntityIndex).collect();
        order.sort_by_key(|i| self.entities[i.0].z_index);
        order
    }

    /// Draw every body onto `surface` in render order.
    pub fn render(&self, surface: &mut dyn Surface) {
        for index in self.render_order() {
            let entity = &self.entities[index.0];
            entity.shape().render(entity.position(), entity.color, surface);
        }
    }

    /// Get a reference to an entity by slot.
    pub fn get(&self, index: EntityIndex) -> Option<&Entity> {
        self.entities.get(index.0)
    }

    /// Get a mutable reference to an entity by slot.
    pub fn get_mut(&mut self, index: EntityIndex) -> Option<&mut Entity> {
        self.entities.get_mut(index.0)
    }

    /// All entities, in simulation order.
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Iterate over all entities.
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    /// Number of entities in the world.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the world is empty.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// World gravity, before per-entity scaling.
    pub fn gravity(&self) -> f32 {
        self.config.gravity
    }

    /// Collision application strategy.
    pub fn resolution(&self) -> ResolutionMode {
        self.config.resolution
    }

    /// The validated configuration.
    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// Tick count and timing.
    pub fn clock(&self) -> &StepClock {
        &self.clock
    }
}

impl Default for World {
    fn default() -> Self {
        Self {
            entities: Vec::with_capacity(64),
            config: WorldConfig::default(),
            clock: StepClock::new(),
            pending: Vec::new(),
        }
    }
}

/// Position that puts `shape`'s bounding box where `anchor` asks.
fn anchored_position(shape: &Shape, anchor: Anchor, width: f32, height: f32) -> Vec2 {
    // Edges of the shape placed at the origin, i.e. offsets from position.
    let offsets = shape.edges(Vec2::ZERO);
    let middle = offsets.center();
    let x = match anchor.x {
        AnchorX::Left => -offsets.left,
        AnchorX::Center => width * 0.5 - middle.x,
        AnchorX::Right => width - offsets.right,
        AnchorX::At(x) => x,
    };
    let y = match anchor.y {
        AnchorY::Bottom => -offsets.bottom,
        AnchorY::Center => height * 0.5 - middle.y,
        AnchorY::Top => height - offsets.top,
        AnchorY::At(y) => y,
    };
    Vec2::new(x, y)
}
