use crate::components::entity::Entity;

/// Advance one body by `delta` seconds under `gravity` (world units/s²).
///
/// The ground is the plane y = 0. A body with no bounciness that reaches it
/// is pinned there; a bouncy one has its vertical velocity reflected after
/// the move that put it on or below the plane.
pub fn integrate(entity: &mut Entity, gravity: f32, delta: f32) {
    entity.velocity.x += entity.acceleration.x * delta;

    if entity.touches_ground() && entity.bounciness() <= 0.0 {
        entity.acceleration.y = 0.0;
        entity.velocity.y = 0.0;
    } else {
        let accel_y = entity.acceleration.y + gravity * entity.gravity_scale();
        entity.velocity.y += accel_y * delta;
    }

    // Resting check uses last tick's edges.
    let resting = entity.touches_ground() && entity.velocity.y <= 0.0;
    let velocity = entity.velocity;
    let position = entity.position_mut();
    position.x += velocity.x * delta;
    if !resting {
        position.y += velocity.y * delta;
    }

    entity.refresh_edges();

    if entity.bounciness() > 0.0 && entity.touches_ground() {
        entity.velocity.y = -entity.velocity.y * entity.bounciness();
    }
}
