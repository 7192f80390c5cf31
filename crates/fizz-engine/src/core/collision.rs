//! Pairwise overlap detection and positional correction.
//!
//! Every body is tested against each body before it in collection order.
//! Overlap is classified per axis on the bodies' bounding boxes (circles use
//! their bounding square); the axis with the shallower penetration is the
//! one corrected, and the correction is split between the two bodies by
//! collision rank.

use glam::Vec2;

use crate::api::config::ResolutionMode;
use crate::api::types::{Axis, CollisionRank, EntityIndex};
use crate::components::entity::Entity;

/// Depth reported when one interval fully contains the other.
/// Never chosen as the separating axis while the other axis is finite.
pub const CONTAINED: f32 = f32::INFINITY;

/// Overlap of two intervals along one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisOverlap {
    /// Penetration depth, or `CONTAINED`.
    pub depth: f32,
    /// Signed correction that moves "this" out of "foreign" along the axis.
    /// Zero for containment.
    pub total: f32,
}

impl AxisOverlap {
    fn contained() -> Self {
        Self { depth: CONTAINED, total: 0.0 }
    }

    fn shift(depth: f32, total: f32) -> Self {
        Self { depth, total }
    }

    pub fn is_contained(&self) -> bool {
        self.depth == CONTAINED
    }
}

/// Classify `[lo, hi]` of this body against `[foreign_lo, foreign_hi]`.
///
/// Boundaries are inclusive: intervals that merely touch overlap with depth 0.
/// Returns `None` when the intervals are disjoint.
pub fn classify_axis(lo: f32, hi: f32, foreign_lo: f32, foreign_hi: f32) -> Option<AxisOverlap> {
    if lo >= foreign_lo && hi <= foreign_hi {
        // this inside foreign
        Some(AxisOverlap::contained())
    } else if lo <= foreign_lo && hi >= foreign_hi {
        // foreign inside this
        Some(AxisOverlap::contained())
    } else if hi >= foreign_lo && lo <= foreign_lo {
        // this's high edge into foreign's low edge: push this toward -axis
        let depth = hi - foreign_lo;
        Some(AxisOverlap::shift(depth, -depth))
    } else if lo <= foreign_hi && hi >= foreign_hi {
        // this's low edge into foreign's high edge: push this toward +axis
        let depth = foreign_hi - lo;
        Some(AxisOverlap::shift(depth, depth))
    } else if foreign_lo <= hi && foreign_hi >= hi {
        // The last two arms mirror the two above from foreign's side and are
        // unreachable once those fail; kept so all six cases are spelled out.
        let depth = hi - foreign_lo;
        Some(AxisOverlap::shift(depth, -depth))
    } else if foreign_hi >= lo && foreign_lo <= lo {
        let depth = foreign_hi - lo;
        Some(AxisOverlap::shift(depth, depth))
    } else {
        None
    }
}

/// Pick the axis with the smaller penetration. Ties go to Y.
/// `None` when both axes report containment: there is no finite axis to
/// push along.
pub fn separating_axis(x: AxisOverlap, y: AxisOverlap) -> Option<(Axis, AxisOverlap)> {
    if x.is_contained() && y.is_contained() {
        return None;
    }
    if x.depth < y.depth {
        Some((Axis::X, x))
    } else {
        Some((Axis::Y, y))
    }
}

/// Split a correction between this body and the foreign body by rank.
/// Returns `(this, foreign)`.
pub fn split_adjustment(total: f32, this: CollisionRank, foreign: CollisionRank) -> (f32, f32) {
    if this.is_static() && foreign.is_static() {
        return (0.0, 0.0);
    }
    match this.cmp(&foreign) {
        std::cmp::Ordering::Greater => (0.0, -total),
        std::cmp::Ordering::Less => (total, 0.0),
        std::cmp::Ordering::Equal => (total / 2.0, -total / 2.0),
    }
}

/// A resolved overlap between two bodies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    pub axis: Axis,
    pub depth: f32,
    pub this_adjustment: f32,
    pub foreign_adjustment: f32,
}

/// Test two bodies and compute the correction, without applying it.
pub fn check_pair(this: &Entity, foreign: &Entity) -> Option<Contact> {
    let a = this.edges();
    let b = foreign.edges();

    let x = classify_axis(a.left, a.right, b.left, b.right)?;
    let y = classify_axis(a.bottom, a.top, b.bottom, b.top)?;

    let Some((axis, overlap)) = separating_axis(x, y) else {
        log::trace!("nested bounding boxes, no finite separating axis");
        return None;
    };

    let (this_adjustment, foreign_adjustment) =
        split_adjustment(overlap.total, this.rank(), foreign.rank());

    Some(Contact {
        axis,
        depth: overlap.depth,
        this_adjustment,
        foreign_adjustment,
    })
}

/// A correction waiting to be applied at the end of the tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingCollision {
    pub entity: EntityIndex,
    pub axis: Axis,
    pub adjustment: f32,
}

fn component_mut(v: &mut Vec2, axis: Axis) -> &mut f32 {
    match axis {
        Axis::X => &mut v.x,
        Axis::Y => &mut v.y,
    }
}

/// Shift along `axis` and reflect that axis's velocity by the body's bounciness.
/// Static bodies are never touched.
fn apply_correction(entity: &mut Entity, axis: Axis, adjustment: f32) {
    if entity.rank().is_static() {
        return;
    }
    *component_mut(entity.position_mut(), axis) += adjustment;
    let bounciness = entity.bounciness();
    let velocity = component_mut(&mut entity.velocity, axis);
    *velocity = -*velocity * bounciness;
    entity.refresh_edges();
}

/// Test every pair `(i, j)` with `j < i` and resolve overlaps.
/// Returns the number of contacts resolved.
pub fn detect_and_resolve(entities: &mut [Entity], mode: ResolutionMode) -> usize {
    let mut pending = Vec::new();
    detect_and_resolve_into(entities, mode, &mut pending)
}

/// Like `detect_and_resolve`, reusing `pending` as the deferred record
/// buffer. `pending` is empty on return.
pub fn detect_and_resolve_into(
    entities: &mut [Entity],
    mode: ResolutionMode,
    pending: &mut Vec<PendingCollision>,
) -> usize {
    pending.clear();
    let mut contacts = 0;

    for i in 1..entities.len() {
        for j in 0..i {
            let (head, tail) = entities.split_at_mut(i);
            let foreign = &mut head[j];
            let this = &mut tail[0];

            let Some(contact) = check_pair(this, foreign) else {
                continue;
            };
            contacts += 1;
            log::trace!(
                "contact {} -> {} on {:?}: depth {}, adjust {} / {}",
                i,
                j,
                contact.axis,
                contact.depth,
                contact.this_adjustment,
                contact.foreign_adjustment,
            );

            match mode {
                ResolutionMode::Immediate => {
                    apply_correction(this, contact.axis, contact.this_adjustment);
                    apply_correction(foreign, contact.axis, contact.foreign_adjustment);
                }
                ResolutionMode::Deferred => {
                    pending.push(PendingCollision {
                        entity: EntityIndex(i),
                        axis: contact.axis,
                        adjustment: contact.this_adjustment,
                    });
                    pending.push(PendingCollision {
                        entity: EntityIndex(j),
                        axis: contact.axis,
                        adjustment: contact.foreign_adjustment,
                    });
                }
            }
        }
    }

    if mode == ResolutionMode::Deferred {
        apply_pending(entities, pending);
    }
    contacts
}

/// Apply deferred records: each (entity, axis) gets the sum of its
/// adjustments and a single velocity reflection. Clears `pending`.
pub fn apply_pending(entities: &mut [Entity], pending: &mut Vec<PendingCollision>) {
    pending.sort_by_key(|p| (p.entity, p.axis as u8));
    for group in pending.chunk_by(|a, b| a.entity == b.entity && a.axis == b.axis) {
        let first = group[0];
        let Some(entity) = entities.get_mut(first.entity.0) else {
            continue;
        };
        let total: f32 = group.iter().map(|p| p.adjustment).sum();
        apply_correction(entity, first.axis, total);
    }
    pending.clear();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::entity::EntityDesc;

    fn rect(x: f32, top: f32, w: f32, h: f32, rank: CollisionRank) -> Entity {
        EntityDesc::rectangle(w, h)
            .with_position(Vec2::new(x, top))
            .with_rank(rank)
            .build()
            .unwrap()
    }

    #[test]
    fn disjoint_intervals_do_not_overlap() {
        assert_eq!(classify_axis(0.0, 1.0, 2.0, 3.0), None);
        assert_eq!(classify_axis(2.0, 3.0, 0.0, 1.0), None);
    }

    #[test]
    fn touching_intervals_overlap_with_zero_depth() {
        let overlap = classify_axis(0.0, 1.0, 1.0, 2.0).unwrap();
        assert_eq!(overlap.depth, 0.0);
    }

    #[test]
    fn containment_is_infinite() {
        assert!(classify_axis(1.0, 2.0, 0.0, 3.0).unwrap().is_contained());
        assert!(classify_axis(0.0, 3.0, 1.0, 2.0).unwrap().is_contained());
        assert!(classify_axis(0.0, 3.0, 0.0, 3.0).unwrap().is_contained());
    }

    #[test]
    fn correction_sign_pushes_this_out() {
        // this on the low side
        let low = classify_axis(0.0, 4.0, 3.0, 10.0).unwrap();
        assert_eq!(low, AxisOverlap { depth: 1.0, total: -1.0 });
        // this on the high side
        let high = classify_axis(3.0, 10.0, 0.0, 4.0).unwrap();
        assert_eq!(high, AxisOverlap { depth: 1.0, total: 1.0 });
    }

    #[test]
    fn contained_axis_never_chosen_over_finite() {
        let contained = AxisOverlap::contained();
        let finite = AxisOverlap { depth: 1000.0, total: 1000.0 };
        assert_eq!(separating_axis(contained, finite).unwrap().0, Axis::Y);
        assert_eq!(separating_axis(finite, contained).unwrap().0, Axis::X);
        assert_eq!(separating_axis(contained, contained), None);
    }

    #[test]
    fn equal_depth_picks_y() {
        let overlap = AxisOverlap { depth: 2.0, total: 2.0 };
        assert_eq!(separating_axis(overlap, overlap).unwrap().0, Axis::Y);
    }

    #[test]
    fn split_by_rank() {
        use CollisionRank::*;
        assert_eq!(split_adjustment(4.0, Heavy, Light), (0.0, -4.0));
        assert_eq!(split_adjustment(4.0, Light, Static), (4.0, 0.0));
        assert_eq!(split_adjustment(4.0, Normal, Normal), (2.0, -2.0));
        assert_eq!(split_adjustment(4.0, Static, Static), (0.0, 0.0));
    }

    #[test]
    fn no_overlap_on_x_skips_pair() {
        // Y ranges overlap by 5, X ranges are disjoint.
        let a = rect(0.0, 15.0, 10.0, 10.0, CollisionRank::Normal);
        let b = rect(20.0, 10.0, 10.0, 10.0, CollisionRank::Static);
        assert!(check_pair(&a, &b).is_none());
        let mut entities = vec![b, a];
        assert_eq!(detect_and_resolve(&mut entities, ResolutionMode::Deferred), 0);
    }

    #[test]
    fn shallower_axis_is_resolved() {
        let a = rect(0.0, 20.0, 10.0, 20.0, CollisionRank::Normal);
        let b = rect(6.0, 30.0, 10.0, 20.0, CollisionRank::Normal);
        let contact = check_pair(&b, &a).unwrap();
        assert_eq!(contact.axis, Axis::X);
        assert_eq!(contact.depth, 4.0);
        assert_eq!(contact.this_adjustment, 2.0);
        assert_eq!(contact.foreign_adjustment, -2.0);
    }

    #[test]
    fn nested_boxes_are_not_resolved() {
        let outer = rect(0.0, 10.0, 10.0, 10.0, CollisionRank::Normal);
        let inner = rect(2.0, 8.0, 2.0, 2.0, CollisionRank::Normal);
        assert!(check_pair(&inner, &outer).is_none());
        let zero_a = rect(1.0, 1.0, 0.0, 0.0, CollisionRank::Normal);
        let zero_b = rect(1.0, 1.0, 0.0, 0.0, CollisionRank::Normal);
        assert!(check_pair(&zero_a, &zero_b).is_none());
    }

    #[test]
    fn immediate_resolution_reflects_velocity() {
        let mut a = rect(0.0, 20.0, 10.0, 20.0, CollisionRank::Normal);
        a.velocity = Vec2::new(5.0, 1.0);
        let b = EntityDesc::rectangle(10.0, 20.0)
            .with_position(Vec2::new(6.0, 30.0))
            .with_velocity(Vec2::new(-5.0, 1.0))
            .with_bounciness(0.5)
            .build()
            .unwrap();
        let mut entities = vec![a, b];
        assert_eq!(detect_and_resolve(&mut entities, ResolutionMode::Immediate), 1);
        assert_eq!(entities[0].position().x, -2.0);
        assert_eq!(entities[1].position().x, 8.0);
        assert_eq!(entities[1].edges().left, 8.0);
        // bounciness 0 zeroes, 0.5 halves and reverses
        assert_eq!(entities[0].velocity, Vec2::new(0.0, 1.0));
        assert_eq!(entities[1].velocity, Vec2::new(2.5, 1.0));
    }

    #[test]
    fn static_pair_is_untouched() {
        let mut a = rect(0.0, 10.0, 10.0, 10.0, CollisionRank::Static);
        a.velocity = Vec2::new(1.0, 1.0);
        let b = rect(5.0, 12.0, 10.0, 10.0, CollisionRank::Static);
        let mut entities = vec![a, b];
        for mode in [ResolutionMode::Immediate, ResolutionMode::Deferred] {
            assert_eq!(detect_and_resolve(&mut entities, mode), 1);
            assert_eq!(entities[0].position(), Vec2::new(0.0, 10.0));
            assert_eq!(entities[1].position(), Vec2::new(5.0, 12.0));
            assert_eq!(entities[0].velocity, Vec2::new(1.0, 1.0));
        }
    }

    #[test]
    fn deferred_sums_corrections_per_axis() {
        // Middle body overlaps a static wall on each side by 1 unit.
        let left = rect(0.0, 10.0, 10.0, 10.0, CollisionRank::Static);
        let right = rect(19.0, 10.0, 10.0, 10.0, CollisionRank::Static);
        let mut middle = rect(9.0, 9.0, 11.0, 2.0, CollisionRank::Normal);
        middle.velocity = Vec2::new(3.0, 0.0);
        let mut entities = vec![left, right, middle];
        let mut pending = Vec::new();
        let contacts =
            detect_and_resolve_into(&mut entities, ResolutionMode::Deferred, &mut pending);
        assert_eq!(contacts, 2);
        assert!(pending.is_empty());
        // +1 from the left wall, -1 from the right wall
        assert_eq!(entities[2].position().x, 9.0);
        // reflected once, not twice
        assert_eq!(entities[2].velocity.x, -0.0);
    }
}
