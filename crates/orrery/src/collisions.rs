//! Pairwise collision detection and elastic response.

use crate::body::Body;
use crate::config::SimConfig;
use crate::store::BodyStore;

/// Detects and resolves every overlapping pair, returning the pair count.
///
/// Pairs are visited in ascending `(i, j)` index order, which keeps the pass
/// deterministic. For each overlap the bodies are first separated along the
/// contact normal (half the overlap each, or the full overlap pushed onto a
/// movable body when its partner is fixed or dragged), then an impulse with
/// the configured restitution is exchanged. Fixed and dragged bodies take
/// part as infinite mass: they never move and never change velocity.
///
/// Already-separating pairs still count as contacts but receive no impulse.
pub fn resolve(store: &mut BodyStore, config: &SimConfig) -> usize {
    let restitution = config.restitution;
    let bodies = store.as_mut_slice();
    let n = bodies.len();
    let mut contacts = 0;

    for i in 0..n {
        for j in (i + 1)..n {
            let (left, right) = bodies.split_at_mut(j);
            let a = &mut left[i];
            let b = &mut right[0];
            if resolve_pair(a, b, restitution) {
                contacts += 1;
            }
        }
    }

    contacts
}

fn resolve_pair(a: &mut Body, b: &mut Body, restitution: f64) -> bool {
    let delta = b.position - a.position;
    let distance = delta.norm();
    let contact_distance = a.radius() + b.radius();
    if distance > contact_distance {
        return false;
    }
    // Coincident centres have no usable normal; the softened force kernel is
    // what pushes such bodies apart.
    if distance <= 0.0 {
        return true;
    }

    let normal = delta / distance;

    // Positional correction: split the overlap between the movable bodies.
    let overlap = contact_distance - distance;
    match (a.movable(), b.movable()) {
        (true, true) => {
            a.position -= normal * (overlap * 0.5);
            b.position += normal * (overlap * 0.5);
        }
        (true, false) => a.position -= normal * overlap,
        (false, true) => b.position += normal * overlap,
        (false, false) => {}
    }

    // Impulse along the normal, skipped for separating pairs.
    let relative_velocity = b.velocity - a.velocity;
    let closing_speed = relative_velocity.dot(&normal);
    if closing_speed >= 0.0 {
        return true;
    }

    let inv_mass_a = if a.movable() { 1.0 / a.mass() } else { 0.0 };
    let inv_mass_b = if b.movable() { 1.0 / b.mass() } else { 0.0 };
    let inv_mass_sum = inv_mass_a + inv_mass_b;
    if inv_mass_sum <= 0.0 {
        return true;
    }

    let impulse = -(1.0 + restitution) * closing_speed / inv_mass_sum;
    a.velocity -= normal * (impulse * inv_mass_a);
    b.velocity += normal * (impulse * inv_mass_b);

    true
}
