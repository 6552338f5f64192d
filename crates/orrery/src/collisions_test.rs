use approx::assert_relative_eq;
use nalgebra::{Point2, Vector2};

use crate::collisions;
use crate::config::SimConfig;
use crate::store::BodyStore;

fn config_with_restitution(restitution: f64) -> SimConfig {
    SimConfig {
        restitution,
        ..SimConfig::default()
    }
}

// Two equal bodies approaching head-on, already overlapping at the origin.
// Masses of 1.0 clamp the radius to 2.0, so ±1.5 overlaps by 1.0.
fn head_on_pair() -> BodyStore {
    let mut store = BodyStore::new();
    store.add(Point2::new(-1.5, 0.0), Vector2::new(1.0, 0.0), 1.0);
    store.add(Point2::new(1.5, 0.0), Vector2::new(-1.0, 0.0), 1.0);
    store
}

#[test]
fn elastic_head_on_collision_swaps_velocities() {
    let mut store = head_on_pair();
    let momentum_before = store.total_momentum();
    let ke_before: f64 = store.iter().map(|b| b.kinetic_energy()).sum();

    let resolved = collisions::resolve(&mut store, &config_with_restitution(1.0));
    assert_eq!(resolved, 1);

    let bodies = store.as_slice();
    assert_relative_eq!(bodies[0].velocity.x, -1.0, max_relative = 1e-12);
    assert_relative_eq!(bodies[1].velocity.x, 1.0, max_relative = 1e-12);

    let momentum_after = store.total_momentum();
    let ke_after: f64 = store.iter().map(|b| b.kinetic_energy()).sum();
    assert_relative_eq!(momentum_before.x, momentum_after.x, epsilon = 1e-12);
    assert_relative_eq!(ke_before, ke_after, max_relative = 1e-4);
}

#[test]
fn inelastic_collision_dissipates_kinetic_energy() {
    let mut store = head_on_pair();
    let ke_before: f64 = store.iter().map(|b| b.kinetic_energy()).sum();

    collisions::resolve(&mut store, &config_with_restitution(0.5));

    let ke_after: f64 = store.iter().map(|b| b.kinetic_energy()).sum();
    assert!(ke_after < ke_before);
    // Momentum is conserved regardless of restitution.
    assert_relative_eq!(store.total_momentum().x, 0.0, epsilon = 1e-12);
}

#[test]
fn overlap_is_split_between_movable_bodies() {
    let mut store = head_on_pair();
    collisions::resolve(&mut store, &config_with_restitution(1.0));

    let bodies = store.as_slice();
    // Overlap of 1.0 split as 0.5 each: contact is restored exactly.
    assert_relative_eq!(bodies[0].position.x, -2.0, max_relative = 1e-12);
    assert_relative_eq!(bodies[1].position.x, 2.0, max_relative = 1e-12);
}

#[test]
fn fixed_bodies_absorb_no_correction_or_impulse() {
    let mut store = BodyStore::new();
    let wall = store.add(Point2::new(0.0, 0.0), Vector2::zeros(), 1.0);
    store.add(Point2::new(3.0, 0.0), Vector2::new(-1.0, 0.0), 1.0);
    store.get_mut(wall).unwrap().fixed = true;

    collisions::resolve(&mut store, &config_with_restitution(1.0));

    let bodies = store.as_slice();
    // The wall did not move or pick up velocity.
    assert_eq!(bodies[0].position, Point2::new(0.0, 0.0));
    assert_eq!(bodies[0].velocity, Vector2::zeros());
    // The mover took the whole 1.0 correction and bounced elastically.
    assert_relative_eq!(bodies[1].position.x, 4.0, max_relative = 1e-12);
    assert_relative_eq!(bodies[1].velocity.x, 1.0, max_relative = 1e-12);
}

#[test]
fn separating_pairs_get_no_impulse() {
    let mut store = BodyStore::new();
    store.add(Point2::new(-1.0, 0.0), Vector2::new(-2.0, 0.0), 1.0);
    store.add(Point2::new(1.0, 0.0), Vector2::new(2.0, 0.0), 1.0);

    let resolved = collisions::resolve(&mut store, &config_with_restitution(1.0));
    assert_eq!(resolved, 1);

    let bodies = store.as_slice();
    assert_eq!(bodies[0].velocity, Vector2::new(-2.0, 0.0));
    assert_eq!(bodies[1].velocity, Vector2::new(2.0, 0.0));
    // Positions were still separated to contact.
    assert_relative_eq!(bodies[1].position.x - bodies[0].position.x, 4.0);
}

#[test]
fn unequal_masses_follow_the_impulse_law() {
    let mut store = BodyStore::new();
    store.add(Point2::new(-1.5, 0.0), Vector2::new(1.0, 0.0), 1.0);
    store.add(Point2::new(1.5, 0.0), Vector2::zeros(), 3.0);

    collisions::resolve(&mut store, &config_with_restitution(1.0));

    // J = -(1+e)·v_n / (1/m₁ + 1/m₂) = 2 / (4/3) = 1.5
    let bodies = store.as_slice();
    assert_relative_eq!(bodies[0].velocity.x, -0.5, max_relative = 1e-12);
    assert_relative_eq!(bodies[1].velocity.x, 0.5, max_relative = 1e-12);
    assert_relative_eq!(store.total_momentum().x, 1.0, max_relative = 1e-12);
}

#[test]
fn non_overlapping_bodies_are_untouched() {
    let mut store = BodyStore::new();
    store.add(Point2::new(0.0, 0.0), Vector2::new(1.0, 0.0), 1.0);
    store.add(Point2::new(10.0, 0.0), Vector2::new(-1.0, 0.0), 1.0);

    let resolved = collisions::resolve(&mut store, &config_with_restitution(1.0));
    assert_eq!(resolved, 0);
    assert_eq!(store.as_slice()[0].position, Point2::new(0.0, 0.0));
}

#[test]
fn coincident_centres_count_but_do_not_move() {
    let mut store = BodyStore::new();
    store.add(Point2::new(5.0, 5.0), Vector2::zeros(), 1.0);
    store.add(Point2::new(5.0, 5.0), Vector2::zeros(), 1.0);

    let resolved = collisions::resolve(&mut store, &config_with_restitution(1.0));
    assert_eq!(resolved, 1);
    assert_eq!(store.as_slice()[0].position, store.as_slice()[1].position);
}
