use approx::assert_relative_eq;
use nalgebra::{Point2, Vector2};

use crate::body::{Body, BodyId, MAX_RADIUS, MIN_DENSITY, MIN_MASS, MIN_RADIUS};

fn body(mass: f64) -> Body {
    Body::new(
        BodyId(0),
        Point2::new(0.0, 0.0),
        Vector2::new(0.0, 0.0),
        mass,
    )
}

#[test]
fn radius_derives_from_mass_and_density() {
    let b = body(10.0);
    let expected = (10.0 / (std::f64::consts::PI * 0.1)).sqrt();
    assert_relative_eq!(b.radius(), expected, max_relative = 1e-12);
}

#[test]
fn radius_clamps_to_minimum() {
    // √(0.1 / (π·0.1)) ≈ 0.56, below the floor
    let b = body(0.1);
    assert_eq!(b.radius(), MIN_RADIUS);
}

#[test]
fn radius_clamps_to_maximum() {
    let mut b = body(1.0);
    b.set_density(MIN_DENSITY);
    b.set_mass(1.0e6);
    assert_eq!(b.radius(), MAX_RADIUS);
}

#[test]
fn mass_setter_clamps_invalid_values() {
    let mut b = body(5.0);
    b.set_mass(-3.0);
    assert_eq!(b.mass(), MIN_MASS);
    b.set_mass(f64::NAN);
    assert_eq!(b.mass(), MIN_MASS);
}

#[test]
fn density_setter_clamps_and_refreshes_radius() {
    let mut b = body(10.0);
    let before = b.radius();
    b.set_density(0.0);
    assert_eq!(b.density(), MIN_DENSITY);
    // Lower density spreads the same mass over a larger disc.
    assert!(b.radius() > before);
}

#[test]
fn radius_refreshes_on_every_mass_change() {
    let mut b = body(10.0);
    let before = b.radius();
    b.set_mass(40.0);
    assert_relative_eq!(b.radius(), before * 2.0, max_relative = 1e-12);
}

#[test]
fn kinetic_energy_and_momentum() {
    let mut b = body(4.0);
    b.velocity = Vector2::new(3.0, 4.0);
    assert_relative_eq!(b.speed(), 5.0, max_relative = 1e-12);
    assert_relative_eq!(b.kinetic_energy(), 0.5 * 4.0 * 25.0, max_relative = 1e-12);
    assert_eq!(b.momentum(), Vector2::new(12.0, 16.0));
}

#[test]
fn collision_test_uses_radii_sum() {
    let a = body(10.0);
    let mut b = body(10.0);
    b.position = Point2::new(2.0 * a.radius() - 0.1, 0.0);
    assert!(a.collides_with(&b));
    b.position = Point2::new(2.0 * a.radius() + 0.1, 0.0);
    assert!(!a.collides_with(&b));
}

#[test]
fn movable_reflects_flags() {
    let mut b = body(1.0);
    assert!(b.movable());
    b.fixed = true;
    assert!(!b.movable());
    b.fixed = false;
    b.dragged = true;
    assert!(!b.movable());
}
