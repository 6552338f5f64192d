//! Head-on collision with varying restitution.
//!
//! Run with: cargo run --package orrery --example collision_demo

use nalgebra::{Point2, Vector2};
use orrery::{BodyStore, PhysicsEngine, SimConfig};

fn run(restitution: f64) {
    let mut bodies = BodyStore::new();
    let left = bodies.add(Point2::new(-10.0, 0.0), Vector2::new(2.0, 0.0), 4.0);
    let right = bodies.add(Point2::new(10.0, 0.0), Vector2::new(-2.0, 0.0), 4.0);

    let config = SimConfig {
        gravitational_constant: 0.0,
        restitution,
        ..SimConfig::default()
    };
    let mut engine = PhysicsEngine::with_config(config).expect("valid config");

    let ke_before: f64 = bodies.iter().map(|b| b.kinetic_energy()).sum();
    let mut contacts = 0;
    for _ in 0..400 {
        engine.step(&mut bodies, 0.016);
        contacts += engine.stats().collisions;
    }
    let ke_after: f64 = bodies.iter().map(|b| b.kinetic_energy()).sum();

    println!(
        "e = {restitution:.1}: contacts = {contacts}, v = ({:+.2}, {:+.2}), kinetic {:.2} -> {:.2}",
        bodies.get(left).unwrap().velocity.x,
        bodies.get(right).unwrap().velocity.x,
        ke_before,
        ke_after
    );
}

fn main() {
    for restitution in [1.0, 0.8, 0.5, 0.0] {
        run(restitution);
    }
}
