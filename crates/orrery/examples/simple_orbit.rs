//! Single satellite orbiting a heavy primary.
//!
//! Demonstrates the leapfrog integrator and the energy probe over many
//! orbits.
//!
//! Run with: cargo run --package orrery --example simple_orbit

use nalgebra::{Point2, Vector2};
use orrery::{energy, BodyStore, PhysicsEngine, SimConfig};

fn main() {
    let g: f64 = 1.0;
    let radius = 50.0;
    let speed = (g * 100.0 / radius).sqrt();

    // Give the primary the opposite momentum so the barycentre stays put.
    let mut bodies = BodyStore::new();
    bodies.add(
        Point2::new(0.0, 0.0),
        Vector2::new(0.0, -speed / 100.0),
        100.0,
    );
    let satellite = bodies.add(Point2::new(radius, 0.0), Vector2::new(0.0, speed), 1.0);

    let config = SimConfig {
        gravitational_constant: g,
        softening_length: 0.01,
        enable_collisions: false,
        ..SimConfig::default()
    };
    let mut engine = PhysicsEngine::with_config(config).expect("valid config");

    let initial = energy::measure(&bodies, g);
    println!("initial energy: {:+.6}", initial.total);

    let period = std::f64::consts::TAU * (radius.powi(3) / (g * 101.0)).sqrt();
    let dt = period / 2_000.0;

    for orbit in 1..=5 {
        for _ in 0..2_000 {
            engine.step(&mut bodies, dt);
        }
        let report = energy::measure(&bodies, g);
        let drift = ((report.total - initial.total) / initial.total).abs();
        let position = bodies.get(satellite).unwrap().position;
        println!(
            "orbit {orbit}: r = {:7.3}, energy drift = {:.2e}",
            position.coords.norm(),
            drift
        );
    }

    println!(
        "satellite trail holds {} points",
        bodies.get(satellite).unwrap().trail.len()
    );
}
