//! A random cluster large enough to engage the Barnes-Hut path.
//!
//! Run with: cargo run --release --package orrery --example cluster

use nalgebra::{Point2, Vector2};
use orrery::{BodyStore, PhysicsEngine, SimConfig};
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaChaRng;

fn main() {
    let mut rng = ChaChaRng::seed_from_u64(7);
    let mut bodies = BodyStore::new();

    for _ in 0..1_500 {
        let radius = 400.0 * rng.random::<f64>().sqrt();
        let angle = rng.random_range(0.0..std::f64::consts::TAU);
        let position = Point2::new(radius * angle.cos(), radius * angle.sin());
        // Mild solid-body rotation keeps the cluster from collapsing at once.
        let velocity = Vector2::new(-position.y, position.x) * 0.002;
        bodies.add(position, velocity, rng.random_range(0.5..3.0));
    }

    let config = SimConfig {
        barnes_hut_theta: 0.7,
        enable_collisions: false,
        ..SimConfig::default()
    };
    let mut engine = PhysicsEngine::with_config(config).expect("valid config");

    for step in 1..=100 {
        engine.step(&mut bodies, 0.016);
        if step % 20 == 0 {
            let stats = engine.stats();
            println!(
                "step {step:3}: method = {:>10}, ops = {:>8}, tree = {:.2} ms, total = {:.2} ms",
                stats.method.to_string(),
                stats.force_ops,
                stats.tree_ms,
                stats.total_ms
            );
        }
    }

    let com = bodies.center_of_mass();
    println!(
        "final population {} centred at ({:.1}, {:.1})",
        bodies.len(),
        com.x,
        com.y
    );
}
