//! Time integration.
//!
//! The default scheme is kick-drift-kick leapfrog: symplectic, second order,
//! with bounded long-term energy error, which is what makes orbits hold their
//! shape over many periods. The second kick uses forces re-evaluated at the
//! drifted positions, at the cost of one extra force pass per step.
//!
//! Explicit Euler and position-Verlet are kept for diagnostics and
//! comparison; Euler visibly fails energy conservation and should never be
//! used for production runs.

use std::time::Instant;

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use crate::config::SimConfig;
use crate::forces;
use crate::stats::StepStats;
use crate::store::{BodyArrays, BodyStore};

/// Speed cap applied after every update.
pub const MAX_SPEED: f64 = 500.0;

/// Which update scheme advances the bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntegrationScheme {
    /// Kick-drift-kick leapfrog. Symplectic; the default.
    #[default]
    Leapfrog,
    /// Explicit Euler. First order, energy-divergent; diagnostics only.
    Euler,
    /// Position-Verlet. Second-order positions from a single force pass.
    Verlet,
}

/// Advances every movable body by one step of size `h`.
///
/// Expects the bodies' force accumulators to hold the forces at the current
/// positions. The leapfrog path refreshes forces once more after the drift;
/// that pass goes through the normal evaluator and is accounted in the force
/// timings.
///
/// Fixed and dragged bodies have their velocity zeroed and are otherwise
/// untouched.
pub fn integrate(
    store: &mut BodyStore,
    arrays: &mut BodyArrays,
    h: f64,
    config: &SimConfig,
    stats: &mut StepStats,
) {
    match config.integrator {
        IntegrationScheme::Leapfrog => leapfrog(store, arrays, h, config, stats),
        IntegrationScheme::Euler => euler(store, h, config, stats),
        IntegrationScheme::Verlet => verlet(store, h, config, stats),
    }
}

/// Adaptive step size `√(ε / a_max)`, clamped to the configured bounds.
///
/// Uses the accelerations recorded by the previous integration pass; with no
/// acceleration on record the configured fixed step is returned.
pub fn adaptive_step(store: &BodyStore, config: &SimConfig) -> f64 {
    let a_max = store
        .iter()
        .map(|body| body.acceleration.norm())
        .fold(0.0, f64::max);
    if a_max > 0.0 {
        (config.softening_length / a_max)
            .sqrt()
            .clamp(config.min_time_step, config.max_time_step)
    } else {
        config.time_step
    }
}

fn leapfrog(
    store: &mut BodyStore,
    arrays: &mut BodyArrays,
    h: f64,
    config: &SimConfig,
    stats: &mut StepStats,
) {
    let half_h = 0.5 * h;
    let damping = config.damping_factor;

    // Half-kick with the forces at the current positions, then drift.
    let started = Instant::now();
    for body in store.iter_mut() {
        if !body.movable() {
            body.velocity = Vector2::zeros();
            body.acceleration = Vector2::zeros();
            continue;
        }
        let acceleration = body.force / body.mass();
        body.acceleration = acceleration;
        body.velocity = body.velocity * damping + acceleration * half_h;
        body.position += body.velocity * h;
    }
    stats.integrate_ms += started.elapsed().as_secs_f64() * 1e3;

    // Forces at the drifted positions for the closing half-kick.
    arrays.sync(store);
    forces::evaluate(arrays, config, stats);
    store.apply_forces(arrays);

    let started = Instant::now();
    for body in store.iter_mut() {
        if !body.movable() {
            continue;
        }
        let acceleration = body.force / body.mass();
        body.acceleration = acceleration;
        body.velocity += acceleration * half_h;
        clamp_speed(body);
    }
    stats.integrate_ms += started.elapsed().as_secs_f64() * 1e3;
}

fn euler(store: &mut BodyStore, h: f64, config: &SimConfig, stats: &mut StepStats) {
    let damping = config.damping_factor;
    let started = Instant::now();
    for body in store.iter_mut() {
        if !body.movable() {
            body.velocity = Vector2::zeros();
            body.acceleration = Vector2::zeros();
            continue;
        }
        let acceleration = body.force / body.mass();
        body.acceleration = acceleration;
        // Position from the pre-update velocity: the classic explicit form.
        body.position += body.velocity * h;
        body.velocity = body.velocity * damping + acceleration * h;
        clamp_speed(body);
    }
    stats.integrate_ms += started.elapsed().as_secs_f64() * 1e3;
}

fn verlet(store: &mut BodyStore, h: f64, config: &SimConfig, stats: &mut StepStats) {
    let damping = config.damping_factor;
    let started = Instant::now();
    for body in store.iter_mut() {
        if !body.movable() {
            body.velocity = Vector2::zeros();
            body.acceleration = Vector2::zeros();
            continue;
        }
        let acceleration = body.force / body.mass();
        body.acceleration = acceleration;
        body.position += body.velocity * h + acceleration * (0.5 * h * h);
        body.velocity = body.velocity * damping + acceleration * h;
        clamp_speed(body);
    }
    stats.integrate_ms += started.elapsed().as_secs_f64() * 1e3;
}

fn clamp_speed(body: &mut crate::body::Body) {
    let speed_sq = body.velocity.norm_squared();
    if speed_sq > MAX_SPEED * MAX_SPEED {
        body.velocity *= MAX_SPEED / speed_sq.sqrt();
    }
}
