//! Gravitational force evaluation.
//!
//! One entry point, [`evaluate`], picks a kernel by population size and
//! configuration and fills the force accumulators of a [`BodyArrays`]
//! snapshot. Every kernel computes the same softened quantity
//!
//! ```text
//! F_ij = G · m_i · m_j · Δ / (‖Δ‖² + ε²)^(3/2)
//! ```
//!
//! as a true force; the integrator divides by the receiver's mass. Fixed
//! bodies are skipped as receivers but always attract as sources.

use std::time::Instant;

use nalgebra::Vector2;
use tracing::debug;

use crate::config::SimConfig;
use crate::stats::{ForceMethod, StepStats};
use crate::store::BodyArrays;

pub mod barnes_hut;
pub mod direct;

/// Separations below this (squared) contribute no force at all.
pub const MIN_DISTANCE_SQ: f64 = 1e-10;

/// Per-contribution force magnitude cap. Applied in every kernel, tree
/// included, so the paths stay comparable.
pub const MAX_FORCE: f64 = 1e4;

/// Populations above this use the blocked rather than the naive kernel.
const BLOCKED_THRESHOLD: usize = 50;

/// Populations above this use the Morton-ordered kernel.
const MORTON_THRESHOLD: usize = 100;

/// Evaluates forces for every body in `arrays`.
///
/// Selection, in order: a requested GPU path falls back to the CPU ladder
/// (the core carries none); Barnes-Hut when enabled and the population
/// exceeds `max_bodies_for_direct`; then Morton-ordered, blocked, or naive
/// direct summation by population size.
///
/// The accumulators are cleared first, so the result is exactly this pass's
/// forces. Timings, the contribution count and the chosen method accumulate
/// into `stats`.
pub fn evaluate(arrays: &mut BodyArrays, config: &SimConfig, stats: &mut StepStats) {
    let started = Instant::now();
    let n = arrays.len();

    for force in arrays.forces.iter_mut() {
        *force = Vector2::zeros();
    }
    if n == 0 {
        return;
    }

    if config.use_gpu {
        debug!("gpu path requested but unavailable; using cpu ladder");
    }

    let method = if config.use_barnes_hut && n > config.max_bodies_for_direct {
        barnes_hut::evaluate(arrays, config, stats);
        ForceMethod::BarnesHut
    } else if n > MORTON_THRESHOLD {
        direct::evaluate_morton(arrays, config, stats);
        ForceMethod::Morton
    } else if n > BLOCKED_THRESHOLD {
        direct::evaluate_blocked(arrays, config, stats);
        ForceMethod::Blocked
    } else {
        direct::evaluate_naive(arrays, config, stats);
        ForceMethod::Direct
    };

    stats.method = method;
    stats.force_ms += started.elapsed().as_secs_f64() * 1e3;
    debug!(%method, bodies = n, ops = stats.force_ops, "forces evaluated");
}

/// Softened pairwise force of source `j` on receiver `i`.
///
/// Returns `None` for degenerate separations, which contribute nothing.
#[inline]
pub(crate) fn pair_force(
    delta: Vector2<f64>,
    mass_i: f64,
    mass_j: f64,
    g: f64,
    eps_sq: f64,
) -> Option<Vector2<f64>> {
    let dist_sq = delta.norm_squared();
    if dist_sq < MIN_DISTANCE_SQ {
        return None;
    }
    let soft_sq = dist_sq + eps_sq;
    let force = delta * (g * mass_i * mass_j / (soft_sq * soft_sq.sqrt()));
    Some(clamp_force(force))
}

/// Caps a contribution at [`MAX_FORCE`], preserving direction.
#[inline]
pub(crate) fn clamp_force(force: Vector2<f64>) -> Vector2<f64> {
    let norm_sq = force.norm_squared();
    if norm_sq > MAX_FORCE * MAX_FORCE {
        force * (MAX_FORCE / norm_sq.sqrt())
    } else {
        force
    }
}
