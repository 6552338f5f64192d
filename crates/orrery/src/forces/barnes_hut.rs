//! Barnes-Hut tree evaluation, O(N log N).

use std::time::Instant;

use nalgebra::Vector2;
use rayon::prelude::*;

use crate::config::SimConfig;
use crate::quadtree::QuadTree;
use crate::stats::StepStats;
use crate::store::BodyArrays;

/// Builds a fresh quadtree over the snapshot and evaluates every receiver
/// against it.
///
/// The tree is rebuilt from the live positions each pass, read-only during
/// traversal and dropped afterwards. Receivers are independent, each writes
/// only its own accumulator, so the outer loop fans out across the rayon
/// pool; the per-receiver traversal order inside one run is fixed, but the
/// parallel sum makes no cross-run bit-exactness promise.
pub fn evaluate(arrays: &mut BodyArrays, config: &SimConfig, stats: &mut StepStats) {
    let build_started = Instant::now();
    let tree = QuadTree::build(&arrays.positions, &arrays.masses);
    stats.tree_ms += build_started.elapsed().as_secs_f64() * 1e3;
    stats.outside_root += tree.skipped();

    let theta = config.barnes_hut_theta;
    let g = config.gravitational_constant;
    let softening = config.softening_length;

    let results: Vec<(Vector2<f64>, u64)> = arrays
        .positions
        .par_iter()
        .enumerate()
        .map(|(i, &position)| {
            if arrays.fixed[i] {
                (Vector2::zeros(), 0)
            } else {
                tree.force_on(i, position, arrays.masses[i], theta, g, softening)
            }
        })
        .collect();

    for (i, (force, evaluated)) in results.into_iter().enumerate() {
        arrays.forces[i] = force;
        stats.force_ops += evaluated;
    }
}
