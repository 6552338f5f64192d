//! Direct O(N²) summation kernels.
//!
//! Three variants of the same sum. `evaluate_naive` is the reference: serial,
//! fixed iteration order, bit-reproducible. `evaluate_blocked` tiles the
//! receiver loop so a block of accumulators stays in cache across one sweep
//! of the sources. `evaluate_morton` visits bodies in Z-order, which keeps
//! near neighbours close in iteration order; the interleaving is a locality
//! heuristic only, never a spatial index.

use crate::config::SimConfig;
use crate::forces::pair_force;
use crate::stats::StepStats;
use crate::store::BodyArrays;

/// Receiver-block width for the blocked kernel.
const BLOCK_SIZE: usize = 32;

/// Naive all-pairs summation, serial and deterministic.
pub fn evaluate_naive(arrays: &mut BodyArrays, config: &SimConfig, stats: &mut StepStats) {
    let n = arrays.len();
    let g = config.gravitational_constant;
    let eps_sq = config.softening_length * config.softening_length;

    for i in 0..n {
        if arrays.fixed[i] {
            continue;
        }
        let mut total = nalgebra::Vector2::zeros();
        for j in 0..n {
            if i == j {
                continue;
            }
            let delta = arrays.positions[j] - arrays.positions[i];
            if let Some(force) = pair_force(delta, arrays.masses[i], arrays.masses[j], g, eps_sq) {
                total += force;
                stats.force_ops += 1;
            }
        }
        arrays.forces[i] = total;
    }
}

/// All-pairs summation blocked over the receiver index.
///
/// Each 32-receiver block sweeps the full source list once, so the block's
/// positions and accumulators stay resident while the sources stream through.
pub fn evaluate_blocked(arrays: &mut BodyArrays, config: &SimConfig, stats: &mut StepStats) {
    let n = arrays.len();
    let g = config.gravitational_constant;
    let eps_sq = config.softening_length * config.softening_length;

    for block_start in (0..n).step_by(BLOCK_SIZE) {
        let block_end = (block_start + BLOCK_SIZE).min(n);
        for j in 0..n {
            for i in block_start..block_end {
                if i == j || arrays.fixed[i] {
                    continue;
                }
                let delta = arrays.positions[j] - arrays.positions[i];
                if let Some(force) =
                    pair_force(delta, arrays.masses[i], arrays.masses[j], g, eps_sq)
                {
                    arrays.forces[i] += force;
                    stats.force_ops += 1;
                }
            }
        }
    }
}

/// All-pairs summation over a Morton-ordered permutation of the bodies.
///
/// Sorting by interleaved grid coordinates makes consecutive receivers
/// spatial neighbours, which improves cache behaviour of the position reads.
/// The forces are identical to the naive sum up to floating-point
/// reassociation.
pub fn evaluate_morton(arrays: &mut BodyArrays, config: &SimConfig, stats: &mut StepStats) {
    let n = arrays.len();
    let g = config.gravitational_constant;
    let eps_sq = config.softening_length * config.softening_length;

    let order = morton_order(arrays);

    for &i in &order {
        if arrays.fixed[i] {
            continue;
        }
        let mut total = nalgebra::Vector2::zeros();
        for &j in &order {
            if i == j {
                continue;
            }
            let delta = arrays.positions[j] - arrays.positions[i];
            if let Some(force) = pair_force(delta, arrays.masses[i], arrays.masses[j], g, eps_sq) {
                total += force;
                stats.force_ops += 1;
            }
        }
        arrays.forces[i] = total;
    }
}

// Body indices sorted by the Morton key of their quantised positions.
fn morton_order(arrays: &BodyArrays) -> Vec<usize> {
    let n = arrays.len();
    let mut min = arrays.positions[0];
    let mut max = arrays.positions[0];
    for p in &arrays.positions[1..] {
        min.x = min.x.min(p.x);
        min.y = min.y.min(p.y);
        max.x = max.x.max(p.x);
        max.y = max.y.max(p.y);
    }
    let extent_x = (max.x - min.x).max(f64::EPSILON);
    let extent_y = (max.y - min.y).max(f64::EPSILON);

    let mut order: Vec<usize> = (0..n).collect();
    let key = |i: usize| -> u32 {
        let p = arrays.positions[i];
        let gx = (((p.x - min.x) / extent_x) * 65_535.0) as u32;
        let gy = (((p.y - min.y) / extent_y) * 65_535.0) as u32;
        interleave_bits(gx) | (interleave_bits(gy) << 1)
    };
    order.sort_by_key(|&i| key(i));
    order
}

// Spreads the low 16 bits of `value` into the even bit positions.
fn interleave_bits(value: u32) -> u32 {
    let mut v = value & 0x0000_ffff;
    v = (v | (v << 8)) & 0x00ff_00ff;
    v = (v | (v << 4)) & 0x0f0f_0f0f;
    v = (v | (v << 2)) & 0x3333_3333;
    v = (v | (v << 1)) & 0x5555_5555;
    v
}
