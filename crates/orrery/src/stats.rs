//! Per-step counters and phase timings.

use std::fmt;

/// Which force path the evaluator chose for a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ForceMethod {
    /// Naive all-pairs summation.
    #[default]
    Direct,
    /// All-pairs with the receiver loop blocked for cache locality.
    Blocked,
    /// All-pairs over a Morton-ordered body permutation.
    Morton,
    /// Barnes-Hut tree approximation.
    BarnesHut,
}

impl fmt::Display for ForceMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ForceMethod::Direct => "direct",
            ForceMethod::Blocked => "blocked",
            ForceMethod::Morton => "morton",
            ForceMethod::BarnesHut => "barnes-hut",
        };
        f.write_str(name)
    }
}

/// Everything the engine measured during one step.
///
/// Written by a single owner per step and handed to the evaluator as an
/// explicit out-parameter; no component keeps hidden counters.
#[derive(Debug, Clone, Default)]
pub struct StepStats {
    /// Force path used.
    pub method: ForceMethod,
    /// Wall-clock time of the whole step, in milliseconds.
    pub total_ms: f64,
    /// Time spent evaluating forces (all passes of the step).
    pub force_ms: f64,
    /// Time spent integrating.
    pub integrate_ms: f64,
    /// Time spent resolving collisions.
    pub collide_ms: f64,
    /// Time spent building the quadtree, included in `force_ms`.
    pub tree_ms: f64,
    /// Bodies simulated this step.
    pub body_count: usize,
    /// Pairwise (or node) force contributions evaluated.
    pub force_ops: u64,
    /// Colliding pairs resolved.
    pub collisions: usize,
    /// Bodies left outside the tree's root box at build time.
    pub outside_root: usize,
}

impl StepStats {
    /// Resets every field for a fresh step.
    pub fn reset(&mut self) {
        *self = StepStats::default();
    }
}
