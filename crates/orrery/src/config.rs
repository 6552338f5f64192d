//! Simulation configuration.
//!
//! [`SimConfig`] is a plain record snapshotted by the engine at the start of
//! every step; mutating it mid-step is impossible by construction. Invalid
//! values are refused at the boundary by [`SimConfig::validate`], never
//! discovered mid-pipeline.

use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};
use crate::integrator::IntegrationScheme;

/// Tunable parameters for a simulation step.
///
/// # Examples
///
/// ```rust
/// use orrery::SimConfig;
///
/// let config = SimConfig {
///     barnes_hut_theta: 0.5,
///     enable_collisions: false,
///     ..SimConfig::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    /// Gravitational constant G. Scales every gravity contribution.
    pub gravitational_constant: f64,
    /// Default step size when the adaptive rule is off.
    pub time_step: f64,
    /// Multiplier applied to the caller-supplied delta time.
    pub time_scale: f64,
    /// Softening length ε; ε² is added to every squared separation.
    pub softening_length: f64,
    /// Multiplicative velocity damping applied in the first half-kick.
    pub damping_factor: f64,
    /// Enables the Barnes-Hut tree path for large populations.
    pub use_barnes_hut: bool,
    /// Barnes-Hut opening angle θ. Smaller is more exact and slower.
    pub barnes_hut_theta: f64,
    /// Enables pairwise collision resolution.
    pub enable_collisions: bool,
    /// Coefficient of restitution e ∈ [0, 1]; 1 is elastic.
    pub restitution: f64,
    /// Replaces the fixed step with √(ε / a_max), clamped below.
    pub adaptive_time_step: bool,
    /// Lower clamp for the adaptive step.
    pub min_time_step: f64,
    /// Upper clamp for the adaptive step.
    pub max_time_step: f64,
    /// Requests the GPU path. The core has none and falls back to the CPU
    /// ladder; the request is logged.
    pub use_gpu: bool,
    /// Population threshold below which the tree is bypassed entirely.
    pub max_bodies_for_direct: usize,
    /// Time integration scheme. Leapfrog is the default; the alternates exist
    /// for diagnostics.
    pub integrator: IntegrationScheme,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            gravitational_constant: 1.0,
            time_step: 0.016,
            time_scale: 1.0,
            softening_length: 0.1,
            damping_factor: 1.0,
            use_barnes_hut: true,
            barnes_hut_theta: 0.7,
            enable_collisions: true,
            restitution: 0.8,
            adaptive_time_step: false,
            min_time_step: 0.001,
            max_time_step: 0.033,
            use_gpu: false,
            max_bodies_for_direct: 1000,
            integrator: IntegrationScheme::Leapfrog,
        }
    }
}

impl SimConfig {
    /// Checks every field against its valid domain.
    ///
    /// Returns the first offending field. Called by the engine whenever a
    /// configuration is installed, so a step never observes an invalid one.
    pub fn validate(&self) -> SimResult<()> {
        fn check(ok: bool, name: &'static str, value: f64) -> SimResult<()> {
            if ok {
                Ok(())
            } else {
                Err(SimError::InvalidParameter { name, value })
            }
        }

        let c = self;
        check(
            c.gravitational_constant.is_finite() && c.gravitational_constant >= 0.0,
            "gravitational_constant",
            c.gravitational_constant,
        )?;
        check(c.time_step > 0.0, "time_step", c.time_step)?;
        check(c.time_scale > 0.0, "time_scale", c.time_scale)?;
        check(
            c.softening_length >= 0.0,
            "softening_length",
            c.softening_length,
        )?;
        check(
            (0.0..=1.0).contains(&c.damping_factor),
            "damping_factor",
            c.damping_factor,
        )?;
        check(
            c.barnes_hut_theta >= 0.0,
            "barnes_hut_theta",
            c.barnes_hut_theta,
        )?;
        check(
            (0.0..=1.0).contains(&c.restitution),
            "restitution",
            c.restitution,
        )?;
        check(c.min_time_step > 0.0, "min_time_step", c.min_time_step)?;
        check(
            c.max_time_step >= c.min_time_step,
            "max_time_step",
            c.max_time_step,
        )?;
        Ok(())
    }
}
