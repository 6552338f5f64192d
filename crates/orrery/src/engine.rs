//! The step pipeline.

use std::time::Instant;

use tracing::debug;

use crate::collisions;
use crate::config::SimConfig;
use crate::energy::{self, EnergyReport};
use crate::error::SimResult;
use crate::forces;
use crate::integrator;
use crate::stats::StepStats;
use crate::store::{BodyArrays, BodyStore};
use crate::trail::TrailSampler;

/// Sequences one simulation step: forces, collisions, integration, trails.
///
/// The engine owns the configuration snapshot, the structure-of-arrays
/// scratch and the step statistics; the caller owns the [`BodyStore`]. A step
/// takes `&mut self`, so a second step cannot begin before the first returns,
/// and configuration changes land between steps by construction.
///
/// # Examples
///
/// ```rust
/// use nalgebra::{Point2, Vector2};
/// use orrery::{BodyStore, PhysicsEngine};
///
/// let mut bodies = BodyStore::new();
/// bodies.add(Point2::new(0.0, 0.0), Vector2::new(0.0, 0.0), 100.0);
/// bodies.add(Point2::new(50.0, 0.0), Vector2::new(0.0, 1.4), 1.0);
///
/// let mut engine = PhysicsEngine::new();
/// engine.step(&mut bodies, 0.016);
///
/// assert_eq!(engine.stats().body_count, 2);
/// ```
#[derive(Debug, Default)]
pub struct PhysicsEngine {
    config: SimConfig,
    arrays: BodyArrays,
    stats: StepStats,
    trail_sampler: TrailSampler,
    paused: bool,
}

impl PhysicsEngine {
    /// Creates an engine with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an engine with a validated configuration.
    pub fn with_config(config: SimConfig) -> SimResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::default()
        })
    }

    /// The active configuration.
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Installs a new configuration for the next step.
    ///
    /// Invalid configurations are refused here, at the boundary; a running
    /// step never observes one.
    pub fn set_config(&mut self, config: SimConfig) -> SimResult<()> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// Statistics of the most recent step.
    pub fn stats(&self) -> &StepStats {
        &self.stats
    }

    /// Whether stepping is suspended.
    pub fn paused(&self) -> bool {
        self.paused
    }

    /// Suspends or resumes stepping; a paused step is a no-op.
    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// Clears the statistics and restarts the trail sampling cycle.
    pub fn reset(&mut self) {
        self.stats.reset();
        self.trail_sampler.reset();
    }

    /// Energy of the store under the engine's gravitational constant.
    pub fn energy(&self, store: &BodyStore) -> EnergyReport {
        energy::measure(store, self.config.gravitational_constant)
    }

    /// Advances the simulation by one step.
    ///
    /// `delta_time` is scaled by `time_scale`, or replaced outright by the
    /// adaptive rule when enabled. Does nothing while paused or when the
    /// store is empty. On return the store holds the fully updated state;
    /// no partial update is ever observable.
    pub fn step(&mut self, store: &mut BodyStore, delta_time: f64) {
        if self.paused || store.is_empty() {
            return;
        }

        let started = Instant::now();
        self.stats.reset();

        let h = if self.config.adaptive_time_step {
            integrator::adaptive_step(store, &self.config)
        } else {
            delta_time * self.config.time_scale
        };

        // Forces at the current positions.
        self.arrays.sync(store);
        forces::evaluate(&mut self.arrays, &self.config, &mut self.stats);
        store.apply_forces(&self.arrays);

        if self.config.enable_collisions {
            let collide_started = Instant::now();
            self.stats.collisions = collisions::resolve(store, &self.config);
            self.stats.collide_ms = collide_started.elapsed().as_secs_f64() * 1e3;
        }

        integrator::integrate(store, &mut self.arrays, h, &self.config, &mut self.stats);

        if self.trail_sampler.tick() {
            for body in store.iter_mut() {
                if !body.fixed {
                    let position = body.position;
                    body.trail.push(position);
                }
            }
        }

        self.stats.body_count = store.len();
        self.stats.total_ms = started.elapsed().as_secs_f64() * 1e3;
        debug!(
            method = %self.stats.method,
            bodies = self.stats.body_count,
            step = h,
            total_ms = self.stats.total_ms,
            "step complete"
        );
    }
}
