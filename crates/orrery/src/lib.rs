//! Two-dimensional gravitational N-body core.
//!
//! Advances a population of massive point bodies under mutual Newtonian
//! gravity: direct and Barnes-Hut force evaluation, kick-drift-kick leapfrog
//! integration, elastic pairwise collisions, and the bookkeeping around them
//! (body store, quadtree, trails, energy and timing probes). Rendering, input
//! and UI are collaborators on the other side of [`PhysicsEngine`]'s surface.

pub mod body;
pub mod collisions;
pub mod config;
pub mod energy;
pub mod engine;
pub mod error;
pub mod forces;
pub mod integrator;
pub mod quadtree;
pub mod stats;
pub mod store;
pub mod trail;

#[cfg(test)]
mod body_test;
#[cfg(test)]
mod collisions_test;
#[cfg(test)]
mod store_test;

pub use body::{Body, BodyId};
pub use config::SimConfig;
pub use energy::EnergyReport;
pub use engine::PhysicsEngine;
pub use error::{SimError, SimResult};
pub use integrator::IntegrationScheme;
pub use stats::{ForceMethod, StepStats};
pub use store::{BodyArrays, BodyStore};
pub use trail::Trail;
