//! Conserved-quantity probe.

use crate::store::BodyStore;

/// Pairs closer than this are skipped in the potential sum.
pub const MIN_PAIR_DISTANCE: f64 = 1e-6;

/// Kinetic, potential and total energy of a snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EnergyReport {
    /// `Σ ½·m·‖v‖²`.
    pub kinetic: f64,
    /// `−Σ G·m_i·m_j / r_ij` over unordered pairs.
    pub potential: f64,
    /// Kinetic plus potential.
    pub total: f64,
}

/// Measures the system energy under gravitational constant `g`.
///
/// Purely diagnostic: the step pipeline never consults it. The potential sum
/// uses the unsoftened separations, so drift figures are comparable across
/// softening settings.
///
/// # Examples
///
/// ```rust
/// use nalgebra::{Point2, Vector2};
/// use orrery::{energy, BodyStore};
///
/// let mut bodies = BodyStore::new();
/// bodies.add(Point2::new(0.0, 0.0), Vector2::new(0.0, 0.0), 1.0);
/// bodies.add(Point2::new(2.0, 0.0), Vector2::new(0.0, 1.0), 1.0);
///
/// let report = energy::measure(&bodies, 1.0);
/// assert_eq!(report.kinetic, 0.5);
/// assert_eq!(report.potential, -0.5);
/// assert_eq!(report.total, report.kinetic + report.potential);
/// ```
pub fn measure(store: &BodyStore, g: f64) -> EnergyReport {
    let bodies = store.as_slice();

    let kinetic: f64 = bodies.iter().map(|body| body.kinetic_energy()).sum();

    let mut potential = 0.0;
    for (i, a) in bodies.iter().enumerate() {
        for b in &bodies[i + 1..] {
            let distance = (a.position - b.position).norm();
            if distance > MIN_PAIR_DISTANCE {
                potential -= g * a.mass() * b.mass() / distance;
            }
        }
    }

    EnergyReport {
        kinetic,
        potential,
        total: kinetic + potential,
    }
}
