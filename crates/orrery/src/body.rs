//! A single point mass and its derived state.

use nalgebra::{Point2, Vector2};
use tracing::warn;

use crate::trail::Trail;

/// Smallest accepted mass; setters clamp below this.
pub const MIN_MASS: f64 = 0.1;
/// Smallest accepted density; setters clamp below this.
pub const MIN_DENSITY: f64 = 1e-3;
/// Density assigned when the caller does not supply one. Low density keeps
/// bodies visibly large for a given mass.
pub const DEFAULT_DENSITY: f64 = 0.1;
/// Lower clamp on the derived radius.
pub const MIN_RADIUS: f64 = 2.0;
/// Upper clamp on the derived radius.
pub const MAX_RADIUS: f64 = 100.0;

/// Stable handle for a body, valid for the body's lifetime in its store.
///
/// Indices into the store shift on removal; a `BodyId` does not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyId(pub u32);

/// A point mass in the plane.
///
/// Mass, density and radius are coupled: the radius of the disc a body
/// presents for collisions and picking is derived as `√(m / (π·ρ))`, clamped
/// to `[2, 100]`, and is refreshed whenever mass or density change. The
/// fields are therefore private behind clamping setters; everything else is
/// plain data.
///
/// # Examples
///
/// ```rust
/// use nalgebra::{Point2, Vector2};
/// use orrery::Body;
/// use orrery::body::BodyId;
///
/// let body = Body::new(
///     BodyId(0),
///     Point2::new(0.0, 0.0),
///     Vector2::new(1.0, 0.0),
///     10.0,
/// );
/// // r = √(10 / (π·0.1)) ≈ 5.64
/// assert!((body.radius() - 5.6419).abs() < 1e-3);
/// ```
#[derive(Debug, Clone)]
pub struct Body {
    /// Stable identity within the owning store.
    pub id: BodyId,
    /// Position in world units.
    pub position: Point2<f64>,
    /// Velocity in world units per time unit.
    pub velocity: Vector2<f64>,
    /// Acceleration from the last integration pass.
    pub acceleration: Vector2<f64>,
    /// Force accumulated by the last evaluation pass.
    pub force: Vector2<f64>,
    mass: f64,
    density: f64,
    radius: f64,
    /// Display colour, each channel in [0, 1].
    pub color: [f32; 3],
    /// Highlighted in the UI layer.
    pub selected: bool,
    /// Currently held by the pointer; excluded from integration.
    pub dragged: bool,
    /// Pinned in place; never moves, always attracts.
    pub fixed: bool,
    /// Recent positions for rendering.
    pub trail: Trail,
}

impl Body {
    /// Creates a body with the default density and a white colour.
    pub fn new(id: BodyId, position: Point2<f64>, velocity: Vector2<f64>, mass: f64) -> Self {
        Self::with_density(id, position, velocity, mass, DEFAULT_DENSITY, [1.0; 3])
    }

    /// Creates a body with an explicit density and colour.
    ///
    /// Mass and density are clamped to their valid domains exactly as the
    /// setters would clamp them.
    pub fn with_density(
        id: BodyId,
        position: Point2<f64>,
        velocity: Vector2<f64>,
        mass: f64,
        density: f64,
        color: [f32; 3],
    ) -> Self {
        let mut body = Self {
            id,
            position,
            velocity,
            acceleration: Vector2::zeros(),
            force: Vector2::zeros(),
            mass: MIN_MASS,
            density: MIN_DENSITY,
            radius: MIN_RADIUS,
            color,
            selected: false,
            dragged: false,
            fixed: false,
            trail: Trail::new(),
        };
        body.mass = clamp_reported(mass, MIN_MASS, "mass");
        body.density = clamp_reported(density, MIN_DENSITY, "density");
        body.update_radius();
        body
    }

    /// Mass of the body.
    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// Density of the body.
    pub fn density(&self) -> f64 {
        self.density
    }

    /// Radius derived from mass and density.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Sets the mass, clamping to the valid floor, and refreshes the radius.
    pub fn set_mass(&mut self, mass: f64) {
        self.mass = clamp_reported(mass, MIN_MASS, "mass");
        self.update_radius();
    }

    /// Sets the density, clamping to the valid floor, and refreshes the
    /// radius.
    pub fn set_density(&mut self, density: f64) {
        self.density = clamp_reported(density, MIN_DENSITY, "density");
        self.update_radius();
    }

    /// Speed, `‖v‖`.
    pub fn speed(&self) -> f64 {
        self.velocity.norm()
    }

    /// Linear momentum `m·v`.
    pub fn momentum(&self) -> Vector2<f64> {
        self.velocity * self.mass
    }

    /// Kinetic energy `½·m·‖v‖²`.
    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.velocity.norm_squared()
    }

    /// Whether this body's disc overlaps `other`'s.
    pub fn collides_with(&self, other: &Body) -> bool {
        let distance = (self.position - other.position).norm();
        distance <= self.radius + other.radius
    }

    /// True when the integrator and collision response may move this body.
    pub fn movable(&self) -> bool {
        !self.fixed && !self.dragged
    }

    // Treat the body as a disc of uniform density: area = m / ρ = π·r².
    fn update_radius(&mut self) {
        let radius = (self.mass / (std::f64::consts::PI * self.density)).sqrt();
        self.radius = radius.clamp(MIN_RADIUS, MAX_RADIUS);
    }
}

fn clamp_reported(value: f64, floor: f64, name: &'static str) -> f64 {
    if value.is_finite() && value >= floor {
        value
    } else {
        warn!(name, value, clamped_to = floor, "parameter clamped");
        floor
    }
}
