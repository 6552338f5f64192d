//! Owned body storage and the structure-of-arrays scratch mirror.

use nalgebra::{Point2, Vector2};

use crate::body::{Body, BodyId};

/// Owned, handle-addressed collection of bodies.
///
/// The store is the single source of truth for body state. Handles stay valid
/// until the body they name is removed; indices do not survive removals and
/// are only meaningful within one step.
///
/// # Examples
///
/// ```rust
/// use nalgebra::{Point2, Vector2};
/// use orrery::BodyStore;
///
/// let mut bodies = BodyStore::new();
/// let id = bodies.add(Point2::new(1.0, 0.0), Vector2::new(0.0, 1.0), 5.0);
///
/// assert_eq!(bodies.len(), 1);
/// assert!(bodies.get(id).is_some());
///
/// let removed = bodies.remove(id);
/// assert!(removed.is_some());
/// assert!(bodies.is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct BodyStore {
    bodies: Vec<Body>,
    next_id: u32,
    selected: Option<BodyId>,
    dragged: Option<BodyId>,
}

impl BodyStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a body with the default density and colour, returning its handle.
    pub fn add(&mut self, position: Point2<f64>, velocity: Vector2<f64>, mass: f64) -> BodyId {
        let id = self.fresh_id();
        self.bodies.push(Body::new(id, position, velocity, mass));
        id
    }

    /// Adds a body with an explicit density and colour.
    pub fn add_with_density(
        &mut self,
        position: Point2<f64>,
        velocity: Vector2<f64>,
        mass: f64,
        density: f64,
        color: [f32; 3],
    ) -> BodyId {
        let id = self.fresh_id();
        self.bodies.push(Body::with_density(
            id, position, velocity, mass, density, color,
        ));
        id
    }

    /// Removes the body named by `id`, returning it if present.
    ///
    /// Cached selection and drag handles naming the removed body are cleared;
    /// any handles held outside the store are the holder's responsibility.
    pub fn remove(&mut self, id: BodyId) -> Option<Body> {
        let index = self.bodies.iter().position(|b| b.id == id)?;
        if self.selected == Some(id) {
            self.selected = None;
        }
        if self.dragged == Some(id) {
            self.dragged = None;
        }
        Some(self.bodies.remove(index))
    }

    /// Removes every body and drops the cached handles.
    pub fn clear(&mut self) {
        self.bodies.clear();
        self.selected = None;
        self.dragged = None;
    }

    /// Number of bodies.
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    /// Whether the store holds no bodies.
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Looks up a body by handle.
    pub fn get(&self, id: BodyId) -> Option<&Body> {
        self.bodies.iter().find(|b| b.id == id)
    }

    /// Looks up a body mutably by handle.
    pub fn get_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.bodies.iter_mut().find(|b| b.id == id)
    }

    /// Iterates over the bodies.
    pub fn iter(&self) -> impl Iterator<Item = &Body> {
        self.bodies.iter()
    }

    /// Iterates mutably over the bodies.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Body> {
        self.bodies.iter_mut()
    }

    /// Direct slice access for index-driven passes within one step.
    pub fn as_slice(&self) -> &[Body] {
        &self.bodies
    }

    /// Mutable slice access for index-driven passes within one step.
    pub fn as_mut_slice(&mut self) -> &mut [Body] {
        &mut self.bodies
    }

    /// Finds the body closest to `position` within `tolerance`.
    ///
    /// With no tolerance given, each body is matched against twice its own
    /// radius, which is the pick margin the pointer layer expects.
    pub fn find_by_position(&self, position: Point2<f64>, tolerance: Option<f64>) -> Option<BodyId> {
        let mut best: Option<(BodyId, f64)> = None;
        for body in &self.bodies {
            let distance = (body.position - position).norm();
            let limit = tolerance.unwrap_or(2.0 * body.radius());
            if distance <= limit && best.map_or(true, |(_, d)| distance < d) {
                best = Some((body.id, distance));
            }
        }
        best.map(|(id, _)| id)
    }

    /// Marks `id` as selected, clearing the previous selection.
    pub fn select(&mut self, id: BodyId) {
        if let Some(previous) = self.selected {
            if let Some(body) = self.get_mut(previous) {
                body.selected = false;
            }
        }
        if let Some(body) = self.get_mut(id) {
            body.selected = true;
            self.selected = Some(id);
        }
    }

    /// Currently selected body, if any.
    pub fn selected(&self) -> Option<BodyId> {
        self.selected
    }

    /// Starts dragging `id`; the body stops integrating until released.
    pub fn begin_drag(&mut self, id: BodyId) {
        if let Some(body) = self.get_mut(id) {
            body.dragged = true;
            body.velocity = Vector2::zeros();
            self.dragged = Some(id);
        }
    }

    /// Releases the dragged body, if any.
    pub fn end_drag(&mut self) {
        if let Some(id) = self.dragged.take() {
            if let Some(body) = self.get_mut(id) {
                body.dragged = false;
            }
        }
    }

    /// Currently dragged body, if any.
    pub fn dragged(&self) -> Option<BodyId> {
        self.dragged
    }

    /// Copies the evaluator's force accumulators back onto the bodies.
    ///
    /// The mirror must have been synced from this store within the current
    /// step, so the two are index-aligned.
    pub fn apply_forces(&mut self, arrays: &BodyArrays) {
        debug_assert_eq!(self.bodies.len(), arrays.forces.len());
        for (body, &force) in self.bodies.iter_mut().zip(arrays.forces.iter()) {
            body.force = force;
        }
    }

    /// Sum of all body masses.
    pub fn total_mass(&self) -> f64 {
        self.bodies.iter().map(|b| b.mass()).sum()
    }

    /// Mass-weighted mean position, or the origin for an empty store.
    pub fn center_of_mass(&self) -> Point2<f64> {
        let total = self.total_mass();
        if total <= 0.0 {
            return Point2::origin();
        }
        let weighted = self
            .bodies
            .iter()
            .fold(Vector2::zeros(), |acc, b| acc + b.position.coords * b.mass());
        Point2::from(weighted / total)
    }

    /// Sum of all body momenta. Near zero for a closed system at rest.
    pub fn total_momentum(&self) -> Vector2<f64> {
        self.bodies
            .iter()
            .fold(Vector2::zeros(), |acc, b| acc + b.momentum())
    }

    /// Axis-aligned bounds of the body positions as `(min, max)`.
    pub fn bounding_box(&self) -> Option<(Point2<f64>, Point2<f64>)> {
        let first = self.bodies.first()?;
        let mut min = first.position;
        let mut max = first.position;
        for body in &self.bodies[1..] {
            min.x = min.x.min(body.position.x);
            min.y = min.y.min(body.position.y);
            max.x = max.x.max(body.position.x);
            max.y = max.y.max(body.position.y);
        }
        Some((min, max))
    }

    fn fresh_id(&mut self) -> BodyId {
        let id = BodyId(self.next_id);
        self.next_id += 1;
        id
    }
}

/// Structure-of-arrays mirror of the store for the force kernels.
///
/// Refreshed from the store before each evaluation pass; a derived view, never
/// a source of truth. Keeping the hot loops on parallel vectors keeps them
/// cache-friendly and trivially parallelisable.
#[derive(Debug, Clone, Default)]
pub struct BodyArrays {
    /// Body positions, index-aligned with the store at sync time.
    pub positions: Vec<Point2<f64>>,
    /// Body velocities.
    pub velocities: Vec<Vector2<f64>>,
    /// Accelerations from the previous integration pass.
    pub accelerations: Vec<Vector2<f64>>,
    /// Force accumulators written by the evaluator.
    pub forces: Vec<Vector2<f64>>,
    /// Body masses.
    pub masses: Vec<f64>,
    /// Derived radii.
    pub radii: Vec<f64>,
    /// Display colours.
    pub colors: Vec<[f32; 3]>,
    /// Per-body fixed flags; fixed bodies receive no force.
    pub fixed: Vec<bool>,
}

impl BodyArrays {
    /// Creates an empty mirror.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of mirrored bodies.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Whether the mirror is empty.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Rebuilds the mirror from the store and zeroes the force accumulators.
    pub fn sync(&mut self, store: &BodyStore) {
        self.positions.clear();
        self.velocities.clear();
        self.accelerations.clear();
        self.forces.clear();
        self.masses.clear();
        self.radii.clear();
        self.colors.clear();
        self.fixed.clear();

        for body in store.iter() {
            self.positions.push(body.position);
            self.velocities.push(body.velocity);
            self.accelerations.push(body.acceleration);
            self.forces.push(Vector2::zeros());
            self.masses.push(body.mass());
            self.radii.push(body.radius());
            self.colors.push(body.color);
            self.fixed.push(body.fixed);
        }
    }
}
