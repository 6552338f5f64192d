//! Fixed-capacity position trails.

use nalgebra::Point2;

use crate::error::{SimError, SimResult};

/// Default number of points a trail retains.
pub const DEFAULT_CAPACITY: usize = 100;

/// How many physics steps elapse between trail samples.
pub const DEFAULT_SAMPLE_PERIOD: u32 = 5;

/// A circular buffer of recent positions.
///
/// Insertion is O(1); once the buffer is full the oldest point is overwritten.
/// Points read back oldest to newest.
///
/// # Examples
///
/// ```rust
/// use nalgebra::Point2;
/// use orrery::trail::Trail;
///
/// let mut trail = Trail::with_capacity(3);
/// for i in 0..5 {
///     trail.push(Point2::new(i as f64, 0.0));
/// }
/// // Holds the newest three points.
/// assert_eq!(trail.len(), 3);
/// assert_eq!(trail.get(0).unwrap().x, 2.0);
/// assert_eq!(trail.get(2).unwrap().x, 4.0);
/// ```
#[derive(Debug, Clone)]
pub struct Trail {
    points: Vec<Point2<f64>>,
    head: usize,
    capacity: usize,
}

impl Trail {
    /// Creates a trail with the default capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates a trail retaining at most `capacity` points.
    ///
    /// A capacity of zero is clamped to one.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            points: Vec::new(),
            head: 0,
            capacity: capacity.max(1),
        }
    }

    /// Appends `point` as the newest entry, evicting the oldest when full.
    pub fn push(&mut self, point: Point2<f64>) {
        if self.points.len() < self.capacity {
            self.points.push(point);
        } else {
            // head is the slot holding the oldest point
            self.points[self.head] = point;
            self.head = (self.head + 1) % self.capacity;
        }
    }

    /// Changes the capacity, discarding the oldest points if shrinking.
    ///
    /// A capacity of zero is clamped to one.
    pub fn set_capacity(&mut self, capacity: usize) {
        let capacity = capacity.max(1);
        if capacity == self.capacity {
            return;
        }
        let mut ordered: Vec<Point2<f64>> = self.iter().collect();
        if ordered.len() > capacity {
            ordered.drain(..ordered.len() - capacity);
        }
        self.points = ordered;
        self.head = 0;
        self.capacity = capacity;
    }

    /// Removes every point.
    pub fn clear(&mut self) {
        self.points.clear();
        self.head = 0;
    }

    /// Number of stored points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the trail holds no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Whether the trail is at capacity.
    pub fn is_full(&self) -> bool {
        self.points.len() == self.capacity
    }

    /// Maximum number of points retained.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the point at `index`, 0 being the oldest.
    pub fn get(&self, index: usize) -> SimResult<Point2<f64>> {
        if index < self.points.len() {
            Ok(self.points[self.physical(index)])
        } else {
            Err(SimError::IndexOutOfRange {
                index,
                len: self.points.len(),
            })
        }
    }

    /// Iterates over the points oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = Point2<f64>> + '_ {
        (0..self.points.len()).map(|i| self.points[self.physical(i)])
    }

    /// Snapshot of the points oldest to newest, for render consumers.
    pub fn points(&self) -> Vec<Point2<f64>> {
        self.iter().collect()
    }

    fn physical(&self, logical: usize) -> usize {
        if self.points.len() < self.capacity {
            logical
        } else {
            (self.head + logical) % self.capacity
        }
    }
}

impl Default for Trail {
    fn default() -> Self {
        Self::new()
    }
}

/// Decides which physics steps sample the trails.
///
/// One sample is taken every `period` ticks. Explicit state, so that runs are
/// reproducible and the counter resets with its owner.
#[derive(Debug, Clone)]
pub struct TrailSampler {
    period: u32,
    counter: u32,
}

impl TrailSampler {
    /// Creates a sampler firing every `period` ticks; zero is clamped to one.
    pub fn new(period: u32) -> Self {
        Self {
            period: period.max(1),
            counter: 0,
        }
    }

    /// Advances one step; true when this step should sample.
    pub fn tick(&mut self) -> bool {
        self.counter = self.counter.wrapping_add(1);
        self.counter % self.period == 0
    }

    /// Restarts the cycle.
    pub fn reset(&mut self) {
        self.counter = 0;
    }
}

impl Default for TrailSampler {
    fn default() -> Self {
        Self::new(DEFAULT_SAMPLE_PERIOD)
    }
}
