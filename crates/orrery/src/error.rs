//! Error types for the physics core.

use thiserror::Error;

/// Errors surfaced by the physics core.
///
/// Only genuinely exceptional conditions become errors. Empty inputs produce
/// empty results, bodies outside the quadtree bounds are counted in the step
/// statistics, and degenerate geometry (coincident bodies) is absorbed by the
/// softened kernels.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    /// A configuration or setter value outside its valid domain.
    #[error("invalid parameter {name}: {value}")]
    InvalidParameter {
        /// Name of the offending field.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// Trail lookup outside `[0, len)`.
    #[error("index {index} out of range (len {len})")]
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of stored points.
        len: usize,
    },
}

/// Result type for the physics core.
pub type SimResult<T> = Result<T, SimError>;
