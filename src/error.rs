use thiserror::Error;

use crate::math::Point2;

/// Top-level error type for contour normalization.
#[derive(Debug, Error)]
pub enum ContourNormError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Simplify(#[from] SimplifyError),

    #[error(transparent)]
    Adjust(#[from] AdjustError),
}

/// Errors related to geometric computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("degenerate chord: endpoints coincide at ({x}, {y})")]
    DegenerateChord { x: f64, y: f64 },

    #[error("spatial index construction failed: {0}")]
    SpatialIndex(String),
}

/// Errors caused by invalid contours or parameters.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("contour has {found} points, at least 3 are required")]
    TooFewPoints { found: usize },

    #[error("target of {target} points is too small, at least 2 are required")]
    TargetTooSmall { target: usize },

    #[error("target of {target} points exceeds the {distinct} distinct contour points")]
    TargetExceedsPoints { target: usize, distinct: usize },

    #[error("contour point {index} has a non-finite coordinate")]
    NonFinite { index: usize },

    #[error("invalid parameter {parameter} = {value}")]
    InvalidParameter { parameter: &'static str, value: f64 },

    #[error("unknown reduce policy: {0}")]
    UnknownPolicy(String),
}

/// Errors raised by the tolerance search.
#[derive(Debug, Error)]
pub enum SimplifyError {
    #[error(
        "tolerance search exhausted at epsilon {epsilon}: found {found} of {target} points"
    )]
    InsufficientTolerance {
        target: usize,
        found: usize,
        epsilon: f64,
    },
}

/// Errors raised while forcing a point set to its target size.
#[derive(Debug, Error)]
pub enum AdjustError {
    #[error("expansion stalled at {reached} of {target} points")]
    StalledExpansion {
        target: usize,
        reached: usize,
        /// The partial set at the moment of the stall, in contour order.
        points: Vec<Point2>,
    },
}

/// Convenience type alias for results using [`ContourNormError`].
pub type Result<T> = std::result::Result<T, ContourNormError>;
