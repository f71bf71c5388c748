//! Exact-cardinality normalization of traced shape contours.
//!
//! Reduces a dense, closed boundary trace to exactly `N` of its own points:
//! an adaptive chord-distance simplification searches for a tolerance that
//! keeps at least `N` points, then a reduce policy or midpoint snapping fixes
//! the count. Output points are always exact contour members, duplicate-free
//! and in contour order.
//!
//! ```no_run
//! use contour_norm::{normalize_contour, Contour, ReducePolicy};
//!
//! let contour = Contour::from_pixels(&[(0, 0), (5, 0), (10, 0), (10, 5), (10, 10), (0, 10)])?;
//! let result = normalize_contour(&contour, 4, ReducePolicy::Angle, 20.0)?;
//! assert_eq!(result.points.len(), 4);
//! # Ok::<(), contour_norm::ContourNormError>(())
//! ```

pub mod error;
pub mod geometry;
pub mod math;
pub mod operations;

pub use error::{ContourNormError, Result};
pub use geometry::{Contour, NearestPointIndex};
pub use operations::{
    Adjustment, ContourOutcome, NormalizeBatch, NormalizeContour, NormalizeParams, Normalization,
    ReducePolicy,
};

/// Normalizes `contour` to exactly `target` points.
///
/// Shorthand for [`NormalizeContour`] with default step and expansion
/// settings.
///
/// # Errors
///
/// See [`NormalizeContour::execute`].
pub fn normalize_contour(
    contour: &Contour,
    target: usize,
    policy: ReducePolicy,
    initial_epsilon: f64,
) -> Result<Normalization> {
    let params = NormalizeParams::new(target)
        .with_policy(policy)
        .with_initial_epsilon(initial_epsilon);
    NormalizeContour::new(contour, params).execute()
}
