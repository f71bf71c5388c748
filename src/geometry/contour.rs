use std::collections::HashSet;

use crate::error::{InputError, Result};
use crate::math::{coord_key, Point2};

/// An ordered, cyclic boundary trace of a shape.
///
/// Adjacent indices are adjacent along the boundary and the last point
/// connects back to the first. The start index and direction come from the
/// boundary tracer and are preserved as given. A `Contour` is immutable once
/// built; every stage of normalization reads from it and returns new point
/// sets.
#[derive(Debug, Clone, PartialEq)]
pub struct Contour {
    points: Vec<Point2>,
}

impl Contour {
    /// Creates a contour from floating-point coordinates.
    ///
    /// # Errors
    ///
    /// - `InputError::TooFewPoints` if fewer than 3 points are given
    /// - `InputError::NonFinite` if any coordinate is NaN or infinite
    pub fn new(points: Vec<Point2>) -> Result<Self> {
        if points.len() < 3 {
            return Err(InputError::TooFewPoints {
                found: points.len(),
            }
            .into());
        }
        if let Some(index) = points
            .iter()
            .position(|p| !p.x.is_finite() || !p.y.is_finite())
        {
            return Err(InputError::NonFinite { index }.into());
        }
        Ok(Self { points })
    }

    /// Creates a contour from integer pixel coordinates, as produced by a
    /// raster boundary tracer.
    ///
    /// # Errors
    ///
    /// Returns `InputError::TooFewPoints` if fewer than 3 points are given.
    pub fn from_pixels(pixels: &[(i32, i32)]) -> Result<Self> {
        Self::new(
            pixels
                .iter()
                .map(|&(x, y)| Point2::new(f64::from(x), f64::from(y)))
                .collect(),
        )
    }

    /// Returns the contour points in traversal order.
    #[must_use]
    pub fn points(&self) -> &[Point2] {
        &self.points
    }

    /// Number of points, duplicates included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always `false`: a valid contour holds at least 3 points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Index of the last point.
    #[must_use]
    pub fn last_index(&self) -> usize {
        self.points.len() - 1
    }

    /// Number of distinct coordinates.
    #[must_use]
    pub fn distinct_len(&self) -> usize {
        self.points.iter().map(coord_key).collect::<HashSet<_>>().len()
    }

    /// Returns the same cyclic sequence starting at `start`.
    ///
    /// `start` is taken modulo the contour length.
    #[must_use]
    pub fn rotated(&self, start: usize) -> Self {
        let start = start % self.points.len();
        let mut points = Vec::with_capacity(self.points.len());
        points.extend_from_slice(&self.points[start..]);
        points.extend_from_slice(&self.points[..start]);
        Self { points }
    }
}
