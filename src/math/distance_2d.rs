use super::{cross_2d, Point2, TOLERANCE};
use crate::error::{GeometryError, Result};

/// Returns the perpendicular distance from `p` to the infinite line through
/// the chord `a → b`.
///
/// Computed as `|cross(b - a, p - a)| / |b - a|`.
///
/// # Errors
///
/// Returns `GeometryError::DegenerateChord` if `a` and `b` coincide.
pub fn chord_distance(p: &Point2, a: &Point2, b: &Point2) -> Result<f64> {
    let chord = b - a;
    let len = chord.norm();
    if len < TOLERANCE {
        return Err(GeometryError::DegenerateChord { x: a.x, y: a.y }.into());
    }
    Ok(cross_2d(&chord, &(p - a)).abs() / len)
}

/// Returns the index and distance of the point farthest from `origin`.
///
/// Ties go to the first index: a later point must be strictly farther to
/// replace the current best. Returns `None` for an empty slice.
#[must_use]
pub fn farthest_from(points: &[Point2], origin: &Point2) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for (i, p) in points.iter().enumerate() {
        let d = nalgebra::distance(origin, p);
        match best {
            Some((_, best_d)) if d <= best_d => {}
            _ => best = Some((i, d)),
        }
    }
    best
}
