use super::{cross_2d, Point2, Vector2};

/// Unsigned shoelace area of an open polyline.
///
/// Sums consecutive pairs only; the closing edge from the last point back to
/// the first is not included, so the result depends on where the sequence
/// starts.
#[must_use]
pub fn open_area_2d(points: &[Point2]) -> f64 {
    let sum: f64 = points
        .windows(2)
        .map(|w| w[0].x * w[1].y - w[1].x * w[0].y)
        .sum();
    0.5 * sum.abs()
}

/// Arithmetic mean of the points. Returns `None` for an empty slice.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn centroid(points: &[Point2]) -> Option<Point2> {
    if points.is_empty() {
        return None;
    }
    let sum = points
        .iter()
        .fold(Vector2::zeros(), |acc, p| acc + p.coords);
    Some(Point2::from(sum / points.len() as f64))
}

/// Signed angle in degrees at `vertex` from `prev - vertex` to `next - vertex`.
///
/// Uses `atan2(cross, dot)`, so the result lies in `(-180, 180]`.
#[must_use]
pub fn signed_angle_deg(prev: &Point2, vertex: &Point2, next: &Point2) -> f64 {
    let v0 = prev - vertex;
    let v1 = next - vertex;
    cross_2d(&v0, &v1).atan2(v0.dot(&v1)).to_degrees()
}
