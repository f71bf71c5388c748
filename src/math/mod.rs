pub mod distance_2d;
pub mod polygon_2d;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Hashable key for exact coordinate identity.
///
/// `-0.0` and `0.0` map to the same key. Callers must only pass finite points.
#[must_use]
pub fn coord_key(p: &Point2) -> (u64, u64) {
    ((p.x + 0.0).to_bits(), (p.y + 0.0).to_bits())
}

/// 2D cross product (z component of the 3D cross product).
#[must_use]
pub fn cross_2d(u: &Vector2, v: &Vector2) -> f64 {
    u.x * v.y - u.y * v.x
}
