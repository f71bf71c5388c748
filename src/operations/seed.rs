use crate::geometry::Contour;
use crate::math::distance_2d::farthest_from;
use crate::math::polygon_2d::centroid;
use crate::math::Point2;

/// Two well-separated anchor points and the contour rebased onto the first.
#[derive(Debug, Clone)]
pub struct Anchors {
    /// The contour rotated so that `p1` sits at index 0.
    pub contour: Contour,
    /// Point farthest from the centroid.
    pub p1: Point2,
    /// Point farthest from `p1`.
    pub p2: Point2,
    /// Index of `p2` in the rebased contour.
    pub p2_index: usize,
    /// Index of `p1` in the original contour.
    pub p1_source_index: usize,
}

impl Anchors {
    /// The two arcs `[0, p2]` and `[p2, last]` that seed simplification.
    ///
    /// The closing edge from the last point back to `p1` belongs to neither
    /// arc.
    #[must_use]
    pub fn arcs(&self) -> [(usize, usize); 2] {
        [
            (0, self.p2_index),
            (self.p2_index, self.contour.last_index()),
        ]
    }
}

/// Picks the two anchor points that bootstrap simplification.
///
/// 1. Compute the centroid as the mean of all contour points.
/// 2. `p1` is the point farthest from the centroid (first index wins ties).
/// 3. Rotate the contour so `p1` is index 0, keeping the cyclic order.
/// 4. `p2` is the point farthest from `p1`, same tie rule.
pub struct SeedAnchors<'a> {
    contour: &'a Contour,
}

impl<'a> SeedAnchors<'a> {
    /// Creates a new `SeedAnchors` operation.
    #[must_use]
    pub fn new(contour: &'a Contour) -> Self {
        Self { contour }
    }

    /// Executes the seeding.
    #[must_use]
    pub fn execute(&self) -> Anchors {
        let points = self.contour.points();
        let center = centroid(points).unwrap_or_else(Point2::origin);
        let p1_source_index = farthest_from(points, &center).map_or(0, |(i, _)| i);

        let contour = self.contour.rotated(p1_source_index);
        let p1 = contour.points()[0];
        let p2_index = farthest_from(contour.points(), &p1).map_or(0, |(i, _)| i);
        let p2 = contour.points()[p2_index];

        tracing::debug!(
            p1_source_index,
            p2_index,
            p1 = ?(p1.x, p1.y),
            p2 = ?(p2.x, p2.y),
            "seeded anchors"
        );

        Anchors {
            contour,
            p1,
            p2,
            p2_index,
            p1_source_index,
        }
    }
}
