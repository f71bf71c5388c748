use spade::{DelaunayTriangulation, HasPosition, HierarchyHintGenerator, Triangulation};

use super::Contour;
use crate::error::{GeometryError, Result};
use crate::math::Point2;

/// A contour point stored in the triangulation, tagged with its contour index.
#[derive(Debug, Clone, Copy)]
struct IndexedVertex {
    position: spade::Point2<f64>,
    index: usize,
}

impl HasPosition for IndexedVertex {
    type Scalar = f64;

    fn position(&self) -> spade::Point2<f64> {
        self.position
    }
}

type IndexTriangulation =
    DelaunayTriangulation<IndexedVertex, (), (), (), HierarchyHintGenerator<f64>>;

/// Nearest-neighbor lookup over the points of a full-resolution contour.
///
/// Backed by a Delaunay triangulation with a hierarchy hint generator, so a
/// query walks the Delaunay graph from a hierarchical hint to the nearest
/// vertex in expected `O(log n)`. Repeated coordinates keep the index of
/// their first occurrence in the contour.
pub struct NearestPointIndex {
    triangulation: IndexTriangulation,
}

impl NearestPointIndex {
    /// Builds the index from every point of `contour`.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::SpatialIndex` if a coordinate is outside the
    /// range the triangulation accepts.
    pub fn new(contour: &Contour) -> Result<Self> {
        let mut triangulation = IndexTriangulation::new();
        for (index, p) in contour.points().iter().enumerate() {
            let position = spade::Point2::new(p.x, p.y);
            if triangulation.locate_vertex(position).is_some() {
                continue;
            }
            triangulation
                .insert(IndexedVertex { position, index })
                .map_err(|e| GeometryError::SpatialIndex(format!("point {index}: {e}")))?;
        }
        Ok(Self { triangulation })
    }

    /// Returns the contour point nearest to `point` together with its
    /// contour index.
    ///
    /// `point` does not need to be a contour member. Returns `None` only for
    /// an empty index, which a valid contour never produces.
    #[must_use]
    pub fn query(&self, point: &Point2) -> Option<(Point2, usize)> {
        let handle = self
            .triangulation
            .nearest_neighbor(spade::Point2::new(point.x, point.y))?;
        let vertex = handle.data();
        Some((
            Point2::new(vertex.position.x, vertex.position.y),
            vertex.index,
        ))
    }

    /// Number of distinct points in the index.
    #[must_use]
    pub fn len(&self) -> usize {
        self.triangulation.num_vertices()
    }

    /// Returns `true` if the index holds no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.triangulation.num_vertices() == 0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn square_with_midpoints() -> Contour {
        Contour::from_pixels(&[
            (0, 0),
            (5, 0),
            (10, 0),
            (10, 5),
            (10, 10),
            (5, 10),
            (0, 10),
            (0, 5),
        ])
        .unwrap()
    }

    #[test]
    fn exact_member_maps_to_itself() {
        let index = NearestPointIndex::new(&square_with_midpoints()).unwrap();
        let (p, i) = index.query(&Point2::new(10.0, 5.0)).unwrap();
        assert_eq!(p, Point2::new(10.0, 5.0));
        assert_eq!(i, 3);
    }

    #[test]
    fn off_contour_query_snaps() {
        let index = NearestPointIndex::new(&square_with_midpoints()).unwrap();
        let (p, i) = index.query(&Point2::new(6.0, 1.0)).unwrap();
        assert_eq!(p, Point2::new(5.0, 0.0));
        assert_eq!(i, 1);

        let (p, _) = index.query(&Point2::new(-3.0, 12.5)).unwrap();
        assert_eq!(p, Point2::new(0.0, 10.0));
    }

    #[test]
    fn duplicates_keep_first_index() {
        let contour = Contour::from_pixels(&[(0, 0), (3, 0), (3, 3), (3, 0), (0, 3)]).unwrap();
        let index = NearestPointIndex::new(&contour).unwrap();
        assert_eq!(index.len(), 4);
        let (_, i) = index.query(&Point2::new(3.2, 0.1)).unwrap();
        assert_eq!(i, 1);
    }

    #[test]
    fn matches_linear_scan_on_dense_circle() {
        let points: Vec<Point2> = (0..500)
            .map(|k| {
                let t = f64::from(k) / 500.0 * std::f64::consts::TAU;
                Point2::new(200.0 + 80.0 * t.cos(), 150.0 + 60.0 * t.sin())
            })
            .collect();
        let contour = Contour::new(points.clone()).unwrap();
        let index = NearestPointIndex::new(&contour).unwrap();
        for q in [
            Point2::new(200.0, 150.0 + 59.0),
            Point2::new(281.0, 151.0),
            Point2::new(130.0, 100.0),
            Point2::new(0.0, 0.0),
        ] {
            let (p, _) = index.query(&q).unwrap();
            let best = points
                .iter()
                .map(|c| nalgebra::distance(c, &q))
                .fold(f64::INFINITY, f64::min);
            assert!((nalgebra::distance(&p, &q) - best).abs() < 1e-9);
        }
    }

    #[test]
    fn collinear_contour_is_indexable() {
        let contour = Contour::from_pixels(&[(0, 0), (1, 0), (2, 0), (3, 0)]).unwrap();
        let index = NearestPointIndex::new(&contour).unwrap();
        let (p, i) = index.query(&Point2::new(2.2, 4.0)).unwrap();
        assert_eq!(p, Point2::new(2.0, 0.0));
        assert_eq!(i, 2);
        assert!(!index.is_empty());
    }
}
