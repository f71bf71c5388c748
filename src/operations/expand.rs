use std::collections::HashSet;

use super::postprocess::canonicalize;
use crate::error::{AdjustError, Result};
use crate::geometry::{Contour, NearestPointIndex};
use crate::math::{coord_key, Point2};

/// Grows an ordered point set to `target` points by snapping edge midpoints
/// onto the full-resolution contour.
///
/// Each round closes the set into a cycle and, for every edge, snaps the
/// midpoint to the nearest contour point. The longest edge whose snapped
/// point is not yet in the set wins (first edge on ties); its point is
/// inserted and the set is re-canonicalized against the contour. Every round
/// adds exactly one point, so at most `target - len` rounds run.
pub struct Expand<'a> {
    points: &'a [Point2],
    contour: &'a Contour,
    index: &'a NearestPointIndex,
    target: usize,
}

impl<'a> Expand<'a> {
    /// Creates a new `Expand` operation.
    ///
    /// `index` must have been built from `contour`.
    #[must_use]
    pub fn new(
        points: &'a [Point2],
        contour: &'a Contour,
        index: &'a NearestPointIndex,
        target: usize,
    ) -> Self {
        Self {
            points,
            contour,
            index,
            target,
        }
    }

    /// Executes the expansion, returning the grown set in contour order.
    ///
    /// A set already at or above `target` is only canonicalized.
    ///
    /// # Errors
    ///
    /// Returns `AdjustError::StalledExpansion` with the partial set if a
    /// round finds no edge whose snapped midpoint is new.
    pub fn execute(&self) -> Result<Vec<Point2>> {
        let mut set = canonicalize(self.points, self.contour.points());

        while set.len() < self.target {
            let Some(insert) = self.best_candidate(&set) else {
                tracing::warn!(
                    wanted = self.target,
                    reached = set.len(),
                    "expansion stalled"
                );
                return Err(AdjustError::StalledExpansion {
                    target: self.target,
                    reached: set.len(),
                    points: set,
                }
                .into());
            };
            tracing::trace!(x = insert.x, y = insert.y, size = set.len() + 1, "inserted point");
            set.push(insert);
            set = canonicalize(&set, self.contour.points());
        }
        Ok(set)
    }

    /// Snapped midpoint of the longest edge whose snap is not in `set`.
    fn best_candidate(&self, set: &[Point2]) -> Option<Point2> {
        let present: HashSet<(u64, u64)> = set.iter().map(coord_key).collect();
        let n = set.len();
        let mut best: Option<(Point2, f64)> = None;

        for i in 0..n {
            let p1 = &set[i];
            let p2 = &set[(i + 1) % n];
            let length = nalgebra::distance(p1, p2);
            if matches!(best, Some((_, b)) if length <= b) {
                continue;
            }
            let Some((snapped, _)) = self.index.query(&nalgebra::center(p1, p2)) else {
                continue;
            };
            if !present.contains(&coord_key(&snapped)) {
                best = Some((snapped, length));
            }
        }
        best.map(|(p, _)| p)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::ContourNormError;

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

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    #[test]
    fn fills_square_midpoints_in_order() {
        let contour = square_with_midpoints();
        let index = NearestPointIndex::new(&contour).unwrap();
        let corners = [p(0.0, 0.0), p(10.0, 0.0), p(10.0, 10.0), p(0.0, 10.0)];
        let out = Expand::new(&corners, &contour, &index, 8).execute().unwrap();
        assert_eq!(out, contour.points().to_vec());
    }

    #[test]
    fn first_insert_splits_longest_edge() {
        let contour = square_with_midpoints();
        let index = NearestPointIndex::new(&contour).unwrap();
        // Edges: (0,0)→(10,0) is 10 long, (10,0)→(10,5) is 5, (10,5)→(0,0)
        // is sqrt(125). The closing edge wins and snaps its midpoint (5, 2.5)
        // to (5, 0).
        let set = [p(0.0, 0.0), p(10.0, 0.0), p(10.0, 5.0)];
        let out = Expand::new(&set, &contour, &index, 4).execute().unwrap();
        assert_eq!(out, vec![p(0.0, 0.0), p(5.0, 0.0), p(10.0, 0.0), p(10.0, 5.0)]);
    }

    #[test]
    fn each_round_adds_one_point() {
        let contour = Contour::new(
            (0..60)
                .map(|k| {
                    let t = f64::from(k) / 60.0 * std::f64::consts::TAU;
                    p(50.0 + 40.0 * t.cos(), 50.0 + 40.0 * t.sin())
                })
                .collect(),
        )
        .unwrap();
        let index = NearestPointIndex::new(&contour).unwrap();
        let pts = contour.points();
        let seed = [pts[0], pts[20], pts[40]];
        for target in 3..=30 {
            let out = Expand::new(&seed, &contour, &index, target)
                .execute()
                .unwrap();
            assert_eq!(out.len(), target);
            let positions: Vec<usize> = out
                .iter()
                .map(|q| pts.iter().position(|r| r == q).unwrap())
                .collect();
            assert!(positions.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn already_full_is_untouched() {
        let contour = square_with_midpoints();
        let index = NearestPointIndex::new(&contour).unwrap();
        let set = [p(10.0, 10.0), p(0.0, 0.0), p(5.0, 10.0)];
        let out = Expand::new(&set, &contour, &index, 3).execute().unwrap();
        assert_eq!(out, vec![p(0.0, 0.0), p(10.0, 10.0), p(5.0, 10.0)]);
    }

    #[test]
    fn stall_is_reported() {
        // Every midpoint snaps back onto a member of the set.
        let contour = Contour::from_pixels(&[(0, 0), (10, 0), (10, 10), (0, 10)]).unwrap();
        let index = NearestPointIndex::new(&contour).unwrap();
        let set = [p(0.0, 0.0), p(10.0, 0.0), p(10.0, 10.0), p(0.0, 10.0)];
        let err = Expand::new(&set, &contour, &index, 5).execute().unwrap_err();
        match err {
            ContourNormError::Adjust(AdjustError::StalledExpansion {
                target,
                reached,
                points,
            }) => {
                assert_eq!(target, 5);
                assert_eq!(reached, 4);
                assert_eq!(points, set.to_vec());
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
