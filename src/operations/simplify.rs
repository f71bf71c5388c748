use std::collections::VecDeque;

use super::postprocess::canonicalize;
use super::seed::Anchors;
use super::{validate_search, DEFAULT_EPSILON_STEP, DEFAULT_INITIAL_EPSILON};
use crate::error::{Result, SimplifyError};
use crate::math::distance_2d::chord_distance;
use crate::math::Point2;

/// Recorded when the tolerance search ends below its target count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToleranceShortfall {
    /// Requested number of points.
    pub target: usize,
    /// Number of points the last pass produced.
    pub found: usize,
    /// Epsilon of the last pass.
    pub epsilon: f64,
}

impl ToleranceShortfall {
    /// Number of missing points.
    #[must_use]
    pub fn shortfall(&self) -> usize {
        self.target.saturating_sub(self.found)
    }
}

/// Result of the tolerance search.
#[derive(Debug, Clone)]
pub struct Simplification {
    /// Kept points in the order of the rebased contour, duplicate-free.
    pub points: Vec<Point2>,
    /// Epsilon of the pass that produced `points`.
    pub epsilon: f64,
    /// Number of simplification passes run.
    pub passes: usize,
    /// Set when the search ran out of tolerance before reaching the target.
    pub shortfall: Option<ToleranceShortfall>,
}

impl Simplification {
    /// Returns the points if the search reached its target count.
    ///
    /// # Errors
    ///
    /// Returns `SimplifyError::InsufficientTolerance` if the search ended
    /// below the target.
    pub fn require_target(self) -> Result<Vec<Point2>> {
        match self.shortfall {
            Some(s) => Err(SimplifyError::InsufficientTolerance {
                target: s.target,
                found: s.found,
                epsilon: s.epsilon,
            }
            .into()),
            None => Ok(self.points),
        }
    }
}

/// Adaptive chord-distance simplification with a linear tolerance search.
///
/// Each pass is a Douglas–Peucker variant driven by a FIFO worklist of
/// `(start, end)` index pairs over the rebased contour, seeded with the two
/// anchor arcs. When a pass keeps fewer than `target` points, epsilon is
/// lowered by a fixed step and the pass is rerun from scratch. The search
/// stops at the first pass reaching the target or when epsilon would drop
/// below zero.
pub struct Simplify<'a> {
    anchors: &'a Anchors,
    target: usize,
    initial_epsilon: f64,
    epsilon_step: f64,
}

impl<'a> Simplify<'a> {
    /// Creates a new `Simplify` operation with default tolerances.
    #[must_use]
    pub fn new(anchors: &'a Anchors, target: usize) -> Self {
        Self {
            anchors,
            target,
            initial_epsilon: DEFAULT_INITIAL_EPSILON,
            epsilon_step: DEFAULT_EPSILON_STEP,
        }
    }

    /// Sets the epsilon of the first pass.
    #[must_use]
    pub fn with_initial_epsilon(mut self, epsilon: f64) -> Self {
        self.initial_epsilon = epsilon;
        self
    }

    /// Sets the amount epsilon drops between passes.
    #[must_use]
    pub fn with_epsilon_step(mut self, step: f64) -> Self {
        self.epsilon_step = step;
        self
    }

    /// Executes the tolerance search.
    ///
    /// # Errors
    ///
    /// - `InputError::TargetTooSmall` if `target < 2`
    /// - `InputError::InvalidParameter` if the initial epsilon is negative or
    ///   not finite, or the step is not a positive finite number
    pub fn execute(&self) -> Result<Simplification> {
        validate_search(self.target, self.initial_epsilon, self.epsilon_step)?;

        let contour = self.anchors.contour.points();
        let mut epsilon = self.initial_epsilon;
        let mut passes = 1;
        let mut points = canonicalize(&simplify_pass(self.anchors, epsilon), contour);
        tracing::trace!(epsilon, kept = points.len(), "simplification pass");

        while points.len() < self.target {
            let next = epsilon - self.epsilon_step;
            if next < 0.0 {
                break;
            }
            epsilon = next;
            passes += 1;
            points = canonicalize(&simplify_pass(self.anchors, epsilon), contour);
            tracing::trace!(epsilon, kept = points.len(), "simplification pass");
        }

        let shortfall = (points.len() < self.target).then(|| ToleranceShortfall {
            target: self.target,
            found: points.len(),
            epsilon,
        });
        tracing::debug!(epsilon, passes, kept = points.len(), "tolerance search finished");

        Ok(Simplification {
            points,
            epsilon,
            passes,
            shortfall,
        })
    }
}

/// Runs one simplification pass at a fixed `epsilon`.
///
/// Returns the kept points in discovery order: the two anchors first, then
/// every split point. Interior points of a zero-length chord never split.
#[must_use]
pub fn simplify_pass(anchors: &Anchors, epsilon: f64) -> Vec<Point2> {
    let points = anchors.contour.points();
    let mut kept = vec![anchors.p1, anchors.p2];
    let mut queue: VecDeque<(usize, usize)> = anchors.arcs().into_iter().collect();

    while let Some((start, end)) = queue.pop_front() {
        let (a, b) = (&points[start], &points[end]);
        let mut farthest: Option<(usize, f64)> = None;

        for (i, p) in points.iter().enumerate().take(end).skip(start + 1) {
            let d = match chord_distance(p, a, b) {
                Ok(d) => d,
                Err(err) => {
                    tracing::trace!(start, end, %err, "segment dropped");
                    farthest = None;
                    break;
                }
            };
            match farthest {
                Some((_, best)) if d <= best => {}
                _ => farthest = Some((i, d)),
            }
        }

        if let Some((split, distance)) = farthest {
            if distance >= epsilon {
                kept.push(points[split]);
                queue.push_back((start, split));
                queue.push_back((split, end));
            }
        }
    }

    kept
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::ContourNormError;
    use crate::geometry::Contour;
    use crate::operations::seed::SeedAnchors;

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
    fn pass_keeps_only_anchors_at_high_epsilon() {
        let anchors = SeedAnchors::new(&square_with_midpoints()).execute();
        let kept = simplify_pass(&anchors, 20.0);
        assert_eq!(kept, vec![Point2::new(0.0, 0.0), Point2::new(10.0, 10.0)]);
    }

    #[test]
    fn pass_splits_at_farthest_point() {
        let anchors = SeedAnchors::new(&square_with_midpoints()).execute();
        // (10, 0) is sqrt(50) from the diagonal; (0, 10) is sqrt(20) from
        // the chord (10,10)→(0,5).
        let kept = simplify_pass(&anchors, 5.0);
        assert_eq!(kept.len(), 3);
        assert!(kept.contains(&Point2::new(10.0, 0.0)));
        let kept = simplify_pass(&anchors, 2.0);
        assert_eq!(kept.len(), 4);
        assert!(kept.contains(&Point2::new(0.0, 10.0)));
    }

    #[test]
    fn zero_epsilon_keeps_every_interior_point() {
        let anchors = SeedAnchors::new(&square_with_midpoints()).execute();
        let kept = simplify_pass(&anchors, 0.0);
        // Every point except the last one, which only ever acts as a chord end.
        assert_eq!(kept.len(), 7);
        assert!(!kept.contains(&Point2::new(0.0, 5.0)));
    }

    #[test]
    fn degenerate_chord_does_not_split() {
        // Arc [p2, last] starts and ends on the same coordinate.
        let contour = Contour::from_pixels(&[(0, 0), (3, 1), (9, 0), (6, 2), (9, 0)]).unwrap();
        let anchors = SeedAnchors::new(&contour).execute();
        let kept = simplify_pass(&anchors, 0.0);
        assert!(kept.iter().all(|p| contour.points().contains(p)));
    }

    #[test]
    fn search_decrements_until_target() {
        let anchors = SeedAnchors::new(&square_with_midpoints()).execute();
        let result = Simplify::new(&anchors, 4).execute().unwrap();
        // 20, 17, 14, 11, 8, 5, 2.
        assert_eq!(result.passes, 7);
        assert!((result.epsilon - 2.0).abs() < 1e-12);
        assert!(result.shortfall.is_none());
        assert_eq!(
            result.points,
            vec![
                Point2::new(0.0, 0.0),
                Point2::new(10.0, 0.0),
                Point2::new(10.0, 10.0),
                Point2::new(0.0, 10.0),
            ]
        );
    }

    #[test]
    fn search_stops_at_first_sufficient_pass() {
        let anchors = SeedAnchors::new(&square_with_midpoints()).execute();
        let result = Simplify::new(&anchors, 3).execute().unwrap();
        assert!((result.epsilon - 5.0).abs() < 1e-12);
        assert_eq!(result.points.len(), 3);
    }

    #[test]
    fn exhausted_search_reports_shortfall() {
        let anchors = SeedAnchors::new(&square_with_midpoints()).execute();
        let result = Simplify::new(&anchors, 8).execute().unwrap();
        let shortfall = result.shortfall.unwrap();
        assert_eq!(shortfall.found, 4);
        assert_eq!(shortfall.shortfall(), 4);
        assert!(matches!(
            result.require_target(),
            Err(ContourNormError::Simplify(
                SimplifyError::InsufficientTolerance {
                    target: 8,
                    found: 4,
                    ..
                }
            ))
        ));
    }

    #[test]
    fn custom_step_reaches_zero() {
        let anchors = SeedAnchors::new(&square_with_midpoints()).execute();
        let result = Simplify::new(&anchors, 8)
            .with_initial_epsilon(4.0)
            .with_epsilon_step(2.0)
            .execute()
            .unwrap();
        // 4, 2, 0: the zero pass keeps all but the trailing point.
        assert_eq!(result.passes, 3);
        assert_eq!(result.points.len(), 7);
    }

    #[test]
    fn rejects_bad_parameters() {
        let anchors = SeedAnchors::new(&square_with_midpoints()).execute();
        assert!(Simplify::new(&anchors, 1).execute().is_err());
        assert!(Simplify::new(&anchors, 4)
            .with_epsilon_step(0.0)
            .execute()
            .is_err());
        assert!(Simplify::new(&anchors, 4)
            .with_initial_epsilon(f64::NAN)
            .execute()
            .is_err());
    }
}
