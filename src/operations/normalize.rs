use std::cmp::Ordering;

use super::postprocess::canonicalize;
use super::reduce::Reduce;
use super::seed::SeedAnchors;
use super::simplify::{Simplify, ToleranceShortfall};
use super::{Expand, NormalizeParams};
use crate::error::{InputError, Result};
use crate::geometry::{Contour, NearestPointIndex};
use crate::math::Point2;

/// Which cardinality adjustment ran after simplification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Adjustment {
    /// The simplified set already had the target size.
    None,
    /// Points were removed by the reduce policy.
    Reduced { removed: usize },
    /// Points were inserted by midpoint snapping.
    Expanded { inserted: usize },
}

/// Result of normalizing one contour.
#[derive(Debug, Clone)]
pub struct Normalization {
    /// Set produced by the tolerance search, before adjustment. On the
    /// exact-size fast path no search runs and this is the whole
    /// canonicalized contour, identical to `points`.
    pub simplified: Vec<Point2>,
    /// Final set of exactly `target` points.
    pub points: Vec<Point2>,
    /// Epsilon the search settled on; `None` when the contour already had
    /// the target number of distinct points and no search ran (`simplified`
    /// then equals `points`).
    pub epsilon: Option<f64>,
    /// Set when the search ended below the target and expansion made up
    /// the difference.
    pub tolerance_shortfall: Option<ToleranceShortfall>,
    /// Adjustment applied to `simplified` to obtain `points`.
    pub adjustment: Adjustment,
}

/// Reduces a contour to exactly `params.target` of its own points.
///
/// # Algorithm
///
/// 1. Seed two anchors and rebase the contour onto the first
/// 2. Run the tolerance search until at least `target` points are kept
/// 3. Remove points with the reduce policy, or insert snapped midpoints
/// 4. Return both sets in contour order
///
/// A contour that already has exactly `target` distinct points is returned
/// as-is, which makes the operation idempotent on its own output.
pub struct NormalizeContour<'a> {
    contour: &'a Contour,
    params: NormalizeParams,
}

impl<'a> NormalizeContour<'a> {
    /// Creates a new `NormalizeContour` operation.
    #[must_use]
    pub fn new(contour: &'a Contour, params: NormalizeParams) -> Self {
        Self { contour, params }
    }

    /// Executes the normalization.
    ///
    /// # Errors
    ///
    /// - `InputError` if the parameters are invalid or `target` exceeds the
    ///   number of distinct contour points
    /// - `SimplifyError::InsufficientTolerance` if the search ends short and
    ///   `expand_undersized` is off
    /// - `AdjustError::StalledExpansion` if expansion cannot find a new point
    /// - `GeometryError::SpatialIndex` if the contour cannot be indexed
    pub fn execute(&self) -> Result<Normalization> {
        self.params.validate()?;
        let target = self.params.target;
        let contour = self.contour.points();

        let distinct = self.contour.distinct_len();
        if target > distinct {
            return Err(InputError::TargetExceedsPoints { target, distinct }.into());
        }
        if target == distinct {
            tracing::debug!(size = target, "contour already at target size");
            let points = canonicalize(contour, contour);
            return Ok(Normalization {
                simplified: points.clone(),
                points,
                epsilon: None,
                tolerance_shortfall: None,
                adjustment: Adjustment::None,
            });
        }

        let anchors = SeedAnchors::new(self.contour).execute();
        let simplification = Simplify::new(&anchors, target)
            .with_initial_epsilon(self.params.initial_epsilon)
            .with_epsilon_step(self.params.epsilon_step)
            .execute()?;
        let epsilon = simplification.epsilon;
        let tolerance_shortfall = simplification.shortfall;

        let simplified = if self.params.expand_undersized {
            if let Some(s) = tolerance_shortfall {
                tracing::warn!(
                    wanted = s.target,
                    found = s.found,
                    epsilon = s.epsilon,
                    "tolerance search fell short, expanding"
                );
            }
            simplification.points
        } else {
            simplification.require_target()?
        };

        let (adjusted, adjustment) = match simplified.len().cmp(&target) {
            Ordering::Greater => {
                let reduced = Reduce::new(&simplified, target, self.params.policy)
                    .with_contour(self.contour)
                    .execute();
                let removed = simplified.len() - reduced.len();
                (reduced, Adjustment::Reduced { removed })
            }
            Ordering::Less => {
                let index = NearestPointIndex::new(self.contour)?;
                let expanded = Expand::new(&simplified, self.contour, &index, target).execute()?;
                let inserted = expanded.len() - simplified.len();
                (expanded, Adjustment::Expanded { inserted })
            }
            Ordering::Equal => (simplified.clone(), Adjustment::None),
        };
        tracing::debug!(?adjustment, policy = %self.params.policy, "adjusted cardinality");

        Ok(Normalization {
            simplified: canonicalize(&simplified, contour),
            points: canonicalize(&adjusted, contour),
            epsilon: Some(epsilon),
            tolerance_shortfall,
            adjustment,
        })
    }
}
