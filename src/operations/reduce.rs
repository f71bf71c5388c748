use std::fmt;
use std::str::FromStr;

use crate::error::{ContourNormError, InputError};
use crate::geometry::Contour;
use crate::math::distance_2d::chord_distance;
use crate::math::polygon_2d::{open_area_2d, signed_angle_deg};
use crate::math::Point2;

/// Heuristic that picks which point the [`Reduce`] operation removes next.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum ReducePolicy {
    /// Remove the point with the smallest absolute turning angle, i.e. the
    /// sharpest spike.
    #[default]
    Angle,
    /// Remove the point closest to the chord joining its neighbors, i.e. the
    /// most nearly collinear point.
    Straight,
    /// Remove the point whose removal keeps the open shoelace area closest
    /// to the area before removal.
    Area,
    /// Like [`ReducePolicy::Area`], but always compares against the open
    /// shoelace area of the full contour.
    ContourArea,
}

impl ReducePolicy {
    /// Name used by [`FromStr`] and [`fmt::Display`].
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Angle => "angle",
            Self::Straight => "straight",
            Self::Area => "area",
            Self::ContourArea => "contour-area",
        }
    }
}

impl fmt::Display for ReducePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReducePolicy {
    type Err = ContourNormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "angle" => Ok(Self::Angle),
            "straight" => Ok(Self::Straight),
            "area" => Ok(Self::Area),
            "contour-area" | "contour_area" => Ok(Self::ContourArea),
            _ => Err(InputError::UnknownPolicy(s.to_owned()).into()),
        }
    }
}

/// Shrinks an ordered point set to `target` points, one removal per round.
///
/// The set is treated as a closed cycle, so the first and last points are
/// neighbors. Neighbor-based policies scan candidates in the order
/// `1, 2, …, n-1, 0`; the area policies scan `0..n`. The first strict
/// minimum wins. A set already at or below `target` is returned unchanged.
pub struct Reduce<'a> {
    points: &'a [Point2],
    target: usize,
    policy: ReducePolicy,
    contour: Option<&'a Contour>,
}

impl<'a> Reduce<'a> {
    /// Creates a new `Reduce` operation.
    #[must_use]
    pub fn new(points: &'a [Point2], target: usize, policy: ReducePolicy) -> Self {
        Self {
            points,
            target,
            policy,
            contour: None,
        }
    }

    /// Sets the contour whose area [`ReducePolicy::ContourArea`] preserves.
    ///
    /// Without a contour, that policy holds the area of the input set fixed
    /// instead.
    #[must_use]
    pub fn with_contour(mut self, contour: &'a Contour) -> Self {
        self.contour = Some(contour);
        self
    }

    /// Executes the reduction, returning the remaining points in their
    /// original relative order.
    #[must_use]
    pub fn execute(&self) -> Vec<Point2> {
        let mut set = self.points.to_vec();
        let fixed_reference = (self.policy == ReducePolicy::ContourArea).then(|| {
            self.contour
                .map_or_else(|| open_area_2d(&set), |c| open_area_2d(c.points()))
        });

        while set.len() > self.target.max(1) {
            let removed = match self.policy {
                ReducePolicy::Angle => {
                    pick_cyclic(&set, |prev, p, next| {
                        Some(signed_angle_deg(prev, p, next).abs())
                    })
                }
                ReducePolicy::Straight => {
                    pick_cyclic(&set, |prev, p, next| chord_distance(p, prev, next).ok())
                }
                ReducePolicy::Area | ReducePolicy::ContourArea => {
                    let reference = fixed_reference.unwrap_or_else(|| open_area_2d(&set));
                    pick_area(&set, reference)
                }
            };
            tracing::trace!(
                policy = %self.policy,
                index = removed,
                remaining = set.len() - 1,
                "removed point"
            );
            set.remove(removed);
        }
        set
    }
}

/// Returns the index whose neighbor score is smallest.
///
/// `score(prev, p, next)` returns `None` for candidates that cannot be
/// scored. Falls back to index 0 if nothing scores.
fn pick_cyclic<F>(set: &[Point2], score: F) -> usize
where
    F: Fn(&Point2, &Point2, &Point2) -> Option<f64>,
{
    let n = set.len();
    let mut best: Option<(usize, f64)> = None;
    for k in 1..=n {
        let i = k % n;
        let prev = &set[(i + n - 1) % n];
        let next = &set[(i + 1) % n];
        let Some(s) = score(prev, &set[i], next) else {
            continue;
        };
        match best {
            Some((_, b)) if s >= b => {}
            _ => best = Some((i, s)),
        }
    }
    best.map_or(0, |(i, _)| i)
}

/// Returns the index whose removal leaves an open area closest to `reference`.
fn pick_area(set: &[Point2], reference: f64) -> usize {
    let mut best: Option<(usize, f64)> = None;
    let mut without = Vec::with_capacity(set.len().saturating_sub(1));
    for i in 0..set.len() {
        without.clear();
        without.extend_from_slice(&set[..i]);
        without.extend_from_slice(&set[i + 1..]);
        let diff = (open_area_2d(&without) - reference).abs();
        match best {
            Some((_, b)) if diff >= b => {}
            _ => best = Some((i, diff)),
        }
    }
    best.map_or(0, |(i, _)| i)
}
