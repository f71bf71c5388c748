use std::collections::HashSet;

use crate::math::{coord_key, Point2};

/// Reorders `candidates` into the traversal order of `contour` and collapses
/// exact-duplicate coordinates.
///
/// Walks the contour once and emits every contour point whose coordinates
/// appear among the candidates, at most once per coordinate. Candidates that
/// are not contour members are dropped.
#[must_use]
pub fn canonicalize(candidates: &[Point2], contour: &[Point2]) -> Vec<Point2> {
    let wanted: HashSet<(u64, u64)> = candidates.iter().map(coord_key).collect();
    let mut emitted = HashSet::with_capacity(wanted.len());
    let mut ordered = Vec::with_capacity(wanted.len());
    for p in contour {
        let key = coord_key(p);
        if wanted.contains(&key) && emitted.insert(key) {
            ordered.push(*p);
        }
    }
    ordered
}
