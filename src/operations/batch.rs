use rayon::prelude::*;

use super::normalize::{NormalizeContour, Normalization};
use super::NormalizeParams;
use crate::error::{InputError, Result};
use crate::geometry::Contour;

/// Default fraction of the longest contour's point count a contour must
/// exceed to be normalized.
pub const DEFAULT_MIN_LENGTH_RATIO: f64 = 0.1;

/// Outcome for one contour of a batch.
#[derive(Debug)]
pub struct ContourOutcome {
    /// Position of the contour in the input slice.
    pub source_index: usize,
    /// Normalization result for that contour.
    pub result: Result<Normalization>,
}

/// Normalizes every contour traced from one image.
///
/// Contours whose point count does not exceed `min_length_ratio` times the
/// longest contour's point count are treated as speckles and skipped. The
/// rest are normalized independently in parallel; outcomes come back in
/// input order. A failure on one contour does not affect the others.
pub struct NormalizeBatch<'a> {
    contours: &'a [Contour],
    params: NormalizeParams,
    min_length_ratio: f64,
}

impl<'a> NormalizeBatch<'a> {
    /// Creates a new `NormalizeBatch` operation.
    #[must_use]
    pub fn new(contours: &'a [Contour], params: NormalizeParams) -> Self {
        Self {
            contours,
            params,
            min_length_ratio: DEFAULT_MIN_LENGTH_RATIO,
        }
    }

    /// Sets the speckle filter ratio. `0.0` keeps every contour.
    #[must_use]
    pub fn with_min_length_ratio(mut self, ratio: f64) -> Self {
        self.min_length_ratio = ratio;
        self
    }

    /// Executes the batch.
    ///
    /// # Errors
    ///
    /// Returns `InputError::InvalidParameter` if the ratio is outside
    /// `[0, 1]`, or the parameter error from [`NormalizeParams::validate`].
    /// Per-contour failures are reported in each [`ContourOutcome`].
    #[allow(clippy::cast_precision_loss)]
    pub fn execute(&self) -> Result<Vec<ContourOutcome>> {
        if !(0.0..=1.0).contains(&self.min_length_ratio) {
            return Err(InputError::InvalidParameter {
                parameter: "min_length_ratio",
                value: self.min_length_ratio,
            }
            .into());
        }
        self.params.validate()?;

        let longest = self.contours.iter().map(Contour::len).max().unwrap_or(0);
        let threshold = self.min_length_ratio * longest as f64;
        let kept: Vec<usize> = (0..self.contours.len())
            .filter(|&i| self.contours[i].len() as f64 > threshold)
            .collect();
        if kept.len() < self.contours.len() {
            tracing::debug!(
                skipped = self.contours.len() - kept.len(),
                threshold,
                "skipped short contours"
            );
        }

        let outcomes: Vec<ContourOutcome> = kept
            .par_iter()
            .map(|&source_index| ContourOutcome {
                source_index,
                result: NormalizeContour::new(&self.contours[source_index], self.params)
                    .execute(),
            })
            .collect();

        for outcome in &outcomes {
            if let Err(err) = &outcome.result {
                tracing::warn!(source_index = outcome.source_index, %err, "contour failed");
            }
        }
        Ok(outcomes)
    }
}
