pub mod batch;
pub mod expand;
pub mod normalize;
pub mod postprocess;
pub mod reduce;
pub mod seed;
pub mod simplify;

pub use batch::{ContourOutcome, NormalizeBatch};
pub use expand::Expand;
pub use normalize::{Adjustment, NormalizeContour, Normalization};
pub use postprocess::canonicalize;
pub use reduce::{Reduce, ReducePolicy};
pub use seed::{Anchors, SeedAnchors};
pub use simplify::{simplify_pass, Simplification, Simplify, ToleranceShortfall};

use crate::error::{InputError, Result};

/// Epsilon of the first simplification pass, in contour units (pixels).
pub const DEFAULT_INITIAL_EPSILON: f64 = 20.0;

/// Amount epsilon drops between simplification passes.
pub const DEFAULT_EPSILON_STEP: f64 = 3.0;

/// Parameters controlling contour normalization.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NormalizeParams {
    /// Exact number of points to produce.
    pub target: usize,
    /// Heuristic used when the simplified set is too large.
    pub policy: ReducePolicy,
    /// Epsilon of the first simplification pass.
    pub initial_epsilon: f64,
    /// Amount epsilon drops between passes.
    pub epsilon_step: f64,
    /// Whether a set left undersized by the tolerance search is grown by
    /// midpoint snapping. When `false`, the shortfall is an error.
    pub expand_undersized: bool,
}

impl NormalizeParams {
    /// Creates parameters for `target` points with default settings.
    #[must_use]
    pub fn new(target: usize) -> Self {
        Self {
            target,
            policy: ReducePolicy::default(),
            initial_epsilon: DEFAULT_INITIAL_EPSILON,
            epsilon_step: DEFAULT_EPSILON_STEP,
            expand_undersized: true,
        }
    }

    /// Sets the reduce policy.
    #[must_use]
    pub fn with_policy(mut self, policy: ReducePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Sets the epsilon of the first pass.
    #[must_use]
    pub fn with_initial_epsilon(mut self, epsilon: f64) -> Self {
        self.initial_epsilon = epsilon;
        self
    }

    /// Sets the epsilon decrement.
    #[must_use]
    pub fn with_epsilon_step(mut self, step: f64) -> Self {
        self.epsilon_step = step;
        self
    }

    /// Sets whether undersized results are expanded or rejected.
    #[must_use]
    pub fn with_expand_undersized(mut self, expand: bool) -> Self {
        self.expand_undersized = expand;
        self
    }

    /// Checks the parameters.
    ///
    /// # Errors
    ///
    /// - `InputError::TargetTooSmall` if `target < 2`
    /// - `InputError::InvalidParameter` if `initial_epsilon` is negative or
    ///   not finite, or `epsilon_step` is not a positive finite number
    pub fn validate(&self) -> Result<()> {
        validate_search(self.target, self.initial_epsilon, self.epsilon_step)
    }
}

/// Shared checks for the tolerance search parameters.
pub(crate) fn validate_search(
    target: usize,
    initial_epsilon: f64,
    epsilon_step: f64,
) -> Result<()> {
    if target < 2 {
        return Err(InputError::TargetTooSmall { target }.into());
    }
    if !initial_epsilon.is_finite() || initial_epsilon < 0.0 {
        return Err(InputError::InvalidParameter {
            parameter: "initial_epsilon",
            value: initial_epsilon,
        }
        .into());
    }
    if !epsilon_step.is_finite() || epsilon_step <= 0.0 {
        return Err(InputError::InvalidParameter {
            parameter: "epsilon_step",
            value: epsilon_step,
        }
        .into());
    }
    Ok(())
}
