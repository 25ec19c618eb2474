//! Relative weighting of the five sub-scores.
#![forbid(unsafe_code)]

use crate::{RecommendationError, SubScores};

/// Weight of the category match.
pub const CATEGORY_WEIGHT: f64 = 0.30;
/// Weight of the budget closeness.
pub const BUDGET_WEIGHT: f64 = 0.20;
/// Weight of the venue proximity.
pub const DISTANCE_WEIGHT: f64 = 0.25;
/// Weight of the event popularity.
pub const POPULARITY_WEIGHT: f64 = 0.15;
/// Weight of the upcoming-event boost.
pub const RECENCY_WEIGHT: f64 = 0.10;

/// Allowed deviation of the weight total from `1.0`.
const TOTAL_TOLERANCE: f64 = 1e-9;

/// Multipliers applied to each sub-score before summing.
///
/// The defaults are the named constants of this module and sum to `1.0`, so
/// a blended score stays inside `0.0..=1.0`.
///
/// # Examples
/// ```
/// use marquee_scorer::{ScoreWeights, SubScores};
///
/// let weights = ScoreWeights::default();
/// let perfect = SubScores {
///     category: 1.0,
///     budget: 1.0,
///     distance: 1.0,
///     popularity: 1.0,
///     recency: 1.0,
/// };
/// assert!((weights.blend(&perfect) - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ScoreWeights {
    /// Multiplier for the category sub-score.
    pub category: f64,
    /// Multiplier for the budget sub-score.
    pub budget: f64,
    /// Multiplier for the distance sub-score.
    pub distance: f64,
    /// Multiplier for the popularity sub-score.
    pub popularity: f64,
    /// Multiplier for the recency sub-score.
    pub recency: f64,
}

impl ScoreWeights {
    /// Validate the weights and return a copy.
    ///
    /// # Errors
    /// Returns [`RecommendationError::InvalidWeights`] when any weight is
    /// negative or not finite, or when the weights do not sum to `1.0`.
    pub fn validate(self) -> Result<Self, RecommendationError> {
        if self.is_valid() {
            Ok(self)
        } else {
            Err(RecommendationError::InvalidWeights)
        }
    }

    fn is_valid(self) -> bool {
        let weights = self.as_array();
        weights
            .iter()
            .all(|weight| weight.is_finite() && *weight >= 0.0)
            && self.has_unit_total()
    }

    #[expect(
        clippy::float_arithmetic,
        reason = "validation compares the weight total against one"
    )]
    fn has_unit_total(self) -> bool {
        let total: f64 = self.as_array().iter().sum();
        (total - 1.0).abs() <= TOTAL_TOLERANCE
    }

    const fn as_array(self) -> [f64; 5] {
        [
            self.category,
            self.budget,
            self.distance,
            self.popularity,
            self.recency,
        ]
    }

    /// Combine sub-scores into a single weighted sum.
    #[expect(
        clippy::float_arithmetic,
        reason = "the final score is a weighted sum of sub-scores"
    )]
    #[must_use]
    pub fn blend(&self, scores: &SubScores) -> f64 {
        scores.category * self.category
            + scores.budget * self.budget
            + scores.distance * self.distance
            + scores.popularity * self.popularity
            + scores.recency * self.recency
    }
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            category: CATEGORY_WEIGHT,
            budget: BUDGET_WEIGHT,
            distance: DISTANCE_WEIGHT,
            popularity: POPULARITY_WEIGHT,
            recency: RECENCY_WEIGHT,
        }
    }
}

#[cfg(test)]
#[expect(
    clippy::float_arithmetic,
    reason = "tests compare floating-point scores"
)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn defaults_are_valid() {
        assert!(ScoreWeights::default().validate().is_ok());
    }

    #[rstest]
    #[case(ScoreWeights { category: -0.1, budget: 0.3, ..ScoreWeights::default() })]
    #[case(ScoreWeights { recency: f64::NAN, ..ScoreWeights::default() })]
    #[case(ScoreWeights { recency: 0.5, ..ScoreWeights::default() })]
    #[case(ScoreWeights { category: 0.0, budget: 0.0, distance: 0.0, popularity: 0.0, recency: 0.0 })]
    fn rejects_unusable_weights(#[case] weights: ScoreWeights) {
        let err = weights.validate().expect_err("weights should be invalid");
        assert!(matches!(err, RecommendationError::InvalidWeights));
    }

    #[rstest]
    fn blend_applies_each_weight() {
        let weights = ScoreWeights::default();
        let only_distance = SubScores {
            distance: 1.0,
            ..SubScores::default()
        };
        assert!((weights.blend(&only_distance) - DISTANCE_WEIGHT).abs() < 1e-12);
        assert_eq!(weights.blend(&SubScores::default()), 0.0);
    }
}
