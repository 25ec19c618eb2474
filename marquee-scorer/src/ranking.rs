//! Weighted event scoring and ranking.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use log::debug;
use marquee_core::{Event, Scorer, ScoringContext};

use crate::{RecommendationError, ScoreWeights, SubScores};

/// An event paired with its final score and sub-score breakdown.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedEvent {
    /// The ranked event.
    pub event: Event,
    /// Weighted sum of the sub-scores, in `0.0..=1.0`.
    pub score: f64,
    /// The individual sub-scores that produced `score`.
    pub breakdown: SubScores,
}

/// Scores events against a [`ScoringContext`] at a fixed instant.
///
/// The evaluation instant is captured when the scorer is built, so every
/// event in a ranking pass is compared against the same "now".
///
/// # Examples
/// ```
/// use chrono::Utc;
/// use marquee_core::ScoringContext;
/// use marquee_scorer::{RecommendationScorer, ScoreWeights};
///
/// let scorer = RecommendationScorer::new(ScoreWeights::default(), Utc::now())
///     .expect("default weights are valid");
/// assert!(scorer.rank(Vec::new(), &ScoringContext::default(), None).is_empty());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecommendationScorer {
    weights: ScoreWeights,
    now: DateTime<Utc>,
}

impl RecommendationScorer {
    /// Build a scorer evaluating recency relative to `now`.
    ///
    /// # Errors
    /// Returns [`RecommendationError::InvalidWeights`] when `weights` fail
    /// [`ScoreWeights::validate`].
    pub fn new(weights: ScoreWeights, now: DateTime<Utc>) -> Result<Self, RecommendationError> {
        Ok(Self {
            weights: weights.validate()?,
            now,
        })
    }

    /// Return the weights in use.
    #[must_use]
    pub const fn weights(&self) -> ScoreWeights {
        self.weights
    }

    /// Score `event`, returning the final score and its breakdown.
    #[must_use]
    pub fn score_with_breakdown(&self, event: &Event, context: &ScoringContext) -> (f64, SubScores) {
        let breakdown = SubScores::compute(event, context, self.now);
        let score = Self::sanitise(self.weights.blend(&breakdown));
        (score, breakdown)
    }

    /// Rank `events` for `context`, best first.
    ///
    /// Events that are not active and approved are dropped before scoring.
    /// Equal scores are ordered by ascending event identifier. When `limit`
    /// is set only the top `limit` events are returned.
    #[must_use]
    pub fn rank<I>(&self, events: I, context: &ScoringContext, limit: Option<usize>) -> Vec<RankedEvent>
    where
        I: IntoIterator<Item = Event>,
    {
        let mut ranked: Vec<RankedEvent> = events
            .into_iter()
            .filter(Event::is_recommendable)
            .map(|event| {
                let (score, breakdown) = self.score_with_breakdown(&event, context);
                debug!(
                    "event {} ({}) scored {score:.4}: category={:.4} budget={:.4} distance={:.4} popularity={:.4} recency={:.4}",
                    event.id,
                    event.title,
                    breakdown.category,
                    breakdown.budget,
                    breakdown.distance,
                    breakdown.popularity,
                    breakdown.recency,
                );
                RankedEvent {
                    event,
                    score,
                    breakdown,
                }
            })
            .collect();
        ranked.sort_by(compare_ranked);
        if let Some(limit) = limit {
            ranked.truncate(limit);
        }
        debug!("ranked {} events", ranked.len());
        ranked
    }
}

impl Scorer for RecommendationScorer {
    fn score(&self, event: &Event, context: &ScoringContext) -> f64 {
        self.score_with_breakdown(event, context).0
    }
}

/// Order by descending score, then ascending event identifier.
fn compare_ranked(left: &RankedEvent, right: &RankedEvent) -> Ordering {
    right
        .score
        .total_cmp(&left.score)
        .then_with(|| left.event.id.cmp(&right.event.id))
}
