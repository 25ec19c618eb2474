//! The five independent sub-scores of an event.
//!
//! Every function here returns a value in `0.0..=1.0` and treats missing
//! inputs as a zero contribution, so one malformed field never aborts a
//! ranking.

use chrono::{DateTime, Utc};
use geo::Coord;
use marquee_core::{
    CategoryHistogram, CategoryPreference, Event, Popularity, ScoringContext, haversine_km,
};

/// Per-dimension scores of one event, each in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SubScores {
    /// Category match or purchase-history affinity.
    pub category: f64,
    /// Closeness of the ticket price to the visitor's budget.
    pub budget: f64,
    /// Proximity of the venue to the visitor.
    pub distance: f64,
    /// Popularity on the one-to-five scale, divided by five.
    pub popularity: f64,
    /// `1.0` for upcoming events, `0.0` otherwise.
    pub recency: f64,
}

impl SubScores {
    /// Compute every sub-score of `event` for `context` at instant `now`.
    #[must_use]
    pub fn compute(event: &Event, context: &ScoringContext, now: DateTime<Utc>) -> Self {
        let strategy = CategoryStrategy::for_context(context);
        Self {
            category: strategy.score(event),
            budget: budget_score(event.price_as_f64(), context.budget),
            distance: distance_score(context.location, event.venue.location()),
            popularity: popularity_score(event.popularity),
            recency: recency_score(event.start_date, now),
        }
    }
}

/// How the category dimension is scored for one ranking pass.
///
/// An explicit preference and the purchase history are mutually exclusive:
/// once the visitor names a category, history is ignored entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryStrategy<'a> {
    /// Score `1.0` for events in the preferred category, `0.0` otherwise.
    Explicit(&'a CategoryPreference),
    /// Score the event category's share of the most-bought category.
    History(&'a CategoryHistogram),
}

impl<'a> CategoryStrategy<'a> {
    /// Select the strategy implied by `context`.
    #[must_use]
    pub const fn for_context(context: &'a ScoringContext) -> Self {
        if context.has_explicit_category_preference() {
            Self::Explicit(&context.category)
        } else {
            Self::History(&context.history)
        }
    }

    /// Score the category dimension of `event`.
    #[must_use]
    pub fn score(self, event: &Event) -> f64 {
        let Some(category) = event.category.as_ref() else {
            return 0.0;
        };
        match self {
            Self::Explicit(preference) => {
                if preference.matches(category) {
                    1.0
                } else {
                    0.0
                }
            }
            Self::History(histogram) => histogram.affinity(category.id),
        }
    }
}

/// Score how close `price` is to `budget`: `1 / (1 + |price - budget|)`.
///
/// Returns `0.0` when either value is missing or not finite.
///
/// # Examples
/// ```
/// use marquee_scorer::budget_score;
///
/// assert_eq!(budget_score(Some(500.0), Some(500.0)), 1.0);
/// assert_eq!(budget_score(Some(600.0), Some(500.0)), 1.0 / 101.0);
/// assert_eq!(budget_score(Some(600.0), None), 0.0);
/// ```
#[expect(
    clippy::float_arithmetic,
    reason = "budget closeness decays with the absolute price gap"
)]
#[must_use]
pub fn budget_score(price: Option<f64>, budget: Option<f64>) -> f64 {
    let (Some(price), Some(budget)) = (price, budget) else {
        return 0.0;
    };
    decay((price - budget).abs())
}

/// Score how close the venue is: `1 / (1 + haversine_km(visitor, venue))`.
///
/// Returns `0.0` when either position is unknown.
#[must_use]
pub fn distance_score(visitor: Option<Coord<f64>>, venue: Option<Coord<f64>>) -> f64 {
    let (Some(visitor), Some(venue)) = (visitor, venue) else {
        return 0.0;
    };
    decay(haversine_km(visitor, venue))
}

/// Score popularity as `popularity / 5`.
#[expect(
    clippy::float_arithmetic,
    reason = "popularity is normalised by its maximum"
)]
#[must_use]
pub fn popularity_score(popularity: Popularity) -> f64 {
    f64::from(popularity.get()) / f64::from(Popularity::MAX)
}

/// Score `1.0` when `start` lies strictly after `now`, else `0.0`.
#[must_use]
pub fn recency_score(start: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    if start > now { 1.0 } else { 0.0 }
}

/// Map a non-negative gap onto `(0.0, 1.0]` as `1 / (1 + gap)`.
#[expect(
    clippy::float_arithmetic,
    reason = "the decay curve is a reciprocal"
)]
fn decay(gap: f64) -> f64 {
    if !gap.is_finite() || gap < 0.0 {
        return 0.0;
    }
    1.0 / (1.0 + gap)
}

#[cfg(test)]
#[expect(
    clippy::float_arithmetic,
    reason = "tests compare floating-point scores"
)]
mod tests {
    use super::*;
    use chrono::Duration;
    use marquee_core::Category;
    use marquee_core::test_support::{reference_now, sample_event};
    use rstest::rstest;

    const TOLERANCE: f64 = 1e-12;

    #[rstest]
    #[case(500.0, 1.0)]
    #[case(600.0, 1.0 / 101.0)]
    #[case(1500.0, 1.0 / 1001.0)]
    #[case(400.0, 1.0 / 101.0)]
    fn budget_score_decays_with_price_gap(#[case] price: f64, #[case] expected: f64) {
        let score = budget_score(Some(price), Some(500.0));
        assert!((score - expected).abs() < TOLERANCE, "{score} != {expected}");
    }

    #[rstest]
    #[case(None, Some(500.0))]
    #[case(Some(500.0), None)]
    #[case(Some(f64::NAN), Some(500.0))]
    #[case(Some(f64::INFINITY), Some(500.0))]
    fn budget_score_is_zero_without_usable_inputs(
        #[case] price: Option<f64>,
        #[case] budget: Option<f64>,
    ) {
        assert_eq!(budget_score(price, budget), 0.0);
    }

    #[rstest]
    fn distance_score_is_one_at_the_venue() {
        let here = Coord { x: 85.324, y: 27.7172 };
        assert_eq!(distance_score(Some(here), Some(here)), 1.0);
    }

    #[rstest]
    fn distance_score_for_one_degree_of_latitude() {
        let equator = Coord { x: 0.0, y: 0.0 };
        let one_degree_north = Coord { x: 0.0, y: 1.0 };
        let score = distance_score(Some(equator), Some(one_degree_north));
        let expected = 1.0 / (1.0 + haversine_km(equator, one_degree_north));
        assert!((score - expected).abs() < TOLERANCE);
        assert!((score - 0.0089).abs() < 1e-4);
    }

    #[rstest]
    #[case(None, Some(Coord { x: 0.0, y: 0.0 }))]
    #[case(Some(Coord { x: 0.0, y: 0.0 }), None)]
    fn distance_score_is_zero_without_positions(
        #[case] visitor: Option<Coord<f64>>,
        #[case] venue: Option<Coord<f64>>,
    ) {
        assert_eq!(distance_score(visitor, venue), 0.0);
    }

    #[rstest]
    #[case(1, 0.2)]
    #[case(3, 0.6)]
    #[case(5, 1.0)]
    fn popularity_is_a_fifth_per_point(#[case] raw: i64, #[case] expected: f64) {
        assert!((popularity_score(Popularity::new(raw)) - expected).abs() < TOLERANCE);
    }

    #[rstest]
    #[case(Duration::days(1), 1.0)]
    #[case(Duration::seconds(1), 1.0)]
    #[case(Duration::zero(), 0.0)]
    #[case(-Duration::days(1), 0.0)]
    fn recency_rewards_only_future_events(#[case] offset: Duration, #[case] expected: f64) {
        let now = reference_now();
        assert_eq!(recency_score(now + offset, now), expected);
    }

    #[rstest]
    fn explicit_strategy_ignores_history() {
        let mut context = ScoringContext {
            category: CategoryPreference::Id(1),
            ..ScoringContext::default()
        };
        context.history.record(2);
        let sports = sample_event(1).with_category(Category::new(1, "Sports"));
        let music = sample_event(2).with_category(Category::new(2, "Music"));

        let strategy = CategoryStrategy::for_context(&context);
        assert!(matches!(strategy, CategoryStrategy::Explicit(_)));
        assert_eq!(strategy.score(&sports), 1.0);
        assert_eq!(strategy.score(&music), 0.0);
    }

    #[rstest]
    fn history_strategy_uses_affinity() {
        let mut context = ScoringContext::default();
        for category in [2, 2, 3] {
            context.history.record(category);
        }
        let strategy = CategoryStrategy::for_context(&context);
        assert!(matches!(strategy, CategoryStrategy::History(_)));

        let favourite = sample_event(1).with_category(Category::new(2, "Music"));
        let occasional = sample_event(2).with_category(Category::new(3, "Theatre"));
        let uncategorised = sample_event(3);
        assert_eq!(strategy.score(&favourite), 1.0);
        assert_eq!(strategy.score(&occasional), 0.5);
        assert_eq!(strategy.score(&uncategorised), 0.0);
    }

    #[rstest]
    fn compute_combines_every_dimension() {
        let context = ScoringContext {
            location: sample_event(1).venue.location(),
            budget: Some(1500.0),
            category: CategoryPreference::named("music"),
            ..ScoringContext::default()
        };
        let event = sample_event(1).with_category(Category::new(2, "Music"));
        let scores = SubScores::compute(&event, &context, reference_now());
        assert_eq!(
            scores,
            SubScores {
                category: 1.0,
                budget: 1.0,
                distance: 1.0,
                popularity: 0.6,
                recency: 1.0,
            }
        );
    }
}
