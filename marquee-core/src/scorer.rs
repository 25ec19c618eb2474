//! Score events for a visitor.
//!
//! The `Scorer` trait assigns a relevance score to an
//! [`Event`](crate::Event) given a resolved
//! [`ScoringContext`](crate::ScoringContext).

use crate::{Event, ScoringContext};

/// Calculate a relevance score for an event.
///
/// Higher scores indicate a better match between the event and the
/// visitor. Implementations must be thread-safe (`Send` + `Sync`) so a
/// scorer can be shared between request handlers.
/// The method is infallible; implementers must return `0.0` when no
/// information is available.
///
/// Implementations must:
/// - Produce finite (`f64::is_finite`) scores.
/// - Return non-negative values.
/// - Normalise results to the range `0.0..=1.0`.
///
/// Use [`Scorer::sanitise`] to apply these guards.
///
/// # Examples
///
/// ```rust
/// use bigdecimal::BigDecimal;
/// use chrono::Utc;
/// use marquee_core::{Event, Scorer, ScoringContext, Venue};
///
/// struct PopularityOnly;
///
/// impl Scorer for PopularityOnly {
///     fn score(&self, event: &Event, _context: &ScoringContext) -> f64 {
///         Self::sanitise(f64::from(event.popularity.get()) / 5.0)
///     }
/// }
///
/// let now = Utc::now();
/// let event = Event::new(1, "Expo", Venue::new(1, "Hall", "Lalitpur"), now, now, BigDecimal::from(0));
/// assert_eq!(PopularityOnly.score(&event, &ScoringContext::default()), 0.2);
/// ```
pub trait Scorer: Send + Sync {
    /// Return a score for `event` according to `context`.
    fn score(&self, event: &Event, context: &ScoringContext) -> f64;

    /// Clamp and validate a raw score.
    ///
    /// Returns `0.0` for non-finite values and clamps to `0.0..=1.0`.
    fn sanitise(score: f64) -> f64
    where
        Self: Sized,
    {
        if !score.is_finite() {
            return 0.0;
        }
        score.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    struct Constant;

    impl Scorer for Constant {
        fn score(&self, _event: &Event, _context: &ScoringContext) -> f64 {
            1.0
        }
    }

    #[rstest]
    #[case(f64::NAN, 0.0)]
    #[case(f64::INFINITY, 0.0)]
    #[case(f64::NEG_INFINITY, 0.0)]
    #[case(-0.1, 0.0)]
    #[case(1.2, 1.0)]
    #[case(0.4, 0.4)]
    fn sanitise_clamps_and_filters(#[case] input: f64, #[case] expected: f64) {
        assert_eq!(Constant::sanitise(input), expected);
    }
}
