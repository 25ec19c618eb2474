//! Recommendation scoring for Marquee events.
//!
//! The crate turns a visitor's stored preference, purchase history and
//! session hints into a ranked list of events:
//! - [`resolve_context`] folds the inputs into one
//!   [`ScoringContext`](marquee_core::ScoringContext), with stored values
//!   taking precedence over hints.
//! - [`SubScores::compute`] scores category, budget, distance, popularity
//!   and recency independently, each in `0.0..=1.0`.
//! - [`RecommendationScorer`] blends the sub-scores with [`ScoreWeights`]
//!   and ranks events best first, breaking ties by event identifier. It
//!   implements the [`Scorer`](marquee_core::Scorer) trait.
//! - [`recommend`] wires the pieces to an
//!   [`EventStore`](marquee_core::EventStore).
//!
//! # Examples
//!
//! ```
//! use chrono::Utc;
//! use marquee_core::{FallbackHints, UserContext, test_support::{MemoryStore, sample_event}};
//! use marquee_scorer::{RecommendationScorer, ScoreWeights, recommend};
//!
//! let store = MemoryStore::default().with_events([sample_event(2), sample_event(1)]);
//! let scorer = RecommendationScorer::new(ScoreWeights::default(), Utc::now())
//!     .expect("default weights are valid");
//! let ranked = recommend(&store, UserContext::Anonymous, &FallbackHints::default(), &scorer)
//!     .expect("memory store never fails");
//! let ids: Vec<_> = ranked.iter().map(|entry| entry.event.id).collect();
//! assert_eq!(ids, vec![1, 2]);
//! ```

#![forbid(unsafe_code)]

use log::debug;
use marquee_core::{EventStore, FallbackHints, UserContext};

mod components;
mod error;
mod ranking;
mod resolver;
mod weights;

pub use components::{
    CategoryStrategy, SubScores, budget_score, distance_score, popularity_score, recency_score,
};
pub use error::RecommendationError;
pub use ranking::{RankedEvent, RecommendationScorer};
pub use resolver::resolve_context;
pub use weights::{
    BUDGET_WEIGHT, CATEGORY_WEIGHT, DISTANCE_WEIGHT, POPULARITY_WEIGHT, RECENCY_WEIGHT,
    ScoreWeights,
};

/// Rank the store's recommendable events for `user`.
///
/// Candidates, the stored preference and completed purchases are fetched
/// once before scoring begins. Anonymous visitors skip the per-user queries.
///
/// # Errors
/// Returns [`RecommendationError::Store`] when any store query fails.
pub fn recommend<S>(
    store: &S,
    user: UserContext,
    hints: &FallbackHints,
    scorer: &RecommendationScorer,
) -> Result<Vec<RankedEvent>, RecommendationError>
where
    S: EventStore + ?Sized,
{
    let events = store
        .recommendable_events()
        .map_err(RecommendationError::store)?;
    let (preference, purchases) = match user.user_id() {
        Some(user_id) => (
            store.preference(user_id).map_err(RecommendationError::store)?,
            store
                .completed_purchases(user_id)
                .map_err(RecommendationError::store)?,
        ),
        None => (None, Vec::new()),
    };
    debug!(
        "recommending from {} candidates for {user:?} with {} completed purchases",
        events.len(),
        purchases.len(),
    );
    let context = resolve_context(user, preference.as_ref(), &purchases, hints);
    Ok(scorer.rank(events, &context, None))
}

#[cfg(test)]
mod tests;
