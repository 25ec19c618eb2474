//! Unit coverage for store-backed recommendation and ranking.
#![forbid(unsafe_code)]

use bigdecimal::BigDecimal;
use chrono::Duration;
use marquee_core::test_support::{MemoryStore, reference_now, sample_event};
use marquee_core::{
    ApprovalStatus, Category, Event, EventStore, FallbackHints, Popularity, PurchaseStatus,
    Scorer, ScoringContext, TicketPurchase, UserContext, UserId, UserPreference,
};
use rstest::{fixture, rstest};
use thiserror::Error;

use crate::{RecommendationError, RecommendationScorer, ScoreWeights, recommend};

#[fixture]
fn scorer() -> RecommendationScorer {
    RecommendationScorer::new(ScoreWeights::default(), reference_now()).expect("valid weights")
}

fn ids(ranked: &[crate::RankedEvent]) -> Vec<u64> {
    ranked.iter().map(|entry| entry.event.id).collect()
}

#[derive(Debug, Error)]
#[error("store offline")]
struct Offline;

struct FailingStore;

impl EventStore for FailingStore {
    type Error = Offline;

    fn recommendable_events(&self) -> Result<Vec<Event>, Self::Error> {
        Err(Offline)
    }

    fn preference(&self, _user_id: UserId) -> Result<Option<UserPreference>, Self::Error> {
        Err(Offline)
    }

    fn completed_purchases(&self, _user_id: UserId) -> Result<Vec<TicketPurchase>, Self::Error> {
        Err(Offline)
    }
}

#[rstest]
fn rejects_invalid_weights() {
    let weights = ScoreWeights {
        recency: 0.9,
        ..ScoreWeights::default()
    };
    let err = RecommendationScorer::new(weights, reference_now()).expect_err("weights invalid");
    assert!(matches!(err, RecommendationError::InvalidWeights));
}

#[rstest]
fn ties_break_by_ascending_id(scorer: RecommendationScorer) {
    let events = [5, 3, 9, 1].map(sample_event);
    let ranked = scorer.rank(events, &ScoringContext::default(), None);
    assert_eq!(ids(&ranked), vec![1, 3, 5, 9]);
}

#[rstest]
fn higher_scores_rank_first(scorer: RecommendationScorer) {
    let past = {
        let mut event = sample_event(1);
        event.start_date = reference_now() - Duration::days(2);
        event
    };
    let popular = sample_event(2).with_popularity(Popularity::new(5));
    let ordinary = sample_event(3);
    let ranked = scorer.rank([past, popular, ordinary], &ScoringContext::default(), None);
    assert_eq!(ids(&ranked), vec![2, 3, 1]);
    assert!(
        ranked
            .windows(2)
            .all(|pair| matches!(pair, [first, second] if first.score >= second.score))
    );
}

#[rstest]
fn unlisted_events_are_not_ranked(scorer: RecommendationScorer) {
    let events = [
        sample_event(1),
        sample_event(2).with_approval_status(ApprovalStatus::Pending),
        sample_event(3).with_active(false),
        sample_event(4).with_approval_status(ApprovalStatus::Rejected),
    ];
    let ranked = scorer.rank(events, &ScoringContext::default(), None);
    assert_eq!(ids(&ranked), vec![1]);
}

#[rstest]
fn limit_truncates_the_ranking(scorer: RecommendationScorer) {
    let ranked = scorer.rank((1..=8).map(sample_event), &ScoringContext::default(), Some(3));
    assert_eq!(ids(&ranked), vec![1, 2, 3]);
}

#[rstest]
fn empty_candidates_yield_empty_ranking(scorer: RecommendationScorer) {
    assert!(scorer.rank(Vec::new(), &ScoringContext::default(), None).is_empty());
}

#[rstest]
fn score_matches_breakdown_and_trait(scorer: RecommendationScorer) {
    let event = sample_event(1);
    let context = ScoringContext::default();
    let (score, breakdown) = scorer.score_with_breakdown(&event, &context);
    assert_eq!(score, scorer.weights().blend(&breakdown));
    assert_eq!(Scorer::score(&scorer, &event, &context), score);
}

#[rstest]
fn recommend_uses_stored_profile_and_history(scorer: RecommendationScorer) {
    let music = Category::new(2, "Music");
    let sports = Category::new(4, "Sports");
    let store = MemoryStore::default()
        .with_events([
            sample_event(1).with_category(sports.clone()),
            sample_event(2).with_category(music.clone()),
        ])
        .with_preference(
            UserPreference::new(7)
                .with_budget(BigDecimal::from(1500))
                .expect("non-negative budget"),
        )
        .with_purchases([TicketPurchase::new(7, 99, Some(music.id), PurchaseStatus::Completed)]);

    let ranked = recommend(
        &store,
        UserContext::Authenticated { user_id: 7 },
        &FallbackHints::default(),
        &scorer,
    )
    .expect("memory store never fails");

    assert_eq!(ids(&ranked), vec![2, 1]);
    let top = ranked.first().expect("ranked events");
    assert_eq!(top.breakdown.category, 1.0);
    assert_eq!(top.breakdown.budget, 1.0);
}

#[rstest]
fn recommend_for_anonymous_visitor_uses_hints(scorer: RecommendationScorer) {
    let store = MemoryStore::default()
        .with_events([
            sample_event(1).with_category(Category::new(4, "Sports")),
            sample_event(2).with_category(Category::new(2, "Music")),
        ])
        .with_purchases([TicketPurchase::new(7, 1, Some(4), PurchaseStatus::Completed)]);
    let hints = FallbackHints::default().with_preferred_category("MUSIC");

    let ranked = recommend(&store, UserContext::Anonymous, &hints, &scorer)
        .expect("memory store never fails");

    assert_eq!(ids(&ranked), vec![2, 1]);
}

#[rstest]
fn store_failures_are_reported(scorer: RecommendationScorer) {
    let err = recommend(
        &FailingStore,
        UserContext::Anonymous,
        &FallbackHints::default(),
        &scorer,
    )
    .expect_err("store fails");
    assert!(matches!(err, RecommendationError::Store { .. }));
    assert_eq!(err.to_string(), "failed to read recommendation inputs from the event store");
}
