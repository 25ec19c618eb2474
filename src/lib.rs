//! Facade crate for the Marquee event recommendation engine.
//!
//! This crate re-exports the core domain types and exposes the scorer and
//! the `SQLite` event store behind feature flags.

#![forbid(unsafe_code)]

pub use marquee_core::{
    ApprovalStatus, Category, CategoryHistogram, CategoryId, CategoryPreference, Event, EventId,
    EventStore, FallbackHints, Popularity, PreferenceError, PurchaseStatus, Scorer,
    ScoringContext, TicketPurchase, UserContext, UserId, UserPreference, Venue, VenueId,
    haversine_km,
};

#[cfg(feature = "store-sqlite")]
pub use marquee_core::{SqliteEventStore, SqliteEventStoreError};

#[cfg(feature = "scorer")]
pub use marquee_scorer::{
    RankedEvent, RecommendationError, RecommendationScorer, ScoreWeights, SubScores, recommend,
    resolve_context,
};
