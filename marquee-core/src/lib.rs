//! Core domain types for the Marquee recommendation engine.
//!
//! The crate models what the scorer consumes: events with their venue and
//! category, stored user preferences, ticket purchases, transient fallback
//! hints and the resolved [`ScoringContext`]. It also provides the
//! [`Scorer`] and [`EventStore`] seams, the haversine distance used for
//! proximity scoring and, behind the `store-sqlite` feature, a read-only
//! `SQLite` event store.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod category;
pub mod context;
pub mod distance;
pub mod event;
pub mod hints;
pub mod history;
pub mod preference;
pub mod purchase;
pub mod scorer;
pub mod store;
#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;
pub mod user;
pub mod venue;

pub use category::{Category, CategoryId, normalise_category_name};
pub use context::{CategoryPreference, ScoringContext};
pub use distance::{EARTH_RADIUS_KM, haversine_km};
pub use event::{ApprovalStatus, Event, EventId, ParseApprovalStatusError, Popularity};
pub use hints::FallbackHints;
pub use history::CategoryHistogram;
pub use preference::{PreferenceError, UserPreference};
pub use purchase::{ParsePurchaseStatusError, PurchaseStatus, TicketPurchase};
pub use scorer::Scorer;
pub use store::EventStore;
#[cfg(feature = "store-sqlite")]
pub use store::{SqliteEventStore, SqliteEventStoreError};
pub use user::{UserContext, UserId};
pub use venue::{Venue, VenueId};
