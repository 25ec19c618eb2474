//! Data access traits for events, preferences and purchases.
//!
//! The `EventStore` trait defines the read-only queries a recommendation
//! pass issues before scoring starts. All data is fetched up front so the
//! scoring loop itself performs no I/O.

use crate::{Event, TicketPurchase, UserId, UserPreference};

#[cfg(feature = "store-sqlite")]
mod sqlite;

#[cfg(feature = "store-sqlite")]
pub use sqlite::{SCHEMA, SqliteEventStore, SqliteEventStoreError};

/// Read-only access to the persisted event catalogue and user data.
///
/// # Examples
///
/// ```rust
/// use std::convert::Infallible;
/// use marquee_core::{Event, EventStore, TicketPurchase, UserId, UserPreference};
///
/// struct EmptyStore;
///
/// impl EventStore for EmptyStore {
///     type Error = Infallible;
///
///     fn recommendable_events(&self) -> Result<Vec<Event>, Self::Error> {
///         Ok(Vec::new())
///     }
///
///     fn preference(&self, _user_id: UserId) -> Result<Option<UserPreference>, Self::Error> {
///         Ok(None)
///     }
///
///     fn completed_purchases(&self, _user_id: UserId) -> Result<Vec<TicketPurchase>, Self::Error> {
///         Ok(Vec::new())
///     }
/// }
///
/// assert!(EmptyStore.recommendable_events().unwrap().is_empty());
/// ```
pub trait EventStore {
    /// Error raised by the backing store.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Return all active, approved events with their venue and category,
    /// ordered by event identifier.
    fn recommendable_events(&self) -> Result<Vec<Event>, Self::Error>;

    /// Return the stored preference record for `user_id`, if any.
    fn preference(&self, user_id: UserId) -> Result<Option<UserPreference>, Self::Error>;

    /// Return the completed purchases made by `user_id`.
    fn completed_purchases(&self, user_id: UserId) -> Result<Vec<TicketPurchase>, Self::Error>;
}
