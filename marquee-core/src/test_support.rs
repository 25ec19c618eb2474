//! Test-only fixtures: an in-memory `EventStore` and builders for sample
//! data used by unit and behaviour tests.

use std::{collections::HashMap, convert::Infallible};

use bigdecimal::BigDecimal;
use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::{
    ApprovalStatus, Event, EventId, EventStore, Popularity, TicketPurchase, UserId,
    UserPreference, Venue,
};

/// Fixed instant used as "now" by deterministic tests: 2030-01-01T12:00Z.
#[must_use]
pub fn reference_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2030, 1, 1, 12, 0, 0)
        .single()
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// Build an approved, active event with id `id`.
///
/// The event starts one day after [`reference_now`], costs 1500, has
/// popularity 3 and is hosted at a venue in Kathmandu (27.7172 N,
/// 85.3240 E). It has no category.
#[must_use]
pub fn sample_event(id: EventId) -> Event {
    let start = reference_now() + Duration::days(1);
    let venue = Venue::new(id, format!("Venue {id}"), "Kathmandu").with_coordinates(27.7172, 85.324);
    Event::new(
        id,
        format!("Event {id}"),
        venue,
        start,
        start + Duration::hours(3),
        BigDecimal::from(1500),
    )
    .with_popularity(Popularity::new(3))
    .with_approval_status(ApprovalStatus::Approved)
}

/// In-memory `EventStore` implementation used in tests.
///
/// The store performs linear scans and is intended only for small datasets.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    events: Vec<Event>,
    preferences: HashMap<UserId, UserPreference>,
    purchases: Vec<TicketPurchase>,
}

impl MemoryStore {
    /// Add events while returning `self` for chaining.
    #[must_use]
    pub fn with_events<I>(mut self, events: I) -> Self
    where
        I: IntoIterator<Item = Event>,
    {
        self.events.extend(events);
        self
    }

    /// Add a preference record while returning `self` for chaining.
    #[must_use]
    pub fn with_preference(mut self, preference: UserPreference) -> Self {
        self.preferences.insert(preference.user_id(), preference);
        self
    }

    /// Add purchases while returning `self` for chaining.
    #[must_use]
    pub fn with_purchases<I>(mut self, purchases: I) -> Self
    where
        I: IntoIterator<Item = TicketPurchase>,
    {
        self.purchases.extend(purchases);
        self
    }
}

impl EventStore for MemoryStore {
    type Error = Infallible;

    fn recommendable_events(&self) -> Result<Vec<Event>, Self::Error> {
        let mut events: Vec<_> = self
            .events
            .iter()
            .filter(|event| event.is_recommendable())
            .cloned()
            .collect();
        events.sort_by_key(|event| event.id);
        Ok(events)
    }

    fn preference(&self, user_id: UserId) -> Result<Option<UserPreference>, Self::Error> {
        Ok(self.preferences.get(&user_id).cloned())
    }

    fn completed_purchases(&self, user_id: UserId) -> Result<Vec<TicketPurchase>, Self::Error> {
        Ok(self
            .purchases
            .iter()
            .filter(|purchase| purchase.user_id == user_id && purchase.is_completed())
            .cloned()
            .collect())
    }
}

/// Rows to persist with [`write_sqlite_database`].
#[cfg(feature = "store-sqlite")]
#[derive(Debug, Default, Clone)]
pub struct SqliteFixture {
    /// Events, persisted with their venue and category.
    pub events: Vec<Event>,
    /// Preference rows.
    pub preferences: Vec<UserPreference>,
    /// Purchase rows, in insertion order.
    pub purchases: Vec<TicketPurchase>,
}

#[cfg(feature = "store-sqlite")]
impl SqliteFixture {
    /// Add events while returning `self` for chaining.
    #[must_use]
    pub fn with_events<I>(mut self, events: I) -> Self
    where
        I: IntoIterator<Item = Event>,
    {
        self.events.extend(events);
        self
    }

    /// Add a preference row while returning `self` for chaining.
    #[must_use]
    pub fn with_preference(mut self, preference: UserPreference) -> Self {
        self.preferences.push(preference);
        self
    }

    /// Add purchase rows while returning `self` for chaining.
    #[must_use]
    pub fn with_purchases<I>(mut self, purchases: I) -> Self
    where
        I: IntoIterator<Item = TicketPurchase>,
    {
        self.purchases.extend(purchases);
        self
    }
}

/// Create a `SQLite` database at `path` laid out per
/// [`SCHEMA`](crate::store::SCHEMA) and populated from `fixture`.
///
/// # Errors
/// Propagates any `rusqlite` failure.
#[cfg(feature = "store-sqlite")]
pub fn write_sqlite_database(
    path: &std::path::Path,
    fixture: &SqliteFixture,
) -> Result<(), rusqlite::Error> {
    let mut connection = rusqlite::Connection::open(path)?;
    connection.execute_batch(crate::store::SCHEMA)?;
    let tx = connection.transaction()?;
    for event in &fixture.events {
        tx.execute(
            "INSERT OR REPLACE INTO venues (id, name, city, latitude, longitude)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            (
                event.venue.id,
                &event.venue.name,
                &event.venue.city,
                event.venue.latitude,
                event.venue.longitude,
            ),
        )?;
        if let Some(category) = &event.category {
            tx.execute(
                "INSERT OR REPLACE INTO categories (id, name) VALUES (?1, ?2)",
                (category.id, &category.name),
            )?;
        }
        tx.execute(
            "INSERT INTO events (id, title, category_id, venue_id, start_date, end_date, price,
                                 popularity, is_active, approval_status)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            (
                event.id,
                &event.title,
                event.category_id(),
                event.venue.id,
                event.start_date.to_rfc3339(),
                event.end_date.to_rfc3339(),
                event.price.to_string(),
                event.popularity.get(),
                event.is_active,
                event.approval_status.as_str(),
            ),
        )?;
    }
    for preference in &fixture.preferences {
        tx.execute(
            "INSERT INTO user_preferences (user_id, favorite_category_id, budget)
             VALUES (?1, ?2, ?3)",
            (
                preference.user_id(),
                preference.favorite_category(),
                preference.budget().map(ToString::to_string),
            ),
        )?;
    }
    for purchase in &fixture.purchases {
        tx.execute(
            "INSERT INTO ticket_purchases (user_id, event_id, status) VALUES (?1, ?2, ?3)",
            (purchase.user_id, purchase.event_id, purchase.status.as_str()),
        )?;
    }
    tx.commit()
}
