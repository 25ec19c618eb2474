//! SQLite-backed store implementation for the event catalogue.

use std::{
    fmt,
    path::{Path, PathBuf},
    str::FromStr,
};

use bigdecimal::{BigDecimal, ParseBigDecimalError};
use chrono::{DateTime, Utc};
use rusqlite::{Connection, OpenFlags, OptionalExtension, Row};
use thiserror::Error;

use crate::{
    ApprovalStatus, Category, Event, EventId, ParseApprovalStatusError, ParsePurchaseStatusError,
    Popularity, PreferenceError, PurchaseStatus, TicketPurchase, UserId, UserPreference, Venue,
};

use super::EventStore;

/// Table layout read by [`SqliteEventStore`].
///
/// Timestamps are RFC 3339 text and money is decimal text so values survive
/// the round trip without floating-point rounding.
pub const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS categories (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS venues (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    city TEXT NOT NULL,
    latitude REAL,
    longitude REAL
);
CREATE TABLE IF NOT EXISTS events (
    id INTEGER PRIMARY KEY,
    title TEXT NOT NULL,
    category_id INTEGER REFERENCES categories (id),
    venue_id INTEGER NOT NULL REFERENCES venues (id),
    start_date TEXT NOT NULL,
    end_date TEXT NOT NULL,
    price TEXT NOT NULL,
    popularity INTEGER NOT NULL DEFAULT 1,
    is_active INTEGER NOT NULL DEFAULT 1,
    approval_status TEXT NOT NULL DEFAULT 'pending'
);
CREATE INDEX IF NOT EXISTS events_listing ON events (is_active, approval_status);
CREATE TABLE IF NOT EXISTS user_preferences (
    user_id INTEGER PRIMARY KEY,
    favorite_category_id INTEGER REFERENCES categories (id),
    budget TEXT
);
CREATE TABLE IF NOT EXISTS ticket_purchases (
    id INTEGER PRIMARY KEY,
    user_id INTEGER NOT NULL,
    event_id INTEGER NOT NULL REFERENCES events (id),
    status TEXT NOT NULL
);
";

const EVENTS_SQL: &str = "SELECT
        events.id, events.title, events.start_date, events.end_date, events.price,
        events.popularity, events.is_active, events.approval_status,
        venues.id, venues.name, venues.city, venues.latitude, venues.longitude,
        categories.id, categories.name
     FROM events
     JOIN venues ON venues.id = events.venue_id
     LEFT JOIN categories ON categories.id = events.category_id
     WHERE events.is_active = 1 AND events.approval_status = ?1
     ORDER BY events.id";

const PREFERENCE_SQL: &str =
    "SELECT favorite_category_id, budget FROM user_preferences WHERE user_id = ?1";

const PURCHASES_SQL: &str = "SELECT purchases.event_id, events.category_id, purchases.status
     FROM ticket_purchases AS purchases
     JOIN events ON events.id = purchases.event_id
     WHERE purchases.user_id = ?1 AND purchases.status = ?2
     ORDER BY purchases.id";

/// Error raised when reading the event catalogue from `SQLite`.
#[derive(Debug, Error)]
pub enum SqliteEventStoreError {
    /// Opening the `SQLite` database failed.
    #[error("failed to open SQLite database at {path}: {source}")]
    OpenDatabase {
        /// Location of the `SQLite` database on disk.
        path: PathBuf,
        /// Source error returned by `rusqlite`.
        #[source]
        source: rusqlite::Error,
    },
    /// A stored timestamp was not valid RFC 3339.
    #[error("failed to parse {field} for event {id}: {source}")]
    InvalidTimestamp {
        /// Identifier of the affected event.
        id: EventId,
        /// Column holding the timestamp.
        field: &'static str,
        /// Parsing failure.
        #[source]
        source: chrono::ParseError,
    },
    /// A stored price was not a decimal number.
    #[error("failed to parse price for event {id}: {source}")]
    InvalidPrice {
        /// Identifier of the affected event.
        id: EventId,
        /// Parsing failure.
        #[source]
        source: ParseBigDecimalError,
    },
    /// A stored approval status was not recognised.
    #[error("invalid approval status for event {id}: {source}")]
    InvalidApprovalStatus {
        /// Identifier of the affected event.
        id: EventId,
        /// Parsing failure.
        #[source]
        source: ParseApprovalStatusError,
    },
    /// A stored budget was not a decimal number.
    #[error("failed to parse budget for user {user_id}: {source}")]
    InvalidBudget {
        /// Owner of the preference row.
        user_id: UserId,
        /// Parsing failure.
        #[source]
        source: ParseBigDecimalError,
    },
    /// A stored preference violated the preference invariants.
    #[error("invalid preference for user {user_id}: {source}")]
    InvalidPreference {
        /// Owner of the preference row.
        user_id: UserId,
        /// Validation failure.
        #[source]
        source: PreferenceError,
    },
    /// A stored purchase status was not recognised.
    #[error("invalid purchase status for user {user_id}: {source}")]
    InvalidPurchaseStatus {
        /// Purchasing user.
        user_id: UserId,
        /// Parsing failure.
        #[source]
        source: ParsePurchaseStatusError,
    },
    /// Generic `SQLite` error when reading rows.
    #[error(transparent)]
    Database(#[from] rusqlite::Error),
}

/// Read-only event store backed by a `SQLite` database laid out per
/// [`SCHEMA`].
pub struct SqliteEventStore {
    connection: Connection,
    path: PathBuf,
}

impl fmt::Debug for SqliteEventStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqliteEventStore")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl SqliteEventStore {
    /// Open the database at `database_path` in read-only mode.
    ///
    /// # Errors
    /// Returns [`SqliteEventStoreError::OpenDatabase`] when `SQLite` cannot
    /// open the file.
    pub fn open<P>(database_path: P) -> Result<Self, SqliteEventStoreError>
    where
        P: AsRef<Path>,
    {
        let path = database_path.as_ref();
        let connection = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)
            .map_err(|source| SqliteEventStoreError::OpenDatabase {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self {
            connection,
            path: path.to_path_buf(),
        })
    }
}

impl EventStore for SqliteEventStore {
    type Error = SqliteEventStoreError;

    fn recommendable_events(&self) -> Result<Vec<Event>, Self::Error> {
        let mut statement = self.connection.prepare_cached(EVENTS_SQL)?;
        let mut rows = statement.query([ApprovalStatus::Approved.as_str()])?;
        let mut events = Vec::new();
        while let Some(row) = rows.next()? {
            events.push(decode_event(row)?);
        }
        log::debug!(
            "loaded {} recommendable events from {}",
            events.len(),
            self.path.display()
        );
        Ok(events)
    }

    fn preference(&self, user_id: UserId) -> Result<Option<UserPreference>, Self::Error> {
        let mut statement = self.connection.prepare_cached(PREFERENCE_SQL)?;
        let row = statement
            .query_row([user_id], |row| {
                let favorite: Option<u64> = row.get(0)?;
                let budget: Option<String> = row.get(1)?;
                Ok((favorite, budget))
            })
            .optional()?;
        let Some((favorite, budget)) = row else {
            return Ok(None);
        };

        let mut preference = UserPreference::new(user_id);
        if let Some(category) = favorite {
            preference = preference.with_favorite_category(category);
        }
        if let Some(raw) = budget {
            let amount = BigDecimal::from_str(raw.trim())
                .map_err(|source| SqliteEventStoreError::InvalidBudget { user_id, source })?;
            preference = preference
                .with_budget(amount)
                .map_err(|source| SqliteEventStoreError::InvalidPreference { user_id, source })?;
        }
        Ok(Some(preference))
    }

    fn completed_purchases(&self, user_id: UserId) -> Result<Vec<TicketPurchase>, Self::Error> {
        let mut statement = self.connection.prepare_cached(PURCHASES_SQL)?;
        let mut rows = statement.query((user_id, PurchaseStatus::Completed.as_str()))?;
        let mut purchases = Vec::new();
        while let Some(row) = rows.next()? {
            let event_id: EventId = row.get(0)?;
            let category: Option<u64> = row.get(1)?;
            let raw_status: String = row.get(2)?;
            let status = PurchaseStatus::from_str(&raw_status)
                .map_err(|source| SqliteEventStoreError::InvalidPurchaseStatus { user_id, source })?;
            purchases.push(TicketPurchase::new(user_id, event_id, category, status));
        }
        Ok(purchases)
    }
}

fn decode_event(row: &Row<'_>) -> Result<Event, SqliteEventStoreError> {
    let id: EventId = row.get(0)?;
    let title: String = row.get(1)?;
    let start_date = parse_timestamp(id, "start_date", &row.get::<_, String>(2)?)?;
    let end_date = parse_timestamp(id, "end_date", &row.get::<_, String>(3)?)?;
    let raw_price: String = row.get(4)?;
    let price = BigDecimal::from_str(raw_price.trim())
        .map_err(|source| SqliteEventStoreError::InvalidPrice { id, source })?;
    let popularity: i64 = row.get(5)?;
    let is_active: bool = row.get(6)?;
    let raw_status: String = row.get(7)?;
    let approval_status = ApprovalStatus::from_str(&raw_status)
        .map_err(|source| SqliteEventStoreError::InvalidApprovalStatus { id, source })?;

    let venue = Venue {
        id: row.get(8)?,
        name: row.get(9)?,
        city: row.get(10)?,
        latitude: row.get(11)?,
        longitude: row.get(12)?,
    };
    let category_id: Option<u64> = row.get(13)?;
    let category_name: Option<String> = row.get(14)?;
    let category = category_id
        .zip(category_name)
        .map(|(category_id, name)| Category::new(category_id, name));

    let mut event = Event::new(id, title, venue, start_date, end_date, price)
        .with_popularity(Popularity::new(popularity))
        .with_active(is_active)
        .with_approval_status(approval_status);
    event.category = category;
    Ok(event)
}

fn parse_timestamp(
    id: EventId,
    field: &'static str,
    raw: &str,
) -> Result<DateTime<Utc>, SqliteEventStoreError> {
    DateTime::parse_from_rfc3339(raw.trim())
        .map(|timestamp| timestamp.with_timezone(&Utc))
        .map_err(|source| SqliteEventStoreError::InvalidTimestamp { id, field, source })
}
