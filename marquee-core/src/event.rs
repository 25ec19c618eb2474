//! Events offered for sale and the metadata the scorer reads from them.

use std::{fmt, str::FromStr};

use bigdecimal::{BigDecimal, ToPrimitive};
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::{Category, CategoryId, Venue};

/// Identifier of a persisted event.
pub type EventId = u64;

/// Moderation state of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ApprovalStatus {
    /// Awaiting review by an administrator.
    #[default]
    Pending,
    /// Approved for listing.
    Approved,
    /// Rejected by an administrator.
    Rejected,
}

impl ApprovalStatus {
    /// Return the status as its lowercase storage value.
    ///
    /// # Examples
    /// ```
    /// use marquee_core::ApprovalStatus;
    ///
    /// assert_eq!(ApprovalStatus::Approved.as_str(), "approved");
    /// ```
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for ApprovalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown approval status.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown approval status '{value}'")]
pub struct ParseApprovalStatusError {
    /// The rejected input.
    pub value: String,
}

impl FromStr for ApprovalStatus {
    type Err = ParseApprovalStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(ParseApprovalStatusError {
                value: s.to_owned(),
            }),
        }
    }
}

/// Event popularity on a one-to-five scale.
///
/// Values are clamped into `1..=5` on construction, so every instance
/// satisfies the range invariant.
///
/// # Examples
/// ```
/// use marquee_core::Popularity;
///
/// assert_eq!(Popularity::new(4).get(), 4);
/// assert_eq!(Popularity::new(0).get(), 1);
/// assert_eq!(Popularity::new(9).get(), 5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "i64", into = "u8"))]
pub struct Popularity(u8);

impl Popularity {
    /// Lowest popularity value.
    pub const MIN: u8 = 1;
    /// Highest popularity value.
    pub const MAX: u8 = 5;

    /// Construct a popularity, clamping `raw` into `1..=5`.
    #[must_use]
    pub fn new(raw: i64) -> Self {
        let clamped = raw.clamp(i64::from(Self::MIN), i64::from(Self::MAX));
        Self(u8::try_from(clamped).unwrap_or(Self::MIN))
    }

    /// Return the clamped value.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl Default for Popularity {
    fn default() -> Self {
        Self(Self::MIN)
    }
}

impl From<i64> for Popularity {
    fn from(raw: i64) -> Self {
        Self::new(raw)
    }
}

impl From<Popularity> for u8 {
    fn from(popularity: Popularity) -> Self {
        popularity.0
    }
}

/// A ticketed event hosted at a venue.
///
/// New events start active, pending approval and with the lowest
/// popularity. Only events that are both active and approved take part in
/// recommendations; see [`Event::is_recommendable`].
///
/// # Examples
/// ```
/// use bigdecimal::BigDecimal;
/// use chrono::{Duration, Utc};
/// use marquee_core::{ApprovalStatus, Category, Event, Venue};
///
/// let start = Utc::now() + Duration::days(3);
/// let event = Event::new(
///     1,
///     "Jazz at the Lakeside",
///     Venue::new(1, "Lakeside Stage", "Pokhara"),
///     start,
///     start + Duration::hours(3),
///     BigDecimal::from(1500),
/// )
/// .with_category(Category::new(2, "Concert"))
/// .with_approval_status(ApprovalStatus::Approved);
///
/// assert!(event.is_recommendable());
/// assert_eq!(event.category_id(), Some(2));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Event {
    /// Unique identifier.
    pub id: EventId,
    /// Display title.
    pub title: String,
    /// Optional category.
    #[cfg_attr(feature = "serde", serde(default))]
    pub category: Option<Category>,
    /// Hosting venue.
    pub venue: Venue,
    /// Start instant.
    pub start_date: DateTime<Utc>,
    /// End instant.
    pub end_date: DateTime<Utc>,
    /// Ticket price.
    pub price: BigDecimal,
    /// Popularity on a one-to-five scale.
    #[cfg_attr(feature = "serde", serde(default))]
    pub popularity: Popularity,
    /// Whether the event is listed.
    pub is_active: bool,
    /// Moderation state.
    #[cfg_attr(feature = "serde", serde(default))]
    pub approval_status: ApprovalStatus,
}

impl Event {
    /// Construct an active, pending event without a category.
    pub fn new(
        id: EventId,
        title: impl Into<String>,
        venue: Venue,
        start_date: DateTime<Utc>,
        end_date: DateTime<Utc>,
        price: BigDecimal,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            category: None,
            venue,
            start_date,
            end_date,
            price,
            popularity: Popularity::default(),
            is_active: true,
            approval_status: ApprovalStatus::Pending,
        }
    }

    /// Set the category while returning `self` for chaining.
    #[must_use]
    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    /// Set the popularity while returning `self` for chaining.
    #[must_use]
    pub fn with_popularity(mut self, popularity: Popularity) -> Self {
        self.popularity = popularity;
        self
    }

    /// Set the approval status while returning `self` for chaining.
    #[must_use]
    pub fn with_approval_status(mut self, status: ApprovalStatus) -> Self {
        self.approval_status = status;
        self
    }

    /// Set the active flag while returning `self` for chaining.
    #[must_use]
    pub fn with_active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    /// Report whether the event is active and approved.
    #[must_use]
    pub fn is_recommendable(&self) -> bool {
        self.is_active && self.approval_status == ApprovalStatus::Approved
    }

    /// Return the category identifier, if any.
    #[must_use]
    pub fn category_id(&self) -> Option<CategoryId> {
        self.category.as_ref().map(|category| category.id)
    }

    /// Return the price as `f64`, or `None` when it cannot be represented.
    #[must_use]
    pub fn price_as_f64(&self) -> Option<f64> {
        self.price.to_f64().filter(|price| price.is_finite())
    }
}
