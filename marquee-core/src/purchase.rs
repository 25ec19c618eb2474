//! Ticket purchase records as seen by the scorer.

use std::{fmt, str::FromStr};

use thiserror::Error;

use crate::{CategoryId, EventId, UserId};

/// Lifecycle state of a ticket purchase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PurchaseStatus {
    /// Payment started but not confirmed.
    Initiated,
    /// Payment confirmed by the gateway.
    Completed,
    /// Cancelled by the buyer.
    Canceled,
    /// Rejected by the gateway.
    Failed,
}

impl PurchaseStatus {
    /// Return the status as its lowercase storage value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Initiated => "initiated",
            Self::Completed => "completed",
            Self::Canceled => "canceled",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for PurchaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown purchase status.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown purchase status '{value}'")]
pub struct ParsePurchaseStatusError {
    /// The rejected input.
    pub value: String,
}

impl FromStr for PurchaseStatus {
    type Err = ParsePurchaseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "initiated" => Ok(Self::Initiated),
            "completed" => Ok(Self::Completed),
            "canceled" => Ok(Self::Canceled),
            "failed" => Ok(Self::Failed),
            _ => Err(ParsePurchaseStatusError {
                value: s.to_owned(),
            }),
        }
    }
}

/// A user's ticket purchase, reduced to the fields used for scoring.
///
/// `category` is derived from the purchased event and is `None` when the
/// event has no category.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TicketPurchase {
    /// Purchasing user.
    pub user_id: UserId,
    /// Purchased event.
    pub event_id: EventId,
    /// Category of the purchased event.
    pub category: Option<CategoryId>,
    /// Payment state.
    pub status: PurchaseStatus,
}

impl TicketPurchase {
    /// Construct a purchase record.
    #[must_use]
    pub const fn new(
        user_id: UserId,
        event_id: EventId,
        category: Option<CategoryId>,
        status: PurchaseStatus,
    ) -> Self {
        Self {
            user_id,
            event_id,
            category,
            status,
        }
    }

    /// Report whether the gateway confirmed the payment.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.status == PurchaseStatus::Completed
    }
}
