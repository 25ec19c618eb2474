//! Purchase-history category histogram.
//!
//! Counts a user's completed purchases per event category. The histogram
//! provides the implicit category signal used when the user has no explicit
//! category preference.

use std::collections::HashMap;

use crate::{CategoryId, TicketPurchase};

/// Per-category count of completed purchases.
///
/// # Examples
/// ```
/// use marquee_core::{CategoryHistogram, PurchaseStatus, TicketPurchase};
///
/// let purchases = [
///     TicketPurchase::new(1, 10, Some(2), PurchaseStatus::Completed),
///     TicketPurchase::new(1, 11, Some(2), PurchaseStatus::Completed),
///     TicketPurchase::new(1, 12, Some(5), PurchaseStatus::Completed),
///     TicketPurchase::new(1, 13, Some(5), PurchaseStatus::Failed),
/// ];
/// let histogram = CategoryHistogram::from_purchases(&purchases);
/// assert_eq!(histogram.count(2), 2);
/// assert_eq!(histogram.count(5), 1);
/// assert_eq!(histogram.max_count(), 2);
/// assert_eq!(histogram.affinity(5), 0.5);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CategoryHistogram {
    counts: HashMap<CategoryId, u32>,
    max_count: u32,
}

impl CategoryHistogram {
    /// Construct an empty histogram.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a histogram from purchase records.
    ///
    /// Only completed purchases of categorised events are counted.
    pub fn from_purchases<'a, I>(purchases: I) -> Self
    where
        I: IntoIterator<Item = &'a TicketPurchase>,
    {
        let mut histogram = Self::new();
        for purchase in purchases {
            if !purchase.is_completed() {
                continue;
            }
            if let Some(category) = purchase.category {
                histogram.record(category);
            }
        }
        histogram
    }

    /// Count one completed purchase in `category`.
    pub fn record(&mut self, category: CategoryId) {
        let count = self.counts.entry(category).or_insert(0);
        *count = count.saturating_add(1);
        self.max_count = self.max_count.max(*count);
    }

    /// Return the number of completed purchases in `category`.
    #[must_use]
    pub fn count(&self, category: CategoryId) -> u32 {
        self.counts.get(&category).copied().unwrap_or(0)
    }

    /// Return the highest per-category count.
    #[must_use]
    pub const fn max_count(&self) -> u32 {
        self.max_count
    }

    /// Report whether no purchases were counted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Return `count(category) / max_count()`, or `0.0` without history.
    #[expect(
        clippy::float_arithmetic,
        reason = "affinity is the ratio of two purchase counts"
    )]
    #[must_use]
    pub fn affinity(&self, category: CategoryId) -> f64 {
        if self.max_count == 0 {
            return 0.0;
        }
        f64::from(self.count(category)) / f64::from(self.max_count)
    }
}
