//! Resolve stored preferences, purchase history and fallback hints into a
//! single [`ScoringContext`].
//!
//! Stored profile values always win over fallback hints. Hints arrive as raw
//! strings from the visitor's session and are validated here: anything
//! unusable is dropped with a warning so that ranking can proceed with the
//! remaining signals.

use geo::Coord;
use log::{debug, warn};
use marquee_core::{
    CategoryHistogram, CategoryId, CategoryPreference, FallbackHints, ScoringContext,
    TicketPurchase, UserContext, UserPreference,
};

const LATITUDE_RANGE: std::ops::RangeInclusive<f64> = -90.0..=90.0;
const LONGITUDE_RANGE: std::ops::RangeInclusive<f64> = -180.0..=180.0;

/// Category identifier that carries no preference.
const UNSET_CATEGORY_ID: CategoryId = 0;

/// Build the scoring context for one ranking request.
///
/// Precedence per dimension:
/// - budget: the stored preference budget, then the budget hint;
/// - category: the stored favourite category, then the category hint (a
///   purely numeric hint selects an identifier, anything else a name);
///   identifier `0` means no preference;
/// - history: completed purchases of the authenticated user;
/// - location: the latitude and longitude hints.
///
/// Anonymous visitors never contribute a stored preference or purchases,
/// even when the caller supplies them. Records that belong to a different
/// user are ignored as well.
///
/// # Examples
/// ```
/// use marquee_core::{CategoryPreference, FallbackHints, UserContext};
/// use marquee_scorer::resolve_context;
///
/// let hints = FallbackHints::default()
///     .with_budget("not a number")
///     .with_preferred_category("  Concert ");
/// let context = resolve_context(UserContext::Anonymous, None, &[], &hints);
/// assert_eq!(context.budget, None);
/// assert_eq!(context.category, CategoryPreference::Name("concert".into()));
/// ```
#[must_use]
pub fn resolve_context(
    user: UserContext,
    preference: Option<&UserPreference>,
    purchases: &[TicketPurchase],
    hints: &FallbackHints,
) -> ScoringContext {
    let own_preference = preference.filter(|stored| user.user_id() == Some(stored.user_id()));
    let budget = own_preference
        .and_then(UserPreference::budget_as_f64)
        .or_else(|| hints.budget.as_deref().and_then(parse_budget_hint));
    let category = own_preference
        .and_then(UserPreference::favorite_category)
        .filter(|id| *id != UNSET_CATEGORY_ID)
        .map_or_else(
            || {
                hints
                    .preferred_category
                    .as_deref()
                    .map_or(CategoryPreference::Unset, parse_category_hint)
            },
            CategoryPreference::Id,
        );
    let history = user.user_id().map_or_else(CategoryHistogram::new, |user_id| {
        CategoryHistogram::from_purchases(
            purchases
                .iter()
                .filter(|purchase| purchase.user_id == user_id),
        )
    });
    let location = parse_location_hints(hints);

    debug!(
        "resolved scoring context: location={}, budget={}, category={category:?}, history_max={}",
        location.is_some(),
        budget.is_some(),
        history.max_count(),
    );

    ScoringContext {
        location,
        budget,
        category,
        history,
    }
}

/// Parse a budget hint into a finite amount.
fn parse_budget_hint(raw: &str) -> Option<f64> {
    match raw.trim().parse::<f64>() {
        Ok(budget) if budget.is_finite() => Some(budget),
        Ok(_) | Err(_) => {
            warn!("discarding unusable budget hint {raw:?}");
            None
        }
    }
}

/// Parse a category hint into an identifier or a normalised name.
fn parse_category_hint(raw: &str) -> CategoryPreference {
    let trimmed = raw.trim();
    if !trimmed.is_empty() && trimmed.bytes().all(|byte| byte.is_ascii_digit()) {
        return trimmed.parse().map_or_else(
            |_| {
                warn!("discarding out-of-range category hint {raw:?}");
                CategoryPreference::Unset
            },
            |id| {
                if id == UNSET_CATEGORY_ID {
                    CategoryPreference::Unset
                } else {
                    CategoryPreference::Id(id)
                }
            },
        );
    }
    CategoryPreference::named(trimmed)
}

/// Parse the latitude and longitude hints into a coordinate.
fn parse_location_hints(hints: &FallbackHints) -> Option<Coord<f64>> {
    match (hints.latitude.as_deref(), hints.longitude.as_deref()) {
        (Some(raw_latitude), Some(raw_longitude)) => {
            match (
                parse_coordinate(raw_latitude, &LATITUDE_RANGE),
                parse_coordinate(raw_longitude, &LONGITUDE_RANGE),
            ) {
                (Some(y), Some(x)) => Some(Coord { x, y }),
                _ => {
                    warn!(
                        "discarding unusable location hint ({:?}, {:?})",
                        hints.latitude, hints.longitude
                    );
                    None
                }
            }
        }
        (None, None) => None,
        _ => {
            warn!("discarding location hint with a single coordinate");
            None
        }
    }
}

fn parse_coordinate(raw: &str, range: &std::ops::RangeInclusive<f64>) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && range.contains(value))
}
