//! Error types raised while building a scorer or producing recommendations.
#![forbid(unsafe_code)]

use thiserror::Error;

/// Errors raised while configuring the scorer or fetching its inputs.
///
/// Malformed event or hint data never surfaces here: it only lowers the
/// affected sub-score.
#[derive(Debug, Error)]
pub enum RecommendationError {
    /// Custom weights were negative, not finite or did not sum to one.
    #[error("score weights must be finite, non-negative and sum to 1.0")]
    InvalidWeights,
    /// Reading candidates, preferences or purchases from the store failed.
    #[error("failed to read recommendation inputs from the event store")]
    Store {
        /// Error reported by the [`EventStore`](marquee_core::EventStore).
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },
}

impl RecommendationError {
    /// Wrap an event-store failure.
    pub(crate) fn store<E>(source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Store {
            source: Box::new(source),
        }
    }
}
