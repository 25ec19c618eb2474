//! Stored user preferences: favourite category and ticket budget.
//!
//! A preference record is the authoritative source of explicit preference
//! data. Fallback hints are consulted only for values it leaves unset.

use bigdecimal::{BigDecimal, ToPrimitive};
use thiserror::Error;

use crate::{CategoryId, UserId};

/// Errors returned when building a [`UserPreference`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PreferenceError {
    /// The budget was below zero.
    #[error("budget must be zero or greater, got {budget}")]
    NegativeBudget {
        /// The rejected budget.
        budget: BigDecimal,
    },
}

/// A user's saved recommendation preferences.
///
/// # Examples
/// ```
/// use bigdecimal::BigDecimal;
/// use marquee_core::UserPreference;
///
/// # fn main() -> Result<(), marquee_core::PreferenceError> {
/// let preference = UserPreference::new(42)
///     .with_favorite_category(3)
///     .with_budget(BigDecimal::from(750))?;
/// assert_eq!(preference.favorite_category(), Some(3));
/// assert_eq!(preference.budget_as_f64(), Some(750.0));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserPreference {
    user_id: UserId,
    favorite_category: Option<CategoryId>,
    budget: Option<BigDecimal>,
}

impl UserPreference {
    /// Construct an empty preference record for `user_id`.
    #[must_use]
    pub const fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            favorite_category: None,
            budget: None,
        }
    }

    /// Set the favourite category while returning `self` for chaining.
    #[must_use]
    pub fn with_favorite_category(mut self, category: CategoryId) -> Self {
        self.favorite_category = Some(category);
        self
    }

    /// Set the budget while returning `self` for chaining.
    ///
    /// # Errors
    /// Returns [`PreferenceError::NegativeBudget`] when `budget` is below
    /// zero.
    pub fn with_budget(mut self, budget: BigDecimal) -> Result<Self, PreferenceError> {
        if budget < BigDecimal::from(0) {
            return Err(PreferenceError::NegativeBudget { budget });
        }
        self.budget = Some(budget);
        Ok(self)
    }

    /// Return the owning user.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Return the favourite category, if set.
    #[must_use]
    pub const fn favorite_category(&self) -> Option<CategoryId> {
        self.favorite_category
    }

    /// Return the stored budget, if set.
    #[must_use]
    pub const fn budget(&self) -> Option<&BigDecimal> {
        self.budget.as_ref()
    }

    /// Return the budget as `f64`, if set and representable.
    #[must_use]
    pub fn budget_as_f64(&self) -> Option<f64> {
        self.budget
            .as_ref()
            .and_then(ToPrimitive::to_f64)
            .filter(|budget| budget.is_finite())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn empty_preference_has_no_values() {
        let preference = UserPreference::new(1);
        assert_eq!(preference.user_id(), 1);
        assert!(preference.favorite_category().is_none());
        assert!(preference.budget().is_none());
        assert!(preference.budget_as_f64().is_none());
    }

    #[rstest]
    #[case(0)]
    #[case(250)]
    fn accepts_non_negative_budgets(#[case] amount: i64) {
        let preference = UserPreference::new(1)
            .with_budget(BigDecimal::from(amount))
            .expect("budget should be accepted");
        assert_eq!(preference.budget(), Some(&BigDecimal::from(amount)));
    }

    #[rstest]
    fn rejects_negative_budget() {
        let err = UserPreference::new(1)
            .with_budget(BigDecimal::from(-5))
            .expect_err("negative budget should fail");
        assert!(matches!(err, PreferenceError::NegativeBudget { .. }));
    }
}
