//! Transient preference hints carried in the visitor's session.
//!
//! Hints predate stored preferences and arrive as raw strings. They are
//! only consulted when the stored preference leaves a value unset, and
//! malformed values are discarded during resolution rather than rejected
//! here.

/// Raw, unvalidated fallback values for a ranking request.
///
/// # Examples
/// ```
/// use marquee_core::FallbackHints;
///
/// let hints = FallbackHints::default()
///     .with_location("27.7172", "85.3240")
///     .with_budget("1200")
///     .with_preferred_category("concert");
/// assert_eq!(hints.budget.as_deref(), Some("1200"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FallbackHints {
    /// Latitude saved by the location prompt.
    pub latitude: Option<String>,
    /// Longitude saved by the location prompt.
    pub longitude: Option<String>,
    /// Budget entered before profiles stored one.
    pub budget: Option<String>,
    /// Category identifier or name entered before profiles stored one.
    pub preferred_category: Option<String>,
}

impl FallbackHints {
    /// Set both coordinates while returning `self` for chaining.
    #[must_use]
    pub fn with_location(mut self, latitude: impl Into<String>, longitude: impl Into<String>) -> Self {
        self.latitude = Some(latitude.into());
        self.longitude = Some(longitude.into());
        self
    }

    /// Set the budget hint while returning `self` for chaining.
    #[must_use]
    pub fn with_budget(mut self, budget: impl Into<String>) -> Self {
        self.budget = Some(budget.into());
        self
    }

    /// Set the category hint while returning `self` for chaining.
    #[must_use]
    pub fn with_preferred_category(mut self, category: impl Into<String>) -> Self {
        self.preferred_category = Some(category.into());
        self
    }
}
