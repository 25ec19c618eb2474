//! The resolved, request-scoped inputs of one ranking pass.

use geo::Coord;

use crate::{Category, CategoryHistogram, CategoryId, normalise_category_name};

/// The effective category preference after resolution.
///
/// # Examples
/// ```
/// use marquee_core::{Category, CategoryPreference};
///
/// let by_name = CategoryPreference::named("  Concert ");
/// assert_eq!(by_name, CategoryPreference::Name("concert".into()));
/// assert!(by_name.matches(&Category::new(9, "CONCERT")));
/// assert_eq!(CategoryPreference::named("   "), CategoryPreference::Unset);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryPreference {
    /// No category preference was found.
    #[default]
    Unset,
    /// Match events in the category with this identifier.
    Id(CategoryId),
    /// Match events whose category name equals this lower-cased name.
    Name(String),
}

impl CategoryPreference {
    /// Build a name preference, normalising `raw`.
    ///
    /// Blank names resolve to [`CategoryPreference::Unset`].
    #[must_use]
    pub fn named(raw: &str) -> Self {
        let name = normalise_category_name(raw);
        if name.is_empty() {
            Self::Unset
        } else {
            Self::Name(name)
        }
    }

    /// Report whether an identifier or name was resolved.
    #[must_use]
    pub const fn is_explicit(&self) -> bool {
        !matches!(self, Self::Unset)
    }

    /// Report whether `category` satisfies this preference.
    #[must_use]
    pub fn matches(&self, category: &Category) -> bool {
        match self {
            Self::Unset => false,
            Self::Id(id) => category.id == *id,
            Self::Name(name) => category.matches_name(name),
        }
    }
}

/// Everything the scorer needs to know about the visitor.
///
/// A context holds exactly one effective budget and one effective category
/// preference. It is built once per request, before any event is scored.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScoringContext {
    /// Visitor position (`x = longitude`, `y = latitude`), if known.
    pub location: Option<Coord<f64>>,
    /// Effective ticket budget, if known.
    pub budget: Option<f64>,
    /// Effective category preference.
    pub category: CategoryPreference,
    /// Completed-purchase histogram; empty for anonymous visitors.
    pub history: CategoryHistogram,
}

impl ScoringContext {
    /// Report whether the visitor expressed a category preference.
    ///
    /// When this is `true` the purchase history is ignored for the category
    /// dimension.
    #[must_use]
    pub const fn has_explicit_category_preference(&self) -> bool {
        self.category.is_explicit()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn unset_preference_matches_nothing() {
        let category = Category::new(1, "Sports");
        assert!(!CategoryPreference::Unset.matches(&category));
        assert!(!CategoryPreference::Unset.is_explicit());
    }

    #[rstest]
    #[case(CategoryPreference::Id(1), true)]
    #[case(CategoryPreference::Id(2), false)]
    #[case(CategoryPreference::named("sports"), true)]
    #[case(CategoryPreference::named("SPORTS"), true)]
    #[case(CategoryPreference::named("music"), false)]
    fn explicit_preferences_match_by_id_or_name(
        #[case] preference: CategoryPreference,
        #[case] expected: bool,
    ) {
        let category = Category::new(1, "Sports");
        assert!(preference.is_explicit());
        assert_eq!(preference.matches(&category), expected);
    }

    #[rstest]
    fn default_context_is_empty() {
        let context = ScoringContext::default();
        assert!(context.location.is_none());
        assert!(context.budget.is_none());
        assert!(!context.has_explicit_category_preference());
        assert!(context.history.is_empty());
    }
}
