//! Event categories such as concerts, conferences or sports fixtures.
//!
//! Categories are matched by identifier or by case-insensitive name.
//!
//! # Examples
//! ```
//! use marquee_core::Category;
//!
//! let concert = Category::new(3, "Concert");
//! assert!(concert.matches_name("concert"));
//! assert!(!concert.matches_name("sports"));
//! ```

/// Identifier of a persisted category.
pub type CategoryId = u64;

/// A named grouping of events.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Category {
    /// Unique identifier.
    pub id: CategoryId,
    /// Display name, e.g. `"Concert"`.
    pub name: String,
}

impl Category {
    /// Construct a category.
    pub fn new(id: CategoryId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// Report whether the category name equals `name`, ignoring case.
    ///
    /// Surrounding whitespace in `name` is ignored; the stored name is
    /// compared as-is.
    #[must_use]
    pub fn matches_name(&self, name: &str) -> bool {
        self.name.to_lowercase() == normalise_category_name(name)
    }
}

/// Lower-case and trim a free-form category name for comparison.
///
/// # Examples
/// ```
/// use marquee_core::normalise_category_name;
///
/// assert_eq!(normalise_category_name("  Jazz Night "), "jazz night");
/// ```
#[must_use]
pub fn normalise_category_name(raw: &str) -> String {
    raw.trim().to_lowercase()
}
